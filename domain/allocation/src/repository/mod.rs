mod account;
mod allocation;
mod usage;

#[rustfmt::skip]
pub use {
    account::AccountRepo,
    allocation::AllocationRepo,
    usage::UsageRepo,
};
