mod allocation;
mod usage_reconcile;

#[rustfmt::skip]
pub use {
    allocation::AllocationServiceImpl,
    usage_reconcile::UsageReconcileServiceImpl,
};
