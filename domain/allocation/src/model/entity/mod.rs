pub mod allocation;
pub mod request;
pub mod summary;

#[rustfmt::skip]
pub use {
    allocation::ClusterAllocation,
    request::AllocationRequest,
    request::RequestStatus,
    summary::UsageSummary,
};
