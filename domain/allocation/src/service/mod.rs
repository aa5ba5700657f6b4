mod allocation;
mod usage_reconcile;

#[rustfmt::skip]
pub use {
    allocation::AllocationService,
    usage_reconcile::UsageReconcileService,
};
