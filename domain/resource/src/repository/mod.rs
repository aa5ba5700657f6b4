mod node_inventory;
mod partition;

#[rustfmt::skip]
pub use {
    node_inventory::NodeInventoryRepo,
    partition::PartitionRepo,
};
