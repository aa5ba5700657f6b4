pub mod node_sample;

#[rustfmt::skip]
pub use {
    node_sample::NodeResourceSample,
    node_sample::NodeState,
};
