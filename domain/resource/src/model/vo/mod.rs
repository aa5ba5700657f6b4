pub mod cluster_type;
pub mod idle;
pub mod record;

#[rustfmt::skip]
pub use {
    cluster_type::ClusterTypes,
    cluster_type::ResourceKind,
    idle::IdleBucket,
    idle::IdleResources,
    record::KeyValueRecord,
    record::RecordError,
};
