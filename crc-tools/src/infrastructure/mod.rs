pub mod keystone;
pub mod service_provider;
pub mod shell;
pub mod slurm;

pub use service_provider::ServiceProvider;
