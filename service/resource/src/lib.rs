mod idle_resource;

pub use idle_resource::IdleResourceServiceImpl;
