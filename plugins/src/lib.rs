pub mod device;
pub mod factory;
pub mod probe;
pub mod services;
pub mod store;
