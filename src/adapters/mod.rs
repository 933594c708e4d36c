/// Adapter implementations of the port traits
pub mod services;
pub mod speech;
