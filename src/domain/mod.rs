// Domain layer: casing policy, request/response descriptors, storefront records and ports.

pub mod model;
pub mod ports;
pub mod store;
