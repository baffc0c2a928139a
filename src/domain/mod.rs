// Domain layer: request/response models and the ports the fetcher depends on.

pub mod model;
pub mod ports;
