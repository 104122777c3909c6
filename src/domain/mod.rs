// Domain layer: publication models and the publisher port.

pub mod model;
pub mod ports;
