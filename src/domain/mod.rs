// Domain layer: wire payloads and the ports the core is written against.

pub mod model;
pub mod ports;
