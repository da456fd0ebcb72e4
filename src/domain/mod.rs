// Domain layer: wire entities, errors, and the transport port.

pub mod entities;
pub mod errors;
pub mod ports;
