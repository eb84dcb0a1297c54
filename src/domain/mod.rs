// Domain layer: core models and ports (interfaces). No network or output code here.

pub mod model;
pub mod ports;
