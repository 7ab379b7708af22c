// Domain layer: movie records, category counts and the ports the pipeline talks through.

pub mod model;
pub mod ports;
