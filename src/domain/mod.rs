// Domain layer: catalog and package models plus the ports adapters implement.

pub mod model;
pub mod ports;
