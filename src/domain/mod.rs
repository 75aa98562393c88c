// Domain layer: reference data model, request/response contract and ports.

pub mod contract;
pub mod model;
pub mod ports;
