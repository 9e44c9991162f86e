// Domain layer: batch records and the storage port. No knowledge of the CLI.

pub mod model;
pub mod ports;
