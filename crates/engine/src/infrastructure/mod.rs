//! Infrastructure: port traits and adapters.

pub mod loopback;
pub mod ports;
