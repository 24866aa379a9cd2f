//! The runtime that wires smoothing, pins, stages, recovery and springs to a host.

pub(crate) mod config;
pub(crate) mod driver;
pub(crate) mod env;
pub(crate) mod scope;
