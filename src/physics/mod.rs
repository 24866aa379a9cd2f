//! Pointer-following markers on constrained springs.

pub(crate) mod engine;
pub(crate) mod rng;
pub(crate) mod spring;
