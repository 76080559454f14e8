//! Transient (time-domain) integration.

pub mod advect;
pub mod rk3;
