//! Numerical solvers for the kinema deformation demo.
//!
//! The only solver here is [`transient::rk3`], a fixed-step explicit
//! 3-stage Runge–Kutta scheme, plus the advection wiring in
//! [`transient::advect`] that connects material points to the solver
//! through a velocity field.

pub mod transient;
