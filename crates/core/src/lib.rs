//! Core types for the kinema deformation demo.
//!
//! This crate defines the shared abstractions that the solver and the
//! renderer build on:
//!
//! - [`State`] — a single `(t, y)` integration sample
//! - [`Trajectory`] — the ordered time/state history of one material point
//! - [`LinearField`] — the `v1 = -A(t)·x1, v2 = B(t)·x2` velocity-field family
//! - [`Point`] and [`Body`] — material points and the square body they form
//! - [`expr`] — a restricted arithmetic grammar for textual coefficients

pub mod expr;

mod body;
mod field;
mod state;
mod trajectory;

pub use body::{Body, BodyError, Motion, Point, default_field_motion};
pub use field::{Coefficient, FieldError, FieldGrid, LinearField};
pub use state::State;
pub use trajectory::{Trajectory, TrajectoryError};
