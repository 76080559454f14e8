//! Advection of material points through a velocity field.
//!
//! This wires a point's initial position into the fixed-step solver, using
//! the velocity field as the right-hand side of the ODE
//! `dy/dt = v(t, y)`.

use kinema_core::{Body, LinearField, Point, State, Trajectory};

use super::rk3::{self, Config, Error};

/// Integrates one point's trajectory through `field` from `t0` to `t_end`.
///
/// The right-hand side is `f(t, y) = field.velocity_at(t, y[0], y[1])`.
///
/// # Errors
///
/// Returns an [`Error`] if the time span is invalid; step-size validation
/// happens when `config` is built.
pub fn advect_point(
    field: &LinearField,
    point: &Point,
    t0: f64,
    t_end: f64,
    config: &Config,
) -> Result<Trajectory<2>, Error> {
    let rhs = |t: f64, y: &[f64; 2]| {
        let (v1, v2) = field.velocity_at(t, y[0], y[1]);
        [v1, v2]
    };

    let (x1, x2) = point.position();
    let solution = rk3::solve(rhs, State::new(t0, [x1, x2]), t_end, config)?;
    Ok(solution.into_trajectory())
}

/// Integrates a trajectory for every point of `body`, aligned by point index.
///
/// Each integration only reads its own inputs and writes its own trajectory,
/// so the points are independent of one another.
///
/// # Errors
///
/// Returns the first [`Error`] encountered; the inputs are identical for
/// every point, so in practice either all integrations run or none do.
pub fn advect_body(
    field: &LinearField,
    body: &Body,
    t0: f64,
    t_end: f64,
    config: &Config,
) -> Result<Vec<Trajectory<2>>, Error> {
    body.points()
        .iter()
        .map(|point| advect_point(field, point, t0, t_end, config))
        .collect()
}
