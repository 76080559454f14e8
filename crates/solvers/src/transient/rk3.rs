//! Fixed-step explicit 3-stage Runge–Kutta integration.
//!
//! This is the demo's core: it advances a state vector under a
//! right-hand-side function `f(t, y) -> dy/dt` with the specific 3-stage
//! scheme
//!
//! ```text
//! k1 = f(t,       y)
//! k2 = f(t + h/2, y + (h/2)·k1)
//! k3 = f(t + h,   y − h·k1 + 2h·k2)
//! y' = y + h·(k1/6 + 2·k2/3 + k3/6)
//! ```
//!
//! The coefficients are fixed. Downstream numerical output depends on this
//! exact tableau, so it must not be swapped for a generic RK3/RK4.
//!
//! The solver is a stateless pure function of its inputs: deterministic, no
//! adaptive stepping, re-entrant, and safe to invoke concurrently for
//! independent state vectors.

mod config;
mod error;
mod solution;

pub use config::{Config, StageStep};
pub use error::Error;
pub use solution::Solution;

use kinema_core::State;

/// Integrates `rhs` from `initial` to `t_end` with a fixed step.
///
/// The run produces `n = floor((t_end − t0)/dt) + 1` samples on an even time
/// grid from `t0` to `t_end`; the first sample is `initial` and, for `n ≥ 2`,
/// the last grid point is exactly `t_end`. When `dt` exceeds the span the
/// run degenerates to the single initial sample. `rhs` is invoked exactly
/// `3·(n − 1)` times.
///
/// Non-finite values returned by `rhs` are not errors: they propagate into
/// subsequent samples and the solver never panics on them. Callers decide
/// how to treat non-finite output.
///
/// # Errors
///
/// Returns [`Error::InvalidTimeSpan`] if `t_end` is not finite or precedes
/// `initial.t`. Step-size validation happens in [`Config::new`]. All errors
/// are detected before any stepping begins.
pub fn solve<const N: usize, F>(
    rhs: F,
    initial: State<N>,
    t_end: f64,
    config: &Config,
) -> Result<Solution<N>, Error>
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    let t0 = initial.t;
    if !t0.is_finite() || !t_end.is_finite() || t_end < t0 {
        return Err(Error::InvalidTimeSpan { t_start: t0, t_end });
    }

    let dt = config.dt();
    let span = t_end - t0;
    let n = (span / dt).floor() as usize + 1;
    let times = time_grid(t0, t_end, n);

    let h = match config.stage_step() {
        StageStep::Nominal => dt,
        StageStep::GridSpacing if n > 1 => span / (n - 1) as f64,
        StageStep::GridSpacing => dt,
    };

    let mut steps = Vec::with_capacity(n);
    steps.push(initial);
    let mut evaluations = 0u32;

    for i in 1..n {
        let State { t, y } = steps[i - 1];

        let k1 = rhs(t, &y);
        let y2: [f64; N] = std::array::from_fn(|j| y[j] + (h / 2.0) * k1[j]);
        let k2 = rhs(t + h / 2.0, &y2);
        let y3: [f64; N] = std::array::from_fn(|j| y[j] - h * k1[j] + 2.0 * h * k2[j]);
        let k3 = rhs(t + h, &y3);
        evaluations += 3;

        let next: [f64; N] =
            std::array::from_fn(|j| y[j] + h * (k1[j] / 6.0 + 2.0 * k2[j] / 3.0 + k3[j] / 6.0));
        steps.push(State::new(times[i], next));
    }

    Ok(Solution { steps, evaluations })
}

/// `n` evenly spaced points from `t0` to `t_end`, last point exact.
fn time_grid(t0: f64, t_end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![t0];
    }

    let spacing = (t_end - t0) / (n - 1) as f64;
    let mut times: Vec<f64> = (0..n).map(|i| t0 + spacing * i as f64).collect();
    times[n - 1] = t_end;
    times
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn grid_is_even_with_expected_length() {
        let config = Config::new(0.1).unwrap();
        let solution = solve(|_, _| [0.0, 0.0], State::new(0.0, [1.0, 2.0]), 1.0, &config)
            .expect("should solve");

        let times: Vec<f64> = solution.times().collect();
        assert_eq!(times.len(), 11);
        assert_relative_eq!(times[0], 0.0);
        assert_relative_eq!(*times.last().unwrap(), 1.0);
        for pair in times.windows(2) {
            assert_abs_diff_eq!(pair[1] - pair[0], 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_field_is_stationary() {
        let config = Config::new(0.1).unwrap();
        let solution = solve(|_, _| [0.0, 0.0], State::new(0.0, [1.0, 2.0]), 1.0, &config)
            .expect("should solve");

        assert_eq!(solution.steps.len(), 11);
        for step in &solution.steps {
            assert_eq!(step.y, [1.0, 2.0]);
        }
    }

    #[test]
    fn counts_three_evaluations_per_step() {
        let config = Config::new(0.05).unwrap();
        let solution =
            solve(|_, y| [y[1], -y[0]], State::new(0.0, [1.0, 0.0]), 2.0, &config).unwrap();

        assert_eq!(solution.steps.len(), 41);
        assert_eq!(solution.evaluations, 3 * 40);
    }

    #[test]
    fn single_step_matches_the_tableau_by_hand() {
        // dy/dt = y², y(0) = 1, one step of h = 0.2:
        //   k1 = 1
        //   k2 = (1 + 0.1)² = 1.21
        //   k3 = (1 − 0.2 + 0.4·1.21)² = 1.284² = 1.648656
        //   y₁ = 1 + 0.2·(k1/6 + 2·k2/3 + k3/6) = 1.2496218666666...
        let config = Config::new(0.2).unwrap();
        let solution = solve(|_, y| [y[0] * y[0]], State::new(0.0, [1.0]), 0.2, &config).unwrap();

        assert_eq!(solution.steps.len(), 2);
        assert_relative_eq!(
            solution.steps[1].y[0],
            1.249_621_866_666_666_6,
            max_relative = 1e-14
        );
    }

    #[test]
    fn invalid_step_sizes_are_rejected() {
        assert_eq!(Config::new(0.0), Err(Error::InvalidStepSize { dt: 0.0 }));
        assert_eq!(Config::new(-1.0), Err(Error::InvalidStepSize { dt: -1.0 }));
        assert!(matches!(
            Config::new(f64::NAN),
            Err(Error::InvalidStepSize { .. })
        ));
    }

    #[test]
    fn reversed_time_span_is_rejected() {
        let config = Config::new(0.1).unwrap();
        let result = solve(|_, y: &[f64; 1]| *y, State::new(1.0, [1.0]), 0.0, &config);

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidTimeSpan {
                t_start: 1.0,
                t_end: 0.0
            }
        );
    }

    #[test]
    fn degenerate_span_returns_the_initial_sample() {
        let config = Config::new(0.1).unwrap();
        let solution = solve(|_, y: &[f64; 2]| *y, State::new(2.0, [3.0, 4.0]), 2.0, &config)
            .expect("should solve");

        assert_eq!(solution.steps, vec![State::new(2.0, [3.0, 4.0])]);
        assert_eq!(solution.evaluations, 0);

        let trajectory = solution.into_trajectory();
        assert_eq!(trajectory.final_position().unwrap(), (3.0, 4.0));
    }

    #[test]
    fn non_finite_rhs_output_propagates_without_panicking() {
        let config = Config::new(0.25).unwrap();
        let solution = solve(
            |t, y: &[f64; 1]| if t >= 0.5 { [f64::NAN] } else { *y },
            State::new(0.0, [1.0]),
            1.0,
            &config,
        )
        .expect("validation passes; NaN is not an error");

        assert_eq!(solution.steps.len(), 5);
        assert!(solution.steps.last().unwrap().y[0].is_nan());
    }

    #[test]
    fn stage_step_variants_agree_on_divisible_spans() {
        let rhs = |t: f64, y: &[f64; 1]| [t * y[0]];
        let initial = State::new(0.0, [1.0]);

        let nominal = Config::new(0.1).unwrap();
        let from_grid = Config::new(0.1)
            .unwrap()
            .with_stage_step(StageStep::GridSpacing);

        let a = solve(rhs, initial, 1.0, &nominal).unwrap();
        let b = solve(rhs, initial, 1.0, &from_grid).unwrap();

        assert_eq!(a.steps.len(), b.steps.len());
        for (sa, sb) in a.steps.iter().zip(&b.steps) {
            assert_abs_diff_eq!(sa.y[0], sb.y[0], epsilon = 1e-12);
        }
    }

    #[test]
    fn non_divisible_span_keeps_the_grid_even() {
        // span/dt = 3.33..: 4 samples, even spacing 1/3, last point exact.
        let config = Config::new(0.3).unwrap();
        let solution = solve(|_, _| [0.0], State::new(0.0, [1.0]), 1.0, &config).unwrap();

        let times: Vec<f64> = solution.times().collect();
        assert_eq!(times.len(), 4);
        assert_relative_eq!(*times.last().unwrap(), 1.0);
        for pair in times.windows(2) {
            assert_abs_diff_eq!(pair[1] - pair[0], 1.0 / 3.0, epsilon = 1e-12);
        }
    }
}
