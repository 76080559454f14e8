use thiserror::Error;

use crate::State;

/// Errors from trajectory accessors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryError {
    /// The trajectory holds no samples.
    #[error("trajectory has no samples")]
    Empty,
}

/// The ordered time/state history of one integrated point.
///
/// Samples are strictly increasing in `t`. A trajectory is appended to only
/// while it is being integrated and is never mutated afterwards; the first
/// sample is always the initial condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<const N: usize> {
    samples: Vec<State<N>>,
}

impl<const N: usize> Trajectory<N> {
    /// Wraps a finished sequence of samples.
    #[must_use]
    pub fn new(samples: Vec<State<N>>) -> Self {
        Self { samples }
    }

    /// Number of samples, including the initial condition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All `(t, y)` samples in order.
    #[must_use]
    pub fn samples(&self) -> &[State<N>] {
        &self.samples
    }

    /// The time coordinate of every sample, in order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    /// The last sample of the trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::Empty`] if the trajectory holds no samples.
    /// A solver-produced trajectory always holds at least the initial
    /// condition, so this is guarding the unreachable.
    pub fn final_state(&self) -> Result<State<N>, TrajectoryError> {
        self.samples.last().copied().ok_or(TrajectoryError::Empty)
    }
}

impl Trajectory<2> {
    /// The position component of every sample, in order.
    pub fn positions(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.samples.iter().map(|s| s.y)
    }

    /// The position of the last sample.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::Empty`] if the trajectory holds no samples.
    pub fn final_position(&self) -> Result<(f64, f64), TrajectoryError> {
        let state = self.final_state()?;
        Ok((state.y[0], state.y[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_state_of_single_sample_is_the_initial_condition() {
        let trajectory = Trajectory::new(vec![State::new(0.0, [1.0, 2.0])]);

        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.final_position().unwrap(), (1.0, 2.0));
    }

    #[test]
    fn empty_trajectory_is_an_error() {
        let trajectory: Trajectory<2> = Trajectory::new(Vec::new());

        assert_eq!(trajectory.final_state(), Err(TrajectoryError::Empty));
        assert_eq!(trajectory.final_position(), Err(TrajectoryError::Empty));
    }

    #[test]
    fn times_follow_sample_order() {
        let trajectory = Trajectory::new(vec![
            State::new(0.0, [0.0]),
            State::new(0.5, [1.0]),
            State::new(1.0, [2.0]),
        ]);

        let times: Vec<f64> = trajectory.times().collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }
}
