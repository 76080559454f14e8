use kinema_core::{State, Trajectory};

/// The result of a fixed-step integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const N: usize> {
    /// Every `(t, y)` sample in order, starting with the initial condition.
    pub steps: Vec<State<N>>,

    /// Number of right-hand-side evaluations performed.
    ///
    /// Always `3 · (steps.len() − 1)` for the 3-stage scheme.
    pub evaluations: u32,
}

impl<const N: usize> Solution<N> {
    /// The time grid of the run.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|s| s.t)
    }

    /// Consumes the solution into the trajectory it produced.
    #[must_use]
    pub fn into_trajectory(self) -> Trajectory<N> {
        Trajectory::new(self.steps)
    }
}
