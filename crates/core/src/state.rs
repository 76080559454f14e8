/// A single integration sample.
///
/// Pairs the independent variable (time, for this demo) with the state
/// vector at that instant. A new `State` is produced at each step of an
/// integration; existing samples are never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State<const N: usize> {
    /// The independent variable.
    pub t: f64,

    /// The state vector at `t`.
    pub y: [f64; N],
}

impl<const N: usize> State<N> {
    /// Creates a sample at `t` with state vector `y`.
    #[must_use]
    pub fn new(t: f64, y: [f64; N]) -> Self {
        Self { t, y }
    }
}
