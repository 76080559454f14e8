use super::Error;

/// How the per-stage step size `h` is chosen when `(t_end − t0)` is not an
/// exact multiple of `dt`.
///
/// The returned time grid is always `n` evenly spaced points from `t0` to
/// `t_end` with `n = floor((t_end − t0)/dt) + 1`. For non-divisible spans
/// the even spacing differs from the nominal `dt`, and the two variants
/// resolve that divergence differently. They agree exactly when the span is
/// a multiple of `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageStep {
    /// Use the literal `dt` inside the stage formulas regardless of the grid
    /// spacing. Faithful to the reference scheme.
    #[default]
    Nominal,

    /// Recompute `h` as `(t_end − t0)/(n − 1)`, keeping the stage step
    /// consistent with the even grid.
    GridSpacing,
}

/// Configuration for the fixed-step solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    dt: f64,
    stage_step: StageStep,
}

impl Default for Config {
    fn default() -> Self {
        // The demo's reference step size. Known-good, unwrap is safe.
        Self::new(0.05).unwrap()
    }
}

impl Config {
    /// Creates a config with a validated step size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStepSize`] if `dt` is not finite and
    /// strictly positive.
    pub fn new(dt: f64) -> Result<Self, Error> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidStepSize { dt });
        }

        Ok(Self {
            dt,
            stage_step: StageStep::default(),
        })
    }

    /// Overrides the stage-step policy.
    #[must_use]
    pub fn with_stage_step(mut self, stage_step: StageStep) -> Self {
        self.stage_step = stage_step;
        self
    }

    /// The nominal step size.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The stage-step policy.
    #[must_use]
    pub fn stage_step(&self) -> StageStep {
        self.stage_step
    }
}
