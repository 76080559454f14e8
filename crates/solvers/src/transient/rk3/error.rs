use thiserror::Error;

/// Errors that can occur when configuring or starting an integration.
///
/// All variants are detected eagerly at the API boundary, before any
/// stepping begins; the solver never returns a partial trajectory on
/// failure. Non-finite values produced by the right-hand side are not
/// errors — they propagate through subsequent samples.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// The step size must be finite and strictly positive.
    #[error("invalid step size: dt = {dt} must be finite and > 0")]
    InvalidStepSize { dt: f64 },

    /// The end time must be finite and must not precede the start time.
    /// `t_end == t_start` is allowed and yields a single-sample run.
    #[error("invalid time span: t_start = {t_start}, t_end = {t_end}")]
    InvalidTimeSpan { t_start: f64, t_end: f64 },
}
