use thiserror::Error;

use crate::expr::{self, ExprError};

/// A scalar coefficient function of time.
pub type Coefficient = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Errors from constructing a velocity field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A textual coefficient is not a valid expression in the restricted
    /// grammar. Construction fails eagerly; there is no silent fallback.
    #[error("invalid coefficient expression: {0}")]
    InvalidExpression(#[from] ExprError),
}

/// The linear, time-varying velocity-field family
/// `v1 = -A(t)·x1`, `v2 = B(t)·x2`.
///
/// Stateless aside from the two coefficient functions, which are fixed at
/// construction. Evaluation is a pure function of `(t, x1, x2)`.
pub struct LinearField {
    a: Coefficient,
    b: Coefficient,
}

impl LinearField {
    /// Creates a field from typed coefficient closures.
    pub fn new(
        a: impl Fn(f64) -> f64 + Send + Sync + 'static,
        b: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    /// Creates a field from textual coefficient expressions.
    ///
    /// The expressions are parsed with the restricted grammar in
    /// [`crate::expr`]; they are never executed as code.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidExpression`] if either expression fails
    /// to parse.
    pub fn parse(a_expr: &str, b_expr: &str) -> Result<Self, FieldError> {
        let a = expr::parse(a_expr)?;
        let b = expr::parse(b_expr)?;
        Ok(Self {
            a: Box::new(move |t| a.eval(t)),
            b: Box::new(move |t| b.eval(t)),
        })
    }

    /// The instantaneous velocity at position `(x1, x2)` and time `t`.
    #[must_use]
    pub fn velocity_at(&self, t: f64, x1: f64, x2: f64) -> (f64, f64) {
        let v1 = -(self.a)(t) * x1;
        let v2 = (self.b)(t) * x2;
        (v1, v2)
    }

    /// Evaluates the field over the outer product of two coordinate axes.
    ///
    /// Rows of the result follow `x2_values`, columns follow `x1_values`,
    /// matching the standard grid-evaluation convention consumed by vector
    /// and stream plots. The axes may have different lengths; length-1 axes
    /// behave identically to [`Self::velocity_at`].
    #[must_use]
    pub fn velocity_grid(&self, t: f64, x1_values: &[f64], x2_values: &[f64]) -> FieldGrid {
        let rows = x2_values.len();
        let cols = x1_values.len();
        let mut v1 = Vec::with_capacity(rows * cols);
        let mut v2 = Vec::with_capacity(rows * cols);

        for &x2 in x2_values {
            for &x1 in x1_values {
                let (u, v) = self.velocity_at(t, x1, x2);
                v1.push(u);
                v2.push(v);
            }
        }

        FieldGrid { rows, cols, v1, v2 }
    }
}

impl Default for LinearField {
    /// The demo's default field: `A(t) = -sin(t)`, `B(t) = t`.
    fn default() -> Self {
        Self::new(|t| -t.sin(), |t| t)
    }
}

/// Velocity components evaluated over a rectangular grid of positions.
///
/// Row-major storage; row `r` corresponds to `x2_values[r]` and column `c`
/// to `x1_values[c]` of the [`LinearField::velocity_grid`] call that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    rows: usize,
    cols: usize,
    v1: Vec<f64>,
    v2: Vec<f64>,
}

impl FieldGrid {
    /// Number of rows (one per `x2` coordinate).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (one per `x1` coordinate).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `v1` component at grid node `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the node is out of bounds.
    #[must_use]
    pub fn v1(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "grid node out of bounds");
        self.v1[row * self.cols + col]
    }

    /// The `v2` component at grid node `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the node is out of bounds.
    #[must_use]
    pub fn v2(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "grid node out of bounds");
        self.v2[row * self.cols + col]
    }
}
