use thiserror::Error;

/// A closed-form position-at-time function for a point whose motion is known
/// analytically.
pub type Motion = Box<dyn Fn(f64) -> (f64, f64) + Send + Sync>;

/// Errors from constructing a body.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    /// The side length must be finite and strictly positive.
    #[error("side length must be finite and > 0")]
    InvalidSideLength,

    /// The lattice needs at least two points per edge to include the corners.
    #[error("per_edge must be at least 2, got {0}")]
    TooFewPointsPerEdge(usize),
}

/// A material point: an identifier and an immutable initial position.
///
/// A point may additionally carry a closed-form motion, used for deformation
/// snapshots at arbitrary times without invoking the integrator.
pub struct Point {
    id: usize,
    x1: f64,
    x2: f64,
    motion: Option<Motion>,
}

impl Point {
    /// Creates a point at initial position `(x1, x2)`.
    #[must_use]
    pub fn new(id: usize, x1: f64, x2: f64) -> Self {
        Self {
            id,
            x1,
            x2,
            motion: None,
        }
    }

    /// Attaches a closed-form motion to the point.
    #[must_use]
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The initial position.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x1, self.x2)
    }

    /// The closed-form position at time `t`, if the motion is known.
    #[must_use]
    pub fn position_at(&self, t: f64) -> Option<(f64, f64)> {
        self.motion.as_ref().map(|motion| motion(t))
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point")
            .field("id", &self.id)
            .field("x1", &self.x1)
            .field("x2", &self.x2)
            .field("has_motion", &self.motion.is_some())
            .finish()
    }
}

/// A named, fixed collection of material points forming a square region.
///
/// The square has its lower-left corner at `(-side, 0)` and covers
/// `[-side, 0] × [0, side]`, matching the demo's reference configuration.
/// The body itself never moves; motion lives entirely in the trajectories
/// derived for its points.
#[derive(Debug)]
pub struct Body {
    name: String,
    side_length: f64,
    points: Vec<Point>,
    corner_indices: [usize; 4],
}

impl Body {
    /// Builds a square body from a `per_edge × per_edge` lattice of points.
    ///
    /// The lattice includes the boundary, so the four corners are always
    /// present. Points are ordered row-major by `x2`, then `x1`.
    ///
    /// # Errors
    ///
    /// Returns a [`BodyError`] if the side length is not positive and finite
    /// or if `per_edge < 2`.
    pub fn square(name: impl Into<String>, side: f64, per_edge: usize) -> Result<Self, BodyError> {
        Self::build_square(name, side, per_edge, None::<fn(f64, f64) -> Motion>)
    }

    /// Builds a square body and attaches a closed-form motion to each point.
    ///
    /// `motion_for` receives the initial position of a point and returns its
    /// analytic position-at-time function. Used for deformation snapshots
    /// without re-running the integrator.
    ///
    /// # Errors
    ///
    /// Returns a [`BodyError`] if the side length is not positive and finite
    /// or if `per_edge < 2`.
    pub fn square_with_motion(
        name: impl Into<String>,
        side: f64,
        per_edge: usize,
        motion_for: impl Fn(f64, f64) -> Motion,
    ) -> Result<Self, BodyError> {
        Self::build_square(name, side, per_edge, Some(motion_for))
    }

    fn build_square(
        name: impl Into<String>,
        side: f64,
        per_edge: usize,
        motion_for: Option<impl Fn(f64, f64) -> Motion>,
    ) -> Result<Self, BodyError> {
        if !side.is_finite() || side <= 0.0 {
            return Err(BodyError::InvalidSideLength);
        }
        if per_edge < 2 {
            return Err(BodyError::TooFewPointsPerEdge(per_edge));
        }

        let spacing = side / (per_edge - 1) as f64;
        let mut points = Vec::with_capacity(per_edge * per_edge);

        for j in 0..per_edge {
            let x2 = spacing * j as f64;
            for i in 0..per_edge {
                let x1 = -side + spacing * i as f64;
                let id = points.len();
                let mut point = Point::new(id, x1, x2);
                if let Some(motion_for) = &motion_for {
                    point = point.with_motion(motion_for(x1, x2));
                }
                points.push(point);
            }
        }

        // Corner order traces the square's outline: lower-left, lower-right,
        // upper-right, upper-left.
        let corner_indices = [
            0,
            per_edge - 1,
            per_edge * per_edge - 1,
            per_edge * (per_edge - 1),
        ];

        Ok(Self {
            name: name.into(),
            side_length: side,
            points,
            corner_indices,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The square's side length.
    #[must_use]
    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    /// Every point of the body, in lattice order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The four corner points, in outline order.
    pub fn corner_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.corner_indices.iter().map(|&i| &self.points[i])
    }

    /// The corner positions at time `t` from each corner's closed-form
    /// motion, in outline order. `None` if any corner lacks a motion.
    #[must_use]
    pub fn corner_positions_at(&self, t: f64) -> Option<Vec<(f64, f64)>> {
        self.corner_points().map(|p| p.position_at(t)).collect()
    }
}

/// The closed-form motion of a point under the demo's default field.
///
/// For `A(t) = -sin(t)` and `B(t) = t` the field's ODE decouples and solves
/// analytically:
///
/// ```text
/// x1(t) = x1₀ · e^(1 − cos t)
/// x2(t) = x2₀ · e^(t²/2)
/// ```
#[must_use]
pub fn default_field_motion(x1_0: f64, x2_0: f64) -> Motion {
    Box::new(move |t| {
        let x1 = x1_0 * (1.0 - t.cos()).exp();
        let x2 = x2_0 * (0.5 * t * t).exp();
        (x1, x2)
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn square_lattice_layout() {
        let body = Body::square("square", 2.0, 3).unwrap();

        assert_eq!(body.points().len(), 9);
        assert_relative_eq!(body.side_length(), 2.0);

        // Row-major by x2: first point is the lower-left corner.
        assert_eq!(body.points()[0].position(), (-2.0, 0.0));
        assert_eq!(body.points()[4].position(), (-1.0, 1.0));
        assert_eq!(body.points()[8].position(), (0.0, 2.0));
    }

    #[test]
    fn corners_trace_the_outline() {
        let body = Body::square("square", 1.0, 4).unwrap();

        let corners: Vec<(f64, f64)> = body.corner_points().map(Point::position).collect();
        assert_eq!(
            corners,
            vec![(-1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (-1.0, 1.0)]
        );
    }

    #[test]
    fn rejects_degenerate_construction() {
        assert!(matches!(
            Body::square("square", 0.0, 3),
            Err(BodyError::InvalidSideLength)
        ));
        assert!(matches!(
            Body::square("square", f64::NAN, 3),
            Err(BodyError::InvalidSideLength)
        ));
        assert!(matches!(
            Body::square("square", 1.0, 1),
            Err(BodyError::TooFewPointsPerEdge(1))
        ));
    }

    #[test]
    fn default_field_motion_starts_at_the_initial_position() {
        let motion = default_field_motion(-1.5, 0.5);

        let (x1, x2) = motion(0.0);
        assert_relative_eq!(x1, -1.5);
        assert_relative_eq!(x2, 0.5);
    }

    #[test]
    fn corner_positions_at_requires_motion() {
        let body = Body::square("static", 1.0, 2).unwrap();
        assert!(body.corner_positions_at(1.0).is_none());

        let body =
            Body::square_with_motion("moving", 1.0, 2, |x1, x2| default_field_motion(x1, x2))
                .unwrap();
        let corners = body.corner_positions_at(0.0).unwrap();
        assert_eq!(corners.len(), 4);
        assert_relative_eq!(corners[0].0, -1.0);
        assert_relative_eq!(corners[0].1, 0.0);
    }
}
