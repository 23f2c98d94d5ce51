use nalgebra::{Point3, Vector3};

/// Absolute distance tolerance used when none is configured.
///
/// Coarse enough for millimetre-scale model coordinates.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Below this squared length a vector is treated as zero.
const ZERO_LENGTH_SQUARED: f64 = 1e-24;

/// Lines whose normalized cross product is shorter than this are parallel.
const PARALLEL_SINE: f64 = 1e-12;

/// A line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// First endpoint.
    pub start: Point3<f64>,
    /// Second endpoint.
    pub end: Point3<f64>,
}

impl Line {
    /// Create a segment between two points.
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// The vector from `start` to `end`.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Segment length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Unit direction from `start` to `end`, or `None` if the endpoints coincide.
    pub fn direction(&self) -> Option<Vector3<f64>> {
        let v = self.vector();
        if v.norm_squared() <= ZERO_LENGTH_SQUARED {
            return None;
        }
        Some(v / v.norm())
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point3<f64> {
        self.point_at(0.5)
    }

    /// Point at parameter `t` (`0` is `start`, `1` is `end`).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.start + self.vector() * t
    }

    /// The same segment with its endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Parameters of the mutually closest points on the infinite lines through
    /// `self` and `other`, or `None` when the lines are parallel (or either
    /// segment is degenerate).
    fn closest_parameters(&self, other: &Line) -> Option<(f64, f64)> {
        let d1 = self.vector();
        let d2 = other.vector();
        let a = d1.dot(&d1);
        let e = d2.dot(&d2);
        if a <= ZERO_LENGTH_SQUARED || e <= ZERO_LENGTH_SQUARED {
            return None;
        }
        if d1.cross(&d2).norm() <= PARALLEL_SINE * (a * e).sqrt() {
            return None;
        }

        let r = self.start - other.start;
        let b = d1.dot(&d2);
        let c = d1.dot(&r);
        let f = d2.dot(&r);
        let denom = a * e - b * b;

        let s = (b * f - c * e) / denom;
        let t = (a * f - b * c) / denom;
        Some((s, t))
    }
}

impl From<(Point3<f64>, Point3<f64>)> for Line {
    fn from((start, end): (Point3<f64>, Point3<f64>)) -> Self {
        Self::new(start, end)
    }
}

/// Closest points between the infinite lines through `a` and `b`.
///
/// Returns `(on_a, on_b)`, or `None` when the lines are parallel.
pub fn intersection_line_line(a: &Line, b: &Line) -> Option<(Point3<f64>, Point3<f64>)> {
    let (s, t) = a.closest_parameters(b)?;
    Some((a.point_at(s), b.point_at(t)))
}

/// Closest points between two segments, if both lie on their segments.
///
/// The closest points of the supporting lines are computed first; the result
/// is `None` if the lines are parallel or if either point falls outside its
/// own segment by more than `tol`.
///
/// # Example
///
/// ```
/// use rframe::geom::{intersection_segment_segment, Line};
/// use nalgebra::Point3;
///
/// let a = Line::new(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0));
/// let b = Line::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
/// let (p, q) = intersection_segment_segment(&a, &b, 1e-9).unwrap();
/// assert!(p.coords.norm() < 1e-12);
/// assert!((p - q).norm() < 1e-12);
/// ```
pub fn intersection_segment_segment(
    a: &Line,
    b: &Line,
    tol: f64,
) -> Option<(Point3<f64>, Point3<f64>)> {
    let (on_a, on_b) = intersection_line_line(a, b)?;
    if !is_point_on_segment(&on_a, a, tol) || !is_point_on_segment(&on_b, b, tol) {
        return None;
    }
    Some((on_a, on_b))
}

/// Whether `point` lies on `segment` within `tol`.
pub fn is_point_on_segment(point: &Point3<f64>, segment: &Line, tol: f64) -> bool {
    let v = segment.vector();
    let len_sq = v.norm_squared();
    if len_sq <= ZERO_LENGTH_SQUARED {
        return (point - segment.start).norm() <= tol;
    }

    let t = (point - segment.start).dot(&v) / len_sq;
    let len = len_sq.sqrt();
    if t * len < -tol || (t - 1.0) * len > tol {
        return false;
    }

    let foot = segment.point_at(t.clamp(0.0, 1.0));
    (point - foot).norm() <= tol
}
