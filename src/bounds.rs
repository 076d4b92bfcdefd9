use crate::error::{ClipError, PolygonDefect};
use crate::geometry::{Point, cross, length, signed_area, sub};

/// A convex, counter-clockwise polygon that every cell is clipped against.
///
/// Construction validates the shape, so a `BoundingPolygon` always satisfies the
/// clipper's preconditions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
pub struct BoundingPolygon {
    points: Vec<Point>,
}

impl BoundingPolygon {
    /// Validates `points` as a convex CCW polygon.
    ///
    /// Collinear vertices along an edge are accepted.
    pub fn new(points: Vec<Point>) -> Result<Self, ClipError> {
        validate(&points).map_err(ClipError::InvalidBoundingPolygon)?;
        Ok(Self { points })
    }

    /// The axis-aligned rectangle `[min, max]`, starting at the bottom-left corner.
    pub fn from_box(min: Point, max: Point) -> Result<Self, ClipError> {
        Self::new(vec![
            [min[0], min[1]], // 0: Bottom-Left
            [max[0], min[1]], // 1: Bottom-Right
            [max[0], max[1]], // 2: Top-Right
            [min[0], max[1]], // 3: Top-Left
        ])
    }

    /// A regular polygon with `sides` vertices on the circle of `radius` around `center`.
    pub fn regular(center: Point, radius: f64, sides: usize) -> Result<Self, ClipError> {
        let angle_step = std::f64::consts::TAU / sides as f64;
        let points = (0..sides)
            .map(|i| {
                let angle = i as f64 * angle_step;
                [center[0] + radius * angle.cos(), center[1] + radius * angle.sin()]
            })
            .collect();
        Self::new(points)
    }

    /// Builds a polygon from a flat `[x, y, x, y, ...]` array.
    pub fn from_flat(coords: &[f64]) -> Result<Self, ClipError> {
        if coords.len() % 2 != 0 {
            return Err(ClipError::InvalidBoundingPolygon(
                PolygonDefect::OddCoordinateCount(coords.len()),
            ));
        }
        Self::new(coords.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }
}

fn validate(points: &[Point]) -> Result<(), PolygonDefect> {
    let n = points.len();
    if n < 3 {
        return Err(PolygonDefect::TooFewVertices(n));
    }
    if let Some(i) = points.iter().position(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return Err(PolygonDefect::NonFinite(i));
    }

    let area = signed_area(points);
    let extent = points
        .iter()
        .map(|p| length(sub(*p, points[0])))
        .fold(0.0, f64::max);
    if area.abs() <= 1e-12 * extent * extent {
        return Err(PolygonDefect::Degenerate);
    }
    if area < 0.0 {
        return Err(PolygonDefect::Clockwise);
    }

    // Every turn must bend left, and the turns must add up to a single revolution.
    let mut turning = 0.0;
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let a = sub(points[i], prev);
        let b = sub(next, points[i]);
        let (la, lb) = (length(a), length(b));
        if la == 0.0 || lb == 0.0 {
            return Err(PolygonDefect::Degenerate);
        }
        let c = cross(a, b);
        if c / (la * lb) < -1e-9 {
            return Err(PolygonDefect::Concave(i));
        }
        turning += c.atan2(a[0] * b[0] + a[1] * b[1]);
    }
    if turning > std::f64::consts::TAU + 1e-6 {
        return Err(PolygonDefect::SelfIntersecting);
    }
    Ok(())
}
