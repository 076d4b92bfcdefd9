//! Planar primitives shared by the clipper and the driver.
//!
//! Points are plain `[x, y]` arrays. All predicates take their tolerance explicitly so
//! the caller's [`ClipConfig`](crate::ClipConfig) flows through unchanged.

/// A 2D coordinate `[x, y]`.
pub type Point = [f64; 2];

/// Default distance within which a point counts as lying on a line.
pub const SIDE_EPSILON: f64 = 1e-9;
/// Default normalised determinant below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-12;

#[inline]
pub fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
pub fn add_scaled(a: Point, d: Point, t: f64) -> Point {
    [a[0] + d[0] * t, a[1] + d[1] * t]
}

#[inline]
pub fn neg(a: Point) -> Point {
    [-a[0], -a[1]]
}

/// z-component of the 3D cross product of `a` and `b`.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

#[inline]
pub fn length(a: Point) -> f64 {
    (a[0] * a[0] + a[1] * a[1]).sqrt()
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    length(sub(a, b))
}

/// Distance of `point` from the directed line, positive on its left.
///
/// A zero `direction` yields `0.0`.
pub fn signed_distance(point: Point, origin: Point, direction: Point) -> f64 {
    let len = length(direction);
    if len == 0.0 {
        return 0.0;
    }
    cross(direction, sub(point, origin)) / len
}

/// Returns true if `point` lies to the left of the directed line through `origin` along
/// `direction`, or within `eps` of it.
///
/// The left side is the inside of a counter-clockwise polygon. Points on the line count
/// as inside so that two cells sharing that line both keep them.
pub fn is_left_of(point: Point, origin: Point, direction: Point, eps: f64) -> bool {
    signed_distance(point, origin, direction) >= -eps
}

/// Solves `origin + t * direction == seg_origin + s * seg_direction` for `(t, s)`.
///
/// Returns `None` when the lines are parallel, or so close to it that the normalised
/// determinant falls below `eps`.
pub fn intersect(
    origin: Point,
    direction: Point,
    seg_origin: Point,
    seg_direction: Point,
    eps: f64,
) -> Option<(f64, f64)> {
    let det = cross(direction, seg_direction);
    let scale = length(direction) * length(seg_direction);
    if scale == 0.0 || (det / scale).abs() < eps {
        return None;
    }
    let w = sub(seg_origin, origin);
    let t = cross(w, seg_direction) / det;
    let s = cross(w, direction) / det;
    Some((t, s))
}

/// Signed area of a closed polygon, positive for counter-clockwise winding.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i][0] * points[j][1] - points[j][0] * points[i][1];
    }
    area * 0.5
}

pub fn area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Area centroid of a closed polygon. Degenerate polygons yield `[0.0, 0.0]`.
pub fn centroid(points: &[Point]) -> Point {
    let n = points.len();
    if n < 3 {
        return [0.0, 0.0];
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut area = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let [xi, yi] = points[i];
        let [xj, yj] = points[j];

        let cross = xi * yj - xj * yi;
        area += cross;
        cx += (xi + xj) * cross;
        cy += (yi + yj) * cross;
    }

    if area.abs() < 1e-12 {
        return [0.0, 0.0];
    }

    let factor = 1.0 / (3.0 * area);
    [cx * factor, cy * factor]
}
