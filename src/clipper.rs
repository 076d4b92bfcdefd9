use std::ops::Range;

use log::debug;

use crate::config::ClipConfig;
use crate::diagram::VertexId;
use crate::geometry::{
    Point, add_scaled, distance, intersect, is_left_of, length, signed_distance, sub,
};
use crate::registry::VertexIdSource;

/// Where a clipped vertex came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ClippedVertexKind {
    /// Sits on a vertex of the Voronoi diagram. Its id is that vertex's index.
    SiteBoundaryVertex,
    /// An untouched corner of the bounding polygon.
    PolygonVertex,
    /// A new point where a Voronoi edge crosses the bounding polygon's boundary.
    PolygonIntersection,
}

/// A vertex of a clipped cell.
///
/// `from_edge_endpoint` and `to_edge_endpoint` name the bounding polygon edge an
/// intersection lies on. A diagram vertex found on that boundary keeps the edge too;
/// any other vertex carries its own id in both fields.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ClippedVertex {
    pub position: Point,
    pub kind: ClippedVertexKind,
    pub id: VertexId,
    pub from_edge_endpoint: VertexId,
    pub to_edge_endpoint: VertexId,
}

impl ClippedVertex {
    /// A corner of the bounding polygon.
    pub fn corner(position: Point, id: VertexId) -> Self {
        Self::fixed(position, ClippedVertexKind::PolygonVertex, id)
    }

    /// A vertex of the diagram itself.
    pub fn site_boundary(position: Point, id: VertexId) -> Self {
        Self::fixed(position, ClippedVertexKind::SiteBoundaryVertex, id)
    }

    fn fixed(position: Point, kind: ClippedVertexKind, id: VertexId) -> Self {
        Self {
            position,
            kind,
            id,
            from_edge_endpoint: id,
            to_edge_endpoint: id,
        }
    }
}

/// A directed clip line derived from one diagram edge. The kept side is on its left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipLine {
    pub origin: Point,
    pub direction: Point,
    /// Diagram vertex at `origin`.
    pub start: VertexId,
    /// Diagram vertex at the other end, or the ray's far-end stand-in.
    pub end: VertexId,
    /// Exact position of `end` when it is a real vertex.
    pub end_point: Option<Point>,
}

impl ClipLine {
    /// The line through segment `start -> end`.
    pub fn segment(start: VertexId, from: Point, end: VertexId, to: Point) -> Self {
        Self {
            origin: from,
            direction: sub(to, from),
            start,
            end,
            end_point: Some(to),
        }
    }

    /// The line through a ray leaving `origin`. `far_end` only serves as identity.
    pub fn ray(start: VertexId, origin: Point, direction: Point, far_end: VertexId) -> Self {
        Self {
            origin,
            direction,
            start,
            end: far_end,
            end_point: None,
        }
    }
}

/// Clips polygons against one half-plane at a time, carrying vertex identity through.
///
/// The clipper knows the id range of the bounding polygon's corners so it can tell an
/// edge running along the bounding polygon from one running along an earlier clip line.
#[derive(Clone, Debug)]
pub struct HalfPlaneClipper {
    config: ClipConfig,
    corners: Range<VertexId>,
}

impl HalfPlaneClipper {
    pub fn new(config: ClipConfig, corners: Range<VertexId>) -> Self {
        Self { config, corners }
    }

    /// Keeps the part of the closed CCW `polygon` that lies left of `line`.
    ///
    /// Crossings of the bounding polygon's boundary get their ids from `ids`; crossings
    /// of earlier clip lines take the id of the diagram vertex they sit on. The result
    /// may be empty, or transiently hold fewer than three vertices.
    pub fn clip<R: VertexIdSource + ?Sized>(
        &self,
        polygon: &[ClippedVertex],
        line: &ClipLine,
        ids: &mut R,
    ) -> Vec<ClippedVertex> {
        let n = polygon.len();
        if n == 0 {
            return Vec::new();
        }

        let len = length(line.direction);
        if len == 0.0 {
            debug!(
                "clip line {}-{} has no direction, leaving polygon untouched",
                line.start, line.end
            );
            return polygon.to_vec();
        }

        let eps = self.config.side_epsilon;
        let inside: Vec<bool> = polygon
            .iter()
            .map(|v| is_left_of(v.position, line.origin, line.direction, eps))
            .collect();

        if inside.iter().all(|&b| b) {
            return polygon.to_vec();
        }
        if inside.iter().all(|&b| !b) {
            return Vec::new();
        }

        let on_line =
            |v: &ClippedVertex| signed_distance(v.position, line.origin, line.direction).abs() <= eps;

        let mut out = Vec::with_capacity(n + 1);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let (v0, v1) = (&polygon[prev], &polygon[i]);

            match (inside[prev], inside[i]) {
                (true, true) => out.push(*v1),
                (false, false) => {}
                (true, false) => {
                    // Leaving. A crossing right on v0 is v0 itself, which is already out.
                    if !on_line(v0) {
                        if let Some(v) = self.crossing(v0, v1, line, ids) {
                            out.push(v);
                        }
                    }
                }
                (false, true) => {
                    if !on_line(v1) {
                        if let Some(v) = self.crossing(v0, v1, line, ids) {
                            out.push(v);
                        }
                    }
                    out.push(*v1);
                }
            }
        }
        out
    }

    /// The vertex where `line` crosses the polygon edge `v0 -> v1`.
    fn crossing<R: VertexIdSource + ?Sized>(
        &self,
        v0: &ClippedVertex,
        v1: &ClippedVertex,
        line: &ClipLine,
        ids: &mut R,
    ) -> Option<ClippedVertex> {
        let edge = sub(v1.position, v0.position);
        let Some((t, s)) = intersect(
            line.origin,
            line.direction,
            v0.position,
            edge,
            self.config.parallel_epsilon,
        ) else {
            debug!(
                "skipping degenerate crossing of clip line {}-{} with edge {}-{}",
                line.start, line.end, v0.id, v1.id
            );
            return None;
        };
        let position = add_scaled(v0.position, edge, s.clamp(0.0, 1.0));

        if self.along_boundary(v0, v1) {
            let (from, to) = (v0.from_edge_endpoint, v1.to_edge_endpoint);

            // A diagram vertex on the boundary is reached by every line through it, so
            // it must not be named after whichever of them cut first.
            if let Some((id, vertex)) = self.diagram_vertex_near(position, line) {
                return Some(ClippedVertex {
                    position: vertex,
                    kind: ClippedVertexKind::SiteBoundaryVertex,
                    id,
                    from_edge_endpoint: from,
                    to_edge_endpoint: to,
                });
            }

            let id = ids.intersection_id(line.start, line.end, from, to);
            return Some(ClippedVertex {
                position,
                kind: ClippedVertexKind::PolygonIntersection,
                id,
                from_edge_endpoint: from,
                to_edge_endpoint: to,
            });
        }

        // The edge runs along an earlier clip line, so the crossing is a diagram vertex.
        let (id, vertex) = match line.end_point {
            Some(end) if (t - 1.0).abs() < t.abs() => (line.end, end),
            _ => (line.start, line.origin),
        };
        let position = if distance(position, vertex) <= self.config.snap_epsilon {
            vertex
        } else {
            position
        };
        Some(ClippedVertex::site_boundary(position, id))
    }

    /// The clip line's own diagram vertex within `snap_epsilon` of `position`.
    fn diagram_vertex_near(&self, position: Point, line: &ClipLine) -> Option<(VertexId, Point)> {
        let eps = self.config.snap_epsilon;
        if distance(position, line.origin) <= eps {
            return Some((line.start, line.origin));
        }
        line.end_point
            .filter(|&end| distance(position, end) <= eps)
            .map(|end| (line.end, end))
    }

    /// True if `v0 -> v1` lies on an edge of the bounding polygon.
    fn along_boundary(&self, v0: &ClippedVertex, v1: &ClippedVertex) -> bool {
        use ClippedVertexKind::PolygonVertex;
        match (v0.kind, v1.kind) {
            (PolygonVertex, PolygonVertex) => self.next_corner(v0.id) == v1.id,
            (PolygonVertex, _) => boundary_edge(v1).is_some_and(|(from, _)| from == v0.id),
            (_, PolygonVertex) => boundary_edge(v0).is_some_and(|(_, to)| to == v1.id),
            _ => match (boundary_edge(v0), boundary_edge(v1)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    fn next_corner(&self, id: VertexId) -> VertexId {
        if id + 1 >= self.corners.end {
            self.corners.start
        } else {
            id + 1
        }
    }
}

/// The bounding polygon edge a non-corner vertex lies on, if any.
fn boundary_edge(v: &ClippedVertex) -> Option<(VertexId, VertexId)> {
    match v.kind {
        ClippedVertexKind::PolygonVertex => None,
        ClippedVertexKind::PolygonIntersection => Some((v.from_edge_endpoint, v.to_edge_endpoint)),
        ClippedVertexKind::SiteBoundaryVertex => (v.from_edge_endpoint != v.to_edge_endpoint)
            .then_some((v.from_edge_endpoint, v.to_edge_endpoint)),
    }
}
