use std::ops::Range;

use crate::error::ClipError;
use crate::geometry::Point;

/// Integer identity of a vertex in a clipped output.
///
/// Ids share one space per clip call: `[0, V)` are diagram vertices, `[V, V + P)` are
/// bounding polygon vertices and everything above is handed out by the
/// [`VertexRegistry`](crate::VertexRegistry).
pub type VertexId = u32;

/// Which way a ray is traversed by the site that lists it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RayOrientation {
    /// The site walks the ray inward, against its stored direction.
    Clockwise,
    /// The site walks the ray outward, along its stored direction.
    CounterClockwise,
}

/// One boundary edge of a Voronoi cell, as seen from the site that owns it.
///
/// The cell lies to the left of the edge's directed line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagramEdge {
    /// A finite edge between two diagram vertices, directed `from -> to`.
    Segment { from: usize, to: usize },
    /// A half-infinite edge leaving diagram vertex `origin`.
    Ray {
        origin: usize,
        direction: Point,
        orientation: RayOrientation,
    },
    /// A fully infinite edge. Not supported by the clipper.
    Line { point: Point, direction: Point },
}

/// A site of the diagram: its index and the point that generated its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub index: usize,
    pub centroid: Point,
}

/// A planar Voronoi diagram as produced by an external builder.
///
/// Edges are grouped by owning site: the block of site `i` starts at
/// `first_edge_by_site[i]` and runs up to the next site's start, or to the end of
/// `edges` for the last site. Within a block edges are listed counter-clockwise.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagram {
    pub vertices: Vec<Point>,
    pub sites: Vec<Point>,
    pub edges: Vec<DiagramEdge>,
    pub first_edge_by_site: Vec<usize>,
}

/// Flat edge kind codes used by [`Diagram::from_flat`].
pub const EDGE_KIND_SEGMENT: u8 = 0;
pub const EDGE_KIND_RAY_CCW: u8 = 1;
pub const EDGE_KIND_RAY_CW: u8 = 2;
pub const EDGE_KIND_LINE: u8 = 3;

impl Diagram {
    pub fn new(
        vertices: Vec<Point>,
        sites: Vec<Point>,
        edges: Vec<DiagramEdge>,
        first_edge_by_site: Vec<usize>,
    ) -> Self {
        Self {
            vertices,
            sites,
            edges,
            first_edge_by_site,
        }
    }

    /// Builds a diagram from flat arrays.
    ///
    /// * `vertices`, `sites` - `[x, y, x, y, ...]`.
    /// * `edge_kinds` - one `EDGE_KIND_*` code per edge.
    /// * `edge_indices` - two per edge: `[from, to]` for segments, `[origin, _]` for rays.
    /// * `edge_vectors` - four per edge: `[dx, dy, px, py]`. Rays read the direction,
    ///   lines read both; segments ignore them.
    pub fn from_flat(
        vertices: &[f64],
        sites: &[f64],
        edge_kinds: &[u8],
        edge_indices: &[u32],
        edge_vectors: &[f64],
        first_edge_by_site: &[u32],
    ) -> Result<Self, ClipError> {
        if vertices.len() % 2 != 0 || sites.len() % 2 != 0 {
            return Err(ClipError::InvalidDiagram(
                "coordinate arrays must hold x/y pairs".to_string(),
            ));
        }
        let count = edge_kinds.len();
        if edge_indices.len() != count * 2 || edge_vectors.len() != count * 4 {
            return Err(ClipError::InvalidDiagram(format!(
                "{} edges need {} indices and {} vector components, got {} and {}",
                count,
                count * 2,
                count * 4,
                edge_indices.len(),
                edge_vectors.len()
            )));
        }

        let mut edges = Vec::with_capacity(count);
        for (i, &kind) in edge_kinds.iter().enumerate() {
            let a = edge_indices[i * 2] as usize;
            let b = edge_indices[i * 2 + 1] as usize;
            let direction = [edge_vectors[i * 4], edge_vectors[i * 4 + 1]];
            let point = [edge_vectors[i * 4 + 2], edge_vectors[i * 4 + 3]];
            let edge = match kind {
                EDGE_KIND_SEGMENT => DiagramEdge::Segment { from: a, to: b },
                EDGE_KIND_RAY_CCW => DiagramEdge::Ray {
                    origin: a,
                    direction,
                    orientation: RayOrientation::CounterClockwise,
                },
                EDGE_KIND_RAY_CW => DiagramEdge::Ray {
                    origin: a,
                    direction,
                    orientation: RayOrientation::Clockwise,
                },
                EDGE_KIND_LINE => DiagramEdge::Line { point, direction },
                other => {
                    return Err(ClipError::InvalidDiagram(format!(
                        "edge {} has unknown kind code {}",
                        i, other
                    )));
                }
            };
            edges.push(edge);
        }

        Ok(Self {
            vertices: vertices.chunks_exact(2).map(|c| [c[0], c[1]]).collect(),
            sites: sites.chunks_exact(2).map(|c| [c[0], c[1]]).collect(),
            edges,
            first_edge_by_site: first_edge_by_site.iter().map(|&i| i as usize).collect(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn site(&self, index: usize) -> Option<Site> {
        self.sites.get(index).map(|&centroid| Site { index, centroid })
    }

    /// Range of `edges` owned by site `index`.
    ///
    /// `None` if the site has no block start or its block does not fit in `edges`.
    pub fn site_edge_range(&self, index: usize) -> Option<Range<usize>> {
        let start = *self.first_edge_by_site.get(index)?;
        let end = self
            .first_edge_by_site
            .get(index + 1)
            .copied()
            .unwrap_or(self.edges.len());
        (start <= end && end <= self.edges.len()).then_some(start..end)
    }

    /// The contiguous block of edges bounding site `index`.
    pub fn site_edges(&self, index: usize) -> Option<&[DiagramEdge]> {
        self.site_edge_range(index).map(|range| &self.edges[range])
    }

    /// Position of vertex `index`, or `InvalidDiagram` naming the referencing edge.
    pub(crate) fn edge_vertex(&self, edge: usize, index: usize) -> Result<Point, ClipError> {
        self.vertices.get(index).copied().ok_or_else(|| {
            ClipError::InvalidDiagram(format!(
                "edge {} references vertex {} of {}",
                edge,
                index,
                self.vertices.len()
            ))
        })
    }

    /// Checks the block structure and every vertex reference.
    pub fn validate(&self) -> Result<(), ClipError> {
        if self.first_edge_by_site.len() != self.sites.len() {
            return Err(ClipError::InvalidDiagram(format!(
                "{} sites but {} edge block starts",
                self.sites.len(),
                self.first_edge_by_site.len()
            )));
        }

        let mut previous = 0;
        for (site, &start) in self.first_edge_by_site.iter().enumerate() {
            if start < previous {
                return Err(ClipError::InvalidDiagram(format!(
                    "edge block of site {} starts at {} before the previous block at {}",
                    site, start, previous
                )));
            }
            if start > self.edges.len() {
                return Err(ClipError::InvalidDiagram(format!(
                    "edge block of site {} starts at {} past the {} edges",
                    site,
                    start,
                    self.edges.len()
                )));
            }
            previous = start;
        }

        if self.vertices.len() > u32::MAX as usize / 2 {
            return Err(ClipError::InvalidDiagram(format!(
                "{} vertices exceed the vertex id space",
                self.vertices.len()
            )));
        }

        for (i, edge) in self.edges.iter().enumerate() {
            match *edge {
                DiagramEdge::Segment { from, to } => {
                    self.edge_vertex(i, from)?;
                    self.edge_vertex(i, to)?;
                }
                DiagramEdge::Ray { origin, .. } => {
                    self.edge_vertex(i, origin)?;
                }
                DiagramEdge::Line { .. } => {}
            }
        }
        Ok(())
    }
}
