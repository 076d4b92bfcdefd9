use log::{debug, trace};
use rayon::prelude::*;

use crate::bounds::BoundingPolygon;
use crate::clipper::{ClipLine, ClippedVertex, ClippedVertexKind, HalfPlaneClipper};
use crate::config::ClipConfig;
use crate::diagram::{Diagram, DiagramEdge, RayOrientation, VertexId};
use crate::error::ClipError;
use crate::geometry::{self, Point, neg};
use crate::registry::{SharedVertexRegistry, VertexIdSource, VertexRegistry};

/// One site's Voronoi cell intersected with the bounding polygon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ClippedSite {
    pub site_index: usize,
    /// The site's generating point, as given by the diagram.
    pub centroid: Point,
    /// Closed counter-clockwise loop. Empty if the cell misses the bounding polygon.
    pub vertices: Vec<ClippedVertex>,
}

impl ClippedSite {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Vertex positions as `[x, y, x, y, ...]`.
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.iter().map(|v| v.id).collect()
    }

    pub fn area(&self) -> f64 {
        geometry::area(&self.positions())
    }

    /// Area centroid of the clipped polygon, which generally differs from the site point.
    pub fn area_centroid(&self) -> Point {
        geometry::centroid(&self.positions())
    }

    /// Vertices created on the bounding polygon's boundary.
    pub fn boundary_crossings(&self) -> impl Iterator<Item = &ClippedVertex> {
        self.vertices
            .iter()
            .filter(|v| v.kind == ClippedVertexKind::PolygonIntersection)
    }
}

/// Clips every site of a diagram against one bounding polygon.
///
/// Each call owns a fresh [`VertexRegistry`], so ids never leak between calls, while all
/// sites of one call agree on the ids of the crossings they share.
#[derive(Clone, Debug)]
pub struct DiagramClipper {
    bounds: BoundingPolygon,
    config: ClipConfig,
}

impl DiagramClipper {
    pub fn new(bounds: BoundingPolygon) -> Self {
        Self::with_config(bounds, ClipConfig::default())
    }

    pub fn with_config(bounds: BoundingPolygon, config: ClipConfig) -> Self {
        Self { bounds, config }
    }

    pub fn bounds(&self) -> &BoundingPolygon {
        &self.bounds
    }

    pub fn config(&self) -> &ClipConfig {
        &self.config
    }

    /// Clips all sites, in site order.
    ///
    /// Fails without producing any site if the diagram is malformed or holds a line edge.
    pub fn clip(&self, diagram: &Diagram) -> Result<Vec<ClippedSite>, ClipError> {
        if self.config.parallel {
            self.clip_parallel(diagram)
        } else {
            let mut registry = VertexRegistry::default();
            self.clip_with_registry(diagram, &mut registry)
        }
    }

    /// Serial clip using the caller's registry, which is reset first.
    ///
    /// Useful to inspect allocation afterwards; ids are deterministic in this mode.
    pub fn clip_with_registry(
        &self,
        diagram: &Diagram,
        registry: &mut VertexRegistry,
    ) -> Result<Vec<ClippedSite>, ClipError> {
        self.check(diagram)?;
        registry.reset(diagram.vertex_count(), self.bounds.len());

        let clipper = self.half_plane_clipper(diagram);
        let start = self.initial_polygon(diagram);
        let sites = (0..diagram.site_count())
            .map(|i| clip_site(diagram, i, &start, &clipper, registry))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "clipped {} sites against a {}-gon, {} boundary crossings",
            sites.len(),
            self.bounds.len(),
            registry.intersection_count()
        );
        Ok(sites)
    }

    /// Clips sites on the rayon pool, sharing one lock-guarded registry.
    fn clip_parallel(&self, diagram: &Diagram) -> Result<Vec<ClippedSite>, ClipError> {
        self.check(diagram)?;
        let shared = SharedVertexRegistry::new(diagram.vertex_count(), self.bounds.len());

        let clipper = self.half_plane_clipper(diagram);
        let start = self.initial_polygon(diagram);
        let sites = (0..diagram.site_count())
            .into_par_iter()
            .map(|i| {
                let mut ids = &shared;
                clip_site(diagram, i, &start, &clipper, &mut ids)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "clipped {} sites in parallel against a {}-gon, {} boundary crossings",
            sites.len(),
            self.bounds.len(),
            shared.into_inner().intersection_count()
        );
        Ok(sites)
    }

    fn check(&self, diagram: &Diagram) -> Result<(), ClipError> {
        diagram.validate()?;
        // Reject line edges before any work so no site is ever clipped for a failing call.
        for site in 0..diagram.site_count() {
            let range = block(diagram, site)?;
            let offset = range.start;
            if let Some(k) = diagram.edges[range]
                .iter()
                .position(|e| matches!(e, DiagramEdge::Line { .. }))
            {
                return Err(ClipError::UnsupportedEdgeKind {
                    site,
                    edge: offset + k,
                });
            }
        }
        Ok(())
    }

    fn half_plane_clipper(&self, diagram: &Diagram) -> HalfPlaneClipper {
        let first = diagram.vertex_count() as VertexId;
        HalfPlaneClipper::new(self.config, first..first + self.bounds.len() as VertexId)
    }

    /// The bounding polygon as corner vertices with ids `V..V + P`.
    fn initial_polygon(&self, diagram: &Diagram) -> Vec<ClippedVertex> {
        let first = diagram.vertex_count() as VertexId;
        self.bounds
            .points()
            .iter()
            .enumerate()
            .map(|(i, &p)| ClippedVertex::corner(p, first + i as VertexId))
            .collect()
    }
}

/// Clips `diagram` against `bounding_polygon` with the default configuration.
///
/// The polygon must be convex and counter-clockwise; anything else is rejected with
/// [`ClipError::InvalidBoundingPolygon`].
pub fn clip_diagram(
    diagram: &Diagram,
    bounding_polygon: &[Point],
) -> Result<Vec<ClippedSite>, ClipError> {
    let bounds = BoundingPolygon::new(bounding_polygon.to_vec())?;
    DiagramClipper::new(bounds).clip(diagram)
}

/// Clips one site: starts from `start` and cuts it by each edge of the site's block.
///
/// Fails with [`ClipError::InvalidDiagram`] if `site` or one of its edges does not
/// resolve in `diagram`.
pub fn clip_site<R: VertexIdSource + ?Sized>(
    diagram: &Diagram,
    site: usize,
    start: &[ClippedVertex],
    clipper: &HalfPlaneClipper,
    ids: &mut R,
) -> Result<ClippedSite, ClipError> {
    let centroid = *diagram
        .sites
        .get(site)
        .ok_or_else(|| ClipError::InvalidDiagram(format!("no site {}", site)))?;

    let mut current = start.to_vec();
    for edge in block(diagram, site)? {
        if current.is_empty() {
            break;
        }
        let line = clip_line(diagram, site, edge, ids)?;
        current = clipper.clip(&current, &line, ids);
    }

    if current.len() < 3 {
        current.clear();
    }
    trace!("site {}: {} vertices after clipping", site, current.len());

    Ok(ClippedSite {
        site_index: site,
        centroid,
        vertices: current,
    })
}

fn block(diagram: &Diagram, site: usize) -> Result<std::ops::Range<usize>, ClipError> {
    diagram.site_edge_range(site).ok_or_else(|| {
        ClipError::InvalidDiagram(format!("site {} has no valid edge block", site))
    })
}

/// The directed line of edge `edge`, with the owning site on its left.
fn clip_line<R: VertexIdSource + ?Sized>(
    diagram: &Diagram,
    site: usize,
    edge: usize,
    ids: &mut R,
) -> Result<ClipLine, ClipError> {
    match diagram.edges[edge] {
        DiagramEdge::Segment { from, to } => Ok(ClipLine::segment(
            from as VertexId,
            diagram.edge_vertex(edge, from)?,
            to as VertexId,
            diagram.edge_vertex(edge, to)?,
        )),
        DiagramEdge::Ray {
            origin,
            direction,
            orientation,
        } => {
            let far_end = ids.ray_endpoint_id(origin as VertexId, direction);
            let direction = match orientation {
                RayOrientation::CounterClockwise => direction,
                RayOrientation::Clockwise => neg(direction),
            };
            Ok(ClipLine::ray(
                origin as VertexId,
                diagram.edge_vertex(edge, origin)?,
                direction,
                far_end,
            ))
        }
        DiagramEdge::Line { .. } => Err(ClipError::UnsupportedEdgeKind { site, edge }),
    }
}
