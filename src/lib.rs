//! # voroclip
//!
//! `voroclip` intersects the cells of a planar Voronoi diagram with a convex bounding
//! polygon. It is meant for chunked procedural generation: two neighbouring cells that
//! cross the same polygon edge at the same point receive the same vertex id, so meshes
//! built from separately clipped cells stitch together without cracks.
//!
//! ## Features
//!
//! - **Typed vertices**: every output vertex records whether it is a diagram vertex, an
//!   untouched polygon corner or a new boundary crossing.
//! - **Shared ids**: crossings are memoised per call by the pair of edges that made them.
//! - **Unbounded cells**: rays are handled in both orientations.
//! - **Parallel mode**: opt-in rayon execution over a lock-guarded id registry.
//! - **WASM-ready**: flat-array bindings built with `wasm-bindgen`.
//!
//! ## Example
//!
//! ```
//! use voroclip::{clip_diagram, Diagram, DiagramEdge};
//!
//! let diagram = Diagram::new(
//!     vec![[0.5, 0.0], [0.5, 1.0]],
//!     vec![[0.25, 0.5], [0.75, 0.5]],
//!     vec![
//!         DiagramEdge::Segment { from: 0, to: 1 },
//!         DiagramEdge::Segment { from: 1, to: 0 },
//!     ],
//!     vec![0, 1],
//! );
//! let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! let sites = clip_diagram(&diagram, &square).unwrap();
//! assert!((sites[0].area() - 0.5).abs() < 1e-9);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is [`DiagramClipper`]; [`clip_diagram`] wraps it with
//! default settings.

mod bounds;
mod clip;
mod clipper;
mod config;
mod diagram;
mod error;
pub mod geometry;
mod registry;
mod wasm;

pub use bounds::BoundingPolygon;
pub use clip::ClippedSite;
pub use clip::DiagramClipper;
pub use clip::clip_diagram;
pub use clip::clip_site;
pub use clipper::ClipLine;
pub use clipper::ClippedVertex;
pub use clipper::ClippedVertexKind;
pub use clipper::HalfPlaneClipper;
pub use config::ClipConfig;
pub use diagram::Diagram;
pub use diagram::DiagramEdge;
pub use diagram::RayOrientation;
pub use diagram::Site;
pub use diagram::VertexId;
pub use diagram::EDGE_KIND_LINE;
pub use diagram::EDGE_KIND_RAY_CCW;
pub use diagram::EDGE_KIND_RAY_CW;
pub use diagram::EDGE_KIND_SEGMENT;
pub use error::ClipError;
pub use error::PolygonDefect;
pub use geometry::Point;
pub use registry::IntersectionKey;
pub use registry::SharedVertexRegistry;
pub use registry::VertexIdSource;
pub use registry::VertexRegistry;
pub use wasm::ClippedSite2D;
pub use wasm::DiagramClipper2D;
