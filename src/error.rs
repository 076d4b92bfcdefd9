/// Why a bounding polygon was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonDefect {
    /// Fewer than three vertices.
    TooFewVertices(usize),
    /// The vertex at this index has a NaN or infinite coordinate.
    NonFinite(usize),
    /// The polygon encloses (almost) no area.
    Degenerate,
    /// The vertices wind clockwise.
    Clockwise,
    /// The turn at this vertex index bends the wrong way.
    Concave(usize),
    /// The boundary winds around more than once.
    SelfIntersecting,
    /// A flat coordinate array of this length does not split into x/y pairs.
    OddCoordinateCount(usize),
}

impl std::fmt::Display for PolygonDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolygonDefect::TooFewVertices(n) => write!(f, "need at least 3 vertices, got {}", n),
            PolygonDefect::NonFinite(i) => write!(f, "vertex {} is not finite", i),
            PolygonDefect::Degenerate => write!(f, "polygon has zero area"),
            PolygonDefect::Clockwise => write!(f, "polygon is wound clockwise"),
            PolygonDefect::Concave(i) => write!(f, "polygon is concave at vertex {}", i),
            PolygonDefect::SelfIntersecting => write!(f, "polygon winds around more than once"),
            PolygonDefect::OddCoordinateCount(n) => {
                write!(f, "{} coordinates do not form x/y pairs", n)
            }
        }
    }
}

/// Errors reported by [`clip_diagram`](crate::clip_diagram) and [`DiagramClipper`](crate::DiagramClipper).
///
/// A call that fails returns no clipped sites at all.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// An infinite line edge was found in the block of `site`.
    ///
    /// Line edges only appear in diagrams whose sites are all collinear, which this
    /// clipper does not handle.
    #[error("site {site}: edge {edge} is an unbounded line, which cannot be clipped")]
    UnsupportedEdgeKind { site: usize, edge: usize },

    /// The bounding polygon is not a convex, counter-clockwise polygon.
    #[error("invalid bounding polygon: {0}")]
    InvalidBoundingPolygon(PolygonDefect),

    /// The diagram is structurally inconsistent (edge blocks or vertex references).
    #[error("invalid diagram: {0}")]
    InvalidDiagram(String),
}
