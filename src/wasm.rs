use crate::bounds::BoundingPolygon;
use crate::clip::{ClippedSite, DiagramClipper};
use crate::clipper::ClippedVertexKind;
use crate::config::ClipConfig;
use crate::diagram::{Diagram, VertexId};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// Routes `log` output to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Debug);
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_EDGES: &'static str = r#"
export const EDGE_KIND_SEGMENT = 0;
export const EDGE_KIND_RAY_CCW = 1;
export const EDGE_KIND_RAY_CW = 2;
export const EDGE_KIND_LINE = 3;
"#;

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_VERTICES: &'static str = r#"
export const VERTEX_KIND_SITE_BOUNDARY = 0;
export const VERTEX_KIND_POLYGON = 1;
export const VERTEX_KIND_INTERSECTION = 2;
"#;

fn kind_code(kind: ClippedVertexKind) -> u8 {
    match kind {
        ClippedVertexKind::SiteBoundaryVertex => 0,
        ClippedVertexKind::PolygonVertex => 1,
        ClippedVertexKind::PolygonIntersection => 2,
    }
}

// --- Clipped Site ---

#[wasm_bindgen(js_name = ClippedSite2D)]
pub struct ClippedSite2D {
    inner: ClippedSite,
}

#[wasm_bindgen(js_class = ClippedSite2D)]
impl ClippedSite2D {
    #[wasm_bindgen(getter)]
    pub fn site_index(&self) -> usize { self.inner.site_index }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> { self.inner.flat_vertices() }
    #[wasm_bindgen(getter)]
    pub fn vertex_ids(&self) -> Vec<VertexId> { self.inner.vertex_ids() }
    #[wasm_bindgen(getter)]
    pub fn kinds(&self) -> Vec<u8> { self.inner.vertices.iter().map(|v| kind_code(v.kind)).collect() }
    #[wasm_bindgen(getter)]
    pub fn centroid(&self) -> Vec<f64> { self.inner.centroid.to_vec() }
    pub fn area(&self) -> f64 { self.inner.area() }
    pub fn area_centroid(&self) -> Vec<f64> { self.inner.area_centroid().to_vec() }
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

// --- Clipper ---

/// Clips diagrams handed over as flat arrays and keeps the last result.
#[wasm_bindgen(js_name = DiagramClipper2D)]
pub struct DiagramClipper2D {
    inner: DiagramClipper,
    sites: Vec<ClippedSite>,
}

#[wasm_bindgen(js_class = DiagramClipper2D)]
impl DiagramClipper2D {
    /// Creates a clipper for the convex CCW polygon `[x, y, x, y, ...]`.
    #[wasm_bindgen(constructor)]
    pub fn new(polygon: &[f64]) -> Result<DiagramClipper2D, JsError> {
        let bounds = BoundingPolygon::from_flat(polygon)?;
        Ok(DiagramClipper2D { inner: DiagramClipper::new(bounds), sites: Vec::new() })
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        let config = self.inner.config().with_parallel(parallel);
        self.set_config(config);
    }

    pub fn set_side_epsilon(&mut self, eps: f64) {
        let config = self.inner.config().with_side_epsilon(eps);
        self.set_config(config);
    }

    /// Clips a diagram; see [`Diagram::from_flat`] for the array layout.
    ///
    /// On failure the previous result is discarded.
    pub fn clip(
        &mut self,
        vertices: &[f64],
        sites: &[f64],
        edge_kinds: &[u8],
        edge_indices: &[u32],
        edge_vectors: &[f64],
        first_edge_by_site: &[u32],
    ) -> Result<(), JsError> {
        self.sites.clear();
        let diagram = Diagram::from_flat(vertices, sites, edge_kinds, edge_indices, edge_vectors, first_edge_by_site)?;
        self.sites = self.inner.clip(&diagram)?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn count_sites(&self) -> usize { self.sites.len() }
    pub fn get_site(&self, index: usize) -> Option<ClippedSite2D> { self.sites.get(index).cloned().map(|inner| ClippedSite2D { inner }) }
    #[wasm_bindgen(getter)]
    pub fn sites(&self) -> Vec<ClippedSite2D> { self.sites.iter().cloned().map(|inner| ClippedSite2D { inner }).collect() }
}

impl DiagramClipper2D {
    fn set_config(&mut self, config: ClipConfig) {
        self.inner = DiagramClipper::with_config(self.inner.bounds().clone(), config);
    }
}
