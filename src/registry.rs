//! Stable ids for the intersection points created while clipping.
//!
//! An intersection is named by the two edges that produced it: the diagram edge used as
//! the clip line and the bounding polygon edge it crossed. Both edges are identified by
//! their endpoint ids, and each pair is sorted before lookup, so two sites that walk the
//! same Voronoi edge in opposite directions still land on the same key.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::diagram::VertexId;
use crate::geometry::{Point, length};

/// Order-normalised identity of one crossing: two sorted endpoint pairs packed into 128 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntersectionKey(u128);

impl IntersectionKey {
    pub fn new(
        edge_a: VertexId,
        edge_b: VertexId,
        current_a: VertexId,
        current_b: VertexId,
    ) -> Self {
        let edge = pack_pair(edge_a, edge_b) as u128;
        let current = pack_pair(current_a, current_b) as u128;
        IntersectionKey((edge << 64) | current)
    }
}

#[inline]
fn pack_pair(a: VertexId, b: VertexId) -> u64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    ((lo as u64) << 32) | hi as u64
}

/// Identity of an unbounded ray: its origin and its direction quantised to a unit vector.
///
/// The sign of the direction is normalised so that both sites sharing the ray agree
/// regardless of which way they traverse it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct RayKey {
    origin: VertexId,
    dx: i64,
    dy: i64,
}

const RAY_DIRECTION_SCALE: f64 = (1u64 << 40) as f64;

impl RayKey {
    fn new(origin: VertexId, direction: Point) -> Self {
        let len = length(direction);
        let (mut x, mut y) = if len > 0.0 {
            (direction[0] / len, direction[1] / len)
        } else {
            (0.0, 0.0)
        };
        if x < 0.0 || (x == 0.0 && y < 0.0) {
            x = -x;
            y = -y;
        }
        RayKey {
            origin,
            dx: (x * RAY_DIRECTION_SCALE).round() as i64,
            dy: (y * RAY_DIRECTION_SCALE).round() as i64,
        }
    }
}

/// Hands out vertex ids during one diagram clip.
///
/// Implemented by the serial [`VertexRegistry`] and, through a shared reference, by the
/// lock-guarded [`SharedVertexRegistry`] used by the parallel driver.
pub trait VertexIdSource {
    /// Returns the id of the crossing between the clip edge `(edge_a, edge_b)` and the
    /// polygon edge `(current_a, current_b)`, allocating it on first request.
    ///
    /// The result does not depend on the order of either pair.
    fn intersection_id(
        &mut self,
        edge_a: VertexId,
        edge_b: VertexId,
        current_a: VertexId,
        current_b: VertexId,
    ) -> VertexId;

    /// Returns the id standing in for the far end of a ray leaving `origin` along
    /// `direction` (either sign).
    fn ray_endpoint_id(&mut self, origin: VertexId, direction: Point) -> VertexId;
}

/// Memoises intersection ids for a single clip call.
///
/// Intersections are numbered upward from the first free id. Ray far ends never appear
/// in any output, so they are numbered downward from `VertexId::MAX` and leave the
/// intersection range untouched.
#[derive(Clone, Debug)]
pub struct VertexRegistry {
    next_id: VertexId,
    next_ray_id: VertexId,
    intersections: HashMap<IntersectionKey, VertexId>,
    ray_ends: HashMap<RayKey, VertexId>,
}

impl Default for VertexRegistry {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl VertexRegistry {
    /// Creates a registry whose first free id follows the diagram and polygon vertices.
    pub fn new(vertex_count: usize, polygon_vertex_count: usize) -> Self {
        Self {
            next_id: (vertex_count + polygon_vertex_count) as VertexId,
            next_ray_id: VertexId::MAX,
            intersections: HashMap::new(),
            ray_ends: HashMap::new(),
        }
    }

    /// Forgets every allocated id and restarts allocation at `vertex_count + polygon_vertex_count`.
    pub fn reset(&mut self, vertex_count: usize, polygon_vertex_count: usize) {
        self.next_id = (vertex_count + polygon_vertex_count) as VertexId;
        self.next_ray_id = VertexId::MAX;
        self.intersections.clear();
        self.ray_ends.clear();
    }

    /// The id the next intersection will receive. Every crossing id handed out so far is
    /// below it.
    pub fn next_id(&self) -> VertexId {
        self.next_id
    }

    /// Number of distinct intersections allocated since the last reset.
    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    fn allocate(&mut self) -> VertexId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl VertexIdSource for VertexRegistry {
    fn intersection_id(
        &mut self,
        edge_a: VertexId,
        edge_b: VertexId,
        current_a: VertexId,
        current_b: VertexId,
    ) -> VertexId {
        let key = IntersectionKey::new(edge_a, edge_b, current_a, current_b);
        if let Some(&id) = self.intersections.get(&key) {
            return id;
        }
        let id = self.allocate();
        self.intersections.insert(key, id);
        id
    }

    fn ray_endpoint_id(&mut self, origin: VertexId, direction: Point) -> VertexId {
        let key = RayKey::new(origin, direction);
        if let Some(&id) = self.ray_ends.get(&key) {
            return id;
        }
        let id = self.next_ray_id;
        self.next_ray_id -= 1;
        self.ray_ends.insert(key, id);
        id
    }
}

/// A [`VertexRegistry`] behind a mutex, shared by every worker of a parallel clip.
///
/// Lookup and allocation happen under one lock, so the shared-id guarantee holds across
/// threads. Which crossing receives which number depends on scheduling.
#[derive(Debug, Default)]
pub struct SharedVertexRegistry {
    inner: Mutex<VertexRegistry>,
}

impl SharedVertexRegistry {
    pub fn new(vertex_count: usize, polygon_vertex_count: usize) -> Self {
        Self {
            inner: Mutex::new(VertexRegistry::new(vertex_count, polygon_vertex_count)),
        }
    }

    /// Unwraps the registry once all workers are done.
    pub fn into_inner(self) -> VertexRegistry {
        // A poisoned lock only means a worker panicked; the map itself is still consistent.
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn with<R>(&self, f: impl FnOnce(&mut VertexRegistry) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl VertexIdSource for &SharedVertexRegistry {
    fn intersection_id(
        &mut self,
        edge_a: VertexId,
        edge_b: VertexId,
        current_a: VertexId,
        current_b: VertexId,
    ) -> VertexId {
        self.with(|r| r.intersection_id(edge_a, edge_b, current_a, current_b))
    }

    fn ray_endpoint_id(&mut self, origin: VertexId, direction: Point) -> VertexId {
        self.with(|r| r.ray_endpoint_id(origin, direction))
    }
}
