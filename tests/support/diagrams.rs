use voroclip::{Diagram, DiagramEdge, Point, RayOrientation};

/// Voronoi diagram of an `nx` x `ny` lattice of sites, one per `w` x `h` cell.
///
/// Interior cells are rectangles; cells on the rim are unbounded and use rays. Needs
/// `nx, ny >= 2` so no cell is bounded by a full line.
pub fn lattice(nx: usize, ny: usize, w: f64, h: f64) -> Diagram {
    assert!(nx >= 2 && ny >= 2);
    let vid = |i: usize, j: usize| -> Option<usize> {
        if i == 0 || i >= nx || j == 0 || j >= ny {
            None
        } else {
            Some((i - 1) + (j - 1) * (nx - 1))
        }
    };

    let mut vertices = Vec::with_capacity((nx - 1) * (ny - 1));
    for j in 1..ny {
        for i in 1..nx {
            vertices.push([i as f64 * w, j as f64 * h]);
        }
    }

    let mut sites = Vec::with_capacity(nx * ny);
    let mut edges = Vec::new();
    let mut first_edge_by_site = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            sites.push([(i as f64 + 0.5) * w, (j as f64 + 0.5) * h]);
            first_edge_by_site.push(edges.len());

            // Counter-clockwise: bottom, right, top, left.
            if j > 0 {
                edges.push(edge(vid(i, j), vid(i + 1, j), [1.0, 0.0]));
            }
            if i + 1 < nx {
                edges.push(edge(vid(i + 1, j), vid(i + 1, j + 1), [0.0, 1.0]));
            }
            if j + 1 < ny {
                edges.push(edge(vid(i + 1, j + 1), vid(i, j + 1), [-1.0, 0.0]));
            }
            if i > 0 {
                edges.push(edge(vid(i, j + 1), vid(i, j), [0.0, -1.0]));
            }
        }
    }

    Diagram::new(vertices, sites, edges, first_edge_by_site)
}

/// The edge walked from `a` to `b` along `travel`; a missing end lies at infinity.
fn edge(a: Option<usize>, b: Option<usize>, travel: Point) -> DiagramEdge {
    match (a, b) {
        (Some(from), Some(to)) => DiagramEdge::Segment { from, to },
        (Some(origin), None) => DiagramEdge::Ray {
            origin,
            direction: travel,
            orientation: RayOrientation::CounterClockwise,
        },
        (None, Some(origin)) => DiagramEdge::Ray {
            origin,
            direction: [-travel[0], -travel[1]],
            orientation: RayOrientation::Clockwise,
        },
        (None, None) => DiagramEdge::Line {
            point: [0.0, 0.0],
            direction: travel,
        },
    }
}

/// A single bounded cell whose boundary runs through `corners` (CCW), with one site.
pub fn single_cell(corners: &[Point], site: Point) -> Diagram {
    let n = corners.len();
    let edges = (0..n)
        .map(|k| DiagramEdge::Segment {
            from: k,
            to: (k + 1) % n,
        })
        .collect();
    Diagram::new(corners.to_vec(), vec![site], edges, vec![0])
}

pub fn regular_polygon(center: Point, radius: f64, sides: usize, phase: f64) -> Vec<Point> {
    (0..sides)
        .map(|k| {
            let a = phase + k as f64 * std::f64::consts::TAU / sides as f64;
            [center[0] + radius * a.cos(), center[1] + radius * a.sin()]
        })
        .collect()
}

/// Cells formed by rays leaving one vertex at `center`, at counter-clockwise `angles`.
///
/// Site `k` owns the wedge from `angles[k]` to the next angle. Consecutive angles must be
/// less than half a turn apart so every wedge is convex. Three rays 120 degrees apart are
/// the Voronoi diagram of an equilateral triangle.
pub fn star(center: Point, angles: &[f64]) -> Diagram {
    let n = angles.len();
    let unit = |a: f64| [a.cos(), a.sin()];

    let mut sites = Vec::with_capacity(n);
    let mut edges = Vec::with_capacity(2 * n);
    let mut first_edge_by_site = Vec::with_capacity(n);
    for k in 0..n {
        let a = angles[k];
        let mut b = angles[(k + 1) % n];
        if b <= a {
            b += std::f64::consts::TAU;
        }
        let mid = unit((a + b) / 2.0);
        sites.push([center[0] + mid[0], center[1] + mid[1]]);
        first_edge_by_site.push(edges.len());

        // Walk in along the far side of the wedge, then out along the near side.
        edges.push(DiagramEdge::Ray {
            origin: 0,
            direction: unit(angles[(k + 1) % n]),
            orientation: RayOrientation::Clockwise,
        });
        edges.push(DiagramEdge::Ray {
            origin: 0,
            direction: unit(a),
            orientation: RayOrientation::CounterClockwise,
        });
    }

    Diagram::new(vec![center], sites, edges, first_edge_by_site)
}

/// Maps every point and ray direction of `diagram` through `p -> m * p + offset`.
///
/// `m` must have a positive determinant so cells stay convex and counter-clockwise.
pub fn transformed(diagram: &Diagram, m: [[f64; 2]; 2], offset: Point) -> Diagram {
    assert!(m[0][0] * m[1][1] - m[0][1] * m[1][0] > 0.0);
    let linear = |p: Point| [m[0][0] * p[0] + m[0][1] * p[1], m[1][0] * p[0] + m[1][1] * p[1]];
    let affine = |p: Point| {
        let q = linear(p);
        [q[0] + offset[0], q[1] + offset[1]]
    };

    let edges = diagram
        .edges
        .iter()
        .map(|edge| match *edge {
            DiagramEdge::Ray {
                origin,
                direction,
                orientation,
            } => DiagramEdge::Ray {
                origin,
                direction: linear(direction),
                orientation,
            },
            DiagramEdge::Line { point, direction } => DiagramEdge::Line {
                point: affine(point),
                direction: linear(direction),
            },
            segment => segment,
        })
        .collect();

    Diagram::new(
        diagram.vertices.iter().map(|&p| affine(p)).collect(),
        diagram.sites.iter().map(|&p| affine(p)).collect(),
        edges,
        diagram.first_edge_by_site.clone(),
    )
}

/// `m` for a rotation by `angle` followed by a horizontal shear.
pub fn rotate_shear(angle: f64, shear: f64) -> [[f64; 2]; 2] {
    let (s, c) = angle.sin_cos();
    [[c + shear * s, -s + shear * c], [s, c]]
}
