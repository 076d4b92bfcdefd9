use plotters::prelude::*;
use rand::Rng;
use voroclip::{BoundingPolygon, ClippedVertexKind, DiagramClipper};

#[path = "../tests/support/diagrams.rs"]
#[allow(dead_code)]
mod diagrams;

use diagrams::lattice;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::try_init();

    run_example("2d_clip_box.svg", BoundingPolygon::from_box([12.5, 12.5], [87.5, 87.5])?)?;
    run_example("2d_clip_hexagon.svg", BoundingPolygon::regular([50.0, 50.0], 40.0, 6)?)?;

    // A random convex polygon: a regular one with jittered angles.
    let mut rng = rand::thread_rng();
    let sides = rng.gen_range(5..12);
    let mut angles: Vec<f64> = (0..sides)
        .map(|k| (k as f64 + rng.gen_range(-0.3..0.3)) * std::f64::consts::TAU / sides as f64)
        .collect();
    angles.sort_by(f64::total_cmp);
    let points = angles
        .iter()
        .map(|a| [50.0 + 42.0 * a.cos(), 50.0 + 42.0 * a.sin()])
        .collect();
    run_example("2d_clip_random.svg", BoundingPolygon::new(points)?)?;

    Ok(())
}

fn run_example(filename: &str, bounds: BoundingPolygon) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    let diagram = lattice(8, 8, 12.5, 12.5);
    let sites = DiagramClipper::new(bounds.clone()).clip(&diagram)?;

    // Draw bounding polygon
    let mut outline: Vec<(f64, f64)> = bounds.points().iter().map(|p| (p[0], p[1])).collect();
    outline.push(outline[0]);
    chart.draw_series(std::iter::once(PathElement::new(outline, BLACK.stroke_width(2))))?;

    // Draw cells
    for site in sites.iter().filter(|s| !s.is_empty()) {
        let mut poly: Vec<(f64, f64)> = site.positions().iter().map(|p| (p[0], p[1])).collect();

        chart.draw_series(std::iter::once(Polygon::new(
            poly.clone(),
            BLUE.mix(0.1).filled(),
        )))?;

        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(poly, BLACK.mix(0.5))))?;

        for v in &site.vertices {
            let color = match v.kind {
                ClippedVertexKind::SiteBoundaryVertex => BLUE,
                ClippedVertexKind::PolygonVertex => GREEN,
                ClippedVertexKind::PolygonIntersection => RED,
            };
            chart.draw_series(std::iter::once(Circle::new(
                (v.position[0], v.position[1]),
                3,
                color.filled(),
            )))?;
        }
    }

    // Draw sites
    let points: Vec<(f64, f64)> = diagram.sites.iter().map(|p| (p[0], p[1])).collect();
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, BLACK.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
