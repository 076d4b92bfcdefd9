use criterion::{criterion_group, BenchmarkId, Criterion};
use plotters::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use voroclip::{BoundingPolygon, ClipConfig, DiagramClipper};

#[path = "../tests/support/diagrams.rs"]
#[allow(dead_code)]
mod diagrams;

use diagrams::lattice;

#[derive(Deserialize)]
struct Estimates {
    mean: Stats,
}

#[derive(Deserialize)]
struct Stats {
    point_estimate: f64,
    confidence_interval: ConfidenceInterval,
}

#[derive(Deserialize)]
struct ConfidenceInterval {
    lower_bound: f64,
    upper_bound: f64,
}

/// Lattice side lengths; the site count is the square.
const SIDES: [usize; 5] = [4, 16, 64, 256, 512];

fn benchmark_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    group.sample_size(10);

    for &side in &SIDES {
        let sites = side * side;
        let diagram = lattice(side, side, 1.0, 1.0);
        let half = side as f64 / 2.0;
        let bounds = BoundingPolygon::regular([half, half], half * 0.9, 16)
            .expect("regular polygon is convex");
        println!("N: {:7}, lattice {}x{}, edges: {}", sites, side, side, diagram.edge_count());

        group.bench_with_input(BenchmarkId::new("serial", sites), &diagram, |b, d| {
            let clipper = DiagramClipper::new(bounds.clone());
            b.iter(|| clipper.clip(d).expect("valid input"))
        });

        group.bench_with_input(BenchmarkId::new("parallel", sites), &diagram, |b, d| {
            let clipper = DiagramClipper::with_config(bounds.clone(), ClipConfig::default().with_parallel(true));
            b.iter(|| clipper.clip(d).expect("valid input"))
        });
    }
    group.finish();
}

/// Mean and confidence bounds of one run, in nanoseconds per site.
fn per_site(root: &Path, method: &str, sites: usize) -> Result<Option<(f64, f64, f64)>, Box<dyn std::error::Error>> {
    let path = root.join(method).join(sites.to_string()).join("base/estimates.json");
    if !path.exists() {
        return Ok(None);
    }
    let estimates: Estimates = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
    let n = sites as f64;
    let mean = estimates.mean;
    Ok(Some((
        mean.point_estimate / n,
        mean.confidence_interval.lower_bound / n,
        mean.confidence_interval.upper_bound / n,
    )))
}

/// Left: cost per clipped site for both modes. Right: serial over parallel time.
///
/// A flat left panel means clipping stays linear in the number of sites.
fn plot_scaling_results() -> Result<(), Box<dyn std::error::Error>> {
    let root = Path::new("target/criterion/scaling");
    if !root.exists() {
        return Ok(());
    }

    // sites -> (serial, parallel), both present.
    let mut rows: BTreeMap<usize, ((f64, f64, f64), (f64, f64, f64))> = BTreeMap::new();
    for sites in SIDES.iter().map(|s| s * s) {
        if let (Some(serial), Some(parallel)) = (
            per_site(root, "serial", sites)?,
            per_site(root, "parallel", sites)?,
        ) {
            rows.insert(sites, (serial, parallel));
        }
    }
    let (Some(&first), Some(&last)) = (rows.keys().next(), rows.keys().next_back()) else {
        return Ok(());
    };

    let out_dir = Path::new("benches/results");
    std::fs::create_dir_all(out_dir)?;
    let out_file = out_dir.join("clip_scaling.png");
    let area = BitMapBackend::new(&out_file, (1280, 560)).into_drawing_area();
    area.fill(&WHITE)?;
    let (left, right) = area.split_horizontally(720);

    let (x_min, x_max) = (first as f64 * 0.8, last as f64 * 1.25);
    let max_cost = rows
        .values()
        .flat_map(|(s, p)| [s.2, p.2])
        .fold(0.0, f64::max);

    let mut cost = ChartBuilder::on(&left)
        .caption("Cost per site", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..max_cost * 1.2)?;
    cost.configure_mesh()
        .x_desc("Sites")
        .y_desc("ns / site")
        .draw()?;

    for (label, color, parallel) in [("serial", RED, false), ("parallel", BLUE, true)] {
        let points: Vec<(f64, (f64, f64, f64))> = rows
            .iter()
            .map(|(&n, &(s, p))| (n as f64, if parallel { p } else { s }))
            .collect();
        cost.draw_series(points.iter().map(|&(x, (mean, lo, hi))| {
            ErrorBar::new_vertical(x, lo, mean, hi, color.filled(), 8)
        }))?;
        cost.draw_series(LineSeries::new(points.iter().map(|&(x, (mean, _, _))| (x, mean)), &color))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }
    cost.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    let speedups: Vec<(f64, f64)> = rows
        .iter()
        .map(|(&n, (serial, parallel))| (n as f64, serial.0 / parallel.0))
        .collect();
    let max_speedup = speedups.iter().map(|p| p.1).fold(1.0, f64::max);

    let mut speedup = ChartBuilder::on(&right)
        .caption(format!("Speedup on {} threads", rayon::current_num_threads()), ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..max_speedup * 1.2)?;
    speedup.configure_mesh()
        .x_desc("Sites")
        .y_desc("serial / parallel")
        .draw()?;
    // Break-even.
    speedup.draw_series(LineSeries::new(
        [(x_min, 1.0), (x_max, 1.0)],
        BLACK.mix(0.4),
    ))?;
    speedup.draw_series(LineSeries::new(speedups.iter().copied(), &GREEN))?;
    speedup.draw_series(speedups.iter().map(|&p| Circle::new(p, 4, GREEN.filled())))?;

    area.present()?;
    println!("Plot saved to {:?}", out_file);
    Ok(())
}

criterion_group!(benches, benchmark_scaling);

fn main() {
    benches();
    if let Err(e) = plot_scaling_results() {
        eprintln!("Error generating plot: {}", e);
    }
}
