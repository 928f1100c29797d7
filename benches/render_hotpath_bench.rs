//! Benchmark für den Render-Hotpath.
//!
//! Misst die Kosten pro Sample-Änderung:
//! - Skeleton-Format (Zwischenpunkte eines Rings)
//! - Schema-Render inkl. Scene-Abgleich über die Scopes
//! - Skeleton-Punkte eines aktiven Plots abgleichen

use std::hint::black_box;
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use globe_plot::app::skeleton::{IntervalSkeleton, Skeleton};
use globe_plot::{
    Cartographic, MemoryViewer, Packable, PlotController, PlotFeatureOptions, PlotOptions,
};

fn ring(vertex_count: usize) -> Vec<DVec3> {
    (0..vertex_count)
        .map(|i| {
            let angle = i as f64 / vertex_count as f64 * std::f64::consts::TAU;
            Cartographic {
                longitude: angle.cos() * 1.0e-4,
                latitude: angle.sin() * 1.0e-4,
                height: 0.0,
            }
            .to_cartesian()
        })
        .collect()
}

/// Controller mit einem übernommenen, aktuellen Polygon.
fn controller_with_polygon(vertex_count: usize) -> PlotController {
    let mut controller = PlotController::new(Rc::new(MemoryViewer::new()), PlotOptions::default());
    let options = PlotFeatureOptions::new("polygon")
        .with_samples(vec![Packable::new(0.0, ring(vertex_count))])
        .committed();
    controller
        .operate(options)
        .expect("Scene im MemoryViewer vorhanden");
    controller
}

/// Misst: Zwischenpunkte eines Rings berechnen (= pro Render-Durchlauf)
fn bench_interval_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_format");
    let skeleton = IntervalSkeleton::default();

    for &vertex_count in &[3usize, 32, 256, 2048] {
        let packable = Packable::new(0.0, ring(vertex_count));
        group.bench_with_input(
            BenchmarkId::new("midpoints", vertex_count),
            &packable,
            |b, packable| b.iter(|| black_box(skeleton.format(black_box(packable)))),
        );
    }

    group.finish();
}

/// Misst: Sample setzen → Schema-Render → Scope-Abgleich → Skeleton-Abgleich
fn bench_set_sample_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_sample_sync");

    for &vertex_count in &[3usize, 32, 256] {
        let mut controller = controller_with_polygon(vertex_count);
        let Some(id) = controller.current() else {
            continue;
        };
        let mut positions = ring(vertex_count);

        group.bench_function(BenchmarkId::new("polygon", vertex_count), |b| {
            b.iter(|| {
                positions[0] *= 1.0 + 1.0e-12;
                controller
                    .set_sample(id, Packable::new(0.0, positions.clone()))
                    .expect("Sync ohne Fehler");
            })
        });
    }

    group.finish();
}

/// Misst: alle Plots neu rendern
fn bench_refresh_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh_all");

    for &plot_count in &[1usize, 16, 128] {
        let mut controller =
            PlotController::new(Rc::new(MemoryViewer::new()), PlotOptions::default());
        for _ in 0..plot_count {
            let options = PlotFeatureOptions::new("polygon")
                .with_samples(vec![Packable::new(0.0, ring(16))])
                .committed();
            controller.operate(options).expect("Scene vorhanden");
        }

        group.bench_function(BenchmarkId::new("plots", plot_count), |b| {
            b.iter(|| controller.refresh().expect("Sync ohne Fehler"))
        });
    }

    group.finish();
}

criterion_group!(
    render_hotpath_benches,
    bench_interval_format,
    bench_set_sample_sync,
    bench_refresh_all
);
criterion_main!(render_hotpath_benches);
