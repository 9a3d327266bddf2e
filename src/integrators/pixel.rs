use crate::core::{
    color::{Color3, BLACK},
    film::Film,
    geometry::Int2,
    integrator::{trace_pixel, BaseIntegrator, Integrator, RenderFlags},
    profiler::{Profiler, RenderStats},
    scene::Scene,
};
use crate::Float;
use atomic::{Atomic, Ordering};
use derive_more::{Deref, DerefMut};
use rayon::prelude::*;
use std::time::Instant;

const PRINT_INTERVAL: usize = 64;

/// The point-sampled renderer: one full nearest-hit query per pixel, rows
/// fanned out across a thread pool. Supports a soft wall clock budget -
/// rows that miss the deadline are skipped and the render reports itself
/// incomplete - and jittered 4x4 supersampling.
#[derive(Deref, DerefMut)]
pub struct PixelIntegrator {
    #[deref]
    #[deref_mut]
    base: BaseIntegrator,
    pub max_time: Option<f64>,
}

impl PixelIntegrator {
    pub fn new(num_threads: usize, flags: RenderFlags, max_time: Option<f64>) -> Self {
        PixelIntegrator {
            base: BaseIntegrator::new(num_threads, flags),
            max_time,
        }
    }
}

impl Integrator for PixelIntegrator {
    fn render(&self, scene: &Scene, film: &mut Film, profiler: &mut Profiler) {
        let width = film.width();
        let height = film.height();
        let start = Instant::now();
        let out_of_time = Atomic::new(false);
        let rows_done = Atomic::new(0usize);
        let antialias = self.flags.contains(RenderFlags::ANTIALIAS);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()
            .unwrap();

        let stats = pool.install(|| {
            film.data_mut()
                .par_chunks_mut(4 * width)
                .enumerate()
                .map(|(y, row)| {
                    let mut stats = RenderStats::default();

                    if out_of_time.load(Ordering::Relaxed) {
                        stats.complete = false;
                        return stats;
                    }
                    if let Some(limit) = self.max_time {
                        if start.elapsed().as_secs_f64() > limit {
                            out_of_time.store(true, Ordering::Relaxed);
                            stats.complete = false;
                            return stats;
                        }
                    }

                    for x in 0..width {
                        let color = if antialias {
                            supersample(scene, x, y, width, height, &mut stats)
                        } else {
                            let ray = scene.camera.pixel_ray(
                                Int2::new(x as i32, y as i32),
                                width,
                                height,
                            );
                            trace_pixel(scene, &ray, scene.refractive_index, 0, &mut stats)
                        };
                        row[4 * x..4 * x + 4].copy_from_slice(&color.to_rgba());
                    }

                    let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % PRINT_INTERVAL == 0 {
                        log::debug!("raytraced {} of {} rows", done, height);
                    }
                    stats
                })
                .reduce(RenderStats::default, |mut a, b| {
                    a.merge(&b);
                    a
                })
        });

        profiler.record("render", start.elapsed());
        profiler.stats.merge(&stats);
        if !stats.complete {
            log::warn!(
                "render ran out of time after {} of {} rows",
                rows_done.load(Ordering::Relaxed),
                height
            );
        }
    }
}

/// 4x4 jittered grid per pixel; the jitter is a hash of the sample
/// coordinates so repeated renders are identical.
fn supersample(
    scene: &Scene,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    stats: &mut RenderStats,
) -> Color3 {
    let n = 4i32;
    let mut c = BLACK;
    for p in -(n / 2)..(n / 2) {
        for q in -(n / 2)..(n / 2) {
            let r = jitter(x, y, p, q) - 0.5;
            let sx = x as Float + 0.5 + (p as Float + r) / n as Float;
            let sy = y as Float + 0.5 + (q as Float + r) / n as Float;
            let ray = scene.camera.viewing_ray(sx, sy, width, height);
            c += trace_pixel(scene, &ray, scene.refractive_index, 0, stats);
        }
    }
    c * (1.0 / (n * n) as Float)
}

fn jitter(x: usize, y: usize, p: i32, q: i32) -> Float {
    let mut h = (x as u32)
        ^ (y as u32).rotate_left(16)
        ^ ((p + 8) as u32).rotate_left(8)
        ^ ((q + 8) as u32).rotate_left(24);
    h = h.wrapping_mul(0x9e37_79b9);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    (h & 0x00ff_ffff) as Float / 16_777_216.0
}
