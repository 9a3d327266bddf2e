use crate::core::{
    color::Color3,
    film::Film,
    geometry::{Int2, Ray},
    integrator::{trace_pixel, trace_pixel_end, BaseIntegrator, Integrator, RenderFlags, FAR_PLANE},
    intersect::{Frustum, IsectInfo},
    packet::{Packet, PacketRegion, PACKET_DIM, RAYS_PER_PACKET},
    parallel::{tile_regions, TsQueue},
    profiler::{Profiler, RenderStats},
    scene::Scene,
};
use derive_more::{Deref, DerefMut};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

enum TileMsg {
    Tile(Vec<(usize, usize, Color3)>),
    Done(RenderStats),
}

/// The tile scheduler: the image is cut into PACKET_DIM-square regions fed
/// to a fixed worker pool through a shared FIFO. Workers trace whole tiles
/// (coherent packets by default, per-pixel as a fallback) and ship the
/// finished pixels to the one thread that owns the film, so no pixel is
/// ever written under contention.
#[derive(Deref, DerefMut)]
pub struct PacketIntegrator {
    #[deref]
    #[deref_mut]
    base: BaseIntegrator,
    use_packets: bool,
}

impl PacketIntegrator {
    pub fn new(num_threads: usize, flags: RenderFlags, use_packets: bool) -> Self {
        PacketIntegrator {
            base: BaseIntegrator::new(num_threads, flags),
            use_packets,
        }
    }

    fn trace_region(
        &self,
        scene: &Scene,
        width: usize,
        height: usize,
        region: PacketRegion,
        stats: &mut RenderStats,
    ) -> Vec<(usize, usize, Color3)> {
        stats.tiles += 1;
        let camera = &scene.camera;

        let ll = camera.pixel_ray(region.ll, width, height);
        let lr = camera.pixel_ray(region.lr, width, height);
        let ul = camera.pixel_ray(region.ul, width, height);
        let ur = camera.pixel_ray(region.ur, width, height);
        let frustum = Frustum::from_corner_rays(
            &camera.position,
            &ll.dir,
            &lr.dir,
            &ul.dir,
            &ur.dir,
            FAR_PLANE,
        );

        let visible: Vec<usize> = if self.flags.contains(RenderFlags::FRUSTUM_CULL) {
            scene
                .primitives
                .iter()
                .enumerate()
                .filter(|(_, p)| p.intersect_frustum(&frustum))
                .map(|(i, _)| i)
                .collect()
        } else {
            (0..scene.primitives.len()).collect()
        };

        let mut pixels = Vec::with_capacity(RAYS_PER_PACKET);

        // Nothing can be seen through this tile; fill with background
        // without touching any tree.
        if visible.is_empty() {
            stats.tiles_culled += 1;
            for y in region.ll.y..=region.ul.y {
                for x in region.ll.x..=region.lr.x {
                    pixels.push((x as usize, y as usize, scene.background_color));
                }
            }
            return pixels;
        }

        if self.use_packets {
            stats.packets += 1;
            let mut packet = Packet {
                frustum,
                rays: [Ray::default(); RAYS_PER_PACKET],
            };
            let mut active = [false; RAYS_PER_PACKET];
            for j in 0..PACKET_DIM as i32 {
                for i in 0..PACKET_DIM as i32 {
                    let x = region.ll.x + i;
                    let y = region.ll.y + j;
                    // edge tiles: rays outside the image stay inactive
                    if x <= region.lr.x && y <= region.ul.y {
                        let index = j as usize * PACKET_DIM + i as usize;
                        packet.rays[index] = camera.pixel_ray(Int2::new(x, y), width, height);
                        active[index] = true;
                    }
                }
            }

            let mut infos = [IsectInfo::default(); RAYS_PER_PACKET];
            let mut hit_geom: [Option<usize>; RAYS_PER_PACKET] = [None; RAYS_PER_PACKET];
            for &geom in visible.iter() {
                let mut mask = active;
                scene.primitives[geom].intersect_packet(&packet, &mut infos, &mut mask);
                for i in 0..RAYS_PER_PACKET {
                    // an accepted hit here is closer than anything before it
                    if mask[i] {
                        hit_geom[i] = Some(geom);
                    }
                }
            }

            for j in 0..PACKET_DIM as i32 {
                for i in 0..PACKET_DIM as i32 {
                    let index = j as usize * PACKET_DIM + i as usize;
                    if active[index] {
                        let hit = hit_geom[index].map(|g| (g, infos[index]));
                        let color = trace_pixel_end(
                            scene,
                            &packet.rays[index],
                            scene.refractive_index,
                            0,
                            hit,
                            stats,
                        );
                        pixels.push((
                            (region.ll.x + i) as usize,
                            (region.ll.y + j) as usize,
                            color,
                        ));
                    }
                }
            }
        } else {
            for y in region.ll.y..=region.ul.y {
                for x in region.ll.x..=region.lr.x {
                    let ray = camera.pixel_ray(Int2::new(x, y), width, height);
                    let color = trace_pixel(scene, &ray, scene.refractive_index, 0, stats);
                    pixels.push((x as usize, y as usize, color));
                }
            }
        }

        pixels
    }
}

impl Integrator for PacketIntegrator {
    fn render(&self, scene: &Scene, film: &mut Film, profiler: &mut Profiler) {
        let width = film.width();
        let height = film.height();
        let queue: TsQueue<PacketRegion> = tile_regions(width, height).into_iter().collect();
        let (tx, rx) = mpsc::channel();
        let start = Instant::now();
        let mut total = RenderStats::default();

        thread::scope(|s| {
            for _ in 0..self.num_threads {
                let tx = tx.clone();
                let queue = &queue;
                s.spawn(move || {
                    let mut stats = RenderStats::default();
                    while let Some(region) = queue.pop() {
                        let pixels = self.trace_region(scene, width, height, region, &mut stats);
                        if tx.send(TileMsg::Tile(pixels)).is_err() {
                            return;
                        }
                    }
                    let _ = tx.send(TileMsg::Done(stats));
                });
            }
            drop(tx);

            for msg in rx {
                match msg {
                    TileMsg::Tile(pixels) => {
                        for (x, y, color) in pixels {
                            film.write_pixel(x, y, &color);
                        }
                    }
                    TileMsg::Done(stats) => total.merge(&stats),
                }
            }
        });

        profiler.record("render", start.elapsed());
        profiler.stats.merge(&total);
        log::debug!(
            "packet render of {}x{} finished in {:.3}s",
            width,
            height,
            start.elapsed().as_secs_f64()
        );
    }
}
