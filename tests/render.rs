use packtracer::core::camera::Camera;
use packtracer::core::color::Color3;
use packtracer::core::film::Film;
use packtracer::core::geometry::Vector3f;
use packtracer::core::integrator::{Integrator, RenderFlags};
use packtracer::core::material::Material;
use packtracer::core::mesh::Mesh;
use packtracer::core::packet::PACKET_DIM;
use packtracer::core::parallel::{tile_regions, TsQueue};
use packtracer::core::primitive::Primitive;
use packtracer::core::profiler::Profiler;
use packtracer::core::radians;
use packtracer::core::scene::Scene;
use packtracer::integrators::PixelIntegrator;
use packtracer::shapes::{Instance, Model};
use std::sync::Arc;

#[test]
fn test_film_layout() {
    let mut film = Film::new(4, 3);
    film.write_pixel(1, 2, &Color3::new(1.0, 0.0, 0.0));

    assert_eq!(film.pixel(1, 2), [255, 0, 0, 255]);
    let offset = 4 * (2 * 4 + 1);
    assert_eq!(&film.data()[offset..offset + 4], &[255, 0, 0, 255]);

    let mut out = Vec::new();
    film.write_ppm(&mut out).unwrap();
    assert!(out.starts_with(b"P6\n4 3\n255\n"));
    assert_eq!(out.len(), b"P6\n4 3\n255\n".len() + 4 * 3 * 3);
}

#[test]
fn test_tile_partition_covers_exactly_once() {
    let (width, height) = (36, 20);
    let mut seen = vec![0u32; width * height];

    for region in tile_regions(width, height) {
        assert!(region.lr.x - region.ll.x < PACKET_DIM as i32);
        assert!(region.ul.y - region.ll.y < PACKET_DIM as i32);
        for y in region.ll.y..=region.ul.y {
            for x in region.ll.x..=region.lr.x {
                assert!(x >= 0 && (x as usize) < width);
                assert!(y >= 0 && (y as usize) < height);
                seen[y as usize * width + x as usize] += 1;
            }
        }
    }

    // the tile partition never overlaps and never leaves gaps
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn test_queue_drains_once() {
    let queue: TsQueue<usize> = (0..100).collect();
    let mut popped = Vec::new();
    while let Some(v) = queue.pop() {
        popped.push(v);
    }
    assert_eq!(popped, (0..100).collect::<Vec<_>>());
    assert!(queue.pop().is_none());
    assert!(queue.is_empty());
}

fn small_scene() -> Scene {
    let mut scene = Scene::new(Camera::new(
        Vector3f::new(0.0, 1.0, 3.0),
        Vector3f::new(0.0, -0.3, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        radians(45.0),
    ));
    scene.background_color = Color3::gray(0.1);
    scene.primitives.push(Primitive::Model(Model::new(
        Arc::new(Mesh::plane(4)),
        Material::diffuse_only(Color3::gray(0.5)),
        Instance::default(),
    )));
    scene
}

#[test]
fn test_zero_budget_reports_incomplete() {
    let mut scene = small_scene();
    let mut profiler = Profiler::new();
    scene.prepare(&mut profiler);

    let mut film = Film::new(32, 32);
    PixelIntegrator::new(2, RenderFlags::default(), Some(0.0)).render(
        &scene,
        &mut film,
        &mut profiler,
    );

    assert!(!profiler.stats.complete);
}

#[test]
fn test_unbudgeted_render_completes() {
    let mut scene = small_scene();
    let mut profiler = Profiler::new();
    scene.prepare(&mut profiler);

    let mut film = Film::new(16, 16);
    PixelIntegrator::new(2, RenderFlags::default(), None).render(
        &scene,
        &mut film,
        &mut profiler,
    );

    assert!(profiler.stats.complete);
    assert!(profiler.stats.rays >= 16 * 16);
    assert!(profiler.phase("render").is_some());
}
