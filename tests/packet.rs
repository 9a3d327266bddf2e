use packtracer::core::camera::Camera;
use packtracer::core::color::Color3;
use packtracer::core::film::Film;
use packtracer::core::geometry::{Int2, Ray, Vector3f};
use packtracer::core::integrator::{Integrator, RenderFlags, FAR_PLANE};
use packtracer::core::intersect::{Frustum, IsectInfo};
use packtracer::core::material::Material;
use packtracer::core::mesh::Mesh;
use packtracer::core::packet::{Packet, PACKET_DIM, RAYS_PER_PACKET};
use packtracer::core::primitive::Primitive;
use packtracer::core::profiler::Profiler;
use packtracer::core::radians;
use packtracer::core::scene::Scene;
use packtracer::core::transform::Quaternion;
use packtracer::integrators::{PacketIntegrator, PixelIntegrator};
use packtracer::shapes::{Instance, Model, Sphere};
use std::sync::Arc;

fn test_camera() -> Camera {
    Camera::new(
        Vector3f::new(0.0, 1.5, 4.0),
        Vector3f::new(0.0, -0.3, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        radians(50.0),
    )
}

fn test_scene() -> Scene {
    let mut scene = Scene::new(test_camera());
    scene.background_color = Color3::new(0.2, 0.3, 0.5);
    scene.ambient_light = Color3::gray(0.25);

    scene.primitives.push(Primitive::Model(Model::new(
        Arc::new(Mesh::plane(8)),
        Material::diffuse_only(Color3::gray(0.7)),
        Instance::new(
            Vector3f::new(0.0, 0.0, 0.0),
            Quaternion::default(),
            Vector3f::new(3.0, 1.0, 3.0),
        ),
    )));
    scene.primitives.push(Primitive::Model(Model::new(
        Arc::new(Mesh::cube()),
        Material {
            ambient: Color3::new(0.7, 0.3, 0.2),
            diffuse: Color3::new(0.7, 0.3, 0.2),
            specular: Color3::gray(0.2),
            refractive_index: 0.0,
        },
        Instance::new(
            Vector3f::new(-0.8, 0.5, 0.0),
            Quaternion::from_axis_angle(&Vector3f::new(0.0, 1.0, 0.0), radians(25.0)),
            Vector3f::new(1.0, 1.0, 1.0),
        ),
    )));
    scene.primitives.push(Primitive::Sphere(Sphere::new(
        0.6,
        Material {
            ambient: Color3::gray(0.05),
            diffuse: Color3::gray(0.05),
            specular: Color3::gray(0.8),
            refractive_index: 1.5,
        },
        Instance::new(
            Vector3f::new(0.9, 0.6, 0.4),
            Quaternion::default(),
            Vector3f::new(1.0, 1.0, 1.0),
        ),
    )));

    scene.lights.push(packtracer::core::light::PointLight {
        position: Vector3f::new(4.0, 6.0, 3.0),
        color: Color3::gray(0.9),
        attenuation: Default::default(),
    });

    scene
}

fn prepared(mut scene: Scene) -> Scene {
    let mut profiler = Profiler::new();
    scene.prepare(&mut profiler);
    scene
}

/// Mirrors the scheduler's per-tile packet loop for one region.
fn trace_packet_manually(
    scene: &Scene,
    width: usize,
    height: usize,
    corner: Int2,
) -> ([IsectInfo; RAYS_PER_PACKET], [Option<usize>; RAYS_PER_PACKET], Packet) {
    let camera = &scene.camera;
    let dim = PACKET_DIM as i32 - 1;
    let ll = camera.pixel_ray(corner, width, height);
    let lr = camera.pixel_ray(Int2::new(corner.x + dim, corner.y), width, height);
    let ul = camera.pixel_ray(Int2::new(corner.x, corner.y + dim), width, height);
    let ur = camera.pixel_ray(Int2::new(corner.x + dim, corner.y + dim), width, height);
    let frustum = Frustum::from_corner_rays(
        &camera.position,
        &ll.dir,
        &lr.dir,
        &ul.dir,
        &ur.dir,
        FAR_PLANE,
    );

    let mut packet = Packet {
        frustum,
        rays: [Ray::default(); RAYS_PER_PACKET],
    };
    for j in 0..PACKET_DIM as i32 {
        for i in 0..PACKET_DIM as i32 {
            let index = j as usize * PACKET_DIM + i as usize;
            packet.rays[index] =
                camera.pixel_ray(Int2::new(corner.x + i, corner.y + j), width, height);
        }
    }

    let mut infos = [IsectInfo::default(); RAYS_PER_PACKET];
    let mut hit_geom = [None; RAYS_PER_PACKET];
    for (geom, primitive) in scene.primitives.iter().enumerate() {
        let mut mask = [true; RAYS_PER_PACKET];
        primitive.intersect_packet(&packet, &mut infos, &mut mask);
        for i in 0..RAYS_PER_PACKET {
            if mask[i] {
                hit_geom[i] = Some(geom);
            }
        }
    }
    (infos, hit_geom, packet)
}

#[test]
fn test_packet_equals_single_rays() {
    let scene = prepared(test_scene());
    let (width, height) = (64, 64);

    // several tiles across the image, including ones off the geometry
    for corner in [
        Int2::new(24, 24),
        Int2::new(32, 16),
        Int2::new(0, 0),
        Int2::new(56, 56),
        Int2::new(16, 40),
    ]
    .iter()
    {
        let (infos, hit_geom, packet) = trace_packet_manually(&scene, width, height, *corner);

        for i in 0..RAYS_PER_PACKET {
            let single = scene.intersect_ray(&packet.rays[i]);
            match (hit_geom[i], single) {
                (Some(geom), Some((single_geom, single_info))) => {
                    assert_eq!(geom, single_geom);
                    assert_eq!(infos[i].time, single_info.time);
                    assert_eq!(infos[i].index, single_info.index);
                    assert_eq!(infos[i].beta, single_info.beta);
                    assert_eq!(infos[i].gamma, single_info.gamma);
                }
                (None, None) => {}
                (packet_hit, single_hit) => {
                    panic!(
                        "packet and single-ray disagree: {:?} vs {:?}",
                        packet_hit.is_some(),
                        single_hit.is_some()
                    );
                }
            }
        }
    }
}

#[test]
fn test_culled_tile_fills_background() {
    // everything sits behind the camera, so every tile's frustum misses
    let mut scene = Scene::new(Camera::new(
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        radians(45.0),
    ));
    scene.background_color = Color3::new(0.1, 0.6, 0.3);
    scene.primitives.push(Primitive::Model(Model::new(
        Arc::new(Mesh::cube()),
        Material::default(),
        Instance::new(
            Vector3f::new(0.0, 0.0, 50.0),
            Quaternion::default(),
            Vector3f::new(1.0, 1.0, 1.0),
        ),
    )));
    let mut scene = prepared(scene);
    scene.lights.clear();

    let mut film = Film::new(32, 24);
    let mut profiler = Profiler::new();
    PacketIntegrator::new(2, RenderFlags::default(), true).render(
        &scene,
        &mut film,
        &mut profiler,
    );

    let expected = scene.background_color.to_rgba();
    for y in 0..24 {
        for x in 0..32 {
            assert_eq!(film.pixel(x, y), expected);
        }
    }

    // every tile culled, no packet traced, no ray shaded
    assert_eq!(profiler.stats.tiles, profiler.stats.tiles_culled);
    assert_eq!(profiler.stats.packets, 0);
    assert_eq!(profiler.stats.rays, 0);
}

#[test]
fn test_scheduler_paths_agree() {
    let scene = prepared(test_scene());
    // 36x20 forces clamped edge tiles in both directions
    let (width, height) = (36, 20);

    let mut packet_film = Film::new(width, height);
    let mut profiler = Profiler::new();
    PacketIntegrator::new(3, RenderFlags::default(), true).render(
        &scene,
        &mut packet_film,
        &mut profiler,
    );

    let mut fallback_film = Film::new(width, height);
    let mut profiler = Profiler::new();
    PacketIntegrator::new(2, RenderFlags::default(), false).render(
        &scene,
        &mut fallback_film,
        &mut profiler,
    );

    let mut pixel_film = Film::new(width, height);
    let mut profiler = Profiler::new();
    PixelIntegrator::new(2, RenderFlags::default(), None).render(
        &scene,
        &mut pixel_film,
        &mut profiler,
    );

    assert_eq!(packet_film.data(), fallback_film.data());
    assert_eq!(packet_film.data(), pixel_film.data());
}

#[test]
fn test_thread_count_invariance() {
    let scene = prepared(test_scene());
    let (width, height) = (40, 32);

    let mut one = Film::new(width, height);
    let mut profiler = Profiler::new();
    PacketIntegrator::new(1, RenderFlags::default(), true).render(&scene, &mut one, &mut profiler);

    let mut four = Film::new(width, height);
    let mut profiler = Profiler::new();
    PacketIntegrator::new(4, RenderFlags::default(), true).render(
        &scene,
        &mut four,
        &mut profiler,
    );

    assert_eq!(one.data(), four.data());
}
