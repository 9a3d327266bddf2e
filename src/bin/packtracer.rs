use clap::Clap;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use packtracer::core::{
    camera::Camera,
    color::Color3,
    film::Film,
    geometry::Vector3f,
    integrator::{Integrator, RenderFlags},
    light::PointLight,
    material::Material,
    mesh::Mesh,
    primitive::Primitive,
    profiler::Profiler,
    radians,
    scene::Scene,
    transform::Quaternion,
};
use packtracer::integrators::{PacketIntegrator, PixelIntegrator};
use packtracer::shapes::{Instance, Model, Sphere, Triangle};
use packtracer::shapes::triangle::TriangleVertex;
use packtracer::Options;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

fn init_logging(quiet: bool) {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stdout = ConsoleAppender::builder().build();
    let level = if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .unwrap();
    log4rs::init_config(config).unwrap();
}

/// Procedural stand-in for a scene file: a ground plane, a spun cube, two
/// spheres (one glass), one bare triangle, two point lights.
fn demo_scene() -> Scene {
    let camera = Camera::new(
        Vector3f::new(0.0, 1.8, 4.5),
        Vector3f::new(0.0, -0.3, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        radians(45.0),
    );
    let mut scene = Scene::new(camera);
    scene.background_color = Color3::new(0.25, 0.35, 0.55);
    scene.ambient_light = Color3::gray(0.2);

    let floor_material = Material {
        ambient: Color3::gray(0.6),
        diffuse: Color3::gray(0.6),
        specular: Color3::gray(0.05),
        refractive_index: 0.0,
    };
    scene.primitives.push(Primitive::Model(Model::new(
        Arc::new(Mesh::plane(16)),
        floor_material,
        Instance::new(
            Vector3f::new(0.0, 0.0, 0.0),
            Quaternion::default(),
            Vector3f::new(4.0, 1.0, 4.0),
        ),
    )));

    let cube_material = Material {
        ambient: Color3::new(0.7, 0.25, 0.2),
        diffuse: Color3::new(0.7, 0.25, 0.2),
        specular: Color3::gray(0.15),
        refractive_index: 0.0,
    };
    scene.primitives.push(Primitive::Model(Model::new(
        Arc::new(Mesh::cube()),
        cube_material,
        Instance::new(
            Vector3f::new(-1.2, 0.5, 0.0),
            Quaternion::from_axis_angle(&Vector3f::new(0.0, 1.0, 0.0), radians(30.0)),
            Vector3f::new(1.0, 1.0, 1.0),
        ),
    )));

    let glass = Material {
        ambient: Color3::gray(0.05),
        diffuse: Color3::gray(0.05),
        specular: Color3::gray(0.9),
        refractive_index: 1.5,
    };
    scene.primitives.push(Primitive::Sphere(Sphere::new(
        0.75,
        glass,
        Instance::new(
            Vector3f::new(1.0, 0.75, 0.5),
            Quaternion::default(),
            Vector3f::new(1.0, 1.0, 1.0),
        ),
    )));

    let blue = Material {
        ambient: Color3::new(0.15, 0.25, 0.7),
        diffuse: Color3::new(0.15, 0.25, 0.7),
        specular: Color3::gray(0.4),
        refractive_index: 0.0,
    };
    scene.primitives.push(Primitive::Sphere(Sphere::new(
        0.6,
        blue,
        Instance::new(
            Vector3f::new(0.1, 0.6, -1.6),
            Quaternion::default(),
            Vector3f::new(1.0, 1.0, 1.0),
        ),
    )));

    let yellow = Material {
        ambient: Color3::new(0.8, 0.7, 0.1),
        diffuse: Color3::new(0.8, 0.7, 0.1),
        specular: Color3::gray(0.1),
        refractive_index: 0.0,
    };
    let n = Vector3f::new(0.0, 0.0, 1.0);
    scene.primitives.push(Primitive::Triangle(Triangle::new(
        [
            TriangleVertex {
                position: Vector3f::new(-2.6, 0.0, -1.0),
                normal: n,
            },
            TriangleVertex {
                position: Vector3f::new(-1.6, 0.0, -1.0),
                normal: n,
            },
            TriangleVertex {
                position: Vector3f::new(-2.1, 1.2, -1.0),
                normal: n,
            },
        ],
        yellow,
        Instance::default(),
    )));

    scene.lights.push(PointLight {
        position: Vector3f::new(5.0, 6.0, 4.0),
        color: Color3::gray(0.9),
        attenuation: Default::default(),
    });
    scene.lights.push(PointLight {
        position: Vector3f::new(-4.0, 5.0, -2.0),
        color: Color3::gray(0.4),
        attenuation: Default::default(),
    });

    scene
}

fn run(opts: &Options) -> std::io::Result<()> {
    let mut scene = demo_scene();
    let mut profiler = Profiler::new();
    scene.prepare(&mut profiler);

    let mut film = Film::new(opts.width, opts.height);
    let mut flags = RenderFlags::default();
    if opts.antialias {
        flags |= RenderFlags::ANTIALIAS;
    }

    if opts.antialias || opts.max_time.is_some() {
        PixelIntegrator::new(opts.threads, flags, opts.max_time)
            .render(&scene, &mut film, &mut profiler);
    } else {
        PacketIntegrator::new(opts.threads, flags, !opts.no_packets)
            .render(&scene, &mut film, &mut profiler);
    }
    profiler.log_summary();

    let mut out = BufWriter::new(File::create(&opts.image_file)?);
    film.write_ppm(&mut out)?;
    log::info!("wrote {}", opts.image_file);
    Ok(())
}

fn main() {
    let opts = Options::parse();
    init_logging(opts.quiet);
    log::debug!("options:{:?}", opts);
    if let Err(e) = run(&opts) {
        log::error!("render failed: {}", e);
        std::process::exit(1);
    }
}
