use crate::core::{
    color::{Color3, BLACK},
    film::Film,
    geometry::{Ray, Vector3f},
    interaction::SurfaceInteraction,
    intersect::IsectInfo,
    profiler::{Profiler, RenderStats},
    scene::Scene,
    SLOP,
};
use crate::Float;

/// Shading recursion bound shared by both renderers.
pub const MAX_RECURSION_DEPTH: i32 = 10;

/// Far plane distance used when building tile frusta.
pub const FAR_PLANE: Float = 1e4;

bitflags::bitflags! {
    pub struct RenderFlags: u32 {
        /// Jittered 4x4 supersampling (pixel tracer only).
        const ANTIALIAS = 1;
        /// Whole-model frustum culling in the tile scheduler.
        const FRUSTUM_CULL = 2;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags::FRUSTUM_CULL
    }
}

pub trait Integrator {
    fn render(&self, scene: &Scene, film: &mut Film, profiler: &mut Profiler);
}

/// Settings shared by the renderers; the concrete integrators deref to it.
pub struct BaseIntegrator {
    pub num_threads: usize,
    pub flags: RenderFlags,
}

impl BaseIntegrator {
    pub fn new(num_threads: usize, flags: RenderFlags) -> Self {
        let num_threads = if num_threads == 0 {
            num_cpus::get()
        } else {
            num_threads
        };
        BaseIntegrator { num_threads, flags }
    }
}

/// Full per-pixel query: nearest hit over the scene, then shading.
pub fn trace_pixel(
    scene: &Scene,
    ray: &Ray,
    refractive: Float,
    recursions: i32,
    stats: &mut RenderStats,
) -> Color3 {
    let hit = scene.intersect_ray(ray);
    trace_pixel_end(scene, ray, refractive, recursions, hit, stats)
}

/// Shades a primary hit that has already been found - by `trace_pixel`
/// above or by packet traversal. Secondary rays always go through
/// `trace_pixel`.
pub fn trace_pixel_end(
    scene: &Scene,
    ray: &Ray,
    refractive: Float,
    recursions: i32,
    hit: Option<(usize, IsectInfo)>,
    stats: &mut RenderStats,
) -> Color3 {
    stats.rays += 1;
    let (geom, info) = match hit {
        Some(h) => h,
        None => return scene.background_color,
    };
    let interaction = scene.interaction(ray, geom, &info);
    shade(scene, ray, refractive, recursions, &interaction, stats)
}

fn shade(
    scene: &Scene,
    ray: &Ray,
    refractive: Float,
    recursions: i32,
    si: &SurfaceInteraction,
    stats: &mut RenderStats,
) -> Color3 {
    let angle = ray.dir.dot(&si.normal);
    let incident = (ray.dir - si.normal * (2.0 * angle)).normalize();
    let reflection_point = si.point + incident * SLOP;

    if si.refractive == 0.0 {
        let ambient = scene.ambient_light * si.ambient;
        let diffuse = diffuse_at(scene, &si.point, &si.normal, &si.diffuse, stats);
        let direct = ambient + diffuse;

        if recursions >= MAX_RECURSION_DEPTH {
            return direct;
        }

        direct
            + si.specular
                * trace_pixel(
                    scene,
                    &Ray::new(reflection_point, incident),
                    refractive,
                    recursions + 1,
                    stats,
                )
    } else {
        if recursions >= MAX_RECURSION_DEPTH {
            return BLACK;
        }

        let refract_ratio = refractive / si.refractive;
        let c;
        let transmitted;

        if angle < 0.0 {
            // entering the object
            match refract(&ray.dir, &si.normal, refract_ratio) {
                Some(t) => {
                    transmitted = t;
                    c = (-ray.dir).dot(&si.normal);
                }
                None => {
                    return trace_pixel(
                        scene,
                        &Ray::new(reflection_point, incident),
                        refractive,
                        recursions + 1,
                        stats,
                    );
                }
            }
        } else {
            // exiting; total internal reflection leaves only the mirror term
            match refract(&ray.dir, &-si.normal, si.refractive) {
                Some(t) => {
                    transmitted = t;
                    c = transmitted.dot(&si.normal);
                }
                None => {
                    return trace_pixel(
                        scene,
                        &Ray::new(reflection_point, incident),
                        refractive,
                        recursions + 1,
                        stats,
                    );
                }
            }
        }

        let r = schlick(refract_ratio, c);
        let refraction_point = si.point + transmitted * SLOP;

        r * trace_pixel(
            scene,
            &Ray::new(reflection_point, incident),
            refractive,
            recursions + 1,
            stats,
        ) + (1.0 - r)
            * trace_pixel(
                scene,
                &Ray::new(refraction_point, transmitted),
                si.refractive,
                recursions + 1,
                stats,
            )
    }
}

/// Contribution of every point light to the diffuse term. Each front-facing
/// light gets one shadow query bounded to the light distance; any occluder
/// in that range zeroes the light.
pub fn diffuse_at(
    scene: &Scene,
    point: &Vector3f,
    normal: &Vector3f,
    diffuse: &Color3,
    stats: &mut RenderStats,
) -> Color3 {
    let mut out = BLACK;

    for light in scene.lights.iter() {
        let light_direction = light.position - *point;
        let light_distance = light_direction.length();
        let front_face = normal.dot(&light_direction.normalize()).max(0.0);

        if front_face > 0.0 {
            stats.shadow_rays += 1;
            let shadow_ray = Ray::new(*point + light_direction * SLOP, light_direction);
            if !scene.shadow_test(&shadow_ray, 1.0) {
                out += front_face * light.attenuated_color(light_distance) * *diffuse;
            }
        }
    }

    out
}

/// False on total internal reflection; otherwise the normalized
/// transmitted direction.
pub fn refract(d: &Vector3f, normal: &Vector3f, n: Float) -> Option<Vector3f> {
    let d_dot_n = d.dot(normal);
    let radicand = 1.0 - n * n * (1.0 - d_dot_n * d_dot_n);

    if radicand < 0.0 {
        return None;
    }

    Some(((*d - *normal * d_dot_n) * n - *normal * radicand.sqrt()).normalize())
}

/// Schlick's approximation to the Fresnel reflectance.
pub fn schlick(refract_ratio: Float, c: Float) -> Float {
    let r0 = (refract_ratio - 1.0) * (refract_ratio - 1.0)
        / ((refract_ratio + 1.0) * (refract_ratio + 1.0));
    r0 + (1.0 - r0) * (1.0 - c).powi(5)
}
