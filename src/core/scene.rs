use crate::core::{
    camera::Camera,
    color::Color3,
    geometry::Ray,
    interaction::SurfaceInteraction,
    intersect::IsectInfo,
    light::PointLight,
    primitive::Primitive,
    profiler::Profiler,
};
use crate::Float;

/// The world to render. Immutable and shared read-only across workers once
/// `prepare` has run.
pub struct Scene {
    pub camera: Camera,
    pub background_color: Color3,
    pub ambient_light: Color3,
    /// Refraction index of the medium rays start in.
    pub refractive_index: Float,
    pub lights: Vec<PointLight>,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Scene {
            camera,
            background_color: Color3::default(),
            ambient_light: Color3::default(),
            refractive_index: 1.0,
            lights: Vec::new(),
            primitives: Vec::new(),
        }
    }

    /// Serial precompute phase: every primitive's transform data and
    /// acceleration structure. Must finish before the first query; after
    /// it, traversal needs no locking.
    pub fn prepare(&mut self, profiler: &mut Profiler) {
        profiler.measure("scene prepare", || {
            for primitive in self.primitives.iter_mut() {
                primitive.make_bounding_volume();
            }
        });
    }

    /// Nearest hit across every primitive; the accumulator keeps hit times
    /// comparable across instances.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(usize, IsectInfo)> {
        let mut info = IsectInfo::default();
        let mut hit = None;
        for (i, primitive) in self.primitives.iter().enumerate() {
            if primitive.intersect_ray(ray, &mut info) {
                hit = Some(i);
            }
        }
        hit.map(|i| (i, info))
    }

    pub fn interaction(&self, ray: &Ray, geom: usize, info: &IsectInfo) -> SurfaceInteraction {
        self.primitives[geom].interaction(ray, info)
    }

    /// True when anything occludes the ray within `(SLOP, max_time)`.
    pub fn shadow_test(&self, ray: &Ray, max_time: Float) -> bool {
        self.primitives
            .iter()
            .any(|p| p.shadow_test(ray, max_time))
    }
}
