use crate::core::{
    geometry::Ray,
    interaction::SurfaceInteraction,
    intersect::{Frustum, IsectInfo},
    packet::{Packet, RAYS_PER_PACKET},
};
use crate::shapes::{Model, Sphere, Triangle};
use crate::Float;

/// Closed set of geometry kinds, dispatched by matching. The set is fixed
/// at compile time, so there is no trait object in the hot path.
pub enum Primitive {
    Model(Model),
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    /// Precomputes the acceleration data for this kind; the BVH for a
    /// model, plain world bounds for the analytic kinds. Serial, and
    /// always before the first query.
    pub fn make_bounding_volume(&mut self) {
        match self {
            Primitive::Model(m) => m.make_bounding_volume(),
            Primitive::Sphere(s) => s.make_bounding_volume(),
            Primitive::Triangle(t) => t.make_bounding_volume(),
        }
    }

    pub fn intersect_ray(&self, ray: &Ray, info: &mut IsectInfo) -> bool {
        match self {
            Primitive::Model(m) => m.intersect_ray(ray, info),
            Primitive::Sphere(s) => s.intersect_ray(ray, info),
            Primitive::Triangle(t) => t.intersect_ray(ray, info),
        }
    }

    pub fn shadow_test(&self, ray: &Ray, max_time: Float) -> bool {
        match self {
            Primitive::Model(m) => m.shadow_test(ray, max_time),
            Primitive::Sphere(s) => s.shadow_test(ray, max_time),
            Primitive::Triangle(t) => t.shadow_test(ray, max_time),
        }
    }

    pub fn intersect_frustum(&self, frustum: &Frustum) -> bool {
        match self {
            Primitive::Model(m) => m.intersect_frustum(frustum),
            Primitive::Sphere(s) => s.intersect_frustum(frustum),
            Primitive::Triangle(t) => t.intersect_frustum(frustum),
        }
    }

    pub fn intersect_packet(
        &self,
        packet: &Packet,
        infos: &mut [IsectInfo; RAYS_PER_PACKET],
        intersected: &mut [bool; RAYS_PER_PACKET],
    ) {
        match self {
            Primitive::Model(m) => m.intersect_packet(packet, infos, intersected),
            Primitive::Sphere(s) => s.intersect_packet(packet, infos, intersected),
            Primitive::Triangle(t) => t.intersect_packet(packet, infos, intersected),
        }
    }

    pub fn interaction(&self, ray: &Ray, info: &IsectInfo) -> SurfaceInteraction {
        match self {
            Primitive::Model(m) => m.interaction(ray, info),
            Primitive::Sphere(s) => s.interaction(ray, info),
            Primitive::Triangle(t) => t.interaction(ray, info),
        }
    }
}
