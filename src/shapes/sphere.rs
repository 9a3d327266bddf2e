use crate::core::{
    geometry::{Bounds3f, Ray, Vector3f},
    interaction::SurfaceInteraction,
    intersect::{frustum_box_intersect, Frustum, IsectInfo},
    material::Material,
    packet::{Packet, RAYS_PER_PACKET},
    quadratic, SLOP,
};
use crate::shapes::Instance;
use crate::Float;

/// A placed sphere, centered at the origin in object space.
pub struct Sphere {
    pub radius: Float,
    pub material: Material,
    pub instance: Instance,
    bounds: Bounds3f,
}

impl Sphere {
    pub fn new(radius: Float, material: Material, instance: Instance) -> Self {
        Sphere {
            radius,
            material,
            instance,
            bounds: Bounds3f::default(),
        }
    }

    /// World bounds: the object-space box around the sphere pushed through
    /// the forward transform (conservative under rotation).
    pub fn make_bounding_volume(&mut self) {
        let r = self.radius;
        let object_bounds = Bounds3f::new(Vector3f::new(-r, -r, -r), Vector3f::new(r, r, r));
        let mut bounds = Bounds3f::default();
        for corner in object_bounds.corners().iter() {
            bounds.extend(&self.instance.transform.transform_point(corner));
        }
        self.bounds = bounds;
    }

    pub fn world_bound(&self) -> &Bounds3f {
        &self.bounds
    }

    /// Object-space quadratic solve with the update-if-closer contract the
    /// triangle kernel uses; the nearer root wins unless it is behind the
    /// eye, which happens when the eye sits inside the sphere.
    pub fn intersect_ray(&self, ray: &Ray, info: &mut IsectInfo) -> bool {
        let object_ray = self.instance.object_ray(ray);
        let (e, d) = (object_ray.eye, object_ray.dir);

        let a = d.dot(&d);
        let b = 2.0 * d.dot(&e);
        let c = e.dot(&e) - self.radius * self.radius;

        let (mut t0, mut t1) = (0.0, 0.0);
        if !quadratic(a, b, c, &mut t0, &mut t1) {
            return false;
        }

        let t = if t0 > SLOP { t0 } else { t1 };
        if t > SLOP && t < info.time {
            info.time = t;
            info.index = 0;
            info.beta = 0.0;
            info.gamma = 0.0;
            true
        } else {
            false
        }
    }

    pub fn shadow_test(&self, ray: &Ray, max_time: Float) -> bool {
        let mut info = IsectInfo::bounded(max_time);
        self.intersect_ray(ray, &mut info)
    }

    pub fn intersect_frustum(&self, frustum: &Frustum) -> bool {
        frustum_box_intersect(frustum, &self.bounds)
    }

    pub fn intersect_packet(
        &self,
        packet: &Packet,
        infos: &mut [IsectInfo; RAYS_PER_PACKET],
        intersected: &mut [bool; RAYS_PER_PACKET],
    ) {
        for i in 0..RAYS_PER_PACKET {
            if intersected[i] {
                intersected[i] = self.intersect_ray(&packet.rays[i], &mut infos[i]);
            }
        }
    }

    pub fn interaction(&self, ray: &Ray, info: &IsectInfo) -> SurfaceInteraction {
        let object_ray = self.instance.object_ray(ray);
        let normal = object_ray.at(info.time) / self.radius;

        SurfaceInteraction {
            time: info.time,
            point: ray.at(info.time),
            normal: (self.instance.normal_matrix * normal).normalize(),
            ambient: self.material.ambient,
            diffuse: self.material.diffuse,
            specular: self.material.specular,
            refractive: self.material.refractive_index,
        }
    }
}
