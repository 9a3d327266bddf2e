use crate::core::{
    geometry::{Bounds3f, Ray, Vector3f},
    interaction::SurfaceInteraction,
    intersect::{frustum_box_intersect, triangle_ray_intersect, Frustum, IsectInfo},
    material::Material,
    packet::{Packet, RAYS_PER_PACKET},
};
use crate::shapes::Instance;
use crate::Float;

#[derive(Debug, Default, Copy, Clone)]
pub struct TriangleVertex {
    pub position: Vector3f,
    pub normal: Vector3f,
}

/// A single standalone triangle, CCW winding. Vertex normals are
/// interpolated; the normal is flipped toward the incoming ray so both
/// sides shade.
pub struct Triangle {
    pub vertices: [TriangleVertex; 3],
    pub material: Material,
    pub instance: Instance,
    bounds: Bounds3f,
}

impl Triangle {
    pub fn new(vertices: [TriangleVertex; 3], material: Material, instance: Instance) -> Self {
        Triangle {
            vertices,
            material,
            instance,
            bounds: Bounds3f::default(),
        }
    }

    pub fn make_bounding_volume(&mut self) {
        let mut bounds = Bounds3f::default();
        for v in self.vertices.iter() {
            bounds.extend(&self.instance.transform.transform_point(&v.position));
        }
        self.bounds = bounds;
    }

    pub fn world_bound(&self) -> &Bounds3f {
        &self.bounds
    }

    pub fn intersect_ray(&self, ray: &Ray, info: &mut IsectInfo) -> bool {
        let object_ray = self.instance.object_ray(ray);
        let accepted = triangle_ray_intersect(
            &object_ray.eye,
            &object_ray.dir,
            &self.vertices[0].position,
            &self.vertices[1].position,
            &self.vertices[2].position,
            info,
        );
        if accepted {
            info.index = 0;
        }
        accepted
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
        let mut normal = self.vertices[0].normal * info.alpha()
            + self.vertices[1].normal * info.beta
            + self.vertices[2].normal * info.gamma;
        if object_ray.dir.dot(&normal) > 0.0 {
            normal = -normal;
        }

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
