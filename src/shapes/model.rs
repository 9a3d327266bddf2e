use crate::accelerators::bvh::BvhAccel;
use crate::core::{
    geometry::Ray,
    interaction::SurfaceInteraction,
    intersect::{Frustum, IsectInfo},
    material::Material,
    mesh::Mesh,
    packet::{Packet, RAYS_PER_PACKET},
};
use crate::shapes::Instance;
use crate::Float;
use std::sync::Arc;

/// A placed triangle mesh. All queries map the incoming world-space rays
/// through the instance's inverse transform and run against the mesh BVH.
pub struct Model {
    pub mesh: Arc<Mesh>,
    pub material: Material,
    pub instance: Instance,
    bvh: Option<BvhAccel>,
}

impl Model {
    pub fn new(mesh: Arc<Mesh>, material: Material, instance: Instance) -> Self {
        Model {
            mesh,
            material,
            instance,
            bvh: None,
        }
    }

    /// Builds the BVH; must run before any intersection query and after
    /// any change to the mesh or the instance transform.
    pub fn make_bounding_volume(&mut self) {
        self.bvh = Some(BvhAccel::build(self.mesh.clone()));
    }

    pub fn bvh(&self) -> Option<&BvhAccel> {
        self.bvh.as_ref()
    }

    fn bvh_ref(&self) -> &BvhAccel {
        self.bvh
            .as_ref()
            .expect("make_bounding_volume must run before intersection queries")
    }

    pub fn intersect_ray(&self, ray: &Ray, info: &mut IsectInfo) -> bool {
        let object_ray = self.instance.object_ray(ray);
        self.bvh_ref()
            .intersect_ray(&object_ray.eye, &object_ray.dir, info)
    }

    pub fn shadow_test(&self, ray: &Ray, max_time: Float) -> bool {
        let object_ray = self.instance.object_ray(ray);
        self.bvh_ref()
            .shadow_test(&object_ray.eye, &object_ray.dir, max_time)
    }

    pub fn intersect_frustum(&self, frustum: &Frustum) -> bool {
        let object_frustum = self.instance.object_frustum(frustum);
        self.bvh_ref().intersect_frustum(&object_frustum)
    }

    pub fn intersect_packet(
        &self,
        packet: &Packet,
        infos: &mut [IsectInfo; RAYS_PER_PACKET],
        intersected: &mut [bool; RAYS_PER_PACKET],
    ) {
        let mut object_packet = Packet {
            frustum: self.instance.object_frustum(&packet.frustum),
            rays: packet.rays,
        };
        for ray in object_packet.rays.iter_mut() {
            *ray = self.instance.object_ray(ray);
        }
        self.bvh_ref()
            .intersect_packet(&object_packet, infos, intersected);
    }

    /// Shading data for an accepted hit: barycentric-interpolated vertex
    /// normals mapped through the normal matrix, plus the material terms.
    pub fn interaction(&self, ray: &Ray, info: &IsectInfo) -> SurfaceInteraction {
        let triangle = &self.mesh.triangles()[info.index];
        let vertices = self.mesh.vertices();
        let n0 = vertices[triangle.vertices[0] as usize].normal;
        let n1 = vertices[triangle.vertices[1] as usize].normal;
        let n2 = vertices[triangle.vertices[2] as usize].normal;
        let normal = n0 * info.alpha() + n1 * info.beta + n2 * info.gamma;

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
