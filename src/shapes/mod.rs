use crate::core::geometry::{Ray, Vector3f};
use crate::core::intersect::Frustum;
use crate::core::transform::{
    make_inverse_transformation_matrix, make_normal_matrix, make_transformation_matrix, Matrix3,
    Matrix4, Quaternion,
};

pub mod model;
pub mod sphere;
pub mod triangle;

pub use model::Model;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Object-to-world placement shared by every geometry kind. The matrices
/// are precomputed once; traversal always happens in object space, and the
/// affine ray map preserves the ray parameter so hit times from different
/// instances stay comparable.
#[derive(Debug, Copy, Clone)]
pub struct Instance {
    pub position: Vector3f,
    pub orientation: Quaternion,
    pub scale: Vector3f,
    pub transform: Matrix4,
    pub inverse_transform: Matrix4,
    pub normal_matrix: Matrix3,
}

impl Default for Instance {
    fn default() -> Self {
        Instance::new(
            Vector3f::default(),
            Quaternion::default(),
            Vector3f::new(1.0, 1.0, 1.0),
        )
    }
}

impl Instance {
    pub fn new(position: Vector3f, orientation: Quaternion, scale: Vector3f) -> Self {
        let mut instance = Instance {
            position,
            orientation,
            scale,
            transform: Matrix4::default(),
            inverse_transform: Matrix4::default(),
            normal_matrix: Matrix3::default(),
        };
        instance.prepare();
        instance
    }

    /// Recomputes the matrices; call after changing position, orientation
    /// or scale and before any intersection query.
    pub fn prepare(&mut self) {
        self.transform =
            make_transformation_matrix(&self.position, &self.orientation, &self.scale);
        self.inverse_transform =
            make_inverse_transformation_matrix(&self.position, &self.orientation, &self.scale);
        self.normal_matrix = make_normal_matrix(&self.transform);
    }

    pub fn object_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.inverse_transform.transform_point(&ray.eye),
            self.inverse_transform.transform_vector(&ray.dir),
        )
    }

    pub fn object_frustum(&self, frustum: &Frustum) -> Frustum {
        frustum.to_object_space(&self.inverse_transform, &self.transform)
    }
}
