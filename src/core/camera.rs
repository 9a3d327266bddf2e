use crate::core::geometry::{Int2, Ray, Vector3f};
use crate::Float;

/// Pinhole camera; `fov` is the vertical field of view in radians.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    pub position: Vector3f,
    pub direction: Vector3f,
    pub up: Vector3f,
    pub fov: Float,
}

impl Camera {
    pub fn new(position: Vector3f, direction: Vector3f, up: Vector3f, fov: Float) -> Self {
        Camera {
            position,
            direction: direction.normalize(),
            up,
            fov,
        }
    }

    /// Viewing ray through continuous pixel coordinates; (0, 0) is the
    /// bottom-left corner of the image.
    pub fn viewing_ray(&self, x: Float, y: Float, width: usize, height: usize) -> Ray {
        let forward = self.direction;
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);

        let half_h = (self.fov * 0.5).tan();
        let half_w = half_h * width as Float / height as Float;

        let u_s = (2.0 * x / width as Float - 1.0) * half_w;
        let v_s = (2.0 * y / height as Float - 1.0) * half_h;

        Ray::new(self.position, (forward + right * u_s + up * v_s).normalize())
    }

    /// Ray through a pixel center.
    pub fn pixel_ray(&self, pixel: Int2, width: usize, height: usize) -> Ray {
        self.viewing_ray(
            pixel.x as Float + 0.5,
            pixel.y as Float + 0.5,
            width,
            height,
        )
    }
}
