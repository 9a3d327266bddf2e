use crate::core::color::Color3;
use crate::Float;

/// Phong-style surface terms. `refractive_index` of zero marks an opaque
/// surface; anything else enables the refraction path.
#[derive(Debug, Default, Copy, Clone)]
pub struct Material {
    pub ambient: Color3,
    pub diffuse: Color3,
    pub specular: Color3,
    pub refractive_index: Float,
}

impl Material {
    pub fn diffuse_only(color: Color3) -> Self {
        Material {
            ambient: color,
            diffuse: color,
            ..Default::default()
        }
    }
}
