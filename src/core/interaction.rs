use crate::core::color::Color3;
use crate::core::geometry::Vector3f;
use crate::Float;

/// World-space shading data for an accepted hit, produced by the geometry
/// kinds from a raw `IsectInfo`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SurfaceInteraction {
    pub time: Float,
    pub point: Vector3f,
    pub normal: Vector3f,
    pub ambient: Color3,
    pub diffuse: Color3,
    pub specular: Color3,
    pub refractive: Float,
}
