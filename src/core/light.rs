use crate::core::color::Color3;
use crate::core::geometry::Vector3f;
use crate::Float;

#[derive(Debug, Copy, Clone)]
pub struct Attenuation {
    pub constant: Float,
    pub linear: Float,
    pub quadratic: Float,
}

impl Default for Attenuation {
    fn default() -> Self {
        Attenuation {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct PointLight {
    pub position: Vector3f,
    pub color: Color3,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn attenuated_color(&self, distance: Float) -> Color3 {
        let a = &self.attenuation;
        let falloff = a.constant + a.linear * distance + a.quadratic * distance * distance;
        self.color * (1.0 / falloff)
    }
}
