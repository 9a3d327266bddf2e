use crate::core::clamp;
use crate::Float;
use std::ops::{Add, AddAssign, Mul, MulAssign};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color3 {
    pub r: Float,
    pub g: Float,
    pub b: Float,
}

pub const BLACK: Color3 = Color3 {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

impl Color3 {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Color3 { r, g, b }
    }

    pub fn gray(v: Float) -> Self {
        Color3 { r: v, g: v, b: v }
    }

    /// RGBA bytes, alpha always 255.
    pub fn to_rgba(&self) -> [u8; 4] {
        [
            (clamp(self.r, 0.0, 1.0) * 255.0) as u8,
            (clamp(self.g, 0.0, 1.0) * 255.0) as u8,
            (clamp(self.b, 0.0, 1.0) * 255.0) as u8,
            255,
        ]
    }
}

impl Add for Color3 {
    type Output = Color3;

    fn add(self, rhs: Self) -> Self::Output {
        Color3::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color3 {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul for Color3 {
    type Output = Color3;

    fn mul(self, rhs: Self) -> Self::Output {
        Color3::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl MulAssign for Color3 {
    fn mul_assign(&mut self, rhs: Self) {
        self.r *= rhs.r;
        self.g *= rhs.g;
        self.b *= rhs.b;
    }
}

impl Mul<Float> for Color3 {
    type Output = Color3;

    fn mul(self, rhs: Float) -> Self::Output {
        Color3::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Mul<Color3> for Float {
    type Output = Color3;

    fn mul(self, rhs: Color3) -> Self::Output {
        rhs * self
    }
}
