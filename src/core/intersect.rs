use crate::core::geometry::{Bounds3f, Vector3f};
use crate::core::transform::Matrix4;
use crate::core::SLOP;
use crate::Float;

/// Determinants below this are treated as edge-on or degenerate triangles
/// and rejected instead of divided through.
pub const DEGENERACY_EPS: Float = 1e-12;

// Frustum planes are pushed outward by this much so rays through a tile's
// corner pixels can never be culled by their own frustum.
const PLANE_SLACK: Float = 1e-4;

/// Accumulator for the closest hit seen so far. `time` starts at infinity
/// (or at a caller-chosen upper bound for range-limited queries), so
/// "closer hit" is a plain `<`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IsectInfo {
    pub time: Float,
    pub index: usize,
    pub beta: Float,
    pub gamma: Float,
}

impl Default for IsectInfo {
    fn default() -> Self {
        IsectInfo {
            time: Float::INFINITY,
            index: 0,
            beta: 0.0,
            gamma: 0.0,
        }
    }
}

impl IsectInfo {
    /// An accumulator bounded above; hits at or beyond `max_time` are
    /// rejected by the ordinary update-if-closer comparison.
    pub fn bounded(max_time: Float) -> Self {
        IsectInfo {
            time: max_time,
            ..Default::default()
        }
    }

    pub fn alpha(&self) -> Float {
        1.0 - self.beta - self.gamma
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Plane {
    pub point: Vector3f,
    pub normal: Vector3f,
}

/// Six planes with outward normals: top, bottom, left, right, near, far.
#[derive(Debug, Default, Copy, Clone)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Builds the frustum of a screen tile from its four corner viewing
    /// rays (directions from `eye`, need not be normalized).
    pub fn from_corner_rays(
        eye: &Vector3f,
        ll: &Vector3f,
        lr: &Vector3f,
        ul: &Vector3f,
        ur: &Vector3f,
        far: Float,
    ) -> Frustum {
        let interior = (*ll + *lr + *ul + *ur).normalize();

        let top = side_plane(eye, ul, ur, &interior);
        let bottom = side_plane(eye, ll, lr, &interior);
        let left = side_plane(eye, ll, ul, &interior);
        let right = side_plane(eye, lr, ur, &interior);
        let near = Plane {
            point: *eye - interior * PLANE_SLACK,
            normal: -interior,
        };
        let far = Plane {
            point: *eye + interior * (far + PLANE_SLACK),
            normal: interior,
        };

        Frustum {
            planes: [top, bottom, left, right, near, far],
        }
    }

    /// Maps the frustum into a model's object space: points through the
    /// inverse transform, normals through the transposed forward linear
    /// part (outwardness survives because the map is affine).
    pub fn to_object_space(&self, inverse: &Matrix4, forward: &Matrix4) -> Frustum {
        let normal_m = forward.linear().transpose();
        let mut planes = [Plane::default(); 6];
        for (out, plane) in planes.iter_mut().zip(self.planes.iter()) {
            *out = Plane {
                point: inverse.transform_point(&plane.point),
                normal: normal_m * plane.normal,
            };
        }
        Frustum { planes }
    }
}

fn side_plane(eye: &Vector3f, a: &Vector3f, b: &Vector3f, interior: &Vector3f) -> Plane {
    let mut normal = a.cross(b).normalize();
    if normal.dot(interior) > 0.0 {
        normal = -normal;
    }
    Plane {
        point: *eye + normal * PLANE_SLACK,
        normal,
    }
}

/// Cramer's rule solve of eye + t*dir = p0 + beta*(p1-p0) + gamma*(p2-p0).
/// Accepts only hits inside the triangle with SLOP < t < info.time and
/// updates the accumulator in place, so the same `info` can be threaded
/// through many candidate triangles. The caller records the primitive
/// index on acceptance.
pub fn triangle_ray_intersect(
    eye: &Vector3f,
    dir: &Vector3f,
    p0: &Vector3f,
    p1: &Vector3f,
    p2: &Vector3f,
    info: &mut IsectInfo,
) -> bool {
    let a = p0.x - p1.x;
    let b = p0.y - p1.y;
    let c = p0.z - p1.z;
    let d = p0.x - p2.x;
    let e = p0.y - p2.y;
    let f = p0.z - p2.z;
    let g = dir.x;
    let h = dir.y;
    let i = dir.z;
    let j = p0.x - eye.x;
    let k = p0.y - eye.y;
    let l = p0.z - eye.z;

    let ei_minus_hf = e * i - h * f;
    let gf_minus_di = g * f - d * i;
    let dh_minus_eg = d * h - e * g;
    let ak_minus_jb = a * k - j * b;
    let jc_minus_al = j * c - a * l;
    let bl_minus_kc = b * l - k * c;

    let m = a * ei_minus_hf + b * gf_minus_di + c * dh_minus_eg;
    if m.abs() < DEGENERACY_EPS {
        return false;
    }

    let t = -1.0 * (f * ak_minus_jb + e * jc_minus_al + d * bl_minus_kc) / m;
    let gamma = (i * ak_minus_jb + h * jc_minus_al + g * bl_minus_kc) / m;
    let beta = (j * ei_minus_hf + k * gf_minus_di + l * dh_minus_eg) / m;
    let alpha = 1.0 - beta - gamma;

    let gamma_ok = gamma >= 0.0 && gamma <= 1.0;
    let beta_ok = beta >= 0.0 && beta <= 1.0;
    let alpha_ok = alpha >= 0.0 && alpha <= 1.0;
    let t_better = t < info.time && t > SLOP;

    if alpha_ok && beta_ok && gamma_ok && t_better {
        info.time = t;
        info.beta = beta;
        info.gamma = gamma;
        true
    } else {
        false
    }
}

/// Conservative separating-planes test: the box is rejected only when all
/// eight corners sit outside a single plane. May report boxes that miss
/// the frustum as hits, never the reverse. Empty boxes never intersect.
pub fn frustum_box_intersect(frustum: &Frustum, bounds: &Bounds3f) -> bool {
    if bounds.is_empty() {
        return false;
    }
    let corners = bounds.corners();
    for plane in frustum.planes.iter() {
        let mut any_inside = false;
        for corner in corners.iter() {
            if (*corner - plane.point).dot(&plane.normal) < 0.0 {
                any_inside = true;
                break;
            }
        }
        if !any_inside {
            return false;
        }
    }
    true
}
