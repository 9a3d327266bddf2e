use crate::core::geometry::{Int2, Ray};
use crate::core::intersect::Frustum;

/// Tiles are PACKET_DIM x PACKET_DIM pixels; one ray per pixel.
pub const PACKET_DIM: usize = 8;
pub const RAYS_PER_PACKET: usize = PACKET_DIM * PACKET_DIM;

/// A tile of the output image, named by its corner pixels
/// (lower-left, lower-right, upper-left, upper-right), inclusive.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PacketRegion {
    pub ll: Int2,
    pub lr: Int2,
    pub ul: Int2,
    pub ur: Int2,
}

impl PacketRegion {
    pub fn new(ll: Int2, lr: Int2, ul: Int2, ur: Int2) -> Self {
        PacketRegion { ll, lr, ul, ur }
    }
}

/// A coherent bundle of rays sharing one tile, plus the frustum that
/// bounds all of them.
#[derive(Debug, Copy, Clone)]
pub struct Packet {
    pub frustum: Frustum,
    pub rays: [Ray; RAYS_PER_PACKET],
}

impl Default for Packet {
    fn default() -> Self {
        Packet {
            frustum: Frustum::default(),
            rays: [Ray::default(); RAYS_PER_PACKET],
        }
    }
}
