pub mod packet;
pub mod pixel;

pub use packet::PacketIntegrator;
pub use pixel::PixelIntegrator;
