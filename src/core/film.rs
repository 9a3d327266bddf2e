use crate::core::color::Color3;

/// Row-major RGBA byte buffer, bottom row first. During packet rendering a
/// single thread owns the film and blits finished tiles, so workers never
/// share pixels.
pub struct Film {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Film {
    pub fn new(width: usize, height: usize) -> Self {
        Film {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw pixel storage; the pixel tracer hands out disjoint rows of this
    /// to its workers.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, color: &Color3) {
        debug_assert!(x < self.width && y < self.height);
        let offset = 4 * (y * self.width + x);
        self.data[offset..offset + 4].copy_from_slice(&color.to_rgba());
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = 4 * (y * self.width + x);
        let mut out = [0; 4];
        out.copy_from_slice(&self.data[offset..offset + 4]);
        out
    }

    /// PPM (P6) serialization, top row first as image viewers expect.
    pub fn write_ppm<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let p = self.pixel(x, y);
                out.write_all(&p[..3])?;
            }
        }
        Ok(())
    }
}
