use crate::color::Rgba;
use crate::error::SampleError;

/// CPU-side copy of a rendered or loaded texture.
///
/// Pixels are stored row-major, `(x, y)` at index `y * width + x`.
/// Alpha is kept as plain data; nothing here pre-multiplies.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Buffer of the given size, cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, SampleError> {
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(SampleError::InvalidLength {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from tightly packed RGBA8 readback bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SampleError> {
        let invalid = || SampleError::InvalidLength {
            width,
            height,
            actual: bytes.len(),
        };
        if bytes.len() != (width as usize) * (height as usize) * 4 {
            return Err(invalid());
        }
        let texels: &[[u8; 4]] = bytemuck::try_cast_slice(bytes).map_err(|_| invalid())?;
        let pixels = texels.iter().map(|&px| Rgba::from_rgba8(px)).collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Raw float bytes of the pixel data (16 bytes per pixel).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Reallocate to a new size, clearing the content.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), Rgba::TRANSPARENT);
    }

    /// Number of mip levels down to 1x1, counting the full-size level.
    pub fn mip_count(&self) -> u32 {
        let largest = self.width.max(self.height).max(1);
        32 - largest.leading_zeros()
    }

    /// Next mip level: half size (floored, at least 1), box filtered.
    ///
    /// Every source pixel lands in exactly one destination block, so odd
    /// sizes lose nothing; blocks along an odd edge are simply wider.
    pub fn downsample(&self) -> PixelBuffer {
        let dw = (self.width / 2).max(1);
        let dh = (self.height / 2).max(1);
        let mut out = PixelBuffer::new(dw, dh);
        if self.is_empty() {
            return out;
        }

        for dy in 0..dh {
            let y0 = dy * self.height / dh;
            let y1 = ((dy + 1) * self.height / dh).max(y0 + 1);
            for dx in 0..dw {
                let x0 = dx * self.width / dw;
                let x1 = ((dx + 1) * self.width / dw).max(x0 + 1);
                let mut sum = Rgba::TRANSPARENT;
                for y in y0..y1 {
                    for x in x0..x1 {
                        sum += self.pixels[self.index(x, y)];
                    }
                }
                let count = ((x1 - x0) * (y1 - y0)) as f32;
                out.set(dx, dy, sum / count);
            }
        }
        out
    }

    /// The mip level `level` steps below full size (0 = a clone of self).
    pub fn mip_level(&self, level: u32) -> PixelBuffer {
        let mut current = self.clone();
        for _ in 0..level.min(self.mip_count().saturating_sub(1)) {
            current = current.downsample();
        }
        current
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_length_check() {
        let err = PixelBuffer::from_pixels(2, 2, vec![Rgba::BLACK; 3]).unwrap_err();
        assert_eq!(
            err,
            SampleError::InvalidLength {
                width: 2,
                height: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_rgba8() {
        let bytes = [255u8, 0, 0, 255, 0, 255, 0, 255];
        let buf = PixelBuffer::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(buf.get(0, 0), Some(Rgba::rgb(1.0, 0.0, 0.0)));
        assert_eq!(buf.get(1, 0), Some(Rgba::rgb(0.0, 1.0, 0.0)));
        assert!(PixelBuffer::from_rgba8(2, 2, &bytes).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let buf = PixelBuffer::new(4, 4);
        assert!(buf.get(4, 0).is_none());
        assert!(buf.get(0, 4).is_none());
        assert_eq!(buf.get(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_mip_count() {
        assert_eq!(PixelBuffer::new(1, 1).mip_count(), 1);
        assert_eq!(PixelBuffer::new(64, 64).mip_count(), 7);
        assert_eq!(PixelBuffer::new(128, 32).mip_count(), 8);
        assert_eq!(PixelBuffer::new(5, 3).mip_count(), 3);
    }

    #[test]
    fn test_downsample_box_filter() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(0, 0, Rgba::rgb(1.0, 0.0, 0.0));
        buf.set(1, 0, Rgba::rgb(0.0, 1.0, 0.0));
        buf.set(0, 1, Rgba::rgb(0.0, 0.0, 1.0));
        buf.set(1, 1, Rgba::rgb(1.0, 1.0, 1.0));
        let mip = buf.downsample();
        assert_eq!((mip.width(), mip.height()), (1, 1));
        assert_eq!(mip.get(0, 0), Some(Rgba::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_downsample_odd_width_covers_every_pixel() {
        // 3x1 -> 1x1 must average all three pixels
        let pixels = vec![Rgba::gray(0.0), Rgba::gray(0.75), Rgba::gray(0.75)];
        let buf = PixelBuffer::from_pixels(3, 1, pixels).unwrap();
        let mip = buf.downsample();
        assert_eq!(mip.get(0, 0), Some(Rgba::gray(0.5)));
    }

    #[test]
    fn test_mip_level_clamps_to_smallest() {
        let buf = PixelBuffer::filled(8, 8, Rgba::WHITE);
        let last = buf.mip_level(99);
        assert_eq!((last.width(), last.height()), (1, 1));
        assert_eq!(last.get(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_resize_clears() {
        let mut buf = PixelBuffer::filled(2, 2, Rgba::WHITE);
        buf.resize(3, 3);
        assert_eq!(buf.len(), 9);
        assert!(buf.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }
}
