//! Reduce a pixel buffer to one representative color.
//!
//! Sums are accumulated in f64 so 128x128 buffers average without drift.
//! Alpha is averaged like any other channel and never pre-multiplies color.

use planetshine_core::{PixelBuffer, Rgba, SampleError};

/// How a buffer is reduced to a single color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleStrategy {
    /// Average of the smallest mip level.
    Fast,
    /// Average of a mip level counted from the smallest one (1 = smallest).
    InverseMip(u32),
    /// Exact average of every pixel.
    Exact,
    /// Exact average of a sub-rectangle.
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Weighted toward the buffer center to suppress limb artifacts.
    CenterWeighted { center_weight: f32, curve_power: f32 },
}

pub struct ColorSampler;

impl ColorSampler {
    pub fn sample(buffer: &PixelBuffer, strategy: SampleStrategy) -> Result<Rgba, SampleError> {
        match strategy {
            SampleStrategy::Fast => average_fast(buffer),
            SampleStrategy::InverseMip(level) => average_inverse_mip(buffer, level),
            SampleStrategy::Exact => average_exact(buffer),
            SampleStrategy::Rect {
                x,
                y,
                width,
                height,
            } => average_rect(buffer, x, y, width, height),
            SampleStrategy::CenterWeighted {
                center_weight,
                curve_power,
            } => average_center_weighted(buffer, center_weight, curve_power),
        }
    }
}

#[derive(Default)]
struct Accumulator {
    sum: [f64; 4],
    weight: f64,
}

impl Accumulator {
    fn add(&mut self, c: Rgba, w: f64) {
        self.sum[0] += c.r as f64 * w;
        self.sum[1] += c.g as f64 * w;
        self.sum[2] += c.b as f64 * w;
        self.sum[3] += c.a as f64 * w;
        self.weight += w;
    }

    fn average(&self) -> Result<Rgba, SampleError> {
        if self.weight <= 0.0 {
            return Err(SampleError::EmptyBuffer);
        }
        let w = self.weight;
        Ok(Rgba::new(
            (self.sum[0] / w) as f32,
            (self.sum[1] / w) as f32,
            (self.sum[2] / w) as f32,
            (self.sum[3] / w) as f32,
        ))
    }
}

/// Mip level index for a level counted up from the smallest one.
pub fn inverse_mip_level(mip_count: u32, inverse_level: u32) -> u32 {
    let last = mip_count.saturating_sub(1);
    last.min(mip_count.saturating_sub(inverse_level))
}

/// Average over the smallest mip level; cost is independent of buffer size
/// once the chain exists.
pub fn average_fast(buffer: &PixelBuffer) -> Result<Rgba, SampleError> {
    average_inverse_mip(buffer, 1)
}

pub fn average_inverse_mip(buffer: &PixelBuffer, inverse_level: u32) -> Result<Rgba, SampleError> {
    if buffer.is_empty() {
        return Err(SampleError::EmptyBuffer);
    }
    let level = inverse_mip_level(buffer.mip_count(), inverse_level);
    average_exact(&buffer.mip_level(level))
}

pub fn average_exact(buffer: &PixelBuffer) -> Result<Rgba, SampleError> {
    average_rect(buffer, 0, 0, buffer.width(), buffer.height())
}

/// Exact average of the `width x height` block at `(x, y)`.
/// Fails when the block is empty or leaves the buffer.
pub fn average_rect(
    buffer: &PixelBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<Rgba, SampleError> {
    let fits_x = x.checked_add(width).is_some_and(|end| end <= buffer.width());
    let fits_y = y.checked_add(height).is_some_and(|end| end <= buffer.height());
    if !fits_x || !fits_y {
        return Err(SampleError::RectOutOfBounds {
            x,
            y,
            width,
            height,
            buffer_width: buffer.width(),
            buffer_height: buffer.height(),
        });
    }

    let mut acc = Accumulator::default();
    for py in y..y + height {
        for px in x..x + width {
            if let Some(c) = buffer.get(px, py) {
                acc.add(c, 1.0);
            }
        }
    }
    acc.average()
}

/// Center-weighted average. Each pixel weighs
/// `(1 + (1 - d) * (center_weight - 1)) ^ curve_power`, with `d` the distance
/// to the center over the half-diagonal. `center_weight = 1` is a plain average.
pub fn average_center_weighted(
    buffer: &PixelBuffer,
    center_weight: f32,
    curve_power: f32,
) -> Result<Rgba, SampleError> {
    if buffer.is_empty() {
        return Err(SampleError::EmptyBuffer);
    }

    let (w, h) = (buffer.width(), buffer.height());
    let center = glam::DVec2::new((w / 2) as f64, (h / 2) as f64);
    let half_diagonal = ((w as f64).powi(2) + (h as f64).powi(2)).sqrt() / 2.0;
    let cw = center_weight as f64 - 1.0;
    let power = curve_power as f64;

    let mut acc = Accumulator::default();
    for py in 0..h {
        for px in 0..w {
            let d = glam::DVec2::new(px as f64, py as f64).distance(center) / half_diagonal;
            let weight = (1.0 + (1.0 - d) * cw).max(0.0).powf(power);
            if let Some(c) = buffer.get(px, py) {
                acc.add(c, weight);
            }
        }
    }
    acc.average()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic non-uniform test pattern.
    fn pattern(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let r = (x * 7 + y * 3) % 17;
                let g = (x * 5 + y * 11) % 13;
                let b = (x + y) % 5;
                buf.set(
                    x,
                    y,
                    Rgba::new(r as f32 / 16.0, g as f32 / 12.0, b as f32 / 4.0, 1.0),
                );
            }
        }
        buf
    }

    fn close(a: Rgba, b: Rgba, eps: f32) -> bool {
        (a.r - b.r).abs() <= eps
            && (a.g - b.g).abs() <= eps
            && (a.b - b.b).abs() <= eps
            && (a.a - b.a).abs() <= eps
    }

    #[test]
    fn test_exact_average_uniform() {
        let buf = PixelBuffer::filled(16, 16, Rgba::rgb(0.2, 0.4, 0.6));
        let c = average_exact(&buf).unwrap();
        assert!(close(c, Rgba::rgb(0.2, 0.4, 0.6), 1e-6));
    }

    #[test]
    fn test_fast_matches_exact_for_power_of_two() {
        let buf = pattern(64, 64);
        let fast = average_fast(&buf).unwrap();
        let exact = average_exact(&buf).unwrap();
        assert!(close(fast, exact, 1e-4), "{fast:?} vs {exact:?}");
    }

    #[test]
    fn test_inverse_mip_level() {
        assert_eq!(inverse_mip_level(7, 1), 6);
        assert_eq!(inverse_mip_level(7, 0), 6);
        assert_eq!(inverse_mip_level(7, 3), 4);
        assert_eq!(inverse_mip_level(7, 10), 0);
    }

    #[test]
    fn test_rect_average_partial() {
        let mut buf = PixelBuffer::filled(10, 4, Rgba::BLACK);
        for y in 0..4 {
            buf.set(0, y, Rgba::WHITE);
            buf.set(1, y, Rgba::WHITE);
        }
        // left fifth is all white
        let c = average_rect(&buf, 0, 0, 2, 4).unwrap();
        assert_eq!(c, Rgba::WHITE);
        let all = average_exact(&buf).unwrap();
        assert!(close(all, Rgba::rgb(0.2, 0.2, 0.2), 1e-6));
    }

    #[test]
    fn test_rect_out_of_bounds() {
        let buf = PixelBuffer::new(8, 8);
        let err = average_rect(&buf, 4, 4, 5, 1).unwrap_err();
        assert!(matches!(err, SampleError::RectOutOfBounds { x: 4, width: 5, .. }));
        assert!(average_rect(&buf, u32::MAX, 0, 2, 1).is_err());
    }

    #[test]
    fn test_empty_buffer_errors() {
        let buf = PixelBuffer::new(0, 0);
        assert_eq!(average_fast(&buf), Err(SampleError::EmptyBuffer));
        assert_eq!(average_exact(&buf), Err(SampleError::EmptyBuffer));
        assert_eq!(
            average_center_weighted(&buf, 2.0, 2.0),
            Err(SampleError::EmptyBuffer)
        );
    }

    #[test]
    fn test_center_weight_one_equals_exact() {
        let buf = pattern(32, 24);
        let weighted = average_center_weighted(&buf, 1.0, 2.0).unwrap();
        let exact = average_exact(&buf).unwrap();
        assert!(close(weighted, exact, 1e-6), "{weighted:?} vs {exact:?}");
    }

    #[test]
    fn test_center_weight_favors_center() {
        // bright center pixel, dark everywhere else
        let mut buf = PixelBuffer::filled(9, 9, Rgba::BLACK);
        buf.set(4, 4, Rgba::WHITE);
        let plain = average_exact(&buf).unwrap();
        let weighted = average_center_weighted(&buf, 4.0, 2.0).unwrap();
        assert!(weighted.r > plain.r);
    }

    #[test]
    fn test_strategy_dispatch() {
        let buf = PixelBuffer::filled(4, 4, Rgba::WHITE);
        for strategy in [
            SampleStrategy::Fast,
            SampleStrategy::InverseMip(2),
            SampleStrategy::Exact,
            SampleStrategy::Rect {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            },
            SampleStrategy::CenterWeighted {
                center_weight: 3.0,
                curve_power: 2.0,
            },
        ] {
            assert_eq!(ColorSampler::sample(&buf, strategy).unwrap(), Rgba::WHITE);
        }
    }
}
