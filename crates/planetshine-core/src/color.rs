use std::ops::{Add, AddAssign, Div, Mul};

use serde::{Deserialize, Serialize};

/// Linear RGBA color, 0.0–1.0 per channel (16 bytes, castable from readback bytes).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Neutral gray used when a body color cannot be determined (100/256 per channel).
    pub const NEUTRAL_GRAY: Rgba = Rgba::rgb(0.390625, 0.390625, 0.390625);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8([r, g, b, 255])
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Brightest color channel, alpha ignored.
    pub fn intensity(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Gray of the given level, opaque.
    pub fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scale the color channels, leaving alpha untouched.
    pub fn scale_rgb(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Linear interpolation of all four channels; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        self + (other + self * -1.0) * t
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Add for Rgba {
    type Output = Rgba;

    fn add(self, rhs: Rgba) -> Rgba {
        Rgba::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl AddAssign for Rgba {
    fn add_assign(&mut self, rhs: Rgba) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Rgba {
    type Output = Rgba;

    fn mul(self, rhs: f32) -> Rgba {
        Rgba::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Div<f32> for Rgba {
    type Output = Rgba;

    fn div(self, rhs: f32) -> Rgba {
        Rgba::new(self.r / rhs, self.g / rhs, self.b / rhs, self.a / rhs)
    }
}

impl From<Rgba> for glam::Vec4 {
    fn from(c: Rgba) -> Self {
        glam::Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<glam::Vec4> for Rgba {
    fn from(v: glam::Vec4) -> Self {
        Rgba::new(v.x, v.y, v.z, v.w)
    }
}
