use planetshine_bodies::CelestialBodyData;
use planetshine_core::constants::{DEFAULT_ALBEDO_DIMENSION, DEFAULT_ALBEDO_ELEVATION};
use planetshine_core::{PixelBuffer, Rgba, SampleError};

use crate::camera::{AlbedoCamera, Renderer, Representation};
use crate::determiner::{AlbedoContext, AlbedoDeterminer};
use crate::error::AlbedoError;

/// Per-pixel brightest-of-two blend. For each pixel the view with the higher
/// `max(r, g, b)` is kept (ties go to `scaled`), the kept pixels are averaged
/// and alpha is forced to 1.
pub fn blend_brightest(local: &PixelBuffer, scaled: &PixelBuffer) -> Result<Rgba, SampleError> {
    if !local.same_dimensions(scaled) {
        return Err(SampleError::DimensionMismatch(
            local.width(),
            local.height(),
            scaled.width(),
            scaled.height(),
        ));
    }
    if local.is_empty() {
        return Err(SampleError::EmptyBuffer);
    }

    let mut sum = [0.0f64; 3];
    for (l, s) in local.pixels().iter().zip(scaled.pixels()) {
        let chosen = if l.intensity() > s.intensity() { l } else { s };
        sum[0] += chosen.r as f64;
        sum[1] += chosen.g as f64;
        sum[2] += chosen.b as f64;
    }

    let n = local.len() as f64;
    Ok(Rgba::rgb(
        (sum[0] / n) as f32,
        (sum[1] / n) as f32,
        (sum[2] / n) as f32,
    ))
}

/// Samples the body by rendering its local and scaled representations from
/// the same viewpoint and keeping, per pixel, whichever shows lit surface.
pub struct VisualAlbedoDeterminer<R: Renderer> {
    renderer: R,
    local: AlbedoCamera<R::Target>,
    scaled: AlbedoCamera<R::Target>,
    elevation: f64,
}

impl<R: Renderer> VisualAlbedoDeterminer<R> {
    pub fn new(mut renderer: R, dimension: u32, elevation: f64) -> Result<Self, AlbedoError> {
        let local = AlbedoCamera::new(&mut renderer, Representation::Local, dimension)?;
        let scaled = AlbedoCamera::new(&mut renderer, Representation::Scaled, dimension)?;
        Ok(Self {
            renderer,
            local,
            scaled,
            elevation,
        })
    }

    pub fn with_defaults(renderer: R) -> Result<Self, AlbedoError> {
        Self::new(renderer, DEFAULT_ALBEDO_DIMENSION, DEFAULT_ALBEDO_ELEVATION)
    }

    pub fn dimension(&self) -> u32 {
        self.local.dimension()
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn local_camera(&self) -> &AlbedoCamera<R::Target> {
        &self.local
    }

    pub fn scaled_camera(&self) -> &AlbedoCamera<R::Target> {
        &self.scaled
    }
}

impl<R: Renderer> AlbedoDeterminer for VisualAlbedoDeterminer<R> {
    fn determine_color(
        &mut self,
        _data: &CelestialBodyData,
        ctx: &AlbedoContext<'_>,
    ) -> Result<Rgba, AlbedoError> {
        self.local.render(
            &mut self.renderer,
            ctx.body,
            ctx.vessel_position,
            self.elevation,
            &ctx.scaled_space,
        )?;
        self.scaled.render(
            &mut self.renderer,
            ctx.body,
            ctx.vessel_position,
            self.elevation,
            &ctx.scaled_space,
        )?;
        Ok(blend_brightest(self.local.buffer(), self.scaled.buffer())?)
    }

    fn name(&self) -> &'static str {
        "visual"
    }
}
