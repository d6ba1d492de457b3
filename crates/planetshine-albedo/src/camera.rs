//! Offscreen albedo cameras.
//!
//! An [`AlbedoCamera`] frames one representation of a body (full-detail local
//! scenery or the distant scaled proxy) from a point pulled back behind the
//! vessel, renders it through the host [`Renderer`] and keeps the readback in
//! a buffer it owns. The render target is released when the camera drops.

use glam::DVec3;
use planetshine_bodies::CelestialBody;
use planetshine_core::constants::{
    LAYER_LOCAL_SCENERY, LAYER_SCALED_SCENERY, NEAR_CLIP_ATMOSPHERE_FACTOR, NEAR_CLIP_MIN,
};
use planetshine_core::math::framing_fov_degrees;
use planetshine_core::PixelBuffer;

use crate::error::RenderError;

/// Which representation of a body a camera renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Near, full-detail geometry in world units.
    Local,
    /// Distant simplified proxy in scaled-space units.
    Scaled,
}

impl Representation {
    /// Host visibility mask for this representation.
    pub fn layer_mask(self) -> u32 {
        match self {
            Representation::Local => LAYER_LOCAL_SCENERY,
            Representation::Scaled => LAYER_SCALED_SCENERY,
        }
    }
}

/// Mapping from world space into the host's scaled space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSpace {
    /// Scaled units per world unit.
    pub inverse_scale_factor: f64,
    /// World-space origin of scaled space.
    pub offset: DVec3,
}

impl Default for ScaledSpace {
    fn default() -> Self {
        Self {
            inverse_scale_factor: 1.0 / 6000.0,
            offset: DVec3::ZERO,
        }
    }
}

impl ScaledSpace {
    pub fn to_scaled(&self, world: DVec3) -> DVec3 {
        (world - self.offset) * self.inverse_scale_factor
    }
}

/// One fully specified offscreen view, handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub representation: Representation,
    pub position: DVec3,
    pub look_at: DVec3,
    /// Vertical and horizontal field of view (square target), degrees.
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub layer_mask: u32,
    pub dimension: u32,
}

impl RenderView {
    pub fn forward(&self) -> DVec3 {
        (self.look_at - self.position).normalize_or_zero()
    }
}

/// Host rendering port. One synchronous render plus readback per call.
pub trait Renderer {
    /// Offscreen target owned by the camera that created it.
    type Target;

    fn create_target(&mut self, dimension: u32) -> Result<Self::Target, RenderError>;

    /// Clear to black, render `view` into `target` and read the result
    /// back into `out`, which is already sized `dimension x dimension`.
    fn render(
        &mut self,
        view: &RenderView,
        target: &mut Self::Target,
        out: &mut PixelBuffer,
    ) -> Result<(), RenderError>;
}

/// Place a camera for `representation`: start at the vessel, step back by
/// `elevation` away from the body, aim at the body center and size the
/// frustum so the whole disc fits and nothing of it is clipped.
pub fn frame_body(
    representation: Representation,
    body: &CelestialBody,
    vessel_position: DVec3,
    elevation: f64,
    scaled_space: &ScaledSpace,
    dimension: u32,
) -> RenderView {
    let (center, start, scale) = match representation {
        Representation::Local => (body.position, vessel_position, 1.0),
        Representation::Scaled => (
            body.scaled_position,
            scaled_space.to_scaled(vessel_position),
            scaled_space.inverse_scale_factor,
        ),
    };

    let away = (start - center).normalize_or_zero();
    let position = start + away * (elevation * scale);
    let distance = position.distance(center);
    let radius = body.radius * scale;
    let solid_radius = (body.radius - body.atmosphere_depth_or_zero()) * scale;

    RenderView {
        representation,
        position,
        look_at: center,
        fov_degrees: framing_fov_degrees(distance, radius),
        near: (distance - solid_radius * NEAR_CLIP_ATMOSPHERE_FACTOR).max(NEAR_CLIP_MIN),
        far: distance + radius,
        layer_mask: representation.layer_mask(),
        dimension,
    }
}

/// Offscreen camera bound to one body representation.
pub struct AlbedoCamera<T> {
    representation: Representation,
    dimension: u32,
    target: T,
    buffer: PixelBuffer,
    last_view: Option<RenderView>,
}

impl<T> AlbedoCamera<T> {
    pub fn new<R>(renderer: &mut R, representation: Representation, dimension: u32) -> Result<Self, RenderError>
    where
        R: Renderer<Target = T>,
    {
        let target = renderer.create_target(dimension)?;
        log::debug!("Created {:?} albedo camera ({}px)", representation, dimension);
        Ok(Self {
            representation,
            dimension,
            target,
            buffer: PixelBuffer::new(dimension, dimension),
            last_view: None,
        })
    }

    /// Frame and render `body` as seen from behind `vessel_position`.
    pub fn render<R>(
        &mut self,
        renderer: &mut R,
        body: &CelestialBody,
        vessel_position: DVec3,
        elevation: f64,
        scaled_space: &ScaledSpace,
    ) -> Result<&PixelBuffer, RenderError>
    where
        R: Renderer<Target = T>,
    {
        let view = frame_body(
            self.representation,
            body,
            vessel_position,
            elevation,
            scaled_space,
            self.dimension,
        );
        renderer.render(&view, &mut self.target, &mut self.buffer)?;

        let expected = (self.dimension as usize) * (self.dimension as usize);
        if self.buffer.len() != expected {
            let actual = self.buffer.len();
            self.buffer.resize(self.dimension, self.dimension);
            return Err(RenderError::ReadbackSize { expected, actual });
        }
        self.last_view = Some(view);
        Ok(&self.buffer)
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Contents of the most recent render. Overwritten by every render.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn last_view(&self) -> Option<&RenderView> {
        self.last_view.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetshine_bodies::BodyId;
    use planetshine_core::Rgba;

    fn kerbin() -> CelestialBody {
        CelestialBody {
            id: BodyId(1),
            name: "Kerbin".into(),
            position: DVec3::ZERO,
            scaled_position: DVec3::ZERO,
            radius: 600_000.0,
            atmosphere_depth: Some(70_000.0),
            emissive: false,
        }
    }

    /// Fills the readback with one color and counts targets and renders.
    #[derive(Default)]
    struct SolidRenderer {
        color: Rgba,
        targets: u32,
        renders: u32,
        short_readback: bool,
    }

    impl Renderer for SolidRenderer {
        type Target = u32;

        fn create_target(&mut self, _dimension: u32) -> Result<u32, RenderError> {
            self.targets += 1;
            Ok(self.targets)
        }

        fn render(
            &mut self,
            view: &RenderView,
            _target: &mut u32,
            out: &mut PixelBuffer,
        ) -> Result<(), RenderError> {
            self.renders += 1;
            if self.short_readback {
                out.resize(view.dimension / 2, view.dimension);
            }
            out.fill(self.color);
            Ok(())
        }
    }

    #[test]
    fn test_local_framing() {
        let view = frame_body(
            Representation::Local,
            &kerbin(),
            DVec3::new(690_000.0, 0.0, 0.0),
            10_000.0,
            &ScaledSpace::default(),
            128,
        );
        assert!((view.position.x - 700_000.0).abs() < 1e-6);
        assert_eq!(view.look_at, DVec3::ZERO);
        assert!((view.forward() - DVec3::NEG_X).length() < 1e-12);
        assert!((view.fov_degrees - framing_fov_degrees(700_000.0, 600_000.0)).abs() < 1e-9);
        assert!((view.near - (700_000.0 - 530_000.0 * 1.5_f64).max(0.001)).abs() < 1e-9);
        assert!((view.far - 1_300_000.0).abs() < 1e-6);
        assert_eq!(view.layer_mask, LAYER_LOCAL_SCENERY);
    }

    #[test]
    fn test_scaled_framing_matches_local_fov() {
        let space = ScaledSpace {
            inverse_scale_factor: 1.0 / 6000.0,
            offset: DVec3::ZERO,
        };
        let vessel = DVec3::new(0.0, 1_200_000.0, 0.0);
        let local = frame_body(Representation::Local, &kerbin(), vessel, 10_000.0, &space, 64);
        let scaled = frame_body(Representation::Scaled, &kerbin(), vessel, 10_000.0, &space, 64);

        assert!((scaled.position.y - 1_210_000.0 / 6000.0).abs() < 1e-9);
        assert!((local.fov_degrees - scaled.fov_degrees).abs() < 1e-6);
        assert_eq!(scaled.layer_mask, LAYER_SCALED_SCENERY);
        assert!(scaled.near >= NEAR_CLIP_MIN);
    }

    #[test]
    fn test_camera_inside_body_is_finite() {
        let view = frame_body(
            Representation::Local,
            &kerbin(),
            DVec3::new(100.0, 0.0, 0.0),
            0.0,
            &ScaledSpace::default(),
            128,
        );
        assert!(view.fov_degrees.is_finite());
        assert!(view.fov_degrees > 170.0);
        assert_eq!(view.near, NEAR_CLIP_MIN);
    }

    #[test]
    fn test_camera_owns_buffer() {
        let mut renderer = SolidRenderer {
            color: Rgba::WHITE,
            ..Default::default()
        };
        let mut camera = AlbedoCamera::new(&mut renderer, Representation::Local, 32).unwrap();
        assert_eq!(renderer.targets, 1);
        assert!(camera.last_view().is_none());

        let buf = camera
            .render(
                &mut renderer,
                &kerbin(),
                DVec3::new(800_000.0, 0.0, 0.0),
                10_000.0,
                &ScaledSpace::default(),
            )
            .unwrap();
        assert_eq!(buf.width(), 32);
        assert_eq!(buf.get(5, 5), Some(Rgba::WHITE));
        assert_eq!(renderer.renders, 1);
        assert!(camera.last_view().is_some());
    }

    #[test]
    fn test_short_readback_rejected() {
        let mut renderer = SolidRenderer {
            short_readback: true,
            ..Default::default()
        };
        let mut camera = AlbedoCamera::new(&mut renderer, Representation::Scaled, 16).unwrap();
        let err = camera
            .render(
                &mut renderer,
                &kerbin(),
                DVec3::new(800_000.0, 0.0, 0.0),
                10_000.0,
                &ScaledSpace::default(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::ReadbackSize {
                expected: 256,
                actual: 128
            }
        );
    }
}
