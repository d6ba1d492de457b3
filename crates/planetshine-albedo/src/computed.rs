use planetshine_bodies::CelestialBodyData;
use planetshine_core::constants::{ANGLE_EFFECT_BOOST, RADIUS_EPSILON_FACTOR};
use planetshine_core::{BodyGeometry, PlanetShineConfig, Rgba};

use crate::determiner::{AlbedoContext, AlbedoDeterminer};
use crate::error::AlbedoError;

/// Closed-form albedo estimate: the body's base color scaled by the lit
/// fraction of the visible surface and the boosted incidence effect.
/// Needs no rendering and never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedAlbedoDeterminer {
    radius_epsilon_factor: f64,
    angle_effect_boost: f64,
}

impl Default for ComputedAlbedoDeterminer {
    fn default() -> Self {
        Self {
            radius_epsilon_factor: RADIUS_EPSILON_FACTOR,
            angle_effect_boost: ANGLE_EFFECT_BOOST,
        }
    }
}

impl ComputedAlbedoDeterminer {
    pub fn from_config(config: &PlanetShineConfig) -> Self {
        Self {
            radius_epsilon_factor: config.radius_epsilon_factor,
            angle_effect_boost: config.angle_effect_boost,
        }
    }

    pub fn estimate(&self, data: &CelestialBodyData, ctx: &AlbedoContext<'_>) -> Rgba {
        let geometry = BodyGeometry::evaluate(
            ctx.vessel_position,
            ctx.body.position,
            ctx.body.radius,
            ctx.sun_position,
            data.is_sun(),
            self.radius_epsilon_factor,
        );
        let exposure = geometry.sun_exposure(self.angle_effect_boost);
        let factor = exposure.visible_light_ratio * exposure.boosted_angle_effect;
        data.base_color().scale_rgb(factor as f32).with_alpha(1.0)
    }
}

impl AlbedoDeterminer for ComputedAlbedoDeterminer {
    fn determine_color(
        &mut self,
        data: &CelestialBodyData,
        ctx: &AlbedoContext<'_>,
    ) -> Result<Rgba, AlbedoError> {
        Ok(self.estimate(data, ctx))
    }

    fn name(&self) -> &'static str {
        "computed"
    }
}
