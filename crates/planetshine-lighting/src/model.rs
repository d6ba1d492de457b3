//! Per-tick planetshine light model.
//!
//! Everything is recomputed from scratch each tick from the vessel position,
//! the body, its cached data, the sun position and the settings. The result
//! is one immutable [`LightingSnapshot`].

use glam::DVec3;
use planetshine_bodies::{BodyId, CelestialBody, CelestialBodyData};
use planetshine_core::math::{altitude_ramp, clamp01, framing_fov_degrees, rotate_towards};
use planetshine_core::{BodyGeometry, PlanetShineConfig, Rgba, SunExposure};

/// Altitude falloff of the reflected light: a far-field `1 / (1 + x)` curve
/// and a near-field `1 / (1 + x)^2` curve mixed by `mix`, with `x` the
/// altitude in body radii divided by each curve's strength.
pub fn distance_effect(altitude: f64, radius: f64, near: f64, far: f64, mix: f64) -> f64 {
    let a = altitude / radius;
    let far_term = (1.0 - mix) / (1.0 + a / far);
    let n = a / near;
    let near_term = mix / (1.0 + 2.0 * n + n * n);
    far_term + near_term
}

/// All intermediate and final values of one lighting evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingSnapshot {
    pub body_id: BodyId,
    pub is_sun: bool,
    pub vessel_position: DVec3,
    pub body_position: DVec3,
    pub sun_position: DVec3,
    pub geometry: BodyGeometry,
    pub exposure: SunExposure,
    /// Virtual point on the surface the reflected light seems to come from.
    pub visible_light_position_average: DVec3,
    pub atmosphere_reflection_ratio: f64,
    /// Reflected light left after crossing the atmosphere, [0, 1].
    pub atmosphere_reflection_effect: f64,
    pub atmosphere_ambient_ratio: f64,
    pub atmosphere_ambient_effect: f64,
    /// Angle the body subtends from the vessel, degrees.
    pub body_fov: f64,
    /// Off-axis angle of the area lights, degrees.
    pub area_spread_angle: f64,
    pub area_spread_angle_ratio: f64,
    pub light_distance_effect: f64,
    /// Unit direction the reflected light travels, toward the vessel.
    pub visible_light_vessel_direction: DVec3,
    pub light_count: u32,
    /// Intensity of each light.
    pub light_intensity: f64,
    /// Body albedo color the lights are tinted with.
    pub body_color: Rgba,
}

impl LightingSnapshot {
    pub fn compute(
        vessel: DVec3,
        body: &CelestialBody,
        data: &CelestialBodyData,
        sun_position: DVec3,
        config: &PlanetShineConfig,
    ) -> Self {
        let geometry = BodyGeometry::evaluate(
            vessel,
            body.position,
            body.radius,
            sun_position,
            data.is_sun(),
            config.radius_epsilon_factor,
        );
        let exposure = geometry.sun_exposure(config.angle_effect_boost);
        let sub_radius = geometry.sub_radius;
        let altitude = geometry.altitude;
        let sun_angle = exposure.sun_angle;

        let visible_light_position_average = body.position
            + rotate_towards(
                geometry.body_vessel_direction,
                geometry.body_sun_direction,
                exposure.visible_light_angle_average.to_radians(),
            ) * sub_radius;

        let depth = data.virtual_atmosphere_depth();
        let ambient_level = data.atmosphere_ambient_level() as f64;

        let atmosphere_reflection_ratio = altitude_ramp(
            altitude,
            depth,
            config.min_albedo_fade_altitude as f64,
            config.max_albedo_fade_altitude as f64,
        );
        let atmosphere_reflection_effect =
            clamp01((1.0 - ambient_level) + atmosphere_reflection_ratio);

        let atmosphere_ambient_ratio = 1.0
            - altitude_ramp(
                altitude,
                depth,
                config.min_ambient_fade_altitude as f64,
                config.max_ambient_fade_altitude as f64,
            );
        let atmosphere_ambient_effect =
            ambient_level * config.base_ground_ambient as f64 * atmosphere_ambient_ratio;

        let body_fov = framing_fov_degrees(geometry.distance, sub_radius);
        let max_spread = config.max_spread_angle as f64;
        let area_spread_angle = max_spread
            .min(exposure.visible_light_ratio * (1.0 - sun_angle / 180.0) * body_fov / 2.0);
        let area_spread_angle_ratio = clamp01(area_spread_angle / max_spread);

        let light_distance_effect = distance_effect(
            altitude,
            sub_radius,
            config.near_curve_strength as f64,
            config.far_curve_strength as f64,
            config.curves_mix_ratio as f64,
        );

        let visible_light_vessel_direction =
            (vessel - visible_light_position_average).normalize_or_zero();

        let light_count = config.light_count(data.is_sun());
        let mut light_intensity = (config.base_albedo_intensity as f64 / light_count as f64)
            * atmosphere_reflection_effect
            * light_distance_effect
            * data.albedo_intensity() as f64;
        if light_count > 1 {
            light_intensity *= 1.0
                + area_spread_angle_ratio * area_spread_angle_ratio * config.spread_intensity_boost;
        }

        Self {
            body_id: data.body_id(),
            is_sun: data.is_sun(),
            vessel_position: vessel,
            body_position: body.position,
            sun_position,
            geometry,
            exposure,
            visible_light_position_average,
            atmosphere_reflection_ratio,
            atmosphere_reflection_effect,
            atmosphere_ambient_ratio,
            atmosphere_ambient_effect,
            body_fov,
            area_spread_angle,
            area_spread_angle_ratio,
            light_distance_effect,
            visible_light_vessel_direction,
            light_count,
            light_intensity,
            body_color: data.albedo_color(),
        }
    }

    /// Light actually delivered by all lights together: total intensity
    /// scaled by the brightest channel of the body color.
    pub fn effective_intensity(&self) -> f64 {
        self.light_intensity * self.light_count as f64 * self.body_color.intensity() as f64
    }
}
