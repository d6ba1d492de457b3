use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Rendering quality preset. Trades light count and update rate for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
}

/// Global add-on settings, loaded once from RON and owned by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetShineConfig {
    /// Preset applied on load; overrides light count, vertex mode and update rate.
    pub quality: Quality,
    /// When false only one albedo light is used regardless of quality.
    pub use_area_light: bool,
    /// Number of directional lights simulating the area source (1..=MAX_ALBEDO_LIGHTS).
    pub albedo_lights_quantity: u32,
    /// Hint the host to light per vertex instead of per pixel.
    pub use_vertex: bool,
    pub base_albedo_intensity: f32,
    /// Gray level of the host's vacuum ambient color.
    pub vacuum_light_level: f32,
    pub base_ground_ambient: f32,
    /// Fraction of stock ambient replaced by planetshine ambient, [0, 1].
    pub ground_ambient_override_ratio: f32,
    /// Albedo fade band, in units of the body's virtual atmosphere depth.
    pub min_albedo_fade_altitude: f32,
    pub max_albedo_fade_altitude: f32,
    /// Ambient fade band, in units of the body's virtual atmosphere depth.
    pub min_ambient_fade_altitude: f32,
    pub max_ambient_fade_altitude: f32,
    pub near_curve_strength: f32,
    pub far_curve_strength: f32,
    /// Mix of the near-field falloff term against the far-field one, [0, 1].
    pub curves_mix_ratio: f32,
    /// Cap on the off-axis spread of area lights, degrees.
    pub max_spread_angle: f32,
    /// Lighting is recomputed every Nth fixed tick.
    pub update_frequency: u32,
    /// Albedo color is re-sampled every Nth frame.
    pub albedo_update_interval: u32,
    pub albedo_camera_dimension: u32,
    pub albedo_camera_elevation: f64,
    pub radius_epsilon_factor: f64,
    pub angle_effect_boost: f64,
    pub spread_intensity_boost: f64,
    pub no_atmosphere_depth_ratio: f64,
    pub debug: bool,
}

impl Default for PlanetShineConfig {
    fn default() -> Self {
        Self {
            quality: Quality::High,
            use_area_light: true,
            albedo_lights_quantity: MAX_ALBEDO_LIGHTS,
            use_vertex: false,
            base_albedo_intensity: 0.27,
            vacuum_light_level: 0.03,
            base_ground_ambient: 0.50,
            ground_ambient_override_ratio: 0.60,
            min_albedo_fade_altitude: 0.00,
            max_albedo_fade_altitude: 0.65,
            min_ambient_fade_altitude: 0.10,
            max_ambient_fade_altitude: 1.00,
            near_curve_strength: 1.0,
            far_curve_strength: 20.0,
            curves_mix_ratio: 0.5,
            max_spread_angle: DEFAULT_MAX_SPREAD_ANGLE as f32,
            update_frequency: 1,
            albedo_update_interval: DEFAULT_ALBEDO_UPDATE_INTERVAL,
            albedo_camera_dimension: DEFAULT_ALBEDO_DIMENSION,
            albedo_camera_elevation: DEFAULT_ALBEDO_ELEVATION,
            radius_epsilon_factor: RADIUS_EPSILON_FACTOR,
            angle_effect_boost: ANGLE_EFFECT_BOOST,
            spread_intensity_boost: SPREAD_INTENSITY_BOOST,
            no_atmosphere_depth_ratio: NO_ATMOSPHERE_DEPTH_RATIO,
            debug: false,
        }
    }
}

impl PlanetShineConfig {
    /// Parse settings from RON, then apply the quality preset and area-light switch.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        let mut config: PlanetShineConfig = options
            .from_str(ron_str)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.apply_quality(config.quality);
        if !config.use_area_light {
            config.albedo_lights_quantity = 1;
        }
        log::debug!(
            "Loaded settings: quality {:?}, {} albedo lights, update every {} ticks",
            config.quality,
            config.albedo_lights_quantity,
            config.update_frequency
        );
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    pub fn apply_quality(&mut self, quality: Quality) {
        self.quality = quality;
        let (lights, vertex, frequency) = match quality {
            Quality::Low => (1, true, 5),
            Quality::Medium => (MAX_ALBEDO_LIGHTS, true, 2),
            Quality::High => (MAX_ALBEDO_LIGHTS, false, 1),
        };
        self.albedo_lights_quantity = lights;
        self.use_vertex = vertex;
        self.update_frequency = frequency;
    }

    /// Light count for a body; emissive bodies always get a single light
    /// so their shadow keeps one clean direction.
    pub fn light_count(&self, is_sun: bool) -> u32 {
        if is_sun {
            1
        } else {
            self.albedo_lights_quantity.clamp(1, MAX_ALBEDO_LIGHTS)
        }
    }

    /// Check every range constraint, returning all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        let unit_fields = [
            ("ground_ambient_override_ratio", self.ground_ambient_override_ratio),
            ("curves_mix_ratio", self.curves_mix_ratio),
            ("vacuum_light_level", self.vacuum_light_level),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        let bands = [
            (
                "albedo",
                self.min_albedo_fade_altitude,
                self.max_albedo_fade_altitude,
            ),
            (
                "ambient",
                self.min_ambient_fade_altitude,
                self.max_ambient_fade_altitude,
            ),
        ];
        for (name, min, max) in bands {
            if min > max {
                errors.push(ConfigError::InvertedFadeBand { name, min, max });
            }
        }

        if !(1..=MAX_ALBEDO_LIGHTS).contains(&self.albedo_lights_quantity) {
            errors.push(ConfigError::OutOfRange {
                field: "albedo_lights_quantity",
                value: self.albedo_lights_quantity as f64,
                min: 1.0,
                max: MAX_ALBEDO_LIGHTS as f64,
            });
        }
        if self.update_frequency == 0 {
            errors.push(ConfigError::OutOfRange {
                field: "update_frequency",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }
        if self.albedo_update_interval == 0 {
            errors.push(ConfigError::OutOfRange {
                field: "albedo_update_interval",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }
        if !(0.0..=90.0).contains(&self.max_spread_angle) {
            errors.push(ConfigError::OutOfRange {
                field: "max_spread_angle",
                value: self.max_spread_angle as f64,
                min: 0.0,
                max: 90.0,
            });
        }
        if self.near_curve_strength <= 0.0 || self.far_curve_strength <= 0.0 {
            errors.push(ConfigError::OutOfRange {
                field: "curve_strength",
                value: self.near_curve_strength.min(self.far_curve_strength) as f64,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }

        let dim = self.albedo_camera_dimension;
        if !(MIN_ALBEDO_DIMENSION..=MAX_ALBEDO_DIMENSION).contains(&dim) {
            errors.push(ConfigError::OutOfRange {
                field: "albedo_camera_dimension",
                value: dim as f64,
                min: MIN_ALBEDO_DIMENSION as f64,
                max: MAX_ALBEDO_DIMENSION as f64,
            });
        } else if !dim.is_power_of_two() {
            errors.push(ConfigError::DimensionNotPowerOfTwo(dim));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
