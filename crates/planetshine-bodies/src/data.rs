use planetshine_core::Rgba;

use crate::body::{BodyId, CelestialBody};
use crate::defaults::body_defaults;
use crate::overrides::BodyOverride;

/// Cached per-body lighting constants plus the live albedo color.
///
/// Built once per body from defaults and configuration; afterwards only the
/// albedo color changes, written back by the sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBodyData {
    body_id: BodyId,
    name: String,
    is_sun: bool,
    is_auto_color: bool,
    base_color: Rgba,
    albedo_color: Rgba,
    albedo_intensity: f32,
    atmosphere_ambient_level: f32,
    virtual_atmosphere_depth: f64,
}

impl CelestialBodyData {
    /// Defaults for `body`. Airless bodies get a virtual atmosphere of
    /// `no_atmosphere_depth_ratio * radius` so altitude fades still work.
    pub fn new(body: &CelestialBody, is_sun: bool, no_atmosphere_depth_ratio: f64) -> Self {
        let (albedo_intensity, atmosphere_ambient_level) =
            body_defaults(is_sun, body.has_atmosphere());
        let virtual_atmosphere_depth = if body.has_atmosphere() {
            body.atmosphere_depth_or_zero()
        } else {
            body.radius * no_atmosphere_depth_ratio
        };

        Self {
            body_id: body.id,
            name: body.name.clone(),
            is_sun,
            is_auto_color: true,
            base_color: Rgba::NEUTRAL_GRAY,
            albedo_color: Rgba::NEUTRAL_GRAY,
            albedo_intensity,
            atmosphere_ambient_level,
            virtual_atmosphere_depth,
        }
    }

    /// Defaults with `entry` applied on top. Out-of-range values are ignored
    /// or clamped with a warning rather than rejected.
    pub fn with_override(mut self, entry: Option<&BodyOverride>) -> Self {
        let Some(entry) = entry else {
            return self;
        };

        if let Some(setting) = entry.color {
            match setting.manual_color() {
                Some(color) => {
                    self.is_auto_color = false;
                    self.set_base_color(color);
                }
                None => self.is_auto_color = true,
            }
        }

        if let Some(intensity) = entry.intensity {
            if intensity > 0.0 {
                self.albedo_intensity = intensity;
            } else {
                log::warn!(
                    "Ignoring non-positive intensity {} for body '{}'",
                    intensity,
                    self.name
                );
            }
        }

        if let Some(level) = entry.atmosphere_ambient {
            if !(0.0..=1.0).contains(&level) {
                log::warn!(
                    "Clamping atmosphere ambient {} for body '{}' into [0, 1]",
                    level,
                    self.name
                );
            }
            self.atmosphere_ambient_level = level.clamp(0.0, 1.0);
        }

        self
    }

    pub fn body_id(&self) -> BodyId {
        self.body_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_sun(&self) -> bool {
        self.is_sun
    }

    pub fn is_auto_color(&self) -> bool {
        self.is_auto_color
    }

    /// Configured or texture-derived color of the fully lit body.
    pub fn base_color(&self) -> Rgba {
        self.base_color
    }

    /// Replace the base color and reset the live color to it.
    pub fn set_base_color(&mut self, color: Rgba) {
        self.base_color = color;
        self.albedo_color = color;
    }

    /// Current lit-side color, as last sampled.
    pub fn albedo_color(&self) -> Rgba {
        self.albedo_color
    }

    pub fn set_albedo_color(&mut self, color: Rgba) {
        self.albedo_color = color;
    }

    pub fn albedo_intensity(&self) -> f32 {
        self.albedo_intensity
    }

    pub fn atmosphere_ambient_level(&self) -> f32 {
        self.atmosphere_ambient_level
    }

    pub fn virtual_atmosphere_depth(&self) -> f64 {
        self.virtual_atmosphere_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::ColorSetting;
    use glam::DVec3;

    fn body(depth: Option<f64>) -> CelestialBody {
        CelestialBody {
            id: BodyId(3),
            name: "Duna".into(),
            position: DVec3::ZERO,
            scaled_position: DVec3::ZERO,
            radius: 320_000.0,
            atmosphere_depth: depth,
            emissive: false,
        }
    }

    fn entry() -> BodyOverride {
        BodyOverride {
            name: "Duna".into(),
            color: None,
            intensity: None,
            atmosphere_ambient: None,
        }
    }

    #[test]
    fn test_defaults_with_atmosphere() {
        let data = CelestialBodyData::new(&body(Some(50_000.0)), false, 0.1);
        assert!(data.is_auto_color());
        assert_eq!(data.albedo_color(), Rgba::NEUTRAL_GRAY);
        assert_eq!(data.albedo_intensity(), 1.0);
        assert_eq!(data.atmosphere_ambient_level(), 0.9);
        assert_eq!(data.virtual_atmosphere_depth(), 50_000.0);
    }

    #[test]
    fn test_defaults_airless_and_sun() {
        let data = CelestialBodyData::new(&body(None), true, 0.1);
        assert!(data.is_sun());
        assert_eq!(data.albedo_intensity(), 6.0);
        assert_eq!(data.atmosphere_ambient_level(), 0.2);
        assert!((data.virtual_atmosphere_depth() - 32_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_manual_color_disables_auto() {
        let e = BodyOverride {
            color: Some(ColorSetting::Rgb(255, 0, 0)),
            ..entry()
        };
        let data = CelestialBodyData::new(&body(None), false, 0.1).with_override(Some(&e));
        assert!(!data.is_auto_color());
        assert_eq!(data.albedo_color(), Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(data.base_color(), Rgba::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_sampled_color_keeps_base() {
        let mut data = CelestialBodyData::new(&body(None), false, 0.1);
        data.set_albedo_color(Rgba::BLACK);
        assert_eq!(data.albedo_color(), Rgba::BLACK);
        assert_eq!(data.base_color(), Rgba::NEUTRAL_GRAY);
    }

    #[test]
    fn test_invalid_override_values() {
        let e = BodyOverride {
            intensity: Some(-1.0),
            atmosphere_ambient: Some(3.0),
            ..entry()
        };
        let data = CelestialBodyData::new(&body(None), false, 0.1).with_override(Some(&e));
        assert_eq!(data.albedo_intensity(), 1.0);
        assert_eq!(data.atmosphere_ambient_level(), 1.0);
    }

    #[test]
    fn test_missing_override_is_default() {
        let a = CelestialBodyData::new(&body(None), false, 0.1);
        let b = a.clone().with_override(None);
        assert_eq!(a, b);
    }
}
