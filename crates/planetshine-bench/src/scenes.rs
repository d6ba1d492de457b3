use glam::DVec3;
use planetshine_albedo::ScaledSpace;
use planetshine_bodies::{BodyId, CelestialBody};
use planetshine_core::{Quality, Rgba};
use planetshine_lighting::SceneProvider;

/// Distance from the body to the sun in every scene.
const SUN_DISTANCE: f64 = 1.36e10;

/// Configuration for a single benchmark scene: one vessel on a circular
/// equatorial orbit around one body.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    pub body_name: &'static str,
    pub radius: f64,
    pub atmosphere_depth: Option<f64>,
    pub emissive: bool,
    pub surface_color: Rgba,
    pub orbit_altitude: f64,
    /// Starting angle between vessel and sun seen from the body, degrees.
    pub start_sun_angle: f64,
    /// Orbit progress per tick, degrees.
    pub degrees_per_tick: f64,
    pub quality: Quality,
    /// Sample with the dual-view renderer instead of the estimator.
    pub visual: bool,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    let kerbin = SceneConfig {
        name: "kerbin-low-day",
        body_name: "Kerbin",
        radius: 600_000.0,
        atmosphere_depth: Some(70_000.0),
        emissive: false,
        surface_color: Rgba::rgb(0.29, 0.39, 0.55),
        orbit_altitude: 100_000.0,
        start_sun_angle: 0.0,
        degrees_per_tick: 0.05,
        quality: Quality::High,
        visual: true,
    };

    vec![
        kerbin.clone(),
        SceneConfig {
            name: "kerbin-low-terminator",
            start_sun_angle: 90.0,
            ..kerbin.clone()
        },
        SceneConfig {
            name: "kerbin-low-night",
            start_sun_angle: 180.0,
            ..kerbin.clone()
        },
        SceneConfig {
            name: "kerbin-high-computed",
            orbit_altitude: 2_500_000.0,
            start_sun_angle: 45.0,
            quality: Quality::Medium,
            visual: false,
            ..kerbin.clone()
        },
        SceneConfig {
            name: "mun-airless",
            body_name: "Mun",
            radius: 200_000.0,
            atmosphere_depth: None,
            surface_color: Rgba::rgb(0.45, 0.45, 0.43),
            orbit_altitude: 15_000.0,
            start_sun_angle: 30.0,
            quality: Quality::Low,
            ..kerbin.clone()
        },
        SceneConfig {
            name: "sun-close",
            body_name: "Sun",
            radius: 261_600_000.0,
            atmosphere_depth: Some(600_000.0),
            emissive: true,
            surface_color: Rgba::rgb(1.0, 1.0, 0.7),
            orbit_altitude: 50_000_000.0,
            start_sun_angle: 0.0,
            ..kerbin
        },
    ]
}

impl SceneConfig {
    pub fn body(&self) -> CelestialBody {
        CelestialBody {
            id: BodyId(1),
            name: self.body_name.to_string(),
            position: DVec3::ZERO,
            scaled_position: DVec3::ZERO,
            radius: self.radius,
            atmosphere_depth: self.atmosphere_depth,
            emissive: self.emissive,
        }
    }

    pub fn sun_id(&self) -> BodyId {
        if self.emissive {
            BodyId(1)
        } else {
            BodyId(0)
        }
    }
}

/// Headless scene: the body at the origin, the sun far along +X and the
/// vessel orbiting in the XY plane.
pub struct BenchScene {
    pub body: CelestialBody,
    pub sun_id: BodyId,
    pub sun_position: DVec3,
    pub scaled_space: ScaledSpace,
    orbit_radius: f64,
    angle: f64,
}

impl BenchScene {
    pub fn new(config: &SceneConfig) -> Self {
        let body = config.body();
        let sun_position = if config.emissive {
            body.position
        } else {
            DVec3::new(SUN_DISTANCE, 0.0, 0.0)
        };
        Self {
            orbit_radius: config.radius + config.orbit_altitude,
            angle: config.start_sun_angle,
            sun_id: config.sun_id(),
            sun_position,
            scaled_space: ScaledSpace::default(),
            body,
        }
    }

    pub fn vessel_position(&self) -> DVec3 {
        let a = self.angle.to_radians();
        self.body.position + DVec3::new(a.cos(), a.sin(), 0.0) * self.orbit_radius
    }

    pub fn advance(&mut self, degrees: f64) {
        self.angle = (self.angle + degrees) % 360.0;
    }
}

impl SceneProvider for BenchScene {
    fn active_vessel(&self) -> Option<DVec3> {
        Some(self.vessel_position())
    }

    fn main_body(&self) -> Option<&CelestialBody> {
        Some(&self.body)
    }

    fn sun_id(&self) -> BodyId {
        self.sun_id
    }

    fn sun_position(&self) -> DVec3 {
        self.sun_position
    }

    fn scaled_space(&self) -> ScaledSpace {
        self.scaled_space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetshine_core::math::angle_degrees;

    #[test]
    fn test_scene_names_unique() {
        let scenes = standard_scenes();
        let mut names: Vec<_> = scenes.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenes.len());
    }

    #[test]
    fn test_vessel_starts_at_sun_angle() {
        let config = SceneConfig {
            start_sun_angle: 90.0,
            ..standard_scenes()[0].clone()
        };
        let scene = BenchScene::new(&config);
        let v = scene.vessel_position();
        assert!((v.length() - 700_000.0).abs() < 1e-6);
        assert!((angle_degrees(v, scene.sun_position) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_orbit_advances() {
        let mut scene = BenchScene::new(&standard_scenes()[0]);
        let before = scene.vessel_position();
        scene.advance(10.0);
        assert!((angle_degrees(before, scene.vessel_position()) - 10.0).abs() < 1e-9);
    }
}
