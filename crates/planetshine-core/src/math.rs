use glam::{DQuat, DVec3};

use crate::constants::{FOV_RADICAND_FLOOR, MIN_ALTITUDE};

/// Clamp to [0, 1]. NaN maps to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Unsigned angle between two directions, in degrees [0, 180].
/// Returns 0 when either vector is zero.
pub fn angle_degrees(a: DVec3, b: DVec3) -> f64 {
    let (a, b) = (a.normalize_or_zero(), b.normalize_or_zero());
    if a == DVec3::ZERO || b == DVec3::ZERO {
        return 0.0;
    }
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Rotate `current` toward `target` by at most `max_radians`, keeping the
/// length of `current`. Overshooting snaps onto `target`'s direction.
///
/// Opposite vectors have no unique rotation plane; any axis orthogonal to
/// `current` is used.
pub fn rotate_towards(current: DVec3, target: DVec3, max_radians: f64) -> DVec3 {
    let from = current.normalize_or_zero();
    let to = target.normalize_or_zero();
    if from == DVec3::ZERO || to == DVec3::ZERO {
        return current;
    }

    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    if angle <= max_radians {
        return to * current.length();
    }

    let cross = from.cross(to);
    let axis = if cross.length_squared() < 1e-18 {
        from.any_orthonormal_vector()
    } else {
        cross.normalize()
    };
    DQuat::from_axis_angle(axis, max_radians) * current
}

/// Rotate `v` by `degrees` around `axis`. A zero axis leaves `v` unchanged.
pub fn rotate_around(v: DVec3, axis: DVec3, degrees: f64) -> DVec3 {
    let axis = axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        return v;
    }
    DQuat::from_axis_angle(axis, degrees.to_radians()) * v
}

/// Field of view (degrees) that frames a sphere of `radius` seen from
/// `distance` to its center: `2 * acos(sqrt(max(d² - r², 1)) / d)`.
///
/// The radicand floor keeps the formula finite when the viewpoint sits
/// inside the sphere; the result then approaches 180.
pub fn framing_fov_degrees(distance: f64, radius: f64) -> f64 {
    if distance <= 0.0 {
        return 180.0;
    }
    let radicand = (distance * distance - radius * radius).max(FOV_RADICAND_FLOOR);
    let cos_half = (radicand.sqrt() / distance).clamp(0.0, 1.0);
    2.0 * cos_half.acos().to_degrees()
}

/// Linear ramp over an altitude band expressed in units of `depth`:
/// 0 at or below `depth * min`, 1 at or above `depth * max`.
///
/// A collapsed band (`max <= min`) becomes a step at `depth * min`.
pub fn altitude_ramp(altitude: f64, depth: f64, min: f64, max: f64) -> f64 {
    let lo = depth * min;
    let span = depth * (max - min);
    if span <= 0.0 {
        return if altitude >= lo { 1.0 } else { 0.0 };
    }
    clamp01((altitude - lo) / span)
}

/// Sun exposure of the hemisphere visible from a vessel.
///
/// Shared by the geometric albedo estimate and the per-tick lighting model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunExposure {
    /// Angle between body→vessel and body→sun, degrees.
    pub sun_angle: f64,
    /// Altitude over distance-to-center; the visible fraction of the hemisphere radius.
    pub visible_surface: f64,
    /// Sun angle at which none of the visible surface is lit.
    pub light_sun_angle_max: f64,
    /// Sun angle at which all of the visible surface is lit.
    pub light_sun_angle_min: f64,
    /// Lit fraction of the visible surface, [0, 1].
    pub visible_light_ratio: f64,
    /// Angle from the vessel to the average center of the lit area, degrees.
    pub visible_light_angle_average: f64,
    /// Incidence attenuation of sunlight on the lit area, [0, 1].
    pub angle_effect: f64,
    /// `angle_effect` plus a fixed boost, clamped.
    pub boosted_angle_effect: f64,
}

impl SunExposure {
    pub fn evaluate(sun_angle: f64, visible_surface: f64, boost: f64) -> Self {
        let light_sun_angle_max = 90.0 + 90.0 * visible_surface;
        let light_sun_angle_min = 90.0 - 90.0 * visible_surface;
        let span = light_sun_angle_max - light_sun_angle_min;
        let visible_light_ratio = if span <= f64::EPSILON {
            if sun_angle <= light_sun_angle_max {
                1.0
            } else {
                0.0
            }
        } else {
            clamp01((light_sun_angle_max - sun_angle) / span)
        };

        let visible_light_angle_average =
            90.0 * visible_surface * (1.0 - visible_light_ratio * (1.0 - sun_angle / 180.0));
        let angle_effect = clamp01(1.0 - (sun_angle - visible_light_angle_average) / 90.0);
        let boosted_angle_effect = clamp01(angle_effect + boost);

        Self {
            sun_angle,
            visible_surface,
            light_sun_angle_max,
            light_sun_angle_min,
            visible_light_ratio,
            visible_light_angle_average,
            angle_effect,
            boosted_angle_effect,
        }
    }
}

/// Vessel position relative to a body, shared by the albedo estimate and the
/// lighting model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGeometry {
    /// Body radius shrunk by the epsilon factor.
    pub sub_radius: f64,
    /// Unit direction from the body center to the vessel.
    pub body_vessel_direction: DVec3,
    /// Unit direction from the body center to the sun. Equals
    /// `body_vessel_direction` when the body is itself the light source.
    pub body_sun_direction: DVec3,
    /// Vessel distance to the body center.
    pub distance: f64,
    /// Height above the shrunk surface, at least `MIN_ALTITUDE`.
    pub altitude: f64,
    /// `altitude / distance`.
    pub visible_surface: f64,
}

impl BodyGeometry {
    pub fn evaluate(
        vessel: DVec3,
        body_center: DVec3,
        radius: f64,
        sun: DVec3,
        body_is_sun: bool,
        radius_epsilon_factor: f64,
    ) -> Self {
        let sub_radius = radius * radius_epsilon_factor;
        let offset = vessel - body_center;
        let distance = offset.length();
        let body_vessel_direction = offset.normalize_or_zero();
        let body_sun_direction = if body_is_sun {
            body_vessel_direction
        } else {
            (sun - body_center).normalize_or_zero()
        };
        let altitude = (distance - sub_radius).max(MIN_ALTITUDE);
        let visible_surface = if distance > 0.0 {
            clamp01(altitude / distance)
        } else {
            0.0
        };

        Self {
            sub_radius,
            body_vessel_direction,
            body_sun_direction,
            distance,
            altitude,
            visible_surface,
        }
    }

    /// Angle between the vessel and the sun seen from the body center, degrees.
    pub fn sun_angle(&self) -> f64 {
        angle_degrees(self.body_sun_direction, self.body_vessel_direction)
    }

    pub fn sun_exposure(&self, boost: f64) -> SunExposure {
        SunExposure::evaluate(self.sun_angle(), self.visible_surface, boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ANGLE_EFFECT_BOOST;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(7.0), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    #[test]
    fn test_angle_degrees() {
        assert!(approx(angle_degrees(DVec3::X, DVec3::Y), 90.0, 1e-9));
        assert!(approx(angle_degrees(DVec3::X, -DVec3::X), 180.0, 1e-9));
        assert_eq!(angle_degrees(DVec3::X, DVec3::X * 5.0), 0.0);
        assert_eq!(angle_degrees(DVec3::ZERO, DVec3::X), 0.0);
    }

    #[test]
    fn test_rotate_towards_partial() {
        let v = rotate_towards(DVec3::X * 2.0, DVec3::Y, 45f64.to_radians());
        assert!(approx(v.length(), 2.0, 1e-9));
        assert!(approx(angle_degrees(v, DVec3::X), 45.0, 1e-9));
        assert!(approx(angle_degrees(v, DVec3::Y), 45.0, 1e-9));
    }

    #[test]
    fn test_rotate_towards_snaps_on_overshoot() {
        let v = rotate_towards(DVec3::X, DVec3::Y * 3.0, 2.0);
        assert!(v.abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn test_rotate_towards_opposite_vectors() {
        let v = rotate_towards(DVec3::X, -DVec3::X, 90f64.to_radians());
        assert!(approx(angle_degrees(v, DVec3::X), 90.0, 1e-9));
    }

    #[test]
    fn test_rotate_around() {
        let v = rotate_around(DVec3::X, DVec3::Z, 90.0);
        assert!(v.abs_diff_eq(DVec3::Y, 1e-12));
        assert_eq!(rotate_around(DVec3::X, DVec3::ZERO, 90.0), DVec3::X);
    }

    #[test]
    fn test_fov_in_open_range_and_decreasing() {
        let radius = 600_000.0;
        let mut previous = 180.0;
        for step in 1..200 {
            let distance = radius * (1.0 + step as f64 * 0.5);
            let fov = framing_fov_degrees(distance, radius);
            assert!(fov > 0.0 && fov < 180.0, "fov {fov} at {distance}");
            assert!(fov < previous, "fov not decreasing at {distance}");
            previous = fov;
        }
    }

    #[test]
    fn test_fov_inside_radius_is_finite() {
        let fov = framing_fov_degrees(1000.0, 600_000.0);
        assert!(fov.is_finite());
        assert!(fov > 179.0 && fov <= 180.0);
        assert_eq!(framing_fov_degrees(0.0, 10.0), 180.0);
    }

    #[test]
    fn test_fov_known_value() {
        // sphere seen from twice its radius subtends 60 degrees
        let fov = framing_fov_degrees(2_000.0, 1_000.0);
        assert!(approx(fov, 60.0, 1e-6), "got {fov}");
    }

    #[test]
    fn test_altitude_ramp() {
        let depth = 70_000.0;
        assert_eq!(altitude_ramp(0.0, depth, 0.1, 1.0), 0.0);
        assert_eq!(altitude_ramp(7_000.0, depth, 0.1, 1.0), 0.0);
        assert_eq!(altitude_ramp(70_000.0, depth, 0.1, 1.0), 1.0);
        assert_eq!(altitude_ramp(500_000.0, depth, 0.1, 1.0), 1.0);
        assert!(approx(altitude_ramp(38_500.0, depth, 0.1, 1.0), 0.5, 1e-12));
    }

    #[test]
    fn test_altitude_ramp_collapsed_band() {
        assert_eq!(altitude_ramp(9.0, 10.0, 1.0, 1.0), 0.0);
        assert_eq!(altitude_ramp(10.0, 10.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_visible_light_ratio_always_unit_range() {
        for vs_step in 0..=20 {
            let visible_surface = vs_step as f64 / 20.0;
            for angle_step in 0..=180 {
                let e = SunExposure::evaluate(angle_step as f64, visible_surface, ANGLE_EFFECT_BOOST);
                assert!(
                    (0.0..=1.0).contains(&e.visible_light_ratio),
                    "ratio {} at vs {visible_surface}, angle {angle_step}",
                    e.visible_light_ratio
                );
                assert!((0.0..=1.0).contains(&e.boosted_angle_effect));
            }
        }
    }

    #[test]
    fn test_exposure_full_day_and_full_night() {
        let day = SunExposure::evaluate(0.0, 0.1, ANGLE_EFFECT_BOOST);
        assert_eq!(day.visible_light_ratio, 1.0);
        assert_eq!(day.boosted_angle_effect, 1.0);

        let night = SunExposure::evaluate(180.0, 0.1, ANGLE_EFFECT_BOOST);
        assert_eq!(night.visible_light_ratio, 0.0);
    }

    #[test]
    fn test_exposure_terminator_is_half_lit() {
        let e = SunExposure::evaluate(90.0, 0.4, ANGLE_EFFECT_BOOST);
        assert!(approx(e.visible_light_ratio, 0.5, 1e-12));
        assert!(approx(e.light_sun_angle_max, 126.0, 1e-12));
        assert!(approx(e.light_sun_angle_min, 54.0, 1e-12));
    }

    #[test]
    fn test_body_geometry() {
        let g = BodyGeometry::evaluate(
            DVec3::new(700_000.0, 0.0, 0.0),
            DVec3::ZERO,
            600_000.0,
            DVec3::new(1e10, 0.0, 0.0),
            false,
            0.9999,
        );
        assert!(approx(g.sub_radius, 599_940.0, 1e-6));
        assert!(approx(g.altitude, 100_060.0, 1e-6));
        assert!(approx(g.visible_surface, 100_060.0 / 700_000.0, 1e-12));
        assert!(approx(g.sun_angle(), 0.0, 1e-9));
        assert!(approx(g.sun_exposure(ANGLE_EFFECT_BOOST).visible_light_ratio, 1.0, 1e-12));
    }

    #[test]
    fn test_body_geometry_sun_and_surface() {
        let g = BodyGeometry::evaluate(
            DVec3::new(0.0, 100.0, 0.0),
            DVec3::ZERO,
            600_000.0,
            DVec3::new(0.0, -1e10, 0.0),
            true,
            0.9999,
        );
        assert_eq!(g.body_sun_direction, g.body_vessel_direction);
        assert_eq!(g.altitude, MIN_ALTITUDE);
        assert_eq!(g.sun_angle(), 0.0);
    }
}
