//! Per-body defaults used when no override is configured.

/// Albedo intensity of emissive bodies.
pub const SUN_ALBEDO_INTENSITY: f32 = 6.0;

/// Albedo intensity of every other body.
pub const DEFAULT_ALBEDO_INTENSITY: f32 = 1.0;

/// Ambient level of bodies with an atmosphere.
pub const ATMOSPHERE_AMBIENT_LEVEL: f32 = 0.9;

/// Ambient level of airless bodies.
pub const NO_ATMOSPHERE_AMBIENT_LEVEL: f32 = 0.2;

/// Return the default (intensity, ambient level) pair for a body.
pub fn body_defaults(is_sun: bool, has_atmosphere: bool) -> (f32, f32) {
    let intensity = if is_sun {
        SUN_ALBEDO_INTENSITY
    } else {
        DEFAULT_ALBEDO_INTENSITY
    };
    let ambient = if has_atmosphere {
        ATMOSPHERE_AMBIENT_LEVEL
    } else {
        NO_ATMOSPHERE_AMBIENT_LEVEL
    };
    (intensity, ambient)
}
