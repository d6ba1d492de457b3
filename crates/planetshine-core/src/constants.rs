//! Single source of truth for shared constants.
//! Most of these are visual-tuning values with no physical derivation;
//! the ones that matter for the look are mirrored as configurable fields
//! in `PlanetShineConfig` and these serve as their defaults.

/// Maximum number of directional lights used to fake an area light.
pub const MAX_ALBEDO_LIGHTS: u32 = 4;

/// Bodies are treated as slightly smaller than their real radius so the
/// vessel never sits exactly on the surface.
pub const RADIUS_EPSILON_FACTOR: f64 = 0.9999;

/// Added to the sun angle effect before clamping, for a brighter rim.
pub const ANGLE_EFFECT_BOOST: f64 = 0.3;

/// Intensity boost factor applied as `1 + boost * spreadRatio^2`
/// when several lights share the area spread.
pub const SPREAD_INTENSITY_BOOST: f64 = 0.5;

/// Upper bound of the off-axis spread angle, in degrees.
pub const DEFAULT_MAX_SPREAD_ANGLE: f64 = 45.0;

/// Virtual atmosphere depth of airless bodies, as a fraction of radius.
pub const NO_ATMOSPHERE_DEPTH_RATIO: f64 = 0.1;

/// Altitude floor in world units.
pub const MIN_ALTITUDE: f64 = 1.0;

/// Floor of the radicand in the framing FOV formula.
pub const FOV_RADICAND_FLOOR: f64 = 1.0;

/// Side length of the square offscreen albedo buffers.
pub const DEFAULT_ALBEDO_DIMENSION: u32 = 128;

/// Distance the albedo cameras are pulled back from the vessel, away from the body.
pub const DEFAULT_ALBEDO_ELEVATION: f64 = 10_000.0;

/// Albedo color is re-sampled every Nth frame.
pub const DEFAULT_ALBEDO_UPDATE_INTERVAL: u32 = 3;

/// Host layer mask for near, full-detail scenery.
pub const LAYER_LOCAL_SCENERY: u32 = 1 << 15;

/// Host layer mask for the distant scaled-space proxies.
pub const LAYER_SCALED_SCENERY: u32 = 1 << 10;

/// Lower bound of the near clip plane.
pub const NEAR_CLIP_MIN: f64 = 0.001;

/// Multiplier on `(radius - atmosphereDepth)` pulled off the near clip distance.
pub const NEAR_CLIP_ATMOSPHERE_FACTOR: f64 = 1.5;

/// Uncovered-area reduction when two cloud layers cannot be superposed.
pub const CLOUD_TWO_LAYER_INFLATION: f32 = 0.2;

/// Uncovered-area reduction for three or more cloud layers.
pub const CLOUD_MULTI_LAYER_INFLATION: f32 = 0.4;

/// Fixed blend weight of the atmosphere rim color into the base albedo.
pub const ATMOSPHERE_SCALED_COVERAGE: f32 = 0.33;

/// Only the left 1/N of the rim color ramp is averaged.
pub const ATMOSPHERE_RIM_SAMPLE_DIVISOR: u32 = 5;

/// Length of the per-light debug segments, in world units.
pub const DEBUG_LIGHT_LINE_LENGTH: f64 = 10_000.0;

/// Supported range for the albedo buffer dimension.
pub const MIN_ALBEDO_DIMENSION: u32 = 16;
pub const MAX_ALBEDO_DIMENSION: u32 = 1024;
