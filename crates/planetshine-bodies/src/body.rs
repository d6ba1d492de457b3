use glam::DVec3;

/// Stable host identity of a celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Read-only snapshot of a celestial body as exposed by the host scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub id: BodyId,
    /// Name used to look up per-body overrides.
    pub name: String,
    /// Center in local (world) space.
    pub position: DVec3,
    /// Center of the distant scaled-space proxy.
    pub scaled_position: DVec3,
    pub radius: f64,
    /// Atmosphere height above the surface, `None` for airless bodies.
    pub atmosphere_depth: Option<f64>,
    /// Body emits light itself (stars).
    pub emissive: bool,
}

impl CelestialBody {
    pub fn has_atmosphere(&self) -> bool {
        self.atmosphere_depth.is_some_and(|d| d > 0.0)
    }

    /// Atmosphere depth, 0 for airless bodies.
    pub fn atmosphere_depth_or_zero(&self) -> f64 {
        self.atmosphere_depth.unwrap_or(0.0).max(0.0)
    }
}
