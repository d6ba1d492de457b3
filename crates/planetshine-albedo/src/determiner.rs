use glam::DVec3;
use planetshine_bodies::{CelestialBody, CelestialBodyData};
use planetshine_core::Rgba;

use crate::camera::ScaledSpace;
use crate::error::AlbedoError;

/// Scene state an albedo determination is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct AlbedoContext<'a> {
    pub body: &'a CelestialBody,
    pub vessel_position: DVec3,
    pub sun_position: DVec3,
    pub scaled_space: ScaledSpace,
}

/// Produces the current lit-side color of a body as seen from the vessel.
pub trait AlbedoDeterminer {
    fn determine_color(
        &mut self,
        data: &CelestialBodyData,
        ctx: &AlbedoContext<'_>,
    ) -> Result<Rgba, AlbedoError>;

    fn name(&self) -> &'static str;
}
