//! One-time derivation of a body's base albedo color from its textures.

use planetshine_bodies::CelestialBody;
use planetshine_core::constants::{ATMOSPHERE_RIM_SAMPLE_DIVISOR, ATMOSPHERE_SCALED_COVERAGE};
use planetshine_core::Rgba;

use crate::clouds::{self, CloudEstimate};
use crate::ports::AlbedoPorts;
use crate::sampler;

/// Sun surfaces are not sampled; they are assumed yellow-white.
const SUN_TERRAIN_RGB: (u8, u8, u8) = (255, 255, 180);

/// Intermediate colors of one base color determination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColorReport {
    /// `None` when the surface texture could not be read.
    pub terrain: Option<Rgba>,
    pub atmosphere: Option<Rgba>,
    /// Blend weight of `atmosphere`, 0 when it is unknown.
    pub atmosphere_coverage: f32,
    pub clouds: CloudEstimate,
    /// Final opaque color.
    pub color: Rgba,
}

fn terrain_color(body: &CelestialBody, is_sun: bool, ports: &mut AlbedoPorts) -> Option<Rgba> {
    if is_sun {
        let (r, g, b) = SUN_TERRAIN_RGB;
        return Some(Rgba::from_rgb8(r, g, b));
    }

    let textures = ports.textures.as_ref()?;
    let texture = match textures.surface_texture(body) {
        Some(t) => Some(t),
        None => {
            let triggered = ports
                .demand
                .as_mut()
                .is_some_and(|trigger| trigger.demand_textures(body));
            if triggered {
                log::debug!("Demanded surface texture of '{}'", body.name);
                textures.surface_texture(body)
            } else {
                None
            }
        }
    }?;

    match sampler::average_fast(&texture) {
        Ok(color) => Some(color),
        Err(e) => {
            log::warn!("Surface texture of '{}' unreadable: {}", body.name, e);
            None
        }
    }
}

/// Average of the left part of the rim color ramp.
fn atmosphere_color(body: &CelestialBody, ports: &AlbedoPorts) -> Option<Rgba> {
    let rim = ports.textures.as_ref()?.atmosphere_rim_texture(body);
    let Some(rim) = rim else {
        log::error!("Could not determine atmosphere color of '{}'", body.name);
        return None;
    };
    let width = (rim.width() / ATMOSPHERE_RIM_SAMPLE_DIVISOR).max(1);
    match sampler::average_rect(&rim, 0, 0, width, rim.height()) {
        Ok(color) => Some(color),
        Err(e) => {
            log::warn!("Atmosphere rim of '{}' unreadable: {}", body.name, e);
            None
        }
    }
}

/// Combine terrain, cloud and atmosphere colors into the body's base color:
/// clouds over terrain by cloud coverage, then atmosphere over that by the
/// fixed atmosphere coverage. Unknown parts fall back to neutral gray.
pub fn determine_base_color(
    body: &CelestialBody,
    is_sun: bool,
    ports: &mut AlbedoPorts,
) -> BaseColorReport {
    let terrain = terrain_color(body, is_sun, ports);
    if terrain.is_none() {
        log::error!("Could not determine terrain color for '{}'", body.name);
    }

    let (atmosphere, atmosphere_coverage, clouds) = if body.has_atmosphere() {
        let atmosphere = atmosphere_color(body, ports);
        let coverage = if atmosphere.is_some() {
            ATMOSPHERE_SCALED_COVERAGE
        } else {
            0.0
        };
        let clouds = match ports.clouds.as_ref() {
            Some(source) => clouds::estimate(&source.cloud_layers(body)),
            None => CloudEstimate::NONE,
        };
        (atmosphere, coverage, clouds)
    } else {
        (None, 0.0, CloudEstimate::NONE)
    };

    let fallback = Rgba::NEUTRAL_GRAY;
    let cloud_color = if clouds.coverage > 0.0 {
        clouds.color
    } else {
        fallback
    };
    let color = terrain
        .unwrap_or(fallback)
        .lerp(cloud_color, clouds.coverage)
        .lerp(atmosphere.unwrap_or(fallback), atmosphere_coverage)
        .with_alpha(1.0);

    log::info!(
        "Base color of '{}': ({:.3}, {:.3}, {:.3})",
        body.name,
        color.r,
        color.g,
        color.b
    );

    BaseColorReport {
        terrain,
        atmosphere,
        atmosphere_coverage,
        clouds,
        color,
    }
}
