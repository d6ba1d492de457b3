//! Optional host capabilities used to derive a body's base color. A missing
//! port is a normal no-op.

use planetshine_bodies::CelestialBody;
use planetshine_core::PixelBuffer;

use crate::clouds::CloudLayer;

/// Read access to the textures of a body's scaled-space proxy.
pub trait BodyTextureSource {
    /// Main surface texture, `None` when not loaded.
    fn surface_texture(&self, body: &CelestialBody) -> Option<PixelBuffer>;

    /// Atmosphere rim color ramp, `None` for airless bodies or when unavailable.
    fn atmosphere_rim_texture(&self, body: &CelestialBody) -> Option<PixelBuffer>;
}

/// Asks the host to load on-demand textures of a body.
pub trait TextureDemandTrigger {
    /// Returns true when a load was triggered.
    fn demand_textures(&mut self, body: &CelestialBody) -> bool;
}

/// Cloud layers drawn over a body by a cloud renderer.
pub trait CloudLayerSource {
    fn cloud_layers(&self, body: &CelestialBody) -> Vec<CloudLayer>;
}

/// The set of optional ports, owned by the lighting controller.
#[derive(Default)]
pub struct AlbedoPorts {
    pub textures: Option<Box<dyn BodyTextureSource>>,
    pub demand: Option<Box<dyn TextureDemandTrigger>>,
    pub clouds: Option<Box<dyn CloudLayerSource>>,
}

impl AlbedoPorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_textures(mut self, source: impl BodyTextureSource + 'static) -> Self {
        self.textures = Some(Box::new(source));
        self
    }

    pub fn with_demand_trigger(mut self, trigger: impl TextureDemandTrigger + 'static) -> Self {
        self.demand = Some(Box::new(trigger));
        self
    }

    pub fn with_clouds(mut self, source: impl CloudLayerSource + 'static) -> Self {
        self.clouds = Some(Box::new(source));
        self
    }
}
