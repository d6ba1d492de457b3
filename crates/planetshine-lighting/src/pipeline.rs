//! The per-tick planetshine controller.
//!
//! `fixed_update` runs on the physics tick and drives the lights,
//! `late_update` runs once per rendered frame and drives ambient light and
//! albedo sampling. Both are no-ops without an active vessel.

use std::time::{Duration, Instant};

use glam::DVec3;
use planetshine_albedo::{
    determine_base_color, AlbedoContext, AlbedoDeterminer, AlbedoPorts, ComputedAlbedoDeterminer,
    ScaledSpace,
};
use planetshine_bodies::{BodyCache, BodyId, BodyOverrides, CelestialBody, CelestialBodyData};
use planetshine_core::{PlanetShineConfig, Rgba};

use crate::ambient::{blend_ambient, AmbientSink};
use crate::debug::{debug_lines, DebugLine};
use crate::model::LightingSnapshot;
use crate::rig::{distribute_lights, DirectionalLight, LightSink};

/// Read access to the host scene.
pub trait SceneProvider {
    /// Position of the active vessel, `None` when there is none.
    fn active_vessel(&self) -> Option<DVec3>;

    /// Body the active vessel currently orbits.
    fn main_body(&self) -> Option<&CelestialBody>;

    fn sun_id(&self) -> BodyId;

    fn sun_position(&self) -> DVec3;

    fn scaled_space(&self) -> ScaledSpace {
        ScaledSpace::default()
    }

    fn map_view_active(&self) -> bool {
        false
    }
}

/// Build the cached data of a body on first encounter: defaults, then the
/// configured override, then the automatic base color.
fn build_body_data(
    body: &CelestialBody,
    is_sun: bool,
    config: &PlanetShineConfig,
    overrides: &BodyOverrides,
    ports: &mut AlbedoPorts,
) -> CelestialBodyData {
    let mut data = CelestialBodyData::new(body, is_sun, config.no_atmosphere_depth_ratio)
        .with_override(overrides.get(&body.name));
    if data.is_auto_color() {
        let report = determine_base_color(body, is_sun, ports);
        data.set_base_color(report.color);
    }
    data
}

pub struct PlanetShine {
    config: PlanetShineConfig,
    overrides: BodyOverrides,
    ports: AlbedoPorts,
    cache: BodyCache,
    determiner: Box<dyn AlbedoDeterminer>,
    fallback: ComputedAlbedoDeterminer,
    render_enabled: bool,
    fixed_update_counter: u64,
    frame_counter: u64,
    last_snapshot: Option<LightingSnapshot>,
    lights: Vec<DirectionalLight>,
    debug_lines: Vec<DebugLine>,
    last_compute_time: Option<Duration>,
}

impl PlanetShine {
    pub fn new(config: PlanetShineConfig, determiner: Box<dyn AlbedoDeterminer>) -> Self {
        if let Err(errors) = config.validate() {
            for e in &errors {
                log::warn!("Settings problem: {}", e);
            }
        }
        log::info!(
            "PlanetShine started with {} albedo determiner, {} lights",
            determiner.name(),
            config.albedo_lights_quantity
        );
        let fallback = ComputedAlbedoDeterminer::from_config(&config);
        Self {
            config,
            overrides: BodyOverrides::default(),
            ports: AlbedoPorts::default(),
            cache: BodyCache::new(),
            determiner,
            fallback,
            render_enabled: true,
            fixed_update_counter: 0,
            frame_counter: 0,
            last_snapshot: None,
            lights: Vec::new(),
            debug_lines: Vec::new(),
            last_compute_time: None,
        }
    }

    /// Controller sampling colors with the geometric estimator only.
    pub fn computed(config: PlanetShineConfig) -> Self {
        let determiner = ComputedAlbedoDeterminer::from_config(&config);
        Self::new(config, Box::new(determiner))
    }

    pub fn with_overrides(mut self, overrides: BodyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_ports(mut self, ports: AlbedoPorts) -> Self {
        self.ports = ports;
        self
    }

    pub fn config(&self) -> &PlanetShineConfig {
        &self.config
    }

    /// Settings changes take effect on the next tick. Cached body data
    /// keeps the values it was built with.
    pub fn config_mut(&mut self) -> &mut PlanetShineConfig {
        &mut self.config
    }

    pub fn set_render_enabled(&mut self, enabled: bool) {
        self.render_enabled = enabled;
    }

    pub fn render_enabled(&self) -> bool {
        self.render_enabled
    }

    pub fn last_snapshot(&self) -> Option<&LightingSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Lights as last written to the sink.
    pub fn lights(&self) -> &[DirectionalLight] {
        &self.lights
    }

    /// Empty unless `debug` is on.
    pub fn debug_lines(&self) -> &[DebugLine] {
        &self.debug_lines
    }

    /// Duration of the last light update, measured only in debug mode.
    pub fn last_compute_time(&self) -> Option<Duration> {
        self.last_compute_time
    }

    pub fn body_cache(&self) -> &BodyCache {
        &self.cache
    }

    fn is_sun(scene: &dyn SceneProvider, body: &CelestialBody) -> bool {
        body.id == scene.sun_id() || body.emissive
    }

    fn body_data(&mut self, scene: &dyn SceneProvider, body: &CelestialBody) -> &mut CelestialBodyData {
        let is_sun = Self::is_sun(scene, body);
        let Self {
            cache,
            config,
            overrides,
            ports,
            ..
        } = self;
        cache.get_or_insert_with(body.id, || {
            build_body_data(body, is_sun, config, overrides, ports)
        })
    }

    /// Physics tick: recompute the light model and write the lights.
    /// Returns true when the model ran this tick.
    pub fn fixed_update(&mut self, scene: &dyn SceneProvider, sink: &mut dyn LightSink) -> bool {
        let tick = self.fixed_update_counter;
        self.fixed_update_counter += 1;
        if tick % u64::from(self.config.update_frequency.max(1)) != 0 {
            return false;
        }
        let Some(vessel) = scene.active_vessel() else {
            return false;
        };
        let Some(body) = scene.main_body() else {
            log::debug!("Active vessel has no main body, skipping light update");
            return false;
        };

        let timer = self.config.debug.then(Instant::now);

        let sun_position = scene.sun_position();
        let data = self.body_data(scene, body).clone();
        let snapshot = LightingSnapshot::compute(vessel, body, &data, sun_position, &self.config);

        let active = self.render_enabled && !scene.map_view_active();
        let lights = distribute_lights(&snapshot, self.config.use_vertex, active);
        for (i, light) in lights.iter().enumerate() {
            sink.update_light(i, light);
        }

        if self.config.debug {
            self.debug_lines = debug_lines(&snapshot, &lights);
        } else {
            self.debug_lines.clear();
        }

        self.lights.clear();
        self.lights.extend_from_slice(&lights);
        self.last_snapshot = Some(snapshot);
        self.last_compute_time = timer.map(|t| t.elapsed());
        true
    }

    /// Frame tick: blend ambient light, then resample the body color every
    /// `albedo_update_interval` frames.
    pub fn late_update(&mut self, scene: &dyn SceneProvider, ambient: &mut dyn AmbientSink) {
        let Some(vessel) = scene.active_vessel() else {
            return;
        };
        let Some(body) = scene.main_body() else {
            return;
        };

        ambient.set_vacuum_ambient_color(Rgba::gray(self.config.vacuum_light_level));

        if self.render_enabled && !scene.map_view_active() {
            let effect = self
                .last_snapshot
                .as_ref()
                .filter(|s| s.body_id == body.id)
                .map(|s| s.atmosphere_ambient_effect as f32);
            let color = self.cache.get(body.id).map(|d| d.albedo_color());
            if let (Some(effect), Some(color)) = (effect, color) {
                let blended = blend_ambient(
                    ambient.ambient_color(),
                    effect,
                    color,
                    self.config.ground_ambient_override_ratio,
                );
                ambient.set_ambient_color(blended);
            }
        }

        let frame = self.frame_counter;
        self.frame_counter += 1;
        if frame % u64::from(self.config.albedo_update_interval.max(1)) != 0 {
            return;
        }
        if !self.render_enabled {
            return;
        }
        self.update_albedo(scene, body, vessel);
    }

    fn update_albedo(&mut self, scene: &dyn SceneProvider, body: &CelestialBody, vessel: DVec3) {
        let data = self.body_data(scene, body).clone();
        if !data.is_auto_color() {
            return;
        }

        let ctx = AlbedoContext {
            body,
            vessel_position: vessel,
            sun_position: scene.sun_position(),
            scaled_space: scene.scaled_space(),
        };
        let color = match self.determiner.determine_color(&data, &ctx) {
            Ok(color) => color,
            Err(e) => {
                log::warn!(
                    "{} albedo failed for '{}', using estimate: {}",
                    self.determiner.name(),
                    body.name,
                    e
                );
                self.fallback.estimate(&data, &ctx)
            }
        };

        if let Some(entry) = self.cache.get_mut(body.id) {
            entry.set_albedo_color(color);
        }
    }
}
