use std::collections::HashMap;

use crate::body::BodyId;
use crate::data::CelestialBodyData;

/// Session-lifetime cache of per-body data, keyed by body identity.
#[derive(Debug, Default)]
pub struct BodyCache {
    bodies: HashMap<BodyId, CelestialBodyData>,
}

impl BodyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry for `id`, building it with `create` on first use.
    pub fn get_or_insert_with<F>(&mut self, id: BodyId, create: F) -> &mut CelestialBodyData
    where
        F: FnOnce() -> CelestialBodyData,
    {
        self.bodies.entry(id).or_insert_with(|| {
            let data = create();
            log::debug!(
                "Cached body '{}' (auto color: {}, intensity: {})",
                data.name(),
                data.is_auto_color(),
                data.albedo_intensity()
            );
            data
        })
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBodyData> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBodyData> {
        self.bodies.get_mut(&id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}
