use glam::DVec3;
use planetshine_core::constants::MAX_ALBEDO_LIGHTS;
use planetshine_core::math::rotate_around;
use planetshine_core::Rgba;

use crate::model::LightingSnapshot;

/// Host rendering path hint for a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Per-pixel lighting with shadows.
    #[default]
    Pixel,
    /// Cheaper per-vertex lighting.
    Vertex,
}

/// One synthetic planetshine light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction the light travels.
    pub forward: DVec3,
    pub color: Rgba,
    pub intensity: f32,
    pub render_mode: RenderMode,
    pub enabled: bool,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            forward: DVec3::NEG_Z,
            color: Rgba::BLACK,
            intensity: 0.0,
            render_mode: RenderMode::Pixel,
            enabled: false,
        }
    }
}

/// Host light objects. The rig always holds `MAX_ALBEDO_LIGHTS` lights;
/// the unused ones are written disabled.
pub trait LightSink {
    fn update_light(&mut self, index: usize, light: &DirectionalLight);
}

impl LightSink for Vec<DirectionalLight> {
    fn update_light(&mut self, index: usize, light: &DirectionalLight) {
        if self.len() <= index {
            self.resize(index + 1, DirectionalLight::default());
        }
        self[index] = *light;
    }
}

/// Rotation axis for the off-axis spread: normal of the plane holding the
/// vessel and the sun as seen from the body.
fn spread_axis(snapshot: &LightingSnapshot) -> DVec3 {
    let g = &snapshot.geometry;
    let axis = g.body_vessel_direction.cross(g.body_sun_direction);
    if axis.length_squared() > 1e-18 {
        axis.normalize()
    } else {
        snapshot.visible_light_vessel_direction.any_orthonormal_vector()
    }
}

/// Lay out the rig for one tick.
///
/// With several lights, each is tilted `area_spread_angle` off the average
/// light direction, then the tilted lights are spaced evenly around it.
/// `active` is false while rendering is off or the map view is open.
pub fn distribute_lights(
    snapshot: &LightingSnapshot,
    use_vertex: bool,
    active: bool,
) -> [DirectionalLight; MAX_ALBEDO_LIGHTS as usize] {
    let render_mode = if use_vertex && !snapshot.is_sun {
        RenderMode::Vertex
    } else {
        RenderMode::Pixel
    };
    let center = snapshot.visible_light_vessel_direction;
    let count = snapshot.light_count;
    let axis = spread_axis(snapshot);

    std::array::from_fn(|i| {
        let mut forward = center;
        if count > 1 {
            forward = rotate_around(forward, axis, snapshot.area_spread_angle);
            forward = rotate_around(forward, center, i as f64 * (360.0 / count as f64));
        }
        DirectionalLight {
            forward,
            color: snapshot.body_color,
            intensity: snapshot.light_intensity as f32,
            render_mode,
            enabled: active && (i as u32) < count,
        }
    })
}
