use glam::DVec3;
use planetshine_core::constants::DEBUG_LIGHT_LINE_LENGTH;
use planetshine_core::Rgba;

use crate::model::LightingSnapshot;
use crate::rig::DirectionalLight;

/// Line vertex relative to a local origin (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub _padding: f32,
    pub color: [f32; 4],
}

/// World-space segment with a color gradient from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: DVec3,
    pub end: DVec3,
    pub start_color: Rgba,
    pub end_color: Rgba,
}

impl DebugLine {
    fn toward(start: DVec3, end: DVec3, end_color: Rgba) -> Self {
        Self {
            start,
            end,
            start_color: Rgba::WHITE,
            end_color,
        }
    }

    /// Vertex pair relative to `origin`. World coordinates are too large for
    /// f32, so lines are drawn around the vessel.
    pub fn vertices(&self, origin: DVec3) -> [DebugVertex; 2] {
        let v = |p: DVec3, c: Rgba| DebugVertex {
            position: (p - origin).as_vec3().to_array(),
            _padding: 0.0,
            color: c.to_array(),
        };
        [v(self.start, self.start_color), v(self.end, self.end_color)]
    }
}

/// Light, sun and body direction segments ending at the vessel, plus one
/// segment per enabled light along its direction.
pub fn debug_lines(snapshot: &LightingSnapshot, lights: &[DirectionalLight]) -> Vec<DebugLine> {
    let vessel = snapshot.vessel_position;
    let mut lines = vec![
        DebugLine::toward(
            snapshot.visible_light_position_average,
            vessel,
            Rgba::rgb(0.0, 1.0, 0.0),
        ),
        DebugLine::toward(snapshot.sun_position, vessel, Rgba::rgb(1.0, 0.92, 0.016)),
        DebugLine::toward(snapshot.body_position, vessel, Rgba::rgb(1.0, 0.0, 0.0)),
    ];
    lines.extend(lights.iter().filter(|l| l.enabled).map(|l| {
        DebugLine::toward(
            vessel - l.forward * DEBUG_LIGHT_LINE_LENGTH,
            vessel,
            Rgba::rgb(0.0, 0.0, 1.0),
        )
    }));
    lines
}

/// Flatten lines into a vertex list for a line-list draw.
pub fn line_vertices(lines: &[DebugLine], origin: DVec3) -> Vec<DebugVertex> {
    let mut verts = Vec::with_capacity(lines.len() * 2);
    for line in lines {
        verts.extend(line.vertices(origin));
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_vertex_size() {
        assert_eq!(std::mem::size_of::<DebugVertex>(), 32);
    }

    #[test]
    fn test_vertices_are_vessel_relative() {
        let line = DebugLine::toward(
            DVec3::new(1.0e9, 0.0, 0.0),
            DVec3::new(1.0e9 + 10.0, 0.0, 0.0),
            Rgba::WHITE,
        );
        let [a, b] = line.vertices(DVec3::new(1.0e9, 0.0, 0.0));
        assert_eq!(a.position, [0.0, 0.0, 0.0]);
        assert_eq!(b.position, [10.0, 0.0, 0.0]);
        let pair = [a, b];
        let bytes: &[u8] = bytemuck::cast_slice(&pair);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_line_vertices_count() {
        let line = DebugLine::toward(DVec3::ZERO, DVec3::X, Rgba::WHITE);
        assert_eq!(line_vertices(&[line, line, line], DVec3::ZERO).len(), 6);
    }
}
