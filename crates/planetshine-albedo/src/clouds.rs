//! Combined coverage and color of several semi-transparent cloud layers.
//!
//! Alpha is the coverage signal here: a pixel's alpha is how much of that
//! point of the body the layer hides.

use planetshine_core::constants::{CLOUD_MULTI_LAYER_INFLATION, CLOUD_TWO_LAYER_INFLATION};
use planetshine_core::{PixelBuffer, Rgba};

use crate::sampler;

/// One cloud layer: flat tint plus its alpha texture.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayer {
    pub color: Rgba,
    pub texture: PixelBuffer,
    /// Mean alpha of `texture`.
    pub coverage: f32,
}

impl CloudLayer {
    /// Build a layer, deriving its coverage from the texture alpha.
    /// An empty texture covers nothing.
    pub fn new(color: Rgba, texture: PixelBuffer) -> Self {
        let coverage = match sampler::average_fast(&texture) {
            Ok(avg) => avg.a.clamp(0.0, 1.0),
            Err(e) => {
                log::warn!("Cloud layer texture unreadable, assuming no coverage: {}", e);
                0.0
            }
        };
        Self {
            color,
            texture,
            coverage,
        }
    }
}

/// Result of combining all cloud layers of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudEstimate {
    pub coverage: f32,
    pub color: Rgba,
}

impl CloudEstimate {
    pub const NONE: CloudEstimate = CloudEstimate {
        coverage: 0.0,
        color: Rgba::new(
            Rgba::NEUTRAL_GRAY.r,
            Rgba::NEUTRAL_GRAY.g,
            Rgba::NEUTRAL_GRAY.b,
            0.0,
        ),
    };
}

/// Exact superposed coverage: per-pixel max alpha over all layers, averaged.
/// `None` when there are no layers or their textures differ in size.
pub fn combined_alpha(layers: &[CloudLayer]) -> Option<f32> {
    let first = layers.first()?;
    if layers.iter().any(|l| !l.texture.same_dimensions(&first.texture)) {
        return None;
    }
    let count = first.texture.len();
    if count == 0 {
        return None;
    }

    let total: f64 = (0..count)
        .map(|i| {
            layers
                .iter()
                .map(|l| l.texture.pixels()[i].a)
                .fold(0.0f32, f32::max) as f64
        })
        .sum();
    Some((total / count as f64) as f32)
}

/// Coverage of all layers together, in [0, 1].
///
/// Falls back to the best single layer, inflated toward full coverage, when
/// the textures cannot be superposed.
pub fn combined_coverage(layers: &[CloudLayer]) -> f32 {
    match layers.len() {
        0 => return 0.0,
        1 => return layers[0].coverage,
        _ => {}
    }

    if let Some(alpha) = combined_alpha(layers) {
        return alpha;
    }

    log::debug!(
        "Cloud textures differ in size, estimating coverage of {} layers",
        layers.len()
    );
    let best = layers.iter().map(|l| l.coverage).fold(0.0f32, f32::max);
    let inflation = if layers.len() == 2 {
        CLOUD_TWO_LAYER_INFLATION
    } else {
        CLOUD_MULTI_LAYER_INFLATION
    };
    best + (1.0 - best) * inflation
}

/// Coverage-weighted mean of the layer tints. Alpha carries the summed
/// coverage before division, as the weight total.
pub fn average_color(layers: &[CloudLayer]) -> Option<Rgba> {
    let total: f32 = layers.iter().map(|l| l.coverage).sum();
    if total <= 0.0 {
        return None;
    }
    let mut sum = Rgba::TRANSPARENT;
    for layer in layers {
        sum += layer.color * layer.coverage;
    }
    Some((sum / total).with_alpha(total.min(1.0)))
}

pub fn estimate(layers: &[CloudLayer]) -> CloudEstimate {
    if layers.is_empty() {
        return CloudEstimate::NONE;
    }
    let coverage = combined_coverage(layers);
    let color = average_color(layers)
        .map(|c| c.with_alpha(coverage))
        .unwrap_or(CloudEstimate::NONE.color);
    CloudEstimate { coverage, color }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(color: Rgba, w: u32, h: u32, alpha: f32) -> CloudLayer {
        CloudLayer::new(color, PixelBuffer::filled(w, h, Rgba::WHITE.with_alpha(alpha)))
    }

    /// Left half opaque, right half clear.
    fn half_layer(left: bool) -> CloudLayer {
        let mut tex = PixelBuffer::filled(8, 8, Rgba::TRANSPARENT);
        for y in 0..8 {
            for x in 0..4 {
                let x = if left { x } else { x + 4 };
                tex.set(x, y, Rgba::WHITE);
            }
        }
        CloudLayer::new(Rgba::WHITE, tex)
    }

    #[test]
    fn test_single_layer_is_exact() {
        let l = layer(Rgba::WHITE, 16, 16, 0.375);
        assert_eq!(l.coverage, 0.375);
        assert_eq!(combined_coverage(&[l.clone()]), l.coverage);
    }

    #[test]
    fn test_identical_opaque_layers() {
        let layers = [layer(Rgba::WHITE, 8, 8, 1.0), layer(Rgba::WHITE, 8, 8, 1.0)];
        assert_eq!(combined_coverage(&layers), 1.0);
    }

    #[test]
    fn test_disjoint_layers_add_up() {
        let layers = [half_layer(true), half_layer(false)];
        assert_eq!(layers[0].coverage, 0.5);
        assert_eq!(combined_coverage(&layers), 1.0);
    }

    #[test]
    fn test_overlapping_layers_do_not_exceed_one() {
        let layers = [half_layer(true), half_layer(true), half_layer(true)];
        assert_eq!(combined_coverage(&layers), 0.5);
    }

    #[test]
    fn test_mismatched_sizes_heuristic() {
        let two = [layer(Rgba::WHITE, 8, 8, 0.5), layer(Rgba::WHITE, 4, 4, 0.25)];
        assert!((combined_coverage(&two) - 0.6).abs() < 1e-6);

        let three = [
            layer(Rgba::WHITE, 8, 8, 0.5),
            layer(Rgba::WHITE, 4, 4, 0.25),
            layer(Rgba::WHITE, 4, 4, 0.0),
        ];
        assert!((combined_coverage(&three) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_color() {
        let layers = [
            layer(Rgba::rgb(1.0, 0.0, 0.0), 4, 4, 0.75),
            layer(Rgba::rgb(0.0, 0.0, 1.0), 4, 4, 0.25),
        ];
        let est = estimate(&layers);
        assert_eq!(est.coverage, 0.75);
        assert!((est.color.r - 0.75).abs() < 1e-6);
        assert!((est.color.b - 0.25).abs() < 1e-6);
        assert_eq!(est.color.a, 0.75);
    }

    #[test]
    fn test_no_layers() {
        assert_eq!(combined_coverage(&[]), 0.0);
        assert_eq!(combined_alpha(&[]), None);
        assert_eq!(estimate(&[]), CloudEstimate::NONE);
    }

    #[test]
    fn test_clear_layers_keep_neutral_color() {
        let est = estimate(&[layer(Rgba::WHITE, 4, 4, 0.0)]);
        assert_eq!(est.coverage, 0.0);
        assert_eq!(est.color, CloudEstimate::NONE.color);
    }
}
