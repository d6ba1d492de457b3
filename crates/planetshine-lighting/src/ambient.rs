use planetshine_core::Rgba;

/// Host ambient light accumulator.
pub trait AmbientSink {
    fn ambient_color(&self) -> Rgba;
    fn set_ambient_color(&mut self, color: Rgba);
    /// Ambient color the host uses outside any atmosphere.
    fn set_vacuum_ambient_color(&mut self, color: Rgba);
}

/// Move `current` toward the planetshine ambient `effect * body_color` by
/// `override_ratio`. The host ambient is scaled down, never dropped, unless
/// the ratio is 1. Alpha of `current` is kept.
pub fn blend_ambient(current: Rgba, effect: f32, body_color: Rgba, override_ratio: f32) -> Rgba {
    let ratio = override_ratio.clamp(0.0, 1.0);
    let kept = current.scale_rgb(1.0 - ratio);
    let added = body_color.scale_rgb(effect * ratio);
    Rgba::new(kept.r + added.r, kept.g + added.g, kept.b + added.b, current.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_interpolates() {
        let current = Rgba::rgb(0.5, 0.5, 0.5);
        let out = blend_ambient(current, 0.5, Rgba::rgb(1.0, 0.0, 0.5), 0.5);
        assert_eq!(out, Rgba::rgb(0.5, 0.25, 0.375));
    }

    #[test]
    fn test_zero_ratio_keeps_host_ambient() {
        let current = Rgba::new(0.2, 0.3, 0.4, 0.5);
        assert_eq!(blend_ambient(current, 1.0, Rgba::WHITE, 0.0), current);
    }

    #[test]
    fn test_zero_effect_only_dims() {
        let out = blend_ambient(Rgba::rgb(0.5, 0.5, 0.5), 0.0, Rgba::WHITE, 0.5);
        assert_eq!(out, Rgba::rgb(0.25, 0.25, 0.25));
    }
}
