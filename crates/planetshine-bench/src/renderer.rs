use glam::DVec3;
use planetshine_albedo::{RenderError, RenderView, Renderer, Representation, ScaledSpace};
use planetshine_bodies::CelestialBody;
use planetshine_core::{PixelBuffer, Rgba};

/// Offscreen target of the software renderer.
#[derive(Debug, Default)]
pub struct SoftwareTarget {
    pub id: u32,
    pub renders: u64,
}

/// Ray-traced Lambert sphere standing in for the host renderer.
///
/// The local representation only shows the surface within
/// `local_detail_range` of the camera, like terrain that has not been
/// loaded yet; beyond that it renders black and the scaled proxy has to
/// provide the color.
pub struct SphereRenderer {
    pub body: CelestialBody,
    pub surface: Rgba,
    pub sun_position: DVec3,
    pub scaled_space: ScaledSpace,
    pub local_detail_range: f64,
    next_target: u32,
}

impl SphereRenderer {
    pub fn new(body: CelestialBody, surface: Rgba, sun_position: DVec3, scaled_space: ScaledSpace) -> Self {
        Self {
            body,
            surface,
            sun_position,
            scaled_space,
            local_detail_range: 160_000.0,
            next_target: 0,
        }
    }

    fn sun_direction(&self, hit_normal: DVec3) -> DVec3 {
        let d = (self.sun_position - self.body.position).normalize_or_zero();
        // an emissive body lights itself everywhere it is seen
        if d == DVec3::ZERO {
            hit_normal
        } else {
            d
        }
    }

    fn shade(&self, view: &RenderView, center: DVec3, radius: f64, ray: DVec3) -> Rgba {
        let Some(t) = ray_sphere(view.position, ray, center, radius) else {
            return Rgba::BLACK;
        };
        if t < view.near || t > view.far {
            return Rgba::BLACK;
        }
        let normal = (view.position + ray * t - center).normalize_or_zero();
        let lambert = normal.dot(self.sun_direction(normal)).max(0.0);
        self.surface.scale_rgb(lambert as f32).with_alpha(1.0)
    }
}

/// Distance along `dir` (unit) to the first sphere hit in front of `origin`.
pub fn ray_sphere(origin: DVec3, dir: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
}

impl Renderer for SphereRenderer {
    type Target = SoftwareTarget;

    fn create_target(&mut self, dimension: u32) -> Result<SoftwareTarget, RenderError> {
        if dimension == 0 {
            return Err(RenderError::TargetCreation {
                dimension,
                reason: "zero-sized target".into(),
            });
        }
        self.next_target += 1;
        Ok(SoftwareTarget {
            id: self.next_target,
            renders: 0,
        })
    }

    fn render(
        &mut self,
        view: &RenderView,
        target: &mut SoftwareTarget,
        out: &mut PixelBuffer,
    ) -> Result<(), RenderError> {
        target.renders += 1;
        let dim = view.dimension;
        if out.width() != dim || out.height() != dim {
            out.resize(dim, dim);
        }

        let (center, radius) = match view.representation {
            Representation::Local => (self.body.position, self.body.radius),
            Representation::Scaled => (
                self.body.scaled_position,
                self.body.radius * self.scaled_space.inverse_scale_factor,
            ),
        };

        if view.representation == Representation::Local
            && view.position.distance(center) - radius > self.local_detail_range
        {
            out.fill(Rgba::BLACK);
            return Ok(());
        }

        let forward = view.forward();
        if forward == DVec3::ZERO {
            return Err(RenderError::RenderFailed("camera has no direction".into()));
        }
        let right = forward.any_orthonormal_vector();
        let up = right.cross(forward);
        let half = (view.fov_degrees.to_radians() / 2.0).tan();

        for py in 0..dim {
            for px in 0..dim {
                let u = ((px as f64 + 0.5) / dim as f64 * 2.0 - 1.0) * half;
                let v = (1.0 - (py as f64 + 0.5) / dim as f64 * 2.0) * half;
                let ray = (forward + right * u + up * v).normalize();
                out.set(px, py, self.shade(view, center, radius, ray));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetshine_albedo::frame_body;
    use planetshine_bodies::BodyId;

    fn kerbin() -> CelestialBody {
        CelestialBody {
            id: BodyId(1),
            name: "Kerbin".into(),
            position: DVec3::ZERO,
            scaled_position: DVec3::ZERO,
            radius: 600_000.0,
            atmosphere_depth: Some(70_000.0),
            emissive: false,
        }
    }

    #[test]
    fn test_ray_sphere() {
        let t = ray_sphere(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z, DVec3::ZERO, 2.0);
        assert_eq!(t, Some(8.0));
        assert_eq!(ray_sphere(DVec3::new(0.0, 5.0, 10.0), DVec3::NEG_Z, DVec3::ZERO, 2.0), None);
        // from inside, the far wall
        assert_eq!(ray_sphere(DVec3::ZERO, DVec3::X, DVec3::ZERO, 2.0), Some(2.0));
    }

    #[test]
    fn test_lit_center_pixel() {
        let body = kerbin();
        let space = ScaledSpace::default();
        let mut r = SphereRenderer::new(body.clone(), Rgba::WHITE, DVec3::new(1e10, 0.0, 0.0), space);
        let mut target = r.create_target(16).unwrap();
        let mut out = PixelBuffer::new(16, 16);
        let view = frame_body(
            Representation::Scaled,
            &body,
            DVec3::new(700_000.0, 0.0, 0.0),
            10_000.0,
            &space,
            16,
        );
        r.render(&view, &mut target, &mut out).unwrap();
        assert_eq!(target.renders, 1);
        let center = out.get(8, 8).unwrap();
        assert!(center.r > 0.9, "{center:?}");
    }

    #[test]
    fn test_local_beyond_detail_range_is_black() {
        let body = kerbin();
        let space = ScaledSpace::default();
        let mut r = SphereRenderer::new(body.clone(), Rgba::WHITE, DVec3::new(1e10, 0.0, 0.0), space);
        let mut target = r.create_target(8).unwrap();
        let mut out = PixelBuffer::new(8, 8);
        let view = frame_body(
            Representation::Local,
            &body,
            DVec3::new(2_000_000.0, 0.0, 0.0),
            10_000.0,
            &space,
            8,
        );
        r.render(&view, &mut target, &mut out).unwrap();
        assert!(out.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn test_zero_target_rejected() {
        let mut r = SphereRenderer::new(kerbin(), Rgba::WHITE, DVec3::X, ScaledSpace::default());
        assert!(r.create_target(0).is_err());
    }
}
