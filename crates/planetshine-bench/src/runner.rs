use std::time::Instant;

use planetshine_albedo::{AlbedoDeterminer, ComputedAlbedoDeterminer, VisualAlbedoDeterminer};
use planetshine_core::{PlanetShineConfig, Rgba};
use planetshine_lighting::{AmbientSink, DirectionalLight, PlanetShine};

use crate::renderer::SphereRenderer;
use crate::scenes::{BenchScene, SceneConfig};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub determiner: String,
    pub tick_count: u32,
    pub light_updates: u32,
    /// State at the end of the run.
    pub final_light_intensity: f64,
    pub final_visible_light_ratio: f64,
    pub final_albedo_color: [f32; 3],
    pub timings: TimingSeries,
}

/// Ambient light that starts at a fixed gray and keeps what is written.
struct BenchAmbient {
    color: Rgba,
    vacuum: Rgba,
}

impl AmbientSink for BenchAmbient {
    fn ambient_color(&self) -> Rgba {
        self.color
    }

    fn set_ambient_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn set_vacuum_ambient_color(&mut self, color: Rgba) {
        self.vacuum = color;
    }
}

/// Runs the controller headless against the software renderer.
pub struct BenchmarkRunner {
    tick_count: u32,
    albedo_dimension: u32,
}

impl BenchmarkRunner {
    pub fn new(tick_count: u32, albedo_dimension: u32) -> Self {
        Self {
            tick_count,
            albedo_dimension,
        }
    }

    fn determiner(&self, config: &SceneConfig, scene: &BenchScene, settings: &PlanetShineConfig) -> Box<dyn AlbedoDeterminer> {
        if !config.visual {
            return Box::new(ComputedAlbedoDeterminer::from_config(settings));
        }
        let renderer = SphereRenderer::new(
            scene.body.clone(),
            config.surface_color,
            scene.sun_position,
            scene.scaled_space,
        );
        match VisualAlbedoDeterminer::new(renderer, self.albedo_dimension, settings.albedo_camera_elevation) {
            Ok(visual) => Box::new(visual),
            Err(e) => {
                log::warn!("Visual albedo unavailable ({}), using estimator", e);
                Box::new(ComputedAlbedoDeterminer::from_config(settings))
            }
        }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!("Running scene '{}' ({:?})...", config.name, config.quality);

        let mut settings = PlanetShineConfig::default();
        settings.apply_quality(config.quality);
        settings.albedo_camera_dimension = self.albedo_dimension;

        let mut scene = BenchScene::new(config);
        let determiner = self.determiner(config, &scene, &settings);
        let determiner_name = determiner.name().to_string();
        let mut controller = PlanetShine::new(settings, determiner);

        let mut lights: Vec<DirectionalLight> = Vec::new();
        let mut ambient = BenchAmbient {
            color: Rgba::gray(0.2),
            vacuum: Rgba::BLACK,
        };

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut light_updates = 0u32;

        for _ in 0..self.tick_count {
            let frame_start = Instant::now();
            if controller.fixed_update(&scene, &mut lights) {
                light_updates += 1;
            }
            controller.late_update(&scene, &mut ambient);
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);

            scene.advance(config.degrees_per_tick);
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, vacuum ambient {:.2}",
            timings.mean_ms,
            timings.p95_ms,
            ambient.vacuum.r
        );

        let snapshot = controller.last_snapshot();
        let color = controller
            .body_cache()
            .get(scene.body.id)
            .map(|d| d.albedo_color())
            .unwrap_or(Rgba::NEUTRAL_GRAY);

        BenchmarkResult {
            scene_name: config.name.to_string(),
            determiner: determiner_name,
            tick_count: self.tick_count,
            light_updates,
            final_light_intensity: snapshot.map_or(0.0, |s| s.light_intensity),
            final_visible_light_ratio: snapshot.map_or(0.0, |s| s.exposure.visible_light_ratio),
            final_albedo_color: color.rgb_array(),
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::standard_scenes;

    #[test]
    fn test_compute_timings() {
        let t = compute_timings(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(t.mean_ms, 2.5);
        assert_eq!(t.median_ms, 2.5);
        assert_eq!(t.min_ms, 1.0);
        assert_eq!(t.max_ms, 4.0);
        assert_eq!(compute_timings(&[]).mean_ms, 0.0);
    }

    #[test]
    fn test_day_scene_samples_surface() {
        let runner = BenchmarkRunner::new(6, 16);
        let result = runner.run_scene(&standard_scenes()[0]);
        assert_eq!(result.determiner, "visual");
        assert_eq!(result.light_updates, 6);
        assert!(result.final_visible_light_ratio > 0.99);
        assert!(result.final_light_intensity > 0.0);
        // lit disc of the blue-ish surface, not the gray default
        assert!(result.final_albedo_color[2] > result.final_albedo_color[0]);
    }

    #[test]
    fn test_night_scene_is_dark() {
        let runner = BenchmarkRunner::new(4, 16);
        let night = standard_scenes()
            .into_iter()
            .find(|s| s.name == "kerbin-low-night")
            .unwrap();
        let result = runner.run_scene(&night);
        assert!(result.final_visible_light_ratio < 0.01);
        assert!(result.final_albedo_color.iter().all(|c| *c < 0.05));
    }

    #[test]
    fn test_low_quality_throttles_lights() {
        let runner = BenchmarkRunner::new(10, 16);
        let mun = standard_scenes()
            .into_iter()
            .find(|s| s.name == "mun-airless")
            .unwrap();
        let result = runner.run_scene(&mun);
        assert_eq!(result.light_updates, 2);
    }
}
