use std::path::PathBuf;
use std::process;

use planetshine_bench::report;
use planetshine_bench::runner::BenchmarkRunner;
use planetshine_bench::scenes;

fn usage() {
    eprintln!("Usage: planetshine-sim [OPTIONS]");
    eprintln!("  --baseline <path>              Load baseline JSON for comparison");
    eprintln!("  --output <path>                Save current results as JSON baseline");
    eprintln!("  --regression-threshold <pct>   Regression threshold percentage (default: 10)");
    eprintln!("  --ticks <n>                    Ticks per scene (default: 120)");
    eprintln!("  --dimension <px>               Albedo camera size (default: 128)");
    eprintln!("  --scene <name>                 Run only the named scene");
}

/// Value following a flag, parsed, or exit with a message.
fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid or missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 120u32;
    let mut dimension = planetshine_core::constants::DEFAULT_ALBEDO_DIMENSION;
    let mut only_scene: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(parse_value::<String>(&args, i, "--baseline")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(parse_value::<String>(&args, i, "--output")));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = parse_value(&args, i, "--regression-threshold");
            }
            "--ticks" => {
                i += 1;
                tick_count = parse_value(&args, i, "--ticks");
            }
            "--dimension" => {
                i += 1;
                dimension = parse_value(&args, i, "--dimension");
            }
            "--scene" => {
                i += 1;
                only_scene = Some(parse_value(&args, i, "--scene"));
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let runner = BenchmarkRunner::new(tick_count, dimension);

    let scene_configs: Vec<_> = scenes::standard_scenes()
        .into_iter()
        .filter(|s| only_scene.as_deref().map_or(true, |name| s.name == name))
        .collect();
    if scene_configs.is_empty() {
        eprintln!("No scene matches {:?}", only_scene);
        process::exit(1);
    }

    let results: Vec<_> = scene_configs.iter().map(|c| runner.run_scene(c)).collect();

    println!("\n## PlanetShine Simulation Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: run_timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            eprintln!("failed to save baseline {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Simulation complete.");
}

/// Seconds since the Unix epoch, without a date-time dependency.
fn run_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("sim-{}", secs)
}
