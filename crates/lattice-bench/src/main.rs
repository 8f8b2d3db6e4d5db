use std::path::{Path, PathBuf};
use std::process;

use lattice_bench::report::RunReport;
use lattice_bench::runner::BenchmarkRunner;
use lattice_bench::scenes;
use lattice_core::config::{self, GridConfig};

const USAGE: &str = "Usage: bench-runner [OPTIONS]
  --config <path>          Grid config (RON); defaults apply when omitted
  --iterations <n>         Fresh grids per scene (default: 50)
  --scene <name>           Run only the named scene (repeatable)
  --json <path>            Write the full report as JSON
  --max-ns-per-op <ns>     Exit 1 if any scene's mean cost per op exceeds this";

struct Options {
    config_path: Option<PathBuf>,
    iterations: u32,
    only: Vec<String>,
    json_path: Option<PathBuf>,
    budget_ns: Option<f64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args(std::env::args().skip(1).collect());
    let grid_config = match opts.config_path {
        Some(ref path) => load_grid_config(path),
        None => GridConfig::default(),
    };
    let runner = BenchmarkRunner::new(opts.iterations, grid_config);

    let mut results = Vec::new();
    for scene in scenes::standard_scenes() {
        if !opts.only.is_empty() && !opts.only.iter().any(|name| name == scene.name) {
            continue;
        }
        match runner.run_scene(&scene) {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("Scene '{}' failed: {e}", scene.name);
                process::exit(1);
            }
        }
    }
    if results.is_empty() {
        log::warn!("No scenes matched {:?}", opts.only);
    }

    let report = RunReport::new(runner.config(), results);
    println!("{}", report.to_markdown());

    if let Some(ref path) = opts.json_path {
        if let Err(e) = report.write_json(path) {
            log::error!("{}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Wrote report to {}", path.display());
    }

    if let Some(budget) = opts.budget_ns {
        let slow = report.over_budget(budget);
        for r in &slow {
            eprintln!(
                "{}: {:.1} ns/op exceeds budget of {:.1} ns/op",
                r.scene_name, r.latency.mean_ns, budget
            );
        }
        if !slow.is_empty() {
            process::exit(1);
        }
    }
}

fn parse_args(args: Vec<String>) -> Options {
    let mut opts = Options {
        config_path: None,
        iterations: 50,
        only: Vec::new(),
        json_path: None,
        budget_ns: None,
    };
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let mut value = || match args.next() {
            Some(v) => v,
            None => fail(&format!("missing value for {flag}")),
        };
        match flag.as_str() {
            "--config" => opts.config_path = Some(PathBuf::from(value())),
            "--iterations" => opts.iterations = parse_num(&flag, &value()),
            "--scene" => opts.only.push(value()),
            "--json" => opts.json_path = Some(PathBuf::from(value())),
            "--max-ns-per-op" => opts.budget_ns = Some(parse_num(&flag, &value())),
            "--help" | "-h" => {
                eprintln!("{USAGE}");
                process::exit(0);
            }
            other => fail(&format!("unknown argument {other}")),
        }
    }
    opts
}

fn parse_num<T: std::str::FromStr>(flag: &str, raw: &str) -> T {
    raw.parse()
        .unwrap_or_else(|_| fail(&format!("invalid {flag} value '{raw}'")))
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}\n{USAGE}");
    process::exit(1);
}

fn load_grid_config(path: &Path) -> GridConfig {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| config::load_config_from_str(&text).map_err(|e| e.to_string()));
    match loaded {
        Ok(grid_config) => {
            log::info!(
                "Grid config from {}: chunk_size={}, warn_on_wrap={}",
                path.display(),
                grid_config.chunk_size,
                grid_config.warn_on_wrap
            );
            grid_config
        }
        Err(e) => fail(&format!("cannot load config {}: {e}", path.display())),
    }
}
