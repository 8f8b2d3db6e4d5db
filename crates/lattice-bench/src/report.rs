use std::path::Path;

use lattice_core::config::GridConfig;
use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::runner::BenchmarkResult;

/// Everything one `bench-runner` invocation measured, with the grid settings
/// it ran under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub chunk_size: u32,
    pub warn_on_wrap: bool,
    pub results: Vec<BenchmarkResult>,
}

impl RunReport {
    pub fn new(config: &GridConfig, results: Vec<BenchmarkResult>) -> Self {
        Self {
            chunk_size: config.chunk_size,
            warn_on_wrap: config.warn_on_wrap,
            results,
        }
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<(), BenchError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Scenes whose mean cost per grid operation exceeds `budget_ns`.
    pub fn over_budget(&self, budget_ns: f64) -> Vec<&BenchmarkResult> {
        self.results
            .iter()
            .filter(|r| r.latency.mean_ns > budget_ns)
            .collect()
    }

    /// Markdown table, one row per scene.
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "Grid: chunk_size={}, warn_on_wrap={}\n\n",
            self.chunk_size, self.warn_on_wrap
        );
        out.push_str("| Scene | Ops | Peak fill | Wrapped | Created | ns/op mean | ns/op p50 | ns/op p95 | best | worst |\n");
        out.push_str("|---|---|---|---|---|---|---|---|---|---|\n");
        for r in &self.results {
            out.push_str(&format!(
                "| {} | {} | {}/{:.0}% | {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} |\n",
                r.scene_name,
                r.operations,
                r.peak_chunks,
                r.peak_fill * 100.0,
                r.wrapped_lookups,
                r.created,
                r.latency.mean_ns,
                r.latency.p50_ns,
                r.latency.p95_ns,
                r.latency.best_ns,
                r.latency.worst_ns,
            ));
        }
        out
    }
}
