use std::time::{Duration, Instant};

use glam::IVec3;
use lattice_core::config::GridConfig;
use lattice_core::error::RegionError;
use lattice_core::types::ChunkCoord;
use lattice_world::{ChunkHost, RegionGrid};
use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::scenes::{self, Op, SceneConfig};

/// Per-operation latency over all iterations of a scene, in nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpLatency {
    pub mean_ns: f64,
    pub p50_ns: f64,
    pub p95_ns: f64,
    pub best_ns: f64,
    pub worst_ns: f64,
}

impl OpLatency {
    /// Summarise whole-run durations as cost per grid operation.
    /// Percentiles use nearest rank over the sorted runs.
    pub fn from_runs(runs: &[Duration], ops_per_run: usize) -> Self {
        let ops = ops_per_run.max(1) as f64;
        let mut per_op: Vec<f64> = runs
            .iter()
            .map(|d| d.as_nanos() as f64 / ops)
            .collect();
        if per_op.is_empty() {
            return Self {
                mean_ns: 0.0,
                p50_ns: 0.0,
                p95_ns: 0.0,
                best_ns: 0.0,
                worst_ns: 0.0,
            };
        }
        per_op.sort_by(f64::total_cmp);

        let rank = |pct: f64| {
            let r = ((pct / 100.0) * per_op.len() as f64).ceil() as usize;
            per_op[r.clamp(1, per_op.len()) - 1]
        };
        Self {
            mean_ns: per_op.iter().sum::<f64>() / per_op.len() as f64,
            p50_ns: rank(50.0),
            p95_ns: rank(95.0),
            best_ns: per_op[0],
            worst_ns: per_op[per_op.len() - 1],
        }
    }
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub operations: u32,
    pub iterations: u32,
    pub peak_chunks: u32,
    /// `peak_chunks` as a fraction of region capacity.
    pub peak_fill: f64,
    /// Masked lookups per iteration.
    pub wrapped_lookups: u64,
    /// Host factory calls per iteration.
    pub created: u64,
    pub latency: OpLatency,
}

/// Chunk stand-in with a small payload so creation costs an allocation,
/// like a real chunk would.
pub struct BenchChunk {
    pub relative: ChunkCoord,
    pub origin_offset: IVec3,
    pub payload: Vec<u8>,
}

/// Host that allocates and frees `BenchChunk`s and keeps totals.
#[derive(Debug, Default)]
pub struct BenchHost {
    pub created: u64,
    pub destroyed: u64,
}

impl ChunkHost for BenchHost {
    type Chunk = BenchChunk;

    fn create(&mut self, relative: ChunkCoord, origin_offset: IVec3) -> BenchChunk {
        self.created += 1;
        BenchChunk {
            relative,
            origin_offset,
            payload: vec![0u8; 64],
        }
    }

    fn destroy(&mut self, chunk: &mut BenchChunk) {
        self.destroyed += 1;
        chunk.payload = Vec::new();
    }
}

/// Fail unless the live count matches an exhaustive scan of the slots.
pub fn check_count(scene: &str, live: u32, occupied: usize) -> Result<(), BenchError> {
    if live as usize == occupied {
        return Ok(());
    }
    Err(BenchError::CountMismatch {
        scene: scene.to_string(),
        live,
        occupied,
    })
}

/// Runs grid workloads on the CPU.
pub struct BenchmarkRunner {
    iterations: u32,
    config: GridConfig,
}

impl BenchmarkRunner {
    pub fn new(iterations: u32, config: GridConfig) -> Self {
        Self { iterations, config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Run one scene `iterations` times on fresh grids. Any count drift
    /// fails the whole scene.
    pub fn run_scene(&self, scene: &SceneConfig) -> Result<BenchmarkResult, BenchError> {
        let ops = scenes::generate_ops(scene.kind);
        log::info!("Running scene '{}' ({} ops)...", scene.name, ops.len());

        let mut runs = Vec::with_capacity(self.iterations as usize);
        let mut peak_chunks = 0u32;
        let mut wrapped_lookups = 0u64;
        let mut created = 0u64;
        let mut capacity = 1usize;

        for _ in 0..self.iterations {
            let mut grid = RegionGrid::with_config(BenchHost::default(), self.config.clone())?;
            grid.set_coords(0, 0, 0);
            capacity = grid.capacity();

            let start = Instant::now();
            let peak = apply_ops(&mut grid, &ops)?;
            runs.push(start.elapsed());

            check_count(scene.name, grid.chunk_count(), grid.occupied_slots())?;
            let live = grid.host().created - grid.host().destroyed;
            check_count(scene.name, grid.chunk_count(), live as usize)?;

            peak_chunks = peak_chunks.max(peak);
            wrapped_lookups = grid.wrapped_lookups();
            created = grid.host().created;
        }

        let latency = OpLatency::from_runs(&runs, ops.len());
        log::info!(
            "  Done: {:.1} ns/op mean, {:.1} ns/op p95, peak {} chunks",
            latency.mean_ns,
            latency.p95_ns,
            peak_chunks
        );

        Ok(BenchmarkResult {
            scene_name: scene.name.to_string(),
            operations: ops.len() as u32,
            iterations: self.iterations,
            peak_chunks,
            peak_fill: f64::from(peak_chunks) / capacity as f64,
            wrapped_lookups,
            created,
            latency,
        })
    }
}

/// Apply a workload to a grid. Returns the peak live chunk count.
pub fn apply_ops<H: ChunkHost>(
    grid: &mut RegionGrid<H>,
    ops: &[Op],
) -> Result<u32, RegionError> {
    let mut peak = grid.chunk_count();
    for op in ops {
        match *op {
            Op::Get { coord, create } => {
                grid.get_chunk(coord.x, coord.y, coord.z, create)?;
            }
            Op::Destroy { coord } => grid.destroy_chunk(coord.x, coord.y, coord.z),
        }
        peak = peak.max(grid.chunk_count());
    }
    Ok(peak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::SceneKind;
    use lattice_core::constants::CHUNKS_PER_REGION;

    #[test]
    fn test_fill_all_peaks_at_capacity_and_drains() {
        let mut grid = RegionGrid::new(BenchHost::default());
        let ops = scenes::generate_ops(SceneKind::FillAll);
        let peak = apply_ops(&mut grid, &ops).expect("no duplicate creates");
        assert_eq!(peak as usize, CHUNKS_PER_REGION);
        assert!(grid.is_empty());
        assert_eq!(grid.host().created, CHUNKS_PER_REGION as u64);
        assert_eq!(grid.host().destroyed, CHUNKS_PER_REGION as u64);
    }

    #[test]
    fn test_churn_keeps_count_consistent() {
        let mut grid = RegionGrid::new(BenchHost::default());
        let ops = scenes::generate_ops(SceneKind::SparseChurn { ops: 2000, seed: 3 });
        apply_ops(&mut grid, &ops).expect("no duplicate creates");
        check_count("churn", grid.chunk_count(), grid.occupied_slots()).expect("no drift");
        for (coord, chunk) in grid.iter() {
            assert_eq!(coord, chunk.relative);
            assert_eq!(chunk.origin_offset, coord * 32);
            assert_eq!(chunk.payload.len(), 64);
        }
    }

    #[test]
    fn test_count_drift_fails_the_scene() {
        let err = check_count("drift", 3, 2).expect_err("mismatch must fail");
        match err {
            BenchError::CountMismatch {
                scene,
                live,
                occupied,
            } => {
                assert_eq!(scene, "drift");
                assert_eq!(live, 3);
                assert_eq!(occupied, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(check_count("ok", 4, 4).is_ok());
    }

    #[test]
    fn test_invalid_config_fails_the_scene() {
        let config = GridConfig {
            chunk_size: 0,
            warn_on_wrap: false,
        };
        let runner = BenchmarkRunner::new(1, config);
        let scene = SceneConfig {
            name: "bad",
            kind: SceneKind::FillAll,
        };
        let err = runner.run_scene(&scene).expect_err("config is invalid");
        assert!(matches!(err, BenchError::Grid(RegionError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_scene_reports_fill_and_wraps() {
        let runner = BenchmarkRunner::new(3, GridConfig::default());
        let scene = SceneConfig {
            name: "tiny",
            kind: SceneKind::WrappedLookup {
                lookups: 100,
                seed: 5,
            },
        };
        let result = runner.run_scene(&scene).expect("scene runs");
        assert_eq!(result.iterations, 3);
        assert_eq!(result.operations, 100);
        assert!(result.peak_chunks <= 100);
        assert!(result.peak_fill > 0.0 && result.peak_fill <= 1.0);
        assert!(result.wrapped_lookups > 0);
        assert!(result.created >= u64::from(result.peak_chunks));
        assert!(result.latency.best_ns <= result.latency.worst_ns);
    }

    #[test]
    fn test_latency_is_per_operation() {
        let runs = [
            Duration::from_nanos(400),
            Duration::from_nanos(100),
            Duration::from_nanos(300),
            Duration::from_nanos(200),
        ];
        let l = OpLatency::from_runs(&runs, 10);
        assert_eq!(l.mean_ns, 25.0);
        assert_eq!(l.p50_ns, 20.0);
        assert_eq!(l.p95_ns, 40.0);
        assert_eq!(l.best_ns, 10.0);
        assert_eq!(l.worst_ns, 40.0);

        assert_eq!(OpLatency::from_runs(&[], 10).mean_ns, 0.0);
    }
}
