use lattice_core::error::RegionError;

/// Reasons a benchmark run is rejected.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error(transparent)]
    Grid(#[from] RegionError),

    /// The grid's live count disagrees with an exhaustive slot scan.
    #[error("scene '{scene}': live count {live} but {occupied} occupied slots")]
    CountMismatch {
        scene: String,
        live: u32,
        occupied: usize,
    },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
