use serde::{Deserialize, Serialize};

use crate::constants::{CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::error::RegionError;

/// Per-grid settings supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Chunk edge length in world units. Used to derive chunk origin offsets.
    pub chunk_size: u32,
    /// Log every coordinate that had to be wrapped into the region.
    /// Passing absolute chunk coordinates where relative ones are expected
    /// is silently accepted otherwise.
    pub warn_on_wrap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            warn_on_wrap: false,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), RegionError> {
        if self.chunk_size == 0 {
            return Err(RegionError::InvalidConfig(
                "chunk_size must be non-zero".to_string(),
            ));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(RegionError::InvalidConfig(format!(
                "chunk_size {} exceeds {MAX_CHUNK_SIZE}; chunk offsets would overflow i32",
                self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Parse a grid config from a RON string. Missing fields take their defaults.
pub fn load_config_from_str(ron_str: &str) -> Result<GridConfig, RegionError> {
    let options = ron::Options::default();
    let config: GridConfig = options
        .from_str(ron_str)
        .map_err(|e| RegionError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
