pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod rng;
pub mod types;

pub use config::GridConfig;
pub use error::RegionError;
