pub mod host;
pub mod region_grid;

#[cfg(test)]
mod test_harness;

pub use host::ChunkHost;
pub use region_grid::RegionGrid;
