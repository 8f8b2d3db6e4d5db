use glam::{I64Vec3, IVec3};

/// Chunk coordinate relative to its region (each unit = one chunk).
/// Values outside `[0, REGION_SIZE)` are wrapped by masking.
pub type ChunkCoord = IVec3;

/// Region coordinate in region-space (each unit = REGION_SIZE chunks).
pub type RegionCoord = IVec3;

/// World coordinate in world units. Wider than chunk-space so that any
/// region coordinate times the region span is representable.
pub type WorldCoord = I64Vec3;

/// Occupancy of a single slot in a region's chunk storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Occupied,
}
