//! Single source of truth for shared grid constants.
//! Region and chunk code must agree on these, so nothing else redefines them.

/// Edge length of a region, in chunks. Must be a power of two.
pub const REGION_SIZE: u32 = 16;

/// Bit mask that wraps a chunk coordinate into `[0, REGION_SIZE)`.
pub const REGION_MASK: i32 = REGION_SIZE as i32 - 1;

/// Number of chunk slots in one region (16^3).
pub const CHUNKS_PER_REGION: usize = (REGION_SIZE * REGION_SIZE * REGION_SIZE) as usize;

/// Default edge length of a chunk in world units.
pub const CHUNK_SIZE: u32 = 32;

/// Largest chunk size for which the farthest chunk origin in a region,
/// `(REGION_SIZE - 1) * chunk_size`, still fits in `i32`.
pub const MAX_CHUNK_SIZE: u32 = i32::MAX as u32 / (REGION_SIZE - 1);

const _: () = assert!(REGION_SIZE.is_power_of_two());
