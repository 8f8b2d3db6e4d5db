use crate::constants::{CHUNKS_PER_REGION, REGION_MASK, REGION_SIZE};
use crate::types::ChunkCoord;
use glam::IVec3;

/// Wrap a single chunk coordinate into `[0, REGION_SIZE)`.
///
/// `i32` is two's complement, so `&` on a negative value keeps the low bits
/// exactly as an unsigned mask would: `-1 -> 15`, `-16 -> 0`, `-17 -> 15`.
#[inline]
pub fn mask_coord(c: i32) -> i32 {
    c & REGION_MASK
}

/// Wrap a relative chunk coordinate into the region.
#[inline]
pub fn mask_local(coord: ChunkCoord) -> ChunkCoord {
    IVec3::new(mask_coord(coord.x), mask_coord(coord.y), mask_coord(coord.z))
}

/// Whether a relative coordinate already lies inside the region (masking is a no-op).
pub fn is_local(coord: ChunkCoord) -> bool {
    mask_local(coord) == coord
}

/// Flat slot index for a relative chunk coordinate, x-major then y then z.
///
/// Any integer input is accepted; each axis is masked first.
#[inline]
pub fn region_index(x: i32, y: i32, z: i32) -> usize {
    let s = REGION_SIZE as usize;
    let (x, y, z) = (
        mask_coord(x) as usize,
        mask_coord(y) as usize,
        mask_coord(z) as usize,
    );
    x * s * s + y * s + z
}

/// Inverse of `region_index` for indices in `[0, CHUNKS_PER_REGION)`.
pub fn slot_to_local(index: usize) -> ChunkCoord {
    debug_assert!(index < CHUNKS_PER_REGION, "slot index {index} out of range");
    let s = REGION_SIZE as usize;
    IVec3::new((index / (s * s)) as i32, ((index / s) % s) as i32, (index % s) as i32)
}

/// Offset of a chunk's origin from its region's origin, in world units.
///
/// `None` if the offset does not fit in `i32`, which `GridConfig::validate`
/// rules out for every in-region chunk.
pub fn chunk_origin_offset(local: ChunkCoord, chunk_size: u32) -> Option<IVec3> {
    let size = i32::try_from(chunk_size).ok()?;
    Some(IVec3::new(
        local.x.checked_mul(size)?,
        local.y.checked_mul(size)?,
        local.z.checked_mul(size)?,
    ))
}
