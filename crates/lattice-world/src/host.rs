use glam::IVec3;
use lattice_core::types::ChunkCoord;

/// Capability a region grid needs from its environment to bring chunks into
/// and out of existence.
///
/// The grid decides *when* a chunk exists; the host decides *what* that means
/// (scene-graph parenting, GPU allocation, deferred vs. immediate teardown).
/// Both calls are synchronous and must return before the grid continues.
pub trait ChunkHost {
    /// Opaque chunk handle owned by the grid.
    type Chunk;

    /// Build a new chunk for `relative` (already masked into the region).
    /// `origin_offset` is the chunk origin relative to the region origin,
    /// in world units. The grid guarantees the slot is empty.
    fn create(&mut self, relative: ChunkCoord, origin_offset: IVec3) -> Self::Chunk;

    /// Release everything the chunk holds. Called while the chunk is still in
    /// its slot; the grid clears the slot afterwards. Must not fail.
    fn destroy(&mut self, chunk: &mut Self::Chunk);
}
