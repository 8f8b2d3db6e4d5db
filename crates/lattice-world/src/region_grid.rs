use std::cell::Cell;

use crate::host::ChunkHost;
use glam::IVec3;
use lattice_core::config::GridConfig;
use lattice_core::constants::{CHUNKS_PER_REGION, REGION_SIZE};
use lattice_core::error::RegionError;
use lattice_core::math::{self, region_index};
use lattice_core::types::{ChunkCoord, RegionCoord, SlotState, WorldCoord};

/// Fixed-size cubic grid of chunk slots for one region.
///
/// Slots are addressed by relative chunk coordinates. Every coordinate is
/// masked into `[0, REGION_SIZE)`, so `(16, 0, 0)` and `(-16, 0, 0)` both
/// name slot `(0, 0, 0)`. Chunks are created lazily through the host and
/// owned by the grid until destroyed.
pub struct RegionGrid<H: ChunkHost> {
    /// Region coordinate, assigned once by the owning container.
    coords: Option<RegionCoord>,
    /// `CHUNKS_PER_REGION` slots, x-major.
    slots: Box<[Option<H::Chunk>]>,
    /// Number of occupied slots.
    count: u32,
    /// Lookups whose coordinates had to be masked into the region.
    wrapped: Cell<u64>,
    /// Validated; `chunk_size <= MAX_CHUNK_SIZE`.
    config: GridConfig,
    host: H,
}

impl<H: ChunkHost> RegionGrid<H> {
    pub fn new(host: H) -> Self {
        Self::build(host, GridConfig::default())
    }

    /// Build a grid with a host-supplied config. Rejects configs whose chunk
    /// offsets would not fit in `i32`.
    pub fn with_config(host: H, config: GridConfig) -> Result<Self, RegionError> {
        config.validate()?;
        Ok(Self::build(host, config))
    }

    fn build(host: H, config: GridConfig) -> Self {
        let slots = (0..CHUNKS_PER_REGION)
            .map(|_| None)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            coords: None,
            slots,
            count: 0,
            wrapped: Cell::new(0),
            config,
            host,
        }
    }

    /// Assign the region's coordinate. Meant to be called once by the owning
    /// container right after construction.
    pub fn set_coords(&mut self, x: i32, y: i32, z: i32) {
        self.set_coords_vec(IVec3::new(x, y, z));
    }

    pub fn set_coords_vec(&mut self, coords: RegionCoord) {
        if let Some(old) = self.coords {
            if old != coords && self.count > 0 {
                log::warn!(
                    "Region {} reassigned to {} with {} live chunks",
                    old,
                    coords,
                    self.count
                );
            }
        }
        self.coords = Some(coords);
    }

    /// Region coordinate, or the origin if none was assigned yet.
    pub fn coords(&self) -> RegionCoord {
        self.coords.unwrap_or(IVec3::ZERO)
    }

    pub fn has_coords(&self) -> bool {
        self.coords.is_some()
    }

    /// Absolute origin of this region in world units.
    pub fn region_origin(&self) -> WorldCoord {
        // |coord| <= 2^31 and span <= 16 * MAX_CHUNK_SIZE < 2^32, so this fits in i64.
        let span = i64::from(REGION_SIZE) * i64::from(self.config.chunk_size);
        self.coords().as_i64vec3() * span
    }

    /// Return the chunk in the slot addressed by `(x, y, z)`.
    ///
    /// An occupied slot is returned as-is whatever `create` says. An empty slot
    /// yields `None` unless `create` is set, in which case a chunk is built.
    pub fn get_chunk(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        create: bool,
    ) -> Result<Option<&H::Chunk>, RegionError> {
        let index = self.index(x, y, z);
        if self.slots[index].is_none() {
            if !create {
                return Ok(None);
            }
            return self.create_in_slot(index, x, y, z).map(Some);
        }
        Ok(self.slots[index].as_ref())
    }

    /// Mutable access to an existing chunk. Never creates.
    pub fn get_chunk_mut(&mut self, x: i32, y: i32, z: i32) -> Option<&mut H::Chunk> {
        let index = self.index(x, y, z);
        self.slots[index].as_mut()
    }

    /// Create a chunk in an empty slot. Fails if the slot is already occupied.
    ///
    /// Strict variant of `get_chunk(.., true)` for callers that know the slot
    /// must be empty.
    pub fn create_chunk(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<&H::Chunk, RegionError> {
        let index = self.index(x, y, z);
        self.create_in_slot(index, x, y, z)
    }

    fn create_in_slot(
        &mut self,
        index: usize,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<&H::Chunk, RegionError> {
        if self.slots[index].is_some() {
            let err = RegionError::DuplicateChunk { x, y, z, index };
            log::error!("{err}");
            return Err(err);
        }

        let relative = math::slot_to_local(index);
        let Some(offset) = math::chunk_origin_offset(relative, self.config.chunk_size) else {
            return Err(RegionError::InvalidConfig(format!(
                "chunk_size {} overflows the origin of chunk {relative}",
                self.config.chunk_size
            )));
        };
        let chunk = self.host.create(relative, offset);
        self.count += 1;
        log::trace!(
            "Created chunk {} in region {} (slot {}, {} live)",
            relative,
            self.coords(),
            index,
            self.count
        );

        debug_assert!(self.count as usize <= CHUNKS_PER_REGION);
        Ok(&*self.slots[index].insert(chunk))
    }

    /// Destroy the chunk addressed by `(x, y, z)`. Empty slots are ignored.
    pub fn destroy_chunk(&mut self, x: i32, y: i32, z: i32) {
        let index = self.index(x, y, z);
        self.destroy_slot(index);
    }

    /// Destroy every live chunk in slot order. Returns how many were destroyed.
    pub fn destroy_all(&mut self) -> u32 {
        let mut destroyed = 0;
        for index in 0..CHUNKS_PER_REGION {
            if self.destroy_slot(index) {
                destroyed += 1;
            }
        }
        debug_assert_eq!(self.count, 0);
        destroyed
    }

    fn destroy_slot(&mut self, index: usize) -> bool {
        // Host sees the chunk while it is still in its slot.
        let Some(chunk) = self.slots[index].as_mut() else {
            return false;
        };
        self.count -= 1;
        self.host.destroy(chunk);
        self.slots[index] = None;
        log::trace!(
            "Destroyed chunk {} in region {} ({} live)",
            math::slot_to_local(index),
            self.coords(),
            self.count
        );
        true
    }

    pub fn slot_state(&self, x: i32, y: i32, z: i32) -> SlotState {
        if self.contains(x, y, z) {
            SlotState::Occupied
        } else {
            SlotState::Empty
        }
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.slots[self.index(x, y, z)].is_some()
    }

    /// How many lookups so far used coordinates outside `[0, REGION_SIZE)`.
    pub fn wrapped_lookups(&self) -> u64 {
        self.wrapped.get()
    }

    /// Occupied slots in slot order, with their relative coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &H::Chunk)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (math::slot_to_local(i), c)))
    }

    /// Number of live chunks.
    pub fn chunk_count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Exhaustive scan of the slot array.
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Recount occupied slots and compare against the live count.
    pub fn verify_count(&self) -> bool {
        self.occupied_slots() == self.count as usize
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        if math::is_local(IVec3::new(x, y, z)) {
            return region_index(x, y, z);
        }
        self.wrapped.set(self.wrapped.get() + 1);
        if self.config.warn_on_wrap {
            log::warn!(
                "Chunk coordinate ({}, {}, {}) wrapped into region {}",
                x,
                y,
                z,
                self.coords()
            );
        }
        region_index(x, y, z)
    }
}
