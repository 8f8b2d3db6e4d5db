//! Recording chunk host for grid tests.

use crate::host::ChunkHost;
use glam::IVec3;
use lattice_core::types::ChunkCoord;

/// Chunk handle handed out by `RecordingHost`. `id` is unique per host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestChunk {
    pub id: u32,
    pub relative: ChunkCoord,
    pub origin_offset: IVec3,
    pub destroyed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Created { id: u32, relative: ChunkCoord },
    Destroyed { id: u32 },
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    next_id: u32,
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Created { .. }))
            .count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Destroyed { .. }))
            .count()
    }
}

impl ChunkHost for RecordingHost {
    type Chunk = TestChunk;

    fn create(&mut self, relative: ChunkCoord, origin_offset: IVec3) -> TestChunk {
        let id = self.next_id;
        self.next_id += 1;
        self.events.push(HostEvent::Created { id, relative });
        TestChunk {
            id,
            relative,
            origin_offset,
            destroyed: false,
        }
    }

    fn destroy(&mut self, chunk: &mut TestChunk) {
        assert!(!chunk.destroyed, "chunk {} destroyed twice", chunk.id);
        chunk.destroyed = true;
        self.events.push(HostEvent::Destroyed { id: chunk.id });
    }
}
