/// StagingMemoryPool - CPU-side staging for shader source
///
/// Shader source is copied into the pool when a shader object is described,
/// and released once the GL compiler has consumed it. Blocks are move-only
/// tokens: `free` takes the block by value, so a block cannot be released twice.

use std::sync::{Mutex, PoisonError};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a live staging block
    pub struct StagingBlockKey;
}

/// A staged byte range owned by a `StagingMemoryPool`
#[derive(Debug)]
pub struct StagingBlock {
    key: StagingBlockKey,
    len: usize,
}

impl StagingBlock {
    pub fn key(&self) -> StagingBlockKey {
        self.key
    }

    /// Size in bytes of the staged data
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Default)]
struct PoolState {
    blocks: SlotMap<StagingBlockKey, Vec<u8>>,
    /// Released buffers kept for reuse
    free_buffers: Vec<Vec<u8>>,
}

/// Thread-safe pool of staging buffers
#[derive(Default)]
pub struct StagingMemoryPool {
    state: Mutex<PoolState>,
}

impl StagingMemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `data` into a pooled buffer
    pub fn stage(&self, data: &[u8]) -> StagingBlock {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut buffer = state.free_buffers.pop().unwrap_or_default();
        buffer.clear();
        buffer.extend_from_slice(data);
        let key = state.blocks.insert(buffer);
        StagingBlock { key, len: data.len() }
    }

    /// Run `f` over the staged bytes; `None` if the block is unknown to this pool
    pub fn with_data<R>(&self, block: &StagingBlock, f: impl FnOnce(&[u8]) -> R) -> Option<R> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.blocks.get(block.key).map(|buffer| f(buffer))
    }

    /// Release a block and recycle its buffer
    pub fn free(&self, block: StagingBlock) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(buffer) = state.blocks.remove(block.key) {
            state.free_buffers.push(buffer);
        }
    }

    /// Number of blocks staged and not yet freed
    pub fn outstanding(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).blocks.len()
    }
}

#[cfg(test)]
#[path = "opengl_staging_tests.rs"]
mod tests;
