/// Sealed binding tables of a linked program
///
/// One `SetBindingInfo` per resource set, indexed by slot. Tables are built
/// once during program creation and only read afterwards.

use crate::opengl_api::ProgramHandle;

/// An active uniform block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformBinding {
    pub program: ProgramHandle,
    /// `glGetUniformBlockIndex` result
    pub block_index: u32,
    /// `GL_UNIFORM_BLOCK_DATA_SIZE` in bytes
    pub block_size: u32,
}

/// A sampled texture or a read-write image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBindingSlot {
    /// Unit offset among the program's textures (or images)
    pub relative_index: u32,
    /// Uniform location, -1 when the uniform is not active
    pub uniform_location: i32,
}

/// A sampler and the textures it applies to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamplerBindingSlot {
    /// Relative indices of the textures declared since the previous sampler
    pub texture_indices: Vec<u32>,
}

/// A shader storage block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageBufferBinding {
    /// Storage block index (queried) or sequential binding point
    pub binding: u32,
}

/// Resolved binding of one slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotBinding {
    /// Declared but inactive in the program
    #[default]
    None,
    Uniform(UniformBinding),
    Texture(TextureBindingSlot),
    Sampler(SamplerBindingSlot),
    StorageBuffer(StorageBufferBinding),
}

/// Binding table of one resource set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBindingInfo {
    slots: Vec<SlotBinding>,
    uniform_buffer_count: u32,
    storage_buffer_count: u32,
}

impl SetBindingInfo {
    /// Number of declared slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Resolved binding at `slot`; `None` past the end of the set
    pub fn slot(&self, slot: u32) -> Option<&SlotBinding> {
        self.slots.get(slot as usize)
    }

    /// Number of active uniform blocks in the set
    pub fn uniform_buffer_count(&self) -> u32 {
        self.uniform_buffer_count
    }

    /// Number of storage bindings in the set
    pub fn storage_buffer_count(&self) -> u32 {
        self.storage_buffer_count
    }

    pub fn uniform_binding(&self, slot: u32) -> Option<&UniformBinding> {
        match self.slot(slot)? {
            SlotBinding::Uniform(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn texture_binding(&self, slot: u32) -> Option<&TextureBindingSlot> {
        match self.slot(slot)? {
            SlotBinding::Texture(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn sampler_binding(&self, slot: u32) -> Option<&SamplerBindingSlot> {
        match self.slot(slot)? {
            SlotBinding::Sampler(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn storage_buffer_binding(&self, slot: u32) -> Option<&StorageBufferBinding> {
        match self.slot(slot)? {
            SlotBinding::StorageBuffer(binding) => Some(binding),
            _ => None,
        }
    }
}

/// Mutable table used while a set is being resolved
#[derive(Debug)]
pub struct SetBindingInfoBuilder {
    slots: Vec<SlotBinding>,
}

impl SetBindingInfoBuilder {
    /// Builder for a set of `slot_count` declared slots, all unbound
    pub fn new(slot_count: usize) -> Self {
        Self { slots: vec![SlotBinding::None; slot_count] }
    }

    /// Record the binding of `slot`, replacing any previous one
    ///
    /// Slots past the declared count are ignored.
    pub fn bind(&mut self, slot: u32, binding: SlotBinding) -> &mut Self {
        if let Some(entry) = self.slots.get_mut(slot as usize) {
            *entry = binding;
        }
        self
    }

    /// Seal the table and compute its counts
    pub fn build(self) -> SetBindingInfo {
        let uniform_buffer_count = self
            .slots
            .iter()
            .filter(|binding| matches!(binding, SlotBinding::Uniform(_)))
            .count() as u32;
        let storage_buffer_count = self
            .slots
            .iter()
            .filter(|binding| matches!(binding, SlotBinding::StorageBuffer(_)))
            .count() as u32;

        SetBindingInfo { slots: self.slots, uniform_buffer_count, storage_buffer_count }
    }
}

#[cfg(test)]
#[path = "opengl_binding_table_tests.rs"]
mod tests;
