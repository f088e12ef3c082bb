/// Resource layout descriptors
///
/// A resource layout is an ordered group of resource slot declarations,
/// analogous to a descriptor-set layout. Declaration order is meaningful:
/// the position of an element is its slot index within the set, and backends
/// derive relative texture/image indices from it.

use crate::renderer::ShaderStages;

/// Kind of resource declared at a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// Read-only structured (storage) buffer
    StructuredBufferReadOnly,
    /// Read-write structured (storage) buffer
    StructuredBufferReadWrite,
    /// Sampled texture
    TextureReadOnly,
    /// Read-write texture (storage image)
    TextureReadWrite,
    /// Sampler
    Sampler,
}

/// A single named slot declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayoutElementDesc {
    /// Name as declared in the shader (block name or uniform name)
    pub name: String,
    /// Resource kind
    pub kind: ResourceKind,
    /// Shader stages that access this slot
    pub stages: ShaderStages,
}

impl ResourceLayoutElementDesc {
    pub fn new(name: impl Into<String>, kind: ResourceKind, stages: ShaderStages) -> Self {
        Self { name: name.into(), kind, stages }
    }
}

/// Ordered sequence of slot declarations for one resource set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLayoutDesc {
    /// Elements in declaration order (index = slot)
    pub elements: Vec<ResourceLayoutElementDesc>,
}

impl ResourceLayoutDesc {
    pub fn new(elements: Vec<ResourceLayoutElementDesc>) -> Self {
        Self { elements }
    }

    /// Number of declared slots
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element declared at `slot`
    pub fn element(&self, slot: u32) -> Option<&ResourceLayoutElementDesc> {
        self.elements.get(slot as usize)
    }
}

#[cfg(test)]
#[path = "resource_layout_tests.rs"]
mod tests;
