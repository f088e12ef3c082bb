/// Renderer module - backend-neutral descriptors consumed by the backends

pub mod shader;
pub mod resource_layout;
pub mod pipeline;

pub use shader::*;
pub use resource_layout::*;
pub use pipeline::*;
