/*!
# Lumen GFX

Backend-neutral types for the Lumen graphics layer.

This crate holds what every backend shares: the error type, the logging
system, and the descriptors a caller fills in to create shaders and
pipelines. Backend crates (`lumen_gfx_renderer_opengl`) consume these
descriptors and resolve them to native objects.

## Architecture

- **ShaderDesc**: shader source + stage
- **ResourceLayoutDesc**: ordered slot declarations of one resource set
- **PipelineDesc**: graphics or compute pipeline description
- **Engine**: global logger used by the `engine_*` macros
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;

// Main lumen namespace module
pub mod lumen {
    // Error types
    pub use crate::error::{Error, Result};

    // Global services (logging)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with all descriptor types
    pub mod render {
        pub use crate::renderer::*;
    }
}
