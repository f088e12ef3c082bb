//! Error types for the Lumen graphics layer
//!
//! This module defines the error type shared by the core crate and its
//! backends: shader compilation, program linking, unsupported features and
//! generic backend failures.

use std::fmt;

use crate::renderer::ShaderStage;

/// Result type for Lumen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lumen errors
///
/// Creation errors are fatal to the object being created: there is no retry,
/// the caller has to recreate it with different inputs.
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL call failure, poisoned lock, etc.)
    BackendError(String),

    /// Invalid resource or descriptor (bad shader source, mismatched stages, etc.)
    InvalidResource(String),

    /// Initialization failed (context, extensions, subsystems)
    InitializationFailed(String),

    /// Shader source rejected by the backend compiler
    CompileError {
        /// Stage of the rejected shader
        stage: ShaderStage,
        /// Debug name of the shader (`"<unnamed>"` when none was set)
        name: String,
        /// Full compiler diagnostic log
        log: String,
    },

    /// Program link failure
    LinkError {
        /// Full linker diagnostic log
        log: String,
    },

    /// Requested stage or feature is not available on this backend/version
    UnsupportedFeature {
        /// Missing capability (e.g. "compute shaders")
        capability: String,
        /// Actionable message naming what the backend would need
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::CompileError { stage, name, log } => write!(
                f,
                "Unable to compile shader code for shader [{}] of type {:?}: {}",
                name, stage, log
            ),
            Error::LinkError { log } => write!(f, "Error linking GL program: {}", log),
            Error::UnsupportedFeature { capability, message } => {
                write!(f, "Unsupported feature ({}): {}", capability, message)
            }
        }
    }
}

impl std::error::Error for Error {}
