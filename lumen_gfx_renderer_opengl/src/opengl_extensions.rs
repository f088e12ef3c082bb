/// GlExtensions - capability queries derived from the context version and extension list

use rustc_hash::FxHashSet;

/// Flavor of the OpenGL backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlBackend {
    /// Desktop OpenGL (core profile)
    OpenGl,
    /// OpenGL ES
    OpenGlEs,
}

/// Capability set of the active context
///
/// The booleans used by the resolver are derived from the version and the
/// advertised extensions once, so they stay cheap to query at draw time.
#[derive(Debug, Clone)]
pub struct GlExtensions {
    backend: GlBackend,
    major: u32,
    minor: u32,
    extensions: FxHashSet<String>,
}

impl GlExtensions {
    pub fn new<I, E>(backend: GlBackend, major: u32, minor: u32, extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            backend,
            major,
            minor,
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Read version and extension list from a live glow context
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_glow(gl: &glow::Context) -> Self {
        use glow::HasContext;

        let version = gl.version();
        let backend = if version.is_embedded { GlBackend::OpenGlEs } else { GlBackend::OpenGl };
        Self::new(
            backend,
            version.major,
            version.minor,
            gl.supported_extensions().iter().cloned(),
        )
    }

    pub fn backend(&self) -> GlBackend {
        self.backend
    }

    /// (major, minor)
    pub fn version(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    fn gl_version_at_least(&self, major: u32, minor: u32) -> bool {
        self.backend == GlBackend::OpenGl && (self.major, self.minor) >= (major, minor)
    }

    fn gles_version_at_least(&self, major: u32, minor: u32) -> bool {
        self.backend == GlBackend::OpenGlEs && (self.major, self.minor) >= (major, minor)
    }

    /// GL 4.3, ARB_compute_shader, or GL ES 3.1
    pub fn compute_shaders(&self) -> bool {
        self.gl_version_at_least(4, 3)
            || self.gles_version_at_least(3, 1)
            || (self.backend == GlBackend::OpenGl && self.has_extension("GL_ARB_compute_shader"))
    }

    /// GL 4.0, ARB_tessellation_shader, GL ES 3.2 or EXT/OES_tessellation_shader
    pub fn tessellation_shaders(&self) -> bool {
        self.gl_version_at_least(4, 0)
            || self.gles_version_at_least(3, 2)
            || self.has_extension("GL_ARB_tessellation_shader")
            || self.has_extension("GL_EXT_tessellation_shader")
            || self.has_extension("GL_OES_tessellation_shader")
    }

    /// Desktop GL 3.2, GL ES 3.2 or EXT/OES_geometry_shader
    pub fn geometry_shaders(&self) -> bool {
        self.gl_version_at_least(3, 2)
            || self.gles_version_at_least(3, 2)
            || self.has_extension("GL_EXT_geometry_shader")
            || self.has_extension("GL_OES_geometry_shader")
    }

    /// `glObjectLabel`: GL 4.3, GL ES 3.2 or KHR_debug
    pub fn debug_labels(&self) -> bool {
        self.gl_version_at_least(4, 3)
            || self.gles_version_at_least(3, 2)
            || self.has_extension("GL_KHR_debug")
    }

    /// `glGetProgramResourceIndex` for storage blocks
    ///
    /// Desktop GL only (4.3 or ARB_program_interface_query); GL ES resolves
    /// storage blocks sequentially.
    pub fn program_interface_query(&self) -> bool {
        self.gl_version_at_least(4, 3)
            || (self.backend == GlBackend::OpenGl
                && self.has_extension("GL_ARB_program_interface_query"))
    }
}

#[cfg(test)]
#[path = "opengl_extensions_tests.rs"]
mod tests;
