/// OpenGlConfig - runtime options of the OpenGL backend

/// OpenGL backend configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenGlConfig {
    /// Check `glGetError` after program creation, shader compile and link
    pub enable_validation: bool,
    /// Apply `glObjectLabel` debug names when the context supports them
    pub enable_debug_labels: bool,
}

impl Default for OpenGlConfig {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(any(debug_assertions, feature = "opengl-validation")),
            enable_debug_labels: true,
        }
    }
}

impl OpenGlConfig {
    /// Configuration with validation forced on or off
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.enable_validation = enable;
        self
    }

    /// Configuration with debug labels forced on or off
    pub fn with_debug_labels(mut self, enable: bool) -> Self {
        self.enable_debug_labels = enable;
        self
    }
}
