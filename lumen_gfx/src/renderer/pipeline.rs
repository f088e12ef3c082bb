/// Pipeline descriptors (graphics and compute)
///
/// Descriptors are generic over the backend's shader handle `S`
/// (for OpenGL: `Arc<OpenGlShader>`), so the same description types serve
/// every backend without downcasting.

use crate::renderer::ResourceLayoutDesc;

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
    LineStrip,
    PointList,
}

// ===== VERTEX INPUT =====

/// Format of one vertex element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexElementFormat {
    Float1,
    Float2,
    Float3,
    Float4,
    Byte4Norm,
    UInt1,
    UInt2,
    UInt4,
    Int1,
    Int4,
    Half2,
    Half4,
}

impl VertexElementFormat {
    /// Size in bytes of one element
    pub fn size_bytes(&self) -> u32 {
        match self {
            VertexElementFormat::Float1 => 4,
            VertexElementFormat::Float2 => 8,
            VertexElementFormat::Float3 => 12,
            VertexElementFormat::Float4 => 16,
            VertexElementFormat::Byte4Norm => 4,
            VertexElementFormat::UInt1 => 4,
            VertexElementFormat::UInt2 => 8,
            VertexElementFormat::UInt4 => 16,
            VertexElementFormat::Int1 => 4,
            VertexElementFormat::Int4 => 16,
            VertexElementFormat::Half2 => 4,
            VertexElementFormat::Half4 => 8,
        }
    }
}

/// A named vertex element
///
/// The name must match the vertex shader's input variable; OpenGL binds
/// attribute locations by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexElementDesc {
    pub name: String,
    pub format: VertexElementFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

impl VertexElementDesc {
    /// Element whose offset is assigned by `VertexLayoutDesc::new`
    pub fn new(name: impl Into<String>, format: VertexElementFormat) -> Self {
        Self { name: name.into(), format, offset: 0 }
    }

    /// Element with an explicit offset (for `VertexLayoutDesc::with_stride`)
    pub fn with_offset(name: impl Into<String>, format: VertexElementFormat, offset: u32) -> Self {
        Self { name: name.into(), format, offset }
    }
}

/// One vertex buffer layout: ordered elements and a byte stride
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayoutDesc {
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
    /// Elements in declaration order
    pub elements: Vec<VertexElementDesc>,
    /// 0 = per-vertex data, N = advance once every N instances
    pub instance_step_rate: u32,
}

impl VertexLayoutDesc {
    /// Tightly packed layout: offsets follow declaration order, stride is the total size
    pub fn new(mut elements: Vec<VertexElementDesc>) -> Self {
        let mut offset = 0;
        for element in &mut elements {
            element.offset = offset;
            offset += element.format.size_bytes();
        }
        Self { stride: offset, elements, instance_step_rate: 0 }
    }

    /// Layout with an explicit stride; element offsets are kept as given
    pub fn with_stride(stride: u32, elements: Vec<VertexElementDesc>) -> Self {
        Self { stride, elements, instance_step_rate: 0 }
    }

    /// Per-instance variant of this layout
    pub fn per_instance(mut self, step_rate: u32) -> Self {
        self.instance_step_rate = step_rate;
        self
    }
}

// ===== RASTERIZATION =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Front face winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    CounterClockwise,
    Clockwise,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// Rasterization fixed-function state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizationState {
    pub cull_mode: CullMode,
    pub front_face: FrontFace,
    pub polygon_mode: PolygonMode,
    pub depth_clip_enable: bool,
    pub scissor_test_enable: bool,
}

impl Default for RasterizationState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            front_face: FrontFace::Clockwise,
            polygon_mode: PolygonMode::Fill,
            depth_clip_enable: true,
            scissor_test_enable: false,
        }
    }
}

// ===== DEPTH/STENCIL =====

/// Comparison operator for depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrementAndClamp,
    DecrementAndClamp,
    Invert,
    IncrementAndWrap,
    DecrementAndWrap,
}

/// Stencil operation state (per-face)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilOpState {
    pub fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub compare_op: CompareOp,
}

impl Default for StencilOpState {
    fn default() -> Self {
        Self {
            fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            compare_op: CompareOp::Always,
        }
    }
}

/// Depth and stencil testing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: CompareOp,
    pub stencil_test_enable: bool,
    pub front: StencilOpState,
    pub back: StencilOpState,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub stencil_reference: u32,
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self {
            depth_test_enable: true,
            depth_write_enable: true,
            depth_compare_op: CompareOp::LessOrEqual,
            stencil_test_enable: false,
            front: StencilOpState::default(),
            back: StencilOpState::default(),
            stencil_read_mask: 0xFF,
            stencil_write_mask: 0xFF,
            stencil_reference: 0,
        }
    }
}

// ===== COLOR BLEND =====

/// Blend factor for color blending equations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    BlendFactor,
    OneMinusBlendFactor,
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Blend state of one color attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendAttachmentState {
    pub blend_enable: bool,
    pub src_color_factor: BlendFactor,
    pub dst_color_factor: BlendFactor,
    pub color_blend_op: BlendOp,
    pub src_alpha_factor: BlendFactor,
    pub dst_alpha_factor: BlendFactor,
    pub alpha_blend_op: BlendOp,
}

impl BlendAttachmentState {
    /// Blending disabled, source overwrites destination
    pub const OVERRIDE: Self = Self {
        blend_enable: false,
        src_color_factor: BlendFactor::One,
        dst_color_factor: BlendFactor::Zero,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::Zero,
        alpha_blend_op: BlendOp::Add,
    };

    /// Classic `src * a + dst * (1 - a)` blending
    pub const ALPHA: Self = Self {
        blend_enable: true,
        src_color_factor: BlendFactor::SrcAlpha,
        dst_color_factor: BlendFactor::OneMinusSrcAlpha,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::SrcAlpha,
        dst_alpha_factor: BlendFactor::OneMinusSrcAlpha,
        alpha_blend_op: BlendOp::Add,
    };
}

/// Color blending state
#[derive(Debug, Clone, PartialEq)]
pub struct BlendState {
    pub blend_factor: [f32; 4],
    pub attachments: Vec<BlendAttachmentState>,
    pub alpha_to_coverage: bool,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            blend_factor: [0.0; 4],
            attachments: vec![BlendAttachmentState::OVERRIDE],
            alpha_to_coverage: false,
        }
    }
}

// ===== PIPELINE DESCRIPTORS =====

/// Descriptor for creating a graphics pipeline
#[derive(Debug, Clone)]
pub struct GraphicsPipelineDesc<S> {
    /// Shader stages in attach order
    pub shaders: Vec<S>,
    /// Vertex buffer layouts in binding order
    pub vertex_layouts: Vec<VertexLayoutDesc>,
    /// Resource set layouts (index = set)
    pub resource_layouts: Vec<ResourceLayoutDesc>,
    pub topology: PrimitiveTopology,
    pub rasterization: RasterizationState,
    pub depth_stencil: DepthStencilState,
    pub blend: BlendState,
}

impl<S> GraphicsPipelineDesc<S> {
    /// Description with default fixed-function state and a triangle list topology
    pub fn new(
        shaders: Vec<S>,
        vertex_layouts: Vec<VertexLayoutDesc>,
        resource_layouts: Vec<ResourceLayoutDesc>,
    ) -> Self {
        Self {
            shaders,
            vertex_layouts,
            resource_layouts,
            topology: PrimitiveTopology::TriangleList,
            rasterization: RasterizationState::default(),
            depth_stencil: DepthStencilState::default(),
            blend: BlendState::default(),
        }
    }
}

/// Descriptor for creating a compute pipeline
#[derive(Debug, Clone)]
pub struct ComputePipelineDesc<S> {
    /// The compute shader
    pub shader: S,
    /// Resource set layouts (index = set)
    pub resource_layouts: Vec<ResourceLayoutDesc>,
    /// Local work group size declared by the shader
    pub thread_group_size: [u32; 3],
}

impl<S> ComputePipelineDesc<S> {
    pub fn new(shader: S, resource_layouts: Vec<ResourceLayoutDesc>) -> Self {
        Self { shader, resource_layouts, thread_group_size: [1, 1, 1] }
    }
}

/// Graphics or compute pipeline description
#[derive(Debug, Clone)]
pub enum PipelineDesc<S> {
    Graphics(GraphicsPipelineDesc<S>),
    Compute(ComputePipelineDesc<S>),
}

impl<S> PipelineDesc<S> {
    pub fn is_compute_pipeline(&self) -> bool {
        matches!(self, PipelineDesc::Compute(_))
    }

    /// Resource set layouts, whichever the variant
    pub fn resource_layouts(&self) -> &[ResourceLayoutDesc] {
        match self {
            PipelineDesc::Graphics(desc) => &desc.resource_layouts,
            PipelineDesc::Compute(desc) => &desc.resource_layouts,
        }
    }

    /// Shaders in attach order (a single shader for compute)
    pub fn shaders(&self) -> &[S] {
        match self {
            PipelineDesc::Graphics(desc) => &desc.shaders,
            PipelineDesc::Compute(desc) => std::slice::from_ref(&desc.shader),
        }
    }
}

impl<S> From<GraphicsPipelineDesc<S>> for PipelineDesc<S> {
    fn from(desc: GraphicsPipelineDesc<S>) -> Self {
        PipelineDesc::Graphics(desc)
    }
}

impl<S> From<ComputePipelineDesc<S>> for PipelineDesc<S> {
    fn from(desc: ComputePipelineDesc<S>) -> Self {
        PipelineDesc::Compute(desc)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
