//! Unit tests for Pipeline descriptors
//!
//! Tests vertex layout packing, fixed-function defaults and the
//! graphics/compute discriminant.

use crate::renderer::{
    BlendAttachmentState, BlendState, ComputePipelineDesc, CullMode, GraphicsPipelineDesc,
    PipelineDesc, PrimitiveTopology, RasterizationState, ResourceKind, ResourceLayoutDesc,
    ResourceLayoutElementDesc, ShaderStages, VertexElementDesc, VertexElementFormat,
    VertexLayoutDesc,
};

// ============================================================================
// VERTEX LAYOUT TESTS
// ============================================================================

#[test]
fn test_vertex_element_format_sizes() {
    assert_eq!(VertexElementFormat::Float1.size_bytes(), 4);
    assert_eq!(VertexElementFormat::Float3.size_bytes(), 12);
    assert_eq!(VertexElementFormat::Float4.size_bytes(), 16);
    assert_eq!(VertexElementFormat::Byte4Norm.size_bytes(), 4);
    assert_eq!(VertexElementFormat::Half4.size_bytes(), 8);
}

#[test]
fn test_packed_layout_assigns_offsets_in_declaration_order() {
    let layout = VertexLayoutDesc::new(vec![
        VertexElementDesc::new("Position", VertexElementFormat::Float3),
        VertexElementDesc::new("TexCoord", VertexElementFormat::Float2),
        VertexElementDesc::new("Color", VertexElementFormat::Byte4Norm),
    ]);

    assert_eq!(layout.stride, 24);
    let offsets: Vec<u32> = layout.elements.iter().map(|e| e.offset).collect();
    assert_eq!(offsets, vec![0, 12, 20]);
    assert_eq!(layout.instance_step_rate, 0);
}

#[test]
fn test_explicit_stride_keeps_offsets() {
    let layout = VertexLayoutDesc::with_stride(
        32,
        vec![VertexElementDesc::with_offset("Position", VertexElementFormat::Float3, 4)],
    )
    .per_instance(1);

    assert_eq!(layout.stride, 32);
    assert_eq!(layout.elements[0].offset, 4);
    assert_eq!(layout.instance_step_rate, 1);
}

// ============================================================================
// FIXED-FUNCTION DEFAULTS
// ============================================================================

#[test]
fn test_rasterization_defaults() {
    let state = RasterizationState::default();
    assert_eq!(state.cull_mode, CullMode::Back);
    assert!(state.depth_clip_enable);
    assert!(!state.scissor_test_enable);
}

#[test]
fn test_blend_defaults_to_single_override_attachment() {
    let blend = BlendState::default();
    assert_eq!(blend.attachments, vec![BlendAttachmentState::OVERRIDE]);
    assert!(!blend.attachments[0].blend_enable);
    assert!(BlendAttachmentState::ALPHA.blend_enable);
}

// ============================================================================
// PIPELINE DESC TESTS
// ============================================================================

fn one_layout() -> Vec<ResourceLayoutDesc> {
    vec![ResourceLayoutDesc::new(vec![ResourceLayoutElementDesc::new(
        "Params",
        ResourceKind::UniformBuffer,
        ShaderStages::COMPUTE,
    )])]
}

#[test]
fn test_graphics_desc_is_not_compute() {
    let desc: PipelineDesc<&str> =
        GraphicsPipelineDesc::new(vec!["vs", "fs"], Vec::new(), one_layout()).into();

    assert!(!desc.is_compute_pipeline());
    assert_eq!(desc.shaders(), &["vs", "fs"]);
    assert_eq!(desc.resource_layouts().len(), 1);
    if let PipelineDesc::Graphics(g) = &desc {
        assert_eq!(g.topology, PrimitiveTopology::TriangleList);
    }
}

#[test]
fn test_compute_desc_exposes_single_shader() {
    let desc: PipelineDesc<&str> = ComputePipelineDesc::new("cs", one_layout()).into();

    assert!(desc.is_compute_pipeline());
    assert_eq!(desc.shaders(), &["cs"]);
    assert_eq!(desc.resource_layouts()[0].elements[0].name, "Params");
}
