//! Unit tests for OpenGlResourceFactory

use super::*;
use crate::mock_gl_api::MockGlApi;
use crate::opengl::OpenGlContext;
use crate::opengl_extensions::GlBackend;

fn context(validation: bool) -> OpenGlContext {
    OpenGlContext::new(
        Box::new(MockGlApi::new()),
        GlExtensions::new(GlBackend::OpenGl, 4, 6, Vec::<String>::new()),
        OpenGlConfig::default().with_validation(validation),
    )
}

fn shader(factory: &OpenGlResourceFactory, stage: ShaderStage) -> Arc<OpenGlShader> {
    factory.create_shader(&ShaderDesc::new(stage, b"void main() {}")).unwrap()
}

#[test]
fn test_factory_is_send_sync_clone() {
    fn assert_send_sync_clone<T: Send + Sync + Clone>() {}
    assert_send_sync_clone::<OpenGlResourceFactory>();
}

#[test]
fn test_create_shader_applies_name_and_entry_point() {
    let ctx = context(true);
    let factory = ctx.resource_factory();
    let mut desc = ShaderDesc::new(ShaderStage::Fragment, b"void main() {}").with_name("lit_fs");
    desc.entry_point = "fs_main".to_string();

    let fs = factory.create_shader(&desc).unwrap();

    assert_eq!(fs.name().as_deref(), Some("lit_fs"));
    assert_eq!(fs.entry_point(), "fs_main");
    assert_eq!(fs.stage(), ShaderStage::Fragment);
    assert_eq!(ctx.staging_pool().outstanding(), 1);
}

#[test]
fn test_graphics_pipeline_requires_a_stage() {
    let ctx = context(true);
    let factory = ctx.resource_factory();

    let result = factory.create_graphics_pipeline(GraphicsPipelineDesc::new(Vec::new(), Vec::new(), Vec::new()));
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_graphics_pipeline_rejects_compute_stage() {
    let ctx = context(true);
    let factory = ctx.resource_factory();
    let shaders = vec![shader(&factory, ShaderStage::Vertex), shader(&factory, ShaderStage::Compute)];

    let result = factory.create_graphics_pipeline(GraphicsPipelineDesc::new(shaders, Vec::new(), Vec::new()));
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_compute_pipeline_requires_compute_shader() {
    let ctx = context(true);
    let factory = ctx.resource_factory();

    let bad = factory.create_compute_pipeline(ComputePipelineDesc::new(shader(&factory, ShaderStage::Vertex), Vec::new()));
    assert!(matches!(bad, Err(Error::InvalidResource(_))));

    let good = factory
        .create_compute_pipeline(ComputePipelineDesc::new(shader(&factory, ShaderStage::Compute), Vec::new()))
        .unwrap();
    assert!(good.is_compute_pipeline());
}

#[test]
fn test_stage_checks_skipped_without_validation() {
    let ctx = context(false);
    let factory = ctx.resource_factory();

    assert!(factory
        .create_graphics_pipeline(GraphicsPipelineDesc::new(Vec::new(), Vec::new(), Vec::new()))
        .is_ok());
}

#[test]
fn test_create_pipeline_dispatches_on_variant() {
    let ctx = context(true);
    let factory = ctx.resource_factory();

    let graphics = factory
        .create_pipeline(GraphicsPipelineDesc::new(vec![shader(&factory, ShaderStage::Vertex)], Vec::new(), Vec::new()).into())
        .unwrap();
    let compute = factory
        .create_pipeline(ComputePipelineDesc::new(shader(&factory, ShaderStage::Compute), Vec::new()).into())
        .unwrap();

    assert!(!graphics.is_compute_pipeline());
    assert!(compute.is_compute_pipeline());
}

#[test]
fn test_factory_usable_from_another_thread() {
    let ctx = context(true);
    let factory = ctx.resource_factory();

    let shader = std::thread::spawn(move || {
        factory.create_shader(&ShaderDesc::new(ShaderStage::Vertex, b"void main() {}")).unwrap()
    })
    .join()
    .unwrap();

    assert!(shader.ensure_created(&ctx).is_ok());
}
