// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use prism_core::device::{
    BackendKind, BufferId, CompiledShader, Device, DeviceContext, GraphicsBackend, InputLayoutId,
    SamplerId, ScissorRect, StateApplier, TextureViewId, VertexBufferBinding, Viewport,
};
use prism_core::error::{ContextError, ShaderError};
use prism_core::format::{CullMode, ExplicitFormat, FillMode, PrimitiveTopology};
use prism_core::settings::CompilerSettings;
use prism_core::shader::{
    meta_keys, parse_shader_description, CompileFlags, CompileOutput, CompileRequest,
    FunctionDecl, IoVariable, LayoutEntry, MatrixPacking, ShaderBytecode, ShaderCodeGenerator,
    ShaderCompiler, ShaderReflection, ShaderReflectionBuilder, ShaderStage, ShaderValueType,
    SourceDocument, SourceItem, VertexLayoutElement,
};
use std::cell::RefCell;
use std::sync::Arc;

#[derive(Default)]
struct RecordingCompiler {
    calls: RefCell<Vec<(String, CompileFlags)>>,
    fail_with: Option<String>,
}

impl ShaderCompiler for RecordingCompiler {
    fn name(&self) -> &str {
        "recording"
    }

    fn compile(
        &self,
        request: &CompileRequest<'_>,
        flags: &CompileFlags,
    ) -> Result<CompileOutput, String> {
        self.calls
            .borrow_mut()
            .push((request.profile.to_string(), *flags));
        match &self.fail_with {
            Some(diagnostic) => Err(diagnostic.clone()),
            None => Ok(CompileOutput {
                bytecode: ShaderBytecode::new(request.source.as_bytes().to_vec()),
                warnings: Vec::new(),
            }),
        }
    }
}

#[derive(Default)]
struct MockBackend {
    compiler: RecordingCompiler,
    no_compute: bool,
}

impl ShaderCodeGenerator for MockBackend {
    fn backend(&self) -> BackendKind {
        BackendKind::Direct3D11
    }

    fn supports_stage(&self, stage: ShaderStage) -> bool {
        !(self.no_compute && stage == ShaderStage::Compute)
    }

    fn build_document(&self, reflection: &ShaderReflection) -> Result<SourceDocument, ShaderError> {
        let mut document = SourceDocument::new();
        document.comment(reflection.name());
        document.push(SourceItem::Function(FunctionDecl {
            attributes: Vec::new(),
            return_type: "void".into(),
            name: "main".into(),
            params: Vec::new(),
            body: reflection.code_main().to_vec(),
        }));
        Ok(document)
    }
}

impl GraphicsBackend for MockBackend {
    type LayoutPartial = (String, u32);
    type LayoutElement = (String, u32, ExplicitFormat);

    fn source_extension(&self) -> &'static str {
        "hlsl"
    }

    fn resolve_profile(&self, reflection: &ShaderReflection) -> Result<String, ShaderError> {
        Ok(reflection.profile().to_string())
    }

    fn compiler(&self) -> &dyn ShaderCompiler {
        &self.compiler
    }

    fn layout_partial(
        &self,
        variable: &IoVariable,
        element_index: u32,
        _layout_index: usize,
    ) -> Result<Self::LayoutPartial, ShaderError> {
        Ok((variable.name.to_uppercase(), element_index))
    }

    fn layout_element(
        &self,
        entry: &LayoutEntry<Self::LayoutPartial>,
        element: &VertexLayoutElement,
    ) -> Result<Self::LayoutElement, ShaderError> {
        Ok((entry.partial.0.clone(), entry.partial.1, element.format))
    }
}

fn vertex_reflection() -> Arc<ShaderReflection> {
    let text = "\
%meta
Name = Skinned
Profile = vs_5_0
%input
float3 Position
float4x4 World
unused float2 Uv
%output
float4 Position : SV_Position
%code_main
    OUTPUT(Position) = mul(float4(INPUT(Position), 1), INPUT(World));
";
    Arc::new(parse_shader_description(text).unwrap())
}

fn simple(name: &str, stage: ShaderStage) -> ShaderReflectionBuilder {
    ShaderReflectionBuilder::new(name, stage)
}

#[test]
fn creating_a_shader_compiles_column_major() {
    let mut device = Device::new(MockBackend::default(), CompilerSettings::default());
    let id = device.create_vertex_shader(vertex_reflection()).unwrap();

    let shader = device.shader(id).unwrap();
    assert_eq!(shader.stage, ShaderStage::Vertex);
    assert_eq!(shader.profile, "vs_5_0");
    assert!(shader.source_text.contains("OUTPUT(Position)"));
    assert_eq!(shader.bytecode.as_bytes(), shader.source_text.as_bytes());

    let calls = device.backend().compiler.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.matrix_packing, MatrixPacking::ColumnMajor);
}

#[test]
fn unsupported_stage_never_reaches_the_compiler() {
    let backend = MockBackend {
        no_compute: true,
        ..Default::default()
    };
    let mut device = Device::new(backend, CompilerSettings::default());
    let reflection = simple("Blur", ShaderStage::Compute)
        .meta(meta_keys::THREAD_COUNT_X, 8)
        .meta(meta_keys::THREAD_COUNT_Y, 8)
        .meta(meta_keys::THREAD_COUNT_Z, 1)
        .build()
        .unwrap();
    let error = device
        .create_compute_shader(Arc::new(reflection))
        .unwrap_err();
    assert_eq!(
        error,
        ShaderError::StageUnsupported {
            backend: BackendKind::Direct3D11,
            stage: ShaderStage::Compute
        }
    );
    assert!(device.backend().compiler.calls.borrow().is_empty());
    assert_eq!(device.shader_count(), 0);
}

#[test]
fn reflection_of_another_stage_is_malformed() {
    let mut device = Device::new(MockBackend::default(), CompilerSettings::default());
    let error = device.create_pixel_shader(vertex_reflection()).unwrap_err();
    assert!(matches!(error, ShaderError::MalformedReflection { .. }));
}

#[test]
fn missing_stage_metadata_fails_before_compiling() {
    let mut device = Device::new(MockBackend::default(), CompilerSettings::default());
    let reflection = simple("Sprites", ShaderStage::Geometry).build().unwrap();
    let error = device
        .create_geometry_shader(Arc::new(reflection))
        .unwrap_err();
    assert!(matches!(error, ShaderError::MalformedReflection { .. }));
    assert!(device.backend().compiler.calls.borrow().is_empty());
}

#[test]
fn compiler_failure_carries_the_generated_source() {
    let backend = MockBackend {
        compiler: RecordingCompiler {
            fail_with: Some("error X3004: undeclared identifier".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut device = Device::new(backend, CompilerSettings::default());
    match device.create_vertex_shader(vertex_reflection()) {
        Err(ShaderError::CompilationFailed {
            shader_name,
            source_text,
            diagnostic,
        }) => {
            assert_eq!(shader_name, "Skinned");
            assert!(source_text.contains("void main()"));
            assert!(diagnostic.contains("X3004"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn input_layouts_follow_the_draft() {
    let mut device = Device::new(MockBackend::default(), CompilerSettings::default());
    let id = device.create_vertex_shader(vertex_reflection()).unwrap();
    // float3 Position + four float4x4 columns; the unused Uv takes no slot.
    assert_eq!(device.required_layout_len(id).unwrap(), 5);

    let mut elements = vec![VertexLayoutElement::per_vertex(
        ExplicitFormat::R32G32B32Float,
        0,
        0,
    )];
    let short = device.create_input_layout(id, &elements).unwrap_err();
    assert_eq!(
        short,
        ContextError::Shader(ShaderError::LayoutLengthMismatch {
            shader: "Skinned".into(),
            expected: 5,
            actual: 1
        })
    );

    for column in 0..4 {
        elements.push(VertexLayoutElement::per_instance(
            ExplicitFormat::R32G32B32A32Float,
            1,
            column * 16,
            1,
        ));
    }
    let layout = device.create_input_layout(id, &elements).unwrap();
    let native = device.input_layout(layout).unwrap();
    assert_eq!(native[0], ("POSITION".into(), 0, ExplicitFormat::R32G32B32Float));
    assert_eq!(native[4], ("WORLD".into(), 3, ExplicitFormat::R32G32B32A32Float));

    device.destroy_shader(id).unwrap();
    assert!(device.input_layout(layout).is_none());
    assert_eq!(
        device.destroy_shader(id),
        Err(ContextError::UnknownShader(id))
    );
}

#[test]
fn pixel_shaders_have_no_input_layout() {
    let mut device = Device::new(MockBackend::default(), CompilerSettings::default());
    let id = device
        .create_pixel_shader(Arc::new(simple("Flat", ShaderStage::Pixel).build().unwrap()))
        .unwrap();
    assert!(matches!(
        device.create_input_layout(id, &[]),
        Err(ContextError::StageMismatch { .. })
    ));
}

#[derive(Default)]
struct RecordingApplier {
    calls: Vec<String>,
    reject_uavs: bool,
}

impl StateApplier for RecordingApplier {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<(), ShaderError> {
        self.calls.push(format!("topology {topology:?}"));
        Ok(())
    }

    fn set_input_layout(&mut self, layout: Option<InputLayoutId>) -> Result<(), ShaderError> {
        self.calls.push(format!("layout {layout:?}"));
        Ok(())
    }

    fn set_vertex_buffers(
        &mut self,
        first_slot: usize,
        buffers: &[Option<VertexBufferBinding>],
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("vertex buffers {first_slot}+{}", buffers.len()));
        Ok(())
    }

    fn set_index_buffer(
        &mut self,
        _buffer: Option<&prism_core::device::IndexBufferBinding>,
    ) -> Result<(), ShaderError> {
        self.calls.push("index buffer".into());
        Ok(())
    }

    fn set_shader(
        &mut self,
        stage: ShaderStage,
        shader: Option<&CompiledShader>,
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("shader {stage:?} {:?}", shader.map(|s| s.name.as_str())));
        Ok(())
    }

    fn set_uniform_buffers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        buffers: &[Option<BufferId>],
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("ubuffers {stage:?} {first_slot}+{}", buffers.len()));
        Ok(())
    }

    fn set_samplers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        samplers: &[Option<SamplerId>],
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("samplers {stage:?} {first_slot}+{}", samplers.len()));
        Ok(())
    }

    fn set_srvs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("srvs {stage:?} {first_slot}+{}", views.len()));
        Ok(())
    }

    fn set_uavs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError> {
        if self.reject_uavs && views.iter().any(Option::is_some) {
            return Err(ShaderError::unsupported(BackendKind::Direct3D9, "read-write views"));
        }
        self.calls
            .push(format!("uavs {stage:?} {first_slot}+{}", views.len()));
        Ok(())
    }

    fn set_rasterizer(&mut self, cull: CullMode, fill: FillMode) -> Result<(), ShaderError> {
        self.calls.push(format!("rasterizer {cull:?} {fill:?}"));
        Ok(())
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), ShaderError> {
        self.calls.push(format!("viewports {}", viewports.len()));
        Ok(())
    }

    fn set_scissor_rects(&mut self, rects: &[ScissorRect]) -> Result<(), ShaderError> {
        self.calls.push(format!("scissors {}", rects.len()));
        Ok(())
    }

    fn set_render_targets(
        &mut self,
        targets: &[Option<TextureViewId>],
        depth_stencil: Option<TextureViewId>,
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("targets {} {depth_stencil:?}", targets.len()));
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), ShaderError> {
        self.calls.push(format!("draw {vertex_count} {start_vertex}"));
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ShaderError> {
        self.calls
            .push(format!("draw_indexed {index_count} {start_index} {base_vertex}"));
        Ok(())
    }

    fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<(), ShaderError> {
        self.calls.push(format!("dispatch {x} {y} {z}"));
        Ok(())
    }
}

fn device_with_pipeline() -> (Device<MockBackend>, DeviceContext) {
    let device = Device::new(MockBackend::default(), CompilerSettings::default());
    (device, DeviceContext::new())
}

fn hull(device: &mut Device<MockBackend>, control_points: u32) -> Arc<CompiledShader> {
    let reflection = simple("Patch", ShaderStage::Hull)
        .meta(meta_keys::DOMAIN, "Triangle")
        .meta(meta_keys::PARTITIONING, "FractionalOdd")
        .meta(meta_keys::OUTPUT_TOPOLOGY, "TriangleCw")
        .meta(meta_keys::INPUT_CONTROL_POINTS, control_points)
        .meta(meta_keys::OUTPUT_CONTROL_POINTS, control_points)
        .build()
        .unwrap();
    let id = device.create_hull_shader(Arc::new(reflection)).unwrap();
    device.shader(id).unwrap()
}

fn domain(device: &mut Device<MockBackend>) -> Arc<CompiledShader> {
    let reflection = simple("Surface", ShaderStage::Domain)
        .meta(meta_keys::DOMAIN, "Triangle")
        .meta(meta_keys::INPUT_CONTROL_POINTS, 3)
        .build()
        .unwrap();
    let id = device.create_domain_shader(Arc::new(reflection)).unwrap();
    device.shader(id).unwrap()
}

fn geometry(device: &mut Device<MockBackend>, input: &str) -> Arc<CompiledShader> {
    let reflection = simple("Expand", ShaderStage::Geometry)
        .meta(meta_keys::MAX_VERTEX_COUNT, 4)
        .meta(meta_keys::INPUT_PRIMITIVE, input)
        .meta(meta_keys::OUTPUT_PRIMITIVE, "Triangle")
        .build()
        .unwrap();
    let id = device.create_geometry_shader(Arc::new(reflection)).unwrap();
    device.shader(id).unwrap()
}

#[test]
fn draw_requires_a_vertex_shader() {
    let mut context = DeviceContext::new();
    let mut applier = RecordingApplier::default();
    assert_eq!(
        context.draw(&mut applier, 3, 0),
        Err(ContextError::NoShaderBound(ShaderStage::Vertex))
    );
    assert!(applier.calls.is_empty());
}

#[test]
fn first_draw_flushes_everything_then_only_changes() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    let mut applier = RecordingApplier::default();
    context.draw(&mut applier, 3, 0).unwrap();
    assert!(applier.calls.contains(&"topology TriangleList".to_string()));
    assert!(applier
        .calls
        .contains(&"shader Vertex Some(\"Skinned\")".to_string()));
    assert_eq!(applier.calls.last().unwrap(), "draw 3 0");

    let mut second = RecordingApplier::default();
    context
        .set_samplers(ShaderStage::Pixel, 3, &[Some(SamplerId(1))])
        .unwrap();
    context
        .set_samplers(ShaderStage::Pixel, 1, &[Some(SamplerId(2))])
        .unwrap();
    context.draw(&mut second, 6, 0).unwrap();
    assert_eq!(second.calls, ["samplers Pixel 1+3", "draw 6 0"]);
}

#[test]
fn binding_a_shader_to_the_wrong_stage_fails() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    let error = context
        .set_shader(ShaderStage::Pixel, device.shader(vs))
        .unwrap_err();
    assert_eq!(
        error,
        ContextError::StageMismatch {
            id: vs,
            expected: ShaderStage::Vertex,
            bound_to: ShaderStage::Pixel
        }
    );
}

#[test]
fn hull_shader_requires_matching_patch_list() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    let hs = hull(&mut device, 3);
    let ds = domain(&mut device);
    context.set_shader(ShaderStage::Hull, Some(hs)).unwrap();
    context.set_shader(ShaderStage::Domain, Some(ds)).unwrap();

    let mut applier = RecordingApplier::default();
    context.set_primitive_topology(PrimitiveTopology::TriangleList);
    assert!(matches!(
        context.draw(&mut applier, 3, 0),
        Err(ContextError::IncompatibleTopology { .. })
    ));
    context.set_primitive_topology(PrimitiveTopology::PatchList(4));
    assert!(context.validate_draw().is_err());
    context.set_primitive_topology(PrimitiveTopology::PatchList(3));
    context.draw(&mut applier, 3, 0).unwrap();
}

#[test]
fn hull_without_domain_is_incomplete() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    context
        .set_shader(ShaderStage::Hull, Some(hull(&mut device, 3)))
        .unwrap();
    context.set_primitive_topology(PrimitiveTopology::PatchList(3));
    assert_eq!(
        context.validate_draw(),
        Err(ContextError::NoShaderBound(ShaderStage::Domain))
    );
}

#[test]
fn geometry_shader_primitive_must_match_topology() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    context
        .set_shader(ShaderStage::Geometry, Some(geometry(&mut device, "Point")))
        .unwrap();

    context.set_primitive_topology(PrimitiveTopology::TriangleStrip);
    assert!(matches!(
        context.validate_draw(),
        Err(ContextError::IncompatibleTopology { .. })
    ));
    context.set_primitive_topology(PrimitiveTopology::PointList);
    assert!(context.validate_draw().is_ok());
}

#[test]
fn patch_list_without_hull_is_rejected() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    context.set_primitive_topology(PrimitiveTopology::PatchList(3));
    assert!(matches!(
        context.validate_draw(),
        Err(ContextError::IncompatibleTopology { .. })
    ));
}

#[test]
fn dispatch_requires_a_compute_shader() {
    let (mut device, mut context) = device_with_pipeline();
    let mut applier = RecordingApplier::default();
    assert_eq!(
        context.dispatch(&mut applier, 1, 1, 1),
        Err(ContextError::NoShaderBound(ShaderStage::Compute))
    );

    let reflection = simple("Blur", ShaderStage::Compute)
        .meta(meta_keys::THREAD_COUNT_X, 8)
        .meta(meta_keys::THREAD_COUNT_Y, 8)
        .meta(meta_keys::THREAD_COUNT_Z, 1)
        .build()
        .unwrap();
    let cs = device.create_compute_shader(Arc::new(reflection)).unwrap();
    context
        .set_shader(ShaderStage::Compute, device.shader(cs))
        .unwrap();
    context
        .set_uavs(ShaderStage::Compute, 0, &[Some(TextureViewId(4))])
        .unwrap();
    context.dispatch(&mut applier, 16, 16, 1).unwrap();
    assert_eq!(applier.calls.last().unwrap(), "dispatch 16 16 1");
    assert!(!applier.calls.iter().any(|c| c.starts_with("topology")));
}

#[test]
fn uavs_are_limited_to_pixel_and_compute() {
    let mut context = DeviceContext::new();
    assert!(matches!(
        context.set_uavs(ShaderStage::Vertex, 0, &[Some(TextureViewId(1))]),
        Err(ContextError::SlotOutOfRange { .. })
    ));
    assert!(context
        .set_uavs(ShaderStage::Pixel, 0, &[Some(TextureViewId(1))])
        .is_ok());
}

#[test]
fn indexed_draw_needs_an_index_buffer() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    let mut applier = RecordingApplier::default();
    assert_eq!(
        context.draw_indexed(&mut applier, 6, 0, 0),
        Err(ContextError::NoIndexBuffer)
    );
}

#[test]
fn vertex_values_feed_the_layout_entries() {
    let reflection = simple("Plain", ShaderStage::Vertex)
        .input(IoVariable::new(ShaderValueType::float(2), "Uv"))
        .build()
        .unwrap();
    let mut device = Device::new(MockBackend::default(), CompilerSettings::default());
    let id = device.create_vertex_shader(Arc::new(reflection)).unwrap();
    let error = device
        .create_input_layout(
            id,
            &[VertexLayoutElement::per_vertex(ExplicitFormat::R32G32Uint, 0, 0)],
        )
        .unwrap_err();
    assert!(matches!(
        error,
        ContextError::Shader(ShaderError::UnsupportedValue { .. })
    ));
}

#[test]
fn rejected_bindings_are_retried_on_the_next_draw() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    context
        .set_uavs(ShaderStage::Pixel, 0, &[Some(TextureViewId(2))])
        .unwrap();

    let mut applier = RecordingApplier {
        reject_uavs: true,
        ..Default::default()
    };
    for _ in 0..2 {
        assert!(matches!(
            context.draw(&mut applier, 3, 0),
            Err(ContextError::Shader(ShaderError::UnsupportedValue { .. }))
        ));
    }
    assert!(!applier.calls.iter().any(|c| c.starts_with("draw")));

    context.set_uavs(ShaderStage::Pixel, 0, &[None]).unwrap();
    context.draw(&mut applier, 3, 0).unwrap();
    assert!(applier.calls.contains(&"uavs Pixel 0+8".to_string()));
    assert_eq!(applier.calls.last().unwrap(), "draw 3 0");
}

#[test]
fn destroyed_shaders_cannot_be_drawn() {
    let (mut device, mut context) = device_with_pipeline();
    let vs = device.create_vertex_shader(vertex_reflection()).unwrap();
    context
        .set_shader(ShaderStage::Vertex, device.shader(vs))
        .unwrap();
    assert_eq!(context.stage(ShaderStage::Vertex).shader_id(), Some(vs));

    device.destroy_shader(vs).unwrap();
    assert_eq!(device.shader_count(), 0);
    assert!(matches!(
        context.stage(ShaderStage::Vertex).shader(),
        Err(ContextError::UnknownShader(id)) if id == vs
    ));
    let mut applier = RecordingApplier::default();
    assert_eq!(
        context.draw(&mut applier, 3, 0),
        Err(ContextError::UnknownShader(vs))
    );
    assert!(applier.calls.is_empty());

    context.set_shader(ShaderStage::Vertex, None).unwrap();
    assert_eq!(
        context.draw(&mut applier, 3, 0),
        Err(ContextError::NoShaderBound(ShaderStage::Vertex))
    );
}

#[test]
fn destroyed_compute_shaders_cannot_be_dispatched() {
    let (mut device, mut context) = device_with_pipeline();
    let reflection = simple("Blur", ShaderStage::Compute)
        .meta(meta_keys::THREAD_COUNT_X, 8)
        .meta(meta_keys::THREAD_COUNT_Y, 8)
        .meta(meta_keys::THREAD_COUNT_Z, 1)
        .build()
        .unwrap();
    let cs = device.create_compute_shader(Arc::new(reflection)).unwrap();
    context
        .set_shader(ShaderStage::Compute, device.shader(cs))
        .unwrap();
    device.destroy_shader(cs).unwrap();

    let mut applier = RecordingApplier::default();
    assert_eq!(
        context.dispatch(&mut applier, 1, 1, 1),
        Err(ContextError::UnknownShader(cs))
    );
    assert!(applier.calls.is_empty());
}
