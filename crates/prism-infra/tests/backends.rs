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
    BackendKind, BufferId, Device, DeviceContext, GraphicsBackend, IndexBufferBinding, ShaderId,
    TextureViewId, VertexBufferBinding,
};
use prism_core::error::{ContextError, ShaderError};
use prism_core::format::{BlendFactor, ExplicitFormat, IndexFormat, PrimitiveTopology};
use prism_core::settings::CompilerSettings;
use prism_core::shader::{
    parse_shader_description, CompileFlags, CompileOutput, CompileRequest, ShaderBytecode,
    ShaderCompiler, ShaderReflection, ShaderStage, VertexLayoutElement,
};
use prism_infra::d3d11::native::{
    D3d11Blend, D3d11InputClassification, D3d11PrimitiveTopology, DxgiFormat,
};
use prism_infra::d3d11::{D3d11Backend, D3d11Command, D3d11StateApplier, IntoD3d11};
use prism_infra::d3d9::native::{D3dBlend, D3dDeclType, D3dDeclUsage, D3dPrimitiveType};
use prism_infra::d3d9::{D3d9Backend, D3d9Command, D3d9StateApplier, IntoD3d9};
use prism_infra::opengl::native::{GlBlendFactor, GlPrimitive, GlType};
use prism_infra::opengl::{
    GlCommand, GlStateApplier, GlVertexFormat, GlslVersion, IntoGl, NagaGlslCompiler,
    OpenGlBackend,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Echoes the source as bytecode and records the profiles it was asked for.
#[derive(Clone, Default)]
struct RecordingCompiler {
    profiles: Rc<RefCell<Vec<String>>>,
}

impl ShaderCompiler for RecordingCompiler {
    fn name(&self) -> &str {
        "recording"
    }

    fn compile(
        &self,
        request: &CompileRequest<'_>,
        _flags: &CompileFlags,
    ) -> Result<CompileOutput, String> {
        self.profiles.borrow_mut().push(request.profile.to_string());
        Ok(CompileOutput {
            bytecode: ShaderBytecode::new(request.source.as_bytes().to_vec()),
            warnings: Vec::new(),
        })
    }
}

const SPRITE: &str = "\
%meta
Name = Sprite
Profile = ps_4_0
%input
float4 Position : SV_Position
float2 TexCoord
unused float3 Leftover
%output
float4 Color : SV_Target
%ubuffers
ubuffer Params : 0
float Exposure
%samplers
sampler Linear : 0
%srvs
Texture2D<float4> Atlas : 1
%fixed_sampling
Atlas : Linear
%code_main
    OUTPUT(Color) = SAMPLE_Atlas(INPUT(TexCoord)) * Exposure;
";

const SKINNED: &str = "\
%meta
Name = Skinned
Stage = Vertex
%input
float3 Position : POSITION
unused float3 Normal : NORMAL
float4x4 World
float2 Uv
%output
float4 Position : SV_Position
float2 Uv
%code_main
    OUTPUT(Position) = mul(float4(INPUT(Position), 1), INPUT(World));
    OUTPUT(Uv) = INPUT(Uv);
";

const BLUR: &str = "\
%meta
Name = Blur
Stage = Compute
ThreadCountX = 8
ThreadCountY = 8
ThreadCountZ = 1
%input
uint3 Id : SV_DispatchThreadID
%code_main
    uint x = INPUT(Id).x;
";

fn parse(text: &str) -> Arc<ShaderReflection> {
    Arc::new(parse_shader_description(text).unwrap())
}

fn skinned_layout() -> Vec<VertexLayoutElement> {
    let mut elements = vec![VertexLayoutElement::per_vertex(
        ExplicitFormat::R32G32B32Float,
        0,
        0,
    )];
    for column in 0..4 {
        elements.push(VertexLayoutElement::per_instance(
            ExplicitFormat::R32G32B32A32Float,
            1,
            column * 16,
            1,
        ));
    }
    elements.push(VertexLayoutElement::per_vertex(
        ExplicitFormat::R32G32Float,
        0,
        12,
    ));
    elements
}

fn create_skinned<B: GraphicsBackend>(backend: B) -> (Device<B>, ShaderId) {
    let mut device = Device::new(backend, CompilerSettings::default());
    let id = device.create_vertex_shader(parse(SKINNED)).unwrap();
    (device, id)
}

fn assert_layout_length_is_checked<B: GraphicsBackend>(backend: B) {
    let (mut device, id) = create_skinned(backend);
    assert_eq!(device.required_layout_len(id).unwrap(), 6);
    let mut elements = skinned_layout();
    elements.pop();
    assert_eq!(
        device.create_input_layout(id, &elements).unwrap_err(),
        ContextError::Shader(ShaderError::LayoutLengthMismatch {
            shader: "Skinned".into(),
            expected: 6,
            actual: 5
        })
    );
}

#[test]
fn d3d11_pixel_pipeline_end_to_end() {
    let compiler = RecordingCompiler::default();
    let profiles = compiler.profiles.clone();
    let mut device = Device::new(
        D3d11Backend::with_compiler(compiler),
        CompilerSettings::default(),
    );
    let id = device.create_pixel_shader(parse(SPRITE)).unwrap();
    let shader = device.shader(id).unwrap();

    assert_eq!(shader.profile, "ps_4_0");
    assert_eq!(*profiles.borrow(), ["ps_4_0"]);
    let source = &shader.source_text;
    assert!(source.contains("cbuffer Params : register(b0)"));
    assert!(source.contains("Texture2D<float4> Atlas : register(t1);"));
    assert!(source.contains("Atlas.Sample(Linear, uv)"));
    assert!(source.contains("float2 TexCoord : TEXCOORD;"));
    assert!(!source.contains("Leftover"));
    assert_eq!(shader.bytecode.as_bytes(), source.as_bytes());
}

#[test]
fn d3d9_downgrades_the_profile_and_flattens_resources() {
    let compiler = RecordingCompiler::default();
    let profiles = compiler.profiles.clone();
    let mut device = Device::new(
        D3d9Backend::with_compiler(compiler),
        CompilerSettings::default(),
    );
    let id = device.create_pixel_shader(parse(SPRITE)).unwrap();
    let shader = device.shader(id).unwrap();

    assert_eq!(shader.profile, "ps_3_0");
    assert_eq!(*profiles.borrow(), ["ps_3_0"]);
    let source = &shader.source_text;
    assert!(source.contains("float Exposure : register(c0);"));
    assert!(source.contains("sampler2D Atlas : register(s1);"));
    assert!(source.contains("float2 TexCoord : TEXCOORD0;"));
    assert!(!source.contains("SamplerState"));
    assert!(!source.contains("Leftover"));
}

#[test]
fn opengl_falls_back_to_the_configured_glsl_version() {
    let compiler = RecordingCompiler::default();
    let profiles = compiler.profiles.clone();
    let mut device = Device::new(
        OpenGlBackend::with_compiler(GlslVersion::V460, compiler),
        CompilerSettings::default(),
    );
    let id = device.create_pixel_shader(parse(SPRITE)).unwrap();
    let shader = device.shader(id).unwrap();

    assert_eq!(shader.profile, "460");
    assert_eq!(*profiles.borrow(), ["460"]);
    assert!(shader.source_text.starts_with("#version 460"));
    assert!(!shader.source_text.contains("Leftover"));
}

#[test]
fn compute_on_d3d9_never_reaches_the_compiler() {
    let compiler = RecordingCompiler::default();
    let profiles = compiler.profiles.clone();
    let mut device = Device::new(
        D3d9Backend::with_compiler(compiler),
        CompilerSettings::default(),
    );
    assert_eq!(
        device.create_compute_shader(parse(BLUR)).unwrap_err(),
        ShaderError::StageUnsupported {
            backend: BackendKind::Direct3D9,
            stage: ShaderStage::Compute
        }
    );
    assert!(profiles.borrow().is_empty());
    assert_eq!(device.shader_count(), 0);
}

#[test]
fn tessellation_factor_lengths_match_across_the_patch_boundary() {
    let hull = "\
%meta
Name = Patch
Profile = hs_5_0
Domain = Triangle
Partitioning = Integer
OutputTopology = TriangleCw
InputControlPoints = 3
OutputControlPoints = 3
%input
float3 Position
%output
float3 Position
%output_patch
float Edges : SV_TessFactor
float Inside : SV_InsideTessFactor
";
    let domain = "\
%meta
Name = Surface
Profile = ds_5_0
Domain = Triangle
InputControlPoints = 3
%input
float3 Position
%input_patch
float Edges : SV_TessFactor
float Inside : SV_InsideTessFactor
%output
float4 Position : SV_Position
";
    let mut device = Device::new(
        D3d11Backend::with_compiler(RecordingCompiler::default()),
        CompilerSettings::default(),
    );
    let hs = device.create_hull_shader(parse(hull)).unwrap();
    let ds = device.create_domain_shader(parse(domain)).unwrap();
    for id in [hs, ds] {
        let source = &device.shader(id).unwrap().source_text;
        assert!(source.contains("float Edges[3] : SV_TessFactor;"), "{source}");
        assert!(source.contains("float Inside[1] : SV_InsideTessFactor;"), "{source}");
    }
}

#[test]
fn geometry_streams_get_one_parameter_each() {
    let text = "\
%meta
Name = Split
Profile = gs_5_0
MaxVertexCount = 6
InputPrimitive = Triangle
OutputPrimitive = Point
%input
float4 Position : SV_Position
%output_stream Front
float4 Position : SV_Position
%output_stream Back
float4 Position : SV_Position
float2 Motion
";
    let mut device = Device::new(
        D3d11Backend::with_compiler(RecordingCompiler::default()),
        CompilerSettings::default(),
    );
    let id = device.create_geometry_shader(parse(text)).unwrap();
    let shader = device.shader(id).unwrap();
    let source = &shader.source_text;
    assert!(source.contains("inout PointStream<GS_Output0> outputStream0"));
    assert!(source.contains("inout PointStream<GS_Output1> outputStream1"));
    assert!(source.contains("[maxvertexcount(6)]"));
    assert!(matches!(
        shader.metadata,
        prism_core::shader::ShaderMetadata::Geometry {
            stream_count: 2,
            ..
        }
    ));
}

#[test]
fn every_backend_checks_the_layout_length() {
    assert_layout_length_is_checked(D3d11Backend::with_compiler(RecordingCompiler::default()));
    assert_layout_length_is_checked(D3d9Backend::with_compiler(RecordingCompiler::default()));
    assert_layout_length_is_checked(OpenGlBackend::with_compiler(
        GlslVersion::V450,
        RecordingCompiler::default(),
    ));
}

#[test]
fn d3d11_input_layout_uses_semantics() {
    let (mut device, id) =
        create_skinned(D3d11Backend::with_compiler(RecordingCompiler::default()));
    let layout = device.create_input_layout(id, &skinned_layout()).unwrap();
    let native = device.input_layout(layout).unwrap();

    assert_eq!(native[0].semantic_name, "POSITION");
    assert_eq!(native[0].format, DxgiFormat::R32G32B32_FLOAT);
    assert_eq!(native[4].semantic_name, "WORLD");
    assert_eq!(native[4].semantic_index, 3);
    assert_eq!(native[4].aligned_byte_offset, 48);
    assert_eq!(
        native[4].input_slot_class,
        D3d11InputClassification::PER_INSTANCE_DATA
    );
    assert_eq!(native[5].semantic_name, "UV");
}

#[test]
fn d3d9_declaration_numbers_unnamed_inputs_by_position() {
    let (mut device, id) =
        create_skinned(D3d9Backend::with_compiler(RecordingCompiler::default()));
    let layout = device.create_input_layout(id, &skinned_layout()).unwrap();
    let native = device.input_layout(layout).unwrap();

    assert_eq!(native[0].usage, D3dDeclUsage::POSITION);
    assert_eq!(native[0].decl_type, D3dDeclType::FLOAT3);
    assert_eq!(native[1].usage, D3dDeclUsage::TEXCOORD);
    assert_eq!(native[1].usage_index, 1);
    assert_eq!(native[1].stream, 1);
    assert_eq!(native[5].usage_index, 5);
    assert_eq!(native[5].offset, 12);
}

#[test]
fn opengl_attributes_follow_the_generated_locations() {
    let (mut device, id) = create_skinned(OpenGlBackend::with_compiler(
        GlslVersion::V450,
        RecordingCompiler::default(),
    ));
    let source = device.shader(id).unwrap().source_text.clone();
    assert!(source.contains("layout(location = 5) in vec2 in_Uv;"), "{source}");

    let layout = device.create_input_layout(id, &skinned_layout()).unwrap();
    let native = device.input_layout(layout).unwrap();
    let locations: Vec<u32> = native.iter().map(|attribute| attribute.location).collect();
    assert_eq!(locations, [0, 1, 2, 3, 4, 5]);
    assert_eq!(native[2].divisor, 1);
    assert_eq!(native[2].binding, 1);
    assert_eq!(native[5].format.size, 2);
    assert_eq!(native[5].format.ty, GlType::FLOAT);
}

#[test]
fn translation_tables_agree_on_common_values() {
    let dxgi: DxgiFormat = ExplicitFormat::R32G32B32A32Float.into_d3d11().unwrap();
    assert_eq!(dxgi, DxgiFormat::R32G32B32A32_FLOAT);
    let decl: D3dDeclType = ExplicitFormat::R32G32B32A32Float.into_d3d9().unwrap();
    assert_eq!(decl, D3dDeclType::FLOAT4);
    let attribute: GlVertexFormat = ExplicitFormat::R32G32B32A32Float.into_gl().unwrap();
    assert_eq!((attribute.size, attribute.ty), (4, GlType::FLOAT));
    assert!(!attribute.normalized && !attribute.integer);

    let blend: D3d11Blend = BlendFactor::Src1Color.into_d3d11().unwrap();
    assert_eq!(blend, D3d11Blend::SRC1_COLOR);
    let blend: GlBlendFactor = BlendFactor::Src1Color.into_gl().unwrap();
    assert_eq!(blend, GlBlendFactor::SRC1_COLOR);
    assert_eq!(
        IntoD3d9::<D3dBlend>::into_d3d9(BlendFactor::Src1Color),
        Err(ShaderError::unsupported(
            BackendKind::Direct3D9,
            BlendFactor::Src1Color
        ))
    );
}

#[test]
fn naga_compiles_a_generated_pixel_shader() {
    let text = "\
%meta
Name = Flat
Stage = Pixel
%output
float4 Color : SV_Target
%code_main
    OUTPUT(Color) = float4(1.0, 0.5, 0.25, 1.0);
";
    let backend = OpenGlBackend::from_settings(&CompilerSettings::default()).unwrap();
    let mut device = Device::new(backend, CompilerSettings::default());
    let id = device.create_pixel_shader(parse(text)).unwrap();
    let shader = device.shader(id).unwrap();
    assert_eq!(shader.profile, "450");
    assert_eq!(&shader.bytecode.as_bytes()[..4], &0x0723_0203u32.to_le_bytes());
}

#[test]
fn naga_rejections_carry_the_generated_source() {
    let text = "\
%meta
Name = Broken
Stage = Pixel
%output
float4 Color : SV_Target
%code_main
    OUTPUT(Color) = undeclared_value;
";
    let mut device = Device::new(
        OpenGlBackend::with_compiler(GlslVersion::V450, NagaGlslCompiler::new()),
        CompilerSettings::default(),
    );
    match device.create_pixel_shader(parse(text)) {
        Err(ShaderError::CompilationFailed {
            shader_name,
            source_text,
            diagnostic,
        }) => {
            assert_eq!(shader_name, "Broken");
            assert!(source_text.contains("undeclared_value"));
            assert!(diagnostic.starts_with("GLSL parse error"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn d3d11_context_flushes_tessellation_topology() {
    let hull = "\
%meta
Name = Patch
Profile = hs_5_0
Domain = Quad
Partitioning = FractionalOdd
OutputTopology = TriangleCw
InputControlPoints = 4
OutputControlPoints = 4
%input
float3 Position
%output
float3 Position
%output_patch
float Edges : SV_TessFactor
float Inside : SV_InsideTessFactor
";
    let domain = "\
%meta
Name = Surface
Profile = ds_5_0
Domain = Quad
InputControlPoints = 4
%input
float3 Position
%input_patch
float Edges : SV_TessFactor
float Inside : SV_InsideTessFactor
%output
float4 Position : SV_Position
";
    let (mut device, vs) =
        create_skinned(D3d11Backend::with_compiler(RecordingCompiler::default()));
    let hs = device.create_hull_shader(parse(hull)).unwrap();
    let ds = device.create_domain_shader(parse(domain)).unwrap();

    let mut context = DeviceContext::new();
    for (stage, id) in [
        (ShaderStage::Vertex, vs),
        (ShaderStage::Hull, hs),
        (ShaderStage::Domain, ds),
    ] {
        context.set_shader(stage, device.shader(id)).unwrap();
    }
    let mut applier = D3d11StateApplier::new();
    assert!(matches!(
        context.draw(&mut applier, 4, 0),
        Err(ContextError::IncompatibleTopology { .. })
    ));

    context.set_primitive_topology(PrimitiveTopology::PatchList(4));
    context.draw(&mut applier, 4, 0).unwrap();
    let commands = applier.take_commands();
    assert!(commands.contains(&D3d11Command::IaSetPrimitiveTopology(
        D3d11PrimitiveTopology(D3d11PrimitiveTopology::PATCHLIST_1.0 + 3)
    )));
    assert!(commands.contains(&D3d11Command::SetShader(ShaderStage::Hull, Some(hs))));
    assert_eq!(
        commands.last(),
        Some(&D3d11Command::Draw {
            vertex_count: 4,
            start_vertex: 0
        })
    );
}

#[test]
fn d3d9_context_draws_primitive_counts() {
    let compiler = RecordingCompiler::default();
    let (mut device, vs) = create_skinned(D3d9Backend::with_compiler(compiler));
    let ps = device.create_pixel_shader(parse(SPRITE)).unwrap();
    let layout = device.create_input_layout(vs, &skinned_layout()).unwrap();

    let mut context = DeviceContext::new();
    context.set_shader(ShaderStage::Vertex, device.shader(vs)).unwrap();
    context.set_shader(ShaderStage::Pixel, device.shader(ps)).unwrap();
    context.set_input_layout(Some(layout));
    context
        .set_vertex_buffers(
            0,
            &[Some(VertexBufferBinding {
                buffer: BufferId(1),
                stride: 20,
                offset: 0,
            })],
        )
        .unwrap();
    context.set_index_buffer(Some(IndexBufferBinding {
        buffer: BufferId(2),
        format: IndexFormat::Uint16,
        offset: 0,
    }));
    context
        .set_srvs(ShaderStage::Pixel, 1, &[Some(TextureViewId(7))])
        .unwrap();

    let mut applier = D3d9StateApplier::new();
    context.draw_indexed(&mut applier, 12, 0, 0).unwrap();
    let commands = applier.take_commands();
    assert!(commands.contains(&D3d9Command::SetShader(ShaderStage::Vertex, Some(vs))));
    assert!(commands.contains(&D3d9Command::SetShader(ShaderStage::Pixel, Some(ps))));
    assert!(!commands
        .iter()
        .any(|command| matches!(command, D3d9Command::SetShader(ShaderStage::Hull, _))));
    assert_eq!(
        commands.last(),
        Some(&D3d9Command::DrawIndexedPrimitive {
            primitive_type: D3dPrimitiveType::TRIANGLELIST,
            base_vertex: 0,
            start_index: 0,
            primitive_count: 4
        })
    );

    context.set_primitive_topology(PrimitiveTopology::TriangleStrip);
    context.draw(&mut applier, 6, 0).unwrap();
    assert_eq!(
        applier.take_commands(),
        [D3d9Command::DrawPrimitive {
            primitive_type: D3dPrimitiveType::TRIANGLESTRIP,
            start_vertex: 0,
            primitive_count: 4
        }]
    );
}

#[test]
fn opengl_context_dispatches_compute() {
    let compiler = RecordingCompiler::default();
    let mut device = Device::new(
        OpenGlBackend::with_compiler(GlslVersion::V450, compiler),
        CompilerSettings::default(),
    );
    let id = device.create_compute_shader(parse(BLUR)).unwrap();
    assert!(device
        .shader(id)
        .unwrap()
        .source_text
        .contains("layout(local_size_x = 8, local_size_y = 8, local_size_z = 1) in;"));

    let mut context = DeviceContext::new();
    context
        .set_shader(ShaderStage::Compute, device.shader(id))
        .unwrap();
    let mut applier = GlStateApplier::new();
    context.dispatch(&mut applier, 4, 4, 1).unwrap();
    let commands = applier.take_commands();
    assert!(commands.contains(&GlCommand::UseProgramStage(ShaderStage::Compute, Some(id))));
    assert_eq!(commands.last(), Some(&GlCommand::DispatchCompute([4, 4, 1])));

    context.dispatch(&mut applier, 2, 1, 1).unwrap();
    assert_eq!(applier.take_commands(), [GlCommand::DispatchCompute([2, 1, 1])]);
}

#[test]
fn opengl_context_offsets_indexed_draws() {
    let (device, vs) = create_skinned(OpenGlBackend::with_compiler(
        GlslVersion::V450,
        RecordingCompiler::default(),
    ));
    let mut context = DeviceContext::new();
    context.set_shader(ShaderStage::Vertex, device.shader(vs)).unwrap();
    context.set_index_buffer(Some(IndexBufferBinding {
        buffer: BufferId(4),
        format: IndexFormat::Uint32,
        offset: 16,
    }));

    let mut applier = GlStateApplier::new();
    context.draw_indexed(&mut applier, 6, 3, -2).unwrap();
    assert_eq!(
        applier.commands().last(),
        Some(&GlCommand::DrawElementsBaseVertex {
            mode: GlPrimitive::TRIANGLES,
            count: 6,
            index_type: GlType::UNSIGNED_INT,
            offset: 28,
            base_vertex: -2
        })
    );
}
