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

//! GLSL 4.x code generation for the vertex, pixel and compute stages.
//!
//! The output is Vulkan-flavoured GLSL (explicit `set`/`binding`, separate
//! textures and samplers) so that naga can lower it to SPIR-V. Stage inputs
//! and outputs are declared as globals and copied into the `stage_input` and
//! `stage_output` locals the verbatim code lines address through `INPUT(x)`
//! and `OUTPUT(x)`.

use super::profile::GlslVersion;
use prism_core::device::BackendKind;
use prism_core::error::ShaderError;
use prism_core::resource::ResourceKind;
use prism_core::shader::{
    io_members, io_struct_name, member_length, BaseType, BlockDecl, FunctionDecl,
    Interpolation, IoVariable, MemberDecl, ShaderCodeGenerator, ShaderProfile, ShaderReflection,
    ShaderStage, ShaderValueType, SourceDocument, SourceItem, StructDecl,
};

/// First binding of uniform buffers.
pub const UNIFORM_BINDING_BASE: u32 = 0;
/// First binding of sampler states.
pub const SAMPLER_BINDING_BASE: u32 = 16;
/// First binding of read-only views.
pub const SRV_BINDING_BASE: u32 = 32;
/// First binding of read-write views.
pub const UAV_BINDING_BASE: u32 = 64;

const INPUT_LOCAL: &str = "stage_input";
const OUTPUT_LOCAL: &str = "stage_output";

/// Writes GLSL for the OpenGL backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlslGenerator {
    version: GlslVersion,
}

impl GlslGenerator {
    /// Creates a generator emitting `version` unless a reflection asks for another.
    pub fn new(version: GlslVersion) -> Self {
        Self { version }
    }

    /// The version emitted when the reflection profile names none.
    pub fn default_version(&self) -> GlslVersion {
        self.version
    }

    /// The GLSL version a reflection is generated for.
    pub fn version_for(&self, reflection: &ShaderReflection) -> GlslVersion {
        GlslVersion::parse_for_stage(reflection.stage(), reflection.profile())
            .unwrap_or(self.version)
    }
}

impl ShaderCodeGenerator for GlslGenerator {
    fn backend(&self) -> BackendKind {
        BackendKind::OpenGL
    }

    fn supports_stage(&self, stage: ShaderStage) -> bool {
        matches!(
            stage,
            ShaderStage::Vertex | ShaderStage::Pixel | ShaderStage::Compute
        )
    }

    fn build_document(&self, reflection: &ShaderReflection) -> Result<SourceDocument, ShaderError> {
        let stage = reflection.stage();
        if !self.supports_stage(stage) {
            return Err(ShaderError::StageUnsupported {
                backend: BackendKind::OpenGL,
                stage,
            });
        }

        let mut document = SourceDocument::new();
        document.raw(format!("#version {}", self.version_for(reflection)));
        document.comment(format!("{} ({stage} shader, OpenGL)", reflection.name()));
        document.blank();
        declare_prelude(&mut document);

        for line in reflection.code_global() {
            document.raw(line.clone());
        }
        document.blank();
        declare_structures(&mut document, reflection)?;
        declare_uniform_buffers(&mut document, reflection)?;
        declare_views(&mut document, reflection)?;
        declare_fixed_sampling(&mut document, reflection)?;

        let io = declare_stage_io(&mut document, reflection)?;
        document.define_fn("INPUT", &["x"], format!("{INPUT_LOCAL}.x"));
        document.define_fn("OUTPUT", &["x"], format!("{OUTPUT_LOCAL}.x"));
        document.blank();

        if stage == ShaderStage::Compute {
            let [x, y, z] = reflection.thread_group_size()?;
            document.raw(format!(
                "layout(local_size_x = {x}, local_size_y = {y}, local_size_z = {z}) in;"
            ));
            document.blank();
        }

        let mut body = Vec::new();
        if let Some(input) = &io.input_struct {
            body.push(format!("    {input} {INPUT_LOCAL};"));
        }
        body.extend(io.copy_in);
        if let Some(output) = &io.output_struct {
            body.push(format!("    {output} {OUTPUT_LOCAL};"));
        }
        body.extend(reflection.code_main().iter().cloned());
        body.extend(io.copy_out);
        document.push(SourceItem::Function(FunctionDecl {
            attributes: Vec::new(),
            return_type: "void".to_string(),
            name: "main".to_string(),
            params: Vec::new(),
            body,
        }));
        Ok(document)
    }
}

fn unsupported(value: String) -> ShaderError {
    ShaderError::unsupported(BackendKind::OpenGL, value)
}

/// GLSL spelling of a value type, without array length.
pub fn glsl_type(ty: &ShaderValueType) -> Result<String, ShaderError> {
    ty.glsl_name().map_err(unsupported)
}

/// Aliases that let HLSL-style code lines compile as GLSL.
fn declare_prelude(document: &mut SourceDocument) {
    for width in 2..=4 {
        document.define(format!("float{width}"), format!("vec{width}"));
        document.define(format!("int{width}"), format!("ivec{width}"));
        document.define(format!("uint{width}"), format!("uvec{width}"));
        document.define(format!("bool{width}"), format!("bvec{width}"));
    }
    for rows in 2..=4 {
        for cols in 2..=4 {
            let matrix = if rows == cols {
                format!("mat{cols}")
            } else {
                format!("mat{cols}x{rows}")
            };
            document.define(format!("float{rows}x{cols}"), matrix);
        }
    }
    document.define_fn("lerp", &["a", "b", "t"], "mix(a, b, t)");
    document.define_fn("saturate", &["x"], "clamp(x, 0.0, 1.0)");
    document.define_fn("mul", &["a", "b"], "((a) * (b))");
    document.define_fn("atan2", &["y", "x"], "atan(y, x)");
    document.define("frac", "fract");
    document.define("rsqrt", "inversesqrt");
    document.define("ddx", "dFdx");
    document.define("ddy", "dFdy");
    document.blank();
}

fn member(ty: &ShaderValueType, name: &str) -> Result<MemberDecl, ShaderError> {
    let len = match ty.array_size() {
        Some(prism_core::shader::ArraySize::Fixed(len)) => Some(len),
        _ => None,
    };
    Ok(MemberDecl::new(glsl_type(ty)?, name).array(len))
}

fn declare_structures(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    for structure in reflection.structures() {
        let members = structure
            .members
            .iter()
            .map(|m| member(&m.ty, &m.name))
            .collect::<Result<_, _>>()?;
        document.push(SourceItem::Struct(StructDecl {
            name: structure.name.clone(),
            members,
        }));
        document.blank();
    }
    Ok(())
}

/// Declares the `std140` blocks, padding each member to its packed offset.
fn declare_uniform_buffers(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    for buffer in reflection.uniform_buffers() {
        let mut members = Vec::with_capacity(buffer.members.len());
        let mut position = 0;
        for (index, uniform) in buffer.members.iter().enumerate() {
            if uniform.offset < position {
                return Err(unsupported(format!(
                    "'{}' overlaps the std140 layout of '{}'",
                    uniform.name, buffer.name
                )));
            }
            for pad in 0..(uniform.offset - position) / 4 {
                members.push(MemberDecl::new("float", format!("_pad{index}_{pad}")));
            }
            members.push(member(&uniform.ty, &uniform.name)?);
            position = uniform.offset
                + uniform.ty.std140_size().map_err(|reason| {
                    unsupported(format!("'{}' in '{}': {reason}", uniform.name, buffer.name))
                })?;
        }
        document.push(SourceItem::Block(BlockDecl {
            name: buffer.name.clone(),
            header: format!(
                "layout(std140, set = 0, binding = {}) uniform {}",
                UNIFORM_BINDING_BASE + buffer.slot,
                buffer.name
            ),
            members,
        }));
        document.blank();
    }
    Ok(())
}

fn texture_dimension(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Buffer => Some("Buffer"),
        ResourceKind::Texture1D => Some("1D"),
        ResourceKind::Texture1DArray => Some("1DArray"),
        ResourceKind::Texture2D => Some("2D"),
        ResourceKind::Texture2DArray => Some("2DArray"),
        ResourceKind::Texture2DMultisample => Some("2DMS"),
        ResourceKind::Texture3D => Some("3D"),
        ResourceKind::TextureCube => Some("Cube"),
        ResourceKind::TextureCubeArray => Some("CubeArray"),
        ResourceKind::StructuredBuffer | ResourceKind::Renderbuffer => None,
    }
}

/// `""`, `"i"` or `"u"` depending on the scalar type of a view's elements.
fn sampled_prefix(element: &ShaderValueType) -> &'static str {
    match element.base_type() {
        Some(BaseType::Int) => "i",
        Some(BaseType::UInt) => "u",
        _ => "",
    }
}

/// Image format qualifier for a read-write view element.
fn image_format(element: &ShaderValueType) -> Option<&'static str> {
    let width = element.component_count()?;
    Some(match (element.base_type()?, width) {
        (BaseType::Float, 1) => "r32f",
        (BaseType::Float, 2) => "rg32f",
        (BaseType::Float, 4) => "rgba32f",
        (BaseType::Int, 1) => "r32i",
        (BaseType::Int, 2) => "rg32i",
        (BaseType::Int, 4) => "rgba32i",
        (BaseType::UInt, 1) => "r32ui",
        (BaseType::UInt, 2) => "rg32ui",
        (BaseType::UInt, 4) => "rgba32ui",
        _ => return None,
    })
}

fn storage_block(
    qualifier: &str,
    binding: u32,
    name: &str,
    element: &ShaderValueType,
) -> Result<SourceItem, ShaderError> {
    Ok(SourceItem::Block(BlockDecl {
        name: format!("{name}_Data"),
        header: format!("layout(std430, set = 0, binding = {binding}) {qualifier}buffer {name}_Data"),
        members: vec![MemberDecl::new(glsl_type(element)?, format!("{name}[]"))],
    }))
}

fn declare_views(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    for sampler in reflection.samplers() {
        let ty = if sampler.comparison {
            "samplerShadow"
        } else {
            "sampler"
        };
        document.push(SourceItem::Global(
            MemberDecl::new(ty, sampler.name.clone())
                .qualifier(format!(
                    "layout(set = 0, binding = {})",
                    SAMPLER_BINDING_BASE + sampler.slot
                ))
                .qualifier("uniform"),
        ));
    }

    for srv in reflection.srvs() {
        let binding = SRV_BINDING_BASE + srv.slot;
        if srv.kind == ResourceKind::StructuredBuffer {
            document.push(storage_block("readonly ", binding, &srv.name, &srv.element)?);
            continue;
        }
        let dimension = texture_dimension(srv.kind)
            .ok_or_else(|| unsupported(format!("{:?} view '{}'", srv.kind, srv.name)))?;
        document.push(SourceItem::Global(
            MemberDecl::new(
                format!("{}texture{dimension}", sampled_prefix(&srv.element)),
                srv.name.clone(),
            )
            .qualifier(format!("layout(set = 0, binding = {binding})"))
            .qualifier("uniform"),
        ));
    }

    for uav in reflection.uavs() {
        let binding = UAV_BINDING_BASE + uav.slot;
        if uav.kind == ResourceKind::StructuredBuffer {
            document.push(storage_block("", binding, &uav.name, &uav.element)?);
            continue;
        }
        let not_an_image = || unsupported(format!("{:?} read-write view '{}'", uav.kind, uav.name));
        let dimension = match uav.kind {
            ResourceKind::Texture2DMultisample => return Err(not_an_image()),
            kind => texture_dimension(kind).ok_or_else(not_an_image)?,
        };
        let format = image_format(&uav.element).ok_or_else(|| {
            unsupported(format!("{} elements in read-write view '{}'", uav.element, uav.name))
        })?;
        document.push(SourceItem::Global(
            MemberDecl::new(
                format!("{}image{dimension}", sampled_prefix(&uav.element)),
                uav.name.clone(),
            )
            .qualifier(format!("layout(set = 0, binding = {binding}, {format})"))
            .qualifier("uniform"),
        ));
    }
    document.blank();
    Ok(())
}

fn declare_fixed_sampling(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    for fixed in reflection.fixed_sampling() {
        let Some(srv) = reflection.srvs().iter().find(|srv| srv.name == fixed.srv) else {
            continue;
        };
        let comparison = reflection
            .samplers()
            .iter()
            .any(|sampler| sampler.name == fixed.sampler && sampler.comparison);
        let dimension = texture_dimension(srv.kind)
            .ok_or_else(|| unsupported(format!("sampling {:?} view '{}'", srv.kind, srv.name)))?;
        let combined = format!(
            "{}sampler{dimension}{}({}, {})",
            sampled_prefix(&srv.element),
            if comparison { "Shadow" } else { "" },
            fixed.srv,
            fixed.sampler
        );
        document.define_fn(
            format!("SAMPLE_{}", fixed.srv),
            &["uv"],
            format!("texture({combined}, uv)"),
        );
        document.define_fn(
            format!("SAMPLE_LEVEL_{}", fixed.srv),
            &["uv", "lod"],
            format!("textureLod({combined}, uv, lod)"),
        );
    }
    document.blank();
    Ok(())
}

/// Built-in read by a system-value input.
fn builtin_input(stage: ShaderStage, semantic: &str) -> Option<&'static str> {
    Some(match (stage, semantic) {
        (ShaderStage::Vertex, "SV_VERTEXID") => "gl_VertexIndex",
        (ShaderStage::Vertex, "SV_INSTANCEID") => "gl_InstanceIndex",
        (ShaderStage::Pixel, "SV_POSITION") => "gl_FragCoord",
        (ShaderStage::Pixel, "SV_ISFRONTFACE") => "gl_FrontFacing",
        (ShaderStage::Pixel, "SV_PRIMITIVEID") => "gl_PrimitiveID",
        (ShaderStage::Compute, "SV_DISPATCHTHREADID") => "gl_GlobalInvocationID",
        (ShaderStage::Compute, "SV_GROUPTHREADID") => "gl_LocalInvocationID",
        (ShaderStage::Compute, "SV_GROUPID") => "gl_WorkGroupID",
        (ShaderStage::Compute, "SV_GROUPINDEX") => "gl_LocalInvocationIndex",
        _ => return None,
    })
}

/// Built-in written by a system-value output.
fn builtin_output(stage: ShaderStage, semantic: &str) -> Option<&'static str> {
    Some(match (stage, semantic) {
        (ShaderStage::Vertex, "SV_POSITION") => "gl_Position",
        (ShaderStage::Pixel, "SV_DEPTH") => "gl_FragDepth",
        _ => return None,
    })
}

fn interpolation_qualifier(variable: &IoVariable) -> Option<&'static str> {
    if variable.ty.base_type().is_some_and(BaseType::is_integer) {
        return Some("flat");
    }
    match variable.interpolation {
        Interpolation::Default => None,
        Interpolation::Linear => Some("smooth"),
        Interpolation::Centroid => Some("centroid"),
        Interpolation::NoInterpolation => Some("flat"),
        Interpolation::NoPerspective => Some("noperspective"),
        Interpolation::Sample => Some("sample"),
    }
}

/// Location of every stage interface variable that is not a built-in.
///
/// Vertex inputs are numbered like the vertex layout: used variables only,
/// each taking as many locations as it needs layout elements. Varyings are
/// numbered over the whole declared list so both sides of a boundary agree.
/// Pixel outputs take the index of their `SV_Target` semantic.
pub fn interface_locations(
    stage: ShaderStage,
    variables: &[IoVariable],
    is_input: bool,
) -> Vec<Option<u32>> {
    let mut next = 0;
    variables
        .iter()
        .map(|variable| {
            if stage == ShaderStage::Pixel && !is_input {
                let target = variable.semantic_base().as_deref() == Some("SV_TARGET");
                return target.then(|| variable.semantic_index());
            }
            if variable.is_system_value() {
                return None;
            }
            if stage == ShaderStage::Vertex && is_input && !variable.is_used {
                return None;
            }
            let location = next;
            next += variable.ty.layout_elements_required().unwrap_or(1);
            Some(location)
        })
        .collect()
}

struct StageIo {
    input_struct: Option<String>,
    output_struct: Option<String>,
    copy_in: Vec<String>,
    copy_out: Vec<String>,
}

fn io_struct(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
    role: &str,
    variables: &[IoVariable],
) -> Result<Option<String>, ShaderError> {
    let members = io_members(reflection, variables, None, |variable, length| {
        Ok(MemberDecl::new(glsl_type(&variable.ty)?, variable.name.clone())
            .array(length.array_len()))
    })?;
    if members.is_empty() {
        return Ok(None);
    }
    let name = io_struct_name(reflection.stage(), role);
    document.push(SourceItem::Struct(StructDecl {
        name: name.clone(),
        members,
    }));
    document.blank();
    Ok(Some(name))
}

fn declare_stage_io(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<StageIo, ShaderError> {
    let stage = reflection.stage();
    let input_struct = io_struct(document, reflection, "Input", reflection.input())?;
    let output_struct = io_struct(document, reflection, "Output", reflection.output())?;
    let mut copy_in = Vec::new();
    let mut copy_out = Vec::new();

    let locations = interface_locations(stage, reflection.input(), true);
    for (variable, location) in reflection.input().iter().zip(locations) {
        if !variable.is_used {
            continue;
        }
        let ty = glsl_type(&variable.ty)?;
        let base = variable.semantic_base().unwrap_or_default();
        if variable.is_system_value() {
            let builtin = builtin_input(stage, &base).ok_or_else(|| {
                unsupported(format!("{base} input '{}' in a {stage} shader", variable.name))
            })?;
            copy_in.push(format!("    {INPUT_LOCAL}.{} = {ty}({builtin});", variable.name));
            continue;
        }
        let Some(location) = location.filter(|_| stage != ShaderStage::Compute) else {
            return Err(unsupported(format!(
                "user input '{}' in a {stage} shader",
                variable.name
            )));
        };
        let global = format!("in_{}", variable.name);
        let len = member_length(reflection, &variable.name, &variable.ty, None)?.array_len();
        let mut decl = MemberDecl::new(ty, global.clone())
            .array(len)
            .qualifier(format!("layout(location = {location})"));
        if stage == ShaderStage::Pixel {
            if let Some(qualifier) = interpolation_qualifier(variable) {
                decl = decl.qualifier(qualifier);
            }
        }
        document.push(SourceItem::Global(decl.qualifier("in")));
        copy_in.push(format!("    {INPUT_LOCAL}.{} = {global};", variable.name));
    }

    let locations = interface_locations(stage, reflection.output(), false);
    for (variable, location) in reflection.output().iter().zip(locations) {
        if !variable.is_used {
            continue;
        }
        let ty = glsl_type(&variable.ty)?;
        let base = variable.semantic_base().unwrap_or_default();
        if let Some(builtin) = builtin_output(stage, &base) {
            copy_out.push(format!("    {builtin} = {OUTPUT_LOCAL}.{};", variable.name));
            continue;
        }
        let location = match location {
            Some(location) if stage != ShaderStage::Compute => location,
            _ => {
                return Err(unsupported(format!(
                    "output '{}' ({}) in a {stage} shader",
                    variable.name,
                    variable.semantic.as_deref().unwrap_or("no semantic")
                )))
            }
        };
        let global = format!("out_{}", variable.name);
        let len = member_length(reflection, &variable.name, &variable.ty, None)?.array_len();
        let mut decl = MemberDecl::new(ty, global.clone())
            .array(len)
            .qualifier(format!("layout(location = {location})"));
        if stage == ShaderStage::Vertex {
            if let Some(qualifier) = interpolation_qualifier(variable) {
                decl = decl.qualifier(qualifier);
            }
        }
        document.push(SourceItem::Global(decl.qualifier("out")));
        copy_out.push(format!("    {global} = {OUTPUT_LOCAL}.{};", variable.name));
    }
    document.blank();

    Ok(StageIo {
        input_struct,
        output_struct,
        copy_in,
        copy_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::shader::{
        meta_keys, parse_shader_description, SamplerBinding, ShaderReflectionBuilder,
        SrvBinding, UavBinding, UniformBuffer,
    };

    const SPRITE: &str = "\
%meta
Name = Sprite
Profile = ps_5_0
%input
float4 Position : SV_Position
float2 TexCoord
nointerpolation uint Layer
%output
float4 Color : SV_Target
%ubuffers
ubuffer Params : 2
float Exposure
float3 Tint
%samplers
sampler Linear : 0
%srvs
Texture2D<float4> Source : 1
%fixed_sampling
Source : Linear
%code_main
    OUTPUT(Color) = SAMPLE_Source(INPUT(TexCoord)) * Exposure;
";

    fn generate(reflection: &ShaderReflection) -> SourceDocument {
        GlslGenerator::default().build_document(reflection).unwrap()
    }

    #[test]
    fn version_comes_first_and_follows_the_profile() {
        let reflection = ShaderReflectionBuilder::new("V", ShaderStage::Vertex)
            .profile("460")
            .build()
            .unwrap();
        let text = GlslGenerator::new(GlslVersion::V440).generate(&reflection).unwrap();
        assert!(text.starts_with("#version 460\n"));
        let other = ShaderReflectionBuilder::new("V", ShaderStage::Vertex)
            .profile("vs_5_0")
            .build()
            .unwrap();
        let text = GlslGenerator::new(GlslVersion::V440).generate(&other).unwrap();
        assert!(text.starts_with("#version 440\n"));
    }

    #[test]
    fn pixel_shader_declares_bindings_and_io() {
        let reflection = parse_shader_description(SPRITE).unwrap();
        let document = generate(&reflection);
        let text = document.render();

        let params = document.find_block("Params").unwrap();
        assert_eq!(params.header, "layout(std140, set = 0, binding = 2) uniform Params");
        let names: Vec<_> = params.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Exposure", "_pad1_0", "_pad1_1", "_pad1_2", "Tint"]);

        assert!(text.contains("layout(set = 0, binding = 16) uniform sampler Linear;"));
        assert!(text.contains("layout(set = 0, binding = 33) uniform texture2D Source;"));
        assert!(text.contains(
            "#define SAMPLE_Source(uv) texture(sampler2D(Source, Linear), uv)"
        ));
        assert!(text.contains("layout(location = 0) in vec2 in_TexCoord;"));
        assert!(text.contains("layout(location = 1) flat in uint in_Layer;"));
        assert!(text.contains("layout(location = 0) out vec4 out_Color;"));

        let main = document.find_function("main").unwrap();
        assert_eq!(main.params.len(), 0);
        assert!(main.body.contains(&"    stage_input.Position = vec4(gl_FragCoord);".to_string()));
        assert_eq!(main.body.last().unwrap(), "    out_Color = stage_output.Color;");
    }

    #[test]
    fn vertex_locations_follow_the_layout() {
        let matrix = ShaderValueType::Matrix {
            base: BaseType::Float,
            rows: 4,
            cols: 4,
        };
        let reflection = ShaderReflectionBuilder::new("Inst", ShaderStage::Vertex)
            .input(IoVariable::new(ShaderValueType::float(3), "Position"))
            .input(IoVariable::new(ShaderValueType::float(2), "Unused").unused())
            .input(IoVariable::new(matrix, "World"))
            .input(IoVariable::new(ShaderValueType::float(4), "Color"))
            .output(IoVariable::new(ShaderValueType::float(4), "Position").with_semantic("SV_Position"))
            .build()
            .unwrap();
        let text = generate(&reflection).render();
        assert!(text.contains("layout(location = 0) in vec3 in_Position;"));
        assert!(text.contains("layout(location = 1) in mat4 in_World;"));
        assert!(text.contains("layout(location = 5) in vec4 in_Color;"));
        assert!(!text.contains("in_Unused"));
        assert!(text.contains("    gl_Position = stage_output.Position;"));
    }

    #[test]
    fn compute_shader_uses_local_size_and_builtins() {
        let reflection = ShaderReflectionBuilder::new("Blur", ShaderStage::Compute)
            .meta(meta_keys::THREAD_COUNT_X, 8)
            .meta(meta_keys::THREAD_COUNT_Y, 8)
            .meta(meta_keys::THREAD_COUNT_Z, 1)
            .input(
                IoVariable::new(
                    ShaderValueType::Vector {
                        base: BaseType::UInt,
                        width: 3,
                    },
                    "Id",
                )
                .with_semantic("SV_DispatchThreadID"),
            )
            .uav(UavBinding {
                name: "Target".into(),
                slot: 0,
                kind: ResourceKind::Texture2D,
                element: ShaderValueType::float(4),
            })
            .build()
            .unwrap();
        let text = generate(&reflection).render();
        assert!(text.contains("layout(local_size_x = 8, local_size_y = 8, local_size_z = 1) in;"));
        assert!(text.contains("    stage_input.Id = uvec3(gl_GlobalInvocationID);"));
        assert!(text.contains("layout(set = 0, binding = 64, rgba32f) uniform image2D Target;"));
    }

    #[test]
    fn unsupported_declarations_are_rejected() {
        let packed = ShaderReflectionBuilder::new("A", ShaderStage::Pixel)
            .uav(UavBinding {
                name: "Out".into(),
                slot: 0,
                kind: ResourceKind::Texture2D,
                element: ShaderValueType::float(3),
            })
            .build()
            .unwrap();
        let render_only = ShaderReflectionBuilder::new("B", ShaderStage::Pixel)
            .srv(SrvBinding {
                name: "Rb".into(),
                slot: 0,
                kind: ResourceKind::Renderbuffer,
                element: ShaderValueType::float(4),
            })
            .build()
            .unwrap();
        let clip = ShaderReflectionBuilder::new("C", ShaderStage::Vertex)
            .output(
                IoVariable::new(ShaderValueType::float(1), "Clip").with_semantic("SV_ClipDistance"),
            )
            .build()
            .unwrap();
        for reflection in [packed, render_only, clip] {
            assert!(
                matches!(
                    GlslGenerator::default().build_document(&reflection),
                    Err(ShaderError::UnsupportedValue {
                        backend: BackendKind::OpenGL,
                        ..
                    })
                ),
                "{}",
                reflection.name()
            );
        }
    }

    #[test]
    fn comparison_samplers_build_shadow_samplers() {
        let reflection = ShaderReflectionBuilder::new("Shadow", ShaderStage::Pixel)
            .sampler(SamplerBinding {
                name: "Cmp".into(),
                slot: 1,
                comparison: true,
            })
            .srv(SrvBinding {
                name: "Depth".into(),
                slot: 0,
                kind: ResourceKind::Texture2D,
                element: ShaderValueType::float(1),
            })
            .fixed_sampling("Depth", "Cmp")
            .uniform_buffer(
                UniformBuffer::packed("Light", 0, vec![(ShaderValueType::float(4), "Dir".into())], &[])
                    .unwrap(),
            )
            .build()
            .unwrap();
        let text = generate(&reflection).render();
        assert!(text.contains("layout(set = 0, binding = 17) uniform samplerShadow Cmp;"));
        assert!(text.contains("texture(sampler2DShadow(Depth, Cmp), uv)"));
    }
}
