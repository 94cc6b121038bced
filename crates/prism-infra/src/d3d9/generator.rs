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

//! HLSL shader model 3 code generation.

use crate::hlsl;
use prism_core::device::BackendKind;
use prism_core::error::ShaderError;
use prism_core::resource::ResourceKind;
use prism_core::shader::{
    Interpolation, IoVariable, MemberDecl, MemberLength, ShaderCodeGenerator, ShaderReflection,
    ShaderStage, SourceDocument, SourceItem,
};
use std::collections::HashMap;

/// Writes HLSL for the Direct3D 9 vertex and pixel pipelines.
#[derive(Debug, Clone, Copy, Default)]
pub struct D3d9Generator;

impl ShaderCodeGenerator for D3d9Generator {
    fn backend(&self) -> BackendKind {
        BackendKind::Direct3D9
    }

    fn supports_stage(&self, stage: ShaderStage) -> bool {
        matches!(stage, ShaderStage::Vertex | ShaderStage::Pixel)
    }

    fn build_document(&self, reflection: &ShaderReflection) -> Result<SourceDocument, ShaderError> {
        let stage = reflection.stage();
        if !self.supports_stage(stage) {
            return Err(ShaderError::StageUnsupported {
                backend: BackendKind::Direct3D9,
                stage,
            });
        }

        let mut document = SourceDocument::new();
        document.comment(format!(
            "{} ({stage} shader, Direct3D 9)",
            reflection.name()
        ));
        document.blank();
        declare_resources(&mut document, reflection)?;

        let (input_side, output_side) = match stage {
            ShaderStage::Vertex => (Interface::VertexInput, Interface::VertexOutput),
            _ => (Interface::PixelInput, Interface::PixelOutput),
        };
        let input_semantics = interface_semantics(input_side, reflection.input())?;
        let output_semantics = interface_semantics(output_side, reflection.output())?;

        let input = hlsl::io_struct(
            &mut document,
            reflection,
            "Input",
            reflection.input(),
            None,
            |variable, length| io_member(&input_semantics, variable, length),
        )?;
        let output = hlsl::io_struct(
            &mut document,
            reflection,
            "Output",
            reflection.output(),
            None,
            |variable, length| io_member(&output_semantics, variable, length),
        )?;

        document.define_fn("INPUT", &["x"], "input.x");
        document.define_fn("OUTPUT", &["x"], "output.x");
        document.blank();

        let params = input.iter().map(|ty| format!("{ty} input")).collect();
        document.push(hlsl::entry_point(
            Vec::new(),
            output.as_deref(),
            params,
            reflection.code_main(),
        ));
        Ok(document)
    }
}

/// The four stage interfaces of the shader model 3 pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interface {
    VertexInput,
    VertexOutput,
    PixelInput,
    PixelOutput,
}

impl Interface {
    fn is_varying(self) -> bool {
        matches!(self, Interface::VertexOutput | Interface::PixelInput)
    }

    /// Shader model 3 name of a system value, `None` when the interface lacks it.
    fn system_value(self, base: &str, index: u32) -> Option<String> {
        match (self, base) {
            (Interface::VertexOutput, "SV_POSITION") => Some("POSITION".to_string()),
            (Interface::PixelInput, "SV_POSITION") => Some("VPOS".to_string()),
            (Interface::PixelInput, "SV_ISFRONTFACE") => Some("VFACE".to_string()),
            (Interface::PixelOutput, "SV_TARGET") => Some(format!("COLOR{index}")),
            (Interface::PixelOutput, "SV_DEPTH") => Some("DEPTH".to_string()),
            _ => None,
        }
    }
}

fn unsupported(value: String) -> ShaderError {
    ShaderError::unsupported(BackendKind::Direct3D9, value)
}

/// The semantic of every variable of one interface, keyed by name.
///
/// Vertex inputs without a semantic read `TEXCOORDn` where `n` is their
/// position in the vertex declaration. Varyings without a semantic take
/// consecutive `TEXCOORDn` registers counted over the whole declared list,
/// unused variables included, so that both sides of a stage boundary agree.
fn interface_semantics(
    interface: Interface,
    variables: &[IoVariable],
) -> Result<HashMap<String, String>, ShaderError> {
    let mut semantics = HashMap::with_capacity(variables.len());
    let mut texcoord = 0;
    for variable in variables {
        if interface == Interface::VertexInput && !variable.is_used {
            continue;
        }
        let registers = variable.ty.layout_elements_required().unwrap_or(1);
        let semantic = match &variable.semantic {
            None if interface == Interface::PixelOutput => Err(unsupported(format!(
                "pixel output '{}' without a SV_Target or SV_Depth semantic",
                variable.name
            ))),
            None => Ok(format!("TEXCOORD{texcoord}")),
            Some(_) if variable.is_system_value() => {
                let base = variable.semantic_base().unwrap_or_default();
                interface
                    .system_value(&base, variable.semantic_index())
                    .ok_or_else(|| {
                        unsupported(format!("system value {base} on '{}'", variable.name))
                    })
            }
            Some(semantic) => Ok(semantic.clone()),
        };
        if interface == Interface::VertexInput || variable.semantic.is_none() {
            texcoord += registers;
        }

        let semantic = semantic.and_then(|semantic| varying_semantic(interface, variable, semantic));
        match semantic {
            Ok(semantic) => {
                semantics.insert(variable.name.clone(), semantic);
            }
            Err(error) if variable.is_used => return Err(error),
            Err(_) => {}
        }
    }
    Ok(semantics)
}

/// Applies the interpolation rules of shader model 3 varyings.
fn varying_semantic(
    interface: Interface,
    variable: &IoVariable,
    mut semantic: String,
) -> Result<String, ShaderError> {
    if !interface.is_varying() || variable.is_system_value() {
        return Ok(semantic);
    }
    if variable.ty.base_type().is_some_and(|base| base.is_integer()) {
        return Err(unsupported(format!(
            "integer varying '{}' of type {}",
            variable.name, variable.ty
        )));
    }
    match variable.interpolation {
        Interpolation::Default | Interpolation::Linear => {}
        Interpolation::Centroid if interface == Interface::PixelInput => {
            semantic.push_str("_centroid")
        }
        Interpolation::Centroid => {}
        mode => {
            return Err(unsupported(format!(
                "{mode:?} interpolation on '{}'",
                variable.name
            )))
        }
    }
    Ok(semantic)
}

fn io_member(
    semantics: &HashMap<String, String>,
    variable: &IoVariable,
    length: MemberLength,
) -> Result<MemberDecl, ShaderError> {
    let semantic = semantics.get(&variable.name).cloned().ok_or_else(|| {
        unsupported(format!("no shader model 3 semantic for '{}'", variable.name))
    })?;
    Ok(MemberDecl::new(variable.ty.hlsl_name(), variable.name.clone())
        .array(length.array_len())
        .annotate(semantic))
}

fn sampler_type(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Texture1D => Some("sampler1D"),
        ResourceKind::Texture2D => Some("sampler2D"),
        ResourceKind::Texture3D => Some("sampler3D"),
        ResourceKind::TextureCube => Some("samplerCUBE"),
        _ => None,
    }
}

/// `tex*` sampling calls for a texture kind: plain and explicit level.
fn sampling_calls(kind: ResourceKind, srv: &str) -> (String, String) {
    match kind {
        ResourceKind::Texture1D => (
            format!("tex1D({srv}, uv)"),
            format!("tex1Dlod({srv}, float4(uv, 0, 0, lod))"),
        ),
        ResourceKind::Texture3D => (
            format!("tex3D({srv}, uv)"),
            format!("tex3Dlod({srv}, float4(uv, lod))"),
        ),
        ResourceKind::TextureCube => (
            format!("texCUBE({srv}, uv)"),
            format!("texCUBElod({srv}, float4(uv, lod))"),
        ),
        _ => (
            format!("tex2D({srv}, uv)"),
            format!("tex2Dlod({srv}, float4(uv, 0, lod))"),
        ),
    }
}

fn declare_resources(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    hlsl::declare_global_code(document, reflection);
    hlsl::declare_structures(document, reflection);

    if let Some(uav) = reflection.uavs().first() {
        return Err(unsupported(format!("read-write view '{}'", uav.name)));
    }

    // Uniform buffers become consecutive constant register ranges.
    let mut buffers: Vec<_> = reflection.uniform_buffers().iter().collect();
    buffers.sort_by_key(|buffer| buffer.slot);
    let mut base = 0;
    for buffer in buffers {
        document.comment(format!("{} (slot {})", buffer.name, buffer.slot));
        for member in &buffer.members {
            document.push(SourceItem::Global(
                hlsl::declaration(&member.ty, &member.name)
                    .annotate(format!("register(c{})", base + member.offset / 16)),
            ));
        }
        base += buffer
            .register_count(reflection.structures())
            .map_err(|reason| ShaderError::malformed(reflection.name(), reason))?;
    }
    document.blank();

    if !reflection.samplers().is_empty() {
        log::debug!(
            "'{}': sampler states are bound through the view slots on Direct3D 9",
            reflection.name()
        );
    }
    for srv in reflection.srvs() {
        let ty = sampler_type(srv.kind).ok_or_else(|| {
            unsupported(format!("{:?} view '{}'", srv.kind, srv.name))
        })?;
        document.push(SourceItem::Global(
            MemberDecl::new(ty, srv.name.clone()).annotate(format!("register(s{})", srv.slot)),
        ));
    }
    document.blank();

    for fixed in reflection.fixed_sampling() {
        let kind = reflection
            .srvs()
            .iter()
            .find(|srv| srv.name == fixed.srv)
            .map_or(ResourceKind::Texture2D, |srv| srv.kind);
        let (sample, sample_level) = sampling_calls(kind, &fixed.srv);
        document.define_fn(format!("SAMPLE_{}", fixed.srv), &["uv"], sample);
        document.define_fn(
            format!("SAMPLE_LEVEL_{}", fixed.srv),
            &["uv", "lod"],
            sample_level,
        );
    }
    document.blank();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::shader::{
        BaseType, SamplerBinding, ShaderReflectionBuilder, ShaderValueType, SrvBinding,
        UavBinding, UniformBuffer,
    };

    fn float4() -> ShaderValueType {
        ShaderValueType::float(4)
    }

    #[test]
    fn uniform_buffers_are_flattened_in_slot_order() {
        let reflection = ShaderReflectionBuilder::new("Skin", ShaderStage::Vertex)
            .uniform_buffer(
                UniformBuffer::packed("Object", 1, vec![(float4(), "Tint".into())], &[]).unwrap(),
            )
            .uniform_buffer(
                UniformBuffer::packed(
                    "Camera",
                    0,
                    vec![
                        (
                            ShaderValueType::Matrix {
                                base: BaseType::Float,
                                rows: 4,
                                cols: 4,
                            },
                            "ViewProj".into(),
                        ),
                        (float4(), "Eye".into()),
                    ],
                    &[],
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let document = D3d9Generator.build_document(&reflection).unwrap();
        let register = |name: &str| document.find_global(name).unwrap().annotation.clone().unwrap();
        assert_eq!(register("ViewProj"), "register(c0)");
        assert_eq!(register("Eye"), "register(c4)");
        assert_eq!(register("Tint"), "register(c5)");
        assert_eq!(document.blocks().count(), 0);
    }

    #[test]
    fn system_values_and_varyings_use_shader_model_3_semantics() {
        let reflection = ShaderReflectionBuilder::new("Lit", ShaderStage::Vertex)
            .input(IoVariable::new(ShaderValueType::float(3), "Position").with_semantic("POSITION"))
            .input(IoVariable::new(ShaderValueType::float(2), "Uv"))
            .output(IoVariable::new(float4(), "Position").with_semantic("SV_Position"))
            .output(IoVariable::new(ShaderValueType::float(3), "Normal").unused())
            .output(IoVariable::new(ShaderValueType::float(2), "Uv"))
            .build()
            .unwrap();
        let document = D3d9Generator.build_document(&reflection).unwrap();

        let input = document.find_struct("VS_Input").unwrap();
        assert_eq!(input.members[0].annotation.as_deref(), Some("POSITION"));
        assert_eq!(input.members[1].annotation.as_deref(), Some("TEXCOORD1"));

        let output = document.find_struct("VS_Output").unwrap();
        assert_eq!(output.members.len(), 2);
        assert_eq!(output.members[0].annotation.as_deref(), Some("POSITION"));
        // The unused normal still claims TEXCOORD0.
        assert_eq!(output.members[1].annotation.as_deref(), Some("TEXCOORD1"));
    }

    #[test]
    fn pixel_interface_translates_targets_and_centroid() {
        let reflection = ShaderReflectionBuilder::new("Resolve", ShaderStage::Pixel)
            .input(IoVariable::new(float4(), "Position").with_semantic("SV_Position"))
            .input(
                IoVariable::new(ShaderValueType::float(2), "Uv")
                    .with_interpolation(Interpolation::Centroid),
            )
            .output(IoVariable::new(float4(), "Color").with_semantic("SV_Target1"))
            .output(
                IoVariable::new(ShaderValueType::float(1), "Depth").with_semantic("SV_Depth"),
            )
            .build()
            .unwrap();
        let text = D3d9Generator.generate(&reflection).unwrap();
        assert!(text.contains("float4 Position : VPOS;"));
        assert!(text.contains("float2 Uv : TEXCOORD0_centroid;"));
        assert!(text.contains("float4 Color : COLOR1;"));
        assert!(text.contains("float Depth : DEPTH;"));
    }

    #[test]
    fn textures_become_samplers_with_tex_calls() {
        let reflection = ShaderReflectionBuilder::new("Sky", ShaderStage::Pixel)
            .sampler(SamplerBinding {
                name: "Linear".into(),
                slot: 0,
                comparison: false,
            })
            .srv(SrvBinding {
                name: "Env".into(),
                slot: 2,
                kind: ResourceKind::TextureCube,
                element: float4(),
            })
            .fixed_sampling("Env", "Linear")
            .build()
            .unwrap();
        let document = D3d9Generator.build_document(&reflection).unwrap();
        let env = document.find_global("Env").unwrap();
        assert_eq!(env.ty, "samplerCUBE");
        assert_eq!(env.annotation.as_deref(), Some("register(s2)"));
        assert!(document.find_global("Linear").is_none());
        assert!(document
            .render()
            .contains("#define SAMPLE_LEVEL_Env(uv, lod) texCUBElod(Env, float4(uv, lod))"));
    }

    #[test]
    fn unsupported_features_are_rejected() {
        let array = ShaderReflectionBuilder::new("A", ShaderStage::Pixel)
            .srv(SrvBinding {
                name: "Layers".into(),
                slot: 0,
                kind: ResourceKind::Texture2DArray,
                element: float4(),
            })
            .build()
            .unwrap();
        let uav = ShaderReflectionBuilder::new("B", ShaderStage::Pixel)
            .uav(UavBinding {
                name: "Out".into(),
                slot: 0,
                kind: ResourceKind::Texture2D,
                element: float4(),
            })
            .build()
            .unwrap();
        let flat = ShaderReflectionBuilder::new("C", ShaderStage::Pixel)
            .input(
                IoVariable::new(float4(), "Color")
                    .with_interpolation(Interpolation::NoInterpolation),
            )
            .build()
            .unwrap();
        let integer = ShaderReflectionBuilder::new("D", ShaderStage::Vertex)
            .output(IoVariable::new(ShaderValueType::Scalar(BaseType::UInt), "Id"))
            .build()
            .unwrap();
        let vertex_id = ShaderReflectionBuilder::new("E", ShaderStage::Vertex)
            .input(
                IoVariable::new(ShaderValueType::Scalar(BaseType::UInt), "Id")
                    .with_semantic("SV_VertexID"),
            )
            .build()
            .unwrap();
        for reflection in [array, uav, flat, integer, vertex_id] {
            assert!(
                matches!(
                    D3d9Generator.build_document(&reflection),
                    Err(ShaderError::UnsupportedValue {
                        backend: BackendKind::Direct3D9,
                        ..
                    })
                ),
                "{}",
                reflection.name()
            );
        }
    }

    #[test]
    fn only_vertex_and_pixel_stages_are_generated() {
        let reflection = ShaderReflectionBuilder::new("Cs", ShaderStage::Compute)
            .meta(prism_core::shader::meta_keys::THREAD_COUNT_X, 1)
            .meta(prism_core::shader::meta_keys::THREAD_COUNT_Y, 1)
            .meta(prism_core::shader::meta_keys::THREAD_COUNT_Z, 1)
            .build()
            .unwrap();
        assert!(matches!(
            D3d9Generator.generate(&reflection),
            Err(ShaderError::StageUnsupported {
                backend: BackendKind::Direct3D9,
                stage: ShaderStage::Compute
            })
        ));
    }
}
