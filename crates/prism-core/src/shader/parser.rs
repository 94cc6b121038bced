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

//! Reader for the `%section` shader description format.
//!
//! ```text
//! %meta
//! Name = Blit
//! Profile = ps_4_0
//! %input
//! float2 TexCoord
//! %output
//! float4 Color : SV_Target
//! %samplers
//! sampler Linear : 0
//! %srvs
//! Texture2D<float4> Source : 0
//! %fixed_sampling
//! Source : Linear
//! %code_main
//!     OUTPUT(Color) = SAMPLE_Source(INPUT(TexCoord));
//! ```

use super::reflection::{
    IoVariable, Interpolation, OutputStream, SamplerBinding, ShaderReflection,
    ShaderReflectionBuilder, SrvBinding, Structure, StructureMember, UavBinding, UniformBuffer,
};
use super::stage::ShaderStage;
use super::types::{ArraySize, BaseType, ShaderValueType};
use crate::error::ShaderError;
use crate::resource::ResourceKind;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IoGroup {
    Input,
    Output,
    InputExtra,
    InputPatch,
    OutputPatch,
    Stream(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeGroup {
    Global,
    Patch,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Meta,
    Io(IoGroup),
    UniformBuffers,
    Samplers,
    Srvs,
    Uavs,
    Structures,
    FixedSampling,
    Code(CodeGroup),
}

#[derive(Default)]
struct Collected {
    meta: BTreeMap<String, String>,
    input: Vec<IoVariable>,
    output: Vec<IoVariable>,
    input_extra: Vec<IoVariable>,
    input_patch: Vec<IoVariable>,
    output_patch: Vec<IoVariable>,
    streams: Vec<OutputStream>,
    uniform_buffers: Vec<(String, u32, Vec<(ShaderValueType, String)>)>,
    samplers: Vec<SamplerBinding>,
    srvs: Vec<SrvBinding>,
    uavs: Vec<UavBinding>,
    structures: Vec<Structure>,
    fixed_sampling: Vec<(String, String)>,
    code_global: Vec<String>,
    code_patch: Vec<String>,
    code_main: Vec<String>,
}

/// Parses a shader description into a validated [`ShaderReflection`].
///
/// `Name` is required in `%meta`; `Stage` may be omitted when `Profile` starts
/// with a stage prefix (`vs_`, `ps_`, ...).
pub fn parse_shader_description(text: &str) -> Result<ShaderReflection, ShaderError> {
    let mut section = Section::Preamble;
    let mut collected = Collected::default();
    let mut line_count = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        line_count = line_no;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let err = |message: String| ShaderError::Parse {
            line: line_no,
            message,
        };

        if let Some(header) = raw.strip_prefix('%') {
            if !matches!(section, Section::Code(_)) || is_section_header(header) {
                section = parse_section_header(header.trim(), &mut collected).map_err(err)?;
                continue;
            }
        }

        if let Section::Code(group) = section {
            let lines = match group {
                CodeGroup::Global => &mut collected.code_global,
                CodeGroup::Patch => &mut collected.code_patch,
                CodeGroup::Main => &mut collected.code_main,
            };
            lines.push(raw.to_string());
            continue;
        }

        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        parse_line(section, content, &mut collected).map_err(err)?;
    }

    finish(collected, line_count)
}

const SECTION_NAMES: [&str; 16] = [
    "meta",
    "input",
    "output",
    "input_extra",
    "input_patch",
    "output_patch",
    "output_stream",
    "ubuffers",
    "samplers",
    "srvs",
    "uavs",
    "structures",
    "fixed_sampling",
    "code_global",
    "code_patch",
    "code_main",
];

/// Whether a line starting with `%` in column 0 opens a known section.
fn is_section_header(header: &str) -> bool {
    header
        .split_whitespace()
        .next()
        .is_some_and(|name| SECTION_NAMES.contains(&name))
}

fn parse_section_header(header: &str, collected: &mut Collected) -> Result<Section, String> {
    let mut tokens = header.split_whitespace();
    let name = tokens.next().unwrap_or_default();
    let argument = tokens.next();
    let section = match name {
        "meta" => Section::Meta,
        "input" => Section::Io(IoGroup::Input),
        "output" => Section::Io(IoGroup::Output),
        "input_extra" => Section::Io(IoGroup::InputExtra),
        "input_patch" => Section::Io(IoGroup::InputPatch),
        "output_patch" => Section::Io(IoGroup::OutputPatch),
        "output_stream" => {
            let stream_name =
                argument.ok_or_else(|| "%output_stream requires a stream name".to_string())?;
            collected.streams.push(OutputStream {
                name: stream_name.to_string(),
                variables: Vec::new(),
            });
            return Ok(Section::Io(IoGroup::Stream(collected.streams.len() - 1)));
        }
        "ubuffers" => Section::UniformBuffers,
        "samplers" => Section::Samplers,
        "srvs" => Section::Srvs,
        "uavs" => Section::Uavs,
        "structures" => Section::Structures,
        "fixed_sampling" => Section::FixedSampling,
        "code_global" => Section::Code(CodeGroup::Global),
        "code_patch" => Section::Code(CodeGroup::Patch),
        "code_main" => Section::Code(CodeGroup::Main),
        other => return Err(format!("unknown section '%{other}'")),
    };
    if argument.is_some() {
        return Err(format!("section '%{name}' takes no argument"));
    }
    Ok(section)
}

fn parse_line(section: Section, line: &str, collected: &mut Collected) -> Result<(), String> {
    match section {
        Section::Preamble => Err("content before the first section".to_string()),
        Section::Meta => {
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| format!("expected 'Key = Value', found '{line}'"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err("empty metadata key".to_string());
            }
            if collected
                .meta
                .insert(key.to_string(), value.trim().to_string())
                .is_some()
            {
                return Err(format!("metadata '{key}' is set twice"));
            }
            Ok(())
        }
        Section::Io(group) => {
            let variable = parse_variable(line)?;
            let target = match group {
                IoGroup::Input => &mut collected.input,
                IoGroup::Output => &mut collected.output,
                IoGroup::InputExtra => &mut collected.input_extra,
                IoGroup::InputPatch => &mut collected.input_patch,
                IoGroup::OutputPatch => &mut collected.output_patch,
                IoGroup::Stream(index) => &mut collected.streams[index].variables,
            };
            target.push(variable);
            Ok(())
        }
        Section::UniformBuffers => {
            if let Some(header) = line.strip_prefix("ubuffer ") {
                let (name, slot) = parse_named_slot(header)?;
                collected.uniform_buffers.push((name, slot, Vec::new()));
                return Ok(());
            }
            let member = parse_member(line)?;
            let (_, _, members) = collected
                .uniform_buffers
                .last_mut()
                .ok_or_else(|| format!("member '{line}' outside of a ubuffer"))?;
            members.push(member);
            Ok(())
        }
        Section::Samplers => {
            let (comparison, rest) = match line.strip_prefix("comparison ") {
                Some(rest) => (true, rest.trim_start()),
                None => (false, line),
            };
            let declaration = rest
                .strip_prefix("sampler ")
                .ok_or_else(|| format!("expected '[comparison] sampler <Name> : <slot>', found '{line}'"))?;
            let (name, slot) = parse_named_slot(declaration)?;
            collected.samplers.push(SamplerBinding {
                name,
                slot,
                comparison,
            });
            Ok(())
        }
        Section::Srvs => {
            let (kind, element, name, slot) = parse_view(line)?;
            collected.srvs.push(SrvBinding {
                name,
                slot,
                kind,
                element,
            });
            Ok(())
        }
        Section::Uavs => {
            let (kind, element, name, slot) = parse_view(line)?;
            collected.uavs.push(UavBinding {
                name,
                slot,
                kind,
                element,
            });
            Ok(())
        }
        Section::Structures => {
            if let Some(name) = line.strip_prefix("struct ") {
                collected.structures.push(Structure {
                    name: parse_identifier(name.trim())?,
                    members: Vec::new(),
                });
                return Ok(());
            }
            let (ty, name) = parse_member(line)?;
            let structure = collected
                .structures
                .last_mut()
                .ok_or_else(|| format!("member '{line}' outside of a struct"))?;
            structure.members.push(StructureMember { ty, name });
            Ok(())
        }
        Section::FixedSampling => {
            let (srv, sampler) = line
                .split_once(':')
                .ok_or_else(|| format!("expected '<Srv> : <Sampler>', found '{line}'"))?;
            collected.fixed_sampling.push((
                parse_identifier(srv.trim())?,
                parse_identifier(sampler.trim())?,
            ));
            Ok(())
        }
        Section::Code(_) => Ok(()),
    }
}

fn parse_identifier(text: &str) -> Result<String, String> {
    let valid = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(text.to_string())
    } else {
        Err(format!("invalid identifier '{text}'"))
    }
}

fn parse_slot(text: &str) -> Result<u32, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("invalid slot '{}'", text.trim()))
}

fn parse_named_slot(text: &str) -> Result<(String, u32), String> {
    let (name, slot) = text
        .split_once(':')
        .ok_or_else(|| format!("expected '<Name> : <slot>', found '{text}'"))?;
    Ok((parse_identifier(name.trim())?, parse_slot(slot)?))
}

fn parse_member(line: &str) -> Result<(ShaderValueType, String), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [ty, name] => Ok((ShaderValueType::parse(ty)?, parse_identifier(name)?)),
        _ => Err(format!("expected '<type> <name>', found '{line}'")),
    }
}

fn parse_variable(line: &str) -> Result<IoVariable, String> {
    let (declaration, semantic) = match line.split_once(':') {
        Some((declaration, semantic)) => (declaration, Some(semantic.trim())),
        None => (line, None),
    };
    let mut tokens: Vec<&str> = declaration.split_whitespace().collect();

    let is_used = if tokens.first() == Some(&"unused") {
        tokens.remove(0);
        false
    } else {
        true
    };
    let leading = tokens
        .first()
        .and_then(|t| t.parse::<Interpolation>().ok());
    let interpolation = match leading {
        Some(mode) if tokens.len() > 2 => {
            tokens.remove(0);
            mode
        }
        _ => Interpolation::Default,
    };
    let [ty, name] = tokens.as_slice() else {
        return Err(format!(
            "expected '[unused] [interpolation] <type> <name> [: <semantic>]', found '{line}'"
        ));
    };

    let mut ty = ShaderValueType::parse(ty)?;
    if let Some(semantic) = semantic {
        if semantic.is_empty() {
            return Err(format!("empty semantic in '{line}'"));
        }
        parse_identifier(semantic).map_err(|_| format!("invalid semantic '{semantic}'"))?;
        if ty == ShaderValueType::Scalar(BaseType::Float) {
            let size = if semantic.eq_ignore_ascii_case("SV_TessFactor") {
                Some(ArraySize::OuterTessFactors)
            } else if semantic.eq_ignore_ascii_case("SV_InsideTessFactor") {
                Some(ArraySize::InnerTessFactors)
            } else {
                None
            };
            if let Some(size) = size {
                ty = ShaderValueType::Array {
                    element: Box::new(ty),
                    size,
                };
            }
        }
    }

    Ok(IoVariable {
        ty,
        name: parse_identifier(name)?,
        semantic: semantic.map(str::to_string),
        interpolation,
        is_used,
    })
}

fn parse_view(line: &str) -> Result<(ResourceKind, ShaderValueType, String, u32), String> {
    let (declaration, slot) = line
        .split_once(':')
        .ok_or_else(|| format!("expected '<Kind>[<elem>] <Name> : <slot>', found '{line}'"))?;
    let declaration = declaration.trim();
    let (kind_text, element, name) = match declaration.split_once('<') {
        Some((kind, rest)) => {
            let (element, name) = rest
                .split_once('>')
                .ok_or_else(|| format!("unterminated element type in '{line}'"))?;
            (kind, ShaderValueType::parse(element)?, name.trim())
        }
        None => {
            let (kind, name) = declaration
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("missing view name in '{line}'"))?;
            (kind, ShaderValueType::float(4), name.trim())
        }
    };
    let kind: ResourceKind = kind_text.trim().parse()?;
    Ok((kind, element, parse_identifier(name)?, parse_slot(slot)?))
}

fn finish(mut collected: Collected, line_count: usize) -> Result<ShaderReflection, ShaderError> {
    let err = |message: String| ShaderError::Parse {
        line: line_count,
        message,
    };

    let name = collected
        .meta
        .remove("Name")
        .ok_or_else(|| err("missing 'Name' in %meta".to_string()))?;
    let profile = collected.meta.remove("Profile").unwrap_or_default();
    let stage = match collected.meta.remove("Stage") {
        Some(stage) => stage.parse::<ShaderStage>().map_err(err)?,
        None => ShaderStage::from_profile(&profile).ok_or_else(|| {
            err(format!(
                "missing 'Stage' in %meta and profile '{profile}' does not imply one"
            ))
        })?,
    };

    let mut builder = ShaderReflectionBuilder::new(name.clone(), stage).profile(profile);
    for (key, value) in collected.meta {
        builder = builder.meta(key, value);
    }
    for variable in collected.input {
        builder = builder.input(variable);
    }
    for variable in collected.output {
        builder = builder.output(variable);
    }
    for variable in collected.input_extra {
        builder = builder.input_extra(variable);
    }
    for variable in collected.input_patch {
        builder = builder.input_patch(variable);
    }
    for variable in collected.output_patch {
        builder = builder.output_patch(variable);
    }
    for stream in collected.streams {
        builder = builder.output_stream(stream);
    }
    for (buffer_name, slot, members) in collected.uniform_buffers {
        let buffer = UniformBuffer::packed(buffer_name.clone(), slot, members, &collected.structures)
            .map_err(|reason| {
                ShaderError::malformed(name.clone(), format!("uniform buffer '{buffer_name}': {reason}"))
            })?;
        builder = builder.uniform_buffer(buffer);
    }
    for sampler in collected.samplers {
        builder = builder.sampler(sampler);
    }
    for srv in collected.srvs {
        builder = builder.srv(srv);
    }
    for uav in collected.uavs {
        builder = builder.uav(uav);
    }
    for structure in collected.structures {
        builder = builder.structure(structure);
    }
    for (srv, sampler) in collected.fixed_sampling {
        builder = builder.fixed_sampling(srv, sampler);
    }
    for line in collected.code_global {
        builder = builder.global_line(line);
    }
    for line in collected.code_patch {
        builder = builder.patch_line(line);
    }
    for line in collected.code_main {
        builder = builder.main_line(line);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::meta_keys;
    use crate::shader::TessellationDomain;

    const BLIT: &str = "\
# A fullscreen blit.
%meta
Name = Blit
Profile = ps_4_0
%input
float2 TexCoord
unused float4 Position : SV_Position
%output
float4 Color : SV_Target
%ubuffers
ubuffer Params : 0
float Exposure
float3 Tint
%samplers
sampler Linear : 0
comparison sampler Shadow : 1
%srvs
Texture2D<float4> Source : 0
%uavs
RWTexture2D<float> Histogram : 1
%fixed_sampling
Source : Linear
%code_main
    # kept verbatim
    OUTPUT(Color) = SAMPLE_Source(INPUT(TexCoord)) * Exposure;
";

    #[test]
    fn parses_every_binding_section() {
        let reflection = parse_shader_description(BLIT).unwrap();
        assert_eq!(reflection.name(), "Blit");
        assert_eq!(reflection.stage(), ShaderStage::Pixel);
        assert_eq!(reflection.profile(), "ps_4_0");
        assert_eq!(reflection.input().len(), 2);
        assert!(!reflection.input()[1].is_used);
        assert_eq!(reflection.used_input().count(), 1);
        assert_eq!(reflection.output()[0].semantic.as_deref(), Some("SV_Target"));

        let params = &reflection.uniform_buffers()[0];
        assert_eq!(params.name, "Params");
        assert_eq!(params.members[1].offset, 16);

        assert!(reflection.samplers()[1].comparison);
        assert_eq!(reflection.srvs()[0].kind, ResourceKind::Texture2D);
        assert_eq!(reflection.uavs()[0].element, ShaderValueType::float(1));
        assert_eq!(reflection.uav_slot("Histogram"), Some(1));
        assert_eq!(reflection.fixed_sampler_for("Source").unwrap().name, "Linear");
    }

    #[test]
    fn code_sections_are_verbatim() {
        let reflection = parse_shader_description(BLIT).unwrap();
        assert_eq!(
            reflection.code_main(),
            [
                "    # kept verbatim",
                "    OUTPUT(Color) = SAMPLE_Source(INPUT(TexCoord)) * Exposure;"
            ]
        );
    }

    #[test]
    fn tess_factor_semantics_become_domain_arrays() {
        let text = "\
%meta
Name = Patch
Profile = hs_5_0
Domain = Triangle
%output_patch
float Edges : SV_TessFactor
float Inside : SV_InsideTessFactor
float3 Center
";
        let reflection = parse_shader_description(text).unwrap();
        let patch = reflection.output_patch();
        assert_eq!(patch[0].ty.array_size(), Some(ArraySize::OuterTessFactors));
        assert_eq!(patch[1].ty.array_size(), Some(ArraySize::InnerTessFactors));
        assert_eq!(patch[2].ty.array_size(), None);
        assert_eq!(
            reflection.tessellation_domain().unwrap(),
            TessellationDomain::Triangle
        );
    }

    #[test]
    fn interpolation_and_streams() {
        let text = "\
%meta
Name = Split
Stage = Geometry
MaxVertexCount = 6
%input
centroid float3 Normal
nointerpolation uint Id : BLENDINDICES
%output_stream Front
float4 Position : SV_Position
%output_stream Back
float4 Position : SV_Position
";
        let reflection = parse_shader_description(text).unwrap();
        assert_eq!(reflection.input()[0].interpolation, Interpolation::Centroid);
        assert_eq!(
            reflection.input()[1].interpolation,
            Interpolation::NoInterpolation
        );
        assert_eq!(reflection.output_streams().len(), 2);
        assert_eq!(reflection.output_streams()[1].name, "Back");
        assert_eq!(reflection.meta(meta_keys::MAX_VERTEX_COUNT), Some("6"));
    }

    #[test]
    fn structures_feed_uniform_packing() {
        let text = "\
%meta
Name = Lights
Profile = vs_5_0
%structures
struct Light
float3 Position
float4 Color
%ubuffers
ubuffer Scene : 2
Light Sun
float Time
";
        let reflection = parse_shader_description(text).unwrap();
        let scene = &reflection.uniform_buffers()[0];
        assert_eq!(scene.slot, 2);
        assert_eq!(scene.members[1].offset, 32);
        assert_eq!(reflection.structure("Light").unwrap().members.len(), 2);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let text = "%meta\nName = Bad\n%samplers\nsampler Broken : x\n";
        assert_eq!(
            parse_shader_description(text).unwrap_err(),
            ShaderError::Parse {
                line: 4,
                message: "invalid slot 'x'".into()
            }
        );
    }

    #[test]
    fn percent_lines_in_code_stay_code() {
        let text = "\
%meta
Name = Wrap
Profile = ps_5_0
%code_main
    uint Index = Counter
    % 3;
%4 == 0 ? 1 : 0;
%code_global
static const uint Counter = 7;
";
        let reflection = parse_shader_description(text).unwrap();
        assert_eq!(
            reflection.code_main(),
            ["    uint Index = Counter", "    % 3;", "%4 == 0 ? 1 : 0;"]
        );
        assert_eq!(reflection.code_global(), ["static const uint Counter = 7;"]);
    }

    #[test]
    fn semantics_must_be_identifiers() {
        let text = "%meta\nName = V\nProfile = vs_5_0\n%input\nfloat3 P : \u{e9}\u{e9}\n";
        assert_eq!(
            parse_shader_description(text).unwrap_err(),
            ShaderError::Parse {
                line: 5,
                message: "invalid semantic '\u{e9}\u{e9}'".into()
            }
        );
    }

    #[test]
    fn unknown_section_is_rejected() {
        let error = parse_shader_description("%meta\nName = X\n%bogus\n").unwrap_err();
        assert!(matches!(error, ShaderError::Parse { line: 3, .. }));
    }

    #[test]
    fn missing_stage_is_rejected() {
        let error = parse_shader_description("%meta\nName = X\nProfile = 450\n").unwrap_err();
        assert!(matches!(error, ShaderError::Parse { .. }));
    }

    #[test]
    fn builder_validation_still_applies() {
        let text = "%meta\nName = X\nProfile = vs_4_0\n%input\nfloat4 A\nfloat4 A\n";
        let error = parse_shader_description(text).unwrap_err();
        assert!(matches!(error, ShaderError::MalformedReflection { .. }));
    }
}
