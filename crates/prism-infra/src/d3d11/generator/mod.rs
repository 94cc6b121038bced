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

//! HLSL shader model 4/5 code generation.

mod basic;
mod geometry;
mod tessellation;

use crate::hlsl;
use prism_core::device::BackendKind;
use prism_core::error::ShaderError;
use prism_core::shader::{
    BlockDecl, IoVariable, MemberDecl, MemberLength, ShaderCodeGenerator, ShaderReflection,
    ShaderStage, SourceDocument, SourceItem,
};

/// Writes HLSL for every Direct3D 11 pipeline stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct D3d11Generator;

impl ShaderCodeGenerator for D3d11Generator {
    fn backend(&self) -> BackendKind {
        BackendKind::Direct3D11
    }

    fn supports_stage(&self, _stage: ShaderStage) -> bool {
        true
    }

    fn build_document(&self, reflection: &ShaderReflection) -> Result<SourceDocument, ShaderError> {
        let mut document = SourceDocument::new();
        document.comment(format!(
            "{} ({} shader, Direct3D 11)",
            reflection.name(),
            reflection.stage()
        ));
        document.blank();
        declare_resources(&mut document, reflection)?;

        match reflection.stage() {
            ShaderStage::Vertex | ShaderStage::Pixel => {
                basic::emit_vertex_pixel(&mut document, reflection)?
            }
            ShaderStage::Compute => basic::emit_compute(&mut document, reflection)?,
            ShaderStage::Hull => tessellation::emit_hull(&mut document, reflection)?,
            ShaderStage::Domain => tessellation::emit_domain(&mut document, reflection)?,
            ShaderStage::Geometry => geometry::emit(&mut document, reflection)?,
        }
        Ok(document)
    }
}

/// The semantic generated for a variable declared without one.
///
/// The upper-cased name, with an underscore appended when it ends in a digit
/// so that HLSL does not read the digits as a semantic index.
pub fn user_semantic(name: &str) -> String {
    let mut semantic = name.to_ascii_uppercase();
    if semantic.ends_with(|c: char| c.is_ascii_digit()) {
        semantic.push('_');
    }
    semantic
}

/// The semantic a variable is declared with.
pub fn semantic_of(variable: &IoVariable) -> String {
    variable
        .semantic
        .clone()
        .unwrap_or_else(|| user_semantic(&variable.name))
}

/// Semantic name and index of one element of a vertex input.
pub fn input_element_semantic(variable: &IoVariable, element: u32) -> (String, u32) {
    match variable.semantic_base() {
        Some(base) => (base, variable.semantic_index() + element),
        None => (user_semantic(&variable.name), element),
    }
}

pub(super) fn io_member(variable: &IoVariable, length: MemberLength) -> Result<MemberDecl, ShaderError> {
    let mut member = MemberDecl::new(variable.ty.hlsl_name(), variable.name.clone())
        .array(length.array_len())
        .annotate(semantic_of(variable));
    if let Some(modifier) = variable.interpolation.hlsl_modifier() {
        member = member.qualifier(modifier);
    }
    Ok(member)
}

fn declare_resources(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    hlsl::declare_global_code(document, reflection);
    hlsl::declare_structures(document, reflection);

    for buffer in reflection.uniform_buffers() {
        let members = buffer
            .members
            .iter()
            .map(|member| {
                hlsl::declaration(&member.ty, &member.name)
                    .annotate(format!("packoffset(c{})", member.offset / 16))
            })
            .collect();
        document.push(SourceItem::Block(BlockDecl {
            name: buffer.name.clone(),
            header: format!("cbuffer {} : register(b{})", buffer.name, buffer.slot),
            members,
        }));
        document.blank();
    }

    for sampler in reflection.samplers() {
        let ty = if sampler.comparison {
            "SamplerComparisonState"
        } else {
            "SamplerState"
        };
        document.push(SourceItem::Global(
            MemberDecl::new(ty, sampler.name.clone()).annotate(format!("register(s{})", sampler.slot)),
        ));
    }
    for srv in reflection.srvs() {
        let kind = srv
            .kind
            .hlsl_srv_name()
            .ok_or_else(|| ShaderError::unsupported(BackendKind::Direct3D11, srv.kind))?;
        document.push(SourceItem::Global(
            MemberDecl::new(format!("{kind}<{}>", srv.element.hlsl_name()), srv.name.clone())
                .annotate(format!("register(t{})", srv.slot)),
        ));
    }
    let stage = reflection.stage();
    for uav in reflection.uavs() {
        if !matches!(stage, ShaderStage::Pixel | ShaderStage::Compute) {
            return Err(ShaderError::unsupported(
                BackendKind::Direct3D11,
                format!("read-write view '{}' in a {stage} shader", uav.name),
            ));
        }
        let kind = uav
            .kind
            .hlsl_uav_name()
            .ok_or_else(|| ShaderError::unsupported(BackendKind::Direct3D11, uav.kind))?;
        document.push(SourceItem::Global(
            MemberDecl::new(format!("{kind}<{}>", uav.element.hlsl_name()), uav.name.clone())
                .annotate(format!("register(u{})", uav.slot)),
        ));
    }
    document.blank();

    for fixed in reflection.fixed_sampling() {
        document.define_fn(
            format!("SAMPLE_{}", fixed.srv),
            &["uv"],
            format!("{}.Sample({}, uv)", fixed.srv, fixed.sampler),
        );
        document.define_fn(
            format!("SAMPLE_LEVEL_{}", fixed.srv),
            &["uv", "lod"],
            format!("{}.SampleLevel({}, uv, lod)", fixed.srv, fixed.sampler),
        );
    }
    document.blank();
    Ok(())
}
