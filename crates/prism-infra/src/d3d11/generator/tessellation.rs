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

//! Hull and domain stages.
//!
//! Both sides of a patch size their tessellation factor arrays from the same
//! domain table, so the hull's patch output and the domain's patch input always
//! agree on member lengths.

use super::io_member;
use crate::hlsl;
use prism_core::error::ShaderError;
use prism_core::shader::{FunctionDecl, ShaderReflection, SourceDocument, SourceItem};

const PATCH_CONSTANT_FUNCTION: &str = "PatchConstantFunction";

pub(super) fn emit_hull(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    let domain = reflection.tessellation_domain()?;
    let partitioning = reflection.partitioning()?;
    let topology = reflection.output_topology()?;
    let input_points = reflection.input_control_points()?;
    let output_points = reflection.output_control_points()?;
    let max_tess_factor = reflection.max_tess_factor()?;

    let input = hlsl::io_struct(document, reflection, "Input", reflection.input(), None, io_member)?;
    let output =
        hlsl::io_struct(document, reflection, "Output", reflection.output(), None, io_member)?;
    let patch = hlsl::io_struct(
        document,
        reflection,
        "OutputPatch",
        reflection.output_patch(),
        Some(domain),
        io_member,
    )?
    .ok_or_else(|| {
        ShaderError::malformed(
            reflection.name(),
            "a hull shader must output its tessellation factors as patch constants",
        )
    })?;

    document.define_fn("INPUT", &["i", "x"], "input[i].x");
    document.define_fn("OUTPUT", &["x"], "output.x");
    document.define_fn("PATCH", &["x"], "patch.x");
    document.define("CONTROL_POINT_ID", "controlPointId");
    document.define("PRIMITIVE_ID", "primitiveId");
    document.blank();

    let input_patch = input
        .as_ref()
        .map(|ty| format!("InputPatch<{ty}, {input_points}> input"));

    let mut patch_params: Vec<String> = input_patch.iter().cloned().collect();
    patch_params.push("uint primitiveId : SV_PrimitiveID".to_string());
    document.push(SourceItem::Function(FunctionDecl {
        attributes: Vec::new(),
        return_type: patch.clone(),
        name: PATCH_CONSTANT_FUNCTION.to_string(),
        params: patch_params,
        body: hlsl::returning_body(Some((&patch, "patch")), reflection.code_patch()),
    }));
    document.blank();

    let mut params: Vec<String> = input_patch.into_iter().collect();
    params.push("uint controlPointId : SV_OutputControlPointID".to_string());
    params.push("uint primitiveId : SV_PrimitiveID".to_string());
    let attributes = vec![
        format!("domain(\"{}\")", domain.hlsl_name()),
        format!("partitioning(\"{}\")", partitioning.hlsl_name()),
        format!("outputtopology(\"{}\")", topology.hlsl_name()),
        format!("outputcontrolpoints({output_points})"),
        format!("patchconstantfunc(\"{PATCH_CONSTANT_FUNCTION}\")"),
        format!("maxtessfactor({max_tess_factor:?})"),
    ];
    document.push(hlsl::entry_point(
        attributes,
        output.as_deref(),
        params,
        reflection.code_main(),
    ));
    Ok(())
}

pub(super) fn emit_domain(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    let domain = reflection.tessellation_domain()?;
    let control_points = reflection.input_control_points()?;

    let input = hlsl::io_struct(document, reflection, "Input", reflection.input(), None, io_member)?;
    let patch = hlsl::io_struct(
        document,
        reflection,
        "InputPatch",
        reflection.input_patch(),
        Some(domain),
        io_member,
    )?;
    let extra = hlsl::io_struct(
        document,
        reflection,
        "InputExtra",
        reflection.input_extra(),
        None,
        io_member,
    )?;
    let output =
        hlsl::io_struct(document, reflection, "Output", reflection.output(), None, io_member)?;

    document.define_fn("INPUT", &["i", "x"], "input[i].x");
    document.define_fn("PATCH", &["x"], "patch.x");
    document.define_fn("EXTRA", &["x"], "extra.x");
    document.define_fn("OUTPUT", &["x"], "output.x");
    document.blank();

    let mut params = Vec::new();
    if let Some(ty) = &input {
        params.push(format!("OutputPatch<{ty}, {control_points}> input"));
    }
    if let Some(ty) = &patch {
        params.push(format!("{ty} patch"));
    }
    if let Some(ty) = &extra {
        params.push(format!("{ty} extra"));
    }
    document.push(hlsl::entry_point(
        vec![format!("domain(\"{}\")", domain.hlsl_name())],
        output.as_deref(),
        params,
        reflection.code_main(),
    ));
    Ok(())
}
