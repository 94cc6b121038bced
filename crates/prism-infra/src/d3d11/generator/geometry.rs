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

use super::io_member;
use crate::hlsl;
use prism_core::error::ShaderError;
use prism_core::shader::{meta_keys, FunctionDecl, ShaderReflection, SourceDocument, SourceItem};

/// One output stream: its structure type and the identifiers used in code.
struct Stream {
    ty: String,
    local: String,
    parameter: String,
}

pub(super) fn emit(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    let max_vertex_count = reflection.max_vertex_count()?;
    let primitive = reflection.geometry_input_primitive()?;
    let stream_type = reflection.geometry_output_primitive()?.hlsl_stream_type();

    let input = hlsl::io_struct(document, reflection, "Input", reflection.input(), None, io_member)?;

    let mut streams = Vec::new();
    if reflection.output_streams().is_empty() {
        let ty =
            hlsl::io_struct(document, reflection, "Output", reflection.output(), None, io_member)?
                .ok_or_else(|| {
                    ShaderError::malformed(
                        reflection.name(),
                        "a geometry shader must output at least one used variable",
                    )
                })?;
        streams.push(Stream {
            ty,
            local: "output".to_string(),
            parameter: "outputStream".to_string(),
        });
    } else {
        for (k, stream) in reflection.output_streams().iter().enumerate() {
            let ty = hlsl::io_struct(
                document,
                reflection,
                &format!("Output{k}"),
                &stream.variables,
                None,
                io_member,
            )?
            .ok_or_else(|| {
                ShaderError::malformed(
                    reflection.name(),
                    format!("output stream '{}' has no used variables", stream.name),
                )
            })?;
            streams.push(Stream {
                ty,
                local: format!("output{k}"),
                parameter: format!("outputStream{k}"),
            });
        }
    }

    document.define_fn("INPUT", &["i", "x"], "input[i].x");
    for (k, stream) in streams.iter().enumerate() {
        let suffix = if reflection.output_streams().is_empty() {
            String::new()
        } else {
            k.to_string()
        };
        define_stream_macros(document, &suffix, stream);
    }
    document.blank();

    let mut attributes = vec![format!("maxvertexcount({max_vertex_count})")];
    if reflection.meta(meta_keys::INSTANCE_COUNT).is_some() {
        attributes.push(format!("instance({})", reflection.geometry_instance_count()?));
    }

    let mut params = Vec::new();
    if let Some(ty) = &input {
        params.push(format!(
            "{} {ty} input[{}]",
            primitive.hlsl_name(),
            primitive.input_vertex_count()
        ));
    }
    let mut body = Vec::new();
    for stream in &streams {
        params.push(format!(
            "inout {stream_type}<{}> {}",
            stream.ty, stream.parameter
        ));
        body.push(format!("    {ty} {local} = ({ty})0;", ty = stream.ty, local = stream.local));
    }
    body.extend(reflection.code_main().iter().cloned());

    document.push(SourceItem::Function(FunctionDecl {
        attributes,
        return_type: "void".to_string(),
        name: "main".to_string(),
        params,
        body,
    }));
    Ok(())
}

fn define_stream_macros(document: &mut SourceDocument, suffix: &str, stream: &Stream) {
    document.define_fn(
        format!("OUTPUT{suffix}"),
        &["x"],
        format!("{}.x", stream.local),
    );
    document.define_fn(
        format!("APPEND{suffix}"),
        &[],
        format!("{}.Append({})", stream.parameter, stream.local),
    );
    document.define_fn(
        format!("RESTART_STRIP{suffix}"),
        &[],
        format!("{}.RestartStrip()", stream.parameter),
    );
}
