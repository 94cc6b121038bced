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
use prism_core::shader::{ShaderReflection, SourceDocument};

pub(super) fn emit_vertex_pixel(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    let input = hlsl::io_struct(document, reflection, "Input", reflection.input(), None, io_member)?;
    let output =
        hlsl::io_struct(document, reflection, "Output", reflection.output(), None, io_member)?;

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
    Ok(())
}

pub(super) fn emit_compute(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
) -> Result<(), ShaderError> {
    let [x, y, z] = reflection.thread_group_size()?;
    let input = hlsl::io_struct(document, reflection, "Input", reflection.input(), None, io_member)?;

    document.define_fn("INPUT", &["x"], "input.x");
    document.blank();

    let params = input.iter().map(|ty| format!("{ty} input")).collect();
    document.push(hlsl::entry_point(
        vec![format!("numthreads({x}, {y}, {z})")],
        None,
        params,
        reflection.code_main(),
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::D3d11Generator;
    use prism_core::shader::{
        meta_keys, IoVariable, ShaderCodeGenerator, ShaderReflectionBuilder, ShaderStage,
        ShaderValueType,
    };

    #[test]
    fn vertex_shader_without_used_outputs_returns_void() {
        let reflection = ShaderReflectionBuilder::new("Stream", ShaderStage::Vertex)
            .input(IoVariable::new(ShaderValueType::float(3), "Position"))
            .output(IoVariable::new(ShaderValueType::float(4), "Position").with_semantic("SV_Position").unused())
            .build()
            .unwrap();
        let document = D3d11Generator.build_document(&reflection).unwrap();
        assert!(document.find_struct("VS_Output").is_none());
        let main = document.find_function("main").unwrap();
        assert_eq!(main.return_type, "void");
        assert_eq!(main.params, ["VS_Input input"]);
    }

    #[test]
    fn compute_shader_declares_thread_group() {
        let reflection = ShaderReflectionBuilder::new("Blur", ShaderStage::Compute)
            .meta(meta_keys::THREAD_COUNT_X, 8)
            .meta(meta_keys::THREAD_COUNT_Y, 4)
            .meta(meta_keys::THREAD_COUNT_Z, 1)
            .input(
                IoVariable::new(
                    ShaderValueType::Vector {
                        base: prism_core::shader::BaseType::UInt,
                        width: 3,
                    },
                    "Id",
                )
                .with_semantic("SV_DispatchThreadID"),
            )
            .build()
            .unwrap();
        let document = D3d11Generator.build_document(&reflection).unwrap();
        let main = document.find_function("main").unwrap();
        assert_eq!(main.attributes, ["numthreads(8, 4, 1)"]);
        assert_eq!(main.params, ["CS_Input input"]);
        assert!(document
            .render()
            .contains("uint3 Id : SV_DispatchThreadID;"));
    }
}
