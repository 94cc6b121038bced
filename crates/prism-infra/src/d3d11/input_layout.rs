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

use super::conversions::IntoD3d11;
use super::generator::input_element_semantic;
use super::native::{D3d11InputClassification, DxgiFormat};
use prism_core::error::ShaderError;
use prism_core::shader::{IoVariable, LayoutEntry, VertexLayoutElement};

/// The shader-dependent half of an input element: its semantic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSemantic {
    /// Semantic name without index.
    pub name: String,
    /// Semantic index.
    pub index: u32,
}

/// A `D3D11_INPUT_ELEMENT_DESC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElementDesc {
    /// Semantic name matching the vertex shader input.
    pub semantic_name: String,
    /// Semantic index matching the vertex shader input.
    pub semantic_index: u32,
    /// Data format.
    pub format: DxgiFormat,
    /// Vertex buffer slot.
    pub input_slot: u32,
    /// Byte offset within one vertex.
    pub aligned_byte_offset: u32,
    /// Per-vertex or per-instance data.
    pub input_slot_class: D3d11InputClassification,
    /// Instances drawn per step for per-instance data.
    pub instance_data_step_rate: u32,
}

pub(super) fn input_semantic(variable: &IoVariable, element: u32) -> InputSemantic {
    let (name, index) = input_element_semantic(variable, element);
    InputSemantic { name, index }
}

pub(super) fn input_element(
    entry: &LayoutEntry<InputSemantic>,
    element: &VertexLayoutElement,
) -> Result<InputElementDesc, ShaderError> {
    let (input_slot_class, instance_data_step_rate) = match element.instancing_rate {
        0 => (D3d11InputClassification::PER_VERTEX_DATA, 0),
        rate => (D3d11InputClassification::PER_INSTANCE_DATA, rate),
    };
    Ok(InputElementDesc {
        semantic_name: entry.partial.name.clone(),
        semantic_index: entry.partial.index,
        format: element.format.into_d3d11()?,
        input_slot: element.input_slot,
        aligned_byte_offset: element.offset,
        input_slot_class,
        instance_data_step_rate,
    })
}
