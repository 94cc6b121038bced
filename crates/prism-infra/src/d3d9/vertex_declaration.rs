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

use super::conversions::IntoD3d9;
use super::native::{D3dDeclType, D3dDeclUsage};
use prism_core::device::BackendKind;
use prism_core::error::ShaderError;
use prism_core::shader::{IoVariable, LayoutEntry, VertexLayoutElement};

/// Usage indices a vertex declaration can address.
const MAX_USAGE_INDEX: u32 = 15;

/// The shader-dependent half of a vertex element: its usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclUsage {
    /// `D3DDECLUSAGE_*` value.
    pub usage: D3dDeclUsage,
    /// Usage index.
    pub index: u32,
}

/// A `D3DVERTEXELEMENT9` plus the stream frequency of its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexDeclaration {
    /// Vertex stream.
    pub stream: u16,
    /// Byte offset within one vertex of the stream.
    pub offset: u16,
    /// Data type.
    pub decl_type: D3dDeclType,
    /// Usage matching the vertex shader input semantic.
    pub usage: D3dDeclUsage,
    /// Usage index matching the vertex shader input semantic.
    pub usage_index: u8,
    /// Instances drawn per step; zero for per-vertex data.
    pub instancing_rate: u32,
}

fn usage_of(base: &str) -> Option<D3dDeclUsage> {
    Some(match base {
        "POSITION" => D3dDeclUsage::POSITION,
        "BLENDWEIGHT" => D3dDeclUsage::BLENDWEIGHT,
        "BLENDINDICES" => D3dDeclUsage::BLENDINDICES,
        "NORMAL" => D3dDeclUsage::NORMAL,
        "PSIZE" => D3dDeclUsage::PSIZE,
        "TEXCOORD" => D3dDeclUsage::TEXCOORD,
        "TANGENT" => D3dDeclUsage::TANGENT,
        "BINORMAL" => D3dDeclUsage::BINORMAL,
        "TESSFACTOR" => D3dDeclUsage::TESSFACTOR,
        "POSITIONT" => D3dDeclUsage::POSITIONT,
        "COLOR" => D3dDeclUsage::COLOR,
        "FOG" => D3dDeclUsage::FOG,
        "DEPTH" => D3dDeclUsage::DEPTH,
        "SAMPLE" => D3dDeclUsage::SAMPLE,
        _ => return None,
    })
}

/// Usage of one element of a vertex input.
///
/// Inputs declared without a semantic read `TEXCOORDn` at their layout position.
pub fn decl_usage(
    variable: &IoVariable,
    element: u32,
    layout_index: usize,
) -> Result<DeclUsage, ShaderError> {
    let (usage, index) = match variable.semantic_base() {
        None => (D3dDeclUsage::TEXCOORD, layout_index as u32),
        Some(base) => {
            let usage = usage_of(&base).ok_or_else(|| {
                ShaderError::unsupported(
                    BackendKind::Direct3D9,
                    format!("vertex input semantic {base} on '{}'", variable.name),
                )
            })?;
            (usage, variable.semantic_index() + element)
        }
    };
    if index > MAX_USAGE_INDEX {
        return Err(ShaderError::unsupported(
            BackendKind::Direct3D9,
            format!("usage index {index} on '{}'", variable.name),
        ));
    }
    Ok(DeclUsage { usage, index })
}

pub(super) fn vertex_element(
    entry: &LayoutEntry<DeclUsage>,
    element: &VertexLayoutElement,
) -> Result<VertexDeclaration, ShaderError> {
    let narrow = |what: &str, value: u32| {
        u16::try_from(value).map_err(|_| {
            ShaderError::unsupported(
                BackendKind::Direct3D9,
                format!("{what} {value} for '{}'", entry.variable_name),
            )
        })
    };
    Ok(VertexDeclaration {
        stream: narrow("stream", element.input_slot)?,
        offset: narrow("offset", element.offset)?,
        decl_type: element.format.into_d3d9()?,
        usage: entry.partial.usage,
        usage_index: entry.partial.index as u8,
        instancing_rate: element.instancing_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::format::ExplicitFormat;
    use prism_core::shader::{BaseType, ShaderValueType};

    #[test]
    fn unnamed_inputs_use_their_layout_position() {
        let uv = IoVariable::new(ShaderValueType::float(2), "Uv");
        assert_eq!(
            decl_usage(&uv, 0, 3).unwrap(),
            DeclUsage {
                usage: D3dDeclUsage::TEXCOORD,
                index: 3
            }
        );
        let weights = IoVariable::new(ShaderValueType::float(4), "W").with_semantic("BLENDWEIGHT1");
        assert_eq!(decl_usage(&weights, 0, 0).unwrap().usage, D3dDeclUsage::BLENDWEIGHT);
        assert_eq!(decl_usage(&weights, 0, 0).unwrap().index, 1);
    }

    #[test]
    fn unknown_semantics_and_large_indices_are_rejected() {
        let odd = IoVariable::new(ShaderValueType::float(4), "X").with_semantic("BONES");
        assert!(decl_usage(&odd, 0, 0).is_err());
        let far = IoVariable::new(ShaderValueType::float(4), "X").with_semantic("TEXCOORD15");
        assert!(decl_usage(&far, 1, 0).is_err());
    }

    #[test]
    fn elements_carry_stream_and_type() {
        let entry = LayoutEntry {
            partial: DeclUsage {
                usage: D3dDeclUsage::COLOR,
                index: 0,
            },
            variable_index: 0,
            variable_name: "Color".into(),
            element_index: 0,
            base_type: BaseType::Float,
        };
        let declaration = vertex_element(
            &entry,
            &VertexLayoutElement::per_instance(ExplicitFormat::B8G8R8A8Unorm, 1, 12, 1),
        )
        .unwrap();
        assert_eq!(declaration.stream, 1);
        assert_eq!(declaration.offset, 12);
        assert_eq!(declaration.decl_type, D3dDeclType::D3DCOLOR);
        assert_eq!(declaration.instancing_rate, 1);

        let too_far = VertexLayoutElement::per_vertex(ExplicitFormat::R32Float, 0, 70_000);
        assert!(vertex_element(&entry, &too_far).is_err());
    }
}
