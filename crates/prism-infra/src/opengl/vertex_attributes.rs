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

use super::conversions::{GlVertexFormat, IntoGl};
use prism_core::error::ShaderError;
use prism_core::shader::{LayoutEntry, VertexLayoutElement};

/// The shader-dependent half of a vertex attribute: its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLocation {
    /// `layout(location = n)` of the generated input.
    pub location: u32,
}

/// One vertex attribute of a vertex array object, as `glVertexAttribFormat`,
/// `glVertexAttribBinding` and `glVertexBindingDivisor` take it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location.
    pub location: u32,
    /// Vertex buffer binding index.
    pub binding: u32,
    /// Component layout.
    pub format: GlVertexFormat,
    /// Byte offset within one vertex.
    pub relative_offset: u32,
    /// Instances drawn per step; zero for per-vertex data.
    pub divisor: u32,
}

pub(super) fn attribute_location(layout_index: usize) -> AttributeLocation {
    AttributeLocation {
        location: layout_index as u32,
    }
}

pub(super) fn vertex_attribute(
    entry: &LayoutEntry<AttributeLocation>,
    element: &VertexLayoutElement,
) -> Result<VertexAttribute, ShaderError> {
    Ok(VertexAttribute {
        location: entry.partial.location,
        binding: element.input_slot,
        format: element.format.into_gl()?,
        relative_offset: element.offset,
        divisor: element.instancing_rate,
    })
}
