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

//! Reconciles a vertex shader's inputs with caller-supplied vertex layouts.
//!
//! A [`LayoutDraft`] is built once per vertex shader and holds one
//! backend-specific partial element per layout slot the inputs need. Each
//! call to [`LayoutDraft::finalize`] pairs the draft with a concrete element
//! list and produces the backend's native layout description.

use super::reflection::{IoVariable, ShaderReflection};
use super::stage::ShaderStage;
use super::types::BaseType;
use crate::device::BackendKind;
use crate::error::ShaderError;
use crate::format::ExplicitFormat;

/// One caller-supplied vertex layout element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexLayoutElement {
    /// Format of the attribute in the vertex buffer.
    pub format: ExplicitFormat,
    /// Vertex buffer slot the attribute is read from.
    pub input_slot: u32,
    /// Byte offset of the attribute within one vertex.
    pub offset: u32,
    /// Instances per step; zero means per-vertex data.
    pub instancing_rate: u32,
}

impl VertexLayoutElement {
    /// A per-vertex element.
    pub fn per_vertex(format: ExplicitFormat, input_slot: u32, offset: u32) -> Self {
        Self {
            format,
            input_slot,
            offset,
            instancing_rate: 0,
        }
    }

    /// A per-instance element advancing every `rate` instances.
    pub fn per_instance(format: ExplicitFormat, input_slot: u32, offset: u32, rate: u32) -> Self {
        Self {
            format,
            input_slot,
            offset,
            instancing_rate: rate,
        }
    }
}

/// One layout slot required by a shader input.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry<P> {
    /// Backend-specific partial element.
    pub partial: P,
    /// Index of the source variable in the shader's full input list.
    pub variable_index: usize,
    /// Name of the source variable.
    pub variable_name: String,
    /// Which element of the variable this slot feeds (matrix column, array element).
    pub element_index: u32,
    /// Scalar type the shader reads.
    pub base_type: BaseType,
}

/// Everything about a vertex layout that depends only on the shader.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDraft<P> {
    shader: String,
    entries: Vec<LayoutEntry<P>>,
}

/// Builds the layout draft of a vertex shader.
///
/// Every used, non system-value input contributes
/// [`layout_elements_required`](super::ShaderValueType::layout_elements_required)
/// entries in declaration order. `make_partial` receives the variable, the
/// element index within the variable and the running layout index.
pub fn build_layout_draft<P>(
    reflection: &ShaderReflection,
    mut make_partial: impl FnMut(&IoVariable, u32, usize) -> Result<P, ShaderError>,
) -> Result<LayoutDraft<P>, ShaderError> {
    if reflection.stage() != ShaderStage::Vertex {
        return Err(ShaderError::malformed(
            reflection.name(),
            format!(
                "input layouts need a vertex shader, not a {:?} shader",
                reflection.stage()
            ),
        ));
    }

    let mut entries = Vec::new();
    for (variable_index, variable) in reflection.input().iter().enumerate() {
        if !variable.is_used || variable.is_system_value() {
            continue;
        }
        let malformed = |reason: String| {
            ShaderError::malformed(
                reflection.name(),
                format!("input '{}': {reason}", variable.name),
            )
        };
        let count = variable.ty.layout_elements_required().map_err(malformed)?;
        let base_type = variable
            .ty
            .base_type()
            .ok_or_else(|| malformed("input has no scalar type".to_string()))?;
        for element_index in 0..count {
            let partial = make_partial(variable, element_index, entries.len())?;
            entries.push(LayoutEntry {
                partial,
                variable_index,
                variable_name: variable.name.clone(),
                element_index,
                base_type,
            });
        }
    }

    log::debug!(
        "Layout draft for '{}' requires {} elements",
        reflection.name(),
        entries.len()
    );
    Ok(LayoutDraft {
        shader: reflection.name().to_string(),
        entries,
    })
}

impl<P> LayoutDraft<P> {
    /// Number of layout elements the shader requires.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the shader reads no vertex data.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draft entries in layout order.
    pub fn entries(&self) -> &[LayoutEntry<P>] {
        &self.entries
    }

    /// Pairs the draft with `elements` and builds the native layout.
    ///
    /// # Arguments
    ///
    /// * `backend`: The backend that owns the draft, used in error reports.
    /// * `elements`: One element per draft entry, in the same order.
    /// * `finish`: Turns a partial element plus its caller element into the native element.
    ///
    /// # Returns
    ///
    /// The native elements, or [`ShaderError::LayoutLengthMismatch`] when the
    /// counts differ, or [`ShaderError::UnsupportedValue`] when a format cannot
    /// feed the shader input's scalar type. The length check happens before
    /// `finish` is called for any element.
    pub fn finalize<N>(
        &self,
        backend: BackendKind,
        elements: &[VertexLayoutElement],
        mut finish: impl FnMut(&LayoutEntry<P>, &VertexLayoutElement) -> Result<N, ShaderError>,
    ) -> Result<Vec<N>, ShaderError> {
        if elements.len() != self.entries.len() {
            return Err(ShaderError::LayoutLengthMismatch {
                shader: self.shader.clone(),
                expected: self.entries.len(),
                actual: elements.len(),
            });
        }
        self.entries
            .iter()
            .zip(elements)
            .map(|(entry, element)| {
                if !element.format.feeds(entry.base_type) {
                    return Err(ShaderError::UnsupportedValue {
                        backend,
                        value: format!(
                            "{:?} feeding {} input '{}'",
                            element.format,
                            entry.base_type.scalar_name(),
                            entry.variable_name
                        ),
                    });
                }
                finish(entry, element)
            })
            .collect()
    }
}
