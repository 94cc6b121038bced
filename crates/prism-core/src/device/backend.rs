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

use crate::error::ShaderError;
use crate::shader::{
    IoVariable, LayoutEntry, ShaderCodeGenerator, ShaderCompiler, ShaderReflection, ShaderStage,
    VertexLayoutElement,
};
use std::fmt::Debug;

/// The strategy a [`Device`](super::Device) uses to target one native API.
///
/// A backend is a code generator plus everything else that differs per API:
/// profile selection, the native compiler, and input layout construction.
/// Concrete backends live in `prism-infra`.
pub trait GraphicsBackend: ShaderCodeGenerator {
    /// Shader-dependent part of one native vertex layout element.
    type LayoutPartial: Clone + Debug;
    /// One native vertex layout element.
    type LayoutElement: Clone + Debug;

    /// File extension used when dumping generated sources (`hlsl`, `glsl`).
    fn source_extension(&self) -> &'static str;

    /// Chooses and validates the native profile for a reflection.
    ///
    /// # Returns
    ///
    /// The profile string handed to the compiler, or
    /// [`ShaderError::InvalidProfile`] when the reflection asks for a profile
    /// the backend does not know for its stage.
    fn resolve_profile(&self, reflection: &ShaderReflection) -> Result<String, ShaderError>;

    /// Name of the entry point generated for `stage`.
    fn entry_point(&self, _stage: ShaderStage) -> &'static str {
        "main"
    }

    /// The native compiler.
    fn compiler(&self) -> &dyn ShaderCompiler;

    /// Builds the shader-dependent part of one layout element.
    ///
    /// # Arguments
    ///
    /// * `variable`: The vertex shader input being fed.
    /// * `element_index`: Which element of the variable (matrix column or array element).
    /// * `layout_index`: Position of the element in the whole layout.
    fn layout_partial(
        &self,
        variable: &IoVariable,
        element_index: u32,
        layout_index: usize,
    ) -> Result<Self::LayoutPartial, ShaderError>;

    /// Completes a partial element with a caller-supplied element.
    fn layout_element(
        &self,
        entry: &LayoutEntry<Self::LayoutPartial>,
        element: &VertexLayoutElement,
    ) -> Result<Self::LayoutElement, ShaderError>;
}
