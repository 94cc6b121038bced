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

use super::generator::D3d11Generator;
use super::input_layout::{input_element, input_semantic, InputElementDesc, InputSemantic};
use super::profile::D3d11Profile;
use crate::fxc::FxcCompiler;
use prism_core::device::{BackendKind, GraphicsBackend};
use prism_core::error::ShaderError;
use prism_core::settings::CompilerSettings;
use prism_core::shader::{
    IoVariable, LayoutEntry, ShaderCodeGenerator, ShaderCompiler, ShaderProfile,
    ShaderReflection, ShaderStage, SourceDocument, VertexLayoutElement,
};

/// The Direct3D 11 backend: HLSL shader model 4/5 for all six stages.
///
/// Generic over the native compiler so callers can substitute `fxc`.
#[derive(Debug, Clone)]
pub struct D3d11Backend<C = FxcCompiler> {
    generator: D3d11Generator,
    compiler: C,
}

impl D3d11Backend<FxcCompiler> {
    /// Creates a backend compiling through the `fxc` named in `settings`.
    pub fn from_settings(settings: &CompilerSettings) -> Self {
        Self::with_compiler(FxcCompiler::from_settings(settings))
    }
}

impl<C: ShaderCompiler> D3d11Backend<C> {
    /// Creates a backend around a specific compiler.
    pub fn with_compiler(compiler: C) -> Self {
        Self {
            generator: D3d11Generator,
            compiler,
        }
    }
}

impl<C: ShaderCompiler> ShaderCodeGenerator for D3d11Backend<C> {
    fn backend(&self) -> BackendKind {
        self.generator.backend()
    }

    fn supports_stage(&self, stage: ShaderStage) -> bool {
        self.generator.supports_stage(stage)
    }

    fn build_document(&self, reflection: &ShaderReflection) -> Result<SourceDocument, ShaderError> {
        self.generator.build_document(reflection)
    }
}

impl<C: ShaderCompiler> GraphicsBackend for D3d11Backend<C> {
    type LayoutPartial = InputSemantic;
    type LayoutElement = InputElementDesc;

    fn source_extension(&self) -> &'static str {
        "hlsl"
    }

    fn resolve_profile(&self, reflection: &ShaderReflection) -> Result<String, ShaderError> {
        let profile = if reflection.profile().is_empty() {
            D3d11Profile::latest(reflection.stage())
        } else {
            D3d11Profile::parse_for_stage(reflection.stage(), reflection.profile())?
        };
        Ok(profile.as_str().to_string())
    }

    fn compiler(&self) -> &dyn ShaderCompiler {
        &self.compiler
    }

    fn layout_partial(
        &self,
        variable: &IoVariable,
        element_index: u32,
        _layout_index: usize,
    ) -> Result<InputSemantic, ShaderError> {
        Ok(input_semantic(variable, element_index))
    }

    fn layout_element(
        &self,
        entry: &LayoutEntry<InputSemantic>,
        element: &VertexLayoutElement,
    ) -> Result<InputElementDesc, ShaderError> {
        input_element(entry, element)
    }
}
