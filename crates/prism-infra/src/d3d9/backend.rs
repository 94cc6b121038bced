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

use super::generator::D3d9Generator;
use super::profile::D3d9Profile;
use super::vertex_declaration::{decl_usage, vertex_element, DeclUsage, VertexDeclaration};
use crate::fxc::FxcCompiler;
use prism_core::device::{BackendKind, GraphicsBackend};
use prism_core::error::ShaderError;
use prism_core::settings::CompilerSettings;
use prism_core::shader::{
    IoVariable, LayoutEntry, ShaderCodeGenerator, ShaderCompiler, ShaderProfile,
    ShaderReflection, ShaderStage, SourceDocument, VertexLayoutElement,
};

/// The Direct3D 9 backend: HLSL shader model 3 for vertex and pixel shaders.
#[derive(Debug, Clone)]
pub struct D3d9Backend<C = FxcCompiler> {
    generator: D3d9Generator,
    compiler: C,
}

impl D3d9Backend<FxcCompiler> {
    /// Creates a backend compiling through the `fxc` named in `settings`.
    pub fn from_settings(settings: &CompilerSettings) -> Self {
        Self::with_compiler(FxcCompiler::from_settings(settings))
    }
}

impl<C: ShaderCompiler> D3d9Backend<C> {
    /// Creates a backend around a specific compiler.
    pub fn with_compiler(compiler: C) -> Self {
        Self {
            generator: D3d9Generator,
            compiler,
        }
    }
}

impl<C: ShaderCompiler> ShaderCodeGenerator for D3d9Backend<C> {
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

/// Picks the shader model 3 profile for a reflection.
///
/// Descriptions are usually written for the newest backend, so a profile of
/// the right stage that Direct3D 9 does not know (`ps_5_0`) compiles at
/// shader model 3 instead of failing. Profiles of another stage, or strings
/// that name no stage at all, are rejected.
pub fn resolve_d3d9_profile(
    stage: ShaderStage,
    profile: &str,
) -> Result<D3d9Profile, ShaderError> {
    let fallback = D3d9Profile::shader_model_3(stage).ok_or(ShaderError::StageUnsupported {
        backend: BackendKind::Direct3D9,
        stage,
    })?;
    if profile.is_empty() {
        return Ok(fallback);
    }
    if let Ok(exact) = D3d9Profile::parse_for_stage(stage, profile) {
        return Ok(exact);
    }
    if ShaderStage::from_profile(profile) == Some(stage) {
        log::debug!("Compiling a {profile} shader at {fallback}");
        return Ok(fallback);
    }
    Err(ShaderError::InvalidProfile {
        stage: Some(stage),
        profile: profile.to_string(),
    })
}

impl<C: ShaderCompiler> GraphicsBackend for D3d9Backend<C> {
    type LayoutPartial = DeclUsage;
    type LayoutElement = VertexDeclaration;

    fn source_extension(&self) -> &'static str {
        "hlsl"
    }

    fn resolve_profile(&self, reflection: &ShaderReflection) -> Result<String, ShaderError> {
        let profile = resolve_d3d9_profile(reflection.stage(), reflection.profile())?;
        Ok(profile.as_str().to_string())
    }

    fn compiler(&self) -> &dyn ShaderCompiler {
        &self.compiler
    }

    fn layout_partial(
        &self,
        variable: &IoVariable,
        element_index: u32,
        layout_index: usize,
    ) -> Result<DeclUsage, ShaderError> {
        decl_usage(variable, element_index, layout_index)
    }

    fn layout_element(
        &self,
        entry: &LayoutEntry<DeclUsage>,
        element: &VertexLayoutElement,
    ) -> Result<VertexDeclaration, ShaderError> {
        vertex_element(entry, element)
    }
}
