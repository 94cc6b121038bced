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

use super::compiler::NagaGlslCompiler;
use super::generator::GlslGenerator;
use super::profile::GlslVersion;
use super::vertex_attributes::{
    attribute_location, vertex_attribute, AttributeLocation, VertexAttribute,
};
use prism_core::device::{BackendKind, GraphicsBackend};
use prism_core::error::ShaderError;
use prism_core::settings::CompilerSettings;
use prism_core::shader::{
    IoVariable, LayoutEntry, ShaderCodeGenerator, ShaderCompiler, ShaderProfile,
    ShaderReflection, ShaderStage, SourceDocument, VertexLayoutElement,
};

/// The OpenGL backend: GLSL 4.x for vertex, pixel and compute shaders,
/// compiled to SPIR-V in process.
#[derive(Debug, Clone)]
pub struct OpenGlBackend<C = NagaGlslCompiler> {
    generator: GlslGenerator,
    compiler: C,
}

impl OpenGlBackend<NagaGlslCompiler> {
    /// Creates a backend for the GLSL version named in `settings`.
    ///
    /// # Returns
    ///
    /// [`ShaderError::InvalidProfile`] when the configured version is not
    /// one of 440, 450 or 460.
    pub fn from_settings(settings: &CompilerSettings) -> Result<Self, ShaderError> {
        let version = GlslVersion::from_number(settings.glsl_version)?;
        Ok(Self::with_compiler(version, NagaGlslCompiler::new()))
    }
}

impl<C: ShaderCompiler> OpenGlBackend<C> {
    /// Creates a backend around a specific compiler.
    pub fn with_compiler(version: GlslVersion, compiler: C) -> Self {
        Self {
            generator: GlslGenerator::new(version),
            compiler,
        }
    }

    /// The version used for reflections whose profile names none.
    pub fn default_version(&self) -> GlslVersion {
        self.generator.default_version()
    }
}

impl<C: ShaderCompiler> ShaderCodeGenerator for OpenGlBackend<C> {
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

impl<C: ShaderCompiler> GraphicsBackend for OpenGlBackend<C> {
    type LayoutPartial = AttributeLocation;
    type LayoutElement = VertexAttribute;

    fn source_extension(&self) -> &'static str {
        "glsl"
    }

    /// Descriptions name Direct3D profiles; only an explicit GLSL version
    /// overrides the configured one.
    fn resolve_profile(&self, reflection: &ShaderReflection) -> Result<String, ShaderError> {
        Ok(self.generator.version_for(reflection).as_str().to_string())
    }

    fn compiler(&self) -> &dyn ShaderCompiler {
        &self.compiler
    }

    fn layout_partial(
        &self,
        _variable: &IoVariable,
        _element_index: u32,
        layout_index: usize,
    ) -> Result<AttributeLocation, ShaderError> {
        Ok(attribute_location(layout_index))
    }

    fn layout_element(
        &self,
        entry: &LayoutEntry<AttributeLocation>,
        element: &VertexLayoutElement,
    ) -> Result<VertexAttribute, ShaderError> {
        vertex_attribute(entry, element)
    }
}
