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

use super::{BackendKind, GraphicsBackend, InputLayoutId, ShaderId};
use crate::error::{ContextError, ShaderError};
use crate::settings::CompilerSettings;
use crate::shader::{
    build_layout_draft, compile_shader, CompileRequest, LayoutDraft, ShaderBytecode,
    ShaderMetadata, ShaderReflection, ShaderStage, VertexLayoutElement,
};
use std::collections::HashMap;
use std::sync::Arc;

/// A shader that went through generation and native compilation.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    /// Handle of the shader on its device.
    pub id: ShaderId,
    /// Logical shader name.
    pub name: String,
    /// Pipeline stage.
    pub stage: ShaderStage,
    /// Native profile the shader was compiled with.
    pub profile: String,
    /// The generated source handed to the compiler.
    pub source_text: String,
    /// Native bytecode.
    pub bytecode: ShaderBytecode,
    /// Stage-specific metadata.
    pub metadata: ShaderMetadata,
    /// The reflection the shader was generated from.
    pub reflection: Arc<ShaderReflection>,
}

/// Owns compiled shaders and input layouts for one backend.
pub struct Device<B: GraphicsBackend> {
    backend: B,
    settings: CompilerSettings,
    shaders: HashMap<ShaderId, Arc<CompiledShader>>,
    layout_drafts: HashMap<ShaderId, LayoutDraft<B::LayoutPartial>>,
    input_layouts: HashMap<InputLayoutId, (ShaderId, Vec<B::LayoutElement>)>,
    next_id: usize,
}

impl<B: GraphicsBackend> Device<B> {
    /// Creates a device around a backend.
    pub fn new(backend: B, settings: CompilerSettings) -> Self {
        log::info!("Creating {} device", backend.backend());
        Self {
            backend,
            settings,
            shaders: HashMap::new(),
            layout_drafts: HashMap::new(),
            input_layouts: HashMap::new(),
            next_id: 0,
        }
    }

    /// The backend kind.
    pub fn kind(&self) -> BackendKind {
        self.backend.backend()
    }

    /// The backend strategy.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The compiler settings.
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Creates a vertex shader.
    pub fn create_vertex_shader(
        &mut self,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        self.create_shader(ShaderStage::Vertex, reflection)
    }

    /// Creates a pixel shader.
    pub fn create_pixel_shader(
        &mut self,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        self.create_shader(ShaderStage::Pixel, reflection)
    }

    /// Creates a geometry shader.
    pub fn create_geometry_shader(
        &mut self,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        self.create_shader(ShaderStage::Geometry, reflection)
    }

    /// Creates a hull shader.
    pub fn create_hull_shader(
        &mut self,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        self.create_shader(ShaderStage::Hull, reflection)
    }

    /// Creates a domain shader.
    pub fn create_domain_shader(
        &mut self,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        self.create_shader(ShaderStage::Domain, reflection)
    }

    /// Creates a compute shader.
    pub fn create_compute_shader(
        &mut self,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        self.create_shader(ShaderStage::Compute, reflection)
    }

    fn create_shader(
        &mut self,
        stage: ShaderStage,
        reflection: Arc<ShaderReflection>,
    ) -> Result<ShaderId, ShaderError> {
        if reflection.stage() != stage {
            return Err(ShaderError::malformed(
                reflection.name(),
                format!(
                    "a {:?} reflection cannot create a {stage:?} shader",
                    reflection.stage()
                ),
            ));
        }
        if !self.backend.supports_stage(stage) {
            return Err(ShaderError::StageUnsupported {
                backend: self.kind(),
                stage,
            });
        }

        let metadata = ShaderMetadata::from_reflection(&reflection)?;
        let profile = self.backend.resolve_profile(&reflection)?;
        let source_text = self.backend.generate(&reflection)?;
        self.dump_source(&reflection, &source_text);

        let request = CompileRequest {
            source: &source_text,
            entry_point: self.backend.entry_point(stage),
            profile: &profile,
            stage,
            shader_name: reflection.name(),
        };
        let bytecode = compile_shader(self.backend.compiler(), &request, &self.settings)?;

        let draft = if stage == ShaderStage::Vertex {
            let backend = &self.backend;
            Some(build_layout_draft(&reflection, |variable, element, index| {
                backend.layout_partial(variable, element, index)
            })?)
        } else {
            None
        };

        let id = ShaderId(self.next_id);
        self.next_id += 1;
        if let Some(draft) = draft {
            self.layout_drafts.insert(id, draft);
        }
        log::info!(
            "{}: created {stage:?} shader '{}' ({profile}, {} bytes)",
            self.kind(),
            reflection.name(),
            bytecode.len()
        );
        self.shaders.insert(
            id,
            Arc::new(CompiledShader {
                id,
                name: reflection.name().to_string(),
                stage,
                profile,
                source_text,
                bytecode,
                metadata,
                reflection,
            }),
        );
        Ok(id)
    }

    fn dump_source(&self, reflection: &ShaderReflection, source: &str) {
        let Some(dir) = &self.settings.dump_dir else {
            return;
        };
        let path = dir.join(format!(
            "{}.{}.{}",
            reflection.name(),
            reflection.stage().profile_prefix(),
            self.backend.source_extension()
        ));
        let written = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, source));
        match written {
            Ok(()) => log::debug!("Dumped generated source to {}", path.display()),
            Err(e) => log::warn!("Failed to dump generated source to {}: {e}", path.display()),
        }
    }

    /// Looks up a compiled shader.
    pub fn shader(&self, id: ShaderId) -> Option<Arc<CompiledShader>> {
        self.shaders.get(&id).cloned()
    }

    /// Number of live shaders.
    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Destroys a shader and the input layouts created for it.
    pub fn destroy_shader(&mut self, id: ShaderId) -> Result<(), ContextError> {
        self.shaders
            .remove(&id)
            .ok_or(ContextError::UnknownShader(id))?;
        self.layout_drafts.remove(&id);
        self.input_layouts.retain(|_, (shader, _)| *shader != id);
        log::debug!("{}: destroyed shader {id:?}", self.kind());
        Ok(())
    }

    /// Number of layout elements a vertex shader requires.
    pub fn required_layout_len(&self, shader: ShaderId) -> Result<usize, ContextError> {
        Ok(self.layout_draft(shader)?.len())
    }

    fn layout_draft(&self, shader: ShaderId) -> Result<&LayoutDraft<B::LayoutPartial>, ContextError> {
        match self.shaders.get(&shader) {
            None => Err(ContextError::UnknownShader(shader)),
            Some(compiled) => self.layout_drafts.get(&shader).ok_or_else(|| {
                ContextError::StageMismatch {
                    id: shader,
                    expected: compiled.stage,
                    bound_to: ShaderStage::Vertex,
                }
            }),
        }
    }

    /// Creates an input layout feeding a vertex shader.
    ///
    /// # Arguments
    ///
    /// * `shader`: A vertex shader created on this device.
    /// * `elements`: Exactly one element per layout slot the shader requires.
    pub fn create_input_layout(
        &mut self,
        shader: ShaderId,
        elements: &[VertexLayoutElement],
    ) -> Result<InputLayoutId, ContextError> {
        let draft = self.layout_draft(shader)?;
        let backend = &self.backend;
        let native = draft.finalize(self.kind(), elements, |entry, element| {
            backend.layout_element(entry, element)
        })?;
        let id = InputLayoutId(self.next_id);
        self.next_id += 1;
        self.input_layouts.insert(id, (shader, native));
        Ok(id)
    }

    /// The native elements of an input layout.
    pub fn input_layout(&self, id: InputLayoutId) -> Option<&[B::LayoutElement]> {
        self.input_layouts
            .get(&id)
            .map(|(_, elements)| elements.as_slice())
    }
}
