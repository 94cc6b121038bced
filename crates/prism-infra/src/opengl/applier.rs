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

use super::conversions::IntoGl;
use super::generator::{SAMPLER_BINDING_BASE, SRV_BINDING_BASE, UAV_BINDING_BASE, UNIFORM_BINDING_BASE};
use super::native::{GlFace, GlPolygonMode, GlPrimitive, GlType};
use prism_core::device::{
    BackendKind, BufferId, CompiledShader, IndexBufferBinding, InputLayoutId, SamplerId,
    ScissorRect, ShaderId, StateApplier, TextureViewId, VertexBufferBinding, Viewport,
};
use prism_core::error::ShaderError;
use prism_core::format::{CullMode, FillMode, IndexFormat, PrimitiveTopology};
use prism_core::shader::ShaderStage;

/// One OpenGL call, with translated arguments.
///
/// Binding points are global in OpenGL; the recorded binding is the slot
/// offset by the base of its category.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum GlCommand {
    BindVertexArray(Option<InputLayoutId>),
    BindVertexBuffers {
        first: u32,
        buffers: Vec<Option<VertexBufferBinding>>,
    },
    BindElementBuffer(Option<BufferId>),
    UseProgramStage(ShaderStage, Option<ShaderId>),
    BindUniformBuffers {
        first: u32,
        buffers: Vec<Option<BufferId>>,
    },
    BindSamplers {
        first: u32,
        samplers: Vec<Option<SamplerId>>,
    },
    BindTextures {
        first: u32,
        views: Vec<Option<TextureViewId>>,
    },
    BindImageTextures {
        first: u32,
        views: Vec<Option<TextureViewId>>,
    },
    /// `None` disables `GL_CULL_FACE`.
    CullFace(Option<GlFace>),
    PolygonMode(GlPolygonMode),
    ViewportArray(Vec<Viewport>),
    ScissorArray(Vec<ScissorRect>),
    DrawBuffers {
        targets: Vec<Option<TextureViewId>>,
        depth_stencil: Option<TextureViewId>,
    },
    DrawArrays {
        mode: GlPrimitive,
        first: u32,
        count: u32,
    },
    DrawElementsBaseVertex {
        mode: GlPrimitive,
        count: u32,
        index_type: GlType,
        /// Byte offset of the first index in the element buffer.
        offset: u32,
        base_vertex: i32,
    },
    DispatchCompute([u32; 3]),
}

/// Translates flushed state into OpenGL calls and records them.
///
/// OpenGL draws take the mode and the index type as arguments, so both are
/// remembered here and applied at draw time.
#[derive(Debug)]
pub struct GlStateApplier {
    mode: GlPrimitive,
    index: Option<(IndexFormat, u32)>,
    commands: Vec<GlCommand>,
}

impl Default for GlStateApplier {
    fn default() -> Self {
        Self {
            mode: GlPrimitive::TRIANGLES,
            index: None,
            commands: Vec::new(),
        }
    }
}

impl GlStateApplier {
    /// Creates an applier with an empty command list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[GlCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<GlCommand> {
        std::mem::take(&mut self.commands)
    }

    fn has_stage(stage: ShaderStage) -> bool {
        matches!(
            stage,
            ShaderStage::Vertex | ShaderStage::Pixel | ShaderStage::Compute
        )
    }
}

fn binding(base: u32, slot: usize) -> u32 {
    base + slot as u32
}

impl StateApplier for GlStateApplier {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<(), ShaderError> {
        self.mode = topology.into_gl()?;
        Ok(())
    }

    fn set_input_layout(&mut self, layout: Option<InputLayoutId>) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::BindVertexArray(layout));
        Ok(())
    }

    fn set_vertex_buffers(
        &mut self,
        first_slot: usize,
        buffers: &[Option<VertexBufferBinding>],
    ) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::BindVertexBuffers {
            first: first_slot as u32,
            buffers: buffers.to_vec(),
        });
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: Option<&IndexBufferBinding>) -> Result<(), ShaderError> {
        self.index = match buffer {
            Some(binding) => {
                let _: GlType = binding.format.into_gl()?;
                Some((binding.format, binding.offset))
            }
            None => None,
        };
        self.commands
            .push(GlCommand::BindElementBuffer(buffer.map(|b| b.buffer)));
        Ok(())
    }

    fn set_shader(
        &mut self,
        stage: ShaderStage,
        shader: Option<&CompiledShader>,
    ) -> Result<(), ShaderError> {
        match shader {
            Some(_) if !Self::has_stage(stage) => Err(ShaderError::StageUnsupported {
                backend: BackendKind::OpenGL,
                stage,
            }),
            _ if !Self::has_stage(stage) => Ok(()),
            shader => {
                self.commands
                    .push(GlCommand::UseProgramStage(stage, shader.map(|s| s.id)));
                Ok(())
            }
        }
    }

    fn set_uniform_buffers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        buffers: &[Option<BufferId>],
    ) -> Result<(), ShaderError> {
        if Self::has_stage(stage) {
            self.commands.push(GlCommand::BindUniformBuffers {
                first: binding(UNIFORM_BINDING_BASE, first_slot),
                buffers: buffers.to_vec(),
            });
        }
        Ok(())
    }

    fn set_samplers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        samplers: &[Option<SamplerId>],
    ) -> Result<(), ShaderError> {
        if Self::has_stage(stage) {
            self.commands.push(GlCommand::BindSamplers {
                first: binding(SAMPLER_BINDING_BASE, first_slot),
                samplers: samplers.to_vec(),
            });
        }
        Ok(())
    }

    fn set_srvs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError> {
        if Self::has_stage(stage) {
            self.commands.push(GlCommand::BindTextures {
                first: binding(SRV_BINDING_BASE, first_slot),
                views: views.to_vec(),
            });
        }
        Ok(())
    }

    fn set_uavs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError> {
        if Self::has_stage(stage) && !views.is_empty() {
            self.commands.push(GlCommand::BindImageTextures {
                first: binding(UAV_BINDING_BASE, first_slot),
                views: views.to_vec(),
            });
        }
        Ok(())
    }

    fn set_rasterizer(&mut self, cull: CullMode, fill: FillMode) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::CullFace(cull.into_gl()?));
        self.commands.push(GlCommand::PolygonMode(fill.into_gl()?));
        Ok(())
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), ShaderError> {
        self.commands
            .push(GlCommand::ViewportArray(viewports.to_vec()));
        Ok(())
    }

    fn set_scissor_rects(&mut self, rects: &[ScissorRect]) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::ScissorArray(rects.to_vec()));
        Ok(())
    }

    fn set_render_targets(
        &mut self,
        targets: &[Option<TextureViewId>],
        depth_stencil: Option<TextureViewId>,
    ) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::DrawBuffers {
            targets: targets.to_vec(),
            depth_stencil,
        });
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::DrawArrays {
            mode: self.mode,
            first: start_vertex,
            count: vertex_count,
        });
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ShaderError> {
        let (format, offset) = self.index.unwrap_or((IndexFormat::Uint16, 0));
        self.commands.push(GlCommand::DrawElementsBaseVertex {
            mode: self.mode,
            count: index_count,
            index_type: format.into_gl()?,
            offset: offset + start_index * format.size(),
            base_vertex,
        });
        Ok(())
    }

    fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<(), ShaderError> {
        self.commands.push(GlCommand::DispatchCompute([x, y, z]));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_draws_use_the_bound_index_type() {
        let mut applier = GlStateApplier::new();
        applier
            .set_index_buffer(Some(&IndexBufferBinding {
                buffer: BufferId(3),
                format: IndexFormat::Uint32,
                offset: 8,
            }))
            .unwrap();
        applier
            .set_primitive_topology(PrimitiveTopology::LineStrip)
            .unwrap();
        applier.draw_indexed(10, 2, 5).unwrap();
        assert_eq!(
            applier.take_commands(),
            [
                GlCommand::BindElementBuffer(Some(BufferId(3))),
                GlCommand::DrawElementsBaseVertex {
                    mode: GlPrimitive::LINE_STRIP,
                    count: 10,
                    index_type: GlType::UNSIGNED_INT,
                    offset: 16,
                    base_vertex: 5
                }
            ]
        );
    }

    #[test]
    fn bindings_are_offset_by_category() {
        let mut applier = GlStateApplier::new();
        applier
            .set_srvs(ShaderStage::Pixel, 2, &[Some(TextureViewId(1))])
            .unwrap();
        applier.set_samplers(ShaderStage::Pixel, 0, &[None]).unwrap();
        assert_eq!(
            applier.commands(),
            [
                GlCommand::BindTextures {
                    first: 34,
                    views: vec![Some(TextureViewId(1))]
                },
                GlCommand::BindSamplers {
                    first: 16,
                    samplers: vec![None]
                }
            ]
        );
    }

    #[test]
    fn tessellation_and_geometry_stages_stay_unbound() {
        let mut applier = GlStateApplier::new();
        applier.set_shader(ShaderStage::Geometry, None).unwrap();
        applier
            .set_uniform_buffers(ShaderStage::Hull, 0, &[None])
            .unwrap();
        assert!(applier.commands().is_empty());
        applier.set_rasterizer(CullMode::None, FillMode::Wireframe).unwrap();
        assert_eq!(
            applier.commands(),
            [
                GlCommand::CullFace(None),
                GlCommand::PolygonMode(GlPolygonMode::LINE)
            ]
        );
    }
}
