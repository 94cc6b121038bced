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
use super::native::{D3dCull, D3dFillMode, D3dFormat, D3dPrimitiveType};
use prism_core::device::{
    BackendKind, BufferId, CompiledShader, IndexBufferBinding, InputLayoutId, SamplerId,
    ScissorRect, ShaderId, StateApplier, TextureViewId, VertexBufferBinding, Viewport,
};
use prism_core::error::ShaderError;
use prism_core::format::{CullMode, FillMode, PrimitiveTopology};
use prism_core::shader::ShaderStage;

/// One native call on an `IDirect3DDevice9`, with translated arguments.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum D3d9Command {
    SetVertexDeclaration(Option<InputLayoutId>),
    SetStreamSource {
        stream: usize,
        binding: Option<VertexBufferBinding>,
    },
    SetIndices {
        buffer: Option<BufferId>,
        format: D3dFormat,
    },
    SetShader(ShaderStage, Option<ShaderId>),
    /// Uploads buffer contents into consecutive constant register ranges.
    SetShaderConstants {
        stage: ShaderStage,
        start_slot: usize,
        buffers: Vec<Option<BufferId>>,
    },
    SetSamplerStates {
        stage: ShaderStage,
        start_slot: usize,
        samplers: Vec<Option<SamplerId>>,
    },
    SetTextures {
        stage: ShaderStage,
        start_slot: usize,
        views: Vec<Option<TextureViewId>>,
    },
    SetRenderStates {
        cull: D3dCull,
        fill: D3dFillMode,
    },
    SetViewport(Viewport),
    SetScissorRect(ScissorRect),
    SetRenderTargets {
        targets: Vec<Option<TextureViewId>>,
        depth_stencil: Option<TextureViewId>,
    },
    DrawPrimitive {
        primitive_type: D3dPrimitiveType,
        start_vertex: u32,
        primitive_count: u32,
    },
    DrawIndexedPrimitive {
        primitive_type: D3dPrimitiveType,
        base_vertex: i32,
        start_index: u32,
        primitive_count: u32,
    },
}

/// Number of primitives `vertex_count` vertices form.
fn primitive_count(topology: PrimitiveTopology, vertex_count: u32) -> u32 {
    match topology {
        PrimitiveTopology::LineList => vertex_count / 2,
        PrimitiveTopology::LineStrip => vertex_count.saturating_sub(1),
        PrimitiveTopology::TriangleList => vertex_count / 3,
        PrimitiveTopology::TriangleStrip => vertex_count.saturating_sub(2),
        _ => vertex_count,
    }
}

/// Translates flushed state into Direct3D 9 device calls and records them.
///
/// Direct3D 9 draws take the primitive type and a primitive count, so the
/// topology is remembered here and applied at draw time.
#[derive(Debug)]
pub struct D3d9StateApplier {
    topology: PrimitiveTopology,
    commands: Vec<D3d9Command>,
}

impl Default for D3d9StateApplier {
    fn default() -> Self {
        Self {
            topology: PrimitiveTopology::TriangleList,
            commands: Vec::new(),
        }
    }
}

impl D3d9StateApplier {
    /// Creates an applier with an empty command list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[D3d9Command] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<D3d9Command> {
        std::mem::take(&mut self.commands)
    }

    fn ensure_stage(stage: ShaderStage) -> Result<(), ShaderError> {
        match stage {
            ShaderStage::Vertex | ShaderStage::Pixel => Ok(()),
            stage => Err(ShaderError::StageUnsupported {
                backend: BackendKind::Direct3D9,
                stage,
            }),
        }
    }
}

impl StateApplier for D3d9StateApplier {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<(), ShaderError> {
        let _: D3dPrimitiveType = topology.into_d3d9()?;
        self.topology = topology;
        Ok(())
    }

    fn set_input_layout(&mut self, layout: Option<InputLayoutId>) -> Result<(), ShaderError> {
        self.commands.push(D3d9Command::SetVertexDeclaration(layout));
        Ok(())
    }

    fn set_vertex_buffers(
        &mut self,
        first_slot: usize,
        buffers: &[Option<VertexBufferBinding>],
    ) -> Result<(), ShaderError> {
        for (offset, binding) in buffers.iter().enumerate() {
            self.commands.push(D3d9Command::SetStreamSource {
                stream: first_slot + offset,
                binding: *binding,
            });
        }
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: Option<&IndexBufferBinding>) -> Result<(), ShaderError> {
        let command = match buffer {
            Some(binding) => D3d9Command::SetIndices {
                buffer: Some(binding.buffer),
                format: binding.format.into_d3d9()?,
            },
            None => D3d9Command::SetIndices {
                buffer: None,
                format: D3dFormat::INDEX16,
            },
        };
        self.commands.push(command);
        Ok(())
    }

    fn set_shader(
        &mut self,
        stage: ShaderStage,
        shader: Option<&CompiledShader>,
    ) -> Result<(), ShaderError> {
        match shader {
            Some(shader) => {
                Self::ensure_stage(stage)?;
                self.commands
                    .push(D3d9Command::SetShader(stage, Some(shader.id)));
            }
            None if Self::ensure_stage(stage).is_ok() => {
                self.commands.push(D3d9Command::SetShader(stage, None));
            }
            None => {}
        }
        Ok(())
    }

    fn set_uniform_buffers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        buffers: &[Option<BufferId>],
    ) -> Result<(), ShaderError> {
        if Self::ensure_stage(stage).is_err() {
            return Ok(());
        }
        self.commands.push(D3d9Command::SetShaderConstants {
            stage,
            start_slot: first_slot,
            buffers: buffers.to_vec(),
        });
        Ok(())
    }

    fn set_samplers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        samplers: &[Option<SamplerId>],
    ) -> Result<(), ShaderError> {
        if Self::ensure_stage(stage).is_err() {
            return Ok(());
        }
        self.commands.push(D3d9Command::SetSamplerStates {
            stage,
            start_slot: first_slot,
            samplers: samplers.to_vec(),
        });
        Ok(())
    }

    fn set_srvs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError> {
        if Self::ensure_stage(stage).is_err() {
            return Ok(());
        }
        self.commands.push(D3d9Command::SetTextures {
            stage,
            start_slot: first_slot,
            views: views.to_vec(),
        });
        Ok(())
    }

    fn set_uavs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError> {
        match views.iter().position(Option::is_some) {
            None => Ok(()),
            Some(index) => Err(ShaderError::unsupported(
                BackendKind::Direct3D9,
                format!("read-write view in {stage} slot {}", first_slot + index),
            )),
        }
    }

    fn set_rasterizer(&mut self, cull: CullMode, fill: FillMode) -> Result<(), ShaderError> {
        self.commands.push(D3d9Command::SetRenderStates {
            cull: cull.into_d3d9()?,
            fill: fill.into_d3d9()?,
        });
        Ok(())
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), ShaderError> {
        if viewports.len() > 1 {
            log::debug!("Direct3D 9 keeps the first of {} viewports", viewports.len());
        }
        if let Some(viewport) = viewports.first() {
            self.commands.push(D3d9Command::SetViewport(*viewport));
        }
        Ok(())
    }

    fn set_scissor_rects(&mut self, rects: &[ScissorRect]) -> Result<(), ShaderError> {
        if let Some(rect) = rects.first() {
            self.commands.push(D3d9Command::SetScissorRect(*rect));
        }
        Ok(())
    }

    fn set_render_targets(
        &mut self,
        targets: &[Option<TextureViewId>],
        depth_stencil: Option<TextureViewId>,
    ) -> Result<(), ShaderError> {
        self.commands.push(D3d9Command::SetRenderTargets {
            targets: targets.to_vec(),
            depth_stencil,
        });
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), ShaderError> {
        self.commands.push(D3d9Command::DrawPrimitive {
            primitive_type: self.topology.into_d3d9()?,
            start_vertex,
            primitive_count: primitive_count(self.topology, vertex_count),
        });
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ShaderError> {
        self.commands.push(D3d9Command::DrawIndexedPrimitive {
            primitive_type: self.topology.into_d3d9()?,
            base_vertex,
            start_index,
            primitive_count: primitive_count(self.topology, index_count),
        });
        Ok(())
    }

    fn dispatch(&mut self, _x: u32, _y: u32, _z: u32) -> Result<(), ShaderError> {
        Err(ShaderError::StageUnsupported {
            backend: BackendKind::Direct3D9,
            stage: ShaderStage::Compute,
        })
    }
}
