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

use super::conversions::IntoD3d11;
use super::native::{D3d11CullMode, D3d11FillMode, D3d11PrimitiveTopology, DxgiFormat};
use prism_core::device::{
    BufferId, CompiledShader, IndexBufferBinding, InputLayoutId, SamplerId, ScissorRect,
    ShaderId, StateApplier, TextureViewId, VertexBufferBinding, Viewport,
};
use prism_core::error::ShaderError;
use prism_core::format::{CullMode, FillMode, PrimitiveTopology};
use prism_core::shader::ShaderStage;

/// One native call on an `ID3D11DeviceContext`, with translated arguments.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum D3d11Command {
    IaSetPrimitiveTopology(D3d11PrimitiveTopology),
    IaSetInputLayout(Option<InputLayoutId>),
    IaSetVertexBuffers {
        start_slot: usize,
        buffers: Vec<Option<VertexBufferBinding>>,
    },
    IaSetIndexBuffer {
        buffer: Option<BufferId>,
        format: DxgiFormat,
        offset: u32,
    },
    SetShader(ShaderStage, Option<ShaderId>),
    SetConstantBuffers {
        stage: ShaderStage,
        start_slot: usize,
        buffers: Vec<Option<BufferId>>,
    },
    SetSamplers {
        stage: ShaderStage,
        start_slot: usize,
        samplers: Vec<Option<SamplerId>>,
    },
    SetShaderResources {
        stage: ShaderStage,
        start_slot: usize,
        views: Vec<Option<TextureViewId>>,
    },
    SetUnorderedAccessViews {
        stage: ShaderStage,
        start_slot: usize,
        views: Vec<Option<TextureViewId>>,
    },
    RsSetState {
        cull: D3d11CullMode,
        fill: D3d11FillMode,
    },
    RsSetViewports(Vec<Viewport>),
    RsSetScissorRects(Vec<ScissorRect>),
    OmSetRenderTargets {
        targets: Vec<Option<TextureViewId>>,
        depth_stencil: Option<TextureViewId>,
    },
    Draw {
        vertex_count: u32,
        start_vertex: u32,
    },
    DrawIndexed {
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    },
    Dispatch([u32; 3]),
}

/// Translates flushed state into Direct3D 11 context calls and records them.
///
/// The recorded command list is what a native context would receive; a
/// presentation layer replays it.
#[derive(Debug, Default)]
pub struct D3d11StateApplier {
    commands: Vec<D3d11Command>,
}

impl D3d11StateApplier {
    /// Creates an applier with an empty command list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[D3d11Command] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<D3d11Command> {
        std::mem::take(&mut self.commands)
    }
}

impl StateApplier for D3d11StateApplier {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<(), ShaderError> {
        self.commands
            .push(D3d11Command::IaSetPrimitiveTopology(topology.into_d3d11()?));
        Ok(())
    }

    fn set_input_layout(&mut self, layout: Option<InputLayoutId>) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::IaSetInputLayout(layout));
        Ok(())
    }

    fn set_vertex_buffers(
        &mut self,
        first_slot: usize,
        buffers: &[Option<VertexBufferBinding>],
    ) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::IaSetVertexBuffers {
            start_slot: first_slot,
            buffers: buffers.to_vec(),
        });
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: Option<&IndexBufferBinding>) -> Result<(), ShaderError> {
        let command = match buffer {
            Some(binding) => D3d11Command::IaSetIndexBuffer {
                buffer: Some(binding.buffer),
                format: binding.format.into_d3d11()?,
                offset: binding.offset,
            },
            None => D3d11Command::IaSetIndexBuffer {
                buffer: None,
                format: DxgiFormat::R16_UINT,
                offset: 0,
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
        self.commands
            .push(D3d11Command::SetShader(stage, shader.map(|s| s.id)));
        Ok(())
    }

    fn set_uniform_buffers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        buffers: &[Option<BufferId>],
    ) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::SetConstantBuffers {
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
        self.commands.push(D3d11Command::SetSamplers {
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
        self.commands.push(D3d11Command::SetShaderResources {
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
        if views.is_empty() {
            return Ok(());
        }
        self.commands.push(D3d11Command::SetUnorderedAccessViews {
            stage,
            start_slot: first_slot,
            views: views.to_vec(),
        });
        Ok(())
    }

    fn set_rasterizer(&mut self, cull: CullMode, fill: FillMode) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::RsSetState {
            cull: cull.into_d3d11()?,
            fill: fill.into_d3d11()?,
        });
        Ok(())
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), ShaderError> {
        self.commands
            .push(D3d11Command::RsSetViewports(viewports.to_vec()));
        Ok(())
    }

    fn set_scissor_rects(&mut self, rects: &[ScissorRect]) -> Result<(), ShaderError> {
        self.commands
            .push(D3d11Command::RsSetScissorRects(rects.to_vec()));
        Ok(())
    }

    fn set_render_targets(
        &mut self,
        targets: &[Option<TextureViewId>],
        depth_stencil: Option<TextureViewId>,
    ) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::OmSetRenderTargets {
            targets: targets.to_vec(),
            depth_stencil,
        });
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::Draw {
            vertex_count,
            start_vertex,
        });
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::DrawIndexed {
            index_count,
            start_index,
            base_vertex,
        });
        Ok(())
    }

    fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<(), ShaderError> {
        self.commands.push(D3d11Command::Dispatch([x, y, z]));
        Ok(())
    }
}
