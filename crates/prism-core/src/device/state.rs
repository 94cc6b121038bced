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

//! Dirty-tracked pipeline state groups owned by a [`DeviceContext`](super::DeviceContext).

use super::{BufferId, CompiledShader, InputLayoutId, SamplerId, ShaderId, TextureViewId};
use crate::binding::{CumulativeArrayBinding, DirtyValue, ResettingArrayBinding};
use crate::error::ContextError;
use crate::format::{CullMode, FillMode, IndexFormat, PrimitiveTopology};
use crate::shader::ShaderStage;
use std::sync::{Arc, Weak};

/// Vertex buffer slots on the input assembler.
pub const MAX_VERTEX_BUFFERS: usize = 16;
/// Uniform buffer slots per stage.
pub const MAX_UNIFORM_BUFFERS: usize = 14;
/// Sampler slots per stage.
pub const MAX_SAMPLERS: usize = 16;
/// Read-only view slots per stage.
pub const MAX_SRVS: usize = 128;
/// Read-write view slots on the pixel and compute stages.
pub const MAX_UAVS: usize = 8;
/// Simultaneous render targets.
pub const MAX_RENDER_TARGETS: usize = 8;
/// Simultaneous viewports and scissor rectangles.
pub const MAX_VIEWPORTS: usize = 16;

/// A vertex buffer bound to one input assembler slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferBinding {
    /// The buffer.
    pub buffer: BufferId,
    /// Bytes between consecutive vertices.
    pub stride: u32,
    /// Byte offset of the first vertex.
    pub offset: u32,
}

/// The bound index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBufferBinding {
    /// The buffer.
    pub buffer: BufferId,
    /// Index type.
    pub format: IndexFormat,
    /// Byte offset of the first index.
    pub offset: u32,
}

/// A viewport rectangle with its depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Near depth.
    pub min_depth: f32,
    /// Far depth.
    pub max_depth: f32,
}

/// A scissor rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScissorRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Input assembler state.
#[derive(Debug, Clone)]
pub struct InputAssemblerState {
    /// Primitive topology.
    pub topology: DirtyValue<PrimitiveTopology>,
    /// Input layout.
    pub input_layout: DirtyValue<Option<InputLayoutId>>,
    /// Vertex buffer slots.
    pub vertex_buffers: CumulativeArrayBinding<Option<VertexBufferBinding>>,
    /// Index buffer.
    pub index_buffer: DirtyValue<Option<IndexBufferBinding>>,
}

impl Default for InputAssemblerState {
    fn default() -> Self {
        Self {
            topology: DirtyValue::new(PrimitiveTopology::TriangleList),
            input_layout: DirtyValue::new(None),
            vertex_buffers: CumulativeArrayBinding::new("vertex buffers", MAX_VERTEX_BUFFERS),
            index_buffer: DirtyValue::new(None),
        }
    }
}

/// Shader and resource bindings of one programmable stage.
///
/// The stage only keeps a weak reference to its shader; the
/// [`Device`](super::Device) that compiled it stays the sole owner.
#[derive(Debug, Clone)]
pub struct StageState {
    stage: ShaderStage,
    shader_id: DirtyValue<Option<ShaderId>>,
    shader: Weak<CompiledShader>,
    /// Uniform buffer slots.
    pub uniform_buffers: CumulativeArrayBinding<Option<BufferId>>,
    /// Sampler slots.
    pub samplers: CumulativeArrayBinding<Option<SamplerId>>,
    /// Read-only view slots.
    pub srvs: CumulativeArrayBinding<Option<TextureViewId>>,
    /// Read-write view slots; empty on stages without UAV access.
    pub uavs: CumulativeArrayBinding<Option<TextureViewId>>,
}

impl StageState {
    /// Creates the empty state of a stage.
    pub fn new(stage: ShaderStage) -> Self {
        let uav_slots = match stage {
            ShaderStage::Pixel | ShaderStage::Compute => MAX_UAVS,
            _ => 0,
        };
        Self {
            stage,
            shader_id: DirtyValue::new(None),
            shader: Weak::new(),
            uniform_buffers: CumulativeArrayBinding::new("uniform buffers", MAX_UNIFORM_BUFFERS),
            samplers: CumulativeArrayBinding::new("samplers", MAX_SAMPLERS),
            srvs: CumulativeArrayBinding::new("srvs", MAX_SRVS),
            uavs: CumulativeArrayBinding::new("uavs", uav_slots),
        }
    }

    /// The stage this state belongs to.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Id of the bound shader.
    pub fn shader_id(&self) -> Option<ShaderId> {
        *self.shader_id.get()
    }

    /// The bound shader, or [`ContextError::UnknownShader`] once the device
    /// destroyed it.
    pub fn shader(&self) -> Result<Option<Arc<CompiledShader>>, ContextError> {
        match self.shader_id() {
            Some(id) => self
                .shader
                .upgrade()
                .map(Some)
                .ok_or(ContextError::UnknownShader(id)),
            None => Ok(None),
        }
    }

    pub(super) fn set_shader(&mut self, shader: Option<&Arc<CompiledShader>>) {
        self.shader_id.set(shader.map(|s| s.id));
        self.shader = shader.map_or_else(Weak::new, Arc::downgrade);
    }

    /// The bound shader if the binding changed since the last flush.
    pub fn pending_shader(&self) -> Result<Option<Option<Arc<CompiledShader>>>, ContextError> {
        if self.shader_id.pending().is_none() {
            return Ok(None);
        }
        self.shader().map(Some)
    }

    /// Marks the shader binding as applied.
    pub fn mark_shader_clean(&mut self) {
        self.shader_id.mark_clean();
    }
}

/// Rasterizer state.
#[derive(Debug, Clone)]
pub struct RasterizerState {
    /// Viewports.
    pub viewports: ResettingArrayBinding<Viewport>,
    /// Scissor rectangles.
    pub scissors: ResettingArrayBinding<ScissorRect>,
    /// Face culling.
    pub cull_mode: DirtyValue<CullMode>,
    /// Polygon fill.
    pub fill_mode: DirtyValue<FillMode>,
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self {
            viewports: ResettingArrayBinding::new("viewports", MAX_VIEWPORTS),
            scissors: ResettingArrayBinding::new("scissor rects", MAX_VIEWPORTS),
            cull_mode: DirtyValue::new(CullMode::Back),
            fill_mode: DirtyValue::new(FillMode::Solid),
        }
    }
}

/// Output merger state.
#[derive(Debug, Clone)]
pub struct OutputMergerState {
    /// Color render targets.
    pub render_targets: ResettingArrayBinding<Option<TextureViewId>>,
    /// Depth-stencil target.
    pub depth_stencil: DirtyValue<Option<TextureViewId>>,
}

impl Default for OutputMergerState {
    fn default() -> Self {
        Self {
            render_targets: ResettingArrayBinding::new("render targets", MAX_RENDER_TARGETS),
            depth_stencil: DirtyValue::new(None),
        }
    }
}
