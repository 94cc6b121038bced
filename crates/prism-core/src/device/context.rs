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

use super::state::{
    IndexBufferBinding, InputAssemblerState, OutputMergerState, RasterizerState, ScissorRect,
    StageState, VertexBufferBinding, Viewport,
};
use super::{BufferId, CompiledShader, InputLayoutId, SamplerId, TextureViewId};
use crate::error::{ContextError, ShaderError};
use crate::format::{CullMode, FillMode, PrimitiveTopology};
use crate::shader::{GeometryPrimitive, OutputTopology, ShaderMetadata, ShaderStage};
use std::sync::Arc;

/// Receives flushed state changes and draw calls, translated to a native API.
///
/// The context only calls a method when the corresponding state changed since
/// the previous flush. Methods that translate engine values fail with
/// [`ShaderError::UnsupportedValue`] when the API has no equivalent.
pub trait StateApplier {
    /// Sets the primitive topology.
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<(), ShaderError>;

    /// Sets the input layout.
    fn set_input_layout(&mut self, layout: Option<InputLayoutId>) -> Result<(), ShaderError>;

    /// Sets consecutive vertex buffer slots.
    fn set_vertex_buffers(
        &mut self,
        first_slot: usize,
        buffers: &[Option<VertexBufferBinding>],
    ) -> Result<(), ShaderError>;

    /// Sets the index buffer.
    fn set_index_buffer(&mut self, buffer: Option<&IndexBufferBinding>)
        -> Result<(), ShaderError>;

    /// Binds a shader to its stage.
    fn set_shader(
        &mut self,
        stage: ShaderStage,
        shader: Option<&CompiledShader>,
    ) -> Result<(), ShaderError>;

    /// Sets consecutive uniform buffer slots of a stage.
    fn set_uniform_buffers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        buffers: &[Option<BufferId>],
    ) -> Result<(), ShaderError>;

    /// Sets consecutive sampler slots of a stage.
    fn set_samplers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        samplers: &[Option<SamplerId>],
    ) -> Result<(), ShaderError>;

    /// Sets consecutive read-only view slots of a stage.
    fn set_srvs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError>;

    /// Sets consecutive read-write view slots of a stage.
    fn set_uavs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ShaderError>;

    /// Sets the rasterizer modes.
    fn set_rasterizer(&mut self, cull: CullMode, fill: FillMode) -> Result<(), ShaderError>;

    /// Replaces all viewports.
    fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), ShaderError>;

    /// Replaces all scissor rectangles.
    fn set_scissor_rects(&mut self, rects: &[ScissorRect]) -> Result<(), ShaderError>;

    /// Replaces the render targets.
    fn set_render_targets(
        &mut self,
        targets: &[Option<TextureViewId>],
        depth_stencil: Option<TextureViewId>,
    ) -> Result<(), ShaderError>;

    /// Issues a non-indexed draw.
    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), ShaderError>;

    /// Issues an indexed draw.
    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ShaderError>;

    /// Dispatches compute thread groups.
    fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<(), ShaderError>;
}

const GRAPHICS_STAGES: [ShaderStage; 5] = [
    ShaderStage::Vertex,
    ShaderStage::Hull,
    ShaderStage::Domain,
    ShaderStage::Geometry,
    ShaderStage::Pixel,
];

/// Pipeline state of one immediate context.
#[derive(Debug, Clone)]
pub struct DeviceContext {
    input_assembler: InputAssemblerState,
    stages: [StageState; 6],
    rasterizer: RasterizerState,
    output_merger: OutputMergerState,
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceContext {
    /// Creates a context with every state dirty.
    pub fn new() -> Self {
        Self {
            input_assembler: InputAssemblerState::default(),
            stages: ShaderStage::ALL.map(StageState::new),
            rasterizer: RasterizerState::default(),
            output_merger: OutputMergerState::default(),
        }
    }

    /// The state of one stage.
    pub fn stage(&self, stage: ShaderStage) -> &StageState {
        &self.stages[stage.index()]
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut StageState {
        &mut self.stages[stage.index()]
    }

    /// The input assembler state.
    pub fn input_assembler(&self) -> &InputAssemblerState {
        &self.input_assembler
    }

    /// Sets the primitive topology.
    pub fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.input_assembler.topology.set(topology);
    }

    /// Sets the input layout.
    pub fn set_input_layout(&mut self, layout: Option<InputLayoutId>) {
        self.input_assembler.input_layout.set(layout);
    }

    /// Binds vertex buffers starting at `first_slot`.
    pub fn set_vertex_buffers(
        &mut self,
        first_slot: usize,
        buffers: &[Option<VertexBufferBinding>],
    ) -> Result<(), ContextError> {
        self.input_assembler
            .vertex_buffers
            .set_range(first_slot, buffers)
    }

    /// Binds the index buffer.
    pub fn set_index_buffer(&mut self, buffer: Option<IndexBufferBinding>) {
        self.input_assembler.index_buffer.set(buffer);
    }

    /// Binds a shader to `stage`, or unbinds it with `None`.
    pub fn set_shader(
        &mut self,
        stage: ShaderStage,
        shader: Option<Arc<CompiledShader>>,
    ) -> Result<(), ContextError> {
        if let Some(compiled) = &shader {
            if compiled.stage != stage {
                return Err(ContextError::StageMismatch {
                    id: compiled.id,
                    expected: compiled.stage,
                    bound_to: stage,
                });
            }
        }
        self.stage_mut(stage).set_shader(shader.as_ref());
        Ok(())
    }

    /// Binds uniform buffers of a stage.
    pub fn set_uniform_buffers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        buffers: &[Option<BufferId>],
    ) -> Result<(), ContextError> {
        self.stage_mut(stage)
            .uniform_buffers
            .set_range(first_slot, buffers)
    }

    /// Binds samplers of a stage.
    pub fn set_samplers(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        samplers: &[Option<SamplerId>],
    ) -> Result<(), ContextError> {
        self.stage_mut(stage).samplers.set_range(first_slot, samplers)
    }

    /// Binds read-only views of a stage.
    pub fn set_srvs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ContextError> {
        self.stage_mut(stage).srvs.set_range(first_slot, views)
    }

    /// Binds read-write views of the pixel or compute stage.
    pub fn set_uavs(
        &mut self,
        stage: ShaderStage,
        first_slot: usize,
        views: &[Option<TextureViewId>],
    ) -> Result<(), ContextError> {
        self.stage_mut(stage).uavs.set_range(first_slot, views)
    }

    /// Replaces the viewports.
    pub fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), ContextError> {
        self.rasterizer.viewports.set(viewports)
    }

    /// Replaces the scissor rectangles.
    pub fn set_scissor_rects(&mut self, rects: &[ScissorRect]) -> Result<(), ContextError> {
        self.rasterizer.scissors.set(rects)
    }

    /// Sets the cull mode.
    pub fn set_cull_mode(&mut self, cull: CullMode) {
        self.rasterizer.cull_mode.set(cull);
    }

    /// Sets the fill mode.
    pub fn set_fill_mode(&mut self, fill: FillMode) {
        self.rasterizer.fill_mode.set(fill);
    }

    /// Replaces the render targets and the depth-stencil target.
    pub fn set_render_targets(
        &mut self,
        targets: &[Option<TextureViewId>],
        depth_stencil: Option<TextureViewId>,
    ) -> Result<(), ContextError> {
        self.output_merger.render_targets.set(targets)?;
        self.output_merger.depth_stencil.set(depth_stencil);
        Ok(())
    }

    /// Validates the bound pipeline, flushes dirty state and draws.
    pub fn draw(
        &mut self,
        applier: &mut dyn StateApplier,
        vertex_count: u32,
        start_vertex: u32,
    ) -> Result<(), ContextError> {
        self.validate_draw()?;
        self.flush_graphics(applier)?;
        applier.draw(vertex_count, start_vertex)?;
        Ok(())
    }

    /// Validates the bound pipeline, flushes dirty state and draws indexed.
    pub fn draw_indexed(
        &mut self,
        applier: &mut dyn StateApplier,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ContextError> {
        self.validate_draw()?;
        if self.input_assembler.index_buffer.get().is_none() {
            return Err(ContextError::NoIndexBuffer);
        }
        self.flush_graphics(applier)?;
        applier.draw_indexed(index_count, start_index, base_vertex)?;
        Ok(())
    }

    /// Flushes compute state and dispatches thread groups.
    pub fn dispatch(
        &mut self,
        applier: &mut dyn StateApplier,
        x: u32,
        y: u32,
        z: u32,
    ) -> Result<(), ContextError> {
        if self.stage(ShaderStage::Compute).shader()?.is_none() {
            return Err(ContextError::NoShaderBound(ShaderStage::Compute));
        }
        flush_stage(self.stage_mut(ShaderStage::Compute), applier)?;
        applier.dispatch(x, y, z)?;
        Ok(())
    }

    /// Checks that the bound shaders are still alive and that they form a
    /// drawable pipeline with the topology.
    pub fn validate_draw(&self) -> Result<(), ContextError> {
        let topology = *self.input_assembler.topology.get();
        let incompatible = |reason: String| ContextError::IncompatibleTopology { topology, reason };
        let [vertex, hull, domain, geometry, pixel] =
            GRAPHICS_STAGES.map(|stage| self.stage(stage).shader());
        let (hull, domain, geometry) = (hull?, domain?, geometry?);
        pixel?;

        if vertex?.is_none() {
            return Err(ContextError::NoShaderBound(ShaderStage::Vertex));
        }

        let mut primitive = topology.geometry_primitive();
        match (hull, domain) {
            (Some(hull), Some(_)) => {
                let ShaderMetadata::Hull {
                    input_control_points,
                    output_topology,
                    ..
                } = hull.metadata
                else {
                    return Err(incompatible(format!(
                        "hull shader '{}' carries no tessellation metadata",
                        hull.name
                    )));
                };
                if topology.patch_control_points().map(u32::from) != Some(input_control_points) {
                    return Err(incompatible(format!(
                        "hull shader '{}' consumes patches of {input_control_points} control points",
                        hull.name
                    )));
                }
                primitive = Some(match output_topology {
                    OutputTopology::Point => GeometryPrimitive::Point,
                    OutputTopology::Line => GeometryPrimitive::Line,
                    OutputTopology::TriangleCw | OutputTopology::TriangleCcw => {
                        GeometryPrimitive::Triangle
                    }
                });
            }
            (Some(_), None) => return Err(ContextError::NoShaderBound(ShaderStage::Domain)),
            (None, Some(_)) => return Err(ContextError::NoShaderBound(ShaderStage::Hull)),
            (None, None) => {
                if topology.patch_control_points().is_some() {
                    return Err(incompatible(
                        "patch topologies require a hull shader".to_string(),
                    ));
                }
            }
        }

        if let Some(geometry) = geometry {
            if let ShaderMetadata::Geometry {
                input_primitive, ..
            } = geometry.metadata
            {
                if primitive != Some(input_primitive) {
                    return Err(incompatible(format!(
                        "geometry shader '{}' consumes {input_primitive:?} primitives",
                        geometry.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn flush_graphics(&mut self, applier: &mut dyn StateApplier) -> Result<(), ContextError> {
        let ia = &mut self.input_assembler;
        if let Some(topology) = ia.topology.pending() {
            applier.set_primitive_topology(*topology)?;
            ia.topology.mark_clean();
        }
        if let Some(layout) = ia.input_layout.pending() {
            applier.set_input_layout(*layout)?;
            ia.input_layout.mark_clean();
        }
        if let Some((first, buffers)) = ia.vertex_buffers.pending() {
            applier.set_vertex_buffers(first, buffers)?;
            ia.vertex_buffers.mark_clean();
        }
        if let Some(index_buffer) = ia.index_buffer.pending() {
            applier.set_index_buffer(index_buffer.as_ref())?;
            ia.index_buffer.mark_clean();
        }

        for stage in GRAPHICS_STAGES {
            flush_stage(self.stage_mut(stage), applier)?;
        }

        let rs = &mut self.rasterizer;
        if rs.cull_mode.is_dirty() || rs.fill_mode.is_dirty() {
            applier.set_rasterizer(*rs.cull_mode.get(), *rs.fill_mode.get())?;
            rs.cull_mode.mark_clean();
            rs.fill_mode.mark_clean();
        }
        if let Some(viewports) = rs.viewports.pending() {
            applier.set_viewports(viewports)?;
            rs.viewports.mark_clean();
        }
        if let Some(rects) = rs.scissors.pending() {
            applier.set_scissor_rects(rects)?;
            rs.scissors.mark_clean();
        }

        let om = &mut self.output_merger;
        if om.render_targets.is_dirty() || om.depth_stencil.is_dirty() {
            applier.set_render_targets(om.render_targets.values(), *om.depth_stencil.get())?;
            om.render_targets.mark_clean();
            om.depth_stencil.mark_clean();
        }
        Ok(())
    }
}

/// Applies the dirty bindings of one stage. A binding stays dirty when the
/// applier rejects it, so the next flush tries it again.
fn flush_stage(state: &mut StageState, applier: &mut dyn StateApplier) -> Result<(), ContextError> {
    let stage = state.stage();
    if let Some(shader) = state.pending_shader()? {
        applier.set_shader(stage, shader.as_deref())?;
        state.mark_shader_clean();
    }
    if let Some((first, buffers)) = state.uniform_buffers.pending() {
        applier.set_uniform_buffers(stage, first, buffers)?;
        state.uniform_buffers.mark_clean();
    }
    if let Some((first, samplers)) = state.samplers.pending() {
        applier.set_samplers(stage, first, samplers)?;
        state.samplers.mark_clean();
    }
    if let Some((first, views)) = state.srvs.pending() {
        applier.set_srvs(stage, first, views)?;
        state.srvs.mark_clean();
    }
    if let Some((first, views)) = state.uavs.pending() {
        applier.set_uavs(stage, first, views)?;
        state.uavs.mark_clean();
    }
    Ok(())
}
