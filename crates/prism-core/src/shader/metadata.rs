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

//! Stage-specific facts derived from a reflection when a shader is created.

use super::reflection::ShaderReflection;
use super::stage::{
    GeometryPrimitive, OutputTopology, Partitioning, ShaderStage, StreamTopology,
    TessellationDomain,
};
use crate::error::ShaderError;

/// Pipeline-relevant metadata of a compiled shader.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderMetadata {
    /// Vertex and pixel shaders carry no extra metadata.
    None,
    /// Hull shader tessellator configuration.
    Hull {
        /// Patch domain.
        domain: TessellationDomain,
        /// Tessellator partitioning.
        partitioning: Partitioning,
        /// Tessellator output topology.
        output_topology: OutputTopology,
        /// Control points per input patch.
        input_control_points: u32,
        /// Control points per output patch.
        output_control_points: u32,
        /// Maximum tessellation factor.
        max_tess_factor: f32,
    },
    /// Domain shader patch configuration.
    Domain {
        /// Patch domain.
        domain: TessellationDomain,
        /// Control points per input patch.
        input_control_points: u32,
    },
    /// Geometry shader primitive configuration.
    Geometry {
        /// Maximum vertices emitted per invocation.
        max_vertex_count: u32,
        /// Primitive consumed.
        input_primitive: GeometryPrimitive,
        /// Primitive topology emitted.
        output_primitive: StreamTopology,
        /// Number of output streams (at least one).
        stream_count: u32,
        /// Invocations per input primitive.
        instance_count: u32,
    },
    /// Compute thread group size.
    Compute {
        /// Threads per group along X, Y and Z.
        thread_group_size: [u32; 3],
    },
}

impl ShaderMetadata {
    /// Extracts the metadata a shader of the reflection's stage needs.
    pub fn from_reflection(reflection: &ShaderReflection) -> Result<Self, ShaderError> {
        Ok(match reflection.stage() {
            ShaderStage::Vertex | ShaderStage::Pixel => ShaderMetadata::None,
            ShaderStage::Hull => ShaderMetadata::Hull {
                domain: reflection.tessellation_domain()?,
                partitioning: reflection.partitioning()?,
                output_topology: reflection.output_topology()?,
                input_control_points: reflection.input_control_points()?,
                output_control_points: reflection.output_control_points()?,
                max_tess_factor: reflection.max_tess_factor()?,
            },
            ShaderStage::Domain => ShaderMetadata::Domain {
                domain: reflection.tessellation_domain()?,
                input_control_points: reflection.input_control_points()?,
            },
            ShaderStage::Geometry => ShaderMetadata::Geometry {
                max_vertex_count: reflection.max_vertex_count()?,
                input_primitive: reflection.geometry_input_primitive()?,
                output_primitive: reflection.geometry_output_primitive()?,
                stream_count: reflection.output_streams().len().max(1) as u32,
                instance_count: reflection.geometry_instance_count()?,
            },
            ShaderStage::Compute => ShaderMetadata::Compute {
                thread_group_size: reflection.thread_group_size()?,
            },
        })
    }
}
