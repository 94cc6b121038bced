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

//! The backend-independent description of a shader.
//!
//! A [`ShaderReflection`] is assembled through a [`ShaderReflectionBuilder`],
//! validated once in [`ShaderReflectionBuilder::build`] and immutable afterwards.
//! Every backend generator reads the same reflection.

use super::stage::{
    GeometryPrimitive, OutputTopology, Partitioning, ShaderStage, StreamTopology,
    TessellationDomain,
};
use super::types::{align16, ArraySize, ShaderValueType};
use crate::error::ShaderError;
use crate::resource::ResourceKind;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

/// Metadata keys understood by the derived helpers.
pub mod meta_keys {
    /// Tessellation domain of hull and domain shaders.
    pub const DOMAIN: &str = "Domain";
    /// Tessellator partitioning of hull shaders.
    pub const PARTITIONING: &str = "Partitioning";
    /// Tessellator output topology of hull shaders.
    pub const OUTPUT_TOPOLOGY: &str = "OutputTopology";
    /// Control points per input patch.
    pub const INPUT_CONTROL_POINTS: &str = "InputControlPoints";
    /// Control points per output patch of hull shaders.
    pub const OUTPUT_CONTROL_POINTS: &str = "OutputControlPoints";
    /// Optional maximum tessellation factor of hull shaders.
    pub const MAX_TESS_FACTOR: &str = "MaxTessFactor";
    /// Maximum number of vertices a geometry shader emits.
    pub const MAX_VERTEX_COUNT: &str = "MaxVertexCount";
    /// Primitive type a geometry shader consumes.
    pub const INPUT_PRIMITIVE: &str = "InputPrimitive";
    /// Primitive topology a geometry shader emits.
    pub const OUTPUT_PRIMITIVE: &str = "OutputPrimitive";
    /// Optional geometry shader instance count.
    pub const INSTANCE_COUNT: &str = "InstanceCount";
    /// Compute thread group size along X.
    pub const THREAD_COUNT_X: &str = "ThreadCountX";
    /// Compute thread group size along Y.
    pub const THREAD_COUNT_Y: &str = "ThreadCountY";
    /// Compute thread group size along Z.
    pub const THREAD_COUNT_Z: &str = "ThreadCountZ";
}

/// How a varying is interpolated between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Backend default (perspective-correct linear).
    #[default]
    Default,
    /// Explicit perspective-correct linear interpolation.
    Linear,
    /// Linear interpolation evaluated at a covered sample.
    Centroid,
    /// No interpolation; the provoking vertex value is used.
    NoInterpolation,
    /// Linear interpolation without perspective correction.
    NoPerspective,
    /// Per-sample interpolation.
    Sample,
}

impl Interpolation {
    /// HLSL modifier keyword, `None` for the default mode.
    pub const fn hlsl_modifier(self) -> Option<&'static str> {
        match self {
            Interpolation::Default => None,
            Interpolation::Linear => Some("linear"),
            Interpolation::Centroid => Some("centroid"),
            Interpolation::NoInterpolation => Some("nointerpolation"),
            Interpolation::NoPerspective => Some("noperspective"),
            Interpolation::Sample => Some("sample"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Interpolation::Linear),
            "centroid" => Ok(Interpolation::Centroid),
            "nointerpolation" => Ok(Interpolation::NoInterpolation),
            "noperspective" => Ok(Interpolation::NoPerspective),
            "sample" => Ok(Interpolation::Sample),
            other => Err(format!("unknown interpolation mode '{other}'")),
        }
    }
}

/// A stage input or output variable.
#[derive(Debug, Clone, PartialEq)]
pub struct IoVariable {
    /// Value type; tessellation factors carry a domain-dependent array size.
    pub ty: ShaderValueType,
    /// Variable name, as referenced by `INPUT(x)`/`OUTPUT(x)` in code lines.
    pub name: String,
    /// Semantic (`SV_Position`, ...). User varyings may leave it empty.
    pub semantic: Option<String>,
    /// Interpolation mode.
    pub interpolation: Interpolation,
    /// Unused variables stay in the reflection but are left out of generated code.
    pub is_used: bool,
}

impl IoVariable {
    /// Creates a used variable with default interpolation and no semantic.
    pub fn new(ty: ShaderValueType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            semantic: None,
            interpolation: Interpolation::Default,
            is_used: true,
        }
    }

    /// Sets the semantic.
    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = Some(semantic.into());
        self
    }

    /// Sets the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Marks the variable as unused.
    pub fn unused(mut self) -> Self {
        self.is_used = false;
        self
    }

    /// Whether the semantic names a system value (`SV_*`).
    pub fn is_system_value(&self) -> bool {
        self.semantic
            .as_deref()
            .is_some_and(|s| {
                s.len() > 3 && s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("SV_"))
            })
    }

    /// The semantic with any trailing index removed, upper-cased (`SV_TARGET1` -> `SV_TARGET`).
    pub fn semantic_base(&self) -> Option<String> {
        self.semantic.as_deref().map(|s| {
            s.trim_end_matches(|c: char| c.is_ascii_digit())
                .to_ascii_uppercase()
        })
    }

    /// The trailing index of the semantic (`SV_Target1` -> 1), zero when absent.
    pub fn semantic_index(&self) -> u32 {
        self.semantic
            .as_deref()
            .map(|s| {
                let digits = s.len() - s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
                s[s.len() - digits..].parse().unwrap_or(0)
            })
            .unwrap_or(0)
    }
}

/// A member of a user-defined structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureMember {
    /// Member type.
    pub ty: ShaderValueType,
    /// Member name.
    pub name: String,
}

/// A user-defined aggregate type.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Type name.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<StructureMember>,
}

/// A member of a uniform buffer with its byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformMember {
    /// Member type.
    pub ty: ShaderValueType,
    /// Member name.
    pub name: String,
    /// Offset in bytes from the start of the buffer; always a multiple of 16.
    pub offset: u32,
}

/// A block of constants bound to a numbered slot.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBuffer {
    /// Buffer name.
    pub name: String,
    /// Binding slot.
    pub slot: u32,
    /// Members with their packed offsets.
    pub members: Vec<UniformMember>,
}

impl UniformBuffer {
    /// Lays out `members` so that each one starts on a 16-byte boundary.
    pub fn packed(
        name: impl Into<String>,
        slot: u32,
        members: Vec<(ShaderValueType, String)>,
        structures: &[Structure],
    ) -> Result<Self, String> {
        let structure_size = |name: &str| structure_packed_size(name, structures);
        let mut offset = 0;
        let mut packed = Vec::with_capacity(members.len());
        for (ty, member_name) in members {
            let size = ty.packed_size(&structure_size)?;
            packed.push(UniformMember {
                ty,
                name: member_name,
                offset,
            });
            offset = align16(offset + size);
        }
        Ok(Self {
            name: name.into(),
            slot,
            members: packed,
        })
    }

    /// Size of the buffer in bytes, rounded up to whole 16-byte registers.
    pub fn size(&self, structures: &[Structure]) -> Result<u32, String> {
        let structure_size = |name: &str| structure_packed_size(name, structures);
        match self.members.last() {
            Some(last) => Ok(align16(last.offset + last.ty.packed_size(&structure_size)?)),
            None => Ok(0),
        }
    }

    /// Number of 16-byte constant registers the buffer spans.
    pub fn register_count(&self, structures: &[Structure]) -> Result<u32, String> {
        Ok(self.size(structures)? / 16)
    }
}

fn structure_packed_size(name: &str, structures: &[Structure]) -> Option<u32> {
    let structure = structures.iter().find(|s| s.name == name)?;
    let nested = |inner: &str| {
        if inner == name {
            None
        } else {
            structure_packed_size(inner, structures)
        }
    };
    let mut offset = 0;
    let mut end = 0;
    for member in &structure.members {
        let size = member.ty.packed_size(&nested).ok()?;
        end = offset + size;
        offset = align16(end);
    }
    Some(end)
}

/// A sampler state binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerBinding {
    /// Sampler name.
    pub name: String,
    /// Binding slot.
    pub slot: u32,
    /// Whether this is a comparison (shadow) sampler.
    pub comparison: bool,
}

/// A read-only resource view binding.
#[derive(Debug, Clone, PartialEq)]
pub struct SrvBinding {
    /// View name.
    pub name: String,
    /// Binding slot.
    pub slot: u32,
    /// Shape of the viewed resource.
    pub kind: ResourceKind,
    /// Element type returned by loads and samples.
    pub element: ShaderValueType,
}

/// A read-write resource view binding.
#[derive(Debug, Clone, PartialEq)]
pub struct UavBinding {
    /// View name.
    pub name: String,
    /// Binding slot.
    pub slot: u32,
    /// Shape of the viewed resource.
    pub kind: ResourceKind,
    /// Element type.
    pub element: ShaderValueType,
}

/// Declares that an SRV is always sampled with one particular sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSampling {
    /// Name of the SRV.
    pub srv: String,
    /// Name of the sampler.
    pub sampler: String,
}

/// A named geometry shader output stream.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputStream {
    /// Stream name.
    pub name: String,
    /// Variables written to the stream.
    pub variables: Vec<IoVariable>,
}

/// The immutable, backend-agnostic description of one shader.
#[derive(Debug, Clone)]
pub struct ShaderReflection {
    name: String,
    stage: ShaderStage,
    profile: String,
    meta: BTreeMap<String, String>,
    input: Vec<IoVariable>,
    output: Vec<IoVariable>,
    input_extra: Vec<IoVariable>,
    input_patch: Vec<IoVariable>,
    output_patch: Vec<IoVariable>,
    output_streams: Vec<OutputStream>,
    uniform_buffers: Vec<UniformBuffer>,
    samplers: Vec<SamplerBinding>,
    srvs: Vec<SrvBinding>,
    uavs: Vec<UavBinding>,
    structures: Vec<Structure>,
    fixed_sampling: Vec<FixedSampling>,
    code_global: Vec<String>,
    code_patch: Vec<String>,
    code_main: Vec<String>,
    uniform_buffer_slots: HashMap<String, u32>,
    sampler_slots: HashMap<String, u32>,
    srv_slots: HashMap<String, u32>,
    uav_slots: HashMap<String, u32>,
}

fn used(vars: &[IoVariable]) -> impl Iterator<Item = &IoVariable> {
    vars.iter().filter(|v| v.is_used)
}

impl ShaderReflection {
    /// Logical shader name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pipeline stage.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Profile string as written in the description.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Raw metadata value.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// All metadata entries.
    pub fn meta_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.meta.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stage inputs in declaration order.
    pub fn input(&self) -> &[IoVariable] {
        &self.input
    }

    /// Used stage inputs in declaration order.
    pub fn used_input(&self) -> impl Iterator<Item = &IoVariable> {
        used(&self.input)
    }

    /// Stage outputs in declaration order.
    pub fn output(&self) -> &[IoVariable] {
        &self.output
    }

    /// Used stage outputs in declaration order.
    pub fn used_output(&self) -> impl Iterator<Item = &IoVariable> {
        used(&self.output)
    }

    /// Extra per-invocation inputs (system values passed beside the main input).
    pub fn input_extra(&self) -> &[IoVariable] {
        &self.input_extra
    }

    /// Used extra inputs.
    pub fn used_input_extra(&self) -> impl Iterator<Item = &IoVariable> {
        used(&self.input_extra)
    }

    /// Per-patch constants read by a domain shader.
    pub fn input_patch(&self) -> &[IoVariable] {
        &self.input_patch
    }

    /// Used per-patch inputs.
    pub fn used_input_patch(&self) -> impl Iterator<Item = &IoVariable> {
        used(&self.input_patch)
    }

    /// Per-patch constants written by a hull shader.
    pub fn output_patch(&self) -> &[IoVariable] {
        &self.output_patch
    }

    /// Used per-patch outputs.
    pub fn used_output_patch(&self) -> impl Iterator<Item = &IoVariable> {
        used(&self.output_patch)
    }

    /// Named geometry shader output streams; empty for single-stream output.
    pub fn output_streams(&self) -> &[OutputStream] {
        &self.output_streams
    }

    /// Uniform buffers in declaration order.
    pub fn uniform_buffers(&self) -> &[UniformBuffer] {
        &self.uniform_buffers
    }

    /// Samplers in declaration order.
    pub fn samplers(&self) -> &[SamplerBinding] {
        &self.samplers
    }

    /// Read-only views in declaration order.
    pub fn srvs(&self) -> &[SrvBinding] {
        &self.srvs
    }

    /// Read-write views in declaration order.
    pub fn uavs(&self) -> &[UavBinding] {
        &self.uavs
    }

    /// User-defined structures in declaration order.
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Looks up a structure by name.
    pub fn structure(&self, name: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.name == name)
    }

    /// SRV-to-sampler associations.
    pub fn fixed_sampling(&self) -> &[FixedSampling] {
        &self.fixed_sampling
    }

    /// The sampler an SRV is fixed to, if any.
    pub fn fixed_sampler_for(&self, srv: &str) -> Option<&SamplerBinding> {
        let association = self.fixed_sampling.iter().find(|f| f.srv == srv)?;
        self.samplers.iter().find(|s| s.name == association.sampler)
    }

    /// Global code lines.
    pub fn code_global(&self) -> &[String] {
        &self.code_global
    }

    /// Patch-constant function body lines (hull shaders).
    pub fn code_patch(&self) -> &[String] {
        &self.code_patch
    }

    /// Main function body lines.
    pub fn code_main(&self) -> &[String] {
        &self.code_main
    }

    /// Slot of a uniform buffer.
    pub fn uniform_buffer_slot(&self, name: &str) -> Option<u32> {
        self.uniform_buffer_slots.get(name).copied()
    }

    /// Slot of a sampler.
    pub fn sampler_slot(&self, name: &str) -> Option<u32> {
        self.sampler_slots.get(name).copied()
    }

    /// Slot of an SRV.
    pub fn srv_slot(&self, name: &str) -> Option<u32> {
        self.srv_slots.get(name).copied()
    }

    /// Slot of a UAV.
    pub fn uav_slot(&self, name: &str) -> Option<u32> {
        self.uav_slots.get(name).copied()
    }

    fn malformed(&self, reason: impl Into<String>) -> ShaderError {
        ShaderError::malformed(self.name.clone(), reason)
    }

    fn require_stage(&self, key: &str, stages: &[ShaderStage]) -> Result<(), ShaderError> {
        if stages.contains(&self.stage) {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "metadata '{key}' is not defined for {:?} shaders",
                self.stage
            )))
        }
    }

    fn parse_meta<T: FromStr>(&self, key: &str, stages: &[ShaderStage]) -> Result<T, ShaderError> {
        self.require_stage(key, stages)?;
        let raw = self
            .meta(key)
            .ok_or_else(|| self.malformed(format!("missing metadata '{key}'")))?;
        raw.parse()
            .map_err(|_| self.malformed(format!("invalid value '{raw}' for metadata '{key}'")))
    }

    fn positive_meta(&self, key: &str, stages: &[ShaderStage]) -> Result<u32, ShaderError> {
        let value: u32 = self.parse_meta(key, stages)?;
        if value == 0 {
            return Err(self.malformed(format!("metadata '{key}' must be positive")));
        }
        Ok(value)
    }

    /// Compute thread group size along X.
    pub fn thread_count_x(&self) -> Result<u32, ShaderError> {
        self.positive_meta(meta_keys::THREAD_COUNT_X, &[ShaderStage::Compute])
    }

    /// Compute thread group size along Y.
    pub fn thread_count_y(&self) -> Result<u32, ShaderError> {
        self.positive_meta(meta_keys::THREAD_COUNT_Y, &[ShaderStage::Compute])
    }

    /// Compute thread group size along Z.
    pub fn thread_count_z(&self) -> Result<u32, ShaderError> {
        self.positive_meta(meta_keys::THREAD_COUNT_Z, &[ShaderStage::Compute])
    }

    /// Compute thread group size.
    pub fn thread_group_size(&self) -> Result<[u32; 3], ShaderError> {
        Ok([
            self.thread_count_x()?,
            self.thread_count_y()?,
            self.thread_count_z()?,
        ])
    }

    /// Maximum number of vertices a geometry shader emits per invocation.
    pub fn max_vertex_count(&self) -> Result<u32, ShaderError> {
        self.positive_meta(meta_keys::MAX_VERTEX_COUNT, &[ShaderStage::Geometry])
    }

    /// Primitive type consumed by a geometry shader.
    pub fn geometry_input_primitive(&self) -> Result<GeometryPrimitive, ShaderError> {
        self.parse_meta(meta_keys::INPUT_PRIMITIVE, &[ShaderStage::Geometry])
    }

    /// Size of the geometry shader input array.
    pub fn geometry_input_vertex_count(&self) -> Result<u32, ShaderError> {
        Ok(self.geometry_input_primitive()?.input_vertex_count())
    }

    /// Primitive topology emitted by a geometry shader.
    pub fn geometry_output_primitive(&self) -> Result<StreamTopology, ShaderError> {
        self.parse_meta(meta_keys::OUTPUT_PRIMITIVE, &[ShaderStage::Geometry])
    }

    /// Geometry shader instance count; one when not specified.
    pub fn geometry_instance_count(&self) -> Result<u32, ShaderError> {
        if self.meta(meta_keys::INSTANCE_COUNT).is_none() {
            self.require_stage(meta_keys::INSTANCE_COUNT, &[ShaderStage::Geometry])?;
            return Ok(1);
        }
        self.positive_meta(meta_keys::INSTANCE_COUNT, &[ShaderStage::Geometry])
    }

    /// Tessellation domain of a hull or domain shader.
    pub fn tessellation_domain(&self) -> Result<TessellationDomain, ShaderError> {
        self.parse_meta(
            meta_keys::DOMAIN,
            &[ShaderStage::Hull, ShaderStage::Domain],
        )
    }

    /// Tessellator partitioning of a hull shader.
    pub fn partitioning(&self) -> Result<Partitioning, ShaderError> {
        self.parse_meta(meta_keys::PARTITIONING, &[ShaderStage::Hull])
    }

    /// Tessellator output topology of a hull shader.
    pub fn output_topology(&self) -> Result<OutputTopology, ShaderError> {
        self.parse_meta(meta_keys::OUTPUT_TOPOLOGY, &[ShaderStage::Hull])
    }

    /// Control points per input patch (1 to 32).
    pub fn input_control_points(&self) -> Result<u32, ShaderError> {
        let count = self.positive_meta(
            meta_keys::INPUT_CONTROL_POINTS,
            &[ShaderStage::Hull, ShaderStage::Domain],
        )?;
        self.check_control_points(meta_keys::INPUT_CONTROL_POINTS, count)
    }

    /// Control points per output patch of a hull shader (1 to 32).
    pub fn output_control_points(&self) -> Result<u32, ShaderError> {
        let count = self.positive_meta(meta_keys::OUTPUT_CONTROL_POINTS, &[ShaderStage::Hull])?;
        self.check_control_points(meta_keys::OUTPUT_CONTROL_POINTS, count)
    }

    fn check_control_points(&self, key: &str, count: u32) -> Result<u32, ShaderError> {
        if count > 32 {
            return Err(self.malformed(format!("metadata '{key}' exceeds 32 control points")));
        }
        Ok(count)
    }

    /// Maximum tessellation factor of a hull shader; 64 when not specified.
    pub fn max_tess_factor(&self) -> Result<f32, ShaderError> {
        if self.meta(meta_keys::MAX_TESS_FACTOR).is_none() {
            self.require_stage(meta_keys::MAX_TESS_FACTOR, &[ShaderStage::Hull])?;
            return Ok(64.0);
        }
        let factor: f32 = self.parse_meta(meta_keys::MAX_TESS_FACTOR, &[ShaderStage::Hull])?;
        if !(1.0..=64.0).contains(&factor) {
            return Err(self.malformed(format!(
                "metadata '{}' must lie in [1, 64]",
                meta_keys::MAX_TESS_FACTOR
            )));
        }
        Ok(factor)
    }
}

/// Collects the parts of a [`ShaderReflection`] and validates them on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ShaderReflectionBuilder {
    reflection: ShaderReflection,
}

impl ShaderReflectionBuilder {
    /// Starts a reflection for a shader of the given stage.
    pub fn new(name: impl Into<String>, stage: ShaderStage) -> Self {
        Self {
            reflection: ShaderReflection {
                name: name.into(),
                stage,
                profile: String::new(),
                meta: BTreeMap::new(),
                input: Vec::new(),
                output: Vec::new(),
                input_extra: Vec::new(),
                input_patch: Vec::new(),
                output_patch: Vec::new(),
                output_streams: Vec::new(),
                uniform_buffers: Vec::new(),
                samplers: Vec::new(),
                srvs: Vec::new(),
                uavs: Vec::new(),
                structures: Vec::new(),
                fixed_sampling: Vec::new(),
                code_global: Vec::new(),
                code_patch: Vec::new(),
                code_main: Vec::new(),
                uniform_buffer_slots: HashMap::new(),
                sampler_slots: HashMap::new(),
                srv_slots: HashMap::new(),
                uav_slots: HashMap::new(),
            },
        }
    }

    /// Sets the profile string.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.reflection.profile = profile.into();
        self
    }

    /// Adds a metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.reflection.meta.insert(key.into(), value.to_string());
        self
    }

    /// Appends a stage input.
    pub fn input(mut self, variable: IoVariable) -> Self {
        self.reflection.input.push(variable);
        self
    }

    /// Appends a stage output.
    pub fn output(mut self, variable: IoVariable) -> Self {
        self.reflection.output.push(variable);
        self
    }

    /// Appends an extra input.
    pub fn input_extra(mut self, variable: IoVariable) -> Self {
        self.reflection.input_extra.push(variable);
        self
    }

    /// Appends a per-patch input.
    pub fn input_patch(mut self, variable: IoVariable) -> Self {
        self.reflection.input_patch.push(variable);
        self
    }

    /// Appends a per-patch output.
    pub fn output_patch(mut self, variable: IoVariable) -> Self {
        self.reflection.output_patch.push(variable);
        self
    }

    /// Appends a geometry output stream.
    pub fn output_stream(mut self, stream: OutputStream) -> Self {
        self.reflection.output_streams.push(stream);
        self
    }

    /// Appends a uniform buffer.
    pub fn uniform_buffer(mut self, buffer: UniformBuffer) -> Self {
        self.reflection.uniform_buffers.push(buffer);
        self
    }

    /// Appends a sampler.
    pub fn sampler(mut self, sampler: SamplerBinding) -> Self {
        self.reflection.samplers.push(sampler);
        self
    }

    /// Appends an SRV.
    pub fn srv(mut self, srv: SrvBinding) -> Self {
        self.reflection.srvs.push(srv);
        self
    }

    /// Appends a UAV.
    pub fn uav(mut self, uav: UavBinding) -> Self {
        self.reflection.uavs.push(uav);
        self
    }

    /// Appends a structure.
    pub fn structure(mut self, structure: Structure) -> Self {
        self.reflection.structures.push(structure);
        self
    }

    /// Fixes an SRV to a sampler.
    pub fn fixed_sampling(mut self, srv: impl Into<String>, sampler: impl Into<String>) -> Self {
        self.reflection.fixed_sampling.push(FixedSampling {
            srv: srv.into(),
            sampler: sampler.into(),
        });
        self
    }

    /// Appends a global code line.
    pub fn global_line(mut self, line: impl Into<String>) -> Self {
        self.reflection.code_global.push(line.into());
        self
    }

    /// Appends a patch-constant code line.
    pub fn patch_line(mut self, line: impl Into<String>) -> Self {
        self.reflection.code_patch.push(line.into());
        self
    }

    /// Appends a main-function code line.
    pub fn main_line(mut self, line: impl Into<String>) -> Self {
        self.reflection.code_main.push(line.into());
        self
    }

    /// Validates the collected description and freezes it.
    pub fn build(self) -> Result<ShaderReflection, ShaderError> {
        let mut r = self.reflection;
        let name = r.name.clone();
        let fail = |reason: String| ShaderError::malformed(name.clone(), reason);

        if let Some(profile_stage) = ShaderStage::from_profile(&r.profile) {
            if profile_stage != r.stage {
                return Err(fail(format!(
                    "profile '{}' targets {:?} shaders but the stage is {:?}",
                    r.profile, profile_stage, r.stage
                )));
            }
        }

        let groups: [(&str, &[IoVariable]); 5] = [
            ("input", r.input.as_slice()),
            ("output", r.output.as_slice()),
            ("input_extra", r.input_extra.as_slice()),
            ("input_patch", r.input_patch.as_slice()),
            ("output_patch", r.output_patch.as_slice()),
        ];
        for (group, vars) in groups {
            check_unique(vars.iter().map(|v| v.name.as_str()))
                .map_err(|name| fail(format!("duplicate variable '{name}' in {group}")))?;
        }
        for stream in &r.output_streams {
            check_unique(stream.variables.iter().map(|v| v.name.as_str())).map_err(|name| {
                fail(format!(
                    "duplicate variable '{name}' in output stream '{}'",
                    stream.name
                ))
            })?;
        }
        check_unique(r.output_streams.iter().map(|s| s.name.as_str()))
            .map_err(|name| fail(format!("duplicate output stream '{name}'")))?;

        let stage_groups: [(&str, bool, &[ShaderStage]); 4] = [
            (
                "output streams",
                !r.output_streams.is_empty(),
                &[ShaderStage::Geometry],
            ),
            (
                "input patch variables",
                !r.input_patch.is_empty(),
                &[ShaderStage::Domain],
            ),
            (
                "output patch variables",
                !r.output_patch.is_empty(),
                &[ShaderStage::Hull],
            ),
            (
                "patch constant code",
                !r.code_patch.is_empty(),
                &[ShaderStage::Hull],
            ),
        ];
        for (what, present, stages) in stage_groups {
            if present && !stages.contains(&r.stage) {
                return Err(fail(format!("{what} are not allowed in {:?} shaders", r.stage)));
            }
        }
        if r.stage == ShaderStage::Geometry && !r.output_streams.is_empty() && !r.output.is_empty()
        {
            return Err(fail(
                "a geometry shader declares either plain outputs or output streams, not both"
                    .to_string(),
            ));
        }

        check_unique(r.structures.iter().map(|s| s.name.as_str()))
            .map_err(|name| fail(format!("duplicate structure '{name}'")))?;

        let patch_io = r.input_patch.iter().chain(&r.output_patch).map(|v| (v, true));
        let stage_io = r
            .input
            .iter()
            .chain(&r.output)
            .chain(&r.input_extra)
            .chain(r.output_streams.iter().flat_map(|s| &s.variables))
            .map(|v| (v, false));
        for (variable, in_patch) in patch_io.chain(stage_io) {
            check_type(&variable.ty, &r.structures)
                .map_err(|reason| fail(format!("variable '{}': {reason}", variable.name)))?;
            let tess_sized = variable
                .ty
                .array_size()
                .is_some_and(ArraySize::is_domain_dependent);
            if tess_sized && !in_patch {
                return Err(fail(format!(
                    "variable '{}' has a tessellation factor size outside a patch",
                    variable.name
                )));
            }
        }
        for structure in &r.structures {
            check_unique(structure.members.iter().map(|m| m.name.as_str())).map_err(|name| {
                fail(format!(
                    "duplicate member '{name}' in structure '{}'",
                    structure.name
                ))
            })?;
            for member in &structure.members {
                check_type(&member.ty, &r.structures).map_err(|reason| {
                    fail(format!(
                        "member '{}' of structure '{}': {reason}",
                        member.name, structure.name
                    ))
                })?;
            }
        }

        for buffer in &r.uniform_buffers {
            check_unique(buffer.members.iter().map(|m| m.name.as_str())).map_err(|name| {
                fail(format!(
                    "duplicate member '{name}' in uniform buffer '{}'",
                    buffer.name
                ))
            })?;
            let mut previous: Option<u32> = None;
            for member in &buffer.members {
                check_type(&member.ty, &r.structures).map_err(|reason| {
                    fail(format!(
                        "member '{}' of uniform buffer '{}': {reason}",
                        member.name, buffer.name
                    ))
                })?;
                if member.offset % 16 != 0 || previous.is_some_and(|p| member.offset <= p) {
                    return Err(fail(format!(
                        "member '{}' of uniform buffer '{}' has offset {} which is not increasing and 16-byte aligned",
                        member.name, buffer.name, member.offset
                    )));
                }
                previous = Some(member.offset);
            }
        }

        r.uniform_buffer_slots = slot_map(
            "uniform buffer",
            r.uniform_buffers.iter().map(|b| (b.name.as_str(), b.slot)),
        )
        .map_err(&fail)?;
        r.sampler_slots =
            slot_map("sampler", r.samplers.iter().map(|s| (s.name.as_str(), s.slot)))
                .map_err(&fail)?;
        r.srv_slots =
            slot_map("srv", r.srvs.iter().map(|s| (s.name.as_str(), s.slot))).map_err(&fail)?;
        r.uav_slots =
            slot_map("uav", r.uavs.iter().map(|u| (u.name.as_str(), u.slot))).map_err(&fail)?;

        let views = r
            .srvs
            .iter()
            .map(|s| (&s.name, &s.element))
            .chain(r.uavs.iter().map(|u| (&u.name, &u.element)));
        for (view, element) in views {
            check_type(element, &r.structures)
                .map_err(|reason| fail(format!("view '{view}': {reason}")))?;
        }

        for association in &r.fixed_sampling {
            if !r.srv_slots.contains_key(&association.srv) {
                return Err(fail(format!(
                    "fixed sampling refers to unknown srv '{}'",
                    association.srv
                )));
            }
            if !r.sampler_slots.contains_key(&association.sampler) {
                return Err(fail(format!(
                    "fixed sampling refers to unknown sampler '{}'",
                    association.sampler
                )));
            }
        }
        check_unique(r.fixed_sampling.iter().map(|f| f.srv.as_str()))
            .map_err(|name| fail(format!("srv '{name}' is fixed to more than one sampler")))?;

        log::debug!(
            "Built reflection '{}' ({:?}, {} inputs, {} outputs)",
            r.name,
            r.stage,
            r.input.len(),
            r.output.len()
        );
        Ok(r)
    }
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(name.to_string());
        }
    }
    Ok(())
}

fn check_type(ty: &ShaderValueType, structures: &[Structure]) -> Result<(), String> {
    if let Some(ArraySize::Fixed(0)) = ty.array_size() {
        return Err("array length must be positive".to_string());
    }
    if let ShaderValueType::Array { element, .. } = ty {
        if matches!(**element, ShaderValueType::Array { .. }) {
            return Err("nested arrays are not supported".to_string());
        }
    }
    match ty.structure_name() {
        Some(name) if !structures.iter().any(|s| s.name == name) => {
            Err(format!("unknown structure '{name}'"))
        }
        _ => Ok(()),
    }
}

fn slot_map<'a>(
    category: &str,
    bindings: impl Iterator<Item = (&'a str, u32)>,
) -> Result<HashMap<String, u32>, String> {
    let mut by_name = HashMap::new();
    let mut slots = HashSet::new();
    for (name, slot) in bindings {
        if by_name.insert(name.to_string(), slot).is_some() {
            return Err(format!("duplicate {category} '{name}'"));
        }
        if !slots.insert(slot) {
            return Err(format!("{category} slot {slot} is assigned twice"));
        }
    }
    Ok(by_name)
}
