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

//! The OpenGL backend.
//!
//! Generates GLSL 4.40 to 4.60 for vertex, pixel and compute shaders, compiles
//! it to SPIR-V with naga, and translates engine enums into `GL_*` values.

mod applier;
mod backend;
mod compiler;
mod conversions;
mod generator;
pub mod native;
mod profile;
mod vertex_attributes;

pub use self::applier::*;
pub use self::backend::*;
pub use self::compiler::*;
pub use self::conversions::*;
pub use self::generator::{
    glsl_type, interface_locations, GlslGenerator, SAMPLER_BINDING_BASE, SRV_BINDING_BASE,
    UAV_BINDING_BASE, UNIFORM_BINDING_BASE,
};
pub use self::profile::*;
pub use self::vertex_attributes::{AttributeLocation, VertexAttribute};
