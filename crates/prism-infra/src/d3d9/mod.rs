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

//! The Direct3D 9 backend.
//!
//! Generates HLSL shader model 3 for vertex and pixel shaders, compiles it
//! with `fxc`, and translates engine enums into their `D3D*` values.

mod applier;
mod backend;
mod conversions;
mod generator;
pub mod native;
mod profile;
mod vertex_declaration;

pub use self::applier::*;
pub use self::backend::*;
pub use self::conversions::*;
pub use self::generator::D3d9Generator;
pub use self::profile::*;
pub use self::vertex_declaration::{decl_usage, DeclUsage, VertexDeclaration};
