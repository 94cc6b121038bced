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

//! The Direct3D 11 backend.
//!
//! Generates HLSL for shader model 4 and 5, compiles it with `fxc`, and
//! translates engine enums into their `D3D11_*` and `DXGI_*` values.

mod applier;
mod backend;
mod conversions;
mod generator;
mod input_layout;
pub mod native;
mod profile;

pub use self::applier::*;
pub use self::backend::*;
pub use self::conversions::*;
pub use self::generator::{input_element_semantic, semantic_of, user_semantic, D3d11Generator};
pub use self::input_layout::{InputElementDesc, InputSemantic};
pub use self::profile::*;
