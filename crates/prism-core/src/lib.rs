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

//! # Prism Core
//!
//! Backend-agnostic contracts of the Prism graphics abstraction: the shader
//! value type system, the reflection model and its description parser, the
//! structured source document generators write into, the compilation driver,
//! the vertex layout reconciler, dirty-tracked bindings and the device /
//! device-context state machine.
//!
//! Native backends implement [`device::GraphicsBackend`] in `prism-infra`.

#![warn(missing_docs)]

pub mod binding;
pub mod device;
pub mod error;
pub mod format;
pub mod resource;
pub mod settings;
pub mod shader;

pub use device::{BackendKind, Device, DeviceContext, GraphicsBackend};
pub use error::{ContextError, ShaderError};
pub use settings::CompilerSettings;
pub use shader::{parse_shader_description, ShaderReflection, ShaderReflectionBuilder, ShaderStage};
