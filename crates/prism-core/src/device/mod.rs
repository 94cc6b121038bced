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

//! The device and device-context layer consuming compiled shaders.
//!
//! A [`Device`] turns reflections into [`CompiledShader`]s through a
//! [`GraphicsBackend`] strategy. A [`DeviceContext`] holds dirty-tracked
//! pipeline state, validates draws and dispatches against the bound shaders'
//! metadata, and flushes changes through a [`StateApplier`].

mod backend;
mod context;
mod graphics_device;
mod state;

pub use self::backend::*;
pub use self::context::*;
pub use self::graphics_device::*;
pub use self::state::*;

use std::fmt;

/// The native graphics APIs a backend can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Direct3D 9, HLSL shader model 3.
    Direct3D9,
    /// Direct3D 11, HLSL shader model 4 and 5.
    Direct3D11,
    /// OpenGL 4.x, GLSL compiled to SPIR-V.
    OpenGL,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An opaque handle to a compiled shader owned by a [`Device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub usize);

/// An opaque handle to an input layout owned by a [`Device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputLayoutId(pub usize);

/// An opaque handle to a GPU buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

/// An opaque handle to a sampler state object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SamplerId(pub usize);

/// An opaque handle to a texture or buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureViewId(pub usize);
