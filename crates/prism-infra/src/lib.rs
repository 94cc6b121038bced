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

//! Native backends for Prism.
//!
//! Each backend module provides a [`GraphicsBackend`](prism_core::device::GraphicsBackend)
//! strategy (code generator, profile resolution, native compiler, input-layout
//! finalizer), the translation tables from engine enums to native values, and a
//! [`StateApplier`](prism_core::device::StateApplier) recording the native calls
//! a flushed device context produces.

#![warn(missing_docs)]

/// Declares a transparent newtype over a native enumeration with its constants.
macro_rules! native_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);

        impl $name {
            $(pub const $variant: Self = Self($value);)*
        }
    };
}

pub mod d3d11;
pub mod d3d9;
pub mod fxc;
mod hlsl;
pub mod opengl;
