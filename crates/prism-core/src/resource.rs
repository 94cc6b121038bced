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

//! The kinds of GPU resources a shader binding or a view can refer to.

use std::fmt;
use std::str::FromStr;

/// Tagged union over every resource shape a view can be attached to.
///
/// Backends match on it exhaustively instead of dispatching through
/// per-resource view types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A typed buffer.
    Buffer,
    /// A buffer of user-defined structures.
    StructuredBuffer,
    /// A render-only surface that cannot be sampled.
    Renderbuffer,
    /// A 1D texture.
    Texture1D,
    /// An array of 1D textures.
    Texture1DArray,
    /// A 2D texture.
    Texture2D,
    /// An array of 2D textures.
    Texture2DArray,
    /// A multisampled 2D texture.
    Texture2DMultisample,
    /// A 3D texture.
    Texture3D,
    /// A cube map.
    TextureCube,
    /// An array of cube maps.
    TextureCubeArray,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Buffer,
        ResourceKind::StructuredBuffer,
        ResourceKind::Renderbuffer,
        ResourceKind::Texture1D,
        ResourceKind::Texture1DArray,
        ResourceKind::Texture2D,
        ResourceKind::Texture2DArray,
        ResourceKind::Texture2DMultisample,
        ResourceKind::Texture3D,
        ResourceKind::TextureCube,
        ResourceKind::TextureCubeArray,
    ];

    /// Whether the kind is a texture that a sampler can filter.
    pub const fn is_sampleable(self) -> bool {
        match self {
            ResourceKind::Texture1D
            | ResourceKind::Texture1DArray
            | ResourceKind::Texture2D
            | ResourceKind::Texture2DArray
            | ResourceKind::Texture3D
            | ResourceKind::TextureCube
            | ResourceKind::TextureCubeArray => true,
            ResourceKind::Buffer
            | ResourceKind::StructuredBuffer
            | ResourceKind::Renderbuffer
            | ResourceKind::Texture2DMultisample => false,
        }
    }

    /// Number of coordinates needed to address one texel for sampling,
    /// including the array layer. `None` for kinds that cannot be sampled.
    pub const fn coordinate_count(self) -> Option<u32> {
        match self {
            ResourceKind::Texture1D => Some(1),
            ResourceKind::Texture1DArray | ResourceKind::Texture2D => Some(2),
            ResourceKind::Texture2DArray | ResourceKind::Texture3D | ResourceKind::TextureCube => {
                Some(3)
            }
            ResourceKind::TextureCubeArray => Some(4),
            ResourceKind::Buffer
            | ResourceKind::StructuredBuffer
            | ResourceKind::Renderbuffer
            | ResourceKind::Texture2DMultisample => None,
        }
    }

    /// The HLSL object name for a read-only view (`Texture2D`, `Buffer`, ...).
    pub const fn hlsl_srv_name(self) -> Option<&'static str> {
        match self {
            ResourceKind::Buffer => Some("Buffer"),
            ResourceKind::StructuredBuffer => Some("StructuredBuffer"),
            ResourceKind::Renderbuffer => None,
            ResourceKind::Texture1D => Some("Texture1D"),
            ResourceKind::Texture1DArray => Some("Texture1DArray"),
            ResourceKind::Texture2D => Some("Texture2D"),
            ResourceKind::Texture2DArray => Some("Texture2DArray"),
            ResourceKind::Texture2DMultisample => Some("Texture2DMS"),
            ResourceKind::Texture3D => Some("Texture3D"),
            ResourceKind::TextureCube => Some("TextureCube"),
            ResourceKind::TextureCubeArray => Some("TextureCubeArray"),
        }
    }

    /// The HLSL object name for a read-write view (`RWTexture2D`, ...).
    pub const fn hlsl_uav_name(self) -> Option<&'static str> {
        match self {
            ResourceKind::Buffer => Some("RWBuffer"),
            ResourceKind::StructuredBuffer => Some("RWStructuredBuffer"),
            ResourceKind::Texture1D => Some("RWTexture1D"),
            ResourceKind::Texture1DArray => Some("RWTexture1DArray"),
            ResourceKind::Texture2D => Some("RWTexture2D"),
            ResourceKind::Texture2DArray => Some("RWTexture2DArray"),
            ResourceKind::Texture3D => Some("RWTexture3D"),
            ResourceKind::Renderbuffer
            | ResourceKind::Texture2DMultisample
            | ResourceKind::TextureCube
            | ResourceKind::TextureCubeArray => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Accepts the HLSL object names, with or without the `RW` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("RW").unwrap_or(s);
        match name {
            "Buffer" => Ok(ResourceKind::Buffer),
            "StructuredBuffer" => Ok(ResourceKind::StructuredBuffer),
            "Renderbuffer" => Ok(ResourceKind::Renderbuffer),
            "Texture1D" => Ok(ResourceKind::Texture1D),
            "Texture1DArray" => Ok(ResourceKind::Texture1DArray),
            "Texture2D" => Ok(ResourceKind::Texture2D),
            "Texture2DArray" => Ok(ResourceKind::Texture2DArray),
            "Texture2DMS" => Ok(ResourceKind::Texture2DMultisample),
            "Texture3D" => Ok(ResourceKind::Texture3D),
            "TextureCube" => Ok(ResourceKind::TextureCube),
            "TextureCubeArray" => Ok(ResourceKind::TextureCubeArray),
            other => Err(format!("unknown resource kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hlsl_names_parse_back() {
        for kind in ResourceKind::ALL {
            if let Some(name) = kind.hlsl_srv_name() {
                assert_eq!(name.parse::<ResourceKind>().unwrap(), kind);
            }
            if let Some(name) = kind.hlsl_uav_name() {
                assert_eq!(name.parse::<ResourceKind>().unwrap(), kind);
            }
        }
    }

    #[test]
    fn sampleable_kinds_have_coordinates() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.is_sampleable(), kind.coordinate_count().is_some());
        }
    }
}
