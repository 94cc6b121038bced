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

//! Engine-level enums that every backend translates into its native values.
//!
//! Translation tables live next to each backend and are total on the subset the
//! backend supports; everything else is rejected with
//! [`ShaderError::UnsupportedValue`](crate::error::ShaderError::UnsupportedValue).

use crate::shader::{BaseType, GeometryPrimitive};

/// An explicit element format, used for vertex attributes and view formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplicitFormat {
    /// One 8-bit unsigned normalized component.
    R8Unorm,
    /// One 8-bit unsigned integer component.
    R8Uint,
    /// Two 8-bit unsigned normalized components.
    R8G8Unorm,
    /// Four 8-bit unsigned normalized components.
    R8G8B8A8Unorm,
    /// Four 8-bit unsigned normalized components in sRGB space.
    R8G8B8A8UnormSrgb,
    /// Four 8-bit signed normalized components.
    R8G8B8A8Snorm,
    /// Four 8-bit unsigned integer components.
    R8G8B8A8Uint,
    /// Four 8-bit signed integer components.
    R8G8B8A8Sint,
    /// Four 8-bit unsigned normalized components in BGRA order.
    B8G8R8A8Unorm,
    /// One 16-bit float component.
    R16Float,
    /// Two 16-bit float components.
    R16G16Float,
    /// Two 16-bit unsigned normalized components.
    R16G16Unorm,
    /// Two 16-bit signed normalized components.
    R16G16Snorm,
    /// Two 16-bit unsigned integer components.
    R16G16Uint,
    /// Two 16-bit signed integer components.
    R16G16Sint,
    /// Four 16-bit float components.
    R16G16B16A16Float,
    /// Four 16-bit unsigned normalized components.
    R16G16B16A16Unorm,
    /// Four 16-bit signed normalized components.
    R16G16B16A16Snorm,
    /// Four 16-bit unsigned integer components.
    R16G16B16A16Uint,
    /// Four 16-bit signed integer components.
    R16G16B16A16Sint,
    /// One 32-bit float component.
    R32Float,
    /// Two 32-bit float components.
    R32G32Float,
    /// Three 32-bit float components.
    R32G32B32Float,
    /// Four 32-bit float components.
    R32G32B32A32Float,
    /// One 32-bit unsigned integer component.
    R32Uint,
    /// Two 32-bit unsigned integer components.
    R32G32Uint,
    /// Three 32-bit unsigned integer components.
    R32G32B32Uint,
    /// Four 32-bit unsigned integer components.
    R32G32B32A32Uint,
    /// One 32-bit signed integer component.
    R32Sint,
    /// Two 32-bit signed integer components.
    R32G32Sint,
    /// Three 32-bit signed integer components.
    R32G32B32Sint,
    /// Four 32-bit signed integer components.
    R32G32B32A32Sint,
    /// Packed 10-10-10-2 unsigned normalized.
    R10G10B10A2Unorm,
    /// Packed 11-11-10 float.
    R11G11B10Float,
    /// 16-bit depth.
    D16Unorm,
    /// 24-bit depth with 8-bit stencil.
    D24UnormS8Uint,
    /// 32-bit float depth.
    D32Float,
}

impl ExplicitFormat {
    /// Every format, in declaration order.
    pub const ALL: [ExplicitFormat; 37] = [
        ExplicitFormat::R8Unorm,
        ExplicitFormat::R8Uint,
        ExplicitFormat::R8G8Unorm,
        ExplicitFormat::R8G8B8A8Unorm,
        ExplicitFormat::R8G8B8A8UnormSrgb,
        ExplicitFormat::R8G8B8A8Snorm,
        ExplicitFormat::R8G8B8A8Uint,
        ExplicitFormat::R8G8B8A8Sint,
        ExplicitFormat::B8G8R8A8Unorm,
        ExplicitFormat::R16Float,
        ExplicitFormat::R16G16Float,
        ExplicitFormat::R16G16Unorm,
        ExplicitFormat::R16G16Snorm,
        ExplicitFormat::R16G16Uint,
        ExplicitFormat::R16G16Sint,
        ExplicitFormat::R16G16B16A16Float,
        ExplicitFormat::R16G16B16A16Unorm,
        ExplicitFormat::R16G16B16A16Snorm,
        ExplicitFormat::R16G16B16A16Uint,
        ExplicitFormat::R16G16B16A16Sint,
        ExplicitFormat::R32Float,
        ExplicitFormat::R32G32Float,
        ExplicitFormat::R32G32B32Float,
        ExplicitFormat::R32G32B32A32Float,
        ExplicitFormat::R32Uint,
        ExplicitFormat::R32G32Uint,
        ExplicitFormat::R32G32B32Uint,
        ExplicitFormat::R32G32B32A32Uint,
        ExplicitFormat::R32Sint,
        ExplicitFormat::R32G32Sint,
        ExplicitFormat::R32G32B32Sint,
        ExplicitFormat::R32G32B32A32Sint,
        ExplicitFormat::R10G10B10A2Unorm,
        ExplicitFormat::R11G11B10Float,
        ExplicitFormat::D16Unorm,
        ExplicitFormat::D24UnormS8Uint,
        ExplicitFormat::D32Float,
    ];

    /// The scalar type a shader reads from this format.
    ///
    /// Normalized and float formats read as `float`.
    pub fn base_type(self) -> BaseType {
        use ExplicitFormat::*;
        match self {
            R8Uint | R8G8B8A8Uint | R16G16Uint | R16G16B16A16Uint | R32Uint | R32G32Uint
            | R32G32B32Uint | R32G32B32A32Uint => BaseType::UInt,
            R8G8B8A8Sint | R16G16Sint | R16G16B16A16Sint | R32Sint | R32G32Sint
            | R32G32B32Sint | R32G32B32A32Sint => BaseType::Int,
            _ => BaseType::Float,
        }
    }

    /// Number of components.
    pub fn component_count(self) -> u32 {
        use ExplicitFormat::*;
        match self {
            R8Unorm | R8Uint | R16Float | R32Float | R32Uint | R32Sint | D16Unorm
            | D24UnormS8Uint | D32Float => 1,
            R8G8Unorm | R16G16Float | R16G16Unorm | R16G16Snorm | R16G16Uint | R16G16Sint
            | R32G32Float | R32G32Uint | R32G32Sint => 2,
            R32G32B32Float | R32G32B32Uint | R32G32B32Sint | R11G11B10Float => 3,
            _ => 4,
        }
    }

    /// Returns the size in bytes of one element.
    pub fn size(self) -> u32 {
        use ExplicitFormat::*;
        match self {
            R8Unorm | R8Uint => 1,
            R8G8Unorm | R16Float | D16Unorm => 2,
            R8G8B8A8Unorm | R8G8B8A8UnormSrgb | R8G8B8A8Snorm | R8G8B8A8Uint | R8G8B8A8Sint
            | B8G8R8A8Unorm | R16G16Float | R16G16Unorm | R16G16Snorm | R16G16Uint
            | R16G16Sint | R32Float | R32Uint | R32Sint | R10G10B10A2Unorm | R11G11B10Float
            | D24UnormS8Uint | D32Float => 4,
            R16G16B16A16Float | R16G16B16A16Unorm | R16G16B16A16Snorm | R16G16B16A16Uint
            | R16G16B16A16Sint | R32G32Float | R32G32Uint | R32G32Sint => 8,
            R32G32B32Float | R32G32B32Uint | R32G32B32Sint => 12,
            R32G32B32A32Float | R32G32B32A32Uint | R32G32B32A32Sint => 16,
        }
    }

    /// Whether the format is a depth (or depth-stencil) format.
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            ExplicitFormat::D16Unorm | ExplicitFormat::D24UnormS8Uint | ExplicitFormat::D32Float
        )
    }

    /// Whether a vertex attribute of this format can feed a shader input of `base`.
    pub fn feeds(self, base: BaseType) -> bool {
        !self.is_depth() && self.base_type() == base
    }
}

/// The type of the indices in an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// Indices are 16-bit unsigned integers.
    Uint16,
    /// Indices are 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Bytes per index.
    pub const fn size(self) -> u32 {
        match self {
            IndexFormat::Uint16 => 2,
            IndexFormat::Uint32 => 4,
        }
    }
}

/// Defines how vertices are connected to form a geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Isolated points.
    PointList,
    /// Isolated lines (every two vertices form a line).
    LineList,
    /// A connected line strip.
    LineStrip,
    /// Isolated triangles.
    #[default]
    TriangleList,
    /// A connected triangle strip.
    TriangleStrip,
    /// Lines with adjacency.
    LineListAdj,
    /// Line strip with adjacency.
    LineStripAdj,
    /// Triangles with adjacency.
    TriangleListAdj,
    /// Triangle strip with adjacency.
    TriangleStripAdj,
    /// Patches of 1 to 32 control points, consumed by a hull shader.
    PatchList(u8),
}

impl PrimitiveTopology {
    /// The primitive a geometry shader receives for this topology. `None` for patches.
    pub fn geometry_primitive(self) -> Option<GeometryPrimitive> {
        match self {
            PrimitiveTopology::PointList => Some(GeometryPrimitive::Point),
            PrimitiveTopology::LineList | PrimitiveTopology::LineStrip => {
                Some(GeometryPrimitive::Line)
            }
            PrimitiveTopology::TriangleList | PrimitiveTopology::TriangleStrip => {
                Some(GeometryPrimitive::Triangle)
            }
            PrimitiveTopology::LineListAdj | PrimitiveTopology::LineStripAdj => {
                Some(GeometryPrimitive::LineAdj)
            }
            PrimitiveTopology::TriangleListAdj | PrimitiveTopology::TriangleStripAdj => {
                Some(GeometryPrimitive::TriangleAdj)
            }
            PrimitiveTopology::PatchList(_) => None,
        }
    }

    /// Control points per patch, for patch topologies.
    pub fn patch_control_points(self) -> Option<u8> {
        match self {
            PrimitiveTopology::PatchList(n) => Some(n),
            _ => None,
        }
    }
}

/// A factor in a blend equation, determining how much a source or destination color contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// The factor is `0.0`.
    Zero,
    /// The factor is `1.0`.
    One,
    /// The factor is the source color.
    SrcColor,
    /// The factor is `1.0 - src`.
    OneMinusSrcColor,
    /// The factor is the source alpha component (`src.a`).
    SrcAlpha,
    /// The factor is `1.0 - src.a`.
    OneMinusSrcAlpha,
    /// The factor is the destination color.
    DstColor,
    /// The factor is `1.0 - dst`.
    OneMinusDstColor,
    /// The factor is `dst.a`.
    DstAlpha,
    /// The factor is `1.0 - dst.a`.
    OneMinusDstAlpha,
    /// The factor is `min(src.a, 1.0 - dst.a)`.
    SrcAlphaSaturated,
    /// The factor is the constant blend color.
    Constant,
    /// The factor is `1.0 - constant`.
    OneMinusConstant,
    /// The factor is the second source color (dual-source blending).
    Src1Color,
    /// The factor is `1.0 - src1`.
    OneMinusSrc1Color,
    /// The factor is the second source alpha.
    Src1Alpha,
    /// The factor is `1.0 - src1.a`.
    OneMinusSrc1Alpha,
}

/// The operation used to combine source and destination colors in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOperation {
    /// The result is `source + destination`.
    Add,
    /// The result is `source - destination`.
    Subtract,
    /// The result is `destination - source`.
    ReverseSubtract,
    /// The result is `min(source, destination)`.
    Min,
    /// The result is `max(source, destination)`.
    Max,
}

/// An operation to perform on a stencil buffer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOperation {
    /// Keep the existing stencil value.
    #[default]
    Keep,
    /// Set the stencil value to 0.
    Zero,
    /// Replace the stencil value with the reference value.
    Replace,
    /// Bitwise invert the stencil value.
    Invert,
    /// Increment the stencil value, clamping at the maximum value.
    IncrementClamp,
    /// Decrement the stencil value, clamping at 0.
    DecrementClamp,
    /// Increment the stencil value, wrapping to 0 on overflow.
    IncrementWrap,
    /// Decrement the stencil value, wrapping to the maximum value on underflow.
    DecrementWrap,
}

/// The comparison function used for depth, stencil and sampler comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonFunction {
    /// The test never passes.
    Never,
    /// Passes if the new value is less than the existing value.
    Less,
    /// Passes if the values are equal.
    Equal,
    /// Passes if the new value is less than or equal to the existing value.
    LessEqual,
    /// Passes if the new value is greater than the existing value.
    Greater,
    /// Passes if the values differ.
    NotEqual,
    /// Passes if the new value is greater than or equal to the existing value.
    GreaterEqual,
    /// The test always passes.
    #[default]
    Always,
}

/// Defines which face of a triangle to cull (not render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// No culling is performed.
    None,
    /// Cull front-facing triangles.
    Front,
    /// Cull back-facing triangles.
    #[default]
    Back,
}

/// Defines how polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// Polygons are filled.
    #[default]
    Solid,
    /// Polygon edges are drawn as lines.
    Wireframe,
    /// Polygon vertices are drawn as points.
    Point,
}

/// Behaviour of texture coordinates outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureAddressMode {
    /// Tile the texture.
    #[default]
    Wrap,
    /// Tile the texture, mirroring every other repetition.
    Mirror,
    /// Clamp to the edge texel.
    Clamp,
    /// Use the sampler border color.
    Border,
    /// Mirror once around zero, then clamp.
    MirrorOnce,
}

/// Texel filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest texel.
    Point,
    /// Linear interpolation between texels.
    #[default]
    Linear,
    /// Anisotropic filtering.
    Anisotropic,
}
