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

use super::native::*;
use prism_core::device::BackendKind;
use prism_core::error::ShaderError;
use prism_core::format::{
    BlendFactor, BlendOperation, ComparisonFunction, CullMode, ExplicitFormat, FillMode,
    FilterMode, IndexFormat, PrimitiveTopology, StencilOperation, TextureAddressMode,
};

/// A local extension trait to translate engine values into OpenGL values.
///
/// Values without a core profile equivalent fail with [`ShaderError::UnsupportedValue`].
pub trait IntoGl<T> {
    /// Translates self into the native value.
    fn into_gl(self) -> Result<T, ShaderError>;
}

fn unsupported(value: impl std::fmt::Debug) -> ShaderError {
    ShaderError::unsupported(BackendKind::OpenGL, value)
}

/// The arguments of `glVertexAttribFormat`/`glVertexAttribIFormat` for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVertexFormat {
    /// Component count, or [`GL_BGRA`] for swizzled bytes.
    pub size: i32,
    /// Component type.
    pub ty: GlType,
    /// Whether integer data is normalized to `[0, 1]` or `[-1, 1]`.
    pub normalized: bool,
    /// Whether the attribute is read as integers (`glVertexAttribIFormat`).
    pub integer: bool,
}

impl GlVertexFormat {
    const fn float(size: i32, ty: GlType) -> Self {
        Self {
            size,
            ty,
            normalized: false,
            integer: false,
        }
    }

    const fn normalized(size: i32, ty: GlType) -> Self {
        Self {
            size,
            ty,
            normalized: true,
            integer: false,
        }
    }

    const fn integer(size: i32, ty: GlType) -> Self {
        Self {
            size,
            ty,
            normalized: false,
            integer: true,
        }
    }
}

impl IntoGl<GlInternalFormat> for ExplicitFormat {
    fn into_gl(self) -> Result<GlInternalFormat, ShaderError> {
        Ok(match self {
            ExplicitFormat::R8Unorm => GlInternalFormat::R8,
            ExplicitFormat::R8Uint => GlInternalFormat::R8UI,
            ExplicitFormat::R8G8Unorm => GlInternalFormat::RG8,
            ExplicitFormat::R8G8B8A8Unorm => GlInternalFormat::RGBA8,
            ExplicitFormat::R8G8B8A8UnormSrgb => GlInternalFormat::SRGB8_ALPHA8,
            ExplicitFormat::R8G8B8A8Snorm => GlInternalFormat::RGBA8_SNORM,
            ExplicitFormat::R8G8B8A8Uint => GlInternalFormat::RGBA8UI,
            ExplicitFormat::R8G8B8A8Sint => GlInternalFormat::RGBA8I,
            ExplicitFormat::R16Float => GlInternalFormat::R16F,
            ExplicitFormat::R16G16Float => GlInternalFormat::RG16F,
            ExplicitFormat::R16G16Unorm => GlInternalFormat::RG16,
            ExplicitFormat::R16G16Snorm => GlInternalFormat::RG16_SNORM,
            ExplicitFormat::R16G16Uint => GlInternalFormat::RG16UI,
            ExplicitFormat::R16G16Sint => GlInternalFormat::RG16I,
            ExplicitFormat::R16G16B16A16Float => GlInternalFormat::RGBA16F,
            ExplicitFormat::R16G16B16A16Unorm => GlInternalFormat::RGBA16,
            ExplicitFormat::R16G16B16A16Snorm => GlInternalFormat::RGBA16_SNORM,
            ExplicitFormat::R16G16B16A16Uint => GlInternalFormat::RGBA16UI,
            ExplicitFormat::R16G16B16A16Sint => GlInternalFormat::RGBA16I,
            ExplicitFormat::R32Float => GlInternalFormat::R32F,
            ExplicitFormat::R32G32Float => GlInternalFormat::RG32F,
            ExplicitFormat::R32G32B32Float => GlInternalFormat::RGB32F,
            ExplicitFormat::R32G32B32A32Float => GlInternalFormat::RGBA32F,
            ExplicitFormat::R32Uint => GlInternalFormat::R32UI,
            ExplicitFormat::R32G32Uint => GlInternalFormat::RG32UI,
            ExplicitFormat::R32G32B32Uint => GlInternalFormat::RGB32UI,
            ExplicitFormat::R32G32B32A32Uint => GlInternalFormat::RGBA32UI,
            ExplicitFormat::R32Sint => GlInternalFormat::R32I,
            ExplicitFormat::R32G32Sint => GlInternalFormat::RG32I,
            ExplicitFormat::R32G32B32Sint => GlInternalFormat::RGB32I,
            ExplicitFormat::R32G32B32A32Sint => GlInternalFormat::RGBA32I,
            ExplicitFormat::R10G10B10A2Unorm => GlInternalFormat::RGB10_A2,
            ExplicitFormat::R11G11B10Float => GlInternalFormat::R11F_G11F_B10F,
            ExplicitFormat::D16Unorm => GlInternalFormat::DEPTH_COMPONENT16,
            ExplicitFormat::D24UnormS8Uint => GlInternalFormat::DEPTH24_STENCIL8,
            ExplicitFormat::D32Float => GlInternalFormat::DEPTH_COMPONENT32F,
            // Core profile storage has no BGRA internal format.
            ExplicitFormat::B8G8R8A8Unorm => return Err(unsupported(self)),
        })
    }
}

impl IntoGl<GlVertexFormat> for ExplicitFormat {
    fn into_gl(self) -> Result<GlVertexFormat, ShaderError> {
        use GlVertexFormat as F;
        Ok(match self {
            ExplicitFormat::R8Unorm => F::normalized(1, GlType::UNSIGNED_BYTE),
            ExplicitFormat::R8Uint => F::integer(1, GlType::UNSIGNED_BYTE),
            ExplicitFormat::R8G8Unorm => F::normalized(2, GlType::UNSIGNED_BYTE),
            ExplicitFormat::R8G8B8A8Unorm => F::normalized(4, GlType::UNSIGNED_BYTE),
            ExplicitFormat::R8G8B8A8Snorm => F::normalized(4, GlType::BYTE),
            ExplicitFormat::R8G8B8A8Uint => F::integer(4, GlType::UNSIGNED_BYTE),
            ExplicitFormat::R8G8B8A8Sint => F::integer(4, GlType::BYTE),
            ExplicitFormat::B8G8R8A8Unorm => F::normalized(GL_BGRA, GlType::UNSIGNED_BYTE),
            ExplicitFormat::R16Float => F::float(1, GlType::HALF_FLOAT),
            ExplicitFormat::R16G16Float => F::float(2, GlType::HALF_FLOAT),
            ExplicitFormat::R16G16Unorm => F::normalized(2, GlType::UNSIGNED_SHORT),
            ExplicitFormat::R16G16Snorm => F::normalized(2, GlType::SHORT),
            ExplicitFormat::R16G16Uint => F::integer(2, GlType::UNSIGNED_SHORT),
            ExplicitFormat::R16G16Sint => F::integer(2, GlType::SHORT),
            ExplicitFormat::R16G16B16A16Float => F::float(4, GlType::HALF_FLOAT),
            ExplicitFormat::R16G16B16A16Unorm => F::normalized(4, GlType::UNSIGNED_SHORT),
            ExplicitFormat::R16G16B16A16Snorm => F::normalized(4, GlType::SHORT),
            ExplicitFormat::R16G16B16A16Uint => F::integer(4, GlType::UNSIGNED_SHORT),
            ExplicitFormat::R16G16B16A16Sint => F::integer(4, GlType::SHORT),
            ExplicitFormat::R32Float => F::float(1, GlType::FLOAT),
            ExplicitFormat::R32G32Float => F::float(2, GlType::FLOAT),
            ExplicitFormat::R32G32B32Float => F::float(3, GlType::FLOAT),
            ExplicitFormat::R32G32B32A32Float => F::float(4, GlType::FLOAT),
            ExplicitFormat::R32Uint => F::integer(1, GlType::UNSIGNED_INT),
            ExplicitFormat::R32G32Uint => F::integer(2, GlType::UNSIGNED_INT),
            ExplicitFormat::R32G32B32Uint => F::integer(3, GlType::UNSIGNED_INT),
            ExplicitFormat::R32G32B32A32Uint => F::integer(4, GlType::UNSIGNED_INT),
            ExplicitFormat::R32Sint => F::integer(1, GlType::INT),
            ExplicitFormat::R32G32Sint => F::integer(2, GlType::INT),
            ExplicitFormat::R32G32B32Sint => F::integer(3, GlType::INT),
            ExplicitFormat::R32G32B32A32Sint => F::integer(4, GlType::INT),
            ExplicitFormat::R10G10B10A2Unorm => {
                F::normalized(4, GlType::UNSIGNED_INT_2_10_10_10_REV)
            }
            ExplicitFormat::R11G11B10Float => F::float(3, GlType::UNSIGNED_INT_10F_11F_11F_REV),
            ExplicitFormat::R8G8B8A8UnormSrgb
            | ExplicitFormat::D16Unorm
            | ExplicitFormat::D24UnormS8Uint
            | ExplicitFormat::D32Float => return Err(unsupported(self)),
        })
    }
}

impl IntoGl<GlType> for IndexFormat {
    fn into_gl(self) -> Result<GlType, ShaderError> {
        Ok(match self {
            IndexFormat::Uint16 => GlType::UNSIGNED_SHORT,
            IndexFormat::Uint32 => GlType::UNSIGNED_INT,
        })
    }
}

impl IntoGl<GlPrimitive> for PrimitiveTopology {
    fn into_gl(self) -> Result<GlPrimitive, ShaderError> {
        Ok(match self {
            PrimitiveTopology::PointList => GlPrimitive::POINTS,
            PrimitiveTopology::LineList => GlPrimitive::LINES,
            PrimitiveTopology::LineStrip => GlPrimitive::LINE_STRIP,
            PrimitiveTopology::TriangleList => GlPrimitive::TRIANGLES,
            PrimitiveTopology::TriangleStrip => GlPrimitive::TRIANGLE_STRIP,
            PrimitiveTopology::LineListAdj => GlPrimitive::LINES_ADJACENCY,
            PrimitiveTopology::LineStripAdj => GlPrimitive::LINE_STRIP_ADJACENCY,
            PrimitiveTopology::TriangleListAdj => GlPrimitive::TRIANGLES_ADJACENCY,
            PrimitiveTopology::TriangleStripAdj => GlPrimitive::TRIANGLE_STRIP_ADJACENCY,
            // The backend generates no tessellation stages.
            PrimitiveTopology::PatchList(_) => return Err(unsupported(self)),
        })
    }
}

impl IntoGl<GlBlendFactor> for BlendFactor {
    fn into_gl(self) -> Result<GlBlendFactor, ShaderError> {
        Ok(match self {
            BlendFactor::Zero => GlBlendFactor::ZERO,
            BlendFactor::One => GlBlendFactor::ONE,
            BlendFactor::SrcColor => GlBlendFactor::SRC_COLOR,
            BlendFactor::OneMinusSrcColor => GlBlendFactor::ONE_MINUS_SRC_COLOR,
            BlendFactor::SrcAlpha => GlBlendFactor::SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => GlBlendFactor::ONE_MINUS_SRC_ALPHA,
            BlendFactor::DstColor => GlBlendFactor::DST_COLOR,
            BlendFactor::OneMinusDstColor => GlBlendFactor::ONE_MINUS_DST_COLOR,
            BlendFactor::DstAlpha => GlBlendFactor::DST_ALPHA,
            BlendFactor::OneMinusDstAlpha => GlBlendFactor::ONE_MINUS_DST_ALPHA,
            BlendFactor::SrcAlphaSaturated => GlBlendFactor::SRC_ALPHA_SATURATE,
            BlendFactor::Constant => GlBlendFactor::CONSTANT_COLOR,
            BlendFactor::OneMinusConstant => GlBlendFactor::ONE_MINUS_CONSTANT_COLOR,
            BlendFactor::Src1Color => GlBlendFactor::SRC1_COLOR,
            BlendFactor::OneMinusSrc1Color => GlBlendFactor::ONE_MINUS_SRC1_COLOR,
            BlendFactor::Src1Alpha => GlBlendFactor::SRC1_ALPHA,
            BlendFactor::OneMinusSrc1Alpha => GlBlendFactor::ONE_MINUS_SRC1_ALPHA,
        })
    }
}

impl IntoGl<GlBlendEquation> for BlendOperation {
    fn into_gl(self) -> Result<GlBlendEquation, ShaderError> {
        Ok(match self {
            BlendOperation::Add => GlBlendEquation::FUNC_ADD,
            BlendOperation::Subtract => GlBlendEquation::FUNC_SUBTRACT,
            BlendOperation::ReverseSubtract => GlBlendEquation::FUNC_REVERSE_SUBTRACT,
            BlendOperation::Min => GlBlendEquation::MIN,
            BlendOperation::Max => GlBlendEquation::MAX,
        })
    }
}

impl IntoGl<GlStencilOp> for StencilOperation {
    fn into_gl(self) -> Result<GlStencilOp, ShaderError> {
        Ok(match self {
            StencilOperation::Keep => GlStencilOp::KEEP,
            StencilOperation::Zero => GlStencilOp::ZERO,
            StencilOperation::Replace => GlStencilOp::REPLACE,
            StencilOperation::Invert => GlStencilOp::INVERT,
            StencilOperation::IncrementClamp => GlStencilOp::INCR,
            StencilOperation::DecrementClamp => GlStencilOp::DECR,
            StencilOperation::IncrementWrap => GlStencilOp::INCR_WRAP,
            StencilOperation::DecrementWrap => GlStencilOp::DECR_WRAP,
        })
    }
}

impl IntoGl<GlCompareFunc> for ComparisonFunction {
    fn into_gl(self) -> Result<GlCompareFunc, ShaderError> {
        Ok(match self {
            ComparisonFunction::Never => GlCompareFunc::NEVER,
            ComparisonFunction::Less => GlCompareFunc::LESS,
            ComparisonFunction::Equal => GlCompareFunc::EQUAL,
            ComparisonFunction::LessEqual => GlCompareFunc::LEQUAL,
            ComparisonFunction::Greater => GlCompareFunc::GREATER,
            ComparisonFunction::NotEqual => GlCompareFunc::NOTEQUAL,
            ComparisonFunction::GreaterEqual => GlCompareFunc::GEQUAL,
            ComparisonFunction::Always => GlCompareFunc::ALWAYS,
        })
    }
}

/// `None` means `GL_CULL_FACE` is disabled.
impl IntoGl<Option<GlFace>> for CullMode {
    fn into_gl(self) -> Result<Option<GlFace>, ShaderError> {
        Ok(match self {
            CullMode::None => None,
            CullMode::Front => Some(GlFace::FRONT),
            CullMode::Back => Some(GlFace::BACK),
        })
    }
}

impl IntoGl<GlPolygonMode> for FillMode {
    fn into_gl(self) -> Result<GlPolygonMode, ShaderError> {
        Ok(match self {
            FillMode::Solid => GlPolygonMode::FILL,
            FillMode::Wireframe => GlPolygonMode::LINE,
            FillMode::Point => GlPolygonMode::POINT,
        })
    }
}

impl IntoGl<GlWrapMode> for TextureAddressMode {
    fn into_gl(self) -> Result<GlWrapMode, ShaderError> {
        Ok(match self {
            TextureAddressMode::Wrap => GlWrapMode::REPEAT,
            TextureAddressMode::Mirror => GlWrapMode::MIRRORED_REPEAT,
            TextureAddressMode::Clamp => GlWrapMode::CLAMP_TO_EDGE,
            TextureAddressMode::Border => GlWrapMode::CLAMP_TO_BORDER,
            TextureAddressMode::MirrorOnce => GlWrapMode::MIRROR_CLAMP_TO_EDGE,
        })
    }
}

impl IntoGl<GlFilter> for FilterMode {
    fn into_gl(self) -> Result<GlFilter, ShaderError> {
        Ok(match self {
            FilterMode::Point => GlFilter::NEAREST,
            FilterMode::Linear => GlFilter::LINEAR,
            // Anisotropy is a sampler parameter on top of a linear filter.
            FilterMode::Anisotropic => return Err(unsupported(self)),
        })
    }
}
