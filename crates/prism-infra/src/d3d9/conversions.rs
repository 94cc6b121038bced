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

/// A local extension trait to translate engine values into Direct3D 9 values.
///
/// Direct3D 9 covers a subset of the engine enums; everything outside it fails
/// with [`ShaderError::UnsupportedValue`].
pub trait IntoD3d9<T> {
    /// Translates self into the native value.
    fn into_d3d9(self) -> Result<T, ShaderError>;
}

fn unsupported(value: impl std::fmt::Debug) -> ShaderError {
    ShaderError::unsupported(BackendKind::Direct3D9, value)
}

impl IntoD3d9<D3dFormat> for ExplicitFormat {
    fn into_d3d9(self) -> Result<D3dFormat, ShaderError> {
        Ok(match self {
            ExplicitFormat::R8Unorm => D3dFormat::L8,
            ExplicitFormat::R8G8B8A8Unorm => D3dFormat::A8B8G8R8,
            ExplicitFormat::R8G8B8A8Snorm => D3dFormat::Q8W8V8U8,
            ExplicitFormat::B8G8R8A8Unorm => D3dFormat::A8R8G8B8,
            ExplicitFormat::R16Float => D3dFormat::R16F,
            ExplicitFormat::R16G16Float => D3dFormat::G16R16F,
            ExplicitFormat::R16G16Unorm => D3dFormat::G16R16,
            ExplicitFormat::R16G16Snorm => D3dFormat::V16U16,
            ExplicitFormat::R16G16B16A16Float => D3dFormat::A16B16G16R16F,
            ExplicitFormat::R16G16B16A16Unorm => D3dFormat::A16B16G16R16,
            ExplicitFormat::R32Float => D3dFormat::R32F,
            ExplicitFormat::R32G32Float => D3dFormat::G32R32F,
            ExplicitFormat::R32G32B32A32Float => D3dFormat::A32B32G32R32F,
            ExplicitFormat::R10G10B10A2Unorm => D3dFormat::A2B10G10R10,
            ExplicitFormat::D16Unorm => D3dFormat::D16,
            ExplicitFormat::D24UnormS8Uint => D3dFormat::D24S8,
            ExplicitFormat::D32Float => D3dFormat::D32F_LOCKABLE,
            _ => return Err(unsupported(self)),
        })
    }
}

impl IntoD3d9<D3dDeclType> for ExplicitFormat {
    fn into_d3d9(self) -> Result<D3dDeclType, ShaderError> {
        Ok(match self {
            ExplicitFormat::R32Float => D3dDeclType::FLOAT1,
            ExplicitFormat::R32G32Float => D3dDeclType::FLOAT2,
            ExplicitFormat::R32G32B32Float => D3dDeclType::FLOAT3,
            ExplicitFormat::R32G32B32A32Float => D3dDeclType::FLOAT4,
            ExplicitFormat::B8G8R8A8Unorm => D3dDeclType::D3DCOLOR,
            ExplicitFormat::R8G8B8A8Uint => D3dDeclType::UBYTE4,
            ExplicitFormat::R8G8B8A8Unorm => D3dDeclType::UBYTE4N,
            ExplicitFormat::R16G16Sint => D3dDeclType::SHORT2,
            ExplicitFormat::R16G16B16A16Sint => D3dDeclType::SHORT4,
            ExplicitFormat::R16G16Snorm => D3dDeclType::SHORT2N,
            ExplicitFormat::R16G16B16A16Snorm => D3dDeclType::SHORT4N,
            ExplicitFormat::R16G16Unorm => D3dDeclType::USHORT2N,
            ExplicitFormat::R16G16B16A16Unorm => D3dDeclType::USHORT4N,
            ExplicitFormat::R16G16Float => D3dDeclType::FLOAT16_2,
            ExplicitFormat::R16G16B16A16Float => D3dDeclType::FLOAT16_4,
            _ => return Err(unsupported(self)),
        })
    }
}

impl IntoD3d9<D3dFormat> for IndexFormat {
    fn into_d3d9(self) -> Result<D3dFormat, ShaderError> {
        Ok(match self {
            IndexFormat::Uint16 => D3dFormat::INDEX16,
            IndexFormat::Uint32 => D3dFormat::INDEX32,
        })
    }
}

impl IntoD3d9<D3dPrimitiveType> for PrimitiveTopology {
    fn into_d3d9(self) -> Result<D3dPrimitiveType, ShaderError> {
        Ok(match self {
            PrimitiveTopology::PointList => D3dPrimitiveType::POINTLIST,
            PrimitiveTopology::LineList => D3dPrimitiveType::LINELIST,
            PrimitiveTopology::LineStrip => D3dPrimitiveType::LINESTRIP,
            PrimitiveTopology::TriangleList => D3dPrimitiveType::TRIANGLELIST,
            PrimitiveTopology::TriangleStrip => D3dPrimitiveType::TRIANGLESTRIP,
            PrimitiveTopology::LineListAdj
            | PrimitiveTopology::LineStripAdj
            | PrimitiveTopology::TriangleListAdj
            | PrimitiveTopology::TriangleStripAdj
            | PrimitiveTopology::PatchList(_) => return Err(unsupported(self)),
        })
    }
}

impl IntoD3d9<D3dBlend> for BlendFactor {
    fn into_d3d9(self) -> Result<D3dBlend, ShaderError> {
        Ok(match self {
            BlendFactor::Zero => D3dBlend::ZERO,
            BlendFactor::One => D3dBlend::ONE,
            BlendFactor::SrcColor => D3dBlend::SRCCOLOR,
            BlendFactor::OneMinusSrcColor => D3dBlend::INVSRCCOLOR,
            BlendFactor::SrcAlpha => D3dBlend::SRCALPHA,
            BlendFactor::OneMinusSrcAlpha => D3dBlend::INVSRCALPHA,
            BlendFactor::DstColor => D3dBlend::DESTCOLOR,
            BlendFactor::OneMinusDstColor => D3dBlend::INVDESTCOLOR,
            BlendFactor::DstAlpha => D3dBlend::DESTALPHA,
            BlendFactor::OneMinusDstAlpha => D3dBlend::INVDESTALPHA,
            BlendFactor::SrcAlphaSaturated => D3dBlend::SRCALPHASAT,
            BlendFactor::Constant => D3dBlend::BLENDFACTOR,
            BlendFactor::OneMinusConstant => D3dBlend::INVBLENDFACTOR,
            BlendFactor::Src1Color
            | BlendFactor::OneMinusSrc1Color
            | BlendFactor::Src1Alpha
            | BlendFactor::OneMinusSrc1Alpha => return Err(unsupported(self)),
        })
    }
}

impl IntoD3d9<D3dBlendOp> for BlendOperation {
    fn into_d3d9(self) -> Result<D3dBlendOp, ShaderError> {
        Ok(match self {
            BlendOperation::Add => D3dBlendOp::ADD,
            BlendOperation::Subtract => D3dBlendOp::SUBTRACT,
            BlendOperation::ReverseSubtract => D3dBlendOp::REVSUBTRACT,
            BlendOperation::Min => D3dBlendOp::MIN,
            BlendOperation::Max => D3dBlendOp::MAX,
        })
    }
}

impl IntoD3d9<D3dStencilOp> for StencilOperation {
    fn into_d3d9(self) -> Result<D3dStencilOp, ShaderError> {
        Ok(match self {
            StencilOperation::Keep => D3dStencilOp::KEEP,
            StencilOperation::Zero => D3dStencilOp::ZERO,
            StencilOperation::Replace => D3dStencilOp::REPLACE,
            StencilOperation::Invert => D3dStencilOp::INVERT,
            StencilOperation::IncrementClamp => D3dStencilOp::INCRSAT,
            StencilOperation::DecrementClamp => D3dStencilOp::DECRSAT,
            StencilOperation::IncrementWrap => D3dStencilOp::INCR,
            StencilOperation::DecrementWrap => D3dStencilOp::DECR,
        })
    }
}

impl IntoD3d9<D3dCmpFunc> for ComparisonFunction {
    fn into_d3d9(self) -> Result<D3dCmpFunc, ShaderError> {
        Ok(match self {
            ComparisonFunction::Never => D3dCmpFunc::NEVER,
            ComparisonFunction::Less => D3dCmpFunc::LESS,
            ComparisonFunction::Equal => D3dCmpFunc::EQUAL,
            ComparisonFunction::LessEqual => D3dCmpFunc::LESSEQUAL,
            ComparisonFunction::Greater => D3dCmpFunc::GREATER,
            ComparisonFunction::NotEqual => D3dCmpFunc::NOTEQUAL,
            ComparisonFunction::GreaterEqual => D3dCmpFunc::GREATEREQUAL,
            ComparisonFunction::Always => D3dCmpFunc::ALWAYS,
        })
    }
}

impl IntoD3d9<D3dCull> for CullMode {
    fn into_d3d9(self) -> Result<D3dCull, ShaderError> {
        Ok(match self {
            CullMode::None => D3dCull::NONE,
            CullMode::Front => D3dCull::CW,
            CullMode::Back => D3dCull::CCW,
        })
    }
}

impl IntoD3d9<D3dFillMode> for FillMode {
    fn into_d3d9(self) -> Result<D3dFillMode, ShaderError> {
        Ok(match self {
            FillMode::Solid => D3dFillMode::SOLID,
            FillMode::Wireframe => D3dFillMode::WIREFRAME,
            FillMode::Point => D3dFillMode::POINT,
        })
    }
}

impl IntoD3d9<D3dTextureAddress> for TextureAddressMode {
    fn into_d3d9(self) -> Result<D3dTextureAddress, ShaderError> {
        Ok(match self {
            TextureAddressMode::Wrap => D3dTextureAddress::WRAP,
            TextureAddressMode::Mirror => D3dTextureAddress::MIRROR,
            TextureAddressMode::Clamp => D3dTextureAddress::CLAMP,
            TextureAddressMode::Border => D3dTextureAddress::BORDER,
            TextureAddressMode::MirrorOnce => D3dTextureAddress::MIRRORONCE,
        })
    }
}

impl IntoD3d9<D3dTextureFilterType> for FilterMode {
    fn into_d3d9(self) -> Result<D3dTextureFilterType, ShaderError> {
        Ok(match self {
            FilterMode::Point => D3dTextureFilterType::POINT,
            FilterMode::Linear => D3dTextureFilterType::LINEAR,
            FilterMode::Anisotropic => D3dTextureFilterType::ANISOTROPIC,
        })
    }
}
