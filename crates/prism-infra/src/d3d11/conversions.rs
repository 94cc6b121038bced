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

/// A local extension trait to translate engine values into Direct3D 11 values.
///
/// Values without a native equivalent fail with [`ShaderError::UnsupportedValue`].
pub trait IntoD3d11<T> {
    /// Translates self into the native value.
    fn into_d3d11(self) -> Result<T, ShaderError>;
}

fn unsupported(value: impl std::fmt::Debug) -> ShaderError {
    ShaderError::unsupported(BackendKind::Direct3D11, value)
}

impl IntoD3d11<DxgiFormat> for ExplicitFormat {
    fn into_d3d11(self) -> Result<DxgiFormat, ShaderError> {
        Ok(match self {
            ExplicitFormat::R8Unorm => DxgiFormat::R8_UNORM,
            ExplicitFormat::R8Uint => DxgiFormat::R8_UINT,
            ExplicitFormat::R8G8Unorm => DxgiFormat::R8G8_UNORM,
            ExplicitFormat::R8G8B8A8Unorm => DxgiFormat::R8G8B8A8_UNORM,
            ExplicitFormat::R8G8B8A8UnormSrgb => DxgiFormat::R8G8B8A8_UNORM_SRGB,
            ExplicitFormat::R8G8B8A8Snorm => DxgiFormat::R8G8B8A8_SNORM,
            ExplicitFormat::R8G8B8A8Uint => DxgiFormat::R8G8B8A8_UINT,
            ExplicitFormat::R8G8B8A8Sint => DxgiFormat::R8G8B8A8_SINT,
            ExplicitFormat::B8G8R8A8Unorm => DxgiFormat::B8G8R8A8_UNORM,
            ExplicitFormat::R16Float => DxgiFormat::R16_FLOAT,
            ExplicitFormat::R16G16Float => DxgiFormat::R16G16_FLOAT,
            ExplicitFormat::R16G16Unorm => DxgiFormat::R16G16_UNORM,
            ExplicitFormat::R16G16Snorm => DxgiFormat::R16G16_SNORM,
            ExplicitFormat::R16G16Uint => DxgiFormat::R16G16_UINT,
            ExplicitFormat::R16G16Sint => DxgiFormat::R16G16_SINT,
            ExplicitFormat::R16G16B16A16Float => DxgiFormat::R16G16B16A16_FLOAT,
            ExplicitFormat::R16G16B16A16Unorm => DxgiFormat::R16G16B16A16_UNORM,
            ExplicitFormat::R16G16B16A16Snorm => DxgiFormat::R16G16B16A16_SNORM,
            ExplicitFormat::R16G16B16A16Uint => DxgiFormat::R16G16B16A16_UINT,
            ExplicitFormat::R16G16B16A16Sint => DxgiFormat::R16G16B16A16_SINT,
            ExplicitFormat::R32Float => DxgiFormat::R32_FLOAT,
            ExplicitFormat::R32Uint => DxgiFormat::R32_UINT,
            ExplicitFormat::R32Sint => DxgiFormat::R32_SINT,
            ExplicitFormat::R32G32Float => DxgiFormat::R32G32_FLOAT,
            ExplicitFormat::R32G32Uint => DxgiFormat::R32G32_UINT,
            ExplicitFormat::R32G32Sint => DxgiFormat::R32G32_SINT,
            ExplicitFormat::R32G32B32Float => DxgiFormat::R32G32B32_FLOAT,
            ExplicitFormat::R32G32B32Uint => DxgiFormat::R32G32B32_UINT,
            ExplicitFormat::R32G32B32Sint => DxgiFormat::R32G32B32_SINT,
            ExplicitFormat::R32G32B32A32Float => DxgiFormat::R32G32B32A32_FLOAT,
            ExplicitFormat::R32G32B32A32Uint => DxgiFormat::R32G32B32A32_UINT,
            ExplicitFormat::R32G32B32A32Sint => DxgiFormat::R32G32B32A32_SINT,
            ExplicitFormat::R10G10B10A2Unorm => DxgiFormat::R10G10B10A2_UNORM,
            ExplicitFormat::R11G11B10Float => DxgiFormat::R11G11B10_FLOAT,
            ExplicitFormat::D16Unorm => DxgiFormat::D16_UNORM,
            ExplicitFormat::D24UnormS8Uint => DxgiFormat::D24_UNORM_S8_UINT,
            ExplicitFormat::D32Float => DxgiFormat::D32_FLOAT,
        })
    }
}

impl IntoD3d11<DxgiFormat> for IndexFormat {
    fn into_d3d11(self) -> Result<DxgiFormat, ShaderError> {
        Ok(match self {
            IndexFormat::Uint16 => DxgiFormat::R16_UINT,
            IndexFormat::Uint32 => DxgiFormat::R32_UINT,
        })
    }
}

impl IntoD3d11<D3d11PrimitiveTopology> for PrimitiveTopology {
    fn into_d3d11(self) -> Result<D3d11PrimitiveTopology, ShaderError> {
        Ok(match self {
            PrimitiveTopology::PointList => D3d11PrimitiveTopology::POINTLIST,
            PrimitiveTopology::LineList => D3d11PrimitiveTopology::LINELIST,
            PrimitiveTopology::LineStrip => D3d11PrimitiveTopology::LINESTRIP,
            PrimitiveTopology::TriangleList => D3d11PrimitiveTopology::TRIANGLELIST,
            PrimitiveTopology::TriangleStrip => D3d11PrimitiveTopology::TRIANGLESTRIP,
            PrimitiveTopology::LineListAdj => D3d11PrimitiveTopology::LINELIST_ADJ,
            PrimitiveTopology::LineStripAdj => D3d11PrimitiveTopology::LINESTRIP_ADJ,
            PrimitiveTopology::TriangleListAdj => D3d11PrimitiveTopology::TRIANGLELIST_ADJ,
            PrimitiveTopology::TriangleStripAdj => D3d11PrimitiveTopology::TRIANGLESTRIP_ADJ,
            PrimitiveTopology::PatchList(n @ 1..=32) => D3d11PrimitiveTopology(
                D3d11PrimitiveTopology::PATCHLIST_1.0 + u32::from(n) - 1,
            ),
            PrimitiveTopology::PatchList(_) => return Err(unsupported(self)),
        })
    }
}

impl IntoD3d11<D3d11Blend> for BlendFactor {
    fn into_d3d11(self) -> Result<D3d11Blend, ShaderError> {
        Ok(match self {
            BlendFactor::Zero => D3d11Blend::ZERO,
            BlendFactor::One => D3d11Blend::ONE,
            BlendFactor::SrcColor => D3d11Blend::SRC_COLOR,
            BlendFactor::OneMinusSrcColor => D3d11Blend::INV_SRC_COLOR,
            BlendFactor::SrcAlpha => D3d11Blend::SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => D3d11Blend::INV_SRC_ALPHA,
            BlendFactor::DstColor => D3d11Blend::DEST_COLOR,
            BlendFactor::OneMinusDstColor => D3d11Blend::INV_DEST_COLOR,
            BlendFactor::DstAlpha => D3d11Blend::DEST_ALPHA,
            BlendFactor::OneMinusDstAlpha => D3d11Blend::INV_DEST_ALPHA,
            BlendFactor::SrcAlphaSaturated => D3d11Blend::SRC_ALPHA_SAT,
            BlendFactor::Constant => D3d11Blend::BLEND_FACTOR,
            BlendFactor::OneMinusConstant => D3d11Blend::INV_BLEND_FACTOR,
            BlendFactor::Src1Color => D3d11Blend::SRC1_COLOR,
            BlendFactor::OneMinusSrc1Color => D3d11Blend::INV_SRC1_COLOR,
            BlendFactor::Src1Alpha => D3d11Blend::SRC1_ALPHA,
            BlendFactor::OneMinusSrc1Alpha => D3d11Blend::INV_SRC1_ALPHA,
        })
    }
}

impl IntoD3d11<D3d11BlendOp> for BlendOperation {
    fn into_d3d11(self) -> Result<D3d11BlendOp, ShaderError> {
        Ok(match self {
            BlendOperation::Add => D3d11BlendOp::ADD,
            BlendOperation::Subtract => D3d11BlendOp::SUBTRACT,
            BlendOperation::ReverseSubtract => D3d11BlendOp::REV_SUBTRACT,
            BlendOperation::Min => D3d11BlendOp::MIN,
            BlendOperation::Max => D3d11BlendOp::MAX,
        })
    }
}

impl IntoD3d11<D3d11StencilOp> for StencilOperation {
    fn into_d3d11(self) -> Result<D3d11StencilOp, ShaderError> {
        Ok(match self {
            StencilOperation::Keep => D3d11StencilOp::KEEP,
            StencilOperation::Zero => D3d11StencilOp::ZERO,
            StencilOperation::Replace => D3d11StencilOp::REPLACE,
            StencilOperation::Invert => D3d11StencilOp::INVERT,
            StencilOperation::IncrementClamp => D3d11StencilOp::INCR_SAT,
            StencilOperation::DecrementClamp => D3d11StencilOp::DECR_SAT,
            StencilOperation::IncrementWrap => D3d11StencilOp::INCR,
            StencilOperation::DecrementWrap => D3d11StencilOp::DECR,
        })
    }
}

impl IntoD3d11<D3d11ComparisonFunc> for ComparisonFunction {
    fn into_d3d11(self) -> Result<D3d11ComparisonFunc, ShaderError> {
        Ok(match self {
            ComparisonFunction::Never => D3d11ComparisonFunc::NEVER,
            ComparisonFunction::Less => D3d11ComparisonFunc::LESS,
            ComparisonFunction::Equal => D3d11ComparisonFunc::EQUAL,
            ComparisonFunction::LessEqual => D3d11ComparisonFunc::LESS_EQUAL,
            ComparisonFunction::Greater => D3d11ComparisonFunc::GREATER,
            ComparisonFunction::NotEqual => D3d11ComparisonFunc::NOT_EQUAL,
            ComparisonFunction::GreaterEqual => D3d11ComparisonFunc::GREATER_EQUAL,
            ComparisonFunction::Always => D3d11ComparisonFunc::ALWAYS,
        })
    }
}

impl IntoD3d11<D3d11CullMode> for CullMode {
    fn into_d3d11(self) -> Result<D3d11CullMode, ShaderError> {
        Ok(match self {
            CullMode::None => D3d11CullMode::NONE,
            CullMode::Front => D3d11CullMode::FRONT,
            CullMode::Back => D3d11CullMode::BACK,
        })
    }
}

impl IntoD3d11<D3d11FillMode> for FillMode {
    fn into_d3d11(self) -> Result<D3d11FillMode, ShaderError> {
        match self {
            FillMode::Solid => Ok(D3d11FillMode::SOLID),
            FillMode::Wireframe => Ok(D3d11FillMode::WIREFRAME),
            FillMode::Point => Err(unsupported(self)),
        }
    }
}

impl IntoD3d11<D3d11TextureAddressMode> for TextureAddressMode {
    fn into_d3d11(self) -> Result<D3d11TextureAddressMode, ShaderError> {
        Ok(match self {
            TextureAddressMode::Wrap => D3d11TextureAddressMode::WRAP,
            TextureAddressMode::Mirror => D3d11TextureAddressMode::MIRROR,
            TextureAddressMode::Clamp => D3d11TextureAddressMode::CLAMP,
            TextureAddressMode::Border => D3d11TextureAddressMode::BORDER,
            TextureAddressMode::MirrorOnce => D3d11TextureAddressMode::MIRROR_ONCE,
        })
    }
}

impl IntoD3d11<D3d11Filter> for FilterMode {
    fn into_d3d11(self) -> Result<D3d11Filter, ShaderError> {
        Ok(match self {
            FilterMode::Point => D3d11Filter::MIN_MAG_MIP_POINT,
            FilterMode::Linear => D3d11Filter::MIN_MAG_MIP_LINEAR,
            FilterMode::Anisotropic => D3d11Filter::ANISOTROPIC,
        })
    }
}
