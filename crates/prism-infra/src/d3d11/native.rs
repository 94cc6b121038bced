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

//! Numeric values of the Direct3D 11 and DXGI enumerations the backend emits.
//!
//! The values match `d3d11.h` and `dxgiformat.h`; no Windows bindings are linked.

#![allow(missing_docs)]

native_enum!(
    /// `DXGI_FORMAT`.
    DxgiFormat {
        R32G32B32A32_FLOAT = 2,
        R32G32B32A32_UINT = 3,
        R32G32B32A32_SINT = 4,
        R32G32B32_FLOAT = 6,
        R32G32B32_UINT = 7,
        R32G32B32_SINT = 8,
        R16G16B16A16_FLOAT = 10,
        R16G16B16A16_UNORM = 11,
        R16G16B16A16_UINT = 12,
        R16G16B16A16_SNORM = 13,
        R16G16B16A16_SINT = 14,
        R32G32_FLOAT = 16,
        R32G32_UINT = 17,
        R32G32_SINT = 18,
        R10G10B10A2_UNORM = 24,
        R11G11B10_FLOAT = 26,
        R8G8B8A8_UNORM = 28,
        R8G8B8A8_UNORM_SRGB = 29,
        R8G8B8A8_UINT = 30,
        R8G8B8A8_SNORM = 31,
        R8G8B8A8_SINT = 32,
        R16G16_FLOAT = 34,
        R16G16_UNORM = 35,
        R16G16_UINT = 36,
        R16G16_SNORM = 37,
        R16G16_SINT = 38,
        D32_FLOAT = 40,
        R32_FLOAT = 41,
        R32_UINT = 42,
        R32_SINT = 43,
        D24_UNORM_S8_UINT = 45,
        R8G8_UNORM = 49,
        R16_FLOAT = 54,
        D16_UNORM = 55,
        R16_UINT = 57,
        R8_UNORM = 61,
        R8_UINT = 62,
        B8G8R8A8_UNORM = 87,
    }
);

native_enum!(
    /// `D3D11_PRIMITIVE_TOPOLOGY`; patch lists start at `PATCHLIST_1`.
    D3d11PrimitiveTopology {
        POINTLIST = 1,
        LINELIST = 2,
        LINESTRIP = 3,
        TRIANGLELIST = 4,
        TRIANGLESTRIP = 5,
        LINELIST_ADJ = 10,
        LINESTRIP_ADJ = 11,
        TRIANGLELIST_ADJ = 12,
        TRIANGLESTRIP_ADJ = 13,
        PATCHLIST_1 = 33,
    }
);

native_enum!(
    /// `D3D11_BLEND`.
    D3d11Blend {
        ZERO = 1,
        ONE = 2,
        SRC_COLOR = 3,
        INV_SRC_COLOR = 4,
        SRC_ALPHA = 5,
        INV_SRC_ALPHA = 6,
        DEST_ALPHA = 7,
        INV_DEST_ALPHA = 8,
        DEST_COLOR = 9,
        INV_DEST_COLOR = 10,
        SRC_ALPHA_SAT = 11,
        BLEND_FACTOR = 14,
        INV_BLEND_FACTOR = 15,
        SRC1_COLOR = 16,
        INV_SRC1_COLOR = 17,
        SRC1_ALPHA = 18,
        INV_SRC1_ALPHA = 19,
    }
);

native_enum!(
    /// `D3D11_BLEND_OP`.
    D3d11BlendOp {
        ADD = 1,
        SUBTRACT = 2,
        REV_SUBTRACT = 3,
        MIN = 4,
        MAX = 5,
    }
);

native_enum!(
    /// `D3D11_STENCIL_OP`.
    D3d11StencilOp {
        KEEP = 1,
        ZERO = 2,
        REPLACE = 3,
        INCR_SAT = 4,
        DECR_SAT = 5,
        INVERT = 6,
        INCR = 7,
        DECR = 8,
    }
);

native_enum!(
    /// `D3D11_COMPARISON_FUNC`.
    D3d11ComparisonFunc {
        NEVER = 1,
        LESS = 2,
        EQUAL = 3,
        LESS_EQUAL = 4,
        GREATER = 5,
        NOT_EQUAL = 6,
        GREATER_EQUAL = 7,
        ALWAYS = 8,
    }
);

native_enum!(
    /// `D3D11_CULL_MODE`.
    D3d11CullMode {
        NONE = 1,
        FRONT = 2,
        BACK = 3,
    }
);

native_enum!(
    /// `D3D11_FILL_MODE`.
    D3d11FillMode {
        WIREFRAME = 2,
        SOLID = 3,
    }
);

native_enum!(
    /// `D3D11_TEXTURE_ADDRESS_MODE`.
    D3d11TextureAddressMode {
        WRAP = 1,
        MIRROR = 2,
        CLAMP = 3,
        BORDER = 4,
        MIRROR_ONCE = 5,
    }
);

native_enum!(
    /// `D3D11_FILTER`.
    D3d11Filter {
        MIN_MAG_MIP_POINT = 0x00,
        MIN_MAG_MIP_LINEAR = 0x15,
        ANISOTROPIC = 0x55,
    }
);

native_enum!(
    /// `D3D11_INPUT_CLASSIFICATION`.
    D3d11InputClassification {
        PER_VERTEX_DATA = 0,
        PER_INSTANCE_DATA = 1,
    }
);
