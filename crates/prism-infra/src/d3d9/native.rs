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

//! Numeric values of the Direct3D 9 enumerations the backend emits, as in `d3d9types.h`.

#![allow(missing_docs)]

native_enum!(
    /// `D3DFORMAT`, for textures, render targets and index buffers.
    D3dFormat {
        A8R8G8B8 = 21,
        A2B10G10R10 = 31,
        A8B8G8R8 = 32,
        G16R16 = 34,
        A16B16G16R16 = 36,
        L8 = 50,
        Q8W8V8U8 = 63,
        V16U16 = 64,
        D24S8 = 75,
        D16 = 80,
        D32F_LOCKABLE = 82,
        INDEX16 = 101,
        INDEX32 = 102,
        R16F = 111,
        G16R16F = 112,
        A16B16G16R16F = 113,
        R32F = 114,
        G32R32F = 115,
        A32B32G32R32F = 116,
    }
);

native_enum!(
    /// `D3DDECLTYPE`.
    D3dDeclType {
        FLOAT1 = 0,
        FLOAT2 = 1,
        FLOAT3 = 2,
        FLOAT4 = 3,
        D3DCOLOR = 4,
        UBYTE4 = 5,
        SHORT2 = 6,
        SHORT4 = 7,
        UBYTE4N = 8,
        SHORT2N = 9,
        SHORT4N = 10,
        USHORT2N = 11,
        USHORT4N = 12,
        FLOAT16_2 = 15,
        FLOAT16_4 = 16,
    }
);

native_enum!(
    /// `D3DDECLUSAGE`.
    D3dDeclUsage {
        POSITION = 0,
        BLENDWEIGHT = 1,
        BLENDINDICES = 2,
        NORMAL = 3,
        PSIZE = 4,
        TEXCOORD = 5,
        TANGENT = 6,
        BINORMAL = 7,
        TESSFACTOR = 8,
        POSITIONT = 9,
        COLOR = 10,
        FOG = 11,
        DEPTH = 12,
        SAMPLE = 13,
    }
);

native_enum!(
    /// `D3DPRIMITIVETYPE`.
    D3dPrimitiveType {
        POINTLIST = 1,
        LINELIST = 2,
        LINESTRIP = 3,
        TRIANGLELIST = 4,
        TRIANGLESTRIP = 5,
    }
);

native_enum!(
    /// `D3DBLEND`.
    D3dBlend {
        ZERO = 1,
        ONE = 2,
        SRCCOLOR = 3,
        INVSRCCOLOR = 4,
        SRCALPHA = 5,
        INVSRCALPHA = 6,
        DESTALPHA = 7,
        INVDESTALPHA = 8,
        DESTCOLOR = 9,
        INVDESTCOLOR = 10,
        SRCALPHASAT = 11,
        BLENDFACTOR = 14,
        INVBLENDFACTOR = 15,
    }
);

native_enum!(
    /// `D3DBLENDOP`.
    D3dBlendOp {
        ADD = 1,
        SUBTRACT = 2,
        REVSUBTRACT = 3,
        MIN = 4,
        MAX = 5,
    }
);

native_enum!(
    /// `D3DSTENCILOP`.
    D3dStencilOp {
        KEEP = 1,
        ZERO = 2,
        REPLACE = 3,
        INCRSAT = 4,
        DECRSAT = 5,
        INVERT = 6,
        INCR = 7,
        DECR = 8,
    }
);

native_enum!(
    /// `D3DCMPFUNC`.
    D3dCmpFunc {
        NEVER = 1,
        LESS = 2,
        EQUAL = 3,
        LESSEQUAL = 4,
        GREATER = 5,
        NOTEQUAL = 6,
        GREATEREQUAL = 7,
        ALWAYS = 8,
    }
);

native_enum!(
    /// `D3DCULL`; front faces are clockwise.
    D3dCull {
        NONE = 1,
        CW = 2,
        CCW = 3,
    }
);

native_enum!(
    /// `D3DFILLMODE`.
    D3dFillMode {
        POINT = 1,
        WIREFRAME = 2,
        SOLID = 3,
    }
);

native_enum!(
    /// `D3DTEXTUREADDRESS`.
    D3dTextureAddress {
        WRAP = 1,
        MIRROR = 2,
        CLAMP = 3,
        BORDER = 4,
        MIRRORONCE = 5,
    }
);

native_enum!(
    /// `D3DTEXTUREFILTERTYPE`.
    D3dTextureFilterType {
        POINT = 1,
        LINEAR = 2,
        ANISOTROPIC = 3,
    }
);
