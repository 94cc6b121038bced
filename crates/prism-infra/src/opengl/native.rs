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

//! Numeric values of the OpenGL enumerations the backend emits, as in `glcorearb.h`.

#![allow(missing_docs)]

native_enum!(
    /// Sized internal formats for `glTexStorage*` and renderbuffers.
    GlInternalFormat {
        R8 = 0x8229,
        RG8 = 0x822B,
        R16F = 0x822D,
        R32F = 0x822E,
        RG16 = 0x822C,
        RG16F = 0x822F,
        RG32F = 0x8230,
        R32I = 0x8235,
        R32UI = 0x8236,
        R8UI = 0x8232,
        RG16I = 0x8239,
        RG16UI = 0x823A,
        RG32I = 0x823B,
        RG32UI = 0x823C,
        RGBA8 = 0x8058,
        RGB10_A2 = 0x8059,
        RGBA16 = 0x805B,
        DEPTH_COMPONENT16 = 0x81A5,
        RGBA32F = 0x8814,
        RGB32F = 0x8815,
        RGBA16F = 0x881A,
        DEPTH24_STENCIL8 = 0x88F0,
        R11F_G11F_B10F = 0x8C3A,
        SRGB8_ALPHA8 = 0x8C43,
        DEPTH_COMPONENT32F = 0x8CAC,
        RGBA32UI = 0x8D70,
        RGB32UI = 0x8D71,
        RGBA16UI = 0x8D76,
        RGBA8UI = 0x8D7C,
        RGBA32I = 0x8D82,
        RGB32I = 0x8D83,
        RGBA16I = 0x8D88,
        RGBA8I = 0x8D8E,
        RGBA8_SNORM = 0x8F97,
        RG16_SNORM = 0x8F99,
        RGBA16_SNORM = 0x8F9B,
    }
);

native_enum!(
    /// Component data types of vertex attributes and index buffers.
    GlType {
        BYTE = 0x1400,
        UNSIGNED_BYTE = 0x1401,
        SHORT = 0x1402,
        UNSIGNED_SHORT = 0x1403,
        INT = 0x1404,
        UNSIGNED_INT = 0x1405,
        FLOAT = 0x1406,
        HALF_FLOAT = 0x140B,
        UNSIGNED_INT_2_10_10_10_REV = 0x8368,
        UNSIGNED_INT_10F_11F_11F_REV = 0x8C3B,
    }
);

/// The `size` argument of `glVertexAttribFormat` reading four components in BGRA order.
pub const GL_BGRA: i32 = 0x80E1;

native_enum!(
    /// Draw modes.
    GlPrimitive {
        POINTS = 0x0000,
        LINES = 0x0001,
        LINE_STRIP = 0x0003,
        TRIANGLES = 0x0004,
        TRIANGLE_STRIP = 0x0005,
        LINES_ADJACENCY = 0x000A,
        LINE_STRIP_ADJACENCY = 0x000B,
        TRIANGLES_ADJACENCY = 0x000C,
        TRIANGLE_STRIP_ADJACENCY = 0x000D,
    }
);

native_enum!(
    GlBlendFactor {
        ZERO = 0,
        ONE = 1,
        SRC_COLOR = 0x0300,
        ONE_MINUS_SRC_COLOR = 0x0301,
        SRC_ALPHA = 0x0302,
        ONE_MINUS_SRC_ALPHA = 0x0303,
        DST_ALPHA = 0x0304,
        ONE_MINUS_DST_ALPHA = 0x0305,
        DST_COLOR = 0x0306,
        ONE_MINUS_DST_COLOR = 0x0307,
        SRC_ALPHA_SATURATE = 0x0308,
        CONSTANT_COLOR = 0x8001,
        ONE_MINUS_CONSTANT_COLOR = 0x8002,
        SRC1_ALPHA = 0x8589,
        SRC1_COLOR = 0x88F9,
        ONE_MINUS_SRC1_COLOR = 0x88FA,
        ONE_MINUS_SRC1_ALPHA = 0x88FB,
    }
);

native_enum!(
    GlBlendEquation {
        FUNC_ADD = 0x8006,
        MIN = 0x8007,
        MAX = 0x8008,
        FUNC_SUBTRACT = 0x800A,
        FUNC_REVERSE_SUBTRACT = 0x800B,
    }
);

native_enum!(
    GlStencilOp {
        ZERO = 0,
        INVERT = 0x150A,
        KEEP = 0x1E00,
        REPLACE = 0x1E01,
        INCR = 0x1E02,
        DECR = 0x1E03,
        INCR_WRAP = 0x8507,
        DECR_WRAP = 0x8508,
    }
);

native_enum!(
    GlCompareFunc {
        NEVER = 0x0200,
        LESS = 0x0201,
        EQUAL = 0x0202,
        LEQUAL = 0x0203,
        GREATER = 0x0204,
        NOTEQUAL = 0x0205,
        GEQUAL = 0x0206,
        ALWAYS = 0x0207,
    }
);

native_enum!(
    /// Faces for `glCullFace`. Culling itself is toggled with `GL_CULL_FACE`.
    GlFace {
        FRONT = 0x0404,
        BACK = 0x0405,
    }
);

native_enum!(
    GlPolygonMode {
        POINT = 0x1B00,
        LINE = 0x1B01,
        FILL = 0x1B02,
    }
);

native_enum!(
    GlWrapMode {
        CLAMP_TO_BORDER = 0x812D,
        CLAMP_TO_EDGE = 0x812F,
        REPEAT = 0x2901,
        MIRRORED_REPEAT = 0x8370,
        MIRROR_CLAMP_TO_EDGE = 0x8743,
    }
);

native_enum!(
    GlFilter {
        NEAREST = 0x2600,
        LINEAR = 0x2601,
    }
);
