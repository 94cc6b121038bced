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

//! The value type system used by reflections and code generators.
//!
//! A [`ShaderValueType`] is written in the description language with HLSL
//! spelling (`float4`, `uint2x3`, `float4[8]`, `Light`) and rendered into each
//! backend's own spelling by the generators.

use super::stage::TessellationDomain;
use std::fmt;

/// The scalar type underlying every value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// 32-bit float.
    Float,
    /// 32-bit signed integer.
    Int,
    /// 32-bit unsigned integer.
    UInt,
    /// Boolean.
    Bool,
}

impl BaseType {
    /// HLSL (and GLSL) name of the scalar.
    pub const fn scalar_name(self) -> &'static str {
        match self {
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::UInt => "uint",
            BaseType::Bool => "bool",
        }
    }

    /// Prefix of the GLSL vector type (`vec`, `ivec`, ...).
    pub const fn glsl_vector_prefix(self) -> &'static str {
        match self {
            BaseType::Float => "vec",
            BaseType::Int => "ivec",
            BaseType::UInt => "uvec",
            BaseType::Bool => "bvec",
        }
    }

    /// Whether the base type is an integer type (which cannot be interpolated).
    pub const fn is_integer(self) -> bool {
        matches!(self, BaseType::Int | BaseType::UInt)
    }
}

/// The length of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArraySize {
    /// A length fixed in the description.
    Fixed(u32),
    /// The outer tessellation factor count of the shader's domain.
    OuterTessFactors,
    /// The inner tessellation factor count of the shader's domain.
    InnerTessFactors,
}

impl ArraySize {
    /// Resolves the length against a tessellation domain.
    ///
    /// Returns `None` when the size depends on a domain and none is given.
    /// A resolved length of zero means the variable is dropped from generated code.
    pub fn resolve(self, domain: Option<TessellationDomain>) -> Option<u32> {
        match self {
            ArraySize::Fixed(len) => Some(len),
            ArraySize::OuterTessFactors => domain.map(TessellationDomain::outer_factor_count),
            ArraySize::InnerTessFactors => domain.map(TessellationDomain::inner_factor_count),
        }
    }

    /// Whether the length depends on the tessellation domain.
    pub fn is_domain_dependent(self) -> bool {
        !matches!(self, ArraySize::Fixed(_))
    }
}

/// Tagged union over every type a shader variable can have.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShaderValueType {
    /// A single scalar.
    Scalar(BaseType),
    /// A vector of 2 to 4 components.
    Vector {
        /// Component type.
        base: BaseType,
        /// Number of components.
        width: u8,
    },
    /// A matrix of 1 to 4 rows and columns.
    Matrix {
        /// Component type.
        base: BaseType,
        /// Number of rows.
        rows: u8,
        /// Number of columns.
        cols: u8,
    },
    /// A one-dimensional array of a non-array type.
    Array {
        /// Element type.
        element: Box<ShaderValueType>,
        /// Array length.
        size: ArraySize,
    },
    /// A user-defined structure, referenced by name.
    Structure(String),
}

impl ShaderValueType {
    /// Shorthand for a float vector.
    pub fn float(width: u8) -> Self {
        if width == 1 {
            ShaderValueType::Scalar(BaseType::Float)
        } else {
            ShaderValueType::Vector {
                base: BaseType::Float,
                width,
            }
        }
    }

    /// Parses the description-language spelling of a type.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if let Some(open) = text.find('[') {
            let close = text
                .strip_suffix(']')
                .ok_or_else(|| format!("unterminated array type '{text}'"))?;
            let element = ShaderValueType::parse(&text[..open])?;
            if matches!(element, ShaderValueType::Array { .. }) {
                return Err(format!("nested arrays are not supported: '{text}'"));
            }
            let len_text = &close[open + 1..];
            let len: u32 = len_text
                .trim()
                .parse()
                .map_err(|_| format!("invalid array length '{len_text}' in '{text}'"))?;
            if len == 0 {
                return Err(format!("array length must be positive in '{text}'"));
            }
            return Ok(ShaderValueType::Array {
                element: Box::new(element),
                size: ArraySize::Fixed(len),
            });
        }

        // `uint` must be tried before `int`.
        for base in [BaseType::UInt, BaseType::Int, BaseType::Float, BaseType::Bool] {
            if let Some(rest) = text.strip_prefix(base.scalar_name()) {
                if let Some(ty) = Self::parse_dimensions(base, rest) {
                    return Ok(ty);
                }
            }
        }

        let is_identifier = text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_identifier {
            Ok(ShaderValueType::Structure(text.to_string()))
        } else {
            Err(format!("invalid type '{text}'"))
        }
    }

    fn parse_dimensions(base: BaseType, rest: &str) -> Option<Self> {
        let dim = |s: &str| s.parse::<u8>().ok().filter(|d| (1..=4).contains(d));
        if rest.is_empty() {
            return Some(ShaderValueType::Scalar(base));
        }
        if let Some((rows, cols)) = rest.split_once('x') {
            return Some(ShaderValueType::Matrix {
                base,
                rows: dim(rows)?,
                cols: dim(cols)?,
            });
        }
        match dim(rest)? {
            1 => Some(ShaderValueType::Scalar(base)),
            width => Some(ShaderValueType::Vector { base, width }),
        }
    }

    /// The scalar type of the value, looking through arrays. `None` for structures.
    pub fn base_type(&self) -> Option<BaseType> {
        match self {
            ShaderValueType::Scalar(base)
            | ShaderValueType::Vector { base, .. }
            | ShaderValueType::Matrix { base, .. } => Some(*base),
            ShaderValueType::Array { element, .. } => element.base_type(),
            ShaderValueType::Structure(_) => None,
        }
    }

    /// The type with any array wrapper removed.
    pub fn element_type(&self) -> &ShaderValueType {
        match self {
            ShaderValueType::Array { element, .. } => element,
            other => other,
        }
    }

    /// The array size, if the type is an array.
    pub fn array_size(&self) -> Option<ArraySize> {
        match self {
            ShaderValueType::Array { size, .. } => Some(*size),
            _ => None,
        }
    }

    /// The name of the referenced structure, looking through arrays.
    pub fn structure_name(&self) -> Option<&str> {
        match self.element_type() {
            ShaderValueType::Structure(name) => Some(name),
            _ => None,
        }
    }

    /// Number of scalar components of a scalar, vector or matrix.
    pub fn component_count(&self) -> Option<u32> {
        match self {
            ShaderValueType::Scalar(_) => Some(1),
            ShaderValueType::Vector { width, .. } => Some(u32::from(*width)),
            ShaderValueType::Matrix { rows, cols, .. } => Some(u32::from(*rows * *cols)),
            _ => None,
        }
    }

    /// HLSL spelling of the non-array part of the type.
    pub fn hlsl_name(&self) -> String {
        match self {
            ShaderValueType::Scalar(base) => base.scalar_name().to_string(),
            ShaderValueType::Vector { base, width } => format!("{}{width}", base.scalar_name()),
            ShaderValueType::Matrix { base, rows, cols } => {
                format!("{}{rows}x{cols}", base.scalar_name())
            }
            ShaderValueType::Structure(name) => name.clone(),
            ShaderValueType::Array { element, .. } => element.hlsl_name(),
        }
    }

    /// GLSL spelling of the non-array part of the type.
    ///
    /// GLSL only has float matrices; other matrices return an error describing the type.
    pub fn glsl_name(&self) -> Result<String, String> {
        match self {
            ShaderValueType::Scalar(base) => Ok(base.scalar_name().to_string()),
            ShaderValueType::Vector { base, width } => {
                Ok(format!("{}{width}", base.glsl_vector_prefix()))
            }
            ShaderValueType::Matrix {
                base: BaseType::Float,
                rows,
                cols,
            } => {
                // GLSL names matrices columns-first.
                if rows == cols {
                    Ok(format!("mat{cols}"))
                } else {
                    Ok(format!("mat{cols}x{rows}"))
                }
            }
            ShaderValueType::Matrix { .. } => Err(format!("{self} (non-float matrix)")),
            ShaderValueType::Structure(name) => Ok(name.clone()),
            ShaderValueType::Array { element, .. } => element.glsl_name(),
        }
    }

    /// Number of vertex layout elements a vertex input of this type occupies.
    ///
    /// Matrices are column-major, so each column takes one element.
    pub fn layout_elements_required(&self) -> Result<u32, String> {
        match self {
            ShaderValueType::Scalar(_) | ShaderValueType::Vector { .. } => Ok(1),
            ShaderValueType::Matrix { cols, .. } => Ok(u32::from(*cols)),
            ShaderValueType::Array {
                element,
                size: ArraySize::Fixed(len),
            } => Ok(element.layout_elements_required()? * len),
            ShaderValueType::Array { .. } => {
                Err(format!("{self} cannot be fed from a vertex layout"))
            }
            ShaderValueType::Structure(name) => {
                Err(format!("structure '{name}' cannot be fed from a vertex layout"))
            }
        }
    }

    /// Number of components in one vertex layout element of this type.
    pub fn layout_element_width(&self) -> Option<u32> {
        match self.element_type() {
            ShaderValueType::Scalar(_) => Some(1),
            ShaderValueType::Vector { width, .. } => Some(u32::from(*width)),
            ShaderValueType::Matrix { rows, .. } => Some(u32::from(*rows)),
            _ => None,
        }
    }

    /// Bytes the value occupies inside a uniform buffer under HLSL packing rules.
    ///
    /// Matrices are column-major; array elements start on 16-byte boundaries.
    /// Structures are resolved through `structure_size`.
    pub fn packed_size(&self, structure_size: &dyn Fn(&str) -> Option<u32>) -> Result<u32, String> {
        match self {
            ShaderValueType::Scalar(_) => Ok(4),
            ShaderValueType::Vector { width, .. } => Ok(4 * u32::from(*width)),
            ShaderValueType::Matrix { rows, cols, .. } => {
                Ok(16 * (u32::from(*cols) - 1) + 4 * u32::from(*rows))
            }
            ShaderValueType::Array {
                element,
                size: ArraySize::Fixed(len),
            } => {
                let element_size = element.packed_size(structure_size)?;
                Ok(align16(element_size) * (len - 1) + element_size)
            }
            ShaderValueType::Array { .. } => {
                Err(format!("{self} has no size outside a tessellation patch"))
            }
            ShaderValueType::Structure(name) => {
                structure_size(name).ok_or_else(|| format!("unknown structure '{name}'"))
            }
        }
    }

    /// Bytes the value occupies inside a GLSL `std140` block.
    pub fn std140_size(&self) -> Result<u32, String> {
        match self {
            ShaderValueType::Scalar(_) => Ok(4),
            ShaderValueType::Vector { width, .. } => Ok(4 * u32::from(*width)),
            ShaderValueType::Matrix { cols, .. } => Ok(16 * u32::from(*cols)),
            ShaderValueType::Array {
                element,
                size: ArraySize::Fixed(len),
            } => Ok(align16(element.std140_size()?) * len),
            other => Err(format!("{other} has no std140 layout")),
        }
    }
}

impl fmt::Display for ShaderValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderValueType::Array { element, size } => match size {
                ArraySize::Fixed(len) => write!(f, "{element}[{len}]"),
                ArraySize::OuterTessFactors => write!(f, "{element}[outer]"),
                ArraySize::InnerTessFactors => write!(f, "{element}[inner]"),
            },
            other => f.write_str(&other.hlsl_name()),
        }
    }
}

/// Rounds `value` up to the next multiple of 16.
pub const fn align16(value: u32) -> u32 {
    (value + 15) & !15
}
