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

//! The per-backend code generation contract and helpers every generator shares.

use super::document::{MemberDecl, SourceDocument};
use super::reflection::{IoVariable, ShaderReflection};
use super::stage::{ShaderStage, TessellationDomain};
use super::types::{ArraySize, ShaderValueType};
use crate::device::BackendKind;
use crate::error::ShaderError;

/// Turns a [`ShaderReflection`] into native shader source for one backend.
pub trait ShaderCodeGenerator {
    /// The backend this generator writes for.
    fn backend(&self) -> BackendKind;

    /// Whether the backend has a native pipeline stage for `stage`.
    fn supports_stage(&self, stage: ShaderStage) -> bool;

    /// Builds the structured source for a reflection whose stage is supported.
    ///
    /// Items are emitted in a fixed order: global code, user structures,
    /// uniform buffers, samplers and views, fixed-sampling macros, stage IO
    /// structures, then the entry point(s).
    fn build_document(&self, reflection: &ShaderReflection) -> Result<SourceDocument, ShaderError>;

    /// Checks the stage, builds the document and renders it.
    ///
    /// # Returns
    ///
    /// The complete source text, or [`ShaderError::StageUnsupported`] without
    /// building anything when the backend lacks the stage.
    fn generate(&self, reflection: &ShaderReflection) -> Result<String, ShaderError> {
        if !self.supports_stage(reflection.stage()) {
            return Err(ShaderError::StageUnsupported {
                backend: self.backend(),
                stage: reflection.stage(),
            });
        }
        let document = self.build_document(reflection)?;
        let source = document.render();
        log::debug!(
            "{}: generated {} lines for '{}'",
            self.backend(),
            source.lines().count(),
            reflection.name()
        );
        Ok(source)
    }
}

/// How an IO variable's array size materializes in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberLength {
    /// Not an array.
    Single,
    /// An array of the given length.
    Array(u32),
    /// A tessellation factor array of length zero; the member is left out.
    Omitted,
}

impl MemberLength {
    /// The array length to render, `None` for single values.
    pub fn array_len(self) -> Option<u32> {
        match self {
            MemberLength::Array(len) => Some(len),
            MemberLength::Single | MemberLength::Omitted => None,
        }
    }
}

/// Resolves the declared length of `ty`, using `domain` for tessellation factors.
pub fn member_length(
    reflection: &ShaderReflection,
    name: &str,
    ty: &ShaderValueType,
    domain: Option<TessellationDomain>,
) -> Result<MemberLength, ShaderError> {
    match ty.array_size() {
        None => Ok(MemberLength::Single),
        Some(ArraySize::Fixed(len)) => Ok(MemberLength::Array(len)),
        Some(size) => match size.resolve(domain) {
            Some(0) => Ok(MemberLength::Omitted),
            Some(len) => Ok(MemberLength::Array(len)),
            None => Err(ShaderError::malformed(
                reflection.name(),
                format!("'{name}' needs a tessellation domain to size {ty}"),
            )),
        },
    }
}

/// Name of a generated IO structure, e.g. `VS_Input` or `HS_OutputPatch`.
pub fn io_struct_name(stage: ShaderStage, role: &str) -> String {
    format!("{}_{role}", stage.struct_prefix())
}

/// Builds declarations for the used variables of an IO group.
///
/// `declare` turns one variable and its resolved length into a member;
/// variables whose tessellation factor length resolves to zero are skipped.
pub fn io_members(
    reflection: &ShaderReflection,
    variables: impl IntoIterator<Item = impl std::borrow::Borrow<IoVariable>>,
    domain: Option<TessellationDomain>,
    mut declare: impl FnMut(&IoVariable, MemberLength) -> Result<MemberDecl, ShaderError>,
) -> Result<Vec<MemberDecl>, ShaderError> {
    let mut members = Vec::new();
    for variable in variables {
        let variable = variable.borrow();
        if !variable.is_used {
            continue;
        }
        let length = member_length(reflection, &variable.name, &variable.ty, domain)?;
        if length == MemberLength::Omitted {
            continue;
        }
        members.push(declare(variable, length)?);
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{meta_keys, BaseType, ShaderReflectionBuilder};

    fn tess(size: ArraySize) -> ShaderValueType {
        ShaderValueType::Array {
            element: Box::new(ShaderValueType::Scalar(BaseType::Float)),
            size,
        }
    }

    #[test]
    fn tess_lengths_follow_the_domain() {
        let reflection = ShaderReflectionBuilder::new("H", ShaderStage::Hull)
            .meta(meta_keys::DOMAIN, "Isoline")
            .build()
            .unwrap();
        let inner = tess(ArraySize::InnerTessFactors);
        let outer = tess(ArraySize::OuterTessFactors);
        assert_eq!(
            member_length(&reflection, "i", &inner, Some(TessellationDomain::Isoline)).unwrap(),
            MemberLength::Omitted
        );
        assert_eq!(
            member_length(&reflection, "o", &outer, Some(TessellationDomain::Triangle)).unwrap(),
            MemberLength::Array(3)
        );
        assert!(member_length(&reflection, "o", &outer, None).is_err());
    }

    #[test]
    fn io_members_skip_unused_and_omitted() {
        let reflection = ShaderReflectionBuilder::new("H", ShaderStage::Hull)
            .output_patch(IoVariable::new(tess(ArraySize::OuterTessFactors), "Edges"))
            .output_patch(IoVariable::new(tess(ArraySize::InnerTessFactors), "Inside"))
            .output_patch(IoVariable::new(ShaderValueType::float(3), "Unused").unused())
            .build()
            .unwrap();
        let members = io_members(
            &reflection,
            reflection.output_patch(),
            Some(TessellationDomain::Isoline),
            |v, len| Ok(MemberDecl::new("float", v.name.clone()).array(len.array_len())),
        )
        .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].array_len, Some(2));
    }

    #[test]
    fn struct_names_use_the_stage_prefix() {
        assert_eq!(io_struct_name(ShaderStage::Domain, "InputPatch"), "DS_InputPatch");
    }
}
