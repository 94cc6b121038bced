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

//! Declaration helpers shared by the two HLSL backends.

use prism_core::error::ShaderError;
use prism_core::shader::{
    io_members, io_struct_name, ArraySize, FunctionDecl, IoVariable, MemberDecl, MemberLength,
    ShaderReflection, ShaderValueType, SourceDocument, SourceItem, StructDecl,
    TessellationDomain,
};

/// Declares `ty name` with its fixed array length.
pub(crate) fn declaration(ty: &ShaderValueType, name: &str) -> MemberDecl {
    let len = match ty.array_size() {
        Some(ArraySize::Fixed(len)) => Some(len),
        _ => None,
    };
    MemberDecl::new(ty.hlsl_name(), name).array(len)
}

/// Emits every user structure in declaration order.
pub(crate) fn declare_structures(document: &mut SourceDocument, reflection: &ShaderReflection) {
    for structure in reflection.structures() {
        document.push(SourceItem::Struct(StructDecl {
            name: structure.name.clone(),
            members: structure
                .members
                .iter()
                .map(|member| declaration(&member.ty, &member.name))
                .collect(),
        }));
        document.blank();
    }
}

/// Emits the verbatim global code block.
pub(crate) fn declare_global_code(document: &mut SourceDocument, reflection: &ShaderReflection) {
    for line in reflection.code_global() {
        document.raw(line.clone());
    }
    document.blank();
}

/// Declares an IO structure for the used variables of a group.
///
/// `declare` renders one member. Returns the structure name, or `None` when no
/// variable survived and nothing was emitted.
pub(crate) fn io_struct(
    document: &mut SourceDocument,
    reflection: &ShaderReflection,
    role: &str,
    variables: &[IoVariable],
    domain: Option<TessellationDomain>,
    declare: impl FnMut(&IoVariable, MemberLength) -> Result<MemberDecl, ShaderError>,
) -> Result<Option<String>, ShaderError> {
    let members = io_members(reflection, variables, domain, declare)?;
    if members.is_empty() {
        return Ok(None);
    }
    let name = io_struct_name(reflection.stage(), role);
    document.push(SourceItem::Struct(StructDecl {
        name: name.clone(),
        members,
    }));
    document.blank();
    Ok(Some(name))
}

/// Body of a function returning a zero-initialised local, or nothing.
///
/// # Arguments
///
/// * `output`: The returned structure and the local variable holding it.
/// * `code`: Verbatim code lines placed between declaration and return.
pub(crate) fn returning_body(output: Option<(&str, &str)>, code: &[String]) -> Vec<String> {
    let mut body = Vec::with_capacity(code.len() + 2);
    if let Some((ty, local)) = output {
        body.push(format!("    {ty} {local} = ({ty})0;"));
    }
    body.extend(code.iter().cloned());
    if let Some((_, local)) = output {
        body.push(format!("    return {local};"));
    }
    body
}

/// A `main` entry point.
pub(crate) fn entry_point(
    attributes: Vec<String>,
    output: Option<&str>,
    params: Vec<String>,
    code: &[String],
) -> SourceItem {
    SourceItem::Function(FunctionDecl {
        attributes,
        return_type: output.unwrap_or("void").to_string(),
        name: "main".to_string(),
        params,
        body: returning_body(output.map(|ty| (ty, "output")), code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::shader::BaseType;

    #[test]
    fn fixed_arrays_carry_their_length() {
        let ty = ShaderValueType::Array {
            element: Box::new(ShaderValueType::Scalar(BaseType::Float)),
            size: ArraySize::Fixed(4),
        };
        assert_eq!(declaration(&ty, "Weights").to_string(), "float Weights[4];");
    }

    #[test]
    fn returning_body_wraps_code() {
        let body = returning_body(
            Some(("PS_Output", "output")),
            &["    OUTPUT(Color) = 1;".to_string()],
        );
        assert_eq!(
            body,
            [
                "    PS_Output output = (PS_Output)0;",
                "    OUTPUT(Color) = 1;",
                "    return output;"
            ]
        );
        assert_eq!(returning_body(None, &[]).len(), 0);
    }
}
