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

//! A structured representation of generated shader source.
//!
//! Generators push [`SourceItem`]s into a [`SourceDocument`] and the document is
//! rendered to text exactly once. Keeping the structure around lets callers and
//! tests ask questions such as "how many members does `HS_Output` have" without
//! re-parsing the text.

use std::fmt;

/// One declaration line inside a structure, a block, or at global scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// Leading qualifiers (`nointerpolation`, `layout(location = 0) in`, ...).
    pub qualifiers: Vec<String>,
    /// Type spelling.
    pub ty: String,
    /// Declared name.
    pub name: String,
    /// Array length, rendered as `[n]`.
    pub array_len: Option<u32>,
    /// Trailing annotation rendered as ` : X` (semantic, register, packoffset).
    pub annotation: Option<String>,
}

impl MemberDecl {
    /// Creates a plain `ty name` declaration.
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifiers: Vec::new(),
            ty: ty.into(),
            name: name.into(),
            array_len: None,
            annotation: None,
        }
    }

    /// Appends a leading qualifier.
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifiers.push(qualifier.into());
        self
    }

    /// Sets the array length.
    pub fn array(mut self, len: Option<u32>) -> Self {
        self.array_len = len;
        self
    }

    /// Sets the trailing annotation.
    pub fn annotate(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

impl fmt::Display for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for qualifier in &self.qualifiers {
            write!(f, "{qualifier} ")?;
        }
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(len) = self.array_len {
            write!(f, "[{len}]")?;
        }
        if let Some(annotation) = &self.annotation {
            write!(f, " : {annotation}")?;
        }
        f.write_str(";")
    }
}

/// A `struct Name { ... };` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Structure name.
    pub name: String,
    /// Members in order.
    pub members: Vec<MemberDecl>,
}

/// A named block with a free-form header, such as a `cbuffer` or a GLSL
/// interface block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDecl {
    /// Block name, used for lookups.
    pub name: String,
    /// Full header line (`cbuffer Frame : register(b0)`).
    pub header: String,
    /// Members in order.
    pub members: Vec<MemberDecl>,
}

/// A `#define`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineDecl {
    /// Macro name.
    pub name: String,
    /// Parameter list for function-like macros.
    pub params: Option<Vec<String>>,
    /// Replacement text.
    pub body: String,
}

/// A function with optional attributes and a verbatim body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Attribute lines rendered as `[attr]` above the signature.
    pub attributes: Vec<String>,
    /// Return type.
    pub return_type: String,
    /// Function name.
    pub name: String,
    /// Parameter declarations.
    pub params: Vec<String>,
    /// Body lines, rendered as-is between braces.
    pub body: Vec<String>,
}

/// One top-level element of a [`SourceDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceItem {
    /// A `//` comment line.
    Comment(String),
    /// A line copied verbatim.
    Raw(String),
    /// A preprocessor definition.
    Define(DefineDecl),
    /// A structure declaration.
    Struct(StructDecl),
    /// A header-plus-members block.
    Block(BlockDecl),
    /// A global variable declaration.
    Global(MemberDecl),
    /// A function definition.
    Function(FunctionDecl),
    /// An empty line.
    Blank,
}

/// Ordered list of source items, rendered in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    items: Vec<SourceItem>,
}

impl SourceDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item.
    pub fn push(&mut self, item: SourceItem) {
        self.items.push(item);
    }

    /// Appends a comment line.
    pub fn comment(&mut self, text: impl Into<String>) {
        self.push(SourceItem::Comment(text.into()));
    }

    /// Appends a verbatim line.
    pub fn raw(&mut self, line: impl Into<String>) {
        self.push(SourceItem::Raw(line.into()));
    }

    /// Appends an object-like macro.
    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.push(SourceItem::Define(DefineDecl {
            name: name.into(),
            params: None,
            body: body.into(),
        }));
    }

    /// Appends a function-like macro.
    pub fn define_fn(&mut self, name: impl Into<String>, params: &[&str], body: impl Into<String>) {
        self.push(SourceItem::Define(DefineDecl {
            name: name.into(),
            params: Some(params.iter().map(|p| p.to_string()).collect()),
            body: body.into(),
        }));
    }

    /// Appends an empty line, unless the document is empty or already ends with one.
    pub fn blank(&mut self) {
        if !matches!(self.items.last(), None | Some(SourceItem::Blank)) {
            self.push(SourceItem::Blank);
        }
    }

    /// All items in order.
    pub fn items(&self) -> &[SourceItem] {
        &self.items
    }

    /// Structures in declaration order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDecl> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Struct(decl) => Some(decl),
            _ => None,
        })
    }

    /// Looks up a structure by name.
    pub fn find_struct(&self, name: &str) -> Option<&StructDecl> {
        self.structs().find(|s| s.name == name)
    }

    /// Blocks in declaration order.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockDecl> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Block(decl) => Some(decl),
            _ => None,
        })
    }

    /// Looks up a block by name.
    pub fn find_block(&self, name: &str) -> Option<&BlockDecl> {
        self.blocks().find(|b| b.name == name)
    }

    /// Global declarations in order.
    pub fn globals(&self) -> impl Iterator<Item = &MemberDecl> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Global(decl) => Some(decl),
            _ => None,
        })
    }

    /// Looks up a global declaration by name.
    pub fn find_global(&self, name: &str) -> Option<&MemberDecl> {
        self.globals().find(|g| g.name == name)
    }

    /// Macro definitions in order.
    pub fn defines(&self) -> impl Iterator<Item = &DefineDecl> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Define(decl) => Some(decl),
            _ => None,
        })
    }

    /// Whether a macro with the given name is defined.
    pub fn has_define(&self, name: &str) -> bool {
        self.defines().any(|d| d.name == name)
    }

    /// Functions in order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Function(decl) => Some(decl),
            _ => None,
        })
    }

    /// Looks up a function by name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions().find(|f| f.name == name)
    }

    /// Renders the document to source text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[MemberDecl]) -> fmt::Result {
    f.write_str("{\n")?;
    for member in members {
        writeln!(f, "    {member}")?;
    }
    f.write_str("};\n")
}

impl fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match item {
                SourceItem::Comment(text) => writeln!(f, "// {text}")?,
                SourceItem::Raw(line) => writeln!(f, "{line}")?,
                SourceItem::Define(define) => {
                    write!(f, "#define {}", define.name)?;
                    if let Some(params) = &define.params {
                        write!(f, "({})", params.join(", "))?;
                    }
                    if define.body.is_empty() {
                        writeln!(f)?;
                    } else {
                        writeln!(f, " {}", define.body)?;
                    }
                }
                SourceItem::Struct(decl) => {
                    writeln!(f, "struct {}", decl.name)?;
                    write_members(f, &decl.members)?;
                }
                SourceItem::Block(decl) => {
                    writeln!(f, "{}", decl.header)?;
                    write_members(f, &decl.members)?;
                }
                SourceItem::Global(decl) => writeln!(f, "{decl}")?,
                SourceItem::Function(decl) => {
                    for attribute in &decl.attributes {
                        writeln!(f, "[{attribute}]")?;
                    }
                    writeln!(
                        f,
                        "{} {}({})",
                        decl.return_type,
                        decl.name,
                        decl.params.join(", ")
                    )?;
                    f.write_str("{\n")?;
                    for line in &decl.body {
                        writeln!(f, "{line}")?;
                    }
                    f.write_str("}\n")?;
                }
                SourceItem::Blank => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_structs_and_functions() {
        let mut doc = SourceDocument::new();
        doc.define_fn("INPUT", &["x"], "input.x");
        doc.blank();
        doc.push(SourceItem::Struct(StructDecl {
            name: "VS_Output".into(),
            members: vec![
                MemberDecl::new("float4", "Position").annotate("SV_Position"),
                MemberDecl::new("float", "Weights")
                    .array(Some(3))
                    .qualifier("nointerpolation"),
            ],
        }));
        doc.push(SourceItem::Function(FunctionDecl {
            attributes: vec!["numthreads(8, 8, 1)".into()],
            return_type: "void".into(),
            name: "main".into(),
            params: vec!["CS_Input input".into()],
            body: vec!["    return;".into()],
        }));

        let expected = "\
#define INPUT(x) input.x

struct VS_Output
{
    float4 Position : SV_Position;
    nointerpolation float Weights[3];
};
[numthreads(8, 8, 1)]
void main(CS_Input input)
{
    return;
}
";
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn lookups_find_declarations() {
        let mut doc = SourceDocument::new();
        doc.push(SourceItem::Block(BlockDecl {
            name: "Frame".into(),
            header: "cbuffer Frame : register(b0)".into(),
            members: vec![MemberDecl::new("float4x4", "View").annotate("packoffset(c0)")],
        }));
        doc.push(SourceItem::Global(
            MemberDecl::new("SamplerState", "Linear").annotate("register(s0)"),
        ));
        doc.define_fn("APPEND", &[], "outputStream.Append(output)");

        assert_eq!(doc.find_block("Frame").unwrap().members.len(), 1);
        assert!(doc.find_global("Linear").is_some());
        assert!(doc.find_struct("Frame").is_none());
        assert!(doc.has_define("APPEND"));
        assert!(doc.render().contains("#define APPEND() outputStream.Append(output)"));
        assert!(doc.render().contains("SamplerState Linear : register(s0);"));
    }

    #[test]
    fn blank_lines_do_not_stack() {
        let mut doc = SourceDocument::new();
        doc.blank();
        doc.raw("a");
        doc.blank();
        doc.blank();
        assert_eq!(doc.items().len(), 2);
    }
}
