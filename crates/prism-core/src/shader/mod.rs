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

//! The shader pipeline: value types, reflection, description parsing, source
//! documents, code generation contracts, compilation and vertex layouts.

mod compiler;
mod document;
mod generator;
mod layout;
mod metadata;
mod parser;
mod reflection;
mod stage;
mod types;

pub use self::compiler::*;
pub use self::document::*;
pub use self::generator::*;
pub use self::layout::*;
pub use self::metadata::*;
pub use self::parser::*;
pub use self::reflection::*;
pub use self::stage::*;
pub use self::types::*;
