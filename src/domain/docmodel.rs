//! Document model: the per-file mapping of docstring facts.
//!
//! The model is a two-level mapping keyed by string. The top level holds the
//! module docstring, module-level relationship fields, and one `Function`
//! entry per function found in the file; each function entry holds its
//! source position, docstring, and fields. Nesting in the original syntax
//! tree is flattened: a function defined inside another still lands at the
//! top level, and a later definition with the same name overwrites an
//! earlier one.

use crate::domain::error::Result;
use crate::domain::seealso::{FieldKind, SeeAlsoFields};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// Reserved key for raw docstring text.
pub const DOCSTRING_KEY: &str = "docstring";
/// Reserved key for a function's source position.
pub const POSITION_KEY: &str = "position";

/// One tagged value in the document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DocEntry {
    /// Raw docstring text, absent when the item carries no doc comment.
    Docstring(Option<String>),
    /// A relationship field and its target names.
    Field(FieldKind, BTreeSet<String>),
    /// Source position: 1-based line of the `fn` keyword, 0-based column.
    Position { lineno: u32, col_offset: u32 },
    /// A function's sub-mapping.
    Function(BTreeMap<String, DocEntry>),
}

/// Raw per-function facts yielded by the syntax-tree parser.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub name: String,
    /// 1-based source line.
    pub lineno: u32,
    /// 0-based source column.
    pub col_offset: u32,
    pub docstring: Option<String>,
}

/// One parsed source file, before docstring interpretation.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// Module-level docstring.
    pub docstring: Option<String>,
    /// Every function in the file, in depth-first pre-order.
    pub functions: Vec<FunctionRecord>,
}

/// The document model for one source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DocModel {
    entries: BTreeMap<String, DocEntry>,
}

impl DocModel {
    /// Build the model from a parsed source file.
    ///
    /// Module-level "See Also" fields seed the top level; each function
    /// record becomes a `Function` entry. Records arrive in pre-order, so a
    /// duplicate name keeps the definition visited last.
    pub fn from_source(source: &ParsedSource) -> Result<Self> {
        let mut entries = BTreeMap::new();
        entries.insert(
            DOCSTRING_KEY.to_string(),
            DocEntry::Docstring(source.docstring.clone()),
        );
        if let Some(doc) = &source.docstring {
            for item in SeeAlsoFields::new(doc) {
                let (kind, targets) = item?;
                entries.insert(kind.key().to_string(), DocEntry::Field(kind, targets));
            }
        }
        for func in &source.functions {
            let mut sub = BTreeMap::new();
            sub.insert(
                POSITION_KEY.to_string(),
                DocEntry::Position {
                    lineno: func.lineno,
                    col_offset: func.col_offset,
                },
            );
            sub.insert(
                DOCSTRING_KEY.to_string(),
                DocEntry::Docstring(func.docstring.clone()),
            );
            if let Some(doc) = &func.docstring {
                for item in SeeAlsoFields::new(doc) {
                    let (kind, targets) = item?;
                    sub.insert(kind.key().to_string(), DocEntry::Field(kind, targets));
                }
            }
            entries.insert(func.name.clone(), DocEntry::Function(sub));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &BTreeMap<String, DocEntry> {
        &self.entries
    }

    /// Module-level docstring, if any.
    pub fn docstring(&self) -> Option<&str> {
        match self.entries.get(DOCSTRING_KEY) {
            Some(DocEntry::Docstring(doc)) => doc.as_deref(),
            _ => None,
        }
    }

    /// Sub-mapping for a function, if present.
    pub fn function(&self, name: &str) -> Option<&BTreeMap<String, DocEntry>> {
        match self.entries.get(name) {
            Some(DocEntry::Function(sub)) => Some(sub),
            _ => None,
        }
    }

    /// Module-level relationship field, if declared.
    pub fn field(&self, kind: FieldKind) -> Option<&BTreeSet<String>> {
        match self.entries.get(kind.key()) {
            Some(DocEntry::Field(_, targets)) => Some(targets),
            _ => None,
        }
    }

    /// Print the model with indentation, docstring bodies elided.
    pub fn pretty_print(&self, out: &mut impl Write) -> io::Result<()> {
        print_map(&self.entries, 0, out)
    }
}

fn print_map(map: &BTreeMap<String, DocEntry>, indent: usize, out: &mut impl Write) -> io::Result<()> {
    for (key, entry) in map {
        match entry {
            DocEntry::Docstring(_) => writeln!(out, "{:indent$}{key}: [omitted]", "")?,
            DocEntry::Field(_, targets) => {
                let joined = targets.iter().cloned().collect::<Vec<_>>().join(", ");
                writeln!(out, "{:indent$}{key}: {{{joined}}}", "")?;
            }
            DocEntry::Position { lineno, col_offset } => {
                writeln!(out, "{:indent$}lineno: {lineno}", "")?;
                writeln!(out, "{:indent$}col_offset: {col_offset}", "")?;
            }
            DocEntry::Function(sub) => {
                writeln!(out, "{:indent$}{key}:", "")?;
                print_map(sub, indent + 2, out)?;
            }
        }
    }
    Ok(())
}
