//! syn-based source parser adapter.
//!
//! Walks the full syntax tree in depth-first pre-order and records every
//! function item at any nesting depth: free functions, impl methods, trait
//! methods, and functions defined inside other bodies. Nesting is not
//! preserved; the output is one flat list.

use crate::domain::docmodel::{FunctionRecord, ParsedSource};
use crate::domain::error::Result;
use crate::ports::SourceParser;
use std::fs;
use std::path::Path;
use syn::visit::{self, Visit};

pub struct SynSourceParser;

impl SourceParser for SynSourceParser {
    fn parse_file(&self, path: &Path) -> Result<ParsedSource> {
        let src = fs::read_to_string(path)?;
        self.parse_source(&src)
    }

    fn parse_source(&self, src: &str) -> Result<ParsedSource> {
        let file = syn::parse_file(src)?;
        let docstring = doc_text(&file.attrs);
        let mut collector = FnCollector { functions: Vec::new() };
        collector.visit_file(&file);
        Ok(ParsedSource {
            docstring,
            functions: collector.functions,
        })
    }
}

struct FnCollector {
    functions: Vec<FunctionRecord>,
}

impl FnCollector {
    fn record(&mut self, ident: &syn::Ident, fn_token: &syn::token::Fn, attrs: &[syn::Attribute]) {
        // Position of the `fn` keyword: 1-based line, 0-based column.
        let start = fn_token.span.start();
        self.functions.push(FunctionRecord {
            name: ident.to_string(),
            lineno: start.line as u32,
            col_offset: start.column as u32,
            docstring: doc_text(attrs),
        });
    }
}

impl<'ast> Visit<'ast> for FnCollector {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.record(&node.sig.ident, &node.sig.fn_token, &node.attrs);
        visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        self.record(&node.sig.ident, &node.sig.fn_token, &node.attrs);
        visit::visit_impl_item_fn(self, node);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast syn::TraitItemFn) {
        self.record(&node.sig.ident, &node.sig.fn_token, &node.attrs);
        visit::visit_trait_item_fn(self, node);
    }
}

/// Join `#[doc]` attribute values (`///` and `//!` lines) into one docstring.
fn doc_text(attrs: &[syn::Attribute]) -> Option<String> {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(nv) = &attr.meta {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(text),
                ..
            }) = &nv.value
            {
                lines.push(text.value().trim_end().to_string());
            }
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
