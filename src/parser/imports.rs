use serde::Serialize;
use tree_sitter::Node;

use super::{node_text, string_literal_text};

/// How an import statement binds the target module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import React from 'react'` — a single unnamed binding.
    Default,
    /// `import { useState } from 'react'` — a braced binding list.
    Named,
    /// `import * as path from 'path'` — the whole module under one alias.
    Namespace,
    /// `import './polyfill'` — no bindings, executed for its effects only.
    SideEffect,
}

impl ImportKind {
    /// Short label matching the serialized form.
    #[cfg_attr(not(feature = "ask"), allow(dead_code))]
    pub fn label(&self) -> &'static str {
        match self {
            ImportKind::Default => "default",
            ImportKind::Named => "named",
            ImportKind::Namespace => "namespace",
            ImportKind::SideEffect => "side-effect",
        }
    }
}

/// A single import declaration extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    /// The raw module specifier string, unresolved — e.g. `"react"` or `"./utils"`.
    pub specifier: String,
    /// The bound identifiers, in source order. Empty for side-effect imports.
    pub names: Vec<String>,
    /// Classification of the binding shape.
    pub kind: ImportKind,
    /// True when the statement binds only type information (`import type ...`).
    pub is_type_only: bool,
}

impl ImportRecord {
    /// Returns true if the specifier is a relative or root-relative local
    /// reference (`./x`, `../x`, `/x`) rather than a bare package name.
    pub fn is_local(&self) -> bool {
        self.specifier.starts_with('.') || self.specifier.starts_with('/')
    }
}

/// Classify a single `import_statement` node into an [`ImportRecord`].
///
/// Returns `None` when the statement has no string-literal specifier (an
/// import the grammar accepted but we cannot attribute to a module).
pub fn classify_import(node: Node, source: &[u8]) -> Option<ImportRecord> {
    let specifier = node
        .child_by_field_name("source")
        .map(|s| string_literal_text(s, source))?;

    // `import type { T } from ...` — the `type` keyword is a direct child of
    // the statement. Per-specifier `import { type T }` is not statement-level
    // type-only and is deliberately not detected here.
    let mut is_type_only = false;
    let mut clause: Option<Node> = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "type" => is_type_only = true,
            "import_clause" => clause = Some(child),
            _ => {}
        }
    }

    let Some(clause) = clause else {
        // `import './module'` — no bindings at all.
        return Some(ImportRecord {
            specifier,
            names: Vec::new(),
            kind: ImportKind::SideEffect,
            is_type_only,
        });
    };

    let mut names = Vec::new();
    let mut has_default = false;
    let mut has_named = false;
    let mut has_namespace = false;

    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                // Default binding: `import React from ...`
                has_default = true;
                names.push(node_text(child, source).to_owned());
            }
            "named_imports" => {
                has_named = true;
                collect_named_imports(child, source, &mut names);
            }
            "namespace_import" => {
                // `* as ns` — the identifier carries no field name in the grammar.
                has_namespace = true;
                if let Some(name) = namespace_import_name(child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    // A combined clause (`import React, { useState } from ...`) is classified
    // by its leading default binding; all bound names are still recorded.
    let kind = if has_default {
        ImportKind::Default
    } else if has_namespace {
        ImportKind::Namespace
    } else if has_named {
        ImportKind::Named
    } else {
        ImportKind::SideEffect
    };

    Some(ImportRecord {
        specifier,
        names,
        kind,
        is_type_only,
    })
}

/// Collect local binding names from a `named_imports` node.
///
/// In `import { foo as bar }` the grammar's `name` field is the original name
/// and `alias` the local binding; the local binding is what this file sees.
fn collect_named_imports(named_imports: Node, source: &[u8], names: &mut Vec<String>) {
    let mut cursor = named_imports.walk();
    for child in named_imports.children(&mut cursor) {
        if child.kind() != "import_specifier" {
            continue;
        }
        let name_node = child.child_by_field_name("name");
        let alias_node = child.child_by_field_name("alias");
        if let Some(binding) = alias_node.or(name_node) {
            names.push(node_text(binding, source).to_owned());
        }
    }
}

/// Extract the alias identifier from a `namespace_import` node (`* as identifier`).
fn namespace_import_name(ns_node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = ns_node.walk();
    for child in ns_node.children(&mut cursor) {
        if child.kind() == "identifier" {
            return Some(node_text(child, source).to_owned());
        }
    }
    None
}
