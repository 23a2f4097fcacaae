use serde::Serialize;
use tree_sitter::Node;

use super::node_text;

/// Synthetic name recorded for default exports, which bind no identifier of
/// their own at the export site.
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// What kind of surface an export exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    /// `export default ...`
    Default,
    /// `export { a, b }`, `export const x = ...`, re-exported names.
    Named,
    /// `export * from './m'` or `export * as ns from './m'`.
    Namespace,
    /// `export function foo() {}`
    Function,
    /// `export class Foo {}`
    Class,
    /// `export interface Foo {}` (TypeScript only).
    Interface,
    /// `export type Foo = ...` (TypeScript only).
    Type,
}

impl ExportKind {
    /// Short label matching the serialized form.
    #[cfg_attr(not(feature = "ask"), allow(dead_code))]
    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Default => "default",
            ExportKind::Named => "named",
            ExportKind::Namespace => "namespace",
            ExportKind::Function => "function",
            ExportKind::Class => "class",
            ExportKind::Interface => "interface",
            ExportKind::Type => "type",
        }
    }
}

/// A single exported surface extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    /// The exported identifier, or [`DEFAULT_EXPORT_NAME`] for default exports.
    pub name: String,
    /// Classification by declaration shape.
    pub kind: ExportKind,
    /// True when the export carries only type information.
    pub is_type_only: bool,
}

/// Classify a single `export_statement` node into zero or more [`ExportRecord`]s.
///
/// One statement can expose several names (`export { a, b }` yields two
/// records); a statement the classifier does not model (e.g. TS
/// `export = x` assignments) yields none.
pub fn classify_export(node: Node, source: &[u8]) -> Vec<ExportRecord> {
    // `export type { T }` / `export type * from ...` — statement-level keyword.
    let stmt_type_only = has_child_of_kind(node, "type");

    // `export default ...` takes precedence over any inline declaration: the
    // surface is the module's default slot, not the declaration's own name.
    if has_child_of_kind(node, "default") {
        return vec![ExportRecord {
            name: DEFAULT_EXPORT_NAME.to_owned(),
            kind: ExportKind::Default,
            is_type_only: false,
        }];
    }

    // Inline exported declaration: `export function foo() {}` etc.
    if let Some(declaration) = node.child_by_field_name("declaration") {
        return classify_declaration(declaration, source, stmt_type_only)
            .into_iter()
            .collect();
    }

    // `export * as ns from './m'`
    if let Some(ns) = find_child_of_kind(node, "namespace_export") {
        let name = find_identifier(ns, source).unwrap_or_else(|| "*".to_owned());
        return vec![ExportRecord {
            name,
            kind: ExportKind::Namespace,
            is_type_only: stmt_type_only,
        }];
    }

    // `export * from './m'`
    if has_child_of_kind(node, "*") {
        return vec![ExportRecord {
            name: "*".to_owned(),
            kind: ExportKind::Namespace,
            is_type_only: stmt_type_only,
        }];
    }

    // `export { a, b }` and `export { a } from './m'` — one record per name.
    if let Some(clause) = find_child_of_kind(node, "export_clause") {
        return export_clause_records(clause, source, stmt_type_only);
    }

    Vec::new()
}

/// Classify the declaration child of an `export_statement`.
///
/// For variable statements exporting multiple bindings only the first declared
/// name is recorded; this mirrors the documented single-name contract.
fn classify_declaration(
    declaration: Node,
    source: &[u8],
    stmt_type_only: bool,
) -> Option<ExportRecord> {
    let (kind, type_only) = match declaration.kind() {
        "function_declaration" | "generator_function_declaration" => (ExportKind::Function, false),
        "class_declaration" | "abstract_class_declaration" => (ExportKind::Class, false),
        "interface_declaration" => (ExportKind::Interface, true),
        "type_alias_declaration" => (ExportKind::Type, true),
        "enum_declaration" => (ExportKind::Named, false),
        "lexical_declaration" | "variable_declaration" => {
            let name = first_declarator_name(declaration, source)?;
            return Some(ExportRecord {
                name,
                kind: ExportKind::Named,
                is_type_only: stmt_type_only,
            });
        }
        _ => return None,
    };

    let name = declaration
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_owned())?;

    Some(ExportRecord {
        name,
        kind,
        is_type_only: type_only || stmt_type_only,
    })
}

/// Extract one record per `export_specifier` in an `export_clause`.
///
/// In `export { foo as bar }` the exported (outward-facing) name is the alias.
fn export_clause_records(clause: Node, source: &[u8], stmt_type_only: bool) -> Vec<ExportRecord> {
    let mut records = Vec::new();
    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        if child.kind() != "export_specifier" {
            continue;
        }
        let name_node = child.child_by_field_name("name");
        let alias_node = child.child_by_field_name("alias");
        let Some(exported) = alias_node.or(name_node) else {
            continue;
        };
        let specifier_type_only = has_child_of_kind(child, "type");
        records.push(ExportRecord {
            name: node_text(exported, source).to_owned(),
            kind: ExportKind::Named,
            is_type_only: stmt_type_only || specifier_type_only,
        });
    }
    records
}

/// First `variable_declarator` name of a variable statement, identifiers only —
/// destructuring patterns are not recorded.
fn first_declarator_name(declaration: Node, source: &[u8]) -> Option<String> {
    let declarator = find_child_of_kind(declaration, "variable_declarator")?;
    let name = declarator.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }
    Some(node_text(name, source).to_owned())
}

/// Find the first direct child of `node` with the given kind.
fn find_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

fn has_child_of_kind(node: Node, kind: &str) -> bool {
    find_child_of_kind(node, kind).is_some()
}

/// Find the first identifier-like descendant among direct children.
fn find_identifier(node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|c| c.kind() == "identifier")
        .map(|c| node_text(c, source).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use std::path::Path;

    fn exports_of(src: &str) -> Vec<ExportRecord> {
        parse_source(Path::new("test.ts"), src.as_bytes())
            .expect("fixture should parse")
            .exports
    }

    #[test]
    fn test_exported_function() {
        let exports = exports_of("export function foo() {}");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "foo");
        assert_eq!(exports[0].kind, ExportKind::Function);
        assert!(!exports[0].is_type_only);
    }

    #[test]
    fn test_exported_class() {
        let exports = exports_of("export class Service {}");
        assert_eq!(exports[0].name, "Service");
        assert_eq!(exports[0].kind, ExportKind::Class);
    }

    #[test]
    fn test_exported_interface_is_type_only() {
        let exports = exports_of("export interface User { name: string; }");
        assert_eq!(exports[0].name, "User");
        assert_eq!(exports[0].kind, ExportKind::Interface);
        assert!(exports[0].is_type_only);
    }

    #[test]
    fn test_exported_type_alias_is_type_only() {
        let exports = exports_of("export type Id = string;");
        assert_eq!(exports[0].name, "Id");
        assert_eq!(exports[0].kind, ExportKind::Type);
        assert!(exports[0].is_type_only);
    }

    #[test]
    fn test_exported_const() {
        let exports = exports_of("export const x = 1;");
        assert_eq!(exports[0].name, "x");
        assert_eq!(exports[0].kind, ExportKind::Named);
    }

    #[test]
    fn test_exported_enum_is_named() {
        let exports = exports_of("export enum Color { Red, Green }");
        assert_eq!(exports[0].name, "Color");
        assert_eq!(exports[0].kind, ExportKind::Named);
    }

    #[test]
    fn test_multi_binding_variable_records_first_name_only() {
        let exports = exports_of("export const a = 1, b = 2;");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "a");
    }

    #[test]
    fn test_default_export() {
        let exports = exports_of("export default MyComponent;");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, DEFAULT_EXPORT_NAME);
        assert_eq!(exports[0].kind, ExportKind::Default);
    }

    #[test]
    fn test_default_exported_function_uses_synthetic_name() {
        let exports = exports_of("export default function main() {}");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, DEFAULT_EXPORT_NAME);
        assert_eq!(exports[0].kind, ExportKind::Default);
    }

    #[test]
    fn test_named_export_list() {
        let exports = exports_of("const foo = 1; const bar = 2; export { foo, bar };");
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].name, "foo");
        assert_eq!(exports[1].name, "bar");
        assert!(exports.iter().all(|e| e.kind == ExportKind::Named));
    }

    #[test]
    fn test_named_export_alias_records_outward_name() {
        let exports = exports_of("const foo = 1; export { foo as publicFoo };");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "publicFoo");
    }

    #[test]
    fn test_reexport_records_names() {
        let exports = exports_of("export { helper } from './utils';");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "helper");
        assert_eq!(exports[0].kind, ExportKind::Named);
    }

    #[test]
    fn test_reexport_all_is_namespace() {
        let exports = exports_of("export * from './types';");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "*");
        assert_eq!(exports[0].kind, ExportKind::Namespace);
    }

    #[test]
    fn test_namespace_reexport_records_alias() {
        let exports = exports_of("export * as models from './models';");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "models");
        assert_eq!(exports[0].kind, ExportKind::Namespace);
    }

    #[test]
    fn test_type_only_export_clause() {
        let exports = exports_of("export type { Config } from './config';");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "Config");
        assert!(exports[0].is_type_only);
    }

    #[test]
    fn test_empty_export_clause_yields_nothing() {
        let exports = exports_of("export {};");
        assert!(exports.is_empty());
    }
}
