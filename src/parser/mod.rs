pub mod exports;
pub mod imports;

use std::cell::RefCell;
use std::path::Path;

use anyhow::{Result, anyhow};
use tree_sitter::{Node, Parser};

use exports::ExportRecord;
use imports::ImportRecord;

// Thread-local Parser instances — one per rayon worker thread, zero lock
// contention. Each Parser is initialised once per thread with its grammar.
thread_local! {
    static PARSER_TS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()).unwrap();
        p
    });
    static PARSER_TSX: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into()).unwrap();
        p
    });
    static PARSER_JS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_javascript::LANGUAGE.into()).unwrap();
        p
    });
}

/// Structural facts extracted from a single parsed source file.
#[derive(Debug)]
pub struct ParsedFile {
    /// All import declarations, in source order.
    pub imports: Vec<ImportRecord>,
    /// All export surfaces (re-exports and exported declarations), in source order.
    pub exports: Vec<ExportRecord>,
}

/// Parse a source file and extract its import/export declarations.
///
/// The grammar is chosen from the file extension: `.ts` uses the TypeScript
/// grammar, `.tsx` the TSX grammar, `.js`/`.jsx` the JavaScript grammar
/// (which covers JSX).
///
/// # Errors
/// Returns an error if:
/// - The file extension maps to no known grammar
/// - `tree-sitter` returns `None` (cancelled / no language set)
/// - The produced tree contains syntax errors
///
/// Callers are expected to treat any error as a per-file warning — a parse
/// failure must never abort the analysis of other files.
pub fn parse_source(path: &Path, source: &[u8]) -> Result<ParsedFile> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let tree = match ext {
        "ts" => PARSER_TS.with(|p| p.borrow_mut().parse(source, None)),
        "tsx" => PARSER_TSX.with(|p| p.borrow_mut().parse(source, None)),
        "js" | "jsx" => PARSER_JS.with(|p| p.borrow_mut().parse(source, None)),
        _ => return Err(anyhow!("unsupported file extension: {ext:?}")),
    };
    let tree = tree.ok_or_else(|| anyhow!("tree-sitter returned None for {}", path.display()))?;

    if tree.root_node().has_error() {
        return Err(anyhow!("syntax errors in {}", path.display()));
    }

    let mut imports = Vec::new();
    let mut exports = Vec::new();
    collect(tree.root_node(), source, &mut imports, &mut exports);

    Ok(ParsedFile { imports, exports })
}

/// Recursive descent over the syntax tree, visiting every node exactly once.
///
/// Only two node families matter here; everything else is traversal scaffolding.
/// Import statements only occur at the top level of a module, but the walk is
/// written order- and depth-independent so nesting never matters.
fn collect(
    node: Node,
    source: &[u8],
    imports: &mut Vec<ImportRecord>,
    exports: &mut Vec<ExportRecord>,
) {
    match node.kind() {
        "import_statement" => {
            if let Some(record) = imports::classify_import(node, source) {
                imports.push(record);
            }
        }
        "export_statement" => {
            exports.extend(exports::classify_export(node, source));
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, source, imports, exports);
    }
}

/// Extract the UTF-8 text of a node from the original source bytes.
pub(crate) fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Unwrap a `string` literal node to its inner text, e.g. `'./utils'` → `./utils`.
///
/// A literal containing escape sequences splits into several fragment nodes;
/// all of them are concatenated verbatim. An empty literal (`''`) has no
/// fragments and yields an empty string.
pub(crate) fn string_literal_text(string_node: Node, source: &[u8]) -> String {
    let mut cursor = string_node.walk();
    let mut text = String::new();
    for frag in string_node.named_children(&mut cursor) {
        text.push_str(node_text(frag, source));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let err = parse_source(Path::new("main.rs"), b"fn main() {}").unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        let err = parse_source(Path::new("bad.ts"), b"import { from ;;; @@@").unwrap_err();
        assert!(err.to_string().contains("syntax errors"));
    }

    #[test]
    fn test_clean_file_parses() {
        let src = b"import { x } from './b';\nexport function foo() { return x; }\n";
        let parsed = parse_source(Path::new("a.ts"), src).unwrap();
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.exports.len(), 1);
    }

    #[test]
    fn test_tsx_grammar_handles_jsx() {
        let src = b"import React from 'react';\nexport function App() { return <div />; }\n";
        let parsed = parse_source(Path::new("app.tsx"), src).unwrap();
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.exports.len(), 1);
    }

    #[test]
    fn test_js_grammar() {
        let src = b"import fs from 'fs';\nexport const read = () => fs;\n";
        let parsed = parse_source(Path::new("io.js"), src).unwrap();
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.exports.len(), 1);
    }
}
