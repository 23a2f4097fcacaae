use serde::Serialize;

use crate::parser::exports::ExportRecord;
use crate::parser::imports::{ImportKind, ImportRecord};

/// Which declaration surface a dependency edge originates from.
///
/// Only import-origin edges are emitted today; re-exports are recorded on the
/// owning file's export list but do not materialize as edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Import,
    #[allow(dead_code)]
    Export,
}

/// All structural facts extracted from one source file.
///
/// Terminal once produced: a record is created exactly once per discovered
/// file and never revisited or merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Root-relative, forward-slash-normalized path. Never contains `..`.
    pub path: String,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
}

impl FileRecord {
    /// A record for a file that could not be read or parsed — present in the
    /// result so no discovered file is silently lost, but empty.
    pub fn empty(path: String) -> Self {
        Self {
            path,
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// Total declaration surface, used for "most connected files" ranking.
    pub fn connection_count(&self) -> usize {
        self.imports.len() + self.exports.len()
    }
}

/// A directed intra-repository dependency, derived from one import statement.
///
/// `to` is the raw specifier as written in source — no attempt is made to
/// resolve it to another [`FileRecord`]'s path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub import_kind: ImportKind,
    pub names: Vec<String>,
    pub is_type_only: bool,
}

/// Aggregate counts over the full result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_dependencies: usize,
}

/// The final product of an analysis run.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub files: Vec<FileRecord>,
    pub dependencies: Vec<DependencyEdge>,
    pub summary: Summary,
    /// Non-fatal problems encountered along the way (unreadable subtrees,
    /// unparsable files). Every warning corresponds to data that is absent
    /// or empty in `files`.
    pub warnings: Vec<String>,
    /// True when the run was cancelled before all discovered files were
    /// processed; the result is valid but covers only the processed prefix.
    pub truncated: bool,
}

/// Build one dependency edge per local-reference import.
///
/// Bare package specifiers (`react`, `@scope/pkg`) stay on the owning
/// [`FileRecord`] but never become edges — the graph models intra-repository
/// coupling only. No de-duplication: two import statements targeting the same
/// specifier contribute two edges.
pub fn build_edges(files: &[FileRecord]) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();
    for file in files {
        for import in &file.imports {
            if !import.is_local() {
                continue;
            }
            edges.push(DependencyEdge {
                from: file.path.clone(),
                to: import.specifier.clone(),
                kind: EdgeKind::Import,
                import_kind: import.kind,
                names: import.names.clone(),
                is_type_only: import.is_type_only,
            });
        }
    }
    edges
}
