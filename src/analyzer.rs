use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::AnalyzeConfig;
use crate::graph::{self, AnalysisResult, FileRecord, Summary};
use crate::parser;
use crate::walker::{self, DiscoveryError};

/// Analyze a project root: discover source files, extract each file's
/// import/export declarations, and assemble the dependency graph.
///
/// The only hard failure is an unreadable root ([`DiscoveryError`]); every
/// per-file problem is absorbed into an empty-but-present [`FileRecord`] plus
/// a warning, so every discovered file appears in the result.
pub fn analyze(root: &Path, config: &AnalyzeConfig) -> Result<AnalysisResult, DiscoveryError> {
    analyze_with_cancel(root, config, None)
}

/// Like [`analyze`], with cooperative cancellation.
///
/// The flag is checked before each file's work begins. Once set, remaining
/// files are dropped from the run entirely — no partially-processed records —
/// and the result comes back with `truncated == true` instead of an error.
pub fn analyze_with_cancel(
    root: &Path,
    config: &AnalyzeConfig,
    cancel: Option<&AtomicBool>,
) -> Result<AnalysisResult, DiscoveryError> {
    let discovery = walker::discover_files(root, config)?;
    let mut warnings = discovery.warnings;

    // Per-file work is independent — fan out across rayon workers. `collect`
    // on an indexed parallel iterator preserves discovery order, so the final
    // file list is deterministic regardless of completion order.
    let outcomes: Vec<Option<(FileRecord, Option<String>)>> = discovery
        .files
        .par_iter()
        .map(|path| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return None;
            }
            Some(process_file(root, path))
        })
        .collect();

    let truncated = outcomes.iter().any(Option::is_none);

    let mut files = Vec::with_capacity(outcomes.len());
    for (record, warning) in outcomes.into_iter().flatten() {
        if let Some(warning) = warning {
            warnings.push(warning);
        }
        files.push(record);
    }

    let dependencies = graph::build_edges(&files);
    let summary = Summary {
        total_files: files.len(),
        total_dependencies: dependencies.len(),
    };

    Ok(AnalysisResult {
        files,
        dependencies,
        summary,
        warnings,
        truncated,
    })
}

/// Read and parse one file. Never fails: read or parse errors yield an empty
/// record plus the warning to attach — the failure-isolation contract that
/// keeps one bad file from affecting the rest of the run.
fn process_file(root: &Path, path: &Path) -> (FileRecord, Option<String>) {
    let rel = relative_path(root, path);

    let source = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            let warning = format!("could not read {rel}: {err}");
            return (FileRecord::empty(rel), Some(warning));
        }
    };

    match parser::parse_source(path, &source) {
        Ok(parsed) => (
            FileRecord {
                path: rel,
                imports: parsed.imports,
                exports: parsed.exports,
            },
            None,
        ),
        Err(err) => {
            let warning = format!("could not parse {rel}: {err}");
            (FileRecord::empty(rel), Some(warning))
        }
    }
}

/// Root-relative path with forward slashes, for stable cross-platform output.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
