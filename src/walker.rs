use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::AnalyzeConfig;

/// Fatal discovery failure: the analysis root itself cannot be walked.
///
/// Everything else that goes wrong during discovery (an unreadable
/// subdirectory, a file that vanishes mid-walk) is non-fatal and surfaces as
/// a warning on [`Discovery::warnings`] instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read root directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The outcome of walking a project root: candidate source files in
/// deterministic (path-sorted) order, plus any non-fatal walk warnings.
#[derive(Debug)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Walk `root` and collect candidate source files.
///
/// Recurses into subdirectories, pruning any directory whose name is in
/// `config.excluded_dirs`. Keeps only files whose extension is in
/// `config.source_extensions`, and drops ambient `*.d.ts` declaration files
/// unless `config.include_type_declarations` is set.
///
/// Entries are yielded in path-sorted order so repeated runs over an
/// unchanged tree produce identical file lists.
pub fn discover_files(root: &Path, config: &AnalyzeConfig) -> Result<Discovery, DiscoveryError> {
    // An unreadable root is fatal; probe it before starting the walk so the
    // error is distinguishable from a mid-walk subtree failure.
    match std::fs::metadata(root) {
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
        }
        Err(err) => {
            return Err(DiscoveryError::Unreadable {
                path: root.to_path_buf(),
                source: err,
            });
        }
        Ok(meta) if !meta.is_dir() => {
            return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
        }
        Ok(_) => {}
    }
    if let Err(err) = std::fs::read_dir(root) {
        return Err(DiscoveryError::Unreadable {
            path: root.to_path_buf(),
            source: err,
        });
    }

    let mut files = Vec::new();
    let mut warnings = Vec::new();

    let filter_config = config.clone();
    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            // Prune excluded directories entirely; the root itself (depth 0)
            // is never filtered.
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            if !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !filter_config.is_excluded_dir(name.as_ref())
        })
        .build();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warnings.push(format!("skipping unreadable path: {err}"));
                continue;
            }
        };

        if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(true) {
            continue;
        }

        let path = entry.path();

        if !config.matches_extension(path) {
            continue;
        }

        if !config.include_type_declarations && is_type_declaration(path) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(Discovery { files, warnings })
}

/// Returns true for ambient TypeScript declaration files (`foo.d.ts`).
fn is_type_declaration(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts"))
}
