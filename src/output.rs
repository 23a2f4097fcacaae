use crate::graph::{AnalysisResult, FileRecord};

/// Print a summary of an analysis run.
///
/// - `json = true`: emit the full result as pretty-printed JSON to stdout.
/// - `json = false`: emit a human-readable summary — counts, the first `top`
///   dependency edges, and the five most-connected files.
///
/// Warnings and the truncation notice go to **stderr** so the stdout stream
/// stays clean for downstream JSON consumers.
pub fn print_summary(result: &AnalysisResult, json: bool, top: usize) {
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }
    if result.truncated {
        eprintln!("warning: analysis was cancelled before completing; results are partial");
    }

    if json {
        match serde_json::to_string_pretty(result) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("error serialising result: {e}"),
        }
        return;
    }

    println!(
        "Analyzed {} file(s), {} dependency edge(s)",
        result.summary.total_files, result.summary.total_dependencies
    );

    if !result.dependencies.is_empty() {
        println!("\nDependencies:");
        for edge in result.dependencies.iter().take(top) {
            let type_marker = if edge.is_type_only { " (type-only)" } else { "" };
            println!("  {} -> {}{}", edge.from, edge.to, type_marker);
        }
        let hidden = result.dependencies.len().saturating_sub(top);
        if hidden > 0 {
            println!("  ... and {hidden} more");
        }
    }

    let ranked = most_connected(&result.files, 5);
    if !ranked.is_empty() {
        println!("\nMain files:");
        for file in ranked {
            println!(
                "  {} ({} imports, {} exports)",
                file.path,
                file.imports.len(),
                file.exports.len()
            );
        }
    }
}

/// The `limit` files with the largest declaration surface, most connected
/// first. Ties break by path so output is stable across runs.
pub fn most_connected(files: &[FileRecord], limit: usize) -> Vec<&FileRecord> {
    let mut ranked: Vec<&FileRecord> = files.iter().collect();
    ranked.sort_by(|a, b| {
        b.connection_count()
            .cmp(&a.connection_count())
            .then_with(|| a.path.cmp(&b.path))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, exports: usize) -> FileRecord {
        use crate::parser::exports::{ExportKind, ExportRecord};
        FileRecord {
            path: path.to_owned(),
            imports: Vec::new(),
            exports: (0..exports)
                .map(|i| ExportRecord {
                    name: format!("e{i}"),
                    kind: ExportKind::Named,
                    is_type_only: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_most_connected_ranking() {
        let files = vec![file("low.ts", 1), file("high.ts", 5), file("mid.ts", 3)];
        let ranked = most_connected(&files, 2);
        let paths: Vec<_> = ranked.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["high.ts", "mid.ts"]);
    }

    #[test]
    fn test_most_connected_ties_break_by_path() {
        let files = vec![file("b.ts", 2), file("a.ts", 2)];
        let ranked = most_connected(&files, 2);
        let paths: Vec<_> = ranked.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.ts", "b.ts"]);
    }
}
