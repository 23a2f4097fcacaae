//! Natural-language query layer: serializes an analysis result into a prompt
//! context and asks Gemini about the codebase.
//!
//! This module owns all credential and network concerns; the analysis core
//! never performs either. Compiled only with the `ask` feature.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow, bail};
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use crate::graph::AnalysisResult;
use crate::output::most_connected;

const MODEL: &str = "gemini-2.5-flash";

/// How many dependency edges and ranked files the prompt context includes.
const CONTEXT_EDGES: usize = 15;
const CONTEXT_FILES: usize = 8;

/// Ask the model a question about an analyzed codebase.
///
/// Fails fast when `GEMINI_API_KEY` is unset rather than surfacing an opaque
/// transport error from the first request.
pub fn ask(question: &str, analysis: &AnalysisResult) -> Result<String> {
    if std::env::var("GEMINI_API_KEY").is_err() {
        bail!("GEMINI_API_KEY is not set in the environment");
    }

    let prompt = build_prompt(question, analysis);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(ask_model(prompt))
}

async fn ask_model(prompt: String) -> Result<String> {
    let client = Client::default();
    let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

    let response = client
        .exec_chat(MODEL, request, None)
        .await
        .context("Gemini API error")?;

    response
        .content_text_into_string()
        .ok_or_else(|| anyhow!("model returned an empty response"))
}

/// Render the analysis into the prompt context: summary counts, key
/// dependency edges, most-connected files, and import/export kind histograms.
fn build_prompt(question: &str, analysis: &AnalysisResult) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are analyzing a TypeScript/JavaScript codebase. Here's what I found:\n"
    );
    let _ = writeln!(
        prompt,
        "**Files analyzed:** {}",
        analysis.summary.total_files
    );
    let _ = writeln!(
        prompt,
        "**Dependencies:** {}\n",
        analysis.summary.total_dependencies
    );

    let _ = writeln!(prompt, "**Key dependencies:**");
    for edge in analysis.dependencies.iter().take(CONTEXT_EDGES) {
        let names = if edge.names.is_empty() {
            String::new()
        } else {
            format!(" [{}]", edge.names.join(", "))
        };
        let type_info = if edge.is_type_only { " (type-only)" } else { "" };
        let _ = writeln!(prompt, "- {} → {}{}{}", edge.from, edge.to, names, type_info);
    }

    let _ = writeln!(prompt, "\n**Files with most connections:**");
    for file in most_connected(&analysis.files, CONTEXT_FILES) {
        let _ = writeln!(
            prompt,
            "- {} ({} imports, {} exports)",
            file.path,
            file.imports.len(),
            file.exports.len()
        );
    }

    let _ = writeln!(prompt, "\n**Export patterns:**");
    let mut export_kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for export in analysis.files.iter().flat_map(|f| f.exports.iter()) {
        *export_kinds.entry(export.kind.label()).or_insert(0) += 1;
    }
    for (kind, count) in &export_kinds {
        let _ = writeln!(prompt, "- {kind}: {count}");
    }

    let _ = writeln!(prompt, "\n**Import patterns:**");
    let mut import_kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for import in analysis.files.iter().flat_map(|f| f.imports.iter()) {
        *import_kinds.entry(import.kind.label()).or_insert(0) += 1;
    }
    for (kind, count) in &import_kinds {
        let _ = writeln!(prompt, "- {kind}: {count}");
    }

    let _ = writeln!(prompt, "\n**Question:** {question}\n");
    let _ = writeln!(
        prompt,
        "Please answer the question based on the codebase analysis above. \
         Be specific and reference actual file names when possible."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DependencyEdge, EdgeKind, FileRecord, Summary};
    use crate::parser::imports::{ImportKind, ImportRecord};

    fn sample() -> AnalysisResult {
        let imports = vec![ImportRecord {
            specifier: "./b".to_owned(),
            names: vec!["x".to_owned()],
            kind: ImportKind::Named,
            is_type_only: true,
        }];
        let files = vec![
            FileRecord {
                path: "a.ts".to_owned(),
                imports: imports.clone(),
                exports: Vec::new(),
            },
            FileRecord::empty("b.ts".to_owned()),
        ];
        let dependencies = vec![DependencyEdge {
            from: "a.ts".to_owned(),
            to: "./b".to_owned(),
            kind: EdgeKind::Import,
            import_kind: ImportKind::Named,
            names: vec!["x".to_owned()],
            is_type_only: true,
        }];
        AnalysisResult {
            summary: Summary {
                total_files: files.len(),
                total_dependencies: dependencies.len(),
            },
            files,
            dependencies,
            warnings: Vec::new(),
            truncated: false,
        }
    }

    #[test]
    fn test_prompt_includes_summary_and_edges() {
        let prompt = build_prompt("what depends on b?", &sample());
        assert!(prompt.contains("**Files analyzed:** 2"));
        assert!(prompt.contains("**Dependencies:** 1"));
        assert!(prompt.contains("- a.ts → ./b [x] (type-only)"));
        assert!(prompt.contains("**Question:** what depends on b?"));
    }

    #[test]
    fn test_prompt_histograms_count_kinds() {
        let prompt = build_prompt("q", &sample());
        assert!(prompt.contains("**Import patterns:**"));
        assert!(prompt.contains("- named: 1"));
    }
}
