use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// A static dependency analyzer for TypeScript/JavaScript codebases.
///
/// dep-agent walks a source tree, extracts every import and export
/// declaration, and assembles a file-level dependency graph that can be
/// printed, serialized as JSON, or fed to an AI model for natural-language
/// questions about the codebase.
#[derive(Parser, Debug)]
#[command(
    name = "dep-agent",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a project directory and print its dependency graph summary.
    Analyze {
        /// Path to the project root to analyze.
        path: PathBuf,

        /// Output the full analysis result as pretty-printed JSON.
        #[arg(long)]
        json: bool,

        /// Print each analyzed file path to stderr.
        #[arg(short, long)]
        verbose: bool,

        /// Number of dependency edges to show in the human-readable summary.
        #[arg(long, default_value_t = 8)]
        top: usize,
    },

    /// Ask an AI model a question about the analyzed codebase.
    ///
    /// Analyzes the project first, then sends the question together with a
    /// dependency-graph context to Gemini. Requires the GEMINI_API_KEY
    /// environment variable.
    #[cfg(feature = "ask")]
    Ask {
        /// The question to ask about the codebase.
        question: String,

        /// Path to the project root to analyze and ask about.
        path: PathBuf,
    },
}
