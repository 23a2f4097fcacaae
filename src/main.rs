mod analyzer;
mod cli;
mod config;
mod graph;
#[cfg(feature = "ask")]
mod llm;
mod output;
mod parser;
mod walker;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use config::AnalyzeConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            json,
            verbose,
            top,
        } => {
            let config = AnalyzeConfig::load(&path);
            let result = analyzer::analyze(&path, &config)?;

            if verbose {
                for file in &result.files {
                    eprintln!("{}", file.path);
                }
            }

            output::print_summary(&result, json, top);
        }
        #[cfg(feature = "ask")]
        Commands::Ask { question, path } => {
            let config = AnalyzeConfig::load(&path);
            let result = analyzer::analyze(&path, &config)?;

            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }

            let answer = llm::ask(&question, &result)?;
            println!("{answer}");
        }
    }

    Ok(())
}
