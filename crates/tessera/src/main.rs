//! Tessera CLI - render element documents to HTML.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Render JSON and YAML element documents to HTML")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to tessera.toml config file
    #[arg(short, long, default_value = "tessera.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML
    Render {
        /// Input document (.json, .yaml or .yml)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prepend <!DOCTYPE html>
        #[arg(long)]
        doctype: bool,
    },

    /// Show how a tag selector is parsed
    Selector {
        /// Selector such as div#main.card
        selector: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Render {
            input,
            output,
            doctype,
        } => {
            let doctype = if doctype { Some(true) } else { None };
            commands::render::run(&config, &input, output, doctype)?;
        }
        Commands::Selector { selector } => {
            commands::selector::run(&selector)?;
        }
    }

    Ok(())
}
