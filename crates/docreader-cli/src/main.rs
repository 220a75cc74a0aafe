//! docreader command-line interface
//!
//! # Usage
//!
//! ```bash
//! docreader extract scan.png
//! docreader extract report.pdf --format json --config docreader.toml
//! docreader serve --host 0.0.0.0 --port 8000
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docreader::{DocumentProcessor, DocumentResult, ProcessorConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docreader")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract text from images, PDF, DOCX and plain text with a confidence score", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a single file
    Extract {
        /// File to read; its extension selects the extractor
        path: PathBuf,

        /// Config file (TOML, YAML or JSON). Defaults to a discovered docreader.toml
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Start the HTTP server
    #[cfg(feature = "api")]
    Serve {
        /// Host to bind to
        #[arg(long, short = 'H', default_value = "127.0.0.1", env = "DOCREADER_HOST")]
        host: String,

        /// Port to listen on
        #[arg(long, short, default_value_t = 8000, env = "DOCREADER_PORT")]
        port: u16,

        /// Config file (TOML, YAML or JSON). Defaults to a discovered docreader.toml
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { path, config, format } => {
            let config = load_config(config.as_deref())?;
            let processor = DocumentProcessor::from_config(&config).context("Failed to build processor")?;

            let result = processor
                .process_file(&path)
                .with_context(|| format!("Failed to process {}", path.display()))?;
            processor.shutdown();

            print_result(&result, format)?;
        }
        #[cfg(feature = "api")]
        Commands::Serve { host, port, config } => {
            let config = load_config(config.as_deref())?;
            tracing::info!("Starting server on {}:{}", host, port);
            docreader::api::serve_with_config(&host, port, config)
                .await
                .context("Server failed")?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ProcessorConfig> {
    if let Some(path) = path {
        return ProcessorConfig::from_file(path).with_context(|| format!("Failed to load config {}", path.display()));
    }
    Ok(ProcessorConfig::discover()
        .context("Failed to load discovered config")?
        .unwrap_or_default())
}

fn print_result(result: &DocumentResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", result.text);
            eprintln!(
                "[{}] {} bytes, confidence {:.3}, {:.3}s",
                result.file_type, result.file_size, result.confidence, result.processing_time
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    Ok(())
}
