// Mendy - Torah-commentary and nikud assistant
// Main entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mendy::config::{load_config, Config};
use mendy::errors;
use mendy::export::{render_interpretation, render_vowelization, write_export};
use mendy::metrics::Metrics;
use mendy::server::AssistantServer;
use mendy::service::{AssistantError, AssistantService};

#[derive(Parser, Debug)]
#[command(name = "mendy")]
#[command(about = "Torah-commentary and nikud assistant", version)]
struct Args {
    /// Path to config file (default: ~/.mendy/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the web UI
    Serve {
        /// Bind address (default from config: 127.0.0.1:8501)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Write a Torah interpretation of a passage
    Interpret {
        /// Passage text (read from stdin when omitted)
        text: Option<String>,
        /// Write the text export here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Add nikud to a passage
    Nikud {
        /// Passage text (read from stdin when omitted)
        text: Option<String>,
        /// Write the text export here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Serve { bind } => run_serve(config, bind).await,
        Command::Interpret { text, output } => {
            let text = read_input(text)?;
            let service = build_service(&config)?;
            let result = service.interpret(&text).await;
            let rendered = result.map(|interp| render_interpretation(&interp));
            finish(rendered, output.as_deref())
        }
        Command::Nikud { text, output } => {
            let text = read_input(text)?;
            let service = build_service(&config)?;
            let result = service.vowelize(&text).await;
            let rendered = result.map(|v| render_vowelization(&v));
            finish(rendered, output.as_deref())
        }
    }
}

fn init_tracing() {
    // Default: INFO level, can be overridden with RUST_LOG env var
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so exports printed to stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn build_service(config: &Config) -> Result<AssistantService> {
    let metrics = Arc::new(Metrics::new()?);
    AssistantService::from_config(config, metrics)
}

/// Text from the argument, or all of stdin when piped
fn read_input(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if io::stdin().is_terminal() {
        bail!("No text given. Pass it as an argument or pipe it on stdin.");
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn finish(rendered: Result<String, AssistantError>, output: Option<&Path>) -> Result<()> {
    let text = match rendered {
        Ok(text) => text,
        Err(AssistantError::Provider(e)) => bail!("{}", errors::describe(&e)),
        Err(e) => bail!("{}", e),
    };

    match output {
        Some(path) => write_export(path, &text),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

async fn run_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    tracing::info!(
        model = %config.anthropic.model,
        max_tokens = config.anthropic.max_tokens,
        "Loaded configuration"
    );

    let service = build_service(&config)?;
    let server = AssistantServer::new(service, config.server.bind_address.clone());
    server.serve().await
}
