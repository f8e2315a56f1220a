//! Map print CLI
//!
//! Builds print specifications from map snapshots and exports them through
//! a print service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use mapprint::{build_from_file, write_spec, HttpPrintService, HttpStyleTranslator};
use print_common::{PassthroughStyleTranslator, StyleTranslator};
use print_spec::{PrintConfig, PrintService, SpecAssembler};

/// Map print CLI
#[derive(Parser, Debug)]
#[command(name = "mapprint")]
#[command(about = "Build print specifications from map snapshots")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print layout configuration (YAML)
    #[arg(long, env = "MAPPRINT_CONFIG")]
    config: Option<PathBuf>,

    /// Style translation service URL; styles pass through unchanged if unset
    #[arg(long, env = "MAPPRINT_STYLE_URL")]
    style_url: Option<String>,

    /// Timeout for calls to remote services, in seconds
    #[arg(long, default_value_t = 60, env = "MAPPRINT_TIMEOUT_SECS")]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "MAPPRINT_LOG_JSON")]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the print specification as JSON
    Spec {
        /// Map snapshot (.json, .yaml, .yml)
        #[arg(short, long)]
        map: PathBuf,

        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the map through the print service and save the image
    Export {
        /// Map snapshot (.json, .yaml, .yml)
        #[arg(short, long)]
        map: PathBuf,

        /// Print service endpoint
        #[arg(long, env = "MAPPRINT_PRINT_URL")]
        print_url: String,

        /// Image file to write
        #[arg(short, long, default_value = "map.png")]
        output: PathBuf,
    },
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args)) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(args: Args) -> Result<()> {
    let timeout = Duration::from_secs(args.timeout_secs);

    let config = match &args.config {
        Some(path) => PrintConfig::load(path)?,
        None => PrintConfig::default(),
    };

    let styles: Arc<dyn StyleTranslator> = match &args.style_url {
        Some(url) => {
            info!("Translating vector styles through {}", url);
            Arc::new(HttpStyleTranslator::new(url.clone(), timeout)?)
        }
        None => Arc::new(PassthroughStyleTranslator),
    };

    let assembler = SpecAssembler::new(config, styles);

    match args.command {
        Command::Spec { map, output } => {
            let build = build_from_file(&assembler, &map).await?;
            write_spec(&build.spec, output.as_deref())?;
        }
        Command::Export {
            map,
            print_url,
            output,
        } => {
            let build = build_from_file(&assembler, &map).await?;
            let service = HttpPrintService::new(print_url, timeout)?;

            let image = service
                .print(&build.spec)
                .await
                .context("Export failed")?;
            std::fs::write(&output, &image)
                .with_context(|| format!("Failed to write {:?}", output))?;

            info!(bytes = image.len(), "Saved map export to {:?}", output);
        }
    }

    Ok(())
}
