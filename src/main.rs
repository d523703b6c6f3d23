use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod display;
mod engine;
mod engines;
mod error;
mod extractor;
mod input;
mod loader;
mod preprocessing;

use config::{EngineKind, DEFAULT_TESSERACT_COMMAND};

#[derive(Parser, Debug)]
#[command(name = "img2text")]
#[command(about = "Extract plain text from an image with Tesseract OCR")]
#[command(version)]
pub struct Args {
    /// Image to read; prompts for a path when omitted
    pub image_path: Option<PathBuf>,

    /// OCR engine to use
    #[arg(long, value_enum, default_value_t = EngineKind::Tesseract)]
    pub engine: EngineKind,

    /// Tesseract executable to run
    #[arg(long, default_value = DEFAULT_TESSERACT_COMMAND)]
    pub tesseract_path: PathBuf,

    /// Path to tessdata directory
    #[arg(long)]
    pub tessdata_path: Option<String>,

    /// Show the original and preprocessed images, wait for Enter
    #[arg(long)]
    pub show: bool,

    /// Also write the preprocessed (binary) image to this path
    #[arg(long)]
    pub save_preprocessed: Option<PathBuf>,

    /// Print a JSON report instead of the plain transcript
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!("Starting img2text v{}", env!("CARGO_PKG_VERSION"));

    let source = input::InputSource::from_arg(args.image_path.clone());
    let config = config::Config::from(args);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app::App::new(config).run(source, &mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
