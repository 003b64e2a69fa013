mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::GlobalOpts;

#[derive(Parser)]
#[command(name = "dentview", about = "Annotated dental radiograph renderer")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Render config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Label font file, overrides the configured families
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and the viewport fit
    Info(commands::info::InfoArgs),
    /// Render an image with its detections to PNG
    Render(commands::render::RenderArgs),
    /// Print the draw commands of a render pass
    Layout(commands::layout::LayoutArgs),
    /// Render every image in a directory that has a detections sidecar
    Batch(commands::batch::BatchArgs),
    /// Upload a radiograph to the inference backend and render the result
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print or save the default render config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let opts = GlobalOpts {
        config: cli.config,
        font: cli.font,
    };

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &opts),
        Commands::Render(args) => commands::render::run(args, &opts),
        Commands::Layout(args) => commands::layout::run(args, &opts),
        Commands::Batch(args) => commands::batch::run(args, &opts),
        Commands::Analyze(args) => commands::analyze::run(args, &opts),
        Commands::Config(args) => commands::config::run(args),
    }
}
