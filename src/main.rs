use anyhow::Context;
use clap::{Parser, Subcommand};
use darknet_graph::{Metadata, diagnostics, render};
use std::path::{Path, PathBuf};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "darknet-graph")]
#[command(about = "Darknet cfg graph inspector", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the parsed graph as JSON.
    Inspect {
        #[arg(long)]
        cfg: PathBuf,

        /// Operator metadata (defaults to ./darknet-metadata.json, then the bundled set).
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Generate a self-contained HTML report.
    Report {
        #[arg(long)]
        cfg: PathBuf,

        #[arg(long)]
        metadata: Option<PathBuf>,

        #[arg(short = 'o', long)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    diagnostics::init_logger(&cli.log_level);

    if let Err(err) = run(cli.cmd) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Inspect { cfg, metadata, out } => {
            let metadata = load_metadata(metadata.as_deref());
            let model = load_model(&cfg, &metadata)?;

            let json = serde_json::to_string_pretty(&model)?;
            match out {
                Some(out) => {
                    std::fs::write(&out, json).with_context(|| {
                        diagnostics::error_message(format!("write {}", out.display()))
                    })?;
                    println!("Wrote {}", out.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Report { cfg, metadata, out } => {
            let metadata = load_metadata(metadata.as_deref());
            let model = load_model(&cfg, &metadata)?;

            let title = cfg
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| cfg.display().to_string());
            let data = render::build_report_data(&title, &model)?;
            let html = render::render_html_report(&data)?;
            std::fs::write(&out, html)
                .with_context(|| diagnostics::error_message(format!("write {}", out.display())))?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

/// Explicit path first, then `darknet-metadata.json` in the working directory,
/// then the schemas compiled into the binary.
fn load_metadata(path: Option<&Path>) -> Metadata {
    match path {
        Some(path) => Metadata::open(path),
        None if Path::new(Metadata::FILE_NAME).is_file() => Metadata::open(Metadata::FILE_NAME),
        None => Metadata::bundled(),
    }
}

fn load_model(path: &Path, metadata: &Metadata) -> Result<darknet_graph::Model> {
    let identifier = path.display().to_string();
    if !darknet_graph::matches(&identifier) {
        diagnostics::warn(format!("{identifier} does not have a .cfg extension"));
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read cfg file {identifier}")))?;
    let model = darknet_graph::open(&identifier, &text, metadata)?;
    log::info!(
        "{identifier}: {} layers",
        model.graphs().first().map_or(0, |g| g.nodes.len())
    );
    Ok(model)
}
