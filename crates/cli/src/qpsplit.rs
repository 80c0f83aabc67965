//! qpsplit - split an exam question paper into per-question images.
//!
//! `qpsplit split PAPER.pdf` writes one PNG per question to
//! `exports/questions/` and a matching ID strip to `exports/question_ids/`.
//! `qpsplit list` prints what has been exported so far.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use qpsplit_core::{SourceLocation, SplitConfig, SplitParams, list_questions, run};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Split typeset exam question papers into question images.
#[derive(Parser, Debug)]
#[command(name = "qpsplit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use debug logging level
    #[arg(short = 'd', long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a question paper
    Split {
        /// Path to the question paper PDF (or a URL with --remote)
        file: String,

        /// Root directory for exported images
        #[arg(short = 'o', long = "output", default_value = "exports")]
        output: PathBuf,

        /// JSON file overriding splitting parameters
        #[arg(long)]
        params: Option<PathBuf>,

        /// Leave the paper identifier out of ID strips
        #[arg(long = "no-paper-id", action = ArgAction::SetTrue)]
        no_paper_id: bool,

        /// Treat FILE as a URL
        #[arg(long, action = ArgAction::SetTrue)]
        remote: bool,

        /// Also write the redacted page rasters
        #[arg(long = "keep-pages", action = ArgAction::SetTrue)]
        keep_pages: bool,
    },

    /// List exported question images
    List {
        /// Root directory for exported images
        #[arg(short = 'o', long = "output", default_value = "exports")]
        output: PathBuf,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn split(
    file: String,
    output: PathBuf,
    params: Option<PathBuf>,
    no_paper_id: bool,
    remote: bool,
    keep_pages: bool,
) -> Result<()> {
    let source = if remote {
        SourceLocation::Remote(file.clone())
    } else {
        SourceLocation::Local(PathBuf::from(&file))
    };

    let mut config = SplitConfig::new(source);
    config.output_dir = output;
    config.keep_pages = keep_pages;
    if let Some(path) = &params {
        config.params = SplitParams::from_json_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?;
    }
    if no_paper_id {
        config.params.include_paper_id = false;
    }

    debug!(?config, "starting split");
    let report = run(&config).with_context(|| format!("splitting {file}"))?;
    for path in &report.questions {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Command::Split {
            file,
            output,
            params,
            no_paper_id,
            remote,
            keep_pages,
        } => split(file, output, params, no_paper_id, remote, keep_pages),
        Command::List { output } => {
            let files = list_questions(&output)
                .with_context(|| format!("listing {}", output.display()))?;
            for path in files {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}
