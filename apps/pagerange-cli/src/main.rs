//! `pagerange` command-line tool
//!
//! Split, extract and rotate PDF pages using page range text like `1-3, 5`.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pagerange_core::PageCommand;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "pagerange")]
#[command(version, about = "Split, extract and rotate PDF pages by page range")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for output files
    #[arg(short, long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show page count, version and page rotations
    Info { file: PathBuf },

    /// Split into one file per range, or into equal chunks
    Split {
        file: PathBuf,

        /// Ranges such as "1-3, 4-10"; one output per range
        #[arg(long, conflicts_with = "every", required_unless_present = "every")]
        ranges: Option<String>,

        /// Pages per output file
        #[arg(long)]
        every: Option<u32>,
    },

    /// Copy selected pages into a single file
    Extract {
        file: PathBuf,

        /// Pages such as "1, 3, 5-7"
        #[arg(long)]
        pages: String,
    },

    /// Rotate pages clockwise by a multiple of 90 degrees
    Rotate {
        file: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        degrees: i32,

        /// Pages to rotate; all pages when omitted
        #[arg(long)]
        pages: Option<String>,
    },

    /// Execute a JSON command and print the result as JSON
    Run { command_file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    // stdout carries results, logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("pagerange v{}", env!("CARGO_PKG_VERSION"));

    let out_dir = args.out_dir.as_deref();
    match args.command {
        Command::Info { file } => commands::info(&file)?,
        Command::Split {
            file,
            ranges,
            every,
        } => commands::run_on_file(&file, out_dir, &config, |file_name, bytes| {
            match every {
                Some(pages_per_chunk) => PageCommand::SplitEvery {
                    file_name,
                    file: bytes,
                    pages_per_chunk,
                },
                None => PageCommand::Split {
                    file_name,
                    file: bytes,
                    ranges: ranges.unwrap_or_default(),
                },
            }
        })?,
        Command::Extract { file, pages } => {
            commands::run_on_file(&file, out_dir, &config, |file_name, bytes| {
                PageCommand::Extract {
                    file_name,
                    file: bytes,
                    pages,
                }
            })?
        }
        Command::Rotate {
            file,
            degrees,
            pages,
        } => commands::run_on_file(&file, out_dir, &config, |file_name, bytes| {
            PageCommand::Rotate {
                file_name,
                file: bytes,
                pages,
                degrees,
            }
        })?,
        Command::Run { command_file } => {
            if !commands::run_json(&command_file, &config)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
