//! Subcommand handlers
//!
//! Each handler reads the input file, runs a [`PageCommand`] and writes the
//! outputs next to the input (or into the configured directory).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use pagerange_core::command::{execute, CommandOutput, OutputFile};
use pagerange_core::validation::{has_pdf_extension, inspect_pdf, looks_like_pdf};
use pagerange_core::{PageCommand, ProcessResult};

use crate::config::Config;

/// Input file name and bytes, rejected early when they are clearly not a PDF.
fn read_pdf(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !looks_like_pdf(&bytes) {
        if has_pdf_extension(&file_name) {
            bail!("{} has a .pdf name but no PDF header", path.display());
        }
        bail!("{} is not a PDF file", path.display());
    }

    Ok((file_name, bytes))
}

/// Where outputs go: `--out-dir`, then the config file, then the input's directory.
pub fn output_dir(input: &Path, flag: Option<&Path>, config: &Config) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.output.dir.clone())
        .or_else(|| {
            input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn write_outputs(dir: &Path, files: &[OutputFile]) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    files
        .iter()
        .map(|file| -> anyhow::Result<PathBuf> {
            let path = dir.join(&file.file_name);
            fs::write(&path, &file.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = file.bytes.len(), "wrote output");
            Ok(path)
        })
        .collect()
}

pub fn info(input: &Path) -> anyhow::Result<()> {
    let (_, bytes) = read_pdf(input)?;
    let summary = inspect_pdf(&bytes)
        .with_context(|| format!("Failed to inspect {}", input.display()))?;

    println!("{}", input.display());
    println!("  version:   {}", summary.version);
    println!("  pages:     {}", summary.page_count);
    println!("  encrypted: {}", summary.encrypted);
    println!("  size:      {} bytes", summary.size_bytes);
    for (i, rotation) in summary.rotations.iter().enumerate() {
        if *rotation != 0 {
            println!("  page {} rotated {}°", i + 1, rotation);
        }
    }
    Ok(())
}

/// Build a command from the input file, run it and write its outputs.
pub fn run_on_file<F>(
    input: &Path,
    out_dir: Option<&Path>,
    config: &Config,
    build: F,
) -> anyhow::Result<()>
where
    F: FnOnce(String, Vec<u8>) -> PageCommand,
{
    let (file_name, bytes) = read_pdf(input)?;
    let command = build(file_name, bytes);

    let CommandOutput { files, metrics } = execute(&command, &config.naming)
        .with_context(|| format!("Failed to process {}", input.display()))?;
    tracing::info!(
        pages = metrics.page_count,
        outputs = metrics.output_count,
        elapsed_ms = metrics.processing_time_ms,
        "processed {}",
        input.display()
    );

    let dir = output_dir(input, out_dir, config);
    for path in write_outputs(&dir, &files)? {
        println!("{}", path.display());
    }
    Ok(())
}

/// Run a JSON-encoded [`PageCommand`] and print a [`ProcessResult`].
///
/// Returns whether the command succeeded.
pub fn run_json(command_file: &Path, config: &Config) -> anyhow::Result<bool> {
    let json = fs::read_to_string(command_file)
        .with_context(|| format!("Failed to read {}", command_file.display()))?;
    let command: PageCommand = serde_json::from_str(&json)
        .with_context(|| format!("Invalid command in {}", command_file.display()))?;

    let result = ProcessResult::from_outcome(execute(&command, &config.naming));
    if let Some(error) = &result.error {
        tracing::warn!(%error, "command failed");
    }
    println!("{}", result.to_json()?);
    Ok(result.success)
}
