//! Command envelope for split, extract and rotate requests
//!
//! A [`PageCommand`] carries the source file and the user's page text. Running
//! it with [`execute`] yields named output files ready to be written or
//! downloaded.

use std::path::Path;
use std::time::Instant;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::document::PaginatedDocument;
use crate::error::PageRangeError;
use crate::pdf::PdfDocument;
use crate::range::{parse_ranges, parse_selection, PageSelection};
use crate::split::{apply_to_document, extract_selection, generate_equal_split};
use crate::transform::{rotate_pages, Rotation};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum PageCommand {
    /// One output per range, e.g. `"1-3, 4-10"`
    Split {
        file_name: String,
        file: Vec<u8>,
        ranges: String,
    },
    /// Consecutive chunks of `pages_per_chunk` pages
    SplitEvery {
        file_name: String,
        file: Vec<u8>,
        pages_per_chunk: u32,
    },
    /// Selected pages copied into a single output
    Extract {
        file_name: String,
        file: Vec<u8>,
        pages: String,
    },
    /// Rotate the selected pages, or every page when `pages` is absent
    Rotate {
        file_name: String,
        file: Vec<u8>,
        #[serde(default)]
        pages: Option<String>,
        degrees: i32,
    },
}

impl PageCommand {
    fn source(&self) -> (&str, &[u8]) {
        match self {
            PageCommand::Split {
                file_name, file, ..
            }
            | PageCommand::SplitEvery {
                file_name, file, ..
            }
            | PageCommand::Extract {
                file_name, file, ..
            }
            | PageCommand::Rotate {
                file_name, file, ..
            } => (file_name.as_str(), file.as_slice()),
        }
    }
}

/// Suffixes used to name output files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// `{stem}_{split_suffix}{n}.pdf`
    pub split_suffix: String,
    /// `{stem}_{extract_suffix}.pdf`
    pub extract_suffix: String,
    /// `{stem}_{rotate_suffix}.pdf`
    pub rotate_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            split_suffix: "parte".to_string(),
            extract_suffix: "paginas".to_string(),
            rotate_suffix: "rotado".to_string(),
        }
    }
}

impl NamingConfig {
    /// Name of the `part`-th split output (1-based).
    pub fn split_name(&self, source: &str, part: usize) -> String {
        format!("{}_{}{}.pdf", file_stem(source), self.split_suffix, part)
    }

    pub fn extract_name(&self, source: &str) -> String {
        format!("{}_{}.pdf", file_stem(source), self.extract_suffix)
    }

    pub fn rotate_name(&self, source: &str) -> String {
        format!("{}_{}.pdf", file_stem(source), self.rotate_suffix)
    }
}

fn file_stem(source: &str) -> &str {
    Path::new(source)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("document")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessMetrics {
    pub input_size_bytes: usize,
    pub output_size_bytes: usize,
    pub page_count: u32,
    pub output_count: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub files: Vec<OutputFile>,
    pub metrics: ProcessMetrics,
}

/// Run a command against its PDF.
///
/// Page text is parsed and validated before any output is produced.
pub fn execute(
    command: &PageCommand,
    naming: &NamingConfig,
) -> Result<CommandOutput, PageRangeError> {
    let started = Instant::now();
    let (file_name, bytes) = command.source();
    let mut doc = PdfDocument::load(bytes)?;
    let page_count = doc.page_count();

    let files = match command {
        PageCommand::Split { ranges, .. } => {
            let ranges = parse_ranges(ranges)?;
            save_parts(apply_to_document(&doc, &ranges)?, file_name, naming)?
        }
        PageCommand::SplitEvery {
            pages_per_chunk, ..
        } => {
            let ranges = generate_equal_split(page_count, *pages_per_chunk)?;
            save_parts(apply_to_document(&doc, &ranges)?, file_name, naming)?
        }
        PageCommand::Extract { pages, .. } => {
            let selection = parse_selection(pages)?;
            let mut extracted = extract_selection(&doc, &selection)?;
            vec![OutputFile {
                file_name: naming.extract_name(file_name),
                bytes: extracted.save()?,
            }]
        }
        PageCommand::Rotate { pages, degrees, .. } => {
            let delta = Rotation::new(*degrees)?;
            let selection = match pages {
                Some(pages) => parse_selection(pages)?,
                None => PageSelection::all(page_count),
            };
            rotate_pages(&mut doc, &selection, delta)?;
            vec![OutputFile {
                file_name: naming.rotate_name(file_name),
                bytes: doc.save()?,
            }]
        }
    };

    let metrics = ProcessMetrics {
        input_size_bytes: bytes.len(),
        output_size_bytes: files.iter().map(|f| f.bytes.len()).sum(),
        page_count,
        output_count: files.len(),
        processing_time_ms: started.elapsed().as_millis() as u64,
    };
    tracing::debug!(
        source = file_name,
        outputs = metrics.output_count,
        elapsed_ms = metrics.processing_time_ms,
        "command finished"
    );

    Ok(CommandOutput { files, metrics })
}

fn save_parts(
    parts: Vec<PdfDocument>,
    source: &str,
    naming: &NamingConfig,
) -> Result<Vec<OutputFile>, PageRangeError> {
    parts
        .into_iter()
        .enumerate()
        .map(|(i, mut part)| -> Result<OutputFile, PageRangeError> {
            Ok(OutputFile {
                file_name: naming.split_name(source, i + 1),
                bytes: part.save()?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct EncodedFile {
    pub file_name: String,
    /// Base64-encoded PDF data
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub success: bool,
    pub outputs: Vec<EncodedFile>,
    pub error: Option<String>,
    pub metrics: Option<ProcessMetrics>,
}

impl ProcessResult {
    pub fn from_outcome(outcome: Result<CommandOutput, PageRangeError>) -> Self {
        match outcome {
            Ok(output) => Self {
                success: true,
                outputs: output
                    .files
                    .iter()
                    .map(|f| EncodedFile {
                        file_name: f.file_name.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(&f.bytes),
                    })
                    .collect(),
                error: None,
                metrics: Some(output.metrics),
            },
            Err(e) => Self {
                success: false,
                outputs: Vec::new(),
                error: Some(e.to_string()),
                metrics: None,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, PageRangeError> {
        serde_json::to_string(self).map_err(|e| PageRangeError::Serialization(e.to_string()))
    }
}
