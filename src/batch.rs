//! Batch processing of PDF directories.
//!
//! Each document is fully owned by one worker; failures are captured per
//! document and never abort siblings.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::parser::ExtractOptions;
use crate::render::{to_json, JsonFormat};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Artifacts written, one per successfully processed document
    pub processed: Vec<PathBuf>,
    /// Documents that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    /// Number of documents processed successfully.
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Number of documents that failed.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Whether every document was processed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process every PDF in `in_dir` into a JSON artifact in `out_dir`.
///
/// Files are discovered by `.pdf` extension (case-insensitive) and
/// processed in sorted order; each document yields
/// `<out_dir>/<stem>.json`. A failing document is logged, recorded in the
/// summary and skipped — it never affects the rest of the batch.
pub fn process_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    in_dir: P,
    out_dir: Q,
    options: &ExtractOptions,
) -> Result<BatchSummary> {
    let in_dir = in_dir.as_ref();
    let out_dir = out_dir.as_ref();

    let entries = fs::read_dir(in_dir)
        .map_err(|e| Error::InvalidInputDir(format!("{}: {}", in_dir.display(), e)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    fs::create_dir_all(out_dir)?;

    let run_one = |path: &PathBuf| -> Result<PathBuf> {
        let content = crate::extract_file_with_options(path, options.clone())?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let out_path = out_dir.join(format!("{stem}.json"));
        fs::write(&out_path, to_json(&content, JsonFormat::Pretty)?)?;
        log::info!("Processed {}", path.display());
        Ok(out_path)
    };

    let results: Vec<(PathBuf, Result<PathBuf>)> = if options.parallel {
        files
            .par_iter()
            .map(|path| (path.clone(), run_one(path)))
            .collect()
    } else {
        files
            .iter()
            .map(|path| (path.clone(), run_one(path)))
            .collect()
    };

    let mut summary = BatchSummary::default();
    for (path, result) in results {
        match result {
            Ok(out_path) => summary.processed.push(out_path),
            Err(e) => {
                log::error!("Skipping {}: {}", path.display(), e);
                summary.failed.push((path, e.to_string()));
            }
        }
    }

    Ok(summary)
}
