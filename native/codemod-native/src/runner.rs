//! Batch application over files and directories.
//!
//! Each file is transformed on its own; a failure in one file is logged and
//! recorded, and the rest of the batch carries on.

use crate::binding::BindingReport;
use crate::error::{Result, TransformError};
use crate::options::TransformOptions;
use crate::transform::transform_file_source;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub extensions: Vec<String>,
    /// Paths containing any of these substrings are skipped.
    pub ignore_patterns: Vec<String>,
    pub dry_run: bool,
    pub options: TransformOptions,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: vec!["node_modules".to_string()],
            dry_run: false,
            options: TransformOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Changed,
    Unchanged,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingReport>,
    /// Transformed text, kept only when the caller asks for it.
    #[serde(skip)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl FileReport {
    fn failed(path: PathBuf, err: &TransformError) -> Self {
        Self {
            path,
            status: FileStatus::Failed,
            error_code: Some(err.code().to_string()),
            error: Some(err.to_string()),
            bindings: Vec::new(),
            output: None,
        }
    }
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Expands `roots` into the list of candidate files, sorted and deduplicated.
pub fn collect_files(roots: &[PathBuf], config: &RunnerConfig) -> Vec<PathBuf> {
    collect(roots, config).0
}

/// Candidate files plus a failed report for every root that cannot be walked.
fn collect(roots: &[PathBuf], config: &RunnerConfig) -> (Vec<PathBuf>, Vec<FileReport>) {
    let mut files = Vec::new();
    let mut unreadable = Vec::new();
    for root in roots {
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let err = TransformError::Io {
                        path: root.clone(),
                        source: e.into(),
                    };
                    tracing::error!(path = %root.display(), code = err.code(), "{}", err);
                    unreadable.push(FileReport::failed(root.clone(), &err));
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_candidate(path, config) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    (files, unreadable)
}

fn is_candidate(path: &Path, config: &RunnerConfig) -> bool {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.extensions.iter().any(|e| e == ext));
    if !has_extension {
        return false;
    }
    let display = path.to_string_lossy();
    !config
        .ignore_patterns
        .iter()
        .any(|pattern| display.contains(pattern.as_str()))
}

/// Transforms one file, writing it back unless this is a dry run.
pub fn run_file(path: &Path, config: &RunnerConfig) -> Result<(bool, Vec<BindingReport>, String)> {
    let source = fs::read_to_string(path).map_err(|source| TransformError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let output = transform_file_source(path, &source, &config.options)?;
    if output.changed && !config.dry_run {
        fs::write(path, &output.code).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok((output.changed, output.bindings, output.code))
}

/// Runs the transform over every candidate under `roots` in parallel.
///
/// Reports come back in path order regardless of scheduling.
pub fn run(roots: &[PathBuf], config: &RunnerConfig, keep_output: bool) -> RunSummary {
    let (files, unreadable) = collect(roots, config);
    tracing::debug!(files = files.len(), "collected candidate files");

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| match run_file(path, config) {
            Ok((changed, bindings, code)) => FileReport {
                path: path.clone(),
                status: if changed {
                    FileStatus::Changed
                } else {
                    FileStatus::Unchanged
                },
                error_code: None,
                error: None,
                bindings,
                output: keep_output.then_some(code),
            },
            Err(e) => {
                tracing::error!(path = %path.display(), code = e.code(), "{}", e);
                FileReport::failed(path.clone(), &e)
            }
        })
        .collect();
    reports.extend(unreadable);

    let mut summary = RunSummary::default();
    for report in &reports {
        match report.status {
            FileStatus::Changed => summary.changed += 1,
            FileStatus::Unchanged => summary.unchanged += 1,
            FileStatus::Failed => summary.failed += 1,
        }
    }
    summary.files = reports;
    summary
}
