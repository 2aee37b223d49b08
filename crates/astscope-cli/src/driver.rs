use anyhow::{Context, Result, bail};
use astscope_ast::from_json_str;
use astscope_binder::{Analyzer, AnalyzerOptions, ScopeReport};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{CONFIG_FILE_NAME, PathFilter};

/// Outcome of analyzing one file.
#[derive(Debug)]
pub struct AnalyzedFile {
    pub path: PathBuf,
    pub result: Result<ScopeReport>,
}

impl AnalyzedFile {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Expand `paths` into the list of files to analyze.
///
/// Files named explicitly are always kept. Directories are walked in file
/// name order and filtered by `filter` against paths relative to the
/// directory; config files are skipped.
pub fn discover_files(paths: &[PathBuf], filter: &PathFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(error = %err, "Skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() || entry.file_name() == CONFIG_FILE_NAME {
                    continue;
                }
                let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
                if filter.is_match(relative) {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("no such file or directory: {}", path.display());
        }
    }

    debug!(count = files.len(), "Discovered input files");
    Ok(files)
}

/// Read, lower and analyze one ESTree JSON file.
pub fn analyze_file(path: &Path, options: AnalyzerOptions) -> Result<ScopeReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let (arena, root) =
        from_json_str(&text).with_context(|| format!("failed to load ESTree from {}", path.display()))?;
    let tree = Analyzer::with_options(options)
        .analyze(&arena, root)
        .with_context(|| format!("failed to analyze {}", path.display()))?;
    Ok(ScopeReport::from_tree(&arena, &tree))
}

/// Analyze `files` in parallel. Results keep the input order.
pub fn analyze_files(files: &[PathBuf], options: AnalyzerOptions) -> Vec<AnalyzedFile> {
    files
        .par_iter()
        .map(|path| AnalyzedFile {
            path: path.clone(),
            result: analyze_file(path, options),
        })
        .collect()
}

/// Like `analyze_files`, on a dedicated pool of `jobs` threads when given.
pub fn run(files: &[PathBuf], options: AnalyzerOptions, jobs: Option<usize>) -> Result<Vec<AnalyzedFile>> {
    let Some(jobs) = jobs else {
        return Ok(analyze_files(files, options));
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("failed to start worker threads")?;
    Ok(pool.install(|| analyze_files(files, options)))
}
