use anyhow::{Context, Result};
use astscope_binder::{AnalyzerOptions, LexicalScopeMode};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "astscope.json";

/// Pattern used when neither the command line nor the config names one.
pub const DEFAULT_INCLUDE: &str = "**/*.json";

/// Contents of `astscope.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub analyzer: AnalyzerOptions,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

/// Options and file filter after merging the config file with CLI flags.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: AnalyzerOptions,
    pub filter: PathFilter,
}

pub fn parse_config(source: &str) -> Result<ProjectConfig> {
    serde_json::from_str(source).context("invalid astscope.json")
}

pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Config file named by `--config`, else `astscope.json` in `cwd` if it
/// exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => Some(cwd.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
    }
}

/// Merge the project config with CLI flags. Non-empty CLI lists replace the
/// config's lists; `--fold-lexical-scopes` forces fold mode.
pub fn resolve(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let config = match find_config(args, cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading config");
            load_config(&path)?
        }
        None => ProjectConfig::default(),
    };
    resolve_with(args, config)
}

pub fn resolve_with(args: &CliArgs, config: ProjectConfig) -> Result<ResolvedConfig> {
    let mut options = config.analyzer;
    if args.fold_lexical_scopes {
        options = options.with_lexical_scopes(LexicalScopeMode::Fold);
    }

    let include = if args.include.is_empty() {
        config
            .include
            .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()])
    } else {
        args.include.clone()
    };
    let exclude = if args.exclude.is_empty() {
        config.exclude.unwrap_or_default()
    } else {
        args.exclude.clone()
    };

    Ok(ResolvedConfig {
        options,
        filter: PathFilter::new(&include, &exclude)?,
    })
}

/// Include/exclude globs applied to paths relative to a walked directory.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(PathFilter {
            include: build_glob_set(include)?,
            exclude: build_glob_set(exclude)?,
        })
    }

    pub fn is_match(&self, relative: &Path) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile glob patterns")
}
