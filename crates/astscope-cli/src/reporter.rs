use anyhow::Result;
use astscope_binder::{ScopeReport, VariableReport};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

use crate::driver::AnalyzedFile;

pub struct Reporter {
    color: bool,
}

/// One entry of the JSON report.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a ScopeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Text report: one indented scope tree per file, failures inline.
    pub fn render_text(&self, files: &[AnalyzedFile]) -> String {
        let mut out = String::new();
        for (index, file) in files.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            let path = file.path.display().to_string();
            match &file.result {
                Ok(scope) => {
                    let _ = writeln!(out, "{}", self.paint_path(&path));
                    self.render_scope(&mut out, scope, 1);
                }
                Err(err) => {
                    let _ = writeln!(out, "{} - {}: {err:#}", path, self.paint_error("error"));
                }
            }
        }
        out
    }

    /// JSON array of `{ path, scope }` or `{ path, error }` objects.
    pub fn render_json(&self, files: &[AnalyzedFile]) -> Result<String> {
        let entries: Vec<FileEntry<'_>> = files
            .iter()
            .map(|file| FileEntry {
                path: file.path.display().to_string(),
                scope: file.result.as_ref().ok(),
                error: file.result.as_ref().err().map(|err| format!("{err:#}")),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// `N files analyzed, M failed`.
    pub fn render_summary(&self, files: &[AnalyzedFile]) -> String {
        let failed = files.iter().filter(|file| !file.is_ok()).count();
        let analyzed = plural(files.len(), "file");
        if failed == 0 {
            return format!("{analyzed} analyzed");
        }
        let failed = format!("{failed} failed");
        format!("{analyzed} analyzed, {}", self.paint_error(&failed))
    }

    fn render_scope(&self, out: &mut String, scope: &ScopeReport, depth: usize) {
        let indent = "  ".repeat(depth);
        let mut header = scope.kind.to_string();
        if let Some(node_type) = scope.node_type {
            match scope.span {
                Some(span) => {
                    let _ = write!(header, " ({node_type} {span})");
                }
                None => {
                    let _ = write!(header, " ({node_type})");
                }
            }
        }
        let _ = writeln!(
            out,
            "{indent}{}: {}, {}",
            self.paint_kind(&header),
            plural(scope.assignments, "assignment"),
            plural(scope.references, "reference"),
        );

        for variable in &scope.variables {
            self.render_variable(out, variable, depth + 1, false);
        }
        for variable in &scope.unscoped_variables {
            self.render_variable(out, variable, depth + 1, true);
        }
        for child in &scope.children {
            self.render_scope(out, child, depth + 1);
        }
    }

    fn render_variable(&self, out: &mut String, variable: &VariableReport, depth: usize, unscoped: bool) {
        let indent = "  ".repeat(depth);
        let name = if unscoped {
            self.paint_unscoped(&format!("unscoped {}", variable.name))
        } else {
            self.paint_name(&variable.name)
        };
        let implicit = if variable.implicit { " (implicit)" } else { "" };
        let _ = writeln!(
            out,
            "{indent}{name}{implicit}: {}, {}",
            plural(variable.declarations, "declaration"),
            plural(variable.references, "reference"),
        );
        for source in &variable.assignments {
            let _ = writeln!(out, "{indent}  {source}");
        }
    }

    fn paint_path(&self, text: &str) -> String {
        if self.color {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_kind(&self, text: &str) -> String {
        if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_name(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_unscoped(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
