use crate::analysis::ReportRow;
use chrono::NaiveDate;
use rust_embed::RustEmbed;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

pub const TABLE_PLACEHOLDER: &str = "$table_json";

const BUILTIN_TEMPLATE: &str = "report.html";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct ReportTemplates;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read report template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("built-in report template is missing or not UTF-8")]
    BuiltinTemplate,

    #[error("report template has no $table_json placeholder")]
    MissingPlaceholder,

    #[error("failed to serialize report rows: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Template text from `path`, or the built-in template when no path is configured.
pub fn load_template(path: Option<&Path>) -> Result<String, RenderError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| RenderError::ReadTemplate {
            path: path.to_path_buf(),
            source: e,
        }),
        None => builtin_template(),
    }
}

fn builtin_template() -> Result<String, RenderError> {
    let file = ReportTemplates::get(BUILTIN_TEMPLATE).ok_or(RenderError::BuiltinTemplate)?;
    let s = std::str::from_utf8(file.data.as_ref()).map_err(|_| RenderError::BuiltinTemplate)?;
    Ok(s.to_owned())
}

/// Embed the rows as a JSON array in place of every `$table_json`.
///
/// URLs come from client requests, so `<`, `>` and `&` are written as JSON
/// unicode escapes. The array still reads back to the same strings, but it
/// can never close the `<script>` element it is embedded in.
pub fn render_report(rows: &[ReportRow], template: &str) -> Result<String, RenderError> {
    if !template.contains(TABLE_PLACEHOLDER) {
        return Err(RenderError::MissingPlaceholder);
    }

    let table_json = escape_script_json(&serde_json::to_string(rows)?);
    Ok(template.replace(TABLE_PLACEHOLDER, &table_json))
}

fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}

/// `report_YYYY.MM.DD.html` inside `report_dir`.
pub fn report_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!("report_{}.html", date.format("%Y.%m.%d")))
}

/// Write the rendered report for `date`, creating `report_dir` if needed.
///
/// The report is written to a temporary file next to its destination and
/// then renamed, so a failed run never leaves a partial report behind.
pub fn write_report(report_dir: &Path, date: NaiveDate, html: &str) -> Result<PathBuf, RenderError> {
    let path = report_path(report_dir, date);
    let write_err = |e| RenderError::Write {
        path: path.clone(),
        source: e,
    };

    fs::create_dir_all(report_dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(report_dir).map_err(write_err)?;
    tmp.write_all(html.as_bytes()).map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;

    Ok(path)
}
