// Report generation from the signal index

use crate::error::{CoreError, Result};
use crate::index::SignalIndex;
use crate::walk::RunSummary;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const TABLE_HEADER: [&str; 3] = ["Category", "Subcategory", "URL"];
const LINE_TERMINATOR: &str = "\r\n";
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// Write the index as `Category,Subcategory,URL` rows.
///
/// Row order follows the index exactly: kinds, then values within a kind,
/// then URLs, each in insertion order.
pub fn write_table<W: Write>(index: &SignalIndex, writer: &mut W) -> io::Result<()> {
    write_row(writer, &TABLE_HEADER)?;
    for (kind, value, url) in index.rows() {
        write_row(writer, &[kind.as_str(), value, url])?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write the table into it
pub fn save_table(index: &SignalIndex, path: &Path) -> Result<()> {
    let to_error = |source: io::Error| CoreError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_table(index, &mut writer).map_err(to_error)
}

/// Pretty JSON dump of the whole index, four-space indented
pub fn generate_json_dump(index: &SignalIndex) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    index.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Human-readable overview of a run and the clusters it produced
pub fn generate_summary(summary: &RunSummary, index: &SignalIndex) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                           REGROUP CLUSTER SUMMARY\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("Files Parsed:   {}\n", summary.files_processed));
    report.push_str(&format!("Files Skipped:  {}\n", summary.files_skipped.len()));
    report.push_str(&format!("Associations:   {}\n", summary.triples));
    report.push('\n');

    for (path, reason) in &summary.files_skipped {
        report.push_str(&format!("  [SKIPPED] {} ({})\n", path.display(), reason));
    }
    if !summary.files_skipped.is_empty() {
        report.push('\n');
    }

    for (kind, values) in index.iter() {
        let associations: usize = values.values().map(Vec::len).sum();
        report.push_str(RULE);
        report.push_str(&format!(
            "{}  ({} distinct, {} urls)\n",
            kind.as_str().to_uppercase(),
            values.len(),
            associations
        ));
        report.push_str(RULE);

        if values.is_empty() {
            report.push_str("  (empty)\n\n");
            continue;
        }

        for (value, urls) in values {
            let shown = if value.is_empty() { "<empty>" } else { value.as_str() };
            report.push_str(&format!("  [{:>4}] {}\n", urls.len(), shown));
        }
        report.push('\n');
    }

    report
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(LINE_TERMINATOR.as_bytes())
}

/// Quote a field only when it contains a delimiter, quote or line break
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
