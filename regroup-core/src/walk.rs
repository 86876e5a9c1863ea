use crate::error::{CoreError, Result};
use crate::index::SignalIndex;
use regroup_scanner::Extractor;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Extension of the report pages picked up from the input directory
pub const REPORT_EXTENSION: &str = ".html";

/// Progress notification emitted once per input file
#[derive(Debug, Clone)]
pub enum WalkProgress {
    /// Input files found, before any are read
    Started { total: usize },
    /// A file was parsed and `triples` associations recorded
    Parsed { path: PathBuf, triples: usize },
    /// A file could not be read and was left out
    Skipped { path: PathBuf, reason: String },
}

/// Callback for reporting walk progress
pub type WalkProgressCallback = Arc<dyn Fn(WalkProgress) + Send + Sync>;

/// Outcome of one grouping run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: Vec<(PathBuf, String)>,
    pub triples: usize,
}

/// List the report pages directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn collect_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CoreError::DirectoryNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| CoreError::FileRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(REPORT_EXTENSION))
        })
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read one report page. Invalid UTF-8 is replaced rather than rejected.
pub fn read_report(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extract every report page in `dir` and record the triples into `index`.
///
/// Unreadable files are skipped with a warning and listed in the returned
/// summary; only a missing directory aborts the run.
pub fn execute_grouping(
    dir: &Path,
    index: &mut SignalIndex,
    progress_callback: Option<WalkProgressCallback>,
) -> Result<RunSummary> {
    let files = collect_report_files(dir)?;
    info!("Grouping {} report file(s) from {}", files.len(), dir.display());
    group_files(&files, index, progress_callback)
}

/// Extract and record each file in the given order.
///
/// A file that cannot be read is skipped with a warning and listed in
/// `RunSummary::files_skipped`; the remaining files are still processed.
pub fn group_files(
    files: &[PathBuf],
    index: &mut SignalIndex,
    progress_callback: Option<WalkProgressCallback>,
) -> Result<RunSummary> {
    let extractor = Extractor::new()?;
    let notify = |event: WalkProgress| {
        if let Some(ref callback) = progress_callback {
            callback(event);
        }
    };

    notify(WalkProgress::Started { total: files.len() });

    let mut summary = RunSummary::default();
    for path in files {
        let html = match read_report(path) {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                let reason = match e {
                    CoreError::FileRead { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                summary.files_skipped.push((path.clone(), reason.clone()));
                notify(WalkProgress::Skipped {
                    path: path.clone(),
                    reason,
                });
                continue;
            }
        };

        let triples = extractor.extract(&html);
        let recorded = index.merge(&triples);
        debug!("{}: {} triple(s)", path.display(), recorded);

        summary.files_processed += 1;
        summary.triples += recorded;
        notify(WalkProgress::Parsed {
            path: path.clone(),
            triples: recorded,
        });
    }

    info!(
        "Grouping complete: {} parsed, {} skipped, {} associations",
        summary.files_processed,
        summary.files_skipped.len(),
        summary.triples
    );
    Ok(summary)
}
