use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use regroup_core::report::{generate_json_dump, generate_summary, save_table};
use regroup_core::walk::{RunSummary, WalkProgress, WalkProgressCallback, execute_grouping};
use regroup_core::SignalIndex;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Options for a single grouping run
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOptions {
    pub directory: PathBuf,
    pub csv: PathBuf,
    pub quiet: bool,
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct GroupOutcome {
    pub index: SignalIndex,
    pub summary: RunSummary,
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

impl GroupOptions {
    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        let directory = args
            .get_one::<String>("directory")
            .context("--directory is required")?;
        let csv = args.get_one::<String>("csv").context("--csv is required")?;

        Ok(Self {
            directory: expand_path(directory),
            csv: expand_path(csv),
            quiet: args.get_flag("quiet"),
        })
    }
}

/// Log level used when `RUST_LOG` is not set
pub fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Initialise tracing on stderr. `RUST_LOG` wins over the verbose flag.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    // A subscriber may already be installed (tests), which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Group every report page in the directory and write the CSV table.
///
/// Nothing is written when the directory is missing.
pub fn run_grouping(
    options: &GroupOptions,
    progress_callback: Option<WalkProgressCallback>,
) -> Result<GroupOutcome> {
    let mut index = SignalIndex::new();
    let summary = execute_grouping(&options.directory, &mut index, progress_callback)?;

    save_table(&index, &options.csv)?;
    info!("Wrote {} row(s) to {}", index.len(), options.csv.display());

    Ok(GroupOutcome { index, summary })
}

fn progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

fn progress_callback(pb: ProgressBar) -> WalkProgressCallback {
    Arc::new(move |event: WalkProgress| match event {
        WalkProgress::Started { total } => {
            pb.set_length(total as u64);
            pb.set_message("parsing reports...");
        }
        WalkProgress::Parsed { path, .. } => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(name);
            pb.inc(1);
        }
        WalkProgress::Skipped { path, reason } => {
            pb.println(format!(
                "{} Skipping {} ({})",
                "⚠".yellow().bold(),
                path.display(),
                reason
            ));
            pb.inc(1);
        }
    })
}

pub fn handle_group(args: &ArgMatches) -> Result<()> {
    let stdout = io::stdout();
    handle_group_to(args, &mut stdout.lock())
}

/// Run the grouping command, writing the JSON dump and the CSV confirmation
/// line to `out`. Progress and the summary go to stderr.
pub fn handle_group_to<W: Write>(args: &ArgMatches, out: &mut W) -> Result<()> {
    let options = GroupOptions::from_matches(args)?;

    if !options.quiet {
        eprintln!(
            "{} Reports: {}",
            "→".blue(),
            options.directory.display().to_string().bright_white()
        );
        eprintln!(
            "{} Output:  {}",
            "→".blue(),
            options.csv.display().to_string().bright_white()
        );
        eprintln!();
    }

    let pb = progress_bar(options.quiet)?;
    let result = run_grouping(&options, Some(progress_callback(pb.clone())));
    pb.finish_and_clear();
    let outcome = result?;

    if !options.quiet {
        let dump = generate_json_dump(&outcome.index).context("Failed to render JSON dump")?;
        writeln!(out, "{}", dump)?;
        eprint!("{}", generate_summary(&outcome.summary, &outcome.index));
    }

    writeln!(out, "CSV file '{}' has been created.", options.csv.display())?;
    eprintln!("{} Grouping complete!", "✓".green().bold());
    Ok(())
}
