use crate::options::{PrefixOptions, SourceOptions};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use headline_core::record::{to_json_line, transform_with, EmptyInputPolicy};
use headline_core::stats::RunStats;
use headline_core::{InputRecord, QuestionExtractor};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, clap::Args)]
pub struct BuildOptions {
    #[command(flatten)]
    pub source: SourceOptions,

    #[command(flatten)]
    pub prefixes: PrefixOptions,

    /// Output JSON Lines file
    #[arg(
        short,
        long,
        env = "HEADLINE_OUTPUT",
        default_value = "headline_test.jsonl"
    )]
    pub output: PathBuf,

    /// Abort on samples whose input text is blank instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn run(options: BuildOptions, global: crate::Global) -> Result<()> {
    let start = Instant::now();

    let extractor = options.prefixes.extractor()?;
    let policy = if options.strict {
        EmptyInputPolicy::Abort
    } else {
        EmptyInputPolicy::Skip
    };

    if global.verbose {
        println!("{}: {}", "Source".green(), options.source.describe());
        println!("{}: {}", "Output".green(), options.output.display());
        println!("{}: {:?}", "Prefixes".green(), options.prefixes.config().prefixes);
        println!("{}: {:?}", "Empty input".green(), policy);
        println!();
    }

    let fetch_progress = new_progress(options.quiet, "{spinner:.cyan} {msg} {pos}/{len}")?;
    let records = crate::source::load_records(&options.source, Some(&fetch_progress)).await?;
    fetch_progress.finish_and_clear();

    let progress = new_progress(
        options.quiet,
        "{spinner:.cyan} processing [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )?;
    progress.set_length(records.len() as u64);

    let stats = write_atomically(&options.output, |writer| {
        convert(&records, &extractor, policy, writer, &progress)
    })?;
    progress.finish_and_clear();

    let resolved = std::fs::canonicalize(&options.output).unwrap_or(options.output.clone());
    crate::report::print_summary(&stats, start.elapsed(), &resolved);

    Ok(())
}

fn new_progress(quiet: bool, template: &str) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let style = ProgressStyle::with_template(template)
        .map_err(|e| eyre!("Invalid progress template: {}", e))?
        .progress_chars("=> ");

    let progress = ProgressBar::new(0);
    progress.set_style(style);
    progress.enable_steady_tick(std::time::Duration::from_millis(100));

    Ok(progress)
}

/// Transform `records` in order and write one JSON line per record.
///
/// Blank samples are skipped or fatal according to `policy`; any other
/// transform failure aborts immediately.
pub fn convert<W: Write>(
    records: &[InputRecord],
    extractor: &QuestionExtractor,
    policy: EmptyInputPolicy,
    writer: &mut W,
    progress: &ProgressBar,
) -> Result<RunStats> {
    let mut stats = RunStats::default();

    for record in records {
        match transform_with(record, extractor) {
            Ok(output) => {
                let line = to_json_line(&output)?;
                writeln!(writer, "{line}").context("Failed to write output record")?;
                stats.record_written(&output);
            }
            Err(err) if policy.skips(&err) => {
                log::warn!("Skipping sample: {err}");
                progress.suspend(|| eprintln!("{} {}", "skipped:".yellow(), err));
                stats.record_skipped();
            }
            Err(err) => return Err(eyre!(err)),
        }
        progress.inc(1);
    }

    Ok(stats)
}

/// Run `write` against a temporary file next to `path` and move it into
/// place only if `write` succeeds. A failed run leaves no output file behind.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut std::fs::File>) -> Result<T>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    let value = {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let value = write(&mut writer)?;
        writer.flush().context("Failed to flush output")?;
        value
    };

    tmp.persist(path)
        .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e.error))?;

    Ok(value)
}
