//! Pipeline runner.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::config::Settings;
use crate::discovery;
use crate::logging::RunReporter;
use crate::models::{ConversionJob, JobPosition, RunCounters, RunSummary};
use crate::probe;
use crate::tools::{self, Tools};
use crate::transcode;

use super::errors::{JobResult, RunResult};

/// Run the whole pipeline over `root`.
///
/// Returns the run summary; per-file failures are inside it, not in the
/// error channel. `Err` means the run never got going (invalid root,
/// transcoder missing).
pub fn run(root: &Path, settings: &Settings, reporter: &RunReporter) -> RunResult<RunSummary> {
    let tools = tools::verify_tools(&settings.tools)?;

    reporter.message("Scanning...");
    let sources = discovery::locate_source_files(root, settings)?;
    reporter.message(&format!(
        "Found {} .{} files",
        sources.len(),
        settings.conversion.source_extension
    ));

    let total = sources.len();
    let mut counters = RunCounters::new();
    let mut converted_dirs: BTreeSet<PathBuf> = BTreeSet::new();

    if total > 0 {
        reporter.message("Starting conversion process...");
    }

    for (i, source) in sources.into_iter().enumerate() {
        counters.record_seen();
        let position = JobPosition {
            index: i + 1,
            total,
        };
        let job = ConversionJob::from_source(source, &settings.conversion.output_extension);

        reporter.message(&format!(
            "{} Starting conversion for {}",
            position.label(),
            job.source.display()
        ));

        let total_frames = estimate_frames(&tools, &job.source);

        match convert_and_archive(&tools, &job, position, total_frames, settings, reporter) {
            Ok(_archived) => {
                counters.record_converted();
                converted_dirs.insert(job.directory().to_path_buf());
            }
            Err(e) => {
                reporter.message(&format!(
                    "{} Failed {}: {}",
                    position.label(),
                    job.source.display(),
                    e
                ));
                counters.record_failed(&job.source);
            }
        }
    }

    for dir in &converted_dirs {
        let moved = archive::archive_sidecars(dir, settings);
        if moved > 0 {
            reporter.message(&format!(
                "Archived {} sidecar files in '{}'",
                moved,
                dir.display()
            ));
        }
    }

    let summary = counters.into_summary();
    reporter.summary(&summary);
    Ok(summary)
}

/// Probe for the frame count, degrading to indeterminate progress on
/// any failure.
fn estimate_frames(tools: &Tools, source: &Path) -> Option<u64> {
    let ffprobe = tools.ffprobe.as_deref()?;
    match probe::estimate_total_frames(ffprobe, source) {
        Ok(frames) => Some(frames),
        Err(e) => {
            tracing::warn!(
                "Probe failed for {}: {}; progress will be indeterminate",
                source.display(),
                e
            );
            None
        }
    }
}

fn convert_and_archive(
    tools: &Tools,
    job: &ConversionJob,
    position: JobPosition,
    total_frames: Option<u64>,
    settings: &Settings,
    reporter: &RunReporter,
) -> JobResult<PathBuf> {
    transcode::convert(&tools.ffmpeg, job, position, total_frames, reporter)?;
    archive::archive_original(&job.source, settings)
}
