//! Conversion job and run bookkeeping types.
//!
//! A `ConversionJob` is the ephemeral pairing of a source path with its
//! derived destination; it exists for one invocation of the transcoder.
//! `RunCounters` is the explicit run context carried through the
//! pipeline - there is no process-wide state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One source file paired with its derived destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    /// Path to the source file.
    pub source: PathBuf,
    /// Destination path: same directory, same base name, new extension.
    pub destination: PathBuf,
}

impl ConversionJob {
    /// Derive a job from a source path.
    ///
    /// The destination always lives next to the source with only the
    /// extension changed.
    pub fn from_source(source: impl Into<PathBuf>, output_extension: &str) -> Self {
        let source = source.into();
        let destination = source.with_extension(output_extension);
        Self {
            source,
            destination,
        }
    }

    /// Directory holding both source and destination.
    pub fn directory(&self) -> &Path {
        self.source.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Position of a job within the run, for `[i/N]` style labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPosition {
    /// 1-based index of the current job.
    pub index: usize,
    /// Total number of jobs in the run.
    pub total: usize,
}

impl JobPosition {
    /// Render as `[i/N]`.
    pub fn label(&self) -> String {
        format!("[{}/{}]", self.index, self.total)
    }
}

/// Mutable counters scoped to a single run.
#[derive(Debug, Default)]
pub struct RunCounters {
    seen: usize,
    converted: usize,
    failed: Vec<PathBuf>,
}

impl RunCounters {
    /// Create counters for a fresh run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a located source file.
    pub fn record_seen(&mut self) {
        self.seen += 1;
    }

    /// Record a successful conversion.
    pub fn record_converted(&mut self) {
        self.converted += 1;
    }

    /// Record a per-file failure with the offending path.
    pub fn record_failed(&mut self, path: impl Into<PathBuf>) {
        self.failed.push(path.into());
    }

    /// Number of files seen so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Number of files converted so far.
    pub fn converted(&self) -> usize {
        self.converted
    }

    /// Final snapshot of the run.
    pub fn into_summary(self) -> RunSummary {
        RunSummary {
            seen: self.seen,
            converted: self.converted,
            failed: self.failed,
        }
    }
}

/// Final result of a run, rendered as "N/M converted".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Total matching files found by the scan.
    pub seen: usize,
    /// Files converted and archived.
    pub converted: usize,
    /// Files that failed conversion or archiving.
    pub failed: Vec<PathBuf>,
}

impl RunSummary {
    /// True when every located file converted.
    pub fn is_complete(&self) -> bool {
        self.converted == self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_stays_in_source_directory() {
        let job = ConversionJob::from_source("/videos/trip/clip1.MOD", "mp4");
        assert_eq!(job.destination, PathBuf::from("/videos/trip/clip1.mp4"));
        assert_eq!(job.directory(), Path::new("/videos/trip"));
    }

    #[test]
    fn destination_keeps_base_name() {
        let job = ConversionJob::from_source("/v/MOV001.mod", "mp4");
        assert_eq!(job.destination.file_name().unwrap(), "MOV001.mp4");
    }

    #[test]
    fn position_label_is_one_based() {
        let pos = JobPosition { index: 1, total: 12 };
        assert_eq!(pos.label(), "[1/12]");
    }

    #[test]
    fn counters_snapshot_into_summary() {
        let mut counters = RunCounters::new();
        counters.record_seen();
        counters.record_seen();
        counters.record_converted();
        counters.record_failed("/v/bad.MOD");

        let summary = counters.into_summary();
        assert_eq!(summary.seen, 2);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, vec![PathBuf::from("/v/bad.MOD")]);
        assert!(!summary.is_complete());
    }
}
