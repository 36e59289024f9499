//! Data models for conversion runs.

mod jobs;

pub use jobs::{ConversionJob, JobPosition, RunCounters, RunSummary};
