//! External transcoder invocation.
//!
//! One child process at a time: spawn ffmpeg with the fixed argument
//! template, stream its progress, wait for exit, then classify the
//! outcome. Success means zero exit status AND a non-empty destination
//! file; anything else fails the job and removes partial output.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::Instant;

use regex::Regex;

use crate::logging::RunReporter;
use crate::models::{ConversionJob, JobPosition};
use crate::pipeline::{JobError, JobResult};

/// Width of the console progress bar.
const BAR_SLOTS: usize = 20;

fn frame_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"frame=\s*(\d+)").expect("frame regex is valid"))
}

/// Convert one job, blocking until the transcoder exits.
///
/// `total_frames` drives the percentage readout; `None` degrades to a
/// raw frame counter.
pub fn convert(
    ffmpeg: &Path,
    job: &ConversionJob,
    position: JobPosition,
    total_frames: Option<u64>,
    reporter: &RunReporter,
) -> JobResult<()> {
    let started = Instant::now();

    let mut cmd = Command::new(ffmpeg);
    cmd.arg("-hide_banner")
        .arg("-nostats")
        .arg("-loglevel")
        .arg("error")
        .arg("-progress")
        .arg("pipe:1")
        .arg("-y")
        .arg("-i")
        .arg(&job.source)
        .arg(&job.destination);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::debug!("Running transcoder: {:?}", cmd);

    let mut child = cmd.spawn().map_err(|e| JobError::spawn("ffmpeg", e))?;

    // -progress writes frame=N lines to stdout; read until EOF
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            let Some(captures) = frame_regex().captures(&line) else {
                continue;
            };
            let Ok(frame) = captures[1].parse::<u64>() else {
                continue;
            };

            match total_frames {
                Some(total) => {
                    let percent = ((frame as f64 / total as f64) * 100.0).min(100.0);
                    reporter.progress(&format!(
                        "{} Progress on file - {:.2}% - [{}]",
                        position.label(),
                        percent,
                        render_bar(frame, total)
                    ));
                }
                None => {
                    reporter.progress(&format!(
                        "{} Progress on file - frame {}",
                        position.label(),
                        frame
                    ));
                }
            }
        }
    }

    // stderr is tiny under -loglevel error; drain it before reaping
    let mut stderr_text = String::new();
    if let Some(mut stderr) = child.stderr.take() {
        let _ = stderr.read_to_string(&mut stderr_text);
    }

    let status = child
        .wait()
        .map_err(|e| JobError::io("waiting for transcoder", e))?;

    if !status.success() {
        remove_partial_output(&job.destination);
        let message = match stderr_text.trim() {
            "" => "no error output".to_string(),
            text => text.to_string(),
        };
        return Err(JobError::command_failed(
            "ffmpeg",
            status.code().unwrap_or(-1),
            message,
        ));
    }

    match fs::metadata(&job.destination) {
        Err(_) => {
            return Err(JobError::MissingOutput {
                path: job.destination.clone(),
            })
        }
        Ok(meta) if meta.len() == 0 => {
            remove_partial_output(&job.destination);
            return Err(JobError::EmptyOutput {
                path: job.destination.clone(),
            });
        }
        Ok(_) => {}
    }

    reporter.message(&format!(
        "{} Conversion Complete: 100% - Time taken: {:.2} seconds",
        position.label(),
        started.elapsed().as_secs_f64()
    ));

    Ok(())
}

fn render_bar(frame: u64, total: u64) -> String {
    let filled = ((frame.saturating_mul(BAR_SLOTS as u64)) / total.max(1)).min(BAR_SLOTS as u64);
    let filled = filled as usize;
    format!("{}{}", "|".repeat(filled), "-".repeat(BAR_SLOTS - filled))
}

fn remove_partial_output(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Failed to remove partial output {}: {}", path.display(), e);
        }
    }
}
