//! Frame-count estimation using ffprobe.
//!
//! Total frames are estimated as duration x frame rate from the first
//! video stream. The estimate only feeds the percentage readout; a
//! probe failure never fails the job.

use std::io;
use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;

/// Errors from the prober. All of them degrade to indeterminate
/// progress at the call site.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The prober could not be launched.
    #[error("failed to run ffprobe: {0}")]
    Launch(#[source] io::Error),

    /// The prober exited with a non-zero status.
    #[error("ffprobe failed with exit code {exit_code}: {message}")]
    CommandFailed { exit_code: i32, message: String },

    /// The prober's JSON output did not parse.
    #[error("failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    /// No usable duration / frame rate in the output.
    #[error("no usable video stream info for {0}")]
    MissingStreamInfo(String),
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<StreamInfo>,
    format: Option<FormatInfo>,
}

#[derive(Debug, Deserialize)]
struct StreamInfo {
    duration: Option<String>,
    r_frame_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

/// Estimate the total number of video frames in `input`.
pub fn estimate_total_frames(ffprobe: &Path, input: &Path) -> Result<u64, ProbeError> {
    let output = Command::new(ffprobe)
        .arg("-v")
        .arg("error")
        .arg("-select_streams")
        .arg("v:0")
        .arg("-show_entries")
        .arg("stream=duration,r_frame_rate:format=duration")
        .arg("-print_format")
        .arg("json")
        .arg(input)
        .output()
        .map_err(ProbeError::Launch)?;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let parsed: ProbeOutput = serde_json::from_slice(&output.stdout)?;
    total_frames_from(&parsed, input)
}

fn total_frames_from(probe: &ProbeOutput, input: &Path) -> Result<u64, ProbeError> {
    let missing = || ProbeError::MissingStreamInfo(input.display().to_string());

    let stream = probe.streams.first().ok_or_else(missing)?;

    let rate = stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .ok_or_else(missing)?;

    // MOD streams often carry the duration on the container only
    let duration = stream
        .duration
        .as_deref()
        .or(probe.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(missing)?;

    let frames = (duration * rate).round();
    if !frames.is_finite() || frames < 1.0 {
        return Err(missing());
    }

    Ok(frames as u64)
}

/// Parse a frame rate that is either fractional (`30000/1001`) or plain
/// (`25`).
fn parse_frame_rate(raw: &str) -> Option<f64> {
    let rate = match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.trim().parse().ok()?,
    };

    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<u64, ProbeError> {
        let probe: ProbeOutput = serde_json::from_str(json).unwrap();
        total_frames_from(&probe, Path::new("clip1.MOD"))
    }

    #[test]
    fn fractional_frame_rates_parse() {
        assert_eq!(parse_frame_rate("30000/1001").map(|r| r.round()), Some(30.0));
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert_eq!(parse_frame_rate("25/0"), None);
        assert_eq!(parse_frame_rate("garbage"), None);
    }

    #[test]
    fn frames_come_from_stream_duration() {
        let total = parse(
            r#"{"streams": [{"duration": "10.0", "r_frame_rate": "25/1"}]}"#,
        )
        .unwrap();
        assert_eq!(total, 250);
    }

    #[test]
    fn container_duration_is_the_fallback() {
        let total = parse(
            r#"{
                "streams": [{"r_frame_rate": "30000/1001"}],
                "format": {"duration": "2.002"}
            }"#,
        )
        .unwrap();
        assert_eq!(total, 60);
    }

    #[test]
    fn missing_stream_info_is_an_error() {
        let err = parse(r#"{"streams": []}"#).unwrap_err();
        assert!(matches!(err, ProbeError::MissingStreamInfo(_)));

        let err = parse(r#"{"streams": [{"duration": "10.0"}]}"#).unwrap_err();
        assert!(matches!(err, ProbeError::MissingStreamInfo(_)));
    }
}
