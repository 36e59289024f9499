//! Run reporter with console and GUI callback output.
//!
//! Stateless with respect to pipeline data: it formats and forwards.
//! Counters live in the run context, not here.

use std::io::{self, Write};

use chrono::Local;

use crate::models::RunSummary;

/// Callback type for mirroring report lines into a GUI log panel.
pub type GuiLogCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Reporter for per-file status and the end-of-run summary.
///
/// Messages go to stdout with a `[HH:MM:SS]` timestamp; in-flight
/// progress lines overwrite themselves and are console-only, matching
/// the legacy tool's readout.
pub struct RunReporter {
    console: bool,
    callback: Option<GuiLogCallback>,
}

impl RunReporter {
    /// Console-only reporter.
    pub fn new() -> Self {
        Self {
            console: true,
            callback: None,
        }
    }

    /// Reporter that also mirrors messages into a GUI callback.
    pub fn with_callback(callback: GuiLogCallback) -> Self {
        Self {
            console: true,
            callback: Some(callback),
        }
    }

    /// Reporter that emits nothing. Used by tests.
    pub fn quiet() -> Self {
        Self {
            console: false,
            callback: None,
        }
    }

    /// Print a timestamped message line.
    pub fn message(&self, message: &str) {
        let line = format!("[{}] {}", timestamp(), message);
        if self.console {
            // \r clears any progress line still on the console
            println!("\r{}", line);
            let _ = io::stdout().flush();
        }
        if let Some(callback) = &self.callback {
            callback(&line);
        }
    }

    /// Overwrite the current console line with an in-flight progress
    /// readout. Not forwarded to the GUI callback.
    pub fn progress(&self, message: &str) {
        if !self.console {
            return;
        }
        print!("\r[{}] {}", timestamp(), message);
        let _ = io::stdout().flush();
    }

    /// Print the end-of-run summary: total converted vs. total seen,
    /// plus the paths that failed.
    pub fn summary(&self, summary: &RunSummary) {
        self.message(&format!(
            "Converted {}/{} files",
            summary.converted, summary.seen
        ));

        if !summary.failed.is_empty() {
            let list = summary
                .failed
                .iter()
                .map(|p| format!("- {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n");
            self.message(&format!("Unable to convert some files:\n{}", list));
        }
    }
}

impl Default for RunReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn collecting_reporter() -> (RunReporter, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let reporter = RunReporter {
            console: false,
            callback: Some(Box::new(move |line| {
                sink.lock().unwrap().push(line.to_string());
            })),
        };
        (reporter, lines)
    }

    #[test]
    fn messages_reach_the_callback_with_timestamp() {
        let (reporter, lines) = collecting_reporter();
        reporter.message("Scanning...");

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Scanning..."));
        assert!(lines[0].starts_with('['));
    }

    #[test]
    fn summary_reports_converted_over_seen() {
        let (reporter, lines) = collecting_reporter();
        reporter.summary(&RunSummary {
            seen: 2,
            converted: 1,
            failed: vec![PathBuf::from("/v/bad.MOD")],
        });

        let lines = lines.lock().unwrap();
        assert!(lines[0].contains("Converted 1/2 files"));
        assert!(lines[1].contains("bad.MOD"));
    }

    #[test]
    fn progress_lines_stay_off_the_callback() {
        let (reporter, lines) = collecting_reporter();
        reporter.progress("Progress on file - 50.00%");
        assert!(lines.lock().unwrap().is_empty());
    }
}
