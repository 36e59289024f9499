//! External tool resolution.
//!
//! The transcoder is the only hard requirement; the prober is optional
//! and its absence just downgrades per-file progress to indeterminate.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::ToolSettings;
use crate::pipeline::{RunError, RunResult};

/// Resolved tool paths for one run.
#[derive(Debug, Clone)]
pub struct Tools {
    /// Path to the transcoder binary.
    pub ffmpeg: PathBuf,
    /// Path to the prober binary, if available.
    pub ffprobe: Option<PathBuf>,
}

/// Resolve the configured tools, failing if the transcoder is missing.
pub fn verify_tools(settings: &ToolSettings) -> RunResult<Tools> {
    let ffmpeg =
        resolve_tool(&settings.ffmpeg).ok_or_else(|| RunError::tool_missing(&settings.ffmpeg))?;

    let ffprobe = resolve_tool(&settings.ffprobe);
    if ffprobe.is_none() {
        tracing::warn!(
            "'{}' not found in PATH; per-file progress will be indeterminate",
            settings.ffprobe
        );
    }

    tracing::debug!("Transcoder resolved to {}", ffmpeg.display());
    Ok(Tools { ffmpeg, ffprobe })
}

/// Resolve a tool name to a path.
///
/// A name containing a path separator is checked directly; a bare name
/// is searched for in every `PATH` entry.
pub fn resolve_tool(tool: &str) -> Option<PathBuf> {
    let as_path = Path::new(tool);
    if as_path.components().count() > 1 {
        return as_path.is_file().then(|| as_path.to_path_buf());
    }

    find_in_path(tool)
}

fn find_in_path(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    #[test]
    fn absolute_path_resolves_directly() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("fake-ffmpeg");
        fs::write(&tool, "#!/bin/sh\n").unwrap();

        let resolved = resolve_tool(tool.to_str().unwrap());
        assert_eq!(resolved, Some(tool));
    }

    #[test]
    fn missing_absolute_path_does_not_resolve() {
        assert!(resolve_tool("/no/such/dir/fake-ffmpeg").is_none());
    }

    #[test]
    fn missing_transcoder_is_fatal() {
        let settings = ToolSettings {
            ffmpeg: "/no/such/dir/fake-ffmpeg".to_string(),
            ffprobe: "/no/such/dir/fake-ffprobe".to_string(),
        };

        let err = verify_tools(&settings).unwrap_err();
        assert!(matches!(err, RunError::ToolMissing { .. }));
    }

    #[test]
    fn missing_prober_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let ffmpeg = dir.path().join("fake-ffmpeg");
        fs::write(&ffmpeg, "#!/bin/sh\n").unwrap();

        let settings = ToolSettings {
            ffmpeg: ffmpeg.to_string_lossy().to_string(),
            ffprobe: "/no/such/dir/fake-ffprobe".to_string(),
        };

        let tools = verify_tools(&settings).unwrap();
        assert_eq!(tools.ffmpeg, ffmpeg);
        assert!(tools.ffprobe.is_none());
    }
}
