//! Settings structs with per-section defaults.
//!
//! Settings are organized into logical sections. Every field has a
//! default matching the legacy camcorder layout, so `Settings::default()`
//! is the configuration the GUI runs with.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Conversion-related settings.
    #[serde(default)]
    pub conversion: ConversionSettings,

    /// Archive folder settings.
    #[serde(default)]
    pub archive: ArchiveSettings,

    /// External tool settings.
    #[serde(default)]
    pub tools: ToolSettings,
}

/// What to convert and what the output looks like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Extension of source files, matched case-insensitively.
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Extension given to converted files.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Camcorder sidecar extensions archived alongside converted sources.
    #[serde(default = "default_sidecar_extensions")]
    pub sidecar_extensions: Vec<String>,
}

fn default_source_extension() -> String {
    "MOD".to_string()
}

fn default_output_extension() -> String {
    "mp4".to_string()
}

fn default_sidecar_extensions() -> Vec<String> {
    vec!["MOI".to_string(), "PGI".to_string()]
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            output_extension: default_output_extension(),
            sidecar_extensions: default_sidecar_extensions(),
        }
    }
}

/// Where originals go after a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSettings {
    /// Name of the sibling folder that receives moved originals.
    #[serde(default = "default_folder_name")]
    pub folder_name: String,
}

fn default_folder_name() -> String {
    "Original files".to_string()
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            folder_name: default_folder_name(),
        }
    }
}

/// External tool names or paths.
///
/// A bare name is resolved against `PATH`; anything with a path
/// separator is used as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Transcoder binary. Required - the run aborts if it is missing.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// Prober binary. Optional - without it, per-file progress is
    /// indeterminate.
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_layout() {
        let settings = Settings::default();
        assert_eq!(settings.conversion.source_extension, "MOD");
        assert_eq!(settings.conversion.output_extension, "mp4");
        assert_eq!(settings.archive.folder_name, "Original files");
        assert_eq!(settings.tools.ffmpeg, "ffmpeg");
    }

    #[test]
    fn sidecar_defaults_cover_camcorder_files() {
        let conversion = ConversionSettings::default();
        assert!(conversion.sidecar_extensions.iter().any(|e| e == "MOI"));
        assert!(conversion.sidecar_extensions.iter().any(|e| e == "PGI"));
    }
}
