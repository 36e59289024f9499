//! Core library for the MOD to MP4 batch converter.
//!
//! This crate contains all pipeline logic with zero UI dependencies:
//! locating source files, invoking the external transcoder, archiving
//! originals, and reporting progress. It is driven by the GUI shell.

pub mod archive;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod probe;
pub mod tools;
pub mod transcode;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
