//! Summary of a finished run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::errors::{ModTranslatorError, Result};

/// What a run did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished, unset until then
    pub finished_at: Option<DateTime<Utc>>,
    /// Archive file names that were unpacked
    pub archives_unpacked: Vec<String>,
    /// Language folders found in the unpacked mods
    pub resource_directories: usize,
    /// Written resource files, relative to the working directory
    pub translated_files: Vec<PathBuf>,
    /// Resource files skipped because the target locale already existed
    pub already_translated: usize,
    /// Strings sent through the translator
    pub strings_translated: usize,
    /// Archives written to the translation directory
    pub repacked_archives: Vec<PathBuf>,
    /// Whether the original mods were replaced
    pub replaced_originals: bool,
}

impl RunSummary {
    /// Empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            archives_unpacked: Vec::new(),
            resource_directories: 0,
            translated_files: Vec::new(),
            already_translated: 0,
            strings_translated: 0,
            repacked_archives: Vec::new(),
            replaced_originals: false,
        }
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall time of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// Save the summary as pretty JSON
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ModTranslatorError::file(path, e))?;
        Ok(())
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut summary = RunSummary::new();
        summary.archives_unpacked.push("demo.jar".to_string());
        summary.strings_translated = 4;
        assert!(summary.duration().is_none());
        summary.finish();
        assert!(summary.duration().unwrap() >= chrono::Duration::zero());

        summary.to_file(&path).unwrap();
        let loaded: RunSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.archives_unpacked, vec!["demo.jar"]);
        assert_eq!(loaded.strings_translated, 4);
        assert!(loaded.finished_at.is_some());
    }
}
