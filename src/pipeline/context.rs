//! Phase tracking and progress display for a run

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use tracing::{debug, info};

/// Stages of a translation run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Working and output folders are prepared
    Setup,
    /// Mod archives are extracted
    Unpack,
    /// Language folders are searched for
    Locate,
    /// Missing target files are written
    Translate,
    /// Working folders are zipped back
    Repack,
    /// Repacked archives take the originals' place
    Replace,
    /// Working folder is removed
    Cleanup,
    /// Run finished
    Done,
}

impl Phase {
    /// Human readable label shown while the phase runs
    pub fn label(self) -> &'static str {
        match self {
            Phase::Setup => "Preparing folders...",
            Phase::Unpack => "Unpacking mod files...",
            Phase::Locate => "Looking for language folders...",
            Phase::Translate => "Translating mods...",
            Phase::Repack => "Converting to mod files...",
            Phase::Replace => "Replacing original mods...",
            Phase::Cleanup => "Cleaning up...",
            Phase::Done => "All mods have been translated!",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Unpack => "unpack",
            Phase::Locate => "locate",
            Phase::Translate => "translate",
            Phase::Repack => "repack",
            Phase::Replace => "replace",
            Phase::Cleanup => "cleanup",
            Phase::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// State threaded through every step of a run
///
/// Holds the current phase and the progress bar for it.
pub struct RunContext {
    phase: Phase,
    progress: ProgressBar,
}

impl RunContext {
    /// Context drawing a progress bar on the terminal
    pub fn new() -> Self {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self::with_progress(progress)
    }

    /// Context without any terminal output besides logs
    pub fn hidden() -> Self {
        Self::with_progress(ProgressBar::hidden())
    }

    fn with_progress(progress: ProgressBar) -> Self {
        Self {
            phase: Phase::Setup,
            progress,
        }
    }

    /// Phase currently running
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start `phase` with `steps` units of work
    pub fn enter(&mut self, phase: Phase, steps: u64) {
        self.phase = phase;
        self.progress.reset();
        self.progress.set_length(steps);
        self.progress.set_message(phase.label());
        info!(phase = %phase, "{}", phase.label());
    }

    /// Report the item currently worked on
    pub fn step(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(phase = %self.phase, "{}", message);
        self.progress.set_message(message);
    }

    /// Mark one unit of work as done
    pub fn advance(&self) {
        self.progress.inc(1);
    }

    /// Close the progress bar
    pub fn finish(&self) {
        self.progress.finish_with_message(self.phase.label());
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_tracks_phase() {
        let mut ctx = RunContext::hidden();
        assert_eq!(ctx.phase(), Phase::Setup);

        ctx.enter(Phase::Translate, 3);
        ctx.step("Translating demo...");
        ctx.advance();
        assert_eq!(ctx.phase(), Phase::Translate);
        assert_eq!(ctx.phase().to_string(), "translate");
    }
}
