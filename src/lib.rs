//! Mod Translator - batch translation of language files inside game mod archives
//!
//! Unpacks mod archives, finds their `assets/<mod>/lang` folders, translates
//! the missing target locale files through a translation provider and packs
//! the mods back up.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod cli;
pub mod core;
pub mod pipeline;
pub mod processors;

// Re-export key types for convenience
pub use crate::core::{
    client::{GoogleTranslator, TranslationProvider, Translator},
    config::Settings,
    errors::{ModTranslatorError, Result},
    models::{LocaleCode, TextMapping},
};

pub use crate::pipeline::{Pipeline, RunContext, RunSummary};
pub use crate::processors::ResourceFormat;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
