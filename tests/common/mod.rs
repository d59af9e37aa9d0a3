#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mod_translator::core::config::ProviderSettings;
use mod_translator::{LocaleCode, ModTranslatorError, Result, Settings, TranslationProvider};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

/// Provider that answers from a fixed phrase book and records every call
pub struct PhraseBookProvider {
    phrases: Vec<(&'static str, &'static str)>,
    calls: Mutex<Vec<String>>,
}

impl PhraseBookProvider {
    pub fn new(phrases: &[(&'static str, &'static str)]) -> Self {
        Self {
            phrases: phrases.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TranslationProvider for PhraseBookProvider {
    async fn translate(&self, text: &str, _source_lang: &str, _target_lang: &str) -> Result<String> {
        self.calls.lock().unwrap().push(text.to_string());
        self.phrases
            .iter()
            .find(|(from, _)| *from == text)
            .map(|(_, to)| to.to_string())
            .ok_or_else(|| ModTranslatorError::TranslationServiceError {
                message: format!("no phrase for '{}'", text),
            })
    }
}

/// Scratch layout with `mods/`, `translated/` and `temp/` under one root
pub struct Workspace {
    pub root: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("mods")).unwrap();
        Self { root }
    }

    pub fn mods(&self) -> PathBuf {
        self.root.path().join("mods")
    }

    pub fn translated(&self) -> PathBuf {
        self.root.path().join("translated")
    }

    pub fn temp(&self) -> PathBuf {
        self.root.path().join("temp")
    }

    pub fn settings(&self, replace_original_mods: bool) -> Settings {
        Settings {
            source_locale: LocaleCode::parse("en_US").unwrap(),
            target_locale: LocaleCode::parse("es_ES").unwrap(),
            mods_path: self.mods(),
            translation_path: self.translated(),
            temp_path: self.temp(),
            replace_original_mods,
            archive_extension: "jar".to_string(),
            require_source_file: true,
            translator: ProviderSettings::default(),
        }
    }

    /// Write a mod archive into `mods/`
    pub fn add_mod(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.mods().join(name);
        write_zip(&path, files);
        path
    }
}

pub fn write_zip(path: &Path, files: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in files {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// Content of one entry, `None` when the archive lacks it
pub fn read_entry(archive: &Path, name: &str) -> Option<String> {
    let mut archive = ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    Some(content)
}
