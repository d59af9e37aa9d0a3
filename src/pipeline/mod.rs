//! Unpack → locate → translate → repack → replace pipeline

pub mod context;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::archive::{self, ResourceLocator};
use crate::core::client::{GoogleTranslator, TranslationProvider, Translator};
use crate::core::config::Settings;
use crate::core::errors::{ModTranslatorError, Result};
use crate::processors::ResourceFormat;

pub use context::{Phase, RunContext};
pub use report::RunSummary;

/// Result of looking at one resource file slot in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The target file was written
    Translated {
        /// Written file
        target: PathBuf,
        /// Number of translated strings
        strings: usize,
    },
    /// The target locale already has a file; nothing was touched
    TargetExists,
    /// No source locale file in this format
    SourceMissing,
}

/// Drives one translation run over every mod archive
#[derive(Debug)]
pub struct Pipeline<P> {
    settings: Settings,
    translator: Translator<P>,
}

impl Pipeline<GoogleTranslator> {
    /// Pipeline using the Google Translate provider
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let provider = GoogleTranslator::new(&settings.translator)?;
        Ok(Self::new(settings, provider))
    }
}

impl<P: TranslationProvider> Pipeline<P> {
    /// Pipeline translating with `provider`
    pub fn new(settings: Settings, provider: P) -> Self {
        let translator = Translator::new(
            provider,
            settings.source_locale.provider_code(),
            settings.target_locale.provider_code(),
        );
        Self {
            settings,
            translator,
        }
    }

    /// Settings of this run
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Gateway used for every resource file
    pub fn translator(&self) -> &Translator<P> {
        &self.translator
    }

    /// Run every phase in order, stopping at the first error
    pub async fn run(&self, ctx: &mut RunContext) -> Result<RunSummary> {
        let mut summary = RunSummary::new();

        self.setup(ctx)?;
        summary.archives_unpacked = self.unpack_mods(ctx)?;

        let resource_dirs = self.locate_resource_dirs(ctx)?;
        summary.resource_directories = resource_dirs.len();

        self.translate_resource_dirs(ctx, &resource_dirs, &mut summary)
            .await?;
        summary.repacked_archives = self.repack_mods(ctx)?;

        if self.settings.replace_original_mods {
            self.replace_original_mods(ctx)?;
            summary.replaced_originals = true;
        }

        self.cleanup(ctx)?;
        ctx.enter(Phase::Done, 0);
        ctx.finish();
        summary.finish();
        Ok(summary)
    }

    /// Create the working and output folders
    ///
    /// A working folder left behind by an aborted run is emptied first so
    /// its contents never end up in the repacked archives.
    pub fn setup(&self, ctx: &mut RunContext) -> Result<()> {
        ctx.enter(Phase::Setup, 0);
        self.settings.validate()?;

        let mods_path = &self.settings.mods_path;
        if !mods_path.is_dir() {
            return Err(ModTranslatorError::ConfigError {
                message: format!("Mods folder {} does not exist", mods_path.display()),
            });
        }

        let temp_path = &self.settings.temp_path;
        if temp_path.is_dir() && !is_empty_dir(temp_path)? {
            warn!(
                "Working folder {} holds files from an earlier run, clearing it",
                temp_path.display()
            );
            fs::remove_dir_all(temp_path).map_err(|e| ModTranslatorError::file(temp_path, e))?;
        }

        for dir in [temp_path, &self.settings.translation_path] {
            fs::create_dir_all(dir).map_err(|e| ModTranslatorError::file(dir, e))?;
        }
        Ok(())
    }

    /// Archive files directly inside the mods folder, sorted by name
    pub fn mod_archives(&self) -> Result<Vec<PathBuf>> {
        let mods_path = &self.settings.mods_path;
        let mut archives = Vec::new();

        for entry in fs::read_dir(mods_path).map_err(|e| ModTranslatorError::file(mods_path, e))? {
            let path = entry?.path();
            if path.is_file() && self.is_archive(&path) {
                archives.push(path);
            }
        }

        archives.sort();
        Ok(archives)
    }

    fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case(self.settings.archive_extension.as_str()))
            .unwrap_or(false)
    }

    /// Unpack every mod archive to `<temp>/<archive file name>`
    pub fn unpack_mods(&self, ctx: &mut RunContext) -> Result<Vec<String>> {
        let archives = self.mod_archives()?;
        ctx.enter(Phase::Unpack, archives.len() as u64);

        let mut unpacked = Vec::new();
        for archive_path in archives {
            let name = file_name(&archive_path);
            ctx.step(format!("Unpacking {}...", name));
            archive::unpack(&archive_path, &self.settings.temp_path.join(&name))?;
            ctx.advance();
            unpacked.push(name);
        }

        info!("Unpacked {} mods", unpacked.len());
        Ok(unpacked)
    }

    /// Scan the working folder for language resource folders
    pub fn locate_resource_dirs(&self, ctx: &mut RunContext) -> Result<Vec<PathBuf>> {
        ctx.enter(Phase::Locate, 0);

        let dirs = ResourceLocator::new(self.settings.source_locale.clone())
            .require_source_file(self.settings.require_source_file)
            .find(&self.settings.temp_path)?;

        info!("Found {} language folders", dirs.len());
        Ok(dirs)
    }

    /// Translate every resource folder, JSON first, then `.lang`
    pub async fn translate_resource_dirs(
        &self,
        ctx: &mut RunContext,
        resource_dirs: &[PathBuf],
        summary: &mut RunSummary,
    ) -> Result<()> {
        ctx.enter(Phase::Translate, resource_dirs.len() as u64);

        for dir in resource_dirs {
            let mod_name = self.mod_name(dir);
            for format in ResourceFormat::ALL {
                ctx.step(format!("Translating {} ({})...", mod_name, format));

                match self.translate_resource(dir, format).await? {
                    TranslationOutcome::Translated { target, strings } => {
                        info!(
                            "{} did not contain {}, translated {} strings",
                            mod_name,
                            format.file_name(&self.settings.target_locale),
                            strings
                        );
                        summary.strings_translated += strings;
                        summary.translated_files.push(
                            target
                                .strip_prefix(&self.settings.temp_path)
                                .unwrap_or(&target)
                                .to_path_buf(),
                        );
                    }
                    TranslationOutcome::TargetExists => {
                        info!(
                            "{} already contains {}, skipping",
                            mod_name,
                            format.file_name(&self.settings.target_locale)
                        );
                        summary.already_translated += 1;
                    }
                    TranslationOutcome::SourceMissing => {}
                }
            }
            ctx.advance();
        }

        Ok(())
    }

    /// Write the target locale file of `format` in `dir` if it is missing
    ///
    /// Nothing is written unless every string translated.
    pub async fn translate_resource(
        &self,
        dir: &Path,
        format: ResourceFormat,
    ) -> Result<TranslationOutcome> {
        let source = format.path_in(dir, &self.settings.source_locale);
        let target = format.path_in(dir, &self.settings.target_locale);

        if target.exists() {
            return Ok(TranslationOutcome::TargetExists);
        }
        if !source.is_file() {
            return Ok(TranslationOutcome::SourceMissing);
        }

        let content = tokio::fs::read_to_string(&source)
            .await
            .map_err(|e| ModTranslatorError::file(&source, e))?;
        let mapping = format.decode(&content).inspect_err(|e| {
            warn!("Cannot read {}: {}", source.display(), e);
        })?;

        let translated = self.translator.translate_mapping(&mapping).await?;
        let encoded = format.encode(&translated)?;

        tokio::fs::write(&target, encoded)
            .await
            .map_err(|e| ModTranslatorError::file(&target, e))?;

        Ok(TranslationOutcome::Translated {
            target,
            strings: translated.len(),
        })
    }

    /// Pack every unpacked mod into the translation folder under its original name
    pub fn repack_mods(&self, ctx: &mut RunContext) -> Result<Vec<PathBuf>> {
        let temp_path = &self.settings.temp_path;
        let mut mod_dirs = Vec::new();
        for entry in fs::read_dir(temp_path).map_err(|e| ModTranslatorError::file(temp_path, e))? {
            let path = entry?.path();
            if path.is_dir() {
                mod_dirs.push(path);
            }
        }
        mod_dirs.sort();
        ctx.enter(Phase::Repack, mod_dirs.len() as u64);

        let mut repacked = Vec::new();
        for mod_dir in mod_dirs {
            let name = file_name(&mod_dir);
            ctx.step(format!("Converting {} into mod file...", name));
            let archive_path = self.settings.translation_path.join(&name);
            archive::pack(&mod_dir, &archive_path, true)?;
            ctx.advance();
            repacked.push(archive_path);
        }

        info!("Repacked {} mods", repacked.len());
        Ok(repacked)
    }

    /// Swap the original archives for the translated ones and drop the translation folder
    pub fn replace_original_mods(&self, ctx: &mut RunContext) -> Result<()> {
        let originals = self.mod_archives()?;
        let translation_path = &self.settings.translation_path;
        let translated = fs::read_dir(translation_path)
            .map_err(|e| ModTranslatorError::file(translation_path, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        ctx.enter(Phase::Replace, (originals.len() + translated.len()) as u64);

        for original in originals {
            ctx.step(format!("Removing {}...", original.display()));
            fs::remove_file(&original).map_err(|e| ModTranslatorError::file(&original, e))?;
            ctx.advance();
        }

        for source in translated {
            let destination = self.settings.mods_path.join(file_name(&source));
            ctx.step(format!("Moving {}...", source.display()));
            move_file(&source, &destination)?;
            ctx.advance();
        }

        fs::remove_dir_all(translation_path)
            .map_err(|e| ModTranslatorError::file(translation_path, e))?;
        Ok(())
    }

    /// Remove the working folder
    pub fn cleanup(&self, ctx: &mut RunContext) -> Result<()> {
        ctx.enter(Phase::Cleanup, 0);
        let temp_path = &self.settings.temp_path;
        if temp_path.exists() {
            fs::remove_dir_all(temp_path).map_err(|e| ModTranslatorError::file(temp_path, e))?;
        }
        Ok(())
    }

    /// Name of the archive a resource folder was unpacked from, without extension
    fn mod_name(&self, dir: &Path) -> String {
        let name = dir
            .strip_prefix(&self.settings.temp_path)
            .ok()
            .and_then(|relative| relative.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name(dir));

        let suffix = format!(".{}", self.settings.archive_extension);
        match name.strip_suffix(suffix.as_str()) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => name,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| ModTranslatorError::file(dir, e))?;
    Ok(entries.next().is_none())
}

/// Rename, falling back to copy and delete when crossing filesystems
fn move_file(source: &Path, destination: &Path) -> Result<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }
    fs::copy(source, destination).map_err(|e| ModTranslatorError::file(destination, e))?;
    fs::remove_file(source).map_err(|e| ModTranslatorError::file(source, e))?;
    Ok(())
}
