//! CLI command definitions and handlers

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::archive::{self, ResourceLocator};
use crate::core::client::{GoogleTranslator, Translator};
use crate::core::config::{Settings, SettingsOverrides, DEFAULT_CONFIG_PATH};
use crate::pipeline::{Pipeline, RunContext};
use crate::processors::ResourceFormat;

/// Commands for mod-translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate every mod archive in the mods folder (default)
    Run(RunArgs),

    /// Translate a single .json or .lang resource file
    TranslateFile {
        /// Source language resource file
        input: PathBuf,

        /// Where to write the translated file
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        /// Locale overrides
        #[command(flatten)]
        locales: LocaleArgs,
    },

    /// List the language folders inside one mod archive
    Inspect {
        /// Mod archive to look into
        archive: PathBuf,

        /// Locale overrides
        #[command(flatten)]
        locales: LocaleArgs,
    },

    /// Write a starter config file
    InitConfig {
        /// Config file to create
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Locale overrides shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct LocaleArgs {
    /// Source locale, e.g. en_US
    #[arg(long)]
    pub source_lang: Option<String>,

    /// Target locale, e.g. es_ES
    #[arg(short, long)]
    pub target_lang: Option<String>,
}

/// Options of the `run` command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Locale overrides
    #[command(flatten)]
    pub locales: LocaleArgs,

    /// Folder containing the mod archives
    #[arg(long)]
    pub mods_path: Option<PathBuf>,

    /// Folder receiving the translated archives
    #[arg(long)]
    pub translation_path: Option<PathBuf>,

    /// Working folder for unpacked archives
    #[arg(long)]
    pub temp_path: Option<PathBuf>,

    /// Replace the original mods with the translated ones
    #[arg(long, conflicts_with = "keep_originals")]
    pub replace: bool,

    /// Keep the original mods even if the config says to replace them
    #[arg(long)]
    pub keep_originals: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl LocaleArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            original_language: self.source_lang.clone(),
            target_language: self.target_lang.clone(),
            ..Default::default()
        }
    }
}

impl RunArgs {
    /// Settings overrides given on the command line
    pub fn overrides(&self) -> SettingsOverrides {
        let replace_original_mods = if self.replace {
            Some(true)
        } else if self.keep_originals {
            Some(false)
        } else {
            None
        };

        SettingsOverrides {
            mods_path: self.mods_path.clone(),
            translation_path: self.translation_path.clone(),
            temp_path: self.temp_path.clone(),
            replace_original_mods,
            ..self.locales.overrides()
        }
    }
}

/// Handle the full translation run
pub async fn handle_run(config: &Path, args: RunArgs) -> anyhow::Result<()> {
    let settings = Settings::load(config, &args.overrides())?;

    info!("Starting mod translation");
    info!("Mods: {}", settings.mods_path.display());
    info!("Output: {}", settings.translation_path.display());
    info!(
        "Languages: {} -> {}",
        settings.source_locale, settings.target_locale
    );
    info!("Replace originals: {}", settings.replace_original_mods);

    let pipeline = Pipeline::from_settings(settings)?;
    let mut ctx = if args.no_progress {
        RunContext::hidden()
    } else {
        RunContext::new()
    };

    let summary = pipeline.run(&mut ctx).await?;

    println!("\n✅ All mods have been translated!");
    println!("   Mods: {}", summary.archives_unpacked.len());
    println!("   Language folders: {}", summary.resource_directories);
    println!("   Files translated: {}", summary.translated_files.len());
    println!("   Already translated: {}", summary.already_translated);
    println!("   Strings: {}", summary.strings_translated);
    if let Some(duration) = summary.duration() {
        println!("   Time: {}s", duration.num_seconds());
    }

    if let Some(report) = args.report {
        summary.to_file(&report)?;
        println!("\n📝 Report saved to: {}", report.display());
    }

    Ok(())
}

/// Handle single resource file translation
pub async fn handle_translate_file(
    config: &Path,
    input: PathBuf,
    output: PathBuf,
    force: bool,
    locales: LocaleArgs,
) -> anyhow::Result<()> {
    let format = ResourceFormat::from_path(&input)
        .ok_or_else(|| anyhow::anyhow!("{} is not a .json or .lang file", input.display()))?;
    if output.exists() && !force {
        anyhow::bail!("{} already exists, use --force to overwrite", output.display());
    }

    let settings = Settings::load(config, &locales.overrides())?;
    let translator = Translator::new(
        GoogleTranslator::new(&settings.translator)?,
        settings.source_locale.provider_code(),
        settings.target_locale.provider_code(),
    );

    info!("Translating {} -> {}", input.display(), output.display());
    let content = tokio::fs::read_to_string(&input).await?;
    let mapping = format.decode(&content)?;
    let translated = translator.translate_mapping(&mapping).await?;
    tokio::fs::write(&output, format.encode(&translated)?).await?;

    println!(
        "✅ Translated {} strings into {}",
        translated.len(),
        output.display()
    );
    Ok(())
}

/// Handle archive inspection
pub fn handle_inspect(config: &Path, archive_path: PathBuf, locales: LocaleArgs) -> anyhow::Result<()> {
    let settings = Settings::load(config, &locales.overrides())?;
    let scratch = std::env::temp_dir().join(format!("mod-translator-inspect-{}", std::process::id()));

    let result = inspect_archive(&settings, &archive_path, &scratch);
    if scratch.exists() {
        std::fs::remove_dir_all(&scratch)?;
    }
    result
}

fn inspect_archive(settings: &Settings, archive_path: &Path, scratch: &Path) -> anyhow::Result<()> {
    archive::unpack(archive_path, scratch)?;
    let dirs = ResourceLocator::new(settings.source_locale.clone()).find(scratch)?;

    if dirs.is_empty() {
        println!("No language folders found in {}", archive_path.display());
        return Ok(());
    }

    println!("Language folders in {}:", archive_path.display());
    for dir in dirs {
        let relative = dir.strip_prefix(scratch).unwrap_or(&dir);
        println!("\n  {}", relative.display());
        for format in ResourceFormat::ALL {
            for locale in [&settings.source_locale, &settings.target_locale] {
                let present = format.path_in(&dir, locale).is_file();
                println!(
                    "    {:<16} {}",
                    format.file_name(locale),
                    if present { "present" } else { "missing" }
                );
            }
        }
    }
    Ok(())
}

/// Handle config file creation
pub fn handle_init_config(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists, use --force to overwrite", path.display());
    }
    Settings::write_starter_config(&path)?;
    println!("📝 Config written to: {}", path.display());
    Ok(())
}
