//! Finds language resource directories in unpacked mods

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::errors::{ModTranslatorError, Result};
use crate::core::models::LocaleCode;
use crate::processors::ResourceFormat;

const LANG_SEGMENT: &str = "lang";
const ASSETS_SEGMENT: &str = "assets";

/// Walks an unpacked tree looking for `assets/.../lang` directories
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    source_locale: LocaleCode,
    require_source_file: bool,
}

impl ResourceLocator {
    /// Locator applying only the path heuristic
    pub fn new(source_locale: LocaleCode) -> Self {
        Self {
            source_locale,
            require_source_file: false,
        }
    }

    /// Also require the source locale's `.json` or `.lang` file in each directory
    pub fn require_source_file(mut self, require: bool) -> Self {
        self.require_source_file = require;
        self
    }

    /// Matching directories under `root`, in file-name order
    ///
    /// Only the path relative to `root` is matched, so a working directory
    /// that itself sits under some `assets` or `lang` folder matches nothing
    /// by accident.
    pub fn find(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| ModTranslatorError::file(root, e))?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let relative = relative.to_string_lossy();
            if !(relative.contains(LANG_SEGMENT) && relative.contains(ASSETS_SEGMENT)) {
                continue;
            }

            if self.require_source_file && !self.has_source_file(entry.path()) {
                debug!(
                    "Skipping {}: no {} resource file",
                    entry.path().display(),
                    self.source_locale
                );
                continue;
            }

            dirs.push(entry.into_path());
        }

        Ok(dirs)
    }

    fn has_source_file(&self, dir: &Path) -> bool {
        ResourceFormat::ALL
            .iter()
            .any(|format| format.path_in(dir, &self.source_locale).is_file())
    }
}

/// Every directory under `root` whose path contains both `assets` and `lang`
pub fn find_resource_directories(root: &Path, source_locale: &LocaleCode) -> Result<Vec<PathBuf>> {
    ResourceLocator::new(source_locale.clone()).find(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn build_tree(root: &Path) {
        for dir in [
            "a.jar/assets/alpha/lang",
            "a.jar/assets/alpha/textures",
            "a.jar/data/alpha/lang",
            "b.jar/assets/beta/lang",
            "b.jar/assets/beta/Lang_upper",
            "c.jar/META-INF",
        ] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("a.jar/assets/alpha/lang/en_US.lang"), "k=v\n").unwrap();
        fs::write(root.join("a.jar/assets/alpha/textures/lang.png"), "").unwrap();
    }

    #[test]
    fn test_find_matches_path_heuristic() {
        let dir = tempfile::tempdir().unwrap();
        build_tree(dir.path());
        let locale = LocaleCode::parse("en_US").unwrap();

        let found = find_resource_directories(dir.path(), &locale).unwrap();

        assert_eq!(
            found,
            vec![
                dir.path().join("a.jar/assets/alpha/lang"),
                dir.path().join("b.jar/assets/beta/lang"),
            ]
        );
    }

    #[test]
    fn test_find_with_existence_check() {
        let dir = tempfile::tempdir().unwrap();
        build_tree(dir.path());
        fs::write(dir.path().join("b.jar/assets/beta/lang/en_us.json"), "{}").unwrap();
        fs::create_dir_all(dir.path().join("c.jar/assets/gamma/lang")).unwrap();

        let locator = ResourceLocator::new(LocaleCode::parse("en_US").unwrap()).require_source_file(true);
        let found = locator.find(dir.path()).unwrap();

        assert_eq!(
            found,
            vec![
                dir.path().join("a.jar/assets/alpha/lang"),
                dir.path().join("b.jar/assets/beta/lang"),
            ]
        );
    }

    #[test]
    fn test_root_path_does_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("assets").join("lang");
        fs::create_dir_all(root.join("plain.jar/src")).unwrap();

        let found = find_resource_directories(&root, &LocaleCode::parse("en_US").unwrap()).unwrap();
        assert!(found.is_empty());
    }
}
