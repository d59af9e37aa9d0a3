//! Zip archive extraction and repacking

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::core::errors::{ModTranslatorError, Result};

fn read_error(path: &Path, err: impl std::fmt::Display) -> ModTranslatorError {
    ModTranslatorError::ArchiveReadError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> ModTranslatorError {
    ModTranslatorError::ArchiveWriteError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn open_archive(archive_path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(archive_path).map_err(|e| read_error(archive_path, e))?;
    ZipArchive::new(file).map_err(|e| read_error(archive_path, e))
}

/// Extract every entry of `archive_path` into `destination`
pub fn unpack(archive_path: &Path, destination: &Path) -> Result<()> {
    let mut archive = open_archive(archive_path)?;

    fs::create_dir_all(destination).map_err(|e| ModTranslatorError::file(destination, e))?;
    archive
        .extract(destination)
        .map_err(|e| read_error(archive_path, e))?;

    debug!(
        "Unpacked {} entries from {} into {}",
        archive.len(),
        archive_path.display(),
        destination.display()
    );
    Ok(())
}

/// Names of every entry in `archive_path`
pub fn list_entries(archive_path: &Path) -> Result<Vec<String>> {
    let archive = open_archive(archive_path)?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Write every file under `source_dir` into a new deflate archive
///
/// Entry names are paths relative to `source_dir`, joined with `/`. An
/// existing `archive_path` is replaced only when `overwrite` is set.
pub fn pack(source_dir: &Path, archive_path: &Path, overwrite: bool) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(write_error(
            archive_path,
            format!("{} is not a directory", source_dir.display()),
        ));
    }

    let file = if overwrite {
        File::create(archive_path)
    } else {
        OpenOptions::new().write(true).create_new(true).open(archive_path)
    }
    .map_err(|e| write_error(archive_path, e))?;

    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0usize;

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| write_error(archive_path, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| write_error(archive_path, e))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        writer
            .start_file(name, options)
            .map_err(|e| write_error(archive_path, e))?;
        let mut input = File::open(entry.path()).map_err(|e| read_error(entry.path(), e))?;
        io::copy(&mut input, &mut writer).map_err(|e| write_error(archive_path, e))?;
        count += 1;
    }

    writer.finish().map_err(|e| write_error(archive_path, e))?;
    debug!(
        "Packed {} files from {} into {}",
        count,
        source_dir.display(),
        archive_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tree(root: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn test_pack_then_unpack_keeps_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("mod");
        write_tree(
            &source,
            &[
                ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
                ("assets/demo/lang/en_us.json", "{\"a\": \"b\"}"),
                ("pack.mcmeta", "{}"),
            ],
        );
        fs::create_dir_all(source.join("empty")).unwrap();

        let archive = dir.path().join("demo.jar");
        pack(&source, &archive, false).unwrap();

        let mut entries = list_entries(&archive).unwrap();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                "META-INF/MANIFEST.MF",
                "assets/demo/lang/en_us.json",
                "pack.mcmeta",
            ]
        );

        let restored = dir.path().join("restored");
        unpack(&archive, &restored).unwrap();
        assert_eq!(
            fs::read_to_string(restored.join("assets/demo/lang/en_us.json")).unwrap(),
            "{\"a\": \"b\"}"
        );
        assert_eq!(
            fs::read_to_string(restored.join("META-INF/MANIFEST.MF")).unwrap(),
            "Manifest-Version: 1.0\n"
        );
    }

    #[test]
    fn test_unpack_rejects_non_archive() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.jar");
        let mut file = File::create(&bogus).unwrap();
        file.write_all(b"definitely not a zip file").unwrap();

        let err = unpack(&bogus, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, ModTranslatorError::ArchiveReadError { .. }));

        let err = unpack(&dir.path().join("missing.jar"), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, ModTranslatorError::ArchiveReadError { .. }));
    }

    #[test]
    fn test_pack_respects_overwrite_flag() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("mod");
        write_tree(&source, &[("a.txt", "first")]);
        let archive = dir.path().join("mod.jar");

        pack(&source, &archive, false).unwrap();
        let err = pack(&source, &archive, false).unwrap_err();
        assert!(matches!(err, ModTranslatorError::ArchiveWriteError { .. }));

        write_tree(&source, &[("b.txt", "second")]);
        pack(&source, &archive, true).unwrap();
        assert_eq!(list_entries(&archive).unwrap().len(), 2);
    }
}
