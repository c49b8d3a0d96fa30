//! Expands command-line paths into the list of files to check.

use std::fs;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use rxlint_syntax::SupportedLanguage;

use crate::errors::AppError;

/// Directory names never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules"];

/// A file selected for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub(crate) path: Utf8PathBuf,
    pub(crate) language: SupportedLanguage,
}

/// Expands `roots` into sorted, de-duplicated targets.
///
/// Files named explicitly must have a supported extension. Directories are
/// walked iteratively; hidden entries and [`SKIPPED_DIRECTORIES`] are left
/// out and files with other extensions are ignored.
pub(crate) fn discover(roots: &[PathBuf]) -> Result<Vec<Target>, AppError> {
    let mut targets = Vec::new();
    for root in roots {
        let metadata = fs::metadata(root).map_err(|source| AppError::ReadPath {
            path: root.display().to_string(),
            source,
        })?;
        if metadata.is_dir() {
            walk(root, &mut targets)?;
        } else {
            let language = SupportedLanguage::detect(root).map_err(|source| {
                AppError::UnsupportedFile {
                    path: root.display().to_string(),
                    source,
                }
            })?;
            targets.push(Target {
                path: utf8(root)?,
                language,
            });
        }
    }
    targets.sort_by(|left, right| left.path.cmp(&right.path));
    targets.dedup_by(|left, right| left.path == right.path);
    Ok(targets)
}

fn walk(root: &Path, targets: &mut Vec<Target>) -> Result<(), AppError> {
    let mut pending = vec![root.to_path_buf()];
    while let Some(directory) = pending.pop() {
        let entries = fs::read_dir(&directory).map_err(|source| AppError::ReadPath {
            path: directory.display().to_string(),
            source,
        })?;
        for item in entries {
            let entry = item.map_err(|source| AppError::ReadPath {
                path: directory.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if is_skipped(&path) {
                continue;
            }
            let file_type = entry.file_type().map_err(|source| AppError::ReadPath {
                path: path.display().to_string(),
                source,
            })?;
            if file_type.is_dir() {
                pending.push(path);
            } else if let Some(language) = SupportedLanguage::from_path(&path) {
                targets.push(Target {
                    path: utf8(&path)?,
                    language,
                });
            }
        }
    }
    Ok(())
}

fn is_skipped(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name))
}

fn utf8(path: &Path) -> Result<Utf8PathBuf, AppError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|raw| AppError::NonUtf8Path {
        path: raw.display().to_string(),
    })
}
