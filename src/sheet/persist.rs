//! Loading and saving sheets on disk.
//!
//! Files ending in `.yaml` or `.yml` use the YAML format; anything else uses
//! the native text format. Saves go to a temporary file in the destination
//! directory and are then renamed over the target, so readers never observe
//! a half-written sheet.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::builtin::default_sheet;
use super::sheet::StyleSheet;
use crate::error::StyleError;

/// On-disk encoding of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Text,
    Yaml,
}

impl SheetFormat {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SheetFormat::Yaml
            }
            _ => SheetFormat::Text,
        }
    }
}

impl StyleSheet {
    /// Loads a sheet from `path`, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Io`] with the path if the file cannot be read,
    /// or the format's parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<StyleSheet, StyleError> {
        let path = path.as_ref();
        log::debug!("loading sheet from '{}'", path.display());
        match SheetFormat::from_path(path) {
            SheetFormat::Text => {
                let file = File::open(path).map_err(|e| StyleError::io_at("open", path, e))?;
                StyleSheet::read_from(BufReader::new(file))
            }
            SheetFormat::Yaml => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| StyleError::io_at("read", path, e))?;
                StyleSheet::from_yaml(&text)
            }
        }
    }

    /// Loads a sheet from `path`, or returns a copy of the built-in sheet if
    /// that fails for any reason.
    pub fn load_or_default(path: impl AsRef<Path>) -> StyleSheet {
        let path = path.as_ref();
        match StyleSheet::load(path) {
            Ok(sheet) => sheet,
            Err(err) => {
                log::warn!(
                    "could not load sheet '{}', using built-in sheet: {}",
                    path.display(),
                    err
                );
                default_sheet().clone()
            }
        }
    }

    /// Saves the sheet to `path`, choosing the format by extension.
    ///
    /// The existing file, if any, is replaced atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Io`] with the path if writing or installing the
    /// file fails, [`StyleError::Yaml`] if YAML encoding fails, or the
    /// [`write_to`](StyleSheet::write_to) errors for styles that no longer
    /// validate. The target is untouched on error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StyleError> {
        let path = path.as_ref();
        self.check_styles()?;
        let contents = match SheetFormat::from_path(path) {
            SheetFormat::Text => self.to_text(),
            SheetFormat::Yaml => self.to_yaml()?,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| StyleError::io_at("create a temporary file in", dir, e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StyleError::io_at("write", tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| StyleError::io_at("replace", path, e.error))?;

        log::debug!(
            "saved sheet '{}' ({} styles) to '{}'",
            self.name(),
            self.len(),
            path.display()
        );
        Ok(())
    }
}
