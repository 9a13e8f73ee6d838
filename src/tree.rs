use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem access used by the linter.
///
/// The lint pass only needs to enumerate locales, enumerate the option
/// files inside a locale, and read one file at a time, so the whole
/// filesystem surface is this trait. [`OsDocTree`] is the real
/// implementation; [`MemoryTree`] backs tests with an in-memory fixture.
pub trait DocTree {
    /// Locale directory names under the copy root, sorted. Hidden entries
    /// are skipped.
    fn locales(&self) -> Result<Vec<String>>;

    /// Plain-file entries of the locale's `options` directory, sorted.
    /// Hidden entries and subdirectories are skipped. Errors when the
    /// options directory does not exist.
    fn option_files(&self, locale: &str) -> Result<Vec<String>>;

    /// Full text of one option document.
    fn read_option(&self, locale: &str, file: &str) -> Result<String>;

    /// Path identifying the locale's options directory in reports.
    fn options_path(&self, locale: &str) -> PathBuf;

    /// Path identifying one option document in reports.
    fn option_path(&self, locale: &str, file: &str) -> PathBuf {
        self.options_path(locale).join(file)
    }
}

/// [`DocTree`] over the real filesystem, rooted at `<root>/copy`.
pub struct OsDocTree {
    copy_root: PathBuf,
}

impl OsDocTree {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            copy_root: root.as_ref().join("copy"),
        }
    }
}

impl DocTree for OsDocTree {
    fn locales(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.copy_root)
            .with_context(|| format!("Failed to read copy root {}", self.copy_root.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type()?.is_dir() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn option_files(&self, locale: &str) -> Result<Vec<String>> {
        let dir = self.options_path(locale);
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read options directory {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type()?.is_dir() {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn read_option(&self, locale: &str, file: &str) -> Result<String> {
        let path = self.option_path(locale, file);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn options_path(&self, locale: &str) -> PathBuf {
        self.copy_root.join(locale).join("options")
    }
}

/// In-memory [`DocTree`] fixture.
///
/// A locale added with [`MemoryTree::locale_without_options`] models a
/// locale directory that lacks an `options` subdirectory. A file added
/// with [`MemoryTree::unreadable_option`] is enumerated but fails to read,
/// like a file with no read permission.
#[derive(Default)]
pub struct MemoryTree {
    locales: BTreeMap<String, Option<BTreeMap<String, Option<String>>>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option document, creating the locale as needed.
    pub fn option(mut self, locale: &str, file: &str, content: &str) -> Self {
        self.locales
            .entry(locale.to_string())
            .or_insert_with(|| Some(BTreeMap::new()))
            .get_or_insert_with(BTreeMap::new)
            .insert(file.to_string(), Some(content.to_string()));
        self
    }

    /// Add an option document that can be enumerated but not read.
    pub fn unreadable_option(mut self, locale: &str, file: &str) -> Self {
        self.locales
            .entry(locale.to_string())
            .or_insert_with(|| Some(BTreeMap::new()))
            .get_or_insert_with(BTreeMap::new)
            .insert(file.to_string(), None);
        self
    }

    /// Add a locale whose options directory is missing.
    pub fn locale_without_options(mut self, locale: &str) -> Self {
        self.locales.insert(locale.to_string(), None);
        self
    }
}

impl DocTree for MemoryTree {
    fn locales(&self) -> Result<Vec<String>> {
        Ok(self.locales.keys().cloned().collect())
    }

    fn option_files(&self, locale: &str) -> Result<Vec<String>> {
        match self.locales.get(locale) {
            Some(Some(files)) => Ok(files.keys().cloned().collect()),
            _ => anyhow::bail!(
                "Options directory {} doesn't exist",
                self.options_path(locale).display()
            ),
        }
    }

    fn read_option(&self, locale: &str, file: &str) -> Result<String> {
        self.locales
            .get(locale)
            .and_then(|files| files.as_ref())
            .and_then(|files| files.get(file))
            .and_then(|content| content.clone())
            .with_context(|| {
                format!("Failed to read {}", self.option_path(locale, file).display())
            })
    }

    fn options_path(&self, locale: &str) -> PathBuf {
        PathBuf::from("copy").join(locale).join("options")
    }
}
