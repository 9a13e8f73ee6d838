//! Common test utilities for integration tests
//!
//! Builds throwaway `copy/<locale>/options/` trees inside a temporary
//! directory so tests exercise the real filesystem implementation. Cleanup
//! is automatic via the TempDir RAII guard.

use anyhow::Result;
use options_lint::SampleChecker;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A docs root (the directory containing `copy/`) built on demand.
pub struct FixtureTree {
    dir: TempDir,
}

impl FixtureTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// The docs root path, suitable for `OsDocTree::new`.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write one option document, creating intermediate directories.
    pub fn option(&self, locale: &str, name: &str, content: &str) -> Result<&Self> {
        let options = self.root().join("copy").join(locale).join("options");
        fs::create_dir_all(&options)?;
        fs::write(options.join(name), content)?;
        Ok(self)
    }

    /// Create a locale directory with no `options` subdirectory.
    pub fn locale_without_options(&self, locale: &str) -> Result<&Self> {
        fs::create_dir_all(self.root().join("copy").join(locale))?;
        Ok(self)
    }

    /// Create a subdirectory inside a locale's options directory.
    pub fn options_subdir(&self, locale: &str, name: &str) -> Result<&Self> {
        fs::create_dir_all(
            self.root()
                .join("copy")
                .join(locale)
                .join("options")
                .join(name),
        )?;
        Ok(self)
    }
}

/// Checker that raises for any document containing `compile-error`,
/// standing in for a compiler without executing one.
pub struct MarkerChecker;

impl SampleChecker for MarkerChecker {
    fn check_document(&self, _path: &Path, markdown: &str) -> Result<()> {
        if markdown.contains("compile-error") {
            anyhow::bail!("sample raised a type error");
        }
        Ok(())
    }
}

/// A valid option document: both required fields, one well-formed sample.
pub const VALID_DOC: &str = r#"---
display: "Strict"
oneline: "Enable all of the strict family of checks"
---

The `strict` flag enables a family of checks.

```ts
const x: number = 1;
```
"#;
