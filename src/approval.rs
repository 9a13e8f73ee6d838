//! Approval tracking for lint.toml files.
//!
//! A lint.toml names arbitrary compiler executables, so running one that
//! the user has not reviewed would execute unvetted commands. A config is
//! approved by hashing its path and content; editing the file invalidates
//! the approval.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Compute SHA256 hash of path + "\n" + content (direnv style)
pub fn compute_hash(path: &Path, content: &str) -> String {
    let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let input = format!("{}\n{}", canonical_path.display(), content);
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Get the approval directory path
fn get_approval_dir() -> Result<PathBuf> {
    // Check for XDG_DATA_HOME environment variable first (respects XDG standard on all platforms)
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg_data_home)
            .join("options-lint")
            .join("allow"));
    }

    // Fall back to platform-specific defaults via directories crate
    let proj_dirs = ProjectDirs::from("", "", "options-lint")
        .context("Failed to determine project directories")?;
    Ok(proj_dirs.data_dir().join("allow"))
}

/// Check if a lint.toml is approved
pub fn is_approved(lint_toml_path: &Path) -> Result<bool> {
    let content = fs::read_to_string(lint_toml_path)
        .with_context(|| format!("Failed to read {}", lint_toml_path.display()))?;
    let hash = compute_hash(lint_toml_path, &content);
    let approval_dir = get_approval_dir()?;
    let approval_file = approval_dir.join(&hash);
    Ok(approval_file.exists())
}

/// Approve a lint.toml
pub fn approve(lint_toml_path: &Path) -> Result<()> {
    let content = fs::read_to_string(lint_toml_path)
        .with_context(|| format!("Failed to read {}", lint_toml_path.display()))?;
    let hash = compute_hash(lint_toml_path, &content);
    let approval_dir = get_approval_dir()?;

    fs::create_dir_all(&approval_dir).with_context(|| {
        format!(
            "Failed to create approval directory: {}",
            approval_dir.display()
        )
    })?;

    // Write approval file with the path
    let approval_file = approval_dir.join(&hash);
    let canonical_path = lint_toml_path
        .canonicalize()
        .unwrap_or_else(|_| lint_toml_path.to_path_buf());
    fs::write(&approval_file, canonical_path.display().to_string())
        .with_context(|| format!("Failed to write approval file: {}", approval_file.display()))?;

    Ok(())
}

/// Deny (remove approval) for a lint.toml
pub fn deny(lint_toml_path: &Path) -> Result<()> {
    let content = fs::read_to_string(lint_toml_path)
        .with_context(|| format!("Failed to read {}", lint_toml_path.display()))?;
    let hash = compute_hash(lint_toml_path, &content);
    let approval_dir = get_approval_dir()?;
    let approval_file = approval_dir.join(&hash);

    if approval_file.exists() {
        fs::remove_file(&approval_file).with_context(|| {
            format!(
                "Failed to remove approval file: {}",
                approval_file.display()
            )
        })?;
    }

    Ok(())
}

/// List all approved configs
pub fn list_approved() -> Result<Vec<String>> {
    let approval_dir = get_approval_dir()?;

    if !approval_dir.exists() {
        return Ok(vec![]);
    }

    let mut approved = Vec::new();
    for entry in fs::read_dir(&approval_dir).with_context(|| {
        format!(
            "Failed to read approval directory: {}",
            approval_dir.display()
        )
    })? {
        let entry = entry?;
        if entry.path().is_file() {
            if let Ok(path_content) = fs::read_to_string(entry.path()) {
                approved.push(path_content);
            }
        }
    }

    Ok(approved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_hash_changes_with_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lint.toml");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "[languages]").unwrap();

        let a = compute_hash(&path, "[languages.typescript]");
        let b = compute_hash(&path, "[languages.c]");
        assert_ne!(a, b);
    }

    #[test]
    #[serial]
    fn test_approve_then_deny_round_trip() {
        let data_dir = TempDir::new().unwrap();
        std::env::set_var("XDG_DATA_HOME", data_dir.path());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lint.toml");
        fs::write(&path, "[languages.typescript]\ncompiler = \"tsc\"\n").unwrap();

        assert!(!is_approved(&path).unwrap());
        approve(&path).unwrap();
        assert!(is_approved(&path).unwrap());
        assert_eq!(list_approved().unwrap().len(), 1);

        deny(&path).unwrap();
        assert!(!is_approved(&path).unwrap());

        std::env::remove_var("XDG_DATA_HOME");
    }

    #[test]
    #[serial]
    fn test_editing_config_invalidates_approval() {
        let data_dir = TempDir::new().unwrap();
        std::env::set_var("XDG_DATA_HOME", data_dir.path());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lint.toml");
        fs::write(&path, "[languages.typescript]\ncompiler = \"tsc\"\n").unwrap();
        approve(&path).unwrap();

        fs::write(&path, "[languages.typescript]\ncompiler = \"evil\"\n").unwrap();
        assert!(!is_approved(&path).unwrap());

        std::env::remove_var("XDG_DATA_HOME");
    }
}
