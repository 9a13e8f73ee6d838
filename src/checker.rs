use crate::config::{LanguageConfig, LintConfig};
use crate::samples::extract_compilable_samples;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Maximum size of a single sample in bytes (1MB)
const MAX_SAMPLE_SIZE: usize = 1_000_000;

/// Maximum number of samples per document
const MAX_SAMPLES_PER_DOCUMENT: usize = 1000;

/// Capability for validating the code samples embedded in one document.
///
/// The linter only ever calls this single fallible operation, so tests can
/// substitute a mock that fails on demand instead of invoking compilers.
pub trait SampleChecker {
    /// Validate every compilable sample in `markdown`.
    ///
    /// Returns `Err` describing the first sample that fails; the error is
    /// recorded as one compile report for the document.
    fn check_document(&self, path: &Path, markdown: &str) -> Result<()>;
}

/// Checker used when no languages are configured: every document passes.
pub struct NoopChecker;

impl SampleChecker for NoopChecker {
    fn check_document(&self, _path: &Path, _markdown: &str) -> Result<()> {
        Ok(())
    }
}

/// Compiler-backed [`SampleChecker`].
///
/// Each sample is written to a file in a run-scoped temporary directory and
/// handed to the compiler configured for its fence marker. Samples whose
/// fence marker matches no enabled language are skipped silently.
pub struct ToolchainChecker {
    config: LintConfig,
    temp_dir: TempDir,
}

impl ToolchainChecker {
    pub fn new(config: LintConfig) -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        log::info!("Using temporary directory: {:?}", temp_dir.path());
        Ok(Self { config, temp_dir })
    }

    /// Find the enabled language whose fence markers contain `fence`.
    fn find_by_fence(&self, fence: &str) -> Option<(&str, &LanguageConfig)> {
        self.config
            .languages
            .iter()
            .find(|(name, lang)| {
                lang.enabled
                    && lang
                        .resolved_fence_markers(name)
                        .iter()
                        .any(|marker| marker == fence)
            })
            .map(|(name, lang)| (name.as_str(), lang))
    }

    /// Write one sample (with optional preamble) to `temp_file` and run the
    /// configured compiler over it.
    fn compile(
        &self,
        lang_name: &str,
        lang: &LanguageConfig,
        code: &str,
        temp_file: &Path,
    ) -> Result<()> {
        let mut file = File::create(temp_file).context("Failed to create temporary file")?;

        if let Some(ref preamble) = lang.preamble {
            writeln!(file, "{}", preamble)?;
            writeln!(file)?;
        }

        write!(file, "{}", code)?;
        drop(file);

        let output = Command::new(&lang.compiler)
            .args(&lang.flags)
            .arg(temp_file)
            .output()
            .with_context(|| {
                format!(
                    "Failed to execute compiler '{}' for language '{}'",
                    lang.compiler, lang_name
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_msg = if !stderr.is_empty() {
                stderr.to_string()
            } else {
                stdout.to_string()
            };
            anyhow::bail!("{} compilation failed:\n{}", lang_name, error_msg);
        }

        Ok(())
    }
}

impl SampleChecker for ToolchainChecker {
    fn check_document(&self, path: &Path, markdown: &str) -> Result<()> {
        let samples = extract_compilable_samples(markdown);

        if samples.is_empty() {
            return Ok(());
        }

        if samples.len() > MAX_SAMPLES_PER_DOCUMENT {
            anyhow::bail!(
                "Document {} has {} samples, exceeding limit of {}",
                path.display(),
                samples.len(),
                MAX_SAMPLES_PER_DOCUMENT
            );
        }

        let doc_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .trim_end_matches(".md");

        for (i, (final_code, sample)) in samples.into_iter().enumerate() {
            if final_code.len() > MAX_SAMPLE_SIZE {
                anyhow::bail!(
                    "Sample #{} in {} exceeds size limit of {} bytes ({} bytes)",
                    i,
                    path.display(),
                    MAX_SAMPLE_SIZE,
                    final_code.len()
                );
            }

            let (lang_name, lang) = match self.find_by_fence(&sample.language) {
                Some(found) => found,
                None => {
                    // Unknown fence marker, not checked
                    continue;
                }
            };

            let temp_file = self.temp_dir.path().join(format!(
                "{}_{}_sample_{}{}",
                lang_name,
                doc_name,
                i,
                lang.file_extension(lang_name)
            ));

            log::debug!("Compiling {} sample: {}", lang_name, temp_file.display());

            self.compile(lang_name, lang, &final_code, &temp_file)
                .with_context(|| {
                    format!("Sample #{} ({}) in {}", i, lang_name, path.display())
                })?;
        }

        Ok(())
    }
}
