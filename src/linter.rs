use crate::checker::SampleChecker;
use crate::frontmatter;
use crate::tree::DocTree;
use anyhow::Result;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Front-matter fields every option document must carry.
const REQUIRED_FIELDS: [&str; 2] = ["display", "oneline"];

/// One failed check, recorded against the document (or options directory)
/// that produced it.
///
/// All variants are non-fatal to the run: a missing directory skips its
/// locale, everything else skips nothing beyond the check itself. The
/// run's only failure signal is the non-zero exit code derived from a
/// non-empty report list.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Options directory {0} doesn't exist")]
    MissingDirectory(PathBuf),

    #[error("Did not have a '{0}' property in the YML header")]
    MissingField(&'static str),

    #[error("Invalid YML header: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    #[error("Failed to read option file: {0:#}")]
    Read(anyhow::Error),

    #[error("{0:#}")]
    Compile(anyhow::Error),
}

/// A `(path, error)` pair accumulated during one run.
#[derive(Debug)]
pub struct ErrorReport {
    pub path: PathBuf,
    pub error: LintError,
}

/// Lint every option document in the tree, printing progress as it goes.
///
/// Returns the accumulated error reports in the order they were produced.
/// An empty list means the run passed. The only fatal error is failing to
/// enumerate the locales themselves.
///
/// When `filter` is given, only option files whose name contains the
/// substring (case-sensitive) are processed; everything else is skipped
/// without producing a report.
pub fn lint_options(
    tree: &dyn DocTree,
    checker: &dyn SampleChecker,
    filter: Option<&str>,
) -> Result<Vec<ErrorReport>> {
    let mut reports = Vec::new();

    for locale in tree.locales()? {
        println!("\n\nLanguage: {}\n", style(&locale).bold());

        let files = match tree.option_files(&locale) {
            Ok(files) => files,
            Err(_) => {
                let path = tree.options_path(&locale);
                reports.push(ErrorReport {
                    path: path.clone(),
                    error: LintError::MissingDirectory(path),
                });
                continue;
            }
        };

        for file in files {
            if let Some(filter) = filter {
                if !file.contains(filter) {
                    continue;
                }
            }

            let before = reports.len();
            lint_document(tree, checker, &locale, &file, &mut reports);
            let failed = reports.len() > before;

            let glyph = if failed {
                style("⤫").red().bold()
            } else {
                style("✓").green().bold()
            };
            let name = if failed {
                style(file.as_str()).red()
            } else {
                style(file.as_str())
            };
            print!("{} {}, ", name, glyph);
            // Glyphs share a line, so a line-buffered stdout would hold
            // them back until the next locale header
            let _ = io::stdout().flush();
        }
    }
    println!();

    Ok(reports)
}

/// Run every check against one document. Each failed check pushes exactly
/// one report; the compile check and the two field checks are independent.
fn lint_document(
    tree: &dyn DocTree,
    checker: &dyn SampleChecker,
    locale: &str,
    file: &str,
    reports: &mut Vec<ErrorReport>,
) {
    let path = tree.option_path(locale, file);

    let markdown = match tree.read_option(locale, file) {
        Ok(text) => text,
        Err(e) => {
            reports.push(ErrorReport {
                path,
                error: LintError::Read(e),
            });
            return;
        }
    };

    if let Err(e) = checker.check_document(&path, &markdown) {
        reports.push(ErrorReport {
            path: path.clone(),
            error: LintError::Compile(e),
        });
    }

    match frontmatter::parse(&markdown) {
        Ok(data) => {
            for field in REQUIRED_FIELDS {
                if !frontmatter::has_field(&data, field) {
                    reports.push(ErrorReport {
                        path: path.clone(),
                        error: LintError::MissingField(field),
                    });
                }
            }
        }
        Err(e) => {
            reports.push(ErrorReport {
                path,
                error: LintError::Frontmatter(e),
            });
        }
    }
}
