//! options-lint library
//!
//! This library implements the lint pass behind the options-lint binary: it
//! walks `copy/<locale>/options/*.md`, checks that every option document has
//! the required front-matter fields, and compiles embedded code samples with
//! the compilers configured in `lint.toml`.
//!
//! ## Public API
//!
//! The main entry point is [`lint_options`], which threads an explicit
//! error-report list through the traversal and returns it to the caller.
//! Filesystem access goes through the [`DocTree`] trait and sample checking
//! through the [`SampleChecker`] trait, so both can be substituted in tests.

pub mod approval;
mod checker;
mod config;
mod frontmatter;
mod linter;
mod reporting;
mod samples;
mod tree;

pub use checker::{NoopChecker, SampleChecker, ToolchainChecker};
pub use config::{LanguageConfig, LintConfig};
pub use linter::{lint_options, ErrorReport, LintError};
pub use reporting::{print_approval_error, print_error_reports};
pub use tree::{DocTree, MemoryTree, OsDocTree};
