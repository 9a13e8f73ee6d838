//! Integration tests for options-lint
//!
//! These tests run the full lint pass over real directory trees built in
//! temporary locations, covering the end-to-end properties: report
//! accumulation order, locale skipping, failure isolation, and filtering.
//!
//! Sample compilation is stubbed with `MarkerChecker` so the tests never
//! depend on external compilers being installed.

mod common;

use anyhow::Result;
use common::{FixtureTree, MarkerChecker, VALID_DOC};
use options_lint::{lint_options, LintError, NoopChecker, OsDocTree};

#[test]
fn integration_clean_tree_produces_no_reports() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.option("en", "strict.md", VALID_DOC)?;
    fixture.option("pt", "strict.md", VALID_DOC)?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &NoopChecker, None)?;

    assert!(reports.is_empty());
    Ok(())
}

#[test]
fn integration_missing_oneline_is_one_report() -> Result<()> {
    // The worked example: a.md is valid, b.md lacks `oneline`.
    let fixture = FixtureTree::new()?;
    fixture.option("en", "a.md", VALID_DOC)?;
    fixture.option("en", "b.md", "---\ndisplay: \"B\"\n---\n\nNo samples here.\n")?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &MarkerChecker, None)?;

    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("b.md"));
    assert!(matches!(
        reports[0].error,
        LintError::MissingField("oneline")
    ));
    Ok(())
}

#[test]
fn integration_document_missing_both_fields_yields_two_reports() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.option("en", "bare.md", "# No front-matter at all\n")?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &NoopChecker, None)?;

    assert_eq!(reports.len(), 2);
    assert!(matches!(
        reports[0].error,
        LintError::MissingField("display")
    ));
    assert!(matches!(
        reports[1].error,
        LintError::MissingField("oneline")
    ));
    Ok(())
}

#[test]
fn integration_locale_without_options_directory_is_skipped() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.locale_without_options("en")?;
    fixture.option("pt", "strict.md", VALID_DOC)?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &NoopChecker, None)?;

    assert_eq!(reports.len(), 1);
    assert!(matches!(reports[0].error, LintError::MissingDirectory(_)));
    assert!(reports[0].path.ends_with("options"));
    Ok(())
}

#[test]
fn integration_compile_failure_does_not_stop_the_run() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.option(
        "en",
        "bad.md",
        "---\ndisplay: \"Bad\"\noneline: \"has a broken sample\"\n---\n\ncompile-error\n",
    )?;
    fixture.option("en", "good.md", VALID_DOC)?;
    fixture.option("pt", "incomplete.md", "---\ndisplay: \"X\"\n---\n")?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &MarkerChecker, None)?;

    assert_eq!(reports.len(), 2);
    assert!(reports[0].path.ends_with("bad.md"));
    assert!(matches!(reports[0].error, LintError::Compile(_)));
    // The pt locale was still processed after the compile failure
    assert!(reports[1].path.ends_with("incomplete.md"));
    assert!(matches!(
        reports[1].error,
        LintError::MissingField("oneline")
    ));
    Ok(())
}

#[test]
fn integration_filter_restricts_processing() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.option("en", "strictNullChecks.md", "# no front-matter\n")?;
    fixture.option("en", "allowJs.md", "# no front-matter\n")?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &NoopChecker, Some("strict"))?;

    // Only strictNullChecks.md was processed; allowJs.md produced no report
    assert_eq!(reports.len(), 2);
    assert!(reports
        .iter()
        .all(|r| r.path.ends_with("strictNullChecks.md")));
    Ok(())
}

#[test]
fn integration_subdirectories_inside_options_are_skipped() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.option("en", "strict.md", VALID_DOC)?;
    fixture.options_subdir("en", "drafts")?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &NoopChecker, None)?;

    assert!(reports.is_empty());
    Ok(())
}

#[test]
fn integration_reports_keep_accumulation_order_across_locales() -> Result<()> {
    let fixture = FixtureTree::new()?;
    fixture.option("de", "a.md", "---\ndisplay: \"A\"\n---\n")?;
    fixture.locale_without_options("en")?;
    fixture.option("pt", "b.md", "---\noneline: \"b\"\n---\n")?;

    let tree = OsDocTree::new(fixture.root());
    let reports = lint_options(&tree, &NoopChecker, None)?;

    assert_eq!(reports.len(), 3);
    assert!(matches!(
        reports[0].error,
        LintError::MissingField("oneline")
    ));
    assert!(matches!(reports[1].error, LintError::MissingDirectory(_)));
    assert!(matches!(
        reports[2].error,
        LintError::MissingField("display")
    ));
    Ok(())
}

#[test]
fn integration_missing_copy_root_is_fatal() -> Result<()> {
    let fixture = FixtureTree::new()?;

    let tree = OsDocTree::new(fixture.root());
    let result = lint_options(&tree, &NoopChecker, None);

    assert!(result.is_err());
    Ok(())
}
