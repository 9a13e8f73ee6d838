use crate::linter::ErrorReport;
use console::style;
use std::path::Path;

/// Dump every accumulated report to stdout, in accumulation order, followed
/// by the filter usage hint.
pub fn print_error_reports(reports: &[ErrorReport]) {
    for report in reports {
        println!(
            "\n> {}\n",
            style(report.path.display().to_string()).red().bold()
        );
        println!("{}", report.error);
    }
    println!("\n");

    println!(
        "Note: you can add an extra argument to the lint command ( options-lint run [opt] ) to just run one lint."
    );
}

/// Explain the approval gate when a lint.toml configures compilers but has
/// not been approved.
pub fn print_approval_error(lint_toml_path: &Path) {
    eprintln!("Error: lint.toml not approved for compiler execution");
    eprintln!();
    eprintln!("For security, options-lint requires explicit approval before");
    eprintln!("running compilers specified in lint.toml.");
    eprintln!();
    eprintln!("To approve this configuration after reviewing it:");
    eprintln!("  options-lint allow");
    eprintln!();
    eprintln!("Current lint.toml: {}", lint_toml_path.display());
}
