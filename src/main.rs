use anyhow::Result;
use clap::{Parser, Subcommand};
use options_lint::{
    approval, lint_options, print_approval_error, print_error_reports, LintConfig, NoopChecker,
    OsDocTree, SampleChecker, ToolchainChecker,
};
use std::path::{Path, PathBuf};
use std::process::exit;

#[derive(Parser)]
#[command(
    name = "options-lint",
    version,
    about = "Lints localized option documents: front-matter fields and embedded code samples"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lint every locale's option documents
    Run {
        /// Only lint option files whose name contains this substring (case-sensitive)
        filter: Option<String>,

        /// Directory containing `copy/` and optionally `lint.toml`
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Approve the current lint.toml for compiler execution
    Allow {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Remove approval for the current lint.toml
    Deny {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// List approved lint.toml files
    List,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { filter, root } => run(filter.as_deref(), &root),
        Command::Allow { root } => approval::approve(&root.join("lint.toml")).map(|()| 0),
        Command::Deny { root } => approval::deny(&root.join("lint.toml")).map(|()| 0),
        Command::List => list(),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    }
}

/// Run the lint pass. Returns the process exit code: 0 when no reports were
/// accumulated, 1 otherwise.
fn run(filter: Option<&str>, root: &Path) -> Result<i32> {
    println!("Linting the sample code in the option documents");

    let config = LintConfig::load(root)?;

    let checker: Box<dyn SampleChecker> = if config.has_enabled_languages() {
        let lint_toml = root.join("lint.toml");
        if !approval::is_approved(&lint_toml)? {
            print_approval_error(&lint_toml);
            anyhow::bail!("lint.toml not approved");
        }
        Box::new(ToolchainChecker::new(config)?)
    } else {
        log::info!("No languages configured, checking front-matter only");
        Box::new(NoopChecker)
    };

    let tree = OsDocTree::new(root);
    let reports = lint_options(&tree, checker.as_ref(), filter)?;

    if reports.is_empty() {
        return Ok(0);
    }

    print_error_reports(&reports);
    Ok(1)
}

fn list() -> Result<i32> {
    for path in approval::list_approved()? {
        println!("{}", path);
    }
    Ok(0)
}
