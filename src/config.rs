use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration for the sample checker.
///
/// Deserialized from a `lint.toml` file at the docs root. Each configured
/// language maps markdown fence markers to a compiler invocation used to
/// validate embedded code samples.
///
/// # Example
///
/// ```toml
/// [languages.typescript]
/// compiler = "tsc"
/// flags = ["--noEmit", "--strict"]
/// fence_markers = ["ts", "typescript", "tsx"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// Language-specific configurations indexed by language name
    #[serde(default)]
    pub languages: HashMap<String, LanguageConfig>,
}

/// Configuration for a specific language.
///
/// The `compiler`, `flags`, and `preamble` fields support environment
/// variable expansion using `${VAR}` syntax.
///
/// # Security
///
/// Compiler paths are validated to prevent command injection. Paths cannot
/// contain shell metacharacters or use parent directory traversal, and a
/// `lint.toml` that configures compilers must be approved before those
/// compilers are executed (see the `approval` module).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Whether this language is enabled for checking
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Compiler executable (supports ${VAR} environment variable expansion)
    pub compiler: String,

    /// Compiler flags
    #[serde(default)]
    pub flags: Vec<String>,

    /// Optional preamble to prepend to all samples
    #[serde(default)]
    pub preamble: Option<String>,

    /// Fence markers that identify this language in markdown.
    /// When empty, markers default from the language name.
    #[serde(default)]
    pub fence_markers: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl LanguageConfig {
    /// Validate the configuration for security and correctness
    pub fn validate(&self) -> Result<()> {
        // Ensure compiler path doesn't contain shell metacharacters
        let dangerous_chars = [';', '|', '&', '`', '\n', '\r'];
        for ch in dangerous_chars {
            if self.compiler.contains(ch) {
                anyhow::bail!(
                    "Compiler path contains invalid character '{}': {}",
                    ch.escape_default(),
                    self.compiler
                );
            }
        }

        // Ensure compiler path doesn't use parent directory traversal
        let compiler_path = Path::new(&self.compiler);
        for component in compiler_path.components() {
            if matches!(component, std::path::Component::ParentDir) {
                anyhow::bail!("Compiler path cannot contain '..': {}", self.compiler);
            }
        }

        if self.compiler.is_empty() {
            anyhow::bail!("Compiler path cannot be empty");
        }

        Ok(())
    }

    /// Fence markers for this language, falling back to defaults derived
    /// from the language name when none were configured.
    pub fn resolved_fence_markers(&self, lang_name: &str) -> Vec<String> {
        if self.fence_markers.is_empty() {
            default_fence_markers(lang_name)
        } else {
            self.fence_markers.clone()
        }
    }

    /// File extension used when writing samples of this language to disk.
    pub fn file_extension(&self, lang_name: &str) -> String {
        let marker = self
            .fence_markers
            .first()
            .map(String::as_str)
            .unwrap_or(lang_name);
        match marker {
            "typescript" | "ts" | "tsx" => ".ts".to_string(),
            "javascript" | "js" | "jsx" => ".js".to_string(),
            "c" | "h" => ".c".to_string(),
            "cpp" | "c++" | "cxx" => ".cpp".to_string(),
            "rust" | "rs" => ".rs".to_string(),
            "python" | "py" => ".py".to_string(),
            "go" => ".go".to_string(),
            "json" | "jsonc" | "json5" => ".json".to_string(),
            "bash" | "sh" | "shell" => ".sh".to_string(),
            other => format!(".{}", other),
        }
    }
}

/// Default fence markers for a language name, covering the common aliases
/// used for syntax highlighting in the option documents.
fn default_fence_markers(lang_name: &str) -> Vec<String> {
    match lang_name {
        "typescript" => vec!["typescript", "ts", "tsx"],
        "javascript" => vec!["javascript", "js", "jsx"],
        "c" => vec!["c", "h"],
        "cpp" => vec!["cpp", "c++", "cxx"],
        "rust" => vec!["rust", "rs"],
        "python" => vec!["python", "py"],
        "json" => vec!["json", "jsonc", "json5"],
        "bash" => vec!["bash", "sh"],
        _ => vec![lang_name],
    }
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl LintConfig {
    /// Load configuration from `<root>/lint.toml`, expanding environment
    /// variables and validating each language entry.
    ///
    /// A missing `lint.toml` is not an error; it yields an empty
    /// configuration, which disables sample compilation entirely.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("lint.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: LintConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        for (name, lang_config) in config.languages.iter_mut() {
            lang_config.compiler = expand_env_vars(&lang_config.compiler);
            for flag in lang_config.flags.iter_mut() {
                *flag = expand_env_vars(flag);
            }
            if let Some(preamble) = lang_config.preamble.as_mut() {
                *preamble = expand_env_vars(preamble);
            }

            lang_config
                .validate()
                .with_context(|| format!("Invalid configuration for language '{}'", name))?;
        }

        Ok(config)
    }

    /// True when at least one language is enabled, i.e. the run will
    /// execute external compilers.
    pub fn has_enabled_languages(&self) -> bool {
        self.languages.values().any(|lang| lang.enabled)
    }
}

/// Expand environment variables in a string
/// Supports ${VAR_NAME} syntax
/// This function processes the string in a single pass to avoid re-processing expanded values
fn expand_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            // Collect variable name
            let mut var_name = String::new();
            let mut found_close = false;

            for ch in chars.by_ref() {
                if ch == '}' {
                    found_close = true;
                    break;
                }
                var_name.push(ch);
            }

            if found_close {
                match env::var(&var_name) {
                    Ok(value) => result.push_str(&value),
                    Err(_) => {
                        log::warn!(
                            "Environment variable '{}' not found, leaving unexpanded",
                            var_name
                        );
                        result.push_str("${");
                        result.push_str(&var_name);
                        result.push('}');
                    }
                }
            } else {
                // No closing brace found, treat as literal
                result.push_str("${");
                result.push_str(&var_name);
            }
        } else {
            result.push(ch);
        }
    }

    result
}
