use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// A code sample extracted from an option document.
///
/// Samples are fenced code blocks. The fence info string carries the
/// language marker plus optional comma-separated attributes:
///
/// - `ignore` - skip compilation for this sample
/// - `propagate` - make this sample's code available to later samples in
///   the same document
///
/// ````markdown
/// ```ts,propagate
/// interface Point { x: number; y: number }
/// ```
///
/// ```ts
/// const p: Point = { x: 1, y: 2 };
/// ```
/// ````
#[derive(Debug, Clone)]
pub struct Sample {
    /// The language from the fence marker (e.g., "ts", "json")
    pub language: String,
    /// The sample source text
    pub code: String,
    /// Whether this sample should be skipped during compilation
    pub ignore: bool,
    /// Whether this sample's code is prepended to subsequent samples
    pub propagate: bool,
}

/// Extract all fenced code samples from a markdown document.
pub fn extract_samples(content: &str) -> Vec<Sample> {
    let parser = Parser::new(content);
    let mut samples = Vec::new();
    let mut in_code_block = false;
    let mut current_code = String::new();
    let mut current_language = String::new();
    let mut current_ignore = false;
    let mut current_propagate = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                in_code_block = true;
                current_code.clear();

                let (lang, flags) = parse_fence_info(info.as_ref());
                current_language = lang;
                current_ignore = flags.contains(&"ignore");
                current_propagate = flags.contains(&"propagate");
            }

            Event::End(TagEnd::CodeBlock) => {
                if in_code_block {
                    samples.push(Sample {
                        language: current_language.clone(),
                        code: current_code.clone(),
                        ignore: current_ignore,
                        propagate: current_propagate,
                    });

                    in_code_block = false;
                }
            }

            Event::Text(text) => {
                if in_code_block {
                    current_code.push_str(&text);
                }
            }

            _ => {}
        }
    }

    samples
}

/// Parse a fence info string into language and flags.
/// "ts" -> ("ts", []), "ts,ignore" -> ("ts", ["ignore"])
fn parse_fence_info(info: &str) -> (String, Vec<&str>) {
    let parts: Vec<&str> = info.split(',').map(|s| s.trim()).collect();

    if parts.is_empty() {
        return (String::new(), Vec::new());
    }

    let language = parts[0].to_string();
    let flags = parts[1..].to_vec();

    (language, flags)
}

/// Extract compilable samples, applying the `propagate` attribute.
///
/// Samples marked `propagate` have their code accumulated; every later
/// non-propagated sample receives the accumulated code as a preamble.
/// Samples marked `ignore` are dropped entirely. Propagation never crosses
/// document boundaries because extraction is per document.
///
/// Returns `(final_code, sample)` pairs where `final_code` includes any
/// propagated code prepended.
pub fn extract_compilable_samples(content: &str) -> Vec<(String, Sample)> {
    let samples = extract_samples(content);
    let mut result = Vec::new();
    let mut propagated_code = String::new();

    for sample in samples {
        if sample.ignore {
            continue;
        }

        let mut final_code = String::new();

        if !sample.propagate && !propagated_code.is_empty() {
            final_code.push_str(&propagated_code);
            final_code.push('\n');
        }

        final_code.push_str(&sample.code);

        if sample.propagate {
            propagated_code.push_str(&sample.code);
            propagated_code.push('\n');
        }

        result.push((final_code, sample));
    }

    result
}
