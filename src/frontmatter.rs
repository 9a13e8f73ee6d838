use serde_yaml::{Mapping, Value};

/// Split an option document into its front-matter source and body.
///
/// Front-matter is a YAML block delimited by `---` lines at the very start
/// of the document. Returns `(front_matter, body)`; a document without a
/// complete front-matter block yields `(None, document)`.
pub fn split(document: &str) -> (Option<&str>, &str) {
    let rest = match document.strip_prefix("---") {
        Some(rest) => rest,
        None => return (None, document),
    };
    let rest = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        Some(rest) => rest,
        None => return (None, document),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    // Opening fence without a closing one
    (None, document)
}

/// Parse the front-matter of a document into a YAML mapping.
///
/// A document without front-matter (or with a non-mapping front-matter
/// value) parses to an empty mapping, so required-field checks report every
/// field as missing.
pub fn parse(document: &str) -> Result<Mapping, serde_yaml::Error> {
    match split(document).0 {
        Some(source) => {
            let value: Value = serde_yaml::from_str(source)?;
            match value {
                Value::Mapping(mapping) => Ok(mapping),
                _ => Ok(Mapping::new()),
            }
        }
        None => Ok(Mapping::new()),
    }
}

/// Whether the mapping carries a non-falsy value for `name`.
///
/// Falsy-but-present values (empty string, `false`, `0`, explicit null)
/// count as missing, matching how the option documents have always been
/// linted.
pub fn has_field(data: &Mapping, name: &str) -> bool {
    data.iter()
        .find(|(key, _)| key.as_str() == Some(name))
        .map(|(_, value)| is_truthy(value))
        .unwrap_or(false)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        _ => true,
    }
}
