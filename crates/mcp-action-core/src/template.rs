//! `{name}` placeholder substitution for prompt templates.

use std::collections::HashMap;

use serde_json::Value;

/// Substitute `{name}` placeholders in a single left-to-right pass.
///
/// A placeholder whose name is in `values` takes that value; one whose name
/// is only in `declared` becomes empty; anything else is left as written.
/// Substituted text is never rescanned.
pub fn render(template: &str, declared: &[&str], values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                if let Some(value) = values.get(name) {
                    out.push_str(value);
                } else if !declared.contains(&name) {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Flatten prompt arguments into substitution strings: strings verbatim,
/// `null` as empty, anything else as its JSON text.
pub fn argument_values(arguments: Option<&Value>) -> HashMap<String, String> {
    let Some(Value::Object(map)) = arguments else {
        return HashMap::new();
    };

    map.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}
