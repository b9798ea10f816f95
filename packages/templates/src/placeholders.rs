// ABOUTME: {{placeholder}} substitution for template bodies
// ABOUTME: Pure string transformation, exact-token and case-sensitive, no escaping mechanism

use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholder name to replacement text
pub type PlaceholderValues = HashMap<String, String>;

/// Replace every `{{name}}` whose name is a key of `values`.
///
/// Unknown names are left untouched. Replacement text is emitted as-is and
/// never re-scanned, so a value containing `{{other}}` stays literal.
pub fn substitute_placeholders(text: &str, values: &PlaceholderValues) -> String {
    if values.is_empty() {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };

        match values.get(&after_open[..end]) {
            Some(value) => {
                output.push_str(&rest[..start]);
                output.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Keep one brace and rescan: "{{{{name}}" still matches at offset 2
                output.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Distinct placeholder names in order of first appearance
pub fn find_placeholders(text: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };

        let name = &after_open[..end];
        if is_placeholder_name(name) {
            if !names.contains(&name) {
                names.push(name);
            }
            rest = &after_open[end + CLOSE.len()..];
        } else {
            rest = &rest[start + 1..];
        }
    }

    names
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['{', '}']) && !name.chars().any(char::is_whitespace)
}
