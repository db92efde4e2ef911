//! Best-effort repair of almost-valid JSON produced by a generative model.
//!
//! Handles the common failure class: single-quoted strings, unquoted keys,
//! trailing commas, unterminated strings, unbalanced brackets, and
//! Python-style literals. Single pass over the text; the caller makes
//! exactly one repair attempt before giving up.

/// Rewrite near-valid JSON into something `serde_json` may accept.
///
/// The output is not guaranteed to parse — irrecoverable text comes out
/// as garbage and fails the second parse attempt in the caller.
pub fn repair_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut open: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut delim = '"';
    let mut escaped = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_string {
            if escaped {
                out.push(c);
                escaped = false;
            } else if c == '\\' {
                if delim == '\'' && chars.peek() == Some(&'\'') {
                    // \' is not a JSON escape; unwrap it
                    chars.next();
                    out.push('\'');
                } else {
                    out.push(c);
                    escaped = true;
                }
            } else if c == delim {
                out.push('"');
                in_string = false;
            } else if c == '"' {
                // Bare double quote inside a single-quoted string
                out.push('\\');
                out.push('"');
            } else {
                out.push(c);
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                in_string = true;
                delim = c;
                out.push('"');
            }
            '{' => {
                open.push('}');
                out.push(c);
            }
            '[' => {
                open.push(']');
                out.push(c);
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                open.pop();
                out.push(c);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::new();
                word.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                push_word(&mut out, &word);
            }
            _ => out.push(c),
        }
    }

    if in_string {
        out.push('"');
    }
    drop_trailing_comma(&mut out);
    while let Some(closer) = open.pop() {
        out.push(closer);
    }
    out
}

/// Emit a bare word: number suffixes pass through, known literals are
/// normalized, anything else becomes a quoted string (covers bare keys
/// and bare label values alike).
fn push_word(out: &mut String, word: &str) {
    let after_number = out
        .chars()
        .last()
        .is_some_and(|p| p.is_ascii_digit() || p == '.');
    if after_number {
        // Exponent of a numeric literal like 1e5 — leave untouched
        out.push_str(word);
        return;
    }
    match word {
        "true" | "false" | "null" => out.push_str(word),
        "True" => out.push_str("true"),
        "False" => out.push_str("false"),
        "None" | "Null" | "NULL" => out.push_str("null"),
        _ => {
            out.push('"');
            out.push_str(word);
            out.push('"');
        }
    }
}

/// Remove a trailing comma (and trailing whitespace) from the output
/// buffer, so `{"a":1,}` closes cleanly.
fn drop_trailing_comma(out: &mut String) {
    let trimmed = out.trim_end();
    if trimmed.ends_with(',') {
        out.truncate(trimmed.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parsed(input: &str) -> Value {
        serde_json::from_str(&repair_json(input)).expect("repaired text should parse")
    }

    #[test]
    fn unquoted_key_and_trailing_comma() {
        assert_eq!(parsed("{a:1,}"), json!({"a": 1}));
    }

    #[test]
    fn trailing_comma_in_array() {
        assert_eq!(parsed("[1, 2, 3,]"), json!([1, 2, 3]));
    }

    #[test]
    fn single_quoted_strings() {
        assert_eq!(parsed("{'a': 'b'}"), json!({"a": "b"}));
    }

    #[test]
    fn escaped_single_quote_inside_single_quoted_string() {
        assert_eq!(parsed(r"{'a': 'it\'s'}"), json!({"a": "it's"}));
    }

    #[test]
    fn double_quote_inside_single_quoted_string() {
        assert_eq!(parsed(r#"{'a': 'say "hi"'}"#), json!({"a": "say \"hi\""}));
    }

    #[test]
    fn unbalanced_brackets_closed_in_order() {
        assert_eq!(parsed(r#"{"a": [1, 2"#), json!({"a": [1, 2]}));
    }

    #[test]
    fn unterminated_string_closed() {
        assert_eq!(parsed(r#"{"a": "b"#), json!({"a": "b"}));
    }

    #[test]
    fn python_literals_normalized() {
        assert_eq!(
            parsed("{'ok': True, 'missing': None, 'bad': False}"),
            json!({"ok": true, "missing": null, "bad": false})
        );
    }

    #[test]
    fn bare_label_value_becomes_string() {
        assert_eq!(
            parsed("{decision: include}"),
            json!({"decision": "include"})
        );
    }

    #[test]
    fn exponent_numbers_untouched() {
        assert_eq!(parsed("[1e5, 2.5e2]"), json!([1e5, 2.5e2]));
    }

    #[test]
    fn escaped_quotes_preserved() {
        assert_eq!(parsed(r#"{"a": "b \"c\"",}"#), json!({"a": "b \"c\""}));
    }

    #[test]
    fn valid_json_passes_through() {
        let text = r#"{"id": "42", "decision": "include", "subtopic": null}"#;
        assert_eq!(parsed(text), serde_json::from_str::<Value>(text).unwrap());
    }

    #[test]
    fn plain_prose_stays_unparsable() {
        let repaired = repair_json("not json at all");
        assert!(serde_json::from_str::<Value>(&repaired).is_err());
    }
}
