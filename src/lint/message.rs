//! Placeholder expansion for rule error messages.
//!
//! Declarative rule descriptors carry message templates with `{name}`
//! placeholders (`{section}`, `{option}`, `{value}`, `{min}`, `{max}`).
//! Expansion is total: unknown placeholders are left verbatim, and `{{` /
//! `}}` escape to literal braces.

/// A segment of a message template.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Literal text
    Literal(String),
    /// Placeholder reference: {name}
    Placeholder(String),
}

/// Parse a template into literal and placeholder segments.
fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    current_literal.push('{');
                    continue;
                }

                // Read the placeholder name up to the closing brace; an
                // unterminated brace is treated as literal text.
                let mut name = String::new();
                let mut closed = false;
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    name.push(next);
                }

                if closed {
                    if !current_literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                } else {
                    current_literal.push('{');
                    current_literal.push_str(&name);
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                current_literal.push('}');
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }
    segments
}

/// Expand `{name}` placeholders in a message template.
///
/// `vars` maps placeholder names to replacement values. Placeholders with
/// no matching variable are reproduced verbatim, braces included.
pub fn expand(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in parse_template(template) {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Placeholder(name) => {
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(&name);
                        out.push('}');
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_placeholders() {
        assert_eq!(
            expand("Missing required section: {section}", &[("section", "printer")]),
            "Missing required section: printer"
        );
    }

    #[test]
    fn expands_multiple_placeholders() {
        let msg = expand(
            "Value {value} for {option} is outside [{min}, {max}]",
            &[
                ("value", "1500"),
                ("option", "max_velocity"),
                ("min", "0"),
                ("max", "1000"),
            ],
        );
        assert_eq!(msg, "Value 1500 for max_velocity is outside [0, 1000]");
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        assert_eq!(
            expand("Bad value {value}", &[("section", "printer")]),
            "Bad value {value}"
        );
    }

    #[test]
    fn double_braces_escape_to_literals() {
        assert_eq!(expand("literal {{braces}}", &[]), "literal {braces}");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(expand("no placeholders here", &[]), "no placeholders here");
    }

    #[test]
    fn unterminated_brace_is_literal() {
        assert_eq!(expand("oops {section", &[("section", "printer")]), "oops {section");
    }
}
