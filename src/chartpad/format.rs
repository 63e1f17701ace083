//! Text formatting rules shared by the renderer and the serializer.

/// Appended to a field's label when it stands in for a missing `prefix`.
pub const LABEL_DELIMITER: &str = "：";

/// Joins the selected options of a checkbox group when no `separator` is declared.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Largest indent honoured. Larger values from a template are clamped to this.
pub const MAX_INDENT: usize = 40;

/// Resolves a field's prefix: the declared one if present (even empty), otherwise
/// `"{label}："` for labelled fields, otherwise nothing.
pub fn resolve_prefix(raw: Option<&str>, label: Option<&str>) -> String {
    match (raw, label) {
        (Some(prefix), _) => prefix.to_string(),
        (None, Some(label)) if !label.is_empty() => format!("{}{}", label, LABEL_DELIMITER),
        _ => String::new(),
    }
}

pub fn resolve_suffix(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

pub fn resolve_separator(raw: Option<&str>) -> &str {
    raw.unwrap_or(DEFAULT_SEPARATOR)
}

/// Prefixes `indent` spaces (at most [`MAX_INDENT`]) to every non-empty line. Empty
/// lines stay empty.
pub fn apply_indent(text: &str, indent: usize) -> String {
    if text.is_empty() || indent == 0 {
        return text.to_string();
    }
    let pad = " ".repeat(indent.min(MAX_INDENT));
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads an indent the way template authors write it: the leading integer of the
/// text counts, anything negative or non-numeric is 0, and anything past
/// [`MAX_INDENT`] is clamped.
pub fn parse_indent(raw: &str) -> usize {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end]
        .parse::<usize>()
        .map_or(MAX_INDENT, |n| n.min(MAX_INDENT))
}
