//! # Section Serializer
//!
//! Reads the live [`Form`] back into note text. Each field produces at most one piece
//! of text; a [`LineBuffer`] decides whether that piece opens a new line or, when the
//! field declares a `joiner`, continues the previous one.
//!
//! Serialization only reads the form. Hidden details are skipped no matter what text
//! they still hold.

use crate::form::{ChoiceGroup, ChoiceOption, Detail, FieldNode, Form, RenderedField};
use crate::format::{apply_indent, resolve_prefix, resolve_separator, resolve_suffix};
use crate::model::SectionKey;

/// Serializes every field tagged with `key`, in render order. Empty when nothing in
/// the section produced text.
pub fn serialize_section(form: &Form, key: SectionKey) -> String {
    let mut buffer = LineBuffer::default();
    for field in form.fields(key) {
        buffer.push(field.serialize_line(), field.meta.joiner.as_deref());
    }
    buffer.finish()
}

/// Accumulates output lines and applies the joiner rule.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Empty text never produces a line and never consumes the joiner. With a joiner
    /// and a previous line, `text` is appended to that line.
    pub fn push(&mut self, text: String, joiner: Option<&str>) {
        if text.is_empty() {
            return;
        }
        match (joiner, self.lines.last_mut()) {
            (Some(joiner), Some(last)) => {
                last.push_str(joiner);
                last.push_str(&text);
            }
            _ => self.lines.push(text),
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

impl RenderedField {
    /// The text this field contributes, or an empty string.
    pub fn serialize_line(&self) -> String {
        let meta = &self.meta;
        let prefix = || resolve_prefix(meta.prefix.as_deref(), meta.label.as_deref());
        let suffix = || resolve_suffix(meta.suffix.as_deref());

        match &self.node {
            FieldNode::Text { content } => content.clone(),
            FieldNode::Note { .. } => String::new(),
            FieldNode::Input(tb) => {
                if tb.value.is_empty() {
                    String::new()
                } else {
                    format!("{}{}{}", prefix(), tb.value, suffix())
                }
            }
            FieldNode::Textarea(tb) => {
                let value = apply_indent(&tb.value, tb.indent);
                if value.is_empty() {
                    String::new()
                } else {
                    format!("{}{}{}", prefix(), value, suffix())
                }
            }
            FieldNode::CheckboxGroup(group) => {
                let values = checked_values(group);
                if values.is_empty() {
                    String::new()
                } else {
                    let separator = resolve_separator(meta.separator.as_deref());
                    format!("{}{}{}", prefix(), values.join(separator), suffix())
                }
            }
            FieldNode::RadioGroup(group) => match group.selected().next() {
                Some(option) => format!("{}{}{}", prefix(), option_text(option), suffix()),
                None => String::new(),
            },
        }
    }
}

/// Composed text of every selected option, empty ones dropped.
fn checked_values(group: &ChoiceGroup) -> Vec<String> {
    group
        .selected()
        .map(option_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn option_text(option: &ChoiceOption) -> String {
    match &option.detail {
        Some(detail) => format!("{}{}", option.value, detail_text(detail)),
        None => option.value.clone(),
    }
}

/// `prefix + value + suffix` of a visible detail. An empty value still keeps the
/// declared prefix and suffix, so the template's placeholder format survives.
fn detail_text(detail: &Detail) -> String {
    if !detail.is_visible() {
        return String::new();
    }
    let value = apply_indent(&detail.text.value, detail.text.indent);
    format!(
        "{}{}{}",
        detail.prefix.as_deref().unwrap_or_default(),
        value,
        detail.suffix.as_deref().unwrap_or_default()
    )
}
