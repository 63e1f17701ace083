//! # Schema Model: Divisions, Templates and Field Definitions
//!
//! A note template is authored as JSON by clinicians, one folder per division:
//!
//! ```text
//! divisions.json                  { "divisions": [{ "folder": "gi", "name": "GI" }] }
//! templates/gi/templates.json     { "templates": [{ "name": "Admission", "file": "admission.json" }] }
//! templates/gi/admission.json     { "sections": { "S": [ {field}, ... ], "O": [...] } }
//! ```
//!
//! Everything here is immutable once loaded. The renderer reads these types to build the
//! live [`Form`](crate::form::Form); nothing writes back into them.
//!
//! ## Leniency
//!
//! Templates are hand-written, so parsing follows what a browser would have tolerated:
//!
//! - An unknown or missing field `type` is not a parse error. It becomes
//!   [`FieldDefinition::Unsupported`] and the renderer skips it with a warning.
//! - Scalar strings (`value`, `label`, `id`) accept numbers and booleans too.
//! - Flags (`checked`, `withInput`, ...) use truthiness, so `1` or `"yes"` count as set.
//! - `indent` accepts integers or numeric strings. Anything negative or unparsable is 0.
//! - `rows` and `detailRows` accept positive integers or numeric strings. Anything else
//!   leaves the default row count in place.
//! - `prefix`, `suffix`, `separator` and `joiner` keep presence apart from absence:
//!   an explicit `null` or `""` is *present and empty*, which is not the same as omitted.

use crate::format::parse_indent;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of note sections.
///
/// The declaration order of the enum is not meaningful; use [`SectionKey::RENDER_ORDER`]
/// or [`SectionKey::COPY_ALL_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKey {
    #[serde(rename = "Intro")]
    Intro,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "O")]
    O,
    #[serde(rename = "A+P")]
    AP,
}

impl SectionKey {
    /// Order sections appear on screen.
    pub const RENDER_ORDER: [SectionKey; 4] =
        [SectionKey::Intro, SectionKey::S, SectionKey::O, SectionKey::AP];

    /// Order sections are assembled by "copy all".
    pub const COPY_ALL_ORDER: [SectionKey; 4] =
        [SectionKey::Intro, SectionKey::AP, SectionKey::S, SectionKey::O];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Intro => "Intro",
            SectionKey::S => "S",
            SectionKey::O => "O",
            SectionKey::AP => "A+P",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intro" => Ok(SectionKey::Intro),
            "s" => Ok(SectionKey::S),
            "o" => Ok(SectionKey::O),
            "a+p" | "ap" | "a/p" => Ok(SectionKey::AP),
            _ => Err(format!(
                "unknown section `{}` (expected Intro, S, O or A+P)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    #[serde(default, deserialize_with = "null_as_default")]
    pub folder: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

impl Division {
    pub fn new(folder: impl Into<String>, name: Option<String>) -> Self {
        Self {
            folder: folder.into(),
            name,
        }
    }

    /// The name shown to users, falling back to the folder.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.folder)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DivisionIndex {
    #[serde(default, deserialize_with = "null_as_default")]
    pub divisions: Vec<Division>,
}

impl DivisionIndex {
    /// Divisions that can actually be selected (those with a folder).
    pub fn selectable(&self) -> impl Iterator<Item = &Division> {
        self.divisions.iter().filter(|d| !d.folder.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file: Option<String>,
}

impl TemplateEntry {
    /// Entries without a file are listed but cannot be chosen.
    pub fn is_selectable(&self) -> bool {
        self.file.as_deref().is_some_and(|f| !f.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TemplateIndex {
    #[serde(default, deserialize_with = "null_as_default")]
    pub templates: Vec<TemplateEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Template {
    /// Raw section map. Keys outside [`SectionKey`] are kept but never rendered.
    #[serde(default, deserialize_with = "section_map")]
    pub sections: BTreeMap<String, Vec<FieldDefinition>>,
}

impl Template {
    pub fn section(&self, key: SectionKey) -> Option<&[FieldDefinition]> {
        self.sections.get(key.as_str()).map(Vec::as_slice)
    }

    pub fn has_section(&self, key: SectionKey) -> bool {
        self.sections.contains_key(key.as_str())
    }
}

/// Field type tags, as spelled in template JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Note,
    Input,
    Textarea,
    CheckboxGroup,
    RadioGroup,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Note => "note",
            FieldKind::Input => "input",
            FieldKind::Textarea => "textarea",
            FieldKind::CheckboxGroup => "checkbox-group",
            FieldKind::RadioGroup => "radio-group",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes every field type may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldCommon {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub prefix: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub suffix: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub separator: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub joiner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

/// Pre-approved markup shown to the clinician. Never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub emphasis: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, deserialize_with = "lenient_string")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextareaField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, deserialize_with = "lenient_string")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_rows")]
    pub rows: Option<u32>,
    #[serde(default, deserialize_with = "lenient_indent")]
    pub indent: usize,
}

impl TextareaField {
    pub const DEFAULT_ROWS: u32 = 3;
    /// Larger row counts are clamped to this.
    pub const MAX_ROWS: u32 = 100;
}

/// Shared shape of checkbox and radio groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChoiceField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Input,
    Textarea,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDefinition {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub checked: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub full_row: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub with_input: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail_input_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_rows")]
    pub detail_rows: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail_placeholder: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail_value: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub detail_prefix: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub detail_suffix: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_indent")]
    pub detail_indent: Option<usize>,
    #[serde(default, deserialize_with = "lenient_optional_indent")]
    pub indent: Option<usize>,
    #[serde(default, deserialize_with = "truthy")]
    pub detail_required: bool,
}

impl OptionDefinition {
    /// The text an option contributes when selected: `value`, else `label`, else empty.
    pub fn effective_value(&self) -> &str {
        self.value
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or_default()
    }

    /// The text shown next to the control: `label`, else `value`, else empty.
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.value.as_deref())
            .unwrap_or_default()
    }

    pub fn detail_kind(&self) -> DetailKind {
        match self.detail_type.as_deref() {
            Some("textarea") => DetailKind::Textarea,
            _ => DetailKind::Input,
        }
    }

    pub fn detail_input_type(&self) -> &str {
        self.detail_input_type.as_deref().unwrap_or("text")
    }

    pub fn detail_indent(&self) -> usize {
        self.detail_indent.or(self.indent).unwrap_or(0)
    }
}

/// One schema-declared field, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefinition {
    Text(TextField),
    Note(NoteField),
    Input(InputField),
    Textarea(TextareaField),
    CheckboxGroup(ChoiceField),
    RadioGroup(ChoiceField),
    /// A `type` this engine does not know how to render.
    Unsupported {
        type_name: String,
        common: FieldCommon,
    },
}

impl FieldDefinition {
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldDefinition::Text(_) => Some(FieldKind::Text),
            FieldDefinition::Note(_) => Some(FieldKind::Note),
            FieldDefinition::Input(_) => Some(FieldKind::Input),
            FieldDefinition::Textarea(_) => Some(FieldKind::Textarea),
            FieldDefinition::CheckboxGroup(_) => Some(FieldKind::CheckboxGroup),
            FieldDefinition::RadioGroup(_) => Some(FieldKind::RadioGroup),
            FieldDefinition::Unsupported { .. } => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            FieldDefinition::Unsupported { type_name, .. } => type_name,
            other => other.kind().map(FieldKind::as_str).unwrap_or_default(),
        }
    }

    pub fn common(&self) -> &FieldCommon {
        match self {
            FieldDefinition::Text(f) => &f.common,
            FieldDefinition::Note(f) => &f.common,
            FieldDefinition::Input(f) => &f.common,
            FieldDefinition::Textarea(f) => &f.common,
            FieldDefinition::CheckboxGroup(f) | FieldDefinition::RadioGroup(f) => &f.common,
            FieldDefinition::Unsupported { common, .. } => common,
        }
    }
}

impl<'de> Deserialize<'de> for FieldDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let type_name = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(match type_name.as_str() {
            "text" => FieldDefinition::Text(from_raw(raw)?),
            "note" => FieldDefinition::Note(from_raw(raw)?),
            "input" => FieldDefinition::Input(from_raw(raw)?),
            "textarea" => FieldDefinition::Textarea(from_raw(raw)?),
            "checkbox-group" => FieldDefinition::CheckboxGroup(from_raw(raw)?),
            "radio-group" => FieldDefinition::RadioGroup(from_raw(raw)?),
            _ => FieldDefinition::Unsupported {
                common: serde_json::from_value(raw).unwrap_or_default(),
                type_name,
            },
        })
    }
}

fn from_raw<T: DeserializeOwned, E: de::Error>(raw: Value) -> Result<T, E> {
    serde_json::from_value(raw).map_err(E::custom)
}

// --- Lenient field helpers ---

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn section_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<FieldDefinition>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Vec<FieldDefinition>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, fields)| fields.map(|f| (key, f)))
        .collect())
}

fn scalar_text<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected a string, found {}", other))),
    }
}

/// `null` or absent → `None`; scalars → their text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?)
}

/// Only called when the key is present, so `null` means present-and-empty.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(
        scalar_text(Value::deserialize(deserializer)?)?.unwrap_or_default(),
    ))
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn indent_from(value: &Value) -> Option<usize> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(parse_indent(&n.to_string())),
        Value::String(s) => Some(parse_indent(s)),
        _ => Some(0),
    }
}

fn lenient_indent<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(indent_from(&Value::deserialize(deserializer)?).unwrap_or(0))
}

fn lenient_optional_indent<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(indent_from(&Value::deserialize(deserializer)?))
}

fn lenient_rows<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(rows
        .filter(|&rows| rows > 0)
        .map(|rows| rows.min(u64::from(TextareaField::MAX_ROWS)) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(raw: Value) -> FieldDefinition {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_section_key_orders_differ() {
        assert_eq!(
            SectionKey::RENDER_ORDER.map(SectionKey::as_str),
            ["Intro", "S", "O", "A+P"]
        );
        assert_eq!(
            SectionKey::COPY_ALL_ORDER.map(SectionKey::as_str),
            ["Intro", "A+P", "S", "O"]
        );
    }

    #[test]
    fn test_section_key_parsing() {
        assert_eq!("A+P".parse::<SectionKey>().unwrap(), SectionKey::AP);
        assert_eq!("ap".parse::<SectionKey>().unwrap(), SectionKey::AP);
        assert_eq!("intro".parse::<SectionKey>().unwrap(), SectionKey::Intro);
        assert!("Plan".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let def = field(json!({"type": "slider", "id": "pain", "label": "Pain"}));
        match &def {
            FieldDefinition::Unsupported { type_name, common } => {
                assert_eq!(type_name, "slider");
                assert_eq!(common.id.as_deref(), Some("pain"));
            }
            other => panic!("expected unsupported, got {:?}", other),
        }
        assert_eq!(def.kind(), None);

        let missing = field(json!({"label": "No type"}));
        assert_eq!(missing.type_name(), "");
    }

    #[test]
    fn test_presence_of_formatting_strings() {
        let def = field(json!({"type": "input", "label": "BT", "suffix": "", "joiner": null}));
        let common = def.common();
        assert_eq!(common.prefix, None);
        assert_eq!(common.suffix.as_deref(), Some(""));
        assert_eq!(common.joiner.as_deref(), Some(""));
        assert_eq!(common.separator, None);
    }

    #[test]
    fn test_rows_leniency() {
        let rows = |raw: Value| match field(raw) {
            FieldDefinition::Textarea(t) => t.rows,
            other => panic!("expected textarea, got {:?}", other),
        };
        assert_eq!(rows(json!({"type": "textarea", "rows": 4})), Some(4));
        assert_eq!(rows(json!({"type": "textarea", "rows": "4"})), Some(4));
        assert_eq!(rows(json!({"type": "textarea", "rows": " 6 "})), Some(6));
        assert_eq!(rows(json!({"type": "textarea", "rows": 2.5})), Some(2));
        assert_eq!(rows(json!({"type": "textarea", "rows": "tall"})), None);
        assert_eq!(rows(json!({"type": "textarea", "rows": 0})), None);
        assert_eq!(rows(json!({"type": "textarea", "rows": -1})), None);
        assert_eq!(rows(json!({"type": "textarea", "rows": null})), None);
        assert_eq!(rows(json!({"type": "textarea"})), None);
        assert_eq!(
            rows(json!({"type": "textarea", "rows": 4611686018427387904u64})),
            Some(TextareaField::MAX_ROWS)
        );

        let opt: OptionDefinition =
            serde_json::from_value(json!({"value": "Fever", "detailRows": "5"})).unwrap();
        assert_eq!(opt.detail_rows, Some(5));
        let opt: OptionDefinition =
            serde_json::from_value(json!({"value": "Fever", "detailRows": [1]})).unwrap();
        assert_eq!(opt.detail_rows, None);
    }

    #[test]
    fn test_string_rows_do_not_fail_the_template() {
        let template: Template = serde_json::from_value(json!({"sections": {
            "S": [{"type": "textarea", "id": "hpi", "rows": "4"}]
        }}))
        .unwrap();
        match &template.section(SectionKey::S).unwrap()[0] {
            FieldDefinition::Textarea(t) => assert_eq!(t.rows, Some(4)),
            other => panic!("expected textarea, got {:?}", other),
        }
    }

    #[test]
    fn test_textarea_indent_leniency() {
        let as_number = field(json!({"type": "textarea", "indent": 2}));
        let as_string = field(json!({"type": "textarea", "indent": "4"}));
        let negative = field(json!({"type": "textarea", "indent": -3}));
        let garbage = field(json!({"type": "textarea", "indent": "wide"}));

        let indent = |d: &FieldDefinition| match d {
            FieldDefinition::Textarea(t) => t.indent,
            _ => unreachable!(),
        };
        assert_eq!(indent(&as_number), 2);
        assert_eq!(indent(&as_string), 4);
        assert_eq!(indent(&negative), 0);
        assert_eq!(indent(&garbage), 0);
    }

    #[test]
    fn test_option_defaults() {
        let opt: OptionDefinition = serde_json::from_value(json!({
            "label": "Fever",
            "withInput": 1,
            "detailType": "textarea",
            "indent": 2,
            "detailPrefix": null
        }))
        .unwrap();

        assert_eq!(opt.effective_value(), "Fever");
        assert_eq!(opt.display_label(), "Fever");
        assert!(opt.with_input);
        assert!(!opt.checked);
        assert_eq!(opt.detail_kind(), DetailKind::Textarea);
        assert_eq!(opt.detail_input_type(), "text");
        assert_eq!(opt.detail_indent(), 2);
        assert_eq!(opt.detail_prefix.as_deref(), Some(""));
        assert_eq!(opt.detail_suffix, None);
    }

    #[test]
    fn test_option_value_wins_over_label() {
        let opt: OptionDefinition =
            serde_json::from_value(json!({"value": "", "label": "Shown"})).unwrap();
        assert_eq!(opt.effective_value(), "");
        assert_eq!(opt.display_label(), "Shown");

        let numeric: OptionDefinition = serde_json::from_value(json!({"value": 38.5})).unwrap();
        assert_eq!(numeric.effective_value(), "38.5");
    }

    #[test]
    fn test_detail_indent_prefers_detail_specific() {
        let opt: OptionDefinition =
            serde_json::from_value(json!({"detailIndent": 6, "indent": 2})).unwrap();
        assert_eq!(opt.detail_indent(), 6);
    }

    #[test]
    fn test_template_sections() {
        let template: Template = serde_json::from_value(json!({
            "sections": {
                "A+P": [{"type": "textarea", "label": "Plan"}],
                "S": [],
                "O": null,
                "Extra": [{"type": "text", "value": "ignored"}]
            }
        }))
        .unwrap();

        assert!(template.has_section(SectionKey::AP));
        assert!(template.has_section(SectionKey::S));
        assert!(!template.has_section(SectionKey::O));
        assert!(!template.has_section(SectionKey::Intro));
        assert_eq!(template.section(SectionKey::S).unwrap().len(), 0);
    }

    #[test]
    fn test_indexes_tolerate_nulls() {
        let divisions: DivisionIndex =
            serde_json::from_value(json!({"divisions": null})).unwrap();
        assert!(divisions.divisions.is_empty());

        let divisions: DivisionIndex = serde_json::from_value(json!({
            "divisions": [{"folder": "", "name": "Broken"}, {"folder": "cv"}]
        }))
        .unwrap();
        let selectable: Vec<_> = divisions.selectable().collect();
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].display_name(), "cv");

        let templates: TemplateIndex = serde_json::from_value(json!({
            "templates": [{"name": "Draft"}, {"name": "Admission", "file": "adm.json"}]
        }))
        .unwrap();
        assert!(!templates.templates[0].is_selectable());
        assert!(templates.templates[1].is_selectable());
    }
}
