//! # Live Form
//!
//! The rendered, editable counterpart of a [`Template`](crate::model::Template). The
//! renderer builds it, the user edits it, the serializer reads it.
//!
//! ## Option / Detail State Machine
//!
//! Each checkbox or radio option is either [`OptionState::Unselected`] or
//! [`OptionState::Selected`]. An option's optional [`Detail`] has a [`Visibility`] that
//! is recomputed from the owning option on every transition:
//!
//! ```text
//!   Unselected ──check──▶ Selected        detail: Hidden ──▶ Shown (enabled, resized)
//!   Selected ──uncheck──▶ Unselected      detail: Shown  ──▶ Hidden (disabled)
//! ```
//!
//! A hidden detail keeps whatever text it holds; the serializer simply ignores it.
//! Re-selecting the option brings the old text back.
//!
//! Radio groups behave like the host's shared-name grouping: selecting one option
//! unselects the others, then a single pass re-syncs every detail in the group.

use crate::error::{ChartpadError, Result};
use crate::model::{DetailKind, FieldKind, SectionKey};

/// Serialization metadata attached to every rendered field.
///
/// The formatting strings are kept raw: `None` means the template omitted them, which
/// selects the type-specific default at serialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub section: SectionKey,
    pub id: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub separator: Option<String>,
    pub joiner: Option<String>,
}

/// An editable text control: an input, a textarea, or an option detail.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub id: String,
    pub multiline: bool,
    pub placeholder: String,
    pub value: String,
    pub rows: u32,
    pub indent: usize,
    pub input_type: String,
    /// Width (single-line) or height (multi-line) last applied by the size-fit engine.
    pub size: Option<f32>,
}

impl TextBox {
    pub fn single_line(id: impl Into<String>, placeholder: &str, value: &str) -> Self {
        Self {
            id: id.into(),
            multiline: false,
            placeholder: placeholder.to_string(),
            value: value.to_string(),
            rows: 1,
            indent: 0,
            input_type: "text".to_string(),
            size: None,
        }
    }

    pub fn multi_line(
        id: impl Into<String>,
        placeholder: &str,
        value: &str,
        rows: u32,
        indent: usize,
    ) -> Self {
        Self {
            id: id.into(),
            multiline: true,
            placeholder: placeholder.to_string(),
            value: value.to_string(),
            rows,
            indent,
            input_type: "text".to_string(),
            size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Unselected,
    Selected,
}

impl OptionState {
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            OptionState::Selected
        } else {
            OptionState::Unselected
        }
    }

    pub fn is_selected(self) -> bool {
        self == OptionState::Selected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Free-text attached to one option, active only while that option is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub kind: DetailKind,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Shown as a marker only; an empty required detail still serializes.
    pub required: bool,
    pub visibility: Visibility,
    pub text: TextBox,
}

impl Detail {
    /// Visible details are also the enabled ones.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    fn sync(&mut self, state: OptionState) {
        self.visibility = if state.is_selected() {
            Visibility::Shown
        } else {
            Visibility::Hidden
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub id: String,
    pub value: String,
    pub label: String,
    pub full_row: bool,
    pub state: OptionState,
    pub detail: Option<Detail>,
}

impl ChoiceOption {
    pub fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    /// Applies a transition and returns the id of a detail that just became visible.
    fn transition(&mut self, state: OptionState) -> Option<String> {
        self.state = state;
        self.sync_detail()
    }

    fn sync_detail(&mut self) -> Option<String> {
        let state = self.state;
        let detail = self.detail.as_mut()?;
        detail.sync(state);
        detail.is_visible().then(|| detail.text.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceGroup {
    /// Shared control name; also the field's composite id.
    pub name: String,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceGroup {
    pub fn selected(&self) -> impl Iterator<Item = &ChoiceOption> {
        self.options.iter().filter(|o| o.is_selected())
    }

    /// Re-derives every detail's visibility from its option. Returns the visible ones.
    pub(crate) fn sync_all(&mut self) -> Vec<String> {
        self.options
            .iter_mut()
            .filter_map(ChoiceOption::sync_detail)
            .collect()
    }

    /// Radio semantics: `index` becomes the only selected option.
    pub(crate) fn select_only(&mut self, index: usize) -> Vec<String> {
        for (i, option) in self.options.iter_mut().enumerate() {
            option.state = OptionState::from_checked(i == index);
        }
        self.sync_all()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldNode {
    Text { content: String },
    Note { markup: String, emphasis: bool },
    Input(TextBox),
    Textarea(TextBox),
    CheckboxGroup(ChoiceGroup),
    RadioGroup(ChoiceGroup),
}

impl FieldNode {
    fn text_boxes(&self) -> Vec<&TextBox> {
        match self {
            FieldNode::Input(tb) | FieldNode::Textarea(tb) => vec![tb],
            FieldNode::CheckboxGroup(group) | FieldNode::RadioGroup(group) => group
                .options
                .iter()
                .filter_map(|o| o.detail.as_ref().map(|d| &d.text))
                .collect(),
            FieldNode::Text { .. } | FieldNode::Note { .. } => Vec::new(),
        }
    }

    fn text_boxes_mut(&mut self) -> Vec<&mut TextBox> {
        match self {
            FieldNode::Input(tb) | FieldNode::Textarea(tb) => vec![tb],
            FieldNode::CheckboxGroup(group) | FieldNode::RadioGroup(group) => group
                .options
                .iter_mut()
                .filter_map(|o| o.detail.as_mut().map(|d| &mut d.text))
                .collect(),
            FieldNode::Text { .. } | FieldNode::Note { .. } => Vec::new(),
        }
    }

    fn choice_group(&self) -> Option<&ChoiceGroup> {
        match self {
            FieldNode::CheckboxGroup(group) | FieldNode::RadioGroup(group) => Some(group),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub meta: FieldMeta,
    pub node: FieldNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub key: SectionKey,
    pub fields: Vec<RenderedField>,
}

/// The full interactive tree for the current template.
///
/// `generation` identifies the selection this tree was rendered for; anything queued
/// against an older generation is stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    generation: u64,
    sections: Vec<RenderedSection>,
}

impl Form {
    pub fn new(generation: u64, sections: Vec<RenderedSection>) -> Self {
        Self {
            generation,
            sections,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    pub fn section(&self, key: SectionKey) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Every rendered field tagged with `key`, in render order.
    pub fn fields(&self, key: SectionKey) -> impl Iterator<Item = &RenderedField> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter(move |f| f.meta.section == key)
    }

    pub fn text_boxes(&self) -> Vec<&TextBox> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .flat_map(|f| f.node.text_boxes())
            .collect()
    }

    pub fn text_box(&self, id: &str) -> Option<&TextBox> {
        self.text_boxes().into_iter().find(|tb| tb.id == id)
    }

    pub fn text_box_mut(&mut self, id: &str) -> Option<&mut TextBox> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .flat_map(|f| f.node.text_boxes_mut())
            .find(|tb| tb.id == id)
    }

    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter_map(|f| f.node.choice_group())
            .flat_map(|g| g.options.iter())
            .find(|o| o.id == id)
    }

    /// Sets the text of an input, a textarea, or a detail.
    ///
    /// Details may be addressed by their own id or by their option's id. Hidden
    /// details are disabled and reject edits. Returns the id of the edited box.
    pub fn set_value(&mut self, id: &str, value: &str) -> Result<String> {
        for field in self.sections.iter_mut().flat_map(|s| s.fields.iter_mut()) {
            match &mut field.node {
                FieldNode::Input(tb) | FieldNode::Textarea(tb) if tb.id == id => {
                    tb.value = value.to_string();
                    return Ok(tb.id.clone());
                }
                FieldNode::CheckboxGroup(group) | FieldNode::RadioGroup(group) => {
                    for option in &mut group.options {
                        let Some(detail) = option.detail.as_mut() else {
                            continue;
                        };
                        if detail.text.id != id && option.id != id {
                            continue;
                        }
                        if !detail.is_visible() {
                            return Err(ChartpadError::DisabledNode(detail.text.id.clone()));
                        }
                        detail.text.value = value.to_string();
                        return Ok(detail.text.id.clone());
                    }
                }
                _ => {}
            }
        }

        if self.option(id).is_some() {
            return Err(ChartpadError::InvalidEdit {
                id: id.to_string(),
                reason: "option has no detail field".to_string(),
            });
        }
        Err(ChartpadError::UnknownNode(id.to_string()))
    }

    /// Checks or unchecks an option. Returns details that became (or stay) visible
    /// and need a resize.
    pub fn set_checked(&mut self, option_id: &str, checked: bool) -> Result<Vec<String>> {
        for field in self.sections.iter_mut().flat_map(|s| s.fields.iter_mut()) {
            match &mut field.node {
                FieldNode::CheckboxGroup(group) => {
                    if let Some(option) = group.options.iter_mut().find(|o| o.id == option_id) {
                        let revealed = option.transition(OptionState::from_checked(checked));
                        return Ok(revealed.into_iter().collect());
                    }
                }
                FieldNode::RadioGroup(group) => {
                    if let Some(index) = group.options.iter().position(|o| o.id == option_id) {
                        if !checked {
                            return Err(ChartpadError::InvalidEdit {
                                id: option_id.to_string(),
                                reason: "a radio option is cleared by selecting another one"
                                    .to_string(),
                            });
                        }
                        return Ok(group.select_only(index));
                    }
                }
                _ => {}
            }
        }
        Err(ChartpadError::UnknownNode(option_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Template;
    use crate::render::render_form;
    use serde_json::json;

    fn form() -> Form {
        let template: Template = serde_json::from_value(json!({
            "sections": {
                "S": [
                    {"type": "input", "id": "cc", "label": "CC"},
                    {"type": "checkbox-group", "id": "sx", "options": [
                        {"value": "Fever", "withInput": true, "detailValue": "3 days"},
                        {"value": "Cough"}
                    ]}
                ],
                "O": [
                    {"type": "radio-group", "id": "gcs", "options": [
                        {"value": "Alert", "checked": true},
                        {"value": "Drowsy", "withInput": true, "detailPrefix": " ("},
                        {"value": "Coma"}
                    ]}
                ]
            }
        }))
        .unwrap();
        render_form(1, &template)
    }

    #[test]
    fn test_checkbox_detail_follows_option() {
        let mut form = form();
        let detail = |f: &Form| f.option("S-sx-0").unwrap().detail.clone().unwrap();

        assert!(!detail(&form).is_visible());

        let revealed = form.set_checked("S-sx-0", true).unwrap();
        assert_eq!(revealed, vec!["S-sx-0-detail".to_string()]);
        assert!(detail(&form).is_visible());

        form.set_checked("S-sx-0", false).unwrap();
        assert!(!detail(&form).is_visible());
        assert_eq!(detail(&form).text.value, "3 days");
    }

    #[test]
    fn test_hidden_detail_rejects_edits() {
        let mut form = form();
        let err = form.set_value("S-sx-0-detail", "x").unwrap_err();
        assert!(matches!(err, ChartpadError::DisabledNode(_)));

        form.set_checked("S-sx-0", true).unwrap();
        form.set_value("S-sx-0", "2 weeks").unwrap();
        assert_eq!(form.text_box("S-sx-0-detail").unwrap().value, "2 weeks");
    }

    #[test]
    fn test_radio_selection_is_exclusive() {
        let mut form = form();
        let revealed = form.set_checked("O-gcs-1", true).unwrap();
        assert_eq!(revealed, vec!["O-gcs-1-detail".to_string()]);
        assert!(!form.option("O-gcs-0").unwrap().is_selected());
        assert!(form.option("O-gcs-1").unwrap().is_selected());

        form.set_checked("O-gcs-2", true).unwrap();
        let drowsy = form.option("O-gcs-1").unwrap();
        assert!(!drowsy.is_selected());
        assert!(!drowsy.detail.as_ref().unwrap().is_visible());
    }

    #[test]
    fn test_radio_cannot_be_unchecked_directly() {
        let mut form = form();
        let err = form.set_checked("O-gcs-0", false).unwrap_err();
        assert!(matches!(err, ChartpadError::InvalidEdit { .. }));
    }

    #[test]
    fn test_unknown_ids() {
        let mut form = form();
        assert!(matches!(
            form.set_value("S-nope", "x"),
            Err(ChartpadError::UnknownNode(_))
        ));
        assert!(matches!(
            form.set_checked("S-nope-0", true),
            Err(ChartpadError::UnknownNode(_))
        ));
        assert!(matches!(
            form.set_value("S-sx-1", "x"),
            Err(ChartpadError::InvalidEdit { .. })
        ));
    }

    #[test]
    fn test_text_boxes_cover_inputs_and_details() {
        let form = form();
        let ids: Vec<_> = form.text_boxes().iter().map(|tb| tb.id.clone()).collect();
        assert_eq!(ids, vec!["S-cc", "S-sx-0-detail", "O-gcs-1-detail"]);
    }
}
