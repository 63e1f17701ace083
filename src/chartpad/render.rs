//! # Field Renderer
//!
//! Turns schema [`FieldDefinition`]s into live [`RenderedField`]s. Dispatch is on the
//! closed [`FieldDefinition`] enum; a new field type is a new variant plus a new arm
//! here and in the serializer.
//!
//! Rendering never fails. Unknown field types are logged and skipped, and the remaining
//! fields of the section still render.
//!
//! ## Composite Ids
//!
//! ```text
//! field   {section}-{id}            S-cc
//!         {section}-{type}-{index}  S-textarea-2   (no id declared)
//! option  {field id}-{index}        O-gcs-1
//! detail  {option id}-detail        O-gcs-1-detail
//! ```

use crate::form::{
    ChoiceGroup, ChoiceOption, Detail, FieldMeta, FieldNode, Form, OptionState,
    RenderedField, RenderedSection, TextBox, Visibility,
};
use crate::model::{
    DetailKind, FieldDefinition, OptionDefinition, SectionKey, Template, TextareaField,
};
use std::collections::HashSet;

/// Rows for a textarea detail that does not declare `detailRows`.
pub const DETAIL_TEXTAREA_ROWS: u32 = 2;

/// Renders every known section of `template` in [`SectionKey::RENDER_ORDER`].
pub fn render_form(generation: u64, template: &Template) -> Form {
    let mut sections = Vec::new();
    let mut seen = HashSet::new();

    for key in SectionKey::RENDER_ORDER {
        let Some(definitions) = template.section(key) else {
            continue;
        };

        let fields: Vec<RenderedField> = definitions
            .iter()
            .enumerate()
            .filter_map(|(index, definition)| render_field(key, index, definition))
            .collect();

        for field in &fields {
            if !seen.insert(field.meta.id.clone()) {
                tracing::warn!(id = %field.meta.id, "duplicate field id in template");
            }
        }

        sections.push(RenderedSection { key, fields });
    }

    Form::new(generation, sections)
}

/// Renders one field, or `None` for a type this engine does not support.
pub fn render_field(
    section: SectionKey,
    index: usize,
    field: &FieldDefinition,
) -> Option<RenderedField> {
    let Some(kind) = field.kind() else {
        tracing::warn!(
            section = %section,
            index,
            field_type = field.type_name(),
            "unknown field type, skipping"
        );
        return None;
    };

    let common = field.common();
    let id = match &common.id {
        Some(id) => format!("{}-{}", section, id),
        None => format!("{}-{}-{}", section, kind, index),
    };

    let node = match field {
        FieldDefinition::Text(f) => FieldNode::Text {
            content: f.value.clone().unwrap_or_default(),
        },
        FieldDefinition::Note(f) => FieldNode::Note {
            markup: f.value.clone().unwrap_or_default(),
            emphasis: f.emphasis,
        },
        FieldDefinition::Input(f) => FieldNode::Input(TextBox::single_line(
            id.as_str(),
            f.placeholder.as_deref().unwrap_or_default(),
            f.value.as_deref().unwrap_or_default(),
        )),
        FieldDefinition::Textarea(f) => FieldNode::Textarea(TextBox::multi_line(
            id.as_str(),
            f.placeholder.as_deref().unwrap_or_default(),
            f.value.as_deref().unwrap_or_default(),
            f.rows.unwrap_or(TextareaField::DEFAULT_ROWS),
            f.indent,
        )),
        FieldDefinition::CheckboxGroup(f) => {
            let mut group = render_choices(&id, &f.options);
            group.sync_all();
            FieldNode::CheckboxGroup(group)
        }
        FieldDefinition::RadioGroup(f) => {
            let mut group = render_choices(&id, &f.options);
            // Several pre-checked radios: the last one inserted keeps the selection.
            match group.options.iter().rposition(ChoiceOption::is_selected) {
                Some(last) => group.select_only(last),
                None => group.sync_all(),
            };
            FieldNode::RadioGroup(group)
        }
        FieldDefinition::Unsupported { .. } => return None,
    };

    Some(RenderedField {
        meta: FieldMeta {
            section,
            id,
            kind,
            label: common.label.clone(),
            prefix: common.prefix.clone(),
            suffix: common.suffix.clone(),
            separator: common.separator.clone(),
            joiner: common.joiner.clone(),
        },
        node,
    })
}

fn render_choices(base_id: &str, options: &[OptionDefinition]) -> ChoiceGroup {
    let options = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let id = format!("{}-{}", base_id, index);
            let detail = option.with_input.then(|| render_detail(&id, option));
            ChoiceOption {
                value: option.effective_value().to_string(),
                label: option.display_label().to_string(),
                full_row: option.full_row,
                state: OptionState::from_checked(option.checked),
                detail,
                id,
            }
        })
        .collect();

    ChoiceGroup {
        name: base_id.to_string(),
        options,
    }
}

fn render_detail(option_id: &str, option: &OptionDefinition) -> Detail {
    let id = format!("{}-detail", option_id);
    let placeholder = option.detail_placeholder.as_deref().unwrap_or_default();
    let value = option.detail_value.as_deref().unwrap_or_default();
    let kind = option.detail_kind();

    let mut text = match kind {
        DetailKind::Input => {
            let mut tb = TextBox::single_line(id, placeholder, value);
            tb.input_type = option.detail_input_type().to_string();
            tb
        }
        DetailKind::Textarea => TextBox::multi_line(
            id,
            placeholder,
            value,
            option.detail_rows.unwrap_or(DETAIL_TEXTAREA_ROWS),
            0,
        ),
    };
    text.indent = option.detail_indent();

    Detail {
        kind,
        prefix: option.detail_prefix.clone(),
        suffix: option.detail_suffix.clone(),
        required: option.detail_required,
        visibility: Visibility::Hidden,
        text,
    }
}
