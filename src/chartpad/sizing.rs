//! # Size-Fit Engine
//!
//! Keeps text controls sized to their content:
//!
//! - single-line: `width = clamp(min, text width + padding + border + 2, max)`
//! - multi-line: `height = clamp(min, content height + padding + border, max)`
//!
//! Measurement is delegated to a [`Layout`] so the engine never depends on a specific
//! rendering technology. The CLI ships a terminal implementation; tests use fixed
//! metrics.
//!
//! ## Scheduling
//!
//! Nothing is measured synchronously. Edits, commits, focus (textareas only) and
//! explicit requests queue the node, and a window resize queues one full pass no matter
//! how many resize events arrive before the next frame. [`SizeFit::run_frame`] applies
//! everything queued, once.
//!
//! Bindings and queued work belong to one form generation. [`SizeFit::attach`] drops
//! whatever was bound to the previous tree before binding the new one, and a frame run
//! against a form from another generation does nothing.

use crate::form::{Form, TextBox};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

/// Extra room so the caret never clips the last glyph.
pub const INPUT_SLACK: f32 = 2.0;

/// A CSS-like length bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssSize {
    Px(f32),
    Percent(f32),
    /// `none`: no bound at all.
    Unbounded,
    /// `auto`/`initial`/empty: the bound is unset.
    Auto,
}

impl CssSize {
    /// Resolves to a length. `Percent` is taken against `container`; `Auto` is unset.
    pub fn resolve(self, container: f32) -> Option<f32> {
        match self {
            CssSize::Px(v) => Some(v),
            CssSize::Percent(p) => Some(container * p / 100.0),
            CssSize::Unbounded => Some(f32::INFINITY),
            CssSize::Auto => None,
        }
    }
}

impl FromStr for CssSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" | "auto" | "initial" => return Ok(CssSize::Auto),
            "none" => return Ok(CssSize::Unbounded),
            _ => {}
        }
        let number = leading_number(s).ok_or_else(|| format!("invalid size `{}`", s))?;
        if s.ends_with('%') {
            Ok(CssSize::Percent(number))
        } else {
            Ok(CssSize::Px(number))
        }
    }
}

fn leading_number(s: &str) -> Option<f32> {
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Effective box metrics of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub min_width: CssSize,
    pub max_width: CssSize,
    pub min_height: CssSize,
    pub max_height: CssSize,
    pub padding_x: f32,
    pub border_x: f32,
    pub padding_y: f32,
    pub border_y: f32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            min_width: CssSize::Auto,
            max_width: CssSize::Unbounded,
            min_height: CssSize::Auto,
            max_height: CssSize::Unbounded,
            padding_x: 0.0,
            border_x: 0.0,
            padding_y: 0.0,
            border_y: 0.0,
        }
    }
}

/// Measurement collaborator.
pub trait Layout {
    fn box_style(&self, node: &TextBox) -> BoxStyle;

    /// Rendered width of `text` in the node's font.
    fn measure_text(&self, node: &TextBox, text: &str) -> f32;

    /// Width of the element containing `node`, for `%` bounds.
    fn container_width(&self, node: &TextBox) -> f32;

    /// Intrinsic content height of a multi-line node with no explicit height set.
    fn content_height(&self, node: &TextBox) -> f32;
}

/// Width for a single-line control.
pub fn fit_width(node: &TextBox, layout: &dyn Layout) -> f32 {
    let style = layout.box_style(node);
    let container = layout.container_width(node);
    let min = style.min_width.resolve(container).unwrap_or(0.0);
    let max = style.max_width.resolve(container).unwrap_or(f32::INFINITY);

    let text = if !node.value.is_empty() {
        node.value.as_str()
    } else if !node.placeholder.is_empty() {
        node.placeholder.as_str()
    } else {
        " "
    };
    let desired = layout.measure_text(node, text) + style.padding_x + style.border_x + INPUT_SLACK;

    // Not `f32::clamp`: a min larger than the max must resolve to the max.
    max.min(min.max(desired))
}

/// Height for a multi-line control. Clears the previous height before measuring.
pub fn fit_height(node: &mut TextBox, layout: &dyn Layout) -> f32 {
    node.size = None;
    let style = layout.box_style(node);
    let container = layout.container_width(node);
    let min = match style.min_height {
        CssSize::Px(v) => v,
        _ => 0.0,
    };
    let max = match style.max_height {
        CssSize::Px(v) => v,
        CssSize::Percent(p) => container * p / 100.0,
        CssSize::Unbounded | CssSize::Auto => f32::INFINITY,
    };

    let desired = layout.content_height(node) + style.padding_y + style.border_y;
    max.min(min.max(desired))
}

/// What happened to a bound control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Input,
    Change,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Input,
    Textarea,
}

#[derive(Debug, Default)]
pub struct SizeFit {
    generation: u64,
    bound: HashMap<String, Binding>,
    pending: BTreeSet<String>,
    full_pass: bool,
}

impl SizeFit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops every binding and queued fit, and adopts a new generation.
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.bound.clear();
        self.pending.clear();
        self.full_pass = false;
    }

    /// Replaces whatever was bound with every text control of `form`.
    pub fn attach(&mut self, form: &Form) {
        self.reset(form.generation());
        for node in form.text_boxes() {
            if node.multiline {
                self.bind_textarea(&node.id);
            } else {
                self.bind_input(&node.id);
            }
        }
    }

    /// Binds a single-line control. Binding twice is a no-op.
    pub fn bind_input(&mut self, id: &str) -> bool {
        self.bind(id, Binding::Input)
    }

    /// Binds a multi-line control. Binding twice is a no-op.
    pub fn bind_textarea(&mut self, id: &str) -> bool {
        self.bind(id, Binding::Textarea)
    }

    fn bind(&mut self, id: &str, binding: Binding) -> bool {
        if self.bound.contains_key(id) {
            return false;
        }
        self.bound.insert(id.to_string(), binding);
        self.pending.insert(id.to_string());
        true
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.bound.contains_key(id)
    }

    /// Queues a fit for a control event. Focus only matters for textareas.
    pub fn on_event(&mut self, id: &str, event: FieldEvent) -> bool {
        match (self.bound.get(id), event) {
            (None, _) => false,
            (Some(Binding::Input), FieldEvent::Focus) => false,
            (Some(_), _) => {
                self.pending.insert(id.to_string());
                true
            }
        }
    }

    /// Explicit request, e.g. a detail that just became visible.
    pub fn request(&mut self, id: &str) -> bool {
        self.on_event(id, FieldEvent::Change)
    }

    /// Queues a full pass. Returns `false` when one is already queued for this frame.
    pub fn window_resized(&mut self) -> bool {
        if self.full_pass {
            return false;
        }
        self.full_pass = true;
        true
    }

    pub fn frame_pending(&self) -> bool {
        self.full_pass || !self.pending.is_empty()
    }

    /// Applies all queued fits to `form`. Returns how many controls were resized.
    pub fn run_frame(&mut self, form: &mut Form, layout: &dyn Layout) -> usize {
        let ids: Vec<String> = if self.full_pass {
            self.bound.keys().cloned().collect()
        } else {
            self.pending.iter().cloned().collect()
        };
        self.pending.clear();
        self.full_pass = false;

        if form.generation() != self.generation {
            tracing::debug!(
                form = form.generation(),
                bound = self.generation,
                "dropping size-fit frame for a discarded form"
            );
            return 0;
        }

        let mut resized = 0;
        for id in ids {
            let Some(binding) = self.bound.get(&id).copied() else {
                continue;
            };
            let Some(node) = form.text_box_mut(&id) else {
                continue;
            };
            let size = match binding {
                Binding::Input => fit_width(node, layout),
                Binding::Textarea => fit_height(node, layout),
            };
            node.size = Some(size);
            resized += 1;
        }
        resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Template;
    use crate::render::render_form;
    use serde_json::json;

    /// 8px per char, 20px per line, 400px container.
    struct FixedLayout {
        style: BoxStyle,
    }

    impl Layout for FixedLayout {
        fn box_style(&self, _node: &TextBox) -> BoxStyle {
            self.style
        }

        fn measure_text(&self, _node: &TextBox, text: &str) -> f32 {
            text.chars().count() as f32 * 8.0
        }

        fn container_width(&self, _node: &TextBox) -> f32 {
            400.0
        }

        fn content_height(&self, node: &TextBox) -> f32 {
            assert!(node.size.is_none(), "height must be cleared before measuring");
            node.value.split('\n').count().max(node.rows as usize) as f32 * 20.0
        }
    }

    fn layout() -> FixedLayout {
        FixedLayout {
            style: BoxStyle {
                min_width: CssSize::Px(40.0),
                max_width: CssSize::Percent(50.0),
                padding_x: 4.0,
                border_x: 2.0,
                padding_y: 4.0,
                border_y: 2.0,
                max_height: CssSize::Px(100.0),
                ..BoxStyle::default()
            },
        }
    }

    fn form() -> Form {
        let template: Template = serde_json::from_value(json!({"sections": {"S": [
            {"type": "input", "id": "cc", "value": "cough"},
            {"type": "textarea", "id": "hpi", "rows": 2},
            {"type": "checkbox-group", "id": "sx", "options": [
                {"value": "Fever", "withInput": true, "detailType": "textarea"}
            ]}
        ]}}))
        .unwrap();
        render_form(3, &template)
    }

    #[test]
    fn test_css_size_parsing() {
        assert_eq!("120px".parse::<CssSize>().unwrap(), CssSize::Px(120.0));
        assert_eq!("50%".parse::<CssSize>().unwrap(), CssSize::Percent(50.0));
        assert_eq!("none".parse::<CssSize>().unwrap(), CssSize::Unbounded);
        assert_eq!("auto".parse::<CssSize>().unwrap(), CssSize::Auto);
        assert_eq!("".parse::<CssSize>().unwrap(), CssSize::Auto);
        assert_eq!("12".parse::<CssSize>().unwrap(), CssSize::Px(12.0));
        assert_eq!("1.5em".parse::<CssSize>().unwrap(), CssSize::Px(1.5));
        assert!("wide".parse::<CssSize>().is_err());
    }

    #[test]
    fn test_css_size_resolution() {
        assert_eq!(CssSize::Percent(25.0).resolve(200.0), Some(50.0));
        assert_eq!(CssSize::Unbounded.resolve(200.0), Some(f32::INFINITY));
        assert_eq!(CssSize::Auto.resolve(200.0), None);
    }

    #[test]
    fn test_fit_width_clamps() {
        let layout = layout();
        let short = TextBox::single_line("a", "", "ab");
        // 16 + 4 + 2 + 2 = 24, raised to the 40px minimum
        assert_eq!(fit_width(&short, &layout), 40.0);

        let medium = TextBox::single_line("b", "", "cough x3");
        assert_eq!(fit_width(&medium, &layout), 64.0 + 8.0);

        let long = TextBox::single_line("c", "", &"x".repeat(100));
        // capped at 50% of 400px
        assert_eq!(fit_width(&long, &layout), 200.0);
    }

    #[test]
    fn test_fit_width_uses_placeholder_then_space() {
        let layout = FixedLayout {
            style: BoxStyle::default(),
        };
        let placeholder = TextBox::single_line("a", "mmHg", "");
        assert_eq!(fit_width(&placeholder, &layout), 32.0 + INPUT_SLACK);

        let empty = TextBox::single_line("b", "", "");
        assert_eq!(fit_width(&empty, &layout), 8.0 + INPUT_SLACK);
    }

    #[test]
    fn test_min_above_max_resolves_to_max() {
        let layout = FixedLayout {
            style: BoxStyle {
                min_width: CssSize::Px(300.0),
                max_width: CssSize::Px(100.0),
                ..BoxStyle::default()
            },
        };
        assert_eq!(fit_width(&TextBox::single_line("a", "", "x"), &layout), 100.0);
    }

    #[test]
    fn test_fit_height() {
        let layout = layout();
        let mut node = TextBox::multi_line("t", "", "a\nb\nc", 2, 0);
        node.size = Some(999.0);
        assert_eq!(fit_height(&mut node, &layout), 66.0);

        let mut tall = TextBox::multi_line("t", "", &"x\n".repeat(20), 2, 0);
        assert_eq!(fit_height(&mut tall, &layout), 100.0);
    }

    #[test]
    fn test_binding_is_idempotent() {
        let mut sizing = SizeFit::new();
        assert!(sizing.bind_input("S-cc"));
        assert!(!sizing.bind_input("S-cc"));
        assert!(!sizing.bind_textarea("S-cc"));
    }

    #[test]
    fn test_attach_binds_all_text_controls_and_fits_them() {
        let mut form = form();
        let mut sizing = SizeFit::new();
        sizing.attach(&form);

        assert!(sizing.is_bound("S-cc"));
        assert!(sizing.is_bound("S-hpi"));
        assert!(sizing.is_bound("S-sx-0-detail"));
        assert!(sizing.frame_pending());

        assert_eq!(sizing.run_frame(&mut form, &layout()), 3);
        assert_eq!(form.text_box("S-cc").unwrap().size, Some(40.0 + 8.0));
        assert_eq!(form.text_box("S-hpi").unwrap().size, Some(46.0));
        assert!(!sizing.frame_pending());
    }

    #[test]
    fn test_focus_only_refits_textareas() {
        let mut form = form();
        let mut sizing = SizeFit::new();
        sizing.attach(&form);
        sizing.run_frame(&mut form, &layout());

        assert!(!sizing.on_event("S-cc", FieldEvent::Focus));
        assert!(sizing.on_event("S-hpi", FieldEvent::Focus));
        assert!(!sizing.on_event("S-unknown", FieldEvent::Input));
        assert_eq!(sizing.run_frame(&mut form, &layout()), 1);
    }

    #[test]
    fn test_window_resize_coalesces() {
        let mut form = form();
        let mut sizing = SizeFit::new();
        sizing.attach(&form);
        sizing.run_frame(&mut form, &layout());

        assert!(sizing.window_resized());
        assert!(!sizing.window_resized());
        assert!(!sizing.window_resized());
        assert_eq!(sizing.run_frame(&mut form, &layout()), 3);
        assert_eq!(sizing.run_frame(&mut form, &layout()), 0);
        assert!(sizing.window_resized());
    }

    #[test]
    fn test_stale_form_is_not_touched() {
        let mut old = form();
        let mut sizing = SizeFit::new();
        sizing.attach(&old);
        sizing.reset(4);
        sizing.bind_input("S-cc");

        assert_eq!(sizing.run_frame(&mut old, &layout()), 0);
        assert_eq!(old.text_box("S-cc").unwrap().size, None);
    }
}
