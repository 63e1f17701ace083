use super::layout::GUTTER;
use super::styles::{
    CURRENT, LABEL, NODE_ID, NOTE, NOTE_EMPHASIS, PLACEHOLDER, REQUIRED, SECTION, SELECTED,
    UNAVAILABLE,
};
use chartpad::form::{ChoiceGroup, Detail, FieldNode, Form, RenderedField, TextBox};
use chartpad::model::{Division, TemplateEntry};
use chartpad::notify::{CmdMessage, MessageLevel, Notifier};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

pub(super) fn print_message(message: &CmdMessage) {
    match message.level {
        MessageLevel::Info => println!("{}", message.content.dimmed()),
        MessageLevel::Success => println!("{}", message.content.green()),
        MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        MessageLevel::Error => eprintln!("{}", message.content.red()),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        print_message(message);
    }
}

/// Prints notifications as they arrive and remembers whether any was an error.
#[derive(Debug, Default)]
pub(super) struct TerminalNotifier {
    had_error: bool,
}

impl TerminalNotifier {
    pub(super) fn had_error(&self) -> bool {
        self.had_error
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, message: CmdMessage) {
        self.had_error |= message.is_error();
        print_message(&message);
    }
}

pub(super) fn print_divisions(divisions: &[Division]) {
    if divisions.is_empty() {
        println!("No divisions found.");
        return;
    }
    let width = divisions.iter().map(|d| d.folder.width()).max().unwrap_or(0);
    for division in divisions {
        let pad = width.saturating_sub(division.folder.width());
        println!(
            "  {}{}  {}",
            division.folder,
            " ".repeat(pad),
            division.display_name()
        );
    }
}

pub(super) fn print_templates(templates: &[TemplateEntry], current: Option<&str>) {
    if templates.is_empty() {
        println!("No templates found.");
        return;
    }
    for entry in templates {
        let is_current = current.is_some() && entry.file.as_deref() == current;
        let marker = if is_current { "*" } else { " " };
        match entry.file.as_deref().filter(|_| entry.is_selectable()) {
            Some(file) if is_current => println!(
                "{} {}  {}",
                CURRENT.apply_to(marker),
                CURRENT.apply_to(&entry.name),
                NODE_ID.apply_to(file)
            ),
            Some(file) => println!("{} {}  {}", marker, entry.name, NODE_ID.apply_to(file)),
            None => println!("{} {}", marker, UNAVAILABLE.apply_to(&entry.name)),
        }
    }
}

pub(super) fn print_form(form: &Form) {
    if !form.has_sections() {
        println!("The selected template does not define any sections.");
        return;
    }
    for (i, section) in form.sections().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", SECTION.apply_to(format!("== {} ", section.key)));
        for field in &section.fields {
            print_field(field);
        }
    }
}

fn print_field(field: &RenderedField) {
    let label = field.meta.label.as_deref().unwrap_or_default();
    let id = NODE_ID.apply_to(&field.meta.id);

    match &field.node {
        FieldNode::Text { content } => println!("  {}", content),
        FieldNode::Note { markup, emphasis } => {
            let style = if *emphasis { &*NOTE_EMPHASIS } else { &*NOTE };
            for line in strip_markup(markup).lines() {
                println!("  {}", style.apply_to(line));
            }
        }
        FieldNode::Input(tb) => {
            println!("  {} {}  {}", LABEL.apply_to(label), render_input(tb), id);
        }
        FieldNode::Textarea(tb) => {
            println!("  {}  {}", LABEL.apply_to(label), id);
            for line in render_textarea(tb) {
                println!("{}{}", " ".repeat(GUTTER - 2), line);
            }
        }
        FieldNode::CheckboxGroup(group) => {
            println!("  {}", LABEL.apply_to(label));
            print_options(group, ("[x]", "[ ]"));
        }
        FieldNode::RadioGroup(group) => {
            println!("  {}", LABEL.apply_to(label));
            print_options(group, ("(•)", "( )"));
        }
    }
}

fn print_options(group: &ChoiceGroup, (on, off): (&str, &str)) {
    for option in &group.options {
        let mark = if option.is_selected() {
            SELECTED.apply_to(on).to_string()
        } else {
            off.to_string()
        };
        let separator = if option.full_row { "\n      " } else { " " };
        match option.detail.as_ref().filter(|d| d.is_visible()) {
            Some(detail) if detail.text.multiline => {
                println!(
                    "    {} {}{}  {}",
                    mark,
                    option.label,
                    detail_hint(detail),
                    NODE_ID.apply_to(&option.id)
                );
                for line in render_textarea(&detail.text) {
                    println!("{}{}", " ".repeat(GUTTER + 2), line);
                }
            }
            Some(detail) => println!(
                "    {} {}{}{}{}  {}",
                mark,
                option.label,
                separator,
                render_input(&detail.text),
                detail_hint(detail),
                NODE_ID.apply_to(&option.id)
            ),
            None => println!("    {} {}  {}", mark, option.label, NODE_ID.apply_to(&option.id)),
        }
    }
}

/// ` *` for required details and ` (number)` style hints for non-text inputs.
fn detail_hint(detail: &Detail) -> String {
    let mut hint = String::new();
    if !detail.text.multiline && detail.text.input_type != "text" {
        hint.push_str(&format!(" ({})", detail.text.input_type));
    }
    if detail.required {
        hint.push_str(&format!(" {}", REQUIRED.apply_to("*")));
    }
    hint
}

/// `[value   ]` padded to the fitted width.
fn render_input(tb: &TextBox) -> String {
    let (text, placeholder) = if tb.value.is_empty() {
        (tb.placeholder.as_str(), true)
    } else {
        (tb.value.as_str(), false)
    };
    let inner = tb
        .size
        .map(|w| (w as usize).saturating_sub(2))
        .unwrap_or_else(|| text.width());
    let shown = truncate_to_width(text, inner);
    let pad = " ".repeat(inner.saturating_sub(shown.width()));
    if placeholder {
        format!("[{}{}]", PLACEHOLDER.apply_to(shown), pad)
    } else {
        format!("[{}{}]", shown, pad)
    }
}

/// One `│ line` per row of the fitted height.
fn render_textarea(tb: &TextBox) -> Vec<String> {
    let (text, placeholder) = if tb.value.is_empty() {
        (tb.placeholder.as_str(), true)
    } else {
        (tb.value.as_str(), false)
    };
    let rows = tb.size.map(|h| h as usize).unwrap_or(tb.rows as usize).max(1);
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            if placeholder {
                PLACEHOLDER.apply_to(line).to_string()
            } else {
                line.to_string()
            }
        })
        .collect();
    if lines.len() > rows {
        lines.truncate(rows);
        if let Some(last) = lines.last_mut() {
            last.push_str(" …");
        }
    }
    lines.resize(rows, String::new());
    lines.into_iter().map(|line| format!("│ {}", line)).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Note markup reduced to plain text: tags dropped, `<br>` and `<p>` become line
/// breaks, common entities decoded.
pub(super) fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end]
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if matches!(tag.as_str(), "br" | "p" | "div" | "li") && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
