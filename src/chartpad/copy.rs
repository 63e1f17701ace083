//! # Copy Orchestrator
//!
//! Groups serialized sections into one block of text and hands it to a [`Clipboard`].
//!
//! - `Intro` and `S` are always copied together, `Intro` first.
//! - Copy-all walks [`SectionKey::COPY_ALL_ORDER`] (`Intro, A+P, S, O`), which differs
//!   from the on-screen order.
//! - Blocks are separated by one blank line; blocks that are blank after trimming are
//!   left out.
//!
//! Every outcome, good or bad, goes to the [`Notifier`] and comes back as a
//! [`CopyOutcome`]. Nothing here returns an error.

use crate::clipboard::Clipboard;
use crate::form::Form;
use crate::model::SectionKey;
use crate::notify::Notifier;
use crate::serialize::serialize_section;

pub const NO_TEMPLATE: &str = "No template selected. Select a template before copying.";
pub const NOTHING_TO_COPY: &str = "Nothing has been filled in yet, there is nothing to copy.";
pub const COPY_MANUALLY: &str =
    "Could not copy automatically. Select the text and copy it manually.";

const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub copied: bool,
    pub message: String,
}

impl CopyOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            copied: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            copied: false,
            message: message.into(),
        }
    }
}

/// Sections copied together when `key` is requested.
pub fn copy_group(key: SectionKey) -> &'static [SectionKey] {
    match key {
        SectionKey::Intro | SectionKey::S => &[SectionKey::Intro, SectionKey::S],
        SectionKey::O => &[SectionKey::O],
        SectionKey::AP => &[SectionKey::AP],
    }
}

fn join_blocks(form: &Form, keys: &[SectionKey]) -> Option<String> {
    let blocks: Vec<String> = keys
        .iter()
        .filter(|&&key| form.section(key).is_some())
        .map(|&key| serialize_section(form, key))
        .filter(|text| !text.trim().is_empty())
        .collect();

    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join(BLOCK_SEPARATOR))
    }
}

/// Text [`copy_section`] would copy, or `None` when there is nothing to copy.
pub fn compose_section_text(form: &Form, key: SectionKey) -> Option<String> {
    join_blocks(form, copy_group(key))
}

/// Text [`copy_all`] would copy. Sections missing from the template are skipped.
pub fn compose_all_text(form: &Form) -> Option<String> {
    join_blocks(form, &SectionKey::COPY_ALL_ORDER)
}

pub fn copy_section(
    form: Option<&Form>,
    key: SectionKey,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> CopyOutcome {
    let label = match copy_group(key) {
        [single] => single.to_string(),
        group => group
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(" + "),
    };
    let text = form.map(|form| compose_section_text(form, key));
    deliver(text, &format!("Copied {}.", label), clipboard, notifier)
}

pub fn copy_all(
    form: Option<&Form>,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> CopyOutcome {
    let text = form.map(compose_all_text);
    deliver(text, "Copied all sections.", clipboard, notifier)
}

/// `text` is `None` without a form and `Some(None)` when the form has nothing to copy.
fn deliver(
    text: Option<Option<String>>,
    success: &str,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> CopyOutcome {
    let outcome = match text {
        None => CopyOutcome::failure(NO_TEMPLATE),
        Some(None) => CopyOutcome::failure(NOTHING_TO_COPY),
        Some(Some(text)) => match clipboard.write_text(&text) {
            Ok(()) => CopyOutcome::success(success),
            Err(e) => {
                tracing::error!(error = %e, "clipboard write failed");
                CopyOutcome::failure(COPY_MANUALLY)
            }
        },
    };

    if outcome.copied {
        notifier.notify_success(&outcome.message);
    } else {
        notifier.notify_error(&outcome.message);
    }
    outcome
}
