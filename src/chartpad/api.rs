//! # API Facade
//!
//! The single entry point for every chartpad operation, whatever the UI.
//!
//! `ChartpadApi<S: SchemaSource>` owns the schema source, the selection [`Session`] and
//! the [`SizeFit`] engine, and sequences them:
//!
//! - selecting a division loads its template index, then its first template
//! - edits go to the form and queue the matching resize work
//! - copies serialize the current form and hand the text to a clipboard
//!
//! Load and copy failures never come back as `Err`. They are reported through the
//! [`Notifier`] and show up as a `false` or a failed [`CopyOutcome`]. Only edits that
//! name a node the form does not have return an error.
//!
//! The facade is generic over the source so tests can run it on a
//! [`MemorySource`](crate::source::memory::MemorySource).

use crate::clipboard::Clipboard;
use crate::copy::{self, CopyOutcome};
use crate::error::{ChartpadError, Result};
use crate::form::Form;
use crate::model::{Division, SectionKey, TemplateEntry};
use crate::notify::Notifier;
use crate::serialize::serialize_section;
use crate::session::{Controls, Session};
use crate::sizing::{FieldEvent, Layout, SizeFit};
use crate::source::SchemaSource;

pub struct ChartpadApi<S: SchemaSource> {
    source: S,
    session: Session,
    sizing: SizeFit,
}

impl<S: SchemaSource> ChartpadApi<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            session: Session::new(),
            sizing: SizeFit::new(),
        }
    }

    /// Loads the division list and selects `preferred`, or the first division with a
    /// folder. Returns `false` when the division list could not be loaded.
    pub fn init(&mut self, preferred: Option<&str>, notifier: &mut dyn Notifier) -> bool {
        if !self.load_divisions(notifier) {
            return false;
        }

        let folder = match preferred {
            Some(folder) => Some(folder.to_string()),
            None => self.session.default_division().map(|d| d.folder.clone()),
        };
        if let Some(folder) = folder {
            self.select_division(&folder, notifier);
        }
        true
    }

    /// Loads the division list without selecting anything.
    pub fn load_divisions(&mut self, notifier: &mut dyn Notifier) -> bool {
        let divisions = self.source.load_divisions();
        self.session.set_divisions(divisions, notifier)
    }

    /// Switches to `folder` and loads its first template when it has one. Returns
    /// `false` when the template index could not be loaded.
    pub fn select_division(&mut self, folder: &str, notifier: &mut dyn Notifier) -> bool {
        let division = self.session.resolve_division(folder);
        let ticket = self.session.begin_division(division.clone());
        if division.folder.is_empty() {
            return false;
        }

        let index = self.source.load_template_index(&division.folder);
        let default = self.session.commit_template_index(ticket, index, notifier);
        if self.session.division().is_none() {
            return false;
        }
        if let Some(file) = default {
            self.select_template(&file, notifier);
        }
        true
    }

    /// Loads a template of the current division by file or by listed name.
    pub fn select_template(&mut self, file_or_name: &str, notifier: &mut dyn Notifier) -> bool {
        let file = self
            .resolve_template(file_or_name)
            .unwrap_or_else(|| file_or_name.to_string());
        let ticket = match self.session.begin_template(&file) {
            Ok(ticket) => ticket,
            Err(e) => {
                notifier.notify_error(&e.to_string());
                return false;
            }
        };

        let folder = self.session.division().map(|d| d.folder.clone());
        let template = self.source.load_template(folder.as_deref(), &file);
        self.session
            .commit_template(ticket, template, &mut self.sizing, notifier)
    }

    fn resolve_template(&self, file_or_name: &str) -> Option<String> {
        let templates = self.session.templates();
        templates
            .iter()
            .find(|t| t.file.as_deref() == Some(file_or_name))
            .or_else(|| templates.iter().find(|t| t.name == file_or_name))
            .and_then(|t| t.file.clone())
    }

    pub fn divisions(&self) -> &[Division] {
        self.session.divisions()
    }

    pub fn division(&self) -> Option<&Division> {
        self.session.division()
    }

    pub fn templates(&self) -> &[TemplateEntry] {
        self.session.templates()
    }

    pub fn template_file(&self) -> Option<&str> {
        self.session.template_file()
    }

    pub fn form(&self) -> Option<&Form> {
        self.session.form()
    }

    pub fn controls(&self) -> Controls {
        self.session.controls()
    }

    pub fn sizing(&self) -> &SizeFit {
        &self.sizing
    }

    fn form_mut(&mut self, id: &str) -> Result<&mut Form> {
        self.session
            .form_mut()
            .ok_or_else(|| ChartpadError::InvalidEdit {
                id: id.to_string(),
                reason: "no template selected".to_string(),
            })
    }

    /// Types `value` into an input, textarea or visible detail.
    pub fn set_value(&mut self, id: &str, value: &str) -> Result<()> {
        let edited = self.form_mut(id)?.set_value(id, value)?;
        self.sizing.on_event(&edited, FieldEvent::Input);
        Ok(())
    }

    pub fn set_checked(&mut self, option_id: &str, checked: bool) -> Result<()> {
        let revealed = self.form_mut(option_id)?.set_checked(option_id, checked)?;
        for id in revealed {
            self.sizing.request(&id);
        }
        Ok(())
    }

    pub fn window_resized(&mut self) -> bool {
        self.sizing.window_resized()
    }

    /// Applies queued size fits to the current form.
    pub fn run_frame(&mut self, layout: &dyn Layout) -> usize {
        match self.session.form_mut() {
            Some(form) => self.sizing.run_frame(form, layout),
            None => 0,
        }
    }

    /// Serialized text of one section, `None` without a template.
    pub fn section_text(&self, key: SectionKey) -> Option<String> {
        self.form().map(|form| serialize_section(form, key))
    }

    /// Text that copying `key` would put on the clipboard.
    pub fn copy_text(&self, key: SectionKey) -> Option<String> {
        self.form()
            .and_then(|form| copy::compose_section_text(form, key))
    }

    /// Text that copying everything would put on the clipboard.
    pub fn all_text(&self) -> Option<String> {
        self.form().and_then(copy::compose_all_text)
    }

    pub fn copy_section(
        &self,
        key: SectionKey,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> CopyOutcome {
        copy::copy_section(self.form(), key, clipboard, notifier)
    }

    pub fn copy_all(
        &self,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> CopyOutcome {
        copy::copy_all(self.form(), clipboard, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::form::TextBox;
    use crate::notify::MessageLog;
    use crate::sizing::BoxStyle;
    use crate::source::memory::{fixtures, MemorySource};

    struct CharLayout;

    impl Layout for CharLayout {
        fn box_style(&self, _node: &TextBox) -> BoxStyle {
            BoxStyle::default()
        }

        fn measure_text(&self, _node: &TextBox, text: &str) -> f32 {
            text.chars().count() as f32
        }

        fn container_width(&self, _node: &TextBox) -> f32 {
            80.0
        }

        fn content_height(&self, node: &TextBox) -> f32 {
            node.value.lines().count().max(1) as f32
        }
    }

    fn api() -> (ChartpadApi<MemorySource>, MessageLog) {
        let mut api = ChartpadApi::new(fixtures::clinic());
        let mut log = MessageLog::new();
        assert!(api.init(None, &mut log));
        (api, log)
    }

    #[test]
    fn test_init_selects_first_division_and_template() {
        let (api, log) = api();
        assert!(!log.has_errors());
        assert_eq!(api.divisions().len(), 2);
        assert_eq!(api.division().unwrap().folder, "im");
        assert_eq!(api.template_file(), Some("adm.json"));
        assert_eq!(
            api.controls(),
            Controls {
                template_select: true,
                copy_actions: true
            }
        );
    }

    #[test]
    fn test_all_text_uses_copy_order() {
        let (api, _) = api();
        assert_eq!(
            api.all_text().unwrap(),
            "65M\n\nobserve\n\nCC：cough\nSx：Dyspnea\n\nBT：36.8°C"
        );
        assert_eq!(api.copy_text(SectionKey::S).unwrap(), "65M\n\nCC：cough\nSx：Dyspnea");
        assert_eq!(api.section_text(SectionKey::O).unwrap(), "BT：36.8°C");
    }

    #[test]
    fn test_edits_change_text_and_queue_resizes() {
        let (mut api, _) = api();
        api.run_frame(&CharLayout);

        api.set_checked("S-sx-0", true).unwrap();
        assert!(api.sizing().frame_pending());
        assert_eq!(api.run_frame(&CharLayout), 1);

        api.set_value("S-cc", "dry cough").unwrap();
        assert_eq!(api.run_frame(&CharLayout), 1);
        assert_eq!(
            api.form().unwrap().text_box("S-cc").unwrap().size,
            Some(9.0 + crate::sizing::INPUT_SLACK)
        );

        assert_eq!(
            api.section_text(SectionKey::S).unwrap(),
            "CC：dry cough\nSx：Fever x3d, Dyspnea"
        );
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let (mut api, _) = api();
        assert!(api.set_value("S-missing", "x").is_err());
        assert!(api.set_checked("S-missing-0", true).is_err());
    }

    #[test]
    fn test_division_without_index_notifies() {
        let (mut api, mut log) = api();
        assert!(!api.select_division("er", &mut log));
        assert!(log.has_errors());
        assert!(api.form().is_none());
        assert_eq!(api.controls(), Controls::default());

        let mut clipboard = MemoryClipboard::new();
        let outcome = api.copy_all(&mut clipboard, &mut log);
        assert_eq!(outcome.message, copy::NO_TEMPLATE);
    }

    #[test]
    fn test_select_template_by_name() {
        let (mut api, mut log) = api();
        assert!(api.select_template("Admission", &mut log));
        assert!(!api.select_template("Follow-up (draft)", &mut log));
        assert!(log.has_errors());
    }

    #[test]
    fn test_copy_goes_to_clipboard() {
        let (api, mut log) = api();
        let mut clipboard = MemoryClipboard::new();
        let outcome = api.copy_section(SectionKey::O, &mut clipboard, &mut log);
        assert!(outcome.copied);
        assert_eq!(clipboard.contents(), Some("BT：36.8°C"));
    }

    #[test]
    fn test_missing_division_list() {
        let mut api = ChartpadApi::new(MemorySource::new());
        let mut log = MessageLog::new();
        assert!(!api.init(None, &mut log));
        assert!(log.has_errors());
        assert!(api.divisions().is_empty());
    }
}
