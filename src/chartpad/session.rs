//! # Selection Session
//!
//! Tracks which division and template are current and owns the live [`Form`].
//!
//! ## Load Tickets
//!
//! Every load is split in two: `begin_*` bumps a generation counter and returns a
//! [`LoadTicket`], the caller fetches the document, and `commit_*` applies the result.
//! A commit whose ticket is not the latest is discarded untouched, so a slow response
//! for an earlier selection can never overwrite a newer one:
//!
//! ```text
//!   begin_division(im)  -> #1
//!   begin_division(er)  -> #2
//!   commit(#1, ...)        discarded
//!   commit(#2, ...)        applied
//! ```
//!
//! The generation of the committing ticket also becomes the [`Form`] generation, which
//! is how the size-fit engine recognises work queued against a replaced tree.

use crate::error::{ChartpadError, Result};
use crate::form::Form;
use crate::model::{Division, DivisionIndex, Template, TemplateEntry, TemplateIndex};
use crate::notify::Notifier;
use crate::render::render_form;
use crate::sizing::SizeFit;

pub const DIVISIONS_FAILED: &str =
    "Could not load the division list. Check that divisions.json exists.";
pub const TEMPLATE_FAILED: &str = "Could not load the selected template.";

fn index_failed(division: &Division) -> String {
    format!(
        "Could not load the template list for {}. Check that its folder has a templates.json.",
        division.display_name()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Which dependent controls are usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub template_select: bool,
    pub copy_actions: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    divisions: Vec<Division>,
    pending_division: Option<Division>,
    division: Option<Division>,
    templates: Vec<TemplateEntry>,
    pending_file: Option<String>,
    template_file: Option<String>,
    template: Option<Template>,
    form: Option<Form>,
    controls: Controls,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selectable divisions, in index order.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn division(&self) -> Option<&Division> {
        self.division.as_ref()
    }

    pub fn templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    pub fn template_file(&self) -> Option<&str> {
        self.template_file.as_deref()
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.form.as_mut()
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Installs the division list. Returns `false` (after notifying) when it failed.
    pub fn set_divisions(
        &mut self,
        result: Result<DivisionIndex>,
        notifier: &mut dyn Notifier,
    ) -> bool {
        match result {
            Ok(index) => {
                self.divisions = index.selectable().cloned().collect();
                if self.divisions.is_empty() {
                    self.controls = Controls::default();
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "division list failed to load");
                notifier.notify_error(DIVISIONS_FAILED);
                self.divisions.clear();
                self.controls = Controls::default();
                false
            }
        }
    }

    /// The division selected on startup: the first one with a folder.
    pub fn default_division(&self) -> Option<&Division> {
        self.divisions.first()
    }

    /// Looks a folder up in the division list. Unknown folders are used as-is.
    pub fn resolve_division(&self, folder: &str) -> Division {
        self.divisions
            .iter()
            .find(|d| d.folder == folder)
            .cloned()
            .unwrap_or_else(|| Division::new(folder, Some(folder.to_string())))
    }

    fn next_ticket(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: LoadTicket, what: &str) -> bool {
        if ticket.generation == self.generation {
            return true;
        }
        tracing::debug!(
            ticket = ticket.generation,
            current = self.generation,
            "discarding stale {} load",
            what
        );
        false
    }

    /// Starts switching to `division`. Everything that depended on the previous one is
    /// cleared and dependent controls are disabled until the load commits.
    pub fn begin_division(&mut self, division: Division) -> LoadTicket {
        self.division = None;
        self.templates.clear();
        self.template_file = None;
        self.template = None;
        self.form = None;
        self.pending_file = None;
        self.controls = Controls::default();
        self.pending_division = Some(division);
        self.next_ticket()
    }

    /// The folder a pending division load should fetch from.
    pub fn pending_division(&self) -> Option<&Division> {
        self.pending_division.as_ref()
    }

    /// Applies a template index. Returns the file of the template to load by default,
    /// which is the first entry when it has a file.
    pub fn commit_template_index(
        &mut self,
        ticket: LoadTicket,
        result: Result<TemplateIndex>,
        notifier: &mut dyn Notifier,
    ) -> Option<String> {
        if !self.is_current(ticket, "template index") {
            return None;
        }
        let division = self.pending_division.take()?;

        match result {
            Ok(index) => {
                self.templates = index.templates;
                self.controls.template_select = !self.templates.is_empty();
                self.controls.copy_actions = false;
                self.division = Some(division);
                self.templates
                    .first()
                    .filter(|t| t.is_selectable())
                    .and_then(|t| t.file.clone())
            }
            Err(e) => {
                tracing::error!(error = %e, division = %division.folder, "template index failed to load");
                notifier.notify_error(&index_failed(&division));
                self.controls = Controls::default();
                None
            }
        }
    }

    /// Starts loading `file` from the current division.
    pub fn begin_template(&mut self, file: &str) -> Result<LoadTicket> {
        if file.is_empty() {
            return Err(ChartpadError::InvalidEdit {
                id: file.to_string(),
                reason: "template entry has no file".to_string(),
            });
        }
        self.pending_file = Some(file.to_string());
        Ok(self.next_ticket())
    }

    /// Applies a loaded template: renders the form and rebinds the size-fit engine.
    /// Returns `true` when the template became current.
    pub fn commit_template(
        &mut self,
        ticket: LoadTicket,
        result: Result<Template>,
        sizing: &mut SizeFit,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if !self.is_current(ticket, "template") {
            return false;
        }
        let file = self.pending_file.take();

        match result {
            Ok(template) => {
                let form = render_form(ticket.generation, &template);
                sizing.attach(&form);
                self.controls.copy_actions = form.has_sections();
                self.template_file = file;
                self.template = Some(template);
                self.form = Some(form);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "template failed to load");
                notifier.notify_error(TEMPLATE_FAILED);
                sizing.reset(ticket.generation);
                self.template_file = None;
                self.template = None;
                self.form = None;
                self.controls.copy_actions = false;
                false
            }
        }
    }
}
