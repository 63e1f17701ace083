//! # Chartpad Architecture
//!
//! Chartpad turns clinician-authored JSON note templates into a fillable form and turns
//! the filled form back into plain note text for the clipboard. It is a UI-agnostic
//! library that happens to ship a terminal client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints the form and messages           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Sequences loads, edits, resizes and copies               │
//! │  - Turns load/copy failures into notifications              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  model → render → form ─┬→ serialize → copy                 │
//! │                         └→ sizing                           │
//! │  session: current selection, load tickets                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators                                              │
//! │  - SchemaSource (FsSource, MemorySource)                    │
//! │  - Clipboard, Notifier, Layout                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments and returns plain types. It never
//! writes to stdout/stderr and never exits. Measuring text, writing the clipboard and
//! showing messages all go through traits, so the same core could back a GUI.
//!
//! ## Sections
//!
//! Every template has up to four sections: `Intro`, `S`, `O` and `A+P`. They are shown
//! in that order, but copied as `Intro, A+P, S, O`. Copying `Intro` or `S` on its own
//! always copies both.
//!
//! ## Module Overview
//!
//! - [`model`]: Divisions, template indexes, templates and field definitions
//! - [`format`]: Prefix, suffix, separator and indent rules
//! - [`render`]: Builds the live [`form::Form`] from a template
//! - [`form`]: The editable form and its option/detail state machine
//! - [`sizing`]: Keeps text controls sized to their content
//! - [`serialize`]: Reads a section of the form back into text
//! - [`copy`]: Groups sections and writes them to the clipboard
//! - [`session`]: Current selection and stale-load protection
//! - [`api`]: The facade every client talks to
//! - [`source`], [`clipboard`], [`notify`]: Collaborators
//! - [`config`]: Persistent settings
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod error;
pub mod form;
pub mod format;
pub mod model;
pub mod notify;
pub mod render;
pub mod serialize;
pub mod session;
pub mod sizing;
pub mod source;
