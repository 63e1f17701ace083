//! # CLI Behavior
//!
//! This is **one possible UI client** for chartpad, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! A command runs one selection through the API and exits:
//!
//! 1. load the division list, select a division (`--division`, the configured default,
//!    or the first one) and a template (`--template` or the division's first)
//! 2. apply edits: every `--check`/`--uncheck`, then every `--set ID=TEXT`
//! 3. show, print or copy the result
//!
//! Notifications print as they happen. Any error notification makes the exit status 1.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context wiring and per-command handlers
//! - `print`: Terminal output for forms, lists and messages
//! - `layout`: Terminal measurement for the size-fit engine
//! - `styles`: Terminal styling constants

mod commands;
mod layout;
mod print;
mod setup;
mod styles;

pub use commands::run;
