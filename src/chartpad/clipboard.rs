//! Clipboard collaborators.
//!
//! [`SystemClipboard`] shells out to the platform tool. [`Osc52Clipboard`] asks the
//! terminal to set the selection with an OSC 52 escape, which works over SSH and needs
//! no external binary. [`FallbackClipboard`] chains the two.

use crate::error::{ChartpadError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
use std::process::{Command, Stdio};

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses wl-copy on Wayland, otherwise xclip or xsel
/// - Windows: uses clip.exe
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            pipe_to(&["pbcopy"], text)
        }

        #[cfg(target_os = "linux")]
        {
            copy_linux(text)
        }

        #[cfg(target_os = "windows")]
        {
            pipe_to(&["clip"], text)
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            let _ = text;
            Err(ChartpadError::Clipboard(
                "Clipboard not supported on this platform".to_string(),
            ))
        }
    }
}

#[cfg(target_os = "linux")]
fn copy_linux(text: &str) -> Result<()> {
    let candidates: &[&[&str]] = if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &[
            &["wl-copy"],
            &["xclip", "-selection", "clipboard"],
            &["xsel", "--clipboard", "--input"],
        ]
    } else {
        &[
            &["xclip", "-selection", "clipboard"],
            &["xsel", "--clipboard", "--input"],
        ]
    };

    let mut last = None;
    for command in candidates {
        match pipe_to(command, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(tool = command[0], error = %e, "clipboard tool failed");
                last = Some(e);
            }
        }
    }
    Err(last.unwrap_or_else(|| {
        ChartpadError::Clipboard("Install wl-copy, xclip or xsel.".to_string())
    }))
}

fn pipe_to(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| ChartpadError::Clipboard("empty clipboard command".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ChartpadError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            // Reap the child before reporting.
            let _ = child.kill();
            let _ = child.wait();
            return Err(ChartpadError::Clipboard(format!(
                "Failed to write to {}: {}",
                program, e
            )));
        }
    }

    let status = child
        .wait()
        .map_err(|e| ChartpadError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ChartpadError::Clipboard(format!(
            "{} exited with error",
            program
        )))
    }
}

/// Builds the OSC 52 sequence that sets the clipboard selection to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Writes an OSC 52 escape to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let term = console::Term::stderr();
        if !term.is_term() {
            return Err(ChartpadError::Clipboard(
                "stderr is not a terminal, OSC 52 unavailable".to_string(),
            ));
        }
        let mut term = term;
        term.write_all(osc52_sequence(text).as_bytes())?;
        term.flush()?;
        Ok(())
    }
}

/// Tries `primary`, then `fallback`. Only when both fail is the write an error.
#[derive(Debug, Default, Clone)]
pub struct FallbackClipboard<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Clipboard, F: Clipboard> FallbackClipboard<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Clipboard, F: Clipboard> Clipboard for FallbackClipboard<P, F> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let first = match self.primary.write_text(text) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        tracing::warn!(error = %first, "primary clipboard failed, trying fallback");

        self.fallback.write_text(text).map_err(|second| {
            tracing::error!(primary = %first, fallback = %second, "clipboard fallback failed");
            ChartpadError::Clipboard(format!("{}; fallback: {}", first, second))
        })
    }
}

impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}

/// In-process clipboard that records every successful write.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    writes: Vec<String>,
    failure: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes all fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            writes: Vec::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(ChartpadError::Clipboard(reason.clone()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}
