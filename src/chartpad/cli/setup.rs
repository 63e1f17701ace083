use chartpad::model::SectionKey;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chartpad", bin_name = "chartpad", version)]
#[command(
    about = "Fill in structured clinical note templates and copy them as plain text",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding divisions.json and templates/
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List divisions
    Divisions,

    /// List the templates of a division
    Templates {
        #[command(flatten)]
        selection: Selection,
    },

    /// Show the form of a template
    Show {
        #[command(flatten)]
        selection: Selection,

        #[command(flatten)]
        edits: Edits,
    },

    /// Print the note text a copy would produce
    Text {
        #[command(flatten)]
        selection: Selection,

        #[command(flatten)]
        edits: Edits,

        #[command(flatten)]
        target: Target,
    },

    /// Copy note text to the clipboard
    Copy {
        #[command(flatten)]
        selection: Selection,

        #[command(flatten)]
        edits: Edits,

        #[command(flatten)]
        target: Target,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., default_division)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Division folder
    #[arg(short, long)]
    pub division: Option<String>,

    /// Template file or name
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Edits {
    /// Select an option (e.g., S-sx-0)
    #[arg(long = "check", value_name = "OPTION_ID")]
    pub check: Vec<String>,

    /// Deselect a checkbox option
    #[arg(long = "uncheck", value_name = "OPTION_ID")]
    pub uncheck: Vec<String>,

    /// Fill in a field or detail; `\n` starts a new line
    #[arg(long = "set", value_name = "ID=TEXT", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// One section: Intro, S, O or A+P (Intro and S go together)
    #[arg(short, long, value_name = "KEY", conflicts_with = "all")]
    pub section: Option<SectionKey>,

    /// Every section, in copy order (default)
    #[arg(short, long)]
    pub all: bool,
}

impl Target {
    /// The requested section, or `None` for everything.
    pub fn key(&self) -> Option<SectionKey> {
        if self.all {
            None
        } else {
            self.section
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (id, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=TEXT, got `{}`", raw))?;
    if id.is_empty() {
        return Err("missing field id before `=`".to_string());
    }
    Ok((id.to_string(), text.replace("\\n", "\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("S-cc=cough").unwrap(),
            ("S-cc".to_string(), "cough".to_string())
        );
        assert_eq!(
            parse_assignment("S-hpi=a\\nb=c").unwrap(),
            ("S-hpi".to_string(), "a\nb=c".to_string())
        );
        assert!(parse_assignment("S-cc").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_parses_copy_command() {
        let cli = Cli::try_parse_from([
            "chartpad", "copy", "-d", "im", "--section", "a+p", "--check", "S-sx-0", "--set",
            "S-cc=cough", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Copy {
                selection,
                edits,
                target,
            }) => {
                assert_eq!(selection.division.as_deref(), Some("im"));
                assert_eq!(target.section, Some(SectionKey::AP));
                assert_eq!(edits.check, vec!["S-sx-0"]);
                assert_eq!(edits.set[0].1, "cough");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_section_conflicts_with_all() {
        assert!(Cli::try_parse_from(["chartpad", "text", "--section", "S", "--all"]).is_err());
    }
}
