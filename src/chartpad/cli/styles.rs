use console::Style;
use once_cell::sync::Lazy;

pub static SECTION: Lazy<Style> = Lazy::new(|| Style::new().bold().cyan());
pub static LABEL: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static NODE_ID: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static PLACEHOLDER: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
pub static NOTE: Lazy<Style> = Lazy::new(|| Style::new().italic());
pub static NOTE_EMPHASIS: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static SELECTED: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static CURRENT: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static REQUIRED: Lazy<Style> = Lazy::new(|| Style::new().red().bold());
pub static UNAVAILABLE: Lazy<Style> = Lazy::new(|| Style::new().dim());
