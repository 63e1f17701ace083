//! Terminal measurement for the size-fit engine.
//!
//! Lengths are terminal cells: widths in columns, heights in rows. A single-line box
//! is drawn as `[value]`, so its two brackets count as horizontal padding.

use chartpad::config::ChartpadConfig;
use chartpad::form::TextBox;
use chartpad::sizing::{BoxStyle, CssSize, Layout};
use unicode_width::UnicodeWidthStr;

const DEFAULT_COLUMNS: u16 = 80;

/// Columns taken by the indentation in front of a text box.
pub const GUTTER: usize = 6;

pub struct TerminalLayout {
    columns: u16,
    input_min_width: CssSize,
    input_max_width: CssSize,
    textarea_max_height: CssSize,
}

impl TerminalLayout {
    pub fn new(config: &ChartpadConfig) -> Self {
        let columns = console::Term::stdout()
            .size_checked()
            .map(|(_, cols)| cols)
            .unwrap_or(DEFAULT_COLUMNS);
        Self::with_columns(config, columns)
    }

    pub fn with_columns(config: &ChartpadConfig, columns: u16) -> Self {
        Self {
            columns,
            input_min_width: config.input_min_width(),
            input_max_width: config.input_max_width(),
            textarea_max_height: config.textarea_max_height(),
        }
    }

    fn available(&self) -> f32 {
        (self.columns as usize).saturating_sub(GUTTER).max(1) as f32
    }
}

impl Layout for TerminalLayout {
    fn box_style(&self, node: &TextBox) -> BoxStyle {
        if node.multiline {
            BoxStyle {
                min_height: CssSize::Px(node.rows as f32),
                max_height: self.textarea_max_height,
                ..BoxStyle::default()
            }
        } else {
            BoxStyle {
                min_width: self.input_min_width,
                max_width: self.input_max_width,
                padding_x: 2.0,
                ..BoxStyle::default()
            }
        }
    }

    fn measure_text(&self, _node: &TextBox, text: &str) -> f32 {
        text.width() as f32
    }

    fn container_width(&self, _node: &TextBox) -> f32 {
        self.available()
    }

    fn content_height(&self, node: &TextBox) -> f32 {
        let width = self.available().max(1.0) as usize;
        let text = if node.value.is_empty() {
            &node.placeholder
        } else {
            &node.value
        };
        text.split('\n')
            .map(|line| line.width().div_ceil(width).max(1))
            .sum::<usize>() as f32
    }
}
