//! Title block rendering.

use crate::unicode::{center_offset, display_width, fit_to_width, truncate_to_width};

/// Turns a menu title into the block drawn above the entries.
pub trait TitleRenderer {
    /// Render `text` for a terminal `width` columns wide.
    ///
    /// Returns the block, one line per `\n`-separated row, and its line
    /// count. Every line must fit in `width` columns.
    fn render(&self, text: &str, width: usize, centered: bool) -> (String, usize);
}

/// The title on a single line.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTitle;

impl TitleRenderer for PlainTitle {
    fn render(&self, text: &str, width: usize, centered: bool) -> (String, usize) {
        let pad = if centered {
            center_offset(width, display_width(text))
        } else {
            0
        };
        let line = format!("{}{text}", " ".repeat(pad));
        (fit_to_width(&line, width), 1)
    }
}

/// The title inside a box-drawing frame, three lines tall.
///
/// Falls back to [`PlainTitle`] when the terminal is too narrow for a frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct BannerTitle;

impl BannerTitle {
    const MIN_WIDTH: usize = 4;
}

impl TitleRenderer for BannerTitle {
    fn render(&self, text: &str, width: usize, centered: bool) -> (String, usize) {
        if width < Self::MIN_WIDTH {
            return PlainTitle.render(text, width, centered);
        }

        let inner = truncate_to_width(text, width - 4);
        let inner_width = display_width(inner);
        let box_width = inner_width + 4;
        let indent = " ".repeat(if centered {
            center_offset(width, box_width)
        } else {
            0
        });
        let rule = "─".repeat(inner_width + 2);

        let lines = [
            format!("{indent}┌{rule}┐"),
            format!("{indent}│ {inner} │"),
            format!("{indent}└{rule}┘"),
        ];
        let block = lines
            .iter()
            .map(|line| fit_to_width(line, width))
            .collect::<Vec<_>>()
            .join("\n");
        (block, lines.len())
    }
}
