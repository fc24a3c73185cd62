//! Horizontal stat-bar chart widget for ratatui.
//!
//! Renders labeled values as filled bars against a fixed scale, one row
//! per stat. Used for the base-stat chart (scale 0-2000) and the memory
//! stats-boost chart (scale 0-1000).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::tui::theme;

/// A labeled horizontal bar chart with a fixed maximum.
///
/// # Example
///
/// ```ignore
/// let chart = StatBars::new(&stats.labeled(), 2000).color(theme::ACCENT);
/// frame.render_widget(chart, area);
/// ```
pub struct StatBars<'a> {
    entries: &'a [(&'static str, u32)],
    max_value: u32,
    bar_color: Color,
}

impl<'a> StatBars<'a> {
    pub fn new(entries: &'a [(&'static str, u32)], max_value: u32) -> Self {
        Self {
            entries,
            max_value: max_value.max(1),
            bar_color: theme::ACCENT,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.bar_color = color;
        self
    }

    /// Width of the label column: longest label plus one space.
    fn label_width(&self) -> usize {
        self.entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Widget for StatBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.entries.is_empty() {
            return;
        }

        let label_width = self.label_width();
        // Label column, bar, space, 4-digit value.
        let value_width = 5usize;
        let bar_width = (area.width as usize)
            .saturating_sub(label_width)
            .saturating_sub(value_width);

        for (i, (label, value)) in self
            .entries
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;

            let padded_label = format!("{label:<label_width$}");
            buf.set_string(area.x, y, &padded_label, Style::default().fg(theme::TEXT_MUTED));

            if bar_width > 0 {
                let clamped = (*value).min(self.max_value);
                let filled = (clamped as usize * bar_width) / self.max_value as usize;
                let bar: String = "\u{2588}".repeat(filled)
                    + &"\u{2591}".repeat(bar_width - filled);
                buf.set_string(
                    area.x + label_width as u16,
                    y,
                    &bar,
                    Style::default().fg(self.bar_color),
                );
            }

            let value_text = format!(" {value}");
            let value_x = area.x + (label_width + bar_width) as u16;
            if value_x < area.x + area.width {
                buf.set_string(value_x, y, &value_text, Style::default().fg(theme::TEXT));
            }
        }
    }
}
