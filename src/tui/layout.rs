//! Root layout computation for main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Split the terminal into content rows and a one-line status bar.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        AppLayout {
            main: rows[0],
            status: rows[1],
        }
    }
}

/// A centered rect taking `percent_x` / `percent_y` of the given area.
/// Used for modal overlays (help, notifications).
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_is_single_row() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = AppLayout::compute(area);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.main.height + layout.status.height, area.height);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let area = Rect::new(0, 0, 5, 1);
        let layout = AppLayout::compute(area);
        assert_eq!(layout.main.width, 5);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let modal = centered_rect(60, 50, area);
        assert!(modal.x >= area.x && modal.right() <= area.right());
        assert!(modal.y >= area.y && modal.bottom() <= area.bottom());
        assert_eq!(modal.width, 60);
        assert_eq!(modal.height, 20);
    }
}
