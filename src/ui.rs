use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

/// Renders a form field; focused fields get a highlighted border
pub fn render_input<'a>(
    content: &'a str,
    title: String,
    is_focused: bool,
    is_editing: bool,
) -> Paragraph<'a> {
    let style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block).wrap(Wrap { trim: false })
}

/// Renders the navigation tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider(" ")
}

/// Cursor position inside a bordered single-line input
pub fn input_cursor(area: Rect, text: &str, cursor: usize) -> Position {
    let column = text
        .get(..cursor)
        .map(|before| before.chars().count())
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16;
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let x = area.x.saturating_add(column).saturating_add(1).min(max_x);
    Position::new(x, area.y.saturating_add(1))
}

/// Compact UTC timestamp for the detail pane
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Rect of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cursor_counts_chars_not_bytes() {
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(input_cursor(area, "café", 5), Position::new(5, 1));
        assert_eq!(input_cursor(area, "", 0), Position::new(1, 1));
    }

    #[test]
    fn test_cursor_clamped_to_box() {
        let area = Rect::new(2, 4, 6, 3);
        assert_eq!(input_cursor(area, "abcdefghij", 10), Position::new(6, 5));
    }

    #[test]
    fn test_cursor_in_very_long_field_stays_in_box() {
        let text = "x".repeat(70_000);
        let area = Rect::new(10, 0, 40, 3);
        assert_eq!(input_cursor(area, &text, text.len()), Position::new(48, 1));
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 24, 10, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-07-24 10:05 UTC");
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, parent);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
    }
}
