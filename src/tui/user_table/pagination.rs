use super::states::UserTableStates;
use super::themed_table::TableColors;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// `« First ‹ Prev 1 2 … Next › Last »`, or `None` when everything fits on one page.
pub fn pagination_line(states: &UserTableStates, colors: &TableColors) -> Option<Line<'static>> {
    let total = states.total_pages();
    if total <= 1 {
        return None;
    }

    let enabled = Style::default().fg(colors.row_fg);
    let disabled = Style::default().fg(colors.disabled_fg);
    let back = if states.is_first_page() { disabled } else { enabled };
    let forward = if states.is_last_page() { disabled } else { enabled };

    let mut spans = vec![
        Span::styled("« First", back),
        Span::raw("  "),
        Span::styled("‹ Prev", back),
        Span::raw("  "),
    ];
    for page in 1..=total {
        let style = if page == states.page() {
            colors.active_page_style
        } else {
            enabled
        };
        spans.push(Span::styled(format!(" {page} "), style));
        spans.push(Span::raw(" "));
    }
    spans.extend([
        Span::raw(" "),
        Span::styled("Next ›", forward),
        Span::raw("  "),
        Span::styled("Last »", forward),
    ]);
    Some(Line::from(spans))
}

pub fn render(states: &UserTableStates, colors: &TableColors, frame: &mut Frame, area: Rect) {
    let Some(line) = pagination_line(states, colors) else {
        return;
    };
    let bar = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Pages"));
    frame.render_widget(bar, area);
}
