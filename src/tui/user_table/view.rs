use super::pagination::render as render_pagination;
use super::themed_table::TableColors;
use super::view_table_row::render as render_table_row;
use crate::{App, AppMode};
use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::*;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let colors = TableColors::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let term = app.states.search_term();
    if app.mode == AppMode::Search || !term.is_empty() {
        let border = if app.mode == AppMode::Search {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let input = Paragraph::new(term.to_string())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search")
                    .border_style(Style::default().fg(border)),
            )
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(input, chunks[0]);
    } else {
        let title = Paragraph::new("User Management")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);
    }

    let states = &app.states;
    let overview_lines = vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::raw(format!("Total: {}  ", states.members().len())),
        Span::styled("● ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("Matching: {}  ", states.visible().len())),
        Span::styled("● ", Style::default().fg(Color::Red)),
        Span::raw(format!("Selected: {}  ", states.selected_count())),
        Span::raw(format!("Page {}/{}", states.page(), states.total_pages())),
    ])];

    let overview = Paragraph::new(overview_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Source: {}", app.config.source_url))
                .border_style(Style::default().fg(Color::White)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(overview, chunks[1]);

    let rows: Vec<Row> = states
        .page_rows()
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let editing = states.is_editing(&member.id).then_some(app.edit_field);
            render_table_row(i, member, states.is_selected(&member.id), editing, &colors)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Name"),
        Cell::from("Email"),
        Cell::from("Role"),
        Cell::from("Action"),
        Cell::from("Select"),
    ])
    .style(
        Style::default()
            .fg(colors.header_fg)
            .bg(colors.header_bg)
            .add_modifier(Modifier::BOLD),
    );

    let delete_style = if states.has_selection() {
        Style::default()
            .fg(colors.marked_row_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.disabled_fg)
    };
    let delete_control = Line::from(Span::styled(" Delete Selected (d) ", delete_style));

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Users")
            .title(delete_control.right_aligned()),
    )
    .row_highlight_style(colors.selected_row_style)
    .highlight_symbol("▶ ")
    .highlight_spacing(HighlightSpacing::Always);

    frame.render_stateful_widget(table, chunks[2], &mut app.table_state);

    render_pagination(&app.states, &colors, frame, chunks[3]);

    let controls = match app.mode {
        AppMode::List => {
            "q: Exit | ↑↓: Move | ←→: Page | Space: Select | d: Delete | e: Edit | /: Search | c: Clear"
                .to_string()
        }
        AppMode::Search => "Type to filter | Enter: Done | Esc: Clear".to_string(),
        AppMode::Edit => format!(
            "Editing {} | Tab: Next field | Enter: Save",
            app.edit_field.label()
        ),
    };
    let footer = Paragraph::new(vec![Line::from(controls)])
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(colors.row_fg)
                .bg(colors.normal_row_color),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls")
                .border_style(Style::default().fg(colors.footer_border_color)),
        );

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::members::{Member, MemberId};
    use crate::config::Config;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn app_with(count: u64) -> App {
        let mut app = App::new(Config::default());
        app.on_members_loaded(
            (1..=count)
                .map(|i| {
                    let role = if i % 2 == 1 { "Admin" } else { "Member" };
                    Member::new(i, format!("User {i}"), format!("user{i}@example.com"), role)
                })
                .collect(),
        );
        app
    }

    #[test]
    fn renders_columns_and_first_page() {
        let mut app = app_with(12);
        let content = draw(&mut app);
        for column in ["ID", "Name", "Email", "Role", "Action", "Select"] {
            assert!(content.contains(column), "missing {column} in:\n{content}");
        }
        assert!(content.contains("user10@example.com"));
        assert!(!content.contains("user11@example.com"));
        assert!(content.contains("Page 1/2"));
        assert!(content.contains("« First"));
        assert!(content.contains("Last »"));
    }

    #[test]
    fn pagination_hidden_when_one_page() {
        let mut app = app_with(6);
        let content = draw(&mut app);
        assert!(content.contains("Page 1/1"));
        assert!(!content.contains("« First"));
    }

    #[test]
    fn empty_table_after_failed_load() {
        let mut app = App::new(Config::default());
        let content = draw(&mut app);
        assert!(content.contains("Total: 0"));
        assert!(content.contains("User Management"));
        assert!(!content.contains("« First"));
    }

    #[test]
    fn editing_row_shows_save_and_selection_marker() {
        let mut app = app_with(3);
        let id = MemberId::from("2");
        app.states.toggle_select(&id);
        app.states.begin_edit(&id);
        let content = draw(&mut app);
        assert!(content.contains("Save"));
        assert!(content.contains("[x]"));
        assert!(content.contains("Selected: 1"));
    }
}
