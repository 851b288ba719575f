use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct TableColors {
    pub header_bg: Color,
    pub header_fg: Color,
    pub row_fg: Color,
    pub selected_row_style: Style,
    pub marked_row_fg: Color,
    pub editing_cell_style: Style,
    pub normal_row_color: Color,
    pub alt_row_color: Color,
    pub footer_border_color: Color,
    pub active_page_style: Style,
    pub disabled_fg: Color,
}

impl Default for TableColors {
    fn default() -> Self {
        Self {
            header_bg: Color::Rgb(30, 58, 95),
            header_fg: Color::Rgb(226, 232, 240),
            row_fg: Color::Rgb(226, 232, 240),
            selected_row_style: Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(Color::Rgb(96, 165, 250)),
            marked_row_fg: Color::Rgb(248, 113, 113),
            editing_cell_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            normal_row_color: Color::Rgb(15, 23, 42),
            alt_row_color: Color::Rgb(30, 41, 59),
            footer_border_color: Color::Rgb(96, 165, 250),
            active_page_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(96, 165, 250))
                .add_modifier(Modifier::BOLD),
            disabled_fg: Color::DarkGray,
        }
    }
}
