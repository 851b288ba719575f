use super::themed_table::TableColors;
use crate::backend::members::{Member, MemberField};
use ratatui::prelude::*;
use ratatui::widgets::*;

/// One table row: ID, Name, Email, Role, Action, Select.
///
/// `editing` is the focused field when this row is open for editing.
pub fn render(
    i: usize,
    member: &Member,
    marked: bool,
    editing: Option<MemberField>,
    colors: &TableColors,
) -> Row<'static> {
    let bg = if i % 2 == 0 {
        colors.normal_row_color
    } else {
        colors.alt_row_color
    };
    let fg = if marked {
        colors.marked_row_fg
    } else {
        colors.row_fg
    };

    let field_cell = |field: MemberField| -> Cell<'static> {
        let value = member.field(field).to_string();
        match editing {
            Some(focused) if focused == field => {
                Cell::from(format!("{value}▏")).style(colors.editing_cell_style)
            }
            Some(_) => Cell::from(value).style(Style::default().add_modifier(Modifier::UNDERLINED)),
            None => Cell::from(value),
        }
    };

    let action = if editing.is_some() { "Save" } else { "Edit" };
    let select = if marked { "[x]" } else { "[ ]" };

    Row::new(vec![
        Cell::from(member.id.to_string()),
        field_cell(MemberField::Name),
        field_cell(MemberField::Email),
        field_cell(MemberField::Role),
        Cell::from(action),
        Cell::from(select),
    ])
    .style(Style::default().fg(fg).bg(bg))
}
