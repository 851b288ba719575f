use crate::backend::members::MemberField;
use crate::{App, AppMode};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, true),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, false),
        KeyCode::Char('g') | KeyCode::Home => {
            app.states.first_page();
            app.reset_cursor();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.states.previous_page();
            app.reset_cursor();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.states.next_page();
            app.reset_cursor();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.states.last_page();
            app.reset_cursor();
        }
        KeyCode::Char(c @ '1'..='9') => {
            let page = c.to_digit(10).unwrap_or(1) as usize;
            if page <= app.states.total_pages() {
                app.states.go_to_page(page);
                app.reset_cursor();
            }
        }
        KeyCode::Char('c') => {
            app.states.clear_search();
            app.reset_cursor();
        }
        KeyCode::Char(' ') => {
            if let Some(id) = app.cursor_member_id() {
                app.states.toggle_select(&id);
            }
        }
        KeyCode::Char('d') => {
            // "Delete Selected" is disabled while nothing is selected.
            if app.states.has_selection() {
                app.states.delete_selected();
                app.clamp_cursor();
            }
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.cursor_member_id() {
                app.states.begin_edit(&id);
                app.edit_field = MemberField::Name;
                app.mode = AppMode::Edit;
            }
        }
        _ => {}
    }
}

/// Keys while a row is open for editing. Every keystroke is written to the
/// member immediately; Enter leaves edit mode.
pub fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let Some(id) = app.states.edit_target().cloned() else {
        app.mode = AppMode::List;
        return;
    };

    match key.code {
        KeyCode::Enter => {
            app.states.save_edit(&id);
            app.mode = AppMode::List;
        }
        KeyCode::Tab => app.edit_field = app.edit_field.next(),
        KeyCode::BackTab => app.edit_field = app.edit_field.prev(),
        KeyCode::Backspace | KeyCode::Char(_) => {
            let Some(mut value) = app
                .states
                .visible()
                .iter()
                .find(|m| m.id == id)
                .map(|m| m.field(app.edit_field).to_string())
            else {
                return;
            };
            match key.code {
                KeyCode::Char(c) => value.push(c),
                _ => {
                    value.pop();
                }
            }
            app.states.apply_field_edit(&id, app.edit_field, value);
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, down: bool) {
    let total = app.states.page_rows().len();
    if total == 0 {
        return;
    }
    let new_index = match (app.table_state.selected(), down) {
        (Some(i), true) if i + 1 < total => i + 1,
        (_, true) => 0,
        (Some(0) | None, false) => total - 1,
        (Some(i), false) => i - 1,
    };
    app.table_state.select(Some(new_index));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::members::{Member, MemberId};
    use crate::config::Config;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.on_key_event(key(*code));
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key_event(key(KeyCode::Char(c)));
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(Config::default());
        app.running = true;
        app.on_members_loaded(
            (1..=12u64)
                .map(|i| {
                    let role = if i % 2 == 1 { "Admin" } else { "Member" };
                    Member::new(i, format!("User {i}"), format!("user{i}@example.com"), role)
                })
                .collect(),
        );
        app
    }

    #[test]
    fn search_filters_live_and_escape_clears() {
        let mut app = loaded_app();
        press(&mut app, &[KeyCode::Char('l')]);
        assert_eq!(app.states.page(), 2);

        press(&mut app, &[KeyCode::Char('/')]);
        assert_eq!(app.mode, AppMode::Search);
        type_text(&mut app, "adm");
        assert_eq!(app.states.visible().len(), 6);
        assert_eq!(app.states.page(), 1);

        press(&mut app, &[KeyCode::Backspace]);
        assert_eq!(app.states.search_term(), "ad");

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.mode, AppMode::List);
        assert_eq!(app.states.search_term(), "");
        assert_eq!(app.states.visible().len(), 12);
        assert!(app.running);
    }

    #[test]
    fn enter_keeps_filter() {
        let mut app = loaded_app();
        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "member");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.mode, AppMode::List);
        assert_eq!(app.states.visible().len(), 6);
        press(&mut app, &[KeyCode::Char('c')]);
        assert_eq!(app.states.visible().len(), 12);
    }

    #[test]
    fn cursor_wraps_within_page() {
        let mut app = loaded_app();
        assert_eq!(app.table_state.selected(), Some(0));
        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.table_state.selected(), Some(9));
        press(&mut app, &[KeyCode::Down]);
        assert_eq!(app.table_state.selected(), Some(0));
        press(&mut app, &[KeyCode::Char('G')]);
        assert_eq!(app.states.page(), 2);
        press(&mut app, &[KeyCode::Char('k')]);
        assert_eq!(app.cursor_member_id(), Some(MemberId::from("12")));
    }

    #[test]
    fn page_keys_follow_the_bar() {
        let mut app = loaded_app();
        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.states.page(), 2);
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.states.page(), 2);
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.states.page(), 2);
        press(&mut app, &[KeyCode::Home]);
        assert_eq!(app.states.page(), 1);
        press(&mut app, &[KeyCode::Left]);
        assert_eq!(app.states.page(), 1);
    }

    #[test]
    fn select_and_delete_rows() {
        let mut app = loaded_app();
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.states.visible().len(), 12);

        press(&mut app, &[KeyCode::Down, KeyCode::Char(' ')]);
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Char(' ')]);
        assert!(app.states.is_selected(&MemberId::from("2")));
        assert!(app.states.is_selected(&MemberId::from("5")));

        press(&mut app, &[KeyCode::Char('d')]);
        assert!(!app.states.has_selection());
        let ids: Vec<_> = app.states.visible().iter().map(|m| m.id.to_string()).collect();
        assert!(!ids.contains(&"2".to_string()));
        assert!(!ids.contains(&"5".to_string()));
        assert_eq!(app.table_state.selected(), Some(4));
    }

    #[test]
    fn inline_edit_writes_each_keystroke() {
        let mut app = loaded_app();
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Char('e')]);
        assert_eq!(app.mode, AppMode::Edit);
        assert_eq!(app.states.edit_target(), Some(&MemberId::from("3")));

        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.edit_field, MemberField::Email);
        for _ in 0.."user3@example.com".len() {
            press(&mut app, &[KeyCode::Backspace]);
        }
        type_text(&mut app, "x@y.com");
        let email = |app: &App| app.states.visible()[2].email.clone();
        assert_eq!(email(&app), "x@y.com");

        // 'q' is text while editing, not quit.
        press(&mut app, &[KeyCode::BackTab, KeyCode::Char('q')]);
        assert!(app.running);
        assert_eq!(app.states.visible()[2].name, "User 3q");

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.mode, AppMode::List);
        assert_eq!(app.states.edit_target(), None);
        assert_eq!(email(&app), "x@y.com");
    }

    #[test]
    fn quit_from_table() {
        let mut app = loaded_app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }
}
