use backend::members::{HttpMemberSource, Member, MemberField, MemberId, MemberSource, spawn_initial_load};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use config::Config;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use ratatui::widgets::TableState;
use ratatui::{DefaultTerminal, Frame};
use std::sync::Arc;
use tokio::sync::oneshot;
use tui::user_table::states::UserTableStates;
use tui::user_table::{handle_edit_key, handle_key as handle_list_key, render as render_table};
mod backend;
mod config;
mod tui;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    if let Err(e) = init_logger() {
        eprintln!("logging disabled: {e:#}");
    }
    color_eyre::install()?;
    let config = Config::load();
    let source = HttpMemberSource::new(&config.source_url, config.request_timeout)
        .map_err(|e| eyre!("{e:#}"))?;
    let mut app = App::new(config);
    app.start_load(Arc::new(source));
    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}

/// Sends `log` output to a file; the terminal belongs to the table.
fn init_logger() -> anyhow::Result<()> {
    let path = config::data_dir()?.join("user-admin.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    List,
    Search,
    Edit,
}

#[derive(Debug)]
pub struct App {
    running: bool,
    pub mode: AppMode,
    pub config: Config,
    pub states: UserTableStates,
    /// Cursor within the current page.
    pub table_state: TableState,
    /// Field receiving keystrokes while a row is being edited.
    pub edit_field: MemberField,
    pending_load: Option<oneshot::Receiver<Vec<Member>>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            mode: AppMode::List,
            states: UserTableStates::new(config.page_size),
            config,
            table_state: TableState::default(),
            edit_field: MemberField::Name,
            pending_load: None,
        }
    }

    pub fn start_load(&mut self, source: Arc<dyn MemberSource>) {
        self.pending_load = Some(spawn_initial_load(source));
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        let mut events = EventStream::new();
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events(&mut events).await?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        render_table(self, frame);
    }

    /// Waits for the next key event, the initial load, or an idle tick.
    async fn handle_events(&mut self, events: &mut EventStream) -> Result<()> {
        tokio::select! {
            event = events.next().fuse() => {
                if let Some(Ok(Event::Key(key))) = event {
                    if key.kind == KeyEventKind::Press {
                        self.on_key_event(key);
                    }
                }
            }
            loaded = wait_for_load(&mut self.pending_load) => {
                self.pending_load = None;
                if let Some(members) = loaded {
                    self.on_members_loaded(members);
                }
            }
            _ = tokio::time::sleep(tokio::time::Duration::from_millis(100)) => {
                // Sleep for a short duration to avoid busy waiting.
            }
        }
        Ok(())
    }

    pub fn on_members_loaded(&mut self, members: Vec<Member>) {
        self.states.load(members);
        self.reset_cursor();
    }

    pub fn on_key_event(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::List => match key.code {
                KeyCode::Char('/') => {
                    self.mode = AppMode::Search;
                }
                _ => handle_list_key(self, key),
            },
            AppMode::Search => match key.code {
                KeyCode::Esc => {
                    self.mode = AppMode::List;
                    self.states.clear_search();
                    self.reset_cursor();
                }
                KeyCode::Enter => {
                    self.mode = AppMode::List;
                }
                KeyCode::Backspace => {
                    let mut term = self.states.search_term().to_string();
                    term.pop();
                    self.states.set_search_term(term);
                    self.reset_cursor();
                }
                KeyCode::Char(c) => {
                    let mut term = self.states.search_term().to_string();
                    term.push(c);
                    self.states.set_search_term(term);
                    self.reset_cursor();
                }
                _ => {}
            },
            AppMode::Edit => handle_edit_key(self, key),
        }
    }

    /// Id of the member under the cursor on the current page.
    pub fn cursor_member_id(&self) -> Option<MemberId> {
        let index = self.table_state.selected()?;
        self.states.page_rows().get(index).map(|m| m.id.clone())
    }

    /// Puts the cursor on the first row of the current page.
    pub fn reset_cursor(&mut self) {
        let first = (!self.states.page_rows().is_empty()).then_some(0);
        self.table_state.select(first);
    }

    /// Keeps the cursor on a row that still exists after rows went away.
    pub fn clamp_cursor(&mut self) {
        let len = self.states.page_rows().len();
        let index = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.table_state.select(index);
    }
}

async fn wait_for_load(pending: &mut Option<oneshot::Receiver<Vec<Member>>>) -> Option<Vec<Member>> {
    match pending {
        Some(rx) => rx.await.ok(),
        None => std::future::pending().await,
    }
}
