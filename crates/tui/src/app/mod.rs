pub mod login;
pub mod query;

use std::time::{Duration, Instant};

use api_types::entry::EntryStatus;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    navigation::{Navigator, Route},
    notify::{Notifier, Toasts},
    storage::{LOGGED_USER_KEY, LocalStorage},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use login::{LoginField, LoginState};
pub use query::{ConfirmDialog, Focus, FormField, QueryPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Query,
    Route(Route),
}

impl Navigator for Screen {
    fn navigate(&mut self, route: Route) {
        tracing::info!(path = %route.path(), "navigate");
        *self = Screen::Route(route);
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub query: QueryPanel,
    pub toasts: Toasts,
    /// Display name of the logged user, for the info bar only.
    pub user_name: Option<String>,
    pub base_url: String,
}

pub struct App {
    client: Client,
    storage: LocalStorage,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let storage = LocalStorage::new(&config.storage_path);
        let session = storage.session_user()?;

        let screen = if session.is_some() {
            Screen::Query
        } else {
            Screen::Login
        };
        let state = AppState {
            screen,
            login: LoginState::default(),
            query: QueryPanel::for_service(&client),
            toasts: Toasts::new(Duration::from_secs(config.toast_seconds)),
            user_name: session.map(|user| user.name),
            base_url: client.base_url().to_string(),
        };

        Ok(Self {
            client,
            storage,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.state.toasts.expire(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await?;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Query => self.handle_query_key(action).await,
            Screen::Route(_) => {
                if action == AppAction::Cancel {
                    self.state.screen = Screen::Query;
                }
            }
        }
        Ok(())
    }

    async fn handle_login_key(&mut self, action: AppAction) {
        let login = &mut self.state.login;
        match action {
            AppAction::Cancel => self.should_quit = true,
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                login.advance_focus();
            }
            AppAction::Backspace => {
                login.active_field_mut().pop();
            }
            AppAction::Input(ch) => login.active_field_mut().push(ch),
            AppAction::Submit => {
                if let Some(user) = login.submit(&self.client, &self.storage).await {
                    self.state.user_name = Some(user.name);
                    self.state.screen = Screen::Query;
                }
            }
            _ => {}
        }
    }

    async fn handle_query_key(&mut self, action: AppAction) {
        if self.state.query.dialog.is_open() {
            self.handle_dialog_key(action).await;
            return;
        }

        match action {
            AppAction::Create => {
                let AppState { query, screen, .. } = &mut self.state;
                query.navigate_to_create(screen);
            }
            AppAction::Logout => self.logout(),
            AppAction::NextField => {
                self.state.query.focus = self.state.query.focus.next();
            }
            AppAction::PrevField => {
                self.state.query.focus = self.state.query.focus.prev();
            }
            AppAction::Submit => self.search().await,
            _ => match self.state.query.focus {
                Focus::Form(_) => self.handle_form_key(action),
                Focus::Table => self.handle_table_key(action).await,
            },
        }
    }

    fn handle_form_key(&mut self, action: AppAction) {
        let query = &mut self.state.query;
        match action {
            AppAction::Left => query.cycle_select(false),
            AppAction::Right => query.cycle_select(true),
            AppAction::Down => query.focus = query.focus.next(),
            AppAction::Up => query.focus = query.focus.prev(),
            AppAction::Backspace => {
                if let Some(field) = query.active_input_mut() {
                    field.pop();
                }
            }
            AppAction::Input(' ') if !query.is_editing_text() => {
                query.cycle_select(true);
            }
            AppAction::Input(ch) => {
                if let Some(field) = query.active_input_mut() {
                    field.push(ch);
                }
            }
            _ => {}
        }
    }

    async fn handle_table_key(&mut self, action: AppAction) {
        let AppState {
            query,
            toasts,
            screen,
            ..
        } = &mut self.state;

        match action {
            AppAction::Cancel => query.focus = Focus::Form(FormField::Year),
            AppAction::Up | AppAction::Input('k') => query.select_prev(),
            AppAction::Down | AppAction::Input('j') => query.select_next(),
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input(ch) => {
                let Some(entry) = query.selected_entry().cloned() else {
                    return;
                };
                let pending = entry.status == EntryStatus::Pending;
                match ch {
                    'e' => query.navigate_to_edit(entry.id, screen),
                    'd' => query.request_delete(entry),
                    'f' if pending => {
                        query
                            .change_status(&self.client, &entry, EntryStatus::Settled, toasts)
                            .await;
                    }
                    'c' if pending => {
                        query
                            .change_status(&self.client, &entry, EntryStatus::Cancelled, toasts)
                            .await;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    async fn handle_dialog_key(&mut self, action: AppAction) {
        let AppState { query, toasts, .. } = &mut self.state;
        match action {
            AppAction::Submit | AppAction::Input('s' | 'S' | 'y' | 'Y') => {
                query.confirm_delete(&self.client, toasts).await;
            }
            AppAction::Cancel | AppAction::Input('n' | 'N') => query.cancel_delete(),
            _ => {}
        }
    }

    /// The session user is read from storage on every search, never cached.
    async fn search(&mut self) {
        let session = match self.storage.session_user() {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(error = %err, "failed to read session user");
                self.state
                    .toasts
                    .error(format!("Falha ao ler a sessão: {err}"));
                return;
            }
        };

        let AppState { query, toasts, .. } = &mut self.state;
        query.search(&self.client, session.as_ref(), toasts).await;
    }

    fn logout(&mut self) {
        if let Err(err) = self.storage.remove_item(LOGGED_USER_KEY) {
            tracing::error!(error = %err, "failed to clear session user");
            self.state
                .toasts
                .error(format!("Falha ao encerrar a sessão: {err}"));
            return;
        }
        tracing::info!("logged out");
        self.state.user_name = None;
        self.state.login = LoginState::default();
        self.state.screen = Screen::Login;
    }
}
