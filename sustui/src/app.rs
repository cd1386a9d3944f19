//! Main application state and logic.

use crate::state::{
    clamp_index, ActivityInput, DraftField, LoginForm, Screen, StatusKind, StatusMessage,
    STATUS_TTL,
};
use ratatui::widgets::TableState;
use std::sync::Arc;
use std::time::Instant;
use susconfig::{SustainConfig, TokenFile};
use sustain::activities::{ActivityLog, Confirmation};
use sustain::dashboard::{self, DashboardData};
use sustain::session::Session;
use sustain::types::{Activity, ActivityDraft};
use sustain::SustainClient;
use tokio::runtime::Runtime;

/// Main application state.
pub struct App {
    pub config: SustainConfig,
    pub session: Session<TokenFile>,
    pub log: ActivityLog,
    pub screen: Screen,
    pub login: LoginForm,
    pub input: ActivityInput,
    pub table_state: TableState,
    pub dashboard: Option<DashboardData>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: SustainConfig) -> Self {
        let client = Arc::new(SustainClient::new().with_base_url(config.api_url.clone()));
        let session = Session::new(client.clone(), TokenFile::new());
        let log = ActivityLog::new(client);
        let login = LoginForm::new(config.default_username.as_deref());
        Self {
            config,
            session,
            log,
            screen: Screen::Login,
            login,
            input: ActivityInput::Normal,
            table_state: TableState::default(),
            dashboard: None,
            status: None,
        }
    }

    /// Resolves any persisted session at startup and picks the first screen.
    pub fn startup(&mut self, runtime: &Runtime) {
        runtime.block_on(self.session.init());
        if self.session.is_authenticated() {
            self.screen = Screen::Activities;
            if self.config.tui.refresh_on_start {
                if let Err(err) = self.refresh_activities(runtime) {
                    self.set_status(StatusKind::Error, err.to_string());
                }
            }
        } else {
            self.screen = Screen::Login;
        }
    }

    pub fn submit_login(&mut self, runtime: &Runtime) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.clone();
        if username.is_empty() || password.is_empty() {
            self.set_status(StatusKind::Error, "Enter username and password".to_string());
            return;
        }
        match runtime.block_on(self.session.login(&username, &password)) {
            Ok(()) => {
                self.login.password.clear();
                self.screen = Screen::Activities;
                if let Err(err) = self.refresh_activities(runtime) {
                    self.set_status(StatusKind::Error, err.to_string());
                } else {
                    self.set_status(StatusKind::Success, format!("Signed in as {username}"));
                }
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn sign_out(&mut self) {
        self.session.logout();
        self.table_state.select(None);
        self.dashboard = None;
        self.input = ActivityInput::Normal;
        self.login = LoginForm::new(self.config.default_username.as_deref());
        self.screen = Screen::Login;
        self.set_status(StatusKind::Info, "Signed out".to_string());
    }

    pub fn refresh_activities(&mut self, runtime: &Runtime) -> Result<(), sustain::Error> {
        runtime.block_on(self.log.refresh())?;
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        if self.log.activities().is_empty() {
            self.table_state.select(None);
        } else {
            let max = self.log.activities().len() - 1;
            let selected = self.table_state.selected().unwrap_or(0).min(max);
            self.table_state.select(Some(selected));
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.log.activities().is_empty() {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        let max = self.log.activities().len() - 1;
        self.table_state.select(Some(clamp_index(selected, delta, max)));
    }

    pub fn selected_activity(&self) -> Option<&Activity> {
        let selected = self.table_state.selected()?;
        self.log.activities().get(selected)
    }

    pub fn begin_add(&mut self) {
        self.input = ActivityInput::Add {
            draft: ActivityDraft::new(),
            field: DraftField::Action,
        };
    }

    pub fn cancel_add(&mut self) {
        self.input = ActivityInput::Normal;
    }

    pub fn submit_draft(&mut self, runtime: &Runtime) {
        let ActivityInput::Add { draft, .. } = &self.input else {
            return;
        };
        let draft = draft.clone();
        match runtime.block_on(self.log.create(&draft)) {
            Ok(created) => {
                // Creation succeeded; the refresh is the explicit follow-up
                // that brings the list in line with the backend.
                if let Err(err) = self.refresh_activities(runtime) {
                    self.set_status(
                        StatusKind::Error,
                        format!("Logged activity #{}, but refresh failed: {err}", created.id),
                    );
                } else {
                    self.set_status(
                        StatusKind::Success,
                        format!("Logged {} ({} {})", created.action, created.value, created.unit),
                    );
                }
                self.input = ActivityInput::Normal;
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    /// Asks for confirmation before the irreversible remote delete.
    pub fn request_delete(&mut self) {
        match self.selected_activity() {
            Some(activity) => {
                self.input = ActivityInput::ConfirmDelete { id: activity.id };
            }
            None => self.set_status(StatusKind::Info, "No activity selected".to_string()),
        }
    }

    pub fn resolve_delete(&mut self, id: i64, confirmation: Confirmation, runtime: &Runtime) {
        self.input = ActivityInput::Normal;
        match runtime.block_on(self.log.delete(id, confirmation)) {
            Ok(true) => {
                self.clamp_selection();
                self.set_status(StatusKind::Success, format!("Deleted activity {id}"));
            }
            Ok(false) => self.set_status(StatusKind::Info, "Delete cancelled".to_string()),
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn open_dashboard(&mut self, runtime: &Runtime) {
        match runtime.block_on(dashboard::load(self.session.client())) {
            Ok(data) => {
                self.dashboard = Some(data);
                self.screen = Screen::Dashboard;
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(StatusMessage {
            kind,
            text,
            created: Instant::now(),
        });
    }

    pub fn clear_expired_status(&mut self) {
        if let Some(status) = &self.status {
            if status.created.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }
}
