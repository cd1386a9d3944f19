//! Keyboard event handlers.

use crate::app::App;
use crate::state::{cycle_category, cycle_unit, ActivityInput, DraftField, Screen, StatusKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sustain::activities::Confirmation;
use sustain::types::ActivityDraft;
use tokio::runtime::Runtime;

/// Handle a key event, returns true if the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent, runtime: &Runtime) -> bool {
    match app.screen {
        Screen::Login => handle_login_key(app, key, runtime),
        Screen::Activities => handle_activities_key(app, key, runtime),
        Screen::Dashboard => handle_dashboard_key(app, key, runtime),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent, runtime: &Runtime) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_field();
        }
        KeyCode::Enter => app.submit_login(runtime),
        KeyCode::Backspace => {
            app.login.active_buffer_mut().pop();
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.login.active_buffer_mut().push(c);
            }
        }
        _ => {}
    }
    false
}

fn handle_activities_key(app: &mut App, key: KeyEvent, runtime: &Runtime) -> bool {
    match &mut app.input {
        ActivityInput::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => {
                if let Err(err) = app.refresh_activities(runtime) {
                    app.set_status(StatusKind::Error, err.to_string());
                } else {
                    app.set_status(StatusKind::Info, "Activities refreshed".to_string());
                }
            }
            KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
            KeyCode::Char('a') | KeyCode::Enter => app.begin_add(),
            KeyCode::Char('d') => app.request_delete(),
            KeyCode::Char('g') => app.open_dashboard(runtime),
            KeyCode::Char('o') => app.sign_out(),
            _ => {}
        },
        ActivityInput::Add { draft, field } => match key.code {
            KeyCode::Esc => app.cancel_add(),
            KeyCode::Enter => app.submit_draft(runtime),
            KeyCode::Tab => *field = field.next(),
            KeyCode::BackTab => *field = field.prev(),
            KeyCode::Up => {
                let next = cycle_category(draft.category, -1);
                draft.set_category(next);
            }
            KeyCode::Down => {
                let next = cycle_category(draft.category, 1);
                draft.set_category(next);
            }
            KeyCode::Left => cycle_unit(draft, -1),
            KeyCode::Right => cycle_unit(draft, 1),
            KeyCode::Backspace => {
                draft_buffer(draft, *field).pop();
            }
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    draft_buffer(draft, *field).push(c);
                }
            }
            _ => {}
        },
        ActivityInput::ConfirmDelete { id } => {
            let id = *id;
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.resolve_delete(id, Confirmation::Granted, runtime);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.resolve_delete(id, Confirmation::Denied, runtime);
                }
                _ => {}
            }
        }
    }
    false
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent, runtime: &Runtime) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('g') => app.screen = Screen::Activities,
        KeyCode::Char('r') => app.open_dashboard(runtime),
        _ => {}
    }
    false
}

fn draft_buffer(draft: &mut ActivityDraft, field: DraftField) -> &mut String {
    match field {
        DraftField::Action => &mut draft.action,
        DraftField::Value => &mut draft.value,
        DraftField::Notes => &mut draft.notes,
    }
}
