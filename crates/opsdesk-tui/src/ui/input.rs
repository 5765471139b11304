//! Keyboard input handling for the TUI.
//!
//! Keys become app actions or router commands. Guards are not consulted
//! here; the main loop re-runs them after every event.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Focus, FormField, Screen, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.screen() {
        Screen::SignIn | Screen::SignUp => handle_form_input(app, key),
        Screen::Unauthorized => {
            match key.code {
                KeyCode::Char('h') => app.go_home(),
                KeyCode::Char('o') => app.sign_out(),
                KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
                _ => {}
            }
            Ok(false)
        }
        Screen::Dashboard | Screen::Records(_) => {
            handle_shell_input(app, key);
            Ok(false)
        }
        Screen::Loading | Screen::Blank => {
            if key.code == KeyCode::Char('q') {
                app.state = AppState::ConfirmingQuit;
            }
            Ok(false)
        }
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => app.form.next_field(),
        KeyCode::Up | KeyCode::BackTab => app.form.prev_field(),
        KeyCode::Enter => match app.form.focus {
            FormField::Submit => app.submit_form(),
            FormField::Switch => app.navigator.navigate(app.form.switch_target()),
            FormField::Name | FormField::Email | FormField::Password => app.form.next_field(),
        },
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_shell_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('o') => app.sign_out(),
        KeyCode::Char('r') => app.refresh_session(),
        KeyCode::Char('u') => app.reload_page(),
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Navigation => Focus::Content,
                Focus::Content => Focus::Navigation,
            };
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Enter | KeyCode::Right if app.focus == Focus::Navigation => {
            app.navigate_to_selection();
        }
        KeyCode::Left | KeyCode::Esc if app.focus == Focus::Content => {
            app.focus = Focus::Navigation;
        }
        _ => {}
    }
}
