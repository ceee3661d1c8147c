//! Shared event reducer: pure-ish handlers for key events.
//!
//! The runtime converts crossterm events to [`AppKeyEvent`] and calls
//! [`handle_key_event`]. Interactions mutate the param store through the
//! controller; the view itself is only re-derived by the store-change check
//! at the end of the handler, never directly by a key branch.

use crate::app_core::input::{AppKeyCode, AppKeyEvent};
use crate::app_core::state::{AppState, Pane};

/// Handle a runtime-agnostic key event, mutating `app` in place.
pub fn handle_key_event(app: &mut AppState, event: AppKeyEvent) {
    if event.is_release {
        return;
    }

    let code = event.code;
    let ctrl = event.ctrl;

    if code == AppKeyCode::Tab || code == AppKeyCode::BackTab {
        if code == AppKeyCode::BackTab {
            app.focus_prev_pane();
        } else {
            app.focus_next_pane();
        }
        return;
    }

    if app.show_help {
        if matches!(code, AppKeyCode::Char('?') | AppKeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Clear All works from anywhere.
    if ctrl && code == AppKeyCode::Char('l') {
        app.clear_all();
        app.sync_if_stale();
        return;
    }

    match app.focused_pane {
        Pane::Search => handle_search_key(app, code, ctrl),
        Pane::Sort => handle_sort_key(app, code),
        Pane::Specialties => handle_specialties_key(app, code, ctrl),
        Pane::Mode => handle_mode_key(app, code),
        Pane::List => handle_list_key(app, code),
    }

    app.sync_if_stale();
}

fn handle_search_key(app: &mut AppState, code: AppKeyCode, ctrl: bool) {
    match code {
        AppKeyCode::Enter | AppKeyCode::Esc => app.focus_pane(Pane::List),
        AppKeyCode::Char('u') if ctrl => {
            app.search_clear();
            app.apply_search();
        }
        AppKeyCode::Char('a') if ctrl => app.search_move_to_start(),
        AppKeyCode::Char('e') if ctrl => app.search_move_to_end(),
        AppKeyCode::Char(c) if !ctrl => {
            app.search_add_char(c);
            app.apply_search();
        }
        AppKeyCode::Backspace => {
            app.search_backspace();
            app.apply_search();
        }
        AppKeyCode::Delete => {
            app.search_delete();
            app.apply_search();
        }
        AppKeyCode::Left => app.search_move_cursor_left(),
        AppKeyCode::Right => app.search_move_cursor_right(),
        AppKeyCode::Home => app.search_move_to_start(),
        AppKeyCode::End => app.search_move_to_end(),
        _ => {}
    }
}

fn handle_sort_key(app: &mut AppState, code: AppKeyCode) {
    match code {
        AppKeyCode::Up => app.sort_move(-1),
        AppKeyCode::Down => app.sort_move(1),
        AppKeyCode::Enter | AppKeyCode::Char(' ') => app.apply_sort(),
        AppKeyCode::Char('q') => app.should_quit = true,
        AppKeyCode::Char('c') => app.clear_all(),
        AppKeyCode::Esc => app.focus_pane(Pane::List),
        _ => {}
    }
}

fn handle_specialties_key(app: &mut AppState, code: AppKeyCode, ctrl: bool) {
    match code {
        AppKeyCode::Up => app.specialty_move(-1),
        AppKeyCode::Down => app.specialty_move(1),
        AppKeyCode::Enter | AppKeyCode::Char(' ') => app.toggle_specialty_under_cursor(),
        AppKeyCode::Char('u') if ctrl => {
            app.specialty_search_edit(|text| text.clear());
        }
        AppKeyCode::Char(c) if !ctrl => {
            app.specialty_search_edit(|text| text.push(c));
        }
        AppKeyCode::Backspace => {
            app.specialty_search_edit(|text| {
                text.pop();
            });
        }
        AppKeyCode::Esc => app.focus_pane(Pane::List),
        _ => {}
    }
}

fn handle_mode_key(app: &mut AppState, code: AppKeyCode) {
    match code {
        AppKeyCode::Up => app.mode_move(-1),
        AppKeyCode::Down => app.mode_move(1),
        AppKeyCode::Enter | AppKeyCode::Char(' ') => app.apply_mode(),
        AppKeyCode::Char('q') => app.should_quit = true,
        AppKeyCode::Char('c') => app.clear_all(),
        AppKeyCode::Esc => app.focus_pane(Pane::List),
        _ => {}
    }
}

fn handle_list_key(app: &mut AppState, code: AppKeyCode) {
    match code {
        AppKeyCode::Char('q') | AppKeyCode::Esc => app.should_quit = true,
        AppKeyCode::Char('/') => {
            app.focus_pane(Pane::Search);
            app.search_move_to_end();
        }
        AppKeyCode::Char('?') => app.show_help = true,
        AppKeyCode::Char('c') => app.clear_all(),
        AppKeyCode::Up => app.move_selection(-1),
        AppKeyCode::Down => app.move_selection(1),
        AppKeyCode::Home => {
            if !app.view_indices.is_empty() {
                app.list_state.select(Some(0));
            }
        }
        AppKeyCode::End => {
            let len = app.view_indices.len();
            if len > 0 {
                app.list_state.select(Some(len - 1));
            }
        }
        AppKeyCode::PageUp => {
            let current = app.list_state.selected().unwrap_or(0);
            if !app.view_indices.is_empty() {
                app.list_state.select(Some(current.saturating_sub(10)));
            }
        }
        AppKeyCode::PageDown => {
            let len = app.view_indices.len();
            if len > 0 {
                let current = app.list_state.selected().unwrap_or(0);
                app.list_state.select(Some((current + 10).min(len - 1)));
            }
        }
        _ => {}
    }
}
