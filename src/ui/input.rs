//! Input handling for the TUI.
//!
//! Every printable key edits the filter, so commands live on control keys
//! and the navigation block.

use crate::app::{App, AppEvent, LoadState, Signal, StatusKind};
use crate::util::validate_url_for_open;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::clipboard;
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Alert overlay captures all keys until dismissed
    if app.alert.is_some() {
        return handle_alert_input(app, code, modifiers);
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Char('u') if ctrl => {
            if app.state == LoadState::Ready && app.filter_clear() {
                app.dispatch(Signal::QueryChanged, event_tx);
            }
        }
        KeyCode::Char('y') if ctrl => copy_selected(app, event_tx),
        KeyCode::Char('e') if ctrl => {
            if app.state == LoadState::Ready {
                app.export_html(event_tx);
            }
        }
        KeyCode::Char(c) if !ctrl && !modifiers.contains(KeyModifiers::ALT) => {
            if app.state == LoadState::Ready {
                app.filter_push(c);
                app.dispatch(Signal::QueryChanged, event_tx);
            }
        }
        KeyCode::Backspace => {
            if app.state == LoadState::Ready && app.filter_pop() {
                app.dispatch(Signal::QueryChanged, event_tx);
            }
        }
        KeyCode::Esc => {
            if app.state == LoadState::Ready && app.filter_clear() {
                app.dispatch(Signal::QueryChanged, event_tx);
            } else {
                return Action::Quit;
            }
        }
        KeyCode::Down => move_selection(app, event_tx, |app| app.select_down(1)),
        KeyCode::Up => move_selection(app, event_tx, |app| app.select_up(1)),
        KeyCode::PageDown => {
            let rows = app.list_visible_rows.max(1);
            move_selection(app, event_tx, |app| app.select_down(rows));
        }
        KeyCode::PageUp => {
            let rows = app.list_visible_rows.max(1);
            move_selection(app, event_tx, |app| app.select_up(rows));
        }
        KeyCode::Home => move_selection(app, event_tx, App::select_first),
        KeyCode::End => move_selection(app, event_tx, App::select_last),
        KeyCode::Enter => open_selected(app),
        _ => {}
    }
    Action::Continue
}

fn handle_alert_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Esc | KeyCode::Enter => {
            app.alert = None;
            Action::Continue
        }
        _ => Action::Continue,
    }
}

/// Apply a cursor move, then ask for the next page if the cursor is close
/// enough to the end of what is rendered.
fn move_selection(
    app: &mut App,
    event_tx: &mpsc::Sender<AppEvent>,
    step: impl FnOnce(&mut App),
) {
    step(app);
    if app.state == LoadState::Ready && app.is_near_bottom() {
        app.dispatch(Signal::ScrolledNearBottom, event_tx);
    }
}

fn open_selected(app: &mut App) {
    let Some(link) = app.selected_unit().map(|unit| unit.link.clone()) else {
        return;
    };
    // Validate before open::that() so feed data never reaches the OS opener raw
    match validate_url_for_open(&link) {
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                app.set_status(format!("Failed to open browser: {}", e), StatusKind::Error);
            }
        }
        Err(e) => app.set_status(e.to_string(), StatusKind::Error),
    }
}

fn copy_selected(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(text) = app.selected_unit().map(|unit| unit.copy_text.clone()) else {
        return;
    };
    match clipboard::copy(&text) {
        Ok(()) => {
            tracing::debug!(sku = %text, "Copied to clipboard");
            app.mark_copied(app.selected, event_tx);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard copy failed");
            app.alert = Some(format!("Could not copy code: {}", e));
        }
    }
}
