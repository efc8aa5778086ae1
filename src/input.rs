//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] intents.  Adding a new keybinding is
//! a single match arm in [`handle_normal`] (or [`handle_search`] for the
//! search box).
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the intent (if one doesn't exist).
//! 2. Add a `KeyCode` match arm below that calls it.
//! 3. Update the help text in `ui::draw_status_bar`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode};
use crate::category::Category;

/// Process a single key event, updating app state accordingly.
///
/// Only key-press events are handled; release and repeat events are dropped.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    match app.mode {
        InputMode::Normal => handle_normal(app, key),
        InputMode::Search => handle_search(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_category(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_category(),
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            app.select_category(Category::ALL[index]);
        }
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Enter | KeyCode::Char('o') => app.open_selected(),
        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}
