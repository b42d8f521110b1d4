//! Keybinding dispatcher for githubba.
//!
//! Translates raw crossterm `KeyEvent`s and `MouseEvent`s into `AppState`
//! mutations and returns a `KeyAction` telling the event loop whether to
//! continue or quit. The dispatcher branches first on `state.mode` so that
//! Normal, HelpOverlay and Settings each have an isolated handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use githubba_core::stack::SwipeOutcome;
use githubba_core::types::SwipeDirection;

use crate::app::{AppState, Mode, SettingsField};

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::Normal => handle_normal(key, state),
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Settings => handle_settings(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => swipe(state, SwipeDirection::Left),
        KeyCode::Right | KeyCode::Char('l') => swipe(state, SwipeDirection::Right),
        KeyCode::Char('r') => {
            state.new_session();
            KeyAction::Continue
        }
        KeyCode::Char('s') => {
            state.open_settings();
            KeyAction::Continue
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

fn swipe(state: &mut AppState, direction: SwipeDirection) -> KeyAction {
    // A keyboard swipe supersedes any mouse drag in progress.
    state.drag = None;
    if let SwipeOutcome::Dropped = state.swipe(direction) {
        tracing::trace!(?direction, "key swipe dropped during feedback");
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// `j`/`k`/`g`/`G` scroll the overlay; `?`, `Esc` or `q` close it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Settings mode
// ---------------------------------------------------------------------------

fn handle_settings(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let field = state.settings.field;
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        KeyCode::Enter => state.save_settings(),
        KeyCode::Tab | KeyCode::BackTab => state.settings.toggle_field(),
        KeyCode::Char('j') | KeyCode::Down if field == SettingsField::Language => {
            state.settings.next_language();
        }
        KeyCode::Char('k') | KeyCode::Up if field == SettingsField::Language => {
            state.settings.prev_language();
        }
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l')
            if field == SettingsField::Feed =>
        {
            state.settings.feed = state.settings.feed.toggled();
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Drag the top card to swipe it; scroll wheel scrolls the help overlay.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match (state.mode, mouse.kind) {
        (Mode::Normal, MouseEventKind::Down(MouseButton::Left)) => {
            state.begin_drag(mouse.column, mouse.row);
        }
        (Mode::Normal, MouseEventKind::Drag(MouseButton::Left)) => {
            state.drag_to(mouse.column, mouse.row);
        }
        (Mode::Normal, MouseEventKind::Up(MouseButton::Left)) => {
            if let Some(outcome) = state.end_drag(mouse.column, mouse.row) {
                tracing::debug!(?outcome, "drag swipe");
            }
        }
        (Mode::HelpOverlay, MouseEventKind::ScrollUp) => {
            state.help_scroll = state.help_scroll.saturating_sub(3);
        }
        (Mode::HelpOverlay, MouseEventKind::ScrollDown) => {
            state.help_scroll = state.help_scroll.saturating_add(3);
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::{timer_sink, EventHandler};
    use crossterm::event::KeyEventKind;
    use githubba_core::feed::{LinkOpener, NoopLinkOpener};
    use githubba_core::types::FeedType;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn noop_opener() -> Box<dyn LinkOpener + Send> {
        Box::new(NoopLinkOpener)
    }

    fn app() -> AppState {
        let handler = EventHandler::new();
        AppState::new(Config { hint: false, ..Config::default() }, None, timer_sink(handler.tx), noop_opener)
    }

    #[tokio::test]
    async fn quit_keys() {
        let mut state = app();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Quit);
        assert_eq!(handle_key(press(KeyCode::Esc), &mut state), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &mut state), KeyAction::Quit);
    }

    #[tokio::test]
    async fn help_opens_and_esc_closes_it_without_quitting() {
        let mut state = app();
        handle_key(press(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(press(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);
        assert_eq!(handle_key(press(KeyCode::Esc), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[tokio::test]
    async fn settings_edit_then_cancel_keeps_running_values() {
        let mut state = app();
        handle_key(press(KeyCode::Char('s')), &mut state);
        assert_eq!(state.mode, Mode::Settings);

        handle_key(press(KeyCode::Down), &mut state);
        handle_key(press(KeyCode::Char(' ')), &mut state);
        assert_eq!(state.settings.feed, FeedType::Random, "space only toggles on the feed field");
        handle_key(press(KeyCode::Tab), &mut state);
        handle_key(press(KeyCode::Char(' ')), &mut state);
        assert_eq!(state.settings.feed, FeedType::New);
        assert_eq!(state.settings.language().as_deref(), Some("JavaScript"));

        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.config.feed, FeedType::Random);
        assert_eq!(state.config.language, None);
    }

    #[tokio::test]
    async fn settings_enter_saves_and_restarts() {
        let mut state = app();
        let session = state.feed.session();
        handle_key(press(KeyCode::Char('s')), &mut state);
        handle_key(press(KeyCode::Up), &mut state);
        handle_key(press(KeyCode::Enter), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.config.language.as_deref(), Some("Swift"));
        assert_eq!(state.feed.session(), session + 1);
    }

    #[tokio::test]
    async fn refresh_starts_a_new_session() {
        let mut state = app();
        let session = state.feed.session();
        handle_key(press(KeyCode::Char('r')), &mut state);
        assert_eq!(state.feed.session(), session + 1);
    }
}
