//! UI rendering module for githubba.
//!
//! `render()` is the single entry point, called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the cards
//! in `card.rs`, and everything drawn over or instead of them in `overlay.rs`.

mod card;
mod help;
pub mod keybindings;
mod layout;
mod overlay;
mod settings;

use githubba_core::feed::RepositoryFeed;
use githubba_core::stack::{StackStatus, WINDOW_SIZE};
use ratatui::{Frame, layout::Rect};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{card_rect, compute_layout, render_nav_bar, render_status_bar, SPINNER};

/// Renders one complete frame.
///
/// Called exactly once per `AppEvent::Render`. The top card's rect is written
/// back into `state` so the next mouse press can be hit-tested against it.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [nav_bar, body, status_bar] = compute_layout(frame);
    let depth = (WINDOW_SIZE - 1) as u16;
    let top = card_rect(body, depth);
    state.card_area = top;

    render_nav_bar(frame, nav_bar, state, theme);
    render_body(frame, body, top, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::Settings => settings::render_settings(frame, &state.settings, theme),
        Mode::Normal => {}
    }
}

fn render_body(frame: &mut Frame, body: Rect, top: Rect, state: &AppState, theme: &Theme) {
    let spinner = SPINNER[state.spinner % SPINNER.len()];
    let records = state.feed.records();

    if records.is_empty() {
        match state.feed.error() {
            _ if state.feed.is_loading() => overlay::render_loading(frame, body, spinner, theme),
            Some(error) => overlay::render_error(frame, body, error, theme),
            None if state.feed.is_fetching_more() => overlay::render_loading(frame, body, spinner, theme),
            None => overlay::render_all_done(frame, body, false, spinner, theme),
        }
        return;
    }

    if state.stack.status(records.len()) == StackStatus::Exhausted {
        match state.feed.error() {
            Some(error) if !state.feed.is_fetching_more() => overlay::render_error(frame, body, error, theme),
            _ => overlay::render_all_done(frame, body, state.feed.is_fetching_more(), spinner, theme),
        }
        return;
    }

    let hint = state.stack.hint();
    let offset = card::top_card_offset(state.drag_offset(), hint.direction);
    let window = state.stack.visible_window(records);
    card::render_stack(frame, body, top, &window, offset, theme);

    let moved = card::shifted(top, offset, body);
    overlay::render_feedback(frame, moved, state.stack.feedback(), theme);

    let caption_row = Rect { y: (top.bottom() + depth_of(&window)).min(body.bottom().saturating_sub(1)), height: 1, ..body };
    overlay::render_hint(frame, moved, caption_row, hint, theme);
}

/// Rows taken up below the top card by the cards behind it.
fn depth_of<T>(window: &[T]) -> u16 {
    window.len().saturating_sub(1) as u16
}
