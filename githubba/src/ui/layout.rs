//! Screen layout for githubba: navigation bar, card area, status bar.
//!
//! Pure layout arithmetic plus the two one-row bars. Called inside
//! `terminal.draw()` on every render, so every frame reflects the current
//! terminal size.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use githubba_core::feed::RepositoryFeed;

use crate::app::{AppState, Mode, ALL_LANGUAGES};
use crate::theme::Theme;

/// Braille spinner, one frame per tick.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Widest a card is ever drawn, in columns.
const MAX_CARD_WIDTH: u16 = 72;
/// Tallest a card is ever drawn, in rows.
const MAX_CARD_HEIGHT: u16 = 20;

/// Returns `[nav_bar, body, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    frame.area().layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Rect of the top card inside `body`, leaving `depth` rows underneath for
/// the cards stacked behind it and a row for the hint caption.
pub fn card_rect(body: Rect, depth: u16) -> Rect {
    let width = body.width.saturating_sub(4).min(MAX_CARD_WIDTH);
    let height = body.height.saturating_sub(depth + 2).min(MAX_CARD_HEIGHT);
    let x = body.x + (body.width - width) / 2;
    let y = body.y + (body.height.saturating_sub(height + depth + 1)) / 2;
    Rect { x, y, width, height }
}

/// Bordered block for a card or popup. The active one gets a thick border.
pub fn panel_block<'a>(title: Line<'a>, is_active: bool, theme: &Theme) -> Block<'a> {
    let color = if is_active { theme.border_active } else { theme.border_inactive };
    let border_type = if is_active { BorderType::Thick } else { BorderType::Rounded };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
}

/// Top bar: app name, feed, language filter and a spinner while fetching.
pub fn render_nav_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let language = state.feed.language().unwrap_or(ALL_LANGUAGES);
    let mut spans = vec![
        Span::styled(" githubba ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(format!("{} feed", state.feed.feed_type())),
        Span::styled("  ·  ", Style::default().fg(theme.muted)),
        Span::raw(language.to_owned()),
    ];
    if state.feed.is_fetching_more() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(SPINNER[state.spinner % SPINNER.len()], Style::default().fg(theme.accent)));
    }
    let seen = state.stack.current_index().min(state.feed.records().len());
    let count = format!("{seen}/{} ", state.feed.records().len());

    let [left, right] = area.layout(&Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(count.len() as u16),
    ]));
    let style = Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(style), left);
    frame.render_widget(Paragraph::new(count).style(style), right);
}

/// Bottom bar: keybinding reminder for the active mode, or the last feed
/// error while cards are still on screen.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, keys) = match state.mode {
        Mode::Normal => (" SWIPE ", "←/h skip  →/l open  r refresh  s settings  ? help  q quit"),
        Mode::HelpOverlay => (" HELP ", "j/k scroll  ?/Esc close"),
        Mode::Settings => (" SETTINGS ", "j/k language  Tab field  Space toggle feed  Enter save  Esc cancel"),
    };
    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ];
    match state.feed.error() {
        Some(error) if state.mode == Mode::Normal && !state.feed.records().is_empty() => {
            spans.push(Span::styled(error.to_owned(), Style::default().fg(theme.error)));
        }
        _ => spans.push(Span::raw(keys)),
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
