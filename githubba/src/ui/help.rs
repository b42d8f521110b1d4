//! Help overlay renderer for githubba.
//!
//! Draws a centred modal over the card stack. `Clear` erases the background
//! first, so the overlay shares the frame's single `terminal.draw()` call.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled down by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns, where the box would have
/// no usable width.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Max(64), Constraint::Percentage(80));

    // Erase the background behind the modal before drawing content.
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to close ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    let help_text = build_help_text();

    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Keybinding reference, grouped by what the keys act on.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Cards"),
        Line::from("  → / l         Like: open the repository in your browser"),
        Line::from("  ← / h         Skip to the next repository"),
        Line::from("  drag          Drag the top card left or right to swipe it"),
        Line::from(""),
        Line::from("Feed"),
        Line::from("  r             Start a fresh batch"),
        Line::from("  s             Settings: language and feed"),
        Line::from(""),
        Line::from("Settings"),
        Line::from("  j / k         Choose a language"),
        Line::from("  Tab           Switch between language and feed"),
        Line::from("  Space         Toggle random / new feed"),
        Line::from("  Enter         Save and reload"),
        Line::from("  Esc           Discard changes"),
        Line::from(""),
        Line::from("General"),
        Line::from("  j / k         Scroll this help"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q / Esc       Quit"),
    ])
}
