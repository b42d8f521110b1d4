//! Things drawn over or instead of the card stack: swipe feedback, the swipe
//! hint, and the loading / error / all-done placeholders.

use githubba_core::feedback::FeedbackAnimationState;
use githubba_core::hint::SwipeHintState;
use githubba_core::types::{FeedbackKind, SwipeDirection};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Like / nope badge centred on the top card while the confirmation shows.
pub fn render_feedback(frame: &mut Frame, card: Rect, feedback: FeedbackAnimationState, theme: &Theme) {
    let Some(kind) = feedback.kind.filter(|_| feedback.visible) else {
        return;
    };
    let (label, color) = match kind {
        FeedbackKind::Like => ("♥  LIKE", theme.like),
        FeedbackKind::Dislike => ("✗  NOPE", theme.dislike),
    };
    let area = card.centered(Constraint::Length(15), Constraint::Length(3));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// Chevrons beside the card pointing the way it is being nudged, and a
/// caption on the row below the stack.
pub fn render_hint(frame: &mut Frame, card: Rect, caption_row: Rect, hint: SwipeHintState, theme: &Theme) {
    if !hint.active {
        return;
    }
    let style = Style::default().fg(theme.hint).add_modifier(Modifier::BOLD);
    let mid = card.y + card.height / 2;
    match hint.direction {
        Some(SwipeDirection::Right) if card.right() + 4 <= frame.area().right() => {
            frame.render_widget(Span::styled("›››", style), Rect::new(card.right() + 1, mid, 3, 1));
        }
        Some(SwipeDirection::Left) if card.x >= 4 => {
            frame.render_widget(Span::styled("‹‹‹", style), Rect::new(card.x - 4, mid, 3, 1));
        }
        _ => {}
    }
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("‹ Swipe card left or right ›", style),
            Span::styled("   → opens it, ← skips it", Style::default().fg(theme.muted)),
        ]))
        .alignment(Alignment::Center),
        caption_row,
    );
}

/// Centred placeholder shown in place of the stack.
pub fn render_message(frame: &mut Frame, area: Rect, title: Line<'_>, body: Text<'_>, theme: &Theme) {
    let box_area = area.centered(Constraint::Max(56), Constraint::Max(9));
    frame.render_widget(Clear, box_area);
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(title)
                    .title_alignment(Alignment::Center)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.border_inactive)),
            ),
        box_area,
    );
}

pub fn render_loading(frame: &mut Frame, area: Rect, spinner: &str, theme: &Theme) {
    let body = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(spinner.to_owned(), Style::default().fg(theme.accent))),
        Line::from(""),
        Line::from("Finding repositories…"),
    ]);
    render_message(frame, area, Line::from(" Loading "), body, theme);
}

pub fn render_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let body = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(error.to_owned(), Style::default().fg(theme.error))),
        Line::from(""),
        Line::from(Span::styled("press r to try again", Style::default().fg(theme.muted))),
    ]);
    render_message(frame, area, Line::from(" Something went wrong "), body, theme);
}

/// Every card has been swiped. More may still be on the way.
pub fn render_all_done(frame: &mut Frame, area: Rect, fetching: bool, spinner: &str, theme: &Theme) {
    let footer = if fetching {
        Line::from(vec![
            Span::styled(spinner.to_owned(), Style::default().fg(theme.accent)),
            Span::raw(" looking for more"),
        ])
    } else {
        Line::from(Span::styled("press r for a fresh batch", Style::default().fg(theme.muted)))
    };
    let body = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled("All Done!", Style::default().fg(theme.like).add_modifier(Modifier::BOLD))),
        Line::from("You've seen every repository in this batch."),
        Line::from(""),
        footer,
    ]);
    render_message(frame, area, Line::from(""), body, theme);
}
