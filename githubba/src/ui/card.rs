//! Repository cards drawn as a physical stack.
//!
//! Cards are drawn back to front: each card behind the top one is shifted down
//! a row and narrowed, so its bottom edge peeks out from under the card above.
//! Only the top card shows content, and only the top card moves with a drag
//! or the swipe hint.

use githubba_core::stack::StackCard;
use githubba_core::types::{RepositoryRecord, SwipeDirection};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// How far the swipe hint nudges the top card, in columns.
pub const HINT_NUDGE: i32 = 3;

/// Horizontal offset of the top card: a live drag wins over the hint.
pub fn top_card_offset(drag_offset: i32, hint: Option<SwipeDirection>) -> i32 {
    if drag_offset != 0 {
        return drag_offset;
    }
    match hint {
        Some(SwipeDirection::Right) => HINT_NUDGE,
        Some(SwipeDirection::Left) => -HINT_NUDGE,
        None => 0,
    }
}

/// Rect of the card at `stack_index` given the top card's resting rect.
pub fn stacked_rect(top: Rect, stack_index: usize) -> Rect {
    let depth = stack_index as u16;
    let inset = (depth * 2).min(top.width / 2);
    Rect {
        x: top.x + inset,
        y: top.y + depth,
        width: top.width - inset * 2,
        height: top.height,
    }
}

/// Shifts `rect` horizontally by `offset`, keeping it inside `bounds`.
pub fn shifted(rect: Rect, offset: i32, bounds: Rect) -> Rect {
    let min_x = i32::from(bounds.x);
    let max_x = i32::from(bounds.right().saturating_sub(rect.width)).max(min_x);
    let x = (i32::from(rect.x) + offset).clamp(min_x, max_x);
    Rect { x: x as u16, ..rect }
}

/// Draws the window, back to front. `top` is the top card's resting rect.
pub fn render_stack(
    frame: &mut Frame,
    bounds: Rect,
    top: Rect,
    window: &[StackCard<'_, RepositoryRecord>],
    offset: i32,
    theme: &Theme,
) {
    for card in window.iter().rev() {
        let area = stacked_rect(top, card.stack_index);
        if card.accepts_input {
            let area = shifted(area, offset, bounds);
            frame.render_widget(Clear, area);
            render_front(frame, area, card.record, offset, theme);
        } else {
            frame.render_widget(Clear, area);
            let title = Line::from(Span::styled(
                format!(" {} ", card.record.full_name),
                Style::default().fg(theme.muted),
            ));
            frame.render_widget(panel_block(title, false, theme), area);
        }
    }
}

fn render_front(frame: &mut Frame, area: Rect, repo: &RepositoryRecord, offset: i32, theme: &Theme) {
    let tilt = match offset.signum() {
        1 => Span::styled(" ♥ ", Style::default().fg(theme.like)),
        -1 => Span::styled(" ✗ ", Style::default().fg(theme.dislike)),
        _ => Span::raw(""),
    };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", repo.full_name),
            Style::default().fg(theme.card_title).add_modifier(Modifier::BOLD),
        ),
        tilt,
    ]);
    let block = panel_block(title, true, theme);
    frame.render_widget(
        Paragraph::new(card_text(repo, theme)).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Body of the top card.
pub fn card_text<'a>(repo: &'a RepositoryRecord, theme: &Theme) -> Text<'a> {
    let muted = Style::default().fg(theme.muted);
    let mut lines = Vec::new();

    let mut stats = vec![
        Span::styled(format!("★ {}", compact_count(repo.stargazers_count)), Style::default().fg(theme.stars)),
        Span::styled(format!("   ⑂ {}", compact_count(repo.forks_count)), muted),
        Span::styled(format!("   ◉ {}", compact_count(repo.watchers_count)), muted),
    ];
    if let Some(language) = &repo.language {
        stats.push(Span::raw("   "));
        stats.push(Span::styled(language.as_str(), Style::default().fg(theme.language)));
    }
    if repo.fork {
        stats.push(Span::styled("   fork", muted));
    }
    lines.push(Line::from(stats));
    lines.push(Line::from(""));

    match repo.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(description) => lines.push(Line::from(Span::styled(description, Style::default().fg(theme.card_text)))),
        None => lines.push(Line::from(Span::styled("No description provided.", muted.add_modifier(Modifier::ITALIC)))),
    }

    if !repo.topics.is_empty() {
        lines.push(Line::from(""));
        let topics: Vec<Span> = repo
            .topics
            .iter()
            .flat_map(|t| [Span::styled(format!("#{t}"), Style::default().fg(theme.topic)), Span::raw(" ")])
            .collect();
        lines.push(Line::from(topics));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("by {}", repo.owner.login), muted)));
    let license = repo
        .license
        .as_ref()
        .and_then(|l| l.spdx_id.as_deref().filter(|id| *id != "NOASSERTION").or(Some(l.name.as_str())))
        .filter(|l| !l.is_empty());
    let mut dates = format!(
        "created {}  ·  updated {}",
        repo.created_at.format("%b %-d, %Y"),
        repo.updated_at.format("%b %-d, %Y")
    );
    if let Some(license) = license {
        dates.push_str(&format!("  ·  {license}"));
    }
    lines.push(Line::from(Span::styled(dates, muted)));
    lines.push(Line::from(Span::styled(repo.html_url.as_str(), muted.add_modifier(Modifier::UNDERLINED))));

    Text::from(lines)
}

/// `1234` -> `1.2k`, `2500000` -> `2.5m`.
pub fn compact_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => trim_decimal(n as f64 / 1_000.0, "k"),
        _ => trim_decimal(n as f64 / 1_000_000.0, "m"),
    }
}

fn trim_decimal(value: f64, suffix: &str) -> String {
    let rounded = (value * 10.0).floor() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}{suffix}", rounded as u64)
    } else {
        format!("{rounded:.1}{suffix}")
    }
}
