//! Settings popup: language filter and feed type.
//!
//! Edits go to `AppState::settings` and only take effect on save, which starts
//! a new feed session.

use githubba_core::types::FeedType;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::{SettingsDraft, SettingsField};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_settings(frame: &mut Frame, draft: &SettingsDraft, theme: &Theme) {
    let rows = SettingsDraft::language_rows() as u16;
    let area = frame.area().centered(Constraint::Max(40), Constraint::Max(rows + 7));
    if area.width < 20 || area.height < 8 {
        return;
    }
    frame.render_widget(Clear, area);
    let outer = Block::bordered()
        .title(" Settings ")
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_active));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [languages_area, feed_area] =
        inner.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]));

    let highlight = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let items: Vec<ListItem> = (0..SettingsDraft::language_rows())
        .map(|row| ListItem::new(SettingsDraft::language_label(row)))
        .collect();
    let mut list_state = ListState::default().with_selected(Some(draft.language_row));
    frame.render_stateful_widget(
        List::new(items)
            .block(panel_block(Line::from(" Language "), draft.field == SettingsField::Language, theme))
            .highlight_style(highlight)
            .highlight_symbol("› "),
        languages_area,
        &mut list_state,
    );

    let option = |feed: FeedType, label: &'static str| {
        if draft.feed == feed {
            Span::styled(format!("[{label}]"), highlight)
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(theme.muted))
        }
    };
    let feed_line = Line::from(vec![
        option(FeedType::Random, "Random"),
        Span::raw("  "),
        option(FeedType::New, "New this month"),
    ]);
    frame.render_widget(
        Paragraph::new(feed_line)
            .block(panel_block(Line::from(" Feed "), draft.field == SettingsField::Feed, theme)),
        feed_area,
    );
}
