//! Execution log pane rendering

use crate::session::{ErrorEntry, LogEntry, LogLevel};
use crate::ui::theme::{border_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Style::default().fg(DEFAULT_THEME.text),
        LogLevel::Warn => Style::default().fg(DEFAULT_THEME.warn),
        LogLevel::Error => Style::default().fg(DEFAULT_THEME.err),
    }
}

fn log_item(entry: &LogEntry) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(DEFAULT_THEME.muted),
        ),
        Span::styled(entry.message.clone(), level_style(entry.level)),
    ]))
}

fn error_item(entry: &ErrorEntry) -> ListItem<'static> {
    let text = match entry.source_line {
        Some(line) => format!("✗ line {}: {}", line, entry.message),
        None => format!("✗ {}", entry.message),
    };
    ListItem::new(text).style(
        Style::default()
            .fg(DEFAULT_THEME.err)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render the log pane: surfaced errors first, then the execution log
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    log: &[LogEntry],
    errors: &[ErrorEntry],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if log.is_empty() && errors.is_empty() {
        let paragraph = Paragraph::new("(no log entries)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.muted));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = errors
        .iter()
        .map(error_item)
        .chain(log.iter().map(log_item))
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
