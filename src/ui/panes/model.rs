//! Model pane rendering
//!
//! Draws the data structure held by the current snapshot. Each family gets
//! its own simple text layout:
//!
//! - stack: vertical, top first
//! - queue: horizontal, front on the left
//! - array: index / value rows
//! - linked list: nodes joined by arrows
//! - heap: one row per tree level
//! - hashmap / hashset: one entry per row / a braced set

use crate::model::value::Value;
use crate::model::ModelState;
use crate::parser::DsaKind;
use crate::session::CurrentSnapshot;
use crate::ui::theme::{border_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn element(value: &Value) -> Span<'static> {
    let text = match value {
        Value::Str(s) => format!("[\"{}\"]", s),
        other => format!("[{}]", other),
    };
    Span::styled(text, Style::default().fg(DEFAULT_THEME.element))
}

fn marker(text: &str) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.marker)
            .add_modifier(Modifier::BOLD),
    )
}

fn muted(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(DEFAULT_THEME.muted))
}

/// Build the text lines for a model of the given kind
pub fn model_lines(kind: DsaKind, model: &ModelState) -> Vec<Line<'static>> {
    if model.is_empty() {
        return vec![Line::from(muted(format!("(empty {})", kind)))];
    }

    match (kind, model) {
        (DsaKind::Stack, ModelState::Sequence(items)) => items
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, value)| {
                let mut spans = vec![element(value)];
                if idx == items.len() - 1 {
                    spans.push(marker(" ← top"));
                }
                Line::from(spans)
            })
            .collect(),
        (DsaKind::Queue, ModelState::Sequence(items)) => {
            let mut spans = vec![marker("front → ")];
            for value in items {
                spans.push(element(value));
                spans.push(Span::raw(" "));
            }
            spans.push(marker("← back"));
            vec![Line::from(spans)]
        }
        (DsaKind::LinkedList, ModelState::Sequence(items)) => {
            let mut spans = vec![marker("head ")];
            for value in items {
                spans.push(element(value));
                spans.push(muted(" → ".to_string()));
            }
            spans.push(muted("null".to_string()));
            vec![Line::from(spans)]
        }
        (_, ModelState::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, value)| Line::from(vec![muted(format!("{:3} │ ", idx)), element(value)]))
            .collect(),
        (_, ModelState::Heap(items)) => {
            let mut lines = Vec::new();
            let mut start = 0;
            let mut width = 1;
            let mut level = 0;
            while start < items.len() {
                let end = (start + width).min(items.len());
                let mut spans = vec![muted(format!("L{} ", level))];
                for value in &items[start..end] {
                    spans.push(element(value));
                    spans.push(Span::raw(" "));
                }
                if level == 0 {
                    spans.push(marker("← min"));
                }
                lines.push(Line::from(spans));
                start = end;
                width *= 2;
                level += 1;
            }
            lines
        }
        (_, ModelState::Map(entries)) => entries
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(key.to_string(), Style::default().fg(DEFAULT_THEME.type_name)),
                    muted(" → ".to_string()),
                    element(value),
                ])
            })
            .collect(),
        (_, ModelState::Set(members)) => {
            let mut spans = vec![muted("{ ".to_string())];
            for value in members {
                spans.push(element(value));
                spans.push(Span::raw(" "));
            }
            spans.push(muted("}".to_string()));
            vec![Line::from(spans)]
        }
    }
}

/// Clamp `offset` to the scrollable range and convert it to ratatui rows
fn clamp_scroll(offset: &mut usize, total_lines: usize, visible_height: usize) -> u16 {
    *offset = (*offset).min(total_lines.saturating_sub(visible_height));
    u16::try_from(*offset).unwrap_or(u16::MAX)
}

/// Render the model pane
pub fn render_model_pane(
    frame: &mut Frame,
    area: Rect,
    kind: Option<DsaKind>,
    current: Option<&CurrentSnapshot<'_>>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = match kind {
        Some(kind) => format!(" Model: {} ", kind),
        None => " Model ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines = match (kind, current) {
        (Some(kind), Some(current)) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(
                        current.operation.to_string(),
                        Style::default()
                            .fg(DEFAULT_THEME.call)
                            .add_modifier(Modifier::BOLD),
                    ),
                    muted(format!("  line {}", current.source_line)),
                ]),
                Line::from(muted(current.effect.to_string())),
                Line::from(""),
            ];
            lines.extend(model_lines(kind, current.model));
            lines
        }
        _ => vec![Line::from(muted("(nothing to show)".to_string()))],
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let scroll_rows = clamp_scroll(scroll_offset, lines.len(), visible_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_rows, 0));
    frame.render_widget(paragraph, area);
}
