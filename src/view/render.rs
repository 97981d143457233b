//! Terminal rendering
//!
//! Draws the output stream as scrollback with the prompt line pinned under the
//! newest entry. The view always follows the tail.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::neofetch;
use super::output::{EntryContent, Output};
use super::theme::Theme;
use crate::app::Shell;

const COLUMN_GAP: usize = 4;

/// Lines of one output entry
fn entry_lines(content: &EntryContent, theme: &Theme) -> Vec<Line<'static>> {
    match content {
        EntryContent::Line { text, style } => {
            vec![Line::from(Span::styled(text.clone(), theme.style_for(*style)))]
        }
        EntryContent::Block { text, style } => text
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), theme.style_for(*style))))
            .collect(),
        EntryContent::Columns { blocks } => columns(blocks, theme),
        EntryContent::Neofetch(info) => neofetch::render_lines(info, theme),
    }
}

/// Lay blocks side by side, each padded to its widest line
fn columns(blocks: &[(String, super::output::LineStyle)], theme: &Theme) -> Vec<Line<'static>> {
    let split: Vec<(Vec<&str>, usize)> = blocks
        .iter()
        .map(|(text, _)| {
            let lines: Vec<&str> = text.split('\n').collect();
            let width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
            (lines, width)
        })
        .collect();
    let rows = split.iter().map(|(lines, _)| lines.len()).max().unwrap_or(0);

    (0..rows)
        .map(|row| {
            let spans: Vec<Span<'static>> = split
                .iter()
                .zip(blocks)
                .map(|((lines, width), (_, style))| {
                    let cell = lines.get(row).copied().unwrap_or("");
                    let pad = width.saturating_sub(cell.width()) + COLUMN_GAP;
                    Span::styled(format!("{cell}{}", " ".repeat(pad)), theme.style_for(*style))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Every rendered line of the output stream
pub fn output_lines(output: &Output, theme: &Theme) -> Vec<Line<'static>> {
    output
        .entries()
        .flat_map(|entry| entry_lines(&entry.content, theme))
        .collect()
}

/// Draw the shell into `area`
pub fn draw_shell(frame: &mut Frame, area: Rect, shell: &Shell, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted))
        .title(Span::styled(
            format!(" {}@{} ", shell.config().user, shell.config().host),
            Style::default().fg(theme.accent),
        ))
        .style(Style::default().bg(theme.bg).fg(theme.fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let prompt = shell.prompt();
    let input = shell.line().text();
    let mut lines = output_lines(shell.output(), theme);
    lines.push(Line::from(vec![
        Span::styled(
            prompt.clone(),
            Style::default().fg(theme.prompt).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(input.to_string(), Style::default().fg(theme.fg)),
    ]));

    let total = lines.len();
    let scroll = total.saturating_sub(inner.height as usize);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    let before_cursor: String = input.chars().take(shell.line().cursor()).collect();
    let x = prompt.width() + 1 + before_cursor.width();
    let y = (total - 1).saturating_sub(scroll as usize);
    if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
        if x < inner.width && y < inner.height {
            frame.set_cursor_position((inner.x + x, inner.y + y));
        }
    }
}
