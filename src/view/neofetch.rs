//! System information layout (`neofetch`)

use std::time::Duration;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde::{Deserialize, Serialize};

use super::banner::LOGO;
use super::theme::Theme;

/// One label/value row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoItem {
    pub label: String,
    pub value: String,
}

/// Payload of the `neofetch` structured output kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeofetchInfo {
    pub logo: String,
    pub header: String,
    pub divider: String,
    pub info: Vec<InfoItem>,
}

fn item(label: &str, value: impl Into<String>) -> InfoItem {
    InfoItem {
        label: label.to_string(),
        value: value.into(),
    }
}

/// Build the info block for a session that has been up for `uptime`
pub fn system_info(uptime: Duration, screen: (u16, u16)) -> NeofetchInfo {
    let secs = uptime.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;

    NeofetchInfo {
        logo: LOGO.to_string(),
        header: "ravon@terminal".to_string(),
        divider: "──────────────────────".to_string(),
        info: vec![
            item("Site", "ravon.dev"),
            item("User", "Ravon"),
            item("GitHub", "https://github.com/Kidflash1233"),
            item("Creator", "https://github.com/davislcruz"),
            item("Inspiration", "Ravon (Kidflash1233)"),
            item("Uptime", format!("{hours}h {minutes}m")),
            item("Likes", "Ben & Jerry's Chocolate Fudge Brownie"),
            item("Loves", "Docker • Proxmox • Tailscale"),
            item("Homelab", "Ubuntu + Docker Compose + GH Actions"),
            item("Stack", "Rust, ratatui, CRT colors"),
            item("Resolution", format!("{}x{}", screen.0, screen.1)),
            item("Terminal", "crt-terminal"),
            item("Projects", "Fake-CRT-Terminal • Homelab • Ravon.dev"),
        ],
    }
}

/// Lay out logo and info side by side
pub fn render_lines(info: &NeofetchInfo, theme: &Theme) -> Vec<Line<'static>> {
    let logo_lines: Vec<&str> = info.logo.lines().collect();
    let logo_width = logo_lines
        .iter()
        .map(|l| unicode_width::UnicodeWidthStr::width(*l))
        .max()
        .unwrap_or(0);
    let label_width = info.info.iter().map(|i| i.label.len()).max().unwrap_or(0);

    let mut right: Vec<Vec<Span<'static>>> = vec![
        vec![Span::styled(
            info.header.clone(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )],
        vec![Span::styled(info.divider.clone(), Style::default().fg(theme.muted))],
    ];
    for row in &info.info {
        let value_style = if row.value.starts_with("http://") || row.value.starts_with("https://") {
            Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.fg)
        };
        right.push(vec![
            Span::styled(
                format!("{:<label_width$}  ", row.label),
                Style::default().fg(theme.accent),
            ),
            Span::styled(row.value.clone(), value_style),
        ]);
    }

    let rows = logo_lines.len().max(right.len());
    (0..rows)
        .map(|i| {
            let logo = logo_lines.get(i).copied().unwrap_or("");
            let pad = logo_width.saturating_sub(unicode_width::UnicodeWidthStr::width(logo));
            let mut spans = vec![Span::styled(
                format!("{logo}{}   ", " ".repeat(pad)),
                Style::default().fg(theme.ascii),
            )];
            if let Some(info_spans) = right.get(i) {
                spans.extend(info_spans.iter().cloned());
            }
            Line::from(spans)
        })
        .collect()
}
