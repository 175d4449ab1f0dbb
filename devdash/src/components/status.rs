//! Idle/loading/error rendering shared by the cards

use devdash_core::FetchState;
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use crate::theme::Palette;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Wording of the non-success states of one card.
pub struct StatusText<'a> {
    /// Shown while idle: how to set the trigger
    pub idle_hint: &'a str,
    /// Shown next to the spinner
    pub loading: &'a str,
}

pub fn spinner(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
}

/// Lines for every state except `Success`, which each card draws itself.
pub fn status_lines<T>(
    state: &FetchState<T>,
    text: StatusText<'_>,
    tick_count: u32,
    palette: Palette,
) -> Option<Vec<Line<'static>>> {
    let lines = match state {
        FetchState::Success(_) => return None,
        FetchState::Idle => vec![Line::styled(
            text.idle_hint.to_string(),
            Style::default().fg(palette.muted),
        )],
        FetchState::Loading => vec![Line::from(vec![
            Span::styled(
                format!("{} ", spinner(tick_count)),
                Style::default().fg(palette.accent),
            ),
            Span::styled(text.loading.to_string(), Style::default().fg(palette.fg)),
        ])],
        FetchState::Error(message) => vec![
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(palette.error).bold()),
                Span::styled(message.clone(), Style::default().fg(palette.error)),
            ]),
            Line::default(),
            Line::styled("Press r to refresh", Style::default().fg(palette.muted)),
        ],
    };
    Some(lines)
}
