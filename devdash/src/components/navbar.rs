use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::theme::{Palette, Theme};

pub struct NavbarProps {
    pub theme: Theme,
    pub now: DateTime<Local>,
    pub palette: Palette,
}

/// Title, clock and theme indicator
#[derive(Default)]
pub struct Navbar;

impl Navbar {
    pub const HEIGHT: u16 = 1;
}

impl Component<Action> for Navbar {
    type Props<'a> = NavbarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).areas(area);

        let title = Line::from(vec![Span::styled(
            " Developer Dashboard",
            Style::default().fg(palette.accent).bold(),
        )]);
        frame.render_widget(Paragraph::new(title), left);

        let status = Line::from(vec![
            Span::styled(props.theme.label(), Style::default().fg(palette.muted)),
            Span::styled("  ", Style::default()),
            Span::styled(
                props.now.format("%H:%M:%S").to_string(),
                Style::default().fg(palette.fg).bold(),
            ),
            Span::raw(" "),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(status), right);
    }
}
