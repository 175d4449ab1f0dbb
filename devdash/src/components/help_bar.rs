use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::theme::Palette;

#[derive(Default)]
pub struct HelpBar;

pub struct HelpBarProps {
    /// Prompt keys instead of dashboard keys
    pub editing: bool,
    pub palette: Palette,
}

const DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("g", "username"),
    ("c", "city"),
    ("l", "locate"),
    ("r", "refresh"),
    ("t", "theme"),
    ("u", "units"),
    ("q", "quit"),
];

const PROMPT_KEYS: &[(&str, &str)] = &[("Enter", "submit"), ("Esc", "cancel")];

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let keys = if props.editing {
            PROMPT_KEYS
        } else {
            DASHBOARD_KEYS
        };

        let spans: Vec<Span> = keys
            .iter()
            .flat_map(|(key, what)| {
                [
                    Span::styled(*key, Style::default().fg(props.palette.accent).bold()),
                    Span::styled(format!(" {what}  "), Style::default().fg(props.palette.muted)),
                ]
            })
            .collect();

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
