//! Root view: navbar, the two cards, prompt and key help
//!
//! The dashboard owns the child components (and the prompt's cursor) and
//! routes events: while a prompt is open every key goes to it, otherwise
//! keys map straight to dashboard actions.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use devdash_core::EventKind;

use super::{
    Component, GithubCard, GithubCardProps, HelpBar, HelpBarProps, Navbar, NavbarProps, PromptBar,
    PromptBarProps, WeatherCard, WeatherCardProps,
};
use crate::action::Action;
use crate::state::{AppState, InputTarget};

/// Below this width the cards stack vertically.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 90;

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct Dashboard {
    navbar: Navbar,
    github: GithubCard,
    weather: WeatherCard,
    prompt: PromptBar,
    help: HelpBar,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_prompt(&mut self, state: &AppState, target: InputTarget) -> Option<Action> {
        self.prompt.reset(&state.trigger_text(target));
        Some(Action::InputOpen(target))
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;

        if let EventKind::Resize(width, height) = event {
            return vec![Action::UiTerminalResize(*width, *height)];
        }

        if let Some(input) = &state.input {
            let props = PromptBarProps {
                label: input.target.label(),
                value: &input.value,
                is_focused: true,
                palette: state.theme.palette(),
            };
            return self
                .prompt
                .handle_event(event, props)
                .into_iter()
                .collect::<Vec<_>>();
        }

        let EventKind::Key(key) = event else {
            return vec![];
        };
        let action = match key.code {
            KeyCode::Char('g') => self.open_prompt(state, InputTarget::Username),
            KeyCode::Char('c') => self.open_prompt(state, InputTarget::City),
            KeyCode::Char('l') => Some(Action::WeatherLocate),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
            KeyCode::Char('t') => Some(Action::ThemeToggle),
            KeyCode::Char('u') => Some(Action::UiToggleUnits),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        };
        action.into_iter().collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let palette = state.theme.palette();

        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            area,
        );

        let prompt_height = if state.input.is_some() {
            PromptBar::HEIGHT
        } else {
            0
        };
        let [nav_area, cards_area, prompt_area, help_area] = Layout::vertical([
            Constraint::Length(Navbar::HEIGHT),
            Constraint::Min(4),
            Constraint::Length(prompt_height),
            Constraint::Length(1),
        ])
        .areas(area);

        self.navbar.render(
            frame,
            nav_area,
            NavbarProps {
                theme: state.theme,
                now: state.now,
                palette,
            },
        );

        let direction = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let cards = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(cards_area);

        self.github.render(
            frame,
            cards[0],
            GithubCardProps {
                state: state.github.state(),
                palette,
                tick_count: state.tick_count,
            },
        );
        self.weather.render(
            frame,
            cards[1],
            WeatherCardProps {
                state: state.weather.state(),
                unit: state.unit,
                palette,
                tick_count: state.tick_count,
            },
        );

        if let Some(input) = &state.input {
            self.prompt.render(
                frame,
                prompt_area,
                PromptBarProps {
                    label: input.target.label(),
                    value: &input.value,
                    is_focused: true,
                    palette,
                },
            );
        }

        self.help.render(
            frame,
            help_area,
            HelpBarProps {
                editing: state.input.is_some(),
                palette,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InputState;
    use devdash_core::assert_not_emitted;
    use devdash_core::testing::*;

    fn handle(dashboard: &mut Dashboard, state: &AppState, key: &str) -> Vec<Action> {
        dashboard
            .handle_event(&key_event(key), DashboardProps { state })
            .into_iter()
            .collect()
    }

    #[test]
    fn test_dashboard_keys() {
        let mut dashboard = Dashboard::new();
        let state = AppState::default();

        handle(&mut dashboard, &state, "r").assert_first(Action::Refresh);
        handle(&mut dashboard, &state, "t").assert_first(Action::ThemeToggle);
        handle(&mut dashboard, &state, "u").assert_first(Action::UiToggleUnits);
        handle(&mut dashboard, &state, "l").assert_first(Action::WeatherLocate);
        handle(&mut dashboard, &state, "q").assert_first(Action::Quit);
        handle(&mut dashboard, &state, "esc").assert_first(Action::Quit);
        handle(&mut dashboard, &state, "x").assert_empty();
    }

    #[test]
    fn test_open_prompt_places_cursor_after_current_trigger() {
        let mut dashboard = Dashboard::new();
        let mut state = AppState::default();
        state.github.set_key(Some("octo".into()));

        handle(&mut dashboard, &state, "g").assert_first(Action::InputOpen(InputTarget::Username));

        state.input = Some(InputState {
            target: InputTarget::Username,
            value: "octo".into(),
        });
        handle(&mut dashboard, &state, "c").assert_first(Action::InputChange("octoc".into()));
    }

    #[test]
    fn test_open_prompt_captures_quit_keys() {
        let mut dashboard = Dashboard::new();
        let state = AppState {
            input: Some(InputState {
                target: InputTarget::City,
                value: String::new(),
            }),
            ..Default::default()
        };

        let actions = handle(&mut dashboard, &state, "q");
        assert_not_emitted!(actions, Action::Quit);
        actions.assert_first(Action::InputChange("q".into()));
        handle(&mut dashboard, &state, "esc").assert_first(Action::InputCancel);
    }

    #[test]
    fn test_resize_maps_to_action() {
        let mut dashboard = Dashboard::new();
        let state = AppState::default();
        let actions: Vec<_> = dashboard
            .handle_event(&EventKind::Resize(120, 40), DashboardProps { state: &state })
            .into_iter()
            .collect();
        actions.assert_first(Action::UiTerminalResize(120, 40));
    }

    #[test]
    fn test_render_idle_dashboard() {
        let mut harness = RenderHarness::new(100, 20);
        let mut dashboard = Dashboard::new();
        let state = AppState::default();

        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            dashboard.render(frame, area, DashboardProps { state: &state });
        });

        assert!(output.contains("Developer Dashboard"));
        assert!(output.contains("Light Mode"));
        assert!(output.contains("Press g to enter a GitHub username"));
        assert!(output.contains("refresh"));
    }
}
