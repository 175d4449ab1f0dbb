use devdash_core::FetchState;
use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::status::{status_lines, StatusText};
use super::Component;
use crate::action::Action;
use crate::api::WeatherReport;
use crate::state::TempUnit;
use crate::theme::Palette;

pub struct WeatherCardProps<'a> {
    pub state: &'a FetchState<WeatherReport>,
    pub unit: TempUnit,
    pub palette: Palette,
    pub tick_count: u32,
}

/// Current weather for the selected city or location
#[derive(Default)]
pub struct WeatherCard;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Eight-point compass label for a bearing in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + 22.5) / 45.0) as usize % COMPASS.len();
    COMPASS[index]
}

impl WeatherCard {
    fn report_lines(report: &WeatherReport, unit: TempUnit, palette: Palette) -> Vec<Line<'static>> {
        let label = Style::default().fg(palette.muted);
        let current = &report.current;

        let wind = match current.wind_direction {
            Some(direction) => format!(
                "{:.1} km/h {}",
                current.wind_speed,
                compass_point(direction)
            ),
            None => format!("{:.1} km/h", current.wind_speed),
        };

        vec![
            Line::styled(
                report.location.display_name(),
                Style::default().fg(palette.fg).bold(),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    unit.format(current.temperature),
                    Style::default().fg(palette.accent).bold(),
                ),
                Span::styled("  ", label),
                Span::styled(current.condition(), Style::default().fg(palette.fg)),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled("Wind ", label),
                Span::styled(wind, Style::default().fg(palette.fg)),
            ]),
            Line::from(vec![
                Span::styled("Observed ", label),
                Span::styled(
                    current.time.replace('T', " "),
                    Style::default().fg(palette.fg),
                ),
            ]),
        ]
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Weather ")
            .title_style(Style::default().fg(palette.accent).bold());

        let status = StatusText {
            idle_hint: "Press c to enter a city or l to use your location",
            loading: "Fetching weather...",
        };
        let lines = match props.state {
            FetchState::Success(report) => Self::report_lines(report, props.unit, palette),
            other => status_lines(other, status, props.tick_count, palette).unwrap_or_default(),
        };

        let body = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, area);
    }
}
