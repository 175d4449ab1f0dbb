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
use crate::api::GitHubProfile;
use crate::theme::Palette;

pub struct GithubCardProps<'a> {
    pub state: &'a FetchState<GitHubProfile>,
    pub palette: Palette,
    pub tick_count: u32,
}

/// Profile card for one GitHub user
#[derive(Default)]
pub struct GithubCard;

impl GithubCard {
    fn profile_lines(profile: &GitHubProfile, palette: Palette) -> Vec<Line<'static>> {
        let label = Style::default().fg(palette.muted);
        let value = Style::default().fg(palette.fg).bold();

        let mut lines = vec![
            Line::styled(profile.display_name().to_string(), value),
            Line::styled(
                format!("@{}", profile.login),
                Style::default().fg(palette.accent),
            ),
        ];
        if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.trim().is_empty()) {
            lines.push(Line::default());
            lines.push(Line::styled(bio.to_string(), Style::default().fg(palette.fg)));
        }

        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Repos ", label),
            Span::styled(profile.public_repos.to_string(), value),
            Span::styled("  Followers ", label),
            Span::styled(profile.followers.to_string(), value),
            Span::styled("  Following ", label),
            Span::styled(profile.following.to_string(), value),
        ]));
        lines.push(Line::default());
        lines.push(Line::styled(
            profile.html_url.clone(),
            Style::default().fg(palette.accent).underlined(),
        ));
        lines.push(Line::styled(format!("Avatar: {}", profile.avatar_url), label));
        lines
    }
}

impl Component<Action> for GithubCard {
    type Props<'a> = GithubCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" GitHub ")
            .title_style(Style::default().fg(palette.accent).bold());

        let status = StatusText {
            idle_hint: "Press g to enter a GitHub username",
            loading: "Loading profile...",
        };
        let lines = match props.state {
            FetchState::Success(profile) => Self::profile_lines(profile, palette),
            other => status_lines(other, status, props.tick_count, palette).unwrap_or_default(),
        };

        let body = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use devdash_core::testing::RenderHarness;
    use ratatui::style::Modifier;

    fn props(state: &FetchState<GitHubProfile>) -> GithubCardProps<'_> {
        GithubCardProps {
            state,
            palette: Theme::Light.palette(),
            tick_count: 0,
        }
    }

    fn render(state: &FetchState<GitHubProfile>) -> String {
        let mut harness = RenderHarness::new(60, 14);
        let mut card = GithubCard;
        harness.render_to_string_plain(|frame| {
            let area = frame.area();
            card.render(frame, area, props(state));
        })
    }

    fn octocat(name: Option<&str>) -> GitHubProfile {
        GitHubProfile {
            login: "octocat".into(),
            name: name.map(String::from),
            avatar_url: "https://avatars.example/1".into(),
            bio: Some("Mascot".into()),
            public_repos: 8,
            followers: 120,
            following: 9,
            html_url: "https://github.com/octocat".into(),
        }
    }

    /// Text of the first row inside the card border.
    fn headline(output: &str) -> String {
        output
            .lines()
            .nth(1)
            .unwrap_or_default()
            .trim_matches(|c: char| c == '│' || c.is_whitespace())
            .to_string()
    }

    #[test]
    fn test_idle_prompts_for_username() {
        let output = render(&FetchState::Idle);
        assert!(output.contains("Press g to enter a GitHub username"));
    }

    #[test]
    fn test_profile_without_name_shows_login_as_headline() {
        let output = render(&FetchState::Success(octocat(None)));

        assert_eq!(headline(&output), "octocat");
        assert!(output.contains("@octocat"));
        assert!(output.contains("Mascot"));
        assert!(output.contains("Followers 120"));
        assert!(output.contains("https://github.com/octocat"));
    }

    #[test]
    fn test_profile_name_is_the_bold_headline() {
        let state = FetchState::Success(octocat(Some("The Octocat")));
        assert_eq!(headline(&render(&state)), "The Octocat");

        let mut harness = RenderHarness::new(60, 14);
        let mut card = GithubCard;
        let buffer = harness.render(|frame| {
            let area = frame.area();
            card.render(frame, area, props(&state));
        });
        assert_eq!(buffer[(1, 1)].symbol(), "T");
        assert!(buffer[(1, 1)].modifier.contains(Modifier::BOLD));
        assert!(!buffer[(1, 2)].modifier.contains(Modifier::BOLD));
    }
}
