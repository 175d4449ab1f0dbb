//! Single-line prompt for editing a card's trigger

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use devdash_core::EventKind;

use super::Component;
use crate::action::Action;
use crate::theme::Palette;

pub struct PromptBarProps<'a> {
    /// What is being edited, shown in the border title
    pub label: &'a str,
    pub value: &'a str,
    pub is_focused: bool,
    pub palette: Palette,
}

/// Text input with a byte-indexed cursor.
///
/// Every edit emits `InputChange` with the whole new value; `Enter` emits
/// `InputSubmit` and `Esc` emits `InputCancel`.
#[derive(Default)]
pub struct PromptBar {
    cursor: usize,
}

impl PromptBar {
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Place the cursor after a freshly opened prompt's text.
    pub fn reset(&mut self, value: &str) {
        self.cursor = value.len();
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl Component<Action> for PromptBar {
    type Props<'a> = PromptBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some(Action::InputChange(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(Action::InputChange(self.insert(props.value, c))),
            KeyCode::Backspace => self.backspace(props.value).map(Action::InputChange),
            KeyCode::Delete => self.delete(props.value).map(Action::InputChange),
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some(Action::InputSubmit(props.value.to_string())),
            KeyCode::Esc => Some(Action::InputCancel),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);
        let palette = props.palette;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if props.is_focused {
                palette.accent
            } else {
                palette.border
            }))
            .title(Line::from(vec![Span::styled(
                format!(" {} ", props.label),
                Style::default().fg(palette.accent).bold(),
            )]));
        let inner = block.inner(area);

        let text = if props.value.is_empty() {
            Span::styled("(empty clears the card)", Style::default().fg(palette.muted))
        } else {
            Span::styled(props.value.to_string(), Style::default().fg(palette.fg))
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if props.is_focused && inner.width > 0 {
            let column = props.value[..self.cursor].chars().count() as u16;
            if column < inner.width {
                frame.set_cursor_position((inner.x + column, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devdash_core::testing::{key_event, RenderHarness};

    fn props(value: &str) -> PromptBarProps<'_> {
        PromptBarProps {
            label: "City",
            value,
            is_focused: true,
            palette: crate::theme::Theme::Light.palette(),
        }
    }

    fn handle(bar: &mut PromptBar, key: &str, value: &str) -> Vec<Action> {
        bar.handle_event(&key_event(key), props(value))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut bar = PromptBar::new();
        bar.reset("Pari");
        assert_eq!(
            handle(&mut bar, "s", "Pari"),
            vec![Action::InputChange("Paris".into())]
        );
    }

    #[test]
    fn test_typing_at_start_without_reset() {
        let mut bar = PromptBar::new();
        assert_eq!(
            handle(&mut bar, "x", "abc"),
            vec![Action::InputChange("xabc".into())]
        );
    }

    #[test]
    fn test_backspace_handles_multibyte() {
        let mut bar = PromptBar::new();
        bar.reset("Zürich");
        assert_eq!(
            handle(&mut bar, "backspace", "Zürich"),
            vec![Action::InputChange("Züric".into())]
        );

        bar.cursor = 3; // after 'ü'
        assert_eq!(
            handle(&mut bar, "backspace", "Zürich"),
            vec![Action::InputChange("Zrich".into())]
        );
        assert_eq!(bar.cursor, 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut bar = PromptBar::new();
        assert!(handle(&mut bar, "backspace", "abc").is_empty());
    }

    #[test]
    fn test_cursor_movement_and_delete() {
        let mut bar = PromptBar::new();
        bar.reset("abc");
        handle(&mut bar, "left", "abc");
        assert_eq!(
            handle(&mut bar, "delete", "abc"),
            vec![Action::InputChange("ab".into())]
        );
        handle(&mut bar, "home", "abc");
        assert_eq!(bar.cursor, 0);
    }

    #[test]
    fn test_enter_submits_and_esc_cancels() {
        let mut bar = PromptBar::new();
        assert_eq!(
            handle(&mut bar, "enter", "Lagos"),
            vec![Action::InputSubmit("Lagos".into())]
        );
        assert_eq!(handle(&mut bar, "esc", "Lagos"), vec![Action::InputCancel]);
        assert_eq!(
            handle(&mut bar, "ctrl+u", "Lagos"),
            vec![Action::InputChange(String::new())]
        );
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut bar = PromptBar::new();
        let actions: Vec<_> = bar
            .handle_event(
                &key_event("a"),
                PromptBarProps {
                    is_focused: false,
                    ..props("")
                },
            )
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_label_and_value() {
        let mut harness = RenderHarness::new(40, 3);
        let mut bar = PromptBar::new();
        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            bar.render(frame, area, props("Kigali"));
        });
        assert!(output.contains("City"));
        assert!(output.contains("Kigali"));
    }
}
