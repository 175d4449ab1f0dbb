//! Test utilities
//!
//! - [`key`]: build a `KeyEvent` from a string (`key("ctrl+c")`, `key("enter")`)
//! - [`RenderHarness`]: render into a ratatui `TestBackend` and read it back
//! - [`ActionAssertions`], `assert_emitted!` and `assert_not_emitted!`

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// Parse a key description such as `"q"`, `"enter"`, `"ctrl+c"` or `"f5"`.
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut parts: Vec<&str> = s.split('+').collect();
    let last = parts.pop()?;

    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match last.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        _ => {
            let mut chars = last.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Wrap [`key`] into an [`EventKind`].
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Renders into an in-memory terminal for assertions on the output.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal must build");
        Self { terminal }
    }

    /// Render and return the resulting buffer.
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(draw).expect("draw must succeed");
        self.terminal.backend().buffer()
    }

    /// Render and return the text content, one line per row, styles dropped.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Plain text of a buffer, trailing spaces trimmed per row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let width = buffer.area.width.max(1) as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assertions on a list of emitted actions.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_not_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + std::fmt::Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_not_empty(&self) {
        assert!(!self.is_empty(), "Expected actions, got none");
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "Unexpected action count: {:?}", self);
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(self.first(), Some(&expected), "Actions: {:?}", self);
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "Expected {:?} in {:?}",
            expected,
            self
        );
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}
