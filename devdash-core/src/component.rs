//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns events into actions
///
/// Rules:
/// 1. Props carry all read-only data needed for rendering
/// 2. `handle_event` returns actions and never mutates application state
/// 3. `render` is a function of props plus internal UI state (cursor, scroll)
///
/// Focus travels through props, so components stay unaware of the runtime.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
