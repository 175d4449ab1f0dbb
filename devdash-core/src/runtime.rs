//! Event/action/effect/render loop.
//!
//! [`EffectRuntime`] owns the store, the action channel, the task manager
//! and the subscriptions. Each loop iteration either maps a terminal event
//! to actions or dispatches one queued action, runs the effects the
//! reducer returned, and re-renders when state changed.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::store::Middleware;
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Actions produced by mapping one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
        }
    }

    /// Collect a component's `handle_event` output.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self::from_actions(actions)
    }
}

/// Effect store interface used by [`EffectRuntime`].
pub trait EffectStoreLike<S, A: Action, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    fn state(&self) -> &S;
}

impl<S, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
    subscriptions: &'a mut Subscriptions<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Queue an action directly.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        self.subscriptions
    }
}

/// Runtime for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    should_render: bool,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
    _state: std::marker::PhantomData<S>,
    _effect: std::marker::PhantomData<E>,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Create a runtime from an existing effect store.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            should_render: true,
            tasks,
            subscriptions,
            _state: std::marker::PhantomData,
            _effect: std::marker::PhantomData,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Wait for the next queued action without running the terminal loop.
    ///
    /// Lets tests drive `dispatch` by hand against real effect handlers.
    pub async fn next_action(&mut self) -> Option<A> {
        self.action_rx.recv().await
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Dispatch one action and run the effects it produced.
    ///
    /// Returns whether state changed.
    pub fn dispatch<FEffect>(&mut self, action: A, handle_effect: &mut FEffect) -> bool
    where
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext {
                action_tx: &self.action_tx,
                tasks: &mut self.tasks,
                subscriptions: &mut self.subscriptions,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        result.changed
    }

    /// Run the event/action loop until `should_quit` accepts an action.
    ///
    /// The quitting action is still dispatched, so the reducer can tear
    /// down state before the loop exits. On exit all tasks and
    /// subscriptions are cancelled.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            LOOP_SLEEP,
            cancel_token.clone(),
        );

        let result = loop {
            if self.should_render {
                let state = self.store.state();
                let drawn = terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                });
                if let Err(e) = drawn {
                    break Err(e);
                }
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    let quit = should_quit(&action);
                    let changed = self.dispatch(action, &mut handle_effect);
                    if quit {
                        break Ok(());
                    }
                    self.should_render |= changed;
                }

                else => {
                    break Ok(());
                }
            }
        };

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Load,
        DidLoad(u32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Load => "Load",
                TestAction::DidLoad(_) => "DidLoad",
            }
        }
    }

    #[derive(Debug)]
    enum TestEffect {
        Fetch,
    }

    #[derive(Default)]
    struct TestState {
        loading: bool,
        value: Option<u32>,
    }

    fn reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Load => {
                state.loading = true;
                DispatchResult::changed_with(TestEffect::Fetch)
            }
            TestAction::DidLoad(value) => {
                state.loading = false;
                state.value = Some(value);
                DispatchResult::changed()
            }
        }
    }

    fn handle(effect: TestEffect, ctx: &mut EffectContext<TestAction>) {
        match effect {
            TestEffect::Fetch => {
                ctx.tasks().spawn("fetch", async { TestAction::DidLoad(7) });
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_effects_through_tasks() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);

        assert!(runtime.dispatch(TestAction::Load, &mut handle));
        assert!(runtime.state().loading);

        let action = tokio::time::timeout(Duration::from_millis(500), runtime.next_action())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, TestAction::DidLoad(7));

        runtime.dispatch(action, &mut handle);
        assert!(!runtime.state().loading);
        assert_eq!(runtime.state().value, Some(7));
    }

    #[test]
    fn test_event_outcome_conversions() {
        let outcome: EventOutcome<TestAction> = TestAction::Load.into();
        assert_eq!(outcome.actions, vec![TestAction::Load]);

        let outcome: EventOutcome<TestAction> = vec![TestAction::Load, TestAction::DidLoad(1)].into();
        assert_eq!(outcome.actions.len(), 2);
        assert!(EventOutcome::<TestAction>::ignored().actions.is_empty());
    }
}
