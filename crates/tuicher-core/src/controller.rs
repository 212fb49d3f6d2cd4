use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tuicher_types::{MainScreenAction, PushEvent, SearchResult, UiState};

use crate::backend::{ActionExecutor, ControllerContext, SearchBackend, WindowHost};
use crate::error::ControllerError;
use crate::layout::{self, LayoutProbe, ScrollDirection};

const ERROR_CAPACITY: usize = 32;

/// Everything the consumer loop processes, in arrival order
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    Action(MainScreenAction),
    SearchCompleted {
        text: String,
        results: Vec<SearchResult>,
    },
    Push(PushEvent),
}

/// Owner of the launcher's [`UiState`].
///
/// View actions, search completions and backend pushes all arrive as
/// [`ControllerEvent`]s on one queue and are applied one at a time, so whichever
/// write is applied last wins. In-flight searches are never cancelled: a slow
/// response for an older query still overwrites a newer one.
pub struct InteractionController {
    state: watch::Sender<UiState>,
    search: Arc<dyn SearchBackend>,
    executor: Arc<dyn ActionExecutor>,
    window: Arc<dyn WindowHost>,
    layout: Arc<dyn LayoutProbe>,
    event_tx: AsyncSender<ControllerEvent>,
    errors: broadcast::Sender<ControllerError>,
}

impl InteractionController {
    pub fn new(ctx: ControllerContext, capacity: usize) -> (Self, AsyncReceiver<ControllerEvent>) {
        let (event_tx, event_rx) = kanal::bounded_async(capacity);
        let (state, _) = watch::channel(UiState::default());
        let (errors, _) = broadcast::channel(ERROR_CAPACITY);

        let controller = Self {
            state,
            search: ctx.search,
            executor: ctx.executor,
            window: ctx.window,
            layout: ctx.layout,
            event_tx,
            errors,
        };

        (controller, event_rx)
    }

    /// Starts the consumer loop and the push listener
    pub fn spawn(
        ctx: ControllerContext,
        push_rx: AsyncReceiver<PushEvent>,
        capacity: usize,
    ) -> (ControllerHandle, JoinSet<Result<(), ControllerError>>) {
        let (controller, event_rx) = Self::new(ctx, capacity);
        let cancel = CancellationToken::new();
        let handle = controller.handle(cancel.clone());

        let mut tasks = JoinSet::new();
        tasks.spawn(listen_for_pushes(
            push_rx,
            controller.event_tx.clone(),
            cancel.child_token(),
        ));
        tasks.spawn(controller.run(event_rx, cancel.child_token()));

        (handle, tasks)
    }

    pub fn handle(&self, cancel: CancellationToken) -> ControllerHandle {
        ControllerHandle {
            event_tx: self.event_tx.clone(),
            state_rx: self.state.subscribe(),
            errors: self.errors.clone(),
            cancel,
        }
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Consumer loop, runs until cancelled
    pub async fn run(
        mut self,
        event_rx: AsyncReceiver<ControllerEvent>,
        cancel: CancellationToken,
    ) -> Result<(), ControllerError> {
        tracing::info!("Interaction controller started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Interaction controller stopping");
                    break;
                }
                event = event_rx.recv() => {
                    let event = event.map_err(|_| ControllerError::QueueClosed)?;
                    self.handle_event(event);
                }
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Action(action) => self.on_action(action),
            ControllerEvent::SearchCompleted { text, results } => {
                tracing::debug!("Search for '{}' returned {} results", text, results.len());
                self.replace_results(results, Some(text));
            }
            ControllerEvent::Push(PushEvent::ShowPluginResults { results }) => {
                tracing::debug!("Plugin pushed {} results", results.len());
                self.replace_results(results, None);
            }
        }
    }

    /// A new list starts scrolled to the top, before any queued arrow press runs
    fn replace_results(&mut self, results: Vec<SearchResult>, query_text: Option<String>) {
        let replaced = self.state.borrow().results != results;

        self.state.send_modify(|state| {
            if let Some(text) = query_text {
                state.query_text = text;
            }
            state.results = results;
            state.selected_index = 0;
        });

        if replaced {
            self.layout.scroll_to_top();
        }
    }

    fn on_action(&mut self, action: MainScreenAction) {
        tracing::debug!("Action: {:?}", action);
        match action {
            MainScreenAction::ArrowUp => self.on_arrow_up(),
            MainScreenAction::ArrowDown => self.on_arrow_down(),
            MainScreenAction::SearchInput { text } => self.on_search_input(text),
            MainScreenAction::EnterPress | MainScreenAction::ResultClick => self.run_selected(),
            MainScreenAction::EscapePress => self.on_escape_press(),
            MainScreenAction::ResultHover { index } => self.on_result_hover(index),
        }
    }

    fn on_arrow_up(&mut self) {
        let current = self.state.borrow().selected_index;
        let Some(index) = current.checked_sub(1) else {
            return;
        };

        self.select(index);
        layout::reveal(self.layout.as_ref(), index, ScrollDirection::Up);
    }

    fn on_arrow_down(&mut self) {
        let (current, len) = {
            let state = self.state.borrow();
            (state.selected_index, state.results.len())
        };
        let index = current + 1;
        if index >= len {
            return;
        }

        self.select(index);
        layout::reveal(self.layout.as_ref(), index, ScrollDirection::Down);
    }

    /// Pointer is already over the row, no scroll needed
    fn on_result_hover(&mut self, index: usize) {
        if index >= self.state.borrow().results.len() {
            return;
        }
        self.select(index);
    }

    fn select(&mut self, index: usize) {
        self.state.send_if_modified(|state| {
            let changed = state.selected_index != index;
            state.selected_index = index;
            changed
        });
    }

    fn on_search_input(&mut self, text: String) {
        self.state.send_if_modified(|state| {
            let changed = state.query_text != text;
            state.query_text = text.clone();
            changed
        });

        let search = Arc::clone(&self.search);
        let event_tx = self.event_tx.clone();
        let errors = self.errors.clone();

        tokio::spawn(async move {
            match search.search(&text).await {
                Ok(results) => {
                    if event_tx
                        .send(ControllerEvent::SearchCompleted { text, results })
                        .await
                        .is_err()
                    {
                        tracing::debug!("Controller gone, dropping search results");
                    }
                }
                Err(e) => {
                    tracing::warn!("Search for '{}' failed: {}", text, e);
                    let _ = errors.send(ControllerError::Search {
                        query: text,
                        source: e,
                    });
                }
            }
        });
    }

    /// Shared by enter and click
    fn run_selected(&mut self) {
        let action = {
            let state = self.state.borrow();
            match state.selected().and_then(|result| result.action.clone()) {
                Some(action) => action,
                None => return,
            }
        };

        // Reset before the call so a queued enter sees an empty list
        self.reset();

        let kind = action.kind();
        tracing::info!("Executing {} action", kind);

        let executor = Arc::clone(&self.executor);
        let errors = self.errors.clone();
        tokio::spawn(async move {
            if let Err(e) = executor.execute_action(action).await {
                tracing::warn!("{} action failed: {}", kind, e);
                let _ = errors.send(ControllerError::Action { kind, source: e });
            }
        });
    }

    fn on_escape_press(&mut self) {
        if let Err(e) = self.window.close_window() {
            tracing::error!("{}", e);
            let _ = self.errors.send(e.into());
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state.send_replace(UiState::default());
    }
}

/// Forwards backend pushes into the controller queue until cancelled
pub async fn listen_for_pushes(
    push_rx: AsyncReceiver<PushEvent>,
    event_tx: AsyncSender<ControllerEvent>,
    cancel: CancellationToken,
) -> Result<(), ControllerError> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = push_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("Push channel closed");
                    break;
                };

                tracing::debug!("Push on '{}'", event.topic());
                event_tx
                    .send(ControllerEvent::Push(event))
                    .await
                    .map_err(|_| ControllerError::QueueClosed)?;
            }
        }
    }

    Ok(())
}

/// View-side handle: the only way to mutate the controller's state
#[derive(Clone)]
pub struct ControllerHandle {
    event_tx: AsyncSender<ControllerEvent>,
    state_rx: watch::Receiver<UiState>,
    errors: broadcast::Sender<ControllerError>,
    cancel: CancellationToken,
}

impl ControllerHandle {
    pub async fn dispatch(&self, action: MainScreenAction) -> Result<(), ControllerError> {
        self.event_tx
            .send(ControllerEvent::Action(action))
            .await
            .map_err(|_| ControllerError::QueueClosed)
    }

    pub fn snapshot(&self) -> UiState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state_rx.clone()
    }

    pub fn subscribe_errors(&self) -> broadcast::Receiver<ControllerError> {
        self.errors.subscribe()
    }

    /// Stops the consumer loop and drops the push subscription
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
