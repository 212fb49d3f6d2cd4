use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tuicher_config::Config;
use tuicher_core::layout::RowLayout;
use tuicher_core::{ControllerContext, ControllerHandle, InteractionController};
use tuicher_io::SystemExecutor;
use tuicher_types::PushEvent;

use crate::bridge::{StdioBridge, ViewOutput};
use crate::search::ConfigSearchBackend;
use crate::window::StdioWindow;

/// Centralized channel management
pub struct ChannelSet {
    pub push: (AsyncSender<PushEvent>, AsyncReceiver<PushEvent>),
    pub view: (AsyncSender<ViewOutput>, AsyncReceiver<ViewOutput>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            push: kanal::bounded_async(capacity),
            // Close requests are sent without waiting
            view: kanal::unbounded_async(),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    config: Arc<Config>,
    handle: Option<ControllerHandle>,
}

impl AppController {
    pub fn new(config: Config) -> Self {
        Self {
            channels: ChannelSet::new(config.channel_capacity),
            config: Arc::new(config),
            handle: None,
        }
    }

    pub fn spawn_tasks(&mut self) -> JoinSet<anyhow::Result<()>> {
        let (push_tx, push_rx) = self.channels.push.clone();
        let (view_tx, view_rx) = self.channels.view.clone();

        let window = Arc::new(StdioWindow::new(view_tx.clone()));
        let layout = Arc::new(RowLayout::new(
            f64::from(self.config.ui.row_height),
            f64::from(self.config.height),
        ));

        let ctx = ControllerContext::new(
            Arc::new(ConfigSearchBackend::new(self.config.clone())),
            Arc::new(SystemExecutor::new(push_tx, window.clone())),
            window,
            layout,
        );

        let (handle, mut controller_tasks) =
            InteractionController::spawn(ctx, push_rx, self.config.channel_capacity);
        let bridge = Arc::new(StdioBridge::new(handle.clone(), (view_tx, view_rx)));
        self.handle = Some(handle);

        let mut tasks: JoinSet<anyhow::Result<()>> = JoinSet::new();

        // Controller loop and push listener
        tasks.spawn(async move {
            while let Some(joined) = controller_tasks.join_next().await {
                joined??;
            }
            Ok::<_, anyhow::Error>(())
        });

        // View input
        let input = bridge.clone();
        tasks.spawn(async move {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            input.forward_to_controller(stdin).await
        });

        // View output
        let states = bridge.clone();
        tasks.spawn(async move {
            states.forward_state().await;
            Ok(())
        });
        let errors = bridge.clone();
        tasks.spawn(async move {
            errors.forward_errors().await;
            Ok(())
        });
        tasks.spawn(async move { bridge.write_output(tokio::io::stdout()).await });

        tasks
    }

    pub fn shutdown(&self) {
        if let Some(handle) = &self.handle {
            handle.shutdown();
        }
    }
}
