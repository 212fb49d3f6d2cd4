use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use kanal::AsyncSender;
use tokio::process::Command;
use tuicher_core::{ActionExecutor, BackendError, WindowHost};
use tuicher_types::{Action, PushEvent};

use crate::clipboard::{self, TextClipboard};
use crate::session::run_session_action;

/// Runs actions against the local desktop
pub struct SystemExecutor {
    push_tx: AsyncSender<PushEvent>,
    window: Arc<dyn WindowHost>,
    clipboard: TextClipboard,
}

impl SystemExecutor {
    pub fn new(push_tx: AsyncSender<PushEvent>, window: Arc<dyn WindowHost>) -> Self {
        Self {
            push_tx,
            window,
            clipboard: TextClipboard::default(),
        }
    }

    async fn run(&self, action: Action) -> Result<(), BackendError> {
        let failed = |e: anyhow::Error| BackendError::Action(format!("{e:#}"));

        match action {
            Action::OpenApp { path } => launch_app(Path::new(&path)).map_err(failed)?,
            Action::OpenFile { path } => open::that_detached(&path)
                .with_context(|| format!("Failed to open {path}"))
                .map_err(failed)?,
            Action::OpenUrl { url } => open::that_detached(&url)
                .with_context(|| format!("Failed to open {url}"))
                .map_err(failed)?,
            Action::CopyText { text } => self.clipboard.copy(text).await.map_err(failed)?,
            Action::CopyImage { path } => clipboard::copy_image(Path::new(&path)).map_err(failed)?,
            Action::ShowResults { results } => {
                // Nested list goes back through the push path, the window stays open
                self.push_tx
                    .send(PushEvent::ShowPluginResults { results })
                    .await
                    .map_err(|_| BackendError::ChannelClosed)?;
                return Ok(());
            }
            Action::Session(session) => run_session_action(session).map_err(failed)?,
            Action::OpenSettings => {
                return Err(BackendError::Unsupported(
                    "settings window is not available".to_string(),
                ));
            }
            Action::Custom {
                plugin_id, action, ..
            } => {
                return Err(BackendError::Unsupported(format!(
                    "custom action '{action}' of plugin '{plugin_id}'"
                )));
            }
            Action::Bookmark(_) => {
                return Err(BackendError::Unsupported("bookmarks".to_string()));
            }
        }

        if let Err(e) = self.window.close_window() {
            tracing::warn!("{}", e);
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ActionExecutor for SystemExecutor {
    async fn execute_action(&self, action: Action) -> Result<(), BackendError> {
        let kind = action.kind();
        tracing::debug!("Running {} action", kind);

        let result = self.run(action).await;
        if let Err(e) = &result {
            tracing::error!("{} action failed: {}", kind, e);
        }
        result
    }
}

/// Desktop entries are started by file name through `gtk-launch`
fn launch_app(path: &Path) -> Result<(), anyhow::Error> {
    let desktop_file = path
        .file_name()
        .with_context(|| format!("No file name in {}", path.display()))?;

    tracing::info!("Launching {}", desktop_file.to_string_lossy());
    Command::new("gtk-launch")
        .arg(desktop_file)
        .spawn()
        .context("Failed to run gtk-launch")?;

    Ok(())
}
