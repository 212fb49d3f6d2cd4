use kanal::{AsyncReceiver, AsyncSender};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;
use tuicher_core::ControllerHandle;
use tuicher_types::{MainScreenAction, UiState};

/// One line written to the view
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ViewOutput {
    State { state: UiState },
    WindowClose,
    Error { message: String },
}

/// Bridge between the controller and a line-oriented JSON view
pub struct StdioBridge {
    handle: ControllerHandle,
    output_tx: AsyncSender<ViewOutput>,
    output_rx: AsyncReceiver<ViewOutput>,
}

impl StdioBridge {
    pub fn new(
        handle: ControllerHandle,
        output: (AsyncSender<ViewOutput>, AsyncReceiver<ViewOutput>),
    ) -> Self {
        let (output_tx, output_rx) = output;
        Self {
            handle,
            output_tx,
            output_rx,
        }
    }

    /// View actions, one JSON object per line, until EOF
    pub async fn forward_to_controller<R>(&self, reader: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(action) = parse_action(&line) else {
                continue;
            };
            self.handle.dispatch(action).await?;
        }

        tracing::info!("View input closed");
        Ok(())
    }

    /// Publishes every new snapshot
    pub async fn forward_state(&self) {
        let mut state_rx = self.handle.subscribe();
        state_rx.mark_unchanged();

        while state_rx.changed().await.is_ok() {
            let state = state_rx.borrow_and_update().clone();
            if self.output_tx.send(ViewOutput::State { state }).await.is_err() {
                break;
            }
        }
    }

    pub async fn forward_errors(&self) {
        let mut errors = self.handle.subscribe_errors();
        loop {
            match errors.recv().await {
                Ok(error) => {
                    let message = error.to_string();
                    if self.output_tx.send(ViewOutput::Error { message }).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} controller errors", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    pub async fn write_output<W>(&self, mut writer: W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while let Ok(output) = self.output_rx.recv().await {
            let mut line = serde_json::to_vec(&output)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
            writer.flush().await?;
        }

        Ok(())
    }
}

fn parse_action(line: &str) -> Option<MainScreenAction> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str(line) {
        Ok(action) => Some(action),
        Err(e) => {
            tracing::warn!("Ignoring malformed view action '{}': {}", line, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;
