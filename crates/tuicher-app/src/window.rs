use kanal::AsyncSender;
use tuicher_core::{HostError, WindowHost};

use crate::bridge::ViewOutput;

/// Window owned by the process on the other end of stdout
pub struct StdioWindow {
    output_tx: AsyncSender<ViewOutput>,
}

impl StdioWindow {
    pub fn new(output_tx: AsyncSender<ViewOutput>) -> Self {
        Self { output_tx }
    }
}

impl WindowHost for StdioWindow {
    fn close_window(&self) -> Result<(), HostError> {
        match self.output_tx.try_send(ViewOutput::WindowClose) {
            Ok(true) => Ok(()),
            Ok(false) => Err(HostError::CloseWindow("view output is full".to_string())),
            Err(e) => Err(HostError::CloseWindow(e.to_string())),
        }
    }
}
