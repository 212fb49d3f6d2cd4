use std::fs::File;
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use arboard::Clipboard;
use tokio::process::Command;

/// Long-lived clipboard handle.
///
/// On Linux the process that set the text serves it to other apps, so the
/// handle is opened on first use and kept for the life of the process.
#[derive(Clone, Default)]
pub struct TextClipboard {
    inner: Arc<Mutex<Option<Clipboard>>>,
}

impl TextClipboard {
    pub async fn copy(&self, text: String) -> Result<(), anyhow::Error> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut clipboard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            if clipboard.is_none() {
                *clipboard = Some(Clipboard::new().context("Failed to open clipboard")?);
            }

            clipboard
                .as_mut()
                .context("Clipboard is not open")?
                .set_text(text)?;
            Ok::<_, anyhow::Error>(())
        })
        .await??;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    #[cfg(test)]
    pub(crate) fn shares_handle_with(&self, other: &TextClipboard) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Hands the PNG bytes to `wl-copy` so they outlive this process
pub fn copy_image(path: &Path) -> Result<(), anyhow::Error> {
    let image = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    Command::new("wl-copy")
        .args(["-t", "image/png"])
        .stdin(Stdio::from(image))
        .stdout(Stdio::null())
        .spawn()
        .context("Failed to run wl-copy")?;

    Ok(())
}
