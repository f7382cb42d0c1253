//! Clipboard functionality for copying calculator results.

use arboard::Clipboard;
use thiserror::Error;

use super::buffer::ERROR_TEXT;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to access clipboard: {0}")]
    Access(#[source] arboard::Error),

    #[error("failed to copy to clipboard: {0}")]
    Copy(#[source] arboard::Error),
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(ClipboardError::Access)?;

    clipboard
        .set_text(text.to_string())
        .map_err(ClipboardError::Copy)
}

/// Copy a display text to the clipboard unless it is the error sentinel.
///
/// Failures are logged and reported as `false`; they never affect the
/// calculator state.
pub fn copy_result(text: &str) -> bool {
    if text == ERROR_TEXT {
        tracing::debug!("Not copying error text to clipboard");
        return false;
    }

    match copy_to_clipboard(text) {
        Ok(()) => {
            tracing::debug!(text, "Copied result to clipboard");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard copy failed");
            false
        }
    }
}
