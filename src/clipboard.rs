//! System clipboard bridge.
//!
//! The builder's only outward-facing side effect: putting the generated
//! CSS on the system clipboard. Failures are reported as errors for the
//! caller to absorb, never panics — a missing clipboard (headless
//! session, no display server) degrades to failed-copy feedback.

use crate::error::{TinttyError, TinttyResult};

/// Write `text` to the system clipboard.
pub fn copy_text(text: &str) -> TinttyResult<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| {
        TinttyError::clipboard(
            "clipboard open",
            (0, 0),
            format!("Failed to open system clipboard: {}", e),
        )
    })?;

    clipboard.set_text(text.to_owned()).map_err(|e| {
        TinttyError::clipboard(
            "clipboard write",
            (0, 0),
            format!("Failed to write to system clipboard: {}", e),
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_never_panics() {
        // success depends on the environment (headless CI has no
        // clipboard); either way the call must return, not panic
        let _ = copy_text("linear-gradient(to right, #000000 0%, #ffffff 100%)");
    }
}
