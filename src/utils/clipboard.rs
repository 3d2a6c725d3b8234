/// Clipboard and browser helpers for sharing venues
use log::{error, info, warn};

/// Copy text to system clipboard
/// Returns true if successful, false otherwise
pub fn copy_to_clipboard(text: &str, context: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(_) => {
                info!("[Clipboard] Copied {} to clipboard: {}", context, text);
                true
            }
            Err(e) => {
                error!("[Clipboard] Failed to copy {} to clipboard: {}", context, e);
                false
            }
        },
        Err(e) => {
            error!("[Clipboard] Failed to access clipboard: {}", e);
            false
        }
    }
}

/// Open an external page in the default browser
pub fn open_in_browser(url: &str) -> bool {
    match webbrowser::open(url) {
        Ok(_) => {
            info!("[Browser] Opened {}", url);
            true
        }
        Err(e) => {
            warn!("[Browser] Could not open {}: {}", url, e);
            false
        }
    }
}
