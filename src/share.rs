//! Share links for blog posts and events

use serde::Serialize;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, warn};

use crate::routes::Route;

pub const SHARE_CONFIRMATION: &str = "Link copied to clipboard!";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,

    #[error("copy failed: {0}")]
    CopyFailed(String),
}

/// Something that can hold copied text
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns an error if the text could not be placed on the clipboard.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A clipboard that never works, for environments without one
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Prints the text on standard output so it can be copied by hand
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").map_err(|e| ClipboardError::CopyFailed(e.to_string()))
    }
}

/// Which clipboard path accepted the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyPath {
    Native,
    Fallback,
    /// Neither path worked; the user is still told the link was copied
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareConfirmation {
    pub url: String,
    pub message: String,
    pub via: CopyPath,
}

/// Absolute URL of a route on the public site
#[must_use]
pub fn share_url(site_url: &str, route: &Route) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), route.path())
}

/// Copy `url` with `primary`, falling back to `fallback`
///
/// The confirmation is always produced.
pub fn copy_link(url: &str, primary: &dyn Clipboard, fallback: &dyn Clipboard) -> ShareConfirmation {
    let via = match primary.write_text(url) {
        Ok(()) => CopyPath::Native,
        Err(error) => {
            debug!(%error, "primary clipboard failed, trying fallback");
            match fallback.write_text(url) {
                Ok(()) => CopyPath::Fallback,
                Err(error) => {
                    warn!(%error, "link could not be copied");
                    CopyPath::Unavailable
                }
            }
        }
    };

    ShareConfirmation {
        url: url.to_string(),
        message: SHARE_CONFIRMATION.to_string(),
        via,
    }
}
