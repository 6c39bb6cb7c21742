//! Clipboard Write
//!
//! One-shot copy via the OSC 52 escape sequence, which works across
//! terminals and SSH sessions without a display server. Fire-and-forget:
//! no success confirmation is available or surfaced.

use base64::Engine;
use std::io::Write;

/// Write `text` to the system clipboard through the terminal
pub fn copy(text: &str) -> std::io::Result<()> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    let mut out = std::io::stdout();
    write!(out, "\x1b]52;c;{encoded}\x07")?;
    out.flush()
}
