//! Content pattern scan for adversarially embedded executables.
//!
//! A bounded scan of the buffer head for markers that do not belong in
//! ordinary document/image/archive content: an executable smuggled into a
//! mislabeled attachment, base64-armored or plain. A hit is a soft signal
//! feeding the suspicious verdict, never a hard failure.

use memchr::memmem;
use tracing::debug;

/// How much of the buffer head is scanned.
const SCAN_WINDOW: usize = 8192;

/// Marker patterns with the label reported in quality details.
const SUSPICIOUS_PATTERNS: &[(&[u8], &str)] = &[
    (b"TVqQAAMAAAAEAAAA", "base64-encoded PE executable prefix"),
    (
        b"This program cannot be run in DOS mode",
        "DOS stub string",
    ),
    (b"<script", "embedded script tag"),
];

/// Scan the buffer head for suspicious markers. Returns the reason for the
/// first pattern found.
///
/// Callers exempt executable-classified content: a real PE legitimately
/// carries its own DOS stub.
pub fn scan(data: &[u8]) -> Option<String> {
    let head = &data[..data.len().min(SCAN_WINDOW)];
    for (needle, label) in SUSPICIOUS_PATTERNS {
        if memmem::find(head, needle).is_some() {
            debug!(pattern = label, "suspicious pattern found");
            return Some(format!("content carries a suspicious pattern: {}", label));
        }
    }
    None
}
