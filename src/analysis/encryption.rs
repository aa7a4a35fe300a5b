//! Per-category encryption and password-protection detectors.
//!
//! A firing detector overrides a corrupted/truncated verdict: some producers
//! intentionally emit non-standard trailing or internal structure when
//! encrypting, and that must not be recorded as damage.

use super::registry::Detector;
use memchr::memmem;
use tracing::debug;

/// Window scanned at the head and tail of the buffer for encryption markers.
const SCAN_WINDOW: usize = 4096;

/// Extensions whose modern payload is OOXML; a compound-file container with
/// one of these declared means legacy Office encryption wrapping the payload.
const OOXML_EXTENSIONS: &[&str] = &["docx", "xlsx", "pptx"];

/// Dispatch to the detector bound in the registry entry. Returns the reason
/// when encryption is detected.
pub fn detect(detector: Detector, data: &[u8], declared_extension: &str) -> Option<String> {
    let reason = match detector {
        Detector::Pdf => detect_pdf_encryption(data),
        Detector::OfficeCfb => detect_office_cfb(data, declared_extension),
        Detector::Zip => detect_zip_encryption(data),
        Detector::None => None,
    };
    if let Some(r) = &reason {
        debug!(reason = %r, "encryption detected");
    }
    reason
}

/// PDF: an `/Encrypt` reference in the trailer/cross-reference area. The
/// trailer normally sits at the end, but scan the head too for linearized
/// files.
pub fn detect_pdf_encryption(data: &[u8]) -> Option<String> {
    let head = &data[..data.len().min(SCAN_WINDOW)];
    let tail = &data[data.len().saturating_sub(SCAN_WINDOW)..];
    if memmem::find(head, b"/Encrypt").is_some() || memmem::find(tail, b"/Encrypt").is_some() {
        return Some("PDF trailer references an encryption dictionary".to_string());
    }
    None
}

/// Legacy Office container: reached only when the buffer matched the
/// compound-file signature. An OOXML extension on a compound-file buffer, or
/// an EncryptedPackage stream, is the encryption signal itself: encrypting
/// producers wrap the OOXML payload in this older container.
pub fn detect_office_cfb(data: &[u8], declared_extension: &str) -> Option<String> {
    let head = &data[..data.len().min(SCAN_WINDOW)];
    if memmem::find(head, b"EncryptedPackage").is_some() {
        return Some("OOXML payload wrapped in an EncryptedPackage stream".to_string());
    }
    if OOXML_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(declared_extension))
    {
        return Some(format!(
            "compound-file container behind a '.{}' extension indicates legacy Office encryption",
            declared_extension
        ));
    }
    None
}

/// ZIP: encryption flag bit in the first local file header's
/// general-purpose bit flags (bytes 6-7).
pub fn detect_zip_encryption(data: &[u8]) -> Option<String> {
    if data.len() >= 8 && data.starts_with(b"PK\x03\x04") && data[6] & 0x01 != 0 {
        return Some("ZIP local file header has the encryption flag set".to_string());
    }
    None
}
