//! Per-category structural integrity checks.
//!
//! Each validator inspects only the structure needed to tell an intact file
//! from a damaged one: terminal markers, chunk chains, and declared lengths.
//! Chunk and record walks advance a bounds-checked cursor by a strictly
//! positive amount on every step, so they terminate on any input. No
//! validator ever panics; every malformed length maps to a finding.

use super::registry::Validator;
use super::result::FileQuality;
use memchr::memmem;
use tracing::debug;

/// Window near the buffer start in which the PDF header must appear.
const PDF_HEADER_WINDOW: usize = 1024;
/// Trailing window scanned for the terminal `%%EOF` marker.
const PDF_EOF_WINDOW: usize = 2048;
/// Trailing window scanned for the JPEG end-of-image marker.
const JPEG_EOI_WINDOW: usize = 32;
/// Trailing window scanned for the ZIP end-of-central-directory record
/// (EOCD plus the maximum 64K comment).
const ZIP_EOCD_WINDOW: usize = 66_000;

const ZIP_LOCAL_SIG: &[u8] = b"PK\x03\x04";
const ZIP_EOCD_SIG: &[u8] = b"PK\x05\x06";
const ZIP_LOCAL_HEADER_LEN: usize = 30;
/// Zip64 escape value in the 32-bit compressed-size field.
const ZIP64_SIZE_ESCAPE: u32 = u32::MAX;

/// A structural finding: the verdict it argues for plus a reason for the
/// record's quality details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralIssue {
    pub verdict: FileQuality,
    pub detail: String,
}

impl StructuralIssue {
    fn corrupted(detail: impl Into<String>) -> Self {
        Self {
            verdict: FileQuality::Corrupted,
            detail: detail.into(),
        }
    }

    fn truncated(detail: impl Into<String>) -> Self {
        Self {
            verdict: FileQuality::Truncated,
            detail: detail.into(),
        }
    }
}

/// Dispatch to the validator bound in the registry entry.
pub fn validate(validator: Validator, data: &[u8]) -> Vec<StructuralIssue> {
    match validator {
        Validator::Pdf => validate_pdf(data),
        Validator::Jpeg => validate_jpeg(data),
        Validator::Png => validate_png(data),
        Validator::ZipFamily => validate_zip(data),
        Validator::None => Vec::new(),
    }
}

fn tail(data: &[u8], window: usize) -> &[u8] {
    &data[data.len().saturating_sub(window)..]
}

/// PDF: header near the start, terminal `%%EOF` in the trailing window.
pub fn validate_pdf(data: &[u8]) -> Vec<StructuralIssue> {
    let mut issues = Vec::new();
    let head = &data[..data.len().min(PDF_HEADER_WINDOW)];
    if memmem::find(head, b"%PDF-").is_none() {
        issues.push(StructuralIssue::corrupted(
            "PDF header not found near start of buffer",
        ));
    }
    if memmem::rfind(tail(data, PDF_EOF_WINDOW), b"%%EOF").is_none() {
        issues.push(StructuralIssue::corrupted(
            "PDF %%EOF marker missing from trailing window",
        ));
    }
    issues
}

/// JPEG: SOI at offset 0, EOI at or near the end.
pub fn validate_jpeg(data: &[u8]) -> Vec<StructuralIssue> {
    let mut issues = Vec::new();
    if !data.starts_with(&[0xFF, 0xD8]) {
        issues.push(StructuralIssue::corrupted(
            "JPEG start-of-image marker missing at offset 0",
        ));
    }
    if memmem::rfind(tail(data, JPEG_EOI_WINDOW), &[0xFF, 0xD9]).is_none() {
        issues.push(StructuralIssue::corrupted(
            "JPEG end-of-image marker missing near end of buffer",
        ));
    }
    issues
}

/// PNG: fixed signature, then a chunk walk to a terminal IEND.
///
/// Each chunk is length(4, big-endian) + type(4) + data + crc(4), so every
/// step consumes at least 12 bytes; a declared length reaching past the
/// buffer aborts the walk as corrupted.
pub fn validate_png(data: &[u8]) -> Vec<StructuralIssue> {
    const PNG_SIG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const CHUNK_OVERHEAD: usize = 12;

    if !data.starts_with(PNG_SIG) {
        return vec![StructuralIssue::corrupted(
            "PNG signature missing at offset 0",
        )];
    }

    let mut cursor = PNG_SIG.len();
    loop {
        if cursor.checked_add(8).map_or(true, |end| end > data.len()) {
            return vec![StructuralIssue::corrupted(format!(
                "PNG ended at offset {} before a terminal IEND chunk",
                cursor
            ))];
        }
        let length = u32::from_be_bytes([
            data[cursor],
            data[cursor + 1],
            data[cursor + 2],
            data[cursor + 3],
        ]) as usize;
        let chunk_type = &data[cursor + 4..cursor + 8];

        let next = length
            .checked_add(CHUNK_OVERHEAD)
            .and_then(|advance| cursor.checked_add(advance));
        let Some(next) = next else {
            return vec![StructuralIssue::corrupted(format!(
                "PNG chunk at offset {} declares an overflowing length",
                cursor
            ))];
        };
        if next > data.len() {
            return vec![StructuralIssue::corrupted(format!(
                "PNG chunk '{}' at offset {} declares {} bytes past end of buffer",
                String::from_utf8_lossy(chunk_type),
                cursor,
                next - data.len()
            ))];
        }
        if chunk_type == b"IEND" {
            debug!(chunks_end = next, "PNG chunk walk reached IEND");
            return Vec::new();
        }
        // advance = length + 12 > 0, so the cursor strictly increases
        cursor = next;
    }
}

/// ZIP family: a discoverable EOCD record, and local-file-header declared
/// lengths that fit in the buffer.
///
/// A declared length exceeding the remaining bytes is the one case reported
/// as truncated rather than corrupted: the structure is coherent but the
/// payload was cut short.
pub fn validate_zip(data: &[u8]) -> Vec<StructuralIssue> {
    let mut issues = Vec::new();

    if memmem::rfind(tail(data, ZIP_EOCD_WINDOW), ZIP_EOCD_SIG).is_none() {
        issues.push(StructuralIssue::corrupted(
            "ZIP end-of-central-directory record not found",
        ));
    }

    // Walk local file headers from the front; the cursor advances by at
    // least the fixed header size each step.
    let mut cursor = 0usize;
    while data[cursor..].starts_with(ZIP_LOCAL_SIG) {
        let Some(header_end) = cursor.checked_add(ZIP_LOCAL_HEADER_LEN) else {
            issues.push(StructuralIssue::corrupted(
                "ZIP local file header offset overflow",
            ));
            break;
        };
        if header_end > data.len() {
            issues.push(StructuralIssue::corrupted(format!(
                "ZIP local file header at offset {} extends past end of buffer",
                cursor
            )));
            break;
        }
        let compressed_size = u32::from_le_bytes([
            data[cursor + 18],
            data[cursor + 19],
            data[cursor + 20],
            data[cursor + 21],
        ]);
        let name_len = u16::from_le_bytes([data[cursor + 26], data[cursor + 27]]) as usize;
        let extra_len = u16::from_le_bytes([data[cursor + 28], data[cursor + 29]]) as usize;

        let Some(payload_start) = header_end.checked_add(name_len + extra_len) else {
            issues.push(StructuralIssue::corrupted(
                "ZIP local file header length overflow",
            ));
            break;
        };
        if payload_start > data.len() {
            // Declared name/extra lengths reaching past the buffer mean the
            // tail is missing, same as a short compressed payload.
            issues.push(StructuralIssue::truncated(format!(
                "ZIP entry at offset {} declares name/extra fields extending past end of buffer",
                cursor
            )));
            break;
        }

        // Streamed (size 0 with descriptor to follow) and zip64-escaped
        // entries carry no usable 32-bit length; skip the fit check.
        if compressed_size != 0 && compressed_size != ZIP64_SIZE_ESCAPE {
            let Some(payload_end) = payload_start.checked_add(compressed_size as usize) else {
                issues.push(StructuralIssue::corrupted(
                    "ZIP entry declared size overflow",
                ));
                break;
            };
            if payload_end > data.len() {
                issues.push(StructuralIssue::truncated(format!(
                    "ZIP entry at offset {} declares {} compressed bytes but only {} remain",
                    cursor,
                    compressed_size,
                    data.len() - payload_start
                )));
                break;
            }
            cursor = payload_end;
        } else {
            cursor = payload_start;
        }
        // Next record is either another local header, the central
        // directory, or garbage; only local headers continue the walk.
    }

    issues
}
