//! Analysis orchestration.
//!
//! Sequences classification, structural validation, encryption detection,
//! the extension-mismatch check, and hashing into one immutable record,
//! applying the quality precedence order when several signals fire.

use super::classifier::{self, Classification};
use super::encryption;
use super::registry::{MIN_ANALYZABLE_LEN, OCTET_STREAM};
use super::result::{AnalysisResult, FileCategory, FileQuality, SCHEMA_VERSION};
use super::suspicious;
use super::validators;
use crate::error::{AnalysisError, Result};
use crate::hashing;
use crate::io::{IOLimits, SafeFileReader};
use std::path::Path;
use tracing::{debug, info};

/// Analyze one `(filename, bytes)` pair.
///
/// Pure and synchronous: identical inputs always produce an identical
/// record, and no fault in the content ever propagates out. The filename is
/// consulted only for the extension-mismatch signal and the declared-MIME
/// supplement, never for classification.
pub fn analyze(filename: &str, data: &[u8]) -> AnalysisResult {
    let span = tracing::info_span!("analyze", filename = %filename, size_bytes = data.len());
    let _g = span.enter();

    let declared_extension = declared_extension(filename);
    let declared_mime = if declared_extension.is_empty() {
        None
    } else {
        mime_guess::from_ext(&declared_extension)
            .first()
            .map(|m| m.to_string())
    };

    // Guard: buffers below any plausible file size get no classification,
    // but are still hashed for deduplication.
    if data.len() < MIN_ANALYZABLE_LEN {
        let detail = if data.is_empty() {
            "input buffer is empty".to_string()
        } else {
            format!(
                "input is {} bytes, below the minimum analyzable size of {}",
                data.len(),
                MIN_ANALYZABLE_LEN
            )
        };
        debug!(detail = %detail, "guard rejected buffer");
        return assemble(
            filename,
            declared_extension,
            declared_mime,
            data,
            FileCategory::Unknown,
            OCTET_STREAM,
            vec![(FileQuality::InvalidFormat, detail)],
        );
    }

    debug!(phase = "classify", "registry walk");
    let Classification {
        category,
        detected_mime,
        entry,
    } = classifier::classify(data);

    // Every signal is collected with its reason; the strongest decides the
    // recorded quality, all reasons survive in quality_details.
    let mut signals: Vec<(FileQuality, String)> = Vec::new();

    if let Some(entry) = entry {
        debug!(phase = "validate", "structural checks");
        for issue in validators::validate(entry.validator, data) {
            signals.push((issue.verdict, issue.detail));
        }

        debug!(phase = "encryption", "detector");
        if let Some(reason) = encryption::detect(entry.detector, data, &declared_extension) {
            signals.push((FileQuality::Encrypted, reason));
        }

        if classifier::extension_mismatch(entry, &declared_extension) {
            signals.push((
                FileQuality::Suspicious,
                format!(
                    "declared extension '{}' does not match detected {}",
                    declared_extension, detected_mime
                ),
            ));
        }
    }

    if let Some(reason) = classifier::hybrid_container_signal(data) {
        signals.push((FileQuality::Suspicious, reason));
    }

    // Executables carry their own DOS stub; everything else gets the
    // embedded-executable pattern scan.
    if category != FileCategory::Executable {
        if let Some(reason) = suspicious::scan(data) {
            signals.push((FileQuality::Suspicious, reason));
        }
    }

    assemble(
        filename,
        declared_extension,
        declared_mime,
        data,
        category,
        detected_mime,
        signals,
    )
}

/// Analyze a file on disk through the bounded reader. Only I/O faults and
/// the size guard propagate as errors; content faults never do.
pub fn analyze_path<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<AnalysisResult> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(AnalysisError::InvalidInput("empty path".to_string()));
    }
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut reader = SafeFileReader::open(path, limits)?;
    let data = reader.read_all()?;
    Ok(analyze(&filename, &data))
}

fn assemble(
    filename: &str,
    declared_extension: String,
    declared_mime: Option<String>,
    data: &[u8],
    category: FileCategory,
    detected_mime: &str,
    signals: Vec<(FileQuality, String)>,
) -> AnalysisResult {
    let quality = signals
        .iter()
        .map(|(q, _)| *q)
        .max_by_key(|q| q.severity())
        .unwrap_or(FileQuality::Valid);
    let quality_details: Vec<String> = signals.into_iter().map(|(_, detail)| detail).collect();

    let result = AnalysisResult {
        schema_version: SCHEMA_VERSION.to_string(),
        filename: filename.to_string(),
        declared_extension,
        declared_mime,
        file_size: data.len() as u64,
        category,
        detected_mime: detected_mime.to_string(),
        quality,
        quality_details,
        md5_hash: hashing::md5_digest(data),
        sha256_hash: hashing::sha256_digest(data),
        is_processable: quality.is_processable(),
    };
    info!(
        category = %result.category,
        quality = %result.quality,
        processable = result.is_processable,
        "analysis complete"
    );
    result
}

fn declared_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_extension() {
        assert_eq!(declared_extension("report.PDF"), "pdf");
        assert_eq!(declared_extension("archive.tar.gz"), "gz");
        assert_eq!(declared_extension("README"), "");
        assert_eq!(declared_extension(""), "");
    }

    #[test]
    fn test_empty_buffer_guard() {
        let r = analyze("empty.bin", b"");
        assert_eq!(r.quality, FileQuality::InvalidFormat);
        assert_eq!(r.category, FileCategory::Unknown);
        assert_eq!(r.detected_mime, OCTET_STREAM);
        assert!(!r.is_processable);
        // hashed regardless of the guard
        assert_eq!(r.md5_hash, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_sub_minimum_buffer_guard() {
        let r = analyze("tiny.bin", b"BM");
        assert_eq!(r.quality, FileQuality::InvalidFormat);
        assert_eq!(r.category, FileCategory::Unknown);
        assert!(!r.quality_details.is_empty());
    }

    #[test]
    fn test_strongest_signal_wins_but_all_reasons_recorded() {
        // Encrypted ZIP with no EOCD: encryption must override corruption.
        let mut zip = b"PK\x03\x04\x14\x00\x01\x00".to_vec();
        zip.extend_from_slice(&[0u8; 22]);
        zip.extend_from_slice(b"no directory here");
        let r = analyze("evidence.zip", &zip);
        assert_eq!(r.quality, FileQuality::Encrypted);
        assert!(r.quality_details.len() >= 2);
        assert!(!r.is_processable);
    }

    #[test]
    fn test_declared_mime_supplement() {
        let r = analyze("photo.jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9]);
        assert_eq!(r.declared_mime.as_deref(), Some("image/jpeg"));
        let r = analyze("noext", &[0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9]);
        assert_eq!(r.declared_mime, None);
    }
}
