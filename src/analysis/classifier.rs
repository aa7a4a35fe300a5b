//! Registry-driven content classification.
//!
//! Classification is a pure function of the bytes: the filename is consulted
//! only afterwards, to flag a mismatch between what the extension claims and
//! what the content is.

use super::registry::{self, SignatureEntry, OCTET_STREAM};
use super::result::FileCategory;
use memchr::memmem;
use tracing::debug;

/// Outcome of the registry walk.
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub category: FileCategory,
    pub detected_mime: &'static str,
    pub entry: Option<&'static SignatureEntry>,
}

/// Walk the registry in specificity order and return the first full match.
pub fn classify(data: &[u8]) -> Classification {
    for entry in registry::registry() {
        if entry.matches(data) {
            debug!(mime = entry.mime, category = %entry.category, "signature matched");
            return Classification {
                category: entry.category,
                detected_mime: entry.mime,
                entry: Some(entry),
            };
        }
    }
    debug!("no signature matched");
    Classification {
        category: FileCategory::Unknown,
        detected_mime: OCTET_STREAM,
        entry: None,
    }
}

/// Soft signal: the declared extension is non-empty and not one of the
/// matched format's conventional extensions.
pub fn extension_mismatch(entry: &SignatureEntry, declared_extension: &str) -> bool {
    !declared_extension.is_empty()
        && !entry
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(declared_extension))
}

const CFB_MAGIC: &[u8] = b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1";
const ZIP_CENTRAL_SIG: &[u8] = b"PK\x01\x02";
const ZIP_EOCD_SIG: &[u8] = b"PK\x05\x06";

/// A compound-file-leading buffer that also carries ZIP directory structure
/// is an ambiguous hybrid. First-match classification (CFB) stands, but the
/// buffer is flagged so reviewers can inspect it.
pub fn hybrid_container_signal(data: &[u8]) -> Option<String> {
    if !data.starts_with(CFB_MAGIC) {
        return None;
    }
    if memmem::find(data, ZIP_EOCD_SIG).is_some() || memmem::find(data, ZIP_CENTRAL_SIG).is_some()
    {
        return Some(
            "compound-file header with embedded ZIP directory structure (ambiguous hybrid)"
                .to_string(),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_pdf() {
        let c = classify(b"%PDF-1.4 minimal");
        assert_eq!(c.category, FileCategory::Document);
        assert_eq!(c.detected_mime, "application/pdf");
        assert!(c.entry.is_some());
    }

    #[test]
    fn test_classify_prefers_ooxml_over_zip() {
        let mut docx = b"PK\x03\x04\x14\x00\x00\x00".to_vec();
        docx.extend_from_slice(b"word/document.xml");
        let c = classify(&docx);
        assert_eq!(c.category, FileCategory::Document);
        assert!(c.detected_mime.contains("wordprocessingml"));

        let zip = b"PK\x03\x04\x14\x00\x00\x00data.bin".to_vec();
        let c = classify(&zip);
        assert_eq!(c.category, FileCategory::Archive);
        assert_eq!(c.detected_mime, "application/zip");
    }

    #[test]
    fn test_classify_riff_subtypes() {
        let avi = b"RIFF\x10\x00\x00\x00AVI LIST".to_vec();
        assert_eq!(classify(&avi).detected_mime, "video/x-msvideo");
        let wav = b"RIFF\x10\x00\x00\x00WAVEfmt ".to_vec();
        assert_eq!(classify(&wav).detected_mime, "audio/wav");
    }

    #[test]
    fn test_classify_unknown_falls_back_to_octet_stream() {
        let c = classify(b"\x00\x01\x02\x03 nothing recognizable");
        assert_eq!(c.category, FileCategory::Unknown);
        assert_eq!(c.detected_mime, OCTET_STREAM);
        assert!(c.entry.is_none());
    }

    #[test]
    fn test_extension_mismatch_is_case_insensitive() {
        let c = classify(b"%PDF-1.4");
        let entry = c.entry.unwrap();
        assert!(!extension_mismatch(entry, "PDF"));
        assert!(!extension_mismatch(entry, "pdf"));
        assert!(extension_mismatch(entry, "jpg"));
        // No declared extension: nothing to mismatch against.
        assert!(!extension_mismatch(entry, ""));
    }

    #[test]
    fn test_hybrid_container_signal() {
        let mut hybrid = CFB_MAGIC.to_vec();
        hybrid.extend_from_slice(&[0u8; 32]);
        hybrid.extend_from_slice(ZIP_EOCD_SIG);
        hybrid.extend_from_slice(&[0u8; 18]);
        assert!(hybrid_container_signal(&hybrid).is_some());

        let mut plain_cfb = CFB_MAGIC.to_vec();
        plain_cfb.extend_from_slice(&[0u8; 64]);
        assert!(hybrid_container_signal(&plain_cfb).is_none());

        assert!(hybrid_container_signal(b"PK\x03\x04").is_none());
    }
}
