//! Static signature registry.
//!
//! An ordered, read-only table binding content magics to category, canonical
//! MIME type, conventional extensions, and the structural validator and
//! encryption detector for that format. Built once on first use and never
//! mutated. Ordering is by specificity: entries that qualify a generic
//! container more deeply (OOXML inside ZIP, AVI/WAVE inside RIFF) come
//! before the container itself, and longer magics before shorter ones.

use super::result::FileCategory;
use memchr::memmem;
use once_cell::sync::Lazy;

/// MIME recorded when no registry entry matches.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Buffers shorter than this cannot carry any registered signature plus
/// payload and are not worth classifying.
pub const MIN_ANALYZABLE_LEN: usize = 4;

/// Structural validator binding for a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Pdf,
    Jpeg,
    Png,
    ZipFamily,
    None,
}

/// Encryption detector binding for a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detector {
    Pdf,
    OfficeCfb,
    Zip,
    None,
}

/// A deep qualifier: a byte sequence that must also occur within the first
/// `window` bytes. Distinguishes container refinements (DOCX inside ZIP,
/// AVI inside RIFF) from the generic container.
#[derive(Debug, Clone, Copy)]
pub struct DeepMatch {
    pub needle: &'static [u8],
    pub window: usize,
}

/// One registry entry: a signature and everything bound to it.
#[derive(Debug, Clone, Copy)]
pub struct SignatureEntry {
    pub magic: &'static [u8],
    pub offset: usize,
    pub deep: Option<DeepMatch>,
    pub category: FileCategory,
    pub mime: &'static str,
    pub extensions: &'static [&'static str],
    pub validator: Validator,
    pub detector: Detector,
}

impl SignatureEntry {
    /// Full match: magic at its offset plus the deep qualifier, if any.
    pub fn matches(&self, data: &[u8]) -> bool {
        let Some(end) = self.offset.checked_add(self.magic.len()) else {
            return false;
        };
        if end > data.len() || &data[self.offset..end] != self.magic {
            return false;
        }
        match self.deep {
            Some(DeepMatch { needle, window }) => {
                let scan = &data[..data.len().min(window)];
                memmem::find(scan, needle).is_some()
            }
            None => true,
        }
    }
}

/// The registry, in match order.
pub fn registry() -> &'static [SignatureEntry] {
    &REGISTRY
}

const OOXML_WINDOW: usize = 4096;
const RIFF_WINDOW: usize = 12;

static REGISTRY: Lazy<Vec<SignatureEntry>> = Lazy::new(|| {
    use Detector as D;
    use FileCategory as C;
    use Validator as V;

    fn entry(
        magic: &'static [u8],
        offset: usize,
        deep: Option<DeepMatch>,
        category: FileCategory,
        mime: &'static str,
        extensions: &'static [&'static str],
        validator: Validator,
        detector: Detector,
    ) -> SignatureEntry {
        SignatureEntry {
            magic,
            offset,
            deep,
            category,
            mime,
            extensions,
            validator,
            detector,
        }
    }

    fn deep(needle: &'static [u8], window: usize) -> Option<DeepMatch> {
        Some(DeepMatch { needle, window })
    }

    vec![
        // OOXML container refinements: checked before generic ZIP.
        entry(
            b"PK\x03\x04",
            0,
            deep(b"word/", OOXML_WINDOW),
            C::Document,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            &["docx"],
            V::ZipFamily,
            D::Zip,
        ),
        entry(
            b"PK\x03\x04",
            0,
            deep(b"xl/", OOXML_WINDOW),
            C::Spreadsheet,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            &["xlsx"],
            V::ZipFamily,
            D::Zip,
        ),
        entry(
            b"PK\x03\x04",
            0,
            deep(b"ppt/", OOXML_WINDOW),
            C::Document,
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            &["pptx"],
            V::ZipFamily,
            D::Zip,
        ),
        // RIFF refinements: subtype tag sits at offset 8.
        entry(
            b"RIFF",
            0,
            deep(b"AVI ", RIFF_WINDOW),
            C::Video,
            "video/x-msvideo",
            &["avi"],
            V::None,
            D::None,
        ),
        entry(
            b"RIFF",
            0,
            deep(b"WAVE", RIFF_WINDOW),
            C::Audio,
            "audio/wav",
            &["wav"],
            V::None,
            D::None,
        ),
        // Long, unambiguous magics.
        entry(
            b"SQLite format 3\x00",
            0,
            None,
            C::Other,
            "application/x-sqlite3",
            &["db", "sqlite", "sqlite3"],
            V::None,
            D::None,
        ),
        entry(
            b"Return-Path:",
            0,
            None,
            C::Email,
            "message/rfc822",
            &["eml", "mbox"],
            V::None,
            D::None,
        ),
        entry(
            b"Received:",
            0,
            None,
            C::Email,
            "message/rfc822",
            &["eml", "mbox"],
            V::None,
            D::None,
        ),
        entry(
            b"\x89PNG\r\n\x1a\n",
            0,
            None,
            C::Image,
            "image/png",
            &["png"],
            V::Png,
            D::None,
        ),
        // Compound File Binary: legacy Office and Outlook .msg. Encryption
        // detection matters here because legacy-encrypted OOXML payloads
        // arrive wrapped in this container.
        entry(
            b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1",
            0,
            None,
            C::Document,
            "application/msword",
            &["doc", "xls", "ppt", "msg"],
            V::None,
            D::OfficeCfb,
        ),
        entry(
            b"Rar!\x1a\x07",
            0,
            None,
            C::Archive,
            "application/x-rar-compressed",
            &["rar"],
            V::None,
            D::None,
        ),
        entry(
            b"GIF87a",
            0,
            None,
            C::Image,
            "image/gif",
            &["gif"],
            V::None,
            D::None,
        ),
        entry(
            b"GIF89a",
            0,
            None,
            C::Image,
            "image/gif",
            &["gif"],
            V::None,
            D::None,
        ),
        entry(
            b"7z\xbc\xaf\x27\x1c",
            0,
            None,
            C::Archive,
            "application/x-7z-compressed",
            &["7z"],
            V::None,
            D::None,
        ),
        entry(
            b"%PDF-",
            0,
            None,
            C::Document,
            "application/pdf",
            &["pdf"],
            V::Pdf,
            D::Pdf,
        ),
        entry(
            b"From:",
            0,
            None,
            C::Email,
            "message/rfc822",
            &["eml", "mbox"],
            V::None,
            D::None,
        ),
        entry(
            b"From ",
            0,
            None,
            C::Email,
            "message/rfc822",
            &["eml", "mbox"],
            V::None,
            D::None,
        ),
        // ISO base media: brand tag sits after the 4-byte box length.
        entry(
            b"ftyp",
            4,
            None,
            C::Video,
            "video/mp4",
            &["mp4", "m4v", "mov"],
            V::None,
            D::None,
        ),
        entry(
            b"\x7fELF",
            0,
            None,
            C::Executable,
            "application/x-elf",
            &["so", "elf"],
            V::None,
            D::None,
        ),
        entry(
            b"PK\x03\x04",
            0,
            None,
            C::Archive,
            "application/zip",
            &["zip", "jar"],
            V::ZipFamily,
            D::Zip,
        ),
        entry(
            b"fLaC",
            0,
            None,
            C::Audio,
            "audio/flac",
            &["flac"],
            V::None,
            D::None,
        ),
        entry(
            b"OggS",
            0,
            None,
            C::Audio,
            "audio/ogg",
            &["ogg", "ogv"],
            V::None,
            D::None,
        ),
        entry(
            b"II*\x00",
            0,
            None,
            C::Image,
            "image/tiff",
            &["tif", "tiff"],
            V::None,
            D::None,
        ),
        entry(
            b"MM\x00*",
            0,
            None,
            C::Image,
            "image/tiff",
            &["tif", "tiff"],
            V::None,
            D::None,
        ),
        entry(
            b"\xff\xd8\xff",
            0,
            None,
            C::Image,
            "image/jpeg",
            &["jpg", "jpeg", "jfif"],
            V::Jpeg,
            D::None,
        ),
        entry(
            b"ID3",
            0,
            None,
            C::Audio,
            "audio/mpeg",
            &["mp3"],
            V::None,
            D::None,
        ),
        entry(
            b"\x1f\x8b",
            0,
            None,
            C::Archive,
            "application/gzip",
            &["gz", "gzip", "tgz"],
            V::None,
            D::None,
        ),
        entry(
            b"MZ",
            0,
            None,
            C::Executable,
            "application/x-dosexec",
            &["exe", "dll", "sys"],
            V::None,
            D::None,
        ),
        entry(
            b"BM",
            0,
            None,
            C::Image,
            "image/bmp",
            &["bmp"],
            V::None,
            D::None,
        ),
        // Bare MPEG audio frame sync; weakest signature, checked last.
        entry(
            b"\xff\xfb",
            0,
            None,
            C::Audio,
            "audio/mpeg",
            &["mp3"],
            V::None,
            D::None,
        ),
    ]
});
