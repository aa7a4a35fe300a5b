//! The immutable analysis record and its supporting enums.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output schema version recorded on every result, so that a re-run with a
/// newer analyzer produces a distinguishable, separately versioned record.
pub const SCHEMA_VERSION: &str = "1.0";

/// High-level content category, derived solely from the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Document,
    Image,
    Video,
    Audio,
    Spreadsheet,
    Archive,
    Email,
    Executable,
    Other,
    Unknown,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FileCategory::*;
        let s = match self {
            Document => "document",
            Image => "image",
            Video => "video",
            Audio => "audio",
            Spreadsheet => "spreadsheet",
            Archive => "archive",
            Email => "email",
            Executable => "executable",
            Other => "other",
            Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Integrity/encryption verdict for an analyzed buffer.
///
/// Exactly one value is recorded per analysis, chosen by the total severity
/// order below when several signals fire on the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileQuality {
    Valid,
    Corrupted,
    Truncated,
    Encrypted,
    InvalidFormat,
    Suspicious,
    Unknown,
}

impl FileQuality {
    /// Severity rank, strongest first: encrypted > corrupted > truncated >
    /// invalid_format > suspicious > valid. Used to pick the single recorded
    /// quality when multiple signals apply.
    pub fn severity(self) -> u8 {
        use FileQuality::*;
        match self {
            Encrypted => 5,
            Corrupted => 4,
            Truncated => 3,
            InvalidFormat => 2,
            Suspicious => 1,
            Valid | Unknown => 0,
        }
    }

    /// Whether downstream enrichment (OCR, extraction) should be attempted.
    /// Only intact content is admitted; anything flagged, damaged,
    /// encrypted, or malformed goes to review instead.
    pub fn is_processable(self) -> bool {
        matches!(self, FileQuality::Valid)
    }
}

impl fmt::Display for FileQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FileQuality::*;
        let s = match self {
            Valid => "valid",
            Corrupted => "corrupted",
            Truncated => "truncated",
            Encrypted => "encrypted",
            InvalidFormat => "invalid_format",
            Suspicious => "suspicious",
            Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Complete analysis record for one ingested buffer.
///
/// Created once at ingestion time and never mutated; reanalysis produces a
/// new record with its own `schema_version`, preserving audit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Output schema version for stability tracking
    pub schema_version: String,
    /// Filename as supplied by the connector; never trusted for classification
    pub filename: String,
    /// Lowercased extension from the filename, empty if none
    pub declared_extension: String,
    /// MIME type the extension *claims*, if any; informational only
    pub declared_mime: Option<String>,
    pub file_size: u64,
    /// Category derived solely from content
    pub category: FileCategory,
    /// MIME type derived solely from content
    pub detected_mime: String,
    pub quality: FileQuality,
    /// Human-readable reasons; non-empty exactly when quality != valid
    pub quality_details: Vec<String>,
    pub md5_hash: String,
    pub sha256_hash: String,
    pub is_processable: bool,
}

impl AnalysisResult {
    pub fn to_json_string(&self) -> Result<String, AnalysisError> {
        serde_json::to_string(self)
            .map_err(|e| AnalysisError::Serialization(format!("JSON serialization error: {}", e)))
    }

    pub fn from_json_str(json_str: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(json_str)
            .map_err(|e| AnalysisError::Serialization(format!("JSON deserialization error: {}", e)))
    }
}
