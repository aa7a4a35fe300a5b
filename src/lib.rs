//! Content-based triage for evidence ingestion.
//!
//! Given a `(filename, bytes)` pair supplied by an upstream connector, this
//! crate classifies the content by signature (never by filename), checks
//! structural integrity and encryption status, hashes the buffer for
//! deduplication, and assembles an immutable [`AnalysisResult`] that a
//! pipeline gate can use to admit or quarantine the item.

pub mod analysis;
pub mod error;
pub mod hashing;
pub mod io;
pub mod logging;

pub use analysis::api::{analyze, analyze_path};
pub use analysis::result::{AnalysisResult, FileCategory, FileQuality};
pub use error::{AnalysisError, Result};
pub use io::IOLimits;
