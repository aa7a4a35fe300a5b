//! The analysis pipeline: signature classification, structural
//! validation, encryption detection, and result assembly.
//!
//! Everything in this module is a pure function of the input buffer;
//! the signature registry is read-only after first use, so `analyze`
//! is safe to call unsynchronized from any number of worker threads.

pub mod api;
pub mod classifier;
pub mod encryption;
pub mod registry;
pub mod result;
pub mod suspicious;
pub mod validators;

pub use result::{AnalysisResult, FileCategory, FileQuality};
