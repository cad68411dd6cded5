//! Error types for Tessera.

use crate::types::{KeyType, RangeOp};
use thiserror::Error;

/// Result type alias using TesseraError.
pub type Result<T> = std::result::Result<T, TesseraError>;

/// Errors that can occur in Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // File errors
    #[error("file already exists: {0}")]
    FileExists(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    // Buffer errors
    #[error("buffer pool full, unable to allocate frame")]
    BufferPoolFull,

    #[error("page not found: {page_no} in file {file_id}")]
    PageNotFound { file_id: u32, page_no: u32 },

    #[error("page {page_no} in file {file_id} is still pinned")]
    PagePinned { file_id: u32, page_no: u32 },

    // Page layout errors
    #[error("page buffer too small: need {needed} bytes, got {actual}")]
    Layout { needed: usize, actual: usize },

    // Index errors
    #[error("index metadata mismatch: {0}")]
    BadIndexInfo(String),

    #[error("invalid scan operators: low {low:?}, high {high:?}")]
    BadOpcodes { low: RangeOp, high: RangeOp },

    #[error("invalid scan range: low {low} > high {high}")]
    BadScanRange { low: i32, high: i32 },

    #[error("no key in the index satisfies the scan criteria")]
    NoSuchKeyFound,

    #[error("no scan has been initialized")]
    ScanNotInitialized,

    #[error("index scan completed")]
    IndexScanCompleted,

    #[error("unsupported key type: {0:?}")]
    UnsupportedKeyType(KeyType),

    // Relation scan
    #[error("end of file reached")]
    EndOfFile,

    // Internal errors
    #[error("internal error: {0}")]
    Internal(String),
}
