//! IO modules - output written outside the process
//!
//! This module contains all external IO operations:
//! - `receipts` - Park-out receipts to file (JSONL format)

pub mod receipts;

// Re-export commonly used types
pub use receipts::ReceiptLog;
