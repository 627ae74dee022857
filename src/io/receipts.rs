//! Receipt log - writes park-out receipts to file
//!
//! Receipts are written in JSONL format (one JSON object per line)
//! to the file specified in config. Only completed stays are recorded;
//! slot state itself is never read back.

use crate::domain::receipt::Receipt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Append-only writer for receipts
#[derive(Debug)]
pub struct ReceiptLog {
    file_path: String,
}

impl ReceiptLog {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "receipt_log_initialized");
        Self { file_path: file_path.to_string() }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Write a receipt to the log file
    /// Returns true if successful, false otherwise
    pub fn write_receipt(&self, receipt: &Receipt) -> bool {
        let json = receipt.to_json();

        match self.append_line(&json) {
            Ok(()) => {
                info!(
                    rid = %receipt.rid,
                    slot = %receipt.slot,
                    fee = %receipt.fee,
                    "receipt_written"
                );
                true
            }
            Err(e) => {
                error!(
                    rid = %receipt.rid,
                    error = %e,
                    "receipt_write_failed"
                );
                false
            }
        }
    }

    /// Append a line to the receipt file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "receipt_appended");

        Ok(())
    }
}
