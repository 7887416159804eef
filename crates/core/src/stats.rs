//! Run counters, accumulated explicitly by the driver.

use serde::Serialize;

use crate::record::OutputRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Input records seen, including skipped ones.
    pub records: usize,
    pub written: usize,
    pub skipped: usize,
    /// Sum of `len(Example QA) + 1` over written records.
    pub qa_pairs: usize,
}

impl RunStats {
    pub fn record_written(&mut self, output: &OutputRecord) {
        self.records += 1;
        self.written += 1;
        self.qa_pairs += output.qa_pairs();
    }

    pub fn record_skipped(&mut self) {
        self.records += 1;
        self.skipped += 1;
    }
}
