use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Error, Debug)]
/// Batch error
pub enum BatchError {
    /// The header row of a CSV file does not hold the expected set of columns.
    ///
    /// Both sets are kept sorted so the message is stable and easy to diff.
    #[error("CSV structure has changed\nExpected headers {expected:?}\nBut got {actual:?}")]
    SchemaMismatch {
        expected: BTreeSet<String>,
        actual: BTreeSet<String>,
    },

    /// The header row of a CSV file cannot be decoded.
    #[error("Unable to read CSV header row: {0}")]
    Header(String),

    #[error("ItemReader from: {0}")]
    ItemReader(String),

    #[error("ItemWriter from: {0}")]
    ItemWriter(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BatchError {
    /// Returns `true` when the error must stop the whole run instead of
    /// skipping the current item.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BatchError::ItemReader(_))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::BatchError;

    #[test]
    fn schema_mismatch_message_lists_both_header_sets() {
        let error = BatchError::SchemaMismatch {
            expected: BTreeSet::from(["Entity ID".to_string(), "Status".to_string()]),
            actual: BTreeSet::from(["Entity ID".to_string(), "zzz".to_string()]),
        };

        let message = error.to_string();

        assert!(message.starts_with("CSV structure has changed"));
        assert!(message.contains(r#"Expected headers {"Entity ID", "Status"}"#));
        assert!(message.contains(r#"But got {"Entity ID", "zzz"}"#));
    }

    #[test]
    fn only_item_reader_errors_are_recoverable() {
        assert!(!BatchError::ItemReader("bad row".to_string()).is_fatal());
        assert!(BatchError::ItemWriter("disk full".to_string()).is_fatal());
        assert!(BatchError::Configuration("no logger".to_string()).is_fatal());
        assert!(BatchError::Header("invalid utf-8".to_string()).is_fatal());
    }
}
