//! Terminal progress bar for long parses, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    core::progress::{ProgressListener, ReadProgress},
    error::BatchError,
};

/// Template of the byte-based progress bar. `{prefix}` holds the description,
/// `{msg}` the row count.
pub const DEFAULT_TEMPLATE: &str =
    "{prefix} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}";

/// Renders [`ReadProgress`] updates on a progress bar sized in bytes.
pub struct ProgressBarListener {
    bar: ProgressBar,
}

impl ProgressBarListener {
    /// Creates a bar for an input of `total_bytes` bytes.
    pub fn new(total_bytes: u64, description: Option<&str>) -> Result<Self, BatchError> {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(DEFAULT_TEMPLATE)
                .map_err(|error| BatchError::Configuration(error.to_string()))?
                .progress_chars("#>-"),
        );

        if let Some(description) = description {
            bar.set_prefix(description.to_string());
        }

        Ok(Self { bar })
    }

    /// A listener that tracks progress without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl ProgressListener for ProgressBarListener {
    fn on_progress(&self, progress: &ReadProgress) {
        if let Some(total) = progress.total_bytes {
            self.bar.set_length(total);
        }
        self.bar.set_position(progress.bytes);
        self.bar.set_message(format!("{} rows", progress.rows));
    }
}
