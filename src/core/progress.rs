/// Snapshot of how far a reader has gone through its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadProgress {
    /// Data rows consumed so far, skipped rows included.
    pub rows: usize,
    /// Byte offset reached in the input.
    pub bytes: u64,
    /// Total size of the input, when known.
    pub total_bytes: Option<u64>,
}

impl ReadProgress {
    /// Fraction of the input consumed, in `[0, 1]`, when the total is known.
    pub fn ratio(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Observer notified after each row read by a parsing loop.
///
/// Listeners only observe: they get no way to alter what is read.
pub trait ProgressListener {
    fn on_progress(&self, progress: &ReadProgress);
}

impl<F> ProgressListener for F
where
    F: Fn(&ReadProgress),
{
    fn on_progress(&self, progress: &ReadProgress) {
        self(progress)
    }
}
