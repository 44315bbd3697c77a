/// Reader and writer traits shared by every item source and sink.
pub mod item;

/// Progress reporting for long reads.
pub mod progress;
