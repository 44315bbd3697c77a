//! JSON support for writing structured data.
//!
//! [`JsonItemWriter`] serializes items with `serde_json` into one JSON array,
//! in compact or pretty-printed form, over any `std::io::Write`. Wrapping the
//! destination in a compressing encoder gives a compressed export; see
//! [`crate::export`].

/// The `json_writer` module contains the `JsonItemWriter` struct, which is the main entry point for writing items to a JSON data source.
pub mod json_writer;

pub use json_writer::{JsonItemWriter, JsonItemWriterBuilder};
