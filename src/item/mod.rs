#[cfg(feature = "csv")]
/// This module provides a CSV item reader.
pub mod csv;

#[cfg(feature = "json")]
/// This module provides a JSON item writer.
pub mod json;
