//! CSV support for reading tabular data.
//!
//! The reader deserializes rows into Rust structs with serde. A
//! [`header::HeaderMapping`] pins the set of columns a file must carry and
//! renames them into the field names of the target struct, so the column
//! order of the file does not matter.
//!
//! # Examples
//!
//! ```
//! use serde::Deserialize;
//! use va_scc_batch::core::item::ItemReader;
//! use va_scc_batch::item::csv::csv_reader::CsvItemReaderBuilder;
//! use va_scc_batch::item::csv::header::HeaderMapping;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct City {
//!     city: String,
//!     pop: u32,
//! }
//!
//! const CITIES: HeaderMapping<'static> =
//!     HeaderMapping::new(&[("City", "city"), ("Population", "pop")]);
//!
//! let csv_data = "\
//! Population,City
//! 4628910,Boston
//! 42695,Concord
//! ";
//!
//! let reader = CsvItemReaderBuilder::new()
//!     .header_mapping(CITIES)
//!     .from_reader(csv_data.as_bytes())
//!     .unwrap();
//!
//! let mut cities: Vec<City> = Vec::new();
//! while let Some(city) = reader.read().unwrap() {
//!     cities.push(city);
//! }
//!
//! assert_eq!(cities.len(), 2);
//! assert_eq!(cities[0].city, "Boston");
//! assert_eq!(cities[1].pop, 42695);
//! ```

/// A module providing facilities for reading CSV data records.
pub mod csv_reader;

/// Expected header sets and their mapping onto struct fields.
pub mod header;

pub use csv_reader::{CsvItemReader, CsvItemReaderBuilder};
pub use header::HeaderMapping;
