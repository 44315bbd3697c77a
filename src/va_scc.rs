//! Business-entity records from the Virginia State Corporation Commission
//! (<https://cis.scc.virginia.gov/>) CSV export.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    core::{item::ItemReader, progress::ProgressListener},
    error::BatchError,
    item::csv::{csv_reader::CsvItemReaderBuilder, header::HeaderMapping},
};

/// Maps each column of the SCC export onto a [`VaScc`] field.
pub const VA_SCC_HEADERS: HeaderMapping<'static> = HeaderMapping::new(&[
    ("Entity ID", "entity_id"),
    ("Entity Name", "entity_name"),
    ("Name Type", "name_type"),
    ("Entity Type", "entity_type"),
    ("Principal Office Address", "principal_office_address"),
    ("RA Name", "ra_name"),
    ("Status", "status"),
]);

/// One business entity of the SCC export.
///
/// Every field is trimmed when the record is deserialized. Absent fields are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaScc {
    #[serde(deserialize_with = "trimmed")]
    pub entity_id: String,
    #[serde(deserialize_with = "trimmed")]
    pub entity_name: String,
    #[serde(deserialize_with = "trimmed")]
    pub name_type: String,
    #[serde(deserialize_with = "trimmed")]
    pub entity_type: String,
    #[serde(deserialize_with = "trimmed")]
    pub principal_office_address: String,
    #[serde(deserialize_with = "trimmed")]
    pub ra_name: String,
    #[serde(deserialize_with = "trimmed")]
    pub status: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

impl VaScc {
    /// Reads the SCC export at `path` with the standard header mapping.
    ///
    /// See [`parse`].
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        listener: Option<&dyn ProgressListener>,
    ) -> Result<Vec<VaScc>, BatchError> {
        parse(path, VA_SCC_HEADERS, listener)
    }
}

/// Converts the CSV file at `path` into records, in file order.
///
/// The header row must hold exactly the columns of `mapping`, in any order,
/// otherwise [`BatchError::SchemaMismatch`] is returned and no row is read.
/// A row that cannot be decoded is skipped with a warning. `listener` is
/// notified after every row, skipped ones included.
///
/// # Examples
///
/// ```no_run
/// use va_scc_batch::va_scc::{parse, VA_SCC_HEADERS};
///
/// let records = parse("data/va_scc.csv", VA_SCC_HEADERS, None)?;
/// println!("{} entities", records.len());
/// # Ok::<(), va_scc_batch::BatchError>(())
/// ```
pub fn parse<P: AsRef<Path>>(
    path: P,
    mapping: HeaderMapping<'_>,
    listener: Option<&dyn ProgressListener>,
) -> Result<Vec<VaScc>, BatchError> {
    let path = path.as_ref();
    let reader = CsvItemReaderBuilder::new()
        .header_mapping(mapping)
        .from_path(path)?;

    let mut records: Vec<VaScc> = Vec::new();
    let mut skipped = 0;

    loop {
        match reader.read() {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                skipped += 1;
                warn!("Skipping unparsable line in {}: {}", path.display(), error);
            }
        }

        if let Some(listener) = listener {
            listener.on_progress(&reader.progress());
        }
    }

    let progress = reader.progress();
    info!(
        "Parsed {} records from {} ({} rows, {} skipped)",
        records.len(),
        path.display(),
        progress.rows,
        skipped
    );

    Ok(records)
}
