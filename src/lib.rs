#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # va-scc-batch

 Converts the business-entity CSV export of the Virginia State Corporation
 Commission (<https://cis.scc.virginia.gov/>) into gzip-compressed JSON.

 ## Core Concepts

- **HeaderMapping:** the exact set of columns an export must carry, and the record field each column fills.
- **ItemReader:** retrieves input one item at a time. The CSV reader validates the header row before the first item.
- **ItemWriter:** writes items out, one slice at a time. The JSON writer streams a single JSON array.
- **VaScc:** one normalized business entity, seven trimmed string fields.

 ## Behaviour

| **Input**                                   | **Result**                                 |
|---------------------------------------------|--------------------------------------------|
| Expected columns, any order                 | One record per data row                    |
| Renamed, extra or missing column            | `BatchError::SchemaMismatch`, no records   |
| Row ending with a stray comma               | Surplus value dropped                      |
| Row with missing trailing values            | Missing fields are empty strings           |
| Row that cannot be decoded                  | Row skipped, warning logged                |

 ## Features

| **Feature**   | **Description**                                         |
|---------------|---------------------------------------------------------|
| csv           | CSV `ItemReader`, header mappings and the SCC parser    |
| json          | JSON `ItemWriter` and the gzip export                   |
| progress      | indicatif progress bar listener                         |
| full          | Enables all available features (default)                |

 ## Getting Started

```rust
# use std::io::Write;
use va_scc_batch::{
    export::export_gzip_json,
    va_scc::{parse, VaScc, VA_SCC_HEADERS},
};

fn main() -> Result<(), va_scc_batch::BatchError> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("va_scc.csv");
    let mut file = std::fs::File::create(&input)?;
    writeln!(
        file,
        "Entity ID,Entity Name,Name Type,Entity Type,Principal Office Address,RA Name,Status"
    )?;
    writeln!(
        file,
        r#"111,,Fictitious Name,Nonstock Corporation,"5555 Whatever Dr, Nowhere, VA",Doctor Who,Active,"#
    )?;

    let records: Vec<VaScc> = parse(&input, VA_SCC_HEADERS, None)?;
    assert_eq!(records[0].entity_id, "111");
    assert_eq!(records[0].principal_office_address, "5555 Whatever Dr, Nowhere, VA");
    assert_eq!(records[0].status, "Active");

    export_gzip_json(&records, dir.path().join("va_scc.json.gz"))?;

    Ok(())
}
```
 */

/// Core traits for batch operations
pub mod core;

/// Error types for batch operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of item readers / writers (csv reader, json writer)
pub mod item;

/// Project directory layout and default file locations
pub mod config;

/// Console and rotating file logging
pub mod logging;

/// SCC business-entity records and their CSV parser
#[cfg(feature = "csv")]
pub mod va_scc;

/// Gzip-compressed JSON export
#[cfg(feature = "json")]
pub mod export;

/// Progress bar listener
#[cfg(feature = "progress")]
pub mod progress;
