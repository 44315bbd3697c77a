use std::collections::{BTreeSet, HashSet};

use csv::StringRecord;

use crate::error::BatchError;

/// Fixed association between CSV column names and the field names of the
/// type a row is deserialized into.
///
/// Validation only looks at the *set* of column names: column order in the
/// file is irrelevant.
///
/// # Examples
///
/// ```
/// use csv::StringRecord;
/// use va_scc_batch::item::csv::header::HeaderMapping;
///
/// const CARS: HeaderMapping<'static> =
///     HeaderMapping::new(&[("Model Year", "year"), ("Make", "make")]);
///
/// let fields = CARS
///     .translate(&StringRecord::from(vec!["Make", "Model Year"]))
///     .unwrap();
/// assert_eq!(fields, StringRecord::from(vec!["make", "year"]));
///
/// assert!(CARS.translate(&StringRecord::from(vec!["Make"])).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeaderMapping<'a> {
    entries: &'a [(&'a str, &'a str)],
}

impl<'a> HeaderMapping<'a> {
    /// Creates a mapping from `(column, field)` pairs.
    pub const fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self { entries }
    }

    /// Expected column names, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(column, _)| *column)
    }

    /// Field name for `column`, if the column is part of the mapping.
    pub fn field(&self, column: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, field)| *field)
    }

    /// The expected column names, as a sorted set.
    pub fn expected_columns(&self) -> BTreeSet<String> {
        self.columns().map(str::to_string).collect()
    }

    /// Checks that `headers` holds exactly the expected set of columns.
    pub fn validate(&self, headers: &StringRecord) -> Result<(), BatchError> {
        let expected = self.expected_columns();
        let actual: BTreeSet<String> = headers.iter().map(str::to_string).collect();

        if expected != actual {
            return Err(BatchError::SchemaMismatch { expected, actual });
        }

        Ok(())
    }

    /// Validates `headers` then rewrites each column name into its field name,
    /// keeping file order.
    ///
    /// When a column appears more than once only its last occurrence keeps the
    /// field name. Earlier ones become an empty name that no field matches.
    pub fn translate(&self, headers: &StringRecord) -> Result<StringRecord, BatchError> {
        self.validate(headers)?;

        let columns: Vec<&str> = headers.iter().collect();
        let mut seen = HashSet::new();
        let mut fields: Vec<&str> = columns
            .into_iter()
            .rev()
            .map(|column| {
                if seen.insert(column) {
                    self.field(column).unwrap_or_default()
                } else {
                    ""
                }
            })
            .collect();
        fields.reverse();

        Ok(StringRecord::from(fields))
    }
}
