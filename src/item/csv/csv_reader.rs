use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use log::debug;
use serde::de::DeserializeOwned;
use std::{
    cell::{Cell, RefCell},
    fs,
    io::{Cursor, Read},
    path::Path,
};

use crate::{
    core::{
        item::{ItemReader, ItemReaderResult},
        progress::ReadProgress,
    },
    error::BatchError,
};

use super::header::HeaderMapping;

/// A CSV item reader that implements the `ItemReader` trait.
///
/// Rows are deserialized with serde, keyed by the header row. When the reader
/// is built with a [`HeaderMapping`], the header row is validated against it
/// up front and the mapped field names replace the column names as keys.
///
/// Rows are read leniently:
/// - values past the last header (a trailing comma) are dropped
/// - missing trailing values are read as empty strings
/// - fields are handed over untrimmed
///
/// # Examples
///
/// ```
/// use serde::Deserialize;
/// use va_scc_batch::core::item::ItemReader;
/// use va_scc_batch::item::csv::csv_reader::CsvItemReaderBuilder;
/// use va_scc_batch::item::csv::header::HeaderMapping;
///
/// #[derive(Debug, Deserialize)]
/// struct City {
///     name: String,
///     country: String,
/// }
///
/// let data = "Country,City\nUnited States,Boston,\n";
///
/// let reader = CsvItemReaderBuilder::new()
///     .header_mapping(HeaderMapping::new(&[("City", "name"), ("Country", "country")]))
///     .from_reader(data.as_bytes())
///     .unwrap();
///
/// let city: City = reader.read().unwrap().unwrap();
/// assert_eq!(city.name, "Boston");
/// assert_eq!(city.country, "United States");
///
/// assert!(ItemReader::<City>::read(&reader).unwrap().is_none());
/// ```
pub struct CsvItemReader<R> {
    reader: RefCell<csv::Reader<R>>,
    /// Deserialization keys, one per column in file order.
    headers: StringRecord,
    /// Buffer reused across reads.
    record: RefCell<StringRecord>,
    rows: Cell<usize>,
    total_bytes: Option<u64>,
}

impl<R: Read> CsvItemReader<R> {
    /// Keys used to deserialize each row.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn progress(&self) -> ReadProgress {
        ReadProgress {
            rows: self.rows.get(),
            bytes: self.reader.borrow().position().byte(),
            total_bytes: self.total_bytes,
        }
    }

    fn next_row(&self) -> usize {
        let row = self.rows.get() + 1;
        self.rows.set(row);
        row
    }
}

impl<R: Read, T: DeserializeOwned> ItemReader<T> for CsvItemReader<R> {
    /// Reads and deserializes the next row.
    ///
    /// # Returns
    /// - `Ok(Some(item))` if a row is read
    /// - `Ok(None)` once the input is exhausted
    /// - `Err(BatchError::ItemReader(_))` if the row cannot be decoded; the
    ///   reader has moved past it and the next call reads the following row
    /// - `Err(BatchError::Io(_))` if the underlying source fails
    fn read(&self) -> ItemReaderResult<T> {
        let mut reader = self.reader.borrow_mut();
        let mut record = self.record.borrow_mut();

        let has_record = match reader.read_record(&mut record) {
            Ok(has_record) => has_record,
            Err(error) => {
                let row = self.next_row();
                return Err(read_error(error, row));
            }
        };

        if !has_record {
            return Ok(None);
        }

        let row = self.next_row();

        let width = self.headers.len();
        record.truncate(width);
        while record.len() < width {
            record.push_field("");
        }

        match record.deserialize(Some(&self.headers)) {
            Ok(item) => Ok(Some(item)),
            Err(error) => Err(BatchError::ItemReader(format!("row {row}: {error}"))),
        }
    }
}

fn read_error(error: csv::Error, row: usize) -> BatchError {
    if error.is_io_error() {
        return match error.into_kind() {
            csv::ErrorKind::Io(error) => BatchError::Io(error),
            kind => BatchError::ItemReader(format!("row {row}: {kind:?}")),
        };
    }
    BatchError::ItemReader(format!("row {row}: {error}"))
}

fn header_error(error: csv::Error) -> BatchError {
    match error.into_kind() {
        csv::ErrorKind::Io(error) => BatchError::Io(error),
        kind => BatchError::Header(format!("{kind:?}")),
    }
}

/// A builder for configuring CSV item reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Terminator: CRLF (accepts `\r`, `\n` and `\r\n`)
/// - Quoting: double quotes, doubled to escape, no escape character
/// - Header mapping: none, raw column names are used as keys
#[derive(Debug, Clone, Copy)]
pub struct CsvItemReaderBuilder<'a> {
    delimiter: u8,
    terminator: Terminator,
    mapping: Option<HeaderMapping<'a>>,
}

impl Default for CsvItemReaderBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CsvItemReaderBuilder<'a> {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
            mapping: None,
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Validates the header row against `mapping` and deserializes rows using
    /// its field names.
    pub fn header_mapping(mut self, mapping: HeaderMapping<'a>) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Creates a `CsvItemReader` from a reader.
    ///
    /// The header row is read and validated immediately.
    ///
    /// # Errors
    /// - `BatchError::SchemaMismatch` if the header row does not match the mapping
    /// - `BatchError::Header` if the header row cannot be decoded
    /// - `BatchError::Io` if the source cannot be read
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<CsvItemReader<R>, BatchError> {
        self.build(rdr, None)
    }

    /// Creates a `CsvItemReader` over the whole content of the file at `path`,
    /// loaded in memory.
    pub fn from_path<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<CsvItemReader<Cursor<Vec<u8>>>, BatchError> {
        let path = path.as_ref();
        let content = fs::read(path)?;
        let total_bytes = content.len() as u64;

        debug!("Loaded {} bytes from {}", total_bytes, path.display());

        self.build(Cursor::new(content), Some(total_bytes))
    }

    fn build<R: Read>(
        self,
        rdr: R,
        total_bytes: Option<u64>,
    ) -> Result<CsvItemReader<R>, BatchError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::None)
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .quote(b'"')
            .double_quote(true)
            .escape(None)
            .has_headers(true)
            .flexible(true) // Row length is reconciled with the headers on read
            .from_reader(rdr);

        let columns = reader.headers().map_err(header_error)?.clone();

        let headers = match self.mapping {
            Some(mapping) => mapping.translate(&columns)?,
            None => columns,
        };

        Ok(CsvItemReader {
            reader: RefCell::new(reader),
            headers,
            record: RefCell::new(StringRecord::new()),
            rows: Cell::new(0),
            total_bytes,
        })
    }
}
