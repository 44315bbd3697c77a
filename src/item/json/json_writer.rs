use std::{
    cell::{Cell, RefCell},
    io::Write,
};

use serde::Serialize;
use serde_json::{Serializer, ser::PrettyFormatter};

use crate::{
    BatchError,
    core::item::{ItemWriter, ItemWriterResult},
};

/// Writes items as the elements of a single JSON array.
///
/// `open` writes the opening bracket, each `write` appends its items separated
/// by commas, and `close` writes the closing bracket then flushes.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use va_scc_batch::core::item::ItemWriter;
/// use va_scc_batch::item::json::json_writer::JsonItemWriterBuilder;
///
/// #[derive(Serialize)]
/// struct Car {
///     make: String,
/// }
///
/// let writer = JsonItemWriterBuilder::new().from_writer(Vec::new());
///
/// let cars = vec![
///     Car { make: "Porsche".to_string() },
///     Car { make: "Mazda".to_string() },
/// ];
///
/// let writer_ref = &writer as &dyn ItemWriter<Car>;
/// writer_ref.open().unwrap();
/// writer_ref.write(&cars).unwrap();
/// writer_ref.close().unwrap();
///
/// let json = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(json, r#"[{"make":"Porsche"},{"make":"Mazda"}]"#);
/// ```
pub struct JsonItemWriter<W: Write> {
    stream: RefCell<W>,
    use_pretty_formatter: bool,
    indent: Box<[u8]>,
    is_first_element: Cell<bool>,
}

impl<W: Write> JsonItemWriter<W> {
    /// Gives back the underlying stream, e.g. to finish a compressed encoder.
    pub fn into_inner(self) -> W {
        self.stream.into_inner()
    }

    fn write_bytes(&self, bytes: &[u8]) -> ItemWriterResult {
        self.stream
            .borrow_mut()
            .write_all(bytes)
            .map_err(|error| BatchError::ItemWriter(error.to_string()))
    }
}

impl<T: Serialize, W: Write> ItemWriter<T> for JsonItemWriter<W> {
    fn write(&self, items: &[T]) -> ItemWriterResult {
        for item in items {
            if self.is_first_element.get() {
                self.is_first_element.set(false);
            } else if self.use_pretty_formatter {
                self.write_bytes(b",\n")?;
            } else {
                self.write_bytes(b",")?;
            }

            let mut stream = self.stream.borrow_mut();
            let result = if self.use_pretty_formatter {
                let formatter = PrettyFormatter::with_indent(&self.indent);
                let mut serializer = Serializer::with_formatter(&mut *stream, formatter);
                item.serialize(&mut serializer)
            } else {
                serde_json::to_writer(&mut *stream, item)
            };

            result.map_err(|error| BatchError::ItemWriter(error.to_string()))?;
        }

        Ok(())
    }

    fn flush(&self) -> ItemWriterResult {
        self.stream
            .borrow_mut()
            .flush()
            .map_err(|error| BatchError::ItemWriter(error.to_string()))
    }

    fn open(&self) -> ItemWriterResult {
        self.is_first_element.set(true);
        if self.use_pretty_formatter {
            self.write_bytes(b"[\n")
        } else {
            self.write_bytes(b"[")
        }
    }

    fn close(&self) -> ItemWriterResult {
        if self.use_pretty_formatter {
            self.write_bytes(b"\n]")?;
        } else {
            self.write_bytes(b"]")?;
        }
        ItemWriter::<T>::flush(self)
    }
}

/// Builder for [`JsonItemWriter`].
///
/// Defaults to compact output; pretty output indents with two spaces.
pub struct JsonItemWriterBuilder {
    indent: Box<[u8]>,
    pretty_formatter: bool,
}

impl Default for JsonItemWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonItemWriterBuilder {
    pub fn new() -> Self {
        Self {
            indent: Box::from(b"  ".as_slice()),
            pretty_formatter: false,
        }
    }

    pub fn indent(mut self, indent: &[u8]) -> Self {
        self.indent = Box::from(indent);
        self
    }

    pub fn pretty_formatter(mut self, yes: bool) -> Self {
        self.pretty_formatter = yes;
        self
    }

    pub fn from_writer<W: Write>(self, wtr: W) -> JsonItemWriter<W> {
        JsonItemWriter {
            stream: RefCell::new(wtr),
            use_pretty_formatter: self.pretty_formatter,
            indent: self.indent,
            is_first_element: Cell::new(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::JsonItemWriterBuilder;
    use crate::core::item::ItemWriter;

    #[derive(Serialize)]
    struct Car {
        year: u16,
        make: String,
    }

    fn cars() -> Vec<Car> {
        vec![
            Car {
                year: 1948,
                make: "Porsche".to_string(),
            },
            Car {
                year: 2021,
                make: "Mazda".to_string(),
            },
        ]
    }

    #[test]
    fn items_from_several_writes_share_one_array() {
        let writer = JsonItemWriterBuilder::new().from_writer(Vec::new());
        let cars = cars();

        let writer_ref = &writer as &dyn ItemWriter<Car>;
        writer_ref.open().unwrap();
        writer_ref.write(&cars[..1]).unwrap();
        writer_ref.write(&cars[1..]).unwrap();
        writer_ref.close().unwrap();

        let json = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            json,
            r#"[{"year":1948,"make":"Porsche"},{"year":2021,"make":"Mazda"}]"#
        );
    }

    #[test]
    fn no_items_is_an_empty_array() {
        let writer = JsonItemWriterBuilder::new().from_writer(Vec::new());

        let writer_ref = &writer as &dyn ItemWriter<Car>;
        writer_ref.open().unwrap();
        writer_ref.write(&[]).unwrap();
        writer_ref.close().unwrap();

        let json = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn pretty_output_uses_the_configured_indent() {
        let writer = JsonItemWriterBuilder::new()
            .pretty_formatter(true)
            .indent(b"\t")
            .from_writer(Vec::new());

        let writer_ref = &writer as &dyn ItemWriter<Car>;
        writer_ref.open().unwrap();
        writer_ref.write(&cars()).unwrap();
        writer_ref.close().unwrap();

        let json = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            json,
            "[\n{\n\t\"year\": 1948,\n\t\"make\": \"Porsche\"\n},\n{\n\t\"year\": 2021,\n\t\"make\": \"Mazda\"\n}\n]"
        );

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }
}
