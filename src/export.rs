//! Gzip-compressed JSON export.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use flate2::{Compression, write::GzEncoder};
use log::info;
use serde::Serialize;

use crate::{
    core::item::ItemWriter, error::BatchError, item::json::json_writer::JsonItemWriterBuilder,
};

/// Writes `items` as a JSON array of objects into a gzip stream over `wtr`
/// and finishes the stream.
///
/// Returns the underlying writer once the gzip trailer has been written.
pub fn write_gzip_json<T, W>(items: &[T], wtr: W) -> Result<W, BatchError>
where
    T: Serialize,
    W: Write,
{
    let encoder = GzEncoder::new(wtr, Compression::default());
    let writer = JsonItemWriterBuilder::new().from_writer(encoder);

    ItemWriter::<T>::open(&writer)?;
    writer.write(items)?;
    ItemWriter::<T>::close(&writer)?;

    writer
        .into_inner()
        .finish()
        .map_err(|error| BatchError::ItemWriter(error.to_string()))
}

/// Exports `items` to `path` as gzip-compressed JSON, replacing any existing
/// file.
pub fn export_gzip_json<T, P>(items: &[T], path: P) -> Result<(), BatchError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)?;

    let mut stream = write_gzip_json(items, BufWriter::new(file))?;
    stream.flush()?;

    info!("Exported {} records to {}", items.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::GzDecoder;
    use serde::Serialize;

    use super::write_gzip_json;

    #[derive(Serialize)]
    struct Entity {
        id: &'static str,
    }

    #[test]
    fn output_is_a_complete_gzip_stream() {
        let items = [Entity { id: "111" }, Entity { id: "222" }];

        let compressed = write_gzip_json(&items, Vec::new()).unwrap();

        let mut json = String::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_string(&mut json)
            .unwrap();
        assert_eq!(json, r#"[{"id":"111"},{"id":"222"}]"#);
    }
}
