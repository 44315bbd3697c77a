use crate::error::BatchError;

/// Result of a single [`ItemReader::read`] call.
///
/// - `Ok(Some(item))`: an item was read
/// - `Ok(None)`: the source is exhausted
/// - `Err(error)`: the current item could not be read
pub type ItemReaderResult<R> = Result<Option<R>, BatchError>;

/// Result of an [`ItemWriter`] operation.
pub type ItemWriterResult = Result<(), BatchError>;

/// Retrieves input one item at a time.
///
/// Readers use interior mutability so they can be shared by reference with
/// whatever drives them.
pub trait ItemReader<R> {
    fn read(&self) -> ItemReaderResult<R>;
}

/// Writes items to an output, one slice of items at a time.
///
/// `open` is called once before the first write and `close` once after the
/// last one. Both default to no-ops.
pub trait ItemWriter<W> {
    fn write(&self, items: &[W]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}
