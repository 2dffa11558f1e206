use crate::errors::{ExportError, ExportResult};

/// CSV writer options. Defaults follow RFC 4180.
#[derive(Debug, Clone)]
pub struct CsvWriterConfig {
    pub delimiter: u8,
    pub quote: u8,
    /// Prepend a UTF-8 BOM for spreadsheet apps. Off by default.
    pub bom: bool,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            bom: false,
        }
    }
}

/// Row-at-a-time CSV emitter over an in-memory buffer.
///
/// Escaping and quoting are delegated to the `csv` crate; callers only
/// supply cell values in column order.
pub struct CsvRowWriter {
    inner: csv::Writer<Vec<u8>>,
}

impl CsvRowWriter {
    pub fn new(config: &CsvWriterConfig) -> Self {
        let mut buffer = Vec::new();
        if config.bom {
            buffer.extend_from_slice(b"\xEF\xBB\xBF");
        }
        let inner = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .quote(config.quote)
            .from_writer(buffer);
        Self { inner }
    }

    pub fn write_row<I, S>(&mut self, row: I) -> ExportResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.inner.write_record(row)?;
        Ok(())
    }

    /// Flush and return the finished CSV body.
    pub fn finish(self) -> ExportResult<Vec<u8>> {
        self.inner
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}
