pub mod service;
pub mod types;
pub mod writer;

pub use service::{has_csv_permission, CsvExportService, ExportService};
pub use types::{ExportResponse, ResponseStatus};
pub use writer::{CsvRowWriter, CsvWriterConfig};
