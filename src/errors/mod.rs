mod error;

pub use error::{ExportError, ServiceError};

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
