use crate::auth::AuthContext;
use crate::errors::ExportResult;

use super::meta::ModelMeta;
use super::record::Record;

/// Admin binding for one model: metadata plus the integrator's overrides.
pub trait ModelAdmin {
    fn meta(&self) -> &ModelMeta;

    /// Explicit export column override, used verbatim in order. `None`
    /// selects all model fields lexicographically.
    fn csv_fields(&self) -> Option<Vec<String>> {
        None
    }

    /// Optional custom permission hook. `None` means no hook is installed,
    /// which allows the export by default. An installed hook's answer is
    /// final for its branch of the resolution order.
    fn csv_permission(&self, _ctx: &AuthContext) -> Option<bool> {
        None
    }

    /// Resolve one cell value. Override to install per-field formatting;
    /// the default delegates to the record itself.
    fn lookup_field(&self, record: &dyn Record, field: &str) -> ExportResult<String> {
        record.display_value(field)
    }
}

/// Minimal admin binding for hosts that only need the defaults, with an
/// optional column override.
#[derive(Debug, Clone)]
pub struct BasicModelAdmin {
    meta: ModelMeta,
    csv_fields: Option<Vec<String>>,
}

impl BasicModelAdmin {
    pub fn new(meta: ModelMeta) -> Self {
        Self {
            meta,
            csv_fields: None,
        }
    }

    pub fn with_csv_fields(mut self, fields: Vec<String>) -> Self {
        self.csv_fields = Some(fields);
        self
    }
}

impl ModelAdmin for BasicModelAdmin {
    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    fn csv_fields(&self) -> Option<Vec<String>> {
        self.csv_fields.clone()
    }
}
