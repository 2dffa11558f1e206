//! Permission-gated CSV export action for admin interfaces.
//!
//! The crate is integration glue between a host framework's permission
//! system, its model/field introspection, and RFC 4180 CSV serialization.
//! It exposes one reusable admin action: export the selected records of a
//! model as a `text/csv` download.
//!
//! ```
//! use std::sync::Arc;
//! use admin_csv_exports::{
//!     install_csv_exports, AdminSite, AuthContext, BasicModelAdmin, ExportConfig,
//!     FieldDescriptor, ModelMeta, Record,
//! };
//! use serde_json::json;
//! use uuid::Uuid;
//!
//! let config = ExportConfig::default();
//! let mut site = AdminSite::new();
//! let key = site.register(Arc::new(BasicModelAdmin::new(ModelMeta::new(
//!     "crm",
//!     "Contact",
//!     vec![FieldDescriptor::new("id"), FieldDescriptor::new("name")],
//! ))));
//! install_csv_exports(&mut site, &config);
//!
//! let ctx = AuthContext::new(Uuid::new_v4());
//! let records = vec![json!({"id": 1, "name": "Ann"})];
//! let admin = site.admin(&key).unwrap().clone();
//! let actions = site.available_actions(&key, &config, &ctx);
//! let mut iter = records.iter().map(|r| r as &dyn Record);
//! let resp = actions[0].run(&config, &ctx, admin.as_ref(), &mut iter).unwrap();
//! assert_eq!(resp.body_text(), "id,name\n1,Ann\n");
//! ```

// Public modules
pub mod auth;
pub mod config;
pub mod errors;
pub mod export;
pub mod model;
pub mod registry;

pub use auth::AuthContext;
pub use config::ExportConfig;
pub use errors::{ExportError, ExportResult, ServiceError, ServiceResult};
pub use export::{
    has_csv_permission, CsvExportService, CsvRowWriter, CsvWriterConfig, ExportResponse,
    ExportService, ResponseStatus,
};
pub use model::{BasicModelAdmin, FieldDescriptor, ModelAdmin, ModelMeta, Record};
pub use registry::{
    export_as_csv_action, install_csv_exports, AdminAction, AdminSite, EXPORT_AS_CSV,
};
