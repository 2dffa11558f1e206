use log::debug;

use crate::auth::AuthContext;
use crate::config::ExportConfig;
use crate::errors::ServiceResult;
use crate::model::{ModelAdmin, Record};

use super::types::ExportResponse;
use super::writer::{CsvRowWriter, CsvWriterConfig};

/// Resolve whether `ctx` may export the model bound to `admin`.
///
/// Order, first match wins: the generated `<app>.csv_<model>` code when
/// the config requires formal permissions, then the admin's optional hook,
/// then allow. Shared by the export path and the action listing so both
/// always agree.
pub fn has_csv_permission(
    config: &ExportConfig,
    admin: &dyn ModelAdmin,
    ctx: &AuthContext,
) -> bool {
    if config.require_permission {
        return ctx.has_perm(&admin.meta().full_permission_code());
    }
    admin.csv_permission(ctx).unwrap_or(true)
}

/// Produces CSV export responses for admin-selected records.
pub trait ExportService {
    /// Export `records` as a CSV download, or a 403 response when the
    /// actor is not permitted. Records are consumed one at a time;
    /// field-lookup and serialization failures propagate.
    fn export_as_csv<'a>(
        &self,
        config: &ExportConfig,
        ctx: &AuthContext,
        admin: &dyn ModelAdmin,
        records: &mut dyn Iterator<Item = &'a dyn Record>,
    ) -> ServiceResult<ExportResponse>;
}

/// Default implementation writing through the `csv` crate.
pub struct CsvExportService {
    writer_config: CsvWriterConfig,
}

impl CsvExportService {
    pub fn new() -> Self {
        Self {
            writer_config: CsvWriterConfig::default(),
        }
    }

    pub fn with_writer_config(writer_config: CsvWriterConfig) -> Self {
        Self { writer_config }
    }
}

impl Default for CsvExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportService for CsvExportService {
    fn export_as_csv<'a>(
        &self,
        config: &ExportConfig,
        ctx: &AuthContext,
        admin: &dyn ModelAdmin,
        records: &mut dyn Iterator<Item = &'a dyn Record>,
    ) -> ServiceResult<ExportResponse> {
        let meta = admin.meta();

        if !has_csv_permission(config, admin, ctx) {
            debug!(
                "csv export of {} denied for user {}",
                meta.label(),
                ctx.user_id
            );
            return Ok(ExportResponse::forbidden());
        }

        let field_names = match admin.csv_fields() {
            Some(fields) => fields,
            None => meta.sorted_field_names(),
        };

        let mut writer = CsvRowWriter::new(&self.writer_config);
        writer.write_row(&field_names)?;

        let mut row = Vec::with_capacity(field_names.len());
        let mut written = 0usize;
        for record in records {
            row.clear();
            for field in &field_names {
                row.push(admin.lookup_field(record, field)?);
            }
            writer.write_row(&row)?;
            written += 1;
        }

        let body = writer.finish()?;
        debug!(
            "exported {} rows of {} ({} bytes)",
            written,
            meta.label(),
            body.len()
        );
        Ok(ExportResponse::csv_attachment(&meta.export_filename(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ExportResult, ServiceError};
    use crate::model::{BasicModelAdmin, FieldDescriptor, ModelMeta};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn contact_meta() -> ModelMeta {
        ModelMeta::new(
            "crm",
            "Contact",
            vec![
                FieldDescriptor::new("id"),
                FieldDescriptor::new("name"),
                FieldDescriptor::new("email"),
            ],
        )
    }

    fn contacts() -> Vec<serde_json::Value> {
        vec![
            json!({"id": 1, "name": "Ann", "email": "a@x.com"}),
            json!({"id": 2, "name": "Bob", "email": "b@x.com"}),
        ]
    }

    fn run_export(
        config: &ExportConfig,
        ctx: &AuthContext,
        admin: &dyn ModelAdmin,
        records: &[serde_json::Value],
    ) -> ServiceResult<ExportResponse> {
        let mut iter = records.iter().map(|r| r as &dyn Record);
        CsvExportService::new().export_as_csv(config, ctx, admin, &mut iter)
    }

    #[test]
    fn test_default_fields_sorted_alphabetically() {
        let admin = BasicModelAdmin::new(contact_meta());
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &contacts()).unwrap();

        assert_eq!(resp.status.as_u16(), 200);
        assert_eq!(
            resp.body_text(),
            "email,id,name\na@x.com,1,Ann\nb@x.com,2,Bob\n"
        );
    }

    #[test]
    fn test_csv_fields_override_is_verbatim() {
        let admin = BasicModelAdmin::new(contact_meta())
            .with_csv_fields(vec!["name".to_string(), "id".to_string()]);
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &contacts()).unwrap();

        assert_eq!(resp.body_text(), "name,id\nAnn,1\nBob,2\n");
    }

    #[test]
    fn test_row_count_matches_records_plus_header() {
        let admin = BasicModelAdmin::new(contact_meta());
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &contacts()).unwrap();

        assert_eq!(resp.body_text().lines().count(), contacts().len() + 1);
    }

    #[test]
    fn test_response_headers() {
        let admin = BasicModelAdmin::new(contact_meta());
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &contacts()).unwrap();

        assert_eq!(resp.content_type, mime::TEXT_CSV);
        assert_eq!(
            resp.content_disposition.as_deref(),
            Some("attachment; filename=crm_contact.csv")
        );
    }

    #[test]
    fn test_require_permission_denies_without_code() {
        let admin = BasicModelAdmin::new(contact_meta());
        let ctx = AuthContext::new(Uuid::new_v4());
        let config = ExportConfig {
            require_permission: true,
            ..ExportConfig::default()
        };
        let resp = run_export(&config, &ctx, &admin, &contacts()).unwrap();

        assert!(resp.is_forbidden());
        assert!(resp.body.is_empty());
    }

    #[test]
    fn test_require_permission_allows_with_code() {
        let admin = BasicModelAdmin::new(contact_meta());
        let ctx = AuthContext::new(Uuid::new_v4()).with_perm("crm.csv_contact");
        let config = ExportConfig {
            require_permission: true,
            ..ExportConfig::default()
        };
        let resp = run_export(&config, &ctx, &admin, &contacts()).unwrap();

        assert_eq!(resp.status.as_u16(), 200);
    }

    struct HookAdmin {
        meta: ModelMeta,
        answer: Option<bool>,
    }

    impl ModelAdmin for HookAdmin {
        fn meta(&self) -> &ModelMeta {
            &self.meta
        }

        fn csv_permission(&self, _ctx: &AuthContext) -> Option<bool> {
            self.answer
        }
    }

    #[test]
    fn test_hook_answer_is_used() {
        let ctx = AuthContext::new(Uuid::new_v4());
        let config = ExportConfig::default();

        let denying = HookAdmin {
            meta: contact_meta(),
            answer: Some(false),
        };
        assert!(run_export(&config, &ctx, &denying, &contacts())
            .unwrap()
            .is_forbidden());

        let allowing = HookAdmin {
            meta: contact_meta(),
            answer: Some(true),
        };
        assert_eq!(
            run_export(&config, &ctx, &allowing, &contacts())
                .unwrap()
                .status
                .as_u16(),
            200
        );
    }

    #[test]
    fn test_absent_hook_defaults_to_allow() {
        let ctx = AuthContext::new(Uuid::new_v4());
        let absent = HookAdmin {
            meta: contact_meta(),
            answer: None,
        };
        let resp = run_export(&ExportConfig::default(), &ctx, &absent, &contacts()).unwrap();
        assert_eq!(resp.status.as_u16(), 200);
    }

    #[test]
    fn test_formal_check_ignores_hook() {
        // With require_permission set, the hook is never consulted.
        let ctx = AuthContext::new(Uuid::new_v4()).with_perm("crm.csv_contact");
        let config = ExportConfig {
            require_permission: true,
            ..ExportConfig::default()
        };
        let denying = HookAdmin {
            meta: contact_meta(),
            answer: Some(false),
        };
        let resp = run_export(&config, &ctx, &denying, &contacts()).unwrap();
        assert_eq!(resp.status.as_u16(), 200);
    }

    #[test]
    fn test_unknown_override_field_propagates() {
        let admin =
            BasicModelAdmin::new(contact_meta()).with_csv_fields(vec!["nope".to_string()]);
        let ctx = AuthContext::new(Uuid::new_v4());
        let err = run_export(&ExportConfig::default(), &ctx, &admin, &contacts()).unwrap_err();
        assert!(matches!(err, ServiceError::Export(_)));
    }

    #[test]
    fn test_values_needing_escaping_round_trip() {
        let admin = BasicModelAdmin::new(ModelMeta::new(
            "crm",
            "Note",
            vec![FieldDescriptor::new("body"), FieldDescriptor::new("title")],
        ));
        let records = vec![
            json!({"title": "plain", "body": "a,b and \"quotes\""}),
            json!({"title": "multi", "body": "line\nbreak"}),
        ];
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &records).unwrap();

        // Read the body back with a standard CSV reader and compare
        // against direct field lookup.
        let mut reader = csv::Reader::from_reader(resp.body.as_slice());
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["body", "title"]
        );
        for (row, record) in reader.records().zip(records.iter()) {
            let row = row.unwrap();
            assert_eq!(row.get(0).unwrap(), record.display_value("body").unwrap());
            assert_eq!(row.get(1).unwrap(), record.display_value("title").unwrap());
        }
    }

    #[test]
    fn test_custom_lookup_formatting() {
        struct UpperAdmin {
            meta: ModelMeta,
        }

        impl ModelAdmin for UpperAdmin {
            fn meta(&self) -> &ModelMeta {
                &self.meta
            }

            fn lookup_field(&self, record: &dyn Record, field: &str) -> ExportResult<String> {
                let value = record.display_value(field)?;
                if field == "name" {
                    Ok(value.to_uppercase())
                } else {
                    Ok(value)
                }
            }
        }

        let admin = UpperAdmin {
            meta: contact_meta(),
        };
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &contacts()).unwrap();
        assert_eq!(
            resp.body_text(),
            "email,id,name\na@x.com,1,ANN\nb@x.com,2,BOB\n"
        );
    }

    #[test]
    fn test_empty_record_set_yields_header_only() {
        let admin = BasicModelAdmin::new(contact_meta());
        let ctx = AuthContext::new(Uuid::new_v4());
        let resp = run_export(&ExportConfig::default(), &ctx, &admin, &[]).unwrap();
        assert_eq!(resp.body_text(), "email,id,name\n");
    }
}
