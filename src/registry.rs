use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;

use crate::auth::AuthContext;
use crate::config::ExportConfig;
use crate::errors::{ServiceError, ServiceResult};
use crate::export::service::{has_csv_permission, CsvExportService, ExportService};
use crate::export::types::ExportResponse;
use crate::model::{ModelAdmin, Record};

pub const EXPORT_AS_CSV: &str = "export_as_csv";

pub type ActionHandler = for<'a> fn(
    &ExportConfig,
    &AuthContext,
    &dyn ModelAdmin,
    &mut dyn Iterator<Item = &'a dyn Record>,
) -> ServiceResult<ExportResponse>;

/// A named admin action operating on the selected records of one model.
#[derive(Debug, Clone)]
pub struct AdminAction {
    pub name: &'static str,
    /// Human-readable label shown in the admin action dropdown
    pub short_description: &'static str,
    handler: ActionHandler,
}

impl AdminAction {
    pub fn new(
        name: &'static str,
        short_description: &'static str,
        handler: ActionHandler,
    ) -> Self {
        Self {
            name,
            short_description,
            handler,
        }
    }

    pub fn run<'a>(
        &self,
        config: &ExportConfig,
        ctx: &AuthContext,
        admin: &dyn ModelAdmin,
        records: &mut dyn Iterator<Item = &'a dyn Record>,
    ) -> ServiceResult<ExportResponse> {
        (self.handler)(config, ctx, admin, records)
    }
}

fn export_as_csv_handler<'a>(
    config: &ExportConfig,
    ctx: &AuthContext,
    admin: &dyn ModelAdmin,
    records: &mut dyn Iterator<Item = &'a dyn Record>,
) -> ServiceResult<ExportResponse> {
    CsvExportService::new().export_as_csv(config, ctx, admin, records)
}

/// The reusable export action.
pub fn export_as_csv_action() -> AdminAction {
    AdminAction::new(
        EXPORT_AS_CSV,
        "Export selected objects as csv file",
        export_as_csv_handler,
    )
}

struct AdminEntry {
    admin: Arc<dyn ModelAdmin>,
    actions: Vec<AdminAction>,
}

/// Registry of model admin bindings and their actions.
///
/// Site-wide actions apply to every registered model; per-model actions
/// are attached to one entry. Listing is deterministic (sorted by model
/// label).
#[derive(Default)]
pub struct AdminSite {
    entries: BTreeMap<String, AdminEntry>,
    site_actions: Vec<AdminAction>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model admin binding. Returns its registry key
    /// (`"app.Model"`).
    pub fn register(&mut self, admin: Arc<dyn ModelAdmin>) -> String {
        let key = admin.meta().label();
        info!("registered model admin {}", key);
        self.entries.insert(
            key.clone(),
            AdminEntry {
                admin,
                actions: Vec::new(),
            },
        );
        key
    }

    /// Attach an action to every registered model.
    pub fn add_action(&mut self, action: AdminAction) {
        self.site_actions.push(action);
    }

    /// Attach an action to one model's entry.
    pub fn add_model_action(&mut self, model: &str, action: AdminAction) -> ServiceResult<()> {
        match self.entries.get_mut(model) {
            Some(entry) => {
                entry.actions.push(action);
                Ok(())
            }
            None => Err(ServiceError::Configuration(format!(
                "model {} is not registered",
                model
            ))),
        }
    }

    pub fn admin(&self, model: &str) -> Option<&Arc<dyn ModelAdmin>> {
        self.entries.get(model).map(|entry| &entry.admin)
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Actions the given actor may use on `model`. Recomputes the export
    /// permission so a denied action is never listed.
    pub fn available_actions(
        &self,
        model: &str,
        config: &ExportConfig,
        ctx: &AuthContext,
    ) -> Vec<&AdminAction> {
        let entry = match self.entries.get(model) {
            Some(entry) => entry,
            None => return Vec::new(),
        };
        self.site_actions
            .iter()
            .chain(entry.actions.iter())
            .filter(|action| {
                action.name != EXPORT_AS_CSV
                    || has_csv_permission(config, entry.admin.as_ref(), ctx)
            })
            .collect()
    }
}

/// Explicit startup-time installation of the export action for every
/// model on the site, gated by `config.global_exports_enabled`.
pub fn install_csv_exports(site: &mut AdminSite, config: &ExportConfig) {
    if !config.global_exports_enabled {
        info!("global csv exports disabled; not installing action");
        return;
    }
    site.add_action(export_as_csv_action());
    info!("installed {} action site-wide", EXPORT_AS_CSV);
}
