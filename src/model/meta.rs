use serde::{Deserialize, Serialize};

/// A single exportable field on a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub verbose_name: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbose_name: None,
        }
    }

    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }
}

/// Introspected model metadata supplied by the host data layer.
///
/// Derives everything the export action needs from the model's naming:
/// the generated permission code, the download filename, and the default
/// (alphabetical) column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Application namespace the model lives in, e.g. `"crm"`
    pub app_label: String,
    /// Model class name, e.g. `"Contact"`
    pub object_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelMeta {
    pub fn new(
        app_label: impl Into<String>,
        object_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            app_label: app_label.into(),
            object_name: object_name.into(),
            fields,
        }
    }

    /// Qualified `"app.Model"` label used as the registry key.
    pub fn label(&self) -> String {
        format!("{}.{}", self.app_label, self.object_name)
    }

    /// Generated codename for the export permission: `csv_<model>`.
    pub fn permission_codename(&self) -> String {
        format!("csv_{}", self.object_name.to_lowercase())
    }

    /// Full permission code scoped to the app namespace.
    pub fn full_permission_code(&self) -> String {
        format!("{}.{}", self.app_label, self.permission_codename())
    }

    /// Download filename: `<app_label>_<model_name>.csv`, dots flattened
    /// to underscores.
    pub fn export_filename(&self) -> String {
        let label = format!("{}.{}", self.app_label, self.object_name.to_lowercase());
        format!("{}.csv", label.replace('.', "_"))
    }

    /// All field names, lexicographically sorted. The default export
    /// column set when no override is configured.
    pub fn sorted_field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fields.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_meta() -> ModelMeta {
        ModelMeta::new(
            "crm",
            "Contact",
            vec![
                FieldDescriptor::new("name"),
                FieldDescriptor::new("id"),
                FieldDescriptor::new("email"),
            ],
        )
    }

    #[test]
    fn test_permission_code_generation() {
        let meta = contact_meta();
        assert_eq!(meta.permission_codename(), "csv_contact");
        assert_eq!(meta.full_permission_code(), "crm.csv_contact");
    }

    #[test]
    fn test_export_filename_flattens_dots() {
        let meta = contact_meta();
        assert_eq!(meta.export_filename(), "crm_contact.csv");
    }

    #[test]
    fn test_default_field_names_are_sorted() {
        let meta = contact_meta();
        assert_eq!(meta.sorted_field_names(), vec!["email", "id", "name"]);
    }
}
