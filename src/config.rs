use serde::{Deserialize, Serialize};

/// Startup-time configuration for the export action.
///
/// Passed explicitly by the host at registration and per call; never read
/// from ambient process state, so initialization order stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// When set, exports require the generated `csv_<model>` permission
    /// code and the custom hook is not consulted.
    #[serde(default)]
    pub require_permission: bool,

    /// Attach the export action to every registered model when the host
    /// calls [`install_csv_exports`](crate::registry::install_csv_exports).
    #[serde(default = "default_true")]
    pub global_exports_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            require_permission: false,
            global_exports_enabled: true,
        }
    }
}
