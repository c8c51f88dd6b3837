//! Trace naming from TOML (`[trace]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTraceConfig {
    /// Root trace name for every advice run
    pub name: String,
}

impl Default for FileTraceConfig {
    fn default() -> Self {
        Self {
            name: "management_agent".to_string(),
        }
    }
}
