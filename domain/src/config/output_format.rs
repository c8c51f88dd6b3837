//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for advice runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every advisor's answer followed by the summary
    Full,
    /// Only the summary (default)
    #[default]
    Summary,
    /// JSON output
    Json,
}
