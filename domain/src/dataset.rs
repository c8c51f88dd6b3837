//! Labeled datasets replayed during evaluation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One labeled example (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetItem {
    pub id: String,
    pub input: Value,
}

impl DatasetItem {
    pub fn new(id: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            input,
        }
    }

    /// The input, if it is text. Items with other inputs are not replayed.
    pub fn text_input(&self) -> Option<&str> {
        self.input.as_str()
    }
}

/// A named dataset with its items in store order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub items: Vec<DatasetItem>,
}
