use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream `/coins/{id}` response, trimmed of market/community data by the
/// request parameters and otherwise passed through as sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetDetail(Map<String, Value>);

impl AssetDetail {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// English description, when the upstream supplies one.
    pub fn description(&self) -> Option<&str> {
        self.0
            .get("description")
            .and_then(|d| d.get("en"))
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
    }
}
