use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which reference collections are reloaded alongside the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Every collection referenced by any schema in the registry.
    #[default]
    All,
    /// Only the collections the active schema's selectRef fields point at.
    ActiveSchema,
}

impl fmt::Display for ReferencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferencePolicy::All => "all",
            ReferencePolicy::ActiveSchema => "active",
        })
    }
}

impl FromStr for ReferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ReferencePolicy::All),
            "active" | "active_schema" => Ok(ReferencePolicy::ActiveSchema),
            other => Err(format!("unknown reference policy: {other}")),
        }
    }
}

/// Session behaviour knobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub references: ReferencePolicy,
}
