//! Core runtime configuration.
//!
//! # Responsibility
//! - Collect tunable time windows and behavior modes in one serde shape.
//! - Provide defaults that match shipped app behavior.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.

use crate::model::identity::IdentityScheme;
use crate::model::rating::LedgerMode;
use crate::sync::resource::ResourceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_GENERAL_FRESHNESS_SECS: u64 = 24 * 60 * 60;
const DEFAULT_PROMOTIONAL_FRESHNESS_SECS: u64 = 60 * 60;
const DEFAULT_VOTING_REFRESH_SECS: u64 = 60;
const DEFAULT_CONTENT_CHECK_SECS: u64 = 300;

/// Tunables for cache freshness, periodic checks and ledger behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Freshness window for schedule, replacements and reference lists.
    pub general_freshness_secs: u64,
    /// Freshness window for promotional/news payloads.
    pub promotional_freshness_secs: u64,
    /// Display refresh period for the voting window status.
    pub voting_refresh_secs: u64,
    /// Period of the content version check.
    pub content_check_secs: u64,
    pub identity_scheme: IdentityScheme,
    pub ledger_mode: LedgerMode,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            general_freshness_secs: DEFAULT_GENERAL_FRESHNESS_SECS,
            promotional_freshness_secs: DEFAULT_PROMOTIONAL_FRESHNESS_SECS,
            voting_refresh_secs: DEFAULT_VOTING_REFRESH_SECS,
            content_check_secs: DEFAULT_CONTENT_CHECK_SECS,
            identity_scheme: IdentityScheme::default(),
            ledger_mode: LedgerMode::default(),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config, filling missing fields with defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn general_freshness(&self) -> Duration {
        Duration::from_secs(self.general_freshness_secs)
    }

    pub fn promotional_freshness(&self) -> Duration {
        Duration::from_secs(self.promotional_freshness_secs)
    }

    /// Freshness window applied to one resource kind.
    pub fn freshness_for(&self, kind: ResourceKind) -> Duration {
        if kind.is_promotional() {
            self.promotional_freshness()
        } else {
            self.general_freshness()
        }
    }

    pub fn voting_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.voting_refresh_secs)
    }

    pub fn content_check_interval(&self) -> Duration {
        Duration::from_secs(self.content_check_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::CoreConfig;
    use crate::model::identity::IdentityScheme;
    use crate::model::rating::LedgerMode;
    use crate::sync::resource::ResourceKind;
    use std::time::Duration;

    #[test]
    fn empty_json_yields_defaults() {
        let config = CoreConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.general_freshness(), Duration::from_secs(86_400));
        assert_eq!(config.promotional_freshness(), Duration::from_secs(3_600));
        assert_eq!(config.identity_scheme, IdentityScheme::V2);
        assert_eq!(config.ledger_mode, LedgerMode::Idempotent);
        assert_eq!(
            config.freshness_for(ResourceKind::News),
            Duration::from_secs(3_600)
        );
        assert_eq!(
            config.freshness_for(ResourceKind::Schedule),
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let config = CoreConfig::from_json(
            r#"{"voting_refresh_secs": 5, "ledger_mode": "accumulating", "identity_scheme": "legacy"}"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.voting_refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.content_check_interval(), Duration::from_secs(300));
        assert_eq!(config.ledger_mode, LedgerMode::Accumulating);
        assert_eq!(config.identity_scheme, IdentityScheme::Legacy);
    }
}
