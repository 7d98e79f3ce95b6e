//! Cache/sync resource addressing.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of remotely fetched resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    WeekInfo,
    Specialties,
    Groups,
    Schedule,
    Replacements,
    ContentVersion,
    News,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeekInfo => "week_info",
            Self::Specialties => "specialties",
            Self::Groups => "groups",
            Self::Schedule => "schedule",
            Self::Replacements => "replacements",
            Self::ContentVersion => "content_version",
            Self::News => "news",
        }
    }

    /// Promotional payloads use the short freshness window.
    pub fn is_promotional(self) -> bool {
        matches!(self, Self::News | Self::ContentVersion)
    }
}

/// `(kind, scope)` pair identifying one cache record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    kind: ResourceKind,
    scope: Option<String>,
}

impl ResourceKey {
    /// Key for a resource that has a single instance.
    pub fn global(kind: ResourceKind) -> Self {
        Self { kind, scope: None }
    }

    /// Key for a resource scoped to a group or specialty id.
    pub fn scoped(kind: ResourceKind, scope: impl Into<String>) -> Self {
        Self {
            kind,
            scope: Some(scope.into()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Stable string used as the storage primary key.
    pub fn storage_key(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}:{scope}", self.kind.as_str()),
            None => self.kind.as_str().to_string(),
        }
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::{ResourceKey, ResourceKind};

    #[test]
    fn storage_key_includes_scope_when_present() {
        assert_eq!(
            ResourceKey::scoped(ResourceKind::Schedule, "Э-2-23").storage_key(),
            "schedule:Э-2-23"
        );
        assert_eq!(
            ResourceKey::global(ResourceKind::Specialties).storage_key(),
            "specialties"
        );
    }
}
