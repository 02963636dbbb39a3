use std::time::Duration;

use crate::error::BadgesError;
use crate::types::GroupEntry;

/// Which remote badge group feeds the profile badge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSelector {
    /// Match the group by its display name.
    ByName(String),
    /// Match the group by its numeric id.
    ById(u64),
}

impl GroupSelector {
    pub fn matches(&self, group: &GroupEntry) -> bool {
        match self {
            GroupSelector::ByName(name) => group.name == *name,
            GroupSelector::ById(id) => group.group_id == *id,
        }
    }
}

/// Configuration for the Displayer API client.
#[derive(Debug, Clone)]
pub struct DisplayerConfig {
    /// Base URL of the Displayer service
    pub base_url: String,

    /// The group whose badges are shown on profiles
    pub badge_group: GroupSelector,

    /// Per-request timeout for all Displayer calls
    pub timeout: Duration,
}

impl Default for DisplayerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://backpack.openbadges.org".to_string(),
            badge_group: GroupSelector::ByName("mozillians.org".to_string()),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DisplayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn badge_group(mut self, selector: GroupSelector) -> Self {
        self.badge_group = selector;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), BadgesError> {
        if self.base_url.is_empty() {
            return Err(BadgesError::config("Displayer base URL cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(BadgesError::config("Displayer timeout must be non-zero"));
        }

        if let GroupSelector::ByName(name) = &self.badge_group {
            if name.is_empty() {
                return Err(BadgesError::config("Badge group name cannot be empty"));
            }
        }

        Ok(())
    }
}
