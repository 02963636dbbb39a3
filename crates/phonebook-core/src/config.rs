use crate::error::InviteError;

/// Main configuration for the directory core.
#[derive(Debug, Clone)]
pub struct PhonebookConfig {
    /// Base URL of the directory, used to build absolute registration links
    pub base_url: String,

    /// Invite issuance configuration
    pub invites: InviteConfig,
}

/// Invite-code generation configuration.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    /// Length of generated invite codes
    pub code_length: usize,

    /// How many random candidates to try before giving up
    pub max_attempts: u32,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            invites: InviteConfig::default(),
        }
    }
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            code_length: 5,
            max_attempts: 10,
        }
    }
}

impl PhonebookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn code_length(mut self, length: usize) -> Self {
        self.invites.code_length = length;
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.invites.max_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<(), InviteError> {
        if self.base_url.is_empty() {
            return Err(InviteError::config("Base URL cannot be empty"));
        }

        if self.invites.code_length == 0 {
            return Err(InviteError::config("Invite code length must be at least 1"));
        }

        if self.invites.max_attempts == 0 {
            return Err(InviteError::config(
                "Invite code generation needs at least one attempt",
            ));
        }

        Ok(())
    }
}
