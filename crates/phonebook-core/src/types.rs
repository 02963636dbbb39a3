use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A pending invitation to register, identified by its unique code.
///
/// The code is assigned exactly once, immediately before the row is first
/// persisted, and never changes afterwards. The redeemed timestamp is set
/// by the redeem path when the invited party completes registration; rows
/// are never deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx-postgres", derive(sqlx::FromRow))]
pub struct Invite {
    pub id: String,
    /// Opaque uid of the inviting user.
    pub inviter: String,
    /// Email address the invitation was sent to.
    pub destination: String,
    pub code: String,
    pub redeemed: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
}

impl Invite {
    pub fn is_redeemed(&self) -> bool {
        self.redeemed.is_some()
    }

    /// Absolute registration URL carrying this invite's code,
    /// e.g. `https://directory.example.org/register?code=a1B2c`.
    pub fn register_url(&self, base_url: &str) -> String {
        format!("{}/register?code={}", base_url.trim_end_matches('/'), self.code)
    }
}

/// Invite creation data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvite {
    #[validate(length(min = 1, max = 32))]
    pub inviter: String,
    #[validate(email)]
    pub destination: String,
}

impl CreateInvite {
    pub fn new(inviter: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            inviter: inviter.into(),
            destination: destination.into(),
        }
    }
}

/// Minimal view of a directory profile, as consumed by the badges pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            full_name: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}
