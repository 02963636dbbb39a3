//! Invite issuance.
//!
//! Code assignment is an explicit step on the issuance path rather than a
//! persistence-layer hook: [`InviteIssuer::issue`] validates the request,
//! assigns a verified-unique code via [`InviteIssuer::assign_code_if_absent`]
//! and only then hands the row to the store.

use std::sync::Arc;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use uuid::Uuid;
use validator::Validate;

use crate::adapters::InviteStore;
use crate::config::PhonebookConfig;
use crate::error::{InviteError, InviteResult};
use crate::types::{CreateInvite, Invite};

/// Issues invites with unique registration codes.
pub struct InviteIssuer<S: InviteStore> {
    config: Arc<PhonebookConfig>,
    store: Arc<S>,
}

impl<S: InviteStore> InviteIssuer<S> {
    pub fn new(config: Arc<PhonebookConfig>, store: Arc<S>) -> Self {
        Self { config, store }
    }

    /// Validate `create`, assign a unique code and persist the invite.
    pub async fn issue(&self, create: CreateInvite) -> InviteResult<Invite> {
        create.validate()?;

        let mut invite = Invite {
            id: Uuid::new_v4().to_string(),
            inviter: create.inviter,
            destination: create.destination,
            code: String::new(),
            redeemed: None,
            created: Utc::now(),
        };

        self.assign_code_if_absent(&mut invite).await?;

        let invite = self.store.insert_invite(invite).await?;
        tracing::debug!(code = %invite.code, destination = %invite.destination, "issued invite");

        Ok(invite)
    }

    /// Assign a random code to `invite` unless one is already set.
    ///
    /// An existing code is never overwritten. Otherwise up to
    /// `max_attempts` candidates are drawn; a candidate is assigned only
    /// after the store confirms no other invite holds it. Exhausting the
    /// budget fails with [`InviteError::CodeSpaceExhausted`] and leaves
    /// the invite untouched.
    pub async fn assign_code_if_absent(&self, invite: &mut Invite) -> InviteResult<()> {
        if !invite.code.is_empty() {
            return Ok(());
        }

        let max_attempts = self.config.invites.max_attempts;
        for _ in 0..max_attempts {
            let candidate = random_code(self.config.invites.code_length);
            if self.store.code_exists(&candidate).await? {
                continue;
            }
            invite.code = candidate;
            return Ok(());
        }

        tracing::warn!(
            attempts = max_attempts,
            code_length = self.config.invites.code_length,
            "could not find a free invite code"
        );
        Err(InviteError::CodeSpaceExhausted {
            attempts: max_attempts,
        })
    }

    /// Mark the invite matching `code` as redeemed now.
    pub async fn redeem(&self, code: &str) -> InviteResult<Invite> {
        let invite = self.store.mark_redeemed(code, Utc::now()).await?;
        tracing::debug!(code = %invite.code, "invite redeemed");
        Ok(invite)
    }

    /// Absolute registration URL for an issued invite.
    pub fn register_url(&self, invite: &Invite) -> String {
        invite.register_url(&self.config.base_url)
    }
}

fn random_code(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
