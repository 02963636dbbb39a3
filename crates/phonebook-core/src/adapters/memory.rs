use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{InviteError, InviteResult, StoreError};
use crate::types::Invite;

use super::InviteStore;

/// In-memory invite store for tests and development.
///
/// Enforces the same code-uniqueness constraint a relational backend
/// would, so issuance code paths behave identically against it.
#[derive(Debug, Default)]
pub struct MemoryInviteStore {
    invites: Mutex<HashMap<String, Invite>>,
}

impl MemoryInviteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Invite>> {
        self.invites.lock().unwrap()
    }
}

#[async_trait]
impl InviteStore for MemoryInviteStore {
    async fn insert_invite(&self, invite: Invite) -> InviteResult<Invite> {
        let mut invites = self.lock();

        if invites.values().any(|i| i.code == invite.code) {
            return Err(InviteError::Store(StoreError::Constraint(format!(
                "duplicate invite code: {}",
                invite.code
            ))));
        }

        invites.insert(invite.id.clone(), invite.clone());
        Ok(invite)
    }

    async fn get_invite_by_code(&self, code: &str) -> InviteResult<Option<Invite>> {
        let invites = self.lock();
        Ok(invites.values().find(|i| i.code == code).cloned())
    }

    async fn code_exists(&self, code: &str) -> InviteResult<bool> {
        let invites = self.lock();
        Ok(invites.values().any(|i| i.code == code))
    }

    async fn count_invites(&self) -> InviteResult<usize> {
        Ok(self.lock().len())
    }

    async fn list_invites_by_inviter(&self, inviter: &str) -> InviteResult<Vec<Invite>> {
        let invites = self.lock();
        let mut matching: Vec<Invite> = invites
            .values()
            .filter(|i| i.inviter == inviter)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(matching)
    }

    async fn mark_redeemed(&self, code: &str, at: DateTime<Utc>) -> InviteResult<Invite> {
        let mut invites = self.lock();

        let invite = invites
            .values_mut()
            .find(|i| i.code == code)
            .ok_or(InviteError::NotFound)?;

        if invite.redeemed.is_some() {
            return Err(InviteError::conflict("Invite already redeemed"));
        }

        invite.redeemed = Some(at);
        Ok(invite.clone())
    }

    async fn delete_invite(&self, id: &str) -> InviteResult<()> {
        self.lock().remove(id);
        Ok(())
    }
}
