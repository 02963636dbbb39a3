//! # Phonebook Core
//!
//! Invite issuance for the community directory: domain types,
//! configuration, error handling and storage adapters. Badge retrieval
//! lives in the companion `phonebook-badges` crate.

pub mod adapters;
pub mod config;
pub mod error;
pub mod invites;
pub mod types;

// Re-export commonly used items
pub use adapters::{InviteStore, MemoryInviteStore};
pub use config::{InviteConfig, PhonebookConfig};
pub use error::{InviteError, InviteResult, StoreError};
pub use invites::InviteIssuer;
pub use types::{CreateInvite, Invite, UserProfile};

#[cfg(feature = "sqlx-postgres")]
pub use adapters::SqlxInviteStore;
