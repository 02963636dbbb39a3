//! # Phonebook Badges
//!
//! Client for the Open Badges "Displayer" API: resolves a profile's email
//! to a remote user id, walks the user's group list and deserializes the
//! badges of the configured group into typed value objects.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-export commonly used items
pub use client::DisplayerClient;
pub use config::{DisplayerConfig, GroupSelector};
pub use error::{BadgesError, BadgesResult};
pub use transport::{DisplayerTransport, HttpTransport, TransportResponse};
pub use types::{Badge, BadgeAssertion, BadgeDescriptor, BadgeIssuer, GroupEntry};
