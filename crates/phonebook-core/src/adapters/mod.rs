//! Storage adapters for invite persistence.

mod memory;
mod store;

pub use memory::MemoryInviteStore;
pub use store::InviteStore;

#[cfg(feature = "sqlx-postgres")]
pub use store::SqlxInviteStore;
