use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::InviteResult;
use crate::types::Invite;

/// Storage adapter trait for invite persistence.
///
/// The backing store must enforce a uniqueness constraint on `code`.
/// [`crate::invites::InviteIssuer`] checks candidates with
/// [`code_exists`](InviteStore::code_exists) before inserting.
#[async_trait]
pub trait InviteStore: Send + Sync + 'static {
    async fn insert_invite(&self, invite: Invite) -> InviteResult<Invite>;
    async fn get_invite_by_code(&self, code: &str) -> InviteResult<Option<Invite>>;
    async fn code_exists(&self, code: &str) -> InviteResult<bool>;
    async fn count_invites(&self) -> InviteResult<usize>;
    async fn list_invites_by_inviter(&self, inviter: &str) -> InviteResult<Vec<Invite>>;

    /// Stamp the invite matching `code` as redeemed. Fails with
    /// `NotFound` for an unknown code and `Conflict` for an invite
    /// that was already redeemed.
    async fn mark_redeemed(&self, code: &str, at: DateTime<Utc>) -> InviteResult<Invite>;

    /// Administrative removal. Issuance never deletes invites.
    async fn delete_invite(&self, id: &str) -> InviteResult<()>;
}

#[cfg(feature = "sqlx-postgres")]
pub mod sqlx_store {
    use super::*;
    use crate::error::InviteError;
    use sqlx::PgPool;

    /// PostgreSQL invite store via SQLx.
    ///
    /// Expects an `invite` table with a unique index on `code`:
    ///
    /// ```sql
    /// CREATE TABLE invite (
    ///     id          TEXT PRIMARY KEY,
    ///     inviter     VARCHAR(32) NOT NULL,
    ///     destination TEXT NOT NULL,
    ///     code        TEXT NOT NULL UNIQUE,
    ///     redeemed    TIMESTAMPTZ,
    ///     created     TIMESTAMPTZ NOT NULL
    /// );
    /// ```
    pub struct SqlxInviteStore {
        pool: PgPool,
    }

    impl SqlxInviteStore {
        pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
            let pool = PgPool::connect(database_url).await?;
            Ok(Self { pool })
        }

        pub fn from_pool(pool: PgPool) -> Self {
            Self { pool }
        }

        /// Test database connection
        pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        }

        /// Close the connection pool
        pub async fn close(&self) {
            self.pool.close().await;
        }
    }

    #[async_trait]
    impl InviteStore for SqlxInviteStore {
        async fn insert_invite(&self, invite: Invite) -> InviteResult<Invite> {
            let inserted = sqlx::query_as::<_, Invite>(
                r#"
                INSERT INTO invite (id, inviter, destination, code, redeemed, created)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(&invite.id)
            .bind(&invite.inviter)
            .bind(&invite.destination)
            .bind(&invite.code)
            .bind(&invite.redeemed)
            .bind(&invite.created)
            .fetch_one(&self.pool)
            .await?;

            Ok(inserted)
        }

        async fn get_invite_by_code(&self, code: &str) -> InviteResult<Option<Invite>> {
            let invite = sqlx::query_as::<_, Invite>("SELECT * FROM invite WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

            Ok(invite)
        }

        async fn code_exists(&self, code: &str) -> InviteResult<bool> {
            let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invite WHERE code = $1")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

            Ok(count.0 > 0)
        }

        async fn count_invites(&self) -> InviteResult<usize> {
            let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invite")
                .fetch_one(&self.pool)
                .await?;

            Ok(count.0 as usize)
        }

        async fn list_invites_by_inviter(&self, inviter: &str) -> InviteResult<Vec<Invite>> {
            let invites = sqlx::query_as::<_, Invite>(
                "SELECT * FROM invite WHERE inviter = $1 ORDER BY created DESC",
            )
            .bind(inviter)
            .fetch_all(&self.pool)
            .await?;

            Ok(invites)
        }

        async fn mark_redeemed(&self, code: &str, at: DateTime<Utc>) -> InviteResult<Invite> {
            let updated = sqlx::query_as::<_, Invite>(
                "UPDATE invite SET redeemed = $1 WHERE code = $2 AND redeemed IS NULL RETURNING *",
            )
            .bind(&at)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

            match updated {
                Some(invite) => Ok(invite),
                None => {
                    if self.get_invite_by_code(code).await?.is_some() {
                        Err(InviteError::conflict("Invite already redeemed"))
                    } else {
                        Err(InviteError::NotFound)
                    }
                }
            }
        }

        async fn delete_invite(&self, id: &str) -> InviteResult<()> {
            sqlx::query("DELETE FROM invite WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            Ok(())
        }
    }
}

#[cfg(feature = "sqlx-postgres")]
pub use sqlx_store::SqlxInviteStore;
