//! The badge retrieval pipeline.
//!
//! Three remote calls, strictly in order: convert the profile email to a
//! Displayer user id, list that user's groups, fetch the badges of the
//! configured group. Any step failing aborts the whole pipeline; nothing
//! is cached between invocations, so every call re-runs all three steps.

use phonebook_core::types::UserProfile;

use crate::config::DisplayerConfig;
use crate::error::{BadgesError, BadgesResult};
use crate::transport::{DisplayerTransport, HttpTransport, TransportResponse};
use crate::types::{Badge, ConvertResponse, GroupBadgesResponse, GroupEntry, GroupListResponse};

/// Client for the Displayer API.
pub struct DisplayerClient<T: DisplayerTransport = HttpTransport> {
    config: DisplayerConfig,
    transport: T,
}

impl DisplayerClient<HttpTransport> {
    /// Build a client with the production HTTP transport, using the
    /// configured per-request timeout.
    pub fn new(config: DisplayerConfig) -> BadgesResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: DisplayerTransport> DisplayerClient<T> {
    /// Build a client over a custom transport.
    pub fn with_transport(config: DisplayerConfig, transport: T) -> BadgesResult<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn check_status(resp: &TransportResponse, context: &str) -> BadgesResult<()> {
        if !resp.is_success() {
            return Err(BadgesError::service(
                resp.status,
                format!("{} failed", context),
            ));
        }
        Ok(())
    }

    /// Resolve the Displayer user id for an email address.
    pub async fn convert_email(&self, email: &str) -> BadgesResult<u64> {
        let url = format!("{}/displayer/convert/email", self.base());
        let resp = self.transport.post_form(&url, &[("email", email)]).await?;
        Self::check_status(&resp, "email conversion")?;

        let convert: ConvertResponse = serde_json::from_str(&resp.body)?;
        if !convert.is_okay() {
            return Err(BadgesError::service(
                resp.status,
                format!("email conversion returned status {:?}", convert.status),
            ));
        }

        Ok(convert.user_id)
    }

    /// List the badge groups of a Displayer user.
    pub async fn groups(&self, user_id: u64) -> BadgesResult<Vec<GroupEntry>> {
        let url = format!("{}/displayer/{}/groups.json", self.base(), user_id);
        let resp = self.transport.get(&url).await?;
        Self::check_status(&resp, "group list")?;

        let list: GroupListResponse = serde_json::from_str(&resp.body)?;
        Ok(list.groups)
    }

    /// Fetch the badges of one group.
    pub async fn group_badges(&self, user_id: u64, group_id: u64) -> BadgesResult<Vec<Badge>> {
        let url = format!(
            "{}/displayer/{}/group/{}.json",
            self.base(),
            user_id,
            group_id
        );
        let resp = self.transport.get(&url).await?;
        Self::check_status(&resp, "group badges")?;

        let group: GroupBadgesResponse = serde_json::from_str(&resp.body)?;
        group.badges.into_iter().map(Badge::from_raw).collect()
    }

    /// Run the full pipeline for an email address.
    ///
    /// Returns an empty list when the configured badge group is absent
    /// from the user's group list; the third call is skipped entirely in
    /// that case.
    pub async fn fetch_badges(&self, email: &str) -> BadgesResult<Vec<Badge>> {
        let user_id = self.convert_email(email).await?;
        let groups = self.groups(user_id).await?;

        let Some(group) = groups.iter().find(|g| self.config.badge_group.matches(g)) else {
            tracing::debug!(user_id, "badge group not present for user");
            return Ok(Vec::new());
        };

        let badges = self.group_badges(user_id, group.group_id).await?;
        tracing::debug!(user_id, group_id = group.group_id, count = badges.len(), "fetched badges");

        Ok(badges)
    }

    /// The badges shown on a directory profile.
    pub async fn badges_for(&self, profile: &UserProfile) -> BadgesResult<Vec<Badge>> {
        self.fetch_badges(&profile.email).await
    }
}
