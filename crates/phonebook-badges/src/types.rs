use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{BadgesError, BadgesResult};

/// Response of the email conversion endpoint - matches the Displayer wire
/// schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertResponse {
    pub status: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub email: String,
}

impl ConvertResponse {
    /// The Displayer reports success with a literal `"okay"` marker.
    pub fn is_okay(&self) -> bool {
        self.status == "okay"
    }
}

/// Response of the group list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupListResponse {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub groups: Vec<GroupEntry>,
}

/// One group in a user's group list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GroupEntry {
    #[serde(rename = "groupId")]
    pub group_id: u64,
    /// Number of badges in the group, as reported by the Displayer.
    pub badges: u64,
    pub name: String,
}

/// Response of the per-group badge endpoint. Entries stay raw here and are
/// wrapped into [`Badge`] by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupBadgesResponse {
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "groupId")]
    pub group_id: u64,
    pub badges: Vec<Value>,
}

/// The parsed, known fields of a badge entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BadgeRecord {
    #[serde(rename = "assertionType")]
    pub assertion_type: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "hostedUrl")]
    pub hosted_url: String,
    #[serde(rename = "lastValidated")]
    pub last_validated: DateTime<Utc>,
    pub assertion: BadgeAssertion,
}

/// The assertion block of a badge entry.
///
/// `recipient` is either a plaintext email or, when `salt` is present, a
/// salted hash of the form `algorithm$hexdigest`. The payload decides;
/// nothing here transforms it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BadgeAssertion {
    pub recipient: String,
    #[serde(default)]
    pub salt: Option<String>,
    pub badge: BadgeDescriptor,
}

/// The nested badge descriptor.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BadgeDescriptor {
    pub name: String,
    pub image: String,
    pub description: String,
    pub version: String,
    pub criteria: String,
    pub issuer: BadgeIssuer,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BadgeIssuer {
    pub origin: String,
    pub org: String,
    pub contact: String,
    pub name: String,
}

/// A read-only view over one badge entry from the Displayer.
///
/// Known fields are parsed into typed accessors; the untouched origin
/// mapping stays available through [`raw`](Badge::raw) and
/// [`field`](Badge::field) for anything the schema does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    raw: Map<String, Value>,
    record: BadgeRecord,
}

impl Badge {
    /// Wrap one raw badge entry. Fails with a payload error when the entry
    /// does not match the expected shape.
    pub fn from_raw(value: Value) -> BadgesResult<Self> {
        let record: BadgeRecord = serde_json::from_value(value.clone())?;
        let raw = match value {
            Value::Object(map) => map,
            // BadgeRecord only deserializes from a JSON object
            _ => Map::new(),
        };

        Ok(Self { raw, record })
    }

    pub fn assertion_type(&self) -> &str {
        &self.record.assertion_type
    }

    pub fn image_url(&self) -> &str {
        &self.record.image_url
    }

    pub fn hosted_url(&self) -> &str {
        &self.record.hosted_url
    }

    pub fn last_validated(&self) -> DateTime<Utc> {
        self.record.last_validated
    }

    /// The recipient exactly as the payload encodes it: a plaintext email,
    /// or a salted `algorithm$hexdigest` string when [`salt`](Badge::salt)
    /// is present.
    pub fn recipient(&self) -> &str {
        &self.record.assertion.recipient
    }

    pub fn salt(&self) -> Option<&str> {
        self.record.assertion.salt.as_deref()
    }

    /// The nested badge descriptor.
    pub fn descriptor(&self) -> &BadgeDescriptor {
        &self.record.assertion.badge
    }

    pub fn name(&self) -> &str {
        &self.descriptor().name
    }

    pub fn image(&self) -> &str {
        &self.descriptor().image
    }

    pub fn description(&self) -> &str {
        &self.descriptor().description
    }

    pub fn issuer(&self) -> &BadgeIssuer {
        &self.descriptor().issuer
    }

    /// The untouched origin mapping for this badge entry.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Look up any top-level payload field, modeled or not.
    pub fn field(&self, name: &str) -> BadgesResult<&Value> {
        self.raw
            .get(name)
            .ok_or_else(|| BadgesError::MissingField(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hosted_entry() -> Value {
        json!({
            "assertionType": "hosted",
            "imageUrl": "http://example.com/51f6d.png",
            "hostedUrl": "http://example.com/assertion",
            "lastValidated": "2012-05-30T16:07:40.000Z",
            "assertion": {
                "recipient": "robot1337@domain.com",
                "badge": {
                    "name": "Badge Haxxor",
                    "image": "http://example.com/zilla.png",
                    "description": "You know how to hack badges",
                    "version": "0.0.1",
                    "criteria": "http://artzilla.org/#thisisafakebadge",
                    "issuer": {
                        "origin": "http://badges-101.openbadges.org/",
                        "org": "Experimental Badge Authority",
                        "contact": "hai2u@openbadges.org",
                        "name": "Open Badges"
                    }
                }
            }
        })
    }

    #[test]
    fn test_typed_and_raw_access_agree() {
        let badge = Badge::from_raw(hosted_entry()).unwrap();

        assert_eq!(badge.raw()["imageUrl"].as_str(), Some(badge.image_url()));
        assert_eq!(badge.raw()["hostedUrl"].as_str(), Some(badge.hosted_url()));
        assert_eq!(
            badge.raw()["assertionType"].as_str(),
            Some(badge.assertion_type())
        );
        assert_eq!(badge.field("imageUrl").unwrap(), &badge.raw()["imageUrl"]);
    }

    #[test]
    fn test_descriptor_fields() {
        let badge = Badge::from_raw(hosted_entry()).unwrap();

        assert_eq!(badge.name(), "Badge Haxxor");
        assert_eq!(badge.image(), "http://example.com/zilla.png");
        assert_eq!(badge.description(), "You know how to hack badges");
        assert_eq!(badge.issuer().org, "Experimental Badge Authority");
    }

    #[test]
    fn test_unsalted_recipient_is_plaintext_email() {
        let badge = Badge::from_raw(hosted_entry()).unwrap();

        assert_eq!(badge.salt(), None);
        assert_eq!(badge.recipient(), "robot1337@domain.com");
    }

    #[test]
    fn test_salted_recipient_is_passed_through_verbatim() {
        let mut entry = hosted_entry();
        entry["assertion"]["salt"] = json!("hooraycats");
        entry["assertion"]["recipient"] = json!("sha512$deadbeef");

        let badge = Badge::from_raw(entry).unwrap();

        assert_eq!(badge.salt(), Some("hooraycats"));
        assert_eq!(badge.recipient(), "sha512$deadbeef");
    }

    #[test]
    fn test_unknown_field_is_missing() {
        let badge = Badge::from_raw(hosted_entry()).unwrap();

        let err = badge.field("evidence").unwrap_err();
        assert!(matches!(err, BadgesError::MissingField(name) if name == "evidence"));
    }

    #[test]
    fn test_unmodeled_field_stays_reachable() {
        let mut entry = hosted_entry();
        entry["evidence"] = json!("http://example.com/evidence");

        let badge = Badge::from_raw(entry).unwrap();

        assert_eq!(
            badge.field("evidence").unwrap().as_str(),
            Some("http://example.com/evidence")
        );
    }

    #[test]
    fn test_malformed_entry_is_a_payload_error() {
        let err = Badge::from_raw(json!({"assertionType": "hosted"})).unwrap_err();
        assert!(matches!(err, BadgesError::Payload(_)));
    }
}
