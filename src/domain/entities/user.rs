use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{membership::Membership, timestamp};

/// Link between a core user and the mailing-list system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, rename = "convertkitId")]
    pub mailing_list_id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
}

/// Profile fields selected alongside a user fetched by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Core account record owned by the graph service.
///
/// Which fields are populated depends on the query that produced it, so
/// everything beyond `id` is optional or defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, rename = "cognitoId")]
    pub identity_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub last_sign_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_deactivated: bool,
    #[serde(default, rename = "userDevices")]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub subscriber: Option<Subscriber>,
    #[serde(default)]
    pub recent_membership: Option<Membership>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default)]
    pub profile: Option<ProfileSummary>,
}

impl User {
    pub fn identity_id(&self) -> Option<&str> {
        self.identity_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Email to unsubscribe from the mailing list, when the user is an
    /// active subscriber and the profile carries an address.
    pub fn active_subscriber_email(&self) -> Option<&str> {
        let subscriber = self.subscriber.as_ref()?;
        if !subscriber.is_active {
            return None;
        }
        self.email()
    }

    pub fn email(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.email.as_deref())
            .filter(|e| !e.is_empty())
    }
}
