use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::timestamp;

/// Membership status as reported by the core graph service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    // The backend schema still emits the historical misspelling.
    #[serde(alias = "GRADE_PERIOD")]
    #[strum(to_string = "GRACE_PERIOD", serialize = "GRADE_PERIOD")]
    GracePeriod,
    Suspended,
    PendingCancellation,
    Cancelled,
}

/// A membership record. The processor fields are whatever the billing
/// plugin stored when the membership was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default)]
    pub id: Option<String>,
    pub status: MembershipStatus,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub since: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "killbillSubscriptionId")]
    pub processor_subscription_id: Option<String>,
    #[serde(default, rename = "killbillPaymentMethodExternalKey")]
    pub processor_external_key: Option<String>,
    #[serde(default, rename = "killbillPaymentMethodPluginName")]
    pub processor_plugin_name: Option<String>,
}

impl Membership {
    /// The processor member key, if one was recorded and is non-blank.
    pub fn external_key(&self) -> Option<&str> {
        self.processor_external_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
