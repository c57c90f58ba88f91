//! Records exchanged between the extraction engine, the handoff store and
//! the origin application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Postal address split into the fields the origin application stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub city: String,
    /// Two-letter state code, empty when the city line did not match.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

impl PostalAddress {
    /// Address with only the street line known.
    pub fn street_only(address1: impl Into<String>) -> Self {
        Self {
            address1: address1.into(),
            ..Default::default()
        }
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.address1.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip.is_empty()
    }
}

/// One company official, or the registered agent standing in for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialRecord {
    role: String,
    name: String,
    #[serde(flatten)]
    address: PostalAddress,
}

impl OfficialRecord {
    pub fn new(role: impl Into<String>, name: impl Into<String>, address: PostalAddress) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            address,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &PostalAddress {
        &self.address
    }
}

/// Error returned when an officials payload would carry no officials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("officials payload requires at least one official")]
pub struct EmptyOfficialsError;

/// Body posted back to the origin application.
///
/// Always carries at least one official.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawOfficialsPayload")]
pub struct OfficialsPayload {
    legal_name: String,
    sos_id: String,
    officials: Vec<OfficialRecord>,
}

impl OfficialsPayload {
    /// Build a payload, `None` when `officials` is empty.
    pub fn new(
        legal_name: impl Into<String>,
        sos_id: impl Into<String>,
        officials: Vec<OfficialRecord>,
    ) -> Option<Self> {
        if officials.is_empty() {
            return None;
        }
        Some(Self {
            legal_name: legal_name.into(),
            sos_id: sos_id.into(),
            officials,
        })
    }

    pub fn legal_name(&self) -> &str {
        &self.legal_name
    }

    pub fn sos_id(&self) -> &str {
        &self.sos_id
    }

    pub fn officials(&self) -> &[OfficialRecord] {
        &self.officials
    }

    /// Name used in log lines: the legal name, else the registry id.
    pub fn display_name(&self) -> &str {
        if self.legal_name.is_empty() {
            &self.sos_id
        } else {
            &self.legal_name
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOfficialsPayload {
    #[serde(default)]
    legal_name: String,
    #[serde(default)]
    sos_id: String,
    officials: Vec<OfficialRecord>,
}

impl TryFrom<RawOfficialsPayload> for OfficialsPayload {
    type Error = EmptyOfficialsError;

    fn try_from(raw: RawOfficialsPayload) -> Result<Self, Self::Error> {
        OfficialsPayload::new(raw.legal_name, raw.sos_id, raw.officials).ok_or(EmptyOfficialsError)
    }
}

/// Token the profile context writes after a delivery so the origin reloads.
///
/// Millisecond timestamp; zero means no token is pending.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub const NONE: RefreshToken = RefreshToken(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    /// Current wall-clock time in milliseconds.
    pub fn now() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(1);
        Self(millis as u64)
    }

    /// A fresh token that is guaranteed to differ from `previous`.
    pub fn next_after(previous: RefreshToken) -> Self {
        let now = Self::now();
        if now.0 > previous.0 {
            return now;
        }
        // A saturated token wraps back to the clock, which is nonzero.
        previous.0.checked_add(1).map(Self).unwrap_or(now)
    }
}

impl std::fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of everything stored in the handoff channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffState {
    pub business_name: Option<String>,
    pub origin_base: Option<String>,
    pub refresh_token: RefreshToken,
}

/// The control the operator clicked on the origin page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerSource {
    /// Value of the control's `data-employer` attribute.
    pub employer: Option<String>,
    /// Text content of the control.
    pub text: String,
}

impl TriggerSource {
    pub fn new(employer: Option<String>, text: impl Into<String>) -> Self {
        Self {
            employer,
            text: text.into(),
        }
    }

    /// Business name to search for; the attribute wins over the text.
    pub fn business_name(&self) -> String {
        self.employer
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.text)
            .trim()
            .to_string()
    }
}

/// A link located inside a results panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoLink {
    pub text: String,
    pub href: Option<String>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
