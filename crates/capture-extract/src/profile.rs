//! Profile page extraction.

use capture_protocols::{OfficialRecord, OfficialsPayload};
use scraper::Html;
use tracing::debug;

use crate::locator::labeled_text;
use crate::officials::{parse_officials_list, parse_registered_agent_fallback};

pub const LEGAL_NAME_LABEL: &str = "Legal name";
pub const SOS_ID_LABEL: &str = "Secretary of State Identification Number";

/// Which parser produced the officials of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OfficialsSource {
    /// The "Company officials" list.
    CompanyOfficials,
    /// The registered agent stood in for a missing list.
    RegisteredAgent,
    /// Neither produced anything.
    #[default]
    None,
}

/// Everything read from one profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileExtraction {
    pub legal_name: String,
    pub sos_id: String,
    pub officials: Vec<OfficialRecord>,
    pub source: OfficialsSource,
}

impl ProfileExtraction {
    pub fn has_officials(&self) -> bool {
        !self.officials.is_empty()
    }

    /// Payload for delivery, `None` when no officials were found.
    pub fn into_payload(self) -> Option<OfficialsPayload> {
        OfficialsPayload::new(self.legal_name, self.sos_id, self.officials)
    }
}

/// Parse `html` and extract the profile.
pub fn extract_profile(html: &str) -> ProfileExtraction {
    let doc = Html::parse_document(html);
    extract_profile_document(&doc)
}

/// Extract the profile from an already parsed document.
///
/// The officials list is tried first; the registered agent is only
/// consulted when the list is missing or empty.
pub fn extract_profile_document(doc: &Html) -> ProfileExtraction {
    let legal_name = labeled_text(doc, LEGAL_NAME_LABEL);
    let sos_id = labeled_text(doc, SOS_ID_LABEL);

    let mut officials = parse_officials_list(doc);
    let mut source = OfficialsSource::CompanyOfficials;
    if officials.is_empty() {
        officials = parse_registered_agent_fallback(doc);
        source = if officials.is_empty() {
            OfficialsSource::None
        } else {
            OfficialsSource::RegisteredAgent
        };
    }

    debug!(
        legal_name = %legal_name,
        sos_id = %sos_id,
        officials = officials.len(),
        source = ?source,
        "Extracted profile"
    );

    ProfileExtraction {
        legal_name,
        sos_id,
        officials,
        source,
    }
}
