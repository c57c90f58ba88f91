//! Field extraction for registry profile pages.
//!
//! Profile pages lay out every value as a labeled block: a bold label span
//! inside a `div.para-small`, followed by the value in the same container.
//! The parsers here walk the parsed tree, never the raw markup, and prefer
//! returning partial records over failing a whole page.
//!
//! Entry points:
//!
//! - [`extract_profile`] - legal name, registry id and officials of a profile page
//! - [`find_labeled`] - locate one labeled block
//! - [`parse_address`] - two-line postal address below a label
//! - [`probe`] - small queries used on the search and results pages

mod address;
mod dom;
mod locator;
mod officials;
mod profile;
pub mod probe;
pub mod text;

pub use address::{parse_address, parse_address_container, CityLinePattern};
pub use locator::{find_labeled, labeled_link_text, labeled_text, LabeledBlock};
pub use officials::{
    parse_officials_list, parse_registered_agent_fallback, OFFICIALS_LABEL,
    REGISTERED_AGENT_LABEL, REGISTERED_AGENT_ROLE, REGISTERED_MAILING_LABEL,
};
pub use profile::{
    extract_profile, extract_profile_document, OfficialsSource, ProfileExtraction,
    LEGAL_NAME_LABEL, SOS_ID_LABEL,
};
pub use scraper::Html;
pub use text::normalize;
