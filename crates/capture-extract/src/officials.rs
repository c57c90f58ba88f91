//! Officials list and registered-agent fallback.

use capture_protocols::{OfficialRecord, PostalAddress};
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::address::{parse_address, parse_address_container, CityLinePattern};
use crate::dom::{raw_text, CONTAINER, CONTAINER_LINK, LABEL, LIST_ENTRY};
use crate::text::normalize_opt;
use crate::locator::find_labeled;

pub const OFFICIALS_LABEL: &str = "Company officials";
pub const REGISTERED_AGENT_LABEL: &str = "Registered agent";
pub const REGISTERED_MAILING_LABEL: &str = "Registered mailing";

/// Role given to the record synthesized from the registered agent.
pub const REGISTERED_AGENT_ROLE: &str = "Registered Agent";

/// Parse every entry of the "Company officials" list.
///
/// Returns an empty list when the page has no officials heading. The list
/// entries are taken from the heading's enclosing `section`, or from the
/// whole document when the heading is not inside one.
pub fn parse_officials_list(doc: &Html) -> Vec<OfficialRecord> {
    let Some(heading) = find_labeled(doc, OFFICIALS_LABEL) else {
        debug!("No company officials heading on page");
        return Vec::new();
    };

    let section = heading
        .label()
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "section");

    let entries: Vec<ElementRef<'_>> = match section {
        Some(section) => section.select(&LIST_ENTRY).collect(),
        None => doc.select(&LIST_ENTRY).collect(),
    };

    let officials: Vec<OfficialRecord> = entries.into_iter().filter_map(parse_entry).collect();
    debug!(count = officials.len(), "Parsed company officials");
    officials
}

fn parse_entry(entry: ElementRef<'_>) -> Option<OfficialRecord> {
    let role = normalize_opt(entry.select(&LABEL).next().map(raw_text).as_deref());
    let name = normalize_opt(entry.select(&CONTAINER_LINK).next().map(raw_text).as_deref());
    let address = entry
        .select(&CONTAINER)
        .nth(1)
        .map(|container| parse_address_container(container, CityLinePattern::Loose))
        .unwrap_or_default();

    // Decorative or empty list items carry neither.
    if name.is_empty() && address.address1.is_empty() {
        return None;
    }

    Some(OfficialRecord::new(role, name, address))
}

/// Synthesize one official from the registered agent and mailing address.
///
/// Used when the page has no officials list. Yields nothing when neither the
/// agent's name nor any part of the mailing address is present.
pub fn parse_registered_agent_fallback(doc: &Html) -> Vec<OfficialRecord> {
    let name = find_labeled(doc, REGISTERED_AGENT_LABEL)
        .map(|block| block.link_text())
        .unwrap_or_default();
    let address = parse_address(doc, REGISTERED_MAILING_LABEL).filter(|a| !a.is_empty());

    if name.is_empty() && address.is_none() {
        debug!("No registered agent or mailing address on page");
        return Vec::new();
    }

    vec![OfficialRecord::new(
        REGISTERED_AGENT_ROLE,
        name,
        address.unwrap_or_else(PostalAddress::default),
    )]
}
