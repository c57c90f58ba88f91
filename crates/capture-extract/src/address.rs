//! Two-line postal address parsing.
//!
//! Registry addresses are rendered as a street line, a `<br>`, then a
//! "City, ST ZIP" line. Splitting the second line is a heuristic: when the
//! pattern does not match, the street line is still returned and the other
//! fields stay empty.

use std::sync::LazyLock;

use capture_protocols::PostalAddress;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::dom::lines_of;
use crate::locator::find_labeled;

static STRICT_CITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^,]+),\s*([A-Z]{2})\s+(.+)$").expect("strict city pattern is valid")
});

static LOOSE_CITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^ ]+.*?)\s+([A-Z]{2})\s+(.+)$").expect("loose city pattern is valid")
});

/// How the "City, ST ZIP" line is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityLinePattern {
    /// `City, ST ZIP` with a mandatory comma after the city.
    Strict,
    /// Any city text before a two-letter state; one trailing comma is dropped.
    Loose,
}

impl CityLinePattern {
    /// Split a normalized city line into `(city, state, zip)`.
    pub fn split(&self, line: &str) -> Option<(String, String, String)> {
        let caps = match self {
            CityLinePattern::Strict => STRICT_CITY_LINE.captures(line)?,
            CityLinePattern::Loose => LOOSE_CITY_LINE.captures(line)?,
        };

        let city = match self {
            CityLinePattern::Strict => caps[1].trim(),
            CityLinePattern::Loose => {
                let city = &caps[1];
                city.strip_suffix(',').unwrap_or(city).trim()
            }
        };

        Some((
            city.to_string(),
            caps[2].trim().to_string(),
            caps[3].trim().to_string(),
        ))
    }
}

/// Build an address from a street line and a city line.
pub fn address_from_lines(line1: &str, line2: &str, pattern: CityLinePattern) -> PostalAddress {
    match pattern.split(line2) {
        Some((city, state, zip)) => PostalAddress {
            address1: line1.to_string(),
            city,
            state,
            zip,
        },
        None => PostalAddress::street_only(line1),
    }
}

/// Parse the address rendered inside `container`.
///
/// Only the first two lines are used.
pub fn parse_address_container(container: ElementRef<'_>, pattern: CityLinePattern) -> PostalAddress {
    let lines = lines_of(container);
    let line1 = lines.first().map(String::as_str).unwrap_or_default();
    let line2 = lines.get(1).map(String::as_str).unwrap_or_default();
    address_from_lines(line1, line2, pattern)
}

/// Parse the address block below the label starting with `label_prefix`.
///
/// The address lives in the first container nested inside the labeled
/// block. Returns `None` only when the label or that nested container is
/// missing; a malformed city line still yields the street line.
pub fn parse_address(doc: &Html, label_prefix: &str) -> Option<PostalAddress> {
    let block = find_labeled(doc, label_prefix)?;
    let inner = block.nested_container()?;
    Some(parse_address_container(inner, CityLinePattern::Strict))
}
