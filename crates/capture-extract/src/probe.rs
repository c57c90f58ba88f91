//! Document probes for the search, results and origin pages.

use capture_protocols::{InfoLink, TriggerSource};
use scraper::{ElementRef, Html, Selector};

use crate::dom::{raw_text, text_of, LINK, WITH_ID};

/// Link text prefix that leads from a result entry to its profile.
pub const MORE_INFORMATION: &str = "more information";

fn element_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.select(&WITH_ID).find(|el| el.value().id() == Some(id))
}

/// Presence of the registry search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchForm {
    pub has_field: bool,
    pub has_button: bool,
}

impl SearchForm {
    pub fn probe(html: &str, field_id: &str, button_id: &str) -> Self {
        let doc = Html::parse_document(html);
        Self {
            has_field: element_by_id(&doc, field_id).is_some(),
            has_button: element_by_id(&doc, button_id).is_some(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.has_field && self.has_button
    }
}

/// Find the "More information" link inside the panel with id `panel_id`.
///
/// The search never leaves the panel, so links of other entries are not
/// considered.
pub fn find_more_information_link(html: &str, panel_id: &str) -> Option<InfoLink> {
    let doc = Html::parse_document(html);
    let panel = element_by_id(&doc, panel_id)?;

    panel
        .select(&LINK)
        .find(|a| text_of(*a).to_lowercase().starts_with(MORE_INFORMATION))
        .map(|a| InfoLink {
            text: text_of(a),
            href: a.value().attr("href").map(str::to_string),
        })
}

/// Every lookup trigger on an origin page, in document order.
///
/// `css` selects the trigger controls, for example `.sos-btn`.
pub fn trigger_sources(html: &str, css: &str) -> Vec<TriggerSource> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    let doc = Html::parse_document(html);

    doc.select(&selector)
        .map(|el| {
            let employer = el.value().attr("data-employer").map(str::to_string);
            TriggerSource::new(employer, raw_text(el))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"
        <button class="usa-accordion__button" aria-controls="panel-1">Acme LLC</button>
        <div id="panel-1">
            <a class="searchResultsLink" href="/profile/1">  More information  </a>
        </div>
        <button class="usa-accordion__button" aria-controls="panel-2">Acme Holdings</button>
        <div id="panel-2">
            <a href="/filings/2">Filings</a>
            <a href="/profile/2">More Information about Acme Holdings</a>
        </div>
        <div id="panel-3"><a href="/filings/3">Filings</a></div>
    "#;

    #[test]
    fn test_find_link_in_panel() {
        let link = find_more_information_link(RESULTS, "panel-1").unwrap();
        assert_eq!(link.text, "More information");
        assert_eq!(link.href.as_deref(), Some("/profile/1"));
    }

    #[test]
    fn test_find_link_skips_other_links() {
        let link = find_more_information_link(RESULTS, "panel-2").unwrap();
        assert_eq!(link.href.as_deref(), Some("/profile/2"));
    }

    #[test]
    fn test_no_link_in_panel() {
        assert!(find_more_information_link(RESULTS, "panel-3").is_none());
        assert!(find_more_information_link(RESULTS, "panel-9").is_none());
    }

    #[test]
    fn test_search_form_probe() {
        let html = r#"<form><input id="SearchCriteria"><button id="SubmitButton">Go</button></form>"#;
        assert!(SearchForm::probe(html, "SearchCriteria", "SubmitButton").is_complete());

        let form = SearchForm::probe("<form><input id=\"Other\"></form>", "SearchCriteria", "SubmitButton");
        assert!(!form.has_field);
        assert!(!form.has_button);
        assert!(!form.is_complete());
    }

    #[test]
    fn test_trigger_sources() {
        let html = r#"
            <table>
                <tr><td><button class="sos-btn" data-employer="Acme LLC">SOS</button></td></tr>
                <tr><td><button class="sos-btn"> Beta Corp </button></td></tr>
                <tr><td><button class="other">Ignore</button></td></tr>
            </table>
        "#;
        let triggers = trigger_sources(html, ".sos-btn");
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].business_name(), "Acme LLC");
        assert_eq!(triggers[1].business_name(), "Beta Corp");
    }

    #[test]
    fn test_trigger_sources_bad_selector() {
        assert!(trigger_sources("<p></p>", "[[").is_empty());
    }
}
