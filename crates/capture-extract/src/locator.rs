//! Labeled-field locator.

use scraper::{ElementRef, Html};

use crate::dom::{closest, raw_text_without, text_of, CONTAINER, LABEL_SPAN, LINK};
use crate::text::{normalize, strip_label_punctuation};

/// A label span together with the container holding its value.
///
/// Borrows the parsed document and only lives for one extraction pass.
#[derive(Debug, Clone, Copy)]
pub struct LabeledBlock<'a> {
    label: ElementRef<'a>,
    container: ElementRef<'a>,
}

impl<'a> LabeledBlock<'a> {
    pub fn label(&self) -> ElementRef<'a> {
        self.label
    }

    pub fn container(&self) -> ElementRef<'a> {
        self.container
    }

    /// Normalized text of the label itself.
    pub fn label_text(&self) -> String {
        text_of(self.label)
    }

    /// Container text with the label removed.
    pub fn text(&self) -> String {
        let raw = raw_text_without(self.container, self.label);
        normalize(strip_label_punctuation(&raw))
    }

    /// Text of the first link in the container, else [`LabeledBlock::text`].
    pub fn link_text(&self) -> String {
        match self.container.select(&LINK).next() {
            Some(link) => text_of(link),
            None => self.text(),
        }
    }

    /// First value container nested inside this block's container.
    pub fn nested_container(&self) -> Option<ElementRef<'a>> {
        self.container.select(&CONTAINER).next()
    }
}

/// Find the first labeled block whose label starts with `label_prefix`.
///
/// Matching is case-insensitive and by prefix, so `"Legal name"` matches a
/// `"Legal name:"` label. When a label repeats, the earliest one in document
/// order wins.
pub fn find_labeled<'a>(doc: &'a Html, label_prefix: &str) -> Option<LabeledBlock<'a>> {
    let prefix = normalize(label_prefix).to_lowercase();

    let label = doc
        .select(&LABEL_SPAN)
        .find(|span| text_of(*span).to_lowercase().starts_with(&prefix))?;
    let container = closest(label, &CONTAINER)?;

    Some(LabeledBlock { label, container })
}

/// Text-mode value of a labeled field, empty when the field is absent.
pub fn labeled_text(doc: &Html, label_prefix: &str) -> String {
    find_labeled(doc, label_prefix)
        .map(|block| block.text())
        .unwrap_or_default()
}

/// Link-mode value of a labeled field, empty when the field is absent.
pub fn labeled_link_text(doc: &Html, label_prefix: &str) -> String {
    find_labeled(doc, label_prefix)
        .map(|block| block.link_text())
        .unwrap_or_default()
}
