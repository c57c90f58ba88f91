//! Selectors and tree walks shared by the parsers.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::text::normalize;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Bold label spans of the labeled-block layout.
pub(crate) static LABEL_SPAN: LazyLock<Selector> =
    LazyLock::new(|| selector("div.para-small span.boldSpan"));

/// Value container of a labeled block.
pub(crate) static CONTAINER: LazyLock<Selector> = LazyLock::new(|| selector("div.para-small"));

pub(crate) static LABEL: LazyLock<Selector> = LazyLock::new(|| selector("span.boldSpan"));

pub(crate) static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

pub(crate) static CONTAINER_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("div.para-small a"));

pub(crate) static LIST_ENTRY: LazyLock<Selector> = LazyLock::new(|| selector("ul li"));

pub(crate) static WITH_ID: LazyLock<Selector> = LazyLock::new(|| selector("[id]"));

/// Concatenated text of an element, like the DOM's `textContent`.
pub(crate) fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Normalized text of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    normalize(&raw_text(el))
}

/// Text of `el`, leaving out the subtree rooted at `skip`.
pub(crate) fn raw_text_without(el: ElementRef<'_>, skip: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text_without(el, skip, &mut out);
    out
}

fn push_text_without(el: ElementRef<'_>, skip: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.id() != skip.id() {
                push_text_without(child_el, skip, out);
            }
        }
    }
}

/// Text of `el` split at `<br>` elements, each line normalized.
///
/// Always returns at least one (possibly empty) line.
pub(crate) fn lines_of(el: ElementRef<'_>) -> Vec<String> {
    let mut lines = vec![String::new()];
    push_lines(el, &mut lines);
    lines.iter().map(|line| normalize(line)).collect()
}

fn push_lines(el: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            if let Some(current) = lines.last_mut() {
                current.push_str(text);
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().name() == "br" {
                lines.push(String::new());
            } else {
                push_lines(child_el, lines);
            }
        }
    }
}

/// Nearest ancestor of `el` matching `selector`.
pub(crate) fn closest<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}
