// src/core/html.rs
//! Traversal vocabulary shared by the page specs.
//!
//! Job pages on the site are loosely structured: a label such as "Salario" sits
//! in its own element and the value lives in the next element over. Everything
//! here answers one of three questions: where is this label, what is next to it,
//! and what text does that element show.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::sanitize::normalize_ws;

/// A parsed page (listing or detail).
pub struct Page {
    html: Html,
}

/// A text node that matched a label pattern, plus the element that holds it.
#[derive(Clone, Copy, Debug)]
pub struct TextHit<'a> {
    pub parent: ElementRef<'a>,
    pub text: &'a str,
}

/// Where to read a value relative to the element holding a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjacent {
    /// The label element's next sibling element.
    NextSibling,
    /// The element containing the label element.
    Grandparent,
    /// The next element in document order (first child, else whatever follows).
    NextInOrder,
}

impl Page {
    pub fn parse(doc: &str) -> Self {
        Self { html: Html::parse_document(doc) }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    /// First visible text node matching `re` (substring search).
    pub fn find_text(&self, re: &Regex) -> Option<TextHit<'_>> {
        self.html.tree.root().descendants().find_map(|node| {
            let text = node.value().as_text()?;
            if !re.is_match(text) {
                return None;
            }
            let parent = node.parent().and_then(ElementRef::wrap)?;
            if is_non_visual(parent) {
                return None;
            }
            Some(TextHit { parent, text: &**text })
        })
    }

    pub fn has_text(&self, re: &Regex) -> bool {
        self.find_text(re).is_some()
    }

    /// Elements whose `class` attribute matches `re`, optionally restricted to a tag.
    pub fn by_class<'a>(
        &'a self,
        tag: Option<&'a str>,
        re: &'a Regex,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |el| {
            let v = el.value();
            tag.is_none_or(|t| v.name().eq_ignore_ascii_case(t))
                && v.attr("class").is_some_and(|c| re.is_match(c))
        })
    }

    pub fn first_by_class<'a>(&'a self, tag: Option<&'a str>, re: &'a Regex) -> Option<ElementRef<'a>> {
        self.by_class(tag, re).next()
    }

    /// Next element after `el` in document order. Descends into `el` first.
    pub fn next_in_order<'a>(&'a self, el: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let mut it = self.elements();
        it.by_ref().find(|e| e.id() == el.id())?;
        it.next()
    }

    /// Find the label, then read from the first of `steps` that exists.
    pub fn labeled<'a>(&'a self, label: &Regex, steps: &[Adjacent]) -> Option<ElementRef<'a>> {
        let hit = self.find_text(label)?;
        steps.iter().find_map(|step| match step {
            Adjacent::NextSibling => next_sibling_element(hit.parent),
            Adjacent::Grandparent => parent_element(hit.parent),
            Adjacent::NextInOrder => self.next_in_order(hit.parent),
        })
    }

    /// Visible text of the whole page, one space between text nodes.
    pub fn visible_text(&self) -> String {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let parent = node.parent().and_then(ElementRef::wrap)?;
                (!is_non_visual(parent)).then_some(&**text)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn next_sibling_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub fn following_siblings(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Trimmed, non-empty text nodes under `el` joined by `sep`.
pub fn text_of(el: ElementRef<'_>, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Single-line text of `el` with whitespace collapsed.
pub fn line_of(el: ElementRef<'_>) -> String {
    normalize_ws(&text_of(el, " "))
}

fn is_non_visual(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "script" | "style" | "noscript")
}
