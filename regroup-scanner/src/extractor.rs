use crate::error::{Result, ScanError};
use crate::result::{SignalKind, Triple};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Only plain-HTTP targets are grouped; `https://` links are left out.
const TARGET_PREFIX: &str = "http://";
/// Element that wraps one finding in the report markup
const CONTAINER_TAG: &str = "div";

/// Order in which signals are emitted for each anchor
const EMIT_ORDER: [SignalKind; 3] = [
    SignalKind::PageTitle,
    SignalKind::Server,
    SignalKind::ContentLength,
];

/// Pulls (kind, value, url) triples out of EyeWitness-style report pages.
///
/// Each finding in a report is a `<div>` holding a link to the target and a
/// handful of bold labels (`Page Title:`, `Server:`, `Content-Length:`)
/// each followed by the captured text. Parsing is tolerant: broken markup
/// only means fewer triples.
pub struct Extractor {
    link_selector: Selector,
    label_selector: Selector,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            link_selector: parse_selector("a[href]")?,
            label_selector: parse_selector("b")?,
        })
    }

    pub fn extract(&self, html: &str) -> Vec<Triple> {
        let document = Html::parse_document(html);
        let mut triples = Vec::new();

        for link in document.select(&self.link_selector) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !href.starts_with(TARGET_PREFIX) {
                continue;
            }

            let Some(container) = nearest_container(link) else {
                debug!("No enclosing <{}> for {}, skipping", CONTAINER_TAG, href);
                continue;
            };

            for kind in EMIT_ORDER {
                if let Some(value) = self.labeled_value(container, kind) {
                    debug!("Found {} = {:?} for {}", kind, value, href);
                    triples.push(Triple::new(kind, value, href));
                }
            }
        }

        triples
    }

    /// Value following the first bold label for `kind` inside the container.
    ///
    /// `None` only when the label itself is missing; a label with nothing
    /// usable after it yields an empty string.
    fn labeled_value(&self, container: ElementRef<'_>, kind: SignalKind) -> Option<String> {
        let label = container
            .select(&self.label_selector)
            .find(|b| b.text().collect::<String>().contains(kind.label()))?;

        let value = label
            .next_sibling()
            .and_then(|node| node.value().as_text().map(|text| text.trim().to_string()))
            .unwrap_or_default();

        Some(value)
    }
}

/// Extract triples from a single document with a fresh [`Extractor`]
pub fn extract(html: &str) -> Result<Vec<Triple>> {
    Ok(Extractor::new()?.extract(html))
}

fn nearest_container(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == CONTAINER_TAG)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::SelectorParse {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
