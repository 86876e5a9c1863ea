// Grouping index: signal kind -> signal value -> target URLs

use indexmap::IndexMap;
use regroup_scanner::{SignalKind, Triple};
use serde::Serialize;
use tracing::debug;

pub type ValueMap = IndexMap<String, Vec<String>>;

/// Whether a `record` call opened a new cluster or grew an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Added,
    Appended,
}

/// Two-level, insertion-ordered grouping of target URLs.
///
/// A new index already holds every [`SignalKind`] (in [`SignalKind::ALL`]
/// order) with no values, so reports always list the three kinds in the
/// same order. URLs are only ever appended; repeats are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignalIndex {
    groups: IndexMap<SignalKind, ValueMap>,
}

impl SignalIndex {
    pub fn new() -> Self {
        let groups = SignalKind::ALL
            .into_iter()
            .map(|kind| (kind, ValueMap::new()))
            .collect();
        Self { groups }
    }

    pub fn record(&mut self, kind: SignalKind, value: &str, url: &str) -> RecordOutcome {
        let values = self.groups.entry(kind).or_default();
        match values.get_mut(value) {
            Some(urls) => {
                urls.push(url.to_string());
                debug!("Appended {} to {} in {}.", url, value, kind);
                RecordOutcome::Appended
            }
            None => {
                values.insert(value.to_string(), vec![url.to_string()]);
                debug!("Added {} with value {} to {}.", value, url, kind);
                RecordOutcome::Added
            }
        }
    }

    pub fn record_triple(&mut self, triple: &Triple) -> RecordOutcome {
        self.record(triple.kind, &triple.value, &triple.url)
    }

    /// Record every triple in order, returning how many were recorded
    pub fn merge<'a, I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        let mut recorded = 0;
        for triple in triples {
            self.record_triple(triple);
            recorded += 1;
        }
        recorded
    }

    pub fn urls(&self, kind: SignalKind, value: &str) -> Option<&[String]> {
        self.groups
            .get(&kind)
            .and_then(|values| values.get(value))
            .map(Vec::as_slice)
    }

    pub fn values(&self, kind: SignalKind) -> Option<&ValueMap> {
        self.groups.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignalKind, &ValueMap)> {
        self.groups.iter()
    }

    /// Every (kind, value, url) association in report order
    pub fn rows(&self) -> impl Iterator<Item = (SignalKind, &str, &str)> {
        self.groups.iter().flat_map(|(kind, values)| {
            values.iter().flat_map(move |(value, urls)| {
                urls.iter().map(move |url| (*kind, value.as_str(), url.as_str()))
            })
        })
    }

    /// Total number of URL associations across all clusters
    pub fn len(&self) -> usize {
        self.groups
            .values()
            .flat_map(|values| values.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the full index for structured serialization
    pub fn report(&self) -> &IndexMap<SignalKind, ValueMap> {
        &self.groups
    }
}

impl Default for SignalIndex {
    fn default() -> Self {
        Self::new()
    }
}
