use serde::Serialize;
use std::fmt;

/// The signal categories pulled out of each report block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    PageTitle,
    ContentLength,
    Server,
}

impl SignalKind {
    /// Canonical ordering used when seeding an index and writing reports
    pub const ALL: [SignalKind; 3] = [
        SignalKind::PageTitle,
        SignalKind::ContentLength,
        SignalKind::Server,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::PageTitle => "page_title",
            SignalKind::ContentLength => "content_length",
            SignalKind::Server => "server",
        }
    }

    /// Bold label text that precedes the value in a report block
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::PageTitle => "Page Title:",
            SignalKind::ContentLength => "Content-Length:",
            SignalKind::Server => "Server:",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extraction result: a signal value seen next to a target URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triple {
    pub kind: SignalKind,
    pub value: String,
    pub url: String,
}

impl Triple {
    pub fn new(kind: SignalKind, value: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            url: url.into(),
        }
    }
}
