pub mod error;
pub mod extractor;
pub mod result;

pub use error::ScanError;
pub use extractor::{Extractor, extract};
pub use result::{SignalKind, Triple};
