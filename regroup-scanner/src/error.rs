use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid selector '{selector}': {reason}")]
    SelectorParse { selector: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ScanError>;
