use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("row '{identity}' expects a {expected} view but was handed a {found}")]
  ViewTypeMismatch { identity: String, expected: &'static str, found: &'static str },
  #[error("identity '{0}' is used by more than one row")]
  DuplicateIdentity(String),
  #[error("row {index} is out of bounds for a list of {len} rows")]
  RowOutOfBounds { index: usize, len: usize },
}
