use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug)]
pub enum BlsSignatureError {
    #[error("expected {expected} signature bytes, got {actual}")]
    InvalidByteLength { expected: usize, actual: usize },
    #[error("invalid hex string")]
    InvalidHexString,
}
