use thiserror::Error;

/// Errors returned while setting up signature keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// An extracted node key failed its pairing check against the master public key.
    #[error("extracted key for node {0:?} failed validation")]
    InvalidNodeKey(String),
    /// A node or file identifier is empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,
}
