use thiserror::Error;

use crate::primitives::ChunksError;

/// Errors returned by the encoder, recoder and decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RLNCError {
    /// Error while splitting the input into pieces.
    #[error(transparent)]
    Chunks(#[from] ChunksError),
    /// No original pieces were provided.
    #[error("no pieces were provided")]
    EmptyPieces,
    /// The piece count is zero.
    #[error("piece count must be greater than 0")]
    ZeroPieceCount,
    /// The piece size is zero.
    #[error("piece size must be greater than 0")]
    ZeroPieceSize,
    /// The original pieces are not all of the same size.
    #[error("piece {index} has size {size}, expected {expected}")]
    InconsistentPieceSize {
        /// Index of the offending piece.
        index: usize,
        /// Its size in symbols.
        size: usize,
        /// The size of the first piece.
        expected: usize,
    },
    /// Coding vector length does not match the piece count.
    #[error("coding vector length {0} does not match piece count {1}")]
    InvalidCodingVectorLength(usize, usize),
    /// Piece length does not match the configured piece size.
    #[error("piece length {0} does not match piece size {1}")]
    InvalidPieceLength(usize, usize),
    /// The requested piece index is out of range.
    #[error("piece index {0} out of range (piece count {1})")]
    IndexOutOfRange(usize, usize),
    /// The requested piece can not be recovered yet.
    #[error("piece {0} not yet decoded")]
    NotYetDecoded(usize),
    /// Not enough linearly independent pieces were received.
    #[error("more useful pieces are required: rank {0} of {1}")]
    MoreDataRequired(usize, usize),
    /// The recoder has no pieces to combine.
    #[error("recoder buffer is empty")]
    EmptyBuffer,
    /// A serialized piece has an unexpected length.
    #[error("invalid wire length {0}, expected {1}")]
    InvalidWireLength(usize, usize),
    /// The decoded data or a serialized value is malformed.
    #[error("invalid encoding")]
    InvalidEncoding,
}

/// Marks the end of the original data, before the zero padding.
pub const BOUNDARY_MARKER: u8 = 0x81;
