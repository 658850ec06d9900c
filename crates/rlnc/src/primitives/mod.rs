//! RLNC primitives.
pub mod field;
pub mod galois;
pub mod packet;
use field::Field;

use crate::common::BOUNDARY_MARKER;

/// A collection of equally sized, prepared chunks of data. Each chunk of data holds the symbols.
/// This type represents correctly sized and padded chunks of data that are ready to be encoded.
#[derive(Debug)]
pub struct Chunks<F: Field> {
    inner: Vec<Chunk<F>>,
    chunk_size: usize,
    padding: usize,
}

/// Errors that can occur when creating a new collection of chunks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunksError {
    /// The data is empty.
    #[error("data is empty")]
    EmptyData,
    /// The chunk count is zero.
    #[error("chunk count is zero")]
    ZeroChunkCount,
    /// The chunk size is zero.
    #[error("chunk size is zero")]
    ZeroChunkSize,
}

impl<F: Field> Chunks<F> {
    /// Creates a new collection of chunks from a slice of bytes. The data is split into
    /// `chunk_count` equally sized chunks, and then converted into symbols of the field `F`.
    ///
    /// A [`BOUNDARY_MARKER`] is appended to the data before padding with zeros, so that the
    /// original length can be recovered after decoding.
    pub fn new(data: &[u8], chunk_count: usize) -> Result<Self, ChunksError> {
        if data.is_empty() {
            return Err(ChunksError::EmptyData);
        }

        if chunk_count == 0 {
            return Err(ChunksError::ZeroChunkCount);
        }

        // Chunk size in bytes to accommodate original data + boundary marker, rounded up to a
        // multiple of `F::SAFE_CAPACITY` for symbol packing.
        let chunk_size = (data.len() + 1).div_ceil(chunk_count);
        let chunk_size = chunk_size.div_ceil(F::SAFE_CAPACITY) * F::SAFE_CAPACITY;

        Ok(Self::pack(data, chunk_count, chunk_size))
    }

    /// Creates a new collection of chunks of `symbols_per_chunk` symbols each. The chunk count is
    /// derived from the data length.
    pub fn with_piece_size(data: &[u8], symbols_per_chunk: usize) -> Result<Self, ChunksError> {
        if data.is_empty() {
            return Err(ChunksError::EmptyData);
        }

        if symbols_per_chunk == 0 {
            return Err(ChunksError::ZeroChunkSize);
        }

        let chunk_size = symbols_per_chunk * F::SAFE_CAPACITY;
        let chunk_count = (data.len() + 1).div_ceil(chunk_size);

        Ok(Self::pack(data, chunk_count, chunk_size))
    }

    fn pack(data: &[u8], chunk_count: usize, chunk_size: usize) -> Self {
        let mut data = Vec::from(data);
        data.push(BOUNDARY_MARKER);

        let padded_len = chunk_size * chunk_count;
        let padding = padded_len - data.len();

        // Pad the rest with zeros if needed
        data.resize(padded_len, 0);

        let inner = data.chunks_exact(chunk_size).map(Chunk::from_bytes).collect();

        Self { inner, chunk_size, padding }
    }

    /// Returns the size of the chunks in bytes.
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of symbols in each chunk.
    pub const fn symbols_per_chunk(&self) -> usize {
        self.chunk_size / F::SAFE_CAPACITY
    }

    /// Returns the number of zero bytes added after the boundary marker.
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Returns the inner chunks.
    pub fn inner(&self) -> &[Chunk<F>] {
        &self.inner
    }

    /// Returns the number of chunks in the collection.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Consumes the collection and returns the symbols of every chunk.
    pub fn into_symbols(self) -> Vec<Vec<F>> {
        self.inner.into_iter().map(|chunk| chunk.symbols).collect()
    }
}

/// A chunk of data.
#[derive(Debug, Clone)]
pub struct Chunk<F: Field> {
    symbols: Vec<F>,
}

impl<F: Field> Chunk<F> {
    /// Creates a new chunk from a slice of bytes, and converts it into a vector of symbols.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self { symbols: bytes.chunks(F::SAFE_CAPACITY).map(|c| F::from_bytes(c)).collect() }
    }

    /// Returns the symbols of the chunk.
    pub fn symbols(&self) -> &[F] {
        &self.symbols
    }
}
