//! Module that implements the RLNC encoding algorithm.

use rand::Rng;
use tracing::trace;

use crate::{
    auth::Signer,
    coding::{generate_coding_vector, generate_systematic_vector, linear_combination},
    common::RLNCError,
    primitives::{Chunks, field::Field, packet::CodedPiece},
};

type Piece<K> = CodedPiece<<K as Signer>::Field, <K as Signer>::Signature>;

/// RLNC Encoder. Holds the original pieces and the signing key, and emits an unbounded stream of
/// signed coded pieces.
#[derive(Debug, Clone)]
pub struct Encoder<K: Signer> {
    /// The original pieces, each `piece_size` symbols long.
    pieces: Vec<Vec<K::Field>>,
    /// The number of original pieces (also known as the generation size).
    piece_count: usize,
    /// The number of symbols in each piece.
    piece_size: usize,
    /// Zero bytes appended by chunking, if the pieces came from a byte stream.
    padding: usize,
    /// Signs every emitted piece.
    signer: K,
    /// Whether the first `piece_count` pieces are emitted uncoded.
    systematic: bool,
    /// Index of the next systematic piece.
    cursor: usize,
}

impl<K: Signer> Encoder<K> {
    /// Creates a new encoder over the given original pieces.
    ///
    /// # Arguments
    ///
    /// - `pieces` - The original pieces. All must have the same, non-zero length.
    /// - `signer` - Signs the emitted pieces.
    pub fn new(pieces: Vec<Vec<K::Field>>, signer: K) -> Result<Self, RLNCError> {
        let Some(first) = pieces.first() else {
            return Err(RLNCError::EmptyPieces);
        };

        let piece_size = first.len();
        if piece_size == 0 {
            return Err(RLNCError::ZeroPieceSize);
        }

        if let Some((index, piece)) =
            pieces.iter().enumerate().find(|(_, piece)| piece.len() != piece_size)
        {
            return Err(RLNCError::InconsistentPieceSize {
                index,
                size: piece.len(),
                expected: piece_size,
            });
        }

        Ok(Self::with_padding(pieces, piece_size, 0, signer))
    }

    /// Creates a new encoder that splits `data` into `piece_count` pieces.
    pub fn from_bytes(data: &[u8], piece_count: usize, signer: K) -> Result<Self, RLNCError> {
        Ok(Self::from_chunks(Chunks::new(data, piece_count)?, signer))
    }

    /// Creates a new encoder that splits `data` into pieces of `piece_size` symbols each.
    pub fn from_bytes_with_piece_size(
        data: &[u8],
        piece_size: usize,
        signer: K,
    ) -> Result<Self, RLNCError> {
        Ok(Self::from_chunks(Chunks::with_piece_size(data, piece_size)?, signer))
    }

    fn from_chunks(chunks: Chunks<K::Field>, signer: K) -> Self {
        let piece_size = chunks.symbols_per_chunk();
        let padding = chunks.padding();

        Self::with_padding(chunks.into_symbols(), piece_size, padding, signer)
    }

    fn with_padding(
        pieces: Vec<Vec<K::Field>>,
        piece_size: usize,
        padding: usize,
        signer: K,
    ) -> Self {
        Self {
            piece_count: pieces.len(),
            pieces,
            piece_size,
            padding,
            signer,
            systematic: false,
            cursor: 0,
        }
    }

    /// Enables or disables systematic mode. In systematic mode the first `piece_count` pieces
    /// returned by [`get_coded_piece`](Self::get_coded_piece) are the original pieces, in order,
    /// with unit coding vectors.
    pub fn with_systematic(mut self, systematic: bool) -> Self {
        self.systematic = systematic;
        self
    }

    /// Returns the number of original pieces.
    pub const fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Returns the number of symbols in each piece.
    pub const fn piece_size(&self) -> usize {
        self.piece_size
    }

    /// Returns the number of symbols in a coded piece, coding vector included.
    pub const fn coded_piece_len(&self) -> usize {
        self.piece_count + self.piece_size
    }

    /// Returns the number of symbols a decoder must receive at minimum.
    pub const fn decodable_len(&self) -> usize {
        self.piece_count * self.coded_piece_len()
    }

    /// Returns the number of zero bytes added when chunking.
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Returns the verifier matching this encoder's signer.
    pub fn verifier(&self) -> &K::Verifier {
        self.signer.verifier()
    }

    /// Returns the original pieces.
    pub fn pieces(&self) -> &[Vec<K::Field>] {
        &self.pieces
    }

    /// Returns the next coded piece. Systematic pieces come first if enabled, then random linear
    /// combinations, without end.
    pub fn get_coded_piece<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Piece<K> {
        if self.systematic && self.cursor < self.piece_count {
            let index = self.cursor;
            self.cursor += 1;

            let coding_vector = generate_systematic_vector(index, self.piece_count);
            let piece = self.pieces[index].clone();
            let signature = self.signer.sign(&piece, &coding_vector, rng);

            trace!(index, "emitting systematic piece");
            return CodedPiece::new(piece, coding_vector, signature);
        }

        let coding_vector = generate_coding_vector(rng, self.piece_count);
        self.combine(coding_vector, rng)
    }

    /// Encodes the data with the given coding vector using linear combinations.
    ///
    /// Given original pieces X₁, X₂, ..., Xₖ and coefficients c₁, c₂, ..., cₖ, the coded piece Y
    /// is computed as:
    ///
    /// ```text
    /// Y[j] = Σᵢ₌₁ᵏ cᵢ · Xᵢ[j]
    /// ```
    ///
    /// # Algorithm Complexity
    /// O(k * n) where k is the piece count and n is the piece size.
    pub fn encode_with_vector<R: Rng + ?Sized>(
        &self,
        coding_vector: &[K::Field],
        rng: &mut R,
    ) -> Result<Piece<K>, RLNCError> {
        if coding_vector.len() != self.piece_count {
            return Err(RLNCError::InvalidCodingVectorLength(
                coding_vector.len(),
                self.piece_count,
            ));
        }

        Ok(self.combine(coding_vector.to_vec(), rng))
    }

    fn combine<R: Rng + ?Sized>(&self, coding_vector: Vec<K::Field>, rng: &mut R) -> Piece<K> {
        let rows = self.pieces.iter().map(Vec::as_slice);
        let piece = linear_combination(rows, &coding_vector, self.piece_size);
        let signature = self.signer.sign(&piece, &coding_vector, rng);

        CodedPiece::new(piece, coding_vector, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::NoAuth,
        primitives::{field::Scalar, galois::GF256},
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn scalars(values: &[u64]) -> Vec<Scalar> {
        values.iter().copied().map(Scalar::from).collect()
    }

    #[test]
    fn test_encoder() {
        let data = b"Hello, world!";
        let encoder = Encoder::from_bytes(data, 3, NoAuth::<GF256>::new()).unwrap();

        assert_eq!(encoder.piece_count(), 3);
        assert_eq!(encoder.piece_size(), 5);
        assert_eq!(encoder.padding(), 1);
        assert_eq!(encoder.coded_piece_len(), 8);
        assert_eq!(encoder.decodable_len(), 24);

        let mut encoder = encoder;
        let piece = encoder.get_coded_piece(&mut rand::rng());
        assert_eq!(piece.piece.len(), encoder.piece_size());
        assert_eq!(piece.coding_vector.len(), encoder.piece_count());
    }

    #[test]
    fn test_encoder_errors() {
        let signer = NoAuth::<Scalar>::new();

        assert_eq!(Encoder::new(vec![], signer).unwrap_err(), RLNCError::EmptyPieces);
        assert_eq!(Encoder::new(vec![vec![]], signer).unwrap_err(), RLNCError::ZeroPieceSize);
        assert_eq!(
            Encoder::new(vec![scalars(&[1, 2]), scalars(&[3])], signer).unwrap_err(),
            RLNCError::InconsistentPieceSize { index: 1, size: 1, expected: 2 }
        );
        assert!(matches!(
            Encoder::from_bytes(b"", 2, signer).unwrap_err(),
            RLNCError::Chunks(_)
        ));
        assert!(matches!(
            Encoder::from_bytes_with_piece_size(b"data", 0, signer).unwrap_err(),
            RLNCError::Chunks(_)
        ));
    }

    #[test]
    fn test_encode_with_vector() {
        let pieces = vec![scalars(&[1, 2]), scalars(&[3, 4]), scalars(&[5, 6])];
        let encoder = Encoder::new(pieces, NoAuth::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let piece = encoder.encode_with_vector(&scalars(&[1, 0, 2]), &mut rng).unwrap();
        assert_eq!(piece.piece, scalars(&[11, 14]));
        assert_eq!(piece.coding_vector, scalars(&[1, 0, 2]));

        assert_eq!(
            encoder.encode_with_vector(&scalars(&[1, 0]), &mut rng).unwrap_err(),
            RLNCError::InvalidCodingVectorLength(2, 3)
        );
    }

    #[test]
    fn test_systematic_then_coded() {
        let pieces = vec![scalars(&[1, 2]), scalars(&[3, 4])];
        let mut encoder =
            Encoder::new(pieces.clone(), NoAuth::new()).unwrap().with_systematic(true);
        let mut rng = StdRng::seed_from_u64(7);

        for (i, original) in pieces.iter().enumerate() {
            let piece = encoder.get_coded_piece(&mut rng);
            assert_eq!(piece.is_systematic(), Some(i));
            assert_eq!(&piece.piece, original);
        }

        // The cursor is exhausted; coded pieces follow.
        let piece = encoder.get_coded_piece(&mut rng);
        let expected = linear_combination(
            pieces.iter().map(Vec::as_slice),
            &piece.coding_vector,
            encoder.piece_size(),
        );
        assert_eq!(piece.piece, expected);
    }

    #[test]
    fn test_systematic_off_by_default() {
        let mut encoder = Encoder::new(vec![scalars(&[1]), scalars(&[2])], NoAuth::new()).unwrap();
        let piece = encoder.get_coded_piece(&mut StdRng::seed_from_u64(3));

        // A random coding vector over the scalar field is a unit vector with negligible probability.
        assert_eq!(piece.is_systematic(), None);
    }
}
