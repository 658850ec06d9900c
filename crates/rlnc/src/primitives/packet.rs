use super::field::Field;
use crate::{auth::Signature, coding::is_systematic, common::RLNCError};

/// A coded piece: a linear combination of the original pieces, the coefficients that produced it,
/// and a signature over both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedPiece<F, S> {
    /// The actual data payload, containing a linear combination of the original pieces.
    pub piece: Vec<F>,
    /// The coding vector (coefficients). Entry `i` is the coefficient of original piece `i`.
    pub coding_vector: Vec<F>,
    /// The homomorphic signature over `piece` and `coding_vector`.
    pub signature: S,
}

impl<F: Field, S> CodedPiece<F, S> {
    /// Creates a new coded piece.
    pub const fn new(piece: Vec<F>, coding_vector: Vec<F>, signature: S) -> Self {
        Self { piece, coding_vector, signature }
    }

    /// Number of symbols in the payload and coding vector together.
    pub fn data_len(&self) -> usize {
        self.piece.len() + self.coding_vector.len()
    }

    /// Returns the concatenation `piece ‖ coding_vector`. Recoding combines pieces in this form,
    /// so the coding vector goes through the same linear map as the data.
    pub fn flatten(&self) -> Vec<F> {
        let mut flat = Vec::with_capacity(self.data_len());
        flat.extend_from_slice(&self.piece);
        flat.extend_from_slice(&self.coding_vector);
        flat
    }

    /// If this piece is systematic, returns the index of the original piece it carries.
    pub fn is_systematic(&self) -> Option<usize> {
        is_systematic(&self.coding_vector)
    }

    /// Number of non-zero coefficients.
    pub fn degree(&self) -> usize {
        self.coding_vector.iter().filter(|c| !c.is_zero()).count()
    }
}

impl<F: Field, S: Signature> CodedPiece<F, S> {
    /// Length of the wire encoding for the given piece size and count.
    pub const fn encoded_len(piece_size: usize, piece_count: usize) -> usize {
        (piece_size + piece_count) * F::ENCODED_LEN + S::ENCODED_LEN
    }

    /// Serializes the piece as `piece ‖ coding_vector ‖ signature`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data_len() * F::ENCODED_LEN + S::ENCODED_LEN);

        for symbol in self.piece.iter().chain(&self.coding_vector) {
            out.extend_from_slice(&symbol.to_canonical_bytes());
        }
        out.extend_from_slice(&self.signature.to_bytes());

        out
    }

    /// Deserializes a piece. The piece size and count are not part of the encoding and must be
    /// known out-of-band.
    pub fn from_bytes(
        bytes: &[u8],
        piece_size: usize,
        piece_count: usize,
    ) -> Result<Self, RLNCError> {
        let expected = Self::encoded_len(piece_size, piece_count);
        if bytes.len() != expected {
            return Err(RLNCError::InvalidWireLength(bytes.len(), expected));
        }

        let (symbols, signature) = bytes.split_at((piece_size + piece_count) * F::ENCODED_LEN);

        let mut symbols = symbols
            .chunks_exact(F::ENCODED_LEN)
            .map(F::from_canonical_bytes)
            .collect::<Option<Vec<_>>>()
            .ok_or(RLNCError::InvalidEncoding)?;
        let coding_vector = symbols.split_off(piece_size);

        let signature = S::from_bytes(signature).ok_or(RLNCError::InvalidEncoding)?;

        Ok(Self { piece: symbols, coding_vector, signature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::Unsigned,
        primitives::{field::Scalar, galois::GF256},
    };

    fn gf(values: &[u8]) -> Vec<GF256> {
        values.iter().copied().map(GF256::from).collect()
    }

    #[test]
    fn test_flatten_and_systematic() {
        let piece = CodedPiece::new(gf(&[7, 8, 9]), gf(&[0, 1, 0]), Unsigned);
        assert_eq!(piece.flatten(), gf(&[7, 8, 9, 0, 1, 0]));
        assert_eq!(piece.is_systematic(), Some(1));
        assert_eq!(piece.degree(), 1);

        let coded = CodedPiece::new(gf(&[7, 8, 9]), gf(&[3, 1, 0]), Unsigned);
        assert_eq!(coded.is_systematic(), None);
        assert_eq!(coded.degree(), 2);
    }

    #[test]
    fn test_wire_roundtrip_scalar() {
        let piece = CodedPiece::new(
            vec![Scalar::from(1u64), Scalar::from(2u64)],
            vec![Scalar::from(3u64), Scalar::from(4u64), Scalar::from(5u64)],
            Unsigned,
        );

        let bytes = piece.to_bytes();
        assert_eq!(bytes.len(), CodedPiece::<Scalar, Unsigned>::encoded_len(2, 3));
        assert_eq!(CodedPiece::from_bytes(&bytes, 2, 3), Ok(piece));
    }

    #[test]
    fn test_wire_rejects_bad_input() {
        let piece = CodedPiece::new(vec![Scalar::from(1u64)], vec![Scalar::from(3u64)], Unsigned);
        let mut bytes = piece.to_bytes();

        assert_eq!(
            CodedPiece::<Scalar, Unsigned>::from_bytes(&bytes[1..], 1, 1),
            Err(RLNCError::InvalidWireLength(63, 64))
        );

        // Non-canonical scalar.
        bytes[..32].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            CodedPiece::<Scalar, Unsigned>::from_bytes(&bytes, 1, 1),
            Err(RLNCError::InvalidEncoding)
        );
    }
}
