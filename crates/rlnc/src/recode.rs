//! Module that implements recoding: re-combining coded pieces at an intermediate node without
//! decoding them and without the signing key.

use rand::Rng;
use tracing::{debug, warn};

use crate::{
    auth::Verifier,
    coding::{generate_coding_vector, scale_add},
    common::RLNCError,
    primitives::{field::Field, packet::CodedPiece},
};

type Piece<V> = CodedPiece<<V as Verifier>::Field, <V as Verifier>::Signature>;

/// RLNC Recoder. Buffers verified coded pieces and emits fresh random combinations of them,
/// with signatures derived homomorphically.
#[derive(Debug, Clone)]
pub struct Recoder<V: Verifier> {
    /// The verified pieces received so far.
    pieces: Vec<Piece<V>>,
    /// The number of symbols in each piece.
    piece_size: usize,
    /// The number of original pieces, i.e. the coding vector length.
    piece_count: usize,
    /// Verifies incoming pieces and combines signatures.
    verifier: V,
}

impl<V: Verifier> Recoder<V> {
    /// Creates an empty recoder for pieces of `piece_size` symbols coded over `piece_count`
    /// original pieces.
    pub fn new(piece_size: usize, piece_count: usize, verifier: V) -> Result<Self, RLNCError> {
        if piece_size == 0 {
            return Err(RLNCError::ZeroPieceSize);
        }

        if piece_count == 0 {
            return Err(RLNCError::ZeroPieceCount);
        }

        Ok(Self { pieces: Vec::new(), piece_size, piece_count, verifier })
    }

    /// Creates a recoder and feeds it the given pieces. Pieces that fail verification or have
    /// the wrong dimensions are dropped.
    pub fn from_pieces(
        piece_size: usize,
        piece_count: usize,
        pieces: impl IntoIterator<Item = Piece<V>>,
        verifier: V,
    ) -> Result<Self, RLNCError> {
        let mut recoder = Self::new(piece_size, piece_count, verifier)?;
        for piece in pieces {
            recoder.add_piece(piece);
        }
        Ok(recoder)
    }

    /// Verifies and buffers a coded piece. Returns `false` and drops the piece if its dimensions
    /// differ from the configured ones or its signature is invalid.
    pub fn add_piece(&mut self, piece: Piece<V>) -> bool {
        if piece.piece.len() != self.piece_size || piece.coding_vector.len() != self.piece_count {
            warn!(
                piece_size = piece.piece.len(),
                piece_count = piece.coding_vector.len(),
                "dropping piece with mismatched dimensions"
            );
            return false;
        }

        if !self.verifier.verify(&piece) {
            warn!(buffered = self.pieces.len(), "dropping unverified piece");
            return false;
        }

        self.pieces.push(piece);
        true
    }

    /// Returns a random linear combination of the buffered pieces. The coding vector of the
    /// result is expressed over the original pieces, so decoders downstream need no knowledge of
    /// this recoder.
    pub fn get_coded_piece<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Piece<V>, RLNCError> {
        if self.pieces.is_empty() {
            return Err(RLNCError::EmptyBuffer);
        }

        let coefficients: Vec<V::Field> = generate_coding_vector(rng, self.pieces.len());

        // Combine `piece ‖ coding_vector` of every buffered piece in one pass.
        let mut combined = vec![V::Field::ZERO; self.piece_size + self.piece_count];
        for (piece, &coefficient) in self.pieces.iter().zip(&coefficients) {
            scale_add(&mut combined, &piece.flatten(), coefficient);
        }

        let signatures: Vec<_> = self.pieces.iter().map(|p| p.signature.clone()).collect();
        let signature = self.verifier.combine(&signatures, &coefficients);

        let coding_vector = combined.split_off(self.piece_size);
        debug!(buffered = self.pieces.len(), "emitting recoded piece");

        Ok(CodedPiece::new(combined, coding_vector, signature))
    }

    /// Returns the number of buffered pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if no piece has been buffered.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns the number of symbols in each piece.
    pub const fn piece_size(&self) -> usize {
        self.piece_size
    }

    /// Returns the number of original pieces.
    pub const fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Returns the buffered pieces.
    pub fn pieces(&self) -> &[Piece<V>] {
        &self.pieces
    }

    /// Returns the verifier.
    pub const fn verifier(&self) -> &V {
        &self.verifier
    }
}
