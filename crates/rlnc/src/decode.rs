//! Module that implements the RLNC decoding algorithm.

use tracing::{debug, warn};

use crate::{
    auth::Verifier,
    common::{BOUNDARY_MARKER, RLNCError},
    matrix::Matrix,
    primitives::{field::Field, packet::CodedPiece},
};

/// The outcome of handing a coded piece to the [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOutcome {
    /// The piece was linearly independent of everything received so far; the rank grew by one.
    Innovative,
    /// The piece was a linear combination of pieces already received and was discarded.
    Redundant,
    /// The decoder already had full rank. The piece was ignored.
    AlreadyDecoded,
    /// The piece failed signature verification and was dropped.
    Unverified,
}

impl PieceOutcome {
    /// Returns true if the piece increased the rank.
    pub const fn is_innovative(&self) -> bool {
        matches!(self, Self::Innovative)
    }
}

/// The two parallel matrices of a decoding session. Row `i` of `coeffs` is the coding vector of
/// the piece stored in row `i` of `coded`.
#[derive(Debug, Clone)]
pub struct DecoderState<F> {
    /// The number of original pieces.
    piece_count: usize,
    /// Coding vectors, `rows × piece_count`.
    coeffs: Matrix<F>,
    /// Coded payloads, `rows × piece_size`.
    coded: Matrix<F>,
}

impl<F: Field> DecoderState<F> {
    /// Creates an empty state for `piece_count` pieces of `piece_size` symbols each.
    pub const fn new(piece_count: usize, piece_size: usize) -> Self {
        Self { piece_count, coeffs: Matrix::new(piece_count), coded: Matrix::new(piece_size) }
    }

    /// Appends a received piece as a new row of both matrices, without reducing.
    ///
    /// # Panics
    /// If the lengths do not match the matrix dimensions.
    pub fn add_piece(&mut self, coding_vector: Vec<F>, piece: Vec<F>) {
        self.coeffs.push_row(coding_vector);
        self.coded.push_row(piece);
    }

    /// Brings the coefficient matrix to reduced row echelon form, applying every row operation to
    /// the coded matrix as well, and drops rows that carry no information.
    pub fn rref(&mut self) {
        self.clean_forward();
        self.clean_backward();
        self.remove_zero_rows();
    }

    /// Forward elimination with partial pivoting. The pivot for each column is the first row at
    /// or below the current pivot row with a non-zero entry in that column. Columns without such
    /// a row are skipped.
    fn clean_forward(&mut self) {
        let rows = self.coeffs.rows();
        let mut pivot_row = 0;

        for col in 0..self.coeffs.cols() {
            if pivot_row >= rows {
                break;
            }

            let Some(found) = (pivot_row..rows).find(|&r| !self.coeffs.get(r, col).is_zero())
            else {
                continue;
            };

            if found != pivot_row {
                self.coeffs.swap_rows(found, pivot_row);
                self.coded.swap_rows(found, pivot_row);
            }

            let Some(pivot_inv) = self.coeffs.get(pivot_row, col).inverse() else {
                continue;
            };

            for row in pivot_row + 1..rows {
                let entry = self.coeffs.get(row, col);
                if entry.is_zero() {
                    continue;
                }

                let quotient = entry * pivot_inv;
                self.coeffs.sub_scaled_row(row, pivot_row, quotient);
                self.coded.sub_scaled_row(row, pivot_row, quotient);
            }

            pivot_row += 1;
        }
    }

    /// Back substitution from the last pivot to the first: zero the entries above each pivot,
    /// then normalize the pivot to one.
    fn clean_backward(&mut self) {
        for row in (0..self.coeffs.rows()).rev() {
            let Some(col) = self.coeffs.leading_column(row) else {
                continue;
            };

            let pivot = self.coeffs.get(row, col);
            let Some(pivot_inv) = pivot.inverse() else {
                continue;
            };

            for above in 0..row {
                let entry = self.coeffs.get(above, col);
                if entry.is_zero() {
                    continue;
                }

                let quotient = entry * pivot_inv;
                self.coeffs.sub_scaled_row(above, row, quotient);
                self.coded.sub_scaled_row(above, row, quotient);
            }

            if !pivot.is_one() {
                self.coeffs.scale_row(row, pivot_inv);
                self.coded.scale_row(row, pivot_inv);
            }
        }
    }

    /// Removes rows whose coefficients reduced to zero, keeping the order of the others.
    fn remove_zero_rows(&mut self) {
        let mut kept = 0;

        for row in 0..self.coeffs.rows() {
            if self.coeffs.is_zero_row(row) {
                continue;
            }

            if row != kept {
                self.coeffs.swap_rows(kept, row);
                self.coded.swap_rows(kept, row);
            }
            kept += 1;
        }

        self.coeffs.truncate(kept);
        self.coded.truncate(kept);
    }

    /// Returns the rank, i.e. the number of rows left after reduction.
    #[inline]
    pub fn rank(&self) -> usize {
        self.coeffs.rows()
    }

    /// Returns the coefficient matrix.
    pub const fn coeff_matrix(&self) -> &Matrix<F> {
        &self.coeffs
    }

    /// Returns the coded data matrix.
    pub const fn coded_matrix(&self) -> &Matrix<F> {
        &self.coded
    }

    /// Returns original piece `index` if it can be recovered.
    ///
    /// With full rank every row is a unit row and row `index` holds piece `index`. Before that, a
    /// piece is available once some row reduced to exactly the unit vector for `index`. This
    /// relies on [`rref`](Self::rref) having normalized the pivots.
    pub fn get_piece(&self, index: usize) -> Result<&[F], RLNCError> {
        if index >= self.piece_count {
            return Err(RLNCError::IndexOutOfRange(index, self.piece_count));
        }

        if self.rank() >= self.piece_count {
            return Ok(self.coded.row(index));
        }

        (0..self.rank())
            .find(|&row| self.is_unit_row(row, index))
            .map(|row| self.coded.row(row))
            .ok_or(RLNCError::NotYetDecoded(index))
    }

    fn is_unit_row(&self, row: usize, index: usize) -> bool {
        self.coeffs
            .row(row)
            .iter()
            .enumerate()
            .all(|(col, c)| if col == index { c.is_one() } else { c.is_zero() })
    }
}

/// RLNC Decoder. Verifies incoming pieces, feeds them into an incremental Gaussian elimination,
/// and hands out original pieces as soon as they can be recovered.
#[derive(Debug)]
pub struct Decoder<V: Verifier> {
    /// Verifier for incoming pieces.
    verifier: V,
    /// The matrices of received pieces.
    state: DecoderState<V::Field>,
    /// The number of symbols in each piece.
    piece_size: usize,
    /// The number of original pieces, also known as the generation size.
    piece_count: usize,
    /// The number of pieces accepted into the matrices, including redundant ones.
    received: usize,
}

impl<V: Verifier> Decoder<V> {
    /// Creates a new decoder for the given piece size (in symbols) and piece count.
    pub fn new(piece_size: usize, piece_count: usize, verifier: V) -> Result<Self, RLNCError> {
        if piece_size == 0 {
            return Err(RLNCError::ZeroPieceSize);
        }

        if piece_count == 0 {
            return Err(RLNCError::ZeroPieceCount);
        }

        Ok(Self {
            verifier,
            state: DecoderState::new(piece_count, piece_size),
            piece_size,
            piece_count,
            received: 0,
        })
    }

    /// Adds a coded piece.
    ///
    /// Pieces that fail verification, or arrive after decoding completed, are dropped and
    /// reported through the returned [`PieceOutcome`]. Only a piece of the wrong shape is an
    /// error.
    pub fn add_piece(
        &mut self,
        piece: CodedPiece<V::Field, V::Signature>,
    ) -> Result<PieceOutcome, RLNCError> {
        if self.is_decoded() {
            debug!(received = self.received, "ignoring piece, already decoded");
            return Ok(PieceOutcome::AlreadyDecoded);
        }

        if piece.coding_vector.len() != self.piece_count {
            return Err(RLNCError::InvalidCodingVectorLength(
                piece.coding_vector.len(),
                self.piece_count,
            ));
        }

        if piece.piece.len() != self.piece_size {
            return Err(RLNCError::InvalidPieceLength(piece.piece.len(), self.piece_size));
        }

        if !self.verifier.verify(&piece) {
            warn!(received = self.received, rank = self.rank(), "dropping unverified piece");
            return Ok(PieceOutcome::Unverified);
        }

        let rank = self.rank();
        let CodedPiece { piece, coding_vector, .. } = piece;

        self.state.add_piece(coding_vector, piece);
        self.received += 1;
        self.state.rref();

        if self.rank() > rank {
            debug!(rank = self.rank(), required = self.required(), "innovative piece");
            Ok(PieceOutcome::Innovative)
        } else {
            debug!(rank, received = self.received, "redundant piece");
            Ok(PieceOutcome::Redundant)
        }
    }

    /// Decodes a coded piece. If the decoder has enough linearly independent pieces after this
    /// one, returns the original data.
    pub fn decode(
        &mut self,
        piece: CodedPiece<V::Field, V::Signature>,
    ) -> Result<Option<Vec<u8>>, RLNCError> {
        if self.add_piece(piece)?.is_innovative() && self.is_decoded() {
            return self.get_data().map(Some);
        }

        Ok(None)
    }

    /// Returns the number of linearly independent pieces received.
    #[inline]
    pub fn rank(&self) -> usize {
        self.state.rank()
    }

    /// Returns the number of pieces accepted so far, including redundant ones.
    #[inline]
    pub const fn received(&self) -> usize {
        self.received
    }

    /// Returns true if the original data can be recovered.
    #[inline]
    pub fn is_decoded(&self) -> bool {
        self.rank() >= self.piece_count
    }

    /// Returns how many more innovative pieces are needed.
    #[inline]
    pub fn required(&self) -> usize {
        self.piece_count - self.rank()
    }

    /// Returns the number of symbols in each piece.
    #[inline]
    pub const fn piece_length(&self) -> usize {
        self.piece_size
    }

    /// Returns the number of original pieces.
    #[inline]
    pub const fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Returns the verifier used for incoming pieces.
    pub const fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Returns the decoding matrices.
    pub const fn state(&self) -> &DecoderState<V::Field> {
        &self.state
    }

    /// Returns original piece `index`, see [`DecoderState::get_piece`].
    pub fn get_piece(&self, index: usize) -> Result<&[V::Field], RLNCError> {
        self.state.get_piece(index)
    }

    /// Returns all original pieces in order.
    pub fn get_pieces(&self) -> Result<Vec<Vec<V::Field>>, RLNCError> {
        if !self.is_decoded() {
            return Err(RLNCError::MoreDataRequired(self.rank(), self.piece_count));
        }

        (0..self.piece_count).map(|i| self.get_piece(i).map(<[_]>::to_vec)).collect()
    }

    /// Returns the original data, with the boundary marker and zero padding removed.
    pub fn get_data(&self) -> Result<Vec<u8>, RLNCError> {
        if !self.is_decoded() {
            return Err(RLNCError::MoreDataRequired(self.rank(), self.piece_count));
        }

        let mut decoded = Vec::with_capacity(
            self.piece_count * self.piece_size * <V::Field as Field>::SAFE_CAPACITY,
        );
        for index in 0..self.piece_count {
            for symbol in self.get_piece(index)? {
                decoded.extend_from_slice(&symbol.to_bytes());
            }
        }

        // Strip the zero padding, then the marker that precedes it.
        let Some(end) = decoded.iter().rposition(|&b| b != 0) else {
            return Err(RLNCError::InvalidEncoding);
        };

        if decoded[end] != BOUNDARY_MARKER {
            return Err(RLNCError::InvalidEncoding);
        }

        decoded.truncate(end);
        Ok(decoded)
    }
}
