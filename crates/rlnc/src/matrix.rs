use crate::{
    coding::{linear_combination, scale, scale_sub},
    primitives::field::Field,
};

/// A dense matrix stored as an arena of rows. Swapping and removing rows only moves row handles,
/// never the row contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<F> {
    /// The rows of the matrix, each `cols` long.
    data: Vec<Vec<F>>,
    /// The number of columns.
    cols: usize,
}

impl<F: Field> Matrix<F> {
    /// Creates an empty matrix with the given number of columns.
    pub const fn new(cols: usize) -> Self {
        Self { data: Vec::new(), cols }
    }

    /// Creates a matrix from its rows.
    ///
    /// # Panics
    /// If the rows are not all `cols` long.
    pub fn from_rows(rows: Vec<Vec<F>>, cols: usize) -> Self {
        assert!(rows.iter().all(|row| row.len() == cols), "row length mismatch");
        Self { data: rows, cols }
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[F] {
        &self.data[i]
    }

    /// Returns the entry at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> F {
        self.data[i][j]
    }

    /// Appends a row.
    ///
    /// # Panics
    /// If the row is not `cols` long.
    pub fn push_row(&mut self, row: Vec<F>) {
        assert_eq!(row.len(), self.cols, "row length mismatch");
        self.data.push(row);
    }

    /// Returns true if every entry of row `i` is zero.
    pub fn is_zero_row(&self, i: usize) -> bool {
        self.data[i].iter().all(Field::is_zero)
    }

    /// Returns the column of the first non-zero entry of row `i`.
    pub fn leading_column(&self, i: usize) -> Option<usize> {
        self.data[i].iter().position(|c| !c.is_zero())
    }

    /// Returns the matrix product `self * other`.
    ///
    /// # Panics
    /// If the inner dimensions do not match.
    pub fn multiply(&self, other: &Self) -> Self {
        assert_eq!(self.cols, other.rows(), "matrix dimensions do not match");

        let data = self
            .data
            .iter()
            .map(|row| linear_combination(other.data.iter().map(Vec::as_slice), row, other.cols))
            .collect();

        Self { data, cols: other.cols }
    }

    /// Consumes the matrix and returns its rows.
    pub fn into_rows(self) -> Vec<Vec<F>> {
        self.data
    }

    #[inline]
    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    #[inline]
    pub(crate) fn truncate(&mut self, rows: usize) {
        self.data.truncate(rows);
    }

    #[inline]
    pub(crate) fn scale_row(&mut self, i: usize, scalar: F) {
        scale(&mut self.data[i], scalar);
    }

    /// Computes `row[target] -= row[source] * factor`.
    pub(crate) fn sub_scaled_row(&mut self, target: usize, source: usize, factor: F) {
        debug_assert_ne!(target, source);

        let (target, source) = if target < source {
            let (head, tail) = self.data.split_at_mut(source);
            (&mut head[target], &tail[0])
        } else {
            let (head, tail) = self.data.split_at_mut(target);
            (&mut tail[0], &head[source])
        };

        scale_sub(target, source, factor);
    }
}
