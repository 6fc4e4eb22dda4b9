use std::collections::HashMap;

use ndarray::prelude::*;

/// Row-major sparse matrix in CSR layout
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    n_cols: usize,
    // Offsets into `indices` and `data`, of length `nrows + 1`
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl SparseMatrix {
    pub fn new(n_cols: usize) -> Self {
        Self {
            n_cols,
            indptr: vec![0],
            indices: vec![],
            data: vec![],
        }
    }

    /// Appends a row made of `(column, value)` entries.
    ///
    /// Entries are stored sorted by column, zero values are skipped.
    pub fn push_row<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut entries: Vec<(usize, f64)> = entries
            .into_iter()
            .filter(|(_, value)| *value != 0.)
            .collect();
        entries.sort_by_key(|(col, _)| *col);
        for (col, value) in entries {
            debug_assert!(col < self.n_cols);
            self.indices.push(col);
            self.data.push(value);
        }
        self.indptr.push(self.indices.len());
    }

    pub fn nrows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn ncols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Number of stored (non-zero) values
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.indptr[row];
        let end = self.indptr[row + 1];
        self.indices[start..end]
            .iter()
            .cloned()
            .zip(self.data[start..end].iter().cloned())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.row(row)
            .find(|(c, _)| *c == col)
            .map(|(_, value)| value)
            .unwrap_or(0.)
    }

    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.; self.n_cols];
        for (col, value) in self.indices.iter().zip(self.data.iter()) {
            sums[*col] += *value;
        }
        sums
    }

    /// Builds the matrix made of the given columns, in the given order
    pub fn select_columns(&self, columns: &[usize]) -> SparseMatrix {
        let new_positions: HashMap<usize, usize> = columns
            .iter()
            .enumerate()
            .map(|(position, col)| (*col, position))
            .collect();
        let mut selected = SparseMatrix::new(columns.len());
        for row in 0..self.nrows() {
            selected.push_row(
                self.row(row)
                    .filter_map(|(col, value)| new_positions.get(&col).map(|pos| (*pos, value))),
            );
        }
        selected
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros(self.shape());
        for row in 0..self.nrows() {
            for (col, value) in self.row(row) {
                dense[[row, col]] = value;
            }
        }
        dense
    }

    pub fn row_to_dense(&self, row: usize) -> Array1<f64> {
        let mut dense = Array1::zeros(self.n_cols);
        for (col, value) in self.row(row) {
            dense[col] = value;
        }
        dense
    }
}
