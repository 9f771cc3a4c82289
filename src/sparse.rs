//! List-of-lists sparse matrix used as the expansion output.
//!
//! Each row keeps its non-zero entries sorted by column index, which makes
//! incremental `(row, col)` assignment cheap while the matrix is being filled.

#[cfg(feature = "ndarray")]
use ndarray::Array2;

/// Row-major list-of-lists sparse matrix of `f32` values.
#[derive(Clone, Debug, PartialEq)]
pub struct LilMatrix {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<Vec<(usize, f32)>>,
}

impl LilMatrix {
    /// Create an all-zero matrix of the given shape.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: vec![Vec::new(); n_rows],
        }
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Assign a value. Assigning `0.0` removes the stored entry.
    ///
    /// # Panics
    /// Panics if `(row, col)` is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(
            row < self.n_rows && col < self.n_cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            row,
            col,
            self.n_rows,
            self.n_cols
        );
        let entries = &mut self.rows[row];
        match entries.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) if value == 0.0 => {
                entries.remove(pos);
            }
            Ok(pos) => entries[pos].1 = value,
            Err(_) if value == 0.0 => {}
            Err(pos) => entries.insert(pos, (col, value)),
        }
    }

    /// Read a value; missing entries are zero.
    ///
    /// # Panics
    /// Panics if `(row, col)` is outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.n_rows && col < self.n_cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            row,
            col,
            self.n_rows,
            self.n_cols
        );
        let entries = &self.rows[row];
        entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|pos| entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Stored entries of one row as `(col, value)` pairs, sorted by column.
    pub fn row(&self, row: usize) -> &[(usize, f32)] {
        &self.rows[row]
    }

    /// Iterate over all stored entries as `(row, col, value)` triplets.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, entries)| entries.iter().map(move |&(c, v)| (r, c, v)))
    }

    /// Materialize as a dense row-major `Vec` of rows.
    pub fn to_dense(&self) -> Vec<Vec<f32>> {
        self.rows
            .iter()
            .map(|entries| {
                let mut dense = vec![0.0; self.n_cols];
                for &(c, v) in entries {
                    dense[c] = v;
                }
                dense
            })
            .collect()
    }

    /// Materialize as a dense `ndarray` matrix.
    #[cfg(feature = "ndarray")]
    pub fn to_ndarray(&self) -> Array2<f32> {
        let mut out = Array2::<f32>::zeros((self.n_rows, self.n_cols));
        for (r, c, v) in self.iter() {
            out[[r, c]] = v;
        }
        out
    }
}
