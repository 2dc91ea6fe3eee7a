// src/graph/matrix.rs

//! Boolean adjacency storage and its transitive closure.
//!
//! [`SparseBoolMatrix`] is the growable, square adjacency the graph writes
//! edges into. Its allocated dimension (`capacity`) doubles as nodes are
//! added and is never shrunk; the logical size used by the closure is passed
//! in explicitly and is always `<= capacity`.
//!
//! [`Closure`] is the fixed point of repeated boolean squaring of
//! `direct + identity`, cached in both a row and a column layout.

use std::collections::BTreeSet;

use tracing::trace;

/// Capacity a fresh matrix starts with.
pub const INITIAL_CAPACITY: usize = 128;

/// Square boolean matrix stored as one sorted column set per row.
#[derive(Debug, Clone)]
pub struct SparseBoolMatrix {
    rows: Vec<BTreeSet<usize>>,
}

impl Default for SparseBoolMatrix {
    fn default() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }
}

impl SparseBoolMatrix {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: vec![BTreeSet::new(); capacity.max(1)],
        }
    }

    /// Allocated dimension (rows == columns).
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// Grow by doubling until `size` fits. Returns `true` if it grew.
    pub fn grow_to_fit(&mut self, size: usize) -> bool {
        let mut capacity = self.capacity();
        if size <= capacity {
            return false;
        }
        while capacity < size {
            capacity <<= 1;
        }
        trace!(from = self.capacity(), to = capacity, "growing adjacency matrix");
        self.rows.resize_with(capacity, BTreeSet::new);
        true
    }

    /// Set `[row, col] = true`. Setting an entry twice is a no-op.
    ///
    /// Both indices must be below [`capacity`](Self::capacity).
    pub fn set(&mut self, row: usize, col: usize) {
        debug_assert!(col < self.capacity());
        self.rows[row].insert(col);
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.contains(&col))
    }

    /// Column indices set in `row`, ascending.
    pub fn row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows.get(row).into_iter().flatten().copied()
    }

    /// Row indices set in `col`, ascending, looking only at the first `size`
    /// rows.
    pub fn col(&self, col: usize, size: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .take(size)
            .enumerate()
            .filter(move |(_, r)| r.contains(&col))
            .map(|(i, _)| i)
    }

    /// Number of `true` entries.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(BTreeSet::len).sum()
    }
}

/// Compressed-row boolean matrix of a fixed logical size.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CompressedRows {
    rows: Vec<Vec<usize>>,
}

impl CompressedRows {
    /// The top-left `size x size` block of `direct`, with the diagonal set.
    fn reflexive(direct: &SparseBoolMatrix, size: usize) -> Self {
        let rows = (0..size)
            .map(|i| {
                let mut row: BTreeSet<usize> = direct.row(i).filter(|&j| j < size).collect();
                row.insert(i);
                row.into_iter().collect()
            })
            .collect();
        Self { rows }
    }

    /// Boolean product `self · self`.
    fn square(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = BTreeSet::new();
                for &k in row {
                    out.extend(self.rows[k].iter().copied());
                }
                out.into_iter().collect()
            })
            .collect();
        Self { rows }
    }

    fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    fn transpose(&self) -> Vec<Vec<usize>> {
        let mut cols = vec![Vec::new(); self.rows.len()];
        for (i, row) in self.rows.iter().enumerate() {
            for &j in row {
                cols[j].push(i);
            }
        }
        cols
    }
}

/// Reflexive-transitive closure of a direct adjacency.
///
/// `rows[i]` lists every `j` reachable from `i` (including `i`), and
/// `cols[j]` lists every `i` that reaches `j`. Both are sorted.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    rows: Vec<Vec<usize>>,
    cols: Vec<Vec<usize>>,
    squarings: usize,
}

impl Closure {
    /// Compute the closure of the first `size` rows/columns of `direct`.
    ///
    /// Squares `direct + I` until the number of set entries stops changing.
    /// Terminates on cyclic input too: entries are only ever added.
    pub fn compute(direct: &SparseBoolMatrix, size: usize) -> Self {
        let mut m = CompressedRows::reflexive(direct, size);
        let mut nnz = m.nnz();
        let mut squarings = 0;

        loop {
            let next = m.square();
            squarings += 1;
            let next_nnz = next.nnz();
            m = next;
            if next_nnz == nnz {
                break;
            }
            nnz = next_nnz;
        }

        let cols = m.transpose();
        Self {
            rows: m.rows,
            cols,
            squarings,
        }
    }

    /// Logical size.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> &[usize] {
        self.rows.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn col(&self, j: usize) -> &[usize] {
        self.cols.get(j).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.row(i).binary_search(&j).is_ok()
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// How many squarings it took to reach the fixed point.
    pub fn squarings(&self) -> usize {
        self.squarings
    }

    /// `out[i] = sum(weights[j] for j in row(i))`.
    pub fn row_sums(&self, weights: &[f64]) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&j| weights[j]).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> SparseBoolMatrix {
        let mut m = SparseBoolMatrix::with_capacity(4);
        m.grow_to_fit(n);
        for i in 1..n {
            m.set(i - 1, i);
        }
        m
    }

    #[test]
    fn capacity_doubles_until_it_fits() {
        let mut m = SparseBoolMatrix::with_capacity(4);
        assert!(!m.grow_to_fit(4));
        assert!(m.grow_to_fit(5));
        assert_eq!(m.capacity(), 8);
        assert!(m.grow_to_fit(33));
        assert_eq!(m.capacity(), 64);
    }

    #[test]
    fn setting_an_entry_twice_is_a_no_op() {
        let mut m = SparseBoolMatrix::default();
        m.set(1, 2);
        m.set(1, 2);
        assert_eq!(m.nnz(), 1);
        assert!(m.get(1, 2));
        assert!(!m.get(2, 1));
        assert_eq!(m.col(2, 3).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn closure_of_chain_is_upper_triangle() {
        let closure = Closure::compute(&chain(5), 5);

        assert_eq!(closure.row(0), &[0, 1, 2, 3, 4]);
        assert_eq!(closure.row(3), &[3, 4]);
        assert_eq!(closure.col(4), &[0, 1, 2, 3, 4]);
        assert_eq!(closure.nnz(), 15);
        // Paths of length 4 need ceil(log2(4)) = 2 squarings, plus one to
        // observe the fixed point.
        assert_eq!(closure.squarings(), 3);
    }

    #[test]
    fn closure_ignores_capacity_beyond_logical_size() {
        let mut m = SparseBoolMatrix::with_capacity(8);
        m.set(0, 1);
        let closure = Closure::compute(&m, 2);
        assert_eq!(closure.len(), 2);
        assert_eq!(closure.row(0), &[0, 1]);
    }

    #[test]
    fn closure_terminates_on_cycles() {
        let mut m = SparseBoolMatrix::with_capacity(4);
        m.set(0, 1);
        m.set(1, 2);
        m.set(2, 0);
        let closure = Closure::compute(&m, 3);
        for i in 0..3 {
            assert_eq!(closure.row(i), &[0, 1, 2]);
        }
    }

    #[test]
    fn row_sums_include_the_diagonal() {
        let closure = Closure::compute(&chain(3), 3);
        let sums = closure.row_sums(&[1.0, 2.0, 4.0]);
        assert_eq!(sums, vec![7.0, 6.0, 4.0]);
    }
}
