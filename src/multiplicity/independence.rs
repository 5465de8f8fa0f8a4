//!
//! Incremental test of linear independence of integer rows
//!
//! Admitted rows are kept in row echelon form: every stored row has a distinct
//! leading (smallest) column, called its pivot. A new row is reduced by the stored
//! rows whose pivot matches its leading column, until either the row vanishes
//! (dependent) or its leading column is not a pivot yet (independent).
//!
//! Arithmetic is exact: rows are integer and are divided by the gcd of their
//! coefficients after each elimination. Products are checked, and an overflow
//! is reported as `RowOverflow` instead of wrapping.
//!
use fnv::FnvHashMap as HashMap;
use std::collections::BTreeMap;
use thiserror::Error;

///
/// A coefficient did not fit in `i64` during elimination
///
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("coefficient overflow in row elimination")]
pub struct RowOverflow;

///
/// Sparse integer row: (column, coefficient) sorted by column, without zeros
///
pub type SparseRow = Vec<(usize, i64)>;

///
/// Convert (column, coefficient) pairs with possible duplicated columns or zeros
/// into `SparseRow`.
///
pub fn to_sparse_row<I: IntoIterator<Item = (usize, i64)>>(entries: I) -> SparseRow {
    let mut m: BTreeMap<usize, i64> = BTreeMap::new();
    for (col, coeff) in entries {
        *m.entry(col).or_insert(0) += coeff;
    }
    m.into_iter().filter(|&(_, coeff)| coeff != 0).collect()
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

///
/// divide all coefficients by their gcd
///
fn normalize(row: &mut SparseRow) {
    let g = row.iter().fold(0, |g, &(_, coeff)| gcd(g, coeff));
    if g > 1 {
        for (_, coeff) in row.iter_mut() {
            *coeff /= g;
        }
    }
}

///
/// `pivot_coeff * row - row_coeff * basis`, which cancels the leading column of `row`.
///
fn eliminate(row: &[(usize, i64)], basis: &[(usize, i64)]) -> Result<SparseRow, RowOverflow> {
    let a = row[0].1;
    let b = basis[0].1;
    let mul = |x: i64, y: i64| x.checked_mul(y).ok_or(RowOverflow);
    let mut ret = Vec::with_capacity(row.len() + basis.len());
    let (mut i, mut j) = (0, 0);
    while i < row.len() || j < basis.len() {
        let (col, coeff) = if j == basis.len() || (i < row.len() && row[i].0 < basis[j].0) {
            let (col, x) = row[i];
            i += 1;
            (col, mul(b, x)?)
        } else if i == row.len() || basis[j].0 < row[i].0 {
            let (col, y) = basis[j];
            j += 1;
            (col, mul(a, y)?.checked_neg().ok_or(RowOverflow)?)
        } else {
            let (col, x) = row[i];
            let y = basis[j].1;
            i += 1;
            j += 1;
            (col, mul(b, x)?.checked_sub(mul(a, y)?).ok_or(RowOverflow)?)
        };
        if coeff == i64::MIN {
            // no absolute value for gcd
            return Err(RowOverflow);
        }
        if coeff != 0 {
            ret.push((col, coeff));
        }
    }
    normalize(&mut ret);
    Ok(ret)
}

///
/// Set of admitted (linearly independent) rows
///
#[derive(Clone, Debug, Default)]
pub struct RowEchelon {
    rows: Vec<SparseRow>,
    /// pivot column -> index in `rows`
    pivots: HashMap<usize, usize>,
}

impl RowEchelon {
    pub fn new() -> Self {
        RowEchelon::default()
    }
    ///
    /// # of admitted rows
    ///
    pub fn rank(&self) -> usize {
        self.rows.len()
    }
    ///
    /// Reduce the row by admitted rows.
    /// Empty result means the row is in the span of admitted rows.
    ///
    fn reduce(&self, row: &[(usize, i64)]) -> Result<SparseRow, RowOverflow> {
        let mut row = to_sparse_row(row.iter().copied());
        if row.iter().any(|&(_, coeff)| coeff == i64::MIN) {
            return Err(RowOverflow);
        }
        normalize(&mut row);
        while let Some(&(col, _)) = row.first() {
            match self.pivots.get(&col) {
                Some(&i) => row = eliminate(&row, &self.rows[i])?,
                None => break,
            }
        }
        Ok(row)
    }
    ///
    /// Check if the row is linearly independent of all admitted rows.
    /// An all-zero row is never independent.
    ///
    pub fn is_independent(&self, row: &[(usize, i64)]) -> Result<bool, RowOverflow> {
        Ok(!self.reduce(row)?.is_empty())
    }
    ///
    /// Admit the row if it is independent. Returns whether it was admitted.
    /// On overflow the row is not admitted and the admitted rows are unchanged.
    ///
    pub fn insert(&mut self, row: &[(usize, i64)]) -> Result<bool, RowOverflow> {
        let reduced = self.reduce(row)?;
        match reduced.first() {
            Some(&(pivot, _)) => {
                self.pivots.insert(pivot, self.rows.len());
                self.rows.push(reduced);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
