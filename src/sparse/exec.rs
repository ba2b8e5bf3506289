//! The masked operation engine.
//!
//! Every operation writes into an output argument borrowed mutably while
//! its inputs are borrowed immutably, so an operation can never read and
//! write the same structure. Outputs are overwritten (except by
//! [`v_assign`](Context::v_assign), which only touches the positions allowed
//! by its mask), and, as with [`Matrix::set`] and [`Vector::set`], results
//! equal to the fill value of the output are not stored.
//!
//! Vectors of length `n` are reported in shape errors as `(n, 1)`.

use super::{
    matrix::Row, BinaryOp, Context, Element, Error, Mask, Matrix, Result, Semiring, Vector,
};
use crate::utils::argmin;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::ops::ControlFlow;

fn check_shape(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            op,
            expected,
            found,
        })
    }
}

#[inline(always)]
fn check_len(op: &'static str, expected: usize, found: usize) -> Result<()> {
    check_shape(op, (expected, 1), (found, 1))
}

#[inline(always)]
fn push<T: Element>(row: &mut Row<T>, fill: T, col: usize, value: T) {
    if value != fill {
        row.push((col, value));
    }
}

/// Writes into `out` the union of two sorted rows.
fn merge_union<T: Element>(
    out: &mut Row<T>,
    a: &[(usize, T)],
    b: &[(usize, T)],
    op: BinaryOp,
    fill: T,
) {
    out.clear();
    let (mut p, mut q) = (0, 0);
    while p < a.len() && q < b.len() {
        let (ja, va) = a[p];
        let (jb, vb) = b[q];
        match ja.cmp(&jb) {
            Ordering::Less => {
                push(out, fill, ja, va);
                p += 1;
            }
            Ordering::Greater => {
                push(out, fill, jb, vb);
                q += 1;
            }
            Ordering::Equal => {
                push(out, fill, ja, op.apply(va, vb));
                p += 1;
                q += 1;
            }
        }
    }
    for &(j, v) in a[p..].iter().chain(&b[q..]) {
        push(out, fill, j, v);
    }
}

/// Writes into `out` the intersection of two sorted rows.
fn merge_intersection<T: Element>(
    out: &mut Row<T>,
    a: &[(usize, T)],
    b: &[(usize, T)],
    op: BinaryOp,
    fill: T,
) {
    out.clear();
    let (mut p, mut q) = (0, 0);
    while p < a.len() && q < b.len() {
        let (ja, va) = a[p];
        let (jb, vb) = b[q];
        match ja.cmp(&jb) {
            Ordering::Less => p += 1,
            Ordering::Greater => q += 1,
            Ordering::Equal => {
                push(out, fill, ja, op.apply(va, vb));
                p += 1;
                q += 1;
            }
        }
    }
}

/// Calls `f` on the common indices of two sorted rows, in increasing
/// order, until it breaks.
///
/// The shorter row is scanned and each of its indices is searched in the
/// remaining part of the longer one, so the cost is
/// O(min(|a|, |b|) · log max(|a|, |b|)).
fn for_each_common<T: Copy, U: Copy>(
    a: &[(usize, T)],
    b: &[(usize, U)],
    mut f: impl FnMut(usize, T, U) -> ControlFlow<()>,
) {
    if a.len() <= b.len() {
        let mut rest = b;
        for &(k, va) in a {
            match rest.binary_search_by_key(&k, |&(j, _)| j) {
                Ok(pos) => {
                    if f(k, va, rest[pos].1).is_break() {
                        return;
                    }
                    rest = &rest[pos + 1..];
                }
                Err(pos) => rest = &rest[pos..],
            }
            if rest.is_empty() {
                return;
            }
        }
    } else {
        let mut rest = a;
        for &(k, vb) in b {
            match rest.binary_search_by_key(&k, |&(j, _)| j) {
                Ok(pos) => {
                    if f(k, rest[pos].1, vb).is_break() {
                        return;
                    }
                    rest = &rest[pos + 1..];
                }
                Err(pos) => rest = &rest[pos..],
            }
            if rest.is_empty() {
                return;
            }
        }
    }
}

/// Reduces the terms `a[k] ⊗ b[k]` over the common indices of two sorted
/// rows, or returns `None` if they have none.
fn dot<T: Element, U: Element>(
    a: &[(usize, T)],
    b: &[(usize, U)],
    semiring: Semiring,
) -> Option<T> {
    let any = matches!(semiring.add, BinaryOp::First | BinaryOp::KeepExisting);
    let mut acc = None;
    for_each_common(a, b, |k, va, vb| {
        let term = semiring.mul.apply(va, vb, k);
        acc = Some(match acc {
            None => term,
            Some(acc) => semiring.add.apply(acc, term),
        });
        if any {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    acc
}

/// The columns a mask allows in a given row.
enum MaskRow<'a, M> {
    All,
    Structure(&'a [(usize, M)]),
    Complement(&'a [(usize, M)]),
}

impl<M: Element> MaskRow<'_, M> {
    fn for_each_allowed(&self, ncols: usize, mut f: impl FnMut(usize)) {
        match self {
            MaskRow::All => (0..ncols).for_each(f),
            MaskRow::Structure(row) => row.iter().for_each(|&(j, _)| f(j)),
            MaskRow::Complement(row) => {
                let mut masked = row.iter().map(|&(j, _)| j).peekable();
                for j in 0..ncols {
                    if masked.peek() == Some(&j) {
                        masked.next();
                    } else {
                        f(j);
                    }
                }
            }
        }
    }
}

impl<'a, M: Element> Mask<'a, Matrix<M>> {
    fn row(&self, row: usize) -> MaskRow<'a, M> {
        match *self {
            Mask::All => MaskRow::All,
            Mask::Structure(m) => MaskRow::Structure(m.row(row)),
            Mask::Complement(m) => MaskRow::Complement(m.row(row)),
        }
    }
}

impl Context {
    /// Transposes `a` into `out`, which must be `a.ncols() × a.nrows()`.
    pub fn m_transpose<T: Element>(&self, out: &mut Matrix<T>, a: &Matrix<T>) -> Result<()> {
        check_shape("m_transpose", (a.ncols(), a.nrows()), out.shape())?;
        let fill = out.fill();
        out.clear();
        let rows = out.rows_mut();
        // Rows of a are scanned in order, so the output rows stay sorted
        for (i, row) in a.rows().iter().enumerate() {
            for &(j, v) in row {
                push(&mut rows[j], fill, i, v);
            }
        }
        Ok(())
    }

    /// Element-wise union: `out[i, j]` is `op(a[i, j], b[i, j])` where both
    /// are present, the present one where only one is, absent otherwise.
    pub fn m_eadd<T: Element>(
        &self,
        out: &mut Matrix<T>,
        a: &Matrix<T>,
        b: &Matrix<T>,
        op: BinaryOp,
    ) -> Result<()> {
        check_shape("m_eadd", a.shape(), b.shape())?;
        check_shape("m_eadd", a.shape(), out.shape())?;
        let fill = out.fill();
        self.install(|| {
            out.rows_mut()
                .par_iter_mut()
                .zip(a.rows().par_iter().zip(b.rows()))
                .for_each(|(row, (ra, rb))| merge_union(row, ra, rb, op, fill));
        });
        Ok(())
    }

    /// Element-wise intersection: `out[i, j]` is `op(a[i, j], b[i, j])` where
    /// both are present, absent otherwise.
    pub fn m_emult<T: Element>(
        &self,
        out: &mut Matrix<T>,
        a: &Matrix<T>,
        b: &Matrix<T>,
        op: BinaryOp,
    ) -> Result<()> {
        check_shape("m_emult", a.shape(), b.shape())?;
        check_shape("m_emult", a.shape(), out.shape())?;
        let fill = out.fill();
        self.install(|| {
            out.rows_mut()
                .par_iter_mut()
                .zip(a.rows().par_iter().zip(b.rows()))
                .for_each(|(row, (ra, rb))| merge_intersection(row, ra, rb, op, fill));
        });
        Ok(())
    }

    /// Applies `f` to every present entry of `a`, writing the results into
    /// `out`.
    pub fn m_apply<T: Element>(
        &self,
        out: &mut Matrix<T>,
        a: &Matrix<T>,
        f: impl Fn(T) -> T + Sync + Send,
    ) -> Result<()> {
        check_shape("m_apply", a.shape(), out.shape())?;
        let fill = out.fill();
        self.install(|| {
            out.rows_mut()
                .par_iter_mut()
                .zip(a.rows().par_iter())
                .for_each(|(row, ra)| {
                    row.clear();
                    for &(j, v) in ra {
                        push(row, fill, j, f(v));
                    }
                });
        });
        Ok(())
    }

    /// Masked product `out = (a ⊗.⊕ bᵀ) ⊙ mask`.
    ///
    /// `a` is `m × k` and `b` is `n × k` (that is, `b` is the transpose of
    /// the right-hand operand); `out` and the mask, if any, must be
    /// `m × n`. An entry `out[i, j]` is computed only if the mask allows it
    /// and row `i` of `a` and row `j` of `b` share at least one column.
    ///
    /// Returns the number of entries written. Rows of the output are
    /// computed in parallel.
    ///
    /// Each output row scans the columns allowed by the mask and intersects
    /// row `i` of `a` with row `j` of `b`, scanning the shorter of the two;
    /// computing row `i` thus costs O(n + nnz(b) · log k) for a dense or
    /// complemented mask.
    pub fn mxm_t<T: Element, U: Element, M: Element>(
        &self,
        out: &mut Matrix<T>,
        mask: Mask<'_, Matrix<M>>,
        a: &Matrix<T>,
        b: &Matrix<U>,
        semiring: Semiring,
    ) -> Result<usize> {
        check_shape("mxm_t", (b.nrows(), a.ncols()), b.shape())?;
        check_shape("mxm_t", (a.nrows(), b.nrows()), out.shape())?;
        if let Some(shape) = mask.shape() {
            check_shape("mxm_t", out.shape(), shape)?;
        }
        let fill = out.fill();
        let ncols = b.nrows();
        let b_rows = b.rows();
        let written = self.install(|| {
            out.rows_mut()
                .par_iter_mut()
                .zip(a.rows().par_iter())
                .enumerate()
                .map(|(i, (row, ra))| {
                    row.clear();
                    if ra.is_empty() {
                        return 0;
                    }
                    mask.row(i).for_each_allowed(ncols, |j| {
                        if let Some(value) = dot(ra, &b_rows[j], semiring) {
                            push(row, fill, j, value);
                        }
                    });
                    row.len()
                })
                .sum::<usize>()
        });
        Ok(written)
    }

    /// Extracts row `row` of `a` into `out`, whose length must be
    /// `a.ncols()`.
    pub fn m_extract_row<T: Element>(
        &self,
        out: &mut Vector<T>,
        a: &Matrix<T>,
        row: usize,
    ) -> Result<()> {
        check_len("m_extract_row", a.ncols(), out.len())?;
        out.clear();
        for &(j, v) in a.row(row) {
            out.set(j, v);
        }
        Ok(())
    }

    /// Extracts column `col` of `a` into `out`, whose length must be
    /// `a.nrows()`.
    pub fn m_extract_col<T: Element>(
        &self,
        out: &mut Vector<T>,
        a: &Matrix<T>,
        col: usize,
    ) -> Result<()> {
        check_len("m_extract_col", a.nrows(), out.len())?;
        panic_if_out_of_bounds!(col, a.ncols());
        out.clear();
        for (i, row) in a.rows().iter().enumerate() {
            if let Ok(pos) = row.binary_search_by_key(&col, |&(j, _)| j) {
                out.set(i, row[pos].1);
            }
        }
        Ok(())
    }

    /// Element-wise union of two vectors (see [`m_eadd`](Context::m_eadd)).
    pub fn v_eadd<T: Element>(
        &self,
        out: &mut Vector<T>,
        a: &Vector<T>,
        b: &Vector<T>,
        op: BinaryOp,
    ) -> Result<()> {
        check_len("v_eadd", a.len(), b.len())?;
        check_len("v_eadd", a.len(), out.len())?;
        out.clear();
        for i in 0..a.len() {
            let value = match (a.get(i), b.get(i)) {
                (Some(x), Some(y)) => Some(op.apply(x, y)),
                (x, None) => x,
                (None, y) => y,
            };
            if let Some(value) = value {
                out.set(i, value);
            }
        }
        Ok(())
    }

    /// Element-wise intersection of two vectors (see
    /// [`m_emult`](Context::m_emult)).
    ///
    /// With [`BinaryOp::First`] this applies `b` as a multiplicative mask
    /// to `a`.
    pub fn v_emult<T: Element>(
        &self,
        out: &mut Vector<T>,
        a: &Vector<T>,
        b: &Vector<T>,
        op: BinaryOp,
    ) -> Result<()> {
        check_len("v_emult", a.len(), b.len())?;
        check_len("v_emult", a.len(), out.len())?;
        out.clear();
        for (i, x) in a.iter() {
            if let Some(y) = b.get(i) {
                out.set(i, op.apply(x, y));
            }
        }
        Ok(())
    }

    /// Masked assignment: at every position allowed by `mask`, copies the
    /// entry of `src` (or its absence) into `out`. Other positions of `out`
    /// are left untouched.
    pub fn v_assign<T: Element, M: Element>(
        &self,
        out: &mut Vector<T>,
        mask: Mask<'_, Vector<M>>,
        src: &Vector<T>,
    ) -> Result<()> {
        check_len("v_assign", out.len(), src.len())?;
        if let Some(len) = mask.len() {
            check_len("v_assign", out.len(), len)?;
        }
        for i in 0..out.len() {
            if mask.allows(i) {
                match src.get(i) {
                    Some(value) => out.set(i, value),
                    None => {
                        out.remove(i);
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the index and value of the minimum present entry of `v`,
    /// breaking ties in favor of the smallest index.
    ///
    /// Fails with [`Error::EmptyReduction`] if `v` has no entries: callers
    /// for which this is a legitimate outcome should check
    /// [`Vector::nvals`] first.
    pub fn v_find_min<T: Element>(&self, v: &Vector<T>) -> Result<(usize, T)> {
        argmin(v.iter()).ok_or(Error::EmptyReduction { op: "v_find_min" })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dot_skewed_rows() {
        let long: Vec<(usize, u32)> = (0..100).map(|k| (k, k as u32)).collect();
        let short = [(17, 1.0), (42, 2.0), (150, 3.0)];
        assert_eq!(dot(&long, &short, Semiring::ANY_SECOND_INDEX), Some(17));
        assert_eq!(dot(&short, &long, Semiring::ANY_SECOND_INDEX), Some(17.0));
        assert_eq!(dot(&long, &short, Semiring::PLUS_TIMES), Some(17 + 84));
        assert_eq!(dot(&short, &long, Semiring::MIN_PLUS), Some(18.0));
        assert_eq!(dot(&long[..10], &short, Semiring::PLUS_TIMES), None);
        assert_eq!(dot(&short[2..], &long, Semiring::PLUS_TIMES), None);
    }
}
