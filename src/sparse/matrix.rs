use super::{Element, Error, Result};

/// A row of a [`Matrix`]: `(column, value)` pairs sorted by column.
pub type Row<T> = Vec<(usize, T)>;

/// A sparse matrix of fixed shape with a declared fill value.
///
/// Entries are stored row by row; each row is a list of `(column, value)`
/// pairs sorted by column, so presence is structural and independent of
/// the stored values. Absent positions read as the fill value through
/// [`get_or_fill`](Matrix::get_or_fill).
///
/// Writing the fill value with [`set`](Matrix::set) deletes the entry.
#[derive(Debug, Clone)]
pub struct Matrix<T: Element> {
    nrows: usize,
    ncols: usize,
    rows: Vec<Row<T>>,
    fill: T,
}

impl<T: Element> Matrix<T> {
    /// Creates an empty matrix.
    ///
    /// # Arguments
    /// * `nrows`: the number of rows.
    ///
    /// * `ncols`: the number of columns.
    ///
    /// * `fill`: the value reported for absent entries.
    pub fn new(nrows: usize, ncols: usize, fill: T) -> Result<Self> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(nrows)
            .map_err(|source| Error::Allocation {
                what: "matrix rows",
                len: nrows,
                source,
            })?;
        rows.resize_with(nrows, Vec::new);
        Ok(Self {
            nrows,
            ncols,
            rows,
            fill,
        })
    }

    /// Creates a matrix from `(row, column, value)` triples.
    ///
    /// Later triples overwrite earlier ones at the same position.
    pub fn from_triples(
        nrows: usize,
        ncols: usize,
        fill: T,
        triples: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self> {
        let mut matrix = Self::new(nrows, ncols, fill)?;
        for (row, col, value) in triples {
            matrix.set(row, col, value);
        }
        Ok(matrix)
    }

    /// Returns the number of rows.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns `(rows, columns)`.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Returns the fill value.
    #[inline(always)]
    pub fn fill(&self) -> T {
        self.fill
    }

    /// Returns the number of present entries.
    pub fn nvals(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns the present entries of a row, sorted by column.
    #[inline(always)]
    pub fn row(&self, row: usize) -> &[(usize, T)] {
        panic_if_out_of_bounds!(row, self.nrows);
        &self.rows[row]
    }

    #[inline(always)]
    pub(crate) fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    #[inline(always)]
    pub(crate) fn rows_mut(&mut self) -> &mut [Row<T>] {
        &mut self.rows
    }

    #[inline]
    fn position(&self, row: usize, col: usize) -> std::result::Result<usize, usize> {
        panic_if_out_of_bounds!(row, self.nrows);
        panic_if_out_of_bounds!(col, self.ncols);
        self.rows[row].binary_search_by_key(&col, |&(c, _)| c)
    }

    /// Returns `true` if `(row, col)` holds an entry.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.position(row, col).is_ok()
    }

    /// Returns the entry at `(row, col)`, if any.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.position(row, col)
            .ok()
            .map(|pos| self.rows[row][pos].1)
    }

    /// Returns the entry at `(row, col)`, or the fill value if there is none.
    #[inline]
    pub fn get_or_fill(&self, row: usize, col: usize) -> T {
        self.get(row, col).unwrap_or(self.fill)
    }

    /// Stores `value` at `(row, col)`; storing the fill value deletes the
    /// entry.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if value == self.fill {
            self.remove(row, col);
            return;
        }
        match self.position(row, col) {
            Ok(pos) => self.rows[row][pos].1 = value,
            Err(pos) => self.rows[row].insert(pos, (col, value)),
        }
    }

    /// Deletes the entry at `(row, col)`, returning it.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<T> {
        let pos = self.position(row, col).ok()?;
        Some(self.rows[row].remove(pos).1)
    }

    /// Deletes all entries.
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(Vec::clear);
    }

    /// Returns an iterator over the present entries as `(row, col, value)`
    /// triples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |&(j, v)| (i, j, v)))
    }

    /// Returns the present entries as parallel arrays of row indices,
    /// column indices and values.
    pub fn read(&self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        let nvals = self.nvals();
        let mut rows = Vec::with_capacity(nvals);
        let mut cols = Vec::with_capacity(nvals);
        let mut vals = Vec::with_capacity(nvals);
        for (i, j, v) in self.iter() {
            rows.push(i);
            cols.push(j);
            vals.push(v);
        }
        (rows, cols, vals)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_get_remove() -> Result<()> {
        let mut m = Matrix::new(3, 4, f64::INFINITY)?;
        m.set(2, 3, 1.5);
        m.set(2, 0, 0.5);
        m.set(0, 1, 2.0);
        m.set(2, 3, 4.0);
        assert_eq!(m.nvals(), 3);
        assert_eq!(m.row(2), &[(0, 0.5), (3, 4.0)]);
        assert_eq!(m.get(1, 1), None);
        assert_eq!(m.get_or_fill(1, 1), f64::INFINITY);

        assert_eq!(m.remove(2, 0), Some(0.5));
        assert_eq!(m.remove(2, 0), None);
        m.set(0, 1, f64::INFINITY);
        assert_eq!(m.read(), (vec![2], vec![3], vec![4.0]));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "Index out of bounds")]
    fn test_out_of_bounds() {
        let m = Matrix::new(2, 2, u32::MAX).unwrap();
        m.get(0, 2);
    }
}
