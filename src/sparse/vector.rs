use super::{Element, Error, Result};
use sux::bits::BitVec;

/// A sparse vector of fixed length with a declared fill value.
///
/// Values are kept in a dense array of slots, and a bit vector records
/// which slots hold an entry. Absent slots read as the fill value through
/// [`get_or_fill`](Vector::get_or_fill), but presence never depends on the
/// stored value, so an entry can never be mistaken for a missing one.
///
/// Writing the fill value with [`set`](Vector::set) deletes the entry.
#[derive(Debug, Clone)]
pub struct Vector<T: Element> {
    values: Vec<T>,
    present: BitVec,
    nvals: usize,
    fill: T,
}

impl<T: Element> Vector<T> {
    /// Creates an empty vector.
    ///
    /// # Arguments
    /// * `len`: the length of the vector.
    ///
    /// * `fill`: the value reported for absent entries.
    pub fn new(len: usize, fill: T) -> Result<Self> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|source| Error::Allocation {
                what: "vector",
                len,
                source,
            })?;
        values.resize(len, fill);
        Ok(Self {
            values,
            present: BitVec::new(len),
            nvals: 0,
            fill,
        })
    }

    /// Creates a vector from `(index, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same index.
    pub fn from_pairs(
        len: usize,
        fill: T,
        pairs: impl IntoIterator<Item = (usize, T)>,
    ) -> Result<Self> {
        let mut vector = Self::new(len, fill)?;
        for (index, value) in pairs {
            vector.set(index, value);
        }
        Ok(vector)
    }

    /// Returns the length of the vector.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the vector has length zero.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the fill value.
    #[inline(always)]
    pub fn fill(&self) -> T {
        self.fill
    }

    /// Returns the number of present entries.
    #[inline(always)]
    pub fn nvals(&self) -> usize {
        self.nvals
    }

    /// Returns `true` if `index` holds an entry.
    #[inline(always)]
    pub fn contains(&self, index: usize) -> bool {
        panic_if_out_of_bounds!(index, self.len());
        self.present[index]
    }

    /// Returns the entry at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        if self.contains(index) {
            Some(self.values[index])
        } else {
            None
        }
    }

    /// Returns the entry at `index`, or the fill value if there is none.
    #[inline]
    pub fn get_or_fill(&self, index: usize) -> T {
        self.get(index).unwrap_or(self.fill)
    }

    /// Stores `value` at `index`; storing the fill value deletes the entry.
    pub fn set(&mut self, index: usize, value: T) {
        if value == self.fill {
            self.remove(index);
            return;
        }
        if !self.contains(index) {
            self.present.set(index, true);
            self.nvals += 1;
        }
        self.values[index] = value;
    }

    /// Deletes the entry at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let old = self.get(index)?;
        self.present.set(index, false);
        self.values[index] = self.fill;
        self.nvals -= 1;
        Some(old)
    }

    /// Deletes all entries.
    pub fn clear(&mut self) {
        if self.nvals == 0 {
            return;
        }
        self.present = BitVec::new(self.len());
        self.values.fill(self.fill);
        self.nvals = 0;
    }

    /// Returns an iterator over the present entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        (0..self.len())
            .filter(move |&i| self.present[i])
            .map(move |i| (i, self.values[i]))
    }

    /// Returns the present entries as parallel arrays of indices and values.
    pub fn read(&self) -> (Vec<usize>, Vec<T>) {
        self.iter().unzip()
    }
}
