//! Operators and masks accepted by the engine.

use super::{Element, Matrix, Vector};

/// Binary operators combining two present entries.
///
/// Element-wise operations call the operator only where both operands hold
/// an entry; where only one does, that entry is taken as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// The first operand.
    First,
    /// The second operand.
    Second,
    /// The smaller operand (the first one on ties).
    Min,
    /// The larger operand (the first one on ties).
    Max,
    /// The sum of the operands.
    Plus,
    /// The incoming (second) value wins unless the existing (first) operand
    /// already holds a value. Used to merge a frontier into a parent
    /// matrix without overturning earlier discoveries.
    KeepExisting,
}

impl BinaryOp {
    /// Applies the operator.
    #[inline(always)]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            BinaryOp::First | BinaryOp::KeepExisting => a,
            BinaryOp::Second => b,
            BinaryOp::Min => {
                if b < a {
                    b
                } else {
                    a
                }
            }
            BinaryOp::Max => {
                if b > a {
                    b
                } else {
                    a
                }
            }
            BinaryOp::Plus => a + b,
        }
    }
}

/// Multiplicative operators of a [`Semiring`].
///
/// The operator receives `a[i, k]`, `b[k, j]` and the contraction index
/// `k`, and produces a value of the output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MulOp {
    /// `a[i, k]`.
    First,
    /// `b[k, j]`, converted to the output type.
    Second,
    /// The contraction index `k`: in a traversal, the id of the node the
    /// value propagates from.
    SecondIndex,
    /// `a[i, k] · b[k, j]`.
    Times,
    /// `a[i, k] + b[k, j]`.
    Plus,
    /// Constant one.
    Pair,
}

impl MulOp {
    /// Applies the operator.
    #[inline(always)]
    pub fn apply<T: Element, U: Element>(self, a: T, b: U, k: usize) -> T {
        match self {
            MulOp::First => a,
            MulOp::Second => T::from_f64(b.to_f64()),
            MulOp::SecondIndex => T::from_index(k),
            MulOp::Times => a * T::from_f64(b.to_f64()),
            MulOp::Plus => a + T::from_f64(b.to_f64()),
            MulOp::Pair => T::ONE,
        }
    }
}

/// A (multiply, accumulate) pair parameterizing a matrix product:
/// `C[i, j] = ⊕_k (A[i, k] ⊗ B[k, j])`.
///
/// Accumulating with [`BinaryOp::First`] keeps the first contributing term
/// (the one with the smallest `k`), so the product stops scanning at the
/// first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Semiring {
    /// The multiplicative operator ⊗.
    pub mul: MulOp,
    /// The accumulating operator ⊕.
    pub add: BinaryOp,
}

impl Semiring {
    /// Propagates the id of any (in fact, the smallest) contributing node.
    pub const ANY_SECOND_INDEX: Self = Self {
        mul: MulOp::SecondIndex,
        add: BinaryOp::First,
    };

    /// Tropical semiring: shortest path lengths.
    pub const MIN_PLUS: Self = Self {
        mul: MulOp::Plus,
        add: BinaryOp::Min,
    };

    /// Conventional arithmetic.
    pub const PLUS_TIMES: Self = Self {
        mul: MulOp::Times,
        add: BinaryOp::Plus,
    };
}

/// A mask restricting the positions an operation may write.
///
/// Only the structure of the mask is used, never its values.
#[derive(Debug)]
pub enum Mask<'a, S> {
    /// Every position is allowed.
    All,
    /// Positions where the mask holds an entry are allowed.
    Structure(&'a S),
    /// Positions where the mask holds no entry are allowed.
    Complement(&'a S),
}

impl<S> Clone for Mask<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Mask<'_, S> {}

impl<M: Element> Mask<'_, Vector<M>> {
    /// Returns whether `index` may be written.
    #[inline(always)]
    pub fn allows(&self, index: usize) -> bool {
        match self {
            Mask::All => true,
            Mask::Structure(m) => m.contains(index),
            Mask::Complement(m) => !m.contains(index),
        }
    }

    pub(crate) fn len(&self) -> Option<usize> {
        match self {
            Mask::All => None,
            Mask::Structure(m) | Mask::Complement(m) => Some(m.len()),
        }
    }
}

impl<M: Element> Mask<'_, Matrix<M>> {
    /// Returns whether `(row, col)` may be written.
    #[inline(always)]
    pub fn allows(&self, row: usize, col: usize) -> bool {
        match self {
            Mask::All => true,
            Mask::Structure(m) => m.contains(row, col),
            Mask::Complement(m) => !m.contains(row, col),
        }
    }

    pub(crate) fn shape(&self) -> Option<(usize, usize)> {
        match self {
            Mask::All => None,
            Mask::Structure(m) | Mask::Complement(m) => Some(m.shape()),
        }
    }
}
