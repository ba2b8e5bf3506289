//! Sparse containers and the masked operation engine.
//!
//! [`Vector`] and [`Matrix`] are sparse containers of fixed shape that
//! declare a fill value at construction. Operations combining them are
//! methods of a [`Context`], parameterized by the operators in [`ops`].

macro_rules! panic_if_out_of_bounds {
    ($index: expr, $len: expr) => {
        if $index >= $len {
            panic!("Index out of bounds: {} >= {}", $index, $len)
        }
    };
}

mod context;
pub use context::*;

mod element;
pub use element::Element;

mod error;
pub use error::{Error, Result};

mod exec;

mod matrix;
pub use matrix::{Matrix, Row};

pub mod ops;
pub use ops::{BinaryOp, Mask, MulOp, Semiring};

mod vector;
pub use vector::Vector;
