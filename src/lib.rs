/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod algo;
pub mod sparse;
pub mod utils;

/// Use `use spmat_algo::prelude::*;` to import the algorithms, the sparse
/// containers and the engine.
pub mod prelude {
    use super::*;
    pub use algo::msbfs::{self, msbfs, BfsOutput, MsBfs};
    pub use algo::prim::{self, prim, Prim, PrimOutcome, SpanningTree};
    pub use sparse::{
        BinaryOp, Context, Element, Error, Mask, Matrix, MulOp, Semiring, Threads, Vector,
    };
    pub use utils::PingPong;
}
