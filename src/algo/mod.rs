//! Module containing graph algorithms built on the sparse engine.

pub mod msbfs;

pub mod prim;
