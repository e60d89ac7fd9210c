//! Core mathematical primitives for the Kyber ring R_q = Z_q[X]/(X^256 + 1).
//!
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! polynomial and polynomial-vector arithmetic, byte-level packing and
//! compression, and deterministic sampling.

pub mod ntt;
pub mod pack;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod sample;
