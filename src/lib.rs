//! `kyber-kem` — a CRYSTALS-Kyber (round-3) key encapsulation mechanism.
//!
//! Implements the Kyber IND-CCA2 KEM for all three parameter sets:
//! Kyber-512, Kyber-768, and Kyber-1024.
//!
//! # Design principles
//!
//! - **No `unsafe`** — enforced by `#![deny(unsafe_code)]`.
//! - **Signed 16-bit coefficient arithmetic** with Montgomery and Barrett
//!   reduction throughout the NTT engine.
//! - **RAII zeroization** of secret material via the `zeroize` crate.
//! - **Constant-time** re-encryption check and implicit rejection; no
//!   secret-dependent branches or indices outside public-seed matrix
//!   expansion.
//!
//! Two API layers are exposed: typed, compile-time-sized operations generic
//! over a [`KyberParams`] parameter set, and the byte-slice [`Kyber`] facade
//! that selects the rank k at run time and validates every input length.

#![deny(unsafe_code)]

pub mod api;
pub mod ct;
pub mod error;
pub mod hash;
pub mod kem;
pub mod math;
pub mod params;
mod pke;
pub mod types;

// Re-export the public API surface.
pub use api::Kyber;
pub use error::KemError;
pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use params::{Kyber512, Kyber768, Kyber1024, KyberParams};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};
