//! Runtime-parameterized byte-slice API.
//!
//! [`Kyber`] selects the module rank k at construction and exposes the KEM
//! over plain byte slices, validating every input length before any work is
//! done. Randomness comes from the operating system; a failing source
//! surfaces as [`KemError::RandomSource`]. The typed layer in [`crate::kem`]
//! remains the primitive interface.

use zeroize::Zeroize;

use crate::error::KemError;
use crate::kem;
use crate::params::{Kyber512, Kyber768, Kyber1024, KyberParams, SSBYTES, SYMBYTES};
use crate::types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

/// A Kyber KEM instance for one of the three parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kyber {
    k: usize,
}

impl Kyber {
    /// Select a parameter set by module rank. Only k ∈ {2, 3, 4} exists.
    pub fn new(k: usize) -> Result<Self, KemError> {
        match k {
            2 | 3 | 4 => Ok(Self { k }),
            _ => Err(KemError::UnsupportedParameterSet(k)),
        }
    }

    /// The module rank of this instance.
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Exact public-key length in bytes.
    pub fn public_key_bytes(&self) -> usize {
        self.dispatch(Kyber512::PK_BYTES, Kyber768::PK_BYTES, Kyber1024::PK_BYTES)
    }

    /// Exact secret-key length in bytes.
    pub fn secret_key_bytes(&self) -> usize {
        self.dispatch(Kyber512::SK_BYTES, Kyber768::SK_BYTES, Kyber1024::SK_BYTES)
    }

    /// Exact ciphertext length in bytes.
    pub fn ciphertext_bytes(&self) -> usize {
        self.dispatch(Kyber512::CT_BYTES, Kyber768::CT_BYTES, Kyber1024::CT_BYTES)
    }

    /// Shared-secret length in bytes (32 for every parameter set).
    pub fn shared_secret_bytes(&self) -> usize {
        SSBYTES
    }

    /// Generate a keypair from operating-system randomness.
    pub fn generate_keypair(&self) -> Result<(Vec<u8>, Vec<u8>), KemError> {
        let mut coins = [0u8; 2 * SYMBYTES];
        getrandom::fill(&mut coins).map_err(|_| KemError::RandomSource)?;
        let out = match self.k {
            2 => keypair_bytes::<Kyber512>(&coins),
            3 => keypair_bytes::<Kyber768>(&coins),
            _ => keypair_bytes::<Kyber1024>(&coins),
        };
        coins.zeroize();
        Ok(out)
    }

    /// Encapsulate against `pk`, returning (ciphertext, shared secret).
    pub fn encapsulate(&self, pk: &[u8]) -> Result<(Vec<u8>, SharedSecret), KemError> {
        match self.k {
            2 => encapsulate_bytes::<Kyber512>(pk),
            3 => encapsulate_bytes::<Kyber768>(pk),
            _ => encapsulate_bytes::<Kyber1024>(pk),
        }
    }

    /// Decapsulate `ct` under `sk`. A mismatched ciphertext still returns a
    /// shared secret (implicit rejection), never an error.
    pub fn decapsulate(&self, ct: &[u8], sk: &[u8]) -> Result<SharedSecret, KemError> {
        match self.k {
            2 => decapsulate_bytes::<Kyber512>(ct, sk),
            3 => decapsulate_bytes::<Kyber768>(ct, sk),
            _ => decapsulate_bytes::<Kyber1024>(ct, sk),
        }
    }

    #[inline]
    fn dispatch<T>(&self, k2: T, k3: T, k4: T) -> T {
        match self.k {
            2 => k2,
            3 => k3,
            _ => k4,
        }
    }
}

fn keypair_bytes<P: KyberParams>(coins: &[u8; 2 * SYMBYTES]) -> (Vec<u8>, Vec<u8>) {
    let (pk, sk) = kem::keypair_derand::<P>(coins);
    (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
}

fn encapsulate_bytes<P: KyberParams>(pk: &[u8]) -> Result<(Vec<u8>, SharedSecret), KemError> {
    let pk = PublicKey::<P>::from_slice(pk)?;
    let mut coins = [0u8; SYMBYTES];
    getrandom::fill(&mut coins).map_err(|_| KemError::RandomSource)?;
    let (ct, ss) = kem::encapsulate_derand::<P>(&pk, &coins);
    coins.zeroize();
    Ok((ct.as_bytes().to_vec(), ss))
}

fn decapsulate_bytes<P: KyberParams>(ct: &[u8], sk: &[u8]) -> Result<SharedSecret, KemError> {
    let ct = Ciphertext::<P>::from_slice(ct)?;
    let sk = SecretKey::<P>::from_slice(sk)?;
    Ok(kem::decapsulate::<P>(&ct, &sk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_rank() {
        for k in [0usize, 1, 5, 8] {
            assert_eq!(Kyber::new(k), Err(KemError::UnsupportedParameterSet(k)));
        }
    }

    #[test]
    fn reports_exact_sizes() {
        let cases = [(2, 800, 1632, 768), (3, 1184, 2400, 1088), (4, 1568, 3168, 1568)];
        for (k, pk, sk, ct) in cases {
            let kem = Kyber::new(k).unwrap();
            assert_eq!(kem.public_key_bytes(), pk);
            assert_eq!(kem.secret_key_bytes(), sk);
            assert_eq!(kem.ciphertext_bytes(), ct);
            assert_eq!(kem.shared_secret_bytes(), 32);
        }
    }

    #[test]
    fn encapsulate_rejects_wrong_pk_length() {
        let kem = Kyber::new(3).unwrap();
        let err = kem.encapsulate(&[0u8; 800]).unwrap_err();
        assert!(matches!(err, KemError::InvalidLength { expected: 1184, actual: 800, .. }));
    }

    #[test]
    fn decapsulate_rejects_wrong_ct_length() {
        let kem = Kyber::new(2).unwrap();
        let sk = vec![0u8; kem.secret_key_bytes()];
        let err = kem.decapsulate(&[0u8; 1088], &sk).unwrap_err();
        assert!(matches!(err, KemError::InvalidLength { expected: 768, actual: 1088, .. }));
    }
}
