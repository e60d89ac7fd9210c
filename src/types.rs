//! Key, ciphertext, and shared-secret containers with RAII zeroization.
//!
//! Secret types zeroize on drop and redact their Debug output. Sizes are
//! fixed by the parameter set; the checked [`PublicKey::from_slice`]-style
//! constructors are the only place a length error can arise.

use crate::error::KemError;
use crate::params::{ByteArray, KyberParams, SSBYTES};
use zeroize::{Zeroize, ZeroizeOnDrop};

fn checked<A: ByteArray>(bytes: &[u8], context: &'static str) -> Result<A, KemError> {
    if bytes.len() != A::LEN {
        return Err(KemError::InvalidLength {
            context,
            expected: A::LEN,
            actual: bytes.len(),
        });
    }
    let mut arr = A::zeroed();
    arr.as_mut().copy_from_slice(bytes);
    Ok(arr)
}

/// Kyber public (encapsulation) key.
pub struct PublicKey<P: KyberParams> {
    pub(crate) bytes: P::PkArray,
}

impl<P: KyberParams> PublicKey<P> {
    /// Wrap an existing byte array as a public key.
    #[inline]
    pub fn from_bytes(bytes: P::PkArray) -> Self {
        Self { bytes }
    }

    /// Parse a public key from a slice, validating its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KemError> {
        Ok(Self {
            bytes: checked(bytes, "public key")?,
        })
    }

    /// View the key as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::PkArray {
        self.bytes
    }
}

impl<P: KyberParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KyberParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KyberParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &P::PK_BYTES)
            .finish_non_exhaustive()
    }
}

/// Kyber secret (decapsulation) key. Zeroized on drop.
pub struct SecretKey<P: KyberParams> {
    pub(crate) bytes: P::SkArray,
}

impl<P: KyberParams> SecretKey<P> {
    /// Wrap an existing byte array as a secret key.
    #[inline]
    pub fn from_bytes(bytes: P::SkArray) -> Self {
        Self { bytes }
    }

    /// Parse a secret key from a slice, validating its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KemError> {
        Ok(Self {
            bytes: checked(bytes, "secret key")?,
        })
    }

    /// View the key as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KyberParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KyberParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KyberParams> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: KyberParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: KyberParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Kyber ciphertext.
pub struct Ciphertext<P: KyberParams> {
    pub(crate) bytes: P::CtArray,
}

impl<P: KyberParams> Ciphertext<P> {
    /// Wrap an existing byte array as a ciphertext.
    #[inline]
    pub fn from_bytes(bytes: P::CtArray) -> Self {
        Self { bytes }
    }

    /// Parse a ciphertext from a slice, validating its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KemError> {
        Ok(Self {
            bytes: checked(bytes, "ciphertext")?,
        })
    }

    /// View the ciphertext as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::CtArray {
        self.bytes
    }
}

impl<P: KyberParams> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KyberParams> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KyberParams> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &P::CT_BYTES)
            .finish_non_exhaustive()
    }
}

/// Shared secret (always 32 bytes). Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    /// Wrap a raw 32-byte array as a shared secret.
    #[inline]
    pub fn from_bytes(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }

    /// View the secret as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
