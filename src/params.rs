//! Kyber parameter sets and global constants.
//!
//! The sealed [`KyberParams`] trait pins every per-K constant (η values,
//! compression rates, byte sizes) at the type level, so key and ciphertext
//! buffers are fixed-size arrays and size mismatches inside the engine are
//! unrepresentable.

use zeroize::Zeroize;

/// Ring dimension n: polynomials have 256 coefficients.
pub const N: usize = 256;

/// Field modulus q.
pub const Q: i16 = 3329;

/// Length of seeds, hashes, and messages (ρ, σ, z, m).
pub const SYMBYTES: usize = 32;

/// Length of the shared secret.
pub const SSBYTES: usize = 32;

/// Bytes per 12-bit-packed polynomial: 256 · 12 / 8.
pub const POLYBYTES: usize = 384;

/// Fixed-size byte storage for keys and ciphertexts.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static
{
    /// Array length in bytes.
    const LEN: usize;
    /// A zero-filled instance.
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Kyber parameter set. Sealed -- only implemented for [`Kyber512`],
/// [`Kyber768`], [`Kyber1024`].
pub trait KyberParams: sealed::Sealed + 'static {
    /// Module rank: the ring R_q is used as a rank-K module.
    const K: usize;
    /// CBD width for the keygen secret/error and the encryption secret r.
    const ETA1: usize;
    /// CBD width for the encryption errors e1, e2.
    const ETA2: usize;
    /// Compression rate for the ciphertext u component.
    const D_U: u32;
    /// Compression rate for the ciphertext v component.
    const D_V: u32;

    /// 12-bit-packed polynomial vector: K · 384.
    const POLYVEC_BYTES: usize;
    /// Compressed v polynomial: 256 · D_V / 8.
    const POLY_COMPRESSED_BYTES: usize;
    /// Compressed u vector: K · 256 · D_U / 8.
    const POLYVEC_COMPRESSED_BYTES: usize;
    /// IND-CPA public key: packed t̂ plus the 32-byte matrix seed ρ.
    const INDCPA_PK_BYTES: usize;
    /// IND-CPA secret key: packed ŝ.
    const INDCPA_SK_BYTES: usize;
    /// IND-CPA ciphertext: compressed u plus compressed v.
    const INDCPA_BYTES: usize;
    /// KEM public key (identical to the IND-CPA public key).
    const PK_BYTES: usize;
    /// KEM secret key: sk_cpa ‖ pk ‖ H(pk) ‖ z.
    const SK_BYTES: usize;
    /// KEM ciphertext (identical to the IND-CPA ciphertext).
    const CT_BYTES: usize;

    /// Public key storage.
    type PkArray: ByteArray;
    /// Secret key storage.
    type SkArray: ByteArray;
    /// Ciphertext storage.
    type CtArray: ByteArray;
}

macro_rules! impl_kyber_params {
    (
        $name:ident, K = $K:literal,
        ETA1 = $eta1:literal, ETA2 = $eta2:literal,
        D_U = $du:literal, D_V = $dv:literal,
        POLY_COMPRESSED_BYTES = $pcb:literal,
        PK_BYTES = $pkb:literal,
        SK_BYTES = $skb:literal,
        CT_BYTES = $ctb:literal
    ) => {
        impl sealed::Sealed for $name {}

        impl KyberParams for $name {
            const K: usize = $K;
            const ETA1: usize = $eta1;
            const ETA2: usize = $eta2;
            const D_U: u32 = $du;
            const D_V: u32 = $dv;

            const POLYVEC_BYTES: usize = $K * POLYBYTES;
            const POLY_COMPRESSED_BYTES: usize = $pcb;
            const POLYVEC_COMPRESSED_BYTES: usize = $K * N * $du / 8;
            const INDCPA_PK_BYTES: usize = Self::POLYVEC_BYTES + SYMBYTES;
            const INDCPA_SK_BYTES: usize = Self::POLYVEC_BYTES;
            const INDCPA_BYTES: usize =
                Self::POLYVEC_COMPRESSED_BYTES + Self::POLY_COMPRESSED_BYTES;
            const PK_BYTES: usize = $pkb;
            const SK_BYTES: usize = $skb;
            const CT_BYTES: usize = $ctb;

            type PkArray = [u8; $pkb];
            type SkArray = [u8; $skb];
            type CtArray = [u8; $ctb];
        }
    };
}

/// Kyber-512 (k = 2, NIST security level 1).
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

/// Kyber-768 (k = 3, NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

/// Kyber-1024 (k = 4, NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl_kyber_params!(
    Kyber512,
    K = 2,
    ETA1 = 3,
    ETA2 = 2,
    D_U = 10,
    D_V = 4,
    POLY_COMPRESSED_BYTES = 128,
    PK_BYTES = 800,
    SK_BYTES = 1632,
    CT_BYTES = 768
);

impl_kyber_params!(
    Kyber768,
    K = 3,
    ETA1 = 2,
    ETA2 = 2,
    D_U = 10,
    D_V = 4,
    POLY_COMPRESSED_BYTES = 128,
    PK_BYTES = 1184,
    SK_BYTES = 2400,
    CT_BYTES = 1088
);

impl_kyber_params!(
    Kyber1024,
    K = 4,
    ETA1 = 2,
    ETA2 = 2,
    D_U = 11,
    D_V = 5,
    POLY_COMPRESSED_BYTES = 160,
    PK_BYTES = 1568,
    SK_BYTES = 3168,
    CT_BYTES = 1568
);

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::POLY_COMPRESSED_BYTES == N * <$t>::D_V as usize / 8);
            assert!(<$t>::INDCPA_BYTES == <$t>::CT_BYTES);
            assert!(<$t>::PK_BYTES == <$t>::INDCPA_PK_BYTES);
            assert!(<$t>::SK_BYTES == <$t>::INDCPA_SK_BYTES + <$t>::PK_BYTES + 2 * SYMBYTES);
        };
    }
    check_params!(Kyber512);
    check_params!(Kyber768);
    check_params!(Kyber1024);

    assert!(Kyber512::POLYVEC_BYTES == 768);
    assert!(Kyber512::PK_BYTES == 800);
    assert!(Kyber512::SK_BYTES == 1632);
    assert!(Kyber512::CT_BYTES == 768);
    assert!(Kyber768::POLYVEC_BYTES == 1152);
    assert!(Kyber768::PK_BYTES == 1184);
    assert!(Kyber768::SK_BYTES == 2400);
    assert!(Kyber768::CT_BYTES == 1088);
    assert!(Kyber1024::POLYVEC_BYTES == 1536);
    assert!(Kyber1024::PK_BYTES == 1568);
    assert!(Kyber1024::SK_BYTES == 3168);
    assert!(Kyber1024::CT_BYTES == 1568);
};
