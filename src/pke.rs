//! IND-CPA public-key encryption — the inner PKE scheme under the KEM.
//!
//! Keys and ciphertexts are raw byte slices at this layer; the KEM wrapper
//! owns the typed containers and the FO transform.

use crate::{
    hash,
    math::{poly::Poly, polyvec::PolyVec},
    params::{KyberParams, SYMBYTES},
};

fn getnoise_eta(eta: usize, seed: &[u8; SYMBYTES], nonce: u8) -> Poly {
    Poly::getnoise_eta(eta, seed, nonce)
}

/// Sample the K×K public matrix `A` from seed `rho` using SHAKE-128.
/// If `transposed`, produces `A^T` for encryption.
///
/// The accepted 12-bit samples are the NTT coefficients directly; no
/// transform is applied afterwards.
fn gen_matrix<const K: usize>(a: &mut [PolyVec<K>], seed: &[u8; SYMBYTES], transposed: bool) {
    use crate::math::sample;

    for (i, a_row) in a.iter_mut().enumerate() {
        for (j, poly) in a_row.polys.iter_mut().enumerate() {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut xof = hash::xof_absorb(seed, x, y);
            sample::rej_uniform(&mut poly.coeffs, &mut xof);
        }
    }
}

// -- IND-CPA key generation --------------------------------------------------

pub(crate) fn indcpa_keypair_derand<P: KyberParams>(
    pk_bytes: &mut [u8], sk_bytes: &mut [u8], coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_keypair_inner::<P, 2>(pk_bytes, sk_bytes, coins),
        3 => indcpa_keypair_inner::<P, 3>(pk_bytes, sk_bytes, coins),
        4 => indcpa_keypair_inner::<P, 4>(pk_bytes, sk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_keypair_inner<P: KyberParams, const K: usize>(
    pk_bytes: &mut [u8], sk_bytes: &mut [u8], coins: &[u8; SYMBYTES],
) {
    // G(d) -> (rho || sigma)
    let buf = hash::hash_g(coins);
    let public_seed: [u8; SYMBYTES] = buf[..SYMBYTES].try_into().unwrap();
    let noise_seed: [u8; SYMBYTES] = buf[SYMBYTES..].try_into().unwrap();

    let mut a: [PolyVec<K>; K] = core::array::from_fn(|_| PolyVec::zero());
    gen_matrix::<K>(&mut a, &public_seed, false);

    let mut nonce: u8 = 0;
    let mut skpv = PolyVec::<K>::zero();
    for p in &mut skpv.polys {
        *p = getnoise_eta(P::ETA1, &noise_seed, nonce);
        nonce += 1;
    }
    let mut e = PolyVec::<K>::zero();
    for p in &mut e.polys {
        *p = getnoise_eta(P::ETA1, &noise_seed, nonce);
        nonce += 1;
    }

    skpv.ntt();
    skpv.reduce();
    e.ntt();

    // t = A * s + e (NTT domain)
    let mut pkpv = PolyVec::<K>::zero();
    for (pk_poly, a_row) in pkpv.polys.iter_mut().zip(a.iter()) {
        PolyVec::basemul_acc_montgomery(pk_poly, a_row, &skpv);
        pk_poly.tomont();
    }
    pkpv += &e;
    pkpv.reduce();

    // pk = Encode_12(t) || rho, sk = Encode_12(s)
    pkpv.tobytes(&mut pk_bytes[..P::POLYVEC_BYTES]);
    pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES].copy_from_slice(&public_seed);
    skpv.tobytes(&mut sk_bytes[..P::INDCPA_SK_BYTES]);
}

// -- IND-CPA encryption ------------------------------------------------------

pub(crate) fn indcpa_enc<P: KyberParams>(
    ct_bytes: &mut [u8], m: &[u8; SYMBYTES], pk_bytes: &[u8], coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_enc_inner::<P, 2>(ct_bytes, m, pk_bytes, coins),
        3 => indcpa_enc_inner::<P, 3>(ct_bytes, m, pk_bytes, coins),
        4 => indcpa_enc_inner::<P, 4>(ct_bytes, m, pk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_enc_inner<P: KyberParams, const K: usize>(
    ct_bytes: &mut [u8], m: &[u8; SYMBYTES], pk_bytes: &[u8], coins: &[u8; SYMBYTES],
) {
    let pkpv = PolyVec::<K>::frombytes(&pk_bytes[..P::POLYVEC_BYTES]);
    let seed: [u8; SYMBYTES] = pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES]
        .try_into()
        .unwrap();
    let k = Poly::frommsg(m);

    let mut at: [PolyVec<K>; K] = core::array::from_fn(|_| PolyVec::zero());
    gen_matrix::<K>(&mut at, &seed, true);

    let mut nonce: u8 = 0;
    let mut sp = PolyVec::<K>::zero();
    for p in &mut sp.polys {
        *p = getnoise_eta(P::ETA1, coins, nonce);
        nonce += 1;
    }
    let mut ep = PolyVec::<K>::zero();
    for p in &mut ep.polys {
        *p = getnoise_eta(P::ETA2, coins, nonce);
        nonce += 1;
    }
    let epp = getnoise_eta(P::ETA2, coins, nonce);

    sp.ntt();

    // u = A^T * r + e1
    let mut b = PolyVec::<K>::zero();
    for (b_poly, at_row) in b.polys.iter_mut().zip(at.iter()) {
        PolyVec::basemul_acc_montgomery(b_poly, at_row, &sp);
    }

    // v = t^T * r + e2 + Decompress_1(m)
    let mut v = Poly::zero();
    PolyVec::basemul_acc_montgomery(&mut v, &pkpv, &sp);

    b.invntt_tomont();
    v.invntt_tomont();

    b += &ep;
    v += &epp;
    v += &k;

    b.reduce();
    v.reduce();

    b.compress(&mut ct_bytes[..P::POLYVEC_COMPRESSED_BYTES], P::D_U);
    v.compress(
        &mut ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_BYTES],
        P::D_V,
    );
}

// -- IND-CPA decryption ------------------------------------------------------

pub(crate) fn indcpa_dec<P: KyberParams>(m: &mut [u8; SYMBYTES], ct_bytes: &[u8], sk_bytes: &[u8]) {
    match P::K {
        2 => indcpa_dec_inner::<P, 2>(m, ct_bytes, sk_bytes),
        3 => indcpa_dec_inner::<P, 3>(m, ct_bytes, sk_bytes),
        4 => indcpa_dec_inner::<P, 4>(m, ct_bytes, sk_bytes),
        _ => unreachable!(),
    }
}

fn indcpa_dec_inner<P: KyberParams, const K: usize>(
    m: &mut [u8; SYMBYTES], ct_bytes: &[u8], sk_bytes: &[u8],
) {
    let b = PolyVec::<K>::decompress(&ct_bytes[..P::POLYVEC_COMPRESSED_BYTES], P::D_U);
    let v = Poly::decompress(
        &ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_BYTES],
        P::D_V,
    );
    let skpv = PolyVec::<K>::frombytes(&sk_bytes[..P::INDCPA_SK_BYTES]);

    let mut b_ntt = b;
    b_ntt.ntt();

    let mut mp = Poly::zero();
    PolyVec::basemul_acc_montgomery(&mut mp, &skpv, &b_ntt);
    mp.invntt_tomont();

    // m' = v - s^T * u
    let mut msg = Poly::zero();
    msg.sub(&v, &mp);
    msg.reduce();
    *m = msg.tomsg();
}
