//! `IndCpa`: CPA-secure public-key encryption over `Rq^k`, spec §4.3.
//! Mirrors the teacher's `k_pke.rs` algorithm shape (`k_pke_key_gen`,
//! `k_pke_encrypt`, `k_pke_decrypt`), generalized to a runtime `k` and to
//! the signed/Montgomery `Poly` representation this crate uses.

use crate::byte_fns::{compress_poly, decompress_poly, pack_poly, poly_from_msg, poly_to_msg, unpack_poly};
use crate::ntt::{inv_ntt, poly_reduce_canonical, poly_to_mont};
use crate::params::ParamSet;
use crate::polyvec::{add_assign, dot, mul_mat_t_vec, mul_mat_vec, ntt_vec, zero_vec, PolyVec};
use crate::rng::Rng;
use crate::sampling::{cbd, gen_matrix};
use crate::sponge::sha3_512_split;

/// `IndCpa::keygen` — spec §4.3.1. Returns `(pk, sk)` where
/// `pk = pack(tˆ) ‖ rho` and `sk = pack(sˆ)`.
pub(crate) fn keygen(params: &ParamSet, rng: &mut dyn Rng) -> (Vec<u8>, Vec<u8>) {
    let k = params.k;

    let mut d = [0u8; 32];
    rng.fill(&mut d);
    let (rho, sigma) = sha3_512_split(&[&d]);

    let a_hat = gen_matrix(&rho, k, false);

    let mut nonce = 0u8;
    let mut s: PolyVec = (0..k)
        .map(|_| {
            let p = cbd(params.eta1, &sigma, nonce);
            nonce += 1;
            p
        })
        .collect();
    let mut e: PolyVec = (0..k)
        .map(|_| {
            let p = cbd(params.eta1, &sigma, nonce);
            nonce += 1;
            p
        })
        .collect();

    ntt_vec(&mut s);
    ntt_vec(&mut e);

    let mut t_hat = mul_mat_vec(&a_hat, &s);
    for p in t_hat.iter_mut() {
        poly_to_mont(p);
    }
    add_assign(&mut t_hat, &e);
    for p in t_hat.iter_mut() {
        poly_reduce_canonical(p);
    }

    let mut pk = vec![0u8; params.k * 384 + 32];
    for i in 0..k {
        pack_poly(&t_hat[i], 12, &mut pk[i * 384..(i + 1) * 384]);
    }
    pk[k * 384..].copy_from_slice(&rho);

    let mut sk = vec![0u8; params.k * 384];
    for i in 0..k {
        poly_reduce_canonical(&mut s[i]);
        pack_poly(&s[i], 12, &mut sk[i * 384..(i + 1) * 384]);
    }

    (pk, sk)
}

/// `IndCpa::encrypt` — spec §4.3.2. `pk` is the IndCpa public key
/// (`k*384+32` bytes), `m` is the 32-byte message, `coins` the 32-byte
/// encryption randomness.
pub(crate) fn encrypt(params: &ParamSet, pk: &[u8], m: &[u8; 32], coins: &[u8; 32]) -> Vec<u8> {
    let k = params.k;
    debug_assert_eq!(pk.len(), k * 384 + 32);

    let mut t_hat: PolyVec = zero_vec(k);
    for i in 0..k {
        t_hat[i] = unpack_poly(&pk[i * 384..(i + 1) * 384], 12);
    }
    let rho: [u8; 32] = pk[k * 384..k * 384 + 32].try_into().unwrap();

    // Same non-transposed matrix keygen generates (A[i][j] = XOF(rho,j,i));
    // mul_mat_t_vec below applies the transpose, giving u = A^T.r, not a
    // second transpose on top of an already-transposed matrix.
    let a_hat = gen_matrix(&rho, k, false);

    let mut nonce = 0u8;
    let mut r: PolyVec = (0..k)
        .map(|_| {
            let p = cbd(params.eta1, coins, nonce);
            nonce += 1;
            p
        })
        .collect();
    let e1: PolyVec = (0..k)
        .map(|_| {
            let p = cbd(params.eta2, coins, nonce);
            nonce += 1;
            p
        })
        .collect();
    let e2 = cbd(params.eta2, coins, nonce);

    ntt_vec(&mut r);

    let mut u = mul_mat_t_vec(&a_hat, &r);
    for p in u.iter_mut() {
        inv_ntt(p);
    }
    add_assign(&mut u, &e1);
    for p in u.iter_mut() {
        poly_reduce_canonical(p);
    }

    let v_prime = dot(&t_hat, &r);
    let mut v = v_prime;
    inv_ntt(&mut v);
    let k_poly = poly_from_msg(m);
    for i in 0..256 {
        v[i] += e2[i] + k_poly[i];
    }
    poly_reduce_canonical(&mut v);

    let step = 32 * params.du as usize;
    let mut ct = vec![0u8; k * step + 32 * params.dv as usize];
    for i in 0..k {
        let mut ui = u[i];
        compress_poly(&mut ui, params.du);
        pack_poly(&ui, params.du, &mut ct[i * step..(i + 1) * step]);
    }
    compress_poly(&mut v, params.dv);
    pack_poly(&v, params.dv, &mut ct[k * step..]);

    ct
}

/// `IndCpa::decrypt` — spec §4.3.3.
pub(crate) fn decrypt(params: &ParamSet, sk: &[u8], ct: &[u8]) -> [u8; 32] {
    let k = params.k;
    let step = 32 * params.du as usize;
    debug_assert_eq!(sk.len(), k * 384);
    debug_assert_eq!(ct.len(), k * step + 32 * params.dv as usize);

    let mut u: PolyVec = zero_vec(k);
    for i in 0..k {
        u[i] = unpack_poly(&ct[i * step..(i + 1) * step], params.du);
        decompress_poly(&mut u[i], params.du);
    }
    let mut v = unpack_poly(&ct[k * step..], params.dv);
    decompress_poly(&mut v, params.dv);

    let mut s_hat: PolyVec = zero_vec(k);
    for i in 0..k {
        s_hat[i] = unpack_poly(&sk[i * 384..(i + 1) * 384], 12);
    }

    let mut u_hat = u;
    ntt_vec(&mut u_hat);
    let mut mp = dot(&s_hat, &u_hat);
    inv_ntt(&mut mp);
    for i in 0..256 {
        v[i] -= mp[i];
    }
    poly_reduce_canonical(&mut v);

    poly_to_msg(&v)
}
