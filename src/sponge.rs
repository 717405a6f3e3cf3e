//! `SpongeKeccak` (spec §4.1): fixed-rate Keccak-f[1600] absorb/squeeze
//! front-ends used throughout the KEM.
//!
//! The Keccak-f[1600] permutation itself is delegated to the audited `sha3`
//! crate rather than hand-rolled, the same choice both Rust Kyber crates in
//! this retrieval pack make. What this module owns is the *shape* spec §4.1
//! describes: SHA3-256/512 and SHAKE-128/256 convenience front-ends, plus
//! the domain-separated extensible-output construction (`cSHAKE-256`) spec
//! §4.4 needs for the optional domain key, which the pinned `sha3` version
//! does not expose directly and which this module builds on top of
//! `Shake256` per NIST SP 800-185.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

/// SHA3-256(bytes) — used for `H(pk)` throughout the FO transform.
#[must_use]
pub(crate) fn sha3_256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}

/// SHA3-512(bytes) split into two 32-byte halves — used for `(ρ, σ) ←
/// SHA3-512(d)` in `IndCpa::keygen` and `(Kbar, r) ← SHA3-512(m‖H(pk))` in
/// encapsulation/decapsulation.
#[must_use]
pub(crate) fn sha3_512_split(parts: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::new();
    for p in parts {
        Digest::update(&mut hasher, p);
    }
    let digest = hasher.finalize();
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    a.copy_from_slice(&digest[0..32]);
    b.copy_from_slice(&digest[32..64]);
    (a, b)
}

/// SHAKE-128 XOF seeded with `rho ‖ j ‖ i` (or `rho ‖ i ‖ j` when
/// transposed), used to rejection-sample matrix entries `A[i][j]`.
#[must_use]
pub(crate) fn xof_matrix(rho: &[u8; 32], byte0: u8, byte1: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(rho);
    hasher.update(&[byte0]);
    hasher.update(&[byte1]);
    hasher.finalize_xof()
}

/// PRF(s, b) = SHAKE-256(s‖b), truncated to `eta * N / 4` bytes by the
/// caller — used to key the centred binomial sampler.
#[must_use]
pub(crate) fn prf(s: &[u8; 32], b: u8, out_len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    hasher.update(s);
    hasher.update(&[b]);
    let mut reader = hasher.finalize_xof();
    let mut out = vec![0u8; out_len];
    reader.read(&mut out);
    out
}

/// SHAKE-256(input, out_len) — the default shared-secret KDF (spec §4.4),
/// used as `ss ← SHAKE-256(Kbar ‖ kr_tail, outlen)` when no domain key is
/// configured.
pub(crate) fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    for p in parts {
        hasher.update(p);
    }
    let mut reader = hasher.finalize_xof();
    reader.read(out);
}

/// `cSHAKE256(input, out_len, name, customization)` per NIST SP 800-185,
/// used in place of plain SHAKE-256 when `KemKyber::domain_key` is
/// non-empty (spec §4.4 "Extended shared-secret mode").
///
/// Built directly on `Shake256` since this pack's `sha3` version has no
/// ready-made `CShake256` type: when both `name` and `customization` are
/// empty, `cSHAKE256(X, L, "", "")` is defined to be plain `SHAKE256(X, L)`,
/// which this function also implements for that case (no bytepad prefix).
pub(crate) fn cshake256(parts: &[&[u8]], name: &[u8], customization: &[u8], out: &mut [u8]) {
    if name.is_empty() && customization.is_empty() {
        shake256(parts, out);
        return;
    }
    let mut hasher = Shake256::default();
    let prefix = bytepad(&[encode_string(name), encode_string(customization)], 136);
    hasher.update(&prefix);
    for p in parts {
        hasher.update(p);
    }
    let mut reader = hasher.finalize_xof();
    reader.read(out);
}

/// left_encode(x) per SP 800-185 §2.3.1.
fn left_encode(mut x: u64) -> Vec<u8> {
    let mut reversed = Vec::new();
    if x == 0 {
        reversed.push(0u8);
    } else {
        while x > 0 {
            reversed.push((x & 0xff) as u8);
            x >>= 8;
        }
    }
    let n = reversed.len() as u8;
    let mut out = Vec::with_capacity(reversed.len() + 1);
    out.extend(reversed.iter().rev());
    out.push(n);
    out
}

/// right_encode(x) per SP 800-185 §2.3.1 — unused by this crate's
/// `encode_string` but kept for symmetry with the standard's definition.
#[allow(dead_code)]
fn right_encode(mut x: u64) -> Vec<u8> {
    let mut forward = Vec::new();
    if x == 0 {
        forward.push(0u8);
    } else {
        while x > 0 {
            forward.push((x & 0xff) as u8);
            x >>= 8;
        }
        forward.reverse();
    }
    let n = forward.len() as u8;
    forward.push(n);
    forward
}

/// encode_string(S) = left_encode(len(S) in bits) ‖ S, per SP 800-185 §2.3.2.
fn encode_string(s: &[u8]) -> Vec<u8> {
    let mut out = left_encode((s.len() as u64) * 8);
    out.extend_from_slice(s);
    out
}

/// bytepad(X, w): left_encode(w) ‖ X, zero-padded to a multiple of `w`
/// bytes, per SP 800-185 §2.3.3.
fn bytepad(parts: &[Vec<u8>], w: usize) -> Vec<u8> {
    let mut out = left_encode(w as u64);
    for p in parts {
        out.extend_from_slice(p);
    }
    while out.len() % w != 0 {
        out.push(0);
    }
    out
}
