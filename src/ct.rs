//! Constant-time utilities from spec §4.2.5, backed by `subtle` the way the
//! teacher crate's `ml_kem.rs` uses `subtle::{ConditionallySelectable,
//! ConstantTimeEq}` rather than hand-rolled branching.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Returns `0` if `a == b`, non-zero otherwise, in time independent of
/// where the first differing byte lies. Panics if the lengths differ
/// (callers always compare equal-length ciphertexts).
#[must_use]
pub(crate) fn verify(a: &[u8], b: &[u8]) -> u8 {
    debug_assert_eq!(a.len(), b.len());
    let eq: Choice = a.ct_eq(b);
    // `eq.unwrap_u8()` is 1 when equal, 0 otherwise; spec wants 0 on
    // equality, so invert.
    1 - eq.unwrap_u8()
}

/// `dst[i] = src[i]` for all `i` iff `cond != 0`, in constant time.
pub(crate) fn cmov(dst: &mut [u8], src: &[u8], cond: u8) {
    debug_assert_eq!(dst.len(), src.len());
    let choice = Choice::from(u8::from(cond != 0));
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_equality() {
        assert_eq!(verify(b"abcd", b"abcd"), 0);
        assert_ne!(verify(b"abcd", b"abce"), 0);
        assert_ne!(verify(b"abcd", b"zbcd"), 0);
    }

    #[test]
    fn cmov_replaces_only_when_set() {
        let mut dst = *b"AAAA";
        cmov(&mut dst, b"BBBB", 0);
        assert_eq!(&dst, b"AAAA");
        cmov(&mut dst, b"BBBB", 1);
        assert_eq!(&dst, b"BBBB");
    }
}
