use crate::error::Error;

/// Selects one of the four Module-LWE parameter sets.
///
/// `S4` is deliberately absent: the CEX source this crate is derived from
/// defines four parameter sets in its template-generic code (`KyberBase.h`)
/// but its public enum (`KyberParameters.h`) only names three, skipping the
/// k=2 set under the gap where `S4` would sit. This crate keeps that gap
/// (documented, not "fixed" — see DESIGN.md) while still implementing all
/// four underlying parameter sets, since all four appear in the KAT corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KyberParameter {
    /// k=2, category 1 (NIST Kyber512-equivalent).
    S2,
    /// k=3, category 3 (NIST Kyber768-equivalent).
    S3,
    /// k=4, category 5-adjacent (NIST Kyber1024-equivalent).
    S5,
    /// k=5, the non-standard fourth set present in the source's KAT corpus.
    S6,
}

impl KyberParameter {
    pub(crate) fn from_discriminant(d: u16) -> Result<Self, Error> {
        match d {
            0 => Ok(KyberParameter::S2),
            1 => Ok(KyberParameter::S3),
            2 => Ok(KyberParameter::S5),
            3 => Ok(KyberParameter::S6),
            _ => Err(Error::InvalidParameter),
        }
    }

    pub(crate) fn discriminant(self) -> u16 {
        match self {
            KyberParameter::S2 => 0,
            KyberParameter::S3 => 1,
            KyberParameter::S5 => 2,
            KyberParameter::S6 => 3,
        }
    }

    /// Looks up the fully expanded parameter table for this set.
    #[must_use]
    pub fn param_set(self) -> ParamSet {
        match self {
            KyberParameter::S2 => ParamSet {
                parameter: self,
                k: 2,
                eta1: 3,
                eta2: 2,
                du: 10,
                dv: 4,
                poly_vec_base: 320,
                poly_compressed: 128,
                pk_bytes: 800,
                sk_bytes: 1632,
                ct_bytes: 768,
                name: "KYBER-S2Q3329N256",
            },
            KyberParameter::S3 => ParamSet {
                parameter: self,
                k: 3,
                eta1: 2,
                eta2: 2,
                du: 10,
                dv: 4,
                poly_vec_base: 320,
                poly_compressed: 128,
                pk_bytes: 1184,
                sk_bytes: 2400,
                ct_bytes: 1088,
                name: "KYBER-S3Q3329N256",
            },
            KyberParameter::S5 => ParamSet {
                parameter: self,
                k: 4,
                eta1: 2,
                eta2: 2,
                du: 11,
                dv: 5,
                poly_vec_base: 352,
                poly_compressed: 160,
                pk_bytes: 1568,
                sk_bytes: 3168,
                ct_bytes: 1568,
                name: "KYBER-S5Q3329N256",
            },
            KyberParameter::S6 => ParamSet {
                parameter: self,
                k: 5,
                eta1: 2,
                eta2: 2,
                du: 11,
                dv: 5,
                poly_vec_base: 352,
                poly_compressed: 160,
                pk_bytes: 1952,
                sk_bytes: 3936,
                ct_bytes: 1920,
                name: "KYBER-S6Q3329N256",
            },
        }
    }
}

/// Fully expanded, runtime-selected size/parameter table for one
/// [`KyberParameter`]. Chosen once at `KemKyber::new*` time and never
/// changes thereafter (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSet {
    /// The parameter this table was looked up for.
    pub parameter: KyberParameter,
    /// Module rank: the dimension of the `PolyVec`s and the matrix `A`.
    pub k: usize,
    /// CBD width used to sample the secret and error vectors.
    pub eta1: u32,
    /// CBD width used to sample the encryption-time noise terms.
    pub eta2: u32,
    /// Compression width (bits/coefficient) for the `u` ciphertext half.
    pub du: u32,
    /// Compression width (bits/coefficient) for the `v` ciphertext half.
    pub dv: u32,
    /// Compressed bytes per polynomial in a compressed `PolyVec` (`32 * du`).
    pub poly_vec_base: usize,
    /// Compressed bytes for the single compressed poly `v` (`32 * dv`).
    pub poly_compressed: usize,
    /// Encoded public-key length in bytes.
    pub pk_bytes: usize,
    /// Encoded private-key length in bytes.
    pub sk_bytes: usize,
    /// Encoded ciphertext length in bytes.
    pub ct_bytes: usize,
    /// The formal cipher name, e.g. `"KYBER-S2Q3329N256"`.
    pub name: &'static str,
}

/// Fixed ring/sponge constants shared across all parameter sets (spec §3).
pub(crate) const N: usize = 256;
pub(crate) const Q: i16 = 3329;
pub(crate) const SYMBYTES: usize = 32;
pub(crate) const POLYBYTES: usize = 384;
