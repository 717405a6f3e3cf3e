//! `AsymmetricKey` / `AsymmetricKeyPair` containers, spec §4.5 and §6.3.
//!
//! The teacher crate represents encapsulation/decapsulation keys as
//! const-generic byte arrays (`types.rs::{EncapsKey, DecapsKey}`) specific to
//! one compile-time parameter set. This crate selects its parameter set at
//! runtime (see `SPEC_FULL.md` §0), so the equivalent container instead
//! carries its own `(primitive, class, parameter)` tag alongside a `Vec<u8>`
//! payload — the CEX `AsymmetricKey` shape spec §3/§6.3 describes, generic
//! across every asymmetric primitive the source repo implements even though
//! only `Kyber` is built here (spec.md §11.2's grounding for why the
//! sibling-primitive variants still exist in the enum).

use crate::error::Error;
use crate::params::KyberParameter;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The full sibling set of asymmetric primitives the CEX source implements.
/// Only [`AsymmetricPrimitive::Kyber`] has a working cipher in this crate;
/// the rest exist so [`AsymmetricKey::from_bytes`] can validate a
/// deserialized primitive tag against "the known set", spec §6.3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsymmetricPrimitive {
    /// Module-LWE KEM, the primitive this crate actually implements.
    Kyber,
    /// Code-based KEM (out of scope; enum slot kept for serialization).
    McEliece,
    /// Lattice-based KEM (out of scope; enum slot kept for serialization).
    Ntru,
    /// Elliptic-curve signature scheme (out of scope; enum slot kept for serialization).
    Ecdsa,
    /// Hash-based signature scheme (out of scope; enum slot kept for serialization).
    SphincsPlus,
}

impl AsymmetricPrimitive {
    fn discriminant(self) -> u8 {
        match self {
            AsymmetricPrimitive::Kyber => 0,
            AsymmetricPrimitive::McEliece => 1,
            AsymmetricPrimitive::Ntru => 2,
            AsymmetricPrimitive::Ecdsa => 3,
            AsymmetricPrimitive::SphincsPlus => 4,
        }
    }

    fn from_discriminant(d: u8) -> Result<Self, Error> {
        match d {
            0 => Ok(AsymmetricPrimitive::Kyber),
            1 => Ok(AsymmetricPrimitive::McEliece),
            2 => Ok(AsymmetricPrimitive::Ntru),
            3 => Ok(AsymmetricPrimitive::Ecdsa),
            4 => Ok(AsymmetricPrimitive::SphincsPlus),
            _ => Err(Error::InvalidParameter),
        }
    }
}

/// Whether an [`AsymmetricKey`] holds the public or private half of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsymmetricKeyClass {
    /// The public half of a key pair.
    Public,
    /// The private half of a key pair.
    Private,
}

impl AsymmetricKeyClass {
    fn discriminant(self) -> u8 {
        match self {
            AsymmetricKeyClass::Public => 0,
            AsymmetricKeyClass::Private => 1,
        }
    }

    fn from_discriminant(d: u8) -> Result<Self, Error> {
        match d {
            0 => Ok(AsymmetricKeyClass::Public),
            1 => Ok(AsymmetricKeyClass::Private),
            _ => Err(Error::InvalidParameter),
        }
    }
}

/// An immutable `(polynomial bytes, primitive, class, parameter)` value,
/// spec §4.5. Holds either a Kyber public key (`pk_bytes` long) or a full
/// Kyber private key (`sk_bytes` long, see `kem.rs`'s sk layout).
///
/// Derives `Zeroize`/`ZeroizeOnDrop` on the payload unconditionally — the
/// same blanket choice the teacher's `EncapsKey`/`DecapsKey` make (spec §3
/// only strictly requires this for private-key bytes, but zeroizing a
/// public key costs nothing and keeps one code path instead of two).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AsymmetricKey {
    #[zeroize(skip)]
    primitive: AsymmetricPrimitive,
    #[zeroize(skip)]
    class: AsymmetricKeyClass,
    #[zeroize(skip)]
    parameter: KyberParameter,
    polynomial: Vec<u8>,
}

impl AsymmetricKey {
    /// Builds a key from its raw payload. `kem.rs` is the only caller that
    /// constructs these directly (from `IndCpa`/FO-transform output); keys
    /// arriving over the wire go through [`AsymmetricKey::from_bytes`].
    #[must_use]
    pub(crate) fn new(
        primitive: AsymmetricPrimitive,
        class: AsymmetricKeyClass,
        parameter: KyberParameter,
        polynomial: Vec<u8>,
    ) -> Self {
        Self {
            primitive,
            class,
            parameter,
            polynomial,
        }
    }

    /// Which asymmetric primitive this key belongs to.
    #[must_use]
    pub fn primitive(&self) -> AsymmetricPrimitive {
        self.primitive
    }

    /// Whether this is the public or private half of a pair.
    #[must_use]
    pub fn class(&self) -> AsymmetricKeyClass {
        self.class
    }

    /// Which Kyber parameter set this key was generated under.
    #[must_use]
    pub fn parameter(&self) -> KyberParameter {
        self.parameter
    }

    /// The raw key payload (an IndCpa public key, or a full FO-transform
    /// private key, per `kem.rs`'s layout).
    #[must_use]
    pub fn polynomial(&self) -> &[u8] {
        &self.polynomial
    }

    /// Serializes per spec §6.3: a 4-byte header of enum discriminants
    /// (`[primitive, class, parameter_low, parameter_high]` — the parameter
    /// is carried as a little-endian `u16` to leave headroom for future
    /// parameter sets) followed by the raw polynomial bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let param = self.parameter.discriminant();
        let mut out = Vec::with_capacity(4 + self.polynomial.len());
        out.push(self.primitive.discriminant());
        out.push(self.class.discriminant());
        out.extend_from_slice(&param.to_le_bytes());
        out.extend_from_slice(&self.polynomial);
        out
    }

    /// Deserializes per spec §6.3, validating all three enums "against the
    /// known set". Does not validate the polynomial length against the
    /// claimed parameter's `pk_bytes`/`sk_bytes` — `KemKyber::initialize` is
    /// responsible for that check, since only it knows which class (public
    /// vs. private) the key must additionally match for this KEM instance.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 4 {
            return Err(Error::InvalidKey);
        }
        let primitive = AsymmetricPrimitive::from_discriminant(bytes[0])?;
        let class = AsymmetricKeyClass::from_discriminant(bytes[1])?;
        let param_discriminant = u16::from_le_bytes([bytes[2], bytes[3]]);
        let parameter = KyberParameter::from_discriminant(param_discriminant)?;
        Ok(Self {
            primitive,
            class,
            parameter,
            polynomial: bytes[4..].to_vec(),
        })
    }
}

/// Owns one public and one private [`AsymmetricKey`], released to the
/// caller by move (spec §4.5, §9 "the key-pair produced by `generate` owns
/// its two keys and transfers them to the caller on a single move").
pub struct AsymmetricKeyPair {
    /// The public half of the pair.
    pub public_key: AsymmetricKey,
    /// The private half of the pair.
    pub private_key: AsymmetricKey,
}

impl AsymmetricKeyPair {
    #[must_use]
    pub(crate) fn new(public_key: AsymmetricKey, private_key: AsymmetricKey) -> Self {
        Self {
            public_key,
            private_key,
        }
    }

    /// Consumes the pair, handing both keys to the caller by move.
    #[must_use]
    pub fn into_keys(self) -> (AsymmetricKey, AsymmetricKey) {
        (self.public_key, self.private_key)
    }
}
