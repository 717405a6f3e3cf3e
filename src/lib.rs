#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! Module-LWE key encapsulation mechanism (the Kyber round-3 family),
//! together with the Keccak/SHAKE sponge, deterministic AES-256-CTR DRBG,
//! and asymmetric key/key-pair containers it depends on.
//!
//! This crate reimplements the `ModuleLWE`/`Kyber` core of a larger
//! multi-primitive asymmetric-cryptography library (see `DESIGN.md` for the
//! grounding ledger). The other primitives that library exposes through the
//! same `IAsymmetricCipher`-shaped surface — McEliece, NTRU, ECDSA,
//! SPHINCS+ — are out of scope here; only Kyber's concrete path is built,
//! per `KemKyber`.
//!
//! ```
//! use mlwe_kem::{KemKyber, KyberParameter, SystemRng};
//!
//! let mut gen_kem = KemKyber::new_owned(KyberParameter::S3, Box::new(SystemRng));
//! let pair = gen_kem.generate().unwrap();
//! let (public_key, private_key) = pair.into_keys();
//!
//! let mut encapsulator = KemKyber::new_owned(KyberParameter::S3, Box::new(SystemRng));
//! encapsulator.initialize(public_key).unwrap();
//! let mut ciphertext = Vec::new();
//! let mut alice_secret = Vec::new();
//! encapsulator.encapsulate(&mut ciphertext, &mut alice_secret).unwrap();
//!
//! let mut decapsulator = KemKyber::new_owned(KyberParameter::S3, Box::new(SystemRng));
//! decapsulator.initialize(private_key).unwrap();
//! let mut bob_secret = Vec::new();
//! let ok = decapsulator.decapsulate(&ciphertext, &mut bob_secret).unwrap();
//!
//! assert!(ok);
//! assert_eq!(alice_secret, bob_secret);
//! ```

mod byte_fns;
mod ct;
mod error;
mod indcpa;
mod kem;
mod keys;
mod ntt;
mod params;
mod polyvec;
mod rng;
mod sampling;
#[cfg(feature = "simd")]
pub mod simd;
mod sponge;

pub use error::Error;
pub use kem::KemKyber;
pub use keys::{AsymmetricKey, AsymmetricKeyClass, AsymmetricKeyPair, AsymmetricPrimitive};
pub use params::{KyberParameter, ParamSet};
#[cfg(feature = "default-rng")]
pub use rng::SystemRng;
pub use rng::{Aes256CtrDrbg, Rng, RngCoreAdapter};
