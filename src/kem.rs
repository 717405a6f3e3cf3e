//! `KemKyber`: the Fujisaki–Okamoto transform wrapper on top of `IndCpa`,
//! spec §4.4, exposing the §6.1 library API. Plays the role the teacher's
//! `ml_kem.rs` free functions play, but packaged as a stateful struct per
//! spec §6.1's method surface (`new`, `generate`, `initialize`,
//! `encapsulate`, `decapsulate`, `domain_key`) rather than free functions,
//! since this crate selects `k` at runtime instead of via const generics.

use crate::ct::{cmov, verify};
use crate::error::Error;
use crate::indcpa;
use crate::keys::{AsymmetricKey, AsymmetricKeyClass, AsymmetricKeyPair, AsymmetricPrimitive};
use crate::params::{KyberParameter, ParamSet};
use crate::rng::Rng;
use crate::sponge::{cshake256, sha3_256, sha3_512_split, shake256};

/// Either an owned or a borrowed randomness source, spec §9 "the port should
/// model two construction paths". Implements [`Rng`] itself so `KemKyber`'s
/// internals don't need to match on which flavor they hold.
enum RngHandle<'a> {
    Owned(Box<dyn Rng>),
    Borrowed(&'a mut dyn Rng),
}

impl Rng for RngHandle<'_> {
    fn fill(&mut self, dest: &mut [u8]) {
        match self {
            RngHandle::Owned(r) => r.fill(dest),
            RngHandle::Borrowed(r) => r.fill(dest),
        }
    }
}

/// What `initialize` set this instance up to do. `Uninitialized` is the
/// state `encapsulate`/`decapsulate` must reject with [`Error::NotInitialized`].
enum Mode {
    Uninitialized,
    /// Holds the IndCpa public key bytes (`k*384+32`).
    Encapsulating(Vec<u8>),
    /// Holds the full FO-transform private key bytes (`sk_bytes`).
    Decapsulating(Vec<u8>),
}

/// The Module-LWE KEM core, spec §4.4 / §6.1.
///
/// Per spec §9's ownership note, `initialize` takes ownership of the
/// [`AsymmetricKey`] passed to it (moved, not borrowed) — matching what the
/// CEX source's `ModuleLWE::Initialize` actually does with its
/// `std::unique_ptr` adoption, rather than the `IAsymmetricCipher` doc
/// comment's claim of borrowing (spec §9, §11.3's recorded decision).
pub struct KemKyber<'a> {
    params: ParamSet,
    rng: RngHandle<'a>,
    mode: Mode,
    domain_key: Vec<u8>,
}

impl<'a> KemKyber<'a> {
    /// Constructs a `KemKyber` that owns its randomness source.
    #[must_use]
    pub fn new_owned(parameter: KyberParameter, rng: Box<dyn Rng>) -> Self {
        Self {
            params: parameter.param_set(),
            rng: RngHandle::Owned(rng),
            mode: Mode::Uninitialized,
            domain_key: Vec::new(),
        }
    }

    /// Constructs a `KemKyber` that borrows its randomness source for `'a`.
    #[must_use]
    pub fn new_borrowed(parameter: KyberParameter, rng: &'a mut dyn Rng) -> Self {
        Self {
            params: parameter.param_set(),
            rng: RngHandle::Borrowed(rng),
            mode: Mode::Uninitialized,
            domain_key: Vec::new(),
        }
    }

    /// The formal cipher name, e.g. `"KYBER-S2Q3329N256"` (spec §6.1).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.params.name
    }

    /// Encoded public-key length in bytes for this instance's parameter set.
    #[must_use]
    pub fn public_key_bytes(&self) -> usize {
        self.params.pk_bytes
    }

    /// Encoded private-key length in bytes for this instance's parameter set.
    #[must_use]
    pub fn private_key_bytes(&self) -> usize {
        self.params.sk_bytes
    }

    /// Encoded ciphertext length in bytes for this instance's parameter set.
    #[must_use]
    pub fn ciphertext_bytes(&self) -> usize {
        self.params.ct_bytes
    }

    /// Default shared-secret length (spec §3, §6.1): 32 bytes when no
    /// domain key is configured. `encapsulate`/`decapsulate` will honor a
    /// larger `ss_out` buffer regardless (spec §4.4 "Extended shared-secret
    /// mode" — output length follows the caller-supplied array size).
    #[must_use]
    pub fn shared_secret_bytes(&self) -> usize {
        32
    }

    /// Read/write access to the domain key (customization string) used by
    /// cSHAKE-256 to derive the shared secret, spec §4.4 / CEX
    /// `IAsymmetricCipher::DomainKey()`. Empty by default, meaning plain
    /// SHAKE-256 is used.
    pub fn domain_key(&mut self) -> &mut Vec<u8> {
        &mut self.domain_key
    }

    fn ipsk_len(&self) -> usize {
        self.params.k * 384
    }

    fn ippk_len(&self) -> usize {
        self.params.k * 384 + 32
    }

    /// `KemKyber::generate` — spec §4.4.1.
    pub fn generate(&mut self) -> Result<AsymmetricKeyPair, Error> {
        let (ippk, ipsk) = indcpa::keygen(&self.params, &mut self.rng);
        let h_pk = sha3_256(&ippk);
        let mut z = [0u8; 32];
        self.rng.fill(&mut z);

        let mut sk = Vec::with_capacity(self.params.sk_bytes);
        sk.extend_from_slice(&ipsk);
        sk.extend_from_slice(&ippk);
        sk.extend_from_slice(&h_pk);
        sk.extend_from_slice(&z);
        debug_assert_eq!(sk.len(), self.params.sk_bytes);

        let public_key = AsymmetricKey::new(
            AsymmetricPrimitive::Kyber,
            AsymmetricKeyClass::Public,
            self.params.parameter,
            ippk,
        );
        let private_key = AsymmetricKey::new(
            AsymmetricPrimitive::Kyber,
            AsymmetricKeyClass::Private,
            self.params.parameter,
            sk,
        );
        Ok(AsymmetricKeyPair::new(public_key, private_key))
    }

    /// `KemKyber::initialize` — spec §6.1. Takes ownership of `key`; sets
    /// this instance's mode to encapsulation (public key) or decapsulation
    /// (private key) accordingly.
    pub fn initialize(&mut self, key: AsymmetricKey) -> Result<(), Error> {
        if key.primitive() != AsymmetricPrimitive::Kyber {
            return Err(Error::InvalidKey);
        }
        if key.parameter() != self.params.parameter {
            return Err(Error::InvalidKey);
        }
        match key.class() {
            AsymmetricKeyClass::Public => {
                if key.polynomial().len() != self.params.pk_bytes {
                    return Err(Error::InvalidKey);
                }
                self.mode = Mode::Encapsulating(key.polynomial().to_vec());
            }
            AsymmetricKeyClass::Private => {
                if key.polynomial().len() != self.params.sk_bytes {
                    return Err(Error::InvalidKey);
                }
                self.mode = Mode::Decapsulating(key.polynomial().to_vec());
            }
        }
        Ok(())
    }

    fn derive_shared_secret(&self, kbar: &[u8; 32], kr_tail: &[u8; 32], out: &mut [u8]) {
        if self.domain_key.is_empty() {
            shake256(&[kbar, kr_tail], out);
        } else {
            cshake256(&[kbar, kr_tail], self.params.name.as_bytes(), &self.domain_key, out);
        }
    }

    /// `KemKyber::encapsulate` — spec §4.4.2. `ss_out` is resized to
    /// [`KemKyber::shared_secret_bytes`] if empty, otherwise its existing
    /// length is honored (the extended-output path, spec §4.4).
    pub fn encapsulate(&mut self, ct_out: &mut Vec<u8>, ss_out: &mut Vec<u8>) -> Result<(), Error> {
        let pk = match &self.mode {
            Mode::Encapsulating(pk) => pk.clone(),
            Mode::Decapsulating(_) => return Err(Error::InvalidKey),
            Mode::Uninitialized => return Err(Error::NotInitialized),
        };

        let mut m = [0u8; 32];
        self.rng.fill(&mut m);
        let m = sha3_256(&m);

        let h_pk = sha3_256(&pk);
        let (kbar, r) = sha3_512_split(&[&m, &h_pk]);

        let ct = indcpa::encrypt(&self.params, &pk, &m, &r);
        let kr_tail = sha3_256(&ct);

        if ss_out.is_empty() {
            ss_out.resize(self.shared_secret_bytes(), 0);
        }
        self.derive_shared_secret(&kbar, &kr_tail, ss_out);

        *ct_out = ct;
        Ok(())
    }

    /// `KemKyber::decapsulate` — spec §4.4.3. Returns `false` on a
    /// re-encryption mismatch (`AuthFailure`, spec §7) without raising an
    /// error and without short-circuiting the shared-secret derivation: the
    /// `cmov` substitution of `z` for `Kbar'` and the final KDF call both run
    /// unconditionally, spec §4.4 "MUST NOT be used to short-circuit step 8".
    pub fn decapsulate(&mut self, ct_in: &[u8], ss_out: &mut Vec<u8>) -> Result<bool, Error> {
        let sk = match &self.mode {
            Mode::Decapsulating(sk) => sk.clone(),
            Mode::Encapsulating(_) => return Err(Error::InvalidKey),
            Mode::Uninitialized => return Err(Error::NotInitialized),
        };
        if ct_in.len() != self.params.ct_bytes {
            return Err(Error::InvalidKey);
        }

        let ipsk_len = self.ipsk_len();
        let ippk_len = self.ippk_len();
        let ipsk = &sk[0..ipsk_len];
        let ippk = &sk[ipsk_len..ipsk_len + ippk_len];
        let h_pk: [u8; 32] = sk[ipsk_len + ippk_len..ipsk_len + ippk_len + 32]
            .try_into()
            .unwrap();
        let z = &sk[ipsk_len + ippk_len + 32..ipsk_len + ippk_len + 64];

        let m_prime = indcpa::decrypt(&self.params, ipsk, ct_in);
        let (mut kbar_prime, r_prime) = sha3_512_split(&[&m_prime, &h_pk]);

        let ct_prime = indcpa::encrypt(&self.params, ippk, &m_prime, &r_prime);

        let fail = verify(ct_in, &ct_prime);
        let kr_tail = sha3_256(ct_in);

        cmov(&mut kbar_prime, z, fail);

        if ss_out.is_empty() {
            ss_out.resize(self.shared_secret_bytes(), 0);
        }
        self.derive_shared_secret(&kbar_prime, &kr_tail, ss_out);

        Ok(fail == 0)
    }
}
