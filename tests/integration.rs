//! Cross-module integration tests, mirroring the teacher's
//! `tests/integration.rs` "Alice and Bob" flow (serialize keys/ciphertext to
//! bytes between two independent `KemKyber` instances), generalized across
//! all four runtime parameter sets and extended with the tamper/stress
//! scenarios spec.md §8 calls out explicitly.

use mlwe_kem::{
    Aes256CtrDrbg, AsymmetricKey, AsymmetricKeyClass, AsymmetricPrimitive, Error, KemKyber,
    KyberParameter,
};

fn drbg(byte: u8) -> Aes256CtrDrbg {
    Aes256CtrDrbg::new(&[byte; 48])
}

/// Spec §8 property 1: `encap(pk)` and `decap(sk, ct)` agree, across every
/// parameter set, with keys and ciphertext round-tripped through the wire
/// serialization `AsymmetricKey::to_bytes`/`from_bytes` (spec §6.3) the way
/// two independent hosts actually would.
#[test]
fn alice_and_bob_agree_on_shared_secret_every_param_set() {
    for kp in [
        KyberParameter::S2,
        KyberParameter::S3,
        KyberParameter::S5,
        KyberParameter::S6,
    ] {
        let mut alice_rng = drbg(0x10);
        let mut alice = KemKyber::new_borrowed(kp, &mut alice_rng);
        let pair = alice.generate().unwrap();
        let (alice_ek, alice_dk) = pair.into_keys();

        // Alice sends her public key to Bob as bytes.
        let wire_ek = alice_ek.to_bytes();

        let mut bob_rng = drbg(0x20);
        let mut bob = KemKyber::new_borrowed(kp, &mut bob_rng);
        let bob_ek = AsymmetricKey::from_bytes(&wire_ek).unwrap();
        bob.initialize(bob_ek).unwrap();
        let mut ct = Vec::new();
        let mut bob_ss = Vec::new();
        bob.encapsulate(&mut ct, &mut bob_ss).unwrap();

        // Bob sends the ciphertext back to Alice.
        let mut alice2_rng = drbg(0x30);
        let mut alice2 = KemKyber::new_borrowed(kp, &mut alice2_rng);
        alice2.initialize(alice_dk).unwrap();
        let mut alice_ss = Vec::new();
        let ok = alice2.decapsulate(&ct, &mut alice_ss).unwrap();

        assert!(ok, "{kp:?} decapsulation should succeed");
        assert_eq!(alice_ss, bob_ss, "{kp:?} shared secrets must match");
        assert_eq!(ct.len(), kp.param_set().ct_bytes);
    }
}

/// Spec §8 property 6: altering any one byte of the ciphertext before
/// decapsulation must cause `decapsulate` to return `false` and produce a
/// shared secret unequal to the encapsulator's.
#[test]
fn single_byte_ciphertext_tamper_is_detected() {
    let kp = KyberParameter::S5;
    let mut rng = drbg(0x40);
    let mut kem = KemKyber::new_borrowed(kp, &mut rng);
    let pair = kem.generate().unwrap();
    let (pk, sk) = pair.into_keys();

    let mut rng2 = drbg(0x50);
    let mut encapsulator = KemKyber::new_borrowed(kp, &mut rng2);
    encapsulator.initialize(pk).unwrap();
    let mut ct = Vec::new();
    let mut ss_bob = Vec::new();
    encapsulator.encapsulate(&mut ct, &mut ss_bob).unwrap();

    for byte_index in [0usize, ct.len() / 2, ct.len() - 1] {
        let mut tampered = ct.clone();
        tampered[byte_index] ^= 0x80;

        let mut rng3 = drbg(0x60);
        let mut decapsulator = KemKyber::new_borrowed(kp, &mut rng3);
        decapsulator.initialize(sk.clone()).unwrap();
        let mut ss_alice = Vec::new();
        let ok = decapsulator.decapsulate(&tampered, &mut ss_alice).unwrap();
        assert!(!ok, "tampering byte {byte_index} should be detected");
        assert_ne!(ss_alice, ss_bob);
    }
}

/// Spec §8 property 7: re-initializing the decapsulator with a private key
/// whose bundled public part does not match `H(pk)` must still yield
/// `decapsulate == false`, because decryption succeeds against the
/// (mismatched) bundled `ippk` but the derived shared secret then diverges
/// from the encapsulator's.
#[test]
fn private_key_with_mismatched_public_half_fails_decap() {
    let kp = KyberParameter::S3;
    let mut rng_a = drbg(0x70);
    let mut kem_a = KemKyber::new_borrowed(kp, &mut rng_a);
    let pair_a = kem_a.generate().unwrap();
    let (pk_a, sk_a) = pair_a.into_keys();

    let mut rng_b = drbg(0x71);
    let mut kem_b = KemKyber::new_borrowed(kp, &mut rng_b);
    let pair_b = kem_b.generate().unwrap();
    let (_pk_b, sk_b) = pair_b.into_keys();

    // Splice sk_a's IndCpa secret half onto sk_b's bundled public key / H(pk) / z,
    // producing a private key whose public part doesn't match its own secret half.
    let params = kp.param_set();
    let ipsk_len = params.k * 384;
    let mut spliced = sk_a.polynomial()[..ipsk_len].to_vec();
    spliced.extend_from_slice(&sk_b.polynomial()[ipsk_len..]);
    let spliced_key = AsymmetricKey::new(
        AsymmetricPrimitive::Kyber,
        AsymmetricKeyClass::Private,
        kp,
        spliced,
    );

    let mut rng_enc = drbg(0x72);
    let mut encapsulator = KemKyber::new_borrowed(kp, &mut rng_enc);
    encapsulator.initialize(pk_a).unwrap();
    let mut ct = Vec::new();
    let mut ss_enc = Vec::new();
    encapsulator.encapsulate(&mut ct, &mut ss_enc).unwrap();

    let mut rng_dec = drbg(0x73);
    let mut decapsulator = KemKyber::new_borrowed(kp, &mut rng_dec);
    decapsulator.initialize(spliced_key).unwrap();
    let mut ss_dec = Vec::new();
    let ok = decapsulator.decapsulate(&ct, &mut ss_dec).unwrap();
    assert!(!ok);
    assert_ne!(ss_enc, ss_dec);
}

/// Spec §8: a stressed loop of 100 (generate, encap, decap, compare) cycles
/// with the deterministic DRBG (standing in for "a system RNG", since the
/// deterministic source is what this test suite can reproduce) must yield
/// zero mismatches.
#[test]
fn stress_loop_100_cycles_zero_mismatches() {
    let kp = KyberParameter::S2;
    for i in 0u8..100 {
        let mut rng = drbg(i);
        let mut kem = KemKyber::new_borrowed(kp, &mut rng);
        let pair = kem.generate().unwrap();
        let (pk, sk) = pair.into_keys();

        let mut rng2 = drbg(i.wrapping_add(100));
        let mut encapsulator = KemKyber::new_borrowed(kp, &mut rng2);
        encapsulator.initialize(pk).unwrap();
        let mut ct = Vec::new();
        let mut ss1 = Vec::new();
        encapsulator.encapsulate(&mut ct, &mut ss1).unwrap();

        let mut rng3 = drbg(i.wrapping_add(200));
        let mut decapsulator = KemKyber::new_borrowed(kp, &mut rng3);
        decapsulator.initialize(sk).unwrap();
        let mut ss2 = Vec::new();
        let ok = decapsulator.decapsulate(&ct, &mut ss2).unwrap();
        assert!(ok, "cycle {i} failed");
        assert_eq!(ss1, ss2, "cycle {i} shared secret mismatch");
    }
}

/// Boundary test from spec.md §8: passing an `AsymmetricKey` whose
/// `primitive != Kyber` must be rejected by `initialize`.
#[test]
fn initialize_rejects_non_kyber_key() {
    let key = AsymmetricKey::new(
        AsymmetricPrimitive::SphincsPlus,
        AsymmetricKeyClass::Public,
        KyberParameter::S2,
        vec![0u8; 800],
    );
    let mut rng = drbg(0x80);
    let mut kem = KemKyber::new_borrowed(KyberParameter::S2, &mut rng);
    assert_eq!(kem.initialize(key).unwrap_err(), Error::InvalidKey);
}

/// Boundary test from spec.md §8: a too-short ciphertext buffer passed to
/// `decapsulate` must be rejected rather than panicking or silently
/// truncating.
#[test]
fn decapsulate_rejects_short_ciphertext() {
    let kp = KyberParameter::S2;
    let mut rng = drbg(0x90);
    let mut kem = KemKyber::new_borrowed(kp, &mut rng);
    let pair = kem.generate().unwrap();
    let (_pk, sk) = pair.into_keys();

    let mut rng2 = drbg(0x91);
    let mut decapsulator = KemKyber::new_borrowed(kp, &mut rng2);
    decapsulator.initialize(sk).unwrap();
    let mut ss = Vec::new();
    let short_ct = vec![0u8; 10];
    assert_eq!(
        decapsulator.decapsulate(&short_ct, &mut ss).unwrap_err(),
        Error::InvalidKey
    );
}

/// `KemKyber::name`/`*_bytes` introspection, spec §6.1's `KeySizes`-style
/// accessors, matches the `ParamSet` table for every parameter set.
#[test]
fn size_introspection_matches_param_table() {
    for kp in [
        KyberParameter::S2,
        KyberParameter::S3,
        KyberParameter::S5,
        KyberParameter::S6,
    ] {
        let mut rng = drbg(0xA0);
        let kem = KemKyber::new_borrowed(kp, &mut rng);
        let params = kp.param_set();
        assert_eq!(kem.name(), params.name);
        assert_eq!(kem.public_key_bytes(), params.pk_bytes);
        assert_eq!(kem.private_key_bytes(), params.sk_bytes);
        assert_eq!(kem.ciphertext_bytes(), params.ct_bytes);
        assert_eq!(kem.shared_secret_bytes(), 32);
    }
}
