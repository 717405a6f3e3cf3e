//! Criterion benchmarks, mirroring the teacher's `benches/benchmark.rs`
//! shape (a deterministic "incrementing counter" test RNG feeding
//! KeyGen/Encaps/Decaps for every parameter set).

use criterion::{criterion_group, criterion_main, Criterion};
use mlwe_kem::{AsymmetricKey, KemKyber, KyberParameter, Rng};

/// Regurgitates incrementing values instead of real entropy — only useful
/// for benchmarking, never for production key generation.
struct CounterRng {
    value: u32,
}

impl Rng for CounterRng {
    fn fill(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(4) {
            let bytes = self.value.to_be_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
            self.value = self.value.wrapping_add(1);
        }
    }
}

fn bench_param_set(c: &mut Criterion, label: &str, kp: KyberParameter) {
    let mut keygen_rng = CounterRng { value: 0 };
    let mut encaps_rng = CounterRng { value: 1_000_000 };

    let (ek, dk) = {
        let mut kem = KemKyber::new_borrowed(kp, &mut keygen_rng);
        let pair = kem.generate().unwrap();
        pair.into_keys()
    };
    let ek_bytes = ek.to_bytes();
    let dk_bytes = dk.to_bytes();

    let ct = {
        let mut kem = KemKyber::new_borrowed(kp, &mut encaps_rng);
        kem.initialize(AsymmetricKey::from_bytes(&ek_bytes).unwrap())
            .unwrap();
        let mut ct = Vec::new();
        let mut ss = Vec::new();
        kem.encapsulate(&mut ct, &mut ss).unwrap();
        ct
    };

    c.bench_function(&format!("{label} KeyGen"), |b| {
        b.iter(|| {
            let mut rng = CounterRng { value: 0 };
            let mut kem = KemKyber::new_borrowed(kp, &mut rng);
            kem.generate().unwrap()
        })
    });

    c.bench_function(&format!("{label} Encaps"), |b| {
        b.iter(|| {
            let mut rng = CounterRng { value: 1_000_000 };
            let mut kem = KemKyber::new_borrowed(kp, &mut rng);
            kem.initialize(AsymmetricKey::from_bytes(&ek_bytes).unwrap())
                .unwrap();
            let mut ct = Vec::new();
            let mut ss = Vec::new();
            kem.encapsulate(&mut ct, &mut ss).unwrap();
        })
    });

    c.bench_function(&format!("{label} Decaps"), |b| {
        b.iter(|| {
            let mut rng = CounterRng { value: 2_000_000 };
            let mut kem = KemKyber::new_borrowed(kp, &mut rng);
            kem.initialize(AsymmetricKey::from_bytes(&dk_bytes).unwrap())
                .unwrap();
            let mut ss = Vec::new();
            kem.decapsulate(&ct, &mut ss).unwrap()
        })
    });
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_param_set(c, "kyber-s2", KyberParameter::S2);
    bench_param_set(c, "kyber-s3", KyberParameter::S3);
    bench_param_set(c, "kyber-s5", KyberParameter::S5);
    bench_param_set(c, "kyber-s6", KyberParameter::S6);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
