pub use ark_bn254::Bn254 as EllipticCurve;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion,
};
use tlpvss::*;

pub fn pvss(c: &mut Criterion) {
    let mut group = c.benchmark_group("PVSS BN254");
    group.sample_size(10);

    for n in [4, 16, 64] {
        let t = n * 2 / 3;
        let (keys, dealing) = setup_dealt(n, t);
        let config = PairingConfig::<EllipticCurve>::default();

        group.bench_with_input(BenchmarkId::new("deal", n), &n, |b, _| {
            let rng = &mut ark_std::test_rng();
            b.iter(|| deal(&config, &keys.public_keys, t, rng))
        });
        group.bench_with_input(
            BenchmarkId::new("verify ciphertext", n),
            &n,
            |b, _| {
                let rng = &mut ark_std::test_rng();
                b.iter(|| {
                    verify_ciphertext(
                        &config,
                        &keys.public_keys,
                        t,
                        &dealing.ciphertext,
                        rng,
                    )
                })
            },
        );
        let key_list = keys
            .keypairs
            .iter()
            .map(|k| k.decryption_key)
            .enumerate()
            .take(t)
            .collect::<Vec<_>>();
        group.bench_with_input(BenchmarkId::new("decrypt", n), &n, |b, _| {
            b.iter(|| decrypt_shares(&dealing.ciphertext, &key_list))
        });
        let shares = decrypt_shares(&dealing.ciphertext, &key_list)
            .expect("Decryption failed");
        group.bench_with_input(BenchmarkId::new("combine", n), &n, |b, _| {
            b.iter(|| combine_shares(black_box(&shares)))
        });
        group.bench_with_input(BenchmarkId::new("bind", n), &n, |b, _| {
            b.iter(|| bind(&ConditionId::from(0u64), &dealing.ciphertext))
        });
    }
}

/// Deal a secret to `n` fresh participants
pub fn setup_dealt(
    n: usize,
    t: usize,
) -> (KeySet<EllipticCurve>, Dealing<EllipticCurve>) {
    let rng = &mut ark_std::test_rng();
    let keys = generate_keys(&PairingConfig::default(), n, rng)
        .expect("Setup failed");
    let dealing = deal(&PairingConfig::default(), &keys.public_keys, t, rng)
        .expect("Dealing failed");
    (keys, dealing)
}

use pprof::criterion::{Output, PProfProfiler};

criterion_group! {
    name = pvss_bn254;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = pvss
}

criterion_main!(pvss_bn254);
