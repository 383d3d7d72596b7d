use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use guth_aes::{Config, EncryptedToken, G1, SecretKey};
use guth_core::validation::NoValidation;
use guth_json::Payload;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut g = c.benchmark_group("decrypt");

    for len in [16, 24, 32] {
        let config = Config::new(SecretKey::random(len).unwrap());
        let encrypted = config.encrypted::<G1, Payload>();
        let token = encrypted
            .encrypt(&Payload::now("6ba7b810-9dad-11d2-80b4-00c04fd430c8"))
            .unwrap()
            .to_string();

        g.bench_function(format!("aes_{}", len * 8), |b| {
            b.iter(|| {
                let token: EncryptedToken = black_box(&*token).parse().unwrap();
                token
                    .decrypt_with::<Payload>(
                        config.secret_key(),
                        &NoValidation::dangerous_no_validation(),
                    )
                    .unwrap()
            })
        });
    }

    g.finish();

    let mut g = c.benchmark_group("encrypt");

    for len in [16, 24, 32] {
        let config = Config::new(SecretKey::random(len).unwrap());
        let encrypted = config.encrypted::<G1, Payload>();

        g.bench_function(format!("aes_{}", len * 8), |b| {
            b.iter(|| {
                let payload = Payload::now(black_box("6ba7b810-9dad-11d2-80b4-00c04fd430c8"));
                encrypted.encrypt(&payload).unwrap().to_string()
            })
        });
    }

    g.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
