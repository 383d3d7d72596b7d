use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use guth_aes::{Config, G1, SecretKey};

pub fn criterion_benchmark(c: &mut Criterion) {
    let length_prefixed = Config::new(SecretKey::random(32).unwrap());
    let delimited = length_prefixed.clone().with_separator("|").unwrap();

    let mut g = c.benchmark_group("unwrap");

    for (name, config) in [("length_prefixed", &length_prefixed), ("delimited", &delimited)] {
        let signed = config.signed::<G1>();
        let token = signed.wrap("6ba7b810-9dad-11d2-80b4-00c04fd430c8").unwrap();

        g.bench_function(name, |b| b.iter(|| signed.unwrap(black_box(&token)).unwrap()));
    }

    g.finish();

    let mut g = c.benchmark_group("wrap");

    for (name, config) in [("length_prefixed", &length_prefixed), ("delimited", &delimited)] {
        let signed = config.signed::<G1>();

        g.bench_function(name, |b| {
            b.iter(|| {
                signed
                    .wrap(black_box("6ba7b810-9dad-11d2-80b4-00c04fd430c8"))
                    .unwrap()
            })
        });
    }

    g.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
