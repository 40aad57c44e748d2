use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use modulus::SmallModulus;

fn reduce_u64(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_u64");
    for bits in [20u32, 40, 60] {
        let m = SmallModulus::new((1u64 << bits) - 87).unwrap();
        let inputs: Vec<u64> = (0..4096u64).map(|i| i.wrapping_mul(0x9E3779B97F4A7C15)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(bits), &inputs, |b, inputs| {
            b.iter(|| {
                let mut acc = 0u64;
                for &x in inputs {
                    acc = acc.wrapping_add(m.reduce(x));
                }
                acc
            })
        });
    }
    group.finish();
}

fn reduce_u128(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_u128");
    for bits in [20u32, 40, 60] {
        let m = SmallModulus::new((1u64 << bits) - 87).unwrap();
        let inputs: Vec<u128> = (0..4096u128)
            .map(|i| i.wrapping_mul(0x9E3779B97F4A7C15F39CC0605CEDC835))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(bits), &inputs, |b, inputs| {
            b.iter(|| {
                let mut acc = 0u64;
                for &x in inputs {
                    acc = acc.wrapping_add(m.reduce_u128(x));
                }
                acc
            })
        });
    }
    group.finish();
}

criterion_group!(benches, reduce_u64, reduce_u128);
criterion_main!(benches);
