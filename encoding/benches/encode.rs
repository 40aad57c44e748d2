use arith::BigUInt;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use encoding::{BalancedEncoder, BinaryEncoder};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_i64");
    let modulus = BigUInt::from(0x10000u64);
    let value: i64 = -0x0123_4567_89AB_CDEF;

    let binary = BinaryEncoder::new(modulus.clone()).unwrap();
    group.bench_function(BenchmarkId::from_parameter("binary"), |b| {
        b.iter(|| binary.encode_i64(std::hint::black_box(value)).unwrap());
    });

    for base in [3u64, 7, 19] {
        let encoder = BalancedEncoder::new(modulus.clone(), base).unwrap();
        group.bench_function(BenchmarkId::from_parameter(format!("balanced_{base}")), |b| {
            b.iter(|| encoder.encode_i64(std::hint::black_box(value)).unwrap());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_i64");
    let modulus = BigUInt::from(0x10000u64);
    let value: i64 = -0x0123_4567_89AB_CDEF;

    let binary = BinaryEncoder::new(modulus.clone()).unwrap();
    let poly = binary.encode_i64(value).unwrap();
    group.bench_function(BenchmarkId::from_parameter("binary"), |b| {
        b.iter(|| binary.decode_i64(std::hint::black_box(&poly)).unwrap());
    });

    for base in [3u64, 7, 19] {
        let encoder = BalancedEncoder::new(modulus.clone(), base).unwrap();
        let poly = encoder.encode_i64(value).unwrap();
        group.bench_function(BenchmarkId::from_parameter(format!("balanced_{base}")), |b| {
            b.iter(|| encoder.decode_i64(std::hint::black_box(&poly)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
