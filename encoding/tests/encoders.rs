use arith::{BigPoly, BigUInt};
use encoding::{
    BalancedEncoder, BalancedFractionalEncoder, BinaryEncoder, BinaryFractionalEncoder, Error,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn modulus() -> BigUInt {
    BigUInt::from(0x10000u64)
}

#[test]
fn binary_rejects_trivial_modulus() {
    assert_eq!(
        BinaryEncoder::new(BigUInt::from(1u64)).err(),
        Some(Error::ModulusTooNarrow)
    );
    assert_eq!(
        BinaryEncoder::new(BigUInt::new(0)).err(),
        Some(Error::ModulusTooNarrow)
    );
    assert!(BinaryEncoder::new(BigUInt::from(2u64)).is_ok());
}

#[test]
fn binary_zero_is_empty_poly() {
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    let poly = encoder.encode_u64(0).unwrap();
    assert!(poly.is_zero());
    assert_eq!(encoder.decode_u64(&poly).unwrap(), 0);
    assert_eq!(encoder.decode_i64(&poly).unwrap(), 0);
}

#[test]
fn binary_unsigned_round_trip() {
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    for value in [1u64, 2, 3, 64, 0xFFFF, 0x10000, u64::MAX] {
        let poly = encoder.encode_u64(value).unwrap();
        assert_eq!(encoder.decode_u64(&poly).unwrap(), value, "value {value}");
    }
    let poly = encoder.encode_u64(23).unwrap();
    assert_eq!(poly.to_string(), "1x^4 + 1x^2 + 1x^1 + 1");
}

#[test]
fn binary_signed_round_trip() {
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    for value in [0i64, 1, -1, 2, -2, 23, -23, i64::MAX, i64::MIN + 1] {
        let poly = encoder.encode_i64(value).unwrap();
        assert_eq!(encoder.decode_i64(&poly).unwrap(), value, "value {value}");
    }
    // -1 is stored as the modular complement of 1.
    let poly = encoder.encode_i64(-1).unwrap();
    assert_eq!(poly.to_string(), "FFFF");
}

#[test]
fn binary_random_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    for _ in 0..200 {
        let value: i64 = rng.random();
        let value = value.max(i64::MIN + 1);
        let poly = encoder.encode_i64(value).unwrap();
        assert_eq!(encoder.decode_i64(&poly).unwrap(), value);
    }
}

#[test]
fn binary_negative_does_not_decode_unsigned() {
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    let poly = encoder.encode_i64(-5).unwrap();
    assert_eq!(encoder.decode_u64(&poly).err(), Some(Error::DecodeOutOfRange));
}

#[test]
fn binary_narrow_decode_rejects_wide_values() {
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    let poly = encoder.encode_u64(0x1_0000).unwrap();
    assert_eq!(encoder.decode_u32(&poly).unwrap(), 0x1_0000);
    let poly = encoder.encode_u64(u32::MAX as u64 + 1).unwrap();
    assert_eq!(encoder.decode_u32(&poly).err(), Some(Error::DecodeOutOfRange));
    let poly = encoder.encode_i64(i32::MIN as i64 - 1).unwrap();
    assert_eq!(encoder.decode_i32(&poly).err(), Some(Error::DecodeOutOfRange));
}

#[test]
fn decode_rejects_coefficient_wider_than_modulus() {
    let encoder = BinaryEncoder::new(modulus()).unwrap();
    let poly = BigPoly::from_text_sized(1, 18, "20000").unwrap();
    assert_eq!(encoder.decode_u64(&poly).err(), Some(Error::DecodeOutOfRange));
}

#[test]
fn decode_rejects_value_outside_modulus() {
    // 0x40 has 7 significant bits, as does 0x7F, but 0x7F is not a residue.
    let encoder = BinaryEncoder::new(BigUInt::from(0x40u64)).unwrap();
    let poly = BigPoly::from_text_sized(1, 7, "7F").unwrap();
    assert_eq!(encoder.decode_u64(&poly).err(), Some(Error::DecodeOutOfRange));
}

#[test]
fn balanced_rejects_bad_bases() {
    for base in [0u64, 1, 2, 4, 10] {
        assert_eq!(
            BalancedEncoder::new(modulus(), base).err(),
            Some(Error::InvalidBase),
            "base {base}"
        );
    }
    assert!(BalancedEncoder::new(modulus(), 3).is_ok());
}

#[test]
fn balanced_base_three_matches_known_form() {
    let encoder = BalancedEncoder::new(modulus(), 3).unwrap();
    let poly = encoder.encode_i64(2).unwrap();
    assert_eq!(poly.to_string(), "1x^1 + FFFF");
    assert_eq!(encoder.decode_i64(&poly).unwrap(), 2);
}

#[test]
fn balanced_round_trip_all_odd_bases() {
    let mut rng = StdRng::seed_from_u64(0xBA5E);
    for base in (3u64..=19).step_by(2) {
        let encoder = BalancedEncoder::new(modulus(), base).unwrap();
        for value in [0i64, 1, -1, 7, -7, 123456, -123456] {
            let poly = encoder.encode_i64(value).unwrap();
            assert_eq!(
                encoder.decode_i64(&poly).unwrap(),
                value,
                "base {base} value {value}"
            );
        }
        for _ in 0..50 {
            let value: i64 = rng.random_range(-1_000_000_000..=1_000_000_000);
            let poly = encoder.encode_i64(value).unwrap();
            assert_eq!(encoder.decode_i64(&poly).unwrap(), value);
        }
        for _ in 0..50 {
            let value: u64 = rng.random();
            let poly = encoder.encode_u64(value).unwrap();
            assert_eq!(encoder.decode_u64(&poly).unwrap(), value);
        }
    }
}

fn assert_close(decoded: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (decoded - expected).abs() <= 1e-6 * scale,
        "decoded {decoded}, expected {expected}"
    );
}

const FRACTIONAL_VALUES: [f64; 6] = [0.0, -1.0, 0.1, 3.123, -123.456, 12345.98765];

#[test]
fn binary_fractional_round_trip() {
    let encoder = BinaryFractionalEncoder::new(modulus(), 1024, 64, 32).unwrap();
    for value in FRACTIONAL_VALUES {
        let poly = encoder.encode(value).unwrap();
        assert_eq!(poly.coeff_count(), 1024);
        assert_close(encoder.decode(&poly).unwrap(), value);
    }
}

#[test]
fn balanced_fractional_round_trip_all_odd_bases() {
    for base in (3u64..=19).step_by(2) {
        let encoder = BalancedFractionalEncoder::new(modulus(), 1024, 64, 32, base).unwrap();
        for value in FRACTIONAL_VALUES {
            let poly = encoder.encode(value).unwrap();
            assert_close(encoder.decode(&poly).unwrap(), value);
        }
    }
}

#[test]
fn fractional_random_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xF4AC);
    let binary = BinaryFractionalEncoder::new(modulus(), 1024, 64, 32).unwrap();
    let balanced = BalancedFractionalEncoder::new(modulus(), 1024, 64, 32, 7).unwrap();
    for _ in 0..100 {
        let value = rng.random_range(-1.0e6..1.0e6);
        assert_close(binary.decode(&binary.encode(value).unwrap()).unwrap(), value);
        assert_close(
            balanced.decode(&balanced.encode(value).unwrap()).unwrap(),
            value,
        );
    }
}

#[test]
fn fractional_rejects_bad_block_split() {
    for (k1, k2) in [(0usize, 4usize), (4, 0), (13, 4), (4, 13), (9, 8)] {
        assert_eq!(
            BinaryFractionalEncoder::new(modulus(), 16, k1, k2).err(),
            Some(Error::InvalidBlockSplit),
            "k1 {k1} k2 {k2}"
        );
        assert_eq!(
            BalancedFractionalEncoder::new(modulus(), 16, k1, k2, 3).err(),
            Some(Error::InvalidBlockSplit)
        );
    }
    assert!(BinaryFractionalEncoder::new(modulus(), 16, 8, 8).is_ok());
}

#[test]
fn fractional_rejects_oversized_integer_part() {
    let encoder = BinaryFractionalEncoder::new(modulus(), 16, 4, 4).unwrap();
    assert!(encoder.encode(15.5).is_ok());
    assert_eq!(encoder.encode(16.0).err(), Some(Error::EncodingOverflow));
    assert_eq!(encoder.encode(-16.0).err(), Some(Error::EncodingOverflow));
    assert_eq!(encoder.encode(f64::NAN).err(), Some(Error::EncodingOverflow));
    assert_eq!(
        encoder.encode(f64::INFINITY).err(),
        Some(Error::EncodingOverflow)
    );
}

#[test]
fn fractional_decode_rejects_oversized_poly() {
    let encoder = BinaryFractionalEncoder::new(modulus(), 8, 4, 4).unwrap();
    let mut poly = BigPoly::new(9, 17);
    poly.coeff_mut(8).unwrap().set_u64(1).unwrap();
    assert_eq!(encoder.decode(&poly).err(), Some(Error::DecodeOutOfRange));
}
