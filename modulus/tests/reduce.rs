use num_bigint::BigUint as OracleUint;
use rand::{Rng, SeedableRng};

use arith::{ReaderFrom, WriterTo};
use modulus::SmallModulus;

#[test]
fn reduce_matches_oracle() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let moduli = [2u64, 3, 97, 0xFFFF, 0x1000_0000_0000_0001 >> 2, (1 << 62) - 57];
    for &value in &moduli {
        let m = SmallModulus::new(value).unwrap();
        for _ in 0..500 {
            let x: u64 = rng.random();
            assert_eq!(m.reduce(x), x % value, "value={value} x={x}");
        }
        assert_eq!(m.reduce(0), 0);
        assert_eq!(m.reduce(value), 0);
        assert_eq!(m.reduce(value - 1), value - 1);
    }
}

#[test]
fn reduce_u128_matches_oracle() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(2);
    let moduli = [2u64, 3, 12289, 0xF00000F00000F, (1 << 62) - 57];
    for &value in &moduli {
        let m = SmallModulus::new(value).unwrap();
        let oracle_value = OracleUint::from(value);
        for _ in 0..500 {
            let x: u128 = (rng.random::<u64>() as u128) << 64 | rng.random::<u64>() as u128;
            let expected = OracleUint::from(x) % &oracle_value;
            let expected: u64 = expected.try_into().unwrap();
            assert_eq!(m.reduce_u128(x), expected, "value={value} x={x}");
        }
        assert_eq!(m.reduce_u128(u128::MAX), (u128::MAX % value as u128) as u64);
        assert_eq!(m.reduce_u128(value as u128), 0);
    }
}

#[test]
fn save_load_recomputes_constants() {
    let original = SmallModulus::new(0xF00000F00000F).unwrap();
    let mut buf = Vec::new();
    original.write_to(&mut buf).unwrap();
    assert_eq!(buf.len(), 8);

    let mut restored = SmallModulus::default();
    restored.read_from(&mut buf.as_slice()).unwrap();
    assert_eq!(restored, original);
    assert_eq!(
        restored.const_ratio(),
        &[1224979098644774929, 4369, 281470698520321]
    );
}

#[test]
fn load_rejects_out_of_range_values() {
    let mut buf = Vec::new();
    SmallModulus::default().write_to(&mut buf).unwrap();
    buf[0] = 1;
    let mut target = SmallModulus::default();
    assert!(target.read_from(&mut buf.as_slice()).is_err());
}
