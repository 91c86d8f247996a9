use mayer_core::errors::MayerError;
use mayer_graph::{Bitmap, BitmapKind, Bitset};

fn every_kind(bit_size: usize) -> Vec<Bitmap> {
    let mut stores = vec![
        Bitmap::with_kind(bit_size, BitmapKind::Vector).unwrap(),
        Bitmap::with_kind(bit_size, BitmapKind::Big).unwrap(),
    ];
    if bit_size <= 64 {
        stores.push(Bitmap::with_kind(bit_size, BitmapKind::Word).unwrap());
    }
    stores
}

#[test]
fn backing_follows_size() {
    assert_eq!(Bitmap::new(10).kind(), BitmapKind::Word);
    assert_eq!(Bitmap::new(64).kind(), BitmapKind::Word);
    assert_eq!(Bitmap::new(65).kind(), BitmapKind::Vector);
    assert_eq!(Bitmap::new(1024).kind(), BitmapKind::Vector);
    assert_eq!(Bitmap::new(1025).kind(), BitmapKind::Big);
}

#[test]
fn word_backing_rejects_large_sizes() {
    let err = Bitmap::with_kind(65, BitmapKind::Word).unwrap_err();
    assert!(matches!(err, MayerError::Bitmap(_)));
    assert_eq!(err.code(), "size-out-of-range");
}

#[test]
fn inc_walks_every_pattern_in_order() {
    for mut store in every_kind(6) {
        let mut previous = store.clone();
        let mut steps = 0;
        while store.inc() {
            assert!(store > previous);
            previous = store.clone();
            steps += 1;
        }
        assert_eq!(steps, 63);
        assert!(store.is_full());
        // saturated: stays at the maximum
        assert!(!store.inc());
        assert!(store.is_full());
    }
}

#[test]
fn inc_carries_across_word_boundaries() {
    for mut store in every_kind(130) {
        for bit in 0..64 {
            store.set_bit(bit).unwrap();
        }
        assert!(store.inc());
        assert_eq!(store.bit_count(), 1);
        assert_eq!(store.lowest_set_bit(), Some(64));
        assert!(store.dec());
        assert_eq!(store.bit_count(), 64);
        assert_eq!(store.highest_set_bit(), Some(63));
    }
}

#[test]
fn dec_stops_at_zero() {
    for mut store in every_kind(3) {
        assert!(!store.dec());
        assert!(store.is_zero());
        store.set_all();
        let mut steps = 0;
        while store.dec() {
            steps += 1;
        }
        assert_eq!(steps, 7);
    }
}

#[test]
fn bit_queries_agree_between_backings() {
    let bits = [0usize, 5, 63, 64, 99];
    let mut stores = every_kind(100);
    for store in &mut stores {
        for bit in bits {
            store.set_bit(bit).unwrap();
        }
        store.flip_bit(5).unwrap();
        store.clear_bit(99).unwrap();
    }
    for store in &stores {
        assert_eq!(store.bit_count(), 3);
        assert_eq!(store.lowest_set_bit(), Some(0));
        assert_eq!(store.highest_set_bit(), Some(64));
        assert_eq!(store.lowest_unset_bit(), Some(1));
        assert_eq!(store.highest_unset_bit(), Some(99));
        assert!(store.test_bit(63).unwrap());
        assert!(!store.test_bit(5).unwrap());
    }
    assert_eq!(stores[0], stores[1]);
}

#[test]
fn out_of_range_bits_are_errors() {
    for mut store in every_kind(8) {
        let err = store.set_bit(8).unwrap_err();
        assert_eq!(err.code(), "bit-out-of-range");
        assert_eq!(err.info().context.get("bit"), Some(&"8".to_string()));
        assert!(store.test_bit(100).is_err());
    }
}

#[test]
fn logical_ops_truncate_to_smaller_size() {
    let a: Bitmap = "1100".parse().unwrap();
    let b: Bitmap = "1010".parse().unwrap();
    assert_eq!(a.and(&b).to_string(), "1000");
    assert_eq!(a.or(&b).to_string(), "1110");
    assert_eq!(a.xor(&b).to_string(), "0110");
    assert_eq!(a.nand(&b).to_string(), "0111");
    assert_eq!(a.not().to_string(), "0011");

    let wide: Bitmap = "111111".parse().unwrap();
    let narrow: Bitmap = "101".parse().unwrap();
    let both = wide.and(&narrow);
    assert_eq!(both.bit_size(), 3);
    assert_eq!(both.to_string(), "101");
}

#[test]
fn copy_lowest_and_highest() {
    let store: Bitmap = "110010".parse().unwrap();
    assert_eq!(store.copy_lowest(3).unwrap().to_string(), "010");
    assert_eq!(store.copy_highest(2).unwrap().to_string(), "11");
    assert_eq!(store.copy_lowest(7).unwrap_err().code(), "size-out-of-range");
}

#[test]
fn ordering_is_numeric() {
    let small = Bitmap::from_value(80, 3);
    let mut large = Bitmap::new(80);
    large.set_bit(70).unwrap();
    assert!(small < large);
    assert_eq!(Bitmap::from_value(8, 5).to_string(), "00000101");
}

#[test]
fn parsing_rejects_foreign_characters() {
    let err = "10x1".parse::<Bitmap>().unwrap_err();
    assert_eq!(err.code(), "invalid-bit-string");
}

#[test]
fn kind_conversion_preserves_pattern() {
    let mut store = Bitmap::new(40);
    store.set_bit(3).unwrap();
    store.set_bit(39).unwrap();
    let big = store.to_kind(BitmapKind::Big).unwrap();
    assert_eq!(big.kind(), BitmapKind::Big);
    assert_eq!(big, store);
    assert_eq!(big.ones().collect::<Vec<_>>(), vec![3, 39]);
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(128))]

    #[test]
    fn stepping_round_trips_unless_saturated(bits in proptest::collection::vec(proptest::bool::ANY, 1..200)) {
        let pattern: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        for mut store in every_kind(bits.len()) {
            for (idx, ch) in pattern.chars().rev().enumerate() {
                if ch == '1' {
                    store.set_bit(idx).unwrap();
                }
            }
            let before = store.clone();
            if store.inc() {
                proptest::prop_assert!(store.dec());
                proptest::prop_assert_eq!(&store, &before);
            } else {
                proptest::prop_assert!(before.is_full());
                proptest::prop_assert_eq!(&store, &before);
            }
        }
    }
}
