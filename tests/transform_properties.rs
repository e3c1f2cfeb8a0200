//! Property tests for the bulk bitwise transforms.
//!
//! Every vector strategy the host supports must agree with the scalar loop
//! on every length and every starting misalignment.

use binkit::transform::{
    self, BitOp, SequencePolicy, apply_const, apply_key, apply_scalar, apply_xor, apply_xor_key,
    xor_index_salt,
};
use proptest::prelude::*;

const OPS: [BitOp; 3] = [BitOp::Xor, BitOp::And, BitOp::Or];

/// Lengths below this are checked exhaustively; longer ones are sampled.
const EXHAUSTIVE_LEN: usize = 257;

fn op_strategy() -> impl Strategy<Value = BitOp> {
    prop::sample::select(OPS.to_vec())
}

fn policy_strategy() -> impl Strategy<Value = SequencePolicy> {
    prop_oneof![Just(SequencePolicy::Truncate), Just(SequencePolicy::Repeat)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn vector_matches_scalar_on_long_buffers(
        data in prop::collection::vec(any::<u8>(), EXHAUSTIVE_LEN..4096 + 32),
        offset in 0usize..32,
        value in any::<u8>(),
        op in op_strategy(),
    ) {
        for isa in transform::Strategy::available() {
            let mut expected = data.clone();
            apply_scalar(&mut expected[offset..], value, op);

            let mut actual = data.clone();
            apply_const(&mut actual[offset..], value, op, isa).unwrap();

            prop_assert_eq!(&actual, &expected, "strategy {}", isa);
        }
    }

    #[test]
    fn xor_const_is_self_inverse(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        value in any::<u8>(),
    ) {
        let mut buf = data.clone();
        apply_xor(&mut buf, value);
        apply_xor(&mut buf, value);
        prop_assert_eq!(buf, data);
    }

    #[test]
    fn xor_key_is_self_inverse(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        key in prop::collection::vec(any::<u8>(), 0..64),
        policy in policy_strategy(),
    ) {
        let mut buf = data.clone();
        apply_xor_key(&mut buf, &key, policy);
        apply_xor_key(&mut buf, &key, policy);
        prop_assert_eq!(buf, data);
    }

    #[test]
    fn one_byte_repeating_key_equals_constant(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        value in any::<u8>(),
        op in op_strategy(),
    ) {
        let mut keyed = data.clone();
        apply_key(&mut keyed, &[value], SequencePolicy::Repeat, op);

        let mut constant = data;
        apply_scalar(&mut constant, value, op);
        prop_assert_eq!(keyed, constant);
    }

    #[test]
    fn truncated_key_leaves_tail(
        data in prop::collection::vec(any::<u8>(), 0..512),
        key in prop::collection::vec(any::<u8>(), 0..512),
        op in op_strategy(),
    ) {
        let mut buf = data.clone();
        apply_key(&mut buf, &key, SequencePolicy::Truncate, op);

        let covered = key.len().min(data.len());
        prop_assert_eq!(&buf[covered..], &data[covered..]);
        for i in 0..covered {
            prop_assert_eq!(buf[i], op.apply(data[i], key[i]));
        }
    }

    #[test]
    fn index_salt_is_self_inverse(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        salt in any::<u8>(),
    ) {
        let mut buf = data.clone();
        xor_index_salt(&mut buf, salt);
        xor_index_salt(&mut buf, salt);
        prop_assert_eq!(buf, data);
    }
}

#[test]
fn vector_matches_scalar_for_every_short_length_and_misalignment() {
    let source: Vec<u8> = (0..EXHAUSTIVE_LEN + 32)
        .map(|i| (i * 131 + 17) as u8)
        .collect();
    let strategies = transform::Strategy::available();
    for offset in 0..32 {
        for len in 0..EXHAUSTIVE_LEN {
            let window = offset..offset + len;
            for (value, op) in [(0xA5, BitOp::Xor), (0x3C, BitOp::And), (0xC3, BitOp::Or)] {
                let mut expected = source.clone();
                apply_scalar(&mut expected[window.clone()], value, op);
                for &isa in &strategies {
                    let mut actual = source.clone();
                    apply_const(&mut actual[window.clone()], value, op, isa).unwrap();
                    assert_eq!(actual, expected, "{isa} {op:?} offset={offset} len={len}");
                }
            }
        }
    }
}

#[test]
fn and_or_with_identity_values() {
    let data: Vec<u8> = (0..=255).collect();
    for isa in transform::Strategy::available() {
        let mut buf = data.clone();
        apply_const(&mut buf, 0xFF, BitOp::And, isa).unwrap();
        assert_eq!(buf, data);
        apply_const(&mut buf, 0x00, BitOp::Or, isa).unwrap();
        assert_eq!(buf, data);
        apply_const(&mut buf, 0x00, BitOp::And, isa).unwrap();
        assert!(buf.iter().all(|&b| b == 0));
    }
}

#[test]
fn unsupported_strategy_is_an_error() {
    let mut buf = [0u8; 64];
    for isa in transform::Strategy::ALL {
        if !isa.is_supported() {
            assert!(apply_const(&mut buf, 1, BitOp::Xor, isa).is_err());
        }
    }
}
