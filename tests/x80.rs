//! Cross-module, end-to-end behavioral checks: the scenarios and
//! universal invariants a conforming IEC/IEEE 754 extended-precision
//! implementation must satisfy, independent of any one module's unit
//! tests.

use x80float::context::{self, ExceptionFlags, RoundingMode};
use x80float::x80;
use x80float::X80;

fn reset() {
    context::set_rounding_mode(RoundingMode::NearestEven);
    context::set_rounding_precision(context::RoundingPrecision::Extended);
    context::set_exception_flags(ExceptionFlags::NONE);
}

#[test]
fn scenario_int32_three_to_x80() {
    reset();
    let three = X80::from_i32(3);
    assert_eq!(three.to_string(), "4000C000000000000000");
}

#[test]
fn scenario_float64_pi_to_x80() {
    reset();
    let pi = X80::from_f64(std::f64::consts::PI);
    assert_eq!(pi.to_string(), "4000C90FDAA22168C000");
}

#[test]
fn scenario_one_plus_one_is_two() {
    reset();
    let two = x80::ONE.add(x80::ONE);
    assert_eq!(two.to_string(), "40008000000000000000");
}

#[test]
fn scenario_round_to_int_half_ties_to_zero() {
    reset();
    let half = X80::from_hex_str("3FFE8000000000000000");
    let z = half.round_to_int();
    assert!(z.is_zero());
    assert!(!z.is_sign_negative());
    assert!(context::exception_flags().contains(ExceptionFlags::INEXACT));
}

#[test]
fn scenario_div_by_zero_and_zero_over_zero() {
    reset();
    let inf = x80::ONE.div(x80::ZERO);
    assert_eq!(inf, x80::INFINITY);
    assert!(context::exception_flags().contains(ExceptionFlags::DIVBYZERO));

    reset();
    let nan = x80::ZERO.div(x80::ZERO);
    assert!(nan.is_nan());
    assert!(!nan.is_signaling_nan());
    assert!(context::exception_flags().contains(ExceptionFlags::INVALID));
}

#[test]
fn scenario_pi_doubled_sqrt_squared_is_nearly_pi_doubled() {
    reset();
    let two_pi = x80::PI.add(x80::PI);
    let root = two_pi.sqrt();
    let squared = root.mul(root);
    let diff = squared.sub(two_pi);
    // Rounding error from the sqrt/mul round trip; tiny and negative
    // (squaring the rounded root undershoots the true value slightly).
    assert!(diff.is_sign_negative() || diff.is_zero());
    let diff_f64 = diff.to_f64();
    assert!(diff_f64.abs() < 1e-15, "diff too large: {diff_f64}");
}

#[test]
fn invariant_int32_round_trip() {
    reset();
    for i in [0, 1, -1, 12345, -12345, i32::MAX, i32::MIN] {
        assert_eq!(X80::from_i32(i).to_i32(), i);
    }
}

#[test]
fn invariant_int64_round_trip_within_range() {
    reset();
    for i in [0i64, 1, -1, 1 << 62, -(1i64 << 62), i64::MAX, i64::MIN] {
        assert_eq!(X80::from_i64(i).to_i64(), i);
    }
}

#[test]
fn invariant_add_is_commutative() {
    reset();
    let a = X80::from_i32(7);
    let b = x80::PI;
    assert_eq!(a.add(b), b.add(a));
}

#[test]
fn invariant_mul_is_commutative() {
    reset();
    let a = X80::from_i32(7);
    let b = x80::E;
    assert_eq!(a.mul(b), b.mul(a));
}

#[test]
fn invariant_sub_self_is_zero_except_toward_negative() {
    let a = x80::PI;
    for mode in [
        RoundingMode::NearestEven,
        RoundingMode::ToZero,
        RoundingMode::ToPositive,
    ] {
        context::set_rounding_mode(mode);
        let z = a.sub(a);
        assert!(z.is_zero());
        assert!(!z.is_sign_negative(), "mode {mode:?} produced -0");
    }
    context::set_rounding_mode(RoundingMode::ToNegative);
    let z = a.sub(a);
    assert!(z.is_zero());
    assert!(z.is_sign_negative());
}

#[test]
fn invariant_identity_elements() {
    reset();
    let a = x80::PI;
    assert_eq!(a.mul(x80::ONE), a);
    assert_eq!(a.add(x80::ZERO), a);
}

#[test]
fn invariant_sqrt_is_self_inverse_under_squaring() {
    reset();
    for v in [x80::ONE, X80::from_i32(2), X80::from_i32(100), x80::PI] {
        let root = v.sqrt();
        let squared = root.mul(root);
        let diff = squared.sub(v).to_f64().abs();
        let scale = v.to_f64().abs().max(1.0);
        assert!(diff / scale < 1e-17, "sqrt/mul round trip too lossy: {diff}");
    }
}

#[test]
fn invariant_nan_comparisons() {
    reset();
    assert!(!x80::NAN.eq(x80::ONE));
    assert!(!x80::NAN.lt(x80::ONE));
    context::set_exception_flags(ExceptionFlags::NONE);
    assert!(!x80::NAN.lt(x80::ONE));
    assert!(context::exception_flags().contains(ExceptionFlags::INVALID));
    context::set_exception_flags(ExceptionFlags::NONE);
    assert!(!x80::NAN.le(x80::ONE));
    assert!(context::exception_flags().contains(ExceptionFlags::INVALID));
}

#[test]
fn invariant_infinities_order_everything_finite() {
    reset();
    let values = [x80::ZERO, x80::ONE, x80::PI, X80::from_i32(-5)];
    for v in values {
        assert!(x80::INFINITY.gt(v));
        assert!(x80::NEG_INFINITY.lt(v));
    }
}

#[test]
fn float64_round_trip_preserves_exact_values() {
    reset();
    for v in [0.0f64, 1.0, -1.0, 0.5, 123.456, f64::MIN_POSITIVE, f64::MAX] {
        let x = X80::from_f64(v);
        assert_eq!(x.to_f64(), v);
    }
}

#[test]
fn exception_flags_are_sticky_until_cleared() {
    context::set_exception_flags(ExceptionFlags::NONE);
    context::set_rounding_mode(RoundingMode::NearestEven);
    let _ = x80::ONE.div(x80::ZERO);
    assert!(context::exception_flags().contains(ExceptionFlags::DIVBYZERO));
    let _ = x80::ONE.add(x80::ONE);
    // Divide-by-zero flag persists across an unrelated, exact operation.
    assert!(context::exception_flags().contains(ExceptionFlags::DIVBYZERO));
    context::set_exception_flags(ExceptionFlags::NONE);
    assert_eq!(context::exception_flags(), ExceptionFlags::NONE);
}
