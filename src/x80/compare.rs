//! The six IEEE comparison predicates, each in a quiet and a signaling
//! form. `eq`/`lt`/`le` are quiet by default (matching the upstream
//! naming: only a signaling NaN raises invalid); the explicit
//! `_signaling` forms raise invalid for *any* NaN operand. This mirrors
//! the asymmetry in the reference this format was distilled from, where
//! `Lt`/`Le` are signaling by default and `Eq` is quiet by default (see
//! `DESIGN.md`).

use super::X80;
use crate::context::{self, ExceptionFlags};
use crate::primitives::{le128, lt128};

impl X80 {
    /// `self == other`. Quiet: only raises invalid if either operand is a
    /// signaling NaN.
    pub fn eq(self, other: X80) -> bool {
        if is_unordered(self, other) {
            if self.is_signaling_nan() || other.is_signaling_nan() {
                context::raise(ExceptionFlags::INVALID);
            }
            return false;
        }
        (self.low == other.low && self.high == other.high)
            || (self.low == 0 && (self.high | other.high) << 1 == 0)
    }

    /// `self == other`. Signaling: raises invalid if either operand is
    /// any kind of NaN.
    pub fn eq_signaling(self, other: X80) -> bool {
        if is_unordered(self, other) {
            context::raise(ExceptionFlags::INVALID);
            return false;
        }
        self.low == other.low
            && (self.high == other.high || (self.low == 0 && (self.high | other.high) << 1 == 0))
    }

    /// `self < other`. Signaling by default: raises invalid for any NaN
    /// operand. See [`X80::lt_quiet`] for the quiet form.
    pub fn lt(self, other: X80) -> bool {
        if is_unordered(self, other) {
            context::raise(ExceptionFlags::INVALID);
            return false;
        }
        lt_ordered(self, other)
    }

    /// `self < other`. Quiet: only raises invalid if either operand is a
    /// signaling NaN.
    pub fn lt_quiet(self, other: X80) -> bool {
        if is_unordered(self, other) {
            if self.is_signaling_nan() || other.is_signaling_nan() {
                context::raise(ExceptionFlags::INVALID);
            }
            return false;
        }
        lt_ordered(self, other)
    }

    /// `self <= other`. Signaling by default: raises invalid for any NaN
    /// operand. See [`X80::le_quiet`] for the quiet form.
    pub fn le(self, other: X80) -> bool {
        if is_unordered(self, other) {
            context::raise(ExceptionFlags::INVALID);
            return false;
        }
        le_ordered(self, other)
    }

    /// `self <= other`. Quiet: only raises invalid if either operand is a
    /// signaling NaN.
    pub fn le_quiet(self, other: X80) -> bool {
        if is_unordered(self, other) {
            if self.is_signaling_nan() || other.is_signaling_nan() {
                context::raise(ExceptionFlags::INVALID);
            }
            return false;
        }
        le_ordered(self, other)
    }

    /// `self > other`, derived from [`X80::lt`] with operands swapped.
    pub fn gt(self, other: X80) -> bool {
        other.lt(self)
    }

    /// `self > other`, quiet form, derived from [`X80::lt_quiet`].
    pub fn gt_quiet(self, other: X80) -> bool {
        other.lt_quiet(self)
    }

    /// `self >= other`, derived from [`X80::le`] with operands swapped.
    pub fn ge(self, other: X80) -> bool {
        other.le(self)
    }

    /// `self >= other`, quiet form, derived from [`X80::le_quiet`].
    pub fn ge_quiet(self, other: X80) -> bool {
        other.le_quiet(self)
    }
}

#[inline]
fn is_unordered(a: X80, b: X80) -> bool {
    (a.exp() == 0x7FFF && a.frac() << 1 != 0) || (b.exp() == 0x7FFF && b.frac() << 1 != 0)
}

#[inline]
fn le_ordered(a: X80, b: X80) -> bool {
    let (a_sign, b_sign) = (a.sign(), b.sign());
    if a_sign != b_sign {
        return a_sign || ((a.high | b.high) << 1 != 0 || (a.low | b.low) == 0);
    }
    if a_sign {
        le128(b.high as u64, b.low, a.high as u64, a.low)
    } else {
        le128(a.high as u64, a.low, b.high as u64, b.low)
    }
}

#[inline]
fn lt_ordered(a: X80, b: X80) -> bool {
    let (a_sign, b_sign) = (a.sign(), b.sign());
    if a_sign != b_sign {
        return a_sign && ((a.high | b.high) << 1 != 0 || (a.low | b.low) != 0);
    }
    if a_sign {
        lt128(b.high as u64, b.low, a.high as u64, a.low)
    } else {
        lt128(a.high as u64, a.low, b.high as u64, b.low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{exception_flags, set_exception_flags};

    #[test]
    fn eq_is_reflexive_for_non_nan() {
        assert!(super::super::ONE.eq(super::super::ONE));
        assert!(super::super::ZERO.eq(X80::from_bits(0x8000, 0)));
    }

    #[test]
    fn ordering_matches_numeric_value() {
        let one = super::super::ONE;
        let two = one.add(one);
        assert!(one.lt(two));
        assert!(two.gt(one));
        assert!(one.le(one));
        assert!(one.ge(one));
    }

    #[test]
    fn quiet_eq_does_not_raise_on_quiet_nan() {
        set_exception_flags(ExceptionFlags::NONE);
        assert!(!super::super::NAN.eq(super::super::ONE));
        assert!(!exception_flags().contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn signaling_lt_raises_on_quiet_nan() {
        set_exception_flags(ExceptionFlags::NONE);
        assert!(!super::super::NAN.lt(super::super::ONE));
        assert!(exception_flags().contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn quiet_lt_does_not_raise_on_quiet_nan() {
        set_exception_flags(ExceptionFlags::NONE);
        assert!(!super::super::NAN.lt_quiet(super::super::ONE));
        assert!(!exception_flags().contains(ExceptionFlags::INVALID));
    }

}
