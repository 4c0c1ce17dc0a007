//! Arithmetic kernels: add, subtract, multiply, divide, remainder, square
//! root, and round-to-integer, plus the unimplemented transcendental stubs
//! carried over from the reference this format was distilled from.

use super::round::{
    normalize_float_x80_subnormal, normalize_round_and_pack_float_x80, pack_float_x80,
    round_and_pack_float_x80,
};
use super::X80;
use crate::context::{self, ExceptionFlags, RoundingMode};
use crate::primitives::{
    add128, add192, estimate_div128_to64, estimate_sqrt32, eq128, le128, lt128, mul64_to_128,
    shift128_right, shift128_right_jamming, shift64_extra_right_jamming, shortshift128_left,
    sub128, sub192,
};

impl X80 {
    /// Rounds `self` to the nearest representable integer value, returned
    /// as an `X80`, honoring the active rounding mode.
    pub fn round_to_int(self) -> X80 {
        let a_exp = self.exp();
        if a_exp >= 0x403E {
            if a_exp == 0x7FFF && self.frac() << 1 != 0 {
                return X80::propagate_nan(self, self);
            }
            return self;
        }
        if a_exp < 0x3FFF {
            if a_exp == 0 && self.frac() << 1 == 0 {
                return self;
            }
            context::raise(ExceptionFlags::INEXACT);
            let a_sign = self.sign();
            match context::rounding_mode() {
                RoundingMode::NearestEven => {
                    if a_exp == 0x3FFE && self.frac() << 1 != 0 {
                        return pack_float_x80(a_sign, 0x3FFF, 0x8000_0000_0000_0000);
                    }
                }
                RoundingMode::ToNegative => {
                    if a_sign {
                        return pack_float_x80(true, 0x3FFF, 0x8000_0000_0000_0000);
                    }
                    return super::ZERO;
                }
                RoundingMode::ToPositive => {
                    if a_sign {
                        return pack_float_x80(true, 0, 0);
                    }
                    return pack_float_x80(false, 0x3FFF, 0x8000_0000_0000_0000);
                }
                RoundingMode::ToZero => {}
            }
            return pack_float_x80(a_sign, 0, 0);
        }
        let last_bit_mask = 1u64 << (0x403E - a_exp);
        let round_bits_mask = last_bit_mask - 1;
        let mut z = self;
        match context::rounding_mode() {
            RoundingMode::NearestEven => {
                z.low = z.low.wrapping_add(last_bit_mask >> 1);
                if z.low & round_bits_mask == 0 {
                    z.low &= !last_bit_mask;
                }
            }
            mode if mode != RoundingMode::ToZero => {
                if z.sign() != (mode == RoundingMode::ToPositive) {
                    z.low = z.low.wrapping_add(round_bits_mask);
                }
            }
            _ => {}
        }
        z.low &= !round_bits_mask;
        if z.low == 0 {
            z.high = z.high.wrapping_add(1);
            z.low = 0x8000_0000_0000_0000;
        }
        if z.low != self.low {
            context::raise(ExceptionFlags::INEXACT);
        }
        z
    }

    /// Adds `self` and `b`.
    pub fn add(self, b: X80) -> X80 {
        if self.sign() == b.sign() {
            add_sigs(self, b, self.sign())
        } else {
            sub_sigs(self, b, self.sign())
        }
    }

    /// Subtracts `b` from `self`.
    pub fn sub(self, b: X80) -> X80 {
        if self.sign() == b.sign() {
            sub_sigs(self, b, self.sign())
        } else {
            add_sigs(self, b, self.sign())
        }
    }

    /// Multiplies `self` by `b`.
    pub fn mul(self, b: X80) -> X80 {
        let (mut a_sig, mut a_exp, a_sign) = (self.frac(), self.exp(), self.sign());
        let (mut b_sig, mut b_exp, b_sign) = (b.frac(), b.exp(), b.sign());
        let z_sign = a_sign != b_sign;

        if a_exp == 0x7FFF {
            if a_sig << 1 != 0 || (b_exp == 0x7FFF && b_sig << 1 != 0) {
                return X80::propagate_nan(self, b);
            }
            if b_exp == 0 && b_sig == 0 {
                context::raise(ExceptionFlags::INVALID);
                return super::NAN;
            }
            return pack_float_x80(z_sign, 0x7FFF, 0x8000_0000_0000_0000);
        }
        if b_exp == 0x7FFF {
            if b_sig << 1 != 0 {
                return X80::propagate_nan(self, b);
            }
            if a_exp == 0 && a_sig == 0 {
                context::raise(ExceptionFlags::INVALID);
                return super::NAN;
            }
            return pack_float_x80(z_sign, 0x7FFF, 0x8000_0000_0000_0000);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return pack_float_x80(z_sign, 0, 0);
            }
            let (e, s) = normalize_float_x80_subnormal(a_sig);
            a_exp = e;
            a_sig = s;
        }
        if b_exp == 0 {
            if b_sig == 0 {
                return pack_float_x80(z_sign, 0, 0);
            }
            let (e, s) = normalize_float_x80_subnormal(b_sig);
            b_exp = e;
            b_sig = s;
        }
        let mut z_exp = a_exp + b_exp - 0x3FFE;
        let (mut z_sig0, mut z_sig1) = mul64_to_128(a_sig, b_sig);
        if z_sig0 != 0 {
            let (s0, s1) = shortshift128_left(z_sig0, z_sig1, 1);
            z_sig0 = s0;
            z_sig1 = s1;
            z_exp -= 1;
        }
        round_and_pack_float_x80(context::rounding_precision(), z_sign, z_exp, z_sig0, z_sig1)
    }

    /// Divides `self` by `b`.
    pub fn div(self, b: X80) -> X80 {
        let (mut a_sig, mut a_exp, a_sign) = (self.frac(), self.exp(), self.sign());
        let (mut b_sig, mut b_exp, b_sign) = (b.frac(), b.exp(), b.sign());
        let z_sign = a_sign != b_sign;
        if a_exp == 0x7FFF {
            if a_sig << 1 != 0 {
                return X80::propagate_nan(self, b);
            }
            if b_exp == 0x7FFF {
                if b_sig << 1 != 0 {
                    return X80::propagate_nan(self, b);
                }
                context::raise(ExceptionFlags::INVALID);
                return super::NAN;
            }
            return pack_float_x80(z_sign, 0x7FFF, 0x8000_0000_0000_0000);
        }
        if b_exp == 0x7FFF {
            if b_sig << 1 != 0 {
                return X80::propagate_nan(self, b);
            }
            return pack_float_x80(z_sign, 0, 0);
        }
        if b_exp == 0 {
            if b_sig == 0 {
                if a_exp != 0 && a_sig != 0 {
                    context::raise(ExceptionFlags::INVALID);
                    return super::NAN;
                }
                context::raise(ExceptionFlags::DIVBYZERO);
                return pack_float_x80(z_sign, 0x7FFF, 0x8000_0000_0000_0000);
            }
            let (e, s) = normalize_float_x80_subnormal(b_sig);
            b_exp = e;
            b_sig = s;
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return pack_float_x80(z_sign, 0, 0);
            }
            let (e, s) = normalize_float_x80_subnormal(a_sig);
            a_exp = e;
            a_sig = s;
        }
        let mut z_exp = a_exp - b_exp + 0x3FFE;
        let mut rem1 = 0u64;
        if b_sig <= a_sig {
            let (s0, s1) = shift128_right(a_sig, 0, 1);
            a_sig = s0;
            rem1 = s1;
            z_exp += 1;
        }
        let mut z_sig0 = estimate_div128_to64(a_sig, rem1, b_sig);
        let (term0, term1) = mul64_to_128(b_sig, z_sig0);
        let (mut rem0, mut rem1) = sub128(a_sig, rem1, term0, term1);
        while (rem0 as i64) < 0 {
            z_sig0 -= 1;
            let (r0, r1) = add128(rem0, rem1, 0, b_sig);
            rem0 = r0;
            rem1 = r1;
        }
        let mut z_sig1 = estimate_div128_to64(rem1, 0, b_sig);
        if z_sig1 << 1 <= 8 {
            let (term1, term2) = mul64_to_128(b_sig, z_sig1);
            let (mut r1, mut r2) = sub128(rem1, 0, term1, term2);
            while (r1 as i64) < 0 {
                z_sig1 -= 1;
                let (a, b) = add128(r1, r2, 0, b_sig);
                r1 = a;
                r2 = b;
            }
            if r1 != 0 && r2 != 0 {
                z_sig1 |= 1;
            }
        }
        round_and_pack_float_x80(context::rounding_precision(), z_sign, z_exp, z_sig0, z_sig1)
    }

    /// Computes the IEEE remainder of `self` with respect to `b`.
    pub fn rem(self, b: X80) -> X80 {
        let (mut a_sig0, mut a_exp, a_sign) = (self.frac(), self.exp(), self.sign());
        let (mut b_sig, mut b_exp) = (b.frac(), b.exp());

        if a_exp == 0x7FFF {
            if a_sig0 << 1 != 0 || (b_exp == 0x7FFF && b_sig << 1 != 0) {
                return X80::propagate_nan(self, b);
            }
            context::raise(ExceptionFlags::INVALID);
            return super::NAN;
        }
        if b_exp == 0x7FFF {
            if b_sig << 1 != 0 {
                return X80::propagate_nan(self, b);
            }
            return self;
        }
        if b_exp == 0 {
            if b_sig == 0 {
                context::raise(ExceptionFlags::INVALID);
                return super::NAN;
            }
            let (e, s) = normalize_float_x80_subnormal(b_sig);
            b_exp = e;
            b_sig = s;
        }
        if a_exp == 0 {
            if a_sig0 << 1 == 0 {
                return self;
            }
            let (e, s) = normalize_float_x80_subnormal(a_sig0);
            a_exp = e;
            a_sig0 = s;
        }
        b_sig |= 0x8000_0000_0000_0000;
        let mut z_sign = a_sign;
        let mut exp_diff = a_exp - b_exp;
        let mut a_sig1 = 0u64;
        if exp_diff < 0 {
            if exp_diff < -1 {
                return self;
            }
            let (s0, s1) = shift128_right(a_sig0, 0, 1);
            a_sig0 = s0;
            a_sig1 = s1;
            exp_diff = 0;
        }
        if b_sig <= a_sig0 {
            a_sig0 -= b_sig;
        }
        exp_diff -= 64;
        let mut q;
        while exp_diff > 0 {
            q = estimate_div128_to64(a_sig0, a_sig1, b_sig);
            q = if q > 2 { q - 2 } else { 0 };
            let (term0, term1) = mul64_to_128(b_sig, q);
            let (s0, s1) = sub128(a_sig0, a_sig1, term0, term1);
            let (s0, s1) = shortshift128_left(s0, s1, 62);
            a_sig0 = s0;
            a_sig1 = s1;
            exp_diff -= 62;
        }
        exp_diff += 64;
        let (mut term0, mut term1);
        if exp_diff > 0 {
            q = estimate_div128_to64(a_sig0, a_sig1, b_sig);
            q = if q > 2 { q - 2 } else { 0 };
            q >>= 64 - exp_diff;
            let (t0, t1) = mul64_to_128(b_sig, q << (64 - exp_diff));
            let (s0, s1) = sub128(a_sig0, a_sig1, t0, t1);
            a_sig0 = s0;
            a_sig1 = s1;
            let (t0, t1) = shortshift128_left(0, b_sig, 64 - exp_diff);
            term0 = t0;
            term1 = t1;
            while le128(term0, term1, a_sig0, a_sig1) {
                q += 1;
                let (s0, s1) = sub128(a_sig0, a_sig1, term0, term1);
                a_sig0 = s0;
                a_sig1 = s1;
            }
        } else {
            term1 = 0;
            term0 = b_sig;
            q = 0;
        }
        let (alt0, alt1) = sub128(term0, term1, a_sig0, a_sig1);
        if lt128(alt0, alt1, a_sig0, a_sig1) || (eq128(alt0, alt1, a_sig0, a_sig1) && (q & 1) != 0) {
            a_sig0 = alt0;
            a_sig1 = alt1;
            z_sign = !z_sign;
        }
        normalize_round_and_pack_float_x80(
            crate::context::RoundingPrecision::Extended,
            z_sign,
            b_exp + exp_diff,
            a_sig0,
            a_sig1,
        )
    }

    /// Computes the square root of `self`.
    pub fn sqrt(self) -> X80 {
        let (mut a_sig0, mut a_exp, a_sign) = (self.frac(), self.exp(), self.sign());
        if a_exp == 0x7FFF {
            if a_sig0 << 1 != 0 {
                return X80::propagate_nan(self, self);
            }
            if !a_sign {
                return self;
            }
            context::raise(ExceptionFlags::INVALID);
            return super::NAN;
        }
        if a_sign {
            if a_exp != 0 && a_sig0 != 0 {
                return self;
            }
            context::raise(ExceptionFlags::INVALID);
            return super::NAN;
        }
        if a_exp == 0 {
            if a_sig0 == 0 {
                return super::ZERO;
            }
            let (e, s) = normalize_float_x80_subnormal(a_sig0);
            a_exp = e;
            a_sig0 = s;
        }
        let z_exp = ((a_exp - 0x3FFF) >> 1) + 0x3FFF;
        let mut z_sig0 = estimate_sqrt32(a_exp, (a_sig0 >> 32) as u32) as u64;
        let (s0, s1) = shift128_right(a_sig0, 0, 2 + (a_exp & 1));
        a_sig0 = s0;
        let mut a_sig1 = s1;
        z_sig0 = estimate_div128_to64(a_sig0, a_sig1, z_sig0 << 32) + (z_sig0 << 30);
        let mut double_z_sig0 = z_sig0 << 1;
        let (term0, term1) = mul64_to_128(z_sig0, z_sig0);
        let (mut rem0, mut rem1) = sub128(a_sig0, a_sig1, term0, term1);
        while (rem0 as i64) < 0 {
            z_sig0 -= 1;
            double_z_sig0 -= 2;
            let (r0, r1) = add128(rem0, rem1, double_z_sig0 >> 63, double_z_sig0 | 1);
            rem0 = r0;
            rem1 = r1;
        }
        let mut z_sig1 = estimate_div128_to64(rem1, 0, double_z_sig0);
        if (z_sig1 & 0x3FFF_FFFF_FFFF_FFFF) <= 5 {
            if z_sig1 == 0 {
                z_sig1 = 1;
            }
            let (term1, term2) = mul64_to_128(double_z_sig0, z_sig1);
            let (r1, r2) = sub128(rem1, 0, term1, term2);
            let (term2b, term3) = mul64_to_128(z_sig1, z_sig1);
            let (mut r1, mut r2, mut r3) = sub192(r1, r2, 0, 0, term2b, term3);
            while (r1 as i64) < 0 {
                z_sig1 -= 1;
                let (mut t2, mut t3) = shortshift128_left(0, z_sig1, 1);
                t3 |= 1;
                t2 |= double_z_sig0;
                let (s1, s2, s3) = add192(r1, r2, r3, 0, t2, t3);
                r1 = s1;
                r2 = s2;
                r3 = s3;
            }
            if (r1 | r2 | r3) != 0 {
                z_sig1 |= 1;
            }
        }
        let (s0, s1) = shortshift128_left(0, z_sig1, 1);
        let mut z_sig0 = s0;
        z_sig0 |= double_z_sig0;
        let z_sig1 = s1;
        round_and_pack_float_x80(context::rounding_precision(), false, z_exp, z_sig0, z_sig1)
    }

    /// `ln(1 + self)`. Not implemented by the upstream reference this
    /// format was distilled from; carried forward as an explicit stub
    /// rather than silently dropped.
    pub fn ln_1p(self) -> X80 {
        unimplemented!("extended-precision ln_1p has no reference implementation")
    }

    /// Natural logarithm. See [`X80::ln_1p`].
    pub fn ln(self) -> X80 {
        unimplemented!("extended-precision ln has no reference implementation")
    }

    /// Base-2 logarithm. See [`X80::ln_1p`].
    pub fn log2(self) -> X80 {
        unimplemented!("extended-precision log2 has no reference implementation")
    }

    /// Base-10 logarithm. See [`X80::ln_1p`].
    pub fn log10(self) -> X80 {
        unimplemented!("extended-precision log10 has no reference implementation")
    }
}

impl std::ops::Add for X80 {
    type Output = X80;
    fn add(self, rhs: X80) -> X80 {
        X80::add(self, rhs)
    }
}

impl std::ops::Sub for X80 {
    type Output = X80;
    fn sub(self, rhs: X80) -> X80 {
        X80::sub(self, rhs)
    }
}

impl std::ops::Mul for X80 {
    type Output = X80;
    fn mul(self, rhs: X80) -> X80 {
        X80::mul(self, rhs)
    }
}

impl std::ops::Div for X80 {
    type Output = X80;
    fn div(self, rhs: X80) -> X80 {
        X80::div(self, rhs)
    }
}

impl std::ops::Rem for X80 {
    type Output = X80;
    fn rem(self, rhs: X80) -> X80 {
        X80::rem(self, rhs)
    }
}

impl std::ops::Neg for X80 {
    type Output = X80;
    fn neg(self) -> X80 {
        pack_float_x80(!self.sign(), self.exp(), self.frac())
    }
}

impl num_traits::Zero for X80 {
    fn zero() -> X80 {
        super::ZERO
    }

    fn is_zero(&self) -> bool {
        X80::is_zero(*self)
    }
}

impl num_traits::One for X80 {
    fn one() -> X80 {
        super::ONE
    }
}

fn add_sigs(a: X80, b: X80, z_sign: bool) -> X80 {
    let (mut a_sig, mut b_sig) = (a.frac(), b.frac());
    let (a_exp, b_exp) = (a.exp(), b.exp());
    let mut z_sig1;
    let mut z_sig0;
    let mut z_exp;
    let exp_diff = a_exp - b_exp;

    if exp_diff > 0 {
        if a_exp == 0x7FFF {
            if a_sig << 1 != 0 {
                return X80::propagate_nan(a, b);
            }
            return a;
        }
        let shift = if b_exp == 0 { exp_diff - 1 } else { exp_diff };
        let (s0, s1) = shift64_extra_right_jamming(b_sig, 0, shift);
        b_sig = s0;
        z_sig1 = s1;
        z_exp = a_exp;
    } else if exp_diff < 0 {
        if b_exp == 0x7FFF {
            if b_sig << 1 != 0 {
                return X80::propagate_nan(a, b);
            }
            return pack_float_x80(z_sign, 0x7FFF, 0x8000_0000_0000_0000);
        }
        let shift = if a_exp == 0 { -exp_diff - 1 } else { -exp_diff };
        let (s0, s1) = shift64_extra_right_jamming(a_sig, 0, shift);
        a_sig = s0;
        z_sig1 = s1;
        z_exp = b_exp;
    } else {
        if a_exp == 0x7FFF {
            if (a_sig | b_sig) << 1 != 0 {
                return X80::propagate_nan(a, b);
            }
            return a;
        }
        z_sig1 = 0;
        z_sig0 = a_sig.wrapping_add(b_sig);
        if a_exp == 0 {
            let (e, s) = normalize_float_x80_subnormal(z_sig0);
            return round_and_pack_float_x80(context::rounding_precision(), z_sign, e, s, z_sig1);
        }
        z_exp = a_exp;
        let (s0, s1) = shift64_extra_right_jamming(z_sig0, z_sig1, 1);
        z_sig0 = s0 | 0x8000_0000_0000_0000;
        z_sig1 = s1;
        z_exp += 1;
        return round_and_pack_float_x80(context::rounding_precision(), z_sign, z_exp, z_sig0, z_sig1);
    }
    z_sig0 = a_sig.wrapping_add(b_sig);
    if (z_sig0 as i64) < 0 {
        return round_and_pack_float_x80(context::rounding_precision(), z_sign, z_exp, z_sig0, z_sig1);
    }
    let (s0, s1) = shift64_extra_right_jamming(z_sig0, z_sig1, 1);
    z_sig0 = s0 | 0x8000_0000_0000_0000;
    z_sig1 = s1;
    z_exp += 1;
    round_and_pack_float_x80(context::rounding_precision(), z_sign, z_exp, z_sig0, z_sig1)
}

fn sub_sigs(a: X80, b: X80, z_sign: bool) -> X80 {
    let (mut a_sig, mut b_sig) = (a.frac(), b.frac());
    let (mut a_exp, mut b_exp) = (a.exp(), b.exp());
    let mut z_sign = z_sign;
    let mut z_sig1;
    let z_sig0;
    let z_exp;
    let exp_diff = a_exp - b_exp;

    if exp_diff == 0 {
        if a_exp == 0x7FFF {
            if (a_sig | b_sig) << 1 != 0 {
                return X80::propagate_nan(a, b);
            }
            context::raise(ExceptionFlags::INVALID);
            return super::NAN;
        }
        if a_exp == 0 {
            a_exp = 1;
            b_exp = 1;
        }
        if b_sig < a_sig {
            // a bigger
            let (s0, s1) = sub128(a_sig, 0, b_sig, 0);
            return normalize_round_and_pack_float_x80(
                context::rounding_precision(),
                z_sign,
                a_exp,
                s0,
                s1,
            );
        }
        if a_sig < b_sig {
            // b bigger
            let (s0, s1) = sub128(b_sig, 0, a_sig, 0);
            return normalize_round_and_pack_float_x80(
                context::rounding_precision(),
                !z_sign,
                b_exp,
                s0,
                s1,
            );
        }
        return pack_float_x80(context::rounding_mode() == RoundingMode::ToNegative, 0, 0);
    }

    if exp_diff > 0 {
        if a_exp == 0x7FFF {
            if a_sig << 1 != 0 {
                return X80::propagate_nan(a, b);
            }
            return a;
        }
        let shift = if b_exp == 0 { exp_diff - 1 } else { exp_diff };
        let (s0, s1) = shift128_right_jamming(b_sig, 0, shift);
        b_sig = s0;
        z_sig1 = s1;
        let (d0, d1) = sub128(a_sig, 0, b_sig, z_sig1);
        z_sig0 = d0;
        z_sig1 = d1;
        z_exp = a_exp;
    } else {
        if b_exp == 0x7FFF {
            if b_sig << 1 != 0 {
                return X80::propagate_nan(a, b);
            }
            return pack_float_x80(!z_sign, 0x7FFF, 0x8000_0000_0000_0000);
        }
        let shift = if a_exp == 0 { -exp_diff - 1 } else { -exp_diff };
        let (s0, s1) = shift128_right_jamming(a_sig, 0, shift);
        a_sig = s0;
        z_sig1 = s1;
        let (d0, d1) = sub128(b_sig, 0, a_sig, z_sig1);
        z_sig0 = d0;
        z_sig1 = d1;
        z_exp = b_exp;
        z_sign = !z_sign;
    }
    normalize_round_and_pack_float_x80(context::rounding_precision(), z_sign, z_exp, z_sig0, z_sig1)
}
