//! Process/thread-wide floating-point configuration: rounding mode,
//! rounding precision, tininess-detection mode, and the sticky exception
//! accumulator.
//!
//! The IEC/IEEE 754 model treats this quartet as ambient state read by
//! every arithmetic operation rather than as an explicit parameter. A
//! shared global would make concurrent use a data race, so each thread
//! gets its own [`Environment`] via `thread_local!`; the semantics match
//! the x87/IEEE-754 mental model (one environment per execution context)
//! without requiring external synchronization.

use std::cell::Cell;

/// Rounding mode applied by every rounding/packing step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Round to nearest, ties to even. The IEEE 754 default.
    #[default]
    NearestEven,
    /// Round toward zero (truncate).
    ToZero,
    /// Round toward negative infinity.
    ToNegative,
    /// Round toward positive infinity.
    ToPositive,
}

/// Width at which extended results are rounded.
///
/// Real x87 hardware can be configured to round 80-bit computations as if
/// they were 32- or 64-bit, so that double-rounding through an extended
/// register matches native single/double-precision arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoundingPrecision {
    Single,
    Double,
    #[default]
    Extended,
}

/// When underflow tininess is detected relative to the final rounding step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DetectTininess {
    #[default]
    AfterRounding,
    BeforeRounding,
}

/// Sticky accumulator of IEEE 754 exception flags.
///
/// Bits are only ever set by [`raise`]; the host is responsible for
/// clearing them (via [`set_exception_flags`]) between regions of
/// interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ExceptionFlags(u8);

impl ExceptionFlags {
    pub const NONE: ExceptionFlags = ExceptionFlags(0);
    pub const INVALID: ExceptionFlags = ExceptionFlags(0x01);
    pub const DENORMAL: ExceptionFlags = ExceptionFlags(0x02);
    pub const DIVBYZERO: ExceptionFlags = ExceptionFlags(0x04);
    pub const OVERFLOW: ExceptionFlags = ExceptionFlags(0x08);
    pub const UNDERFLOW: ExceptionFlags = ExceptionFlags(0x10);
    pub const INEXACT: ExceptionFlags = ExceptionFlags(0x20);

    /// Returns the raw bitmask: bit 0 invalid, bit 1 denormal, bit 2
    /// divide-by-zero, bit 3 overflow, bit 4 underflow, bit 5 inexact.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reconstructs flags from a raw bitmask.
    pub const fn from_bits(bits: u8) -> ExceptionFlags {
        ExceptionFlags(bits & 0x3F)
    }

    /// `true` if `self` has every bit set in `other`.
    pub const fn contains(self, other: ExceptionFlags) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ExceptionFlags {
    type Output = ExceptionFlags;
    fn bitor(self, rhs: ExceptionFlags) -> ExceptionFlags {
        ExceptionFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ExceptionFlags {
    fn bitor_assign(&mut self, rhs: ExceptionFlags) {
        self.0 |= rhs.0;
    }
}

/// Per-thread floating-point environment: the rounding-mode / precision /
/// tininess-detection triple plus the sticky exception accumulator.
#[derive(Clone, Copy, Debug)]
struct Environment {
    rounding_mode: RoundingMode,
    rounding_precision: RoundingPrecision,
    detect_tininess: DetectTininess,
    flags: ExceptionFlags,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            rounding_mode: RoundingMode::NearestEven,
            rounding_precision: RoundingPrecision::Extended,
            detect_tininess: DetectTininess::AfterRounding,
            flags: ExceptionFlags::NONE,
        }
    }
}

thread_local! {
    static ENV: Cell<Environment> = Cell::new(Environment::default());
}

/// Returns the active rounding mode.
pub fn rounding_mode() -> RoundingMode {
    ENV.with(|e| e.get().rounding_mode)
}

/// Sets the active rounding mode for the current thread.
pub fn set_rounding_mode(mode: RoundingMode) {
    ENV.with(|e| {
        let mut env = e.get();
        env.rounding_mode = mode;
        e.set(env);
    });
}

/// Returns the active rounding precision.
pub fn rounding_precision() -> RoundingPrecision {
    ENV.with(|e| e.get().rounding_precision)
}

/// Sets the active rounding precision for the current thread.
pub fn set_rounding_precision(precision: RoundingPrecision) {
    ENV.with(|e| {
        let mut env = e.get();
        env.rounding_precision = precision;
        e.set(env);
    });
}

/// Returns the active tininess-detection mode.
pub fn detect_tininess() -> DetectTininess {
    ENV.with(|e| e.get().detect_tininess)
}

/// Sets the active tininess-detection mode for the current thread.
pub fn set_detect_tininess(mode: DetectTininess) {
    ENV.with(|e| {
        let mut env = e.get();
        env.detect_tininess = mode;
        e.set(env);
    });
}

/// Returns the sticky exception flags accumulated so far on this thread.
pub fn exception_flags() -> ExceptionFlags {
    ENV.with(|e| e.get().flags)
}

/// Overwrites the sticky exception flags on this thread (typically with
/// [`ExceptionFlags::NONE`] to clear them before a region of interest).
pub fn set_exception_flags(flags: ExceptionFlags) {
    ENV.with(|e| {
        let mut env = e.get();
        env.flags = flags;
        e.set(env);
    });
}

/// ORs `flags` into the sticky exception accumulator for this thread.
pub fn raise(flags: ExceptionFlags) {
    ENV.with(|e| {
        let mut env = e.get();
        env.flags |= flags;
        e.set(env);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accumulate_and_clear() {
        set_exception_flags(ExceptionFlags::NONE);
        raise(ExceptionFlags::INEXACT);
        raise(ExceptionFlags::OVERFLOW);
        let flags = exception_flags();
        assert!(flags.contains(ExceptionFlags::INEXACT));
        assert!(flags.contains(ExceptionFlags::OVERFLOW));
        assert!(!flags.contains(ExceptionFlags::INVALID));
        set_exception_flags(ExceptionFlags::NONE);
        assert_eq!(exception_flags(), ExceptionFlags::NONE);
    }

    #[test]
    fn default_environment_matches_spec() {
        set_rounding_mode(RoundingMode::NearestEven);
        set_rounding_precision(RoundingPrecision::Extended);
        set_detect_tininess(DetectTininess::AfterRounding);
        assert_eq!(rounding_mode(), RoundingMode::NearestEven);
        assert_eq!(rounding_precision(), RoundingPrecision::Extended);
        assert_eq!(detect_tininess(), DetectTininess::AfterRounding);
    }
}
