//! Software IEC/IEEE 754 extended double-precision (80-bit) binary
//! floating-point arithmetic.
//!
//! This crate implements the x87-style 80-bit format (1 sign bit, 15
//! biased exponent bits, and a 64-bit significand with an explicit,
//! rather than implicit, leading integer bit) entirely in software, so
//! results are bit-exact and reproducible independent of any hardware
//! FPU. It provides:
//!
//! - [`x80::X80`], the value type, with the named constants
//!   ([`x80::ONE`], [`x80::PI`], [`x80::INFINITY`], ...) and the 20-hex-
//!   digit canonical round-trip form ([`std::fmt::Display`]).
//! - Arithmetic kernels: [`x80::X80::add`], [`x80::X80::sub`],
//!   [`x80::X80::mul`], [`x80::X80::div`], [`x80::X80::rem`],
//!   [`x80::X80::sqrt`], [`x80::X80::round_to_int`].
//! - Conversions to and from 32/64-bit integers and `f32`/`f64`.
//! - The six IEEE comparison predicates, in quiet and signaling form.
//! - Process-local [`context`] configuration: rounding mode, rounding
//!   precision, tininess-detection mode, and the sticky exception-flag
//!   accumulator.
//!
//! The arithmetic surface never panics on exceptional input: every
//! operation returns a well-defined result for every input, with
//! exceptional conditions reported only through [`context::exception_flags`].
//! The one genuinely fallible boundary is textual parsing
//! ([`x80::X80::try_from_hex_str`]).

pub mod context;
pub mod primitives;
pub mod x80;

pub use x80::X80;
