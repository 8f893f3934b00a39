//! Helpers to build and parse the exact numbers used in expressions.

use rug::{ops::Pow, Integer, Rational};

/// The largest exponent magnitude that [`rational_pow`] will evaluate.
const MAX_EXPONENT: u32 = 1024;

/// The largest estimated size, in bits, of the numerator or denominator of a power that
/// [`rational_pow`] will evaluate.
const MAX_RESULT_BITS: u64 = 1 << 16;

/// Creates an [`Integer`] from any primitive integer.
pub fn int(n: impl Into<Integer>) -> Integer {
    n.into()
}

/// Creates a [`Rational`] from any value that converts into one, such as an integer or a
/// `(numerator, denominator)` pair.
pub fn rational(n: impl Into<Rational>) -> Rational {
    n.into()
}

/// Parses a decimal literal such as `12` or `0.25` into an exact [`Rational`].
pub fn rational_from_str(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    let numerator = Integer::from_str_radix(&digits, 10).ok()?;
    let denominator = int(10).pow(u32::try_from(fraction.len()).ok()?);
    Some(Rational::from((numerator, denominator)))
}

/// Returns the integer value of the rational, if it is an integer.
pub fn as_integer(n: &Rational) -> Option<&Integer> {
    if *n.denom() == 1 {
        Some(n.numer())
    } else {
        None
    }
}

/// Raises `base` to the integer power `exp`.
///
/// Returns [`None`] if the result is undefined (`0` to a negative power), or if the exponent or
/// the result is too large to evaluate.
pub fn rational_pow(base: &Rational, exp: &Integer) -> Option<Rational> {
    let exp = exp.to_i32()?;
    if exp.unsigned_abs() > MAX_EXPONENT || (exp < 0 && *base == 0) {
        return None;
    }

    let bits = base.numer().significant_bits().max(base.denom().significant_bits()) as u64;
    if bits * u64::from(exp.unsigned_abs()) > MAX_RESULT_BITS {
        return None;
    }

    Some(base.clone().pow(exp))
}

/// Returns the exact square root of a non-negative rational, if both its numerator and
/// denominator are perfect squares.
pub fn rational_sqrt(n: &Rational) -> Option<Rational> {
    if *n < 0 {
        return None;
    }

    let (numer, denom) = (n.numer(), n.denom());
    if numer.is_perfect_square() && denom.is_perfect_square() {
        Some(Rational::from((numer.clone().sqrt(), denom.clone().sqrt())))
    } else {
        None
    }
}
