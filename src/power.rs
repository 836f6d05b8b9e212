use num_bigint::BigUint;
use num_traits::One;

/// Decimal digits that disqualify a power of two, as ASCII bytes.
pub const FORBIDDEN_DIGITS: [u8; 4] = [b'1', b'2', b'4', b'8'];

#[derive(Debug, Clone)]
pub struct ExponentResult {
    pub exponent: u64,
    pub value: BigUint,
    pub qualifies: bool,
}

pub fn power_of_two(exponent: u64) -> BigUint {
    BigUint::one() << exponent
}

pub fn has_forbidden_digit(value: &BigUint) -> bool {
    let s = value.to_string();
    s.bytes().any(|digit| FORBIDDEN_DIGITS.contains(&digit))
}

/// Test whether 2^exponent avoids every forbidden digit
///
/// Computes the exact power with arbitrary-precision arithmetic and scans
/// its canonical decimal form. Pure and deterministic; cost grows with the
/// digit count of the value (~ exponent * log10(2)).
pub fn qualifies(exponent: u64) -> bool {
    !has_forbidden_digit(&power_of_two(exponent))
}

pub fn evaluate_exponent(exponent: u64) -> ExponentResult {
    let value = power_of_two(exponent);
    let qualifies = !has_forbidden_digit(&value);

    ExponentResult {
        exponent,
        value,
        qualifies,
    }
}
