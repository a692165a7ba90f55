//! Numeric parsing utilities.

use crate::numeric::{Numeric, NumericDigit, Sign, DEC_DIGITS, MAX_PRECISION};
use crate::NumericError;
use std::str::FromStr;

/// A numeric literal split into its components, still as raw bytes.
struct Parts<'a> {
    pub sign: Sign,
    pub integral: &'a [u8],
    pub fractional: &'a [u8],
    pub exp: i32,
}

/// Consumes an optional leading `+` or `-`; absence means positive.
#[inline]
fn take_sign(s: &[u8]) -> (Sign, &[u8]) {
    match s.split_first() {
        Some((b'-', rest)) => (Sign::Neg, rest),
        Some((b'+', rest)) => (Sign::Pos, rest),
        _ => (Sign::Pos, s),
    }
}

/// Splits off the longest leading run of ASCII digits.
#[inline]
fn take_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let run = s.iter().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(run)
}

/// Drops leading ASCII whitespace.
#[inline]
fn skip_whitespace(s: &[u8]) -> &[u8] {
    let run = s
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(s.len());
    &s[run..]
}

/// Recognizes a leading `NaN` in any capitalization.
#[inline]
fn take_nan(s: &[u8]) -> (bool, &[u8]) {
    if s.len() >= 3 && s[..3].eq_ignore_ascii_case(b"nan") {
        (true, &s[3..])
    } else {
        (false, s)
    }
}

/// Extracts exponent, if any. Exponents beyond `MAX_PRECISION` in either
/// direction are not accepted.
fn extract_exponent(s: &[u8]) -> Result<(i32, &[u8]), NumericError> {
    let (sign, s) = take_sign(s);
    let (number, s) = take_digits(s);

    if number.is_empty() {
        return Err(NumericError::InvalidArgument);
    }

    let mut exp: i32 = 0;
    for &n in number {
        // Once past the limit the exact magnitude no longer matters.
        if exp <= MAX_PRECISION {
            exp = exp * 10 + (n - b'0') as i32;
        }
    }
    if exp > MAX_PRECISION {
        return Err(NumericError::InvalidArgument);
    }
    if sign == Sign::Neg {
        exp = -exp;
    }

    Ok((exp, s))
}

/// Validates the shape of a numeric literal and locates its integral part,
/// fractional part and exponent.
fn parse_parts(s: &[u8]) -> Result<(Parts, &[u8]), NumericError> {
    let (sign, s) = take_sign(s);

    if s.is_empty() {
        return Err(NumericError::InvalidArgument);
    }

    let (integral, s) = take_digits(s);

    // Redundant leading zeroes would only distort the weight math; keep a
    // single byte when the run is nothing but zeroes.
    let lead = integral
        .iter()
        .take_while(|&&b| b == b'0')
        .count()
        .min(integral.len().saturating_sub(1));
    let integral = &integral[lead..];

    let (fractional, exp, s) = match s.first() {
        Some(&b'e') | Some(&b'E') => {
            if integral.is_empty() {
                return Err(NumericError::InvalidArgument);
            }

            let (exp, s) = extract_exponent(&s[1..])?;
            (&b""[..], exp, s)
        }
        Some(&b'.') => {
            let (fractional, s) = take_digits(&s[1..]);
            if integral.is_empty() && fractional.is_empty() {
                return Err(NumericError::InvalidArgument);
            }

            match s.first() {
                Some(&b'e') | Some(&b'E') => {
                    let (exp, s) = extract_exponent(&s[1..])?;
                    (fractional, exp, s)
                }
                _ => (fractional, 0, s),
            }
        }
        _ => {
            if integral.is_empty() {
                return Err(NumericError::InvalidArgument);
            }

            (&b""[..], 0, s)
        }
    };

    Ok((
        Parts {
            sign,
            integral,
            fractional,
            exp,
        },
        s,
    ))
}

/// Packs one limb worth of raw digit values (not ASCII) into a limb.
#[inline]
fn read_numeric_digit(s: &[u8]) -> NumericDigit {
    debug_assert!(s.len() == DEC_DIGITS as usize);
    s.iter().fold(0, |limb, &b| limb * 10 + b as NumericDigit)
}

/// Builds a value from a bare literal. Surrounding whitespace and `NaN`
/// recognition are the caller's business; the unconsumed tail is returned
/// so the caller can reject trailing garbage.
fn parse_str(s: &[u8]) -> Result<(Numeric, &[u8]), NumericError> {
    let (
        Parts {
            sign,
            integral,
            fractional,
            exp,
        },
        s,
    ) = parse_parts(s)?;

    // The display scale counts the fractional digits as typed, shifted by
    // the exponent but never below zero.
    let dscale = (fractional.len() as i64 - exp as i64).max(0);
    if dscale > i16::MAX as i64 {
        return Err(NumericError::ValueOutOfRange);
    }
    let dscale = dscale as i32;

    if integral.iter().all(|&d| d == b'0') && fractional.iter().all(|&d| d == b'0') {
        return Ok((Numeric::zero_scaled(dscale), s));
    }

    // Decimal position of the most significant digit.
    let dweight = integral.len() as i64 + exp as i64 - 1;

    let weight = if dweight >= 0 {
        (dweight + 1 + DEC_DIGITS as i64 - 1) / DEC_DIGITS as i64 - 1
    } else {
        -((-dweight - 1) / DEC_DIGITS as i64 + 1)
    };
    if weight > i16::MAX as i64 || weight < i16::MIN as i64 {
        return Err(NumericError::ValueOutOfRange);
    }
    let weight = weight as i32;

    let offset = ((weight + 1) * DEC_DIGITS) as i64 - (dweight + 1);
    let ndigits = (integral.len() + fractional.len() + offset as usize + DEC_DIGITS as usize - 1)
        / DEC_DIGITS as usize;

    // Stage the raw digit values with a limb of zero padding on both ends,
    // so the grouping below can start and stop off the written digits.
    let mut dec_digits: Vec<u8> =
        Vec::with_capacity(integral.len() + fractional.len() + 2 * DEC_DIGITS as usize);
    dec_digits.resize(DEC_DIGITS as usize, 0);
    dec_digits.extend(integral.iter().map(|&b| b - b'0'));
    dec_digits.extend(fractional.iter().map(|&b| b - b'0'));
    dec_digits.resize(dec_digits.len() + DEC_DIGITS as usize, 0);

    let mut digits = Vec::with_capacity(ndigits);
    let start = (DEC_DIGITS as i64 - offset) as usize;
    for chunk in dec_digits[start..]
        .chunks_exact(DEC_DIGITS as usize)
        .take(ndigits)
    {
        digits.push(read_numeric_digit(chunk));
    }

    let mut numeric = Numeric::from_parts(sign, weight, dscale, digits);
    numeric.strip();
    Ok((numeric, s))
}

/// Full parsing entry point: trims whitespace on both ends, recognizes
/// `NaN`, and packages an ordinary literal into a stored value.
fn from_str(s: &str) -> Result<Numeric, NumericError> {
    let s = skip_whitespace(s.as_bytes());
    if s.is_empty() {
        return Err(NumericError::InvalidArgument);
    }

    let (is_nan, s) = take_nan(s);

    if is_nan {
        if s.iter().any(|n| !n.is_ascii_whitespace()) {
            return Err(NumericError::InvalidArgument);
        }

        Ok(Numeric::NAN)
    } else {
        let (n, s) = parse_str(s)?;

        if s.iter().any(|n| !n.is_ascii_whitespace()) {
            return Err(NumericError::InvalidArgument);
        }

        n.into_result()
    }
}

impl FromStr for Numeric {
    type Err = NumericError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parse_invalid<S: AsRef<str>>(s: S) {
        let result = s.as_ref().parse::<Numeric>();
        assert_eq!(result.unwrap_err(), NumericError::InvalidArgument);
    }

    fn assert_parse_out_of_range<S: AsRef<str>>(s: S) {
        let result = s.as_ref().parse::<Numeric>();
        assert_eq!(result.unwrap_err(), NumericError::ValueOutOfRange);
    }

    #[test]
    fn parse_error() {
        assert_parse_invalid("");
        assert_parse_invalid("   ");
        assert_parse_invalid("-");
        assert_parse_invalid("   -   ");
        assert_parse_invalid("-.");
        assert_parse_invalid("- 1");
        assert_parse_invalid("-NaN");
        assert_parse_invalid("NaN.");
        assert_parse_invalid("NaN1");
        assert_parse_invalid("   NaN   .   ");
        assert_parse_invalid("   NaN   1   ");
        assert_parse_invalid(".");
        assert_parse_invalid("   .   ");
        assert_parse_invalid("e");
        assert_parse_invalid("   e   ");
        assert_parse_invalid("-e");
        assert_parse_invalid("-1e");
        assert_parse_invalid("1e1.1");
        assert_parse_invalid("-1 e1");
        assert_parse_invalid("   x   ");
        assert_parse_invalid("1e1001");
        assert_parse_invalid("1e-1001");
        assert_parse_invalid("1e10000000000");
        assert_parse_invalid("1e2147483648");
        assert_parse_invalid("1e-2147483648");
    }

    #[test]
    fn parse_out_of_range() {
        // dscale beyond the 16-bit window
        let tiny = format!("0.{}1", "0".repeat(40000));
        assert_parse_out_of_range(tiny);
        // weight beyond the 16-bit window
        let huge = format!("1{}", "0".repeat(131072));
        assert_parse_out_of_range(huge);
    }

    fn assert_parse<S: AsRef<str>, V: AsRef<str>>(s: S, expected: V) {
        let numeric = s.as_ref().parse::<Numeric>().unwrap();
        assert_eq!(numeric.to_string(), expected.as_ref());
    }

    #[test]
    fn parse_nan() {
        assert_parse("NaN", "NaN");
        assert_parse("Nan", "NaN");
        assert_parse("NAN", "NaN");
        assert_parse("NAn", "NaN");
        assert_parse("naN", "NaN");
        assert_parse("nan", "NaN");
        assert_parse("nAN", "NaN");
        assert_parse("nAn", "NaN");
        assert_parse("   NaN   ", "NaN");
    }

    #[test]
    fn parse_integer() {
        assert_parse("0", "0");
        assert_parse("-0", "0");
        assert_parse("   -0   ", "0");
        assert_parse("00000.", "0");
        assert_parse("-00000.", "0");
        assert_parse("128", "128");
        assert_parse("-128", "-128");
        assert_parse("65536", "65536");
        assert_parse("-65536", "-65536");
        assert_parse("4294967296", "4294967296");
        assert_parse("-4294967296", "-4294967296");
        assert_parse("18446744073709551616", "18446744073709551616");
        assert_parse("-18446744073709551616", "-18446744073709551616");
        assert_parse(
            "340282366920938463463374607431768211456",
            "340282366920938463463374607431768211456",
        );
        assert_parse(
            "-340282366920938463463374607431768211456",
            "-340282366920938463463374607431768211456",
        );
        assert_parse("000000000123", "123");
        assert_parse("-000000000123", "-123");
    }

    #[test]
    fn parse_fraction() {
        assert_parse("0.0", "0.0");
        assert_parse("-0.0", "0.0");
        assert_parse("   -0.0   ", "0.0");
        assert_parse(".0", "0.0");
        assert_parse(".00000", "0.00000");
        assert_parse("-.0", "0.0");
        assert_parse("-.00000", "0.00000");
        assert_parse("128.128", "128.128");
        assert_parse("-128.128", "-128.128");
        assert_parse("65536.65536", "65536.65536");
        assert_parse("-65536.65536", "-65536.65536");
        assert_parse("4294967296.4294967296", "4294967296.4294967296");
        assert_parse("-4294967296.4294967296", "-4294967296.4294967296");
        assert_parse(
            "18446744073709551616.18446744073709551616",
            "18446744073709551616.18446744073709551616",
        );
        assert_parse(
            "340282366920938463463374607431768211456.340282366920938463463374607431768211456",
            "340282366920938463463374607431768211456.340282366920938463463374607431768211456",
        );
        assert_parse("000000000123.000000000123", "123.000000000123");
        assert_parse("-000000000123.000000000123", "-123.000000000123");
        assert_parse("0.120", "0.120");
        assert_parse("0.0001", "0.0001");
    }

    #[test]
    fn parse_scientific() {
        assert_parse("0e0", "0");
        assert_parse("-0E-0", "0");
        assert_parse("0000000000E0000000000", "0");
        assert_parse("-0000000000E-0000000000", "0");
        assert_parse("00000000001e0000000000", "1");
        assert_parse("-00000000001e-0000000000", "-1");
        assert_parse("00000000001e00000000001", "10");
        assert_parse("-00000000001e-00000000001", "-0.1");
        assert_parse("1e10", "10000000000");
        assert_parse("-1e-10", "-0.0000000001");
        assert_parse("0000001.23456000e3", "1234.56000");
        assert_parse("-0000001.23456000E-3", "-0.00123456000");
        assert_parse("0.00e2", "0");
        assert_parse("0.00e-2", "0.0000");
        assert_parse("1e1000", format!("1{}", "0".repeat(1000)));
    }

    #[test]
    fn parse_round_trip() {
        let cases = [
            "0",
            "0.120",
            "-12.345",
            "10000000000",
            "-0.0000000001",
            "123.000000000123",
        ];
        for s in cases {
            let parsed = s.parse::<Numeric>().unwrap();
            assert_eq!(parsed.to_string(), s);
            let reparsed = parsed.to_string().parse::<Numeric>().unwrap();
            assert_eq!(parsed, reparsed);
        }
        assert!("NaN".parse::<Numeric>().unwrap().is_nan());
    }
}
