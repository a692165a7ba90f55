//! Conversions between numeric values and primitive types.

use crate::error::NumericError;
use crate::numeric::{Numeric, NumericDigit, Sign, NBASE};
use stack_buf::StackVec;

/// Significant decimal digits guaranteed to survive an f64 round trip.
const DBL_DIG: usize = 15;
/// Significant decimal digits guaranteed to survive an f32 round trip.
const FLT_DIG: usize = 6;

/// Builds a numeric from a magnitude and a sign by repeated division
/// by `NBASE`. A u64 magnitude needs at most five limbs.
fn from_unsigned(mut uval: u64, neg: bool) -> Numeric {
    if uval == 0 {
        return Numeric::ZERO;
    }

    let mut buf: StackVec<NumericDigit, 5> = StackVec::new();
    while uval != 0 {
        buf.push((uval % NBASE as u64) as NumericDigit);
        uval /= NBASE as u64;
    }

    let weight = buf.len() as i32 - 1;
    let mut digits = Vec::with_capacity(buf.len());
    digits.extend(buf.iter().rev().copied());

    let mut n = Numeric::from_parts(if neg { Sign::Neg } else { Sign::Pos }, weight, 0, digits);
    n.strip();
    n
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Numeric {
                #[inline]
                fn from(val: $ty) -> Numeric {
                    from_unsigned((val as i64).unsigned_abs(), val < 0)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Numeric {
                #[inline]
                fn from(val: $ty) -> Numeric {
                    from_unsigned(val as u64, false)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl TryFrom<&Numeric> for i64 {
    type Error = NumericError;

    /// Rounds to the nearest integer, then accumulates limbs. NaN reports
    /// [`NumericError::InvalidArgument`], overflow
    /// [`NumericError::ValueOutOfRange`].
    fn try_from(value: &Numeric) -> Result<i64, NumericError> {
        if value.is_nan() {
            return Err(NumericError::InvalidArgument);
        }

        let mut rounded = value.clone();
        rounded.round_common(0);
        rounded.strip();

        if rounded.digits.is_empty() {
            return Ok(0);
        }

        // A stripped nonzero integer has weight + 1 digits before the
        // point, the trailing ones possibly elided.
        let neg = rounded.sign == Sign::Neg;
        let mut val: i64 = 0;
        for i in 0..=rounded.weight {
            let dig = if (i as usize) < rounded.digits.len() {
                rounded.digits[i as usize] as i64
            } else {
                0
            };
            // Accumulate with the sign applied so i64::MIN converts.
            val = val
                .checked_mul(NBASE as i64)
                .and_then(|v| if neg { v.checked_sub(dig) } else { v.checked_add(dig) })
                .ok_or(NumericError::ValueOutOfRange)?;
        }
        Ok(val)
    }
}

impl TryFrom<Numeric> for i64 {
    type Error = NumericError;

    #[inline]
    fn try_from(value: Numeric) -> Result<i64, NumericError> {
        i64::try_from(&value)
    }
}

impl TryFrom<&Numeric> for i32 {
    type Error = NumericError;

    fn try_from(value: &Numeric) -> Result<i32, NumericError> {
        let val = i64::try_from(value)?;
        i32::try_from(val).map_err(|_| NumericError::ValueOutOfRange)
    }
}

impl TryFrom<Numeric> for i32 {
    type Error = NumericError;

    #[inline]
    fn try_from(value: Numeric) -> Result<i32, NumericError> {
        i32::try_from(&value)
    }
}

/// Drops trailing zeroes of the mantissa in `d.dddd00e±x` notation, the
/// way `%g` formatting would.
fn trim_mantissa(s: &str) -> String {
    match s.find('e') {
        Some(epos) => {
            let (mantissa, exp) = s.split_at(epos);
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{}{}", mantissa, exp)
        }
        None => s.to_string(),
    }
}

impl TryFrom<f64> for Numeric {
    type Error = NumericError;

    /// Bridges through `DBL_DIG` significant digits of text. A float NaN
    /// becomes the numeric NaN; infinity has no numeric counterpart.
    fn try_from(value: f64) -> Result<Numeric, NumericError> {
        if value.is_nan() {
            return Ok(Numeric::NAN);
        }
        if value.is_infinite() {
            return Err(NumericError::ValueOutOfRange);
        }
        trim_mantissa(&format!("{:.*e}", DBL_DIG - 1, value)).parse()
    }
}

impl TryFrom<f32> for Numeric {
    type Error = NumericError;

    fn try_from(value: f32) -> Result<Numeric, NumericError> {
        if value.is_nan() {
            return Ok(Numeric::NAN);
        }
        if value.is_infinite() {
            return Err(NumericError::ValueOutOfRange);
        }
        trim_mantissa(&format!("{:.*e}", FLT_DIG - 1, value)).parse()
    }
}

impl TryFrom<&Numeric> for f64 {
    type Error = NumericError;

    /// Formats at the value's own display scale and reparses. A value too
    /// large for the f64 range reports [`NumericError::ValueOutOfRange`];
    /// NaN converts to the float NaN.
    fn try_from(value: &Numeric) -> Result<f64, NumericError> {
        let val: f64 = value
            .to_string()
            .parse()
            .map_err(|_| NumericError::InvalidArgument)?;
        if val.is_infinite() {
            return Err(NumericError::ValueOutOfRange);
        }
        Ok(val)
    }
}

impl TryFrom<&Numeric> for f32 {
    type Error = NumericError;

    fn try_from(value: &Numeric) -> Result<f32, NumericError> {
        let val: f32 = value
            .to_string()
            .parse()
            .map_err(|_| NumericError::InvalidArgument)?;
        if val.is_infinite() {
            return Err(NumericError::ValueOutOfRange);
        }
        Ok(val)
    }
}

impl Numeric {
    /// Float approximation for internal scale estimates; overflow saturates
    /// to infinity instead of failing, the callers clamp the result anyway.
    pub(crate) fn to_f64_lossy(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}
