//! Square root, exponential, logarithm and power.

use crate::arith::{add_common, div_common, div_fast_common, mul_common, select_div_scale, sub_common};
use crate::error::NumericError;
use crate::numeric::{
    Numeric, Sign, DEC_DIGITS, MAX_DISPLAY_SCALE, MAX_RESULT_SCALE, MIN_DISPLAY_SCALE,
    MIN_SIG_DIGITS, MUL_GUARD_DIGITS, NBASE, ONE, ONE_POINT_ONE, POINT_FIVE, POINT_NINE,
    POINT_ZERO_ONE, TEN, TWO,
};
use std::cmp::Ordering;

/// Newton's method square root at `rscale` fractional digits.
pub(crate) fn sqrt_common(arg: &Numeric, rscale: i32) -> Result<Numeric, NumericError> {
    let local_rscale = rscale + 8;

    match arg.cmp_common(&Numeric::ZERO) {
        Ordering::Equal => return Ok(Numeric::zero_scaled(rscale)),
        Ordering::Less => return Err(NumericError::InvalidArgument),
        Ordering::Greater => {}
    }

    // Initialize the result to the first guess: first limb and weight halved.
    let mut result = Numeric::from_parts(
        Sign::Pos,
        arg.weight / 2,
        0,
        vec![(arg.digits[0] / 2).max(1)],
    );
    let mut last_val = result.clone();

    loop {
        let val = div_fast_common(arg, &result, local_rscale, true)?;
        result = add_common(&result, &val);
        result = mul_common(&result, &POINT_FIVE, local_rscale);

        if last_val.cmp_common(&result) == Ordering::Equal {
            break;
        }
        last_val = result.clone();
    }

    result.round_common(rscale);
    result.strip();
    Ok(result)
}

/// Raises e to the power of `arg`.
///
/// Splits the argument as `e^x = e^xi * e^xf` so the Taylor series in
/// `exp_reduced` only ever sees a small input. Integer parts at or above
/// `3 * MAX_RESULT_SCALE` cannot be represented and are rejected.
pub(crate) fn exp_common(arg: &Numeric, rscale: i32) -> Result<Numeric, NumericError> {
    let mut x = arg.clone();
    let xneg = x.sign == Sign::Neg;
    if xneg {
        x.sign = Sign::Pos;
    }

    // Extract the integer part, removing it from x.
    let mut xi = 0i32;
    let mut consumed = 0usize;
    while x.weight >= 0 {
        xi *= NBASE;
        if consumed < x.digits.len() {
            xi += x.digits[consumed] as i32;
            consumed += 1;
        }
        x.weight -= 1;
        if xi >= MAX_RESULT_SCALE * 3 {
            return Err(NumericError::ValueOutOfRange);
        }
    }
    x.digits.drain(..consumed);

    let local_rscale = rscale + MUL_GUARD_DIGITS * 2;

    let mut result = exp_reduced(&x, local_rscale)?;

    // If there was an integer part, multiply by e^xi.
    if xi > 0 {
        let e = exp_reduced(&ONE, local_rscale)?;
        let e = power_int_common(&e, xi, local_rscale)?;
        result = mul_common(&e, &result, local_rscale);
    }

    // Compensate for the input sign, and round to the requested rscale.
    if xneg {
        result = div_fast_common(&ONE, &result, rscale, true)?;
    } else {
        result.round_common(rscale);
        result.strip();
    }
    Ok(result)
}

/// Raises e to the power of `x`, where `0 <= x < 1`.
fn exp_reduced(arg: &Numeric, rscale: i32) -> Result<Numeric, NumericError> {
    debug_assert!(arg.sign == Sign::Pos);

    let mut x = arg.clone();
    let mut local_rscale = rscale + 8;

    // Halve the input until it is no larger than 0.01, counting the
    // halvings; the result is squared back up the same number of times.
    let mut ndiv2 = 0;
    while x.cmp_common(&POINT_ZERO_ONE) == Ordering::Greater {
        ndiv2 += 1;
        local_rscale += 1;
        let mul_rscale = x.dscale + 1;
        x = mul_common(&x, &POINT_FIVE, mul_rscale);
    }

    // exp(x) = 1 + x + x^2/2! + x^3/3! + ...
    //
    // Given the limited range of x, the series converges quickly; it runs
    // until a term rounds away to no limbs at all.
    let mut result = add_common(&ONE, &x);
    let mut xpow = x.clone();
    let mut ifac = ONE.clone();
    let mut ni = ONE.clone();

    loop {
        ni = add_common(&ni, &ONE);
        xpow = mul_common(&xpow, &x, local_rscale);
        ifac = mul_common(&ifac, &ni, 0);
        let elem = div_fast_common(&xpow, &ifac, local_rscale, true)?;
        if elem.digits.is_empty() {
            break;
        }
        result = add_common(&result, &elem);
    }

    // Compensate for the argument range reduction.
    for _ in 0..ndiv2 {
        result = mul_common(&result, &result, local_rscale);
    }
    Ok(result)
}

/// Natural logarithm at `rscale` fractional digits. The argument must be
/// strictly positive.
pub(crate) fn ln_common(arg: &Numeric, rscale: i32) -> Result<Numeric, NumericError> {
    let mut local_rscale = rscale + 8;

    match arg.cmp_common(&Numeric::ZERO) {
        Ordering::Equal | Ordering::Less => return Err(NumericError::InvalidArgument),
        Ordering::Greater => {}
    }

    let mut x = arg.clone();
    let mut fact = TWO.clone();

    // Reduce the input into the interval (0.9, 1.1); each square root
    // halves the logarithm, so double the factor to compensate.
    while x.cmp_common(&POINT_NINE) != Ordering::Greater {
        local_rscale += 1;
        x = sqrt_common(&x, local_rscale)?;
        fact = mul_common(&fact, &TWO, 0);
    }
    while x.cmp_common(&ONE_POINT_ONE) != Ordering::Less {
        local_rscale += 1;
        x = sqrt_common(&x, local_rscale)?;
        fact = mul_common(&fact, &TWO, 0);
    }

    // ln(x) = 2 * (z + z^3/3 + z^5/5 + ...) with z = (x-1)/(x+1);
    // the leading factor of 2 is already folded into fact.
    let num = sub_common(&x, &ONE);
    let den = add_common(&x, &ONE);
    let z = div_fast_common(&num, &den, local_rscale, true)?;
    let zz = mul_common(&z, &z, local_rscale);

    let mut result = z.clone();
    let mut term = z;
    let mut ni = ONE.clone();

    // Run the series until a term vanishes or drops far enough below the
    // accumulated sum to stop mattering.
    loop {
        ni = add_common(&ni, &TWO);
        term = mul_common(&term, &zz, local_rscale);
        let elem = div_fast_common(&term, &ni, local_rscale, true)?;
        if elem.digits.is_empty() {
            break;
        }
        result = add_common(&result, &elem);
        if elem.weight < result.weight - local_rscale * 2 / DEC_DIGITS {
            break;
        }
    }

    // Compensate for the argument range reduction.
    result = mul_common(&result, &fact, local_rscale);
    result.round_common(rscale);
    result.strip();
    Ok(result)
}

/// Logarithm of `num` in the base `base`, as `ln(num) / ln(base)`.
pub(crate) fn log_common(base: &Numeric, num: &Numeric) -> Result<Numeric, NumericError> {
    let rscale = ln_scale(num)
        .max(base.dscale)
        .max(num.dscale)
        .max(MIN_DISPLAY_SCALE)
        .min(MAX_DISPLAY_SCALE);
    let local_rscale = rscale + 8;

    let mut ln_base = ln_common(base, local_rscale)?;
    let mut ln_num = ln_common(num, local_rscale)?;
    ln_base.dscale = rscale;
    ln_num.dscale = rscale;

    let rscale = select_div_scale(&ln_num, &ln_base);
    div_fast_common(&ln_num, &ln_base, rscale, true)
}

/// Result scale that keeps `MIN_SIG_DIGITS` significant digits in a
/// logarithm of `arg`, judged from the digit count before the point.
fn ln_scale(arg: &Numeric) -> i32 {
    let dec_digits = (arg.weight + 1) * DEC_DIGITS;
    if dec_digits > 1 {
        MIN_SIG_DIGITS - ((dec_digits - 1) as f64).log10() as i32
    } else if dec_digits < 1 {
        MIN_SIG_DIGITS - ((1 - dec_digits) as f64).log10() as i32
    } else {
        MIN_SIG_DIGITS
    }
}

/// Raises `base` to the power of `exp`.
pub(crate) fn power_common(base: &Numeric, exp: &Numeric) -> Result<Numeric, NumericError> {
    // An exponent with no fractional limbs that fits a machine integer
    // takes the binary-exponentiation fast path.
    if exp.digits.is_empty() || exp.digits.len() as i32 <= exp.weight + 1 {
        if let Ok(expval64) = i64::try_from(exp) {
            if let Ok(expval) = i32::try_from(expval64) {
                let rscale = MIN_SIG_DIGITS
                    .max(base.dscale)
                    .max(MIN_DISPLAY_SCALE)
                    .min(MAX_DISPLAY_SCALE);
                return power_int_common(base, expval, rscale);
            }
        }
    }

    // A zero base with a (necessarily positive) non-integer exponent is
    // zero; handling it here keeps ln() out of trouble.
    if base.cmp_common(&Numeric::ZERO) == Ordering::Equal {
        return Ok(Numeric::zero_scaled(MIN_SIG_DIGITS));
    }

    // ln needs extra accuracy here, since the exponent multiplies its error.
    let rscale = (ln_scale(base) + MIN_SIG_DIGITS)
        .max(base.dscale * 2)
        .max(exp.dscale * 2)
        .max(MIN_DISPLAY_SCALE * 2)
        .min(MAX_DISPLAY_SCALE * 2);
    let local_rscale = rscale + 8;

    let ln_base = ln_common(base, local_rscale)?;
    let ln_num = mul_common(&ln_base, exp, local_rscale);

    // log10(result) = x * ln(base) * log10(e) approximates the decimal
    // weight of the result; use it to pick the output scale.
    let val = ln_num.to_f64_lossy() * 0.434_294_481_903_252;
    let val = val
        .max(-(MAX_RESULT_SCALE as f64))
        .min(MAX_RESULT_SCALE as f64);
    let rscale = (MIN_SIG_DIGITS - val as i32)
        .max(base.dscale)
        .max(exp.dscale)
        .max(MIN_DISPLAY_SCALE)
        .min(MAX_DISPLAY_SCALE);

    exp_common(&ln_num, rscale)
}

/// Raises `base` to the power of a machine integer by squaring.
pub(crate) fn power_int_common(
    base: &Numeric,
    exp: i32,
    rscale: i32,
) -> Result<Numeric, NumericError> {
    match exp {
        0 => {
            // 0 ^ 0 is 1 by SQL convention.
            let mut result = ONE.clone();
            result.dscale = rscale;
            return Ok(result);
        }
        1 => {
            let mut result = base.clone();
            result.round_common(rscale);
            result.strip();
            return Ok(result);
        }
        -1 => return div_common(&ONE, base, rscale, true),
        2 => return Ok(mul_common(base, base, rscale)),
        _ => {}
    }

    // The general case multiplies according to the bit pattern of the
    // exponent, with some extra precision in the intermediates.
    let neg = exp < 0;
    let mut e = exp.unsigned_abs();

    let local_rscale = rscale + MUL_GUARD_DIGITS * 2;

    let mut base_prod = base.clone();
    let mut result = if e & 1 == 1 { base.clone() } else { ONE.clone() };

    loop {
        e >>= 1;
        if e == 0 {
            break;
        }
        base_prod = mul_common(&base_prod, &base_prod, local_rscale);
        if e & 1 == 1 {
            result = mul_common(&base_prod, &result, local_rscale);
        }
    }

    // Compensate for the input sign, and round to the requested rscale.
    if neg {
        div_fast_common(&ONE, &result, rscale, true)
    } else {
        result.round_common(rscale);
        result.strip();
        Ok(result)
    }
}

impl Numeric {
    /// Square root. Negative input reports
    /// [`NumericError::InvalidArgument`]; NaN propagates.
    pub fn sqrt(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::NAN);
        }
        let sweight = (self.weight + 1) * DEC_DIGITS / 2 - 1;
        let rscale = (MIN_SIG_DIGITS - sweight)
            .max(self.dscale)
            .max(MIN_DISPLAY_SCALE)
            .min(MAX_DISPLAY_SCALE);
        sqrt_common(self, rscale)?.into_result()
    }

    /// Raises e to the power of `self`.
    pub fn exp(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::NAN);
        }
        // The decimal weight of e^x is about x * log10(e).
        let val = self.to_f64_lossy() * 0.434_294_481_903_252;
        let val = val
            .max(-(MAX_RESULT_SCALE as f64))
            .min(MAX_RESULT_SCALE as f64);
        let rscale = (MIN_SIG_DIGITS - val as i32)
            .max(self.dscale)
            .max(MIN_DISPLAY_SCALE)
            .min(MAX_DISPLAY_SCALE);
        exp_common(self, rscale)?.into_result()
    }

    /// Natural logarithm. Zero or negative input reports
    /// [`NumericError::InvalidArgument`]; NaN propagates.
    pub fn ln(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::NAN);
        }
        let rscale = ln_scale(self)
            .max(self.dscale)
            .max(MIN_DISPLAY_SCALE)
            .min(MAX_DISPLAY_SCALE);
        ln_common(self, rscale)?.into_result()
    }

    /// Base-10 logarithm.
    pub fn log10(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::NAN);
        }
        log_common(&TEN, self)?.into_result()
    }

    /// Logarithm of `self` in the given base.
    pub fn log(&self, base: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || base.is_nan() {
            return Ok(Numeric::NAN);
        }
        log_common(base, self)?.into_result()
    }

    /// Raises `self` to the power of `exp`. Zero to a negative power and
    /// a negative base with a non-integer exponent report
    /// [`NumericError::InvalidArgument`]; NaN propagates.
    pub fn pow(&self, exp: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || exp.is_nan() {
            return Ok(Numeric::NAN);
        }
        if self.is_zero() && exp.cmp_common(&Numeric::ZERO) == Ordering::Less {
            return Err(NumericError::InvalidArgument);
        }
        if self.cmp_common(&Numeric::ZERO) == Ordering::Less
            && exp.cmp_common(&exp.trunc(0)) != Ordering::Equal
        {
            return Err(NumericError::InvalidArgument);
        }
        power_common(self, exp)?.into_result()
    }
}
