//! Arithmetic primitives over numeric values.

use crate::error::NumericError;
use crate::numeric::{
    Numeric, NumericDigit, Sign, DEC_DIGITS, DIV_GUARD_DIGITS, HALF_NBASE, MAX_DISPLAY_SCALE,
    MIN_DISPLAY_SCALE, MIN_SIG_DIGITS, MUL_GUARD_DIGITS, NBASE,
};
use std::cmp::Ordering;

/// Adds the absolute values of `var1` and `var2`. The caller decides the
/// sign of the result.
pub(crate) fn add_abs(var1: &Numeric, var2: &Numeric) -> Numeric {
    let res_weight = var1.weight.max(var2.weight) + 1;
    let res_dscale = var1.dscale.max(var2.dscale);

    // Note: here we are figuring rscale in base-NBASE digits.
    let rscale1 = var1.digits.len() as i32 - var1.weight - 1;
    let rscale2 = var2.digits.len() as i32 - var2.weight - 1;
    let res_rscale = rscale1.max(rscale2);

    let res_ndigits = (res_rscale + res_weight + 1).max(1);
    let mut res_digits = vec![0 as NumericDigit; res_ndigits as usize];

    let mut carry = 0i32;
    let mut i1 = res_rscale + var1.weight + 1;
    let mut i2 = res_rscale + var2.weight + 1;
    for i in (0..res_ndigits as usize).rev() {
        i1 -= 1;
        i2 -= 1;
        if i1 >= 0 && (i1 as usize) < var1.digits.len() {
            carry += var1.digits[i1 as usize] as i32;
        }
        if i2 >= 0 && (i2 as usize) < var2.digits.len() {
            carry += var2.digits[i2 as usize] as i32;
        }

        if carry >= NBASE {
            res_digits[i] = (carry - NBASE) as NumericDigit;
            carry = 1;
        } else {
            res_digits[i] = carry as NumericDigit;
            carry = 0;
        }
    }
    debug_assert_eq!(carry, 0); // else we failed to allow for carry out

    let mut result = Numeric::from_parts(Sign::Pos, res_weight, res_dscale, res_digits);
    result.strip();
    result
}

/// Subtracts the absolute value of `var2` from that of `var1`, which must
/// be the larger. The caller decides the sign of the result.
pub(crate) fn sub_abs(var1: &Numeric, var2: &Numeric) -> Numeric {
    let res_weight = var1.weight;
    let res_dscale = var1.dscale.max(var2.dscale);

    let rscale1 = var1.digits.len() as i32 - var1.weight - 1;
    let rscale2 = var2.digits.len() as i32 - var2.weight - 1;
    let res_rscale = rscale1.max(rscale2);

    let res_ndigits = (res_rscale + res_weight + 1).max(1);
    let mut res_digits = vec![0 as NumericDigit; res_ndigits as usize];

    let mut borrow = 0i32;
    let mut i1 = res_rscale + var1.weight + 1;
    let mut i2 = res_rscale + var2.weight + 1;
    for i in (0..res_ndigits as usize).rev() {
        i1 -= 1;
        i2 -= 1;
        if i1 >= 0 && (i1 as usize) < var1.digits.len() {
            borrow += var1.digits[i1 as usize] as i32;
        }
        if i2 >= 0 && (i2 as usize) < var2.digits.len() {
            borrow -= var2.digits[i2 as usize] as i32;
        }

        if borrow < 0 {
            res_digits[i] = (borrow + NBASE) as NumericDigit;
            borrow = -1;
        } else {
            res_digits[i] = borrow as NumericDigit;
            borrow = 0;
        }
    }
    debug_assert_eq!(borrow, 0); // else caller gave us var1 < var2

    let mut result = Numeric::from_parts(Sign::Pos, res_weight, res_dscale, res_digits);
    result.strip();
    result
}

/// Full addition of two signed values.
pub(crate) fn add_common(var1: &Numeric, var2: &Numeric) -> Numeric {
    match (var1.sign, var2.sign) {
        (Sign::Nan, _) | (_, Sign::Nan) => Numeric::NAN,
        (Sign::Pos, Sign::Pos) => add_abs(var1, var2),
        (Sign::Neg, Sign::Neg) => {
            let mut result = add_abs(var1, var2);
            result.sign = Sign::Neg;
            result
        }
        (Sign::Pos, Sign::Neg) => match var1.cmp_abs(var2) {
            Ordering::Equal => Numeric::zero_scaled(var1.dscale.max(var2.dscale)),
            Ordering::Greater => sub_abs(var1, var2),
            Ordering::Less => {
                let mut result = sub_abs(var2, var1);
                result.sign = Sign::Neg;
                result
            }
        },
        (Sign::Neg, Sign::Pos) => match var1.cmp_abs(var2) {
            Ordering::Equal => Numeric::zero_scaled(var1.dscale.max(var2.dscale)),
            Ordering::Greater => {
                let mut result = sub_abs(var1, var2);
                result.sign = Sign::Neg;
                result
            }
            Ordering::Less => sub_abs(var2, var1),
        },
    }
}

/// Full subtraction of two signed values.
pub(crate) fn sub_common(var1: &Numeric, var2: &Numeric) -> Numeric {
    match (var1.sign, var2.sign) {
        (Sign::Nan, _) | (_, Sign::Nan) => Numeric::NAN,
        (Sign::Pos, Sign::Neg) => add_abs(var1, var2),
        (Sign::Neg, Sign::Pos) => {
            let mut result = add_abs(var1, var2);
            result.sign = Sign::Neg;
            result
        }
        (Sign::Pos, Sign::Pos) => match var1.cmp_abs(var2) {
            Ordering::Equal => Numeric::zero_scaled(var1.dscale.max(var2.dscale)),
            Ordering::Greater => sub_abs(var1, var2),
            Ordering::Less => {
                let mut result = sub_abs(var2, var1);
                result.sign = Sign::Neg;
                result
            }
        },
        (Sign::Neg, Sign::Neg) => match var1.cmp_abs(var2) {
            Ordering::Equal => Numeric::zero_scaled(var1.dscale.max(var2.dscale)),
            Ordering::Greater => {
                let mut result = sub_abs(var1, var2);
                result.sign = Sign::Neg;
                result
            }
            Ordering::Less => sub_abs(var2, var1),
        },
    }
}

/// Schoolbook multiplication, truncated to produce no more than
/// `rscale + MUL_GUARD_DIGITS` decimal digits after the point.
pub(crate) fn mul_common(var1: &Numeric, var2: &Numeric, rscale: i32) -> Numeric {
    if var1.sign == Sign::Nan || var2.sign == Sign::Nan {
        return Numeric::NAN;
    }

    // Arrange for var1 to be the shorter of the two numbers; the inner loop
    // runs over var2 and the accumulator needs fewer normalization sweeps.
    let (var1, var2) = if var1.digits.len() > var2.digits.len() {
        (var2, var1)
    } else {
        (var1, var2)
    };

    let var1ndigits = var1.digits.len() as i32;
    let var2ndigits = var2.digits.len() as i32;

    if var1ndigits == 0 || var2ndigits == 0 {
        return Numeric::zero_scaled(rscale);
    }

    let res_sign = if var1.sign == var2.sign { Sign::Pos } else { Sign::Neg };
    let res_weight = var1.weight + var2.weight + 2;

    // If the exact result would have more than rscale fractional digits,
    // truncate the computation with MUL_GUARD_DIGITS guard digits: input
    // digits that could only affect positions right of that are ignored.
    let maxdigits = res_weight + 1 + (rscale + DEC_DIGITS - 1) / DEC_DIGITS + MUL_GUARD_DIGITS;
    let res_ndigits = (var1ndigits + var2ndigits + 1).min(maxdigits);

    if res_ndigits < 3 {
        // All input digits will be ignored; so is the result.
        return Numeric::zero_scaled(rscale);
    }

    // The accumulator holds digit products before carry propagation; a
    // sweep is forced before any add could overflow it.
    let mut dig = vec![0i32; res_ndigits as usize];
    let mut maxdig = 0i32;

    // Digit i1 of var1 and digit i2 of var2 land in accumulator position
    // i1 + i2 + 2, so only digits with i1 <= res_ndigits - 3 contribute.
    for i1 in (0..=(var1ndigits - 1).min(res_ndigits - 3)).rev() {
        let var1digit = var1.digits[i1 as usize] as i32;
        if var1digit == 0 {
            continue;
        }

        // Time to normalize?
        maxdig += var1digit;
        if maxdig > (i32::MAX - i32::MAX / NBASE) / (NBASE - 1) {
            let mut carry = 0i32;
            for i in (0..res_ndigits as usize).rev() {
                let mut newdig = dig[i] + carry;
                if newdig >= NBASE {
                    carry = newdig / NBASE;
                    newdig -= carry * NBASE;
                } else {
                    carry = 0;
                }
                dig[i] = newdig;
            }
            debug_assert_eq!(carry, 0);
            maxdig = 1 + var1digit;
        }

        let i2_top = (var2ndigits - 1).min(res_ndigits - i1 - 3);
        for i2 in (0..=i2_top).rev() {
            dig[(i1 + i2 + 2) as usize] += var1digit * var2.digits[i2 as usize] as i32;
        }
    }

    // Final carry propagation, combined with storing the result digits.
    let mut res_digits = vec![0 as NumericDigit; res_ndigits as usize];
    let mut carry = 0i32;
    for i in (0..res_ndigits as usize).rev() {
        let mut newdig = dig[i] + carry;
        if newdig >= NBASE {
            carry = newdig / NBASE;
            newdig -= carry * NBASE;
        } else {
            carry = 0;
        }
        res_digits[i] = newdig as NumericDigit;
    }
    debug_assert_eq!(carry, 0);

    let mut result = Numeric::from_parts(res_sign, res_weight, 0, res_digits);
    result.round_common(rscale);
    result.strip();
    result
}

/// Exact long division (Knuth volume 2, Algorithm 4.3.1D), producing the
/// quotient at `rscale` fractional digits, rounded or truncated.
pub(crate) fn div_common(
    var1: &Numeric,
    var2: &Numeric,
    rscale: i32,
    round: bool,
) -> Result<Numeric, NumericError> {
    let var1ndigits = var1.digits.len() as i32;
    let var2ndigits = var2.digits.len() as i32;

    if var2ndigits == 0 {
        return Err(NumericError::DivisionByZero);
    }
    if var1ndigits == 0 {
        return Ok(Numeric::zero_scaled(rscale));
    }

    let res_sign = if var1.sign == var2.sign { Sign::Pos } else { Sign::Neg };
    let res_weight = var1.weight - var2.weight;

    // The number of accurate result digits we need to produce; one more
    // when rounding, to decide the final digit.
    let mut res_ndigits = res_weight + 1 + (rscale + DEC_DIGITS - 1) / DEC_DIGITS;
    res_ndigits = res_ndigits.max(1);
    if round {
        res_ndigits += 1;
    }

    // The working dividend needs res_ndigits + var2ndigits digits, but at
    // least var1ndigits so all of var1 can be loaded. dividend[0] is an
    // extra digit position left for the normalization carry; divisor[0]
    // likewise stays zero.
    let div_ndigits = (res_ndigits + var2ndigits).max(var1ndigits);

    let mut dividend = vec![0 as NumericDigit; div_ndigits as usize + 1];
    let mut divisor = vec![0 as NumericDigit; var2ndigits as usize + 1];
    dividend[1..=var1ndigits as usize].copy_from_slice(&var1.digits);
    divisor[1..=var2ndigits as usize].copy_from_slice(&var2.digits);

    let mut res_digits = vec![0 as NumericDigit; res_ndigits as usize];

    if var2ndigits == 1 {
        // If there's only a single divisor digit, we can use a fast path
        // (cf. Knuth section 4.3.1 exercise 16).
        let divisor1 = divisor[1] as i32;
        let mut carry = 0i32;
        for i in 0..res_ndigits as usize {
            carry = carry * NBASE + dividend[i + 1] as i32;
            res_digits[i] = (carry / divisor1) as NumericDigit;
            carry %= divisor1;
        }
    } else {
        // We need the first divisor digit to be >= NBASE/2. If it isn't,
        // make it so by scaling up both the divisor and dividend by the
        // factor "d".
        if (divisor[1] as i32) < HALF_NBASE {
            let d = NBASE / (divisor[1] as i32 + 1);

            let mut carry = 0i32;
            for i in (1..=var2ndigits as usize).rev() {
                carry += divisor[i] as i32 * d;
                divisor[i] = (carry % NBASE) as NumericDigit;
                carry /= NBASE;
            }
            debug_assert_eq!(carry, 0);

            // At this point only var1ndigits of dividend can be nonzero.
            carry = 0;
            for i in (0..=var1ndigits as usize).rev() {
                carry += dividend[i] as i32 * d;
                dividend[i] = (carry % NBASE) as NumericDigit;
                carry /= NBASE;
            }
            debug_assert_eq!(carry, 0);
            debug_assert!(divisor[1] as i32 >= HALF_NBASE);
        }
        // First 2 divisor digits are at least NBASE/2, else D will fail.
        let divisor1 = divisor[1] as i32;
        let divisor2 = divisor[2] as i32;

        // Each iteration produces the j'th quotient digit by dividing
        // dividend[j .. j + var2ndigits] by the divisor.
        for j in 0..res_ndigits as usize {
            // Estimate quotient digit from the first two dividend digits.
            let next2digits = dividend[j] as i32 * NBASE + dividend[j + 1] as i32;

            // If next2digits are 0, the quotient digit must be 0 and there
            // is no need to adjust the working dividend.
            if next2digits == 0 {
                res_digits[j] = 0;
                continue;
            }

            let mut qhat = if dividend[j] as i32 == divisor1 {
                NBASE - 1
            } else {
                next2digits / divisor1
            };

            // Adjust quotient digit if it's too large. Knuth proves that
            // after this step, the quotient digit will be either correct
            // or just one too large. It's OK to use dividend[j + 2] here
            // because the divisor length is at least 2.
            while divisor2 * qhat > (next2digits - qhat * divisor1) * NBASE + dividend[j + 2] as i32 {
                qhat -= 1;
            }

            // Nothing more to do when the quotient digit is 0.
            if qhat > 0 {
                // Multiply the divisor by qhat, and subtract that from the
                // working dividend. "carry" tracks the multiplication,
                // "borrow" the subtraction.
                let mut carry = 0i32;
                let mut borrow = 0i32;
                for i in (0..=var2ndigits as usize).rev() {
                    carry += divisor[i] as i32 * qhat;
                    borrow -= carry % NBASE;
                    carry /= NBASE;
                    borrow += dividend[j + i] as i32;
                    if borrow < 0 {
                        dividend[j + i] = (borrow + NBASE) as NumericDigit;
                        borrow = -1;
                    } else {
                        dividend[j + i] = borrow as NumericDigit;
                        borrow = 0;
                    }
                }
                debug_assert_eq!(carry, 0);

                // A borrow out of the top dividend digit means qhat was one
                // too large after all; decrement it and add the divisor
                // back into the working dividend.
                if borrow != 0 {
                    qhat -= 1;
                    let mut carry = 0i32;
                    for i in (0..=var2ndigits as usize).rev() {
                        carry += dividend[j + i] as i32 + divisor[i] as i32;
                        if carry >= NBASE {
                            dividend[j + i] = (carry - NBASE) as NumericDigit;
                            carry = 1;
                        } else {
                            dividend[j + i] = carry as NumericDigit;
                            carry = 0;
                        }
                    }
                    // The carry out here cancels the borrow above.
                    debug_assert_eq!(carry, 1);
                }
            }

            res_digits[j] = qhat as NumericDigit;
        }
    }

    let mut result = Numeric::from_parts(res_sign, res_weight, 0, res_digits);
    if round {
        result.round_common(rscale);
    } else {
        result.trunc_common(rscale);
    }
    result.strip();
    Ok(result)
}

#[inline]
fn estimate_qdigit(div: &[i32], qi: usize, last: usize, fdivisorinverse: f64) -> i32 {
    let mut fdividend = div[qi] as f64;
    for i in 1..4 {
        fdividend *= NBASE as f64;
        if qi + i <= last {
            fdividend += div[qi + i] as f64;
        }
    }
    let fquotient = fdividend * fdivisorinverse;
    // truncate towards -infinity
    if fquotient >= 0.0 {
        fquotient as i32
    } else {
        fquotient as i32 - 1
    }
}

/// Fast approximate division. Each quotient digit is estimated with
/// float arithmetic from the top four limbs of the working dividend and
/// divisor; a final carry pass mops up the estimation error. The last
/// couple of guard digits can be off, so this is only used inside
/// self-scaling computations that round them away.
pub(crate) fn div_fast_common(
    var1: &Numeric,
    var2: &Numeric,
    rscale: i32,
    round: bool,
) -> Result<Numeric, NumericError> {
    let var1ndigits = var1.digits.len() as i32;
    let var2ndigits = var2.digits.len() as i32;

    if var2ndigits == 0 {
        return Err(NumericError::DivisionByZero);
    }
    if var1ndigits == 0 {
        return Ok(Numeric::zero_scaled(rscale));
    }

    let res_sign = if var1.sign == var2.sign { Sign::Pos } else { Sign::Neg };
    let res_weight = var1.weight - var2.weight + 1;

    // The number of accurate result digits we need to produce, plus guard
    // digits for roundoff error.
    let mut div_ndigits = res_weight + 1 + (rscale + DEC_DIGITS - 1) / DEC_DIGITS;
    div_ndigits += DIV_GUARD_DIGITS;
    div_ndigits = div_ndigits.max(DIV_GUARD_DIGITS).max(var1ndigits);

    // div[] starts as one zero digit followed by the dividend; each step
    // replaces one dividend position with a quotient digit estimate.
    let last = div_ndigits as usize;
    let mut div = vec![0i32; last + 1];
    for i in 0..var1ndigits as usize {
        div[i + 1] = var1.digits[i] as i32;
    }

    let mut fdivisor = var2.digits[0] as f64;
    for i in 1..4 {
        fdivisor *= NBASE as f64;
        if i < var2ndigits {
            fdivisor += var2.digits[i as usize] as f64;
        }
    }
    let fdivisorinverse = 1.0 / fdivisor;

    // maxdiv bounds the absolute value of any div[] entry, counted in
    // units of NBASE-1; carries are propagated before an entry could
    // overflow, keeping the propagation pass itself overflow-safe too.
    let mut maxdiv = 1i32;

    for qi in 0..last {
        let mut qdigit = estimate_qdigit(&div, qi, last, fdivisorinverse);
        if qdigit != 0 {
            // Do we need to normalize now?
            maxdiv += qdigit.abs();
            if maxdiv > (i32::MAX - i32::MAX / NBASE - 1) / (NBASE - 1) {
                let mut carry = 0i32;
                for i in ((qi + 1)..=last).rev() {
                    let mut newdig = div[i] + carry;
                    if newdig < 0 {
                        carry = -((-newdig - 1) / NBASE) - 1;
                        newdig -= carry * NBASE;
                    } else if newdig >= NBASE {
                        carry = newdig / NBASE;
                        newdig -= carry * NBASE;
                    } else {
                        carry = 0;
                    }
                    div[i] = newdig;
                }
                div[qi] += carry;

                // Everything but div[qi] is now in 0..NBASE; dividend
                // digits above qi are all zero already.
                maxdiv = (div[qi].abs() / (NBASE - 1)).max(1);

                // Recompute the quotient digit since new info may have
                // propagated into the top four dividend digits.
                qdigit = estimate_qdigit(&div, qi, last, fdivisorinverse);
                maxdiv += qdigit.abs();
            }

            // Subtract off the appropriate multiple of the divisor.
            if qdigit != 0 {
                let istop = var2ndigits.min(div_ndigits - qi as i32 + 1) as usize;
                for i in 0..istop {
                    div[qi + i] -= qdigit * var2.digits[i] as i32;
                }
            }
        }

        // The dividend digit we are about to replace might still be
        // nonzero. Fold it into the next digit position; this nearly
        // cancels with the subtraction above, so it cannot overflow.
        div[qi + 1] += div[qi] * NBASE;
        div[qi] = qdigit;
    }

    // Approximate and store the last quotient digit.
    let mut fdividend = div[last] as f64;
    for _ in 1..4 {
        fdividend *= NBASE as f64;
    }
    let fquotient = fdividend * fdivisorinverse;
    div[last] = if fquotient >= 0.0 {
        fquotient as i32
    } else {
        fquotient as i32 - 1
    };

    // Final carry propagation pass, combined with storing the result
    // digits. This is still done at full precision with guard digits.
    let mut res_digits = vec![0 as NumericDigit; last + 1];
    let mut carry = 0i32;
    for i in (0..=last).rev() {
        let mut newdig = div[i] + carry;
        if newdig < 0 {
            carry = -((-newdig - 1) / NBASE) - 1;
            newdig -= carry * NBASE;
        } else if newdig >= NBASE {
            carry = newdig / NBASE;
            newdig -= carry * NBASE;
        } else {
            carry = 0;
        }
        res_digits[i] = newdig as NumericDigit;
    }
    debug_assert_eq!(carry, 0);

    let mut result = Numeric::from_parts(res_sign, res_weight, 0, res_digits);
    if round {
        result.round_common(rscale);
    } else {
        result.trunc_common(rscale);
    }
    result.strip();
    Ok(result)
}

/// Selects the result scale of a division: at least `MIN_SIG_DIGITS`
/// significant digits, and no less than either input's display scale.
pub(crate) fn select_div_scale(var1: &Numeric, var2: &Numeric) -> i32 {
    // Get the actual (normalized) weight and first digit of each input.
    let mut weight1 = 0;
    let mut firstdigit1 = 0i32;
    for (i, &d) in var1.digits.iter().enumerate() {
        if d != 0 {
            firstdigit1 = d as i32;
            weight1 = var1.weight - i as i32;
            break;
        }
    }

    let mut weight2 = 0;
    let mut firstdigit2 = 0i32;
    for (i, &d) in var2.digits.iter().enumerate() {
        if d != 0 {
            firstdigit2 = d as i32;
            weight2 = var2.weight - i as i32;
            break;
        }
    }

    // Estimate the quotient weight; if the two first digits are equal,
    // assume var1 is the smaller.
    let mut qweight = weight1 - weight2;
    if firstdigit1 <= firstdigit2 {
        qweight -= 1;
    }

    let rscale = MIN_SIG_DIGITS - qweight * DEC_DIGITS;
    rscale
        .max(var1.dscale)
        .max(var2.dscale)
        .max(MIN_DISPLAY_SCALE)
        .min(MAX_DISPLAY_SCALE)
}

/// `mod(x, y) = x - trunc(x / y) * y`; the truncating division gives the
/// quotient directly.
pub(crate) fn mod_common(var1: &Numeric, var2: &Numeric) -> Result<Numeric, NumericError> {
    let tmp = div_common(var1, var2, 0, false)?;
    let tmp = mul_common(var2, &tmp, var2.dscale);
    Ok(sub_common(var1, &tmp))
}

impl Numeric {
    /// Adds two values. NaN propagates.
    pub fn checked_add(&self, other: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || other.is_nan() {
            return Ok(Numeric::NAN);
        }
        add_common(self, other).into_result()
    }

    /// Subtracts `other` from `self`. NaN propagates.
    pub fn checked_sub(&self, other: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || other.is_nan() {
            return Ok(Numeric::NAN);
        }
        sub_common(self, other).into_result()
    }

    /// Multiplies two values at the exact product scale. NaN propagates.
    pub fn checked_mul(&self, other: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || other.is_nan() {
            return Ok(Numeric::NAN);
        }
        mul_common(self, other, self.dscale + other.dscale).into_result()
    }

    /// Divides `self` by `other`, rounding to a scale that delivers at
    /// least 16 significant digits and no less than either input's scale.
    pub fn checked_div(&self, other: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || other.is_nan() {
            return Ok(Numeric::NAN);
        }
        let rscale = select_div_scale(self, other);
        div_common(self, other, rscale, true)?.into_result()
    }

    /// Divides `self` by `other`, truncating the quotient toward zero at
    /// the decimal point.
    pub fn checked_div_trunc(&self, other: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || other.is_nan() {
            return Ok(Numeric::NAN);
        }
        div_common(self, other, 0, false)?.into_result()
    }

    /// Remainder of the truncating division; the result keeps the sign of
    /// the dividend.
    pub fn checked_rem(&self, other: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || other.is_nan() {
            return Ok(Numeric::NAN);
        }
        mod_common(self, other)?.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumericError;

    fn n(s: &str) -> Numeric {
        s.parse::<Numeric>().unwrap()
    }

    macro_rules! assert_op {
        ($left:expr, $op:ident, $right:expr, $expected:expr) => {{
            let l = n($left);
            let r = n($right);
            assert_eq!(l.$op(&r).unwrap().to_string(), $expected, "{} {} {}", $left, stringify!($op), $right);
        }};
    }

    #[test]
    fn add() {
        assert_op!("1", checked_add, "2", "3");
        assert_op!("9999", checked_add, "1", "10000");
        assert_op!("1.01", checked_add, "0.99", "2.00");
        assert_op!("-1.5", checked_add, "0.5", "-1.0");
        assert_op!("-1.5", checked_add, "2.5", "1.0");
        assert_op!("1.5", checked_add, "-1.5", "0.0");
        assert_op!("-1", checked_add, "-1", "-2");
        assert_op!("0.0000001", checked_add, "10000000", "10000000.0000001");
        assert_op!("99999999999999999999", checked_add, "1", "100000000000000000000");
        // identities
        assert_op!("12.34", checked_add, "0", "12.34");
        assert_op!("12.34", checked_mul, "1", "12.34");
    }

    #[test]
    fn sub() {
        assert_op!("3", checked_sub, "2", "1");
        assert_op!("2", checked_sub, "3", "-1");
        assert_op!("10000", checked_sub, "0.0001", "9999.9999");
        assert_op!("-1", checked_sub, "-2", "1");
        assert_op!("-2", checked_sub, "-1", "-1");
        assert_op!("1.5", checked_sub, "-1.5", "3.0");
        assert_op!("-1.5", checked_sub, "1.5", "-3.0");
        assert_op!("1.5", checked_sub, "1.5", "0.0");
    }

    #[test]
    fn mul() {
        assert_op!("12.3", checked_mul, "-4.56", "-56.088");
        assert_op!("2", checked_mul, "3", "6");
        assert_op!("0.5", checked_mul, "0.5", "0.25");
        assert_op!("9999", checked_mul, "9999", "99980001");
        assert_op!("0.0001", checked_mul, "0.0001", "0.00000001");
        assert_op!("-4", checked_mul, "-0.25", "1.00");
        assert_op!("99999999999999999999", checked_mul, "99999999999999999999",
                   "9999999999999999999800000000000000000001");
        assert_op!("12.3", checked_mul, "0", "0.0");
    }

    #[test]
    fn div() {
        assert_op!("1", checked_div, "3", "0.33333333333333333333");
        assert_op!("10", checked_div, "4", "2.5000000000000000");
        assert_op!("1000000000", checked_div, "3", "333333333.33333333");
        assert_op!("0", checked_div, "5", "0.00000000000000000000");
        assert_op!("-1", checked_div, "3", "-0.33333333333333333333");
        assert_op!("12345678901234567890", checked_div, "987654321", "12499999887.34374999");
        assert_eq!(
            n("1").checked_div(&n("0")).unwrap_err(),
            NumericError::DivisionByZero
        );
        assert!(n("NaN").checked_div(&n("0")).unwrap().is_nan());
    }

    #[test]
    fn div_trunc() {
        assert_op!("7", checked_div_trunc, "2", "3");
        assert_op!("-7", checked_div_trunc, "2", "-3");
        assert_op!("7", checked_div_trunc, "-2", "-3");
        assert_op!("1.243", checked_div_trunc, "1.1", "1");
        assert_eq!(
            n("7").checked_div_trunc(&n("0")).unwrap_err(),
            NumericError::DivisionByZero
        );
    }

    #[test]
    fn rem() {
        assert_op!("1.243", checked_rem, "1.1", "0.143");
        assert_op!("7", checked_rem, "3", "1");
        assert_op!("-7", checked_rem, "3", "-1");
        assert_op!("7", checked_rem, "-3", "1");
        assert_op!("-7", checked_rem, "-3", "-1");
        assert_op!("6", checked_rem, "3", "0");
        assert_eq!(
            n("7").checked_rem(&n("0")).unwrap_err(),
            NumericError::DivisionByZero
        );
    }

    #[test]
    fn div_rem_identity() {
        // a = trunc(a / b) * b + mod(a, b)
        let cases = [
            ("1.243", "1.1"),
            ("-1.243", "1.1"),
            ("12345.6789", "-271"),
            ("99999999999999999999", "7777777"),
            ("0.00001", "3"),
        ];
        for (a, b) in cases {
            let a = n(a);
            let b = n(b);
            let q = a.checked_div_trunc(&b).unwrap();
            let r = a.checked_rem(&b).unwrap();
            let back = q.checked_mul(&b).unwrap().checked_add(&r).unwrap();
            assert_eq!(back.cmp_common(&a), std::cmp::Ordering::Equal, "{} / {}", a, b);
        }
    }

    #[test]
    fn commutativity() {
        let values = ["0", "1", "-1", "12.34", "-0.5", "9999.9999", "-123456789"];
        for a in values {
            for b in values {
                let (a, b) = (n(a), n(b));
                assert_eq!(
                    a.checked_add(&b).unwrap().to_string(),
                    b.checked_add(&a).unwrap().to_string()
                );
                assert_eq!(
                    a.checked_mul(&b).unwrap().to_string(),
                    b.checked_mul(&a).unwrap().to_string()
                );
            }
        }
    }

    #[test]
    fn additive_inverse() {
        for s in ["0", "1.5", "-12.345", "9999", "0.00001"] {
            let a = n(s);
            let neg = -&a;
            let sum = a.checked_add(&neg).unwrap();
            assert!(sum.is_zero(), "{} + -{} = {}", a, a, sum);
            assert_eq!(sum.scale(), a.scale());
        }
    }

    #[test]
    fn nan_propagation() {
        let nan = n("NaN");
        let x = n("12.3");
        assert!(nan.checked_add(&x).unwrap().is_nan());
        assert!(x.checked_sub(&nan).unwrap().is_nan());
        assert!(nan.checked_mul(&nan).unwrap().is_nan());
        assert!(x.checked_div(&nan).unwrap().is_nan());
        assert!(nan.checked_rem(&x).unwrap().is_nan());
    }
}
