//! Implementing operators for numeric.

use crate::numeric::{Numeric, Sign};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

impl PartialEq for Numeric {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp_common(other) == Ordering::Equal
    }
}

impl Eq for Numeric {}

impl Ord for Numeric {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_common(other)
    }
}

impl PartialOrd for Numeric {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_common(other))
    }
}

impl Hash for Numeric {
    /// dscale takes no part: equality ignores it, and the stripped storage
    /// makes (sign, weight, digits) canonical per value.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.weight.hash(state);
        self.digits.hash(state);
    }
}

macro_rules! impl_binop {
    ($op_trait:ident, $method:ident, $checked:ident, $what:literal) => {
        impl $op_trait for &Numeric {
            type Output = Numeric;

            #[inline]
            fn $method(self, other: &Numeric) -> Numeric {
                match self.$checked(other) {
                    Ok(result) => result,
                    Err(e) => panic!(concat!("numeric ", $what, " failed: {}"), e),
                }
            }
        }

        impl $op_trait for Numeric {
            type Output = Numeric;

            #[inline]
            fn $method(self, other: Numeric) -> Numeric {
                $op_trait::$method(&self, &other)
            }
        }
    };
}

impl_binop!(Add, add, checked_add, "addition");
impl_binop!(Sub, sub, checked_sub, "subtraction");
impl_binop!(Mul, mul, checked_mul, "multiplication");
impl_binop!(Div, div, checked_div, "division");
impl_binop!(Rem, rem, checked_rem, "remainder");

impl Neg for &Numeric {
    type Output = Numeric;

    fn neg(self) -> Numeric {
        let mut result = self.clone();
        match result.sign {
            // Zero keeps its positive sign.
            Sign::Pos if !result.digits.is_empty() => result.sign = Sign::Neg,
            Sign::Neg => result.sign = Sign::Pos,
            _ => {}
        }
        result
    }
}

impl Neg for Numeric {
    type Output = Numeric;

    #[inline]
    fn neg(self) -> Numeric {
        Neg::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! check_ord {
        ($a:expr, $ord:ident, $b:expr) => {{
            let a = $a.parse::<Numeric>().unwrap();
            let b = $b.parse::<Numeric>().unwrap();
            assert_eq!(a.cmp(&b), Ordering::$ord, "cmp({}, {})", $a, $b);
        }};
    }

    #[test]
    fn cmp_equal_ignores_scale() {
        check_ord!("0", Equal, "0");
        check_ord!("0", Equal, "0.000");
        check_ord!("1", Equal, "1.000");
        check_ord!("-3.5", Equal, "-3.50");
        check_ord!("5e-1", Equal, "0.5");
        check_ord!("1e8", Equal, "100000000");
        check_ord!("12.345", Equal, "12.345000");
    }

    #[test]
    fn cmp_sign_decides_first() {
        check_ord!("0.001", Greater, "-1000");
        check_ord!("-0.001", Less, "0.001");
        check_ord!("0", Greater, "-0.0001");
        check_ord!("0", Less, "0.0001");
        check_ord!("-7", Less, "7");
    }

    #[test]
    fn cmp_magnitude() {
        // around a limb boundary
        check_ord!("9999", Less, "10000");
        check_ord!("10000", Greater, "9999.9999");
        check_ord!("-10000", Less, "-9999.9999");
        check_ord!("0.9999", Less, "1");
        // longer fraction wins only by its extra digits
        check_ord!("123.456", Less, "123.4561");
        check_ord!("-123.4561", Less, "-123.456");
        // trailing zero limbs are elided in storage but still compare
        check_ord!("1e8", Greater, "99999999");
        check_ord!("1e8", Less, "100000001");
    }

    #[test]
    fn cmp_disjoint_weights() {
        check_ord!("1e-50", Greater, "0");
        check_ord!("-1e-50", Less, "0");
        check_ord!("1e-50", Less, "1e-49");
        check_ord!("1e200", Greater, "1e199");
        check_ord!("-1e200", Less, "-1e199");
        check_ord!("1e200", Greater, "1e-200");
        check_ord!("1", Less, "12345678901234567890123456789012345678901234567890");
    }

    #[test]
    fn cmp_nan_is_maximal() {
        check_ord!("NaN", Equal, "NaN");
        check_ord!("NaN", Greater, "12.345");
        check_ord!("12.345", Less, "NaN");
        check_ord!("NaN", Greater, "1e1000");
        check_ord!("NaN", Greater, "-1e1000");
        check_ord!("0", Less, "NaN");
    }

    #[test]
    fn cmp_antisymmetry() {
        let values = ["0", "1", "-1", "12.34", "NaN", "-0.5", "1e100"];
        for a in values {
            for b in values {
                let (a, b) = (a.parse::<Numeric>().unwrap(), b.parse::<Numeric>().unwrap());
                assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            }
        }
    }

    #[test]
    fn sort_order() {
        let mut values: Vec<Numeric> = ["1.1", "-2", "NaN", "0", "3e5", "-0.001"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        values.sort();
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, ["-2", "-0.001", "0", "1.1", "300000", "NaN"]);
    }

    #[test]
    fn min_max() {
        let nan = "NaN".parse::<Numeric>().unwrap();
        let x = "12.345".parse::<Numeric>().unwrap();
        assert!(std::cmp::max(nan.clone(), x.clone()).is_nan());
        assert!(std::cmp::max(x.clone(), nan.clone()).is_nan());
        assert_eq!(std::cmp::min(nan, x).to_string(), "12.345");

        let a = "1".parse::<Numeric>().unwrap();
        let b = "2".parse::<Numeric>().unwrap();
        assert_eq!(std::cmp::max(a.clone(), b.clone()).to_string(), "2");
        assert_eq!(std::cmp::min(a, b).to_string(), "1");
    }

    #[test]
    fn operators() {
        let a = "12.3".parse::<Numeric>().unwrap();
        let b = "-4.56".parse::<Numeric>().unwrap();
        assert_eq!((&a * &b).to_string(), "-56.088");
        assert_eq!((&a + &b).to_string(), "7.74");
        assert_eq!((&a - &b).to_string(), "16.86");
        assert_eq!((-&b).to_string(), "4.56");
        assert_eq!((-&a).to_string(), "-12.3");

        let seven = "7".parse::<Numeric>().unwrap();
        let three = "3".parse::<Numeric>().unwrap();
        assert_eq!((&seven % &three).to_string(), "1");
        assert_eq!((seven / three).to_string(), "2.3333333333333333");

        let zero = Numeric::ZERO;
        assert_eq!((-&zero).to_string(), "0");
    }

    #[test]
    fn hash_agrees_with_eq() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(n: &Numeric) -> u64 {
            let mut hasher = DefaultHasher::new();
            n.hash(&mut hasher);
            hasher.finish()
        }

        let a = "1.0".parse::<Numeric>().unwrap();
        let b = "1".parse::<Numeric>().unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = "0.00".parse::<Numeric>().unwrap();
        assert_eq!(c, Numeric::ZERO);
        assert_eq!(hash_of(&c), hash_of(&Numeric::ZERO));
    }
}
