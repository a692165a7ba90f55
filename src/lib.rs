//! Arbitrary-precision decimal arithmetic with SQL `NUMERIC` semantics.
//!
//! [`Numeric`] stores sign-magnitude digits in base 10000 with essentially
//! unbounded precision, a display scale that survives arithmetic the way a
//! SQL `NUMERIC` column's does, and a distinguished NaN value that sorts
//! above every number. Besides exact addition, subtraction, multiplication,
//! division and remainder, it computes square roots, exponentials,
//! logarithms and powers to a self-selected number of significant digits.
//!
//! ```
//! use bignumeric::Numeric;
//!
//! let a: Numeric = "12.3".parse()?;
//! let b: Numeric = "-4.56".parse()?;
//! assert_eq!((&a * &b).to_string(), "-56.088");
//!
//! let two: Numeric = "2".parse()?;
//! assert_eq!(two.sqrt()?.to_string(), "1.414213562373095");
//! # Ok::<(), bignumeric::NumericError>(())
//! ```

mod arith;
mod convert;
mod error;
mod math;
mod numeric;
mod ops;
mod parse;

pub use crate::error::NumericError;
pub use crate::numeric::Numeric;
