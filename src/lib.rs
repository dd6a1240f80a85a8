//!
//! # autodual
//!
//! Forward-mode automatic differentiation over scalar dual numbers.
//!
//! A [`DualNumber`] carries a primal value together with its derivative along
//! one implicit independent variable. Every operation on it returns a fresh
//! value whose tangent has been pushed through the matching differentiation
//! rule, so evaluating `f` on a seeded input yields both `f(a)` and `f'(a)`.
//!
//! ## Seeding
//!
//! The caller picks the variable of differentiation: construct it with
//! [`DualNumber::variable`] (tangent 1) and every constant with
//! [`DualNumber::constant`] or a bare `f64` (tangent 0). Nothing in the type
//! enforces this.
//!
//! ```
//! use autodual::DualNumber;
//!
//! // f(x) = x^3 + 2x at x = 2
//! let x = DualNumber::variable(2.0);
//! let f = x.powf(3.0) + 2.0 * x;
//!
//! assert_eq!(f.value(), 12.0);
//! assert_eq!(f.tangent(), 14.0);
//! ```
//!
//! ## Domain irregularities
//!
//! Nothing here returns an error or panics on numeric input. Division by a
//! zero primal, logarithms of non-positive primals and the like surface as
//! IEEE-754 infinities and NaNs, exactly as they would for plain `f64`.
//!

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

mod ops;

/// A primal value paired with its derivative.
///
/// Equality is structural: two duals are equal only when both components
/// compare equal. Ordering looks at the primal alone, so
/// `DualNumber::new(5.0, 1.0)` and `DualNumber::new(5.0, 2.0)` are unequal
/// yet neither is less than the other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualNumber {
  value: f64,
  tangent: f64,
}

impl DualNumber {
  #[inline]
  pub const fn new(value: f64, tangent: f64) -> Self {
    Self { value, tangent }
  }

  /// A constant has zero derivative
  #[inline]
  pub const fn constant(value: f64) -> Self {
    Self::new(value, 0.0)
  }

  /// Seed for the variable of differentiation (dx/dx = 1)
  #[inline]
  pub const fn variable(value: f64) -> Self {
    Self::new(value, 1.0)
  }

  #[inline]
  pub const fn value(&self) -> f64 {
    self.value
  }

  #[inline]
  pub const fn tangent(&self) -> f64 {
    self.tangent
  }

  #[inline]
  pub fn is_finite(&self) -> bool {
    self.value.is_finite() && self.tangent.is_finite()
  }

  /// Power with a constant exponent: d/dx a^n = n * a^(n-1) * a'
  #[inline]
  pub fn powf(&self, exponent: f64) -> Self {
    let v = self.value;
    Self {
      value: v.powf(exponent),
      tangent: exponent * v.powf(exponent - 1.0) * self.tangent,
    }
  }

  /// Power where both base and exponent carry tangents.
  ///
  /// The logarithm term needs a positive base; anything else leaves a NaN in
  /// the tangent, even when the exponent's tangent is zero. Use [`powf`] for
  /// constant exponents.
  ///
  /// [`powf`]: DualNumber::powf
  #[inline]
  pub fn pow(&self, exponent: &Self) -> Self {
    let v = self.value;
    let ev = exponent.value;
    let value = v.powf(ev);
    Self {
      value,
      tangent: value * v.ln() * exponent.tangent + ev * v.powf(ev - 1.0) * self.tangent,
    }
  }

  #[inline]
  pub fn sin(&self) -> Self {
    let v = self.value;
    Self {
      value: v.sin(),
      tangent: v.cos() * self.tangent,
    }
  }

  #[inline]
  pub fn cos(&self) -> Self {
    let v = self.value;
    Self {
      value: v.cos(),
      tangent: -v.sin() * self.tangent,
    }
  }

  /// sin / cos through the quotient rule, so the tangent blows up wherever
  /// the cosine vanishes
  #[inline]
  pub fn tan(&self) -> Self {
    self.sin() / self.cos()
  }

  #[inline]
  pub fn exp(&self) -> Self {
    let e = self.value.exp();
    Self {
      value: e,
      tangent: e * self.tangent,
    }
  }

  #[inline]
  pub fn ln(&self) -> Self {
    Self {
      value: self.value.ln(),
      tangent: self.tangent / self.value,
    }
  }

  #[inline]
  pub fn sqrt(&self) -> Self {
    let s = self.value.sqrt();
    Self {
      value: s,
      tangent: self.tangent / (2.0 * s),
    }
  }

  #[inline]
  pub fn recip(&self) -> Self {
    let v = self.value;
    Self {
      value: 1.0 / v,
      tangent: -self.tangent / (v * v),
    }
  }
}

impl fmt::Display for DualNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match f.precision() {
      Some(p) => write!(f, "x = {:.*}, dx = {:.*}", p, self.value, p, self.tangent),
      None => write!(f, "x = {}, dx = {}", self.value, self.tangent),
    }
  }
}

#[inline]
pub fn sin(x: DualNumber) -> DualNumber {
  x.sin()
}

#[inline]
pub fn cos(x: DualNumber) -> DualNumber {
  x.cos()
}

#[inline]
pub fn tan(x: DualNumber) -> DualNumber {
  x.tan()
}

/// `base ^ exponent` for a constant base: d/dx s^b = s^b * ln(s) * b'
#[inline]
pub fn pow_scalar_base(base: f64, exponent: DualNumber) -> DualNumber {
  let value = base.powf(exponent.value);
  DualNumber {
    value,
    tangent: value * base.ln() * exponent.tangent,
  }
}

/// Evaluate `f` at `x` with `x` seeded as the variable of differentiation.
///
/// The returned dual holds `f(x)` and `f'(x)`.
pub fn derivative<F>(f: F, x: f64) -> DualNumber
where
  F: FnOnce(DualNumber) -> DualNumber,
{
  let result = f(DualNumber::variable(x));
  trace!(
    x,
    value = result.value,
    tangent = result.tangent,
    "evaluated derivative"
  );
  if !result.is_finite() {
    debug!(x, %result, "derivative is not finite");
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_relative_eq;
  use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

  mod construction {
    use super::*;

    #[test]
    fn new() {
      let a = DualNumber::new(1.3, -0.7);
      assert_eq!(a.value(), 1.3);
      assert_eq!(a.tangent(), -0.7);
    }

    #[test]
    fn constant() {
      let c = DualNumber::constant(5.0);
      assert_eq!(c.value(), 5.0);
      assert_eq!(c.tangent(), 0.0);
    }

    #[test]
    fn variable() {
      let x = DualNumber::variable(3.0);
      assert_eq!(x.value(), 3.0);
      assert_eq!(x.tangent(), 1.0);
    }

    #[test]
    fn default_is_zero() {
      assert_eq!(DualNumber::default(), DualNumber::new(0.0, 0.0));
    }

    #[test]
    fn copy_is_independent() {
      let a = DualNumber::new(2.0, 1.0);
      let b = a;
      let c = -b;
      assert_eq!(a, DualNumber::new(2.0, 1.0));
      assert_eq!(b, DualNumber::new(2.0, 1.0));
      assert_eq!(c, DualNumber::new(-2.0, -1.0));
    }

    #[test]
    fn non_finite_inputs_are_kept() {
      let a = DualNumber::new(f64::INFINITY, f64::NAN);
      assert_eq!(a.value(), f64::INFINITY);
      assert!(a.tangent().is_nan());
      assert!(!a.is_finite());
    }
  }

  mod elementary {
    use super::*;

    #[test]
    fn powf() {
      // d/dx x^3 at x=2 is 12
      let a = DualNumber::variable(2.0);
      assert_eq!(a.powf(3.0), DualNumber::new(8.0, 12.0));
    }

    #[test]
    fn powf_fractional() {
      // d/dx x^0.5 at x=4 is 1/4
      let a = DualNumber::variable(4.0);
      let b = a.powf(0.5);
      assert_eq!(b.value(), 2.0);
      assert_eq!(b.tangent(), 0.25);
    }

    #[test]
    fn pow_dual_exponent() {
      // d/dx x^x = x^x * (ln x + 1)
      let x = DualNumber::variable(2.0);
      let y = x.pow(&x);
      assert_eq!(y.value(), 4.0);
      assert_relative_eq!(y.tangent(), 4.0 * (f64::ln(2.0) + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn pow_constant_dual_exponent_matches_powf() {
      let x = DualNumber::variable(2.0);
      let y = x.pow(&DualNumber::constant(3.0));
      assert_eq!(y, x.powf(3.0));
    }

    #[test]
    fn pow_negative_base_is_nan() {
      let x = DualNumber::variable(-2.0);
      let y = x.pow(&DualNumber::constant(2.0));
      assert_eq!(y.value(), 4.0);
      assert!(y.tangent().is_nan());
    }

    #[test]
    fn pow_scalar_base() {
      // d/dx 2^x = 2^x * ln 2
      let x = DualNumber::variable(3.0);
      let y = super::super::pow_scalar_base(2.0, x);
      assert_eq!(y.value(), 8.0);
      assert_eq!(y.tangent(), 8.0 * f64::ln(2.0));
    }

    #[test]
    fn sin_at_zero() {
      let a = DualNumber::variable(0.0);
      assert_eq!(sin(a), DualNumber::new(0.0, 1.0));
    }

    #[test]
    fn cos_at_zero() {
      let a = DualNumber::variable(0.0);
      assert_eq!(cos(a), DualNumber::new(1.0, 0.0));
    }

    #[test]
    fn sin_chain_rule() {
      // d/dx sin(3x) = 3 cos(3x)
      let x = DualNumber::variable(1.3);
      let y = (3.0 * x).sin();
      assert_relative_eq!(y.value(), f64::sin(3.9), epsilon = 1e-12);
      assert_relative_eq!(y.tangent(), 3.0 * f64::cos(3.9), epsilon = 1e-12);
    }

    #[test]
    fn cos_scaled_tangent() {
      let a = DualNumber::new(3.1, 2.0);
      let b = a.cos();
      assert_eq!(b.value(), f64::cos(3.1));
      assert_eq!(b.tangent(), -f64::sin(3.1) * 2.0);
    }

    #[test]
    fn tan_at_quarter_pi() {
      // sec^2(pi/4) = 2
      let a = DualNumber::variable(FRAC_PI_4);
      let b = tan(a);
      assert_relative_eq!(b.value(), 1.0, epsilon = 1e-12);
      assert_relative_eq!(b.tangent(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn tan_matches_sec_squared() {
      let a = DualNumber::variable(5.6);
      let b = a.tan();
      assert_relative_eq!(b.value(), f64::tan(5.6), epsilon = 1e-12);
      assert_relative_eq!(b.tangent(), 1.0 / f64::cos(5.6).powi(2), epsilon = 1e-9);
    }

    #[test]
    fn tan_near_pole_does_not_panic() {
      let a = DualNumber::variable(FRAC_PI_2);
      let b = a.tan();
      assert!(b.value().abs() > 1e15);
      assert!(b.tangent() > 1e30);
    }

    #[test]
    fn exp() {
      let a = DualNumber::variable(0.0);
      assert_eq!(a.exp(), DualNumber::new(1.0, 1.0));
    }

    #[test]
    fn ln() {
      // d/dx ln(x) = 1/x
      let a = DualNumber::variable(5.6);
      let b = a.ln();
      assert_eq!(b.value(), f64::ln(5.6));
      assert_eq!(b.tangent(), 1.0 / 5.6);
    }

    #[test]
    fn ln_of_zero() {
      let b = DualNumber::variable(0.0).ln();
      assert_eq!(b.value(), f64::NEG_INFINITY);
      assert_eq!(b.tangent(), f64::INFINITY);
    }

    #[test]
    fn sqrt() {
      let a = DualNumber::variable(9.0);
      let b = a.sqrt();
      assert_eq!(b.value(), 3.0);
      assert_eq!(b.tangent(), 1.0 / 6.0);
    }

    #[test]
    fn recip() {
      // df/da = -1/a^2
      let a = DualNumber::variable(2.0);
      assert_eq!(a.recip(), DualNumber::new(0.5, -0.25));
    }
  }

  mod display {
    use super::*;

    #[test]
    fn shows_both_components() {
      let a = DualNumber::new(8.0, 12.5);
      assert_eq!(a.to_string(), "x = 8, dx = 12.5");
    }

    #[test]
    fn honours_precision() {
      let a = DualNumber::new(1.0 / 3.0, 2.0);
      assert_eq!(format!("{a:.3}"), "x = 0.333, dx = 2.000");
    }

    #[test]
    fn non_finite() {
      let a = DualNumber::new(f64::INFINITY, f64::NAN);
      assert_eq!(a.to_string(), "x = inf, dx = NaN");
    }
  }

  mod derivative {
    use super::*;

    #[test]
    fn polynomial() {
      // f(x) = x^2 + 3x + 2, f'(x) = 2x + 3
      let r = super::super::derivative(|x| x * x + 3.0 * x + 2.0, 3.0);
      assert_eq!(r, DualNumber::new(20.0, 9.0));
    }

    #[test]
    fn composite() {
      // f(x) = sin(x^2), f'(x) = 2x cos(x^2)
      let r = super::super::derivative(|x| x.powf(2.0).sin(), 1.5);
      assert_relative_eq!(r.value(), f64::sin(2.25), epsilon = 1e-12);
      assert_relative_eq!(r.tangent(), 3.0 * f64::cos(2.25), epsilon = 1e-12);
    }

    #[test]
    fn non_finite_result() {
      let r = super::super::derivative(|x| 1.0 / x, 0.0);
      assert_eq!(r.value(), f64::INFINITY);
      assert!(!r.is_finite());
    }
  }

  #[cfg(feature = "serde")]
  mod serde {
    use super::*;

    #[test]
    fn ron_record() {
      let a = DualNumber::new(2.5, -1.0);
      let text = ron::to_string(&a).unwrap();
      assert!(text.contains("value") && text.contains("tangent"));
      let back: DualNumber = ron::from_str(&text).unwrap();
      assert_eq!(back, a);
    }
  }
}
