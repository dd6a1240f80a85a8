//!
//! Operator impls for [`DualNumber`].
//!
//! Every binary operator accepts a dual or a bare `f64` on either side. A bare
//! scalar is promoted to a constant (tangent 0) before combining, except for
//! `^` with an `f64` exponent, which applies the plain power rule, and
//! `f64 / dual`, which applies the quotient rule with the scalar's tangent
//! folded away.
//!

use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{Add, BitXor, Div, Mul, Neg, Sub};

use crate::{pow_scalar_base, DualNumber};

/// Derive the borrowed forms of a binary operator from the owned one,
/// duals are `Copy` so these just dereference
macro_rules! forward_ref_binop {
  (impl $imp:ident, $method:ident for $t:ty, $u:ty) => {
    impl $imp<$u> for &$t {
      type Output = <$t as $imp<$u>>::Output;

      #[inline(always)]
      fn $method(self, other: $u) -> Self::Output {
        $imp::$method(*self, other)
      }
    }

    impl $imp<&$u> for $t {
      type Output = <$t as $imp<$u>>::Output;

      #[inline(always)]
      fn $method(self, other: &$u) -> Self::Output {
        $imp::$method(self, *other)
      }
    }

    impl $imp<&$u> for &$t {
      type Output = <$t as $imp<$u>>::Output;

      #[inline(always)]
      fn $method(self, other: &$u) -> Self::Output {
        $imp::$method(*self, *other)
      }
    }
  };
}

impl From<f64> for DualNumber {
  #[inline]
  fn from(value: f64) -> Self {
    Self::constant(value)
  }
}

impl From<(f64, f64)> for DualNumber {
  #[inline]
  fn from((value, tangent): (f64, f64)) -> Self {
    Self::new(value, tangent)
  }
}

impl From<DualNumber> for (f64, f64) {
  #[inline]
  fn from(dual: DualNumber) -> Self {
    (dual.value, dual.tangent)
  }
}

impl Neg for DualNumber {
  type Output = DualNumber;

  #[inline]
  fn neg(self) -> Self::Output {
    DualNumber {
      value: -self.value,
      tangent: -self.tangent,
    }
  }
}

impl Neg for &DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn neg(self) -> Self::Output {
    -*self
  }
}

impl Add for DualNumber {
  type Output = DualNumber;

  #[inline]
  fn add(self, other: Self) -> Self::Output {
    DualNumber {
      value: self.value + other.value,
      tangent: self.tangent + other.tangent,
    }
  }
}

impl Add<f64> for DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn add(self, other: f64) -> Self::Output {
    self + DualNumber::from(other)
  }
}

impl Add<DualNumber> for f64 {
  type Output = DualNumber;

  #[inline(always)]
  fn add(self, other: DualNumber) -> Self::Output {
    DualNumber::from(self) + other
  }
}

impl Sub for DualNumber {
  type Output = DualNumber;

  #[inline]
  fn sub(self, other: Self) -> Self::Output {
    DualNumber {
      value: self.value - other.value,
      tangent: self.tangent - other.tangent,
    }
  }
}

impl Sub<f64> for DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn sub(self, other: f64) -> Self::Output {
    self - DualNumber::from(other)
  }
}

impl Sub<DualNumber> for f64 {
  type Output = DualNumber;

  #[inline(always)]
  fn sub(self, other: DualNumber) -> Self::Output {
    -other + self
  }
}

impl Mul for DualNumber {
  type Output = DualNumber;

  #[inline]
  fn mul(self, other: Self) -> Self::Output {
    DualNumber {
      value: self.value * other.value,
      tangent: self.value * other.tangent + self.tangent * other.value,
    }
  }
}

impl Mul<f64> for DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn mul(self, other: f64) -> Self::Output {
    self * DualNumber::from(other)
  }
}

impl Mul<DualNumber> for f64 {
  type Output = DualNumber;

  #[inline(always)]
  fn mul(self, other: DualNumber) -> Self::Output {
    DualNumber::from(self) * other
  }
}

impl Div for DualNumber {
  type Output = DualNumber;

  #[inline]
  fn div(self, other: Self) -> Self::Output {
    let ov = other.value;
    DualNumber {
      value: self.value / ov,
      tangent: (self.tangent * ov - self.value * other.tangent) / (ov * ov),
    }
  }
}

impl Div<f64> for DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn div(self, other: f64) -> Self::Output {
    self / DualNumber::from(other)
  }
}

impl Div<DualNumber> for f64 {
  type Output = DualNumber;

  #[inline]
  fn div(self, other: DualNumber) -> Self::Output {
    let ov = other.value;
    DualNumber {
      value: self / ov,
      tangent: (-self * other.tangent) / (ov * ov),
    }
  }
}

/// `^` binds looser than `+` and `*`, so `a ^ 2.0 + b` parses as
/// `a ^ (2.0 + b)`; parenthesise, or reach for the named methods
impl BitXor for DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn bitxor(self, other: Self) -> Self::Output {
    self.pow(&other)
  }
}

impl BitXor<f64> for DualNumber {
  type Output = DualNumber;

  #[inline(always)]
  fn bitxor(self, other: f64) -> Self::Output {
    self.powf(other)
  }
}

impl BitXor<DualNumber> for f64 {
  type Output = DualNumber;

  #[inline(always)]
  fn bitxor(self, other: DualNumber) -> Self::Output {
    pow_scalar_base(self, other)
  }
}

forward_ref_binop! { impl Add, add for DualNumber, DualNumber }
forward_ref_binop! { impl Add, add for DualNumber, f64 }
forward_ref_binop! { impl Add, add for f64, DualNumber }
forward_ref_binop! { impl Sub, sub for DualNumber, DualNumber }
forward_ref_binop! { impl Sub, sub for DualNumber, f64 }
forward_ref_binop! { impl Sub, sub for f64, DualNumber }
forward_ref_binop! { impl Mul, mul for DualNumber, DualNumber }
forward_ref_binop! { impl Mul, mul for DualNumber, f64 }
forward_ref_binop! { impl Mul, mul for f64, DualNumber }
forward_ref_binop! { impl Div, div for DualNumber, DualNumber }
forward_ref_binop! { impl Div, div for DualNumber, f64 }
forward_ref_binop! { impl Div, div for f64, DualNumber }
forward_ref_binop! { impl BitXor, bitxor for DualNumber, DualNumber }
forward_ref_binop! { impl BitXor, bitxor for DualNumber, f64 }
forward_ref_binop! { impl BitXor, bitxor for f64, DualNumber }

// Equality against a scalar goes through promotion, so a dual only equals a
// bare f64 when its tangent is zero.

impl PartialEq<f64> for DualNumber {
  #[inline]
  fn eq(&self, other: &f64) -> bool {
    *self == DualNumber::from(*other)
  }
}

impl PartialEq<DualNumber> for f64 {
  #[inline]
  fn eq(&self, other: &DualNumber) -> bool {
    DualNumber::from(*self) == *other
  }
}

// Ordering compares primals only: duals that differ only in tangent are
// unequal yet compare as `Equal`.

impl PartialOrd for DualNumber {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.value.partial_cmp(&other.value)
  }
}

impl PartialOrd<f64> for DualNumber {
  #[inline]
  fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
    self.value.partial_cmp(other)
  }
}

impl PartialOrd<DualNumber> for f64 {
  #[inline]
  fn partial_cmp(&self, other: &DualNumber) -> Option<Ordering> {
    self.partial_cmp(&other.value)
  }
}

impl Sum for DualNumber {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(DualNumber::constant(0.0), |acc, x| acc + x)
  }
}

impl<'a> Sum<&'a DualNumber> for DualNumber {
  fn sum<I: Iterator<Item = &'a DualNumber>>(iter: I) -> Self {
    iter.copied().sum()
  }
}

impl Product for DualNumber {
  fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(DualNumber::constant(1.0), |acc, x| acc * x)
  }
}

impl<'a> Product<&'a DualNumber> for DualNumber {
  fn product<I: Iterator<Item = &'a DualNumber>>(iter: I) -> Self {
    iter.copied().product()
  }
}
