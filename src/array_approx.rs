// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Approximate equality of arrays, element by element in `f64`.
//!
//! Two arrays compare approximately equal when their shapes are equal and
//! every pair of elements, taken in logical order, passes the test. The item
//! types may differ.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::NdArray;

impl NdArray {
    /// A test for equality that uses the elementwise absolute difference to
    /// compute the approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq(&self, other: &NdArray, epsilon: f64) -> bool {
        <Self as AbsDiffEq>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if
    /// the values are far apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq(&self, other: &NdArray, epsilon: f64, max_relative: f64) -> bool {
        <Self as RelativeEq>::relative_eq(self, other, epsilon, max_relative)
    }

    fn all_pairs(&self, other: &NdArray, f: impl Fn(f64, f64) -> bool) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| f(a.to_f64(), b.to_f64()))
    }
}

/// **Requires crate feature `"approx"`**
impl AbsDiffEq for NdArray {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &NdArray, epsilon: f64) -> bool {
        self.all_pairs(other, |a, b| a.abs_diff_eq(&b, epsilon))
    }
}

/// **Requires crate feature `"approx"`**
impl RelativeEq for NdArray {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &NdArray, epsilon: f64, max_relative: f64) -> bool {
        self.all_pairs(other, |a, b| a.relative_eq(&b, epsilon, max_relative))
    }
}

/// **Requires crate feature `"approx"`**
impl UlpsEq for NdArray {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &NdArray, epsilon: f64, max_ulps: u32) -> bool {
        self.all_pairs(other, |a, b| a.ulps_eq(&b, epsilon, max_ulps))
    }
}

#[cfg(test)]
mod tests {
    use crate::{array, linspace, s, ItemType};
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_ulps_eq};

    #[test]
    fn abs_diff_eq() {
        let a = array(vec![vec![0., 2.], vec![-0.000010001, 100000000.]], None);
        let mut b = array(vec![vec![0., 1.], vec![-0.000010002, 100000001.]], None);
        assert_abs_diff_ne!(a, b);
        b.set(s![0, 1], 2.).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1.);

        // Check epsilon.
        assert_abs_diff_eq!(array(vec![0.0f32], None), array(vec![1e-40f32], None));
        assert_abs_diff_ne!(array(vec![0.0f32], None), array(vec![1e-40f32], None), epsilon = 1e-41);

        // Make sure we can compare different shapes without failure.
        b.set_shape(4).unwrap();
        assert_abs_diff_ne!(a, b, epsilon = 1.);
    }

    #[test]
    fn item_types_may_differ() {
        let a = array(vec![0.25, 0.5, 0.75], Some(ItemType::Float32));
        let b = linspace(0.25, 0.75, 3);
        assert_relative_eq!(a, b);
        assert_ulps_eq!(a, b);
        assert!(a.abs_diff_eq(&b, 0.));
        assert!(!a.relative_eq(&array(vec![0, 0, 1], None), 1e-3, 1e-3));
    }
}
