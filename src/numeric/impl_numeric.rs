// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::dimension::Axis;
use crate::error::ArrayError;
use crate::itemtype::Scalar;
use crate::numeric;
use crate::NdArray;

/// Numerical methods for arrays.
///
/// Each forwards to the function of the same name in
/// [`numeric`](crate::numeric) over the array's flat iterator.
impl NdArray {
    /// Return the sum of all elements in the array.
    ///
    /// ```
    /// use tinyarray::array;
    ///
    /// let a = array(vec![vec![1., 2.], vec![3., 4.]], None);
    /// assert_eq!(a.sum(None).unwrap(), 10.);
    /// ```
    pub fn sum(&self, axis: Option<Axis>) -> Result<f64, ArrayError> {
        numeric::sum(self.iter(), axis)
    }

    /// Return the product of all elements in the array.
    pub fn prod(&self, axis: Option<Axis>) -> Result<f64, ArrayError> {
        numeric::prod(self.iter(), axis)
    }

    /// Return the mean of all elements in the array.
    pub fn mean(&self, axis: Option<Axis>) -> Result<f64, ArrayError> {
        numeric::mean(self.iter(), axis)
    }

    /// Return the population variance of all elements in the array.
    pub fn var(&self, axis: Option<Axis>) -> Result<f64, ArrayError> {
        numeric::var(self.iter(), axis)
    }

    /// Return the population standard deviation of all elements in the array.
    pub fn std(&self, axis: Option<Axis>) -> Result<f64, ArrayError> {
        numeric::std(self.iter(), axis)
    }

    pub fn min(&self, axis: Option<Axis>) -> Result<Scalar, ArrayError> {
        numeric::min(self.iter(), axis)
    }

    pub fn max(&self, axis: Option<Axis>) -> Result<Scalar, ArrayError> {
        numeric::max(self.iter(), axis)
    }

    pub fn argmin(&self, axis: Option<Axis>) -> Result<usize, ArrayError> {
        numeric::argmin(self.iter(), axis)
    }

    pub fn argmax(&self, axis: Option<Axis>) -> Result<usize, ArrayError> {
        numeric::argmax(self.iter(), axis)
    }

    /// Return `max - min` over the array.
    pub fn ptp(&self, axis: Option<Axis>) -> Result<f64, ArrayError> {
        numeric::ptp(self.iter(), axis)
    }

    pub fn cumsum(&self, axis: Option<Axis>) -> Result<NdArray, ArrayError> {
        numeric::cumsum(self.iter(), axis)
    }

    pub fn cumprod(&self, axis: Option<Axis>) -> Result<NdArray, ArrayError> {
        numeric::cumprod(self.iter(), axis)
    }

    pub fn all(&self, axis: Option<Axis>) -> Result<bool, ArrayError> {
        numeric::all(self.iter(), axis)
    }

    pub fn any(&self, axis: Option<Axis>) -> Result<bool, ArrayError> {
        numeric::any(self.iter(), axis)
    }

    /// Limit the values to `[lo, hi]`, into `out` when given.
    ///
    /// ```
    /// use tinyarray::arange;
    ///
    /// let a = arange(6);
    /// a.clip(1, 3, Some(&a)).unwrap();
    /// assert_eq!(a, tinyarray::array(vec![1, 1, 2, 3, 3, 3], None));
    /// ```
    pub fn clip<L, H>(&self, lo: L, hi: H, out: Option<&NdArray>) -> Result<NdArray, ArrayError>
    where
        L: Into<Scalar>,
        H: Into<Scalar>,
    {
        numeric::clip(self, lo.into(), hi.into(), out)
    }

    /// Return a one-dimensional array with each element repeated `n` times.
    pub fn repeat(&self, n: usize) -> NdArray {
        numeric::repeat(self, n)
    }

    /// Set every element to `value`, coerced to the item type.
    pub fn fill<V: Into<Scalar>>(&self, value: V) -> Result<(), ArrayError> {
        numeric::fill(self, value.into())
    }
}
