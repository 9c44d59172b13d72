// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Free constructor functions, named like numpy's.
//!
//! Every array they return owns a fresh zero-initialized buffer.

use crate::dimension::IntoShape;
use crate::error::{from_kind, ArrayError, ErrorKind};
use crate::itemtype::{ItemType, Scalar};
use crate::NdArray;

/// Create a `float64` array of the given shape, filled with zeros.
///
/// **Panics** if the number of elements overflows `usize`.
///
/// ```
/// use tinyarray::zeros;
///
/// let a = zeros((2, 3));
/// assert_eq!(a.strides(), &[3, 1]);
/// assert_eq!(a.sum(None).unwrap(), 0.);
/// ```
pub fn zeros<E: IntoShape>(shape: E) -> NdArray {
    NdArray::zeros(shape, ItemType::Float64)
}

/// Create a `float64` array of the given shape.
///
/// Storage is never left uninitialized, so the elements are zero.
pub fn empty<E: IntoShape>(shape: E) -> NdArray {
    zeros(shape)
}

/// Create a `float64` array of the given shape, filled with ones.
pub fn ones<E: IntoShape>(shape: E) -> NdArray {
    NdArray::from_elem(shape, ItemType::Float64, 1.)
}

/// Create an array of the given shape with every element set to `value`.
///
/// The item type follows the value: `bool`, `int64` for signed integers,
/// `uint64` for unsigned integers and `float64` for floats.
pub fn full<E, V>(shape: E, value: V) -> NdArray
where
    E: IntoShape,
    V: Into<Scalar>,
{
    let value = value.into();
    let item_type = match value {
        Scalar::Bool(_) => ItemType::Bool,
        Scalar::Int(_) => ItemType::Int64,
        Scalar::UInt(_) => ItemType::UInt64,
        Scalar::Float(_) => ItemType::Float64,
    };
    NdArray::from_elem(shape, item_type, value)
}

/// Create a zeroed array with the shape and item type of `a`.
pub fn zeros_like(a: &NdArray) -> NdArray {
    NdArray::zeros(a.shape(), a.item_type())
}

/// Create an array with the shape and item type of `a`, filled with ones.
pub fn ones_like(a: &NdArray) -> NdArray {
    NdArray::from_elem(a.shape(), a.item_type(), 1)
}

/// Create an array with the shape and item type of `a`; the elements are
/// zero.
pub fn empty_like(a: &NdArray) -> NdArray {
    zeros_like(a)
}

/// Create an `n` by `n` `float64` identity matrix.
///
/// ```
/// use tinyarray::{eye, Scalar};
///
/// let a = eye(3);
/// assert_eq!(a.shape(), &[3, 3]);
/// assert_eq!(a.item(4).unwrap(), Scalar::Float(1.));
/// assert_eq!(a.sum(None).unwrap(), 3.);
/// ```
pub fn eye(n: usize) -> NdArray {
    let a = NdArray::zeros((n, n), ItemType::Float64);
    for i in 0..n {
        a.store(i * n + i, Scalar::Float(1.));
    }
    a
}

/// Create a one-dimensional `int64` array of `0, 1, ..., n - 1`.
pub fn arange(n: usize) -> NdArray {
    let a = NdArray::zeros(n, ItemType::Int64);
    for i in 0..n {
        a.store(i, Scalar::Int(i as i64));
    }
    a
}

/// Create a one-dimensional `float64` array of `start, start + step, ...`
/// up to, but not including, `stop`.
///
/// **Errors** with `Unsupported` if `step` is zero or not finite.
///
/// ```
/// use tinyarray::arange_step;
///
/// let a = arange_step(1., 2., 0.25).unwrap();
/// assert_eq!(a.len(), 4);
/// assert_eq!(arange_step(3., 0., -1.).unwrap().len(), 3);
/// assert!(arange_step(0., 1., 0.).is_err());
/// ```
pub fn arange_step(start: f64, stop: f64, step: f64) -> Result<NdArray, ArrayError> {
    if step == 0. || !step.is_finite() {
        return Err(from_kind(ErrorKind::Unsupported));
    }
    let n = ((stop - start) / step).ceil();
    let n = if n > 0. { n as usize } else { 0 };
    let a = NdArray::zeros(n, ItemType::Float64);
    for i in 0..n {
        a.store(i, Scalar::Float(start + step * i as f64));
    }
    Ok(a)
}

/// Create a one-dimensional `float64` array of `n` evenly spaced values
/// from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> NdArray {
    let step = if n > 1 { (stop - start) / (n - 1) as f64 } else { 0. };
    let a = NdArray::zeros(n, ItemType::Float64);
    for i in 0..n {
        // Calculate the value just like numpy.linspace does
        a.store(i, Scalar::Float(start + step * i as f64));
    }
    a
}
