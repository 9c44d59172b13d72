// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reductions and whole-array operations.
//!
//! The reductions are free functions over a [`FlatIter`], so they see the
//! elements in logical order whatever the layout of the array. Each takes
//! an `axis` argument for parity with numpy; only `None`, reducing over
//! every element, is supported, and `Some(_)` fails with `Unsupported`.
//!
//! The same operations are available as methods on [`NdArray`].

use crate::dimension::{Axis, IntoShape};
use crate::error::{from_kind, incompatible_shapes, ArrayError, ErrorKind};
use crate::itemtype::{ItemType, Scalar};
use crate::iterators::FlatIter;
use crate::NdArray;

mod impl_numeric;

fn check_axis(axis: Option<Axis>) -> Result<(), ArrayError> {
    match axis {
        None => Ok(()),
        Some(_) => Err(from_kind(ErrorKind::Unsupported)),
    }
}

/// Return the sum of all elements, computed in `f64`; `0.` when empty.
pub fn sum(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<f64, ArrayError> {
    check_axis(axis)?;
    Ok(iter.fold(0., |acc, x| acc + x.to_f64()))
}

/// Return the product of all elements, computed in `f64`; `1.` when empty.
pub fn prod(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<f64, ArrayError> {
    check_axis(axis)?;
    Ok(iter.fold(1., |acc, x| acc * x.to_f64()))
}

/// Return the arithmetic mean; NaN when empty.
pub fn mean(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<f64, ArrayError> {
    let n = iter.len();
    Ok(sum(iter, axis)? / n as f64)
}

/// Return the population variance, the mean of the squared deviations from
/// the mean; NaN when empty.
pub fn var(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<f64, ArrayError> {
    let n = iter.len();
    let m = mean(iter.clone(), axis)?;
    Ok(iter.map(|x| (x.to_f64() - m).powi(2)).sum::<f64>() / n as f64)
}

/// Return the population standard deviation, the square root of `var`.
pub fn std(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<f64, ArrayError> {
    var(iter, axis).map(f64::sqrt)
}

// Position and value of the first extreme element. A NaN wins over any
// number, as in numpy.
fn extreme(iter: FlatIter<'_>, axis: Option<Axis>, better: fn(&Scalar, &Scalar) -> bool) -> Result<(usize, Scalar), ArrayError> {
    check_axis(axis)?;
    let mut iter = iter.enumerate();
    let mut best = iter.next().ok_or_else(|| from_kind(ErrorKind::EmptyArray))?;
    for (i, x) in iter {
        if best.1.is_nan() {
            break;
        }
        if x.is_nan() || better(&x, &best.1) {
            best = (i, x);
        }
    }
    Ok(best)
}

/// Return the smallest element.
///
/// **Errors** with `EmptyArray` when there are no elements.
pub fn min(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<Scalar, ArrayError> {
    extreme(iter, axis, |a, b| a < b).map(|(_, x)| x)
}

/// Return the largest element.
///
/// **Errors** with `EmptyArray` when there are no elements.
pub fn max(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<Scalar, ArrayError> {
    extreme(iter, axis, |a, b| a > b).map(|(_, x)| x)
}

/// Return the row-major position of the first smallest element.
///
/// **Errors** with `EmptyArray` when there are no elements.
pub fn argmin(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<usize, ArrayError> {
    extreme(iter, axis, |a, b| a < b).map(|(i, _)| i)
}

/// Return the row-major position of the first largest element.
///
/// **Errors** with `EmptyArray` when there are no elements.
pub fn argmax(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<usize, ArrayError> {
    extreme(iter, axis, |a, b| a > b).map(|(i, _)| i)
}

/// Return the range of values, `max - min`, computed in `f64`.
///
/// **Errors** with `EmptyArray` when there are no elements.
pub fn ptp(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<f64, ArrayError> {
    let lo = min(iter.clone(), axis)?;
    let hi = max(iter, axis)?;
    Ok(hi.to_f64() - lo.to_f64())
}

/// Return `true` if every element is nonzero; `true` when empty.
pub fn all(mut iter: FlatIter<'_>, axis: Option<Axis>) -> Result<bool, ArrayError> {
    check_axis(axis)?;
    Ok(iter.all(Scalar::to_bool))
}

/// Return `true` if any element is nonzero; `false` when empty.
pub fn any(mut iter: FlatIter<'_>, axis: Option<Axis>) -> Result<bool, ArrayError> {
    check_axis(axis)?;
    Ok(iter.any(Scalar::to_bool))
}

#[derive(Copy, Clone)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn identity(self, item_type: ItemType) -> Scalar {
        let one = matches!(self, Op::Mul) as u8;
        match item_type {
            ItemType::Int64 => Scalar::Int(one as i64),
            ItemType::UInt64 => Scalar::UInt(one as u64),
            _ => Scalar::Float(one as f64),
        }
    }

    // Integer accumulators wrap on overflow, like fixed-width arithmetic.
    fn apply(self, acc: Scalar, x: Scalar) -> Scalar {
        match (acc, self) {
            (Scalar::Int(a), Op::Add) => Scalar::Int(a.wrapping_add(x.to_i64())),
            (Scalar::Int(a), Op::Mul) => Scalar::Int(a.wrapping_mul(x.to_i64())),
            (Scalar::UInt(a), Op::Add) => Scalar::UInt(a.wrapping_add(x.to_u64())),
            (Scalar::UInt(a), Op::Mul) => Scalar::UInt(a.wrapping_mul(x.to_u64())),
            (acc, Op::Add) => Scalar::Float(acc.to_f64() + x.to_f64()),
            (acc, Op::Mul) => Scalar::Float(acc.to_f64() * x.to_f64()),
        }
    }
}

fn accumulate(iter: FlatIter<'_>, axis: Option<Axis>, op: Op) -> Result<NdArray, ArrayError> {
    check_axis(axis)?;
    let item_type = iter.array().item_type().accumulator();
    let out = NdArray::zeros(iter.len(), item_type);
    let mut acc = op.identity(item_type);
    for (i, x) in iter.enumerate() {
        acc = op.apply(acc, x);
        out.store(i, acc);
    }
    Ok(out)
}

/// Return the running totals as a new one-dimensional array.
///
/// The result has the accumulator type of the input: `int64` for bool and
/// integers narrower than 64 bits, otherwise the input type.
pub fn cumsum(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<NdArray, ArrayError> {
    accumulate(iter, axis, Op::Add)
}

/// Return the running products as a new one-dimensional array, typed like
/// `cumsum`.
pub fn cumprod(iter: FlatIter<'_>, axis: Option<Axis>) -> Result<NdArray, ArrayError> {
    accumulate(iter, axis, Op::Mul)
}

/// Limit the values of `a` to `[lo, hi]`.
///
/// The result is written to `out` when given, which must have as many
/// elements as `a` and may be `a` itself; the return value is then a view
/// of `out`. Otherwise it is a new array with the shape and item type of
/// `a`.
///
/// **Errors** with `IncompatibleShape` if `out` has another size, and with
/// `ReadOnly` if `out` is read-only.
pub fn clip(a: &NdArray, lo: Scalar, hi: Scalar, out: Option<&NdArray>) -> Result<NdArray, ArrayError> {
    let out = match out {
        Some(out) if out.len() != a.len() => return Err(incompatible_shapes(a.shape(), out.shape())),
        Some(out) => out.view(),
        None => NdArray::zeros(a.shape(), a.item_type()),
    };
    for (i, x) in a.iter().enumerate() {
        let x = if x < lo {
            lo
        } else if x > hi {
            hi
        } else {
            x
        };
        out.put(i, x)?;
    }
    Ok(out)
}

/// Return a one-dimensional copy of the elements in logical order.
pub fn ravel(a: &NdArray) -> NdArray {
    a.flatten()
}

/// Return a one-dimensional array with each element of `a` repeated `n`
/// times in a row.
///
/// ```
/// use tinyarray::{arange, numeric};
///
/// let r = numeric::repeat(&arange(3), 2);
/// assert_eq!(r, tinyarray::array(vec![0, 0, 1, 1, 2, 2], None));
/// ```
pub fn repeat(a: &NdArray, n: usize) -> NdArray {
    let out = NdArray::zeros(a.len() * n, a.item_type());
    let repeated = a.iter().flat_map(|x| itertools::repeat_n(x, n));
    for (i, x) in repeated.enumerate() {
        out.store(i, x);
    }
    out
}

/// Return a contiguous copy of `a` with a new shape.
///
/// **Errors** with `IncompatibleShape` if the number of elements differs.
pub fn reshape<E: IntoShape>(a: &NdArray, shape: E) -> Result<NdArray, ArrayError> {
    a.reshape(shape)
}

/// Set every element of `a` to `value`.
///
/// **Errors** with `ReadOnly` if the buffer is read-only.
pub fn fill(a: &NdArray, value: Scalar) -> Result<(), ArrayError> {
    for i in 0..a.len() {
        a.put(i, value)?;
    }
    Ok(())
}

/// Return a new array owning a contiguous copy of `a`.
pub fn copy(a: &NdArray) -> NdArray {
    a.copy()
}
