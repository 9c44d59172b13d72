// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shape and stride arithmetic, and translation of indexing keys into
//! `(shape, strides, offset)` triples.

use num_integer::Integer;

use crate::error::{from_kind, ArrayError, ErrorKind};
use crate::slice::SliceInfoElem;
use crate::{Ix, Ixs};

pub use self::axis::Axis;
pub use self::conversion::IntoShape;

mod axis;
pub(crate) mod conversion;

/// Compute the canonical row-major strides for `shape`.
///
/// Shape (a, b, c) => Give strides (b * c, c, 1)
pub fn strides_for_shape(shape: &[Ix]) -> Vec<Ixs> {
    let mut strides = vec![0; shape.len()];
    let mut cum_prod = 1;
    for (rs, &dim) in strides.iter_mut().zip(shape).rev() {
        *rs = cum_prod as Ixs;
        cum_prod *= dim;
    }
    strides
}

/// Return the number of elements of `shape`: the product of the axis
/// lengths. The empty shape has one element.
#[inline]
pub fn size_of_shape(shape: &[Ix]) -> usize {
    shape.iter().product()
}

/// Return the number of elements of `shape`, or `None` if the product, or
/// the product of the nonzero axis lengths, overflows `isize`.
pub fn size_of_shape_checked(shape: &[Ix]) -> Option<usize> {
    let size_nonzero = shape
        .iter()
        .filter(|&&d| d != 0)
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))?;
    if size_nonzero > isize::MAX as usize {
        None
    } else {
        Some(size_of_shape(shape))
    }
}

/// Ceiling division, rounding toward positive infinity.
///
/// Used for the length of a slice: `ceil_div(stop - start, step)`.
#[inline]
pub fn ceil_div(a: Ixs, b: Ixs) -> Ixs {
    Integer::div_ceil(&a, &b)
}

/// Calculate offset from `Ix` index and `Ixs` stride
#[inline(always)]
pub fn stride_offset(n: Ix, stride: Ixs) -> isize {
    (n as isize) * stride
}

/// Return `true` if `strides` are the canonical row-major strides for
/// `shape`.
///
/// Axes of length 1 are never advanced along, so their stride is not
/// compared; an array without elements is contiguous.
pub fn is_contiguous(shape: &[Ix], strides: &[Ixs]) -> bool {
    if shape.iter().any(|&d| d == 0) {
        return true;
    }
    let defaults = strides_for_shape(shape);
    shape
        .iter()
        .zip(strides)
        .zip(&defaults)
        .all(|((&d, &s), &c)| d == 1 || s == c)
}

/// Check whether the given shape, strides and offset are memory safe to
/// index a buffer of `len` elements: every element reachable through them
/// must lie in `[0, len)`.
pub fn can_index_buffer(len: usize, shape: &[Ix], strides: &[Ixs], offset: usize) -> Result<(), ArrayError> {
    if shape.len() != strides.len() {
        return Err(from_kind(ErrorKind::IncompatibleShape));
    }
    // no element is accessed
    if shape.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let mut min_offset = offset as isize;
    let mut max_offset = offset as isize;
    for (&dim, &stride) in shape.iter().zip(strides) {
        let end = stride
            .checked_mul(dim as isize - 1)
            .ok_or_else(|| from_kind(ErrorKind::OutOfBounds))?;
        if end >= 0 {
            max_offset = max_offset.checked_add(end).ok_or_else(|| from_kind(ErrorKind::OutOfBounds))?;
        } else {
            min_offset = min_offset.checked_add(end).ok_or_else(|| from_kind(ErrorKind::OutOfBounds))?;
        }
    }
    if min_offset < 0 || max_offset as usize >= len {
        return Err(from_kind(ErrorKind::OutOfBounds));
    }
    Ok(())
}

/// Normalize a possibly negative index against an axis of length `len`.
///
/// Valid indexes are `[-len, len)`; anything else is `OutOfBounds`.
#[inline]
pub fn abs_index(len: Ix, index: Ixs) -> Result<Ix, ArrayError> {
    let len = len as isize;
    let index = if index < 0 { index + len } else { index };
    if index < 0 || index >= len {
        Err(from_kind(ErrorKind::OutOfBounds))
    } else {
        Ok(index as Ix)
    }
}

/// Translate an indexing key applied to a view `(shape, strides, offset)`
/// into the `(shape, strides, offset)` of the selected sub-view.
///
/// Selectors are matched to source axes left to right. An index consumes an
/// axis and drops it, a slice consumes an axis and resizes it, a new axis
/// consumes nothing and inserts an axis of length 1 and stride 0. Axes
/// without a selector pass through unchanged. A result without axes is
/// collapsed to the one element view of shape `[1]` and stride `[0]`.
pub fn translate_key(
    shape: &[Ix],
    strides: &[Ixs],
    offset: usize,
    key: &[SliceInfoElem],
) -> Result<(Vec<Ix>, Vec<Ixs>, usize), ArrayError> {
    let mut new_shape = Vec::with_capacity(shape.len() + key.len());
    let mut new_strides = Vec::with_capacity(shape.len() + key.len());
    let mut offset = offset as isize;
    let mut axis = 0;
    for elem in key {
        match *elem {
            SliceInfoElem::NewAxis => {
                new_shape.push(1);
                new_strides.push(0);
                continue;
            }
            SliceInfoElem::Ellipsis | SliceInfoElem::Mask(_) | SliceInfoElem::Indices(_) => {
                return Err(from_kind(ErrorKind::Unsupported));
            }
            _ => {}
        }
        if axis >= shape.len() {
            // too many indices for the array
            return Err(from_kind(ErrorKind::OutOfBounds));
        }
        let (len, stride) = (shape[axis], strides[axis]);
        match *elem {
            SliceInfoElem::Index(i) => {
                offset += stride_offset(abs_index(len, i)?, stride);
            }
            SliceInfoElem::Slice(ref slice) => {
                let (start, stop, step) = slice.indices(len).ok_or_else(|| from_kind(ErrorKind::Unsupported))?;
                let m = ceil_div(stop - start, step).max(0) as Ix;
                // an empty axis does not move the origin
                if m > 0 {
                    offset += start * stride;
                }
                new_shape.push(m);
                new_strides.push(step * stride);
            }
            _ => unreachable!(),
        }
        axis += 1;
    }
    new_shape.extend_from_slice(&shape[axis..]);
    new_strides.extend_from_slice(&strides[axis..]);
    if new_shape.is_empty() {
        new_shape.push(1);
        new_strides.push(0);
    }
    if offset < 0 {
        return Err(from_kind(ErrorKind::OutOfBounds));
    }
    Ok((new_shape, new_strides, offset as usize))
}

/// Convert a row-major linear index into a multi-index for `shape`.
pub fn unravel_index(mut linear: usize, shape: &[Ix]) -> Vec<Ix> {
    let mut index = vec![0; shape.len()];
    for (ix, &dim) in index.iter_mut().zip(shape).rev() {
        if dim != 0 {
            *ix = linear % dim;
            linear /= dim;
        }
    }
    index
}

/// Return the buffer offset of the element at row-major position `linear`
/// of the view `(shape, strides, offset)`, without allocating.
pub fn offset_of_linear(mut linear: usize, shape: &[Ix], strides: &[Ixs], offset: usize) -> usize {
    let mut off = offset as isize;
    for (&dim, &stride) in shape.iter().zip(strides).rev() {
        if dim != 0 {
            off += stride_offset(linear % dim, stride);
            linear /= dim;
        }
    }
    off as usize
}

/// Return the buffer offset of multi-index `index`.
#[inline]
pub fn offset_of_index(index: &[Ix], strides: &[Ixs], offset: usize) -> usize {
    let off: isize = index
        .iter()
        .zip(strides)
        .map(|(&i, &s)| stride_offset(i, s))
        .sum();
    (offset as isize + off) as usize
}

/// Advance `index` to the next multi-index in row-major order (last axis
/// fastest), carrying into higher axes.
///
/// Return `false`, leaving `index` all zero, when the first axis overflows.
#[inline]
pub fn next_for(shape: &[Ix], index: &mut [Ix]) -> bool {
    for (&dim, ix) in shape.iter().zip(index.iter_mut()).rev() {
        *ix += 1;
        if *ix == dim {
            *ix = 0;
        } else {
            return true;
        }
    }
    false
}

/// Step `index` back to the previous multi-index in row-major order,
/// borrowing from higher axes.
///
/// Return `false` when `index` was all zero.
#[inline]
pub fn prev_for(shape: &[Ix], index: &mut [Ix]) -> bool {
    for (&dim, ix) in shape.iter().zip(index.iter_mut()).rev() {
        if *ix == 0 {
            *ix = dim - 1;
        } else {
            *ix -= 1;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{s, NewAxis};
    use quickcheck::quickcheck;

    #[test]
    fn canonical_strides() {
        assert_eq!(strides_for_shape(&[]), Vec::<isize>::new());
        assert_eq!(strides_for_shape(&[5]), vec![1]);
        assert_eq!(strides_for_shape(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(strides_for_shape(&[9, 4, 5, 6]), vec![120, 30, 6, 1]);
    }

    #[test]
    fn sizes() {
        assert_eq!(size_of_shape(&[]), 1);
        assert_eq!(size_of_shape(&[3, 0, 2]), 0);
        assert_eq!(size_of_shape_checked(&[usize::MAX, 2]), None);
        assert_eq!(size_of_shape_checked(&[usize::MAX, 0]), None);
        assert_eq!(size_of_shape_checked(&[4, 4]), Some(16));
    }

    #[test]
    fn ceiling_division() {
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(ceil_div(6, 2), 3);
        assert_eq!(ceil_div(-4, -1), 4);
        assert_eq!(ceil_div(-3, -2), 2);
        assert_eq!(ceil_div(-1, 1), -1);
    }

    #[test]
    fn contiguity() {
        assert!(is_contiguous(&[4, 4], &[4, 1]));
        assert!(!is_contiguous(&[4, 2], &[4, 1]));
        assert!(is_contiguous(&[1, 4, 4], &[0, 4, 1]));
        assert!(is_contiguous(&[0, 4], &[7, 7]));
    }

    #[test]
    fn slice_indexing_uncommon_strides() {
        let shape = [2, 3, 2];
        assert!(can_index_buffer(12, &shape, &[1, 2, 6], 0).is_ok());
        assert_eq!(
            can_index_buffer(12, &shape, &[2, 4, 12], 0),
            Err(from_kind(ErrorKind::OutOfBounds))
        );
        assert!(can_index_buffer(4, &[4], &[-1], 3).is_ok());
        assert!(can_index_buffer(4, &[4], &[-1], 2).is_err());
        assert!(can_index_buffer(0, &[0, 3], &[3, 1], 0).is_ok());
    }

    #[test]
    fn translate_rows_and_columns() {
        let (shape, strides) = (vec![4, 4], vec![4, 1]);
        let (s, st, off) = translate_key(&shape, &strides, 0, &s![1..]).unwrap();
        assert_eq!((s, st, off), (vec![3, 4], vec![4, 1], 4));
        let (s, st, off) = translate_key(&shape, &strides, 0, &s![-1.., 1]).unwrap();
        assert_eq!((s, st, off), (vec![1], vec![4], 13));
        let (s, st, off) = translate_key(&shape, &strides, 0, &s![..;-1, 1..3]).unwrap();
        assert_eq!((s, st, off), (vec![4, 2], vec![-4, 1], 13));
    }

    #[test]
    fn translate_new_axis_and_scalar() {
        let (s, st, off) = translate_key(&[3], &[1], 0, &s![NewAxis, ..]).unwrap();
        assert_eq!((s, st, off), (vec![1, 3], vec![0, 1], 0));
        let (s, st, off) = translate_key(&[2, 3], &[3, 1], 0, &s![1, 2]).unwrap();
        assert_eq!((s, st, off), (vec![1], vec![0], 5));
    }

    #[test]
    fn translate_errors() {
        let err = translate_key(&[3], &[1], 0, &s![3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = translate_key(&[3], &[1], 0, &s![-4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = translate_key(&[3], &[1], 0, &s![0, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = translate_key(&[3], &[1], 0, &[SliceInfoElem::Ellipsis]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        let err = translate_key(&[3], &[1], 0, &s![..;0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn step_back_and_forth() {
        let shape = [2, 3];
        let mut ix = vec![0, 0];
        let mut seen = vec![ix.clone()];
        while next_for(&shape, &mut ix) {
            seen.push(ix.clone());
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[4], vec![1, 1]);
        let mut ix = vec![1, 2];
        let mut back = vec![ix.clone()];
        while prev_for(&shape, &mut ix) {
            back.push(ix.clone());
        }
        back.reverse();
        assert_eq!(seen, back);
    }

    quickcheck! {
        fn canonical_traversal_visits_each_slot_once(shape: Vec<u8>) -> bool {
            let shape: Vec<usize> = shape.iter().take(4).map(|&d| d as usize % 5 + 1).collect();
            let strides = strides_for_shape(&shape);
            let size = size_of_shape(&shape);
            (0..size).all(|i| offset_of_linear(i, &shape, &strides, 0) == i)
                && unravel_index(size - 1, &shape).iter().zip(&shape).all(|(&i, &d)| i == d - 1)
        }

        fn size_is_product(shape: Vec<u8>) -> bool {
            let shape: Vec<usize> = shape.iter().take(5).map(|&d| d as usize % 7).collect();
            size_of_shape(&shape) == shape.iter().fold(1, |acc, &d| acc * d)
        }
    }
}
