// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::iter::FusedIterator;

use crate::dimension::{self, next_for, prev_for};
use crate::error::ArrayError;
use crate::itemtype::Scalar;
use crate::{Ix, NdArray};

/// An iterator over the elements of an array in row-major (logical) order,
/// last axis fastest, whatever the memory layout.
///
/// Iterator element type is `Scalar`. The iterator is double ended; the
/// front and the back each keep their own multi-index and meet in the
/// middle.
///
/// `len()`, from `ExactSizeIterator`, is the number of elements not yet
/// yielded; [`size`](FlatIter::size) is the element count of the whole
/// array.
///
/// Created with [`NdArray::iter`].
#[derive(Clone)]
pub struct FlatIter<'a> {
    array: &'a NdArray,
    front: Vec<Ix>,
    back: Vec<Ix>,
    remaining: usize,
}

impl<'a> FlatIter<'a> {
    pub(crate) fn new(array: &'a NdArray) -> Self {
        let size = array.len();
        let front = vec![0; array.ndim()];
        let back = if size == 0 {
            front.clone()
        } else {
            array.shape().iter().map(|&d| d - 1).collect()
        };
        FlatIter {
            array,
            front,
            back,
            remaining: size,
        }
    }

    /// The array being iterated.
    pub fn array(&self) -> &'a NdArray {
        self.array
    }

    /// Return the total number of elements of the array, however far the
    /// iteration has progressed.
    pub fn size(&self) -> usize {
        self.array.len()
    }

    /// Return the element at row-major position `linear`, independent of
    /// the iteration state.
    pub fn get_item(&self, linear: usize) -> Result<Scalar, ArrayError> {
        self.array.item(linear)
    }

    /// Return the multi-index of the element that `next` yields, or `None`
    /// if the iterator is exhausted.
    pub fn index(&self) -> Option<&[Ix]> {
        if self.remaining == 0 {
            None
        } else {
            Some(&self.front)
        }
    }

    #[inline]
    fn read(&self, index: &[Ix]) -> Scalar {
        let a = self.array;
        a.data
            .read(dimension::offset_of_index(index, &a.strides, a.offset))
    }
}

impl<'a> Iterator for FlatIter<'a> {
    type Item = Scalar;

    #[inline]
    fn next(&mut self) -> Option<Scalar> {
        if self.remaining == 0 {
            return None;
        }
        let elt = self.read(&self.front);
        self.remaining -= 1;
        if self.remaining > 0 {
            next_for(&self.array.shape, &mut self.front);
        }
        Some(elt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for FlatIter<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Scalar> {
        if self.remaining == 0 {
            return None;
        }
        let elt = self.read(&self.back);
        self.remaining -= 1;
        if self.remaining > 0 {
            prev_for(&self.array.shape, &mut self.back);
        }
        Some(elt)
    }
}

impl<'a> ExactSizeIterator for FlatIter<'a> {}

impl<'a> FusedIterator for FlatIter<'a> {}
