// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for `NdArray`.

use std::rc::Rc;

use crate::data_repr::Buffer;
use crate::dimension::{self, IntoShape};
use crate::error::{from_kind, incompatible_shapes, ArrayError, ErrorKind};
use crate::itemtype::{Element, ItemType, Scalar};
use crate::{Ix, Ixs, NdArray};

macro_rules! size_checked_unwrap {
    ($shape:expr) => {
        match dimension::size_of_shape_checked(&$shape) {
            Some(sz) => sz,
            None => panic!("tinyarray: Shape too large, number of elements overflows usize"),
        }
    };
}

impl NdArray {
    /// Create an array over `buffer`, or over a fresh zeroed buffer of the
    /// shape's size when `buffer` is `None`.
    ///
    /// `strides` are in elements and default to the canonical row-major
    /// strides of `shape`. The new array owns its buffer (it has no base).
    ///
    /// **Errors** with `OutOfBounds` if some element reachable through the
    /// strides lies outside the buffer, with `IncompatibleShape` if the
    /// strides and the shape differ in length, and with `Unsupported` if the
    /// buffer holds another item type.
    ///
    /// **Panics** if the number of elements overflows `usize`.
    ///
    /// ```
    /// use tinyarray::{Buffer, ItemType, NdArray, Scalar};
    ///
    /// let mut raw = [1u8, 2, 3, 4, 5, 6];
    /// let buffer = unsafe { Buffer::from_raw_parts(raw.as_mut_ptr(), ItemType::UInt8, 6) };
    /// // every other element, as a 3 x 1 column
    /// let a = NdArray::new((3, 1), ItemType::UInt8, Some(vec![2, 1]), Some(buffer)).unwrap();
    /// assert_eq!(a.item(2).unwrap(), Scalar::UInt(5));
    /// a.put(0, 9).unwrap();
    /// drop(a);
    /// assert_eq!(raw[0], 9);
    /// ```
    pub fn new<E>(
        shape: E,
        item_type: ItemType,
        strides: Option<Vec<Ixs>>,
        buffer: Option<Buffer>,
    ) -> Result<NdArray, ArrayError>
    where
        E: IntoShape,
    {
        let shape = shape.into_shape();
        let size = size_checked_unwrap!(shape);
        let strides = strides.unwrap_or_else(|| dimension::strides_for_shape(&shape));
        let buffer = match buffer {
            Some(b) if b.item_type() != item_type => return Err(from_kind(ErrorKind::Unsupported)),
            Some(b) => b,
            None => Buffer::allocate(item_type, size),
        };
        dimension::can_index_buffer(buffer.len(), &shape, &strides, 0)?;
        Ok(NdArray::from_parts(Rc::new(buffer), shape, strides, 0, false))
    }

    /// Create a contiguous array of the given shape and item type, filled
    /// with zeros.
    ///
    /// **Panics** if the number of elements overflows `usize`.
    pub fn zeros<E: IntoShape>(shape: E, item_type: ItemType) -> NdArray {
        let shape = shape.into_shape();
        let size = size_checked_unwrap!(shape);
        NdArray::from_buffer(Buffer::allocate(item_type, size), shape)
    }

    /// Create a contiguous array of the given shape and item type, with every
    /// element set to `elem` (coerced to the item type).
    ///
    /// **Panics** if the number of elements overflows `usize`.
    pub fn from_elem<E, V>(shape: E, item_type: ItemType, elem: V) -> NdArray
    where
        E: IntoShape,
        V: Into<Scalar>,
    {
        let a = NdArray::zeros(shape, item_type);
        let elem = elem.into();
        for i in 0..a.len() {
            a.store(i, elem);
        }
        a
    }

    /// Create a one-dimensional array holding the elements of `v`.
    ///
    /// ```
    /// use tinyarray::{ItemType, NdArray};
    ///
    /// let a = NdArray::from_vec(vec![1.5f32, 2., 3.]);
    /// assert_eq!(a.shape(), &[3]);
    /// assert_eq!(a.item_type(), ItemType::Float32);
    /// ```
    pub fn from_vec<A: Element>(v: Vec<A>) -> NdArray {
        let len = v.len();
        NdArray::from_buffer(Buffer::from_vec(v), vec![len])
    }

    /// Create a contiguous array of the given shape from a vector of elements
    /// in row-major order.
    ///
    /// **Errors** with `IncompatibleShape` if the shape does not hold exactly
    /// `v.len()` elements.
    pub fn from_shape_vec<E, A>(shape: E, v: Vec<A>) -> Result<NdArray, ArrayError>
    where
        E: IntoShape,
        A: Element,
    {
        let shape = shape.into_shape();
        if dimension::size_of_shape_checked(&shape) != Some(v.len()) {
            return Err(incompatible_shapes(&shape, &[v.len()]));
        }
        Ok(NdArray::from_buffer(Buffer::from_vec(v), shape))
    }

    fn from_buffer(buffer: Buffer, shape: Vec<Ix>) -> NdArray {
        let strides = dimension::strides_for_shape(&shape);
        NdArray::from_parts(Rc::new(buffer), shape, strides, 0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_strides_outside_the_buffer() {
        let b = Buffer::allocate(ItemType::Int16, 6);
        let res = NdArray::new((2, 3), ItemType::Int16, Some(vec![3, 2]), Some(b));
        assert_eq!(res.unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn new_rejects_mismatched_item_type() {
        let b = Buffer::allocate(ItemType::Int16, 6);
        let res = NdArray::new(6, ItemType::Int32, None, Some(b));
        assert_eq!(res.unwrap_err().kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn new_allocates_zeroed_storage() {
        let a = NdArray::new((2, 2), ItemType::Bool, None, None).unwrap();
        assert!(a.owns_data());
        assert_eq!(a.strides(), &[2, 1]);
        assert!(a.iter().all(|x| x == Scalar::Bool(false)));
    }

    #[test]
    fn from_shape_vec_checks_size() {
        assert!(NdArray::from_shape_vec((2, 2), vec![1u16, 2, 3, 4]).is_ok());
        let err = NdArray::from_shape_vec((2, 2), vec![1u16, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleShape);
    }

    #[test]
    fn from_elem_coerces() {
        let a = NdArray::from_elem(4, ItemType::Int8, 3.7);
        assert!(a.iter().all(|x| x == Scalar::Int(3)));
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn zeros_overflow_panics() {
        NdArray::zeros((usize::MAX, 2), ItemType::UInt8);
    }
}
