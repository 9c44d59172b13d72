// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::rc::Rc;

use crate::data_repr::Buffer;
use crate::dimension::{self, IntoShape};
use crate::error::{from_kind, incompatible_shapes, ArrayError, ErrorKind};
use crate::itemtype::{ItemType, Scalar};
use crate::iterators::FlatIter;
use crate::nested::Nested;
use crate::slice::IntoKey;
use crate::{Ix, Ixs, NdArray};

impl NdArray {
    pub(crate) fn from_parts(data: Rc<Buffer>, shape: Vec<Ix>, strides: Vec<Ixs>, offset: usize, is_view: bool) -> Self {
        debug_assert!(dimension::can_index_buffer(data.len(), &shape, &strides, offset).is_ok());
        NdArray {
            data,
            shape,
            strides,
            offset,
            is_view,
        }
    }

    /// Return a new view of `self` with the given layout, sharing the buffer.
    fn with_layout(&self, shape: Vec<Ix>, strides: Vec<Ixs>, offset: usize) -> NdArray {
        NdArray::from_parts(self.data.clone(), shape, strides, offset, true)
    }

    /// Return the total number of elements in the array.
    pub fn len(&self) -> usize {
        dimension::size_of_shape(&self.shape)
    }

    /// Return the total number of elements in the array; same as `len`.
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Return whether the array has any elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the number of dimensions (axes) in the array
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Return the shape of the array as a slice.
    pub fn shape(&self) -> &[Ix] {
        &self.shape
    }

    /// Return the strides of the array, in elements.
    pub fn strides(&self) -> &[Ixs] {
        &self.strides
    }

    /// Return the strides of the array, in bytes.
    pub fn byte_strides(&self) -> Vec<Ixs> {
        let itemsize = self.itemsize() as isize;
        self.strides.iter().map(|&s| s * itemsize).collect()
    }

    /// Return the buffer index of the element at the all-zero index.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn item_type(&self) -> ItemType {
        self.data.item_type()
    }

    /// Return the size of one element in bytes.
    pub fn itemsize(&self) -> usize {
        self.item_type().itemsize()
    }

    /// Return the number of bytes spanned by the elements of the view.
    pub fn nbytes(&self) -> usize {
        self.len() * self.itemsize()
    }

    /// Return the buffer the array reads from and writes to.
    pub fn buffer(&self) -> &Rc<Buffer> {
        &self.data
    }

    /// Return `true` if the strides are the canonical row-major strides of
    /// the shape, ignoring axes of length 1.
    pub fn is_contiguous(&self) -> bool {
        dimension::is_contiguous(&self.shape, &self.strides)
    }

    /// Return `true` if the array owns its buffer: it has no base and the
    /// buffer was not adopted from a foreign caller.
    pub fn owns_data(&self) -> bool {
        !self.is_view && !self.data.is_foreign()
    }

    /// Return `true` if the array is a view of another array.
    pub fn is_view(&self) -> bool {
        self.is_view
    }

    /// Return `true` if `base` is the base of `self`: `self` is a view and
    /// `base` is the array owning the buffer it shares.
    ///
    /// ```
    /// use tinyarray::{arange, s};
    ///
    /// let a = arange(6);
    /// let b = a.get(s![1..]).unwrap();
    /// let c = b.get(s![..;2]).unwrap();
    /// assert!(b.base_is(&a) && c.base_is(&a));
    /// assert!(!c.base_is(&b));
    /// ```
    pub fn base_is(&self, base: &NdArray) -> bool {
        self.is_view && !base.is_view && self.shares_buffer(base)
    }

    /// Return `true` if both arrays read from the same buffer.
    pub fn shares_buffer(&self, other: &NdArray) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Return a view of the whole array.
    pub fn view(&self) -> NdArray {
        self.with_layout(self.shape.clone(), self.strides.clone(), self.offset)
    }

    /// Return a view with the axes in reverse order.
    ///
    /// Transposing a one-dimensional array returns a view of it unchanged.
    pub fn transpose(&self) -> NdArray {
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.reverse();
        strides.reverse();
        self.with_layout(shape, strides, self.offset)
    }

    /// Return a view of the elements selected by `key`.
    ///
    /// The view shares the buffer; writes through it are visible through
    /// `self`. A key that selects one element yields shape `[1]`.
    ///
    /// **Errors** with `OutOfBounds` for an integer index outside
    /// `[-len, len)` or more selectors than axes, and with `Unsupported` for
    /// an ellipsis, a mask, an index array or a zero step.
    ///
    /// ```
    /// use tinyarray::{arange, s, NewAxis};
    ///
    /// let a = arange(16).into_shape((4, 4)).unwrap();
    /// assert_eq!(a.get(s![1.., 1..]).unwrap().shape(), &[3, 3]);
    /// assert_eq!(a.get(s![-1.., 1]).unwrap().shape(), &[1]);
    /// assert_eq!(a.get(s![NewAxis, 2]).unwrap().shape(), &[1, 4]);
    /// assert!(a.get(4).is_err());
    /// ```
    pub fn get<K: IntoKey>(&self, key: K) -> Result<NdArray, ArrayError> {
        let key = key.into_key();
        let (shape, strides, offset) = dimension::translate_key(&self.shape, &self.strides, self.offset, &key)?;
        Ok(self.with_layout(shape, strides, offset))
    }

    /// Write `value` to every element selected by `key`, in logical order,
    /// coerced to the item type.
    ///
    /// **Errors** as `get` for an invalid key, and with `ReadOnly` when the
    /// buffer is read-only.
    pub fn set<K, V>(&self, key: K, value: V) -> Result<(), ArrayError>
    where
        K: IntoKey,
        V: Into<Scalar>,
    {
        self.get(key)?.fill(value)
    }

    /// Copy the elements of `source` into the elements selected by `key`,
    /// both taken in logical order.
    ///
    /// **Errors** with `IncompatibleShape` if the selection and `source`
    /// differ in size.
    pub fn assign<K: IntoKey>(&self, key: K, source: &NdArray) -> Result<(), ArrayError> {
        let target = self.get(key)?;
        if target.len() != source.len() {
            return Err(incompatible_shapes(&target.shape, &source.shape));
        }
        if self.data.is_read_only() {
            return Err(from_kind(ErrorKind::ReadOnly));
        }
        // read everything first when the two may overlap
        let staged;
        let source = if source.shares_buffer(&target) {
            staged = source.copy();
            &staged
        } else {
            source
        };
        for (i, x) in source.iter().enumerate() {
            target.put(i, x)?;
        }
        Ok(())
    }

    /// Return the value of a one-element array.
    ///
    /// **Errors** with `IncompatibleShape` unless the array has exactly one
    /// element.
    pub fn to_scalar(&self) -> Result<Scalar, ArrayError> {
        if self.len() != 1 {
            return Err(incompatible_shapes(&self.shape, &[1]));
        }
        Ok(self.data.read(self.offset))
    }

    /// Return the element at row-major position `linear`.
    ///
    /// **Errors** with `OutOfBounds` if `linear >= self.len()`.
    pub fn item(&self, linear: usize) -> Result<Scalar, ArrayError> {
        Ok(self.data.read(self.linear_offset(linear)?))
    }

    /// Write `value` at row-major position `linear`.
    ///
    /// **Errors** with `OutOfBounds` if `linear >= self.len()`, and with
    /// `ReadOnly` when the buffer is read-only.
    pub fn put<V: Into<Scalar>>(&self, linear: usize, value: V) -> Result<(), ArrayError> {
        self.data.write(self.linear_offset(linear)?, value.into())
    }

    fn linear_offset(&self, linear: usize) -> Result<usize, ArrayError> {
        if linear >= self.len() {
            return Err(from_kind(ErrorKind::OutOfBounds));
        }
        Ok(dimension::offset_of_linear(linear, &self.shape, &self.strides, self.offset))
    }

    /// Write at row-major position `linear` of an array the crate has just
    /// allocated.
    pub(crate) fn store(&self, linear: usize, value: Scalar) {
        let off = dimension::offset_of_linear(linear, &self.shape, &self.strides, self.offset);
        self.data.store(off, value)
    }

    /// Return an iterator over the elements in logical (row-major) order.
    pub fn iter(&self) -> FlatIter<'_> {
        FlatIter::new(self)
    }

    /// Change the shape of the array in place, without copying.
    ///
    /// **Errors** with `IncompatibleShape` if the number of elements would
    /// change, and with `IncompatibleLayout` if the array is not contiguous.
    ///
    /// ```
    /// use tinyarray::{arange, s, ErrorKind};
    ///
    /// let mut a = arange(6);
    /// a.set_shape((2, 3)).unwrap();
    /// assert_eq!(a.strides(), &[3, 1]);
    ///
    /// let mut t = a.transpose();
    /// assert_eq!(t.set_shape(6).unwrap_err().kind(), ErrorKind::IncompatibleLayout);
    /// assert_eq!(a.set_shape(4).unwrap_err().kind(), ErrorKind::IncompatibleShape);
    /// ```
    pub fn set_shape<E: IntoShape>(&mut self, shape: E) -> Result<(), ArrayError> {
        let shape = shape.into_shape();
        if dimension::size_of_shape_checked(&shape) != Some(self.len()) {
            return Err(incompatible_shapes(&self.shape, &shape));
        }
        if !self.is_contiguous() {
            return Err(from_kind(ErrorKind::IncompatibleLayout));
        }
        self.strides = dimension::strides_for_shape(&shape);
        self.shape = shape;
        Ok(())
    }

    /// Consume the array and return it with a new shape, without copying.
    ///
    /// **Errors** like `set_shape`.
    pub fn into_shape<E: IntoShape>(mut self, shape: E) -> Result<NdArray, ArrayError> {
        self.set_shape(shape)?;
        Ok(self)
    }

    /// Return a contiguous copy of the array with a new shape. Works for any
    /// layout.
    ///
    /// **Errors** with `IncompatibleShape` if the number of elements differs.
    pub fn reshape<E: IntoShape>(&self, shape: E) -> Result<NdArray, ArrayError> {
        self.copy().into_shape(shape)
    }

    /// Return a new array owning a contiguous copy of the elements, with the
    /// same shape and item type.
    pub fn copy(&self) -> NdArray {
        let out = NdArray::zeros(self.shape.clone(), self.item_type());
        for (i, x) in self.iter().enumerate() {
            out.store(i, x);
        }
        out
    }

    /// Return a one-dimensional copy of the elements in logical order.
    pub fn flatten(&self) -> NdArray {
        let out = NdArray::zeros(vec![self.len()], self.item_type());
        for (i, x) in self.iter().enumerate() {
            out.store(i, x);
        }
        out
    }

    /// Return a one-dimensional copy of the elements in logical order; same
    /// as `flatten`.
    pub fn ravel(&self) -> NdArray {
        self.flatten()
    }

    /// Return the elements as nested lists, one level per axis.
    pub fn to_nested(&self) -> Nested {
        fn build(a: &NdArray, axis: usize, offset: isize) -> Nested {
            if axis == a.ndim() {
                return Nested::Scalar(a.data.read(offset as usize));
            }
            let stride = a.strides[axis];
            Nested::List(
                (0..a.shape[axis])
                    .map(|k| build(a, axis + 1, offset + dimension::stride_offset(k, stride)))
                    .collect(),
            )
        }
        build(self, 0, self.offset as isize)
    }
}

impl PartialEq for NdArray {
    /// Arrays are equal when their shapes are equal and their elements are
    /// equal in logical order; item types may differ.
    fn eq(&self, rhs: &NdArray) -> bool {
        self.shape == rhs.shape && self.iter().eq(rhs.iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::{arange, s, zeros, ErrorKind, Scalar};

    #[test]
    fn views_alias_the_buffer() {
        let a = arange(16).into_shape((4, 4)).unwrap();
        let b = a.get(s![1.., 1..]).unwrap();
        b.set(s![0, 0], 100).unwrap();
        assert_eq!(a.item(5).unwrap(), Scalar::Int(100));
        assert!(b.base_is(&a));
        assert!(b.shares_buffer(&a));
        assert!(!a.is_view());
    }

    #[test]
    fn set_broadcasts_a_scalar() {
        let a = zeros((3, 3));
        a.set(s![.., 1], 7.5).unwrap();
        let col: Vec<f64> = a.get(s![.., 1]).unwrap().iter().map(Scalar::to_f64).collect();
        assert_eq!(col, vec![7.5; 3]);
        assert_eq!(a.sum(None).unwrap(), 22.5);
    }

    #[test]
    fn assign_overlapping_source() {
        let a = arange(5);
        let head = a.get(s![..4]).unwrap();
        a.assign(s![1..], &head).unwrap();
        let got: Vec<i64> = a.iter().map(Scalar::to_i64).collect();
        assert_eq!(got, vec![0, 0, 1, 2, 3]);
        assert_eq!(
            a.assign(s![1..], &a).unwrap_err().kind(),
            ErrorKind::IncompatibleShape
        );
    }

    #[test]
    fn to_scalar_requires_one_element() {
        let a = arange(3);
        assert_eq!(a.get(1).unwrap().to_scalar().unwrap(), Scalar::Int(1));
        assert_eq!(a.to_scalar().unwrap_err().kind(), ErrorKind::IncompatibleShape);
    }

    #[test]
    fn item_is_bounds_checked() {
        let a = arange(3);
        assert_eq!(a.item(3).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(a.put(3, 1).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn copy_of_strided_view_is_contiguous() {
        let a = arange(12).into_shape((3, 4)).unwrap();
        let v = a.get(s![.., ..;-2]).unwrap();
        assert!(!v.is_contiguous());
        let c = v.copy();
        assert!(c.is_contiguous() && c.owns_data());
        assert!(!c.shares_buffer(&a));
        assert_eq!(c, v);
    }
}
