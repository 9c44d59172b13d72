// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exchange of array memory with foreign code, in the shape of numpy's
//! array interface (version 3).

use std::rc::Rc;

use crate::data_repr::Buffer;
use crate::dimension;
use crate::error::{from_kind, ArrayError, ErrorKind};
use crate::itemtype::ItemType;
use crate::{Ix, Ixs, NdArray};

/// The memory layout of an array, as numpy's `__array_interface__`
/// describes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayInterface {
    /// Address of the element at the all-zero index.
    pub data: usize,
    pub read_only: bool,
    /// Byte order, kind and size, e.g. `"<f8"` or `"|u1"`.
    pub typestr: String,
    /// The item type name, e.g. `"float64"`.
    pub descr_name: String,
    pub itemsize: usize,
    pub shape: Vec<Ix>,
    /// Strides in bytes; `None` when the array is contiguous.
    pub strides: Option<Vec<Ixs>>,
    pub version: u32,
}

impl NdArray {
    /// Describe the memory of the array for foreign code.
    ///
    /// ```
    /// use tinyarray::{arange, s};
    ///
    /// let a = arange(10);
    /// let b = a.get(s![2..;3]).unwrap();
    /// let (ia, ib) = (a.array_interface(), b.array_interface());
    /// assert_eq!(ib.data, ia.data + 2 * 8);
    /// assert_eq!(ia.strides, None);
    /// assert_eq!(ib.strides, Some(vec![24]));
    /// ```
    pub fn array_interface(&self) -> ArrayInterface {
        let item_type = self.item_type();
        let strides = if self.is_contiguous() {
            None
        } else {
            Some(self.byte_strides())
        };
        ArrayInterface {
            data: self.data.as_ptr() as usize + self.offset * item_type.itemsize(),
            read_only: self.data.is_read_only(),
            typestr: item_type.typestr(),
            descr_name: item_type.name().to_string(),
            itemsize: item_type.itemsize(),
            shape: self.shape.clone(),
            strides,
            version: 3,
        }
    }

    /// Create an array over the foreign memory described by `iface`, without
    /// copying. The array owns no allocation and never frees the memory.
    ///
    /// **Errors** with `Unsupported` for a typestr of another byte order or
    /// an unknown kind, byte strides that are not a multiple of the item
    /// size, or a null `data` address when the shape has elements. With an
    /// empty shape, `data` is never read and may be null.
    ///
    /// ## Safety
    ///
    /// Every element the shape and strides reach from `iface.data` must be
    /// valid memory for as long as the array and its views are alive, and
    /// writable unless `iface.read_only` is set.
    pub unsafe fn from_array_interface(iface: &ArrayInterface) -> Result<NdArray, ArrayError> {
        let item_type = item_type_from_typestr(&iface.typestr)?;
        let itemsize = item_type.itemsize() as isize;
        let strides = match iface.strides {
            None => dimension::strides_for_shape(&iface.shape),
            Some(ref bytes) => {
                if bytes.len() != iface.shape.len() {
                    return Err(from_kind(ErrorKind::IncompatibleShape));
                }
                if bytes.iter().any(|&b| b % itemsize != 0) {
                    return Err(from_kind(ErrorKind::Unsupported));
                }
                bytes.iter().map(|&b| b / itemsize).collect()
            }
        };
        if iface.shape.iter().any(|&d| d == 0) {
            // nothing is reachable, so `data` may be null or dangling
            let buffer = Buffer::foreign_empty(item_type, iface.read_only);
            return Ok(NdArray::from_parts(Rc::new(buffer), iface.shape.clone(), strides, 0, false));
        }
        if iface.data == 0 {
            return Err(from_kind(ErrorKind::Unsupported));
        }
        // Span of element positions relative to the origin
        let (mut low, mut high) = (0isize, 0isize);
        for (&d, &s) in iface.shape.iter().zip(&strides) {
            let end = s * (d as isize - 1);
            if end < 0 {
                low += end;
            } else {
                high += end;
            }
        }
        let start = (iface.data as isize + low * itemsize) as *mut u8;
        let len = (high - low + 1) as usize;
        let buffer = if iface.read_only {
            Buffer::from_raw_parts_readonly(start, item_type, len)
        } else {
            Buffer::from_raw_parts(start, item_type, len)
        };
        let offset = (-low) as usize;
        dimension::can_index_buffer(len, &iface.shape, &strides, offset)?;
        Ok(NdArray::from_parts(
            Rc::new(buffer),
            iface.shape.clone(),
            strides,
            offset,
            false,
        ))
    }
}

fn item_type_from_typestr(typestr: &str) -> Result<ItemType, ArrayError> {
    ItemType::ALL
        .iter()
        .copied()
        .find(|t| {
            let own = t.typestr();
            // a single byte has no byte order
            own == typestr || (t.itemsize() == 1 && own.get(1..) == typestr.get(1..))
        })
        .ok_or_else(|| from_kind(ErrorKind::Unsupported))
}
