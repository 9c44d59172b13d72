// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ptr::{self, NonNull};

use rawpointer::PointerExt;

use crate::error::{from_kind, ArrayError, ErrorKind};
use crate::itemtype::{Element, ItemType, Scalar};

/// Fixed-size storage of `len` elements of one item type.
///
/// A buffer is never resized. It either owns its allocation, or adopts
/// storage owned by a foreign caller, in which case it never frees it.
///
/// Reads and writes go through raw pointers, element by element, so any
/// number of arrays may share one buffer (through an `Rc`) and write to it;
/// no reference into the data is ever handed out.
pub struct Buffer {
    ptr: NonNull<u8>,
    len: usize,
    item_type: ItemType,
    ownership: Ownership,
}

enum Ownership {
    // Like a Vec: the allocation is rebuilt and dropped in `Drop`.
    Owned { capacity: usize },
    Foreign { read_only: bool },
}

impl Buffer {
    /// Allocate zero-initialized storage for `len` elements.
    ///
    /// **Panics** if the byte size would overflow `usize`.
    pub fn allocate(item_type: ItemType, len: usize) -> Buffer {
        let nbytes = match len.checked_mul(item_type.itemsize()) {
            Some(n) => n,
            None => panic!("tinyarray: buffer size in bytes overflows usize"),
        };
        Self::from_bytes(vec![0u8; nbytes], item_type)
    }

    /// Create an owned buffer holding the elements of `v`.
    pub fn from_vec<A: Element>(v: Vec<A>) -> Buffer {
        let buffer = Self::allocate(A::ITEM_TYPE, v.len());
        for (i, &x) in v.iter().enumerate() {
            unsafe { buffer.element_ptr(i).cast::<A>().as_ptr().write_unaligned(x) }
        }
        buffer
    }

    fn from_bytes(v: Vec<u8>, item_type: ItemType) -> Buffer {
        let mut v = ManuallyDrop::new(v);
        let capacity = v.capacity();
        let len = v.len() / item_type.itemsize();
        // a Vec's pointer is never null, even without an allocation
        let ptr = unsafe { NonNull::new_unchecked(v.as_mut_ptr()) };
        Buffer {
            ptr,
            len,
            item_type,
            ownership: Ownership::Owned { capacity },
        }
    }

    /// Adopt writable storage owned by a foreign caller, without copying.
    ///
    /// The buffer never frees the storage.
    ///
    /// ## Safety
    ///
    /// `ptr` must be non-null and valid for reads and writes of
    /// `len * item_type.itemsize()` bytes for as long as the buffer, and every
    /// array sharing it, is alive. Alignment is not required.
    pub unsafe fn from_raw_parts(ptr: *mut u8, item_type: ItemType, len: usize) -> Buffer {
        Buffer {
            ptr: foreign_ptr(ptr),
            len,
            item_type,
            ownership: Ownership::Foreign { read_only: false },
        }
    }

    /// Adopt read-only storage owned by a foreign caller, without copying.
    ///
    /// Every write through the buffer fails with `ErrorKind::ReadOnly`.
    ///
    /// ## Safety
    ///
    /// `ptr` must be non-null and valid for reads of
    /// `len * item_type.itemsize()` bytes for as long as the buffer, and every
    /// array sharing it, is alive. Alignment is not required.
    pub unsafe fn from_raw_parts_readonly(ptr: *const u8, item_type: ItemType, len: usize) -> Buffer {
        Buffer {
            ptr: foreign_ptr(ptr as *mut u8),
            len,
            item_type,
            ownership: Ownership::Foreign { read_only: true },
        }
    }

    // Foreign storage without elements; the pointer is never dereferenced.
    pub(crate) fn foreign_empty(item_type: ItemType, read_only: bool) -> Buffer {
        Buffer {
            ptr: NonNull::dangling(),
            len: 0,
            item_type,
            ownership: Ownership::Foreign { read_only },
        }
    }

    /// Return the number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn nbytes(&self) -> usize {
        self.len * self.item_type.itemsize()
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.ownership, Ownership::Foreign { read_only: true })
    }

    /// Return `true` if the storage was adopted from a foreign caller.
    pub fn is_foreign(&self) -> bool {
        matches!(self.ownership, Ownership::Foreign { .. })
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Read the element at absolute index `i`.
    ///
    /// **Panics** if `i` is out of bounds.
    pub fn read(&self, i: usize) -> Scalar {
        assert!(i < self.len, "tinyarray: buffer index {} out of bounds for length {}", i, self.len);
        unsafe {
            match self.item_type {
                // any nonzero byte reads as true
                ItemType::Bool => Scalar::Bool(self.read_as::<u8>(i) != 0),
                ItemType::Int8 => self.read_as::<i8>(i).into_scalar(),
                ItemType::UInt8 => self.read_as::<u8>(i).into_scalar(),
                ItemType::Int16 => self.read_as::<i16>(i).into_scalar(),
                ItemType::UInt16 => self.read_as::<u16>(i).into_scalar(),
                ItemType::Int32 => self.read_as::<i32>(i).into_scalar(),
                ItemType::UInt32 => self.read_as::<u32>(i).into_scalar(),
                ItemType::Int64 => self.read_as::<i64>(i).into_scalar(),
                ItemType::UInt64 => self.read_as::<u64>(i).into_scalar(),
                ItemType::Float32 => self.read_as::<f32>(i).into_scalar(),
                ItemType::Float64 => self.read_as::<f64>(i).into_scalar(),
            }
        }
    }

    /// Write `value` at absolute index `i`, coerced to the item type
    /// (integers wrap to the slot width, floats truncate toward zero).
    ///
    /// **Panics** if `i` is out of bounds.
    pub fn write(&self, i: usize, value: Scalar) -> Result<(), ArrayError> {
        if self.is_read_only() {
            return Err(from_kind(ErrorKind::ReadOnly));
        }
        self.store(i, value);
        Ok(())
    }

    /// Write without the read-only check, for storage the crate has just
    /// allocated itself.
    pub(crate) fn store(&self, i: usize, value: Scalar) {
        debug_assert!(!self.is_read_only());
        assert!(i < self.len, "tinyarray: buffer index {} out of bounds for length {}", i, self.len);
        unsafe {
            match self.item_type {
                ItemType::Bool => self.write_as::<u8>(i, bool::from_scalar(value) as u8),
                ItemType::Int8 => self.write_as(i, i8::from_scalar(value)),
                ItemType::UInt8 => self.write_as(i, u8::from_scalar(value)),
                ItemType::Int16 => self.write_as(i, i16::from_scalar(value)),
                ItemType::UInt16 => self.write_as(i, u16::from_scalar(value)),
                ItemType::Int32 => self.write_as(i, i32::from_scalar(value)),
                ItemType::UInt32 => self.write_as(i, u32::from_scalar(value)),
                ItemType::Int64 => self.write_as(i, i64::from_scalar(value)),
                ItemType::UInt64 => self.write_as(i, u64::from_scalar(value)),
                ItemType::Float32 => self.write_as(i, f32::from_scalar(value)),
                ItemType::Float64 => self.write_as(i, f64::from_scalar(value)),
            }
        }
    }

    #[inline]
    fn element_ptr(&self, i: usize) -> NonNull<u8> {
        unsafe { self.ptr.stride_offset(self.item_type.itemsize() as isize, i) }
    }

    // Foreign storage may be unaligned; every access is an unaligned one.
    #[inline]
    unsafe fn read_as<T: Copy>(&self, i: usize) -> T {
        debug_assert_eq!(mem::size_of::<T>(), self.item_type.itemsize());
        ptr::read_unaligned(self.element_ptr(i).cast::<T>().as_ptr())
    }

    #[inline]
    unsafe fn write_as<T: Copy>(&self, i: usize, value: T) {
        debug_assert_eq!(mem::size_of::<T>(), self.item_type.itemsize());
        ptr::write_unaligned(self.element_ptr(i).cast::<T>().as_ptr(), value)
    }
}

#[inline]
unsafe fn foreign_ptr(ptr: *mut u8) -> NonNull<u8> {
    debug_assert!(!ptr.is_null(), "tinyarray: null pointer for foreign storage");
    NonNull::new_unchecked(ptr)
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if let Ownership::Owned { capacity } = self.ownership {
            let nbytes = self.nbytes();
            unsafe {
                drop(Vec::from_raw_parts(self.ptr.as_ptr(), nbytes, capacity));
            }
        }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("item_type", &self.item_type)
            .field("foreign", &self.is_foreign())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_zeroed() {
        for &t in ItemType::ALL.iter() {
            let b = Buffer::allocate(t, 5);
            assert_eq!(b.len(), 5);
            assert_eq!(b.nbytes(), 5 * t.itemsize());
            for i in 0..5 {
                assert_eq!(b.read(i).to_f64(), 0.0);
            }
        }
    }

    #[test]
    fn write_truncates_to_width() {
        let b = Buffer::allocate(ItemType::UInt8, 2);
        b.write(0, Scalar::Int(300)).unwrap();
        b.write(1, Scalar::Float(3.9)).unwrap();
        assert_eq!(b.read(0), Scalar::UInt(44));
        assert_eq!(b.read(1), Scalar::UInt(3));
    }

    #[test]
    fn from_vec_keeps_values() {
        let b = Buffer::from_vec(vec![1.5f32, -2., 8.]);
        assert_eq!(b.item_type(), ItemType::Float32);
        assert_eq!(b.read(0), Scalar::Float(1.5));
        assert_eq!(b.read(2), Scalar::Float(8.));
    }

    #[test]
    fn foreign_storage_is_shared_not_copied() {
        let mut data = [1i16, 2, 3, 4];
        let b = unsafe { Buffer::from_raw_parts(data.as_mut_ptr() as *mut u8, ItemType::Int16, 4) };
        assert!(b.is_foreign());
        b.write(3, Scalar::Int(-7)).unwrap();
        drop(b);
        assert_eq!(data, [1, 2, 3, -7]);
    }

    #[test]
    fn read_only_storage_rejects_writes() {
        let data = [9u8; 3];
        let b = unsafe { Buffer::from_raw_parts_readonly(data.as_ptr(), ItemType::UInt8, 3) };
        assert_eq!(b.write(0, Scalar::Int(1)).unwrap_err().kind(), ErrorKind::ReadOnly);
        assert_eq!(b.read(0), Scalar::UInt(9));
    }
}
