// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

/// An error related to array shape, layout, indexing or storage.
#[derive(Clone, Debug)]
pub struct ArrayError {
    // we want to be able to change this representation later
    repr: ErrorKind,
}

impl ArrayError {
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.repr
    }

    /// Create a new `ArrayError`
    pub fn from_kind(error: ErrorKind) -> Self {
        from_kind(error)
    }
}

/// Error code for an error related to array shape, layout, indexing or
/// storage.
///
/// This enumeration is not exhaustive. The representation of the enum
/// is not guaranteed.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// incompatible shape: the element count does not match
    IncompatibleShape,
    /// incompatible layout: not contiguous
    IncompatibleLayout,
    /// selector, item type or argument that is not supported
    Unsupported,
    /// index, stride or offset out of bounds
    OutOfBounds,
    /// write through a read-only buffer
    ReadOnly,
    /// reduction without identity over an empty array
    EmptyArray,
}

#[inline(always)]
pub fn from_kind(k: ErrorKind) -> ArrayError {
    ArrayError { repr: k }
}

impl PartialEq for ArrayError {
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool {
        self.repr == rhs.repr
    }
}

impl Eq for ArrayError {}

impl Error for ArrayError {}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self.kind() {
            ErrorKind::IncompatibleShape => "incompatible shapes",
            ErrorKind::IncompatibleLayout => "incompatible layout (not contiguous)",
            ErrorKind::Unsupported => "unsupported operation",
            ErrorKind::OutOfBounds => "index out of bounds",
            ErrorKind::ReadOnly => "array is read-only",
            ErrorKind::EmptyArray => "zero-size array has no identity for this reduction",
        };
        write!(f, "ArrayError/{:?}: {}", self.kind(), description)
    }
}

pub(crate) fn incompatible_shapes(_a: &[usize], _b: &[usize]) -> ArrayError {
    from_kind(ErrorKind::IncompatibleShape)
}
