// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "tinyarray"]
#![doc(html_root_url = "https://docs.rs/tinyarray/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::manual_map,
    clippy::len_without_is_empty
)]

//! The `tinyarray` crate provides [`NdArray`], a small n-dimensional
//! strided array modeled on numpy's `ndarray`.
//!
//! - An array is a **view**: a shape, per-axis element strides and an
//!   offset, over a fixed-size [`Buffer`] of one [`ItemType`].
//! - Indexing with a key (see [`s![]`](s!)) is a pure stride computation. The
//!   result aliases the same buffer, and writes through either array are
//!   visible through the other.
//! - Elements are exchanged as [`Scalar`] values and coerced to the item type
//!   on write, the way a C cast would.
//! - Reductions (`sum`, `argmax`, `cumsum`, ...) run over the row-major
//!   [flat iterator](FlatIter) and reject an axis argument.
//! - An array can be built from a nested sequence with [`array`], or over
//!   foreign storage with [`NdArray::new`], and exports its memory layout
//!   with [`NdArray::array_interface`].
//!
//! ```
//! use tinyarray::{array, s, ItemType, Scalar};
//!
//! let a = array(vec![vec![1, 2, 3], vec![4, 5, 6]], Some(ItemType::Int32));
//! assert_eq!(a.shape(), &[2, 3]);
//!
//! // a view of the last column; writes show through `a`
//! let col = a.get(s![.., -1]).unwrap();
//! col.set(s![0], 30).unwrap();
//! assert_eq!(a.get(&[0usize, 2][..]).unwrap().to_scalar().unwrap(), Scalar::Int(30));
//! assert_eq!(a.sum(None).unwrap(), 48.);
//! ```
//!
//! ## Crate Feature Flags
//!
//! - `approx`: `AbsDiffEq`, `RelativeEq` and `UlpsEq` for arrays, comparing
//!   elements in `f64`

use std::rc::Rc;

pub use crate::arrayformat::PrintOptions;
pub use crate::data_repr::Buffer;
pub use crate::dimension::{Axis, IntoShape};
pub use crate::error::{ArrayError, ErrorKind};
pub use crate::free_functions::{
    arange, arange_step, empty, empty_like, eye, full, linspace, ones, ones_like, zeros, zeros_like,
};
pub use crate::interface::ArrayInterface;
pub use crate::itemtype::{Element, ItemType, Scalar};
pub use crate::iterators::FlatIter;
pub use crate::nested::{array, Nested};
pub use crate::slice::{IntoKey, NewAxis, Slice, SliceInfoElem};

#[macro_use]
mod slice;

#[cfg(feature = "approx")]
mod array_approx;
mod arrayformat;
mod data_repr;
pub mod dimension;
mod error;
mod free_functions;
mod impl_constructors;
mod impl_methods;
mod interface;
mod itemtype;
mod iterators;
mod nested;
pub mod numeric;
pub mod prelude;

/// Array index type
pub type Ix = usize;
/// Array index type (signed)
pub type Ixs = isize;

/// An *n*-dimensional strided view over a shared [`Buffer`].
///
/// The element at multi-index `(i0, ..., ik)` lives at buffer position
/// `offset + i0 * strides[0] + ... + ik * strides[k]`. Strides count
/// elements, not bytes, and may be zero or negative.
///
/// An array that allocated (or adopted) its buffer owns the data. Every array
/// derived from it by indexing, [`view`](NdArray::view) or
/// [`transpose`](NdArray::transpose) is a view that shares the buffer, and
/// reports the owner as its base (see [`base_is`](NdArray::base_is)).
///
/// Writes go through `&self`: aliasing views are the point of the type, so
/// `NdArray` is neither `Send` nor `Sync`. Use [`copy`](NdArray::copy) for
/// an independent array.
///
/// ## Indexing
///
/// Keys follow numpy's basic indexing. An integer index drops its axis, a
/// range (`s![1..;2]`) keeps it, [`NewAxis`] inserts an axis of length 1.
/// A key that selects a single element yields an array of shape `[1]`,
/// which [`to_scalar`](NdArray::to_scalar) converts to a value.
///
/// ## Contiguity
///
/// An array is contiguous when its strides are the canonical row-major
/// strides for its shape, ignoring axes of length 1: such an axis is never
/// stepped along, so its stride does not matter. This is looser than an
/// exact comparison with the canonical strides; `arange(3).get(NewAxis)`,
/// with strides `[0, 1]`, is contiguous here. An array without elements is
/// always contiguous. Only a contiguous array can have its shape changed in
/// place ([`set_shape`](NdArray::set_shape)).
pub struct NdArray {
    data: Rc<Buffer>,
    shape: Vec<Ix>,
    strides: Vec<Ixs>,
    offset: usize,
    /// `true` when the array was derived from another one; the base is the
    /// owner of `data`.
    is_view: bool,
}
