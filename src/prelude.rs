// Copyright 2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! tinyarray prelude.
//!
//! This module contains the most used types, traits, functions and macros
//! that you can import easily as a group.
//!
//! ```
//! use tinyarray::prelude::*;
//!
//! let a = zeros((2, 2));
//! assert_eq!(a.get(s![0, NewAxis]).unwrap().shape(), &[1, 2]);
//! ```

#[doc(no_inline)]
pub use crate::{ArrayError, ErrorKind, ItemType, NdArray, Nested, Scalar};

#[doc(no_inline)]
pub use crate::{Axis, IntoKey, IntoShape, NewAxis, Slice, SliceInfoElem};

#[doc(no_inline)]
pub use crate::{arange, array, eye, full, linspace, ones, zeros};

pub use crate::s;
