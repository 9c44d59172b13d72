// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tuple to shape conversion, IntoShape, and related things

use crate::Ix;

/// $m: macro callback
/// $m is called with $arg and then the indices corresponding to the size argument
macro_rules! index_item {
    ($m:ident $arg:tt 0) => ($m!($arg););
    ($m:ident $arg:tt 1) => ($m!($arg 0););
    ($m:ident $arg:tt 2) => ($m!($arg 0 1););
    ($m:ident $arg:tt 3) => ($m!($arg 0 1 2););
    ($m:ident $arg:tt 4) => ($m!($arg 0 1 2 3););
    ($m:ident $arg:tt 5) => ($m!($arg 0 1 2 3 4););
    ($m:ident $arg:tt 6) => ($m!($arg 0 1 2 3 4 5););
}

/// Argument conversion into a shape.
///
/// Implemented for `usize` (a one-dimensional shape), tuples of `usize` up to
/// six elements, `()` (the zero-dimensional shape), arrays, slices and
/// vectors of `usize`.
pub trait IntoShape {
    fn into_shape(self) -> Vec<Ix>;
}

impl IntoShape for Ix {
    #[inline]
    fn into_shape(self) -> Vec<Ix> {
        vec![self]
    }
}

impl IntoShape for Vec<Ix> {
    #[inline]
    fn into_shape(self) -> Vec<Ix> {
        self
    }
}

impl<'a> IntoShape for &'a [Ix] {
    #[inline]
    fn into_shape(self) -> Vec<Ix> {
        self.to_vec()
    }
}

impl<'a> IntoShape for &'a Vec<Ix> {
    #[inline]
    fn into_shape(self) -> Vec<Ix> {
        self.clone()
    }
}

impl<const N: usize> IntoShape for [Ix; N] {
    #[inline]
    fn into_shape(self) -> Vec<Ix> {
        self.to_vec()
    }
}

macro_rules! tuple_type {
    ([$T:ident] $($index:tt)*) => (
        ( $(sub!($index $T), )* )
    )
}

macro_rules! sub {
    ($_x:tt $y:tt) => {
        $y
    };
}

macro_rules! tuple_to_shape {
    ([] $($n:tt)*) => {
        impl IntoShape for tuple_type!([Ix] $($n)*) {
            #[inline]
            #[allow(clippy::vec_init_then_push)]
            fn into_shape(self) -> Vec<Ix> {
                vec![$(self.$n,)*]
            }
        }
    };
}

index_item!(tuple_to_shape [] 0);
index_item!(tuple_to_shape [] 1);
index_item!(tuple_to_shape [] 2);
index_item!(tuple_to_shape [] 3);
index_item!(tuple_to_shape [] 4);
index_item!(tuple_to_shape [] 5);
index_item!(tuple_to_shape [] 6);
