// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arrays from nested sequences, and back.

use crate::dimension;
use crate::itemtype::{ItemType, Scalar};
use crate::{Ix, NdArray};

/// A nested sequence: a scalar leaf, or a list of nested sequences.
///
/// Converts from scalars, vectors and arrays of anything that converts, so
/// `vec![vec![1, 2], vec![3, 4]]` can be passed to [`array`] directly.
/// Converting an [`NdArray`] gives a `Typed` sequence that remembers the
/// item type of the array.
#[derive(Clone, Debug, PartialEq)]
pub enum Nested {
    Scalar(Scalar),
    List(Vec<Nested>),
    /// The elements of an array of the given item type.
    Typed(ItemType, Box<Nested>),
}

impl Nested {
    /// Return the scalar of a leaf.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match *self {
            Nested::Scalar(x) => Some(x),
            Nested::List(_) => None,
            Nested::Typed(_, ref object) => object.as_scalar(),
        }
    }

    /// Return the items of a list.
    pub fn as_list(&self) -> Option<&[Nested]> {
        match *self {
            Nested::Scalar(_) => None,
            Nested::List(ref items) => Some(items),
            Nested::Typed(_, ref object) => object.as_list(),
        }
    }
}

macro_rules! impl_nested_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Nested {
                fn from(x: $t) -> Nested {
                    Nested::Scalar(Scalar::from(x))
                }
            }
        )*
    };
}

impl_nested_from_scalar!(Scalar, bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, usize, isize);

impl From<&NdArray> for Nested {
    fn from(a: &NdArray) -> Nested {
        Nested::Typed(a.item_type(), Box::new(a.to_nested()))
    }
}

impl<T: Into<Nested>> From<Vec<T>> for Nested {
    fn from(v: Vec<T>) -> Nested {
        Nested::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Nested>, const N: usize> From<[T; N]> for Nested {
    fn from(v: [T; N]) -> Nested {
        Nested::List(v.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Clone + Into<Nested>> From<&'a [T]> for Nested {
    fn from(v: &'a [T]) -> Nested {
        Nested::List(v.iter().cloned().map(Into::into).collect())
    }
}

/// Create an array from a nested sequence.
///
/// The shape takes, at each depth, the longest list found there. Shorter
/// lists leave the missing elements zero, and a scalar found where a list
/// is expected is written to the whole sub-array it stands for.
///
/// Without an explicit item type: `bool` when every leaf is a bool,
/// `float64` when any leaf is a float or there are no leaves, and `int64`
/// otherwise. A bare scalar makes an array of shape `[1]`. An [`NdArray`]
/// passed by reference is copied with its own item type.
///
/// ```
/// use tinyarray::{array, ItemType, Scalar};
///
/// let a = array(vec![vec![1., 2.], vec![3., 4.]], None);
/// assert_eq!(a.shape(), &[2, 2]);
/// assert_eq!(a.item_type(), ItemType::Float64);
///
/// // jagged input is padded
/// let b = array(vec![vec![1, 2, 3], vec![4]], None);
/// assert_eq!(b.shape(), &[2, 3]);
/// assert_eq!(b.item(4).unwrap(), Scalar::Int(0));
///
/// let c = array(&b.transpose(), None);
/// assert_eq!(c.shape(), &[3, 2]);
/// assert_eq!(c.item_type(), ItemType::Int64);
/// ```
pub fn array<T: Into<Nested>>(object: T, item_type: Option<ItemType>) -> NdArray {
    let object = object.into();
    let mut shape = Vec::new();
    shape_from_object(&object, 0, &mut shape);
    if shape.is_empty() {
        shape.push(1);
    }
    let item_type = item_type.unwrap_or_else(|| infer_item_type(&object));
    let a = NdArray::zeros(shape, item_type);
    let mut index = Vec::with_capacity(a.ndim());
    assign_from_object(&a, &object, &mut index);
    a
}

fn shape_from_object(object: &Nested, depth: usize, shape: &mut Vec<Ix>) {
    match *object {
        Nested::Scalar(_) => {}
        Nested::List(ref items) => {
            if shape.len() == depth {
                shape.push(0);
            }
            shape[depth] = shape[depth].max(items.len());
            for item in items {
                shape_from_object(item, depth + 1, shape);
            }
        }
        Nested::Typed(_, ref object) => shape_from_object(object, depth, shape),
    }
}

fn infer_item_type(object: &Nested) -> ItemType {
    if let Nested::Typed(item_type, _) = *object {
        return item_type;
    }
    fn walk(object: &Nested, all_bool: &mut bool, any_float: &mut bool) {
        match *object {
            Nested::Scalar(Scalar::Bool(_)) => {}
            Nested::Scalar(Scalar::Float(_)) => {
                *all_bool = false;
                *any_float = true;
            }
            Nested::Scalar(_) => *all_bool = false,
            Nested::List(ref items) => {
                for item in items {
                    walk(item, all_bool, any_float);
                }
            }
            Nested::Typed(item_type, ref object) if has_leaf(object) => {
                *all_bool &= item_type == ItemType::Bool;
                *any_float |= item_type.is_float();
            }
            Nested::Typed(..) => {}
        }
    }
    let (mut all_bool, mut any_float) = (true, false);
    walk(object, &mut all_bool, &mut any_float);
    if any_float || !has_leaf(object) {
        ItemType::Float64
    } else if all_bool {
        ItemType::Bool
    } else {
        ItemType::Int64
    }
}

fn has_leaf(object: &Nested) -> bool {
    match *object {
        Nested::Scalar(_) => true,
        Nested::List(ref items) => items.iter().any(has_leaf),
        Nested::Typed(_, ref object) => has_leaf(object),
    }
}

// The leaf at `index` covers the sub-array of all elements starting with
// that partial index.
fn assign_from_object(a: &NdArray, object: &Nested, index: &mut Vec<Ix>) {
    match *object {
        Nested::Scalar(x) => {
            let depth = index.len();
            let sub_shape = &a.shape()[depth..];
            if sub_shape.contains(&0) {
                return;
            }
            let mut full = index.clone();
            full.resize(a.ndim(), 0);
            loop {
                let linear = full.iter().zip(a.shape()).fold(0, |acc, (&i, &d)| acc * d + i);
                a.store(linear, x);
                if !dimension::next_for(sub_shape, &mut full[depth..]) {
                    break;
                }
            }
        }
        Nested::List(ref items) => {
            for (k, item) in items.iter().enumerate() {
                index.push(k);
                assign_from_object(a, item, index);
                index.pop();
            }
        }
        Nested::Typed(_, ref object) => assign_from_object(a, object, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_broadcasts_over_missing_depth() {
        let a = array(Nested::List(vec![Nested::from(7), Nested::from(vec![1, 2])]), None);
        assert_eq!(a.shape(), &[2, 2]);
        let got: Vec<i64> = a.iter().map(Scalar::to_i64).collect();
        assert_eq!(got, vec![7, 7, 1, 2]);
    }

    #[test]
    fn infers_item_types() {
        assert_eq!(array(vec![true, false], None).item_type(), ItemType::Bool);
        assert_eq!(array(vec![1, 2], None).item_type(), ItemType::Int64);
        assert_eq!(array(vec![1., 2.], None).item_type(), ItemType::Float64);
        let mixed = Nested::List(vec![Nested::from(true), Nested::from(2.5)]);
        assert_eq!(array(mixed, None).item_type(), ItemType::Float64);
    }

    #[test]
    fn scalar_input_has_shape_one() {
        let a = array(5u8, None);
        assert_eq!(a.shape(), &[1]);
        assert_eq!(a.to_scalar().unwrap(), Scalar::Int(5));
    }

    #[test]
    fn empty_list() {
        let a = array(Vec::<f64>::new(), None);
        assert_eq!(a.shape(), &[0]);
        assert_eq!(a.item_type(), ItemType::Float64);
        let b = array(Nested::List(vec![Nested::from(5), Nested::List(vec![])]), None);
        assert_eq!(b.shape(), &[2, 0]);
    }

    #[test]
    fn arrays_keep_their_item_type() {
        let a = array(vec![vec![1, 2, 3], vec![4, 5, 6]], Some(ItemType::UInt8));
        let b = array(&a, None);
        assert_eq!(b.item_type(), ItemType::UInt8);
        assert_eq!(b, a);
        assert!(!b.shares_buffer(&a));
        assert_eq!(array(&a, Some(ItemType::Float32)).item_type(), ItemType::Float32);

        let f = array(vec![1.5, 2.5], Some(ItemType::Float32));
        let rows = array(Nested::List(vec![Nested::from(&f), Nested::from(vec![3, 4])]), None);
        assert_eq!(rows.shape(), &[2, 2]);
        assert_eq!(rows.item_type(), ItemType::Float64);
        assert_eq!(rows.item(1).unwrap(), Scalar::Float(2.5));
    }

    #[test]
    fn round_trips_through_to_nested() {
        let object = Nested::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let a = array(object.clone(), Some(ItemType::Int16));
        assert_eq!(a.to_nested(), object);
        assert_eq!(a.transpose().to_nested(), Nested::from(vec![vec![1, 4], vec![2, 5], vec![3, 6]]));
    }
}
