#![allow(clippy::many_single_char_names, clippy::deref_addrof)]

use defmac::defmac;
use itertools::Itertools;
use tinyarray::prelude::*;
use tinyarray_gen::{ArrayBuilder, Order};

fn values(a: &NdArray) -> Vec<i64> {
    a.iter().map(Scalar::to_i64).collect()
}

// 4 x 4 array of 1..=16
fn sixteen() -> NdArray {
    array(
        vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12], vec![13, 14, 15, 16]],
        None,
    )
}

#[test]
fn slice_rows_and_corners() {
    let a = sixteen();
    let b = a.get(s![1..]).unwrap();
    assert_eq!(b.shape(), &[3, 4]);
    assert_eq!(values(&b), (5..=16i64).collect_vec());

    let c = a.get(s![1.., 1..]).unwrap();
    assert_eq!(c.shape(), &[3, 3]);
    assert_eq!(c.offset(), 5);
    assert_eq!(values(&c), vec![6, 7, 8, 10, 11, 12, 14, 15, 16]);

    let d = a.get(s![-1.., 1]).unwrap();
    assert_eq!(d.shape(), &[1]);
    assert_eq!(d.to_scalar().unwrap(), Scalar::Int(14));
}

#[test]
fn slice_of_slice() {
    let a = sixteen();
    let b = a.get(s![1.., 1..]).unwrap().get(s![1.., 1..]).unwrap();
    assert_eq!(b.shape(), &[2, 2]);
    assert_eq!(values(&b), vec![11, 12, 15, 16]);
    assert!(b.base_is(&a));
}

#[test]
fn slice_of_rows_matches_single_slice() {
    let a = sixteen();
    let b = a.get(s![1..]).unwrap().get(s![2..;2]).unwrap();
    let c = a.get(s![3..;2]).unwrap();
    assert_eq!(b.shape(), &[1, 4]);
    assert_eq!(b.shape(), c.shape());
    assert_eq!(b.strides(), c.strides());
    assert_eq!(b.offset(), c.offset());
    assert_eq!(b, c);
    assert_eq!(values(&b), vec![13, 14, 15, 16]);
    assert!(b.base_is(&a) && c.base_is(&a));
}

#[test]
fn negative_steps() {
    let a = sixteen();
    let r = a.get(s![..;-1, ..;-2]).unwrap();
    assert_eq!(r.shape(), &[4, 2]);
    assert_eq!(r.strides(), &[-4, -2]);
    assert_eq!(r.offset(), 15);
    assert_eq!(values(&r), vec![16, 14, 12, 10, 8, 6, 4, 2]);
    assert_eq!(values(&a.get(s![2..0;-1, 0]).unwrap()), vec![9, 5]);
}

#[test]
fn empty_slice_keeps_the_origin() {
    let a = sixteen();
    let e = a.get(s![3..1, ..]).unwrap();
    assert_eq!(e.shape(), &[0, 4]);
    assert_eq!(e.offset(), 0);
    assert!(e.is_empty());
    assert_eq!(e.iter().count(), 0);
}

#[test]
fn new_axis_inserts_length_one() {
    let a = arange(3);
    let col = a.get(s![.., NewAxis]).unwrap();
    assert_eq!(col.shape(), &[3, 1]);
    assert_eq!(col.strides(), &[1, 0]);
    let row = a.get(NewAxis).unwrap();
    assert_eq!(row.shape(), &[1, 3]);
    // the stride of a length-1 axis is not compared
    assert_eq!(row.strides(), &[0, 1]);
    assert!(row.is_contiguous() && col.is_contiguous());
}

#[test]
fn single_element_views_collapse_to_shape_one() {
    let a = sixteen();
    let x = a.get(&[2usize, 3][..]).unwrap();
    assert_eq!(x.shape(), &[1]);
    assert_eq!(x.strides(), &[0]);
    assert_eq!(x.to_scalar().unwrap(), Scalar::Int(12));
    assert_eq!(a.get(s![-1, -1]).unwrap().to_scalar().unwrap(), Scalar::Int(16));
}

#[test]
fn index_errors() {
    let a = sixteen();
    defmac!(kind key => a.get(key).unwrap_err().kind());
    assert_eq!(kind!(s![4]), ErrorKind::OutOfBounds);
    assert_eq!(kind!(s![-5]), ErrorKind::OutOfBounds);
    assert_eq!(kind!(s![0, 0, 0]), ErrorKind::OutOfBounds);
    assert_eq!(kind!(s![..;0]), ErrorKind::Unsupported);
    assert_eq!(kind!(SliceInfoElem::Ellipsis), ErrorKind::Unsupported);
    assert_eq!(kind!(SliceInfoElem::Mask(vec![true; 4])), ErrorKind::Unsupported);
    assert_eq!(kind!(SliceInfoElem::Indices(vec![0, 2])), ErrorKind::Unsupported);
}

#[test]
fn writes_through_views_are_shared() {
    let a = sixteen();
    let b = a.get(s![1.., ..;2]).unwrap();
    b.set(s![.., 0], 0).unwrap();
    assert_eq!(values(&a.get(s![.., 0]).unwrap()), vec![1, 0, 0, 0]);
    let t = a.transpose();
    t.set(s![3, 0], -4).unwrap();
    assert_eq!(a.get(s![0, 3]).unwrap().to_scalar().unwrap(), Scalar::Int(-4));
}

#[test]
fn writes_coerce_to_item_type() {
    let a = NdArray::zeros(3, ItemType::UInt8);
    a.set(0, 300).unwrap();
    a.set(1, 2.9).unwrap();
    a.set(2, true).unwrap();
    assert_eq!(values(&a), vec![44, 2, 1]);
}

#[test]
fn base_and_ownership() {
    let a = ArrayBuilder::new((2, 4)).build();
    let a2 = a.get(s![.., 2..]).unwrap();
    assert!(a.owns_data() && !a.is_view());
    assert!(a2.is_view() && a2.base_is(&a));
    assert!(a2.get(s![..]).unwrap().base_is(&a));
    assert!(a2.view().base_is(&a));
    assert!(!a.base_is(&a2));
    let c = a2.copy();
    assert!(c.owns_data() && !c.shares_buffer(&a));
}

#[test]
fn properties() {
    let a = NdArray::zeros((9, 4, 5), ItemType::Int16);
    assert_eq!(a.ndim(), 3);
    assert_eq!(a.len(), 180);
    assert_eq!(a.size(), 180);
    assert_eq!(a.itemsize(), 2);
    assert_eq!(a.nbytes(), 360);
    assert_eq!(a.strides(), &[20, 5, 1]);
    assert_eq!(a.byte_strides(), vec![40, 10, 2]);
    assert!(a.is_contiguous());
}

#[test]
fn transpose() {
    let a = ArrayBuilder::new((2, 3)).build();
    let t = a.transpose();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.strides(), &[1, 3]);
    assert_eq!(values(&t), vec![0, 3, 1, 4, 2, 5]);
    assert_eq!(t.transpose(), a);
    let f = ArrayBuilder::new((2, 3)).memory_order(Order::F).build();
    assert_eq!(f, a);
    assert!(!f.is_contiguous());
}

#[test]
fn equality_compares_values_in_logical_order() {
    let a = array(vec![1, 2, 3], Some(ItemType::Int8));
    let b = array(vec![1., 2., 3.], None);
    assert_eq!(a, b);
    assert_ne!(a, array(vec![3, 2, 1], None));
    assert_ne!(a, array(vec![vec![1, 2, 3]], None));
}

#[test]
fn assign_from_array() {
    let a = NdArray::zeros((3, 3), ItemType::Float32);
    let row = linspace(0., 1., 3);
    a.assign(s![1], &row).unwrap();
    a.assign(s![.., 2], &row).unwrap();
    let got = a.iter().map(Scalar::to_f64).collect_vec();
    assert_eq!(got, vec![0., 0., 0., 0., 0.5, 0.5, 0., 0., 1.]);
}
