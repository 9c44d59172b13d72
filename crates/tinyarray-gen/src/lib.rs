// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Test array builders for `tinyarray`.

use tinyarray::{IntoShape, ItemType, NdArray, Scalar};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBuilder {
    shape: Vec<usize>,
    item_type: ItemType,
    memory_order: Order,
    generator: ElementGenerator,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator {
    /// 0, 1, 2, ... in logical order
    Sequential,
    Zero,
}

/// Memory layout of the built array
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
    /// Row-major: the array owns contiguous storage.
    C,
    /// Column-major: a transposed view of row-major storage, so it is not
    /// contiguous unless it has at most one axis longer than 1.
    F,
}

impl Default for ArrayBuilder {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ArrayBuilder {
    pub fn new(shape: impl IntoShape) -> Self {
        ArrayBuilder {
            shape: shape.into_shape(),
            item_type: ItemType::Int64,
            memory_order: Order::C,
            generator: ElementGenerator::Sequential,
        }
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn memory_order(mut self, order: Order) -> Self {
        self.memory_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn build(self) -> NdArray {
        let a = match self.memory_order {
            Order::C => NdArray::zeros(self.shape.clone(), self.item_type),
            Order::F => {
                let reversed: Vec<usize> = self.shape.iter().rev().cloned().collect();
                NdArray::zeros(reversed, self.item_type).transpose()
            }
        };
        if self.generator == ElementGenerator::Sequential {
            for i in 0..a.len() {
                a.put(i, Scalar::UInt(i as u64))
                    .expect("freshly allocated storage is writable");
            }
        }
        a
    }
}

#[test]
fn test_order() {
    let (m, n) = (12, 13);
    let c = ArrayBuilder::new((m, n)).memory_order(Order::C).build();
    let f = ArrayBuilder::new((m, n)).memory_order(Order::F).build();

    assert_eq!(c.shape(), &[m, n]);
    assert_eq!(f.shape(), &[m, n]);
    assert_eq!(c.strides(), &[n as isize, 1]);
    assert_eq!(f.strides(), &[1, m as isize]);
    assert_eq!(c, f);
}

#[test]
fn test_zero_generator() {
    let a = ArrayBuilder::new(5)
        .item_type(ItemType::Float32)
        .generator(ElementGenerator::Zero)
        .build();
    assert_eq!(a.item_type(), ItemType::Float32);
    assert!(a.iter().all(|x| x == Scalar::Float(0.)));
}
