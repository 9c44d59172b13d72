// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use itertools::Itertools;

use crate::dimension;
use crate::itemtype::{ItemType, Scalar};
use crate::NdArray;

/// Parameters for the numpy-style text rendering of arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    /// Arrays with more elements than this are summarized.
    pub threshold: usize,
    /// Number of leading and trailing entries shown per axis when
    /// summarizing.
    pub edgeitems: usize,
    /// Maximum number of fractional digits of a float.
    pub precision: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            threshold: 100,
            edgeitems: 3,
            precision: 8,
        }
    }
}

const PREFIX: &str = "array(";

/// Format a float with at most `precision` fractional digits, trailing
/// zeros trimmed but the point kept: `1.`, `2.5`, `-0.125`.
fn format_float(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0. { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{:.*}", precision, x);
    if !s.contains('.') {
        return s + ".";
    }
    s.trim_end_matches('0').to_string()
}

fn format_element(x: Scalar, precision: usize) -> String {
    match x {
        Scalar::Float(f) => format_float(f, precision),
        _ => x.to_string(),
    }
}

fn is_default_item_type(t: ItemType) -> bool {
    matches!(t, ItemType::Float64 | ItemType::Int64 | ItemType::Bool)
}

fn shape_tuple(shape: &[usize]) -> String {
    if shape.len() == 1 {
        format!("({},)", shape[0])
    } else {
        format!("({})", shape.iter().join(", "))
    }
}

/// Write the nested brackets of the sub-array at `axis`, whose origin is
/// buffer position `offset`. `indent` is the column of the outermost `[`.
fn format_axis(
    a: &NdArray,
    f: &mut fmt::Formatter<'_>,
    axis: usize,
    offset: isize,
    indent: usize,
    summarize: bool,
    opts: &PrintOptions,
) -> fmt::Result {
    let ndim = a.ndim();
    if axis == ndim {
        return f.write_str(&format_element(a.data.read(offset as usize), opts.precision));
    }
    let len = a.shape[axis];
    let stride = a.strides[axis];
    let edge = opts.edgeitems;
    // `None` stands for the elided middle
    let entries: Vec<Option<usize>> = if summarize && len > 2 * edge {
        (0..edge)
            .map(Some)
            .chain(Some(None))
            .chain((len - edge..len).map(Some))
            .collect()
    } else {
        (0..len).map(Some).collect()
    };
    f.write_str("[")?;
    for (n, entry) in entries.into_iter().enumerate() {
        if n > 0 {
            if axis + 1 == ndim {
                f.write_str(", ")?;
            } else {
                // one blank line per axis below the next one
                f.write_str(",")?;
                for _ in 0..ndim - axis - 1 {
                    f.write_str("\n")?;
                }
                write!(f, "{:1$}", "", indent + axis + 1)?;
            }
        }
        match entry {
            Some(k) => format_axis(
                a,
                f,
                axis + 1,
                offset + dimension::stride_offset(k, stride),
                indent,
                summarize,
                opts,
            )?,
            None => f.write_str("...")?,
        }
    }
    f.write_str("]")
}

struct Repr<'a> {
    array: &'a NdArray,
    opts: &'a PrintOptions,
}

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.array;
        let item_type = a.item_type();
        f.write_str(PREFIX)?;
        if a.is_empty() {
            f.write_str("[]")?;
            if a.ndim() > 1 {
                write!(f, ", shape={}", shape_tuple(a.shape()))?;
            }
            return write!(f, ", dtype={})", item_type);
        }
        let summarize = a.len() > self.opts.threshold;
        format_axis(a, f, 0, a.offset as isize, PREFIX.len(), summarize, self.opts)?;
        if !is_default_item_type(item_type) {
            write!(f, ", dtype={}", item_type)?;
        }
        f.write_str(")")
    }
}

impl NdArray {
    /// Return the numpy-style representation of the array, with the
    /// default print options.
    ///
    /// ```
    /// use tinyarray::{array, ItemType};
    ///
    /// let a = array(vec![vec![1., 2.5], vec![3., 4.]], None);
    /// assert_eq!(a.repr(), "array([[1., 2.5],\n       [3., 4.]])");
    ///
    /// let b = array(vec![1, 2], Some(ItemType::UInt8));
    /// assert_eq!(b.repr(), "array([1, 2], dtype=uint8)");
    /// ```
    pub fn repr(&self) -> String {
        self.repr_with(&PrintOptions::default())
    }

    /// Return the numpy-style representation of the array.
    pub fn repr_with(&self, opts: &PrintOptions) -> String {
        Repr { array: self, opts }.to_string()
    }
}

/// Format the array as nested bracketed lists, in multiline style.
impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = PrintOptions::default();
        format_axis(self, f, 0, self.offset as isize, 0, self.len() > opts.threshold, &opts)
    }
}

/// Format the array as its repr, followed by its layout.
impl fmt::Debug for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Add extra information for Debug
        f.write_str(&self.repr())?;
        write!(
            f,
            " shape={:?}, strides={:?}, offset={}, dtype={}, contiguous={}",
            self.shape(),
            self.strides(),
            self.offset(),
            self.item_type(),
            self.is_contiguous()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arange, array, zeros, ItemType, NdArray};

    #[test]
    fn floats_trim_trailing_zeros() {
        assert_eq!(format_float(1., 8), "1.");
        assert_eq!(format_float(0.1, 8), "0.1");
        assert_eq!(format_float(-2.25, 8), "-2.25");
        assert_eq!(format_float(1. / 3., 4), "0.3333");
        assert_eq!(format_float(f64::NEG_INFINITY, 8), "-inf");
    }

    #[test]
    fn three_dimensional_blocks_are_separated_by_a_blank_line() {
        let a = arange(8).into_shape((2, 2, 2)).unwrap();
        let expected = "array([[[0, 1],\n        [2, 3]],\n\n       [[4, 5],\n        [6, 7]]])";
        assert_eq!(a.repr(), expected);
    }

    #[test]
    fn bools_and_scalars() {
        let a = array(vec![true, false], None);
        assert_eq!(a.repr(), "array([True, False])");
        let z = NdArray::zeros((), ItemType::Float64);
        assert_eq!(z.repr(), "array(0.)");
    }

    #[test]
    fn empty_arrays() {
        assert_eq!(zeros(0).repr(), "array([], dtype=float64)");
        assert_eq!(zeros((0, 3)).repr(), "array([], shape=(0, 3), dtype=float64)");
    }

    #[test]
    fn large_arrays_are_summarized() {
        let a = arange(200);
        assert_eq!(a.repr(), "array([0, 1, 2, ..., 197, 198, 199])");
        let opts = PrintOptions {
            threshold: 1000,
            ..PrintOptions::default()
        };
        assert!(a.repr_with(&opts).contains("100, 101"));
    }

    #[test]
    fn display_and_debug() {
        let a = arange(4).into_shape((2, 2)).unwrap();
        assert_eq!(a.to_string(), "[[0, 1],\n [2, 3]]");
        let dbg = format!("{:?}", a.transpose());
        assert!(dbg.starts_with("array([[0, 2],"));
        assert!(dbg.ends_with("shape=[2, 2], strides=[1, 2], offset=0, dtype=int64, contiguous=false"));
    }
}
