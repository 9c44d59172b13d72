// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// A slice (range with step size).
///
/// Bounds follow Python's slicing rules: negative `start` or `end` indexes
/// are counted from the back of the axis, out of range bounds are clamped,
/// and an open bound (`None`) extends to the appropriate end of the axis for
/// the direction given by `step`.
///
/// ## Examples
///
/// `Slice::new(None, None, 1)` is the full range of an axis. It can also be
/// created with `Slice::from(..)`. The Python equivalent is `[:]`.
///
/// `Slice::new(Some(a), Some(b), 2)` is every second element from `a` until
/// `b`. It can also be created with `Slice::from(a..b).step_by(2)`. The
/// Python equivalent is `[a:b:2]`.
///
/// `Slice::new(None, None, -1)` is every element in reverse order. It can
/// also be created with `Slice::from(..).step_by(-1)`. The Python equivalent
/// is `[::-1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: Option<isize>,
    pub end: Option<isize>,
    pub step: isize,
}

impl Slice {
    /// Create a new `Slice` with the given extents.
    ///
    /// A zero `step` is rejected when the slice is applied to an array.
    pub fn new(start: Option<isize>, end: Option<isize>, step: isize) -> Slice {
        Slice { start, end, step }
    }

    /// Create a new `Slice` with the given step size (multiplied with the
    /// previous step size).
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        Slice {
            step: self.step * step,
            ..self
        }
    }

    /// Resolve the slice against an axis of length `len`.
    ///
    /// Return `(start, stop, step)` with the bounds clamped the way Python's
    /// `slice.indices` clamps them, or `None` if `step` is zero.
    pub fn indices(&self, len: usize) -> Option<(isize, isize, isize)> {
        let step = self.step;
        if step == 0 {
            return None;
        }
        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: isize| {
            let bound = if bound < 0 { bound + len } else { bound };
            bound.max(lower).min(upper)
        };
        let start = match self.start {
            Some(s) => clamp(s),
            None if step < 0 => upper,
            None => lower,
        };
        let stop = match self.end {
            Some(e) => clamp(e),
            None if step < 0 => lower,
            None => upper,
        };
        Some((start, stop, step))
    }
}

macro_rules! impl_slice_variant_from_range {
    ($self:ty, $constructor:path, $index:ty) => {
        impl From<Range<$index>> for $self {
            #[inline]
            fn from(r: Range<$index>) -> $self {
                $constructor(Slice {
                    start: Some(r.start as isize),
                    end: Some(r.end as isize),
                    step: 1,
                })
            }
        }

        impl From<RangeInclusive<$index>> for $self {
            #[inline]
            fn from(r: RangeInclusive<$index>) -> $self {
                let end = *r.end() as isize;
                $constructor(Slice {
                    start: Some(*r.start() as isize),
                    end: if end == -1 { None } else { Some(end + 1) },
                    step: 1,
                })
            }
        }

        impl From<RangeFrom<$index>> for $self {
            #[inline]
            fn from(r: RangeFrom<$index>) -> $self {
                $constructor(Slice {
                    start: Some(r.start as isize),
                    end: None,
                    step: 1,
                })
            }
        }

        impl From<RangeTo<$index>> for $self {
            #[inline]
            fn from(r: RangeTo<$index>) -> $self {
                $constructor(Slice {
                    start: None,
                    end: Some(r.end as isize),
                    step: 1,
                })
            }
        }

        impl From<RangeToInclusive<$index>> for $self {
            #[inline]
            fn from(r: RangeToInclusive<$index>) -> $self {
                let end = r.end as isize;
                $constructor(Slice {
                    start: None,
                    end: if end == -1 { None } else { Some(end + 1) },
                    step: 1,
                })
            }
        }
    };
}

fn identity(s: Slice) -> Slice {
    s
}

impl_slice_variant_from_range!(Slice, identity, isize);
impl_slice_variant_from_range!(Slice, identity, usize);
impl_slice_variant_from_range!(Slice, identity, i32);

impl From<RangeFull> for Slice {
    #[inline]
    fn from(_: RangeFull) -> Slice {
        Slice {
            start: None,
            end: None,
            step: 1,
        }
    }
}

/// Token to represent a new axis in a key.
///
/// A new axis has length 1 and stride 0. The Python equivalent is
/// `np.newaxis` (or `None`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NewAxis;

/// One selector of an indexing key.
///
/// `Index` and `Slice` each consume one axis of the indexed array, `NewAxis`
/// consumes none. The remaining variants exist so that callers porting numpy
/// code can express them; they are rejected with `ErrorKind::Unsupported`.
///
/// ## Examples
///
/// `SliceInfoElem::Index(a)` is the index `a`. The Python equivalent is
/// `[a]`, the macro equivalent is `s![a]`.
///
/// `SliceInfoElem::Slice(Slice::from(a..b).step_by(2))` is every second
/// element from `a` until `b`. The Python equivalent is `[a:b:2]`, the macro
/// equivalent is `s![a..b;2]`.
///
/// `SliceInfoElem::NewAxis` inserts a new axis of length 1. The Python
/// equivalent is `[np.newaxis]`, the macro equivalent is `s![NewAxis]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SliceInfoElem {
    /// A single index; the axis is dropped.
    Index(isize),
    /// A range with step size.
    Slice(Slice),
    /// A new axis of length 1.
    NewAxis,
    /// `...`, not supported.
    Ellipsis,
    /// A boolean mask, not supported.
    Mask(Vec<bool>),
    /// An integer array ("fancy") index, not supported.
    Indices(Vec<isize>),
}

impl SliceInfoElem {
    /// Returns `true` if `self` is a `Slice` value.
    pub fn is_slice(&self) -> bool {
        matches!(self, SliceInfoElem::Slice(_))
    }

    /// Returns `true` if `self` is an `Index` value.
    pub fn is_index(&self) -> bool {
        matches!(self, SliceInfoElem::Index(_))
    }

    /// Returns `true` if `self` is a `NewAxis` value.
    pub fn is_new_axis(&self) -> bool {
        matches!(self, SliceInfoElem::NewAxis)
    }

    /// Returns a new `SliceInfoElem` with the given step size (multiplied
    /// with the previous step size). Other selectors are returned unchanged.
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        match self {
            SliceInfoElem::Slice(s) => SliceInfoElem::Slice(s.step_by(step)),
            other => other,
        }
    }
}

impl fmt::Display for SliceInfoElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceInfoElem::Index(index) => write!(f, "{}", index)?,
            SliceInfoElem::Slice(Slice { start, end, step }) => {
                if let Some(i) = start {
                    write!(f, "{}", i)?;
                }
                write!(f, "..")?;
                if let Some(i) = end {
                    write!(f, "{}", i)?;
                }
                if *step != 1 {
                    write!(f, ";{}", step)?;
                }
            }
            SliceInfoElem::NewAxis => write!(f, "NewAxis")?,
            SliceInfoElem::Ellipsis => write!(f, "...")?,
            SliceInfoElem::Mask(m) => write!(f, "{:?}", m)?,
            SliceInfoElem::Indices(ix) => write!(f, "{:?}", ix)?,
        }
        Ok(())
    }
}

impl_slice_variant_from_range!(SliceInfoElem, SliceInfoElem::Slice, isize);
impl_slice_variant_from_range!(SliceInfoElem, SliceInfoElem::Slice, usize);
impl_slice_variant_from_range!(SliceInfoElem, SliceInfoElem::Slice, i32);

impl From<RangeFull> for SliceInfoElem {
    #[inline]
    fn from(_: RangeFull) -> SliceInfoElem {
        SliceInfoElem::Slice(Slice::from(..))
    }
}

impl From<Slice> for SliceInfoElem {
    #[inline]
    fn from(s: Slice) -> SliceInfoElem {
        SliceInfoElem::Slice(s)
    }
}

impl From<NewAxis> for SliceInfoElem {
    #[inline]
    fn from(_: NewAxis) -> SliceInfoElem {
        SliceInfoElem::NewAxis
    }
}

macro_rules! impl_sliceinfoelem_from_index_type {
    ($index:ty) => {
        impl From<$index> for SliceInfoElem {
            #[inline]
            fn from(r: $index) -> SliceInfoElem {
                SliceInfoElem::Index(r as isize)
            }
        }
    };
}

impl_sliceinfoelem_from_index_type!(isize);
impl_sliceinfoelem_from_index_type!(usize);
impl_sliceinfoelem_from_index_type!(i32);

/// Conversion into an indexing key: an ordered sequence of selectors.
///
/// A bare selector (an index, a range, a `Slice` or `NewAxis`) is promoted to
/// a one-element key. Arrays, vectors and slices of `SliceInfoElem` (as built
/// by [`s![]`](macro.s.html)) are used as they are.
pub trait IntoKey {
    fn into_key(self) -> Vec<SliceInfoElem>;
}

impl IntoKey for SliceInfoElem {
    fn into_key(self) -> Vec<SliceInfoElem> {
        vec![self]
    }
}

impl IntoKey for Vec<SliceInfoElem> {
    fn into_key(self) -> Vec<SliceInfoElem> {
        self
    }
}

impl<'a> IntoKey for &'a [SliceInfoElem] {
    fn into_key(self) -> Vec<SliceInfoElem> {
        self.to_vec()
    }
}

impl<const N: usize> IntoKey for [SliceInfoElem; N] {
    fn into_key(self) -> Vec<SliceInfoElem> {
        self.to_vec()
    }
}

impl<'a> IntoKey for &'a [usize] {
    /// A full multi-index, one integer per axis.
    fn into_key(self) -> Vec<SliceInfoElem> {
        self.iter().map(|&i| SliceInfoElem::Index(i as isize)).collect()
    }
}

macro_rules! impl_into_key_for_selector {
    ($($t:ty),*) => {
        $(
            impl IntoKey for $t {
                #[inline]
                fn into_key(self) -> Vec<SliceInfoElem> {
                    vec![SliceInfoElem::from(self)]
                }
            }
        )*
    };
}

impl_into_key_for_selector!(isize, usize, i32, RangeFull, Slice, NewAxis);

macro_rules! impl_into_key_for_range {
    ($($index:ty),*) => {
        $(
            impl_into_key_for_selector!(
                Range<$index>,
                RangeInclusive<$index>,
                RangeFrom<$index>,
                RangeTo<$index>,
                RangeToInclusive<$index>
            );
        )*
    };
}

impl_into_key_for_range!(isize, usize, i32);

/// Indexing key constructor.
///
/// `s![]` takes a list of ranges/slices/indices/new axes, separated by
/// comma, with optional step sizes that are separated from the range by a
/// semicolon. It is converted into an array of [`SliceInfoElem`], which is
/// accepted wherever a key is.
///
/// [`SliceInfoElem`]: enum.SliceInfoElem.html
///
/// Each range/slice/index uses signed indices, where a negative value is
/// counted from the end of the axis. Step sizes are also signed and may be
/// negative, but must not be zero.
///
/// The syntax is `s![` *[ elem [, elem [ , ... ] ] ]* `]`, where *elem* is any
/// of the following:
///
/// * *index*: an index to use for taking a subview with respect to that axis
/// * *range*: a range with step size 1 to use for slicing that axis
/// * *range* `;` *step*: a range with step size *step* to use for slicing that axis
/// * *slice*: a [`Slice`] instance to use for slicing that axis
/// * *new-axis*: a [`NewAxis`] instance that represents the creation of a new axis
///
/// [`Slice`]: struct.Slice.html
/// [`NewAxis`]: struct.NewAxis.html
///
/// Axes without an explicit selector are passed through unchanged.
///
/// For example `s![0..4;2, 6, NewAxis, 1..]` takes every second row from the
/// first four, the column at index 6, inserts a new axis of length 1, and
/// slices the third axis from 1 to the end.
///
/// # Example
///
/// ```
/// use tinyarray::{arange, s};
///
/// let a = arange(16).into_shape((4, 4)).unwrap();
/// let corner = a.get(s![1.., ..;2]).unwrap();
/// assert_eq!(corner.shape(), &[3, 2]);
/// ```
#[macro_export]
macro_rules! s(
    // empty call, i.e. `s![]`
    (@parse []) => {
        {
            let key: [$crate::SliceInfoElem; 0] = [];
            key
        }
    };
    // convert a..b;c into @convert(a..b, c), final item
    (@parse [$($stack:tt)*] $r:expr;$s:expr) => {
        [$($stack)* $crate::s!(@convert $r, $s)]
    };
    // convert a..b into @convert(a..b), final item
    (@parse [$($stack:tt)*] $r:expr) => {
        [$($stack)* $crate::s!(@convert $r)]
    };
    // convert a..b;c into @convert(a..b, c), final item, trailing comma
    (@parse [$($stack:tt)*] $r:expr;$s:expr ,) => {
        [$($stack)* $crate::s!(@convert $r, $s)]
    };
    // convert a..b into @convert(a..b), final item, trailing comma
    (@parse [$($stack:tt)*] $r:expr ,) => {
        [$($stack)* $crate::s!(@convert $r)]
    };
    // convert a..b;c into @convert(a..b, c)
    (@parse [$($stack:tt)*] $r:expr;$s:expr, $($t:tt)*) => {
        $crate::s![@parse [$($stack)* $crate::s!(@convert $r, $s),] $($t)*]
    };
    // convert a..b into @convert(a..b)
    (@parse [$($stack:tt)*] $r:expr, $($t:tt)*) => {
        $crate::s![@parse [$($stack)* $crate::s!(@convert $r),] $($t)*]
    };
    // convert range/index/new-axis into SliceInfoElem
    (@convert $r:expr) => {
        <$crate::SliceInfoElem as ::std::convert::From<_>>::from($r)
    };
    // convert range/index and step into SliceInfoElem
    (@convert $r:expr, $s:expr) => {
        <$crate::SliceInfoElem as ::std::convert::From<_>>::from($r).step_by($s as isize)
    };
    ($($t:tt)*) => {
        $crate::s![@parse [] $($t)*]
    };
);

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(s: Slice, len: usize) -> (isize, isize, isize) {
        s.indices(len).unwrap()
    }

    #[test]
    fn python_bounds() {
        assert_eq!(indices(Slice::from(..), 4), (0, 4, 1));
        assert_eq!(indices(Slice::from(1..), 4), (1, 4, 1));
        assert_eq!(indices(Slice::from(-1..), 4), (3, 4, 1));
        assert_eq!(indices(Slice::from(..10), 4), (0, 4, 1));
        assert_eq!(indices(Slice::from(-10..2), 4), (0, 2, 1));
        assert_eq!(indices(Slice::from(..).step_by(-1), 4), (3, -1, -1));
        assert_eq!(indices(Slice::from(2..).step_by(-1), 4), (2, -1, -1));
        assert_eq!(indices(Slice::from(10..0).step_by(-2), 4), (3, 0, -2));
        assert!(Slice::new(None, None, 0).indices(4).is_none());
    }

    #[test]
    fn macro_builds_keys() {
        let key = s![1.., 1, NewAxis, ..;2];
        assert_eq!(key.len(), 4);
        assert_eq!(key[0], SliceInfoElem::Slice(Slice::new(Some(1), None, 1)));
        assert_eq!(key[1], SliceInfoElem::Index(1));
        assert_eq!(key[2], SliceInfoElem::NewAxis);
        assert_eq!(key[3], SliceInfoElem::Slice(Slice::new(None, None, 2)));
        let empty = s![];
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn inclusive_ranges() {
        assert_eq!(Slice::from(1..=2), Slice::new(Some(1), Some(3), 1));
        assert_eq!(Slice::from(..=-1), Slice::new(None, None, 1));
    }

    #[test]
    fn bare_selectors_promote() {
        assert_eq!(3i32.into_key(), vec![SliceInfoElem::Index(3)]);
        assert_eq!((1i32..).into_key(), vec![SliceInfoElem::Slice(Slice::new(Some(1), None, 1))]);
        assert_eq!(NewAxis.into_key(), vec![SliceInfoElem::NewAxis]);
    }

    #[test]
    fn display() {
        let key = s![1..;2, -1, ..];
        let shown: Vec<String> = key.iter().map(|k| k.to_string()).collect();
        assert_eq!(shown, vec!["1..;2", "-1", ".."]);
    }
}
