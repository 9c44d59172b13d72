// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Item types and the scalar values stored in a buffer.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_traits::AsPrimitive;

use crate::error::{from_kind, ArrayError, ErrorKind};

/// The fixed-width element kind of a buffer.
///
/// The item type decides the storage size of each element and how a value
/// is coerced when it is written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl ItemType {
    /// Every supported item type, in promotion order.
    pub const ALL: [ItemType; 11] = [
        ItemType::Bool,
        ItemType::Int8,
        ItemType::UInt8,
        ItemType::Int16,
        ItemType::UInt16,
        ItemType::Int32,
        ItemType::UInt32,
        ItemType::Int64,
        ItemType::UInt64,
        ItemType::Float32,
        ItemType::Float64,
    ];

    /// Size in bytes of a single element
    pub fn itemsize(self) -> usize {
        match self {
            ItemType::Bool | ItemType::Int8 | ItemType::UInt8 => 1,
            ItemType::Int16 | ItemType::UInt16 => 2,
            ItemType::Int32 | ItemType::UInt32 | ItemType::Float32 => 4,
            ItemType::Int64 | ItemType::UInt64 | ItemType::Float64 => 8,
        }
    }

    /// The canonical name, e.g. `"float64"`.
    pub fn name(self) -> &'static str {
        match self {
            ItemType::Bool => "bool",
            ItemType::Int8 => "int8",
            ItemType::UInt8 => "uint8",
            ItemType::Int16 => "int16",
            ItemType::UInt16 => "uint16",
            ItemType::Int32 => "int32",
            ItemType::UInt32 => "uint32",
            ItemType::Int64 => "int64",
            ItemType::UInt64 => "uint64",
            ItemType::Float32 => "float32",
            ItemType::Float64 => "float64",
        }
    }

    /// The array interface type string: byte order, kind and size.
    ///
    /// Single byte types have no byte order (`|`); the others are reported
    /// in native order, which is little endian on every supported target.
    pub fn typestr(self) -> String {
        let kind = match self {
            ItemType::Bool => 'b',
            ItemType::Int8 | ItemType::Int16 | ItemType::Int32 | ItemType::Int64 => 'i',
            ItemType::UInt8 | ItemType::UInt16 | ItemType::UInt32 | ItemType::UInt64 => 'u',
            ItemType::Float32 | ItemType::Float64 => 'f',
        };
        let order = if self.itemsize() == 1 {
            '|'
        } else if cfg!(target_endian = "big") {
            '>'
        } else {
            '<'
        };
        format!("{}{}{}", order, kind, self.itemsize())
    }

    pub fn is_float(self) -> bool {
        matches!(self, ItemType::Float32 | ItemType::Float64)
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ItemType::Int8 | ItemType::Int16 | ItemType::Int32 | ItemType::Int64
        )
    }

    /// The item type of running totals (`cumsum`, `cumprod`) over this type.
    pub fn accumulator(self) -> ItemType {
        match self {
            ItemType::Float32 | ItemType::Float64 | ItemType::UInt64 => self,
            _ => ItemType::Int64,
        }
    }

    /// Coerce `value` the way a write into a slot of this type does.
    pub fn coerce(self, value: Scalar) -> Scalar {
        match self {
            ItemType::Bool => Scalar::Bool(bool::from_scalar(value)),
            ItemType::Int8 => i8::from_scalar(value).into_scalar(),
            ItemType::UInt8 => u8::from_scalar(value).into_scalar(),
            ItemType::Int16 => i16::from_scalar(value).into_scalar(),
            ItemType::UInt16 => u16::from_scalar(value).into_scalar(),
            ItemType::Int32 => i32::from_scalar(value).into_scalar(),
            ItemType::UInt32 => u32::from_scalar(value).into_scalar(),
            ItemType::Int64 => i64::from_scalar(value).into_scalar(),
            ItemType::UInt64 => u64::from_scalar(value).into_scalar(),
            ItemType::Float32 => f32::from_scalar(value).into_scalar(),
            ItemType::Float64 => f64::from_scalar(value).into_scalar(),
        }
    }
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::Float64
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemType {
    type Err = ArrayError;

    /// Parse a canonical name; `"float"` and `"int"` are accepted as the
    /// 64-bit types.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let item_type = match s {
            "bool" => ItemType::Bool,
            "int8" => ItemType::Int8,
            "uint8" => ItemType::UInt8,
            "int16" => ItemType::Int16,
            "uint16" => ItemType::UInt16,
            "int32" => ItemType::Int32,
            "uint32" => ItemType::UInt32,
            "int64" | "int" => ItemType::Int64,
            "uint64" => ItemType::UInt64,
            "float32" => ItemType::Float32,
            "float64" | "float" => ItemType::Float64,
            _ => return Err(from_kind(ErrorKind::Unsupported)),
        };
        Ok(item_type)
    }
}

/// A single element value, as read from or written to a buffer.
///
/// Equality compares the numeric value, so `Int(1) == Float(1.0)`.
#[derive(Copy, Clone, Debug)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Scalar {
    pub fn to_f64(self) -> f64 {
        f64::from_scalar(self)
    }

    pub fn to_i64(self) -> i64 {
        i64::from_scalar(self)
    }

    pub fn to_u64(self) -> u64 {
        u64::from_scalar(self)
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Scalar::Float(x) if x.is_nan())
    }

    /// Truth value: zero is false, anything else is true.
    pub fn to_bool(self) -> bool {
        bool::from_scalar(self)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, rhs: &Self) -> bool {
        match (*self, *rhs) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::UInt(a), Scalar::UInt(b)) => a == b,
            (Scalar::Int(a), Scalar::UInt(b)) | (Scalar::UInt(b), Scalar::Int(a)) => {
                a >= 0 && a as u64 == b
            }
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

impl PartialOrd for Scalar {
    /// Numeric order across variants; `None` only when a NaN is involved.
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        match (*self, *rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => a.partial_cmp(&b),
            (Scalar::UInt(a), Scalar::UInt(b)) => a.partial_cmp(&b),
            (Scalar::Int(a), Scalar::UInt(b)) => {
                if a < 0 {
                    Some(Ordering::Less)
                } else {
                    (a as u64).partial_cmp(&b)
                }
            }
            (Scalar::UInt(_), Scalar::Int(_)) => rhs.partial_cmp(self).map(Ordering::reverse),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Bool(true) => f.write_str("True"),
            Scalar::Bool(false) => f.write_str("False"),
            Scalar::Int(x) => write!(f, "{}", x),
            Scalar::UInt(x) => write!(f, "{}", x),
            Scalar::Float(x) => write!(f, "{}", x),
        }
    }
}

/// A native Rust type that can be stored in a buffer.
///
/// This trait is sealed; it is implemented for `bool`, the fixed-width
/// integers and `f32`/`f64`.
pub trait Element: Copy + private::Sealed + 'static {
    /// The item type tag for this native type.
    const ITEM_TYPE: ItemType;

    /// Convert with C-cast semantics: floats truncate toward zero, integers
    /// wrap to the target width, booleans are 0 or 1.
    fn from_scalar(value: Scalar) -> Self;

    fn into_scalar(self) -> Scalar;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_element {
    ($ty:ty, $item_type:ident, $variant:ident, $wide:ty) => {
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const ITEM_TYPE: ItemType = ItemType::$item_type;

            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Bool(b) => b as u8 as $ty,
                    Scalar::Int(x) => x.as_(),
                    Scalar::UInt(x) => x.as_(),
                    Scalar::Float(x) => float_to_int::<$ty>(x),
                }
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::$variant(self as $wide)
            }
        }
    };
}

// Truncate toward zero, then wrap to the target width.
#[inline]
fn float_to_int<T>(x: f64) -> T
where
    T: Copy + 'static,
    i64: AsPrimitive<T>,
    u64: AsPrimitive<T>,
{
    if x < 0.0 {
        (x as i64).as_()
    } else {
        (x as u64).as_()
    }
}

impl_element!(i8, Int8, Int, i64);
impl_element!(u8, UInt8, UInt, u64);
impl_element!(i16, Int16, Int, i64);
impl_element!(u16, UInt16, UInt, u64);
impl_element!(i32, Int32, Int, i64);
impl_element!(u32, UInt32, UInt, u64);
impl_element!(i64, Int64, Int, i64);
impl_element!(u64, UInt64, UInt, u64);

macro_rules! impl_float_element {
    ($ty:ty, $item_type:ident) => {
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const ITEM_TYPE: ItemType = ItemType::$item_type;

            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Bool(b) => b as u8 as $ty,
                    Scalar::Int(x) => x.as_(),
                    Scalar::UInt(x) => x.as_(),
                    Scalar::Float(x) => x.as_(),
                }
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::Float(self.as_())
            }
        }
    };
}

impl_float_element!(f32, Float32);
impl_float_element!(f64, Float64);

impl private::Sealed for bool {}

impl Element for bool {
    const ITEM_TYPE: ItemType = ItemType::Bool;

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Bool(b) => b,
            Scalar::Int(x) => x != 0,
            Scalar::UInt(x) => x != 0,
            Scalar::Float(x) => x != 0.0,
        }
    }

    #[inline]
    fn into_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(x: $ty) -> Scalar {
                    x.into_scalar()
                }
            }
        )*
    };
}

impl_scalar_from!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl From<usize> for Scalar {
    #[inline]
    fn from(x: usize) -> Scalar {
        Scalar::UInt(x as u64)
    }
}

impl From<isize> for Scalar {
    #[inline]
    fn from(x: isize) -> Scalar {
        Scalar::Int(x as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &t in ItemType::ALL.iter() {
            assert_eq!(t.name().parse::<ItemType>().unwrap(), t);
        }
        assert_eq!("blaa".parse::<ItemType>().unwrap_err().kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn itemsizes() {
        assert_eq!(ItemType::Bool.itemsize(), 1);
        assert_eq!(ItemType::UInt16.itemsize(), 2);
        assert_eq!(ItemType::Float32.itemsize(), 4);
        assert_eq!(ItemType::Float64.itemsize(), 8);
    }

    #[test]
    fn typestr() {
        assert_eq!(ItemType::UInt8.typestr(), "|u1");
        assert_eq!(ItemType::Bool.typestr(), "|b1");
        if cfg!(target_endian = "little") {
            assert_eq!(ItemType::Float64.typestr(), "<f8");
            assert_eq!(ItemType::Int32.typestr(), "<i4");
        }
    }

    #[test]
    fn scalars_order_numerically() {
        assert!(Scalar::Int(-1) < Scalar::UInt(0));
        assert!(Scalar::UInt(u64::MAX) > Scalar::Int(i64::MAX));
        assert!(Scalar::Bool(true) > Scalar::Float(0.5));
        assert_eq!(Scalar::Float(f64::NAN).partial_cmp(&Scalar::Int(1)), None);
    }

    #[test]
    fn coerce_wraps_and_truncates() {
        assert_eq!(ItemType::UInt8.coerce(Scalar::Int(300)), Scalar::UInt(44));
        assert_eq!(ItemType::Int8.coerce(Scalar::Int(200)), Scalar::Int(-56));
        assert_eq!(ItemType::Int32.coerce(Scalar::Float(-2.7)), Scalar::Int(-2));
        assert_eq!(ItemType::UInt8.coerce(Scalar::Float(257.9)), Scalar::UInt(1));
        assert_eq!(ItemType::Bool.coerce(Scalar::Float(0.5)), Scalar::Bool(true));
        assert_eq!(ItemType::Bool.coerce(Scalar::Int(0)), Scalar::Bool(false));
        assert_eq!(ItemType::Float32.coerce(Scalar::Float(0.1)), Scalar::Float(0.1f32 as f64));
    }

    #[test]
    fn scalar_equality_is_numeric() {
        assert_eq!(Scalar::Int(1), Scalar::Float(1.0));
        assert_eq!(Scalar::UInt(3), Scalar::Int(3));
        assert_ne!(Scalar::Int(-1), Scalar::UInt(u64::MAX));
        assert_eq!(Scalar::Bool(true), Scalar::Int(1));
    }
}
