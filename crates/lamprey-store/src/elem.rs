//! Tagged primitive values and the kind tags stores are built from.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The primitive width a store holds.
///
/// The discriminant doubles as the one-byte tag written in front of a store stream wherever the
/// kind is not known out-of-band (the sparse edge format's data store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Bit,
    Byte,
    Int,
    Long,
    Float,
    #[default]
    Double,
}

impl StoreKind {
    pub const ALL: [StoreKind; 6] = [
        StoreKind::Bit,
        StoreKind::Byte,
        StoreKind::Int,
        StoreKind::Long,
        StoreKind::Float,
        StoreKind::Double,
    ];

    pub fn tag(self) -> u8 {
        match self {
            StoreKind::Bit => 0,
            StoreKind::Byte => 1,
            StoreKind::Int => 2,
            StoreKind::Long => 3,
            StoreKind::Float => 4,
            StoreKind::Double => 5,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.tag() == tag)
            .ok_or(Error::UnknownKind { tag })
    }

    /// Payload width of a single element, in bits.
    pub fn width_bits(self) -> usize {
        match self {
            StoreKind::Bit => 1,
            StoreKind::Byte => 8,
            StoreKind::Int | StoreKind::Float => 32,
            StoreKind::Long | StoreKind::Double => 64,
        }
    }

    /// Converts `elem` into this kind using the store coercion rules.
    pub fn coerce(self, elem: Elem) -> Elem {
        match self {
            StoreKind::Bit => Elem::Bit(elem.as_bool()),
            StoreKind::Byte => Elem::Byte(elem.as_i8()),
            StoreKind::Int => Elem::Int(elem.as_i32()),
            StoreKind::Long => Elem::Long(elem.as_i64()),
            StoreKind::Float => Elem::Float(elem.as_f32()),
            StoreKind::Double => Elem::Double(elem.as_f64()),
        }
    }

    /// Round-trips `value` through this kind, yielding what a store of this kind would read back.
    pub fn coerce_f64(self, value: f64) -> f64 {
        self.coerce(Elem::Double(value)).as_f64()
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreKind::Bit => "bit",
            StoreKind::Byte => "byte",
            StoreKind::Int => "int",
            StoreKind::Long => "long",
            StoreKind::Float => "float",
            StoreKind::Double => "double",
        };
        f.write_str(name)
    }
}

/// A single primitive value of any store kind.
///
/// Reads and writes across kinds follow fixed rules: numbers become bits by `value > 0`, bits
/// become numbers as `0`/`1`, and floating values narrow to integer kinds with saturation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Elem {
    Bit(bool),
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Elem {
    pub fn kind(self) -> StoreKind {
        match self {
            Elem::Bit(_) => StoreKind::Bit,
            Elem::Byte(_) => StoreKind::Byte,
            Elem::Int(_) => StoreKind::Int,
            Elem::Long(_) => StoreKind::Long,
            Elem::Float(_) => StoreKind::Float,
            Elem::Double(_) => StoreKind::Double,
        }
    }

    pub fn as_bool(self) -> bool {
        match self {
            Elem::Bit(v) => v,
            Elem::Byte(v) => v > 0,
            Elem::Int(v) => v > 0,
            Elem::Long(v) => v > 0,
            Elem::Float(v) => v > 0.0,
            Elem::Double(v) => v > 0.0,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Elem::Bit(v) => i64::from(v),
            Elem::Byte(v) => i64::from(v),
            Elem::Int(v) => i64::from(v),
            Elem::Long(v) => v,
            Elem::Float(v) => v as i64,
            Elem::Double(v) => v as i64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Elem::Bit(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
            Elem::Byte(v) => f64::from(v),
            Elem::Int(v) => f64::from(v),
            Elem::Long(v) => v as f64,
            Elem::Float(v) => f64::from(v),
            Elem::Double(v) => v,
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Elem::Float(v) => v,
            other => other.as_f64() as f32,
        }
    }

    /// Floating values saturate, wider integers wrap.
    pub fn as_i8(self) -> i8 {
        match self {
            Elem::Float(v) => v as i8,
            Elem::Double(v) => v as i8,
            other => other.as_i64() as i8,
        }
    }

    /// Floating values saturate, wider integers wrap.
    pub fn as_i32(self) -> i32 {
        match self {
            Elem::Float(v) => v as i32,
            Elem::Double(v) => v as i32,
            other => other.as_i64() as i32,
        }
    }
}

impl From<bool> for Elem {
    fn from(v: bool) -> Self {
        Elem::Bit(v)
    }
}

impl From<i8> for Elem {
    fn from(v: i8) -> Self {
        Elem::Byte(v)
    }
}

impl From<i32> for Elem {
    fn from(v: i32) -> Self {
        Elem::Int(v)
    }
}

impl From<i64> for Elem {
    fn from(v: i64) -> Self {
        Elem::Long(v)
    }
}

impl From<f32> for Elem {
    fn from(v: f32) -> Self {
        Elem::Float(v)
    }
}

impl From<f64> for Elem {
    fn from(v: f64) -> Self {
        Elem::Double(v)
    }
}
