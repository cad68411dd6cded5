//! Key and scan-operator types shared across Tessera components.

use serde::{Deserialize, Serialize};

/// Type of the attribute an index is built over.
///
/// The tag is persisted in the index meta page, so the discriminants are
/// part of the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum KeyType {
    /// 32-bit signed integer key.
    Integer = 0,
    /// 64-bit floating point key.
    Double = 1,
    /// Bounded-length string key.
    Text = 2,
}

impl KeyType {
    /// Returns the on-disk tag for this key type.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Decodes an on-disk tag, if valid.
    pub fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(KeyType::Integer),
            1 => Some(KeyType::Double),
            2 => Some(KeyType::Text),
            _ => None,
        }
    }
}

/// Comparison operator for range scan bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeOp {
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
    /// Greater than or equal to.
    Gte,
    /// Greater than.
    Gt,
}

impl RangeOp {
    /// Returns true if this operator may bound a range from below.
    pub fn is_lower_bound(self) -> bool {
        matches!(self, RangeOp::Gt | RangeOp::Gte)
    }

    /// Returns true if this operator may bound a range from above.
    pub fn is_upper_bound(self) -> bool {
        matches!(self, RangeOp::Lt | RangeOp::Lte)
    }
}
