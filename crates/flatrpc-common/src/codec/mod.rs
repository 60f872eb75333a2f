//! FlatRPC Path Codec
//!
//! This module flattens typed values into `dotted.path -> string` pairs and
//! rebuilds typed values from such pairs.
//!
//! # Components
//!
//! - [`classify`]: the simple-type classifier ([`Kind`])
//! - [`wire`]: the [`Encode`] / [`Decode`] traits and their terminal implementations
//! - [`path`]: the encode/decode entry points and the key-stripping helper
//! - [`structured!`](crate::structured): declares a structured type with an
//!   explicit, ordered field list
//!
//! # Path Layout
//!
//! | value | pairs |
//! |-------|-------|
//! | `dx: i32 = 3` | `dx = 3` |
//! | `p: Point { x: 1, y: 2 }` | `p.x = 1`, `p.y = 2` |
//! | `seg: Segment { from: Point, to: Point }` | `seg.from.x`, `seg.from.y`, `seg.to.x`, `seg.to.y` |
//! | return value `()` | `result = Ok` |

pub mod classify;
pub mod path;
pub mod structured;
pub mod wire;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

/// Flattened parameters: dotted path to textual value.
///
/// A `BTreeMap` keeps keys sorted, which makes encodings deterministic and
/// lets prefix lookups walk a contiguous key range.
pub type Parameters = BTreeMap<String, String>;

/// Separator between the segments of a dotted path.
pub const SEPARATOR: char = '.';

pub use classify::{kind_of, kind_of_type, Kind};
pub use path::{decode, decode_within, encode, join, strip_prefix};
pub use structured::Structured;
pub use wire::{Decode, Encode};
