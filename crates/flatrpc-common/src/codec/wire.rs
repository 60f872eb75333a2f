//! Encode/Decode traits and the terminal type implementations.

use super::classify::Kind;
use super::Parameters;
use crate::protocol::{FlatrpcError, Result, VOID_RESULT};

/// A value that can be flattened into dotted-path pairs.
///
/// This trait is object-safe so heterogeneous argument lists can be passed as
/// `&[&dyn Encode]`.
pub trait Encode {
    /// Classifies this value.
    fn kind(&self) -> Kind;

    /// Writes this value under `base` into `out`.
    ///
    /// Terminal values write exactly one pair keyed by `base`. Structured
    /// values recurse into each declared field with `base.field`.
    fn encode_into(&self, base: &str, out: &mut Parameters) -> Result<()>;
}

/// A value that can be rebuilt from dotted-path pairs whose common prefix has
/// already been stripped.
pub trait Decode: Sized {
    /// Classification of the declared type.
    const KIND: Kind;

    /// Whether an empty parameter mapping is a valid encoding. Only the unit
    /// type accepts it.
    const ACCEPTS_EMPTY: bool = false;

    fn decode_from(params: &Parameters) -> Result<Self>;
}

/// Inserts one pair, rejecting a path that was already written.
pub fn insert_unique(out: &mut Parameters, key: &str, value: String) -> Result<()> {
    if out.contains_key(key) {
        return Err(FlatrpcError::Encoding(format!("duplicate path '{}'", key)));
    }
    out.insert(key.to_string(), value);
    Ok(())
}

/// Returns the text stored at the terminal position (the empty key).
pub fn terminal_text<'a, T>(params: &'a Parameters) -> Result<&'a str> {
    params.get("").map(String::as_str).ok_or_else(|| {
        FlatrpcError::Decoding(format!(
            "no terminal value for {}; found keys {:?}",
            std::any::type_name::<T>(),
            params.keys().collect::<Vec<_>>()
        ))
    })
}

macro_rules! terminal_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn kind(&self) -> Kind {
                    Kind::Terminal
                }

                fn encode_into(&self, base: &str, out: &mut Parameters) -> Result<()> {
                    insert_unique(out, base, self.to_string())
                }
            }

            impl Decode for $ty {
                const KIND: Kind = Kind::Terminal;

                fn decode_from(params: &Parameters) -> Result<Self> {
                    let text = terminal_text::<Self>(params)?;
                    text.parse::<$ty>().map_err(|e| {
                        FlatrpcError::Decoding(format!(
                            "unable to parse '{}' as {}: {}",
                            text,
                            stringify!($ty),
                            e
                        ))
                    })
                }
            }
        )*
    };
}

terminal_from_str!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Encode for char {
    fn kind(&self) -> Kind {
        Kind::Terminal
    }

    fn encode_into(&self, base: &str, out: &mut Parameters) -> Result<()> {
        insert_unique(out, base, self.to_string())
    }
}

impl Decode for char {
    const KIND: Kind = Kind::Terminal;

    /// Requires exactly one character; longer input is rejected rather than
    /// truncated.
    fn decode_from(params: &Parameters) -> Result<Self> {
        let text = terminal_text::<Self>(params)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(FlatrpcError::Decoding(format!(
                "expected exactly one character, got '{}'",
                text
            ))),
        }
    }
}

impl Encode for String {
    fn kind(&self) -> Kind {
        Kind::Terminal
    }

    fn encode_into(&self, base: &str, out: &mut Parameters) -> Result<()> {
        insert_unique(out, base, self.clone())
    }
}

impl Encode for str {
    fn kind(&self) -> Kind {
        Kind::Terminal
    }

    fn encode_into(&self, base: &str, out: &mut Parameters) -> Result<()> {
        insert_unique(out, base, self.to_string())
    }
}

impl Decode for String {
    const KIND: Kind = Kind::Terminal;

    fn decode_from(params: &Parameters) -> Result<Self> {
        terminal_text::<Self>(params).map(str::to_string)
    }
}

impl Encode for () {
    fn kind(&self) -> Kind {
        Kind::Terminal
    }

    fn encode_into(&self, base: &str, out: &mut Parameters) -> Result<()> {
        insert_unique(out, base, VOID_RESULT.to_string())
    }
}

impl Decode for () {
    const KIND: Kind = Kind::Terminal;
    const ACCEPTS_EMPTY: bool = true;

    fn decode_from(_params: &Parameters) -> Result<Self> {
        Ok(())
    }
}
