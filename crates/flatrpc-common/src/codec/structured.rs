//! Structured types with declared field lists.
//!
//! Instead of discovering fields at runtime, a structured type states its
//! fields once, in order, through the [`structured!`](crate::structured)
//! macro. Encoding walks that list with each field's accessor and decoding
//! starts from `Default::default()` and assigns each field in turn.

/// A value type made of named fields.
///
/// `Default` stands in for the zero-argument constructor that decoding starts
/// from. Field graphs must be acyclic; a recursive type would need an arena of
/// indices rather than nested ownership.
pub trait Structured: Default {
    /// Field names, in encoding order.
    const FIELDS: &'static [&'static str];
}

/// Declares a struct and implements [`Structured`], [`Encode`](crate::codec::Encode)
/// and [`Decode`](crate::codec::Decode) for it from its field list.
///
/// Every field type must itself implement `Encode` and `Decode`, and the struct
/// must implement `Default` (usually derived).
///
/// # Example
///
/// ```
/// use flatrpc_common::{codec, structured};
///
/// structured! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// structured! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Segment {
///         pub from: Point,
///         pub to: Point,
///     }
/// }
///
/// let seg = Segment { from: Point { x: 0, y: 0 }, to: Point { x: 3, y: 4 } };
/// let params = codec::encode("seg", &seg).unwrap();
/// assert_eq!(params.get("seg.to.y").map(String::as_str), Some("4"));
/// ```
#[macro_export]
macro_rules! structured {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::codec::Structured for $name {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];
        }

        impl $crate::codec::Encode for $name {
            fn kind(&self) -> $crate::codec::Kind {
                $crate::codec::Kind::Structured
            }

            #[allow(unused_variables)]
            fn encode_into(
                &self,
                base: &str,
                out: &mut $crate::codec::Parameters,
            ) -> $crate::protocol::Result<()> {
                $(
                    $crate::codec::Encode::encode_into(
                        &self.$field,
                        &$crate::codec::join(base, stringify!($field)),
                        out,
                    )?;
                )*
                Ok(())
            }
        }

        impl $crate::codec::Decode for $name {
            const KIND: $crate::codec::Kind = $crate::codec::Kind::Structured;

            #[allow(unused_variables, unused_mut)]
            fn decode_from(
                params: &$crate::codec::Parameters,
            ) -> $crate::protocol::Result<Self> {
                let mut value = <Self as ::core::default::Default>::default();
                $(
                    value.$field = $crate::codec::decode_within::<$ty>(stringify!($field), params)
                        .map_err(|e| match e {
                            $crate::protocol::FlatrpcError::Decoding(msg) => {
                                $crate::protocol::FlatrpcError::Decoding(format!(
                                    "{}.{}: {}",
                                    stringify!($name),
                                    stringify!($field),
                                    msg
                                ))
                            }
                            other => other,
                        })?;
                )*
                Ok(value)
            }
        }
    };
}
