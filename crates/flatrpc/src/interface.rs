//! Declaring remote interfaces.

/// Declares a remote interface.
///
/// From one declaration this generates:
///
/// - the trait itself, every method taking `&mut self` and returning
///   `flatrpc::Result<T>` (a method without `-> T` returns `()`),
/// - a stub type implementing the trait by invoking the remote object, with
///   `connect` for TCP and `with_transport` for any other transport,
/// - a dispatch type implementing [`Interface`](crate::Interface) for every
///   implementation of the trait, to be handed to
///   [`Skeleton::for_interface`](crate::Skeleton::for_interface).
///
/// Parameter names become the first path segment of each argument on the
/// wire, and method names are the operation names. Operation names that are
/// Rust keywords cannot be declared here; build their [`Operation`](crate::Operation)
/// by hand and call them through [`Stub::invoke`](crate::Stub::invoke).
///
/// ```ignore
/// remote_interface! {
///     pub trait Mover {
///         stub = MoverStub;
///         dispatch = MoverDispatch;
///
///         fn move_by(dx: i32, dy: i32);
///         fn position() -> Point;
///     }
/// }
/// ```
#[macro_export]
macro_rules! remote_interface {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            stub = $stub:ident;
            dispatch = $dispatch:ident;

            $(
                $(#[$mmeta:meta])*
                fn $method:ident ( $($arg:ident : $argty:ty),* $(,)? ) $(-> $ret:ty)? ;
            )*
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                $(#[$mmeta])*
                fn $method(&mut self, $($arg: $argty),*) -> $crate::Result<$crate::__return_type!($($ret)?)>;
            )*
        }

        #[doc = concat!("Client stub for [`", stringify!($name), "`].")]
        $vis struct $stub<X: $crate::Transport = $crate::TcpTransport> {
            inner: $crate::Stub<X>,
        }

        #[allow(dead_code)]
        impl $stub<$crate::TcpTransport> {
            pub fn connect(reference: $crate::RemoteReference) -> $crate::Result<Self> {
                Ok(Self { inner: $crate::Stub::connect(reference)? })
            }
        }

        #[allow(dead_code)]
        impl<X: $crate::Transport> $stub<X> {
            pub fn with_transport(reference: $crate::RemoteReference, transport: X) -> Self {
                Self { inner: $crate::Stub::with_transport(reference, transport) }
            }

            pub fn stub(&self) -> &$crate::Stub<X> {
                &self.inner
            }

            $(
                $(#[$mmeta])*
                pub fn $method(&self, $($arg: $argty),*) -> $crate::Result<$crate::__return_type!($($ret)?)> {
                    const SIGNATURE: $crate::Signature = $crate::Signature::new(
                        stringify!($method),
                        &[$(stringify!($arg)),*],
                        $crate::__return_name!($($ret)?),
                    );
                    self.inner.invoke(&SIGNATURE, &[$(&$arg as &dyn $crate::Encode),*])
                }
            )*
        }

        impl<X: $crate::Transport> ::std::convert::From<$crate::Stub<X>> for $stub<X> {
            fn from(inner: $crate::Stub<X>) -> Self {
                Self { inner }
            }
        }

        impl<X: $crate::Transport> $name for $stub<X> {
            $(
                fn $method(&mut self, $($arg: $argty),*) -> $crate::Result<$crate::__return_type!($($ret)?)> {
                    Self::$method(self, $($arg),*)
                }
            )*
        }

        #[doc = concat!("Dispatch table for serving [`", stringify!($name), "`] implementations.")]
        $vis struct $dispatch;

        impl<T: $name> $crate::Interface<T> for $dispatch {
            const NAME: &'static str = stringify!($name);

            fn operations() -> ::std::vec::Vec<$crate::Operation<T>> {
                ::std::vec![
                    $(
                        $crate::Operation::<T>::new(
                            $crate::Signature::new(
                                stringify!($method),
                                &[$(stringify!($arg)),*],
                                $crate::__return_name!($($ret)?),
                            ),
                            |target: &mut T, params: &$crate::Parameters| -> $crate::Result<$crate::Parameters> {
                                let _ = params;
                                $(
                                    let $arg: $argty = $crate::codec::decode_within(stringify!($arg), params)?;
                                )*
                                let value = <T as $name>::$method(target, $($arg),*)?;
                                $crate::codec::encode($crate::protocol::RESULT_KEY, &value)
                            },
                        ),
                    )*
                ]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __return_type {
    () => { () };
    ($ret:ty) => { $ret };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __return_name {
    () => { "()" };
    ($ret:ty) => { stringify!($ret) };
}

#[cfg(test)]
mod tests {
    use crate::codec;
    use crate::protocol::RESULT_KEY;
    use crate::{Interface, Parameters};

    crate::remote_interface! {
        trait Calculator {
            stub = CalculatorStub;
            dispatch = CalculatorDispatch;

            fn add(a: i64, b: i64) -> i64;
            fn clear();
            fn name() -> String;
        }
    }

    #[derive(Default)]
    struct Accumulator {
        cleared: bool,
    }

    impl Calculator for Accumulator {
        fn add(&mut self, a: i64, b: i64) -> crate::Result<i64> {
            Ok(a + b)
        }

        fn clear(&mut self) -> crate::Result<()> {
            self.cleared = true;
            Ok(())
        }

        fn name(&mut self) -> crate::Result<String> {
            Ok("acc".to_string())
        }
    }

    #[test]
    fn test_generated_signatures() {
        let operations = <CalculatorDispatch as Interface<Accumulator>>::operations();
        let signatures: Vec<_> = operations.iter().map(|op| op.signature.to_string()).collect();
        assert_eq!(
            signatures,
            vec!["add(a, b) -> i64", "clear() -> ()", "name() -> String"]
        );
        assert_eq!(<CalculatorDispatch as Interface<Accumulator>>::NAME, "Calculator");
    }

    #[test]
    fn test_generated_handlers_decode_by_parameter_name() {
        let table = <CalculatorDispatch as Interface<Accumulator>>::method_table().unwrap();
        let mut acc = Accumulator::default();

        let mut params = codec::encode("a", &40i64).unwrap();
        params.extend(codec::encode("b", &2i64).unwrap());
        let result = (table.get("add").unwrap().handler)(&mut acc, &params).unwrap();
        assert_eq!(result.get(RESULT_KEY).map(String::as_str), Some("42"));

        let result = (table.get("clear").unwrap().handler)(&mut acc, &Parameters::new()).unwrap();
        assert_eq!(result.get(RESULT_KEY).map(String::as_str), Some("Ok"));
        assert!(acc.cleared);
    }

    #[test]
    fn test_generated_handler_rejects_missing_argument() {
        let table = <CalculatorDispatch as Interface<Accumulator>>::method_table().unwrap();
        let params = codec::encode("a", &1i64).unwrap();

        let err = (table.get("add").unwrap().handler)(&mut Accumulator::default(), &params).unwrap_err();
        assert!(matches!(err, crate::FlatrpcError::Decoding(_)));
    }
}
