//! Raw-value types, usually enums.
//!
//! A raw-representable type is stored as its raw value (an integer or a
//! string) and rebuilt from it on read. A raw value that names no case is a
//! decode miss.
//!
//! ```rust
//! use prefcell::{raw_enum, InMemoryStore, PrefCell, Store, Value};
//! use std::sync::Arc;
//!
//! raw_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Theme: String {
//!         Light = "light",
//!         Dark = "dark",
//!     }
//! }
//!
//! let store = Arc::new(InMemoryStore::new());
//! let mut theme = PrefCell::with_store(Theme::Light, "theme", store.clone()).unwrap();
//! theme.set(Theme::Dark);
//! assert_eq!(store.get("theme"), Some(Value::from("dark")));
//! ```

use prefcell_core_store::{Error, Store, Value};

use crate::Storable;

mod private {
    pub trait Sealed {}
    impl Sealed for i64 {}
    impl Sealed for String {}
}

/// A type that can back a raw-representable type: `i64` or `String`.
pub trait RawValue: Storable + private::Sealed {}

impl RawValue for i64 {}
impl RawValue for String {}

/// A type with a lossless mapping to a raw value.
pub trait RawRepresentable: Sized {
    type Raw: RawValue;

    fn raw_value(&self) -> Self::Raw;

    /// The case named by `raw`, if any.
    fn from_raw_value(raw: Self::Raw) -> Option<Self>;
}

/// Store the raw value.
pub fn encode_raw<T: RawRepresentable>(value: &T, store: &dyn Store) -> Result<Option<Value>, Error> {
    value.raw_value().encode(store)
}

/// Read the raw value and rebuild the case from it.
pub fn decode_raw<T: RawRepresentable>(stored: Option<&Value>, store: &dyn Store) -> Option<T> {
    let raw = <T::Raw as Storable>::decode(stored, store)?;
    let value = T::from_raw_value(raw);
    if value.is_none() {
        log::trace!(
            "Stored raw value names no case of {}",
            std::any::type_name::<T>()
        );
    }
    value
}

/// Implement [`Storable`] for types that implement [`RawRepresentable`].
#[macro_export]
macro_rules! impl_raw_storable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Storable for $ty {
                fn encode(
                    &self,
                    store: &dyn $crate::Store,
                ) -> ::std::result::Result<::std::option::Option<$crate::Value>, $crate::Error> {
                    $crate::raw::encode_raw(self, store)
                }

                fn decode(
                    stored: ::std::option::Option<&$crate::Value>,
                    store: &dyn $crate::Store,
                ) -> ::std::option::Option<Self> {
                    $crate::raw::decode_raw(stored, store)
                }
            }
        )+
    };
}

/// Declare an enum with explicit integer or string raw values.
///
/// The enum gets [`RawRepresentable`] and [`Storable`] implementations.
#[macro_export]
macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : i64 {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::RawRepresentable for $name {
            type Raw = i64;

            fn raw_value(&self) -> i64 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            fn from_raw_value(raw: i64) -> ::std::option::Option<Self> {
                match raw {
                    $($value => ::std::option::Option::Some($name::$variant),)+
                    _ => ::std::option::Option::None,
                }
            }
        }

        $crate::impl_raw_storable!($name);
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : String {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::RawRepresentable for $name {
            type Raw = ::std::string::String;

            fn raw_value(&self) -> ::std::string::String {
                match self {
                    $($name::$variant => ::std::string::String::from($value)),+
                }
            }

            fn from_raw_value(raw: ::std::string::String) -> ::std::option::Option<Self> {
                match raw.as_str() {
                    $($value => ::std::option::Option::Some($name::$variant),)+
                    _ => ::std::option::Option::None,
                }
            }
        }

        $crate::impl_raw_storable!($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefcell_core_store::InMemoryStore;

    crate::raw_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum IntEnum: i64 {
            Alpha = -12,
            Beta = 42,
        }
    }

    crate::raw_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum StringEnum: String {
            Alpha = "alpha",
            Beta = "beta",
        }
    }

    /// Hand-written implementation, as a caller without the macro would.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Port(u16);

    impl RawRepresentable for Port {
        type Raw = i64;

        fn raw_value(&self) -> i64 {
            i64::from(self.0)
        }

        fn from_raw_value(raw: i64) -> Option<Self> {
            u16::try_from(raw).ok().map(Port)
        }
    }

    crate::impl_raw_storable!(Port);

    #[test]
    fn int_enum_stores_raw_value() {
        let store = InMemoryStore::new();
        assert_eq!(
            IntEnum::Alpha.encode(&store).unwrap(),
            Some(Value::Integer(-12))
        );
        assert_eq!(
            IntEnum::decode(Some(&Value::Integer(42)), &store),
            Some(IntEnum::Beta)
        );
    }

    #[test]
    fn string_enum_stores_raw_value() {
        let store = InMemoryStore::new();
        assert_eq!(
            StringEnum::Beta.encode(&store).unwrap(),
            Some(Value::from("beta"))
        );
        assert_eq!(
            StringEnum::decode(Some(&Value::from("alpha")), &store),
            Some(StringEnum::Alpha)
        );
    }

    #[test]
    fn unknown_raw_value_is_a_miss() {
        let store = InMemoryStore::new();
        assert_eq!(IntEnum::decode(Some(&Value::Integer(0)), &store), None);
        assert_eq!(StringEnum::decode(Some(&Value::from("gamma")), &store), None);
    }

    #[test]
    fn wrong_raw_slot_is_a_miss() {
        let store = InMemoryStore::new();
        assert_eq!(IntEnum::decode(Some(&Value::from("-12")), &store), None);
        assert_eq!(StringEnum::decode(Some(&Value::Integer(1)), &store), None);
    }

    #[test]
    fn hand_written_raw_type() {
        let store = InMemoryStore::new();
        assert_eq!(Port(8080).encode(&store).unwrap(), Some(Value::Integer(8080)));
        assert_eq!(Port::decode(Some(&Value::Integer(70000)), &store), None);
        assert_eq!(Port::decode(Some(&Value::Integer(443)), &store), Some(Port(443)));
    }
}
