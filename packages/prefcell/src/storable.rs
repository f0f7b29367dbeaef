//! The coercion table: how each logical type maps onto a store slot.
//!
//! Every type a [`PrefCell`](crate::PrefCell) can hold implements
//! [`Storable`]. Dispatch is static: the cell's type parameter picks the
//! encode and decode rules at compile time.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use prefcell_core_store::{Error, Store, Value};

/// A logical value type that can be persisted in a preference store.
pub trait Storable: Sized {
    /// Encode this value for the store.
    ///
    /// `Ok(None)` means the key should be cleared rather than written.
    /// The store is passed for types that need its object archival.
    fn encode(&self, store: &dyn Store) -> Result<Option<Value>, Error>;

    /// Decode a stored value.
    ///
    /// `stored` is `None` when the key is absent. Returns `None` on a decode
    /// miss (absent key, wrong slot, unrecognized contents), in which case
    /// the cell falls back to its default.
    fn decode(stored: Option<&Value>, store: &dyn Store) -> Option<Self>;

    /// Check that a construction-time default can be stored.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }
}

// Native slots

impl Storable for bool {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Bool(*self)))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored?.as_bool()
    }
}

impl Storable for i64 {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Integer(*self)))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored?.as_integer()
    }
}

impl Storable for i32 {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Integer(i64::from(*self))))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        i32::try_from(stored?.as_integer()?).ok()
    }
}

impl Storable for u32 {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Integer(i64::from(*self))))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        u32::try_from(stored?.as_integer()?).ok()
    }
}

impl Storable for f64 {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Float(*self)))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored?.as_float()
    }
}

impl Storable for String {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::String(self.clone())))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored?.as_str().map(str::to_string)
    }
}

/// Byte sequences. `Vec<u8>` is not storable on purpose: it would be read as
/// an array of integers.
impl Storable for Bytes {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Bytes(self.to_vec())))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored?.as_bytes().map(Bytes::copy_from_slice)
    }
}

impl Storable for DateTime<Utc> {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Date(*self)))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored?.as_date()
    }
}

/// Untyped values pass through unchanged. Any stored slot decodes.
impl Storable for Value {
    fn encode(&self, _store: &dyn Store) -> Result<Option<Value>, Error> {
        if self.is_null() {
            return Ok(None);
        }
        Ok(Some(self.clone()))
    }

    fn decode(stored: Option<&Value>, _store: &dyn Store) -> Option<Self> {
        stored.cloned()
    }

    fn validate(&self) -> Result<(), Error> {
        self.validate_storable()
    }
}

// Optionals and containers

/// `None` clears the key. Reading follows the wrapped type: anything it
/// cannot decode, including an absent key, falls back to the cell's default,
/// which for cells built with `PrefCell::optional` is `None`. Inside
/// containers, `None` is written as `Value::Null`.
impl<T: Storable> Storable for Option<T> {
    fn encode(&self, store: &dyn Store) -> Result<Option<Value>, Error> {
        match self {
            Some(value) => value.encode(store),
            None => Ok(None),
        }
    }

    fn decode(stored: Option<&Value>, store: &dyn Store) -> Option<Self> {
        match stored? {
            Value::Null => Some(None),
            value => T::decode(Some(value), store).map(Some),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

// Containers do not validate their elements: a nested `Null` is a legal
// placeholder.
fn encode_element<T: Storable>(element: &T, store: &dyn Store) -> Result<Value, Error> {
    Ok(element.encode(store)?.unwrap_or(Value::Null))
}

impl<T: Storable> Storable for Vec<T> {
    fn encode(&self, store: &dyn Store) -> Result<Option<Value>, Error> {
        let items = self
            .iter()
            .map(|item| encode_element(item, store))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Value::Array(items)))
    }

    fn decode(stored: Option<&Value>, store: &dyn Store) -> Option<Self> {
        stored?
            .as_array()?
            .iter()
            .map(|item| T::decode(Some(item), store))
            .collect()
    }
}

impl<T: Storable> Storable for BTreeMap<String, T> {
    fn encode(&self, store: &dyn Store) -> Result<Option<Value>, Error> {
        let map = self
            .iter()
            .map(|(k, v)| Ok::<_, Error>((k.clone(), encode_element(v, store)?)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Some(Value::Map(map)))
    }

    fn decode(stored: Option<&Value>, store: &dyn Store) -> Option<Self> {
        stored?
            .as_map()?
            .iter()
            .map(|(k, v)| Some((k.clone(), T::decode(Some(v), store)?)))
            .collect()
    }
}

impl<T: Storable> Storable for HashMap<String, T> {
    fn encode(&self, store: &dyn Store) -> Result<Option<Value>, Error> {
        let map = self
            .iter()
            .map(|(k, v)| Ok::<_, Error>((k.clone(), encode_element(v, store)?)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Some(Value::Map(map)))
    }

    fn decode(stored: Option<&Value>, store: &dyn Store) -> Option<Self> {
        stored?
            .as_map()?
            .iter()
            .map(|(k, v)| Some((k.clone(), T::decode(Some(v), store)?)))
            .collect()
    }
}
