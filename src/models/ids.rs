//! Strongly-typed ID wrappers for all record types
//!
//! Ids are opaque text tokens. Records created here get a prefixed UUID, but
//! records imported from older backups may carry timestamps or plain numbers
//! (sometimes serialized as JSON numbers), so deserialization accepts either
//! and matching is always done on the text form.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Accepts a JSON string or number and yields its text form
struct IdVisitor<T>(PhantomData<T>);

impl<'de, T: From<String>> Visitor<'de> for IdVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an id as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        Ok(T::from(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<T, E> {
        Ok(T::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        Ok(T::from(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        Ok(T::from(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<T, E> {
        Ok(T::from(v.to_string()))
    }
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.trim().to_string())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from(s.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IdVisitor::<$name>(PhantomData))
            }
        }
    };
}

define_id!(IncomeId, "inc-");
define_id!(ExpenseId, "exp-");
define_id!(VendorId, "ven-");
define_id!(LabourId, "lab-");
define_id!(AttendanceId, "att-");
define_id!(PaymentId, "pay-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_prefixed_and_unique() {
        let a = LabourId::new();
        let b = LabourId::new();
        assert!(a.as_str().starts_with("lab-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_numeric_and_string_ids_match() {
        let from_number: LabourId = serde_json::from_str("1712345678901").unwrap();
        let from_string: LabourId = serde_json::from_str("\"1712345678901\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = IncomeId::from("inc_1712_ab12c");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"inc_1712_ab12c\"");
    }

    #[test]
    fn test_from_str_trims_whitespace() {
        assert_eq!(PaymentId::from("  42 "), PaymentId::from("42"));
    }
}
