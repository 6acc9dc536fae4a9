//! Monetary and time primitives.
//!
//! Every monetary quantity is a non-negative integer count of the smallest
//! currency unit. Division always truncates toward zero.

/// Amount in the smallest currency unit (e.g. wei).
pub type Amount = u128;

/// Absolute time in unix seconds.
pub type Timestamp = u64;

/// Basis points per whole (100%).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Serde adapter writing an [`Amount`] as a decimal string.
///
/// Amounts routinely exceed 2^53 (and 2^64), which JSON consumers cannot
/// represent as numbers. Deserialization also accepts a bare integer.
pub mod decimal {
    use std::fmt;

    use serde::{de, Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl<'de> de::Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or an unsigned integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Amount::from(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse::<Amount>().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
