//! Serde support for [`FlakeId`].
//!
//! By default a [`FlakeId`] serializes as its 20 raw bytes. For
//! human-readable formats use one of the `#[serde(with = "...")]` helpers:
//!
//! - [`as_hex`]: 40 lowercase hex digits
//! - [`as_base32`]: 32 Crockford base32 characters (`base32` feature)
//!
//! ```
//! use flakeid::{FlakeId, NodeId};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "flakeid::serde::as_hex")]
//!     id: FlakeId,
//! }
//! ```

use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
};

use crate::{FLAKE_ID_LEN, FlakeId};

impl Serialize for FlakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_bytes(self.as_bytes())
    }
}

impl<'de> Deserialize<'de> for FlakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_bytes(BytesVisitor)
    }
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = FlakeId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("20 bytes")
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        FlakeId::try_from(v).map_err(|_| E::invalid_length(v.len(), &self))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = [0_u8; FLAKE_ID_LEN];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(FLAKE_ID_LEN + 1, &self));
        }
        Ok(FlakeId::from_bytes(bytes))
    }
}

pub mod as_hex {
    use super::{Deserializer, Serializer, de, fmt};
    use crate::{FLAKE_ID_LEN, FlakeId};

    /// Serialize a flake ID as 40 lowercase hex digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &FlakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize a flake ID from 40 hex digits (either case).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not 40 hex digits.
    pub fn deserialize<'de, D>(d: D) -> Result<FlakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl de::Visitor<'_> for HexVisitor {
            type Value = FlakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 40 digit hex string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.len() != FLAKE_ID_LEN * 2 {
                    return Err(E::invalid_length(v.len(), &self));
                }
                if !v.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(E::invalid_value(de::Unexpected::Str(v), &self));
                }
                let mut bytes = [0_u8; FLAKE_ID_LEN];
                for (i, slot) in bytes.iter_mut().enumerate() {
                    let pair = &v[i * 2..i * 2 + 2];
                    *slot = u8::from_str_radix(pair, 16)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))?;
                }
                Ok(FlakeId::from_bytes(bytes))
            }
        }

        d.deserialize_str(HexVisitor)
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "base32")))]
#[cfg(feature = "base32")]
pub mod as_base32 {
    use super::{Deserializer, Serializer, de, fmt};
    use crate::FlakeId;

    /// Serialize a flake ID as a Crockford base32 encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &FlakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    /// Deserialize a flake ID from a Crockford base32 encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not valid Crockford base32 (invalid length or ascii)
    pub fn deserialize<'de, D>(d: D) -> Result<FlakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base32Visitor;

        impl de::Visitor<'_> for Base32Visitor {
            type Value = FlakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a Crockford base32 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                FlakeId::decode(v).map_err(E::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{FlakeId, NodeId};
    use serde::{Deserialize, Serialize};

    fn reference_id() -> FlakeId {
        FlakeId::from_components(
            0x0102_0304_0506_0708,
            0x090A_0B0C,
            NodeId::from_u64(0x0D0E_0F10_1112),
            0x1314,
        )
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Raw {
        id: FlakeId,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Hex {
        #[serde(with = "crate::serde::as_hex")]
        id: FlakeId,
    }

    #[test]
    fn raw_bytes_through_json_array() {
        let json = serde_json::to_string(&Raw { id: reference_id() }).unwrap();
        assert_eq!(
            json,
            r#"{"id":[1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20]}"#
        );
        let back: Raw = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, reference_id());
    }

    #[test]
    fn raw_rejects_short_array() {
        let err = serde_json::from_str::<Raw>(r#"{"id":[1,2,3]}"#).unwrap_err();
        assert!(err.to_string().contains("20 bytes"), "{err}");
    }

    #[test]
    fn hex_string() {
        let json = serde_json::to_string(&Hex { id: reference_id() }).unwrap();
        assert_eq!(json, r#"{"id":"0102030405060708090a0b0c0d0e0f1011121314"}"#);
        let back: Hex = serde_json::from_str(&json.to_uppercase().replace("ID", "id")).unwrap();
        assert_eq!(back.id, reference_id());
    }

    #[test]
    fn hex_rejects_non_hex() {
        let bad = r#"{"id":"zz02030405060708090a0b0c0d0e0f1011121314"}"#;
        assert!(serde_json::from_str::<Hex>(bad).is_err());
        assert!(serde_json::from_str::<Hex>(r#"{"id":"0102"}"#).is_err());
    }

    #[cfg(feature = "base32")]
    #[test]
    fn base32_string() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Text {
            #[serde(with = "crate::serde::as_base32")]
            id: FlakeId,
        }

        let json = serde_json::to_string(&Text { id: reference_id() }).unwrap();
        assert_eq!(json, format!(r#"{{"id":"{}"}}"#, reference_id().encode()));
        let back: Text = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, reference_id());
    }
}
