use core::str::FromStr;

use super::{decode_base32, encode_base32};
use crate::{Base32Error, FLAKE_ID_LEN, FlakeId};

/// Length of a Crockford base32 encoded [`FlakeId`]: 160 bits in 5-bit
/// characters, no padding.
pub const BASE32_LEN: usize = FLAKE_ID_LEN * 8 / 5;

impl FlakeId {
    /// Encodes this ID as a 32-character Crockford base32 string.
    ///
    /// The encoding is fixed-width and preserves the byte ordering, so encoded
    /// IDs sort in the same order as the IDs themselves.
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{FlakeId, NodeId};
    ///
    /// let id = FlakeId::from_components(1, 1, NodeId::from_u64(1), 1);
    /// let encoded = id.encode();
    /// assert_eq!(encoded.len(), 32);
    /// assert_eq!(FlakeId::decode(&encoded).unwrap(), id);
    /// ```
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; BASE32_LEN];
        self.encode_to_buf(&mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }

    /// Encodes this ID into the provided buffer without heap allocation.
    ///
    /// Every written byte is ASCII.
    pub fn encode_to_buf(&self, buf: &mut [u8; BASE32_LEN]) {
        encode_base32(self.as_bytes(), buf);
    }

    /// Decodes a Crockford base32 string back into an ID.
    ///
    /// Decoding is case-insensitive and accepts the Crockford aliases `O` for
    /// `0` and `I`/`L` for `1`.
    ///
    /// # Errors
    ///
    /// - [`Base32Error::InvalidLength`] if the input is not 32 characters
    /// - [`Base32Error::InvalidAscii`] if it contains a character outside the
    ///   Crockford alphabet
    pub fn decode(s: &str) -> Result<Self, Base32Error> {
        if s.len() != BASE32_LEN {
            return Err(Base32Error::InvalidLength { len: s.len() });
        }
        let mut bytes = [0_u8; FLAKE_ID_LEN];
        decode_base32(s.as_bytes(), &mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl FromStr for FlakeId {
    type Err = Base32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;

    fn reference_id() -> FlakeId {
        FlakeId::from_components(
            0x0102_0304_0506_0708,
            0x090A_0B0C,
            NodeId::from_u64(0x0D0E_0F10_1112),
            0x1314,
        )
    }

    #[test]
    fn encodes_extremes() {
        assert_eq!(FlakeId::default().encode(), "0".repeat(BASE32_LEN));
        assert_eq!(
            FlakeId::from_bytes([0xFF; FLAKE_ID_LEN]).encode(),
            "Z".repeat(BASE32_LEN)
        );
    }

    #[test]
    fn decode_recovers_fields() {
        let encoded = reference_id().encode();
        let decoded: FlakeId = encoded.parse().unwrap();
        assert_eq!(decoded, reference_id());
        assert_eq!(decoded.counter(), 0x090A_0B0C);

        let lower = encoded.to_ascii_lowercase();
        assert_eq!(FlakeId::decode(&lower).unwrap(), reference_id());
    }

    #[test]
    fn decode_reads_look_alike_letters_as_digits() {
        let canonical = reference_id().encode();
        assert_eq!(canonical, "041061050R3GG28A1C60T3GF208H44RM");

        let aliased = "o4I06L05OR3GG28AlC6OT3GF2O8H44RM";
        assert_eq!(FlakeId::decode(aliased).unwrap(), reference_id());

        assert_eq!(
            FlakeId::decode(&"O".repeat(BASE32_LEN)).unwrap(),
            FlakeId::default()
        );
        assert_eq!(
            FlakeId::decode(&"i".repeat(BASE32_LEN)).unwrap(),
            FlakeId::decode(&"1".repeat(BASE32_LEN)).unwrap()
        );
    }

    #[test]
    fn encoding_preserves_order() {
        let node = NodeId::from_u64(0xFFFF_FFFF_FFFF);
        let ids = [
            FlakeId::from_components(1, 1, node, 0xFFFF),
            FlakeId::from_components(1, 2, NodeId::default(), 0),
            FlakeId::from_components(2, 1, NodeId::default(), 0),
            FlakeId::from_components(u64::MAX, 0, NodeId::default(), 0),
        ];
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].encode() < pair[1].encode());
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            FlakeId::decode("0123").unwrap_err(),
            Base32Error::InvalidLength { len: 4 }
        );
        let long = "0".repeat(BASE32_LEN + 1);
        assert_eq!(
            FlakeId::decode(&long).unwrap_err(),
            Base32Error::InvalidLength { len: BASE32_LEN + 1 }
        );
    }

    #[test]
    fn decode_rejects_invalid_character() {
        let mut s = reference_id().encode();
        s.replace_range(31..32, "*");
        assert_eq!(
            FlakeId::decode(&s).unwrap_err(),
            Base32Error::InvalidAscii {
                byte: b'*',
                index: 31,
            }
        );
    }

    #[test]
    fn encode_to_buf_matches_encode() {
        let mut buf = [0_u8; BASE32_LEN];
        reference_id().encode_to_buf(&mut buf);
        assert_eq!(core::str::from_utf8(&buf).unwrap(), reference_id().encode());
    }
}
