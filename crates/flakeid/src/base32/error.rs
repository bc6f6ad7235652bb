/// Errors from decoding a Crockford base32 flake ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Base32Error {
    /// The input was not exactly 32 characters.
    #[error("invalid base32 length: expected 32 characters, got {len}")]
    InvalidLength { len: usize },

    /// The input contained a byte outside the Crockford alphabet.
    #[error("invalid base32 character {byte:#04x} at index {index}")]
    InvalidAscii { byte: u8, index: usize },
}
