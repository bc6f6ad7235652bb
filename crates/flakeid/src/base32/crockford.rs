use crate::Base32Error;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;
const MASK: u16 = 0x1F;

/// Letters read as the digit they resemble.
const ALIASES: [(u8, u8); 3] = [(b'O', 0), (b'I', 1), (b'L', 1)];

/// Decoded value per ASCII byte, [`NO_VALUE`] outside the alphabet. Letters
/// decode in either case.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut value = 0;
    while value < ALPHABET.len() {
        let c = ALPHABET[value];
        lut[c as usize] = value as u8;
        lut[c.to_ascii_lowercase() as usize] = value as u8;
        value += 1;
    }
    let mut i = 0;
    while i < ALIASES.len() {
        let (c, digit) = ALIASES[i];
        lut[c as usize] = digit;
        lut[c.to_ascii_lowercase() as usize] = digit;
        i += 1;
    }
    lut
};

/// Encodes `input` into `out`, most significant bits first.
///
/// `out.len() * 5` must be at least `input.len() * 8`; any surplus bits are
/// leading zero padding.
pub(crate) fn encode_base32(input: &[u8], out: &mut [u8]) {
    debug_assert!(out.len() * BITS_PER_CHAR >= input.len() * 8);
    let mut bits = out.len() * BITS_PER_CHAR - input.len() * 8;
    let mut acc = 0_u16;

    let mut pos = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out[pos] = ALPHABET[usize::from((acc >> bits) & MASK)];
            pos += 1;
        }
    }
}

/// Decodes `encoded` into `out`, the inverse of [`encode_base32`] for inputs
/// whose bit length is a multiple of both 5 and 8.
///
/// The caller checks that `encoded` has exactly `out.len() * 8 / 5`
/// characters.
pub(crate) fn decode_base32(encoded: &[u8], out: &mut [u8]) -> Result<(), Base32Error> {
    let mut acc = 0_u16;
    let mut bits = 0;

    let mut pos = 0;
    for (index, &byte) in encoded.iter().enumerate() {
        let val = LOOKUP[usize::from(byte)];
        if val == NO_VALUE {
            return Err(Base32Error::InvalidAscii { byte, index });
        }
        acc = (acc << BITS_PER_CHAR) | u16::from(val);
        bits += BITS_PER_CHAR;
        if bits >= 8 {
            bits -= 8;
            #[allow(clippy::cast_possible_truncation)]
            let decoded = (acc >> bits) as u8;
            out[pos] = decoded;
            pos += 1;
        }
    }
    Ok(())
}
