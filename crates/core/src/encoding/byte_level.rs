//! Byte to unicode mapping for byte-level BPE.
//!
//! BPE merge tables are written in terms of printable characters, so every
//! raw byte is given a printable stand-in before merging:
//!
//! - Bytes 33-126 (`!` to `~`) map to themselves
//! - Bytes 161-172 (`¡` to `¬`) map to themselves
//! - Bytes 174-255 (`®` to `ÿ`) map to themselves
//! - The remaining 68 bytes (0-32, 127-160, 173) map to U+0100 onwards,
//!   in increasing byte order
//!
//! The mapping is a bijection, so decoding a mapped string recovers the
//! exact bytes that produced it.

use ahash::AHashMap;

/// First code point handed out to bytes outside the printable ranges.
const REMAP_START: u32 = 256;

#[inline]
fn is_printable(b: u8) -> bool {
    matches!(b, 33..=126 | 161..=172 | 174..=255)
}

/// Bijection between the 256 byte values and 256 printable characters.
#[derive(Debug, Clone)]
pub struct ByteMapper {
    /// Byte to character (indexed by byte value)
    encoder: [char; 256],
    /// Character to byte
    decoder: AHashMap<char, u8>,
    /// Printable-range bytes first, then the remapped ones
    order: [u8; 256],
}

impl ByteMapper {
    /// Build the byte/unicode tables.
    pub fn build() -> Self {
        let mut encoder = ['\0'; 256];
        let mut order = [0u8; 256];

        let mut slot = 0;
        for b in (0u8..=255).filter(|&b| is_printable(b)) {
            encoder[b as usize] = char::from(b);
            order[slot] = b;
            slot += 1;
        }

        let mut next = REMAP_START;
        for b in (0u8..=255).filter(|&b| !is_printable(b)) {
            // U+0100..U+0143 are all valid scalar values.
            encoder[b as usize] = char::from_u32(next).unwrap_or(char::REPLACEMENT_CHARACTER);
            order[slot] = b;
            slot += 1;
            next += 1;
        }

        let decoder = encoder
            .iter()
            .enumerate()
            .map(|(b, &ch)| (ch, b as u8))
            .collect();

        Self {
            encoder,
            decoder,
            order,
        }
    }

    /// Character standing in for `byte`.
    #[inline]
    pub fn encode_byte(&self, byte: u8) -> char {
        self.encoder[byte as usize]
    }

    /// Map every byte of `bytes` to its character.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.encode_byte(b)).collect()
    }

    /// Byte a character stands for, if it is part of the mapping.
    #[inline]
    pub fn decode_char(&self, ch: char) -> Option<u8> {
        self.decoder.get(&ch).copied()
    }

    /// Bytes in vocabulary order: the printable ranges ascending, then the
    /// remapped bytes ascending.
    pub fn byte_order(&self) -> &[u8; 256] {
        &self.order
    }

    /// Byte symbols in vocabulary order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.order.iter().map(move |&b| self.encode_byte(b))
    }
}

impl Default for ByteMapper {
    fn default() -> Self {
        Self::build()
    }
}
