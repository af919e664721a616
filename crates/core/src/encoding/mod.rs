//! Byte-level BPE encoding.
//!
//! - [`byte_level`]: the byte/unicode bijection applied before merging
//! - [`bpe`]: the rank-greedy merge loop over a single pre-token

pub mod bpe;
pub mod byte_level;

pub use bpe::{bpe, merge_symbols};
pub use byte_level::ByteMapper;
