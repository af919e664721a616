//! Pre-tokenization pipeline.
//!
//! Text is cleaned by the [`Normalizer`] and then cut into pre-tokens by the
//! [`Splitter`] before byte mapping and BPE merging.

pub mod normalize;
pub mod split;

pub use normalize::Normalizer;
pub use split::{Splitter, CLIP_PATTERN};
