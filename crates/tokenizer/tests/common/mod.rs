//! Synthetic full-size merge resource.
//!
//! The first rules build a handful of real words; the rest are filler
//! rules whose symbols never occur in encoded text and whose products are
//! all distinct.

use cliptok::{Tokenizer, DEFAULT_MERGE_COUNT};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

pub const WORD_MERGES: [&str; 14] = [
    "h e",
    "l l",
    "he ll",
    "hell o</w>",
    "w o",
    "r l",
    "wo rl",
    "worl d</w>",
    "c a",
    "ca t</w>",
    "Ġ Ġ",
    "d o",
    "do n</w>",
    "' t</w>",
];

pub fn resource_text() -> String {
    let mut text = String::from("#version: 0.2\n");
    for rule in WORD_MERGES {
        text.push_str(rule);
        text.push('\n');
    }
    for i in 0..DEFAULT_MERGE_COUNT - WORD_MERGES.len() {
        text.push_str(&format!("zq{} zz</w>\n", i));
    }
    text.push_str("trailing rule\n");
    text
}

pub fn resource_gzip() -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(resource_text().as_bytes()).unwrap();
    encoder.finish().unwrap()
}

pub fn tokenizer() -> Tokenizer {
    let lines: Vec<String> = resource_text().lines().map(String::from).collect();
    Tokenizer::new(&lines).unwrap()
}
