//! Text cleaning applied before splitting.
//!
//! Cleaning repairs text that was decoded with the wrong codec, resolves
//! HTML entities (twice, so `&amp;lt;` becomes `<`), collapses every run of
//! whitespace to one space, trims the ends, and lowercases.

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Windows-1252 characters occupying bytes 0x80-0x9F.
const CP1252_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// The single byte a character was decoded from under Latin-1/Windows-1252.
fn legacy_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        cp @ 0..=0xFF => Some(cp as u8),
        _ => CP1252_HIGH
            .iter()
            .find(|&&(c, _)| c == ch)
            .map(|&(_, b)| b),
    }
}

/// Undo UTF-8 text that was decoded as Latin-1 or Windows-1252.
///
/// Each maximal run of characters with a legacy byte is re-encoded to those
/// bytes and decoded as UTF-8. Valid sequences replace the characters they
/// came from; bytes that do not form valid UTF-8 keep their original
/// characters. Characters without a legacy byte are never touched.
pub fn fix_mojibake(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut run: Vec<(char, u8)> = Vec::new();
    for ch in text.chars() {
        match legacy_byte(ch) {
            Some(byte) => run.push((ch, byte)),
            None => {
                repair_run(&run, &mut out);
                run.clear();
                out.push(ch);
            }
        }
    }
    repair_run(&run, &mut out);

    if out == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(out)
    }
}

/// Append a run of legacy characters, re-decoded wherever their bytes are
/// valid UTF-8.
fn repair_run(run: &[(char, u8)], out: &mut String) {
    let bytes: Vec<u8> = run.iter().map(|&(_, byte)| byte).collect();
    let mut pos = 0;
    while pos < bytes.len() {
        match std::str::from_utf8(&bytes[pos..]) {
            Ok(valid) => {
                out.push_str(valid);
                return;
            }
            Err(e) => {
                let valid_end = pos + e.valid_up_to();
                if let Ok(valid) = std::str::from_utf8(&bytes[pos..valid_end]) {
                    out.push_str(valid);
                }
                // a truncated sequence at the end of the run is invalid too
                let bad_end = valid_end + e.error_len().unwrap_or(bytes.len() - valid_end);
                out.extend(run[valid_end..bad_end].iter().map(|&(ch, _)| ch));
                pos = bad_end;
            }
        }
    }
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Text cleaner for CLIP pre-tokenization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Clean text for splitting.
    pub fn clean(&self, text: &str) -> String {
        let repaired: String = fix_mojibake(text).nfc().collect();
        let once = html_escape::decode_html_entities(&repaired);
        let twice = html_escape::decode_html_entities(&once);
        collapse_whitespace(&twice).to_lowercase()
    }
}
