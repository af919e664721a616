//! Rank-greedy byte-pair merging of a single pre-token.
//!
//! A pre-token starts as one symbol per character, with the end-of-word
//! marker glued to the last one. On each round the adjacent pair with the
//! lowest merge rank is chosen and every non-overlapping occurrence of it
//! is merged, scanning left to right. Merging stops when one symbol is
//! left or no adjacent pair has a rank.

use crate::core::vocab::END_OF_WORD;
use crate::core::MergeRanks;
use compact_str::CompactString;

/// Split a mapped token into its initial symbols.
///
/// `"cat"` becomes `["c", "a", "t</w>"]`.
pub fn initial_symbols(token: &str) -> Vec<CompactString> {
    let mut symbols: Vec<CompactString> = token
        .chars()
        .map(|ch| {
            let mut buf = [0u8; 4];
            CompactString::new(ch.encode_utf8(&mut buf))
        })
        .collect();

    if let Some(last) = symbols.last_mut() {
        last.push_str(END_OF_WORD);
    }

    symbols
}

/// The adjacent pair with the lowest rank, if any pair has one.
fn best_pair<'a>(
    symbols: &'a [CompactString],
    ranks: &MergeRanks,
) -> Option<(&'a CompactString, &'a CompactString)> {
    symbols
        .windows(2)
        .filter_map(|w| ranks.rank(&w[0], &w[1]).map(|rank| (rank, &w[0], &w[1])))
        .min_by_key(|&(rank, _, _)| rank)
        .map(|(_, left, right)| (left, right))
}

/// Merge every non-overlapping occurrence of `(left, right)`, left to right.
fn merge_pair(symbols: &[CompactString], left: &str, right: &str) -> Vec<CompactString> {
    let mut merged = Vec::with_capacity(symbols.len());
    let mut i = 0;

    while i < symbols.len() {
        let Some(offset) = symbols[i..].iter().position(|s| s.as_str() == left) else {
            merged.extend_from_slice(&symbols[i..]);
            break;
        };

        let j = i + offset;
        merged.extend_from_slice(&symbols[i..j]);

        if j + 1 < symbols.len() && symbols[j + 1].as_str() == right {
            let mut joined = CompactString::with_capacity(left.len() + right.len());
            joined.push_str(left);
            joined.push_str(right);
            merged.push(joined);
            i = j + 2;
        } else {
            merged.push(symbols[j].clone());
            i = j + 1;
        }
    }

    merged
}

/// Apply the merge rules to a mapped token, returning its final symbols.
pub fn merge_symbols(token: &str, ranks: &MergeRanks) -> Vec<CompactString> {
    let mut symbols = initial_symbols(token);

    while symbols.len() > 1 {
        let Some((left, right)) = best_pair(&symbols, ranks) else {
            break;
        };
        let (left, right) = (left.clone(), right.clone());
        symbols = merge_pair(&symbols, &left, &right);
    }

    symbols
}

/// Apply the merge rules to a mapped token, returning its symbols joined by
/// single spaces.
pub fn bpe(token: &str, ranks: &MergeRanks) -> String {
    merge_symbols(token, ranks).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(pairs: &[(&str, &str)]) -> MergeRanks {
        MergeRanks::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_initial_symbols() {
        assert_eq!(initial_symbols("cat"), vec!["c", "a", "t</w>"]);
        assert_eq!(initial_symbols("a"), vec!["a</w>"]);
        assert!(initial_symbols("").is_empty());
    }

    #[test]
    fn test_single_symbol_gets_marker() {
        let ranks = ranks(&[("a", "b")]);
        assert_eq!(bpe("x", &ranks), "x</w>");
    }

    #[test]
    fn test_full_merge() {
        let ranks = ranks(&[("c", "a"), ("ca", "t</w>")]);
        assert_eq!(bpe("cat", &ranks), "cat</w>");
    }

    #[test]
    fn test_lowest_rank_wins() {
        // "a b" comes first by position, but "b c</w>" has the lower rank
        let ranks = ranks(&[("b", "c</w>"), ("a", "b")]);
        assert_eq!(bpe("abc", &ranks), "a bc</w>");

        let ranks = MergeRanks::from_pairs([("a", "b"), ("b", "c</w>")]);
        assert_eq!(bpe("abc", &ranks), "ab c</w>");
    }

    #[test]
    fn test_unranked_pair_never_merges() {
        let ranks = ranks(&[("x", "y")]);
        assert_eq!(bpe("ab", &ranks), "a b</w>");
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        // "aaa" -> ["a", "a", "a</w>"]; only the first "a a" merges
        let ranks = ranks(&[("a", "a")]);
        assert_eq!(bpe("aaa", &ranks), "aa a</w>");

        // both leading pairs merge in the same pass
        assert_eq!(bpe("aaaaa", &ranks), "aa aa a</w>");
    }

    #[test]
    fn test_repeated_rounds() {
        let ranks = ranks(&[("l", "l"), ("h", "e"), ("he", "ll"), ("hell", "o</w>")]);
        assert_eq!(bpe("hello", &ranks), "hello</w>");
        assert_eq!(
            merge_symbols("hello", &ranks),
            vec![CompactString::new("hello</w>")]
        );
    }

    #[test]
    fn test_left_symbol_without_partner_is_copied() {
        // the first "a" is followed by another "a", not by "b"
        let ranks = ranks(&[("a", "b")]);
        assert_eq!(bpe("aabx", &ranks), "a ab x</w>");
    }
}
