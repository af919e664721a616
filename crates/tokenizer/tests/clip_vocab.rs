//! End-to-end checks against a full-size vocabulary.

mod common;

use cliptok::{
    ByteMapper, MergeResource, Tokenizer, TokenizerError, CLIP_VOCAB_SIZE, END_OF_TEXT,
    START_OF_TEXT,
};
use std::sync::Arc;

#[test]
fn test_byte_mapping_round_trip() {
    let bytes = ByteMapper::build();
    for b in 0..=255u8 {
        assert_eq!(bytes.decode_char(bytes.encode_byte(b)), Some(b));
    }
}

#[test]
fn test_vocab_layout() {
    let tokenizer = common::tokenizer();
    assert_eq!(tokenizer.vocab_size(), CLIP_VOCAB_SIZE);
    assert_eq!(tokenizer.start_of_text_id(), 49406);
    assert_eq!(tokenizer.end_of_text_id(), 49407);
    assert_eq!(tokenizer.token_to_id("!"), Some(0));
    assert_eq!(tokenizer.token_to_id("!</w>"), Some(256));
    assert_eq!(tokenizer.token_to_id("he"), Some(512));
    assert_eq!(tokenizer.token_to_id("trailingrule"), None);
}

#[test]
fn test_vocab_maps_are_inverse() {
    let tokenizer = common::tokenizer();
    for (id, token) in tokenizer.vocab().iter() {
        assert_eq!(tokenizer.token_to_id(token), Some(id));
        assert_eq!(tokenizer.id_to_token(id), Some(token));
    }
}

#[test]
fn test_gzip_resource() {
    let bytes = common::resource_gzip();
    let from_gzip = Tokenizer::builder().from_gzip_bytes(&bytes).unwrap();
    assert_eq!(from_gzip.vocab_size(), CLIP_VOCAB_SIZE);

    let lines = MergeResource::lines_from_bytes(&bytes).unwrap();
    assert_eq!(lines.len(), cliptok::DEFAULT_MERGE_COUNT + 2);

    let plain = common::tokenizer();
    let text = "Hello world, the cat don't care!";
    assert_eq!(from_gzip.encode(text).unwrap(), plain.encode(text).unwrap());
}

#[test]
fn test_resource_file() {
    let dir = std::env::temp_dir().join(format!("cliptok_it_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bpe_simple_vocab_16e6.txt.gz");
    std::fs::write(&path, common::resource_gzip()).unwrap();

    let tokenizer = Tokenizer::builder().from_file(&path).unwrap();
    assert_eq!(tokenizer.vocab_size(), CLIP_VOCAB_SIZE);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_malformed_resource() {
    let mut text = common::resource_text();
    text = text.replacen("c a\n", "c a b\n", 1);
    let err = Tokenizer::builder().from_text(&text).unwrap_err();
    // header is line 1, "c a" is the ninth rule
    assert!(matches!(err, TokenizerError::CorruptVocab { line: Some(10), .. }));
}

#[test]
fn test_duplicate_product_rejected() {
    let text = common::resource_text().replacen("zq0 zz</w>", "wor ld</w>", 1);
    let err = Tokenizer::builder().from_text(&text).unwrap_err();
    assert!(matches!(err, TokenizerError::CorruptVocab { .. }));
}

#[test]
fn test_deterministic() {
    let text = "A photo of a cat, 2 dogs & Hello World!!";
    let first = common::tokenizer().encode(text).unwrap();
    let second = common::tokenizer().encode(text).unwrap();
    assert_eq!(first, second);

    let tokenizer = common::tokenizer();
    assert_eq!(tokenizer.encode(text).unwrap(), tokenizer.encode(text).unwrap());
}

#[test]
fn test_special_token_atomicity() {
    let tokenizer = common::tokenizer();
    let ids = tokenizer
        .encode("<|startoftext|> cat <|endoftext|>")
        .unwrap();

    assert_eq!(ids.first(), tokenizer.token_to_id(START_OF_TEXT).as_ref());
    assert_eq!(ids.last(), tokenizer.token_to_id(END_OF_TEXT).as_ref());
    assert_eq!(ids, vec![49406, tokenizer.token_to_id("cat</w>").unwrap(), 49407]);
}

#[test]
fn test_case_and_whitespace_normalization() {
    let tokenizer = common::tokenizer();
    assert_eq!(
        tokenizer.encode("Hello   World").unwrap(),
        tokenizer.encode("hello world").unwrap()
    );
    assert_eq!(
        tokenizer.encode("hello world").unwrap(),
        vec![
            tokenizer.token_to_id("hello</w>").unwrap(),
            tokenizer.token_to_id("world</w>").unwrap(),
        ]
    );
}

#[test]
fn test_decode_lowercases() {
    let tokenizer = common::tokenizer();
    let ids = tokenizer.encode("Hello!").unwrap();
    assert_eq!(tokenizer.decode(&ids).unwrap(), "hello ! ");
}

#[test]
fn test_contraction_and_digits() {
    let tokenizer = common::tokenizer();
    let ids = tokenizer.encode("Don't 42").unwrap();
    let expected: Vec<u32> = ["don</w>", "'t</w>", "4</w>", "2</w>"]
        .iter()
        .map(|t| tokenizer.token_to_id(t).unwrap())
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_unranked_pairs_stay_split() {
    let tokenizer = common::tokenizer();
    assert_eq!(tokenizer.merge_token("xy"), "x y</w>");
}

#[test]
fn test_empty_boundaries() {
    let tokenizer = common::tokenizer();
    assert!(tokenizer.encode("").unwrap().is_empty());
    assert_eq!(tokenizer.decode(&[]).unwrap(), "");
}

#[test]
fn test_unknown_id_leaves_state_intact() {
    let tokenizer = common::tokenizer();
    let before = tokenizer.encode("hello cat").unwrap();
    let cached = tokenizer.cache_len();

    let err = tokenizer.decode(&[49408]).unwrap_err();
    assert!(matches!(
        err,
        TokenizerError::UnknownId {
            id: 49408,
            vocab_size: 49408
        }
    ));

    assert_eq!(tokenizer.cache_len(), cached);
    assert_eq!(tokenizer.encode("hello cat").unwrap(), before);
    assert_eq!(tokenizer.decode(&before).unwrap(), "hello cat ");
}

#[test]
fn test_cache_idempotent() {
    let tokenizer = common::tokenizer();
    let hello = tokenizer.merge_token("hello");
    let cat = tokenizer.merge_token("cat");
    let size = tokenizer.cache_len();

    for _ in 0..3 {
        assert_eq!(tokenizer.merge_token("hello"), hello);
    }
    assert_eq!(tokenizer.merge_token("cat"), cat);
    assert_eq!(tokenizer.cache_len(), size);
}

#[test]
fn test_shared_across_threads() {
    let tokenizer = Arc::new(common::tokenizer());
    let expected = tokenizer.encode("hello world cat").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tokenizer = Arc::clone(&tokenizer);
            let expected = expected.clone();
            std::thread::spawn(move || {
                for _ in 0..20 {
                    assert_eq!(tokenizer.encode("hello world cat").unwrap(), expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let texts = vec!["hello"; 64];
    let batch = tokenizer.encode_batch(&texts).unwrap();
    assert!(batch.iter().all(|ids| ids == &batch[0]));
}
