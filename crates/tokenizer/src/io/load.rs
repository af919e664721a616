//! Reading merge resources.
//!
//! A merge resource is newline-delimited UTF-8 text, usually gzip
//! compressed. Both encodings are accepted from disk or memory; gzip is
//! recognised by its magic bytes.

use super::format::ResourceFormat;
use cliptok_core::{Result, TokenizerError};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;

/// Merge resource reader.
pub struct MergeResource;

impl MergeResource {
    /// Read the lines of a merge resource file.
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let format = ResourceFormat::detect(&bytes);
        let lines = Self::lines_from_bytes(&bytes)?;
        log::debug!(
            "read {} lines from {} ({:?}, {} bytes)",
            lines.len(),
            path.display(),
            format,
            bytes.len()
        );

        Ok(lines)
    }

    /// Split an in-memory resource into lines, decompressing if needed.
    pub fn lines_from_bytes(bytes: &[u8]) -> Result<Vec<String>> {
        match ResourceFormat::detect(bytes) {
            ResourceFormat::Gzip => Self::lines_from_gzip(bytes),
            ResourceFormat::Plain => Ok(Self::lines_from_text(utf8(bytes)?)),
        }
    }

    /// Decompress a gzip resource and split it into lines.
    ///
    /// Gzip failures are not tied to a line and carry none.
    pub fn lines_from_gzip(bytes: &[u8]) -> Result<Vec<String>> {
        let mut decoded = Vec::with_capacity(bytes.len() * 3);
        GzDecoder::new(bytes)
            .read_to_end(&mut decoded)
            .map_err(|e| TokenizerError::CorruptVocab {
                line: None,
                reason: format!("gzip stream: {}", e),
            })?;

        Ok(Self::lines_from_text(utf8(&decoded)?))
    }

    /// Split resource text into lines.
    pub fn lines_from_text(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        TokenizerError::CorruptVocab {
            line: Some(line),
            reason: format!("invalid UTF-8: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_plain_lines() {
        let lines = MergeResource::lines_from_bytes(b"#version: 0.2\nh e\nl l\n").unwrap();
        assert_eq!(lines, vec!["#version: 0.2", "h e", "l l"]);
    }

    #[test]
    fn test_gzip_lines() {
        let bytes = gzip("#version: 0.2\nh e\r\nl l\n");
        let lines = MergeResource::lines_from_bytes(&bytes).unwrap();
        assert_eq!(lines, vec!["#version: 0.2", "h e", "l l"]);
    }

    #[test]
    fn test_corrupt_gzip() {
        // gzip magic followed by an unknown compression method
        let bytes = [0x1f, 0x8b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x00];
        let err = MergeResource::lines_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TokenizerError::CorruptVocab { line: None, .. }));
        assert!(err.to_string().starts_with("Corrupt vocabulary: gzip stream"));
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let err = MergeResource::lines_from_bytes(b"#version\nh e\n\xff x\n").unwrap_err();
        assert!(matches!(err, TokenizerError::CorruptVocab { line: Some(3), .. }));
    }

    #[test]
    fn test_read_lines_from_file() {
        let dir = std::env::temp_dir().join(format!("cliptok_load_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("merges.txt.gz");
        std::fs::write(&path, gzip("#version: 0.2\nc a\n")).unwrap();

        let lines = MergeResource::read_lines(&path).unwrap();
        assert_eq!(lines, vec!["#version: 0.2", "c a"]);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/cliptok/merges.txt.gz");
        match MergeResource::read_lines(path).unwrap_err() {
            TokenizerError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
