//! Text import and export.
//!
//! Files are read as UTF-8, falling back to Shift_JIS (Windows code page 932)
//! for legacy Japanese files. Output is always written as UTF-8. The decoded
//! text is handed to the core unchanged, so replacement and attribution do
//! not depend on the source encoding.

use crate::error::{DictError, Result};
use encoding_rs::SHIFT_JIS;
use std::fs;
use std::path::Path;

/// Decode raw bytes, trying UTF-8 first and Shift_JIS second.
pub fn decode_bytes(bytes: &[u8]) -> Result<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(utf8_err) => {
            log::debug!("input is not UTF-8 ({}), trying Shift_JIS", utf8_err);
            SHIFT_JIS
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| {
                    DictError::Decode(format!(
                        "not valid UTF-8 ({}) nor Shift_JIS",
                        utf8_err
                    ))
                })
        }
    }
}

pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    decode_bytes(&bytes).map_err(|e| match e {
        DictError::Decode(reason) => DictError::Decode(format!("{}: {}", path.display(), reason)),
        other => other,
    })
}

pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    fs::write(path, text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn utf8_is_read_as_is() {
        assert_eq!(decode_bytes("猫 cat".as_bytes()).unwrap(), "猫 cat");
    }

    #[test]
    fn shift_jis_falls_back() {
        // "猫" in Shift_JIS
        let bytes = [0x94, 0x4C];
        assert_eq!(decode_bytes(&bytes).unwrap(), "猫");
    }

    #[test]
    fn undecodable_bytes_are_an_error() {
        // 0x85 0x40 is unassigned in Shift_JIS and invalid UTF-8
        let bytes = [0x85, 0x40];
        assert!(matches!(decode_bytes(&bytes), Err(DictError::Decode(_))));
    }

    #[test]
    fn written_text_reads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        write_text(&path, "dog sat on a dog\n犬").unwrap();
        assert_eq!(read_text(&path).unwrap(), "dog sat on a dog\n犬");
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            read_text(temp.path().join("nope.txt")),
            Err(DictError::Io(_))
        ));
    }
}
