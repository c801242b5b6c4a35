// File Operations
// Whole-file reads and writes; no streaming, no cross-call buffering

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Read an entire file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Write data to a file, replacing any previous contents.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

/// Parse a whole file as a JSON value.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = read_file(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Serialize a value as pretty-printed JSON and write it to a file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    write_file(path, text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rsa_blocks_fileops_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_read_write_roundtrip() {
        let path = temp_path("rw.bin");
        write_file(&path, b"\x00\x01binary\xff").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"\x00\x01binary\xff".to_vec());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let path = temp_path("does_not_exist.bin");
        assert!(read_file(&path).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let path = temp_path("value.json");
        let value = vec![String::from("a"), String::from("b")];
        write_json(&path, &value).unwrap();
        let back: Vec<String> = read_json(&path).unwrap();
        assert_eq!(back, value);
        let _ = std::fs::remove_file(&path);
    }
}
