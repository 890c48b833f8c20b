use crate::error::{FetchError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a raw Overpass payload to `path`, replacing any existing file
///
/// The bytes are written untouched. There is no temp file or rename, so an
/// interrupted write leaves a truncated file behind.
pub fn write_raw(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_write_error = |source| FetchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(to_write_error)?;
    writer.flush().map_err(to_write_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_raw_is_byte_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("al2.geom.osm");

        // Not valid UTF-8 on purpose
        let payload = [0x3c, 0x6f, 0x73, 0x6d, 0xff, 0x00, 0xfe, 0x0a];
        write_raw(&path, &payload).unwrap();

        assert_eq!(fs::read(&path).unwrap(), payload);
    }

    #[test]
    fn test_write_raw_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("al4.geom.osm");

        fs::write(&path, b"a much longer previous payload").unwrap();
        write_raw(&path, b"short").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn test_write_raw_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("al2.geom.osm");

        let err = write_raw(&path, b"<osm/>").unwrap_err();
        assert!(matches!(err, FetchError::Write { .. }));
    }
}
