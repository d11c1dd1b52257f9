//! Temp-file-and-rename writes.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The step of an atomic write that failed.
#[derive(Debug)]
pub(crate) struct WriteFailure {
    pub operation: &'static str,
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Temp file next to `path`: `<file name>.tmp`.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` via a synced temp file and a rename.
///
/// On failure the temp file is removed and `path` is left as it was.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteFailure> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WriteFailure {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, bytes).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| WriteFailure {
            operation: "rename",
            path: path.to_path_buf(),
            source: e,
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<(), WriteFailure> {
    let failure = |operation| {
        let path = temp_path.to_path_buf();
        move |source| WriteFailure {
            operation,
            path,
            source,
        }
    };

    let mut file = File::create(temp_path).map_err(failure("create"))?;
    file.write_all(bytes).map_err(failure("write"))?;
    file.sync_all().map_err(failure("sync"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path_for(Path::new("/a/config.json")),
            PathBuf::from("/a/config.json.tmp")
        );
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, b"old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_atomic_into_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let failure = write_atomic(&target, b"data").unwrap_err();

        assert_eq!(failure.operation, "rename");
        assert!(target.is_dir());
        assert!(!temp_path_for(&target).exists());
    }
}
