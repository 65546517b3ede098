use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use file_lock::{FileLock, FileOptions};

/// Read a whole file under its lock. Returns None when the file does not
/// exist.
pub fn read_file_lock(path: &str) -> Result<Option<Vec<u8>>> {
    let opts = FileOptions::new().read(true);
    let mut lock = match FileLock::lock(path, true, opts) {
        Ok(lock) => lock,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("lock file '{path}'")),
    };

    let mut data = Vec::new();
    lock.file
        .read_to_end(&mut data)
        .with_context(|| format!("read file '{path}'"))?;
    Ok(Some(data))
}

/// Replace a file's content under its lock, creating it when missing.
pub fn write_file_lock(path: &str, data: &[u8]) -> Result<()> {
    let opts = FileOptions::new().write(true).truncate(true).create(true);
    let mut lock =
        FileLock::lock(path, true, opts).with_context(|| format!("lock file '{path}'"))?;
    lock.file
        .write_all(data)
        .with_context(|| format!("write file '{path}'"))?;
    Ok(())
}

/// Remove a file while holding its lock. Missing files are not an error.
pub fn remove_file_lock(path: &str) -> Result<()> {
    let opts = FileOptions::new().write(true);
    let lock = match FileLock::lock(path, true, opts) {
        Ok(lock) => lock,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err).with_context(|| format!("lock file '{path}'")),
    };

    fs::remove_file(path).with_context(|| format!("remove file '{path}'"))?;
    drop(lock);
    Ok(())
}
