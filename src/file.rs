// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::error::Result;

/// Where an export ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Written {
    Stdout,
    File(PathBuf),
}

/// Write rendered export `contents` to stdout or to `export.out_path()`,
/// creating the parent directory as needed.
pub fn write_export(export: &ExportOptions, contents: &str) -> Result<Written> {
    if export.to_stdout {
        let mut out = io::stdout().lock();
        out.write_all(contents.as_bytes())?;
        out.flush()?;
        return Ok(Written::Stdout);
    }

    let path = export.out_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(&path, contents)?;
    logd!("Export: wrote {} bytes to {}", contents.len(), path.display());
    Ok(Written::File(path))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
