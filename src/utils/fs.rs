use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{map_io_err, PatchResult};

/// Read a whole file as UTF-8 text
pub fn read_file_to_string(path: impl AsRef<Path>) -> PatchResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());

    fs::read_to_string(path).map_err(map_io_err(path))
}

/// Overwrite `path` with `content` in place
pub fn write_file(path: impl AsRef<Path>, content: &str) -> PatchResult<()> {
    let path = path.as_ref();
    debug!("Writing file in place: {}", path.display());

    create_parent_dirs(path)?;
    fs::write(path, content).map_err(map_io_err(path))
}

/// Write `content` to a temporary file next to `path`, then rename it over `path`
pub fn write_file_atomic(path: impl AsRef<Path>, content: &str) -> PatchResult<()> {
    let path = path.as_ref();
    debug!("Writing file atomically: {}", path.display());

    create_parent_dirs(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(map_io_err(dir))?;
    tmp.write_all(content.as_bytes()).map_err(map_io_err(tmp.path()))?;
    tmp.flush().map_err(map_io_err(tmp.path()))?;
    tmp.as_file().sync_all().map_err(map_io_err(tmp.path()))?;

    // The temp file starts out owner-only; keep the target's mode.
    if let Ok(metadata) = fs::metadata(path) {
        if metadata.is_file() {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(map_io_err(tmp.path()))?;
        }
    }
    tmp.persist(path).map_err(|e| map_io_err(path)(e.error))?;

    Ok(())
}

fn create_parent_dirs(path: &Path) -> PatchResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(map_io_err(parent))?;
        }
    }
    Ok(())
}
