//! Local file checks and writes around uploads and downloads.
//!
//! Everything here runs before (or instead of) network traffic, so a bad
//! path never costs a round trip.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::trace;

use crate::error::{ApiError, LocalFileReason, Result};

/// The source must be an existing, readable, regular file.
pub fn check_source(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ApiError::local_file(path, LocalFileReason::SourceMissing));
        }
        Err(err) => {
            return Err(ApiError::local_file(path, LocalFileReason::SourceUnreadable(err)));
        }
    };
    if !metadata.is_file() {
        return Err(ApiError::local_file(path, LocalFileReason::NotAFile));
    }
    File::open(path)
        .map_err(|err| ApiError::local_file(path, LocalFileReason::SourceUnreadable(err)))?;
    Ok(())
}

/// The target must be a writable regular file, or a path whose nearest
/// existing ancestor is a writable directory.
pub fn check_target(path: &Path) -> Result<()> {
    let unwritable = || ApiError::local_file(path, LocalFileReason::TargetUnwritable);

    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() && is_writable(path) => Ok(()),
        Ok(_) => Err(unwritable()),
        Err(_) => {
            let ancestor = nearest_existing_ancestor(path).ok_or_else(unwritable)?;
            let metadata = fs::metadata(ancestor).map_err(|_| unwritable())?;
            if !metadata.is_dir() || !is_writable(ancestor) {
                return Err(unwritable());
            }
            Ok(())
        }
    }
}

/// Whether the current user may write to `path`, as answered by access(2).
#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};

    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| !metadata.permissions().readonly())
}

fn nearest_existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors()
        .skip(1)
        .map(|dir| if dir.as_os_str().is_empty() { Path::new(".") } else { dir })
        .find(|dir| dir.exists())
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_target(path: &Path, contents: &[u8]) -> Result<()> {
    let io_error = |err| ApiError::local_file(path, LocalFileReason::Io(err));

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !parent.is_dir() {
            trace!(dir = %parent.display(), "creating target directory");
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    fs::write(path, contents).map_err(io_error)
}

/// Read a source file for upload.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| ApiError::local_file(path, LocalFileReason::SourceUnreadable(err)))
}
