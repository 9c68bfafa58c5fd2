//! On disk cache for resolved demos.
//!
//! One artifact sits next to each demo file, holding the JSON serialization
//! of its [`Demo`]. The artifact's existence alone marks it valid: the
//! source file's modification time and size are never compared, so a demo
//! file changed in place keeps serving its old metadata until the artifact
//! is removed externally. That staleness is documented behavior, not a bug
//! to fix here.
use crate::errors::CacheError;
use crate::models::Demo;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Appended to the full demo file name to derive the artifact name
const CACHE_SUFFIX: &str = ".dat";

/// The cache artifact belonging to a demo file.
pub fn cache_path(demo_path: &Path) -> PathBuf {
    let mut path = demo_path.as_os_str().to_owned();
    path.push(CACHE_SUFFIX);
    PathBuf::from(path)
}

/// Loads the cached resolution of a demo file, if one exists.
///
/// A corrupt or unreadable artifact is logged and degrades to a cache miss,
/// so the caller re-parses the source file.
pub fn load(demo_path: &Path) -> Option<Demo> {
    let path = cache_path(demo_path);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "unable to read cache artifact");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(demo) => Some(demo),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "unable to decode cache artifact");
            None
        }
    }
}

/// Persists a resolved demo next to its source file.
///
/// A failed write removes the partial artifact, leaving the next run with a
/// clean miss instead of a corrupt hit.
pub fn store(demo_path: &Path, demo: &Demo) -> Result<(), CacheError> {
    let path = cache_path(demo_path);
    let encoded = serde_json::to_vec(demo).map_err(CacheError::Serialize)?;

    if let Err(error) = fs::write(&path, encoded) {
        if let Err(remove_error) = fs::remove_file(&path) {
            if remove_error.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %remove_error,
                    "unable to remove partial cache artifact"
                );
            }
        }
        return Err(CacheError::Io(error));
    }

    Ok(())
}
