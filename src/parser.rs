//! # Parsing
//!
//! A demo recording is a single file in two parts. The first `0x4043` bytes
//! are a fixed layout header: mostly opaque engine state, except for a one
//! byte length at `0x30` and the NUL delimited key/value region it declares
//! at `0x38`, which carries the descriptive fields (hostname, gametype,
//! scores and friends). Everything from `0x4043` on is a gzip stream of the
//! recorded engine traffic, interesting here only for the configstring
//! broadcasts scattered through it.
//!
//! This module ties the steps into the per file pipeline: consult the
//! cache, otherwise read the file once into memory, parse the header
//! prefix, decompress the body, extract configstrings, resolve the metadata
//! and store it back through the cache. Each file's pipeline touches only
//! that file and its cache artifact and keeps no state between files, so
//! callers are free to fan distinct files out across threads.
use crate::cache;
use crate::configstrings::extract_configstrings;
use crate::errors::ParseError;
use crate::header::{parse_raw_header, GZIP_START};
use crate::models::{Demo, DemoFile};
use crate::resolver::resolve_demo;
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Demo files are recognized by this extension
pub const DEMO_EXTENSION: &str = ".wdz20";

/// Parses a complete in memory demo file into its raw header pairs and
/// configstrings.
pub fn parse_demo(data: &[u8]) -> Result<DemoFile, ParseError> {
    if data.len() < GZIP_START {
        return Err(ParseError::TooShort(data.len()));
    }

    let header = parse_raw_header(&data[..GZIP_START])?;

    let mut payload = Vec::new();
    GzDecoder::new(&data[GZIP_START..])
        .read_to_end(&mut payload)
        .map_err(ParseError::Gzip)?;

    Ok(DemoFile {
        header,
        config_strings: extract_configstrings(&payload),
    })
}

/// Reads a demo file from disk and parses it. The file is read whole up
/// front; every scan afterwards runs over the in memory buffer.
pub fn read_demo_file(path: &Path) -> Result<DemoFile, ParseError> {
    let data = fs::read(path)?;
    parse_demo(&data)
}

/// Produces the metadata for one demo file, through the cache.
///
/// A cache hit replaces parsing entirely. On a miss the file is parsed and
/// resolved and the result stored; a failed store costs only the
/// persistence, not the result.
pub fn load_demo(path: &Path, filename: &str, size: u64) -> Result<Demo, ParseError> {
    if let Some(demo) = cache::load(path) {
        return Ok(demo);
    }

    let file = read_demo_file(path)?;
    let demo = resolve_demo(filename, size, &file);

    if let Err(error) = cache::store(path, &demo) {
        tracing::warn!(%filename, %error, "unable to persist cache artifact");
    }

    Ok(demo)
}

/// Collects metadata for every demo file in a directory.
///
/// Failing to enumerate the directory is the only fatal outcome. A file
/// that cannot be read, is shorter than the fixed header or carries an
/// undecodable body is logged and left out of the result. Ordering is
/// directory order; sorting and grouping belong to the caller.
pub fn list_demos(dir: impl AsRef<Path>) -> Result<Vec<Demo>, std::io::Error> {
    let mut demos = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !filename.ends_with(DEMO_EXTENSION) {
            continue;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(error) => {
                tracing::warn!(%filename, %error, "unable to stat demo file, skipping");
                continue;
            }
        };

        match load_demo(&entry.path(), &filename, size) {
            Ok(demo) => demos.push(demo),
            Err(error) => {
                tracing::warn!(%filename, %error, "unable to extract demo metadata, skipping")
            }
        }
    }

    Ok(demos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_input() {
        let res = parse_demo(&[0u8; 16]);
        assert!(matches!(res, Err(ParseError::TooShort(16))));
    }

    #[test]
    fn undecodable_body() {
        let mut data = vec![0u8; GZIP_START];
        data.extend_from_slice(b"this is not gzip");
        assert!(matches!(parse_demo(&data), Err(ParseError::Gzip(_))));
    }
}
