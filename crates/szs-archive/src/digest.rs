//! Content digests of report sources, recorded in exported artifacts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use szs_core::SourceDigest;

use crate::source::ReportSource;
use crate::Result;

/// SHA-256 of a zip archive's bytes, or of every file of a directory
/// (relative path and contents, in path order).
pub fn digest_source(source: &ReportSource) -> Result<SourceDigest> {
    let mut hasher = Sha256::new();
    match source {
        ReportSource::Zip(path) => hash_file(path, &mut hasher)?,
        ReportSource::Dir(_) => {
            source.visit_files(|name, reader| {
                hasher.update(name.as_bytes());
                hasher.update(b"\0");
                hash_reader(reader, &mut hasher)?;
                hasher.update(b"\0");
                Ok(())
            })?;
        }
    }
    Ok(SourceDigest {
        path: source.path().display().to_string(),
        sha256: hex::encode(hasher.finalize()),
    })
}

fn hash_file(path: &Path, hasher: &mut Sha256) -> Result<()> {
    let mut file = File::open(path)?;
    hash_reader(&mut file, hasher)
}

fn hash_reader(reader: &mut dyn Read, hasher: &mut Sha256) -> Result<()> {
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        hasher.update(&buf[..n]);
    }
}
