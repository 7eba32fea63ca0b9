//! Collection snapshots: a single bincode blob holding a small header and the
//! full collection, statistics included. Not meant as a cross-version format.

use crate::error::CollectionError;
use crate::Collection;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub version: u32,
    pub created_at: String,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    header: SnapshotHeader,
    collection: Collection,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    header: SnapshotHeader,
    collection: &'a Collection,
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `collection` to `path`, replacing any existing file atomically.
pub fn save_snapshot<P: AsRef<Path>>(path: P, collection: &Collection) -> Result<(), CollectionError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let header = SnapshotHeader {
        version: SNAPSHOT_VERSION,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
    };
    let bytes = bincode::serialize(&SnapshotRef { header, collection })?;

    let tmp = tmp_path(path);
    let mut f = File::create(&tmp)?;
    f.write_all(&bytes)?;
    f.sync_all()?;
    fs::rename(&tmp, path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "snapshot saved");
    Ok(())
}

/// Load a snapshot written by [`save_snapshot`].
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<(SnapshotHeader, Collection), CollectionError> {
    let path = path.as_ref();
    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let snapshot: Snapshot = bincode::deserialize(&buf)?;
    if snapshot.header.version != SNAPSHOT_VERSION {
        return Err(CollectionError::IncompatibleSnapshot {
            found: snapshot.header.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    tracing::info!(
        path = %path.display(),
        num_docs = snapshot.collection.num_docs(),
        num_terms = snapshot.collection.vocabulary().len(),
        "snapshot loaded"
    );
    Ok((snapshot.header, snapshot.collection))
}

/// Load only the collection from a snapshot.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Collection, CollectionError> {
    load_snapshot(path).map(|(_, collection)| collection)
}
