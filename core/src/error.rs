use crate::DocName;
use std::path::PathBuf;

/// Errors raised while building, merging, querying or persisting a collection.
#[derive(thiserror::Error, Debug)]
pub enum CollectionError {
    /// No document contributed a single indexed term, so there is no average length.
    #[error("collection has no indexed documents; average document length is undefined")]
    EmptyCollection,
    /// Both sides of a merge contain these documents.
    #[error("overlapping collections: {} shared document(s): {}", .0.len(), .0.join(", "))]
    OverlappingCollections(Vec<DocName>),
    /// Two files in one scan map to the same document name.
    #[error("duplicate document name {0:?}")]
    DuplicateDocument(DocName),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to extract text from {}: {message}", .path.display())]
    Extraction { path: PathBuf, message: String },
    #[error("incompatible snapshot version {found} (expected {expected})")]
    IncompatibleSnapshot { found: u32, expected: u32 },
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Snapshot(#[from] bincode::Error),
}
