use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A single document could not be turned into text. Never fatal for a build.
    #[error("failed to extract text from {document}: {reason}")]
    Extraction { document: String, reason: String },

    #[error("failed to load url mapping {}: {source}", path.display())]
    UrlMap { path: PathBuf, #[source] source: std::io::Error },

    #[error("document {0} is already indexed")]
    DuplicateDocument(String),

    #[error("corpus directory {} is not readable: {source}", path.display())]
    CorpusUnavailable { path: PathBuf, #[source] source: std::io::Error },
}
