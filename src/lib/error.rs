use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("KML document not found at {}", .0.display())]
    InputMissing(PathBuf),

    #[error("could not read KML document: {0}")]
    Read(#[source] io::Error),

    /// The document could not be parsed. No output has been touched.
    #[error("could not parse KML document: {0}")]
    Parse(String),

    #[error("could not create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write GeoJSON: {0}")]
    Write(#[from] io::Error),

    #[error("could not serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
