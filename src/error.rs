//! Error types for the engines and the page-removal workflow.

use std::io;

use thiserror::Error;

/// Failure reported by a decoding or construction engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("page {0} does not exist")]
    MissingPage(u32),

    #[error("encrypted documents are not supported")]
    Encrypted,

    #[error("page {0} has no usable width")]
    ZeroWidth(u32),

    #[error("page {0} was appended after a later page")]
    OutOfOrder(u32),

    #[error("no pages were copied")]
    NoPages,

    #[error("{0}")]
    Js(String),
}

/// Coarse classification used by front-ends to pick a message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    DecodeFailure,
    RenderFailure,
    ReadFailure,
    ExportFailure,
    PreconditionFailure,
}

#[derive(Error, Debug)]
pub enum RemoverError {
    #[error("Please select a PDF file (got {mime_type:?})")]
    InvalidType { mime_type: String },

    #[error("File is too large ({size} bytes, the limit is {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not read the file: {0}")]
    Read(#[source] io::Error),

    #[error("Error loading PDF: {0}")]
    Decode(#[source] EngineError),

    #[error("The document has no pages")]
    EmptyDocument,

    #[error("Error rendering page {page}: {source}")]
    Render {
        page: u32,
        #[source]
        source: EngineError,
    },

    #[error("Error preparing PDF: {0}")]
    Export(#[source] EngineError),

    #[error("Could not save {file_name}: {source}")]
    Download {
        file_name: String,
        #[source]
        source: io::Error,
    },

    #[error("No pages to download")]
    NothingToExport,

    #[error("No document loaded")]
    NoDocument,
}

impl RemoverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RemoverError::InvalidType { .. }
            | RemoverError::TooLarge { .. }
            | RemoverError::InvalidConfig(_) => ErrorKind::InvalidInput,
            RemoverError::Read(_) => ErrorKind::ReadFailure,
            RemoverError::Decode(_) | RemoverError::EmptyDocument => ErrorKind::DecodeFailure,
            RemoverError::Render { .. } => ErrorKind::RenderFailure,
            RemoverError::Export(_) | RemoverError::Download { .. } => ErrorKind::ExportFailure,
            RemoverError::NothingToExport | RemoverError::NoDocument => {
                ErrorKind::PreconditionFailure
            }
        }
    }
}
