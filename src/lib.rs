//! Remove pages from a PDF and download what is left.
//!
//! The [`WorkflowController`] owns a [`DocumentSession`] and drives it
//! through three phases: load (decode and render thumbnails), edit (remove
//! pages) and export (copy the surviving pages, in original order, into a
//! new document). PDF decoding, page construction and the user interface are
//! reached through the [`DecodingEngine`], [`ConstructionEngine`] and
//! [`Presenter`] traits.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod filename;
pub mod pdf_utils;
pub mod presenter;
pub mod session;
pub mod source;
pub mod validation;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ExportProgress, RemoverConfig};
pub use controller::{ExportSummary, WorkflowController};
pub use engine::{ConstructionEngine, DecodingEngine, Viewport};
pub use error::{EngineError, ErrorKind, RemoverError};
pub use pdf_utils::{LopdfBuilder, LopdfDecoder, PagePreview};
pub use presenter::{Presenter, Tile, ViewState};
pub use session::DocumentSession;
pub use source::{FileSource, InMemoryFile};

#[cfg(not(target_arch = "wasm32"))]
pub use source::LocalFile;
