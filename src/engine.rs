//! Seams to the PDF libraries that do the actual decoding and construction.
//!
//! Every call that may touch a large document is `async` so browser engines
//! can yield; the workflow awaits them one at a time.

use crate::error::EngineError;

/// Size of a page at a given scale, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

/// Parses PDF bytes and rasterizes pages for preview.
#[allow(async_fn_in_trait)]
pub trait DecodingEngine {
    type Document;
    type Page;
    type Raster;

    async fn open_document(&self, bytes: &[u8]) -> Result<Self::Document, EngineError>;

    fn page_count(&self, document: &Self::Document) -> u32;

    /// `number` is 1-based.
    async fn page(&self, document: &Self::Document, number: u32) -> Result<Self::Page, EngineError>;

    fn viewport(&self, page: &Self::Page, scale: f64) -> Viewport;

    async fn render(&self, page: &Self::Page, viewport: Viewport) -> Result<Self::Raster, EngineError>;
}

/// Builds a new PDF out of pages copied from an existing one.
#[allow(async_fn_in_trait)]
pub trait ConstructionEngine {
    type Source;
    type Target;
    type PageRef;

    async fn open_document(&self, bytes: &[u8]) -> Result<Self::Source, EngineError>;

    async fn create_document(&self) -> Result<Self::Target, EngineError>;

    /// `indices` are 0-based positions in `source`.
    async fn copy_pages(
        &self,
        target: &mut Self::Target,
        source: &Self::Source,
        indices: &[u32],
    ) -> Result<Vec<Self::PageRef>, EngineError>;

    fn append_page(&self, target: &mut Self::Target, page: Self::PageRef) -> Result<(), EngineError>;

    async fn serialize(&self, target: Self::Target) -> Result<Vec<u8>, EngineError>;
}
