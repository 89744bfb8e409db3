use lopdf::{Document, ObjectId};

use super::page_tree::{self, PageGeometry};
use crate::engine::{DecodingEngine, Viewport};
use crate::error::EngineError;

/// Headless decoding engine.
///
/// lopdf cannot rasterize, so a render produces only the pixel size the
/// thumbnail would have. Enough for the command line and for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfDecoder;

pub struct DecodedPdf {
    doc: Document,
    pages: Vec<ObjectId>,
}

#[derive(Debug, Clone, Copy)]
pub struct DecodedPage {
    pub number: u32,
    pub geometry: PageGeometry,
}

/// Stand-in raster: the size in whole pixels of the rendered thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePreview {
    pub width: u32,
    pub height: u32,
}

impl DecodingEngine for LopdfDecoder {
    type Document = DecodedPdf;
    type Page = DecodedPage;
    type Raster = PagePreview;

    async fn open_document(&self, bytes: &[u8]) -> Result<DecodedPdf, EngineError> {
        let doc = Document::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(EngineError::Encrypted);
        }
        let pages = doc.get_pages().into_values().collect();
        Ok(DecodedPdf { doc, pages })
    }

    fn page_count(&self, document: &DecodedPdf) -> u32 {
        document.pages.len() as u32
    }

    async fn page(&self, document: &DecodedPdf, number: u32) -> Result<DecodedPage, EngineError> {
        let index = number.checked_sub(1).ok_or(EngineError::MissingPage(number))?;
        let page_id = *document
            .pages
            .get(index as usize)
            .ok_or(EngineError::MissingPage(number))?;

        Ok(DecodedPage {
            number,
            geometry: page_tree::page_geometry(&document.doc, page_id),
        })
    }

    fn viewport(&self, page: &DecodedPage, scale: f64) -> Viewport {
        let (width, height) = page.geometry.displayed();
        Viewport {
            width: width * scale,
            height: height * scale,
            scale,
        }
    }

    async fn render(&self, page: &DecodedPage, viewport: Viewport) -> Result<PagePreview, EngineError> {
        if viewport.width < 1.0 {
            return Err(EngineError::ZeroWidth(page.number));
        }
        Ok(PagePreview {
            width: viewport.width.round() as u32,
            height: viewport.height.round().max(1.0) as u32,
        })
    }
}
