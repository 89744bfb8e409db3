//! Decoding engine backed by pdf.js.
//!
//! pdf.js is loaded by the page as the `pdfjsLib` global; the bridge module
//! wraps the few calls we need so they can be imported here.

use wasm_bindgen::prelude::*;

use super::js_error_message;
use crate::engine::{DecodingEngine, Viewport};
use crate::error::EngineError;

#[wasm_bindgen(module = "/js/pdfjs_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = openDocument)]
    async fn open_document_js(bytes: &[u8]) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = pageCount)]
    fn page_count_js(document: &JsValue) -> u32;

    #[wasm_bindgen(catch, js_name = getPage)]
    async fn get_page_js(document: &JsValue, number: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = viewportWidth)]
    fn viewport_width_js(page: &JsValue, scale: f64) -> f64;

    #[wasm_bindgen(js_name = viewportHeight)]
    fn viewport_height_js(page: &JsValue, scale: f64) -> f64;

    /// Resolves to a `<canvas>` holding the rendered page.
    #[wasm_bindgen(catch, js_name = renderPage)]
    async fn render_page_js(page: &JsValue, scale: f64) -> Result<JsValue, JsValue>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfJsDecoder;

fn js_failure(err: JsValue) -> EngineError {
    EngineError::Js(js_error_message(&err))
}

impl DecodingEngine for PdfJsDecoder {
    type Document = JsValue;
    type Page = JsValue;
    type Raster = JsValue;

    async fn open_document(&self, bytes: &[u8]) -> Result<JsValue, EngineError> {
        open_document_js(bytes).await.map_err(js_failure)
    }

    fn page_count(&self, document: &JsValue) -> u32 {
        page_count_js(document)
    }

    async fn page(&self, document: &JsValue, number: u32) -> Result<JsValue, EngineError> {
        get_page_js(document, number).await.map_err(js_failure)
    }

    fn viewport(&self, page: &JsValue, scale: f64) -> Viewport {
        Viewport {
            width: viewport_width_js(page, scale),
            height: viewport_height_js(page, scale),
            scale,
        }
    }

    async fn render(&self, page: &JsValue, viewport: Viewport) -> Result<JsValue, EngineError> {
        render_page_js(page, viewport.scale).await.map_err(js_failure)
    }
}
