//! Browser bindings.
//!
//! ```javascript
//! import init, { PageRemover } from './pkg/pdf_page_remover.js';
//!
//! await init();
//! const remover = new PageRemover(callbacks);
//! await remover.load(fileInput.files[0]);
//! remover.removePage(2);
//! const summary = await remover.export();
//! ```

mod console;
mod file;
mod pdfjs;
mod presenter;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::config::RemoverConfig;
use crate::controller::WorkflowController;
use crate::error::RemoverError;
use crate::pdf_utils::LopdfBuilder;

pub use file::BrowserFile;
pub use pdfjs::PdfJsDecoder;
pub use presenter::JsPresenter;

type WebController = WorkflowController<PdfJsDecoder, LopdfBuilder, JsPresenter>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init(LevelFilter::Info);
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

fn to_js(err: RemoverError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn busy() -> JsValue {
    JsValue::from_str("Another operation is still in progress")
}

/// Page-removal workflow for one page of UI.
///
/// The controller is moved out of its cell while an async phase runs, so a
/// call that overlaps a running load or export fails fast instead of
/// interleaving with it.
#[wasm_bindgen]
pub struct PageRemover {
    inner: Rc<RefCell<Option<WebController>>>,
}

#[wasm_bindgen]
impl PageRemover {
    #[wasm_bindgen(constructor)]
    pub fn new(callbacks: JsValue, config: JsValue) -> Result<PageRemover, JsValue> {
        let config: RemoverConfig = if config.is_undefined() || config.is_null() {
            RemoverConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let presenter = JsPresenter::from_callbacks(&callbacks)?;
        let controller =
            WorkflowController::new(config, PdfJsDecoder, LopdfBuilder, presenter).map_err(to_js)?;

        Ok(PageRemover {
            inner: Rc::new(RefCell::new(Some(controller))),
        })
    }

    pub fn load(&self, file: web_sys::File) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let mut controller = inner.borrow_mut().take().ok_or_else(busy)?;
            let result = controller.load(&BrowserFile(file)).await;
            *inner.borrow_mut() = Some(controller);
            result.map(|()| JsValue::UNDEFINED).map_err(to_js)
        })
    }

    /// Returns the number of pages left.
    #[wasm_bindgen(js_name = removePage)]
    pub fn remove_page(&self, page: u32) -> Result<u32, JsValue> {
        let mut inner = self.inner.borrow_mut();
        let controller = inner.as_mut().ok_or_else(busy)?;
        Ok(controller.remove_page(page) as u32)
    }

    /// Resolves to `{ fileName, pageCount, byteLen }`.
    pub fn export(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let mut controller = inner.borrow_mut().take().ok_or_else(busy)?;
            let result = controller.export().await;
            *inner.borrow_mut() = Some(controller);
            let summary = result.map_err(to_js)?;
            serde_wasm_bindgen::to_value(&summary).map_err(JsValue::from)
        })
    }

    pub fn reset(&self) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.as_mut().ok_or_else(busy)?.reset();
        Ok(())
    }

    #[wasm_bindgen(js_name = survivingPages)]
    pub fn surviving_pages(&self) -> Result<Vec<u32>, JsValue> {
        let inner = self.inner.borrow();
        let controller = inner.as_ref().ok_or_else(busy)?;
        Ok(controller.session().surviving_pages().to_vec())
    }

    #[wasm_bindgen(js_name = totalPages)]
    pub fn total_pages(&self) -> Result<u32, JsValue> {
        let inner = self.inner.borrow();
        let controller = inner.as_ref().ok_or_else(busy)?;
        Ok(controller.session().total_pages())
    }
}
