use std::io;

use js_sys::{Function, Reflect, Uint8Array};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};

use super::js_error_message;
use crate::presenter::{Presenter, Tile, ViewState};

/// Presenter backed by a plain JS object of callbacks:
///
/// ```javascript
/// {
///   progress(percent, message) {},
///   notify(message, isError) {},
///   view(state) {},               // "empty" | "loading" | "editing" | "exporting"
///   pageCount(remaining, total) {},
///   clearTiles() {},
///   addTile(pageNumber, canvas) {},
///   removeTile(pageNumber) {},
///   download(fileName, bytes) {},  // bytes is a Uint8Array
/// }
/// ```
///
/// Missing callbacks are skipped, except `download`.
pub struct JsPresenter {
    progress: Option<Function>,
    notify: Option<Function>,
    view: Option<Function>,
    page_count: Option<Function>,
    clear_tiles: Option<Function>,
    add_tile: Option<Function>,
    remove_tile: Option<Function>,
    download: Function,
}

fn callback(callbacks: &JsValue, name: &str) -> Result<Option<Function>, JsValue> {
    let value = Reflect::get(callbacks, &JsValue::from_str(name))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<Function>()
        .map(Some)
        .map_err(|_| JsValue::from_str(&format!("callback `{}` is not a function", name)))
}

impl JsPresenter {
    pub fn from_callbacks(callbacks: &JsValue) -> Result<Self, JsValue> {
        let download = callback(callbacks, "download")?
            .ok_or_else(|| JsValue::from_str("callback `download` is required"))?;

        Ok(Self {
            progress: callback(callbacks, "progress")?,
            notify: callback(callbacks, "notify")?,
            view: callback(callbacks, "view")?,
            page_count: callback(callbacks, "pageCount")?,
            clear_tiles: callback(callbacks, "clearTiles")?,
            add_tile: callback(callbacks, "addTile")?,
            remove_tile: callback(callbacks, "removeTile")?,
            download,
        })
    }
}

// UI callbacks must not abort a workflow step; failures are only logged.
fn invoke(name: &str, f: &Option<Function>, args: &[JsValue]) {
    let Some(f) = f else {
        return;
    };
    let result = match args {
        [] => f.call0(&JsValue::NULL),
        [a] => f.call1(&JsValue::NULL, a),
        [a, b] => f.call2(&JsValue::NULL, a, b),
        _ => f.call3(&JsValue::NULL, &args[0], &args[1], &args[2]),
    };
    if let Err(err) = result {
        warn!("`{}` callback failed: {}", name, js_error_message(&err));
    }
}

impl Presenter for JsPresenter {
    type Raster = JsValue;

    fn progress(&mut self, percent: f64, message: &str) {
        invoke(
            "progress",
            &self.progress,
            &[JsValue::from_f64(percent), JsValue::from_str(message)],
        );
    }

    fn notify(&mut self, message: &str, is_error: bool) {
        invoke(
            "notify",
            &self.notify,
            &[JsValue::from_str(message), JsValue::from_bool(is_error)],
        );
    }

    fn set_view(&mut self, view: ViewState) {
        invoke("view", &self.view, &[JsValue::from_str(view.as_str())]);
    }

    fn page_count_changed(&mut self, remaining: usize, total: u32) {
        invoke(
            "pageCount",
            &self.page_count,
            &[JsValue::from_f64(remaining as f64), JsValue::from(total)],
        );
    }

    fn clear_tiles(&mut self) {
        invoke("clearTiles", &self.clear_tiles, &[]);
    }

    fn add_tile(&mut self, tile: Tile<JsValue>) {
        invoke(
            "addTile",
            &self.add_tile,
            &[JsValue::from(tile.page_number), tile.raster],
        );
    }

    fn remove_tile(&mut self, page_number: u32) {
        invoke("removeTile", &self.remove_tile, &[JsValue::from(page_number)]);
    }

    fn offer_download(&mut self, file_name: &str, bytes: Vec<u8>) -> io::Result<()> {
        let data = Uint8Array::from(bytes.as_slice());
        self.download
            .call2(&JsValue::NULL, &JsValue::from_str(file_name), &data)
            .map(|_| ())
            .map_err(|err| io::Error::other(js_error_message(&err)))
    }
}
