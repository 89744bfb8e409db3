use std::io;

use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use super::js_error_message;
use crate::source::FileSource;

/// A `File` picked by the user or dropped onto the page.
pub struct BrowserFile(pub File);

impl FileSource for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        let buffer = JsFuture::from(self.0.array_buffer())
            .await
            .map_err(|err| io::Error::other(js_error_message(&err)))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}
