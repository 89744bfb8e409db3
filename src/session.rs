//! In-memory model of the document being edited.

use crate::error::RemoverError;

/// The currently loaded PDF and the original page numbers that survive edits.
///
/// Page numbers are 1-based indices into the uploaded document. They are
/// never renumbered as pages are removed.
#[derive(Debug, Default)]
pub struct DocumentSession {
    source_bytes: Option<Vec<u8>>,
    total_pages: u32,
    surviving_pages: Vec<u32>,
    output_name: String,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was loaded before with a fresh session.
    pub fn load(
        &mut self,
        bytes: Vec<u8>,
        page_count: u32,
        output_name: impl Into<String>,
    ) -> Result<(), RemoverError> {
        if page_count < 1 {
            return Err(RemoverError::EmptyDocument);
        }

        *self = Self {
            source_bytes: Some(bytes),
            total_pages: page_count,
            surviving_pages: (1..=page_count).collect(),
            output_name: output_name.into(),
        };
        Ok(())
    }

    /// Drops `page` from the surviving pages and returns how many remain.
    /// Absent pages are ignored.
    pub fn remove_page(&mut self, page: u32) -> usize {
        if let Ok(pos) = self.surviving_pages.binary_search(&page) {
            self.surviving_pages.remove(pos);
        }
        self.surviving_pages.len()
    }

    pub fn is_exportable(&self) -> bool {
        self.source_bytes.is_some() && !self.surviving_pages.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.source_bytes.is_some()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.surviving_pages.binary_search(&page).is_ok()
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn remaining(&self) -> usize {
        self.surviving_pages.len()
    }

    /// Surviving original page numbers, ascending.
    pub fn surviving_pages(&self) -> &[u32] {
        &self.surviving_pages
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn source_bytes(&self) -> Option<&[u8]> {
        self.source_bytes.as_deref()
    }
}
