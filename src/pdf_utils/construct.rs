//! Builds the exported PDF by trimming a copy of the source document.
//!
//! The copy keeps its object numbers, so links, outlines and form fields
//! that point at a kept page still resolve. References to removed pages are
//! dropped by `delete_pages`, and whatever only they used is pruned.

use std::io::Cursor;

use log::debug;
use lopdf::Document;

use crate::engine::ConstructionEngine;
use crate::error::EngineError;

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBuilder;

pub struct SourcePdf {
    doc: Document,
    page_count: u32,
}

impl SourcePdf {
    pub fn page_count(&self) -> u32 {
        self.page_count
    }
}

/// Output under construction.
///
/// The first copy clones the source it comes from, and every later copy is
/// expected to come from the same source. Pages keep their source order, so
/// they must be appended in ascending order.
#[derive(Default)]
pub struct TargetPdf {
    base: Option<SourcePdf>,
    kept: Vec<u32>,
}

impl TargetPdf {
    pub fn page_count(&self) -> usize {
        self.kept.len()
    }
}

/// A 1-based source page number that has been copied but not yet appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedPage(u32);

impl ConstructionEngine for LopdfBuilder {
    type Source = SourcePdf;
    type Target = TargetPdf;
    type PageRef = CopiedPage;

    async fn open_document(&self, bytes: &[u8]) -> Result<SourcePdf, EngineError> {
        let doc = Document::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(EngineError::Encrypted);
        }
        let page_count = doc.get_pages().len() as u32;
        Ok(SourcePdf { doc, page_count })
    }

    async fn create_document(&self) -> Result<TargetPdf, EngineError> {
        Ok(TargetPdf::default())
    }

    async fn copy_pages(
        &self,
        target: &mut TargetPdf,
        source: &SourcePdf,
        indices: &[u32],
    ) -> Result<Vec<CopiedPage>, EngineError> {
        let copied = indices
            .iter()
            .map(|&index| {
                let number = index + 1;
                if number > source.page_count {
                    return Err(EngineError::MissingPage(number));
                }
                Ok(CopiedPage(number))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if target.base.is_none() {
            target.base = Some(SourcePdf {
                doc: source.doc.clone(),
                page_count: source.page_count,
            });
        }
        Ok(copied)
    }

    fn append_page(&self, target: &mut TargetPdf, page: CopiedPage) -> Result<(), EngineError> {
        if target.kept.last().is_some_and(|&last| last >= page.0) {
            return Err(EngineError::OutOfOrder(page.0));
        }
        target.kept.push(page.0);
        Ok(())
    }

    async fn serialize(&self, target: TargetPdf) -> Result<Vec<u8>, EngineError> {
        let TargetPdf { base, kept } = target;
        let Some(SourcePdf { mut doc, page_count }) = base else {
            return Err(EngineError::NoPages);
        };
        if kept.is_empty() {
            return Err(EngineError::NoPages);
        }

        let removed: Vec<u32> = (1..=page_count)
            .filter(|number| kept.binary_search(number).is_err())
            .collect();
        debug!("Keeping {} pages, deleting {:?}", kept.len(), removed);

        doc.delete_pages(&removed);
        doc.prune_objects();
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut Cursor::new(&mut buffer))?;
        Ok(buffer)
    }
}
