mod construct;
mod decode;
pub mod page_tree;

pub use construct::{CopiedPage, LopdfBuilder, SourcePdf, TargetPdf};
pub use decode::{DecodedPage, DecodedPdf, LopdfDecoder, PagePreview};
