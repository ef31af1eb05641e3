pub mod document;
pub mod split;

pub use document::PdfDocument;
