//! Commercial documents (quotations and bills)
//!
//! A document holds a snapshot of the customer, a few free-text header
//! fields and an ordered list of rows. Unlike catalog and customer stores,
//! a document file is written sequentially in one pass and read back in
//! one pass.

mod document;
mod errors;
mod row;
mod row_list;

pub use document::{Document, DocumentType};
pub use errors::{DocumentError, DocumentResult};
pub use row::DocumentRow;
pub use row_list::DocumentRowList;
