//! Ordered list of document rows addressed by position

use serde::{Deserialize, Serialize};

use super::errors::{DocumentError, DocumentResult};
use super::row::DocumentRow;

/// The rows of a document, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRowList {
    rows: Vec<DocumentRow>,
}

impl DocumentRowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn get(&self, index: usize) -> Option<&DocumentRow> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DocumentRow> {
        self.rows.get_mut(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRow> {
        self.rows.iter()
    }

    pub fn push_back(&mut self, row: DocumentRow) {
        self.rows.push(row);
    }

    /// Inserts `row` in front of the row at `position`.
    ///
    /// On an empty list the row is simply added and `position` is ignored.
    pub fn insert_before(&mut self, position: usize, row: DocumentRow) -> DocumentResult<()> {
        if self.rows.is_empty() {
            self.rows.push(row);
            return Ok(());
        }
        self.check_position(position)?;
        self.rows.insert(position, row);
        Ok(())
    }

    /// Inserts `row` right after the row at `position`.
    ///
    /// On an empty list the row is simply added and `position` is ignored.
    pub fn insert_after(&mut self, position: usize, row: DocumentRow) -> DocumentResult<()> {
        if self.rows.is_empty() {
            self.rows.push(row);
            return Ok(());
        }
        self.check_position(position)?;
        self.rows.insert(position + 1, row);
        Ok(())
    }

    /// Removes and returns the row at `position`.
    pub fn remove_row(&mut self, position: usize) -> DocumentResult<DocumentRow> {
        if self.rows.is_empty() {
            return Err(DocumentError::EmptyList);
        }
        self.check_position(position)?;
        Ok(self.rows.remove(position))
    }

    fn check_position(&self, position: usize) -> DocumentResult<()> {
        if position >= self.rows.len() {
            return Err(DocumentError::RowNotFound {
                position,
                count: self.rows.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DocumentRowList {
    type Item = &'a DocumentRow;
    type IntoIter = std::slice::Iter<'a, DocumentRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
