use serde::Serialize;

use crate::todo::Todo;

/// A bounded contiguous slice of the ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub todos: Vec<Todo>,
    pub current_page: usize,
    pub total_pages: usize,
}

impl Page {
    /// Builds the page window over an ordered collection.
    ///
    /// A `page_number` past the end yields an empty page carrying the
    /// requested page number and the computed total. Pages are numbered
    /// from 1.
    pub fn of(todos: &[Todo], page_number: usize, page_size: usize) -> Self {
        let total = total_pages(todos.len(), page_size);
        let items = match page_bounds(todos.len(), page_number, page_size) {
            Some((start, end)) => todos[start..end].to_vec(),
            None => Vec::new(),
        };
        Self {
            todos: items,
            current_page: page_number,
            total_pages: total,
        }
    }
}

/// Number of pages needed to hold `len` items: `ceil(len / page_size)`,
/// 0 for an empty collection.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Half-open index bounds `[start, end)` of the requested page, clipped
/// to the collection, or `None` when the page is past the end.
pub fn page_bounds(len: usize, page_number: usize, page_size: usize) -> Option<(usize, usize)> {
    if page_number == 0 || page_number > total_pages(len, page_size) {
        return None;
    }
    let start = (page_number - 1) * page_size;
    Some((start, (start + page_size).min(len)))
}
