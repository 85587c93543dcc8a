//! Cursor connections for paginated list fields.
//!
//! Cursors are absolute offsets into the filtered result set: the item at index `i` of a page that
//! starts after `after` items has cursor `after + i + 1`. Offsets shift when rows are inserted or
//! deleted between page requests, so a cursor only identifies a position, never an item.

use serde::Serialize;

/// Pagination metadata computed by the query layer for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationInfo {
    pub total_count: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationInfo {
    /// Metadata for a page of `returned` items starting after `after` items out of `total`.
    pub fn for_window(after: usize, returned: usize, total: usize) -> Self {
        Self { total_count: total, has_next: after + returned < total, has_previous: after > 0 }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination_info: PaginationInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub total_count: usize,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Builds edges in item order, asking `cursor_fn` for each item's cursor.
    ///
    /// Total count and page info start empty; callers copy them from the query layer.
    pub fn new<F>(items: Vec<T>, cursor_fn: F) -> Self
    where
        F: Fn(&T) -> String,
    {
        let edges = items.into_iter().map(|node| Edge { cursor: cursor_fn(&node), node }).collect();
        Self { edges, total_count: 0, page_info: PageInfo::default() }
    }

    /// Builds a connection over `items`, the window starting after `after` items, with offset
    /// cursors. Totals and page flags are copied from `info`.
    pub fn from_offset(items: Vec<T>, after: usize, info: PaginationInfo) -> Self {
        let cursors = offset_cursors(after, items.len());
        let edges =
            items.into_iter().zip(cursors).map(|(node, cursor)| Edge { cursor, node }).collect();
        Self {
            edges,
            total_count: info.total_count,
            page_info: PageInfo {
                has_next_page: info.has_next,
                has_previous_page: info.has_previous,
            },
        }
    }

    /// Builds a connection from a query page that started after `after` items.
    pub fn from_page(page: Paginated<T>, after: usize) -> Self {
        Self::from_offset(page.items, after, page.pagination_info)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    pub fn cursors(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(|e| e.cursor.as_str())
    }
}

/// Offset cursors for `len` items of a page starting after `after` items.
pub fn offset_cursors(after: usize, len: usize) -> Vec<String> {
    (0..len).map(|index| (after + index + 1).to_string()).collect()
}

/// Clamps a requested page size to `1..=max`.
#[inline]
pub fn clamp_first(first: usize, max: usize) -> usize {
    first.clamp(1, max.max(1))
}
