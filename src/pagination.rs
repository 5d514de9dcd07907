//! Cursor-paginated listing support
//!
//! Provider list APIs return one page of items plus an opaque continuation
//! cursor when more results exist. `collect_pages` follows the cursor chain
//! iteratively and concatenates the pages in order.

use crate::error::{ProviderError, StopError};
use std::future::Future;

/// One page of a paginated list response.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque continuation cursor; `None` means this was the last page.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A single complete page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Collect every item of a cursor-paginated list operation.
///
/// Calls `list(None)` first, then `list(Some(cursor))` while the response
/// carries a cursor. Pages are fetched strictly in sequence since each fetch
/// depends on the previous cursor. A provider that returns the same cursor
/// twice in a row would never terminate, so that is surfaced as
/// [`StopError::RepeatedCursor`].
pub async fn collect_pages<T, F, Fut>(mut list: F) -> Result<Vec<T>, StopError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ProviderError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = list(cursor.clone()).await?;
        items.extend(page.items);

        match page.next {
            Some(next) => {
                if cursor.as_deref() == Some(next.as_str()) {
                    return Err(StopError::RepeatedCursor { cursor: next });
                }
                cursor = Some(next);
            }
            None => return Ok(items),
        }
    }
}
