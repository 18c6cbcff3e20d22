//! Offset/count pagination over a materialized item set.
//!
//! Offsets are 1-based: `offset = 1` starts at the first item and `offset = 0`
//! means "from the start". A `count` of zero selects the caller's default.

use std::fmt;

/// One page cut out of a larger item set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub returned_count: usize,
    /// 1-based position of the first returned item.
    pub effective_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The item set holds nothing to paginate.
    Empty,
    /// The requested offset lies past the end of the item set.
    OffsetOutOfRange { offset: usize, total_count: usize },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Empty => write!(f, "no items available"),
            PageError::OffsetOutOfRange {
                offset,
                total_count,
            } => write!(
                f,
                "offset {} exceeds available count {}",
                offset, total_count
            ),
        }
    }
}

/// Cut the page described by `offset` and `count` out of `items`.
///
/// Negative offsets and counts are clamped to zero before the defaults apply.
pub fn resolve<T>(
    items: Vec<T>,
    offset: i64,
    count: i64,
    default_count: usize,
) -> Result<Page<T>, PageError> {
    let total_count = items.len();
    if total_count == 0 {
        return Err(PageError::Empty);
    }

    let low = usize::try_from(offset.max(1) - 1).unwrap_or(usize::MAX);
    let max_count = match usize::try_from(count) {
        Ok(0) | Err(_) => default_count,
        Ok(requested) => requested,
    };
    let high = low.saturating_add(max_count).min(total_count);

    if low > high {
        return Err(PageError::OffsetOutOfRange {
            offset: low.saturating_add(1),
            total_count,
        });
    }

    let items: Vec<T> = items.into_iter().skip(low).take(high - low).collect();

    Ok(Page {
        returned_count: items.len(),
        items,
        total_count,
        effective_offset: low + 1,
    })
}
