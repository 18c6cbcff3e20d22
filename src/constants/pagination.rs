//! Pagination constants for list endpoints.

/// Default number of items returned when `count` is absent or zero.
pub const DEFAULT_PAGE_COUNT: usize = 100;
