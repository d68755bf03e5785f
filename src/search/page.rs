//! Gallery pagination

/// Default number of photos shown per gallery page
pub const DEFAULT_PER_PAGE: usize = 60;

/// Number of pages needed for `total` items; at least one
#[must_use]
pub const fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 || total == 0 {
        1
    } else {
        total.div_ceil(per_page)
    }
}

/// The items on a 1-based `page`
///
/// Page 0 and pages past the end yield an empty slice. A `per_page` of 0
/// puts everything on page 1.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    if per_page == 0 {
        return if page == 1 { items } else { &[] };
    }

    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}
