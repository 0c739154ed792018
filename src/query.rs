//! Translate a `FilterState` into listing request parameters.
//!
//! Parameters are emitted in a fixed order and omitted entirely when their
//! source field is empty or zero:
//!
//! | field    | parameter            |
//! |----------|----------------------|
//! | `page`   | `page`               |
//! | `limit`  | `limit`              |
//! | `sort`   | `sort`               |
//! | `status` | `filter[status][eq]` |
//! | `cname`  | `filter[name][like]` |
//!
//! The status filter carries the whole comma-joined selection as one
//! equality value; it is not split into one parameter per tag.
//!
//! `priority`, `date_from` and `date_to` are not part of the listing
//! contract. They only drive the chips shown in the filter bar and are never
//! sent to the server.

use url::form_urlencoded;

use crate::models::FilterState;

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const SORT_PARAM: &str = "sort";
pub const STATUS_PARAM: &str = "filter[status][eq]";
pub const NAME_PARAM: &str = "filter[name][like]";

/// Ordered key/value parameters for the listing request
#[must_use]
pub fn build_query(filters: &FilterState) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(5);

    if filters.page != 0 {
        params.push((PAGE_PARAM, filters.page.to_string()));
    }
    if filters.limit != 0 {
        params.push((LIMIT_PARAM, filters.limit.to_string()));
    }
    if !filters.sort.is_empty() {
        params.push((SORT_PARAM, filters.sort.clone()));
    }
    if !filters.status.is_empty() {
        params.push((STATUS_PARAM, filters.status.clone()));
    }
    if !filters.cname.is_empty() {
        params.push((NAME_PARAM, filters.cname.clone()));
    }

    params
}

/// Form-encoded query string (without the leading `?`)
#[must_use]
pub fn query_string(filters: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in build_query(filters) {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}

/// Full listing URL for `base_url`
#[must_use]
pub fn listing_url(base_url: &str, filters: &FilterState) -> String {
    format!(
        "{}/distributions?{}",
        base_url.trim_end_matches('/'),
        query_string(filters)
    )
}
