//! Cursor pagination.
//!
//! List endpoints return at most one page per call. When more results exist
//! the envelope carries `next_url`, an absolute URL with an opaque cursor.
//! Nothing here follows it automatically: callers decide whether to fetch
//! the next page with [`Client::next_page`](crate::Client::next_page) or
//! [`Client::get_next`](crate::Client::get_next).

/// Envelopes that may point at a further page.
pub trait Paginated {
    /// Continuation URL of the next page, `None` on the last page.
    fn next_url(&self) -> Option<&str>;

    fn has_next_page(&self) -> bool {
        self.next_url().is_some()
    }
}

/// Treats an empty `next_url` the same as a missing one.
pub(crate) fn non_empty(next_url: &Option<String>) -> Option<&str> {
    next_url.as_deref().filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Agg, ListResponse};

    #[test]
    fn missing_next_url_is_last_page() {
        let page: ListResponse<Agg> =
            serde_json::from_str(r#"{"results":[],"status":"OK","count":0}"#).unwrap();
        assert_eq!(page.next_url(), None);
        assert!(!page.has_next_page());
    }

    #[test]
    fn empty_next_url_is_last_page() {
        let page: ListResponse<Agg> =
            serde_json::from_str(r#"{"results":[],"status":"OK","next_url":""}"#).unwrap();
        assert_eq!(page.next_url(), None);
    }

    #[test]
    fn next_url_is_kept_verbatim() {
        let page: ListResponse<Agg> = serde_json::from_str(
            r#"{"results":[],"status":"OK","next_url":"https://host/x?cursor=abc"}"#,
        )
        .unwrap();
        assert_eq!(page.next_url(), Some("https://host/x?cursor=abc"));
        assert!(page.has_next_page());
    }
}
