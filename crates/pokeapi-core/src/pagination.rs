//! Paginated envelopes and the page-following iterator.

use std::collections::VecDeque;

use futures_util::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transport::{RequestOptions, Transport};

/// `{count, next, previous, results}` wrapper returned by list endpoints.
///
/// `next`/`previous` are request targets the transport can use as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Lazy sequence of items across pages.
pub type PageStream<T> = BoxStream<'static, Result<T>>;

/// Request target for one page of `collection`, e.g. `/pokemon?limit=20&offset=0`.
pub fn page_target(collection: &str, limit: u32, offset: u32) -> String {
    format!("{collection}?limit={limit}&offset={offset}")
}

struct Cursor<T> {
    transport: Transport,
    options: RequestOptions,
    next: Option<String>,
    buffered: VecDeque<T>,
}

/// Follow `next` links starting at `first`, yielding every item in page
/// order, then in-page order.
///
/// Nothing is fetched until the stream is polled, and a page is only fetched
/// once the previous page's items are consumed. A failed page fetch yields
/// the error and ends the stream.
pub fn iterate<T>(transport: Transport, first: String, options: RequestOptions) -> PageStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    let cursor = Cursor {
        transport,
        options,
        next: Some(first),
        buffered: VecDeque::new(),
    };

    stream::unfold(cursor, |mut cursor| async move {
        loop {
            if let Some(item) = cursor.buffered.pop_front() {
                return Some((Ok(item), cursor));
            }
            let target = cursor.next.take()?;
            tracing::debug!(target = %target, "fetching page");
            match cursor.transport.get::<Page<T>>(&target, &cursor.options).await {
                Ok(page) => {
                    cursor.next = page.next;
                    cursor.buffered.extend(page.results);
                }
                Err(err) => return Some((Err(err), cursor)),
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{transport, RouteFetcher};
    use futures_util::TryStreamExt;
    use std::sync::Arc;

    const FIRST: &str = "http://api.test/items?limit=2&offset=0";
    const SECOND: &str = "http://api.test/items?limit=2&offset=2";

    const PAGE_1: &str = r#"{"count":3,"next":"http://api.test/items?limit=2&offset=2",
        "previous":null,"results":[1,2]}"#;
    const PAGE_2: &str = r#"{"count":3,"next":null,
        "previous":"http://api.test/items?limit=2&offset=0","results":[3]}"#;

    fn numbers(fetcher: &Arc<RouteFetcher>, limit: u32) -> PageStream<u32> {
        iterate::<u32>(
            transport(fetcher),
            page_target("/items", limit, 0),
            RequestOptions::new(),
        )
    }

    #[tokio::test]
    async fn yields_items_across_pages_in_order() {
        let pages = RouteFetcher::new(&[(FIRST, 200, PAGE_1), (SECOND, 200, PAGE_2)]);
        let items: Vec<u32> = numbers(&pages, 2).try_collect().await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(pages.seen(), vec![FIRST, SECOND]);
    }

    #[tokio::test]
    async fn relative_next_is_resolved_against_base_url() {
        let pages = RouteFetcher::new(&[
            (
                FIRST,
                200,
                r#"{"count":3,"next":"/items?limit=2&offset=2","previous":null,"results":[1,2]}"#,
            ),
            (SECOND, 200, PAGE_2),
        ]);
        let items: Vec<u32> = numbers(&pages, 2).try_collect().await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(pages.seen(), vec![FIRST, SECOND]);
    }

    #[tokio::test]
    async fn no_fetch_until_polled_and_no_prefetch() {
        let pages = RouteFetcher::new(&[(FIRST, 200, PAGE_1), (SECOND, 200, PAGE_2)]);
        let mut stream = numbers(&pages, 2);
        assert_eq!(pages.calls(), 0);

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 2);
        assert_eq!(pages.calls(), 1);

        drop(stream);
        assert_eq!(pages.calls(), 1);
    }

    #[tokio::test]
    async fn each_traversal_starts_fresh() {
        let pages = RouteFetcher::new(&[(FIRST, 200, PAGE_2)]);
        for _ in 0..2 {
            let items: Vec<u32> = numbers(&pages, 2).try_collect().await.unwrap();
            assert_eq!(items, vec![3]);
        }
        assert_eq!(pages.calls(), 2);
    }

    #[tokio::test]
    async fn error_is_yielded_once_then_stream_ends() {
        let pages = RouteFetcher::new(&[(FIRST, 200, PAGE_1)]);
        let mut stream = numbers(&pages, 2);

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 2);
        let err = stream.next().await.unwrap().unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn empty_terminal_page_yields_nothing() {
        let pages = RouteFetcher::new(&[(
            "http://api.test/items?limit=5&offset=0",
            200,
            r#"{"count":0,"next":null,"previous":null,"results":[]}"#,
        )]);
        let items: Vec<u32> = numbers(&pages, 5).try_collect().await.unwrap();
        assert!(items.is_empty());
    }
}
