// This file is part of the terraform-provider-entitle project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

/// An item listed by the API that can be looked up by its display name
pub trait Named {
    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no item named `{name}` was found")]
    NotFound { name: String },
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Find the item whose name is exactly `name`.
///
/// Pages are fetched sequentially starting at 1, and the scan stops on the first match.
/// If the listing contains several items with the same name, the first one in
/// page-then-item order wins.
pub async fn find_by_name<T, F, Fut>(name: &str, mut fetch_page: F) -> Result<T, ResolveError>
where
    T: Named,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<Page<T>>>,
{
    let mut page = 1;
    loop {
        let fetched = fetch_page(page).await.map_err(|err| ResolveError::Fetch {
            page,
            source: err.into(),
        })?;
        let total_pages = fetched.total_pages;

        if let Some(item) = fetched.items.into_iter().find(|item| item.name() == name) {
            tracing::debug!(name, page, id = %item.id(), "name resolved");
            return Ok(item);
        }

        // A total of 0 pages still means the first page has been scanned
        if page >= total_pages {
            return Err(ResolveError::NotFound {
                name: name.to_owned(),
            });
        }
        page += 1;
    }
}

/// Find the id of the item whose name is exactly `name`, see [`find_by_name`]
pub async fn find_id_by_name<T, F, Fut>(name: &str, fetch_page: F) -> Result<Uuid, ResolveError>
where
    T: Named,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<Page<T>>>,
{
    find_by_name(name, fetch_page).await.map(|item| item.id())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::anyhow;
    use futures::future::{ready, Ready};

    use super::*;

    #[derive(Debug, Clone)]
    struct Item {
        id: Uuid,
        name: &'static str,
    }

    impl Named for Item {
        fn id(&self) -> Uuid {
            self.id
        }
        fn name(&self) -> &str {
            self.name
        }
    }

    fn item(n: u128, name: &'static str) -> Item {
        Item {
            id: Uuid::from_u128(n),
            name,
        }
    }

    /// Serve `pages` in order and record every page index requested
    fn source<'a>(
        pages: &'a [Vec<Item>],
        calls: &'a RefCell<Vec<u32>>,
    ) -> impl FnMut(u32) -> Ready<anyhow::Result<Page<Item>>> + 'a {
        move |page| {
            calls.borrow_mut().push(page);
            let items = pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default();
            ready(Ok(Page {
                items,
                total_pages: pages.len() as u32,
            }))
        }
    }

    #[tokio::test]
    async fn finds_item_on_later_page() {
        let pages = vec![vec![item(1, "x")], vec![item(2, "y")]];
        let calls = RefCell::new(Vec::new());

        let id = find_id_by_name("y", source(&pages, &calls)).await.unwrap();

        assert_eq!(id, Uuid::from_u128(2));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn stops_after_first_match() {
        let calls = RefCell::new(Vec::new());
        let fetch = |page: u32| {
            calls.borrow_mut().push(page);
            if page != 1 {
                panic!("page {page} must not be fetched");
            }
            ready(Ok(Page {
                items: vec![item(1, "a"), item(2, "target")],
                total_pages: 3,
            }))
        };

        let id = find_id_by_name("target", fetch).await.unwrap();

        assert_eq!(id, Uuid::from_u128(2));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn first_duplicate_wins() {
        let pages = vec![
            vec![item(1, "other"), item(2, "dup")],
            vec![item(3, "dup")],
        ];
        let calls = RefCell::new(Vec::new());

        let found = find_by_name("dup", source(&pages, &calls)).await.unwrap();

        assert_eq!(found.id, Uuid::from_u128(2));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn match_is_case_sensitive() {
        let pages = vec![vec![item(1, "Admins")]];
        let calls = RefCell::new(Vec::new());

        let err = find_id_by_name("admins", source(&pages, &calls))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::NotFound { ref name } if name == "admins"));
    }

    #[tokio::test]
    async fn not_found_after_all_pages() {
        let pages = vec![vec![item(1, "a")], vec![item(2, "b")], vec![item(3, "c")]];
        let calls = RefCell::new(Vec::new());

        let err = find_id_by_name("z", source(&pages, &calls))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert_eq!(err.to_string(), "no item named `z` was found");
        assert_eq!(*calls.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn zero_total_pages_scans_once() {
        let calls = RefCell::new(Vec::new());
        let fetch = |page: u32| {
            calls.borrow_mut().push(page);
            ready(Ok(Page {
                items: vec![item(7, "only")],
                total_pages: 0,
            }))
        };

        let id = find_id_by_name("only", fetch).await.unwrap();
        assert_eq!(id, Uuid::from_u128(7));

        calls.borrow_mut().clear();
        let fetch = |page: u32| {
            calls.borrow_mut().push(page);
            ready(Ok(Page::<Item> {
                items: vec![],
                total_pages: 0,
            }))
        };
        let err = find_id_by_name("only", fetch).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn fetch_error_aborts_scan() {
        let calls = RefCell::new(Vec::new());
        let fetch = |page: u32| {
            calls.borrow_mut().push(page);
            ready(match page {
                1 => Ok(Page {
                    items: vec![item(1, "a")],
                    total_pages: 3,
                }),
                _ => Err(anyhow!("connection reset")),
            })
        };

        let err = find_id_by_name("c", fetch).await.unwrap_err();

        match err {
            ResolveError::Fetch { page, source } => {
                assert_eq!(page, 2);
                assert_eq!(source.to_string(), "connection reset");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }
}
