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

use tf_provider::{AttributePath, Diagnostics};
use uuid::Uuid;

use crate::resolve::{find_by_name, find_id_by_name, Named, Page, ResolveError};

mod directory_group;
mod integration;
mod user;

pub use directory_group::DirectoryGroupDataSource;
pub use integration::IntegrationDataSource;
pub use user::UserDataSource;

fn report(diags: &mut Diagnostics, kind: &str, key: &'static str, value: &str, err: ResolveError) {
    let detail = match err {
        ResolveError::NotFound { .. } => {
            diags.error(
                format!("{kind} not found"),
                format!("There is no {kind} with {key} `{value}`"),
                AttributePath::new(key),
            );
            return;
        }
        err => err.to_string(),
    };
    diags.error(
        format!("Failed to look up {kind}"),
        detail,
        AttributePath::new(key),
    );
}

/// Scan a listing for the `kind` whose `key` attribute is exactly `value`
pub(crate) async fn find<T, F, Fut>(
    diags: &mut Diagnostics,
    kind: &str,
    key: &'static str,
    value: &str,
    fetch_page: F,
) -> Option<T>
where
    T: Named,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<Page<T>>>,
{
    find_by_name(value, fetch_page)
        .await
        .map_err(|err| report(diags, kind, key, value, err))
        .ok()
}

/// Same as [`find`], keeping only the identifier
pub(crate) async fn find_id<T, F, Fut>(
    diags: &mut Diagnostics,
    kind: &str,
    key: &'static str,
    value: &str,
    fetch_page: F,
) -> Option<Uuid>
where
    T: Named,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<Page<T>>>,
{
    find_id_by_name(value, fetch_page)
        .await
        .map_err(|err| report(diags, kind, key, value, err))
        .ok()
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use futures::future::ready;

    use super::*;

    struct Item(Uuid, &'static str);

    impl Named for Item {
        fn id(&self) -> Uuid {
            self.0
        }
        fn name(&self) -> &str {
            self.1
        }
    }

    #[tokio::test]
    async fn not_found_becomes_diagnostic() {
        let mut diags = Diagnostics::default();
        let found = find(&mut diags, "integration", "name", "missing", |_| {
            ready(Ok(Page {
                items: vec![Item(Uuid::nil(), "present")],
                total_pages: 1,
            }))
        })
        .await;

        assert!(found.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_becomes_diagnostic() {
        let mut diags = Diagnostics::default();
        let found = find::<Item, _, _>(&mut diags, "user", "email", "a@b.c", |_| {
            ready(Err(anyhow!("unauthorized")))
        })
        .await;

        assert!(found.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn id_of_match() {
        let mut diags = Diagnostics::default();
        let id = Uuid::from_u128(7);
        let found = find_id(&mut diags, "workflow", "name", "present", |_| {
            ready(Ok(Page {
                items: vec![Item(id, "present")],
                total_pages: 1,
            }))
        })
        .await;

        assert_eq!(found, Some(id));
        assert!(diags.errors.is_empty());
    }
}
