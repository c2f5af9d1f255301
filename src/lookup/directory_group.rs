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

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::schema::{AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueEmpty, ValueString};
use tf_provider::{map, AttributePath, Block, DataSource, Description, Diagnostics, Schema};

use crate::client::models::DirectoryGroup;
use crate::entitle_provider::ProviderData;
use crate::utils::{attribute, WithSchema};

use super::find;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryGroupState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub email: ValueString<'a>,
}

impl<'a> From<DirectoryGroup> for DirectoryGroupState<'a> {
    fn from(group: DirectoryGroup) -> Self {
        Self {
            id: Value::Value(group.id.to_string().into()),
            name: Value::Value(group.name.into()),
            email: group.email.map_or(Value::Null, |email| Value::Value(email.into())),
        }
    }
}

impl<'a> WithSchema for DirectoryGroupState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("Entitle directory group, looked up by name"),
                attributes: map! {
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Identifier of the directory group",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Name of the directory group, matched exactly",
                    ),
                    "email" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Email of the directory group",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct DirectoryGroupDataSource {
    data: Arc<ProviderData>,
}

impl DirectoryGroupDataSource {
    pub fn new(data: Arc<ProviderData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for DirectoryGroupDataSource {
    type State<'a> = DirectoryGroupState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(DirectoryGroupState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Some("") = config.name.as_deref_option() {
            diags.error_short("`name` should not be empty", AttributePath::new("name"));
            return None;
        }
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.data.client(diags).await?;
        let client = &client;
        let name = config.name.as_str();

        let group = find(diags, "directory group", "name", name, move |page| async move {
            client
                .list_directory_groups(page, Some(name))
                .await
                .map_err(anyhow::Error::from)
        })
        .await?;

        Some(group.into())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::client::EntitleClient;

    use super::*;

    #[tokio::test]
    async fn search_results_are_matched_exactly() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/public/v1/directoryGroups");
                then.status(200).json_body(json!({
                    "result": [
                        { "id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa", "name": "Admins" },
                        { "id": "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb", "name": "admins-eu" }
                    ],
                    "pagination": { "totalPages": 1 }
                }));
            })
            .await;

        let client = EntitleClient::new(&server.base_url(), "secret").unwrap();
        let data_source =
            DirectoryGroupDataSource::new(Arc::new(ProviderData::with_client(client)));
        let mut diags = Diagnostics::default();
        let config = DirectoryGroupState {
            name: Value::Value(Cow::Borrowed("admins")),
            ..Default::default()
        };

        let state = data_source.read(&mut diags, config, Value::Null).await;

        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
    }
}
