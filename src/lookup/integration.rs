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

use crate::client::models::Integration;
use crate::entitle_provider::ProviderData;
use crate::utils::{attribute, WithSchema, WithValidate};

use super::find;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub application: ValueString<'a>,
    pub requestable: Value<bool>,
    pub workflow_id: ValueString<'a>,
}

impl<'a> From<Integration> for IntegrationState<'a> {
    fn from(integration: Integration) -> Self {
        Self {
            id: Value::Value(integration.id.to_string().into()),
            name: Value::Value(integration.name.into()),
            application: Value::Value(integration.application.name.into()),
            requestable: Value::Value(integration.requestable),
            workflow_id: integration
                .workflow
                .map_or(Value::Null, |workflow| Value::Value(workflow.id.to_string().into())),
        }
    }
}

impl<'a> WithSchema for IntegrationState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("Entitle integration, looked up by id or by name"),
                attributes: map! {
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Identifier of the integration",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Name of the integration, used when `id` is not set",
                    ),
                    "application" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Name of the application behind the integration",
                    ),
                    "requestable" => attribute(
                        AttributeType::Bool,
                        AttributeConstraint::Computed,
                        "Whether access to the integration can be requested",
                    ),
                    "workflow_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Identifier of the default workflow of the integration",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> WithValidate for IntegrationState<'a> {
    fn validate(&self, diags: &mut Diagnostics) {
        if self.id.is_null() && self.name.is_null() {
            diags.root_error_short("One of `id` or `name` must be set");
        }
    }
}

#[derive(Debug, Default)]
pub struct IntegrationDataSource {
    data: Arc<ProviderData>,
}

impl IntegrationDataSource {
    pub fn new(data: Arc<ProviderData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for IntegrationDataSource {
    type State<'a> = IntegrationState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(IntegrationState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.data.client(diags).await?;

        let integration = if let Some(id) = config.id.as_deref_option() {
            let Ok(id) = id.parse() else {
                diags.error(
                    "Invalid integration id",
                    format!("`{id}` is not a valid integration identifier"),
                    AttributePath::new("id"),
                );
                return None;
            };
            match client.get_integration(id).await {
                Ok(integration) => integration,
                Err(err) => {
                    diags.error(
                        "Failed to read integration",
                        err.to_string(),
                        AttributePath::new("id"),
                    );
                    return None;
                }
            }
        } else {
            let name = config.name.as_str();
            let client = &client;
            find(diags, "integration", "name", name, move |page| async move {
                client
                    .list_integrations(page, Some(name))
                    .await
                    .map_err(anyhow::Error::from)
            })
            .await?
        };

        Some(integration.into())
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
    async fn integration_by_name() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/public/v1/integrations")
                    .query_param("search", "prod-db");
                then.status(200).json_body(json!({
                    "result": [
                        {
                            "id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
                            "name": "prod-db-replica",
                            "application": { "name": "Postgres" }
                        },
                        {
                            "id": "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb",
                            "name": "prod-db",
                            "application": { "name": "Postgres" },
                            "requestable": true,
                            "workflow": { "id": "cccccccc-cccc-4ccc-8ccc-cccccccccccc", "name": "default" }
                        }
                    ],
                    "pagination": { "totalPages": 1 }
                }));
            })
            .await;

        let client = EntitleClient::new(&server.base_url(), "secret").unwrap();
        let data_source = IntegrationDataSource::new(Arc::new(ProviderData::with_client(client)));
        let mut diags = Diagnostics::default();
        let config = IntegrationState {
            name: Value::Value(Cow::Borrowed("prod-db")),
            ..Default::default()
        };

        let state = data_source
            .read(&mut diags, config, Value::Null)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(state.id.as_str(), "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb");
        assert_eq!(state.application.as_str(), "Postgres");
        assert_eq!(state.requestable, Value::Value(true));
        assert_eq!(state.workflow_id.as_str(), "cccccccc-cccc-4ccc-8ccc-cccccccccccc");
    }
}
